//! Shared domain vocabulary used across the store, services, and API layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind discriminant persisted in `watchlist_items.media_type` and
/// `reviews.media_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    TvShow,
}

impl MediaKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvShow => "tv_show",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Self::Movie),
            "tv_show" | "tvshow" => Some(Self::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to exactly one catalog item.
///
/// Watchlist entries and reviews point at either a movie or a show, never
/// both and never neither; this enum makes the invalid combinations
/// unrepresentable instead of modelling them as two nullable foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaRef {
    Movie(i32),
    Show(i32),
}

impl MediaRef {
    #[must_use]
    pub const fn new(kind: MediaKind, id: i32) -> Self {
        match kind {
            MediaKind::Movie => Self::Movie(id),
            MediaKind::TvShow => Self::Show(id),
        }
    }

    #[must_use]
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Show(_) => MediaKind::TvShow,
        }
    }

    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Movie(id) | Self::Show(id) => id,
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_column_values() {
        assert_eq!(MediaKind::parse("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::parse("tv_show"), Some(MediaKind::TvShow));
        assert_eq!(MediaKind::parse("tvshow"), Some(MediaKind::TvShow));
        assert_eq!(MediaKind::parse("album"), None);
        assert_eq!(MediaKind::Movie.as_str(), "movie");
        assert_eq!(MediaKind::TvShow.as_str(), "tv_show");
    }

    #[test]
    fn media_ref_carries_kind_and_id() {
        let movie = MediaRef::new(MediaKind::Movie, 7);
        assert_eq!(movie, MediaRef::Movie(7));
        assert_eq!(movie.kind(), MediaKind::Movie);
        assert_eq!(movie.id(), 7);

        let show = MediaRef::new(MediaKind::TvShow, 3);
        assert_eq!(show.kind(), MediaKind::TvShow);
        assert_eq!(show.id(), 3);
    }
}
