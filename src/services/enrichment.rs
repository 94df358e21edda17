//! Best-effort decoration of movie pages with TMDB imagery and trailers.
//!
//! Enrichment never fails a page render: a missing API key, an unreachable
//! host, a timeout, a malformed payload, or simply no match all produce the
//! same empty [`MovieEnrichment`]. Only genuinely expected failure modes are
//! swallowed here; the client reports them and this service downgrades them
//! to a debug log.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::clients::tmdb::{BACKDROP_BASE, POSTER_BASE, TmdbClient, Video};

/// Externally sourced decoration for a movie detail page. All fields empty
/// when enrichment is disabled or the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieEnrichment {
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// Expected failure modes of an enrichment lookup.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("TMDB request failed: {0}")]
    Request(#[from] anyhow::Error),
}

pub struct EnrichmentService {
    tmdb: Option<TmdbClient>,
}

impl EnrichmentService {
    #[must_use]
    pub const fn new(tmdb: Option<TmdbClient>) -> Self {
        Self { tmdb }
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.tmdb.is_some()
    }

    /// Looks up poster/backdrop/trailer for a movie. Infallible by design;
    /// any expected failure yields empty fields.
    pub async fn enrich_movie(&self, title: &str, release_date: &str) -> MovieEnrichment {
        let Some(tmdb) = &self.tmdb else {
            return MovieEnrichment::default();
        };

        if title.is_empty() {
            return MovieEnrichment::default();
        }

        match Self::lookup(tmdb, title, release_year(release_date)).await {
            Ok(enrichment) => enrichment,
            Err(e) => {
                debug!("Enrichment lookup for '{}' failed: {}", title, e);
                MovieEnrichment::default()
            }
        }
    }

    async fn lookup(
        tmdb: &TmdbClient,
        title: &str,
        year: Option<i32>,
    ) -> Result<MovieEnrichment, EnrichmentError> {
        let Some(found) = tmdb.search_movie(title, year).await? else {
            debug!("No TMDB match for '{}'", title);
            return Ok(MovieEnrichment::default());
        };

        let details = tmdb.movie_details(found.id).await?;

        Ok(MovieEnrichment {
            poster_url: details
                .poster_path
                .map(|p| format!("{POSTER_BASE}{p}")),
            backdrop_url: details
                .backdrop_path
                .map(|p| format!("{BACKDROP_BASE}{p}")),
            trailer_url: first_trailer_url(&details.videos.results),
        })
    }
}

/// Year component of an ISO date, when parseable.
fn release_year(date: &str) -> Option<i32> {
    date.split('-').next()?.parse().ok()
}

/// First YouTube-hosted trailer or teaser, as a watch URL.
fn first_trailer_url(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| {
            v.site.as_deref() == Some("YouTube")
                && v.key.is_some()
                && matches!(v.video_type.as_deref(), Some("Trailer" | "Teaser"))
        })
        .and_then(|v| v.key.as_ref())
        .map(|key| format!("https://www.youtube.com/watch?v={key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(site: &str, key: &str, video_type: &str) -> Video {
        Video {
            site: Some(site.to_string()),
            key: Some(key.to_string()),
            video_type: Some(video_type.to_string()),
        }
    }

    #[test]
    fn release_year_parses_iso_dates() {
        assert_eq!(release_year("2008-07-18"), Some(2008));
        assert_eq!(release_year("1994"), Some(1994));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("not-a-date"), None);
    }

    #[test]
    fn trailer_selection_skips_clips_and_other_hosts() {
        let videos = vec![
            video("Vimeo", "v1", "Trailer"),
            video("YouTube", "c1", "Clip"),
            video("YouTube", "t1", "Teaser"),
            video("YouTube", "t2", "Trailer"),
        ];

        assert_eq!(
            first_trailer_url(&videos),
            Some("https://www.youtube.com/watch?v=t1".to_string())
        );
    }

    #[test]
    fn trailer_selection_handles_missing_fields() {
        let videos = vec![
            Video {
                site: Some("YouTube".to_string()),
                key: None,
                video_type: Some("Trailer".to_string()),
            },
            Video {
                site: None,
                key: Some("k".to_string()),
                video_type: Some("Trailer".to_string()),
            },
        ];

        assert_eq!(first_trailer_url(&videos), None);
        assert_eq!(first_trailer_url(&[]), None);
    }

    #[tokio::test]
    async fn disabled_service_returns_empty_enrichment() {
        let service = EnrichmentService::new(None);
        assert!(!service.enabled());
        assert_eq!(
            service.enrich_movie("Inception", "2010-07-16").await,
            MovieEnrichment::default()
        );
    }
}
