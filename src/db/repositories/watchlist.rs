use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::debug;

use crate::domain::{MediaKind, MediaRef};
use crate::entities::{prelude::*, watchlist_items};

/// Repository for per-profile watchlists.
pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Idempotent add. Returns `true` when a row was inserted, `false` when
    /// the item was already on the list.
    pub async fn add(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        let active = watchlist_items::ActiveModel {
            profile_id: Set(profile_id),
            media_type: Set(media.kind().as_str().to_string()),
            media_id: Set(media.id()),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let insert = WatchlistItems::insert(active).on_conflict(
            OnConflict::columns([
                watchlist_items::Column::ProfileId,
                watchlist_items::Column::MediaType,
                watchlist_items::Column::MediaId,
            ])
            .do_nothing()
            .to_owned(),
        );

        match insert.exec(&self.conn).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => {
                debug!("Watchlist entry already present: profile {profile_id}, {media}");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the matching row if present; absent rows are a no-op.
    pub async fn remove(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        let res = WatchlistItems::delete_many()
            .filter(watchlist_items::Column::ProfileId.eq(profile_id))
            .filter(watchlist_items::Column::MediaType.eq(media.kind().as_str()))
            .filter(watchlist_items::Column::MediaId.eq(media.id()))
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn contains(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        let count = WatchlistItems::find()
            .filter(watchlist_items::Column::ProfileId.eq(profile_id))
            .filter(watchlist_items::Column::MediaType.eq(media.kind().as_str()))
            .filter(watchlist_items::Column::MediaId.eq(media.id()))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Items for a profile, newest first.
    pub async fn list_for_profile(&self, profile_id: i32) -> Result<Vec<watchlist_items::Model>> {
        Ok(WatchlistItems::find()
            .filter(watchlist_items::Column::ProfileId.eq(profile_id))
            .order_by_desc(watchlist_items::Column::AddedAt)
            .all(&self.conn)
            .await?)
    }

    /// Movie ids saved by a profile, newest first.
    pub async fn movie_ids_for_profile(&self, profile_id: i32) -> Result<Vec<i32>> {
        let rows = WatchlistItems::find()
            .filter(watchlist_items::Column::ProfileId.eq(profile_id))
            .filter(watchlist_items::Column::MediaType.eq(MediaKind::Movie.as_str()))
            .order_by_desc(watchlist_items::Column::AddedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(|r| r.media_id).collect())
    }
}
