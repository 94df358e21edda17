use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::debug;

use crate::domain::MediaRef;
use crate::entities::{prelude::*, reviews};

/// Repository for ratings and comments.
pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create-or-update keyed by `(account, media ref)`. Resubmission
    /// overwrites rating and comment; `created_at` is preserved.
    pub async fn upsert(
        &self,
        account_id: i32,
        media: MediaRef,
        rating: i32,
        comment: &str,
    ) -> Result<reviews::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let existing = Reviews::find()
            .filter(reviews::Column::AccountId.eq(account_id))
            .filter(reviews::Column::MediaType.eq(media.kind().as_str()))
            .filter(reviews::Column::MediaId.eq(media.id()))
            .one(&self.conn)
            .await?;

        let model = if let Some(existing) = existing {
            debug!("Updating review {} for account {account_id}", existing.id);
            let mut active: reviews::ActiveModel = existing.into();
            active.rating = Set(rating);
            active.comment = Set(comment.to_string());
            active.updated_at = Set(now);
            active.update(&self.conn).await?
        } else {
            let active = reviews::ActiveModel {
                account_id: Set(account_id),
                media_type: Set(media.kind().as_str().to_string()),
                media_id: Set(media.id()),
                rating: Set(rating),
                comment: Set(comment.to_string()),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };
            active.insert(&self.conn).await?
        };

        Ok(model)
    }

    /// Latest reviews for one catalog item, newest first.
    pub async fn latest_for_media(&self, media: MediaRef, limit: u64) -> Result<Vec<reviews::Model>> {
        Ok(Reviews::find()
            .filter(reviews::Column::MediaType.eq(media.kind().as_str()))
            .filter(reviews::Column::MediaId.eq(media.id()))
            .order_by_desc(reviews::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }
}
