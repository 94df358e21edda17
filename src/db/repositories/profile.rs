use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, profiles};

/// Repository for streaming profiles.
pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Profiles owned by an account, in creation order.
    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<profiles::Model>> {
        Ok(Profiles::find()
            .filter(profiles::Column::AccountId.eq(account_id))
            .order_by_asc(profiles::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    /// A profile only if it belongs to the given account.
    pub async fn get_for_account(
        &self,
        id: i32,
        account_id: i32,
    ) -> Result<Option<profiles::Model>> {
        Ok(Profiles::find_by_id(id)
            .filter(profiles::Column::AccountId.eq(account_id))
            .one(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<profiles::Model>> {
        Ok(Profiles::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create(
        &self,
        account_id: i32,
        name: &str,
        avatar: Option<&str>,
    ) -> Result<profiles::Model> {
        let active = profiles::ActiveModel {
            account_id: Set(account_id),
            name: Set(name.to_string()),
            avatar: Set(avatar.map(str::to_string)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        let id = Profiles::insert(active).exec(&self.conn).await?.last_insert_id;
        info!("Created profile {} for account {}", id, account_id);

        self.get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile {id} missing after insert"))
    }

    /// Removes a profile owned by the account; watchlist rows cascade.
    pub async fn remove_for_account(&self, id: i32, account_id: i32) -> Result<bool> {
        let res = Profiles::delete_many()
            .filter(profiles::Column::Id.eq(id))
            .filter(profiles::Column::AccountId.eq(account_id))
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
