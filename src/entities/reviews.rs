use sea_orm::entity::prelude::*;

/// Rating + comment left by an account on one catalog item.
///
/// `(account_id, media_type, media_id)` is unique; resubmission updates the
/// existing row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: i32,
    pub media_type: String,
    pub media_id: i32,
    /// Star rating, 1 through 5.
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
