use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    /// Runtime in minutes.
    pub duration: i32,
    pub video_url: String,
    pub release_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tv_shows::Entity",
        from = "Column::TvShowId",
        to = "super::tv_shows::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TvShow,
}

impl Related<super::tv_shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvShow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
