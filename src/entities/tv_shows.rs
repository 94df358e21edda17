use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tv_shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    /// ISO-8601 date of the first air date.
    pub release_date: String,
    pub rating: f32,
    pub poster: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
    #[sea_orm(has_many = "super::tv_show_genres::Entity")]
    TvShowGenres,
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::tv_show_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvShowGenres.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::tv_show_genres::Relation::Genre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::tv_show_genres::Relation::TvShow.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
