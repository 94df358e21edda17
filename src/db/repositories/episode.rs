use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{episodes, prelude::*};

/// Input for inserting an episode.
#[derive(Debug, Clone)]
pub struct NewEpisode {
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub video_url: String,
    pub release_date: String,
}

/// Repository for episode lookups within a show.
pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<episodes::Model>> {
        Ok(Episodes::find_by_id(id).one(&self.conn).await?)
    }

    /// All episodes of a show, season then episode order.
    pub async fn for_show(&self, tv_show_id: i32) -> Result<Vec<episodes::Model>> {
        Ok(Episodes::find()
            .filter(episodes::Column::TvShowId.eq(tv_show_id))
            .order_by_asc(episodes::Column::SeasonNumber)
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await?)
    }

    /// Previous and next episode within the same season, by episode number.
    pub async fn neighbors(
        &self,
        episode: &episodes::Model,
    ) -> Result<(Option<episodes::Model>, Option<episodes::Model>)> {
        let prev = Episodes::find()
            .filter(episodes::Column::TvShowId.eq(episode.tv_show_id))
            .filter(episodes::Column::SeasonNumber.eq(episode.season_number))
            .filter(episodes::Column::EpisodeNumber.lt(episode.episode_number))
            .order_by_desc(episodes::Column::EpisodeNumber)
            .one(&self.conn)
            .await?;

        let next = Episodes::find()
            .filter(episodes::Column::TvShowId.eq(episode.tv_show_id))
            .filter(episodes::Column::SeasonNumber.eq(episode.season_number))
            .filter(episodes::Column::EpisodeNumber.gt(episode.episode_number))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .one(&self.conn)
            .await?;

        Ok((prev, next))
    }

    pub async fn insert(&self, episode: &NewEpisode) -> Result<i32> {
        let active = episodes::ActiveModel {
            tv_show_id: Set(episode.tv_show_id),
            season_number: Set(episode.season_number),
            episode_number: Set(episode.episode_number),
            title: Set(episode.title.clone()),
            description: Set(episode.description.clone()),
            duration: Set(episode.duration),
            video_url: Set(episode.video_url.clone()),
            release_date: Set(episode.release_date.clone()),
            ..Default::default()
        };
        let res = Episodes::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }
}
