use crate::entities::prelude::*;
use crate::entities::{episodes, reviews, watchlist_items};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Genres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Movies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TvShows)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Episodes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(MovieGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TvShowGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Profiles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(WatchlistItems)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Reviews)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One row per episode slot within a show.
        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_show_season_number")
                    .table(Episodes)
                    .col(episodes::Column::TvShowId)
                    .col(episodes::Column::SeasonNumber)
                    .col(episodes::Column::EpisodeNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One watchlist row per (profile, catalog item).
        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_profile_media")
                    .table(WatchlistItems)
                    .col(watchlist_items::Column::ProfileId)
                    .col(watchlist_items::Column::MediaType)
                    .col(watchlist_items::Column::MediaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One review per (account, catalog item).
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_account_media")
                    .table(Reviews)
                    .col(reviews::Column::AccountId)
                    .col(reviews::Column::MediaType)
                    .col(reviews::Column::MediaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WatchlistItems).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TvShowGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TvShows).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).to_owned())
            .await?;

        Ok(())
    }
}
