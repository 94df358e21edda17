//! Store-level tests for catalog removal and cascade behavior.

use flixarr::db::{NewEpisode, NewMovie, NewShow, Store};
use flixarr::domain::MediaRef;

async fn seeded_store() -> Store {
    let store = Store::new("sqlite::memory:").await.expect("store");
    flixarr::services::seed_catalog(&store).await.expect("seed");
    store
}

#[tokio::test]
async fn ping_reports_healthy_connection() {
    let store = seeded_store().await;
    store.ping().await.expect("ping should succeed");
}

#[tokio::test]
async fn removing_a_movie_drops_its_genre_links() {
    let store = seeded_store().await;

    let movie_id = store
        .insert_movie(&NewMovie {
            title: "Disposable".to_string(),
            description: "Short-lived test entry".to_string(),
            release_date: "2020-01-01".to_string(),
            duration: 90,
            rating: 5.0,
            poster: None,
            trailer_url: None,
            featured: false,
            genre_ids: vec![1, 2],
        })
        .await
        .expect("insert");

    assert_eq!(store.genres_for_movie(movie_id).await.unwrap().len(), 2);

    assert!(store.remove_movie(movie_id).await.unwrap());
    assert!(store.get_movie(movie_id).await.unwrap().is_none());
    assert!(store.genres_for_movie(movie_id).await.unwrap().is_empty());

    // Removing a missing id reports false instead of erroring.
    assert!(!store.remove_movie(movie_id).await.unwrap());
}

#[tokio::test]
async fn removing_a_show_drops_its_episodes() {
    let store = seeded_store().await;

    let show_id = store
        .insert_show(&NewShow {
            title: "Disposable Show".to_string(),
            description: "Short-lived test entry".to_string(),
            release_date: "2021-01-01".to_string(),
            rating: 6.0,
            poster: None,
            trailer_url: None,
            featured: false,
            genre_ids: vec![3],
        })
        .await
        .expect("insert");

    let episode_id = store
        .insert_episode(&NewEpisode {
            tv_show_id: show_id,
            season_number: 1,
            episode_number: 1,
            title: "Pilot".to_string(),
            description: String::new(),
            duration: 40,
            video_url: "https://example.com/video".to_string(),
            release_date: "2021-01-01".to_string(),
        })
        .await
        .expect("insert episode");

    assert!(store.remove_show(show_id).await.unwrap());
    assert!(store.get_episode(episode_id).await.unwrap().is_none());
    assert!(store.episodes_for_show(show_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_episode_numbering_is_rejected() {
    let store = seeded_store().await;

    // Stranger Things already has S01E01 in the sample catalog.
    let duplicate = NewEpisode {
        tv_show_id: 1,
        season_number: 1,
        episode_number: 1,
        title: "Imposter".to_string(),
        description: String::new(),
        duration: 40,
        video_url: "https://example.com/video".to_string(),
        release_date: "2016-07-15".to_string(),
    };

    assert!(store.insert_episode(&duplicate).await.is_err());
}

#[tokio::test]
async fn watchlist_rows_survive_media_removal_but_resolve_empty() {
    let store = seeded_store().await;

    let profile = store.create_profile(1, "Main", None).await.unwrap();

    let movie_id = store
        .insert_movie(&NewMovie {
            title: "Vanishing".to_string(),
            description: "Removed while listed".to_string(),
            release_date: "2019-01-01".to_string(),
            duration: 100,
            rating: 7.0,
            poster: None,
            trailer_url: None,
            featured: false,
            genre_ids: vec![],
        })
        .await
        .unwrap();

    assert!(store
        .add_to_watchlist(profile.id, MediaRef::Movie(movie_id))
        .await
        .unwrap());

    store.remove_movie(movie_id).await.unwrap();

    // The row is still there, but the media it points at is gone; the API
    // layer skips such rows when rendering the list.
    let rows = store.watchlist_for_profile(profile.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(store.get_movie(rows[0].media_id).await.unwrap().is_none());
}

#[tokio::test]
async fn latest_reviews_are_capped_and_newest_first() {
    let store = seeded_store().await;
    let media = MediaRef::Movie(1);

    for account_id in 1..=7 {
        store
            .upsert_review(account_id, media, 3, "fine")
            .await
            .unwrap();
    }

    let reviews = store.latest_reviews(media, 5).await.unwrap();
    assert_eq!(reviews.len(), 5);

    // Upserting does not change created_at, so the order stays stable.
    let timestamps: Vec<&str> = reviews.iter().map(|r| r.created_at.as_str()).collect();
    let mut sorted = timestamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted);
}
