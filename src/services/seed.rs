//! Sample catalog data for demos and local development.

use std::collections::HashMap;

use anyhow::Result;
use tracing::info;

use crate::db::{NewEpisode, NewMovie, NewShow, Store};

struct SeedMovie {
    title: &'static str,
    description: &'static str,
    release_date: &'static str,
    duration: i32,
    rating: f32,
    genres: &'static [&'static str],
}

struct SeedShow {
    title: &'static str,
    description: &'static str,
    release_date: &'static str,
    rating: f32,
    genres: &'static [&'static str],
    episodes: &'static [SeedEpisode],
}

struct SeedEpisode {
    season: i32,
    episode: i32,
    title: &'static str,
    description: &'static str,
    duration: i32,
}

const GENRES: &[(&str, &str)] = &[
    ("Action", "High-energy movies with lots of action sequences"),
    ("Comedy", "Funny movies that will make you laugh"),
    ("Drama", "Serious plot-driven stories"),
    ("Horror", "Scary movies to give you chills"),
    ("Sci-Fi", "Science fiction and futuristic stories"),
    ("Romance", "Love stories and romantic comedies"),
    ("Thriller", "Suspenseful and exciting movies"),
    ("Fantasy", "Magical and fantastical stories"),
    ("Documentary", "Non-fiction educational content"),
    ("Animation", "Animated movies and series"),
];

const MOVIES: &[SeedMovie] = &[
    SeedMovie {
        title: "The Dark Knight",
        description: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.",
        release_date: "2008-07-18",
        duration: 152,
        rating: 9.0,
        genres: &["Action", "Drama", "Thriller"],
    },
    SeedMovie {
        title: "Inception",
        description: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
        release_date: "2010-07-16",
        duration: 148,
        rating: 8.8,
        genres: &["Action", "Sci-Fi", "Thriller"],
    },
    SeedMovie {
        title: "Pulp Fiction",
        description: "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
        release_date: "1994-10-14",
        duration: 154,
        rating: 8.9,
        genres: &["Drama"],
    },
    SeedMovie {
        title: "The Shawshank Redemption",
        description: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        release_date: "1994-09-23",
        duration: 142,
        rating: 9.3,
        genres: &["Drama"],
    },
    SeedMovie {
        title: "Interstellar",
        description: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
        release_date: "2014-11-07",
        duration: 169,
        rating: 8.6,
        genres: &["Drama", "Sci-Fi"],
    },
    SeedMovie {
        title: "The Matrix",
        description: "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
        release_date: "1999-03-31",
        duration: 136,
        rating: 8.7,
        genres: &["Action", "Sci-Fi"],
    },
];

const SHOWS: &[SeedShow] = &[
    SeedShow {
        title: "Stranger Things",
        description: "When a young boy vanishes, a small town uncovers a mystery involving secret experiments, terrifying supernatural forces, and one strange little girl.",
        release_date: "2016-07-15",
        rating: 8.7,
        genres: &["Drama", "Fantasy", "Horror"],
        episodes: &[
            SeedEpisode { season: 1, episode: 1, title: "Chapter One: The Vanishing of Will Byers", description: "On his way home from a friend's house, young Will sees something terrifying.", duration: 48 },
            SeedEpisode { season: 1, episode: 2, title: "Chapter Two: The Weirdo on Maple Street", description: "Lucas, Mike and Dustin try to talk to the girl they found in the woods.", duration: 56 },
            SeedEpisode { season: 1, episode: 3, title: "Chapter Three: Holly, Jolly", description: "An increasingly concerned Nancy looks for Barb and finds out what Jonathan's been up to.", duration: 51 },
            SeedEpisode { season: 2, episode: 1, title: "Chapter Nine: The Gate", description: "The gang discovers the truth about the Upside Down.", duration: 62 },
        ],
    },
    SeedShow {
        title: "Breaking Bad",
        description: "A high school chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing and selling methamphetamine in order to secure his family's future.",
        release_date: "2008-01-20",
        rating: 9.5,
        genres: &["Drama", "Thriller"],
        episodes: &[
            SeedEpisode { season: 1, episode: 1, title: "Pilot", description: "A high school chemistry teacher discovers he has lung cancer.", duration: 58 },
            SeedEpisode { season: 1, episode: 2, title: "Cat's in the Bag...", description: "Walt and Jesse try to dispose of two bodies.", duration: 48 },
            SeedEpisode { season: 1, episode: 3, title: "...And the Bag's in the River", description: "Walt and Jesse face the consequences of their actions.", duration: 50 },
        ],
    },
    SeedShow {
        title: "The Crown",
        description: "Follows the political rivalries and romance of Queen Elizabeth II's reign and the events that shaped the second half of the 20th century.",
        release_date: "2016-11-04",
        rating: 8.6,
        genres: &["Drama"],
        episodes: &[],
    },
    SeedShow {
        title: "Black Mirror",
        description: "An anthology series exploring a twisted, high-tech multiverse where humanity's greatest innovations and darkest instincts collide.",
        release_date: "2011-12-04",
        rating: 8.8,
        genres: &["Drama", "Sci-Fi", "Thriller"],
        episodes: &[],
    },
];

/// Inserts the sample genres, movies, shows, and episodes. Intended for a
/// fresh database; reseeding an existing one will fail on the unique genre
/// names rather than duplicate content.
pub async fn seed_catalog(store: &Store) -> Result<()> {
    let mut genre_ids: HashMap<&str, i32> = HashMap::new();
    for (name, description) in GENRES {
        let id = store.insert_genre(name, description).await?;
        genre_ids.insert(name, id);
    }
    info!("Seeded {} genres", GENRES.len());

    let resolve = |names: &[&str], genre_ids: &HashMap<&str, i32>| -> Vec<i32> {
        names.iter().filter_map(|n| genre_ids.get(n).copied()).collect()
    };

    for movie in MOVIES {
        store
            .insert_movie(&NewMovie {
                title: movie.title.to_string(),
                description: movie.description.to_string(),
                release_date: movie.release_date.to_string(),
                duration: movie.duration,
                rating: movie.rating,
                poster: None,
                trailer_url: None,
                featured: true,
                genre_ids: resolve(movie.genres, &genre_ids),
            })
            .await?;
    }
    info!("Seeded {} movies", MOVIES.len());

    for show in SHOWS {
        let show_id = store
            .insert_show(&NewShow {
                title: show.title.to_string(),
                description: show.description.to_string(),
                release_date: show.release_date.to_string(),
                rating: show.rating,
                poster: None,
                trailer_url: None,
                featured: true,
                genre_ids: resolve(show.genres, &genre_ids),
            })
            .await?;

        for ep in show.episodes {
            store
                .insert_episode(&NewEpisode {
                    tv_show_id: show_id,
                    season_number: ep.season,
                    episode_number: ep.episode,
                    title: ep.title.to_string(),
                    description: ep.description.to_string(),
                    duration: ep.duration,
                    video_url: "https://example.com/video".to_string(),
                    release_date: show.release_date.to_string(),
                })
                .await?;
        }
    }
    info!("Seeded {} TV shows", SHOWS.len());

    Ok(())
}
