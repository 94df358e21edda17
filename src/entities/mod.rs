pub mod prelude;

pub mod episodes;
pub mod genres;
pub mod movie_genres;
pub mod movies;
pub mod profiles;
pub mod reviews;
pub mod tv_show_genres;
pub mod tv_shows;
pub mod watchlist_items;
