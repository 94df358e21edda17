pub use super::episodes::Entity as Episodes;
pub use super::genres::Entity as Genres;
pub use super::movie_genres::Entity as MovieGenres;
pub use super::movies::Entity as Movies;
pub use super::profiles::Entity as Profiles;
pub use super::reviews::Entity as Reviews;
pub use super::tv_show_genres::Entity as TvShowGenres;
pub use super::tv_shows::Entity as TvShows;
pub use super::watchlist_items::Entity as WatchlistItems;
