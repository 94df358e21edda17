pub mod catalog;
pub mod episode;
pub mod profile;
pub mod review;
pub mod watchlist;
