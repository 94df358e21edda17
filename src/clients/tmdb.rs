//! Read-only client for the TMDB movie-metadata API.
//!
//! Two calls per lookup: a title search, then a details fetch with images
//! and videos appended. Best-effort semantics live in the enrichment
//! service; this client just reports errors.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const TMDB_API: &str = "https://api.themoviedb.org/3";

pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieMatch {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub videos: VideoList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub site: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub video_type: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: TMDB_API.to_string(),
        }
    }

    /// Points the client at a different host; used by tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Best title match, if any. Year narrows the search when known.
    pub async fn search_movie(&self, title: &str, year: Option<i32>) -> Result<Option<MovieMatch>> {
        let mut url = format!(
            "{}/search/movie?api_key={}&query={}&include_adult=false",
            self.base_url,
            self.api_key,
            urlencoding::encode(title)
        );
        if let Some(year) = year {
            url.push_str(&format!("&year={year}"));
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        let payload: SearchResponse = response.json().await?;

        Ok(payload.results.into_iter().next())
    }

    /// Details with image/video data appended in one round trip.
    pub async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails> {
        let url = format!(
            "{}/movie/{}?api_key={}&append_to_response=images,videos",
            self.base_url, self.api_key, tmdb_id
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}
