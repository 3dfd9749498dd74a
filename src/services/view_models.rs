// src/services/view_models.rs
//
// Serializable shapes returned by the services to the outer surface.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::{Episode, Playlist, Podcast, Review};

/// The flat podcast card shown in lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastSummary {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub description: String,
    pub website: String,
    pub itunes_id: Option<i64>,
    pub language: String,
}

impl From<&Podcast> for PodcastSummary {
    fn from(podcast: &Podcast) -> Self {
        Self {
            id: podcast.id(),
            title: podcast.title().to_string(),
            author: podcast.author().name().to_string(),
            image: podcast.image().map(str::to_string),
            description: podcast.description().to_string(),
            website: podcast.website().to_string(),
            itunes_id: podcast.itunes_id(),
            language: podcast.language().to_string(),
        }
    }
}

pub fn summarize(podcasts: &[Podcast]) -> Vec<PodcastSummary> {
    podcasts.iter().map(PodcastSummary::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeView {
    pub id: u32,
    pub podcast_id: u32,
    pub title: String,
    pub audio_link: String,
    pub audio_length: u32,
    pub description: String,
    pub pub_date: Option<DateTime<FixedOffset>>,
}

impl From<&Episode> for EpisodeView {
    fn from(episode: &Episode) -> Self {
        Self {
            id: episode.id(),
            podcast_id: episode.podcast_id(),
            title: episode.title().to_string(),
            audio_link: episode.audio_link().to_string(),
            audio_length: episode.audio_length(),
            description: episode.description().to_string(),
            pub_date: episode.pub_date(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewView {
    pub id: u32,
    pub user_name: String,
    pub rating: u8,
    pub content: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id(),
            user_name: review.user().username().to_string(),
            rating: review.rating(),
            content: review.content().to_string(),
        }
    }
}

/// Full description page for one podcast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastDetail {
    #[serde(flatten)]
    pub summary: PodcastSummary,
    pub categories: Vec<String>,
    /// Sorted by title
    pub episodes: Vec<EpisodeView>,
    /// Sorted by rating, lowest first
    pub reviews: Vec<ReviewView>,
    pub average_rating: f64,
}

/// Neighbours in title order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationIds {
    pub previous_id: Option<u32>,
    pub next_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueView {
    pub podcasts: Vec<PodcastSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub podcasts: Vec<PodcastSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultsView {
    pub field: String,
    pub query: String,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub podcasts: Vec<PodcastSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistView {
    pub id: u32,
    pub name: String,
    pub owner: String,
    pub episodes: Vec<EpisodeView>,
}

impl From<&Playlist> for PlaylistView {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id(),
            name: playlist.name().to_string(),
            owner: playlist.owner().username().to_string(),
            episodes: playlist.episodes().iter().map(EpisodeView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub user_name: String,
    pub password: String,
}
