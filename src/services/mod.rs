// src/services/mod.rs
//
// Services Module - one service per feature area
//
// Every service holds an Arc<dyn Repository> and nothing else, so the
// same code runs on either backend.

pub mod authentication_service;
pub mod catalogue_service;
pub mod description_service;
pub mod home_service;
pub mod playlist_service;
pub mod search_service;
pub mod view_models;

#[cfg(test)]
mod test_fixtures;

pub use authentication_service::AuthenticationService;
pub use catalogue_service::{alphabet_bucket, letters, CatalogueService, NON_ALPHA_BUCKET};
pub use description_service::{calculate_average_rating, DescriptionService};
pub use home_service::{HomeService, HOME_PODCAST_LIMIT};
pub use playlist_service::PlaylistService;
pub use search_service::{get_page, number_of_pages, SearchField, SearchService, PAGE_SIZE};
pub use view_models::{
    CatalogueView, EpisodeView, HomeView, NavigationIds, PlaylistView, PodcastDetail,
    PodcastSummary, ReviewView, SearchResultsView, UserView,
};
