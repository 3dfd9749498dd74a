// src/services/home_service.rs
use std::sync::Arc;

use super::view_models::{HomeView, PodcastSummary};
use crate::error::AppResult;
use crate::repositories::Repository;

/// Podcasts with an id up to this value are featured on the home page
pub const HOME_PODCAST_LIMIT: u32 = 10;

pub struct HomeService {
    repo: Arc<dyn Repository>,
}

impl HomeService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn get_homepage_podcasts(&self) -> AppResult<HomeView> {
        let podcasts = self
            .repo
            .get_all_podcasts()?
            .iter()
            .filter(|podcast| podcast.id() <= HOME_PODCAST_LIMIT)
            .map(PodcastSummary::from)
            .collect();

        Ok(HomeView { podcasts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_fixtures::memory_repo;

    #[test]
    fn test_only_first_ten_ids_are_featured() {
        let view = HomeService::new(memory_repo()).get_homepage_podcasts().unwrap();
        let ids: Vec<u32> = view.podcasts.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(view.podcasts[0].author, "D Hour Radio Network");
    }

    #[test]
    fn test_empty_repository() {
        let repo: Arc<dyn Repository> = Arc::new(crate::repositories::MemoryRepository::new());
        assert!(HomeService::new(repo).get_homepage_podcasts().unwrap().podcasts.is_empty());
    }
}
