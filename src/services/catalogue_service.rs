// src/services/catalogue_service.rs
//
// Alphabetical browsing. Titles are bucketed by their upper-cased first
// character; anything that is not a letter goes to '#'.

use std::sync::Arc;

use super::view_models::{CatalogueView, PodcastSummary};
use crate::domain::Podcast;
use crate::error::AppResult;
use crate::repositories::Repository;

/// Bucket for titles that do not start with a letter
pub const NON_ALPHA_BUCKET: char = '#';

/// The bucket a title is listed under
pub fn alphabet_bucket(title: &str) -> char {
    match title.chars().next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().next().unwrap_or(first),
        _ => NON_ALPHA_BUCKET,
    }
}

/// Every selectable bucket: A-Z then '#'
pub fn letters() -> Vec<char> {
    ('A'..='Z').chain(std::iter::once(NON_ALPHA_BUCKET)).collect()
}

pub struct CatalogueService {
    repo: Arc<dyn Repository>,
}

impl CatalogueService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Podcasts whose title falls under `letter`, sorted case-insensitively
    pub fn get_podcasts_by_letter(&self, letter: &str) -> AppResult<CatalogueView> {
        let letter = letter.to_uppercase();
        let non_alpha = letter.starts_with(NON_ALPHA_BUCKET);

        let mut podcasts: Vec<Podcast> = self
            .repo
            .get_all_podcasts()?
            .into_iter()
            .filter(|podcast| {
                if non_alpha {
                    alphabet_bucket(podcast.title()) == NON_ALPHA_BUCKET
                } else {
                    podcast.title().to_uppercase().starts_with(&letter)
                }
            })
            .collect();
        podcasts.sort_by_cached_key(|podcast| podcast.title().to_uppercase());

        Ok(CatalogueView {
            podcasts: podcasts.iter().map(PodcastSummary::from).collect(),
        })
    }
}
