// src/services/search_service.rs
//
// Case-insensitive substring search over one podcast field, with fixed-size
// pages.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use super::view_models::{summarize, SearchResultsView};
use crate::domain::{sort_for_display, Podcast};
use crate::error::{AppError, AppResult};
use crate::repositories::Repository;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchField {
    Title,
    Author,
    Category,
    Language,
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "category" => Ok(SearchField::Category),
            "language" => Ok(SearchField::Language),
            other => Err(AppError::Validation(format!(
                "Unknown search field '{}'. Expected Title, Author, Category or Language",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Category => "Category",
            SearchField::Language => "Language",
        };
        f.write_str(name)
    }
}

/// Items on a 1-based page. Page 0 and pages past the end are empty.
pub fn get_page<T: Clone>(page: usize, items: &[T]) -> Vec<T> {
    if page == 0 {
        return Vec::new();
    }
    items
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

pub fn number_of_pages(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE)
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub struct SearchService {
    repo: Arc<dyn Repository>,
}

impl SearchService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    fn matching<F>(&self, keep: F) -> AppResult<Vec<Podcast>>
    where
        F: Fn(&Podcast) -> bool,
    {
        let mut podcasts: Vec<Podcast> = self
            .repo
            .get_all_podcasts()?
            .into_iter()
            .filter(|podcast| keep(podcast))
            .collect();
        sort_for_display(&mut podcasts);
        Ok(podcasts)
    }

    pub fn get_podcasts_from_title(&self, title: &str) -> AppResult<Vec<Podcast>> {
        let needle = title.to_lowercase();
        self.matching(|podcast| contains_ignore_case(podcast.title(), &needle))
    }

    pub fn get_podcasts_from_author(&self, author: &str) -> AppResult<Vec<Podcast>> {
        let needle = author.to_lowercase();
        self.matching(|podcast| contains_ignore_case(podcast.author().name(), &needle))
    }

    pub fn get_podcasts_from_category(&self, category: &str) -> AppResult<Vec<Podcast>> {
        let needle = category.to_lowercase();
        self.matching(|podcast| {
            podcast
                .categories()
                .iter()
                .any(|c| contains_ignore_case(c.name(), &needle))
        })
    }

    pub fn get_podcasts_from_language(&self, language: &str) -> AppResult<Vec<Podcast>> {
        let needle = language.to_lowercase();
        self.matching(|podcast| contains_ignore_case(podcast.language(), &needle))
    }

    /// Dispatches on `field`; a blank query matches nothing
    pub fn search(&self, field: SearchField, query: &str) -> AppResult<Vec<Podcast>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        match field {
            SearchField::Title => self.get_podcasts_from_title(query),
            SearchField::Author => self.get_podcasts_from_author(query),
            SearchField::Category => self.get_podcasts_from_category(query),
            SearchField::Language => self.get_podcasts_from_language(query),
        }
    }

    pub fn search_page(
        &self,
        field: SearchField,
        query: &str,
        page: usize,
    ) -> AppResult<SearchResultsView> {
        let results = self.search(field, query)?;
        Ok(SearchResultsView {
            field: field.to_string(),
            query: query.to_string(),
            page,
            total_pages: number_of_pages(results.len()),
            total_results: results.len(),
            podcasts: summarize(&get_page(page, &results)),
        })
    }
}
