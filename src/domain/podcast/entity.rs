use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{
    non_empty, non_empty_trimmed, Author, Category, DisplayOrder, DomainResult, Episode, Review,
};

pub const DEFAULT_LANGUAGE: &str = "Unspecified";

/// Represents a podcast in the catalogue
/// This is the root aggregate for categories, episodes and reviews
#[derive(Debug, Clone, Serialize)]
pub struct Podcast {
    /// Internal immutable identifier
    id: u32,

    /// Publishing author (REQUIRED)
    author: Author,

    /// Title (trimmed, never empty)
    title: String,

    /// Cover image URL
    image: Option<String>,

    description: String,

    website: String,

    /// Apple Podcasts identifier, when known
    itunes_id: Option<i64>,

    language: String,

    categories: Vec<Category>,

    episodes: Vec<Episode>,

    reviews: Vec<Review>,
}

impl Podcast {
    /// Create a new Podcast with default metadata
    pub fn new(id: u32, author: Author, title: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            author,
            title: non_empty_trimmed(title, "Podcast title")?,
            image: None,
            description: String::new(),
            website: String::new(),
            itunes_id: None,
            language: DEFAULT_LANGUAGE.to_string(),
            categories: Vec::new(),
            episodes: Vec::new(),
            reviews: Vec::new(),
        })
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_itunes_id(mut self, itunes_id: Option<i64>) -> Self {
        self.itunes_id = itunes_id;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn set_author(&mut self, author: Author) {
        self.author = author;
    }

    pub fn itunes_id(&self) -> Option<i64> {
        self.itunes_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> DomainResult<()> {
        self.title = non_empty_trimmed(title, "Podcast title")?;
        Ok(())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn set_website(&mut self, website: &str) -> DomainResult<()> {
        self.website = non_empty(website, "Podcast website")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_category(&mut self, category: Category) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    pub fn remove_category(&mut self, category: &Category) {
        self.categories.retain(|c| c != category);
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn add_episode(&mut self, episode: Episode) {
        if !self.episodes.contains(&episode) {
            self.episodes.push(episode);
        }
    }

    pub fn remove_episode(&mut self, episode: &Episode) {
        self.episodes.retain(|e| e != episode);
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn add_review(&mut self, review: Review) {
        if !self.reviews.contains(&review) {
            self.reviews.push(review);
        }
    }

    pub fn remove_review(&mut self, review: &Review) {
        self.reviews.retain(|r| r != review);
    }
}

impl PartialEq for Podcast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Podcast {}

impl Hash for Podcast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DisplayOrder for Podcast {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }
}

impl std::fmt::Display for Podcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Podcast {}: '{}' by {}>",
            self.id,
            self.title,
            self.author.name()
        )
    }
}
