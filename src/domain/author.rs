// src/domain/author.rs
//
// Author Entity
//
// The person or network publishing podcasts. Seeded from the catalogue CSV,
// deduplicated by name.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{non_empty_trimmed, DisplayOrder, DomainResult, Podcast};

/// Represents a podcast author
///
/// INVARIANTS:
/// - Name is non-empty and stored trimmed
/// - Identity is the id; two authors with the same id are the same author
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    id: u32,
    name: String,
    /// Ids of the podcasts published by this author
    podcast_ids: Vec<u32>,
}

impl Author {
    pub fn new(id: u32, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: non_empty_trimmed(name, "Author name")?,
            podcast_ids: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = non_empty_trimmed(name, "New name")?;
        Ok(())
    }

    pub fn podcast_ids(&self) -> &[u32] {
        &self.podcast_ids
    }

    pub fn add_podcast(&mut self, podcast: &Podcast) {
        if !self.podcast_ids.contains(&podcast.id()) {
            self.podcast_ids.push(podcast.id());
        }
    }

    pub fn remove_podcast(&mut self, podcast: &Podcast) {
        self.podcast_ids.retain(|id| *id != podcast.id());
    }

    /// Used by the mapping layer when hydrating from the `podcasts` table
    pub(crate) fn with_podcast_ids(mut self, podcast_ids: Vec<u32>) -> Self {
        self.podcast_ids = podcast_ids;
        self
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DisplayOrder for Author {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Author {}: {}>", self.id, self.name)
    }
}
