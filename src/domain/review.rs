// src/domain/review.rs
//
// Review Entity
//
// A user's rating (1-5) and comment on a podcast.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{non_empty_trimmed, DisplayOrder, DomainError, DomainResult, Podcast, User};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    id: u32,
    podcast_id: u32,
    user: User,
    rating: u8,
    content: String,
}

impl Review {
    pub fn new(id: u32, podcast: &Podcast, user: User, rating: u8, content: &str) -> DomainResult<Self> {
        Self::for_podcast_id(id, podcast.id(), user, rating, content)
    }

    /// Used when the podcast is only known by id (stored rows)
    pub(crate) fn for_podcast_id(
        id: u32,
        podcast_id: u32,
        user: User,
        rating: u8,
        content: &str,
    ) -> DomainResult<Self> {
        validate_rating(rating)?;
        Ok(Self {
            id,
            podcast_id,
            user,
            rating,
            content: non_empty_trimmed(content, "Review content")?,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn podcast_id(&self) -> u32 {
        self.podcast_id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_rating(&mut self, rating: u8) -> DomainResult<()> {
        validate_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) -> DomainResult<()> {
        self.content = non_empty_trimmed(content, "Review description")?;
        Ok(())
    }
}

/// Rating must be within 1..=5
pub fn validate_rating(rating: u8) -> DomainResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::RatingOutOfRange(i64::from(rating)));
    }
    Ok(())
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Review {}

impl Hash for Review {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DisplayOrder for Review {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Review(id={}, podcast={}, user={}, rating={}, content='{}')",
            self.id,
            self.podcast_id,
            self.user.username(),
            self.rating,
            self.content
        )
    }
}
