// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

use std::cmp::Ordering;

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod author;
pub mod category;
pub mod episode;
pub mod playlist;
pub mod podcast;
pub mod review;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use author::Author;
pub use category::Category;
pub use episode::{validate_episode, Episode};
pub use playlist::{validate_playlist, Playlist};
pub use podcast::{validate_podcast, Podcast};
pub use review::{validate_rating, Review};
pub use user::{PodcastSubscription, User};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of entity invariants. They are raised
/// immediately by constructors and setters, never silently clamped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("ID must be a non-negative integer, got {0}")]
    InvalidId(i64),

    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

// ============================================================================
// SHARED VALIDATORS
// ============================================================================

/// Converts a raw integer (CSV cell, SQL column) into an entity id.
pub fn validate_id(raw: i64) -> DomainResult<u32> {
    u32::try_from(raw).map_err(|_| DomainError::InvalidId(raw))
}

/// Rejects empty and whitespace-only strings, returning the trimmed value.
pub fn non_empty_trimmed(value: &str, field: &'static str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Rejects empty and whitespace-only strings, keeping the value untouched.
pub fn non_empty(value: &str, field: &'static str) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(value.to_string())
}

// ============================================================================
// DISPLAY ORDERING
// ============================================================================

/// Sorted-display comparator.
///
/// Entities are equal by identity, but lists are shown sorted by name,
/// title, id or rating depending on the entity. Keeping this apart from
/// `Ord` keeps `Eq` and ordering from contradicting each other.
pub trait DisplayOrder {
    fn display_cmp(&self, other: &Self) -> Ordering;
}

/// Sorts a slice in display order (stable).
pub fn sort_for_display<T: DisplayOrder>(items: &mut [T]) {
    items.sort_by(|a, b| a.display_cmp(b));
}
