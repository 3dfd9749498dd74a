// src/lib.rs
// Podcatalogue - Podcast catalogue with reviews and per-user playlists
//
// Architecture:
// - Domain-centric: entities validate themselves on construction
// - One repository contract, two backends (in-memory, SQLite)
// - Services translate absence into named errors and shape view models
// - Application layer: start-up wiring and user-facing error mapping

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;

// ============================================================================
// FEATURES
// ============================================================================

pub mod datareader;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod config;
pub mod logging;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_episode, validate_playlist, validate_podcast, validate_rating, Author, Category,
    DomainError, DomainResult, Episode, Playlist, Podcast, PodcastSubscription, Review, User,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use repositories::{MemoryRepository, Repository, SqliteRepository};

// ============================================================================
// PUBLIC API - Application
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
pub use config::{AppConfig, RepositoryKind};
