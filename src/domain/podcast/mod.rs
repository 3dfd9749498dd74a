pub mod entity;
pub mod invariants;

pub use entity::{Podcast, DEFAULT_LANGUAGE};
pub use invariants::validate_podcast;
