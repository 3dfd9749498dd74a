pub mod entity;
pub mod invariants;

pub use entity::Playlist;
pub use invariants::validate_playlist;
