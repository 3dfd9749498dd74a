use std::collections::HashSet;

use super::entity::Playlist;
use crate::domain::{DomainError, DomainResult};

/// Validates all Playlist invariants
/// Checked by every repository before a playlist is stored
pub fn validate_playlist(playlist: &Playlist) -> DomainResult<()> {
    if playlist.name().trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "Playlist name",
        });
    }

    let mut seen = HashSet::new();
    for episode in playlist.episodes() {
        if !seen.insert((episode.id(), episode.podcast_id())) {
            return Err(DomainError::InvariantViolation(format!(
                "Episode {} appears twice in playlist {}",
                episode.id(),
                playlist.id()
            )));
        }
    }
    Ok(())
}

/// Critical Playlist Invariants:
///
/// 1. Every playlist has exactly one owner
/// 2. Name cannot be empty
/// 3. An episode appears at most once
/// 4. Insertion order is preserved
/// 5. Removing a playlist never removes episodes from the catalogue
