use super::entity::Episode;
use crate::domain::{DomainError, DomainResult};

/// Validates all Episode invariants
/// Checked by every repository before an episode is stored
pub fn validate_episode(episode: &Episode) -> DomainResult<()> {
    if episode.title().trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "Episode title",
        });
    }
    Ok(())
}

/// Critical Episode Invariants:
///
/// 1. Episode belongs to exactly one Podcast (podcast_id required)
/// 2. Title is never empty
/// 3. Audio length is never negative (enforced by u32)
/// 4. Identity is (id, podcast_id); hashing uses id only
