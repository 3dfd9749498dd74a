use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{non_empty_trimmed, DisplayOrder, DomainResult, Episode, User};

/// A user-owned, ordered list of episodes
/// Episodes are kept in insertion order and appear at most once
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    /// Internal immutable identifier
    id: u32,

    /// Owning user
    owner: User,

    /// Playlist name (trimmed, never empty)
    name: String,

    episodes: Vec<Episode>,
}

impl Playlist {
    pub fn new(id: u32, owner: User, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            owner,
            name: non_empty_trimmed(name, "Playlist name")?,
            episodes: Vec::new(),
        })
    }

    /// Seeds the playlist with episodes, dropping repeats
    pub fn with_episodes(mut self, episodes: impl IntoIterator<Item = Episode>) -> Self {
        for episode in episodes {
            self.add_episode(episode);
        }
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = non_empty_trimmed(name, "Playlist name")?;
        Ok(())
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn size(&self) -> usize {
        self.episodes.len()
    }

    pub fn contains(&self, episode: &Episode) -> bool {
        self.episodes.contains(episode)
    }

    /// Appends the episode unless it is already present
    pub fn add_episode(&mut self, episode: Episode) {
        if !self.contains(&episode) {
            self.episodes.push(episode);
        }
    }

    /// Removing an absent episode is a no-op
    pub fn remove_episode(&mut self, episode: &Episode) {
        self.episodes.retain(|e| e != episode);
    }
}

impl PartialEq for Playlist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Playlist {}

impl Hash for Playlist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Playlists display by size
impl DisplayOrder for Playlist {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.episodes.len().cmp(&other.episodes.len())
    }
}

impl std::fmt::Display for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Playlist {}: '{}' owned by {}, {} episodes>",
            self.id,
            self.name,
            self.owner.username(),
            self.episodes.len()
        )
    }
}
