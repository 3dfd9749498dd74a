use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::{non_empty, non_empty_trimmed, DisplayOrder, DomainResult};

/// Represents a single episode belonging to a Podcast
/// Episodes are the unit users collect into playlists
#[derive(Debug, Clone, Serialize)]
pub struct Episode {
    /// Internal immutable identifier
    id: u32,

    /// Reference to parent Podcast
    podcast_id: u32,

    /// Episode title (trimmed, never empty)
    title: String,

    /// Link to the audio file
    audio_link: String,

    /// Audio length in seconds
    audio_length: u32,

    description: String,

    /// Publication timestamp, kept with its original offset
    pub_date: Option<DateTime<FixedOffset>>,
}

impl Episode {
    /// Create a new Episode
    /// podcast_id is NOT checked against the catalogue here (checked by population)
    pub fn new(id: u32, podcast_id: u32, audio_length: u32, title: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            podcast_id,
            title: non_empty_trimmed(title, "Episode title")?,
            audio_link: String::new(),
            audio_length,
            description: String::new(),
            pub_date: None,
        })
    }

    pub fn with_audio_link(mut self, audio_link: impl Into<String>) -> Self {
        self.audio_link = audio_link.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_pub_date(mut self, pub_date: Option<DateTime<FixedOffset>>) -> Self {
        self.pub_date = pub_date;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn podcast_id(&self) -> u32 {
        self.podcast_id
    }

    pub fn set_podcast_id(&mut self, podcast_id: u32) {
        self.podcast_id = podcast_id;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> DomainResult<()> {
        self.title = non_empty_trimmed(title, "Episode title")?;
        Ok(())
    }

    pub fn audio_link(&self) -> &str {
        &self.audio_link
    }

    pub fn set_audio_link(&mut self, audio_link: &str) -> DomainResult<()> {
        self.audio_link = non_empty(audio_link, "audio link")?;
        Ok(())
    }

    pub fn audio_length(&self) -> u32 {
        self.audio_length
    }

    pub fn set_audio_length(&mut self, audio_length: u32) {
        self.audio_length = audio_length;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn pub_date(&self) -> Option<DateTime<FixedOffset>> {
        self.pub_date
    }

    pub fn set_pub_date(&mut self, pub_date: DateTime<FixedOffset>) {
        self.pub_date = Some(pub_date);
    }
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.podcast_id == other.podcast_id
    }
}

impl Eq for Episode {}

impl Hash for Episode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Episodes display in publication order; undated episodes sort first.
impl DisplayOrder for Episode {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.pub_date.cmp(&other.pub_date)
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Episode(id={}, podcast_id={}, title='{}', audio_length={})",
            self.id, self.podcast_id, self.title, self.audio_length
        )
    }
}
