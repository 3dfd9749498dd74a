// src/domain/user.rs
//
// User & PodcastSubscription Entities
//
// Users register with a username and a password hash. Subscriptions link a
// user to a podcast by id.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{non_empty, non_empty_trimmed, DisplayOrder, DomainResult, Podcast};

/// A registered user
///
/// CRITICAL INVARIANTS:
/// - Username is non-empty and stored trimmed
/// - Password (already hashed by the caller) is non-empty
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: u32,
    username: String,
    password: String,
    subscriptions: Vec<PodcastSubscription>,
}

impl User {
    pub fn new(id: u32, username: &str, password: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            username: non_empty_trimmed(username, "Username")?,
            password: non_empty(password, "Password")?,
            subscriptions: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The stored password hash
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn subscriptions(&self) -> &[PodcastSubscription] {
        &self.subscriptions
    }

    pub fn add_subscription(&mut self, subscription: PodcastSubscription) {
        if !self.subscriptions.contains(&subscription) {
            self.subscriptions.push(subscription);
        }
    }

    pub fn remove_subscription(&mut self, subscription: &PodcastSubscription) {
        self.subscriptions.retain(|s| s != subscription);
    }

    pub fn is_subscribed_to(&self, podcast_id: u32) -> bool {
        self.subscriptions
            .iter()
            .any(|s| s.podcast_id() == podcast_id)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DisplayOrder for User {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<User {}: {}>", self.id, self.username)
    }
}

/// A user's subscription to a podcast
#[derive(Debug, Clone, Serialize)]
pub struct PodcastSubscription {
    id: u32,
    owner_id: u32,
    podcast_id: u32,
}

impl PodcastSubscription {
    pub fn new(id: u32, owner: &User, podcast: &Podcast) -> Self {
        Self {
            id,
            owner_id: owner.id(),
            podcast_id: podcast.id(),
        }
    }

    /// Rebuilds a subscription from stored ids
    pub(crate) fn from_ids(id: u32, owner_id: u32, podcast_id: u32) -> Self {
        Self {
            id,
            owner_id,
            podcast_id,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }

    pub fn set_owner(&mut self, owner: &User) {
        self.owner_id = owner.id();
    }

    pub fn podcast_id(&self) -> u32 {
        self.podcast_id
    }

    pub fn set_podcast(&mut self, podcast: &Podcast) {
        self.podcast_id = podcast.id();
    }
}

impl PartialEq for PodcastSubscription {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.owner_id == other.owner_id
            && self.podcast_id == other.podcast_id
    }
}

impl Eq for PodcastSubscription {}

impl Hash for PodcastSubscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.id, self.owner_id, self.podcast_id).hash(state);
    }
}

impl DisplayOrder for PodcastSubscription {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
