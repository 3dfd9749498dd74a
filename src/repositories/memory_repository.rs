// src/repositories/memory_repository.rs
//
// In-memory Repository
//
// One ordered map per entity type behind a single RwLock. Nothing is
// persisted. Id counters are independent of stored data and never reuse
// a value.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    validate_episode, validate_playlist, validate_podcast, Author, Category, Episode, Playlist,
    Podcast, Review, User,
};
use crate::error::{AppError, AppResult};
use crate::repositories::Repository;

#[derive(Debug)]
struct MemoryState {
    podcasts: BTreeMap<u32, Podcast>,
    episodes: BTreeMap<u32, Episode>,
    authors: BTreeMap<u32, Author>,
    categories: BTreeMap<u32, Category>,
    reviews: BTreeMap<u32, Review>,
    playlists: BTreeMap<u32, Playlist>,
    users: BTreeMap<u32, User>,
    next_review_id: u32,
    next_playlist_id: u32,
    next_user_id: u32,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            podcasts: BTreeMap::new(),
            episodes: BTreeMap::new(),
            authors: BTreeMap::new(),
            categories: BTreeMap::new(),
            reviews: BTreeMap::new(),
            playlists: BTreeMap::new(),
            users: BTreeMap::new(),
            next_review_id: 1,
            next_playlist_id: 1,
            next_user_id: 1,
        }
    }
}

impl MemoryState {
    fn store_podcast(&mut self, podcast: &Podcast) {
        self.authors
            .entry(podcast.author().id())
            .or_insert_with(|| podcast.author().clone())
            .add_podcast(podcast);

        for category in podcast.categories() {
            self.categories
                .entry(category.id())
                .or_insert_with(|| category.clone());
        }
        for episode in podcast.episodes() {
            self.episodes.insert(episode.id(), episode.clone());
        }
        for review in podcast.reviews() {
            self.reviews.insert(review.id(), review.clone());
        }

        self.podcasts.insert(podcast.id(), podcast.clone());
    }
}

/// Volatile repository used for the default `memory` backend and in tests
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| AppError::Other("Memory repository lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| AppError::Other("Memory repository lock poisoned".to_string()))
    }

    fn allocate(counter: &mut u32) -> u32 {
        let id = *counter;
        *counter += 1;
        id
    }
}

impl Repository for MemoryRepository {
    // ------------------------------------------------------------------
    // Podcasts
    // ------------------------------------------------------------------

    fn add_podcast(&self, podcast: &Podcast) -> AppResult<()> {
        validate_podcast(podcast)?;
        self.write()?.store_podcast(podcast);
        log::debug!("Stored podcast {} in memory", podcast.id());
        Ok(())
    }

    /// Nothing is stored unless every podcast is valid
    fn add_podcasts(&self, podcasts: &[Podcast]) -> AppResult<()> {
        for podcast in podcasts {
            validate_podcast(podcast)?;
        }
        let mut state = self.write()?;
        for podcast in podcasts {
            state.store_podcast(podcast);
        }
        log::debug!("Stored {} podcasts in memory", podcasts.len());
        Ok(())
    }

    fn get_podcast(&self, podcast_id: u32) -> AppResult<Option<Podcast>> {
        Ok(self.read()?.podcasts.get(&podcast_id).cloned())
    }

    fn get_all_podcasts(&self) -> AppResult<Vec<Podcast>> {
        Ok(self.read()?.podcasts.values().cloned().collect())
    }

    // ------------------------------------------------------------------
    // Episodes
    // ------------------------------------------------------------------

    fn add_episode(&self, episode: &Episode) -> AppResult<()> {
        validate_episode(episode)?;
        let mut state = self.write()?;
        if let Some(podcast) = state.podcasts.get_mut(&episode.podcast_id()) {
            podcast.remove_episode(episode);
            podcast.add_episode(episode.clone());
        }
        state.episodes.insert(episode.id(), episode.clone());
        Ok(())
    }

    fn get_episode(&self, episode_id: u32) -> AppResult<Option<Episode>> {
        Ok(self.read()?.episodes.get(&episode_id).cloned())
    }

    // ------------------------------------------------------------------
    // Authors & categories
    // ------------------------------------------------------------------

    fn add_author(&self, author: &Author) -> AppResult<()> {
        self.write()?.authors.insert(author.id(), author.clone());
        Ok(())
    }

    fn get_author(&self, author_id: u32) -> AppResult<Option<Author>> {
        Ok(self.read()?.authors.get(&author_id).cloned())
    }

    fn add_category(&self, category: &Category) -> AppResult<()> {
        self.write()?.categories.insert(category.id(), category.clone());
        Ok(())
    }

    fn get_category(&self, category_id: u32) -> AppResult<Option<Category>> {
        Ok(self.read()?.categories.get(&category_id).cloned())
    }

    fn get_all_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    fn add_review(&self, review: &Review) -> AppResult<()> {
        let mut state = self.write()?;
        if let Some(podcast) = state.podcasts.get_mut(&review.podcast_id()) {
            podcast.remove_review(review);
            podcast.add_review(review.clone());
        }
        state.reviews.insert(review.id(), review.clone());
        Ok(())
    }

    fn get_review(&self, review_id: u32) -> AppResult<Option<Review>> {
        Ok(self.read()?.reviews.get(&review_id).cloned())
    }

    fn get_reviews_for_podcast(&self, podcast_id: u32) -> AppResult<Vec<Review>> {
        Ok(self
            .read()?
            .podcasts
            .get(&podcast_id)
            .map(|podcast| podcast.reviews().to_vec())
            .unwrap_or_default())
    }

    fn get_next_review_id(&self) -> AppResult<u32> {
        Ok(Self::allocate(&mut self.write()?.next_review_id))
    }

    fn add_review_to_podcast(&self, review: &Review, podcast: &mut Podcast) -> AppResult<()> {
        podcast.add_review(review.clone());
        self.add_review(review)
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    fn add_playlist(&self, playlist: &Playlist) -> AppResult<()> {
        validate_playlist(playlist)?;
        self.write()?.playlists.insert(playlist.id(), playlist.clone());
        Ok(())
    }

    fn get_playlist(&self, playlist_id: u32) -> AppResult<Option<Playlist>> {
        Ok(self.read()?.playlists.get(&playlist_id).cloned())
    }

    fn get_playlist_by_user(&self, user: &User) -> AppResult<Option<Playlist>> {
        Ok(self
            .read()?
            .playlists
            .values()
            .find(|playlist| playlist.owner() == user)
            .cloned())
    }

    fn get_next_playlist_id(&self) -> AppResult<u32> {
        Ok(Self::allocate(&mut self.write()?.next_playlist_id))
    }

    fn add_episode_to_playlist(&self, episode: &Episode, playlist: &mut Playlist) -> AppResult<()> {
        playlist.add_episode(episode.clone());
        self.add_playlist(playlist)
    }

    fn remove_episode_from_playlist(
        &self,
        episode: &Episode,
        playlist: &mut Playlist,
    ) -> AppResult<()> {
        playlist.remove_episode(episode);
        self.add_playlist(playlist)
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    fn add_user(&self, user: &User) -> AppResult<()> {
        self.write()?.users.insert(user.id(), user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: u32) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(&user_id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    fn get_next_user_id(&self) -> AppResult<u32> {
        Ok(Self::allocate(&mut self.write()?.next_user_id))
    }
}
