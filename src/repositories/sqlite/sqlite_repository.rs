// src/repositories/sqlite/sqlite_repository.rs
//
// SQLite Repository
//
// Each call checks out one pooled connection. Writes run inside one
// transaction that commits at the end of the call; an early return drops
// the transaction, which rolls it back.

use rusqlite::Connection;
use std::sync::Arc;

use super::mapping;
use crate::db::ConnectionPool;
use crate::domain::{Author, Category, Episode, Playlist, Podcast, Review, User};
use crate::error::AppResult;
use crate::repositories::Repository;

pub struct SqliteRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    /// Runs `f` inside a single committed transaction
    fn write<F>(&self, f: F) -> AppResult<()>
    where
        F: FnOnce(&Connection) -> AppResult<()>,
    {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        f(&tx)?;
        tx.commit()?;
        Ok(())
    }

    fn read<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.pool.get()?;
        f(&conn)
    }
}

impl Repository for SqliteRepository {
    // ------------------------------------------------------------------
    // Podcasts
    // ------------------------------------------------------------------

    fn add_podcast(&self, podcast: &Podcast) -> AppResult<()> {
        self.write(|conn| mapping::persist_podcast(conn, podcast))?;
        log::debug!("Persisted podcast {}", podcast.id());
        Ok(())
    }

    /// One transaction for the whole batch
    fn add_podcasts(&self, podcasts: &[Podcast]) -> AppResult<()> {
        self.write(|conn| {
            for podcast in podcasts {
                mapping::persist_podcast(conn, podcast)?;
            }
            Ok(())
        })?;
        log::debug!("Persisted {} podcasts", podcasts.len());
        Ok(())
    }

    fn get_podcast(&self, podcast_id: u32) -> AppResult<Option<Podcast>> {
        self.read(|conn| mapping::load_podcast(conn, podcast_id))
    }

    fn get_all_podcasts(&self) -> AppResult<Vec<Podcast>> {
        self.read(mapping::load_all_podcasts)
    }

    // ------------------------------------------------------------------
    // Episodes
    // ------------------------------------------------------------------

    fn add_episode(&self, episode: &Episode) -> AppResult<()> {
        self.write(|conn| mapping::persist_episode(conn, episode))
    }

    fn get_episode(&self, episode_id: u32) -> AppResult<Option<Episode>> {
        self.read(|conn| mapping::load_episode(conn, episode_id))
    }

    // ------------------------------------------------------------------
    // Authors & categories
    // ------------------------------------------------------------------

    fn add_author(&self, author: &Author) -> AppResult<()> {
        self.write(|conn| mapping::persist_author(conn, author))
    }

    fn get_author(&self, author_id: u32) -> AppResult<Option<Author>> {
        self.read(|conn| mapping::load_author(conn, author_id))
    }

    fn add_category(&self, category: &Category) -> AppResult<()> {
        self.write(|conn| mapping::persist_category(conn, category))
    }

    fn get_category(&self, category_id: u32) -> AppResult<Option<Category>> {
        self.read(|conn| mapping::load_category(conn, category_id))
    }

    fn get_all_categories(&self) -> AppResult<Vec<Category>> {
        self.read(mapping::load_all_categories)
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    fn add_review(&self, review: &Review) -> AppResult<()> {
        self.write(|conn| mapping::persist_review(conn, review))?;
        log::debug!("Persisted review {} for podcast {}", review.id(), review.podcast_id());
        Ok(())
    }

    fn get_review(&self, review_id: u32) -> AppResult<Option<Review>> {
        self.read(|conn| mapping::load_review(conn, review_id))
    }

    fn get_reviews_for_podcast(&self, podcast_id: u32) -> AppResult<Vec<Review>> {
        self.read(|conn| mapping::load_reviews_for_podcast(conn, podcast_id))
    }

    /// Max-based: two calls with no insert in between return the same id
    fn get_next_review_id(&self) -> AppResult<u32> {
        self.read(|conn| mapping::next_id(conn, "reviews"))
    }

    fn add_review_to_podcast(&self, review: &Review, podcast: &mut Podcast) -> AppResult<()> {
        podcast.add_review(review.clone());
        self.add_review(review)
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    fn add_playlist(&self, playlist: &Playlist) -> AppResult<()> {
        self.write(|conn| mapping::persist_playlist(conn, playlist))?;
        log::debug!(
            "Persisted playlist {} with {} episodes",
            playlist.id(),
            playlist.size()
        );
        Ok(())
    }

    fn get_playlist(&self, playlist_id: u32) -> AppResult<Option<Playlist>> {
        self.read(|conn| mapping::load_playlist(conn, playlist_id))
    }

    fn get_playlist_by_user(&self, user: &User) -> AppResult<Option<Playlist>> {
        self.read(|conn| mapping::load_playlist_by_owner(conn, user.id()))
    }

    fn get_next_playlist_id(&self) -> AppResult<u32> {
        self.read(|conn| mapping::next_id(conn, "playlists"))
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
        self.write(|conn| mapping::persist_user(conn, user))?;
        log::debug!("Persisted user {}", user.username());
        Ok(())
    }

    fn get_user(&self, user_id: u32) -> AppResult<Option<User>> {
        self.read(|conn| mapping::load_user(conn, user_id))
    }

    fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.read(|conn| mapping::load_user_by_username(conn, username))
    }

    fn get_next_user_id(&self) -> AppResult<u32> {
        self.read(|conn| mapping::next_id(conn, "users"))
    }
}
