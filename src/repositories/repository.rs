// src/repositories/repository.rs
//
// Repository contract shared by every storage backend
//
// CRITICAL RULES:
// - Not-found is never an error: lookups return Ok(None) or an empty Vec
// - add_* is an upsert (last write wins)
// - No call is transactional with any other call

use crate::domain::{Author, Category, Episode, Playlist, Podcast, Review, User};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait Repository: Send + Sync {
    // ------------------------------------------------------------------
    // Podcasts
    // ------------------------------------------------------------------

    /// Stores the podcast together with its author, categories, episodes and reviews
    fn add_podcast(&self, podcast: &Podcast) -> AppResult<()>;

    /// Seeds many podcasts at once
    fn add_podcasts(&self, podcasts: &[Podcast]) -> AppResult<()> {
        for podcast in podcasts {
            self.add_podcast(podcast)?;
        }
        Ok(())
    }

    fn get_podcast(&self, podcast_id: u32) -> AppResult<Option<Podcast>>;

    /// All podcasts in ascending id order
    fn get_all_podcasts(&self) -> AppResult<Vec<Podcast>>;

    // ------------------------------------------------------------------
    // Episodes
    // ------------------------------------------------------------------

    fn add_episode(&self, episode: &Episode) -> AppResult<()>;

    fn get_episode(&self, episode_id: u32) -> AppResult<Option<Episode>>;

    // ------------------------------------------------------------------
    // Authors & categories
    // ------------------------------------------------------------------

    fn add_author(&self, author: &Author) -> AppResult<()>;

    fn get_author(&self, author_id: u32) -> AppResult<Option<Author>>;

    fn add_category(&self, category: &Category) -> AppResult<()>;

    fn get_category(&self, category_id: u32) -> AppResult<Option<Category>>;

    fn get_all_categories(&self) -> AppResult<Vec<Category>>;

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    fn add_review(&self, review: &Review) -> AppResult<()>;

    fn get_review(&self, review_id: u32) -> AppResult<Option<Review>>;

    fn get_reviews_for_podcast(&self, podcast_id: u32) -> AppResult<Vec<Review>>;

    fn get_next_review_id(&self) -> AppResult<u32>;

    /// Attaches the review to the caller's podcast and persists both
    fn add_review_to_podcast(&self, review: &Review, podcast: &mut Podcast) -> AppResult<()>;

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    fn add_playlist(&self, playlist: &Playlist) -> AppResult<()>;

    fn get_playlist(&self, playlist_id: u32) -> AppResult<Option<Playlist>>;

    /// The lowest-id playlist owned by the user
    fn get_playlist_by_user(&self, user: &User) -> AppResult<Option<Playlist>>;

    fn get_next_playlist_id(&self) -> AppResult<u32>;

    /// Appends the episode to the caller's playlist and persists it
    fn add_episode_to_playlist(&self, episode: &Episode, playlist: &mut Playlist) -> AppResult<()>;

    /// Removes the episode from the caller's playlist and persists it
    fn remove_episode_from_playlist(
        &self,
        episode: &Episode,
        playlist: &mut Playlist,
    ) -> AppResult<()>;

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    fn add_user(&self, user: &User) -> AppResult<()>;

    fn get_user(&self, user_id: u32) -> AppResult<Option<User>>;

    fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    fn get_next_user_id(&self) -> AppResult<u32>;
}
