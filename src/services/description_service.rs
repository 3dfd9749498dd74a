// src/services/description_service.rs
//
// Podcast description page: details, title-order navigation, reviews and
// adding episodes to the reader's playlist.

use std::sync::Arc;

use super::view_models::{
    EpisodeView, NavigationIds, PlaylistView, PodcastDetail, PodcastSummary, ReviewView,
};
use crate::domain::{Episode, Playlist, Podcast, Review, User};
use crate::error::{AppError, AppResult};
use crate::repositories::Repository;

/// Mean rating rounded to one decimal, 0.0 without reviews
///
/// Rounds the exact mean in integer tenths; a tie goes to the even tenth
/// (4.25 -> 4.2, 1.75 -> 1.8).
pub fn calculate_average_rating(podcast: &Podcast) -> f64 {
    let reviews = podcast.reviews();
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u64 = reviews.iter().map(|r| u64::from(r.rating())).sum();
    let count = reviews.len() as u64;

    let scaled = total * 10;
    let (mut tenths, remainder) = (scaled / count, scaled % count);
    match (2 * remainder).cmp(&count) {
        std::cmp::Ordering::Greater => tenths += 1,
        std::cmp::Ordering::Equal if tenths % 2 == 1 => tenths += 1,
        _ => {}
    }
    tenths as f64 / 10.0
}

/// Name given to a playlist created on a user's first add
pub fn default_playlist_name(username: &str) -> String {
    format!("{}'s playlist", username)
}

pub struct DescriptionService {
    repo: Arc<dyn Repository>,
}

impl DescriptionService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn get_podcast_data(&self, podcast_id: u32) -> AppResult<PodcastDetail> {
        let podcast = self
            .repo
            .get_podcast(podcast_id)?
            .ok_or(AppError::NonExistentPodcast(podcast_id))?;
        Ok(podcast_detail(&podcast))
    }

    /// Neighbours of `podcast_id` when all podcasts are sorted by lower-cased title
    pub fn get_previous_and_next_podcast_ids(&self, podcast_id: u32) -> AppResult<NavigationIds> {
        let mut podcasts = self.repo.get_all_podcasts()?;
        podcasts.sort_by_cached_key(|podcast| podcast.title().to_lowercase());

        let Some(index) = podcasts.iter().position(|p| p.id() == podcast_id) else {
            return Ok(NavigationIds::default());
        };

        Ok(NavigationIds {
            previous_id: index.checked_sub(1).map(|i| podcasts[i].id()),
            next_id: podcasts.get(index + 1).map(|p| p.id()),
        })
    }

    /// Creates a review under the next free id and attaches it to `podcast`
    pub fn add_review_to_podcast(
        &self,
        user: User,
        rating: u8,
        content: &str,
        podcast: &mut Podcast,
    ) -> AppResult<Review> {
        let review_id = self.repo.get_next_review_id()?;
        let review = Review::new(review_id, podcast, user, rating, content)?;
        self.repo.add_review_to_podcast(&review, podcast)?;
        log::info!(
            "User '{}' rated podcast {} with {}",
            review.user().username(),
            podcast.id(),
            rating
        );
        Ok(review)
    }

    pub fn add_episode_to_playlist(&self, playlist: &mut Playlist, episode: &Episode) -> AppResult<()> {
        self.repo.add_episode_to_playlist(episode, playlist)
    }

    pub fn create_playlist(&self, owner: User, name: &str) -> AppResult<Playlist> {
        let playlist = Playlist::new(self.repo.get_next_playlist_id()?, owner, name)?;
        self.repo.add_playlist(&playlist)?;
        Ok(playlist)
    }

    pub fn get_podcast(&self, podcast_id: u32) -> AppResult<Option<Podcast>> {
        self.repo.get_podcast(podcast_id)
    }

    pub fn get_episode(&self, episode_id: u32) -> AppResult<Option<Episode>> {
        self.repo.get_episode(episode_id)
    }

    pub fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.get_user_by_username(username.trim())
    }

    pub fn get_user_playlist(&self, user: &User) -> AppResult<Option<Playlist>> {
        self.repo.get_playlist_by_user(user)
    }

    // ------------------------------------------------------------------
    // Composed operations (one user action each)
    // ------------------------------------------------------------------

    /// Reviews a podcast on behalf of a registered user and returns the
    /// refreshed description
    pub fn review_podcast(
        &self,
        username: &str,
        podcast_id: u32,
        rating: u8,
        content: &str,
    ) -> AppResult<PodcastDetail> {
        let user = self
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;
        let mut podcast = self
            .get_podcast(podcast_id)?
            .ok_or(AppError::NonExistentPodcast(podcast_id))?;

        self.add_review_to_podcast(user, rating, content, &mut podcast)?;
        Ok(podcast_detail(&podcast))
    }

    /// Adds an episode to the user's playlist, creating the playlist on
    /// first use
    pub fn add_to_user_playlist(&self, username: &str, episode_id: u32) -> AppResult<PlaylistView> {
        let user = self
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;
        let episode = self
            .get_episode(episode_id)?
            .ok_or(AppError::NonExistentEpisode(episode_id))?;

        let mut playlist = match self.get_user_playlist(&user)? {
            Some(playlist) => playlist,
            None => {
                let name = default_playlist_name(user.username());
                self.create_playlist(user, &name)?
            }
        };

        self.add_episode_to_playlist(&mut playlist, &episode)?;
        log::info!("Added episode {} to playlist {}", episode.id(), playlist.id());
        Ok(PlaylistView::from(&playlist))
    }
}

fn podcast_detail(podcast: &Podcast) -> PodcastDetail {
    let mut episodes: Vec<&Episode> = podcast.episodes().iter().collect();
    episodes.sort_by(|a, b| a.title().cmp(b.title()));

    let mut reviews: Vec<&Review> = podcast.reviews().iter().collect();
    reviews.sort_by_key(|review| review.rating());

    PodcastDetail {
        summary: PodcastSummary::from(podcast),
        categories: podcast
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        episodes: episodes.into_iter().map(EpisodeView::from).collect(),
        reviews: reviews.into_iter().map(ReviewView::from).collect(),
        average_rating: calculate_average_rating(podcast),
    }
}
