// src/services/playlist_service.rs
//
// The signed-in user's playlist. `None` for the user means an anonymous
// visitor.

use std::sync::Arc;

use super::view_models::PlaylistView;
use crate::domain::{Playlist, User};
use crate::error::{AppError, AppResult};
use crate::repositories::Repository;

pub struct PlaylistService {
    repo: Arc<dyn Repository>,
}

impl PlaylistService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn get_user_playlist(&self, user: Option<&User>) -> AppResult<Option<Playlist>> {
        match user {
            Some(user) => self.repo.get_playlist_by_user(user),
            None => Ok(None),
        }
    }

    pub fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.get_user_by_username(username.trim())
    }

    /// True when the episode was in the user's playlist and is now gone
    pub fn remove_from_playlist(&self, user: Option<&User>, episode_id: u32) -> AppResult<bool> {
        let Some(mut playlist) = self.get_user_playlist(user)? else {
            return Ok(false);
        };

        let Some(episode) = playlist
            .episodes()
            .iter()
            .find(|episode| episode.id() == episode_id)
            .cloned()
        else {
            return Ok(false);
        };

        self.repo.remove_episode_from_playlist(&episode, &mut playlist)?;
        log::info!("Removed episode {} from playlist {}", episode_id, playlist.id());
        Ok(true)
    }

    /// The user's playlist, or `None` before their first add
    pub fn show_playlist(&self, username: &str) -> AppResult<Option<PlaylistView>> {
        let user = self
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;
        Ok(self
            .get_user_playlist(Some(&user))?
            .as_ref()
            .map(PlaylistView::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockRepository;
    use crate::services::description_service::DescriptionService;
    use crate::services::test_fixtures::{add_user, memory_repo};

    #[test]
    fn test_anonymous_user_has_no_playlist() {
        let service = PlaylistService::new(memory_repo());
        assert!(service.get_user_playlist(None).unwrap().is_none());
        assert!(!service.remove_from_playlist(None, 1).unwrap());
    }

    #[test]
    fn test_remove_from_playlist() {
        let repo = memory_repo();
        let user = add_user(&repo, "shyamli");
        DescriptionService::new(repo.clone())
            .add_to_user_playlist("shyamli", 1)
            .unwrap();

        let service = PlaylistService::new(repo.clone());
        // not a member
        assert!(!service.remove_from_playlist(Some(&user), 2).unwrap());
        assert!(service.remove_from_playlist(Some(&user), 1).unwrap());
        assert_eq!(service.get_user_playlist(Some(&user)).unwrap().unwrap().size(), 0);
        assert!(!service.remove_from_playlist(Some(&user), 1).unwrap());
    }

    #[test]
    fn test_user_without_playlist() {
        let repo = memory_repo();
        let user = add_user(&repo, "newbie");
        let service = PlaylistService::new(repo);

        assert!(!service.remove_from_playlist(Some(&user), 1).unwrap());
        assert_eq!(service.show_playlist("newbie").unwrap(), None);
    }

    #[test]
    fn test_show_playlist() {
        let repo = memory_repo();
        add_user(&repo, "shyamli");
        DescriptionService::new(repo.clone())
            .add_to_user_playlist("shyamli", 2)
            .unwrap();

        let view = PlaylistService::new(repo).show_playlist("shyamli").unwrap().unwrap();
        assert_eq!(view.owner, "shyamli");
        assert_eq!(view.episodes[0].title, "Finding yourself");
    }

    #[test]
    fn test_show_playlist_unknown_user() {
        let service = PlaylistService::new(memory_repo());
        assert!(matches!(
            service.show_playlist("ghost"),
            Err(AppError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_anonymous_user_never_reaches_repository() {
        let mut mock = MockRepository::new();
        mock.expect_get_playlist_by_user().never();
        mock.expect_remove_episode_from_playlist().never();

        let service = PlaylistService::new(Arc::new(mock));
        assert!(!service.remove_from_playlist(None, 3).unwrap());
    }
}
