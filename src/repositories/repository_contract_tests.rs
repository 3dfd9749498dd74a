// src/repositories/repository_contract_tests.rs
//
// The same expectations run against every backend.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::db::{create_connection_pool, get_connection, initialize_database};
use crate::domain::{Author, Category, Episode, Playlist, Podcast, Review, User};
use crate::error::AppError;
use crate::repositories::{MemoryRepository, Repository, SqliteRepository};

fn backends() -> Vec<(&'static str, Box<dyn Repository>, Option<tempfile::TempDir>)> {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_connection_pool(&dir.path().join("contract.db")).unwrap();
    {
        let conn = get_connection(&pool).unwrap();
        initialize_database(&conn).unwrap();
    }

    let memory: Box<dyn Repository> = Box::new(MemoryRepository::new());
    let sqlite: Box<dyn Repository> = Box::new(SqliteRepository::new(Arc::new(pool)));

    vec![("memory", memory, None), ("sqlite", sqlite, Some(dir))]
}

fn podcast(id: u32, title: &str) -> Podcast {
    Podcast::new(id, Author::new(1, "Author1").unwrap(), title).unwrap()
}

#[test]
fn test_missing_keys_return_none() {
    for (name, repo, _dir) in backends() {
        assert!(repo.get_podcast(42).unwrap().is_none(), "{name}");
        assert!(repo.get_episode(42).unwrap().is_none(), "{name}");
        assert!(repo.get_author(42).unwrap().is_none(), "{name}");
        assert!(repo.get_category(42).unwrap().is_none(), "{name}");
        assert!(repo.get_review(42).unwrap().is_none(), "{name}");
        assert!(repo.get_playlist(42).unwrap().is_none(), "{name}");
        assert!(repo.get_user(42).unwrap().is_none(), "{name}");
        assert!(repo.get_user_by_username("gdsfgdsfgsdfgsdfgdsf").unwrap().is_none(), "{name}");
        assert!(repo.get_reviews_for_podcast(42).unwrap().is_empty(), "{name}");
        assert!(repo.get_all_podcasts().unwrap().is_empty(), "{name}");
    }
}

#[test]
fn test_add_then_get_returns_equal_entities() {
    for (name, repo, _dir) in backends() {
        let show = podcast(1, "Podcast1");
        repo.add_podcast(&show).unwrap();
        assert_eq!(repo.get_podcast(1).unwrap(), Some(show.clone()), "{name}");

        let author = Author::new(2, "Author2").unwrap();
        repo.add_author(&author).unwrap();
        assert_eq!(repo.get_author(2).unwrap(), Some(author), "{name}");

        let category = Category::new(1, "Category1").unwrap();
        repo.add_category(&category).unwrap();
        assert_eq!(repo.get_category(1).unwrap(), Some(category.clone()), "{name}");
        assert_eq!(repo.get_all_categories().unwrap(), vec![category], "{name}");

        let episode = Episode::new(1, 1, 60, "Episode1").unwrap();
        repo.add_episode(&episode).unwrap();
        assert_eq!(repo.get_episode(1).unwrap(), Some(episode), "{name}");

        let user = User::new(1, "Shyamli", "pw12345").unwrap();
        repo.add_user(&user).unwrap();
        assert_eq!(repo.get_user(1).unwrap(), Some(user.clone()), "{name}");
        assert_eq!(repo.get_user_by_username("Shyamli").unwrap(), Some(user.clone()), "{name}");

        let review = Review::new(1, &show, user.clone(), 5, "Great").unwrap();
        repo.add_review(&review).unwrap();
        assert_eq!(repo.get_review(1).unwrap(), Some(review.clone()), "{name}");
        assert_eq!(repo.get_reviews_for_podcast(1).unwrap(), vec![review], "{name}");

        let playlist = Playlist::new(1, user, "Playlist1").unwrap();
        repo.add_playlist(&playlist).unwrap();
        assert_eq!(repo.get_playlist(1).unwrap(), Some(playlist), "{name}");
    }
}

#[test]
fn test_add_is_upsert() {
    for (name, repo, _dir) in backends() {
        repo.add_podcast(&podcast(1, "Before")).unwrap();
        repo.add_podcast(&podcast(1, "After")).unwrap();

        let all = repo.get_all_podcasts().unwrap();
        assert_eq!(all.len(), 1, "{name}");
        assert_eq!(all[0].title(), "After", "{name}");
    }
}

#[test]
fn test_add_podcasts_batch() {
    for (name, repo, _dir) in backends() {
        repo.add_podcasts(&[podcast(2, "B"), podcast(1, "A")]).unwrap();
        let ids: Vec<u32> = repo.get_all_podcasts().unwrap().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2], "{name}");
    }
}

#[test]
fn test_playlist_membership() {
    for (name, repo, _dir) in backends() {
        let mut show = podcast(1, "Show");
        show.add_episode(Episode::new(1, 1, 60, "One").unwrap());
        show.add_episode(Episode::new(2, 1, 60, "Two").unwrap());
        repo.add_podcast(&show).unwrap();

        let owner = User::new(1, "owner", "pw").unwrap();
        repo.add_user(&owner).unwrap();
        let mut playlist = Playlist::new(1, owner.clone(), "Mine").unwrap();
        repo.add_playlist(&playlist).unwrap();

        let one = repo.get_episode(1).unwrap().unwrap();
        let two = repo.get_episode(2).unwrap().unwrap();

        repo.add_episode_to_playlist(&one, &mut playlist).unwrap();
        repo.add_episode_to_playlist(&one, &mut playlist).unwrap();
        assert_eq!(playlist.size(), 1, "{name}");

        // removing a non-member is a no-op
        repo.remove_episode_from_playlist(&two, &mut playlist).unwrap();
        assert_eq!(playlist.size(), 1, "{name}");

        let stored = repo.get_playlist_by_user(&owner).unwrap().unwrap();
        assert_eq!(stored.episodes(), &[one.clone()], "{name}");

        repo.remove_episode_from_playlist(&one, &mut playlist).unwrap();
        assert_eq!(repo.get_playlist(1).unwrap().unwrap().size(), 0, "{name}");
    }
}

#[test]
fn test_add_review_to_podcast_updates_both_copies() {
    for (name, repo, _dir) in backends() {
        let mut show = podcast(1, "Show");
        repo.add_podcast(&show).unwrap();

        let user = User::new(1, "critic", "pw").unwrap();
        repo.add_user(&user).unwrap();
        let review = Review::new(1, &show, user, 3, "Fine").unwrap();
        repo.add_review_to_podcast(&review, &mut show).unwrap();

        assert_eq!(show.reviews().len(), 1, "{name}");
        let stored = repo.get_podcast(1).unwrap().unwrap();
        assert_eq!(stored.reviews().len(), 1, "{name}");
        assert_eq!(stored.reviews()[0].rating(), 3, "{name}");
    }
}

#[test]
fn test_first_allocated_ids_are_one() {
    for (name, repo, _dir) in backends() {
        assert_eq!(repo.get_next_review_id().unwrap(), 1, "{name}");
        assert_eq!(repo.get_next_playlist_id().unwrap(), 1, "{name}");
        assert_eq!(repo.get_next_user_id().unwrap(), 1, "{name}");
    }
}

#[test]
fn test_optional_fields_survive_storage() {
    let published = DateTime::<FixedOffset>::parse_from_rfc3339("2018-02-02T20:30:00-05:00").unwrap();

    for (name, repo, _dir) in backends() {
        let mut show = podcast(1, "Show")
            .with_image(Some("https://example.com/cover.jpg".to_string()))
            .with_itunes_id(Some(1_234_567));
        show.add_episode(
            Episode::new(1, 1, 1800, "Pilot")
                .unwrap()
                .with_audio_link("https://example.com/pilot.mp3")
                .with_pub_date(Some(published)),
        );
        repo.add_podcast(&show).unwrap();

        let stored = repo.get_podcast(1).unwrap().unwrap();
        assert_eq!(stored.image(), Some("https://example.com/cover.jpg"), "{name}");
        assert_eq!(stored.itunes_id(), Some(1_234_567), "{name}");

        let episode = repo.get_episode(1).unwrap().unwrap();
        assert_eq!(episode.audio_link(), "https://example.com/pilot.mp3", "{name}");
        let date = episode.pub_date().unwrap();
        assert_eq!(date, published, "{name}");
        assert_eq!(date.offset().local_minus_utc(), -5 * 3600, "{name}");
    }
}

#[test]
fn test_playlist_by_user_returns_lowest_id() {
    for (name, repo, _dir) in backends() {
        let owner = User::new(1, "owner", "pw").unwrap();
        repo.add_user(&owner).unwrap();
        repo.add_playlist(&Playlist::new(2, owner.clone(), "Second").unwrap()).unwrap();
        repo.add_playlist(&Playlist::new(1, owner.clone(), "First").unwrap()).unwrap();

        let found = repo.get_playlist_by_user(&owner).unwrap().unwrap();
        assert_eq!(found.id(), 1, "{name}");
        assert_eq!(found.name(), "First", "{name}");
    }
}

#[test]
fn test_podcast_with_foreign_episode_is_rejected() {
    for (name, repo, _dir) in backends() {
        let mut show = podcast(1, "Show");
        show.add_episode(Episode::new(7, 2, 60, "Stray").unwrap());

        assert!(matches!(repo.add_podcast(&show), Err(AppError::Domain(_))), "{name}");
        assert!(repo.get_podcast(1).unwrap().is_none(), "{name}");
        assert!(repo.get_episode(7).unwrap().is_none(), "{name}");

        let result = repo.add_podcasts(&[podcast(2, "Fine"), show]);
        assert!(result.is_err(), "{name}");
        assert!(repo.get_all_podcasts().unwrap().is_empty(), "{name}");
    }
}
