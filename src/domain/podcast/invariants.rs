use super::entity::Podcast;
use crate::domain::{DomainError, DomainResult};

/// Validates all Podcast invariants
/// Checked by every repository before a podcast is stored
pub fn validate_podcast(podcast: &Podcast) -> DomainResult<()> {
    if podcast.title().trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "Podcast title",
        });
    }
    validate_episode_ownership(podcast)?;
    Ok(())
}

/// Every attached episode must point back at this podcast
fn validate_episode_ownership(podcast: &Podcast) -> DomainResult<()> {
    if let Some(stray) = podcast
        .episodes()
        .iter()
        .find(|episode| episode.podcast_id() != podcast.id())
    {
        return Err(DomainError::InvariantViolation(format!(
            "Episode {} belongs to podcast {}, not {}",
            stray.id(),
            stray.podcast_id(),
            podcast.id()
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Podcast domain:
///
/// 1. Podcast can exist without episodes, categories or reviews
/// 2. Title cannot be empty
/// 3. Categories, episodes and reviews contain no duplicates (by identity)
/// 4. Attached episodes carry this podcast's id

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, Category, DisplayOrder, Episode, Review, User};
    use std::cmp::Ordering;

    fn author() -> Author {
        Author::new(1, "author1").unwrap()
    }

    #[test]
    fn test_valid_podcast() {
        let podcast = Podcast::new(1, author(), "Podcast1")
            .unwrap()
            .with_image(Some("image".to_string()))
            .with_description("description1")
            .with_website("website1")
            .with_itunes_id(Some(1))
            .with_language("language1");

        assert!(validate_podcast(&podcast).is_ok());
        assert_eq!(podcast.image(), Some("image"));
        assert_eq!(podcast.language(), "language1");
        assert_eq!(podcast.itunes_id(), Some(1));
        assert_eq!(podcast.author().name(), "author1");
    }

    #[test]
    fn test_defaults() {
        let podcast = Podcast::new(3, author(), "Show").unwrap();
        assert_eq!(podcast.language(), "Unspecified");
        assert_eq!(podcast.image(), None);
        assert_eq!(podcast.website(), "");
    }

    #[test]
    fn test_empty_title_fails() {
        assert!(Podcast::new(1, author(), " ").is_err());

        let mut podcast = Podcast::new(1, author(), "Title").unwrap();
        assert!(podcast.set_title("").is_err());
        assert_eq!(podcast.title(), "Title");
    }

    #[test]
    fn test_website_setter_rejects_empty() {
        let mut podcast = Podcast::new(1, author(), "Title").unwrap();
        assert!(podcast.set_website("").is_err());
        podcast.set_website("https://example.com").unwrap();
        assert_eq!(podcast.website(), "https://example.com");
    }

    #[test]
    fn test_relationships_are_sets() {
        let mut podcast = Podcast::new(1, author(), "Title").unwrap();
        let news = Category::new(1, "News").unwrap();
        podcast.add_category(news.clone());
        podcast.add_category(news.clone());
        assert_eq!(podcast.categories().len(), 1);
        podcast.remove_category(&news);
        assert!(podcast.categories().is_empty());

        let episode = Episode::new(1, 1, 60, "Ep").unwrap();
        podcast.add_episode(episode.clone());
        podcast.add_episode(episode.clone());
        assert_eq!(podcast.episodes().len(), 1);

        let user = User::new(1, "listener", "pw").unwrap();
        let review = Review::new(1, &podcast, user, 5, "Great").unwrap();
        podcast.add_review(review.clone());
        podcast.add_review(review.clone());
        assert_eq!(podcast.reviews().len(), 1);
        podcast.remove_review(&review);
        assert!(podcast.reviews().is_empty());
    }

    #[test]
    fn test_foreign_episode_violates_ownership() {
        let mut podcast = Podcast::new(1, author(), "Title").unwrap();
        podcast.add_episode(Episode::new(5, 2, 60, "Elsewhere").unwrap());
        assert!(matches!(
            validate_podcast(&podcast),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_equality_and_display_order() {
        let a = Podcast::new(1, author(), "Beta").unwrap();
        let b = Podcast::new(1, author(), "Alpha").unwrap();
        let c = Podcast::new(2, author(), "Alpha").unwrap();
        assert_eq!(a, b);
        assert_ne!(b, c);
        assert_eq!(a.display_cmp(&c), Ordering::Greater);
        assert_eq!(a.to_string(), "<Podcast 1: 'Beta' by author1>");
    }
}
