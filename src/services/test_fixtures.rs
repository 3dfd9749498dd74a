// src/services/test_fixtures.rs
//
// Shared catalogue used by the service tests.
//
//  id  title                  author                 language  categories
//   1  Brian Denny Radio      D Hour Radio Network   English   Comedy
//   2  3 Doors Down Podcast   Rock Media             English   Music
//   3  Action News            Channel 9              English   News
//   4  a cappella hour        Vocal Co               English   Music
//   5  Tallin Messages        Tallin Church          Spanish   Religion & Spirituality
//  6-15 Zed Talks NN          Zed Network            English   News

use std::sync::Arc;

use crate::domain::{Author, Category, Episode, Podcast, User};
use crate::repositories::{MemoryRepository, Repository};

pub fn podcast(id: u32, title: &str, author: (u32, &str), language: &str, category: (u32, &str)) -> Podcast {
    let mut podcast = Podcast::new(id, Author::new(author.0, author.1).unwrap(), title)
        .unwrap()
        .with_language(language)
        .with_description(format!("About {title}"))
        .with_website(format!("https://podcasts.example/{id}"));
    podcast.add_category(Category::new(category.0, category.1).unwrap());
    podcast
}

pub fn catalogue() -> Vec<Podcast> {
    let mut podcasts = vec![
        podcast(1, "Brian Denny Radio", (1, "D Hour Radio Network"), "English", (1, "Comedy")),
        podcast(2, "3 Doors Down Podcast", (2, "Rock Media"), "English", (2, "Music")),
        podcast(3, "Action News", (3, "Channel 9"), "English", (3, "News")),
        podcast(4, "a cappella hour", (4, "Vocal Co"), "English", (2, "Music")),
        podcast(5, "Tallin Messages", (5, "Tallin Church"), "Spanish", (4, "Religion & Spirituality")),
    ];
    for id in 6..=15 {
        podcasts.push(podcast(id, &format!("Zed Talks {id:02}"), (6, "Zed Network"), "English", (3, "News")));
    }

    podcasts[0].add_episode(Episode::new(1, 1, 2658, "The Mandarian Orange Show").unwrap());
    podcasts[0].add_episode(Episode::new(2, 1, 1300, "Finding yourself").unwrap());
    podcasts[2].add_episode(Episode::new(3, 3, 600, "Breaking").unwrap());
    podcasts
}

pub fn memory_repo() -> Arc<dyn Repository> {
    let repo = MemoryRepository::new();
    repo.add_podcasts(&catalogue()).unwrap();
    Arc::new(repo)
}

/// Registers a user directly (no hashing)
pub fn add_user(repo: &Arc<dyn Repository>, username: &str) -> User {
    let user = User::new(repo.get_next_user_id().unwrap(), username, "hash").unwrap();
    repo.add_user(&user).unwrap();
    user
}
