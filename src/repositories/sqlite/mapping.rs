// src/repositories/sqlite/mapping.rs
//
// Table <-> entity mapping
//
// - row_to_*: one flat row into one entity, no relationships
// - load_*: an entity plus its relationships (author, categories, episodes,
//   reviews, owner, subscriptions)
// - persist_*: upsert an entity and cascade into the rows it owns
//
// Every function takes a plain &Connection so the caller decides the
// transaction boundary. Upserts use ON CONFLICT(id) DO UPDATE so rows that
// reference the updated one stay valid under foreign_keys = ON.

use chrono::DateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{
    validate_episode, validate_id, validate_playlist, validate_podcast, Author, Category,
    DomainError, Episode, Playlist, Podcast, PodcastSubscription, Review, User,
};
use crate::error::{AppError, AppResult};

// ============================================================================
// ROW MAPPERS
// ============================================================================

fn domain_failure(column: usize, err: DomainError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(err))
}

/// Reads an INTEGER id column and checks it fits an entity id
fn get_id(row: &Row, column: usize) -> rusqlite::Result<u32> {
    let raw: i64 = row.get(column)?;
    validate_id(raw).map_err(|e| domain_failure(column, e))
}

fn text_failure(column: usize, err: DomainError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// SELECT id, name FROM authors
pub fn row_to_author(row: &Row) -> rusqlite::Result<Author> {
    let name: String = row.get(1)?;
    Author::new(get_id(row, 0)?, &name).map_err(|e| text_failure(1, e))
}

/// SELECT id, category_name FROM categories
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    let name: String = row.get(1)?;
    Category::new(get_id(row, 0)?, &name).map_err(|e| text_failure(1, e))
}

pub const EPISODE_COLUMNS: &str =
    "id, podcast_id, title, audio_url, audio_length, description, pub_date";

/// SELECT EPISODE_COLUMNS FROM episodes
pub fn row_to_episode(row: &Row) -> rusqlite::Result<Episode> {
    let title: String = row.get(2)?;
    let pub_date = match row.get::<_, Option<String>>(6)? {
        Some(raw) => Some(DateTime::parse_from_rfc3339(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(Episode::new(get_id(row, 0)?, get_id(row, 1)?, row.get(4)?, &title)
        .map_err(|e| text_failure(2, e))?
        .with_audio_link(row.get::<_, String>(3)?)
        .with_description(row.get::<_, String>(5)?)
        .with_pub_date(pub_date))
}

/// SELECT id, username, password FROM users
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let username: String = row.get(1)?;
    let password: String = row.get(2)?;
    User::new(get_id(row, 0)?, &username, &password).map_err(|e| text_failure(1, e))
}

/// SELECT id, user_id, podcast_id FROM subscriptions
pub fn row_to_subscription(row: &Row) -> rusqlite::Result<PodcastSubscription> {
    Ok(PodcastSubscription::from_ids(
        get_id(row, 0)?,
        get_id(row, 1)?,
        get_id(row, 2)?,
    ))
}

/// Flat podcasts row; the author is resolved separately
struct PodcastRow {
    id: u32,
    title: String,
    image: Option<String>,
    description: String,
    language: String,
    website: String,
    author_id: u32,
    itunes_id: Option<i64>,
}

const PODCAST_COLUMNS: &str =
    "id, title, image_url, description, language, website_url, author_id, itunes_id";

fn row_to_podcast_row(row: &Row) -> rusqlite::Result<PodcastRow> {
    Ok(PodcastRow {
        id: get_id(row, 0)?,
        title: row.get(1)?,
        image: row.get(2)?,
        description: row.get(3)?,
        language: row.get(4)?,
        website: row.get(5)?,
        author_id: get_id(row, 6)?,
        itunes_id: row.get(7)?,
    })
}

/// Flat reviews row; the reviewer is resolved separately
struct ReviewRow {
    id: u32,
    podcast_id: u32,
    user_id: u32,
    rating: u8,
    comment: String,
}

const REVIEW_COLUMNS: &str = "id, podcast_id, user_id, rating, comment";

fn row_to_review_row(row: &Row) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: get_id(row, 0)?,
        podcast_id: get_id(row, 1)?,
        user_id: get_id(row, 2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
    })
}

// ============================================================================
// HYDRATION
// ============================================================================

fn missing(what: &str, id: u32) -> AppError {
    AppError::Other(format!("Dangling reference to {} {}", what, id))
}

pub fn load_author(conn: &Connection, author_id: u32) -> AppResult<Option<Author>> {
    let author = conn
        .query_row(
            "SELECT id, name FROM authors WHERE id = ?1",
            [author_id],
            row_to_author,
        )
        .optional()?;

    let Some(author) = author else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT id FROM podcasts WHERE author_id = ?1 ORDER BY id")?;
    let podcast_ids = stmt
        .query_map([author_id], |row| get_id(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(author.with_podcast_ids(podcast_ids)))
}

pub fn load_category(conn: &Connection, category_id: u32) -> AppResult<Option<Category>> {
    Ok(conn
        .query_row(
            "SELECT id, category_name FROM categories WHERE id = ?1",
            [category_id],
            row_to_category,
        )
        .optional()?)
}

pub fn load_all_categories(conn: &Connection) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, category_name FROM categories ORDER BY id")?;
    let categories = stmt
        .query_map([], row_to_category)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

pub fn load_episode(conn: &Connection, episode_id: u32) -> AppResult<Option<Episode>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM episodes WHERE id = ?1", EPISODE_COLUMNS),
            [episode_id],
            row_to_episode,
        )
        .optional()?)
}

/// The user with their subscriptions
pub fn load_user(conn: &Connection, user_id: u32) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, password FROM users WHERE id = ?1",
            [user_id],
            row_to_user,
        )
        .optional()?;

    user.map(|user| attach_subscriptions(conn, user)).transpose()
}

pub fn load_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, password FROM users WHERE username = ?1",
            [username],
            row_to_user,
        )
        .optional()?;

    user.map(|user| attach_subscriptions(conn, user)).transpose()
}

fn attach_subscriptions(conn: &Connection, mut user: User) -> AppResult<User> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, podcast_id FROM subscriptions WHERE user_id = ?1 ORDER BY id",
    )?;
    let subscriptions = stmt
        .query_map([user.id()], row_to_subscription)?
        .collect::<Result<Vec<_>, _>>()?;

    for subscription in subscriptions {
        user.add_subscription(subscription);
    }
    Ok(user)
}

fn hydrate_review(conn: &Connection, row: ReviewRow) -> AppResult<Review> {
    let user = load_user(conn, row.user_id)?.ok_or_else(|| missing("user", row.user_id))?;
    Ok(Review::for_podcast_id(
        row.id,
        row.podcast_id,
        user,
        row.rating,
        &row.comment,
    )?)
}

pub fn load_review(conn: &Connection, review_id: u32) -> AppResult<Option<Review>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM reviews WHERE id = ?1", REVIEW_COLUMNS),
            [review_id],
            row_to_review_row,
        )
        .optional()?;

    row.map(|row| hydrate_review(conn, row)).transpose()
}

pub fn load_reviews_for_podcast(conn: &Connection, podcast_id: u32) -> AppResult<Vec<Review>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM reviews WHERE podcast_id = ?1 ORDER BY id",
        REVIEW_COLUMNS
    ))?;
    let rows = stmt
        .query_map([podcast_id], row_to_review_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|row| hydrate_review(conn, row))
        .collect()
}

fn load_podcast_categories(conn: &Connection, podcast_id: u32) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.category_name
         FROM categories c
         JOIN podcast_categories pc ON pc.category_id = c.id
         WHERE pc.podcast_id = ?1
         ORDER BY c.id",
    )?;
    let categories = stmt
        .query_map([podcast_id], row_to_category)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

fn load_podcast_episodes(conn: &Connection, podcast_id: u32) -> AppResult<Vec<Episode>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM episodes WHERE podcast_id = ?1 ORDER BY id",
        EPISODE_COLUMNS
    ))?;
    let episodes = stmt
        .query_map([podcast_id], row_to_episode)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(episodes)
}

fn hydrate_podcast(conn: &Connection, row: PodcastRow) -> AppResult<Podcast> {
    let author = load_author(conn, row.author_id)?.ok_or_else(|| missing("author", row.author_id))?;

    let mut podcast = Podcast::new(row.id, author, &row.title)?
        .with_image(row.image)
        .with_description(row.description)
        .with_website(row.website)
        .with_itunes_id(row.itunes_id)
        .with_language(row.language);

    for category in load_podcast_categories(conn, row.id)? {
        podcast.add_category(category);
    }
    for episode in load_podcast_episodes(conn, row.id)? {
        podcast.add_episode(episode);
    }
    for review in load_reviews_for_podcast(conn, row.id)? {
        podcast.add_review(review);
    }
    Ok(podcast)
}

/// The podcast with author, categories, episodes and reviews
pub fn load_podcast(conn: &Connection, podcast_id: u32) -> AppResult<Option<Podcast>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM podcasts WHERE id = ?1", PODCAST_COLUMNS),
            [podcast_id],
            row_to_podcast_row,
        )
        .optional()?;

    row.map(|row| hydrate_podcast(conn, row)).transpose()
}

pub fn load_all_podcasts(conn: &Connection) -> AppResult<Vec<Podcast>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM podcasts ORDER BY id",
        PODCAST_COLUMNS
    ))?;
    let rows = stmt
        .query_map([], row_to_podcast_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|row| hydrate_podcast(conn, row))
        .collect()
}

/// The playlist with its owner and episodes in stored order
pub fn load_playlist(conn: &Connection, playlist_id: u32) -> AppResult<Option<Playlist>> {
    let row = conn
        .query_row(
            "SELECT id, user_id, name FROM playlists WHERE id = ?1",
            [playlist_id],
            |row| Ok((get_id(row, 0)?, get_id(row, 1)?, row.get::<_, String>(2)?)),
        )
        .optional()?;

    let Some((id, user_id, name)) = row else {
        return Ok(None);
    };

    let owner = load_user(conn, user_id)?.ok_or_else(|| missing("user", user_id))?;

    let mut stmt = conn.prepare(
        "SELECT e.id, e.podcast_id, e.title, e.audio_url, e.audio_length, e.description, e.pub_date
         FROM episodes e
         JOIN playlist_episodes pe ON pe.episode_id = e.id
         WHERE pe.playlist_id = ?1
         ORDER BY pe.position",
    )?;
    let episodes = stmt
        .query_map([id], row_to_episode)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Playlist::new(id, owner, &name)?.with_episodes(episodes)))
}

pub fn load_playlist_by_owner(conn: &Connection, user_id: u32) -> AppResult<Option<Playlist>> {
    let playlist_id = conn
        .query_row(
            "SELECT id FROM playlists WHERE user_id = ?1 ORDER BY id LIMIT 1",
            [user_id],
            |row| get_id(row, 0),
        )
        .optional()?;

    match playlist_id {
        Some(id) => load_playlist(conn, id),
        None => Ok(None),
    }
}

/// MAX(id) + 1, or 1 for an empty table
pub fn next_id(conn: &Connection, table: &str) -> AppResult<u32> {
    let raw: i64 = conn.query_row(
        &format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", table),
        [],
        |row| row.get(0),
    )?;
    Ok(validate_id(raw)?)
}

// ============================================================================
// PERSISTENCE (cascading upserts)
// ============================================================================

pub fn persist_author(conn: &Connection, author: &Author) -> AppResult<()> {
    conn.execute(
        "INSERT INTO authors (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![author.id(), author.name()],
    )?;
    Ok(())
}

pub fn persist_category(conn: &Connection, category: &Category) -> AppResult<()> {
    conn.execute(
        "INSERT INTO categories (id, category_name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET category_name = excluded.category_name",
        params![category.id(), category.name()],
    )?;
    Ok(())
}

/// The owning podcast must already be stored
pub fn persist_episode(conn: &Connection, episode: &Episode) -> AppResult<()> {
    validate_episode(episode)?;
    conn.execute(
        "INSERT INTO episodes (id, podcast_id, title, audio_url, audio_length, description, pub_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            podcast_id = excluded.podcast_id,
            title = excluded.title,
            audio_url = excluded.audio_url,
            audio_length = excluded.audio_length,
            description = excluded.description,
            pub_date = excluded.pub_date",
        params![
            episode.id(),
            episode.podcast_id(),
            episode.title(),
            episode.audio_link(),
            episode.audio_length(),
            episode.description(),
            episode.pub_date().map(|d| d.to_rfc3339()),
        ],
    )?;
    Ok(())
}

/// Upserts the `users` row only; subscriptions are left as stored
fn persist_user_row(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            username = excluded.username,
            password = excluded.password",
        params![user.id(), user.username(), user.password()],
    )?;
    Ok(())
}

/// Upserts the user and replaces their subscription rows
pub fn persist_user(conn: &Connection, user: &User) -> AppResult<()> {
    persist_user_row(conn, user)?;

    conn.execute("DELETE FROM subscriptions WHERE user_id = ?1", [user.id()])?;
    for subscription in user.subscriptions() {
        conn.execute(
            "INSERT INTO subscriptions (id, user_id, podcast_id) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                podcast_id = excluded.podcast_id",
            params![subscription.id(), subscription.owner_id(), subscription.podcast_id()],
        )?;
    }
    Ok(())
}

/// Upserts the review together with its reviewer's row.
/// The embedded user may be an older copy, so its subscriptions are not written.
pub fn persist_review(conn: &Connection, review: &Review) -> AppResult<()> {
    persist_user_row(conn, review.user())?;
    conn.execute(
        "INSERT INTO reviews (id, podcast_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            podcast_id = excluded.podcast_id,
            user_id = excluded.user_id,
            rating = excluded.rating,
            comment = excluded.comment",
        params![
            review.id(),
            review.podcast_id(),
            review.user().id(),
            review.rating(),
            review.content()
        ],
    )?;
    Ok(())
}

/// Upserts the podcast and cascades into author, categories, episodes and reviews
pub fn persist_podcast(conn: &Connection, podcast: &Podcast) -> AppResult<()> {
    validate_podcast(podcast)?;
    persist_author(conn, podcast.author())?;

    conn.execute(
        "INSERT INTO podcasts (id, title, image_url, description, language, website_url, author_id, itunes_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            image_url = excluded.image_url,
            description = excluded.description,
            language = excluded.language,
            website_url = excluded.website_url,
            author_id = excluded.author_id,
            itunes_id = excluded.itunes_id",
        params![
            podcast.id(),
            podcast.title(),
            podcast.image(),
            podcast.description(),
            podcast.language(),
            podcast.website(),
            podcast.author().id(),
            podcast.itunes_id(),
        ],
    )?;

    conn.execute(
        "DELETE FROM podcast_categories WHERE podcast_id = ?1",
        [podcast.id()],
    )?;
    for category in podcast.categories() {
        persist_category(conn, category)?;
        conn.execute(
            "INSERT INTO podcast_categories (podcast_id, category_id) VALUES (?1, ?2)",
            params![podcast.id(), category.id()],
        )?;
    }

    for episode in podcast.episodes() {
        persist_episode(conn, episode)?;
    }
    for review in podcast.reviews() {
        persist_review(conn, review)?;
    }
    Ok(())
}

/// Upserts the playlist and its owner's row, then rewrites the ordered membership.
/// Member episodes must already be stored.
pub fn persist_playlist(conn: &Connection, playlist: &Playlist) -> AppResult<()> {
    validate_playlist(playlist)?;
    persist_user_row(conn, playlist.owner())?;

    conn.execute(
        "INSERT INTO playlists (id, user_id, name) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            name = excluded.name",
        params![playlist.id(), playlist.owner().id(), playlist.name()],
    )?;

    conn.execute(
        "DELETE FROM playlist_episodes WHERE playlist_id = ?1",
        [playlist.id()],
    )?;
    for (position, episode) in playlist.episodes().iter().enumerate() {
        conn.execute(
            "INSERT INTO playlist_episodes (playlist_id, episode_id, position) VALUES (?1, ?2, ?3)",
            params![playlist.id(), episode.id(), position as i64],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_connection, initialize_database};

    fn conn() -> Connection {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_negative_id_row_is_rejected() {
        let conn = conn();
        conn.execute("INSERT INTO authors (id, name) VALUES (-3, 'Neg')", [])
            .unwrap();

        let result = conn.query_row("SELECT id, name FROM authors", [], row_to_author);
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, _, _))
        ));
    }

    #[test]
    fn test_pub_date_keeps_offset() {
        let conn = conn();
        let author = Author::new(1, "a").unwrap();
        let podcast = Podcast::new(1, author, "p").unwrap();
        persist_podcast(&conn, &podcast).unwrap();

        let date = DateTime::parse_from_rfc3339("2017-12-01T23:00:00+02:00").unwrap();
        let episode = Episode::new(1, 1, 10, "e").unwrap().with_pub_date(Some(date));
        persist_episode(&conn, &episode).unwrap();

        let loaded = load_episode(&conn, 1).unwrap().unwrap();
        assert_eq!(loaded.pub_date(), Some(date));
        assert_eq!(loaded.pub_date().unwrap().offset(), date.offset());
    }

    #[test]
    fn test_persist_podcast_replaces_category_links() {
        let conn = conn();
        let mut podcast = Podcast::new(1, Author::new(1, "a").unwrap(), "p").unwrap();
        let news = Category::new(1, "News").unwrap();
        let comedy = Category::new(2, "Comedy").unwrap();
        podcast.add_category(news.clone());
        persist_podcast(&conn, &podcast).unwrap();

        podcast.remove_category(&news);
        podcast.add_category(comedy);
        persist_podcast(&conn, &podcast).unwrap();

        let loaded = load_podcast(&conn, 1).unwrap().unwrap();
        let names: Vec<&str> = loaded.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Comedy"]);
        // the category row itself survives
        assert!(load_category(&conn, 1).unwrap().is_some());
    }

    #[test]
    fn test_user_subscriptions_round_trip() {
        let conn = conn();
        let podcast = Podcast::new(4, Author::new(1, "a").unwrap(), "p").unwrap();
        persist_podcast(&conn, &podcast).unwrap();

        let mut user = User::new(2, "listener", "hash").unwrap();
        user.add_subscription(PodcastSubscription::new(1, &user, &podcast));
        persist_user(&conn, &user).unwrap();

        let loaded = load_user_by_username(&conn, "listener").unwrap().unwrap();
        assert!(loaded.is_subscribed_to(4));
        assert_eq!(loaded.subscriptions().len(), 1);
    }

    #[test]
    fn test_stale_user_copy_keeps_stored_subscriptions() {
        let conn = conn();
        let podcast = Podcast::new(4, Author::new(1, "a").unwrap(), "p").unwrap();
        persist_podcast(&conn, &podcast).unwrap();

        let stale = User::new(2, "listener", "hash").unwrap();
        persist_user(&conn, &stale).unwrap();

        let mut current = stale.clone();
        current.add_subscription(PodcastSubscription::new(1, &current, &podcast));
        persist_user(&conn, &current).unwrap();

        let review = Review::new(1, &podcast, stale.clone(), 4, "fine").unwrap();
        persist_review(&conn, &review).unwrap();
        let playlist = Playlist::new(1, stale, "mine").unwrap();
        persist_playlist(&conn, &playlist).unwrap();

        let loaded = load_user_by_username(&conn, "listener").unwrap().unwrap();
        assert!(loaded.is_subscribed_to(4));
    }

    #[test]
    fn test_next_id_on_empty_table() {
        let conn = conn();
        assert_eq!(next_id(&conn, "reviews").unwrap(), 1);
    }
}
