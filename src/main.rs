// src/main.rs
// Podcatalogue command-line interface
//
// Every command bootstraps the configured backend, runs one service call,
// and prints the result as pretty JSON on stdout. Failures print an
// ErrorResponse and exit with its code.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use podcatalogue::{
    application::{AppState, ErrorResponse},
    config::AppConfig,
    logging,
    services::SearchField,
    AppError, AppResult,
};

#[derive(Parser)]
#[command(name = "podcatalogue")]
#[command(about = "Browse podcasts, review them and keep a playlist", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "PODCAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the CSV data (clears an existing database first)
    Seed,
    /// Podcasts for the home page
    Home,
    /// Podcasts grouped under one letter of the alphabet
    Catalogue {
        /// Letter bucket; `#` for titles not starting with a letter
        #[arg(short, long, default_value = "A")]
        letter: String,
    },
    /// Search podcasts by title, author, category or language
    Search {
        /// Field to match: title | author | category | language
        #[arg(short, long, default_value = "title")]
        by: String,
        /// Text to look for (case-insensitive)
        #[arg(short, long)]
        query: String,
        /// 1-based result page
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Full description of one podcast
    Show {
        podcast_id: u32,
    },
    /// Create a new user
    Register {
        username: String,
        password: String,
    },
    /// Check a username and password
    Login {
        username: String,
        password: String,
    },
    /// Rate (1-5) and comment on a podcast
    Review {
        username: String,
        podcast_id: u32,
        rating: u8,
        content: String,
    },
    /// Show a user's playlist
    Playlist {
        username: String,
    },
    /// Add an episode to a user's playlist
    AddToPlaylist {
        username: String,
        episode_id: u32,
    },
    /// Remove an episode from a user's playlist
    RemoveFromPlaylist {
        username: String,
        episode_id: u32,
    },
    /// Integrity check and row counts (database repository only)
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init_logging(&config.logging.level, config.logging.directory.as_deref())
        .context("failed to initialize logging")?;

    if matches!(cli.command, Commands::Seed) {
        config.testing = true;
    }

    let outcome = AppState::bootstrap(&config).and_then(|state| run(&state, cli.command));

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(error) => {
            let response = ErrorResponse::from_app_error(error);
            println!("{}", serde_json::to_string_pretty(&response)?);
            std::process::exit(response.error_type.exit_code());
        }
    }
}

fn run(state: &AppState, command: Commands) -> AppResult<Value> {
    let value = match command {
        Commands::Seed => serde_json::to_value(state.population)?,

        Commands::Stats => serde_json::to_value(state.database_stats()?)?,

        Commands::Home => serde_json::to_value(state.home_service.get_homepage_podcasts()?)?,

        Commands::Catalogue { letter } => {
            serde_json::to_value(state.catalogue_service.get_podcasts_by_letter(&letter)?)?
        }

        Commands::Search { by, query, page } => {
            let field: SearchField = by.parse()?;
            serde_json::to_value(state.search_service.search_page(field, &query, page)?)?
        }

        Commands::Show { podcast_id } => {
            let podcast = state.description_service.get_podcast_data(podcast_id)?;
            let navigation = state
                .description_service
                .get_previous_and_next_podcast_ids(podcast_id)?;
            json!({ "podcast": podcast, "navigation": navigation })
        }

        Commands::Register { username, password } => {
            let user = state.authentication_service.add_user(&username, &password)?;
            json!({ "id": user.id(), "username": user.username() })
        }

        Commands::Login { username, password } => {
            state
                .authentication_service
                .authenticate_user(&username, &password)?;
            json!({ "authenticated": true, "username": username.trim() })
        }

        Commands::Review {
            username,
            podcast_id,
            rating,
            content,
        } => serde_json::to_value(state.description_service.review_podcast(
            &username,
            podcast_id,
            rating,
            &content,
        )?)?,

        Commands::Playlist { username } => {
            serde_json::to_value(state.playlist_service.show_playlist(&username)?)?
        }

        Commands::AddToPlaylist {
            username,
            episode_id,
        } => serde_json::to_value(
            state
                .description_service
                .add_to_user_playlist(&username, episode_id)?,
        )?,

        Commands::RemoveFromPlaylist {
            username,
            episode_id,
        } => {
            let user = state
                .playlist_service
                .get_user_by_username(&username)?
                .ok_or_else(|| AppError::UnknownUser(username.clone()))?;
            let removed = state
                .playlist_service
                .remove_from_playlist(Some(&user), episode_id)?;
            json!({ "removed": removed, "episode_id": episode_id })
        }
    };

    Ok(value)
}
