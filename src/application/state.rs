// src/application/state.rs
//
// Application state and start-up wiring
//
// Picks the storage backend from configuration, seeds it when needed, and
// hands every service the same shared repository.

use std::sync::Arc;

use log::info;

use crate::config::{AppConfig, RepositoryKind};
use crate::datareader::{populate, PopulationSummary};
use crate::db::{
    clear_all_tables, create_connection_pool, get_connection, get_database_stats,
    initialize_database, is_empty, verify_database_integrity, ConnectionPool, DatabaseStats,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{MemoryRepository, Repository, SqliteRepository};
use crate::services::{
    AuthenticationService, CatalogueService, DescriptionService, HomeService, PlaylistService,
    SearchService,
};

/// Shared state for one process.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub home_service: Arc<HomeService>,
    pub catalogue_service: Arc<CatalogueService>,
    pub search_service: Arc<SearchService>,
    pub description_service: Arc<DescriptionService>,
    pub playlist_service: Arc<PlaylistService>,
    pub authentication_service: Arc<AuthenticationService>,

    /// Counts from seeding during bootstrap; `None` when existing data was reused
    pub population: Option<PopulationSummary>,

    /// Set only for the database backend
    pub pool: Option<Arc<ConnectionPool>>,
}

impl AppState {
    /// Wires services around an already prepared repository
    pub fn new(repo: Arc<dyn Repository>, bcrypt_cost: u32) -> Self {
        Self {
            home_service: Arc::new(HomeService::new(repo.clone())),
            catalogue_service: Arc::new(CatalogueService::new(repo.clone())),
            search_service: Arc::new(SearchService::new(repo.clone())),
            description_service: Arc::new(DescriptionService::new(repo.clone())),
            playlist_service: Arc::new(PlaylistService::new(repo.clone())),
            authentication_service: Arc::new(AuthenticationService::new(repo.clone(), bcrypt_cost)),
            repo,
            population: None,
            pool: None,
        }
    }

    /// Opens the configured backend and seeds it
    ///
    /// - memory: always populated from `data_path`
    /// - database, `testing`: tables cleared, then populated
    /// - database, empty: populated (first run)
    /// - database, otherwise: existing data used as is
    pub fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let (repo, population, pool): (
            Arc<dyn Repository>,
            Option<PopulationSummary>,
            Option<Arc<ConnectionPool>>,
        ) = match config.repository {
            RepositoryKind::Memory => {
                info!("Using in-memory repository");
                let repo = MemoryRepository::new();
                let summary = populate(&repo, &config.data_path)?;
                (Arc::new(repo), Some(summary), None)
            }
            RepositoryKind::Database => {
                let path = config.database_path()?;
                info!("Using SQLite repository at {}", path.display());

                let pool = Arc::new(create_connection_pool(&path)?);
                let must_seed = {
                    let mut conn = get_connection(&pool)?;
                    initialize_database(&conn)?;
                    if config.testing {
                        info!("Testing mode: clearing all tables");
                        clear_all_tables(&mut conn)?;
                        true
                    } else {
                        is_empty(&conn)?
                    }
                };

                let repo = SqliteRepository::new(pool.clone());
                let summary = if must_seed {
                    Some(populate(&repo, &config.data_path)?)
                } else {
                    info!("Database already populated; skipping seed");
                    None
                };
                (Arc::new(repo), summary, Some(pool))
            }
        };

        let mut state = Self::new(repo, config.auth.bcrypt_cost);
        state.population = population;
        state.pool = pool;
        Ok(state)
    }

    /// Integrity check plus table counts for the database backend
    pub fn database_stats(&self) -> AppResult<DatabaseStats> {
        let pool = self.pool.as_ref().ok_or_else(|| {
            AppError::Validation("Statistics need the database repository".to_string())
        })?;
        let conn = get_connection(pool)?;
        verify_database_integrity(&conn)?;
        get_database_stats(&conn)
    }
}
