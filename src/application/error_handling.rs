// src/application/error_handling.rs
//
// Error responses for the command-line surface
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Provides a consistent JSON error format
// - Never exposes storage internals
// - Logs internal failures for debugging

use log::error;
use serde::Serialize;

use crate::error::AppError;

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Podcast, episode, user or playlist not found
    NotFound,

    /// Invalid input (bad rating, empty review, blank query)
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Wrong username or password
    Authentication,

    /// Username already taken
    Conflict,

    /// Database/persistence error
    Database,

    /// File system or seed data error
    FileSystem,

    /// Configuration error
    Configuration,

    /// Other/unknown error
    Internal,
}

impl ErrorType {
    /// Process exit code used by the CLI
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorType::NotFound => 3,
            ErrorType::Validation | ErrorType::DomainError => 4,
            ErrorType::Authentication => 5,
            ErrorType::Conflict => 6,
            ErrorType::Configuration => 78,
            ErrorType::Database | ErrorType::FileSystem | ErrorType::Internal => 1,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::NonExistentPodcast(_) | AppError::NonExistentEpisode(_) => {
                Self::new(ErrorType::NotFound, error.to_string(), None)
            }

            AppError::UnknownUser(_) => Self::new(ErrorType::NotFound, error.to_string(), None),

            AppError::NameNotUnique(_) => Self::new(ErrorType::Conflict, error.to_string(), None),

            AppError::Authentication => Self::new(
                ErrorType::Authentication,
                "Username or password is incorrect",
                None,
            ),

            AppError::Validation(message) => Self::new(ErrorType::Validation, message, None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Config(message) => Self::new(ErrorType::Configuration, message, None),

            AppError::Database(db_error) => {
                error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Csv(csv_error) => {
                error!("CSV error: {:?}", csv_error);
                Self::new(
                    ErrorType::FileSystem,
                    "Seed data could not be read",
                    Some(csv_error.to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::PasswordHash(hash_error) => {
                error!("Password hashing error: {:?}", hash_error);
                Self::new(ErrorType::Internal, "Password could not be processed", None)
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }
}
