// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Configuration error: {0}")]
    Config(String),

    // ------------------------------------------------------------------
    // Service-level errors
    // ------------------------------------------------------------------
    #[error("Podcast {0} does not exist")]
    NonExistentPodcast(u32),

    #[error("Episode {0} does not exist")]
    NonExistentEpisode(u32),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Username '{0}' is already taken")]
    NameNotUnique(String),

    #[error("Authentication failed")]
    Authentication,

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Validation(format!("Date parse error: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Validation(format!("Number parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts() {
        let err: AppError = DomainError::RatingOutOfRange(9).into();
        assert!(matches!(err, AppError::Domain(DomainError::RatingOutOfRange(9))));
    }

    #[test]
    fn test_parse_errors_become_validation() {
        let err: AppError = "x1".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::NonExistentPodcast(7)).unwrap();
        assert_eq!(json, "\"Podcast 7 does not exist\"");
    }
}
