// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - Absence is Ok(None), never an error
// - Explicit SQL only

pub mod memory_repository;
pub mod repository;
pub mod sqlite;

pub use memory_repository::MemoryRepository;
pub use repository::Repository;
pub use sqlite::SqliteRepository;

#[cfg(test)]
pub use repository::MockRepository;

#[cfg(test)]
mod repository_contract_tests;
