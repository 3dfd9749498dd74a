// src/repositories/sqlite/mod.rs
//
// SQLite backend: rusqlite behind an r2d2 pool

pub mod mapping;
pub mod sqlite_repository;

pub use sqlite_repository::SqliteRepository;
