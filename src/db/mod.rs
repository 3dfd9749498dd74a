// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_connection, get_connection, get_database_path,
    ConnectionPool, PooledConn, IN_MEMORY_PATH,
};

pub use migrations::{
    clear_all_tables, get_database_stats, initialize_database, is_empty,
    verify_database_integrity, DatabaseStats,
};
