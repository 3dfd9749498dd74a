// src/application/mod.rs
//
// Outer surface: start-up wiring and user-facing error mapping

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
