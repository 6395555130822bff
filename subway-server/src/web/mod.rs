//! Web layer for the subway line service.
//!
//! Provides HTTP endpoints for managing stations, lines and the
//! sections that make up each line.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
