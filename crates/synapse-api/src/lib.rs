//! Synapse API crate - axum HTTP server driving scripted presentations.
//!
//! Each `POST /api/start` opens an independent session; `POST /api/next`
//! advances it one step at a time.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
