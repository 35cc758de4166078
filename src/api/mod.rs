//! HTTP surface for lab report analysis.
//!
//! Routes are nested under `/api/`. `api_router()` returns a composable
//! `Router`; `start_server()` binds it and runs it in a background task.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
