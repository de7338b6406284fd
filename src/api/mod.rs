//! HTTP surface for MyBudget
//!
//! An axum router over the budget and user services. Every route except
//! `/health` requires `Authorization: Bearer <token>`.

pub mod dto;
pub mod error;
pub mod format;
pub mod guards;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::{build_app, create_router};
pub use server::run_server;
pub use state::AppState;
