/// Blog API Library
///
/// Handles posts, guides, comments, newsletter subscribers, and products
/// for the Betadomot content site. Persistent state lives entirely in a
/// hosted Postgres-via-REST backend; outbound email goes through the
/// Resend HTTP API.
///
/// # Modules
///
/// - `handlers`: Resource HTTP request handlers
/// - `models`: Shared data structures
/// - `services`: Email gateway and slug assignment
/// - `db`: PostgREST query-builder gateway to the hosted store
/// - `middleware`: HTTP Basic Authentication for the admin subtree
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
