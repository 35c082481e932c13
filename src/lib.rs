//! coursehub: course, student and feedback REST backend.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use service::{CourseDirectory, FeedbackLedger, StudentRoster};
pub use state::AppState;
pub use store::{ensure_database_exists, DocumentStore, MemoryStore, PgStore};
