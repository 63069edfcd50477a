//! IT asset inventory: computer systems and routers kept in SQLite, managed through HTML forms.

pub mod config;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod model;
pub mod render;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{EntityDescriptor, EntityRegistry, FieldValues, Record, COMPUTER_SYSTEM, ROUTER};
pub use routes::{app, common_routes, entity_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, ensure_schema};
