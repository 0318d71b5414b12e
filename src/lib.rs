//! Hotel bookings REST API: cities, hotels, rooms, users and bookings.
//!
//! Requests flow handler → validator → repository → [`store::Session`]; the store is either
//! PostgreSQL ([`store::PgGateway`]) or in-process ([`store::MemoryGateway`]).

pub mod case;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{AppError, ConfigError, StoreError};
pub use routes::app;
pub use settings::AppConfig;
pub use state::AppState;
pub use store::{ensure_database_exists, Gateway, MemoryGateway, PgGateway};
pub use telemetry::init_tracing;
