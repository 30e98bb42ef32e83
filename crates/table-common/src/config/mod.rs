//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, ServerConfig,
    DATABASE_PORT, DATABASE_USER, LISTEN_PORT,
};
