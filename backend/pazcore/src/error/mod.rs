pub mod config;
pub mod engine;

pub use config::ConfigError;
pub use engine::CoreError;
