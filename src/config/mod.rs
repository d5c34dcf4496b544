#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, RecordCommand};
pub use toml_config::{AppConfig, AuditConfig, DatabaseConfig, LogFormat, LoggingConfig};
