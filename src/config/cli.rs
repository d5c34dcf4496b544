use crate::app::presenter::ListFormat;
use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "package-intake")]
#[command(about = "Capture, list and delete shipment intake records")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path from the config file
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Records(RecordCommand),
    /// Write a default configuration file
    InitConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        output: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Commands that operate on the package store.
#[derive(Debug, Clone, Subcommand)]
pub enum RecordCommand {
    /// List every package record
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Create a package from a JSON payload (file or stdin)
    Create {
        #[arg(long)]
        payload: Option<String>,
    },
    /// Overwrite every field of the package with the given id
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        payload: Option<String>,
    },
    /// Delete the package with the given id
    Delete {
        #[arg(long)]
        id: i64,
    },
}

impl CliConfig {
    /// Resolves the effective configuration.
    ///
    /// An explicit `--config` must exist; otherwise `package-intake.toml` in
    /// the working directory is used when present, and defaults when not.
    /// `--database` wins over the file.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => AppConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }

        Ok(config)
    }

    /// Loads the effective config and validates it.
    pub fn resolve_app_config(&self) -> Result<AppConfig> {
        let config = self.load_app_config()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_subcommands() {
        let cli = CliConfig::parse_from(["package-intake", "--verbose", "delete", "--id", "7"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Records(RecordCommand::Delete { id: 7 })
        ));

        let cli = CliConfig::parse_from(["package-intake", "list", "--format", "csv"]);
        assert!(matches!(
            cli.command,
            Command::Records(RecordCommand::List {
                format: ListFormat::Csv
            })
        ));

        let cli = CliConfig::parse_from(["package-intake", "init-config", "--force"]);
        assert!(matches!(cli.command, Command::InitConfig { force: true, .. }));
    }

    #[test]
    fn test_database_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("intake.toml");
        std::fs::write(&config_path, "[database]\npath = \"file.db\"\n").unwrap();

        let cli = CliConfig::parse_from([
            "package-intake",
            "--config",
            config_path.to_str().unwrap(),
            "--database",
            ":memory:",
            "list",
        ]);
        let config = cli.load_app_config().unwrap();
        assert_eq!(config.database.path, ":memory:");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let cli = CliConfig::parse_from([
            "package-intake",
            "--config",
            "/definitely/not/here.toml",
            "list",
        ]);
        assert!(cli.load_app_config().is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected_on_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("intake.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let cli = CliConfig::parse_from([
            "package-intake",
            "--config",
            config_path.to_str().unwrap(),
            "list",
        ]);
        assert!(cli.load_app_config().is_ok());
        assert!(cli.resolve_app_config().is_err());
    }
}
