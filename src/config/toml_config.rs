use crate::domain::model::MAX_USER_ID;
use crate::domain::ports::AuditProvider;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{validate_length, validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "package-intake.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "packages.db".to_string(),
            busy_timeout_ms: 5_000,
        }
    }
}

/// Placeholder identity stamped on every write.
///
/// Nothing derives these from the caller yet; every record carries the same
/// hub and user until an identity source exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub hub_id: i64,
    pub user_id: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            hub_id: 1,
            user_id: "user1234".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            IntakeError::config(format!(
                "Cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${PACKAGE_DB})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| IntakeError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database.busy_timeout_ms)
    }

    /// Commented default configuration written by `init-config`.
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r#"# package-intake configuration
# Values of the form ${{VAR}} are replaced from the environment.

[database]
# SQLite file, or ":memory:" for a throwaway store
path = "{path}"
busy_timeout_ms = {timeout}

[audit]
# Placeholder identity written on every create/update
hub_id = {hub}
user_id = "{user}"

[logging]
# level = "info"
format = "compact"
"#,
            path = defaults.database.path,
            timeout = defaults.database.busy_timeout_ms,
            hub = defaults.audit.hub_id,
            user = defaults.audit.user_id,
        )
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("database.path", &self.database.path)?;
        validate_non_empty_string("audit.user_id", &self.audit.user_id)?;
        validate_length("audit.user_id", &self.audit.user_id, MAX_USER_ID)?;

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(IntakeError::validation(
                    "logging.level",
                    format!(
                        "Unsupported level '{}'. Valid levels: {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl AuditProvider for AppConfig {
    fn hub_id(&self) -> i64 {
        self.audit.hub_id
    }

    fn user_id(&self) -> &str {
        &self.audit.user_id
    }
}
