// crates/rdm2geojson-core/src/config.rs

//! # Configuration
//!
//! Typed view of `config.yml`. The file is parsed and validated once at
//! startup; afterwards the [`Config`] value is passed by reference to
//! whatever needs it.
//!
//! ```yaml
//! app:
//!   log_level: INFO
//!   precision: 5
//! database:
//!   host: 127.0.0.1
//!   user: rdmuser
//!   password: secret
//!   name: rdmdb
//!   connect_timeout: 10
//! filters:
//!   quest:
//!     enabled: "%"
//!     replace:
//!       - ["_quest", ""]
//!   raid:
//!     enabled: "%"
//!   iv:
//!     enabled: "iv_%"
//! ```

use crate::category::Category;
use crate::error::{ExportError, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Upper bound for `app.precision`. An `f64` carries ~15 significant
/// decimal digits.
pub const MAX_PRECISION: u32 = 15;

pub const DEFAULT_MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub filters: Filters,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// Decimal digits kept on every exported coordinate.
    pub precision: u32,
}

/// Verbosity. Parsed case-insensitively; the Python logging names
/// (`WARNING`, `CRITICAL`) are accepted next to the Rust ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(format!(
                "unknown log level '{s}', expected one of TRACE, DEBUG, INFO, WARNING, ERROR, CRITICAL"
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, String> {
        value.parse()
    }
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Seconds allowed for establishing the connection.
    pub connect_timeout: u64,
}

// Keep the password out of logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn default_port() -> u16 {
    DEFAULT_MYSQL_PORT
}

#[derive(Debug, Clone, Deserialize)]
pub struct Filters {
    pub quest: CategoryFilter,
    pub raid: CategoryFilter,
    pub iv: CategoryFilter,
}

impl Filters {
    pub fn get(&self, category: Category) -> &CategoryFilter {
        match category {
            Category::Quest => &self.quest,
            Category::Raid => &self.raid,
            Category::Iv => &self.iv,
        }
    }
}

/// Per-category row filter and name rewriting.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFilter {
    /// SQL `LIKE` pattern matched against `instance.name`.
    pub enabled: String,
    /// Applied in order, see [`crate::geometry::rename`].
    #[serde(default)]
    pub replace: Vec<ReplaceRule>,
}

/// Literal `[match, replacement]` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct ReplaceRule {
    pub pattern: String,
    pub replacement: String,
}

impl ReplaceRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl From<(String, String)> for ReplaceRule {
    fn from((pattern, replacement): (String, String)) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

impl Config {
    /// Reads, parses and validates a YAML config file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ExportError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_yaml::from_str(&contents).map_err(|source| ExportError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.app.precision > MAX_PRECISION {
            return Err(ExportError::InvalidConfig(format!(
                "app.precision must be at most {MAX_PRECISION}, got {}",
                self.app.precision
            )));
        }
        if self.database.connect_timeout == 0 {
            return Err(ExportError::InvalidConfig(
                "database.connect_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
