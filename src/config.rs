//! Configuration for the admin backend.
//!
//! Settings are read from `config.toml` in the data directory (or a path
//! given with `--config`), then overridden by environment variables:
//!
//! | Variable       | Overrides               |
//! |----------------|-------------------------|
//! | `DB_PATH`      | `database.path`         |
//! | `DB_NAME`      | `database.name`         |
//! | `JWT_SECRET`   | `auth.jwt_secret`       |
//! | `BACKUP_DIR`   | `backup.directory`      |
//! | `CORS_ORIGINS` | `server.cors_origins`   |
//! | `PORT`         | `server.port`           |
//!
//! Every field has a default, so an empty or missing file is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backup::SchedulerConfig;
use crate::{constants, paths};

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub backup: BackupConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Serve Prometheus metrics on `/metrics`
    pub metrics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            metrics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Explicit database file; defaults to `<home>/<name>.redb`
    pub path: Option<PathBuf>,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            name: constants::DEFAULT_DB_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Artifact directory; defaults to `<home>/backups`
    pub directory: Option<PathBuf>,
    /// Interval written into the settings record when it is first created
    pub default_interval_hours: i64,
    pub poll_interval_secs: u64,
    pub recovery_interval_secs: u64,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            directory: None,
            default_interval_hours: constants::DEFAULT_BACKUP_INTERVAL_HOURS,
            poll_interval_secs: constants::DEFAULT_POLL_INTERVAL.as_secs(),
            recovery_interval_secs: constants::DEFAULT_RECOVERY_INTERVAL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: constants::DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: constants::DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - A field has an invalid type
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or an
    /// environment override has an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => paths::get_config_path()?,
        };

        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("DB_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(name) = get("DB_NAME") {
            self.database.name = name;
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(dir) = get("BACKUP_DIR") {
            self.backup.directory = Some(PathBuf::from(dir));
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: '{port}'"))?;
        }

        Ok(())
    }

    /// Resolved path of the document database file.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => paths::get_database_path(&self.database.name),
        }
    }

    /// Resolved backup directory.
    pub fn backup_dir(&self) -> Result<PathBuf> {
        match &self.backup.directory {
            Some(dir) => Ok(dir.clone()),
            None => paths::get_backup_dir(),
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            poll_interval: Duration::from_secs(self.backup.poll_interval_secs),
            recovery_interval: Duration::from_secs(self.backup.recovery_interval_secs),
        }
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    /// The runtime backup interval is deliberately not checked here; it lives
    /// in the backup settings record and accepts any value.
    ///
    /// # Errors
    ///
    /// Returns an error listing every impossible value found.
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Server
        if self.server.port == 0 {
            errors.push(
                "server.port cannot be 0. Use a valid port number (1-65535)\n  \
                 Default: 8001"
                    .to_string(),
            );
        } else if self.server.port < 1024 {
            warnings.push(format!(
                "server.port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 to avoid permission issues",
                self.server.port
            ));
        }

        if self.server.host.trim().is_empty() {
            errors.push("server.host cannot be empty".to_string());
        }

        if self.server.cors_origins.is_empty() {
            warnings.push(
                "server.cors_origins is empty; browsers will reject cross-origin requests"
                    .to_string(),
            );
        }

        // 2. Database
        if self.database.path.is_none() && self.database.name.trim().is_empty() {
            errors.push("database.name cannot be empty when database.path is unset".to_string());
        }

        // 3. Backup
        if self.backup.poll_interval_secs == 0 {
            errors.push("backup.poll_interval_secs cannot be 0".to_string());
        }
        if self.backup.recovery_interval_secs == 0 {
            errors.push("backup.recovery_interval_secs cannot be 0".to_string());
        }
        if self.backup.default_interval_hours <= 0 {
            warnings.push(format!(
                "backup.default_interval_hours is {}; automatic backups will run on every poll",
                self.backup.default_interval_hours
            ));
        }

        // 4. Auth
        if self.auth.jwt_secret.is_empty() {
            errors.push("auth.jwt_secret cannot be empty".to_string());
        } else if self.auth.jwt_secret == constants::DEFAULT_JWT_SECRET {
            warnings.push(
                "auth.jwt_secret is the built-in default\n  \
                 Set JWT_SECRET or auth.jwt_secret before exposing the API"
                    .to_string(),
            );
        }
        if self.auth.token_ttl_hours <= 0 {
            errors.push(format!(
                "auth.token_ttl_hours must be positive (got: {})",
                self.auth.token_ttl_hours
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
