use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::admin::{Password, RoleGrant};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "DBSEED_ENV";
const CONFIG_DIR_ENV: &str = "DBSEED_CONFIG_DIR";
const ENV_PREFIX: &str = "DBSEED";

/// Only ever applied in the `local` environment.
const LOCAL_DEFAULT_PASSWORD: &str = "adminpassword";

/// Deployment environment the bootstrap is running in.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(skip)]
    local_default_password: bool,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay and
    /// `DBSEED_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .map(|cwd| cwd.join("config"))
                .with_context(|| "unable to resolve current directory")?,
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from an explicit directory and environment name.
    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let parsed_environment = Environment::parse(environment)?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parsed_environment;
        settings.resolve_password()?;

        Ok(settings)
    }

    fn resolve_password(&mut self) -> anyhow::Result<()> {
        if !self.bootstrap.password.is_empty() {
            return Ok(());
        }

        match self.environment {
            Environment::Local => {
                self.bootstrap.password = Password::new(LOCAL_DEFAULT_PASSWORD);
                self.local_default_password = true;
                Ok(())
            }
            env => Err(anyhow!(
                "bootstrap password must be supplied in the {:?} environment (set {}_BOOTSTRAP__PASSWORD)",
                env,
                ENV_PREFIX
            )),
        }
    }

    /// True when no password was configured and the local default was applied.
    /// Loading happens before telemetry is up, so callers log this themselves.
    pub fn uses_local_default_password(&self) -> bool {
        self.local_default_password
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_uri")]
    pub uri: String,
    #[serde(default = "DatabaseSettings::default_app_name")]
    pub app_name: String,
}

impl DatabaseSettings {
    fn default_uri() -> String {
        "mongodb://127.0.0.1:27017".to_string()
    }

    fn default_app_name() -> String {
        "dbseed".to_string()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            app_name: Self::default_app_name(),
        }
    }
}

/// What a create step does when its target already exists.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    #[default]
    Fail,
    Skip,
}

/// Objects the bootstrap provisions.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapSettings {
    #[serde(default = "BootstrapSettings::default_database")]
    pub database: String,
    #[serde(default = "BootstrapSettings::default_username")]
    pub username: String,
    #[serde(default)]
    pub password: Password,
    #[serde(default = "BootstrapSettings::default_role")]
    pub role: String,
    #[serde(default = "BootstrapSettings::default_collection")]
    pub collection: String,
    #[serde(default)]
    pub if_exists: ConflictPolicy,
}

impl BootstrapSettings {
    fn default_database() -> String {
        "graylog".to_string()
    }

    fn default_username() -> String {
        "admin".to_string()
    }

    fn default_role() -> String {
        "readWrite".to_string()
    }

    fn default_collection() -> String {
        "dummy".to_string()
    }

    /// The single grant the provisioned user receives, scoped to the target database.
    pub fn grant(&self) -> RoleGrant {
        RoleGrant::new(&self.role, &self.database)
    }
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            database: Self::default_database(),
            username: Self::default_username(),
            password: Password::default(),
            role: Self::default_role(),
            collection: Self::default_collection(),
            if_exists: ConflictPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
