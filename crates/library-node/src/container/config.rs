//! # Node Configuration
//!
//! Unified configuration for the subsystems and the gateway.
//!
//! Sources are applied in order: built-in defaults, an optional JSON file,
//! then `LIBRARY_*` environment variables.
//!
//! ## Security Requirements
//!
//! - `identity.jwt_secret` MUST NOT be the built-in development secret in
//!   production

use lm_01_identity::IdentityConfig;
use lm_03_lending::{LoanPolicy, DEFAULT_LOAN_PERIOD_DAYS};
use lm_04_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// File name of the store snapshot inside `data_dir`.
pub const SNAPSHOT_FILE: &str = "library.json";

/// Complete node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP surface.
    pub gateway: GatewayConfig,
    /// Credentials and tokens.
    pub identity: IdentityConfig,
    /// Days between borrow and due date.
    pub loan_period_days: u32,
    /// Directory holding the store snapshot.
    pub data_dir: PathBuf,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            identity: IdentityConfig::default(),
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl NodeConfig {
    /// Defaults, overlaid with `path` when given, then with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LIBRARY_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LIBRARY_HTTP_HOST") {
            self.gateway.http.host = parse_var("LIBRARY_HTTP_HOST", &host)?;
        }
        if let Some(port) = lookup("LIBRARY_HTTP_PORT") {
            self.gateway.http.port = parse_var("LIBRARY_HTTP_PORT", &port)?;
        }
        if let Some(secret) = lookup("LIBRARY_JWT_SECRET") {
            self.identity.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("LIBRARY_TOKEN_TTL_SECS") {
            self.identity.token_ttl_secs = parse_var("LIBRARY_TOKEN_TTL_SECS", &ttl)?;
        }
        if let Some(cost) = lookup("LIBRARY_BCRYPT_COST") {
            self.identity.bcrypt_cost = parse_var("LIBRARY_BCRYPT_COST", &cost)?;
        }
        if let Some(flag) = lookup("LIBRARY_ALLOW_ADMIN_SIGNUP") {
            self.identity.allow_admin_signup = parse_flag("LIBRARY_ALLOW_ADMIN_SIGNUP", &flag)?;
        }
        if let Some(days) = lookup("LIBRARY_LOAN_PERIOD_DAYS") {
            self.loan_period_days = parse_var("LIBRARY_LOAN_PERIOD_DAYS", &days)?;
        }
        if let Some(dir) = lookup("LIBRARY_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn loan_policy(&self) -> LoanPolicy {
        LoanPolicy::new(self.loan_period_days)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.identity.validate().map_err(ConfigError::Invalid)?;
        self.loan_policy().validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - any section is invalid
    /// - the signing secret is the development default
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.identity.uses_default_secret() {
            return Err(ConfigError::InsecureJwtSecret);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name}={value:?} is not a valid value")]
    InvalidVar { name: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(
        "SECURITY VIOLATION: JWT secret is the development default. \
         Set LIBRARY_JWT_SECRET or provide identity.jwt_secret in the config file."
    )]
    InsecureJwtSecret,
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar {
        name,
        value: value.to_string(),
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            name,
            value: value.to_string(),
        }),
    }
}
