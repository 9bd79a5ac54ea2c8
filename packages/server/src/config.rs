//! Server configuration.
//!
//! Values come from an optional TOML file named by `GOROD_CONFIG`, then
//! from the environment (`BIND_ADDR`, `PORT`, `GOROD_PUBLIC_DIR`,
//! `GOROD_ADMIN_USER`, `GOROD_ADMIN_PASSWORD`), which wins.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ServerError;

/// Loopback only unless configured otherwise.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;
/// Static assets, relative to the workspace root.
pub const DEFAULT_PUBLIC_DIR: &str = "packages/server/public";
/// Default administrator name.
pub const DEFAULT_ADMIN_USER: &str = "admin";

/// Runtime settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, `BIND_ADDR` in the environment.
    pub bind_addr: String,
    /// Port to bind, `PORT` in the environment.
    pub port: u16,
    /// Served at `/`; holds `districts.geojson`.
    pub public_dir: PathBuf,
    /// Administrator name accepted by login.
    pub admin_user: String,
    /// Empty disables login.
    pub admin_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_password: String::new(),
        }
    }
}

impl ServerConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Toml`] if the document is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path)?;
        log::info!("Loaded server configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Loads `GOROD_CONFIG` if set, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the configuration file cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ServerError> {
        let mut config = match std::env::var("GOROD_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides fields from `var`, a lookup of environment variables.
    /// An unparseable `PORT` is ignored with a warning.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = var("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => log::warn!("Ignoring PORT={port}: {e}"),
            }
        }
        if let Some(dir) = var("GOROD_PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(user) = var("GOROD_ADMIN_USER") {
            self.admin_user = user;
        }
        if let Some(password) = var("GOROD_ADMIN_PASSWORD") {
            self.admin_password = password;
        }
    }

    /// Whether `username`/`password` match the configured administrator.
    #[must_use]
    pub fn check_admin(&self, username: &str, password: &str) -> bool {
        !self.admin_password.is_empty()
            && username == self.admin_user
            && password == self.admin_password
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            port = 9000
            admin_password = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.admin_user, DEFAULT_ADMIN_USER);
        assert_eq!(config.admin_password, "secret");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            ServerConfig::from_toml_str("port = ["),
            Err(ServerError::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "not-a-port"),
            ("GOROD_PUBLIC_DIR", "/srv/gorod"),
            ("GOROD_ADMIN_PASSWORD", "hunter2"),
        ]);
        let mut config = ServerConfig {
            port: 9000,
            ..ServerConfig::default()
        };
        config.apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.public_dir, PathBuf::from("/srv/gorod"));
        assert_eq!(config.admin_password, "hunter2");
    }

    #[test]
    fn empty_password_disables_login() {
        let config = ServerConfig::default();
        assert!(!config.check_admin(DEFAULT_ADMIN_USER, ""));

        let config = ServerConfig {
            admin_password: "pw".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.check_admin("admin", "pw"));
        assert!(!config.check_admin("admin", "PW"));
        assert!(!config.check_admin("root", "pw"));
    }
}
