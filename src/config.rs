//! Application configuration

use crate::auth::{AppCredentials, ConnectionState};
use crate::endpoint::EndpointConfig;
use std::fmt;
use thiserror::Error;

pub const ENV_APP_KEY: &str = "PUSHER_APP_KEY";
pub const ENV_APP_SECRET: &str = "PUSHER_APP_SECRET";
pub const ENV_CLUSTER: &str = "PUSHER_CLUSTER";
pub const ENV_ENCRYPTED: &str = "PUSHER_ENCRYPTED";
pub const ENV_HOST: &str = "PUSHER_HOST";

pub const DEFAULT_CLUSTER: &str = "mt1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Key, secret, and where the app lives
#[derive(Clone)]
pub struct AppConfig {
    /// Public app key
    pub key: String,

    /// Signing secret; never sent over the wire
    pub secret: String,

    /// Cluster name (e.g., "mt1", "eu")
    pub cluster: String,

    /// Connect over TLS
    pub encrypted: bool,

    /// Host override for self-hosted servers
    pub host: Option<String>,
}

impl AppConfig {
    /// Create a new configuration with the given key and secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            cluster: DEFAULT_CLUSTER.to_string(),
            encrypted: true,
            host: None,
        }
    }

    pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = cluster.into();
        self
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = encrypted;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Load from `PUSHER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(ENV_APP_KEY).ok_or(ConfigError::Missing(ENV_APP_KEY))?;
        let secret = lookup(ENV_APP_SECRET).ok_or(ConfigError::Missing(ENV_APP_SECRET))?;

        let mut config = Self::new(key, secret);

        if let Some(cluster) = lookup(ENV_CLUSTER) {
            config.cluster = cluster;
        }
        if let Some(value) = lookup(ENV_ENCRYPTED) {
            config.encrypted = parse_bool(&value).ok_or(ConfigError::Invalid {
                name: ENV_ENCRYPTED,
                value,
            })?;
        }
        config.host = lookup(ENV_HOST).filter(|h| !h.is_empty());

        Ok(config)
    }

    pub fn credentials(&self) -> AppCredentials {
        AppCredentials::new(&self.key, &self.secret)
    }

    /// Connection state with no socket id yet
    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::new(self.credentials())
    }

    pub fn endpoint(&self) -> EndpointConfig {
        let endpoint = EndpointConfig::new(&self.key, &self.cluster, self.encrypted);
        match &self.host {
            Some(host) => endpoint.host(host),
            None => endpoint,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("cluster", &self.cluster)
            .field("encrypted", &self.encrypted)
            .field("host", &self.host)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_new_defaults() {
        let config = AppConfig::new("app1", "s3cr3t");

        assert_eq!(config.key, "app1");
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.cluster, "mt1");
        assert!(config.encrypted);
        assert!(config.host.is_none());
    }

    #[test]
    fn test_config_builder_chain() {
        let config = AppConfig::new("app1", "s3cr3t")
            .cluster("eu")
            .encrypted(false)
            .host("localhost");

        assert_eq!(config.cluster, "eu");
        assert!(!config.encrypted);
        assert_eq!(config.host.as_deref(), Some("localhost"));
    }

    #[test]
    fn test_from_lookup_full() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_APP_KEY, "app1"),
            (ENV_APP_SECRET, "s3cr3t"),
            (ENV_CLUSTER, "ap1"),
            (ENV_ENCRYPTED, "no"),
            (ENV_HOST, "ws.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.key, "app1");
        assert_eq!(config.cluster, "ap1");
        assert!(!config.encrypted);
        assert_eq!(config.host.as_deref(), Some("ws.example.com"));
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(ENV_APP_KEY, "a"), (ENV_APP_SECRET, "b")]))
                .unwrap();

        assert_eq!(config.cluster, DEFAULT_CLUSTER);
        assert!(config.encrypted);
        assert!(config.host.is_none());
    }

    #[test]
    fn test_from_lookup_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_APP_KEY, "a")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_APP_SECRET)));

        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.to_string(), "missing environment variable PUSHER_APP_KEY");
    }

    #[test]
    fn test_from_lookup_invalid_bool() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_APP_KEY, "a"),
            (ENV_APP_SECRET, "b"),
            (ENV_ENCRYPTED, "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for PUSHER_ENCRYPTED: 'maybe'");
    }

    #[test]
    fn test_projections() {
        let config = AppConfig::new("app1", "s3cr3t").cluster("eu").host("h");

        assert_eq!(config.credentials().key(), "app1");
        assert_eq!(config.connection_state().socket_id(), None);

        let endpoint = config.endpoint();
        assert_eq!(endpoint.key, "app1");
        assert_eq!(endpoint.cluster, "eu");
        assert!(endpoint.encrypted);
        assert_eq!(endpoint.host.as_deref(), Some("h"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", AppConfig::new("app1", "s3cr3t"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("s3cr3t"));
    }
}
