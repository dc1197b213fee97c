//! Connection endpoint construction
//!
//! Turns app configuration into the host/path/port the transport dials:
//!
//! ```text
//! wss://ws-<cluster>.pusher.com:443/app/<key>?protocol=7&client=<name>&version=<v>&flash=false
//! ```
//!
//! Nothing here validates the key or cluster; a bad value yields a URL the
//! transport fails to connect to.

use std::fmt;

/// Wire protocol revision sent in the `protocol` query parameter
pub const PROTOCOL_VERSION: u32 = 7;

/// Client name sent in the `client` query parameter
pub const CLIENT_NAME: &str = "pushlink";

/// Identifies this client to the server, like a user agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
    pub protocol: u32,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            protocol: PROTOCOL_VERSION,
        }
    }

    pub fn protocol(mut self, protocol: u32) -> Self {
        self.protocol = protocol;
        self
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new(CLIENT_NAME, env!("CARGO_PKG_VERSION"))
    }
}

/// Which app to connect to, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub key: String,
    pub cluster: String,
    pub encrypted: bool,
    /// Replaces `ws-<cluster>.pusher.com` for self-hosted servers
    pub host: Option<String>,
}

impl EndpointConfig {
    pub fn new(key: impl Into<String>, cluster: impl Into<String>, encrypted: bool) -> Self {
        Self {
            key: key.into(),
            cluster: cluster.into(),
            encrypted,
            host: None,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Where to dial: built once per connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub domain: String,
    pub path: String,
    pub port: u16,
}

impl EndpointDescriptor {
    /// `wss` on 443, `ws` otherwise
    pub fn scheme(&self) -> &'static str {
        if self.port == 443 {
            "wss"
        } else {
            "ws"
        }
    }

    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme(), self.domain, self.port, self.path)
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

/// Build the endpoint for `config`
///
/// Query parameters are always `protocol`, `client`, `version`, `flash`, in
/// that order; `flash=false` stays for legacy fallback transports.
pub fn build_url(config: &EndpointConfig, client: &ClientInfo) -> EndpointDescriptor {
    let domain = match &config.host {
        Some(host) => host.clone(),
        None => format!("ws-{}.pusher.com", config.cluster),
    };

    let path = format!(
        "/app/{}?protocol={}&client={}&version={}&flash=false",
        config.key, client.protocol, client.name, client.version
    );

    let port = if config.encrypted { 443 } else { 80 };

    EndpointDescriptor { domain, path, port }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_client() -> ClientInfo {
        ClientInfo::new("pushlink", "1.2.3")
    }

    #[test]
    fn test_build_url_encrypted() {
        let endpoint = build_url(&EndpointConfig::new("k1", "mt1", true), &fixed_client());

        assert_eq!(endpoint.domain, "ws-mt1.pusher.com");
        assert_eq!(endpoint.port, 443);
        assert_eq!(
            endpoint.path,
            "/app/k1?protocol=7&client=pushlink&version=1.2.3&flash=false"
        );
    }

    #[test]
    fn test_build_url_unencrypted() {
        let secure = build_url(&EndpointConfig::new("k1", "eu", true), &fixed_client());
        let plain = build_url(&EndpointConfig::new("k1", "eu", false), &fixed_client());

        assert_eq!(plain.port, 80);
        assert_eq!(plain.domain, secure.domain);
        assert_eq!(plain.path, secure.path);
    }

    #[test]
    fn test_build_url_no_validation() {
        let endpoint = build_url(&EndpointConfig::new("", "", true), &fixed_client());
        assert_eq!(endpoint.domain, "ws-.pusher.com");
        assert!(endpoint.path.starts_with("/app/?protocol=7"));
    }

    #[test]
    fn test_build_url_host_override() {
        let config = EndpointConfig::new("k1", "mt1", false).host("localhost");
        let endpoint = build_url(&config, &fixed_client());

        assert_eq!(endpoint.domain, "localhost");
        assert_eq!(endpoint.port, 80);
    }

    #[test]
    fn test_custom_protocol() {
        let client = fixed_client().protocol(8);
        let endpoint = build_url(&EndpointConfig::new("k1", "mt1", true), &client);
        assert!(endpoint.path.contains("protocol=8&"));
    }

    #[test]
    fn test_default_client_info() {
        let client = ClientInfo::default();
        assert_eq!(client.name, CLIENT_NAME);
        assert_eq!(client.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(client.protocol, PROTOCOL_VERSION);
    }

    #[test]
    fn test_url_rendering() {
        let secure = build_url(&EndpointConfig::new("k1", "mt1", true), &fixed_client());
        assert_eq!(secure.scheme(), "wss");
        assert_eq!(
            secure.url(),
            "wss://ws-mt1.pusher.com:443/app/k1?protocol=7&client=pushlink&version=1.2.3&flash=false"
        );
        assert_eq!(secure.to_string(), secure.url());

        let plain = build_url(&EndpointConfig::new("k1", "mt1", false), &fixed_client());
        assert_eq!(plain.scheme(), "ws");
        assert!(plain.url().starts_with("ws://ws-mt1.pusher.com:80/app/k1?"));
    }
}
