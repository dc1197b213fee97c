//! pushlink - channel authentication and endpoint construction for Pusher-protocol clients
//!
//! Pure, synchronous building blocks a WebSocket client needs before it can
//! subscribe to access-controlled channels:
//!
//! - classify channels (`public`, `private-*`, `presence-*`)
//! - validate presence member data
//! - sign subscriptions with HMAC-SHA256
//! - build the endpoint URL to dial
//!
//! # Example
//!
//! ```
//! use pushlink::{auth, build_url, AppConfig, ClientInfo, MemberData};
//!
//! let config = AppConfig::new("app1", "s3cr3t").cluster("mt1");
//! let endpoint = build_url(&config.endpoint(), &ClientInfo::default());
//! assert_eq!(endpoint.domain, "ws-mt1.pusher.com");
//!
//! // Once the server has assigned a socket id
//! let state = config.connection_state().with_socket_id("123.456");
//! let data = MemberData::new().with("user_id", 42);
//! let credential = auth(&state, "presence-chat", Some(&data)).unwrap().unwrap();
//! assert!(credential.as_str().starts_with("app1:"));
//! ```

pub mod auth;
pub mod channels;
pub mod config;
pub mod endpoint;

pub use auth::{
    auth, authorize, validate, AppCredentials, AuthCredential, AuthError, AuthResponse,
    ConnectionState, InvalidMemberData, MemberData,
};
pub use channels::{Channel, ChannelKind};
pub use config::{AppConfig, ConfigError};
pub use endpoint::{build_url, ClientInfo, EndpointConfig, EndpointDescriptor};
