//! Channel authentication
//!
//! Credential format: `<key>:<hex(HMAC-SHA256(secret, string_to_sign))>`
//!
//! String to sign:
//! - private channel, no member data: `<socket_id>:<channel>`
//! - with member data:               `<socket_id>:<channel>:<json(member_data)>`

use crate::auth::member::{self, InvalidMemberData, MemberData};
use crate::auth::response::AuthResponse;
use crate::channels::ChannelKind;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no active connection: socket id not yet assigned")]
    NoActiveConnection,

    #[error("presence channel '{0}' requires member data")]
    MissingMemberData(String),

    #[error(transparent)]
    InvalidMemberData(#[from] InvalidMemberData),

    #[error("member data serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Application key and signing secret
#[derive(Clone)]
pub struct AppCredentials {
    key: String,
    secret: String,
}

impl AppCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// HMAC-SHA256 over `message`, lowercase hex
    fn sign(&self, message: &str) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Credentials plus the socket id of the current connection
///
/// Owned by the session layer; the socket id arrives after the transport
/// handshake and is cleared on disconnect.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    credentials: AppCredentials,
    socket_id: Option<String>,
}

impl ConnectionState {
    pub fn new(credentials: AppCredentials) -> Self {
        Self {
            credentials,
            socket_id: None,
        }
    }

    pub fn with_socket_id(mut self, socket_id: impl Into<String>) -> Self {
        self.socket_id = Some(socket_id.into());
        self
    }

    pub fn set_socket_id(&mut self, socket_id: impl Into<String>) {
        self.socket_id = Some(socket_id.into());
    }

    pub fn clear_socket_id(&mut self) {
        self.socket_id = None;
    }

    pub fn socket_id(&self) -> Option<&str> {
        self.socket_id.as_deref()
    }

    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }
}

/// Signed credential for a restricted channel subscription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthCredential {
    token: String,
    key_len: usize,
}

impl AuthCredential {
    fn new(key: &str, signature: &str) -> Self {
        Self {
            token: format!("{}:{}", key, signature),
            key_len: key.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn key(&self) -> &str {
        &self.token[..self.key_len]
    }

    /// The hex signature after the key
    pub fn signature(&self) -> &str {
        &self.token[self.key_len + 1..]
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Display for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// Build the canonical string that gets signed
pub fn string_to_sign(
    socket_id: &str,
    channel: &str,
    member_data: Option<&MemberData>,
) -> Result<String, AuthError> {
    match member_data {
        Some(data) => Ok(format!("{}:{}:{}", socket_id, channel, data.to_json()?)),
        None => Ok(format!("{}:{}", socket_id, channel)),
    }
}

/// Sign a subscription to `channel`
///
/// Returns `Ok(None)` for public channels, which take no auth field. Private
/// channels sign any supplied member data verbatim: with `None` the string to
/// sign is `<socket_id>:<channel>` (the Pusher private-channel format), while
/// `Some(&MemberData::new())` signs `<socket_id>:<channel>:{}`.
///
/// Presence channels need member data, which the caller is expected to have
/// run through [`member::validate`] already; it is not re-checked here.
pub fn auth(
    state: &ConnectionState,
    channel: &str,
    member_data: Option<&MemberData>,
) -> Result<Option<AuthCredential>, AuthError> {
    let kind = ChannelKind::classify(channel);
    debug!(channel, %kind, "Authenticating channel");

    match kind {
        ChannelKind::Public => Ok(None),
        ChannelKind::Private => sign_channel(state, channel, member_data).map(Some),
        ChannelKind::Presence => {
            let data =
                member_data.ok_or_else(|| AuthError::MissingMemberData(channel.to_string()))?;
            sign_channel(state, channel, Some(data)).map(Some)
        }
    }
}

/// Validate, sign, and package a subscription auth payload
///
/// Presence member data goes through [`member::validate`] first. The returned
/// `channel_data` is the exact JSON text that was signed.
pub fn authorize(
    state: &ConnectionState,
    channel: &str,
    member_data: Option<MemberData>,
) -> Result<Option<AuthResponse>, AuthError> {
    let member_data = match (ChannelKind::classify(channel), member_data) {
        (ChannelKind::Public, _) => return Ok(None),
        (ChannelKind::Presence, Some(data)) => Some(member::validate(data)?),
        (ChannelKind::Presence, None) => {
            return Err(AuthError::MissingMemberData(channel.to_string()))
        }
        (ChannelKind::Private, data) => data,
    };

    let Some(credential) = auth(state, channel, member_data.as_ref())? else {
        return Ok(None);
    };
    let channel_data = member_data.as_ref().map(MemberData::to_json).transpose()?;

    Ok(Some(AuthResponse::new(credential, channel_data)))
}

fn sign_channel(
    state: &ConnectionState,
    channel: &str,
    member_data: Option<&MemberData>,
) -> Result<AuthCredential, AuthError> {
    let socket_id = state.socket_id().ok_or(AuthError::NoActiveConnection)?;
    let message = string_to_sign(socket_id, channel, member_data)?;

    let credentials = state.credentials();
    let signature = credentials.sign(&message)?;
    debug!(channel, socket_id, "Signed channel subscription");

    Ok(AuthCredential::new(credentials.key(), &signature))
}
