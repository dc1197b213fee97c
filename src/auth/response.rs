//! Auth payload handed to the subscription layer

use crate::auth::signer::AuthCredential;
use serde::{Serialize, Serializer};

/// `auth` plus, for presence channels, the exact `channel_data` JSON that was signed
///
/// Serializes to `{"auth":"<key>:<sig>","channel_data":"<json>"}`, with
/// `channel_data` left out when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    #[serde(serialize_with = "serialize_credential")]
    auth: AuthCredential,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_data: Option<String>,
}

impl AuthResponse {
    pub(crate) fn new(auth: AuthCredential, channel_data: Option<String>) -> Self {
        Self { auth, channel_data }
    }

    pub fn auth(&self) -> &AuthCredential {
        &self.auth
    }

    pub fn channel_data(&self) -> Option<&str> {
        self.channel_data.as_deref()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn serialize_credential<S: Serializer>(
    credential: &AuthCredential,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(credential.as_str())
}
