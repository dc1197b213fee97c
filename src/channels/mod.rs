//! Channel naming and access classification
//!
//! The prefix of a channel name decides what a subscriber must present:
//! - `private-*`  : signed auth credential
//! - `presence-*` : signed auth credential over member data
//! - anything else: public, no auth
//!
//! Classification happens once per name; callers match on [`ChannelKind`]
//! instead of repeating prefix checks.

use std::fmt;

/// Prefix for channels that require a signed credential
pub const PRIVATE_PREFIX: &str = "private-";
/// Prefix for channels that require a credential and member data
pub const PRESENCE_PREFIX: &str = "presence-";

/// Access-control class of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Anyone can subscribe
    Public,
    /// Subscription requires an auth credential
    Private,
    /// Subscription requires an auth credential and member data
    Presence,
}

impl ChannelKind {
    /// Classify a channel name by its prefix (case-sensitive)
    pub fn classify(name: &str) -> Self {
        if name.starts_with(PRESENCE_PREFIX) {
            ChannelKind::Presence
        } else if name.starts_with(PRIVATE_PREFIX) {
            ChannelKind::Private
        } else {
            ChannelKind::Public
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, ChannelKind::Public)
    }

    pub fn requires_member_data(&self) -> bool {
        matches!(self, ChannelKind::Presence)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Public => write!(f, "public"),
            ChannelKind::Private => write!(f, "private"),
            ChannelKind::Presence => write!(f, "presence"),
        }
    }
}

/// A channel name paired with its access class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    name: String,
    kind: ChannelKind,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ChannelKind::classify(&name);
        Self { name, kind }
    }

    /// Get the channel name as a string slice
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_public() {
        assert_eq!(ChannelKind::classify("chat"), ChannelKind::Public);
        assert_eq!(ChannelKind::classify(""), ChannelKind::Public);
        assert_eq!(ChannelKind::classify("private"), ChannelKind::Public);
        assert_eq!(ChannelKind::classify("presence"), ChannelKind::Public);
        assert_eq!(ChannelKind::classify("my-private-chat"), ChannelKind::Public);
    }

    #[test]
    fn test_classify_restricted() {
        assert_eq!(ChannelKind::classify("private-orders"), ChannelKind::Private);
        assert_eq!(ChannelKind::classify("presence-chat"), ChannelKind::Presence);

        // Bare prefixes still count
        assert_eq!(ChannelKind::classify("private-"), ChannelKind::Private);
        assert_eq!(ChannelKind::classify("presence-"), ChannelKind::Presence);
    }

    #[test]
    fn test_classify_case_sensitive() {
        assert_eq!(ChannelKind::classify("Private-orders"), ChannelKind::Public);
        assert_eq!(ChannelKind::classify("PRESENCE-chat"), ChannelKind::Public);
    }

    #[test]
    fn test_kind_requirements() {
        assert!(!ChannelKind::Public.requires_auth());
        assert!(ChannelKind::Private.requires_auth());
        assert!(ChannelKind::Presence.requires_auth());

        assert!(!ChannelKind::Public.requires_member_data());
        assert!(!ChannelKind::Private.requires_member_data());
        assert!(ChannelKind::Presence.requires_member_data());
    }

    #[test]
    fn test_channel_new() {
        let channel = Channel::new("presence-lobby");
        assert_eq!(channel.as_str(), "presence-lobby");
        assert_eq!(channel.kind(), ChannelKind::Presence);
        assert_eq!(channel.to_string(), "presence-lobby");
        assert_eq!(ChannelKind::Presence.to_string(), "presence");
    }
}
