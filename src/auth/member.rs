//! Member data for presence channels
//!
//! Presence subscriptions carry caller-supplied metadata that must hold a
//! usable `user_id`. Everything else in the map is opaque and forwarded as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Key every presence member must carry
pub const USER_ID_KEY: &str = "user_id";

/// Why member data was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDataProblem {
    /// No keys at all
    Empty,
    /// `user_id` is present but null
    NullUserId,
    /// `user_id` is an empty string
    EmptyUserId,
    /// Map has other keys but no `user_id`
    MissingUserId,
}

impl fmt::Display for MemberDataProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberDataProblem::Empty => write!(f, "member data is empty"),
            MemberDataProblem::NullUserId => write!(f, "user_id is null"),
            MemberDataProblem::EmptyUserId => write!(f, "user_id is an empty string"),
            MemberDataProblem::MissingUserId => write!(f, "user_id is missing"),
        }
    }
}

/// Rejected member data, handed back unchanged
#[derive(Debug, Clone, Error)]
#[error("invalid member data: {problem}")]
pub struct InvalidMemberData {
    problem: MemberDataProblem,
    data: MemberData,
}

impl InvalidMemberData {
    pub fn problem(&self) -> MemberDataProblem {
        self.problem
    }

    pub fn member_data(&self) -> &MemberData {
        &self.data
    }

    pub fn into_member_data(self) -> MemberData {
        self.data
    }
}

/// Lookup result for `user_id`, keeping "absent" and "null" apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserId<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

/// Caller-supplied presence metadata (a JSON object)
///
/// Backed by `serde_json::Map`, which keeps keys sorted, so two maps with the
/// same entries always serialize to the same JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberData(Map<String, Value>);

impl MemberData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from a JSON value; only objects are accepted
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Parse from JSON text; only objects are accepted
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set a key, returning self for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn user_id(&self) -> UserId<'_> {
        match self.0.get(USER_ID_KEY) {
            None => UserId::Missing,
            Some(Value::Null) => UserId::Null,
            Some(value) => UserId::Present(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Compact JSON with sorted keys; this is the text that gets signed
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl From<Map<String, Value>> for MemberData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Check that presence member data carries a usable `user_id`
///
/// Rules are applied in order and the first match wins. A non-empty map
/// without `user_id` is rejected.
pub fn validate(data: MemberData) -> Result<MemberData, InvalidMemberData> {
    let problem = if data.is_empty() {
        Some(MemberDataProblem::Empty)
    } else {
        match data.user_id() {
            UserId::Null => Some(MemberDataProblem::NullUserId),
            UserId::Present(Value::String(s)) if s.is_empty() => {
                Some(MemberDataProblem::EmptyUserId)
            }
            UserId::Present(_) => None,
            UserId::Missing => Some(MemberDataProblem::MissingUserId),
        }
    };

    match problem {
        None => Ok(data),
        Some(problem) => Err(InvalidMemberData { problem, data }),
    }
}
