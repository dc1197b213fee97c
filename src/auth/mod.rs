//! Channel authentication
//!
//! - `member`: presence member data and its validation
//! - `signer`: HMAC-SHA256 credentials over `<socket_id>:<channel>[:<member json>]`
//! - `response`: the `{auth, channel_data}` payload for subscribe requests

mod member;
mod response;
mod signer;

pub use member::{validate, InvalidMemberData, MemberData, MemberDataProblem, UserId, USER_ID_KEY};
pub use response::AuthResponse;
pub use signer::{
    auth, authorize, string_to_sign, AppCredentials, AuthCredential, AuthError, ConnectionState,
};
