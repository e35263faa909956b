//! Client-side authentication state.
//!
//! Modeled as a tagged state rather than a nullable session blob so that
//! consumers are forced to treat "not resolved yet" and "logged out" as
//! different situations.

/// Tokens for the current identity. The access token is the bearer
/// credential attached to API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
}

/// Where the client is in its single session-resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Resolution has not started.
    #[default]
    Idle,
    /// The initial fetch is in flight.
    Loading,
    /// A session with valid tokens was found.
    Authenticated(Session),
    /// Resolution finished and found no valid tokens.
    Anonymous,
}

impl SessionState {
    /// Whether the initial fetch has completed. Route guards and the upload
    /// controller must not make any auth-dependent decision while this is
    /// false.
    pub fn is_settled(&self) -> bool {
        matches!(self, SessionState::Authenticated(_) | SessionState::Anonymous)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
