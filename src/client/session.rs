//! Single-pass session resolution.
//!
//! Sign-in, sign-up, and confirmation belong to the identity provider's own
//! client; this module only asks "is there a stored session right now" and
//! folds the answer into `SessionState`.

use crate::domain::session::{Session, SessionState};
use crate::error::AppError;
use async_trait::async_trait;
use std::env;
use tracing::warn;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Fetch the currently stored session, if any. "No session" is a
    /// normal outcome, not an error.
    async fn fetch_session(&self) -> Result<Option<Session>, AppError>;
}

/// Reads the access token from the `ACCESS_TOKEN` environment variable,
/// where the identity provider's CLI tooling leaves it.
pub struct EnvSessionProvider;

#[async_trait]
impl SessionProvider for EnvSessionProvider {
    async fn fetch_session(&self) -> Result<Option<Session>, AppError> {
        Ok(env::var("ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(|access_token| Session { access_token }))
    }
}

/// Resolve the session exactly once. A provider failure reads as logged-out
/// rather than surfacing an error to auth-gated consumers.
pub async fn resolve_session<P: SessionProvider>(provider: &P) -> SessionState {
    match provider.fetch_session().await {
        Ok(Some(session)) => SessionState::Authenticated(session),
        Ok(None) => SessionState::Anonymous,
        Err(e) => {
            warn!("session fetch failed, treating as logged out: {}", e);
            SessionState::Anonymous
        }
    }
}
