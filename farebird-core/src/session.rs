use std::error::Error;

use crate::models::User;
use crate::pii::Masked;

/// The authentication state of the client.
///
/// The enum shape is the invariant: a user snapshot exists exactly when a
/// backend-validated token does. There is no way to hold one without the
/// other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated { token: Masked<String>, user: User },
}

impl Session {
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Session::Authenticated {
            token: Masked(token.into()),
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { token, .. } => Some(token.0.as_str()),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user, .. } => Some(user),
        }
    }
}

/// Persistence seam for the auth token, the browser-localStorage analog:
/// one opaque value under one well-known location.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;

    fn save(&self, token: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear(&self) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Callback seam the session store reports every session change through,
/// so an adapter can keep its auth indicator current without the store
/// knowing anything about rendering.
pub trait SessionObserver: Send + Sync {
    fn session_changed(&self, session: &Session);
}

/// Observer that ignores every change.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn session_changed(&self, _session: &Session) {}
}
