use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use farebird_core::api::AccountsApi;
use farebird_core::models::User;
use farebird_core::session::{Session, SessionObserver, TokenStore};

/// Owns the client's one [`Session`] and keeps it consistent with the
/// persisted token. Every mutation is reported to the observer so the
/// adapter's auth indicator stays current.
///
/// Persistence failures are logged and swallowed; the in-memory session
/// remains authoritative for the running process.
pub struct SessionStore {
    session: RwLock<Session>,
    tokens: Arc<dyn TokenStore>,
    accounts: Arc<dyn AccountsApi>,
    observer: Arc<dyn SessionObserver>,
}

impl SessionStore {
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        accounts: Arc<dyn AccountsApi>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self {
            session: RwLock::new(Session::Anonymous),
            tokens,
            accounts,
            observer,
        }
    }

    /// Startup restore: validates a persisted token against the backend.
    /// Any failure collapses to `Anonymous`, and a rejected token is also
    /// removed from persistence so the next start skips the round trip.
    /// Never returns an error.
    pub async fn restore(&self) -> Session {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return Session::Anonymous,
            Err(err) => {
                warn!(error = %err, "could not read persisted token");
                return Session::Anonymous;
            }
        };

        match self.accounts.current_user(&token).await {
            Ok(user) => {
                debug!(email = %user.email, "persisted token validated");
                self.set_session(token, user);
                self.current()
            }
            Err(err) => {
                warn!(error = %err, "persisted token rejected, clearing it");
                self.clear();
                Session::Anonymous
            }
        }
    }

    /// Persists the token and swaps the session to `Authenticated`.
    pub fn set_session(&self, token: String, user: User) {
        if let Err(err) = self.tokens.save(&token) {
            warn!(error = %err, "could not persist token");
        }
        *self.session.write() = Session::authenticated(token, user);
        self.notify_observer();
    }

    /// Replaces the user snapshot wholesale after a profile update.
    /// Does nothing when anonymous.
    pub fn replace_user(&self, user: User) {
        {
            let mut session = self.session.write();
            match &mut *session {
                Session::Authenticated { user: current, .. } => *current = user,
                Session::Anonymous => return,
            }
        }
        self.notify_observer();
    }

    /// Drops the persisted token and resets to `Anonymous`.
    pub fn clear(&self) {
        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "could not remove persisted token");
        }
        *self.session.write() = Session::Anonymous;
        self.notify_observer();
    }

    pub fn current(&self) -> Session {
        self.session.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    fn notify_observer(&self) {
        let session = self.current();
        self.observer.session_changed(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use farebird_core::api::LoginResponse;
    use farebird_core::models::{ProfileUpdate, Registration};
    use farebird_core::session::NoopObserver;
    use farebird_core::{ApiError, ApiResult};

    use crate::token_file::MemoryTokenStore;

    fn user() -> User {
        User {
            id: 1,
            email: "a@x.com".into(),
            username: "ada".into(),
            first_name: "Ada".into(),
            last_name: "Wong".into(),
            full_name: Some("Ada Wong".into()),
            date_of_birth: None,
        }
    }

    /// AccountsApi stub: `current_user` accepts exactly one token and
    /// counts validation calls; the other operations are never reached
    /// from the store.
    struct StubAccounts {
        valid_token: &'static str,
        validations: AtomicUsize,
    }

    impl StubAccounts {
        fn accepting(valid_token: &'static str) -> Self {
            Self {
                valid_token,
                validations: AtomicUsize::new(0),
            }
        }

        fn validation_count(&self) -> usize {
            self.validations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccountsApi for StubAccounts {
        async fn login(&self, _email: &str, _password: &str) -> ApiResult<LoginResponse> {
            unimplemented!("not exercised by SessionStore")
        }

        async fn register(&self, _registration: &Registration) -> ApiResult<()> {
            unimplemented!("not exercised by SessionStore")
        }

        async fn current_user(&self, token: &str) -> ApiResult<User> {
            self.validations.fetch_add(1, Ordering::SeqCst);
            if token == self.valid_token {
                Ok(user())
            } else {
                Err(ApiError::Auth("Given token not valid".into()))
            }
        }

        async fn update_profile(&self, _update: &ProfileUpdate, _token: &str) -> ApiResult<User> {
            unimplemented!("not exercised by SessionStore")
        }
    }

    struct RecordingObserver {
        seen: Mutex<Vec<bool>>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SessionObserver for RecordingObserver {
        fn session_changed(&self, session: &Session) {
            self.seen.lock().push(session.is_authenticated());
        }
    }

    struct FailingTokenStore;

    impl TokenStore for FailingTokenStore {
        fn load(&self) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
            Err("disk is gone".into())
        }

        fn save(&self, _token: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("disk is gone".into())
        }

        fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("disk is gone".into())
        }
    }

    #[tokio::test]
    async fn test_restore_without_token_stays_anonymous() {
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let store = SessionStore::new(
            Arc::new(MemoryTokenStore::new()),
            accounts.clone(),
            Arc::new(NoopObserver),
        );

        assert_eq!(store.restore().await, Session::Anonymous);
        assert_eq!(accounts.validation_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_validates_once_and_is_idempotent() {
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let store = SessionStore::new(
            Arc::new(MemoryTokenStore::with_token("tok-1")),
            accounts.clone(),
            Arc::new(NoopObserver),
        );

        let first = store.restore().await;
        assert_eq!(first, Session::authenticated("tok-1", user()));
        assert_eq!(accounts.validation_count(), 1);

        let second = store.restore().await;
        assert_eq!(second, first);
        assert_eq!(accounts.validation_count(), 2);
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_persistence() {
        let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let observer = Arc::new(RecordingObserver::new());
        let store = SessionStore::new(tokens.clone(), accounts, observer.clone());

        assert_eq!(store.restore().await, Session::Anonymous);
        assert_eq!(tokens.load().unwrap(), None);
        assert_eq!(*observer.seen.lock(), vec![false]);
    }

    #[tokio::test]
    async fn test_set_session_survives_restart() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));

        let store = SessionStore::new(tokens.clone(), accounts.clone(), Arc::new(NoopObserver));
        store.set_session("tok-1".into(), user());
        assert!(store.is_authenticated());
        assert_eq!(tokens.load().unwrap(), Some("tok-1".to_string()));

        // fresh store over the same persistence = process restart
        let restarted = SessionStore::new(tokens, accounts, Arc::new(NoopObserver));
        let session = restarted.restore().await;
        assert_eq!(session, Session::authenticated("tok-1", user()));
    }

    #[tokio::test]
    async fn test_clear_resets_both_layers() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let observer = Arc::new(RecordingObserver::new());
        let store = SessionStore::new(tokens.clone(), accounts, observer.clone());

        store.set_session("tok-1".into(), user());
        store.clear();

        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
        assert_eq!(tokens.load().unwrap(), None);
        assert_eq!(*observer.seen.lock(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_replace_user_swaps_snapshot_wholesale() {
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let observer = Arc::new(RecordingObserver::new());
        let store = SessionStore::new(
            Arc::new(MemoryTokenStore::new()),
            accounts,
            observer.clone(),
        );

        // anonymous: nothing happens, nobody is notified
        store.replace_user(user());
        assert!(observer.seen.lock().is_empty());

        store.set_session("tok-1".into(), user());
        let renamed = User {
            first_name: "Ada R.".into(),
            ..user()
        };
        store.replace_user(renamed.clone());

        assert_eq!(store.current().user(), Some(&renamed));
        assert_eq!(*observer.seen.lock(), vec![true, true]);
    }

    #[tokio::test]
    async fn test_persistence_failures_are_swallowed() {
        let accounts = Arc::new(StubAccounts::accepting("tok-1"));
        let store = SessionStore::new(
            Arc::new(FailingTokenStore),
            accounts.clone(),
            Arc::new(NoopObserver),
        );

        store.set_session("tok-1".into(), user());
        assert!(store.is_authenticated());

        store.clear();
        assert!(!store.is_authenticated());

        // unreadable persistence restores to anonymous without validation
        assert_eq!(store.restore().await, Session::Anonymous);
        assert_eq!(accounts.validation_count(), 0);
    }
}
