use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gloo::storage::{LocalStorage, Storage};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const USER_KEY: &str = "storydesk.user";
const LOGGED_IN_KEY: &str = "storydesk.is_logged_in";

/// Role string the server assigns to reviewers.
pub const ADMIN_ROLE: &str = "Admin";

/// The signed-in user, exactly as the sign-in endpoint returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub identity: String,
    pub role: String,
    pub token: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Raw string key-value storage the session store persists into.
/// Browser localStorage in the app, an in-memory map in tests.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// localStorage-backed storage; writes are synchronous and survive reloads.
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            gloo::console::error!(format!("failed to persist {key}: {err:?}"));
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory storage used by tests.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.data.lock().unwrap().remove(key);
    }
}

/// Notified with the new persisted user after every save and clear, so a
/// reactive mirror of the store can never drift from it.
type SessionListener = Arc<dyn Fn(Option<SessionUser>) + Send + Sync>;

/// Owns the persisted session. Everything else only reads or clears it:
/// the navigation guard asks the login questions, the HTTP wrapper reads
/// the token and clears the session on a 401/503.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
    listener: Option<SessionListener>,
}

impl SessionStore {
    pub fn browser() -> Self {
        Self::with_backend(Arc::new(BrowserStorage))
    }

    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            listener: None,
        }
    }

    /// Attach a change listener; every save and clear reports the new
    /// persisted user through it.
    pub fn with_listener(
        mut self,
        listener: impl Fn(Option<SessionUser>) + Send + Sync + 'static,
    ) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    fn notify(&self, user: Option<SessionUser>) {
        if let Some(listener) = &self.listener {
            listener(user);
        }
    }

    /// Persist `user` and mark the session logged in.
    pub fn save(&self, user: &SessionUser) {
        match serde_json::to_string(user) {
            Ok(json) => {
                self.backend.set(USER_KEY, &json);
                self.backend.set(LOGGED_IN_KEY, "true");
                self.notify(Some(user.clone()));
            }
            Err(err) => gloo::console::error!(format!("failed to encode session: {err}")),
        }
    }

    /// The persisted user, if any. A missing session is a normal state,
    /// not a failure.
    pub fn restore(&self) -> Option<SessionUser> {
        let json = self.backend.get(USER_KEY)?;
        serde_json::from_str(&json).ok()
    }

    pub fn is_logged_in(&self) -> bool {
        self.backend.get(LOGGED_IN_KEY).as_deref() == Some("true")
    }

    /// True only for a logged-in session whose role is the admin role.
    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.restore().is_some_and(|user| user.is_admin())
    }

    /// Bearer token for outgoing requests, when a session exists.
    pub fn token(&self) -> Option<String> {
        self.restore().map(|user| user.token)
    }

    /// Drop the persisted user and the logged-in flag. Used by logout and
    /// by the HTTP wrapper's 401/503 handler.
    pub fn clear(&self) {
        self.backend.remove(USER_KEY);
        self.backend.set(LOGGED_IN_KEY, "false");
        self.notify(None);
    }
}

/// Reactive view over the session store, provided as context from `App`.
/// The signal mirrors the persisted user so the navbar and guard re-render
/// on login and logout within the same page load.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub user: RwSignal<Option<SessionUser>>,
    store: StoredValue<SessionStore>,
}

impl SessionContext {
    /// Restore any persisted session from a previous page load. The store's
    /// change listener keeps the signal in lockstep with what is persisted,
    /// including clears coming from the HTTP wrapper.
    pub fn new(store: SessionStore) -> Self {
        let user = RwSignal::new(store.restore());
        let store = store.with_listener(move |current| user.set(current));
        Self {
            user,
            store: StoredValue::new(store),
        }
    }

    /// Persist a fresh sign-in; the listener publishes it to the UI.
    pub fn login(&self, user: SessionUser) {
        self.store.with_value(|store| store.save(&user));
    }

    /// Clear the persisted session; the listener retracts the published user.
    pub fn logout(&self) {
        self.store.with_value(|store| store.clear());
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.with(|user| user.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .with(|user| user.as_ref().is_some_and(SessionUser::is_admin))
    }

    pub fn identity(&self) -> Option<String> {
        self.user.with(|user| user.as_ref().map(|u| u.identity.clone()))
    }

    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> SessionStore {
        SessionStore::with_backend(Arc::new(MemoryStorage::default()))
    }

    fn admin_user() -> SessionUser {
        SessionUser {
            identity: "lead@example.com".to_string(),
            role: "Admin".to_string(),
            token: "tok-admin-1".to_string(),
        }
    }

    fn member_user() -> SessionUser {
        SessionUser {
            identity: "dev@example.com".to_string(),
            role: "Member".to_string(),
            token: "tok-member-1".to_string(),
        }
    }

    #[test]
    fn save_then_restore_round_trips() {
        let store = memory_store();
        store.save(&admin_user());
        assert_eq!(store.restore(), Some(admin_user()));
    }

    #[test]
    fn restore_without_session_is_absent() {
        let store = memory_store();
        assert_eq!(store.restore(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn save_sets_logged_in_flag() {
        let store = memory_store();
        assert!(!store.is_logged_in());
        store.save(&member_user());
        assert!(store.is_logged_in());
    }

    #[test]
    fn clear_removes_user_and_flag() {
        let store = memory_store();
        store.save(&admin_user());
        store.clear();
        assert_eq!(store.restore(), None);
        assert!(!store.is_logged_in());
        assert!(!store.is_admin());
    }

    #[test]
    fn is_admin_requires_admin_role() {
        let store = memory_store();
        store.save(&member_user());
        assert!(store.is_logged_in());
        assert!(!store.is_admin());

        store.save(&admin_user());
        assert!(store.is_admin());
    }

    #[test]
    fn is_admin_is_false_when_logged_out() {
        let store = memory_store();
        assert!(!store.is_admin());
    }

    #[test]
    fn listener_observes_save_and_clear() {
        let seen: Arc<Mutex<Vec<Option<SessionUser>>>> = Arc::new(Mutex::new(vec![]));
        let store = memory_store().with_listener({
            let seen = Arc::clone(&seen);
            move |user| seen.lock().unwrap().push(user)
        });

        store.save(&admin_user());
        store.clear();
        assert_eq!(*seen.lock().unwrap(), vec![Some(admin_user()), None]);
    }

    #[test]
    fn token_comes_from_persisted_user() {
        let store = memory_store();
        assert_eq!(store.token(), None);
        store.save(&member_user());
        assert_eq!(store.token(), Some("tok-member-1".to_string()));
    }
}
