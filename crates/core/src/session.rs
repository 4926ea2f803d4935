//! Authenticated-session state and its persistence port.
//!
//! The session is an explicit value passed to whoever needs it; there is no
//! ambient global. Persistence goes through [`KeyValueStore`] so the same
//! [`SessionStore`] works against memory (tests) or a file on disk.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::registration::AdminProfile;
use crate::user::{UserProfile, UserRole};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Key holding the serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Key holding the bearer token returned at login.
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized [`AdminProfile`] of an admin session.
pub const ADMIN_KEY: &str = "admin";

const SESSION_KEYS: &[&str] = &[USER_KEY, TOKEN_KEY, ADMIN_KEY];

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { user: UserProfile },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user } => Some(user),
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user().map(|u| u.role)
    }

    /// The signed-in user, or [`CoreError::Unauthorized`].
    pub fn require_user(&self) -> Result<&UserProfile, CoreError> {
        self.user()
            .ok_or_else(|| CoreError::Unauthorized("You must be logged in".into()))
    }
}

// ---------------------------------------------------------------------------
// Persistence port
// ---------------------------------------------------------------------------

/// String key/value persistence used by [`SessionStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// Holds the current [`Session`] and mirrors it into a [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
    session: Session,
    token: Option<String>,
    admin: Option<AdminProfile>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Wrap `store` without reading it; the session starts anonymous.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Session::Anonymous,
            token: None,
            admin: None,
        }
    }

    /// Load the persisted session. Missing or unreadable data yields an
    /// anonymous session rather than an error.
    pub fn restore(store: S) -> Self {
        let mut this = Self::new(store);
        let raw = match this.store.get(USER_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored session");
                None
            }
        };
        let Some(raw) = raw else {
            return this;
        };
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => {
                this.token = this.store.get(TOKEN_KEY).ok().flatten();
                if user.role == UserRole::Admin {
                    this.admin = this
                        .store
                        .get(ADMIN_KEY)
                        .ok()
                        .flatten()
                        .and_then(|raw| serde_json::from_str(&raw).ok());
                }
                tracing::debug!(user_id = user.id, "Restored session");
                this.session = Session::Authenticated { user };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt stored session");
            }
        }
        this
    }

    pub fn login(&mut self, user: UserProfile, token: Option<String>) -> Result<(), CoreError> {
        self.persist_user(&user)?;
        match &token {
            Some(t) => self.store.set(TOKEN_KEY, t.clone())?,
            None => self.store.remove(TOKEN_KEY)?,
        }
        self.store.remove(ADMIN_KEY)?;
        self.admin = None;
        self.token = token;
        self.session = Session::Authenticated { user };
        Ok(())
    }

    /// Sign in as an administrator. The admin login issues no token; the
    /// admin record is kept alongside the derived user profile.
    pub fn login_admin(&mut self, admin: AdminProfile) -> Result<(), CoreError> {
        self.login(admin.to_user_profile(), None)?;
        let raw = serde_json::to_string(&admin)
            .map_err(|e| CoreError::Storage(format!("Could not serialize admin: {e}")))?;
        self.store.set(ADMIN_KEY, raw)?;
        self.admin = Some(admin);
        Ok(())
    }

    /// Replace the stored profile, e.g. after a profile update. The token is
    /// kept.
    pub fn update_user(&mut self, user: UserProfile) -> Result<(), CoreError> {
        self.persist_user(&user)?;
        self.session = Session::Authenticated { user };
        Ok(())
    }

    /// Drop every session key and return to anonymous.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        for key in SESSION_KEYS {
            self.store.remove(key)?;
        }
        self.token = None;
        self.admin = None;
        self.session = Session::Anonymous;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The administrator record of an admin session.
    pub fn admin(&self) -> Option<&AdminProfile> {
        self.admin.as_ref()
    }

    pub fn is_student(&self) -> bool {
        self.session.role() == Some(UserRole::Student)
    }

    pub fn is_mentor(&self) -> bool {
        self.session.role() == Some(UserRole::Mentor)
    }

    pub fn is_admin(&self) -> bool {
        self.session.role() == Some(UserRole::Admin)
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn persist_user(&mut self, user: &UserProfile) -> Result<(), CoreError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| CoreError::Storage(format!("Could not serialize user: {e}")))?;
        self.store.set(USER_KEY, raw)
    }
}
