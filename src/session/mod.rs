//! Client-side simulated account: login, favorites and votes.
//!
//! There is no real backend. [`Session`] validates credentials locally,
//! fabricates a [`UserRecord`] and writes it to a [`KeyValueStore`] after
//! every mutation so it survives restarts.

mod error;
mod store;
mod user;

use tracing::{info, warn};

use crate::format;

pub use error::SessionError;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use user::UserRecord;

/// Store key holding the serialized [`UserRecord`].
pub const USER_KEY: &str = "hn_user";

const MIN_PASSWORD_LEN: usize = 6;

pub struct Session {
    store: Box<dyn KeyValueStore>,
    user: Option<UserRecord>,
}

impl Session {
    /// Restore the session from `store`.
    ///
    /// A stored record that no longer decodes is logged and ignored.
    pub fn hydrate(store: Box<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let user = match store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => {
                    info!(username = %user.username, "restored session");
                    Some(user)
                }
                Err(err) => {
                    warn!(error = %err, "discarding unreadable session record");
                    None
                }
            },
            None => None,
        };
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<&UserRecord, SessionError> {
        let username = username.trim();
        if username.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::InvalidCredentials);
        }
        let user = UserRecord::for_login(username, format::now());
        info!(username, "logged in");
        self.replace_user(user)
    }

    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<&UserRecord, SessionError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::InvalidSignup);
        }
        let user = UserRecord::for_signup(username, email, format::now());
        info!(username, "signed up");
        self.replace_user(user)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "logged out");
        }
        self.store.remove(USER_KEY)
    }

    pub fn update_about(&mut self, about: impl Into<String>) -> Result<(), SessionError> {
        let about = about.into();
        self.mutate(|user| {
            user.about = about;
            true
        })
        .map(|_| ())
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.favorites.contains(&id))
    }

    pub fn has_voted(&self, id: u64) -> bool {
        self.user.as_ref().is_some_and(|user| user.voted.contains(&id))
    }

    /// Returns `true` when the story was newly added.
    pub fn add_favorite(&mut self, id: u64) -> Result<bool, SessionError> {
        self.mutate(|user| {
            if user.favorites.contains(&id) {
                return false;
            }
            user.favorites.push(id);
            true
        })
    }

    /// Returns `true` when the story was present and removed.
    pub fn remove_favorite(&mut self, id: u64) -> Result<bool, SessionError> {
        self.mutate(|user| {
            let before = user.favorites.len();
            user.favorites.retain(|favorite| *favorite != id);
            user.favorites.len() != before
        })
    }

    /// Returns whether the story is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: u64) -> Result<bool, SessionError> {
        if self.is_favorite(id) {
            self.remove_favorite(id)?;
            Ok(false)
        } else {
            self.add_favorite(id)
        }
    }

    /// Returns whether the item is voted afterwards. Always `false` when
    /// nobody is logged in.
    pub fn toggle_vote(&mut self, id: u64) -> Result<bool, SessionError> {
        self.mutate(|user| {
            if let Some(position) = user.voted.iter().position(|voted| *voted == id) {
                user.voted.remove(position);
                false
            } else {
                user.voted.push(id);
                true
            }
        })
    }

    fn replace_user(&mut self, user: UserRecord) -> Result<&UserRecord, SessionError> {
        self.persist(&user)?;
        Ok(self.user.insert(user))
    }

    /// Apply `change` to the logged-in user and persist. No-op returning
    /// `false` when logged out.
    fn mutate<F>(&mut self, change: F) -> Result<bool, SessionError>
    where
        F: FnOnce(&mut UserRecord) -> bool,
    {
        let Some(user) = self.user.as_mut() else {
            return Ok(false);
        };
        let outcome = change(user);
        let snapshot = user.clone();
        self.persist(&snapshot)?;
        Ok(outcome)
    }

    fn persist(&mut self, user: &UserRecord) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, raw)
    }
}
