//! # Session State
//!
//! Thread-safe wrapper around [`Session`] for embedding hosts.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. A host's command layer may be invoked concurrently
//! 2. Only one command should mutate the session at a time
//! 3. The core itself is single-threaded by design - this wrapper is
//!    the one place mutual exclusion happens
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them mutate state. A
//! RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use crate::session::Session;

/// Host-managed session state.
#[derive(Debug)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates state holding a freshly bootstrapped session.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use divvy_session::SessionState;
    ///
    /// let state = SessionState::new();
    /// let result = state.with_session(|session| session.recompute());
    /// assert!(result.diagnostics.is_empty());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use divvy_core::amount::Amount;
    /// use divvy_session::SessionState;
    ///
    /// let state = SessionState::new();
    /// state.with_session_mut(|session| {
    ///     session.add_item("Dinner", Amount::from_value(40.0));
    /// });
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
