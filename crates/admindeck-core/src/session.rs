//! In-memory session state machine.
//!
//! Two states (anonymous, authenticated) and exactly two transitions:
//! `SetUser` and `Logout`. The store is owned by the application root for its
//! whole lifetime; everything else reads the state and dispatches actions,
//! never mutating fields directly. The state is not persisted - it is
//! re-derived from storage at startup via [`SessionStore::bootstrap`].

use crate::auth::AuthService;
use crate::models::UserProfile;

/// Current session state. `is_authenticated` is true iff `user` is present;
/// the reducer is the only code that upholds that invariant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
}

/// The only permitted transitions.
#[derive(Debug, Clone)]
pub enum SessionAction {
    SetUser(UserProfile),
    Logout,
}

/// Pure transition function. Both actions replace the state wholesale.
fn reduce(action: SessionAction) -> SessionState {
    match action {
        SessionAction::SetUser(user) => SessionState {
            user: Some(user),
            is_authenticated: true,
        },
        SessionAction::Logout => SessionState {
            user: None,
            is_authenticated: false,
        },
    }
}

/// Owner of the session state for the application's lifetime.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    /// Create a store in the anonymous state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Apply a transition.
    pub fn dispatch(&mut self, action: SessionAction) {
        self.state = reduce(action);
    }

    /// Re-derive the initial state from persisted storage. Called once at
    /// startup; a persisted profile moves the store to authenticated.
    pub fn bootstrap(&mut self, auth: &AuthService) {
        if let Some(user) = auth.user() {
            self.dispatch(SessionAction::SetUser(user));
        }
    }
}
