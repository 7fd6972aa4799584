// Clinio
// Copyright (C) 2025 Clinio Health

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Identity provider seam
//!
//! Sign-in, sign-out and session persistence belong to an external
//! authentication provider. This module defines the contract the core
//! consumes and the bridge from a session to a stored user profile. A
//! session whose profile record does not (yet) exist is treated as
//! unauthenticated, never as a role-less authenticated user.

use crate::error::AccessResult;
use crate::model::User;
use crate::store::users::UserStore;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::warn;

/// Authenticated session as reported by the external provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Id of the user the session belongs to
    pub user_id: String,
}

/// Auth change notification
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A session was established
    SignedIn(Session),
    /// The session ended
    SignedOut,
}

/// Contract of the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current session, if any
    async fn current_session(&self) -> AccessResult<Option<Session>>;

    /// Subscribe to sign-in/sign-out events
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Resolve the current session to a stored user profile
///
/// Returns `None` both when there is no session and when the session's
/// profile record is missing from the user store.
pub async fn resolve_profile(provider: &dyn IdentityProvider, users: &UserStore) -> AccessResult<Option<User>> {
    let Some(session) = provider.current_session().await? else {
        return Ok(None);
    };

    match users.get(&session.user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            warn!(user_id = %session.user_id, "Session has no profile record, treating as unauthenticated");
            Ok(None)
        }
    }
}

/// Fixed identity provider for embedding and tests
pub struct StaticIdentity {
    session: Option<Session>,
    sender: broadcast::Sender<AuthEvent>,
}

impl StaticIdentity {
    /// Provider that always reports the given session
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(16);
        Self {
            session: Some(Session { user_id: user_id.into() }),
            sender,
        }
    }

    /// Provider that always reports no session
    pub fn signed_out() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { session: None, sender }
    }

    /// Emit an auth change to subscribers
    pub fn notify(&self, event: AuthEvent) {
        // Send fails only when there are no subscribers; that is fine here.
        let _ = self.sender.send(event);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_session(&self) -> AccessResult<Option<Session>> {
        Ok(self.session.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }
}
