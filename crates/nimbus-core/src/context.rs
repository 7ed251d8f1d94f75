//! Session context carrying the current user and credential source.

use std::fmt;
use std::sync::Arc;

use crate::traits::token::TokenProvider;
use crate::types::UserId;

/// Context for the current browsing session.
///
/// Constructed once by the embedder and passed into the navigation
/// controller and services so that every operation knows *who* is acting
/// and where credentials come from. Modeled as explicit dependency
/// injection; nothing in Nimbus reads ambient global state.
#[derive(Clone)]
pub struct SessionContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Source of bearer credentials for the catalog backend.
    pub tokens: Arc<dyn TokenProvider>,
}

impl SessionContext {
    /// Creates a new session context.
    pub fn new(user_id: UserId, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { user_id, tokens }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
