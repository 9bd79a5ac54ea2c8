//! Administrator sessions.

use std::collections::HashSet;

use tokio::sync::RwLock;

/// Name of the session cookie set by `POST /api/auth/login`.
pub const SESSION_COOKIE: &str = "gorod_session";

/// Issued session tokens. Tokens never expire while the server runs.
#[derive(Debug, Default)]
pub struct Sessions {
    tokens: RwLock<HashSet<String>>,
}

impl Sessions {
    /// Issues a new random token.
    pub async fn open(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.write().await.insert(token.clone());
        token
    }

    /// Whether `token` was issued by [`Self::open`].
    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }
}
