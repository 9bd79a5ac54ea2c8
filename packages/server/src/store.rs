//! Statement storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use gorod_api_models::Statement;
use tokio::sync::RwLock;

use crate::ServerError;

/// Persistence seam for statements.
#[async_trait::async_trait]
pub trait StatementStore: Send + Sync {
    /// Stores `statement` under a fresh id and returns the stored record.
    async fn insert(&self, statement: Statement) -> Result<Statement, ServerError>;

    async fn get(&self, id: u64) -> Result<Option<Statement>, ServerError>;

    /// All statements, ordered by id.
    async fn list(&self) -> Result<Vec<Statement>, ServerError>;

    /// Replaces statement `id`. Returns `None` if there is none.
    async fn update(&self, id: u64, statement: Statement)
    -> Result<Option<Statement>, ServerError>;

    /// Removes statement `id`. Returns whether it existed.
    async fn delete(&self, id: u64) -> Result<bool, ServerError>;
}

/// In-memory [`StatementStore`]. Contents are lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    statements: RwLock<BTreeMap<u64, Statement>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store numbering from 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            statements: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a store holding `statements`, renumbered from 1.
    #[must_use]
    pub fn with_statements(statements: impl IntoIterator<Item = Statement>) -> Self {
        let store = Self::new();
        let seeded: BTreeMap<u64, Statement> = statements
            .into_iter()
            .map(|mut statement| {
                statement.id = store.allocate_id();
                (statement.id, statement)
            })
            .collect();
        Self {
            statements: RwLock::new(seeded),
            next_id: store.next_id,
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl StatementStore for MemoryStore {
    async fn insert(&self, mut statement: Statement) -> Result<Statement, ServerError> {
        statement.id = self.allocate_id();
        self.statements
            .write()
            .await
            .insert(statement.id, statement.clone());
        log::debug!("Stored statement #{}", statement.id);
        Ok(statement)
    }

    async fn get(&self, id: u64) -> Result<Option<Statement>, ServerError> {
        Ok(self.statements.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Statement>, ServerError> {
        Ok(self.statements.read().await.values().cloned().collect())
    }

    async fn update(
        &self,
        id: u64,
        mut statement: Statement,
    ) -> Result<Option<Statement>, ServerError> {
        let mut statements = self.statements.write().await;
        let Some(slot) = statements.get_mut(&id) else {
            return Ok(None);
        };
        statement.id = id;
        *slot = statement.clone();
        Ok(Some(statement))
    }

    async fn delete(&self, id: u64) -> Result<bool, ServerError> {
        Ok(self.statements.write().await.remove(&id).is_some())
    }
}
