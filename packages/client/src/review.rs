//! Administrator review queue.

use gorod_api_models::Statement;

use crate::{ClientError, GorodApi};

/// The pending statements as last seen by the administrator.
///
/// Accepting or rejecting removes the statement locally straight away,
/// then sends the request and reloads the list from the backend whether or
/// not the request succeeded, so the local view always ends up in sync.
pub struct ReviewQueue<'a, A: GorodApi + ?Sized> {
    api: &'a A,
    items: Vec<Statement>,
}

impl<'a, A: GorodApi + ?Sized> ReviewQueue<'a, A> {
    /// An empty queue; call [`Self::reload`] to fill it.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    /// Statements as of the last reload.
    #[must_use]
    pub fn items(&self) -> &[Statement] {
        &self.items
    }

    /// Replaces the local list with the backend's.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] if the list is refused; the
    /// local list is left unchanged.
    pub async fn reload(&mut self) -> Result<&[Statement], ClientError> {
        self.items = self.api.list_statements().await?;
        log::debug!("Review queue holds {} statements", self.items.len());
        Ok(&self.items)
    }

    /// Approves statement `id`.
    ///
    /// # Errors
    ///
    /// Returns the request's error if it failed, after the reload. If only
    /// the reload fails its error is returned instead.
    pub async fn accept(&mut self, id: u64) -> Result<(), ClientError> {
        let Some(statement) = self.take(id) else {
            log::warn!("Statement #{id} is not in the review queue");
            return self.reload().await.map(|_| ());
        };
        let result = self.api.accept(&statement).await.map(|_| ());
        self.finish("accept", id, result).await
    }

    /// Rejects (deletes) statement `id`.
    ///
    /// # Errors
    ///
    /// Returns the request's error if it failed, after the reload. If only
    /// the reload fails its error is returned instead.
    pub async fn reject(&mut self, id: u64) -> Result<(), ClientError> {
        self.take(id);
        let result = self.api.reject(id).await;
        self.finish("reject", id, result).await
    }

    fn take(&mut self, id: u64) -> Option<Statement> {
        let idx = self.items.iter().position(|s| s.id == id)?;
        Some(self.items.remove(idx))
    }

    async fn finish(
        &mut self,
        action: &str,
        id: u64,
        result: Result<(), ClientError>,
    ) -> Result<(), ClientError> {
        if let Err(e) = &result {
            log::error!("Failed to {action} statement #{id}: {e}");
        } else {
            log::info!("Statement #{id}: {action} done");
        }
        let reloaded = self.reload().await.map(|_| ());
        result.and(reloaded)
    }
}
