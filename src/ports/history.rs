use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{PointHistory, TransactionType};

#[mockall::automock]
#[async_trait::async_trait]
pub trait HistoryPort {
    async fn insert(
        &self,
        user_id: Uuid,
        amount: u64,
        kind: TransactionType,
        updated_at: DateTime<Utc>,
    ) -> Result<PointHistory, Error>;
    /// All transactions of a user, in insertion order
    async fn select_all_by_user_id(&self, user_id: Uuid) -> Result<Vec<PointHistory>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
