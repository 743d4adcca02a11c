use uuid::Uuid;

use crate::domain::UserPoint;

#[mockall::automock]
#[async_trait::async_trait]
pub trait BalancePort {
    /// Current balance of a user
    ///
    /// A user without a stored balance has a zero balance.
    async fn select_by_id(&self, user_id: Uuid) -> Result<UserPoint, Error>;
    /// Store a new point total for a user, stamped with the write time
    async fn insert_or_update(&self, user_id: Uuid, point: u64) -> Result<UserPoint, Error>;
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
