use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::PointConfig,
    domain::{validate_amount, PointError, PointHistory, TransactionType, UserPoint},
    ports::{balance::BalancePort, history::HistoryPort},
};

pub mod charge;
pub mod get_balance;
pub mod list_history;
pub mod use_points;

/// Point operations on top of a balance table and a history table
pub struct PointService<B, H> {
    balances: Arc<B>,
    history: Arc<H>,
    max_balance: u64,
}

impl<B, H> PointService<B, H>
where
    B: BalancePort,
    H: HistoryPort,
{
    pub fn new(balances: Arc<B>, history: Arc<H>, config: &PointConfig) -> Self {
        Self {
            balances,
            history,
            max_balance: config.max_balance,
        }
    }

    pub async fn get_balance(&self, user_id: Uuid) -> Result<UserPoint, Error> {
        Ok(self.balances.select_by_id(user_id).await?)
    }

    pub async fn charge(&self, user_id: Uuid, amount: i64) -> Result<UserPoint, Error> {
        // Reject bad input before touching the tables
        let charged = validate_amount(amount).map_err(|err| rejected(user_id, "charge", err))?;

        let current = self.balances.select_by_id(user_id).await?;
        let point = current
            .charge(charged, self.max_balance)
            .map_err(|err| rejected(user_id, "charge", err))?;

        self.record(user_id, current.point, point, charged, TransactionType::Charge)
            .await
    }

    pub async fn use_points(&self, user_id: Uuid, amount: i64) -> Result<UserPoint, Error> {
        let used = validate_amount(amount).map_err(|err| rejected(user_id, "use", err))?;

        let current = self.balances.select_by_id(user_id).await?;
        let point = current
            .use_points(used)
            .map_err(|err| rejected(user_id, "use", err))?;

        self.record(user_id, current.point, point, used, TransactionType::Use)
            .await
    }

    pub async fn list_history(&self, user_id: Uuid) -> Result<Vec<PointHistory>, Error> {
        Ok(self.history.select_all_by_user_id(user_id).await?)
    }

    /// Persist the new total, then log the transaction with the persisted timestamp
    ///
    /// If the history append fails, the balance is written back to `previous` so no
    /// mutation is left without its transaction.
    async fn record(
        &self,
        user_id: Uuid,
        previous: u64,
        point: u64,
        amount: u64,
        kind: TransactionType,
    ) -> Result<UserPoint, Error> {
        let user_point = self.balances.insert_or_update(user_id, point).await?;
        let entry = match self
            .history
            .insert(user_id, amount, kind, user_point.updated_at)
            .await
        {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%user_id, error = %err, "history append failed, restoring balance");
                self.balances
                    .insert_or_update(user_id, previous)
                    .await?;
                return Err(err.into());
            }
        };

        debug!(
            %user_id,
            transaction_id = entry.id,
            kind = ?kind,
            amount,
            point = user_point.point,
            "points updated"
        );

        Ok(user_point)
    }
}

fn rejected(user_id: Uuid, operation: &'static str, err: PointError) -> Error {
    warn!(%user_id, operation, error = %err, "rejected point operation");
    err.into()
}

impl<B, H> Clone for PointService<B, H> {
    fn clone(&self) -> Self {
        Self {
            balances: self.balances.clone(),
            history: self.history.clone(),
            max_balance: self.max_balance,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("balance port error: {0:?}")]
    Balance(#[from] crate::ports::balance::Error),
    #[error("history port error: {0:?}")]
    History(#[from] crate::ports::history::Error),

    #[error("invalid amount: {0}")]
    InvalidAmount(i64),
    #[error("insufficient balance: cannot use {amount} from {current_point}")]
    InsufficientBalance { current_point: u64, amount: u64 },
    #[error("balance limit exceeded: {current_point} + {amount} is over {max_balance}")]
    BalanceLimitExceeded {
        current_point: u64,
        amount: u64,
        max_balance: u64,
    },
}

impl From<PointError> for Error {
    fn from(err: PointError) -> Self {
        match err {
            PointError::InvalidAmount(amount) => Error::InvalidAmount(amount),
            PointError::InsufficientBalance {
                current_point,
                amount,
            } => Error::InsufficientBalance {
                current_point,
                amount,
            },
            PointError::BalanceLimitExceeded {
                current_point,
                amount,
                max_balance,
            } => Error::BalanceLimitExceeded {
                current_point,
                amount,
                max_balance,
            },
        }
    }
}
