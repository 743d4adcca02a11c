use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current point balance of a user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserPoint {
    pub user_id: Uuid,
    /// Current amount of points
    pub point: u64,
    /// Time of the last write to this balance
    ///
    /// For a user that was never written, this is the time the zero balance was read.
    pub updated_at: DateTime<Utc>,
}

impl UserPoint {
    pub fn new(user_id: Uuid, point: u64, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            point,
            updated_at,
        }
    }

    pub fn empty(user_id: Uuid) -> Self {
        Self::new(user_id, 0, Utc::now())
    }

    /// Point total after charging an amount already checked by [`validate_amount`]
    ///
    /// The result may not go above `max_balance`.
    pub fn charge(&self, amount: u64, max_balance: u64) -> Result<u64, PointError> {
        match self.point.checked_add(amount) {
            Some(point) if point <= max_balance => Ok(point),
            _ => Err(PointError::BalanceLimitExceeded {
                current_point: self.point,
                amount,
                max_balance,
            }),
        }
    }

    /// Point total after using an amount already checked by [`validate_amount`]
    pub fn use_points(&self, amount: u64) -> Result<u64, PointError> {
        self.point
            .checked_sub(amount)
            .ok_or(PointError::InsufficientBalance {
                current_point: self.point,
                amount,
            })
    }
}

/// Amount of a charge or use, which must be strictly positive
pub fn validate_amount(amount: i64) -> Result<u64, PointError> {
    if amount <= 0 {
        return Err(PointError::InvalidAmount(amount));
    }

    Ok(amount as u64)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionType {
    Charge,
    Use,
}

/// A single recorded charge or use
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointHistory {
    /// Sequence number assigned by the history store
    pub id: u64,
    pub user_id: Uuid,
    /// Always positive; the direction is given by `kind`
    pub amount: u64,
    pub kind: TransactionType,
    /// Matches `UserPoint::updated_at` of the balance written by the same operation
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    /// Charged or used amounts must be strictly positive
    #[error("amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// Using this amount would make the balance negative
    #[error("insufficient balance: cannot use {amount} from {current_point}")]
    InsufficientBalance { current_point: u64, amount: u64 },

    /// Charging this amount would go over the maximum balance
    #[error("balance limit exceeded: {current_point} + {amount} is over {max_balance}")]
    BalanceLimitExceeded {
        current_point: u64,
        amount: u64,
        max_balance: u64,
    },
}
