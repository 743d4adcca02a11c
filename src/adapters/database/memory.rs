use crate::{
    domain::{PointHistory, TransactionType, UserPoint},
    ports::{balance, balance::BalancePort, history, history::HistoryPort},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct MemoryBalanceTable {
    balances: Arc<Mutex<HashMap<Uuid, UserPoint>>>,
}

#[async_trait::async_trait]
impl BalancePort for MemoryBalanceTable {
    async fn select_by_id(&self, user_id: Uuid) -> Result<UserPoint, balance::Error> {
        let user_point = self
            .balances
            .lock()?
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UserPoint::empty(user_id));

        Ok(user_point)
    }

    async fn insert_or_update(
        &self,
        user_id: Uuid,
        point: u64,
    ) -> Result<UserPoint, balance::Error> {
        let user_point = UserPoint::new(user_id, point, Utc::now());
        self.balances
            .lock()?
            .insert(user_id, user_point.clone());

        Ok(user_point)
    }
}

#[derive(Debug, Default)]
struct HistoryLog {
    /// Last assigned id, shared across users
    last_id: u64,
    entries: Vec<PointHistory>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryHistoryTable {
    log: Arc<Mutex<HistoryLog>>,
}

#[async_trait::async_trait]
impl HistoryPort for MemoryHistoryTable {
    async fn insert(
        &self,
        user_id: Uuid,
        amount: u64,
        kind: TransactionType,
        updated_at: DateTime<Utc>,
    ) -> Result<PointHistory, history::Error> {
        let mut log = self.log.lock()?;
        log.last_id += 1;
        let entry = PointHistory {
            id: log.last_id,
            user_id,
            amount,
            kind,
            updated_at,
        };
        log.entries.push(entry.clone());

        Ok(entry)
    }

    async fn select_all_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PointHistory>, history::Error> {
        let entries = self
            .log
            .lock()?
            .entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();

        Ok(entries)
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for balance::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

impl<T> From<PoisonError<T>> for history::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn test_select_absent_is_zero() {
        let table = MemoryBalanceTable::default();
        let user_id = Uuid::new_v4();

        let res = table.select_by_id(user_id).await;
        assert_that!(res)
            .is_ok()
            .matches(|user_point| user_point.user_id == user_id && user_point.point == 0);
    }

    #[tokio::test]
    async fn test_insert_or_update_retrieve() {
        let table = MemoryBalanceTable::default();
        let user_id = Uuid::new_v4();

        let res = table.insert_or_update(user_id, 1200).await;
        assert_that!(res).is_ok().matches(|user_point| user_point.point == 1200);
        // Overwriting replaces the stored total
        let written = table.insert_or_update(user_id, 700).await;
        assert_that!(written).is_ok();
        let written = written.unwrap();

        let res = table.select_by_id(user_id).await;
        assert_that!(res).is_ok().is_equal_to(written);
    }

    #[tokio::test]
    async fn test_history_order_per_user() {
        let table = MemoryHistoryTable::default();
        let user_id = Uuid::new_v4();
        let other_id = Uuid::new_v4();
        let now = Utc::now();

        for (id, amount, kind) in [
            (user_id, 1000, TransactionType::Charge),
            (other_id, 50, TransactionType::Charge),
            (user_id, 500, TransactionType::Use),
            (user_id, 20, TransactionType::Charge),
        ] {
            assert_that!(table.insert(id, amount, kind, now).await).is_ok();
        }

        let res = table.select_all_by_user_id(user_id).await;
        assert_that!(res).is_ok().matches(|entries| {
            entries.iter().map(|e| (e.amount, e.kind)).eq([
                (1000, TransactionType::Charge),
                (500, TransactionType::Use),
                (20, TransactionType::Charge),
            ])
        });
        // Ids keep growing across users
        assert_that!(res.unwrap().iter().map(|e| e.id).collect::<Vec<_>>())
            .is_equal_to(vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_history_empty() {
        let table = MemoryHistoryTable::default();

        let res = table.select_all_by_user_id(Uuid::new_v4()).await;
        assert_that!(res).is_ok().is_empty();
    }
}
