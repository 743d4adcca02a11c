use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::PointHistory,
    ports::{balance::BalancePort, history::HistoryPort},
};
use tower::Service;
use uuid::Uuid;

use super::{Error, PointService};

pub struct ListHistoryRequest {
    pub user_id: Uuid,
}

impl<B, H> Service<ListHistoryRequest> for PointService<B, H>
where
    B: BalancePort + 'static,
    H: HistoryPort + 'static,
{
    type Response = Vec<PointHistory>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ListHistoryRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.list_history(req.user_id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PointConfig,
        domain::TransactionType,
        ports::{balance::MockBalancePort, history::MockHistoryPort},
    };
    use chrono::Utc;
    use mockall::predicate::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[tokio::test]
    async fn test_call() -> Result<(), BoxError> {
        // GIVEN a history table with a CHARGE followed by a USE
        let user_id = Uuid::new_v4();
        let entries = vec![
            PointHistory {
                id: 1,
                user_id,
                amount: 1000,
                kind: TransactionType::Charge,
                updated_at: Utc::now(),
            },
            PointHistory {
                id: 2,
                user_id,
                amount: 500,
                kind: TransactionType::Use,
                updated_at: Utc::now(),
            },
        ];
        let returned = entries.clone();
        let mut history = MockHistoryPort::new();
        history
            .expect_select_all_by_user_id()
            .times(1)
            .with(eq(user_id))
            .returning(move |_| Ok(returned.clone()));

        let mut service = PointService::new(
            Arc::new(MockBalancePort::new()),
            Arc::new(history),
            &PointConfig::default(),
        );

        // WHEN listing the history
        let res = ServiceExt::<ListHistoryRequest>::ready(&mut service)
            .await?
            .call(ListHistoryRequest { user_id })
            .await;

        // THEN the entries come back in the same order
        assert_that!(res).is_ok().is_equal_to(entries);
        Arc::into_inner(service.history).unwrap().checkpoint();

        Ok(())
    }
}
