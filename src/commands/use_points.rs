use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::UserPoint,
    ports::{balance::BalancePort, history::HistoryPort},
};
use tower::Service;
use uuid::Uuid;

use super::{Error, PointService};

pub struct UseRequest {
    pub user_id: Uuid,
    /// Points to deduct, must be positive and no more than the current balance
    pub amount: i64,
}

impl<B, H> Service<UseRequest> for PointService<B, H>
where
    B: BalancePort + 'static,
    H: HistoryPort + 'static,
{
    type Response = UserPoint;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UseRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.use_points(req.user_id, req.amount).await })
    }
}
