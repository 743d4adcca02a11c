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

pub struct GetBalanceRequest {
    pub user_id: Uuid,
}

impl<B, H> Service<GetBalanceRequest> for PointService<B, H>
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

    fn call(&mut self, req: GetBalanceRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.get_balance(req.user_id).await })
    }
}
