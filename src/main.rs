use std::sync::Arc;

use point_ledger::{
    adapters::database::memory::{MemoryBalanceTable, MemoryHistoryTable},
    commands::{charge::ChargeRequest, list_history::ListHistoryRequest, use_points::UseRequest},
    telemetry, Error, PointConfig, PointService,
};
use tower::ServiceExt;
use tracing::{info, warn};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PointConfig::load();
    telemetry::init(&config)?;
    info!(max_balance = config.max_balance, "point ledger starting");

    let service = PointService::new(
        Arc::new(MemoryBalanceTable::default()),
        Arc::new(MemoryHistoryTable::default()),
        &config,
    );
    let user_id = Uuid::new_v4();

    let user_point = service
        .clone()
        .oneshot(ChargeRequest {
            user_id,
            amount: 1200,
        })
        .await?;
    info!(%user_id, point = user_point.point, "charged");

    let user_point = service
        .clone()
        .oneshot(UseRequest {
            user_id,
            amount: 500,
        })
        .await?;
    info!(%user_id, point = user_point.point, "used");

    match service
        .clone()
        .oneshot(UseRequest {
            user_id,
            amount: 1500,
        })
        .await
    {
        Err(err @ Error::InsufficientBalance { .. }) => warn!(%user_id, error = %err, "use refused"),
        Err(err) => return Err(err.into()),
        Ok(user_point) => info!(%user_id, point = user_point.point, "used"),
    }

    for entry in service.oneshot(ListHistoryRequest { user_id }).await? {
        info!(
            transaction_id = entry.id,
            kind = ?entry.kind,
            amount = entry.amount,
            updated_at = %entry.updated_at,
            "history"
        );
    }

    Ok(())
}
