use anyhow::{Context, Result};
use sea_orm::{prelude::*, DbBackend, FromQueryResult, Statement};
use tracing::instrument;

use crate::{
    repository::sql,
    types::{ChannelId, Timestamp},
};

#[derive(Debug, FromQueryResult)]
struct DbAverageAmount {
    amount: Option<f64>,
}

/// Average lifetime value across the channel's accounts, counting only each
/// account's latest observation strictly before `period_end`. `None` when no
/// account has a qualifying observation.
#[instrument(name = "repository::history::average_latest_value", skip(db))]
pub async fn average_latest_value<T: ConnectionTrait>(
    db: &T,
    channel_id: ChannelId,
    period_end: Timestamp,
) -> Result<Option<f64>> {
    let row = DbAverageAmount::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql::AVG_LATEST_LIFETIME_VALUE,
        [channel_id.into(), period_end.into()],
    ))
    .one(db)
    .await
    .with_context(|| format!("Failed to compute average lifetime value for channel {channel_id}"))?;

    Ok(row.and_then(|row| row.amount))
}
