use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use tracing::instrument;

use crate::{
    period::{month_sequence, MonthPeriod},
    types::{Channel, Timestamp},
};

pub mod period;
pub mod repository;
pub mod test_utils;
pub mod types;

/// Batch job computing the monthly average lifetime value per channel.
///
/// Runs are not safe to execute concurrently; callers serialize invocations
/// (single-flight scheduled job).
pub struct Aggregator {
    db: Arc<DatabaseConnection>,
}

impl Aggregator {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Run the per-channel aggregation. With `initial_aggregation` every
    /// month since each channel's creation is recomputed, otherwise only the
    /// current month is refreshed.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, time_zone: Tz, initial_aggregation: bool) -> Result<()> {
        self.aggregate_at(time_zone, initial_aggregation, Utc::now())
            .await
    }

    /// `aggregate` with an explicit current instant, for deterministic
    /// scheduling and tests. The whole run is one transaction: any failure
    /// rolls back every channel, nothing is persisted partially.
    #[instrument(skip(self))]
    pub async fn aggregate_at(
        &self,
        time_zone: Tz,
        initial_aggregation: bool,
        now: Timestamp,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let channels = repository::channels::list_channels(&txn).await?;

        for channel in channels {
            if initial_aggregation {
                for date in month_sequence(channel.created_at.with_timezone(&time_zone), now) {
                    self.aggregate_month(&txn, &channel, date)
                        .await
                        .with_context(|| {
                            format!("Aggregating channel {} for {date}", channel.id)
                        })?;
                }
            } else {
                let date = now.with_timezone(&time_zone);
                self.aggregate_month(&txn, &channel, date)
                    .await
                    .with_context(|| {
                        format!("Aggregating channel {} for the current month", channel.id)
                    })?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    async fn aggregate_month<T: ConnectionTrait>(
        &self,
        txn: &T,
        channel: &Channel,
        date: DateTime<Tz>,
    ) -> Result<()> {
        let period = MonthPeriod::containing(date)?;
        let amount =
            repository::history::average_latest_value(txn, channel.id, period.exclusive_end())
                .await?;

        repository::aggregations::upsert_month(
            txn,
            repository::aggregations::MonthAggregation {
                channel_id: channel.id,
                year: period.year,
                month: period.month as i32,
                quarter: period.quarter as i32,
                aggregation_date: period.marker(),
                amount,
            },
        )
        .await
    }
}
