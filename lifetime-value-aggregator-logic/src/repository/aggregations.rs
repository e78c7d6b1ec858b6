use anyhow::{Context, Result};
use chrono::Utc;
use lifetime_value_aggregator_entity::lifetime_value_aggregations;
use sea_orm::{
    prelude::*,
    sea_query::OnConflict,
    ActiveValue::{NotSet, Set},
    DbBackend, FromQueryResult, Statement,
};
use sea_query::{Iden, PostgresQueryBuilder, Query};
use tracing::instrument;

use crate::types::{AggregationPoint, ChannelId, PeriodEnd, Timestamp};

#[derive(Iden)]
enum LifetimeValueAggregations {
    Table,
    ChannelId,
    Amount,
    Month,
    Year,
    AggregationDate,
}

/// One computed (channel, month) data point ready to persist.
#[derive(Debug)]
pub struct MonthAggregation {
    pub channel_id: ChannelId,
    pub year: i32,
    pub month: i32,
    pub quarter: i32,
    pub aggregation_date: Timestamp,
    pub amount: Option<f64>,
}

/// Insert or refresh the record for (channel, year, month). The unique index
/// on that key makes backfill and refresh runs share one code path.
#[instrument(name = "repository::aggregations::upsert_month", skip(db))]
pub async fn upsert_month<T: ConnectionTrait>(db: &T, aggregation: MonthAggregation) -> Result<()> {
    let model = lifetime_value_aggregations::ActiveModel {
        id: NotSet,
        channel_id: Set(aggregation.channel_id),
        year: Set(aggregation.year),
        month: Set(aggregation.month),
        quarter: Set(aggregation.quarter),
        aggregation_date: Set(aggregation.aggregation_date),
        amount: Set(aggregation.amount),
        inserted_at: NotSet,
        updated_at: Set(Utc::now()),
    };
    lifetime_value_aggregations::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([
                lifetime_value_aggregations::Column::ChannelId,
                lifetime_value_aggregations::Column::Year,
                lifetime_value_aggregations::Column::Month,
            ])
            .update_columns([
                lifetime_value_aggregations::Column::Quarter,
                lifetime_value_aggregations::Column::AggregationDate,
                lifetime_value_aggregations::Column::Amount,
                lifetime_value_aggregations::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec(db)
        .await
        .with_context(|| format!("Failed to upsert aggregation: {aggregation:?}"))?;
    Ok(())
}

#[derive(Debug, FromQueryResult)]
struct DbAggregationPoint {
    channel_id: i32,
    amount: Option<f64>,
    month: i32,
    year: i32,
}

/// Aggregation records with `aggregation_date` in `[start, end]`, optionally
/// restricted to a set of channels. `end` defaults to one year past `start`.
#[instrument(name = "repository::aggregations::find_for_period", skip(db))]
pub async fn find_for_period<T: ConnectionTrait>(
    db: &T,
    start: Timestamp,
    end: Option<PeriodEnd>,
    channel_ids: Option<&[ChannelId]>,
) -> Result<Vec<AggregationPoint>> {
    let end = end.unwrap_or_default().resolve(start)?;

    let mut query = Query::select()
        .columns([
            LifetimeValueAggregations::ChannelId,
            LifetimeValueAggregations::Amount,
            LifetimeValueAggregations::Month,
            LifetimeValueAggregations::Year,
        ])
        .from(LifetimeValueAggregations::Table)
        .and_where(Expr::col(LifetimeValueAggregations::AggregationDate).between(start, end))
        // collapses exact duplicates only, never drops distinct rows
        .group_by_columns([
            LifetimeValueAggregations::ChannelId,
            LifetimeValueAggregations::Year,
            LifetimeValueAggregations::Month,
            LifetimeValueAggregations::Amount,
        ])
        .order_by(LifetimeValueAggregations::Year, sea_query::Order::Asc)
        .order_by(LifetimeValueAggregations::Month, sea_query::Order::Asc)
        .to_owned();

    if let Some(channel_ids) = channel_ids {
        query.and_where(
            Expr::col(LifetimeValueAggregations::ChannelId).is_in(channel_ids.iter().copied()),
        );
    }

    let rows = DbAggregationPoint::find_by_statement(Statement::from_string(
        DbBackend::Postgres,
        query.to_string(PostgresQueryBuilder),
    ))
    .all(db)
    .await
    .context("Failed to query aggregations for period")?;

    Ok(rows
        .into_iter()
        .map(|row| AggregationPoint {
            channel_id: row.channel_id,
            amount: row.amount,
            month: row.month,
            year: row.year,
        })
        .collect())
}

/// Empty the aggregation table. DELETE works without truncate privileges and
/// rolls back inside a surrounding transaction; TRUNCATE is the fast default.
#[instrument(name = "repository::aggregations::clear_table_data", skip(db))]
pub async fn clear_table_data<T: ConnectionTrait>(db: &T, use_delete: bool) -> Result<()> {
    if use_delete {
        lifetime_value_aggregations::Entity::delete_many()
            .exec(db)
            .await
            .context("Failed to delete aggregation records")?;
    } else {
        db.execute(Statement::from_string(
            DbBackend::Postgres,
            format!(
                "truncate table {} restart identity",
                LifetimeValueAggregations::Table.to_string()
            ),
        ))
        .await
        .context("Failed to truncate aggregation table")?;
    }
    Ok(())
}
