//! Fixture helpers for database-backed tests.

use anyhow::{Context, Result};
use chrono::DateTime;
use lifetime_value_aggregator_entity::{channels, lifetime_value_aggregations, lifetime_value_history};
use sea_orm::{
    prelude::*,
    ActiveValue::{NotSet, Set},
    PaginatorTrait, QueryOrder,
};

use crate::types::{AccountId, Channel, ChannelId, Timestamp};

pub fn utc(s: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(s).unwrap().to_utc()
}

pub async fn insert_channel<T: ConnectionTrait>(
    db: &T,
    name: &str,
    created_at: Timestamp,
) -> Result<Channel> {
    let model = channels::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(created_at),
    };
    let inserted = channels::Entity::insert(model)
        .exec(db)
        .await
        .context("Failed to insert channel fixture")?;

    Ok(Channel {
        id: inserted.last_insert_id,
        name: name.to_string(),
        created_at,
    })
}

pub async fn insert_history<T: ConnectionTrait>(
    db: &T,
    channel_id: ChannelId,
    account_id: AccountId,
    amount: f64,
    created_at: Timestamp,
) -> Result<()> {
    let model = lifetime_value_history::ActiveModel {
        id: NotSet,
        account_id: Set(account_id),
        channel_id: Set(channel_id),
        amount: Set(amount),
        created_at: Set(created_at),
    };
    lifetime_value_history::Entity::insert(model)
        .exec(db)
        .await
        .context("Failed to insert history fixture")?;
    Ok(())
}

pub async fn list_aggregations<T: ConnectionTrait>(
    db: &T,
) -> Result<Vec<lifetime_value_aggregations::Model>> {
    lifetime_value_aggregations::Entity::find()
        .order_by_asc(lifetime_value_aggregations::Column::Year)
        .order_by_asc(lifetime_value_aggregations::Column::Month)
        .order_by_asc(lifetime_value_aggregations::Column::ChannelId)
        .all(db)
        .await
        .context("Failed to list aggregation records")
}

pub async fn count_aggregations<T: ConnectionTrait>(db: &T) -> Result<u64> {
    lifetime_value_aggregations::Entity::find()
        .count(db)
        .await
        .context("Failed to count aggregation records")
}
