use anyhow::{Context, Result};
use lifetime_value_aggregator_entity::channels;
use sea_orm::prelude::*;
use tracing::instrument;

use crate::types::Channel;

#[instrument(name = "repository::channels::list_channels", skip(db))]
pub async fn list_channels<T: ConnectionTrait>(db: &T) -> Result<Vec<Channel>> {
    let models = channels::Entity::find()
        .all(db)
        .await
        .context("Failed to list channels")?;

    Ok(models
        .into_iter()
        .map(|model| Channel {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        })
        .collect())
}
