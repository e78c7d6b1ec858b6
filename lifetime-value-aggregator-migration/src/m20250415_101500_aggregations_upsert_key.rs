use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = r#"
            -- one record per channel and calendar month, and the conflict
            -- target for aggregation upserts
            create unique index lifetime_value_aggregations_channel_period_key
                on lifetime_value_aggregations (channel_id, year, month);
        "#;
        crate::from_sql(manager, sql).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = r#"
            drop index lifetime_value_aggregations_channel_period_key;
        "#;
        crate::from_sql(manager, sql).await
    }
}
