use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = r#"
            create table channels (
                id serial primary key,
                name text not null,
                created_at timestamptz not null default now()
            );

            create table lifetime_value_history (
                id bigserial primary key,
                account_id bigint not null,
                channel_id integer not null references channels (id),
                amount double precision not null,
                created_at timestamptz not null default now()
            );

            -- for the latest-per-account scan bounded by period end
            create index on lifetime_value_history (channel_id, created_at);

            create index on lifetime_value_history (account_id);

            create table lifetime_value_aggregations (
                id bigserial primary key,
                channel_id integer not null references channels (id),
                year integer not null,
                month integer not null,
                quarter integer not null,
                aggregation_date timestamptz not null,
                amount double precision,

                inserted_at timestamptz not null default now(),
                updated_at timestamptz not null default now()
            );

            -- for period reports
            create index on lifetime_value_aggregations (aggregation_date);
        "#;
        crate::from_sql(manager, sql).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = r#"
            drop table lifetime_value_aggregations;
            drop table lifetime_value_history;
            drop table channels;
        "#;
        crate::from_sql(manager, sql).await
    }
}
