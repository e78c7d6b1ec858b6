use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(lifetime_value_aggregator_migration::Migrator).await;
}
