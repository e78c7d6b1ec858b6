use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use lifetime_value_aggregator_logic::{
    repository,
    types::{ChannelId, PeriodEnd},
    Aggregator,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monthly lifetime-value aggregation over all channels
    Aggregate {
        /// Timezone the calendar months are anchored in
        #[arg(long, default_value = "UTC")]
        timezone: Tz,
        /// Backfill every month since each channel's creation
        #[arg(long)]
        initial: bool,
    },
    /// Print aggregation data points for a period as JSON lines
    Report {
        #[arg(long)]
        from: NaiveDate,
        /// Defaults to one year after --from
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Restrict to these channel ids; repeatable
        #[arg(long = "channel")]
        channels: Option<Vec<ChannelId>>,
    },
    /// Empty the aggregation table
    Clear {
        /// Use a bulk DELETE instead of TRUNCATE
        #[arg(long)]
        use_delete: bool,
    },
}

async fn report(
    db: DatabaseConnection,
    from: NaiveDate,
    to: Option<NaiveDate>,
    channels: Option<Vec<ChannelId>>,
) -> Result<()> {
    let start = from.and_time(NaiveTime::MIN).and_utc();
    let end = to.map(|to| PeriodEnd::Date(to.and_time(NaiveTime::MIN).and_utc()));

    let points =
        repository::aggregations::find_for_period(&db, start, end, channels.as_deref()).await?;
    for point in points {
        println!("{}", serde_json::to_string(&point)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let db = sea_orm::Database::connect(cli.db).await?;

    match cli.command {
        Commands::Aggregate { timezone, initial } => {
            Aggregator::new(Arc::new(db))
                .aggregate(timezone, initial)
                .await?
        }
        Commands::Report { from, to, channels } => report(db, from, to, channels).await?,
        Commands::Clear { use_delete } => {
            repository::aggregations::clear_table_data(&db, use_delete).await?
        }
    };

    Ok(())
}
