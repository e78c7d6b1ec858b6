use anyhow::{Context, Result};
use chrono::{DateTime, Months, Utc};
use serde::Serialize;

pub type Timestamp = DateTime<Utc>;

pub type ChannelId = i32;
pub type AccountId = i64;

/// A sales channel owning a population of accounts. Read-only to the
/// aggregator; its creation date is the backfill start boundary.
#[derive(Clone, Debug)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub created_at: Timestamp,
}

/// One stored (channel, year, month) -> average-value data point, as
/// returned by period reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregationPoint {
    pub channel_id: ChannelId,
    pub amount: Option<f64>,
    pub month: i32,
    pub year: i32,
}

/// Upper bound of a report period: an exact instant, or a number of
/// calendar months added to the start date.
#[derive(Clone, Debug)]
pub enum PeriodEnd {
    Date(Timestamp),
    ShiftMonths(u32),
}

impl Default for PeriodEnd {
    fn default() -> Self {
        Self::ShiftMonths(12)
    }
}

impl PeriodEnd {
    pub fn resolve(&self, start: Timestamp) -> Result<Timestamp> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::ShiftMonths(months) => start
                .checked_add_months(Months::new(*months))
                .with_context(|| format!("Period end {months} months past {start} out of range")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn period_end_defaults_to_one_year() {
        let start = utc("2024-03-15T00:00:00Z");
        let end = PeriodEnd::default().resolve(start).unwrap();
        assert_eq!(end, utc("2025-03-15T00:00:00Z"));
    }

    #[test]
    fn explicit_period_end_passes_through() {
        let start = utc("2024-03-15T00:00:00Z");
        let date = utc("2024-05-01T00:00:00Z");
        let end = PeriodEnd::Date(date).resolve(start).unwrap();
        assert_eq!(end, date);
    }
}
