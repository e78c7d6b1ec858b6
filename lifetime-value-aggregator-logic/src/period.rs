//! Calendar math for monthly aggregation periods.
//!
//! All month arithmetic is done in the timezone the aggregation run was
//! given, then converted to UTC at the query boundary.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::Timestamp;

/// The calendar month containing a given local date, with the exclusive
/// upper bound used by the windowed average query.
#[derive(Clone, Debug)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    marker: DateTime<Tz>,
    exclusive_end: Timestamp,
}

impl MonthPeriod {
    pub fn containing(date: DateTime<Tz>) -> Result<Self> {
        let (year, month) = (date.year(), date.month());
        let first_of_month = date
            .timezone()
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .earliest()
            .with_context(|| {
                format!(
                    "First of month {year}-{month:02} does not exist in {}",
                    date.timezone()
                )
            })?;
        let exclusive_end = first_of_month
            .checked_add_months(Months::new(1))
            .with_context(|| format!("Month after {year}-{month:02} out of range"))?
            .with_timezone(&Utc);

        Ok(Self {
            year,
            month,
            quarter: quarter_of(month),
            marker: date,
            exclusive_end,
        })
    }

    /// The date stored on the aggregation record, identifying the period.
    pub fn marker(&self) -> Timestamp {
        self.marker.with_timezone(&Utc)
    }

    /// First instant of the following month. History observations must be
    /// strictly before this bound to count for the period.
    pub fn exclusive_end(&self) -> Timestamp {
        self.exclusive_end
    }
}

pub fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Month-start dates from `start` up to (but excluding) `now`, each one
/// exactly n calendar months past `start`. Adding whole month counts to the
/// original date keeps short months from shifting later steps, so a channel
/// created on Jan 31 still aggregates Apr 30 rather than Apr 28.
pub fn month_sequence(start: DateTime<Tz>, now: Timestamp) -> Vec<DateTime<Tz>> {
    let mut dates = Vec::new();
    for n in 0u32.. {
        let Some(date) = start.checked_add_months(Months::new(n)) else {
            break;
        };
        if date.with_timezone(&Utc) >= now {
            break;
        }
        dates.push(date);
    }
    dates
}
