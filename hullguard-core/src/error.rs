use chrono::{DateTime, Utc};
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(display("Invalid date range, start: '{start}', end: '{end}'"))]
pub struct DateRangeError {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
