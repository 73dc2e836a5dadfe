//! Month bucketer for user sign-up dates
//!
//! Buckets `created_at` timestamps into twelve calendar-month slots. The month
//! is taken in the configured zone (process-local by default). Records whose
//! timestamp does not parse are skipped and counted in `MonthBuckets::dropped`.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{DishhubError, MonthBuckets, Result, UserRecord};

/// Date-time layouts that carry their own offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Date-time layouts without an offset; read as wall-clock time in the bucketing zone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Which calendar decides a record's month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketZone {
    #[default]
    Local,
    Utc,
}

/// Parse a `created_at` value.
///
/// Accepts RFC 3339, offset-qualified date-times with a space separator,
/// naive date-times (interpreted in `tz`), and bare `YYYY-MM-DD` dates, which
/// are taken as UTC midnight the way browser date parsing treats them.
pub fn parse_created_at<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DishhubError::Timestamp(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            // A wall-clock time skipped by a DST jump has no instant
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| DishhubError::Timestamp(raw.to_string()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    Err(DishhubError::Timestamp(raw.to_string()))
}

/// Bucket users by sign-up month in the process-local time zone
pub fn bucket_by_month(records: &[UserRecord]) -> MonthBuckets {
    bucket_by_month_in(records, &Local)
}

/// Bucket users by sign-up month in the given zone
pub fn bucket_by_month_with(records: &[UserRecord], zone: BucketZone) -> MonthBuckets {
    match zone {
        BucketZone::Local => bucket_by_month_in(records, &Local),
        BucketZone::Utc => bucket_by_month_in(records, &Utc),
    }
}

/// Bucket users by sign-up month as observed in `tz`
pub fn bucket_by_month_in<Tz: TimeZone>(records: &[UserRecord], tz: &Tz) -> MonthBuckets {
    let mut buckets = MonthBuckets::default();

    for user in records {
        match parse_created_at(&user.created_at, tz) {
            Ok(instant) => {
                let month0 = instant.with_timezone(tz).month0() as usize;
                buckets.counts[month0] += 1;
            }
            Err(e) => {
                debug!(user_id = user.id, error = %e, "skipping user with bad created_at");
                buckets.dropped += 1;
            }
        }
    }

    if buckets.dropped > 0 {
        debug!(
            dropped = buckets.dropped,
            total = records.len(),
            "month bucketing dropped records"
        );
    }

    buckets
}
