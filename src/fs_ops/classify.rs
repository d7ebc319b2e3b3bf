//! Bucket classification.
//! Maps a modification timestamp onto a `<year>/<month name>` bucket using the
//! proleptic Gregorian calendar and English month names.

use chrono::{DateTime, Datelike, Local, Month, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Which clock a timestamp is read in before picking its year and month.
///
/// UTC is the default so that a tree classifies identically on every host; a
/// file modified at 23:30 local time on 31 December may land in the next year's
/// January bucket under UTC. `Local` reproduces the host-timezone behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZonePolicy {
    #[default]
    Utc,
    Local,
}

impl TimeZonePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" | "gmt" | "z" => Some(TimeZonePolicy::Utc),
            "local" | "host" => Some(TimeZonePolicy::Local),
            _ => None,
        }
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeZonePolicy::Utc => "utc",
            TimeZonePolicy::Local => "local",
        })
    }
}

impl FromStr for TimeZonePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid timezone policy: '{s}' (expected utc or local)"))
    }
}

/// A `<year>/<month>` destination folder pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    /// Four-digit calendar year, e.g. "2021".
    pub year: String,
    /// Full English month name, e.g. "July".
    pub month: String,
}

impl Bucket {
    /// `year/month` relative to a destination root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.year).join(&self.month)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Classify a modification time into its bucket.
///
/// Total over every `SystemTime`: instants beyond chrono's calendar range
/// (filesystems with 64-bit timestamps can store them) are bucketed with plain
/// day arithmetic in UTC.
pub fn classify(modified: SystemTime, tz: TimeZonePolicy) -> Bucket {
    let (secs, nanos) = unix_parts(modified);
    let utc = DateTime::<Utc>::from_timestamp(secs, nanos).map(|d| d.naive_utc());
    let date = match (tz, utc) {
        (TimeZonePolicy::Utc, Some(naive)) => Some(naive),
        (TimeZonePolicy::Local, Some(naive)) => to_local(naive),
        (_, None) => None,
    };
    match date {
        Some(d) => bucket_for(&d),
        None => civil_bucket(secs),
    }
}

fn to_local(utc: NaiveDateTime) -> Option<NaiveDateTime> {
    let offset = Local.offset_from_utc_datetime(&utc).fix().local_minus_utc();
    utc.checked_add_signed(TimeDelta::seconds(i64::from(offset)))
}

/// Whole seconds (floored) and nanoseconds relative to the Unix epoch.
fn unix_parts(t: SystemTime) -> (i64, u32) {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).unwrap_or(i64::MAX), d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).map(|s| -s).unwrap_or(i64::MIN);
            match d.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.saturating_sub(1), 1_000_000_000 - n),
            }
        }
    }
}

/// Proleptic Gregorian year and month for `secs` past the epoch, in i64 only.
fn civil_from_secs(secs: i64) -> (i64, u32) {
    let days = secs.div_euclid(86_400);
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u32)
}

fn civil_bucket(secs: i64) -> Bucket {
    let (year, month) = civil_from_secs(secs);
    make_bucket(year, month)
}

fn bucket_for<D: Datelike>(date: &D) -> Bucket {
    make_bucket(i64::from(date.year()), date.month())
}

fn make_bucket(year: i64, month: u32) -> Bucket {
    // month is always 1..=12
    let month = Month::try_from(month as u8).unwrap_or(Month::January);
    Bucket {
        year: format!("{:04}", year),
        month: month.name().to_string(),
    }
}
