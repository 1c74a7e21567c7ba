//! Deadline bucketing and horizon checks.
//!
//! Remaining time is counted in ceiling days: anything between 24 and 48
//! hours out is "2 days". Months are 30 days, years 365, both by integer
//! division, so a 30-day deadline reads "1 months" and the display layer
//! inherits that quirk from the buckets themselves.

use chrono::{DateTime, Duration, Utc};

/// Human-readable time remaining until `deadline`.
///
/// - past deadline → "Expired"
/// - exactly one ceiling day → "1 day"
/// - under 30 days → "{n} days" (including "0 days" when deadline == now)
/// - under 365 days → "{n/30} months"
/// - otherwise → "{n/365} years"
pub fn time_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = deadline - now;
    if remaining < Duration::zero() {
        return "Expired".to_string();
    }

    let days = ceil_days(remaining);
    if days == 1 {
        "1 day".to_string()
    } else if days < 30 {
        format!("{days} days")
    } else if days < 365 {
        format!("{} months", days / 30)
    } else {
        format!("{} years", days / 365)
    }
}

/// True when `deadline` is not past and falls within the next `days` days.
pub fn within_days(deadline: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    deadline >= now && deadline <= now + Duration::days(days)
}

fn ceil_days(remaining: Duration) -> i64 {
    let secs = remaining.num_seconds();
    secs / 86_400 + i64::from(secs % 86_400 > 0)
}
