//! Shared normalisation helpers for the jurisdiction adapters.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tendermesh_core::Jurisdiction;
use tendermesh_core::tender::{Tender, TenderStatus};

/// Deadline assumed when a record carries none, in days from now.
const DEFAULT_DEADLINE_DAYS: i64 = 30;

/// Parses a portal deadline, accepting RFC 3339 or a bare date.
///
/// Bare dates get an end-of-day time. Missing or unparseable deadlines
/// default to thirty days out so the record stays visible and sortable.
pub(crate) fn parse_deadline(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return now + Duration::days(DEFAULT_DEADLINE_DAYS);
    };
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(end_of_day) = date.and_hms_opt(23, 59, 59)
    {
        return Utc.from_utc_datetime(&end_of_day);
    }
    now + Duration::days(DEFAULT_DEADLINE_DAYS)
}

/// Keeps only finite positive amounts; portals use 0 or omit the field
/// for undisclosed budgets.
pub(crate) fn positive_budget(raw: Option<f64>) -> Option<f64> {
    raw.filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Parses a money string, tolerating currency symbols and separators.
pub(crate) fn parse_money(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        return None;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Looks up a region from fragments of the buyer or agency name.
pub(crate) fn region_from_hints(text: &str, hints: &[(&str, &str)], default: &str) -> String {
    let lowered = text.to_lowercase();
    for (needle, region) in hints {
        if lowered.contains(needle) {
            return (*region).to_string();
        }
    }
    default.to_string()
}

/// One canned fallback record, deadline expressed relative to `now`.
pub(crate) struct Seed {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub region: &'static str,
    pub budget: Option<f64>,
    pub days_out: i64,
    pub category: &'static str,
    pub requirements: &'static [&'static str],
}

/// Materialises a fallback batch for one jurisdiction.
pub(crate) fn seed_batch(
    jurisdiction: Jurisdiction,
    source: &str,
    source_url: &str,
    seeds: &[Seed],
    now: DateTime<Utc>,
) -> Vec<Tender> {
    seeds
        .iter()
        .map(|seed| Tender {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            country: jurisdiction.country_code().to_string(),
            region: seed.region.to_string(),
            budget: seed.budget,
            deadline: now + Duration::days(seed.days_out),
            category: seed.category.to_string(),
            requirements: seed.requirements.iter().map(|r| r.to_string()).collect(),
            status: TenderStatus::Open,
            source: source.to_string(),
            source_url: source_url.to_string(),
            similarity: 0.0,
            bids_count: 0,
            time_left: String::new(),
            fetched_at: None,
        })
        .collect()
}
