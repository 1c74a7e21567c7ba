//! Aggregate statistics over a tender batch.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::tender::{Tender, TenderStatus};

/// Number of entries kept in the top-categories and top-regions lists.
const TOP_N: usize = 10;
/// A tender counts as recent when its deadline is within this many days
/// before `now` or later.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Summary of a tender batch, built in one pass by [`summarize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenderStats {
    pub total: usize,
    pub by_country: HashMap<String, usize>,
    pub by_category: HashMap<String, usize>,
    pub by_region: HashMap<String, usize>,
    pub total_budget: f64,
    pub with_budget: usize,
    pub average_budget: f64,
    pub open_count: usize,
    pub recent_count: usize,
    pub top_categories: Vec<(String, usize)>,
    pub top_regions: Vec<(String, usize)>,
}

pub fn summarize(tenders: &[Tender], now: DateTime<Utc>) -> TenderStats {
    let mut stats = TenderStats {
        total: tenders.len(),
        ..TenderStats::default()
    };
    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

    for tender in tenders {
        *stats.by_country.entry(tender.country.clone()).or_default() += 1;
        *stats
            .by_category
            .entry(tender.category.clone())
            .or_default() += 1;
        *stats.by_region.entry(tender.region.clone()).or_default() += 1;

        if let Some(budget) = tender.budget {
            stats.total_budget += budget;
            stats.with_budget += 1;
        }
        if tender.status == TenderStatus::Open {
            stats.open_count += 1;
        }
        if tender.deadline >= recent_cutoff {
            stats.recent_count += 1;
        }
    }

    if stats.with_budget > 0 {
        stats.average_budget = stats.total_budget / stats.with_budget as f64;
    }
    stats.top_categories = top_n(&stats.by_category);
    stats.top_regions = top_n(&stats.by_region);
    stats
}

/// Top entries by count, name ascending on ties so output is stable.
fn top_n(counts: &HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> =
        counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_N);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn tender(
        id: &str,
        country: &str,
        region: &str,
        category: &str,
        budget: Option<f64>,
        days_out: i64,
        status: TenderStatus,
    ) -> Tender {
        Tender {
            id: id.into(),
            title: "title".into(),
            description: "description".into(),
            country: country.into(),
            region: region.into(),
            budget,
            deadline: now() + Duration::days(days_out),
            category: category.into(),
            requirements: vec![],
            status,
            source: "test".into(),
            source_url: "https://example.test".into(),
            similarity: 0.0,
            bids_count: 0,
            time_left: String::new(),
            fetched_at: None,
        }
    }

    fn batch() -> Vec<Tender> {
        vec![
            tender("a", "USA", "Virginia", "IT Services", Some(1_000_000.0), 10, TenderStatus::Open),
            tender("b", "USA", "Virginia", "IT Services", Some(3_000_000.0), 40, TenderStatus::Open),
            tender("c", "UK", "London", "Construction", None, -10, TenderStatus::Open),
            tender("d", "CANADA", "Ontario", "IT Services", Some(2_000_000.0), -60, TenderStatus::Closed),
        ]
    }

    #[test]
    fn summarize_counts_and_budgets() {
        let stats = summarize(&batch(), now());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_country["USA"], 2);
        assert_eq!(stats.by_country["UK"], 1);
        assert_eq!(stats.by_region["Virginia"], 2);
        assert_eq!(stats.with_budget, 3);
        assert!((stats.total_budget - 6_000_000.0).abs() < f64::EPSILON);
        assert!((stats.average_budget - 2_000_000.0).abs() < f64::EPSILON);
        assert_eq!(stats.open_count, 3);
    }

    #[test]
    fn recent_window_includes_future_and_last_thirty_days() {
        // "c" expired 10 days ago (inside the window); "d" 60 days ago is out.
        let stats = summarize(&batch(), now());
        assert_eq!(stats.recent_count, 3);
    }

    #[test]
    fn top_lists_break_ties_by_name() {
        let stats = summarize(&batch(), now());
        assert_eq!(stats.top_categories[0], ("IT Services".to_string(), 3));
        assert_eq!(stats.top_categories[1], ("Construction".to_string(), 1));
        assert_eq!(
            stats.top_regions,
            vec![
                ("Virginia".to_string(), 2),
                ("London".to_string(), 1),
                ("Ontario".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_batch_is_all_zeroes() {
        let stats = summarize(&[], now());
        assert_eq!(stats, TenderStats::default());
    }

    #[test]
    fn average_budget_stays_zero_without_budgets() {
        let batch = vec![tender("a", "UK", "London", "Construction", None, 10, TenderStatus::Open)];
        let stats = summarize(&batch, now());
        assert_eq!(stats.with_budget, 0);
        assert_eq!(stats.average_budget, 0.0);
    }
}
