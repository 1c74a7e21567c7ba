//! Scoring for aggregation, search relevance, and profile recommendations.
//!
//! Every score lands in [0, 1]. `base_score` is query-independent and set
//! once per refresh cycle; `relevance_score` builds on it during a search;
//! the recommendation composite replaces it when a profile ranking runs.

use chrono::{DateTime, Utc};

use crate::deadline::within_days;
use crate::keywords;
use crate::tender::{CompanyProfile, Tender};

/// Deadline horizon that earns the urgency bonus, in days.
const URGENCY_WINDOW_DAYS: i64 = 90;
/// Base bonus for a deadline inside the urgency window.
const URGENCY_BONUS: f64 = 0.2;
/// Base bonus for technology keywords in title/category/tags.
const TECH_BONUS: f64 = 0.2;

/// Relevance bonus when the query appears in the title.
const TITLE_BONUS: f64 = 0.3;
/// Relevance bonus per requirement tag containing the query.
const TAG_BONUS: f64 = 0.1;

/// Composite weights for recommendation ranking.
const CAPABILITY_WEIGHT: f64 = 0.5;
const BUDGET_WEIGHT: f64 = 0.3;
const LOCATION_WEIGHT: f64 = 0.2;

/// Sub-score thresholds above which a match reason is attached.
const CAPABILITY_REASON_THRESHOLD: f64 = 0.7;
const BUDGET_REASON_THRESHOLD: f64 = 0.8;
const LOCATION_REASON_THRESHOLD: f64 = 0.8;

/// Minimum composite score a recommendation must exceed.
pub const RECOMMENDATION_FLOOR: f64 = 0.1;

pub fn clamp01(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

// ── Base and relevance scoring ──

/// Query-independent base score assigned during aggregation.
///
/// Starts at 0.5; +0.2 for a deadline within the next 90 days (and not
/// already past); +0.2 for any technology keyword.
pub fn base_score(tender: &Tender, now: DateTime<Utc>) -> f64 {
    let mut score = 0.5;
    if within_days(tender.deadline, now, URGENCY_WINDOW_DAYS) {
        score += URGENCY_BONUS;
    }
    if keywords::has_tech_keyword(&tender.title, &tender.category, &tender.requirements) {
        score += TECH_BONUS;
    }
    clamp01(score)
}

/// Free-text match over title, description, category, region, and tags.
///
/// `query` must already be lowercased.
pub fn matches_query(tender: &Tender, query: &str) -> bool {
    tender.title.to_lowercase().contains(query)
        || tender.description.to_lowercase().contains(query)
        || tender.category.to_lowercase().contains(query)
        || tender.region.to_lowercase().contains(query)
        || tender
            .requirements
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

/// Query-specific relevance, built on the tender's current score.
///
/// `query` must already be lowercased. +0.3 for a title hit, +0.1 per
/// requirement tag containing the query, clamped to 1.0.
pub fn relevance_score(tender: &Tender, query: &str) -> f64 {
    let mut score = tender.similarity;
    if tender.title.to_lowercase().contains(query) {
        score += TITLE_BONUS;
    }
    let tag_hits = tender
        .requirements
        .iter()
        .filter(|tag| tag.to_lowercase().contains(query))
        .count();
    score += TAG_BONUS * tag_hits as f64;
    clamp01(score)
}

// ── Recommendation scoring ──

/// Sub-scores and composite for one tender against one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub capability: f64,
    pub budget: f64,
    pub location: f64,
    pub composite: f64,
}

/// Weighted profile match: 0.5 capability + 0.3 budget + 0.2 location.
pub fn match_score(tender: &Tender, profile: &CompanyProfile) -> MatchScore {
    let capability = capability_match(&tender.requirements, &profile.capabilities);
    let budget = budget_match(tender.budget, profile.total_revenue);
    let location = location_match(&tender.country, &profile.countries);
    let composite = clamp01(
        CAPABILITY_WEIGHT * capability + BUDGET_WEIGHT * budget + LOCATION_WEIGHT * location,
    );
    MatchScore {
        capability,
        budget,
        location,
        composite,
    }
}

/// Human-readable reasons for sub-scores over their thresholds, with a
/// generic fallback when none qualify.
pub fn match_reasons(score: &MatchScore) -> Vec<String> {
    let mut reasons = Vec::new();
    if score.capability > CAPABILITY_REASON_THRESHOLD {
        reasons.push("Strong capability match with tender requirements".to_string());
    }
    if score.budget > BUDGET_REASON_THRESHOLD {
        reasons.push("Contract size fits company revenue".to_string());
    }
    if score.location > LOCATION_REASON_THRESHOLD {
        reasons.push("Tender is in a target country".to_string());
    }
    if reasons.is_empty() {
        reasons.push("General market opportunity".to_string());
    }
    reasons
}

/// Share of requirement tags covered by the profile's capabilities.
///
/// A tag counts as covered when it and a capability contain each other
/// (case-insensitive, either direction), so "AI/ML" covers both the exact
/// tag and "AI/ML model training".
fn capability_match(requirements: &[String], capabilities: &[String]) -> f64 {
    let lowered: Vec<String> = capabilities.iter().map(|c| c.to_lowercase()).collect();
    let matched = requirements
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            lowered
                .iter()
                .any(|cap| tag.contains(cap.as_str()) || cap.contains(tag.as_str()))
        })
        .count();
    matched as f64 / requirements.len().max(1) as f64
}

/// Budget alignment against annual revenue.
///
/// The sweet spot is a contract worth 10-50% of revenue. Unknown budget or
/// revenue scores a neutral 0.5; non-positive revenue counts as unknown.
fn budget_match(budget: Option<f64>, revenue: Option<f64>) -> f64 {
    let (Some(budget), Some(revenue)) = (budget, revenue) else {
        return 0.5;
    };
    if revenue <= 0.0 {
        return 0.5;
    }
    let ratio = budget / revenue;
    if (0.1..=0.5).contains(&ratio) {
        1.0
    } else if ratio < 0.1 {
        0.8
    } else {
        0.6
    }
}

/// 1.0 for a profile country, 0.3 otherwise, 0.5 when no countries given.
fn location_match(country: &str, countries: &[String]) -> f64 {
    if countries.is_empty() {
        return 0.5;
    }
    if countries.iter().any(|c| c.eq_ignore_ascii_case(country)) {
        1.0
    } else {
        0.3
    }
}
