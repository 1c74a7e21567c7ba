//! Normalized tender records shared between providers and the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a tender listing.
///
/// Live aggregation only ever produces `Open` records; the other states
/// exist for callers that feed historical data back through the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenderStatus {
    Open,
    Closed,
    Awarded,
    Cancelled,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Awarded => "awarded",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A normalized procurement tender.
///
/// Providers emit the canonical fields; the aggregation engine fills the
/// annotation fields (`similarity`, `bids_count`, `time_left`, `fetched_at`)
/// once per refresh cycle. `id` is unique within one aggregated batch only;
/// there is no identity across refresh cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Uppercase canonical jurisdiction code ("USA", "UK", ...).
    pub country: String,
    /// State/province label, or a jurisdiction default like "National".
    pub region: String,
    /// Estimated contract value; `None` when the source does not disclose it.
    pub budget: Option<f64>,
    /// May be in the past; callers must check.
    pub deadline: DateTime<Utc>,
    pub category: String,
    /// Skill/requirement tags; order carries no meaning.
    pub requirements: Vec<String>,
    pub status: TenderStatus,
    pub source: String,
    pub source_url: String,
    /// Score in [0, 1]. Base popularity after aggregation, query relevance
    /// after a search, composite profile match after a recommendation pass.
    #[serde(default)]
    pub similarity: f64,
    /// Synthetic competitive-pressure indicator.
    #[serde(default)]
    pub bids_count: u32,
    /// Human-readable bucket derived from `deadline`.
    #[serde(default)]
    pub time_left: String,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Capability/location/revenue profile supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
}

/// A tender recommended for a profile, with the reasons it matched.
///
/// The wrapped tender's `similarity` carries the composite match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub tender: Tender,
    pub match_reasons: Vec<String>,
}
