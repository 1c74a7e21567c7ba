//! SAM.gov opportunities adapter for United States federal tenders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tendermesh_core::tender::{Tender, TenderStatus};
use tendermesh_core::{Jurisdiction, keywords};
use tracing::info;

use crate::adapter::{FetchQuery, TenderProvider};
use crate::error::ProviderError;
use crate::normalize::{self, Seed};

const DEFAULT_BASE_URL: &str = "https://api.sam.gov/opportunities/v2";
const API_KEY_VAR: &str = "SAM_API_KEY";
const SOURCE: &str = "SAM.gov";
const SOURCE_URL: &str = "https://sam.gov";

/// Agency-name fragments mapped to the agency's home state.
const REGION_HINTS: &[(&str, &str)] = &[
    ("defense", "Virginia"),
    ("army", "Virginia"),
    ("navy", "Virginia"),
    ("veterans", "Washington DC"),
    ("homeland", "Washington DC"),
    ("energy", "Washington DC"),
    ("general services", "Washington DC"),
    ("health", "Maryland"),
    ("interior", "Colorado"),
];
const DEFAULT_REGION: &str = "Federal";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SamResponse {
    #[serde(default)]
    opportunities_data: Vec<SamOpportunity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SamOpportunity {
    #[serde(default)]
    notice_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    full_parent_path_name: Option<String>,
    #[serde(default)]
    response_dead_line: Option<String>,
    #[serde(default)]
    naics_code: Option<String>,
    #[serde(default)]
    ui_link: Option<String>,
    #[serde(default)]
    active: Option<String>,
    #[serde(default)]
    award: Option<SamAward>,
}

#[derive(Debug, Deserialize)]
struct SamAward {
    #[serde(default)]
    amount: Option<String>,
}

/// SAM.gov requires an API key; without one every live fetch fails fast
/// and the engine falls back to the canned batch.
pub struct UsaProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UsaProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    /// Reads `SAM_API_KEY` from the environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_VAR).ok())
    }

    pub fn with_base_url(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TenderProvider for UsaProvider {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Usa
    }

    async fn fetch_live(&self, query: &FetchQuery) -> Result<Vec<Tender>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredentials(API_KEY_VAR));
        };
        let url = format!("{}/search", self.base_url);
        let limit = query.limit.to_string();
        let mut params = vec![
            ("api_key", api_key),
            ("ptype", "o"),
            ("limit", limit.as_str()),
        ];
        if let Some(keyword) = query.keyword.as_deref() {
            params.push(("title", keyword));
        }

        info!(url = %url, limit = query.limit, "fetching SAM.gov opportunities");
        let resp = self.client.get(&url).query(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SamResponse = resp.json().await?;
        let now = Utc::now();
        let tenders: Vec<Tender> = parsed
            .opportunities_data
            .iter()
            .filter_map(|opp| normalize_opportunity(opp, now))
            .take(query.limit)
            .collect();
        info!(count = tenders.len(), "normalised SAM.gov opportunities");
        Ok(tenders)
    }

    fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender> {
        normalize::seed_batch(
            Jurisdiction::Usa,
            "SAM.gov (fallback)",
            SOURCE_URL,
            FALLBACK,
            now,
        )
    }
}

fn normalize_opportunity(opp: &SamOpportunity, now: DateTime<Utc>) -> Option<Tender> {
    if opp
        .active
        .as_deref()
        .is_some_and(|a| a.eq_ignore_ascii_case("no"))
    {
        return None;
    }
    let title = opp.title.as_deref()?.trim();
    if title.is_empty() {
        return None;
    }
    let notice_id = opp.notice_id.as_deref()?;

    let agency = opp.full_parent_path_name.as_deref().unwrap_or_default();
    let description = opp.description.clone().unwrap_or_default();
    let budget = normalize::positive_budget(
        opp.award
            .as_ref()
            .and_then(|a| a.amount.as_deref())
            .and_then(normalize::parse_money),
    );

    Some(Tender {
        id: format!("us-{notice_id}"),
        title: title.to_string(),
        description: description.clone(),
        country: Jurisdiction::Usa.country_code().to_string(),
        region: normalize::region_from_hints(agency, REGION_HINTS, DEFAULT_REGION),
        budget,
        deadline: normalize::parse_deadline(opp.response_dead_line.as_deref(), now),
        category: category_from_naics(opp.naics_code.as_deref()),
        requirements: keywords::infer_requirements(&format!("{title} {description}")),
        status: TenderStatus::Open,
        source: SOURCE.to_string(),
        source_url: opp.ui_link.clone().unwrap_or_else(|| SOURCE_URL.to_string()),
        similarity: 0.0,
        bids_count: 0,
        time_left: String::new(),
        fetched_at: None,
    })
}

/// Coarse category from the NAICS code prefix.
fn category_from_naics(code: Option<&str>) -> String {
    let Some(code) = code else {
        return "Government Procurement".to_string();
    };
    let category = if code.starts_with("5415") {
        "IT Services"
    } else if code.starts_with("5416") {
        "Management Consulting"
    } else if code.starts_with("54") {
        "Professional Services"
    } else if code.starts_with("23") {
        "Construction"
    } else if code.starts_with("33") {
        "Manufacturing"
    } else {
        "Government Procurement"
    };
    category.to_string()
}

const FALLBACK: &[Seed] = &[
    Seed {
        id: "us-fb-001",
        title: "Cloud Infrastructure Modernization for Federal Agencies",
        description: "Migration of legacy federal systems to FedRAMP-authorized cloud infrastructure with managed security operations.",
        region: "Washington DC",
        budget: Some(12_500_000.0),
        days_out: 45,
        category: "IT Services",
        requirements: &["Cloud Computing", "Cybersecurity"],
    },
    Seed {
        id: "us-fb-002",
        title: "AI-Assisted Claims Processing Pilot",
        description: "Machine learning pilot to triage benefits claims and route casework to the right adjudicators.",
        region: "Maryland",
        budget: Some(4_800_000.0),
        days_out: 30,
        category: "IT Services",
        requirements: &["AI/ML", "Data Analytics"],
    },
    Seed {
        id: "us-fb-003",
        title: "Base Perimeter Security Upgrade",
        description: "Design and installation of intrusion detection and access control across three installations.",
        region: "Virginia",
        budget: Some(22_000_000.0),
        days_out: 75,
        category: "Construction",
        requirements: &["Infrastructure", "Cybersecurity"],
    },
    Seed {
        id: "us-fb-004",
        title: "Program Management Support Services",
        description: "Programme delivery and advisory support for a multi-year modernization portfolio.",
        region: "Federal",
        budget: None,
        days_out: 60,
        category: "Management Consulting",
        requirements: &["Project Management", "IT Consulting"],
    },
];
