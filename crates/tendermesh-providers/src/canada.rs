//! CanadaBuys adapter for Canadian federal and provincial tenders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tendermesh_core::{Jurisdiction, Tender};
use tracing::info;

use crate::adapter::{FetchQuery, TenderProvider};
use crate::error::ProviderError;
use crate::normalize::{self, Seed};
use crate::ocds::{OcdsSearchResponse, OcdsSource};

const DEFAULT_BASE_URL: &str = "https://canadabuys.canada.ca/opendata/api";
const SOURCE: &str = "CanadaBuys";
const SOURCE_URL: &str = "https://canadabuys.canada.ca";

/// Buyer-name fragments mapped to provinces.
const REGION_HINTS: &[(&str, &str)] = &[
    ("ottawa", "Ontario"),
    ("toronto", "Ontario"),
    ("ontario", "Ontario"),
    ("montreal", "Quebec"),
    ("quebec", "Quebec"),
    ("vancouver", "British Columbia"),
    ("british columbia", "British Columbia"),
    ("calgary", "Alberta"),
    ("edmonton", "Alberta"),
    ("alberta", "Alberta"),
];
const DEFAULT_REGION: &str = "Federal";

pub struct CanadaProvider {
    client: reqwest::Client,
    base_url: String,
    ocds: OcdsSource,
}

impl CanadaProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ocds: OcdsSource {
                jurisdiction: Jurisdiction::Canada,
                id_prefix: "ca-",
                source: SOURCE,
                source_url: SOURCE_URL,
                region_hints: REGION_HINTS,
                default_region: DEFAULT_REGION,
                default_category: "Government Services",
            },
        }
    }
}

impl Default for CanadaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenderProvider for CanadaProvider {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Canada
    }

    async fn fetch_live(&self, query: &FetchQuery) -> Result<Vec<Tender>, ProviderError> {
        let url = format!("{}/tenders", self.base_url);
        let limit = query.limit.to_string();
        let mut params = vec![("status", "active"), ("limit", limit.as_str())];
        if let Some(keyword) = query.keyword.as_deref() {
            params.push(("keyword", keyword));
        }

        info!(url = %url, limit = query.limit, "fetching CanadaBuys tenders");
        let resp = self.client.get(&url).query(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OcdsSearchResponse = resp.json().await?;
        let tenders = self.ocds.normalize_all(parsed, query.limit, Utc::now());
        info!(count = tenders.len(), "normalised CanadaBuys tenders");
        Ok(tenders)
    }

    fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender> {
        normalize::seed_batch(
            Jurisdiction::Canada,
            "CanadaBuys (fallback)",
            SOURCE_URL,
            FALLBACK,
            now,
        )
    }
}

const FALLBACK: &[Seed] = &[
    Seed {
        id: "ca-fb-001",
        title: "Digital Identity Verification Platform",
        description: "Build and operate a digital identity verification service for benefit programs.",
        region: "Ontario",
        budget: Some(9_600_000.0),
        days_out: 50,
        category: "IT Services",
        requirements: &["Software Development", "Cybersecurity"],
    },
    Seed {
        id: "ca-fb-002",
        title: "Provincial Health Data Warehouse",
        description: "Consolidated health analytics warehouse with governed database access.",
        region: "Quebec",
        budget: Some(6_100_000.0),
        days_out: 35,
        category: "Data Services",
        requirements: &["Data Analytics", "Cloud Computing"],
    },
    Seed {
        id: "ca-fb-003",
        title: "Wildfire Monitoring Automation",
        description: "Machine learning pipeline for early wildfire detection from satellite feeds.",
        region: "British Columbia",
        budget: Some(2_750_000.0),
        days_out: 20,
        category: "IT Services",
        requirements: &["AI/ML", "Infrastructure"],
    },
    Seed {
        id: "ca-fb-004",
        title: "Northern Broadband Expansion Advisory",
        description: "Advisory services for broadband network expansion into remote communities.",
        region: "Federal",
        budget: None,
        days_out: 65,
        category: "Management Consulting",
        requirements: &["IT Consulting", "Infrastructure"],
    },
];
