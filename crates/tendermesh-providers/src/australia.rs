//! AusTender adapter for Australian government tenders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tendermesh_core::{Jurisdiction, Tender};
use tracing::info;

use crate::adapter::{FetchQuery, TenderProvider};
use crate::error::ProviderError;
use crate::normalize::{self, Seed};
use crate::ocds::{OcdsSearchResponse, OcdsSource};

const DEFAULT_BASE_URL: &str = "https://api.tenders.gov.au/ocds";
const SOURCE: &str = "AusTender";
const SOURCE_URL: &str = "https://www.tenders.gov.au";

/// Buyer-name fragments mapped to states and territories.
const REGION_HINTS: &[(&str, &str)] = &[
    ("sydney", "New South Wales"),
    ("new south wales", "New South Wales"),
    ("melbourne", "Victoria"),
    ("victoria", "Victoria"),
    ("brisbane", "Queensland"),
    ("queensland", "Queensland"),
    ("perth", "Western Australia"),
    ("western australia", "Western Australia"),
    ("canberra", "Australian Capital Territory"),
    ("act", "Australian Capital Territory"),
];
const DEFAULT_REGION: &str = "National";

pub struct AustraliaProvider {
    client: reqwest::Client,
    base_url: String,
    ocds: OcdsSource,
}

impl AustraliaProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ocds: OcdsSource {
                jurisdiction: Jurisdiction::Australia,
                id_prefix: "au-",
                source: SOURCE,
                source_url: SOURCE_URL,
                region_hints: REGION_HINTS,
                default_region: DEFAULT_REGION,
                default_category: "Government Services",
            },
        }
    }
}

impl Default for AustraliaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenderProvider for AustraliaProvider {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Australia
    }

    async fn fetch_live(&self, query: &FetchQuery) -> Result<Vec<Tender>, ProviderError> {
        let url = format!("{}/findByDates/contractPublished", self.base_url);
        let limit = query.limit.to_string();
        let mut params = vec![("status", "active"), ("limit", limit.as_str())];
        if let Some(keyword) = query.keyword.as_deref() {
            params.push(("keyword", keyword));
        }

        info!(url = %url, limit = query.limit, "fetching AusTender releases");
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
        info!(count = tenders.len(), "normalised AusTender releases");
        Ok(tenders)
    }

    fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender> {
        normalize::seed_batch(
            Jurisdiction::Australia,
            "AusTender (fallback)",
            SOURCE_URL,
            FALLBACK,
            now,
        )
    }
}

const FALLBACK: &[Seed] = &[
    Seed {
        id: "au-fb-001",
        title: "Whole-of-Government Cloud Marketplace Refresh",
        description: "Panel refresh for cloud hosting and platform services across agencies.",
        region: "Australian Capital Territory",
        budget: Some(15_000_000.0),
        days_out: 60,
        category: "IT Services",
        requirements: &["Cloud Computing", "IT Consulting"],
    },
    Seed {
        id: "au-fb-002",
        title: "Ports Logistics Analytics Platform",
        description: "Data analytics platform for container movement and berth scheduling.",
        region: "New South Wales",
        budget: Some(5_400_000.0),
        days_out: 28,
        category: "Data Services",
        requirements: &["Data Analytics", "Software Development"],
    },
    Seed {
        id: "au-fb-003",
        title: "Regional Hospitals Network Security Uplift",
        description: "Security uplift and managed detection across regional hospital networks.",
        region: "Queensland",
        budget: Some(3_900_000.0),
        days_out: 42,
        category: "Cybersecurity",
        requirements: &["Cybersecurity", "Infrastructure"],
    },
    Seed {
        id: "au-fb-004",
        title: "Census Field Operations Support",
        description: "Field workforce scheduling and delivery support for the national census.",
        region: "National",
        budget: None,
        days_out: 85,
        category: "Professional Services",
        requirements: &["Project Management"],
    },
];
