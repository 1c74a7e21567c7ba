//! Contracts Finder adapter for United Kingdom public sector tenders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tendermesh_core::{Jurisdiction, Tender};
use tracing::info;

use crate::adapter::{FetchQuery, TenderProvider};
use crate::error::ProviderError;
use crate::normalize::{self, Seed};
use crate::ocds::{OcdsSearchResponse, OcdsSource};

const DEFAULT_BASE_URL: &str =
    "https://www.contractsfinder.service.gov.uk/Published/Notices/OCDS";
const SOURCE: &str = "UK Contracts Finder";
const SOURCE_URL: &str = "https://www.contractsfinder.service.gov.uk";

/// Buyer-name fragments mapped to UK regions.
const REGION_HINTS: &[(&str, &str)] = &[
    ("london", "London"),
    ("manchester", "North West"),
    ("birmingham", "West Midlands"),
    ("leeds", "Yorkshire"),
    ("edinburgh", "Scotland"),
    ("glasgow", "Scotland"),
    ("scotland", "Scotland"),
    ("cardiff", "Wales"),
    ("wales", "Wales"),
    ("belfast", "Northern Ireland"),
];
const DEFAULT_REGION: &str = "National";

pub struct UkProvider {
    client: reqwest::Client,
    base_url: String,
    ocds: OcdsSource,
}

impl UkProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ocds: OcdsSource {
                jurisdiction: Jurisdiction::Uk,
                id_prefix: "uk-",
                source: SOURCE,
                source_url: SOURCE_URL,
                region_hints: REGION_HINTS,
                default_region: DEFAULT_REGION,
                default_category: "Public Sector",
            },
        }
    }
}

impl Default for UkProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenderProvider for UkProvider {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Uk
    }

    async fn fetch_live(&self, query: &FetchQuery) -> Result<Vec<Tender>, ProviderError> {
        let url = format!("{}/Search", self.base_url);
        let limit = query.limit.to_string();
        let mut params = vec![("stages", "tender"), ("size", limit.as_str())];
        if let Some(keyword) = query.keyword.as_deref() {
            params.push(("keyword", keyword));
        }

        info!(url = %url, limit = query.limit, "fetching Contracts Finder notices");
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
        info!(count = tenders.len(), "normalised Contracts Finder notices");
        Ok(tenders)
    }

    fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender> {
        normalize::seed_batch(
            Jurisdiction::Uk,
            "UK Contracts Finder (fallback)",
            SOURCE_URL,
            FALLBACK,
            now,
        )
    }
}

const FALLBACK: &[Seed] = &[
    Seed {
        id: "uk-fb-001",
        title: "NHS Patient Records Platform Refresh",
        description: "Re-platforming of electronic patient records with cloud hosting and data migration.",
        region: "London",
        budget: Some(8_200_000.0),
        days_out: 40,
        category: "IT Services",
        requirements: &["Software Development", "Cloud Computing"],
    },
    Seed {
        id: "uk-fb-002",
        title: "Local Authority Cyber Resilience Programme",
        description: "Security assessment and managed detection for a consortium of councils.",
        region: "North West",
        budget: Some(1_900_000.0),
        days_out: 25,
        category: "Cybersecurity",
        requirements: &["Cybersecurity", "IT Consulting"],
    },
    Seed {
        id: "uk-fb-003",
        title: "Smart Ticketing Data Analytics",
        description: "Analytics over multi-operator ticketing data to improve service planning.",
        region: "Scotland",
        budget: Some(3_400_000.0),
        days_out: 55,
        category: "Data Services",
        requirements: &["Data Analytics", "Software Development"],
    },
    Seed {
        id: "uk-fb-004",
        title: "Schools Estate Condition Surveys",
        description: "Nationwide programme of building condition surveys and reporting.",
        region: "National",
        budget: None,
        days_out: 70,
        category: "Construction",
        requirements: &["Infrastructure", "Project Management"],
    },
];
