//! OCDS release handling shared by the UK, Canada, and Australia adapters.
//!
//! All three portals publish Open Contracting Data Standard releases with
//! the same core shape; only endpoint, id prefix, and region hints differ.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tendermesh_core::tender::{Tender, TenderStatus};
use tendermesh_core::{Jurisdiction, keywords};

use crate::normalize;

#[derive(Debug, Deserialize)]
pub(crate) struct OcdsSearchResponse {
    #[serde(alias = "releases", default)]
    pub results: Vec<OcdsRelease>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OcdsRelease {
    #[serde(default)]
    pub ocid: Option<String>,
    #[serde(default)]
    pub tender: Option<OcdsTender>,
    #[serde(default)]
    pub buyer: Option<OcdsBuyer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OcdsTender {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub value: Option<OcdsValue>,
    #[serde(default)]
    pub tender_period: Option<OcdsPeriod>,
    #[serde(default)]
    pub classification: Option<OcdsClassification>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OcdsValue {
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OcdsPeriod {
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OcdsClassification {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OcdsBuyer {
    #[serde(default)]
    pub name: Option<String>,
}

/// Per-jurisdiction settings for turning OCDS releases into [`Tender`]s.
pub(crate) struct OcdsSource {
    pub jurisdiction: Jurisdiction,
    pub id_prefix: &'static str,
    pub source: &'static str,
    pub source_url: &'static str,
    pub region_hints: &'static [(&'static str, &'static str)],
    pub default_region: &'static str,
    pub default_category: &'static str,
}

impl OcdsSource {
    pub(crate) fn normalize_all(
        &self,
        response: OcdsSearchResponse,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Tender> {
        response
            .results
            .iter()
            .filter_map(|release| self.normalize(release, now))
            .take(limit)
            .collect()
    }

    /// Normalises one release. Skips records that are not in an active
    /// tender stage or carry no title or identifier.
    pub(crate) fn normalize(&self, release: &OcdsRelease, now: DateTime<Utc>) -> Option<Tender> {
        let tender = release.tender.as_ref()?;
        if tender
            .status
            .as_deref()
            .is_some_and(|s| !s.eq_ignore_ascii_case("active"))
        {
            return None;
        }
        let title = tender.title.as_deref()?.trim();
        if title.is_empty() {
            return None;
        }
        let raw_id = release.ocid.as_deref().or(tender.id.as_deref())?;

        let buyer = release
            .buyer
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or_default();
        let category = tender
            .classification
            .as_ref()
            .and_then(|c| c.description.as_deref())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(self.default_category)
            .to_string();
        let description = tender.description.clone().unwrap_or_default();
        let requirements = keywords::infer_requirements(&format!("{title} {description}"));

        Some(Tender {
            id: format!("{}{}", self.id_prefix, raw_id),
            title: title.to_string(),
            description,
            country: self.jurisdiction.country_code().to_string(),
            region: normalize::region_from_hints(buyer, self.region_hints, self.default_region),
            budget: normalize::positive_budget(tender.value.as_ref().and_then(|v| v.amount)),
            deadline: normalize::parse_deadline(
                tender
                    .tender_period
                    .as_ref()
                    .and_then(|p| p.end_date.as_deref()),
                now,
            ),
            category,
            requirements,
            status: TenderStatus::Open,
            source: self.source.to_string(),
            source_url: self.source_url.to_string(),
            similarity: 0.0,
            bids_count: 0,
            time_left: String::new(),
            fetched_at: None,
        })
    }
}
