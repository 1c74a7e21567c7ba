//! Structured search filters applied after free-text matching.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tender::Tender;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("budget bound is not a number: {0:?}")]
    NotANumber(String),
    #[error("budget bound must be a non-negative finite number, got {0}")]
    InvalidBound(f64),
    #[error("minimum budget {min} exceeds maximum budget {max}")]
    InvertedRange { min: f64, max: f64 },
}

/// Optional constraints on a search. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl SearchFilters {
    /// Builds filters from raw query-string style inputs, validating the
    /// budget bounds.
    pub fn from_query(
        category: Option<String>,
        min_budget: Option<&str>,
        max_budget: Option<&str>,
        region: Option<String>,
        requirements: Vec<String>,
    ) -> Result<Self, FilterError> {
        let filters = Self {
            category,
            min_budget: parse_bound(min_budget)?,
            max_budget: parse_bound(max_budget)?,
            region,
            requirements,
        };
        filters.validate()?;
        Ok(filters)
    }

    /// Rejects non-finite or negative bounds and inverted ranges.
    pub fn validate(&self) -> Result<(), FilterError> {
        for bound in [self.min_budget, self.max_budget].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(FilterError::InvalidBound(bound));
            }
        }
        if let Some(min) = self.min_budget
            && let Some(max) = self.max_budget
            && min > max
        {
            return Err(FilterError::InvertedRange { min, max });
        }
        Ok(())
    }

    /// Whether a tender satisfies every present constraint.
    ///
    /// Budget bounds exclude tenders with no disclosed budget. Requirement
    /// filtering passes when any tag contains any wanted requirement,
    /// case-insensitively.
    pub fn matches(&self, tender: &Tender) -> bool {
        if let Some(category) = &self.category
            && !tender
                .category
                .to_lowercase()
                .contains(&category.to_lowercase())
        {
            return false;
        }
        if let Some(region) = &self.region
            && !tender.region.to_lowercase().contains(&region.to_lowercase())
        {
            return false;
        }
        if let Some(min) = self.min_budget
            && !tender.budget.is_some_and(|b| b >= min)
        {
            return false;
        }
        if let Some(max) = self.max_budget
            && !tender.budget.is_some_and(|b| b <= max)
        {
            return false;
        }
        if !self.requirements.is_empty() {
            let tags: Vec<String> = tender.requirements.iter().map(|t| t.to_lowercase()).collect();
            let hit = self.requirements.iter().any(|wanted| {
                let wanted = wanted.to_lowercase();
                tags.iter().any(|tag| tag.contains(&wanted))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<f64>, FilterError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FilterError::NotANumber(raw.to_string()))
}
