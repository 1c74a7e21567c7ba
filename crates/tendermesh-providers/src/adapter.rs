//! Polymorphic provider contract and the shared fallback wrapper.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tendermesh_core::{Jurisdiction, Tender};
use tracing::{info, warn};

use crate::error::ProviderError;

/// Provider-level fetch parameters forwarded to the live portal call.
#[derive(Debug, Clone)]
pub struct FetchQuery {
    pub keyword: Option<String>,
    pub limit: usize,
}

impl Default for FetchQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            limit: 50,
        }
    }
}

/// One national procurement source.
#[async_trait]
pub trait TenderProvider: Send + Sync {
    fn jurisdiction(&self) -> Jurisdiction;

    /// Live fetch against the national portal, already normalised.
    async fn fetch_live(&self, query: &FetchQuery) -> Result<Vec<Tender>, ProviderError>;

    /// Deterministic canned batch with deadlines relative to `now`.
    fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender>;
}

/// Result of one provider fetch, flagged with data provenance.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub tenders: Vec<Tender>,
    pub live: bool,
}

/// Fetches from the live portal, bounded by `timeout`, substituting the
/// provider's fallback batch on error, timeout, or an empty result.
///
/// Provider failure never propagates past this point; one broken portal
/// must not take down an aggregation cycle.
pub async fn fetch_with_fallback(
    provider: &dyn TenderProvider,
    query: &FetchQuery,
    timeout: Duration,
    now: DateTime<Utc>,
) -> FetchOutcome {
    let jurisdiction = provider.jurisdiction();
    match tokio::time::timeout(timeout, provider.fetch_live(query)).await {
        Ok(Ok(tenders)) if !tenders.is_empty() => {
            info!(jurisdiction = %jurisdiction, count = tenders.len(), "live fetch succeeded");
            FetchOutcome {
                tenders,
                live: true,
            }
        }
        Ok(Ok(_)) => {
            warn!(jurisdiction = %jurisdiction, "live fetch returned no tenders; using fallback data");
            FetchOutcome {
                tenders: provider.fallback_tenders(now),
                live: false,
            }
        }
        Ok(Err(error)) => {
            warn!(jurisdiction = %jurisdiction, error = %error, "live fetch failed; using fallback data");
            FetchOutcome {
                tenders: provider.fallback_tenders(now),
                live: false,
            }
        }
        Err(_) => {
            let error = ProviderError::Timeout {
                secs: timeout.as_secs(),
            };
            warn!(jurisdiction = %jurisdiction, error = %error, "live fetch timed out; using fallback data");
            FetchOutcome {
                tenders: provider.fallback_tenders(now),
                live: false,
            }
        }
    }
}
