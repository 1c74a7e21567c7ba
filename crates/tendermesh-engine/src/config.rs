//! Engine tuning knobs.

use chrono::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long an aggregated batch stays fresh.
    pub cache_ttl: Duration,
    /// Budget for one provider's live fetch.
    pub provider_timeout: std::time::Duration,
    /// Seed for the simulated bid counts.
    pub bids_seed: u64,
    /// Maximum records requested from each provider.
    pub fetch_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::minutes(30),
            provider_timeout: std::time::Duration::from_secs(10),
            bids_seed: 0,
            fetch_limit: 50,
        }
    }
}

impl EngineConfig {
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_bids_seed(mut self, seed: u64) -> Self {
        self.bids_seed = seed;
        self
    }

    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }
}
