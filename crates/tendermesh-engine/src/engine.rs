//! The aggregation engine.
//!
//! One engine owns the provider registry, the batch cache, and the clock.
//! Every read path goes through `fetch_all_tenders`, so search,
//! recommendations, and statistics all see the same cached cycle.

use std::cmp::Ordering;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tendermesh_core::stats::{self, TenderStats};
use tendermesh_core::{
    CompanyProfile, Jurisdiction, JurisdictionInfo, Recommendation, SearchFilters, Tender,
    UnknownJurisdiction, deadline, score,
};
use tendermesh_providers::{FetchQuery, ProviderRegistry, fetch_with_fallback};
use tracing::info;

use crate::cache::{TtlCache, cache_key};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Simulated bid counts land in this range.
const BIDS_RANGE: RangeInclusive<u32> = 3..=25;
/// Hard cap on scored recommendations.
const MAX_RECOMMENDATIONS: usize = 50;
/// Batch size returned for a profile without capabilities.
const UNSCORED_RECOMMENDATIONS: usize = 20;

pub struct TenderEngine {
    registry: ProviderRegistry,
    cache: TtlCache,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl TenderEngine {
    /// Engine over the default provider set and the system clock.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_parts(
            ProviderRegistry::with_default_providers(),
            Arc::new(SystemClock),
            config,
        )
    }

    /// Engine over an explicit registry and clock.
    pub fn with_parts(
        registry: ProviderRegistry,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        let cache = TtlCache::new(config.cache_ttl, Arc::clone(&clock));
        Self {
            registry,
            cache,
            clock,
            config,
        }
    }

    /// Aggregated tenders for the requested jurisdiction codes, best
    /// score first.
    ///
    /// Empty `codes` means every registered jurisdiction. Unknown or
    /// unregistered codes are rejected before any fetch runs.
    pub async fn fetch_all_tenders(&self, codes: &[String]) -> Result<Vec<Tender>, EngineError> {
        let jurisdictions = self.resolve(codes)?;
        let key = cache_key(&jurisdictions);
        if let Some(cached) = self.cache.get(&key) {
            info!(key = %key, count = cached.len(), "cache hit");
            return Ok(cached);
        }
        let batch = self.aggregate(&jurisdictions).await;
        self.cache.put(key, batch.clone());
        Ok(batch)
    }

    /// Free-text search over an aggregation, most relevant first.
    ///
    /// Filters are validated before any fetch. A blank query keeps the
    /// batch's aggregation scores; otherwise only matching tenders remain
    /// and each is rescored for the query.
    pub async fn search_tenders(
        &self,
        query: &str,
        codes: &[String],
        filters: &SearchFilters,
    ) -> Result<Vec<Tender>, EngineError> {
        filters.validate()?;
        let mut batch = self.fetch_all_tenders(codes).await?;

        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            batch.retain(|t| score::matches_query(t, &needle));
            for tender in batch.iter_mut() {
                tender.similarity = score::relevance_score(tender, &needle);
            }
        }
        batch.retain(|t| filters.matches(t));
        sort_batch(&mut batch);
        info!(query = %query, count = batch.len(), "search complete");
        Ok(batch)
    }

    /// Profile-ranked tenders with human-readable match reasons.
    ///
    /// A profile without capabilities gets the head of the aggregation
    /// unscored. Composites at or below the noise floor are dropped and at
    /// most fifty recommendations are returned, best match first.
    pub async fn get_recommendations(
        &self,
        profile: &CompanyProfile,
        codes: &[String],
    ) -> Result<Vec<Recommendation>, EngineError> {
        let batch = self.fetch_all_tenders(codes).await?;
        if profile.capabilities.is_empty() {
            return Ok(batch
                .into_iter()
                .take(UNSCORED_RECOMMENDATIONS)
                .map(|tender| Recommendation {
                    tender,
                    match_reasons: Vec::new(),
                })
                .collect());
        }

        let mut scored: Vec<(Tender, score::MatchScore)> = batch
            .into_iter()
            .map(|tender| {
                let match_score = score::match_score(&tender, profile);
                (tender, match_score)
            })
            .filter(|(_, s)| s.composite > score::RECOMMENDATION_FLOOR)
            .collect();
        scored.sort_by(|a, b| {
            b.1.composite
                .partial_cmp(&a.1.composite)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(MAX_RECOMMENDATIONS);

        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .map(|(mut tender, match_score)| {
                tender.similarity = match_score.composite;
                Recommendation {
                    tender,
                    match_reasons: score::match_reasons(&match_score),
                }
            })
            .collect();
        info!(count = recommendations.len(), "recommendations ready");
        Ok(recommendations)
    }

    /// Statistics over the aggregation for the given codes.
    pub async fn get_stats(&self, codes: &[String]) -> Result<TenderStats, EngineError> {
        let batch = self.fetch_all_tenders(codes).await?;
        Ok(stats::summarize(&batch, self.clock.now()))
    }

    /// Single-jurisdiction convenience wrapper.
    pub async fn get_tenders_by_country(&self, code: &str) -> Result<Vec<Tender>, EngineError> {
        self.fetch_all_tenders(&[code.to_string()]).await
    }

    /// Tenders whose region or country contains the location fragment,
    /// case-insensitively. Blank input returns the full aggregation.
    pub async fn get_tenders_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Tender>, EngineError> {
        let mut batch = self.fetch_all_tenders(&[]).await?;
        let needle = location.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(batch);
        }
        batch.retain(|t| {
            t.region.to_lowercase().contains(&needle) || t.country.to_lowercase().contains(&needle)
        });
        Ok(batch)
    }

    /// Registered jurisdictions with display names, in canonical order.
    pub fn supported_jurisdictions(&self) -> Vec<JurisdictionInfo> {
        self.registry.infos()
    }

    /// Drops every cached batch; the next read aggregates fresh.
    pub fn clear_cache(&self) {
        let dropped = self.cache.entry_count();
        self.cache.clear();
        info!(dropped, "cache cleared");
    }

    fn resolve(&self, codes: &[String]) -> Result<Vec<Jurisdiction>, EngineError> {
        if codes.is_empty() {
            return Ok(self.registry.jurisdictions());
        }
        let mut jurisdictions = Vec::with_capacity(codes.len());
        for code in codes {
            let jurisdiction: Jurisdiction = code.parse()?;
            if !self.registry.contains(jurisdiction) {
                return Err(UnknownJurisdiction(code.clone()).into());
            }
            if !jurisdictions.contains(&jurisdiction) {
                jurisdictions.push(jurisdiction);
            }
        }
        jurisdictions.sort();
        Ok(jurisdictions)
    }

    /// One aggregation cycle: parallel fan-out, fallback absorption,
    /// annotation, ranking.
    async fn aggregate(&self, jurisdictions: &[Jurisdiction]) -> Vec<Tender> {
        let now = self.clock.now();
        let query = FetchQuery {
            keyword: None,
            limit: self.config.fetch_limit,
        };
        let timeout = self.config.provider_timeout;

        let fetches = jurisdictions
            .iter()
            .filter_map(|j| self.registry.get(*j))
            .map(|provider| {
                let query = query.clone();
                async move { fetch_with_fallback(provider.as_ref(), &query, timeout, now).await }
            });
        let outcomes = join_all(fetches).await;

        let mut live_sources = 0;
        let mut batch = Vec::new();
        for outcome in outcomes {
            if outcome.live {
                live_sources += 1;
            }
            batch.extend(outcome.tenders);
        }
        self.annotate(&mut batch, now);
        sort_batch(&mut batch);
        info!(
            jurisdictions = jurisdictions.len(),
            live_sources,
            count = batch.len(),
            "aggregation cycle complete"
        );
        batch
    }

    /// Per-cycle annotations: base score, simulated bid count, human
    /// deadline, fetch timestamp. The RNG is reseeded each cycle so a
    /// fixed seed gives reproducible bid counts.
    fn annotate(&self, batch: &mut [Tender], now: DateTime<Utc>) {
        let mut rng = StdRng::seed_from_u64(self.config.bids_seed);
        for tender in batch.iter_mut() {
            tender.similarity = score::base_score(tender, now);
            tender.bids_count = rng.gen_range(BIDS_RANGE);
            tender.time_left = deadline::time_left(tender.deadline, now);
            tender.fetched_at = Some(now);
        }
    }
}

/// Score descending, deadline ascending on ties.
fn sort_batch(batch: &mut [Tender]) {
    batch.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.deadline.cmp(&b.deadline))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_clock::ManualClock;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use tendermesh_core::FilterError;
    use tendermesh_core::tender::TenderStatus;
    use tendermesh_providers::{ProviderError, TenderProvider};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn tender(id: &str, jurisdiction: Jurisdiction, deadline: DateTime<Utc>) -> Tender {
        Tender {
            id: id.into(),
            title: format!("Tender {id}"),
            description: "description".into(),
            country: jurisdiction.country_code().into(),
            region: "Test Region".into(),
            budget: Some(1_000_000.0),
            deadline,
            category: "Services".into(),
            requirements: vec!["General Services".into()],
            status: TenderStatus::Open,
            source: "test".into(),
            source_url: "https://example.test".into(),
            similarity: 0.0,
            bids_count: 0,
            time_left: String::new(),
            fetched_at: None,
        }
    }

    struct StaticProvider {
        jurisdiction: Jurisdiction,
        live: Vec<Tender>,
        fail_live: bool,
        live_calls: AtomicUsize,
    }

    impl StaticProvider {
        fn new(jurisdiction: Jurisdiction, live: Vec<Tender>) -> Self {
            Self {
                jurisdiction,
                live,
                fail_live: false,
                live_calls: AtomicUsize::new(0),
            }
        }

        fn failing(jurisdiction: Jurisdiction) -> Self {
            Self {
                jurisdiction,
                live: vec![],
                fail_live: true,
                live_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.live_calls.load(AtomicOrdering::SeqCst)
        }
    }

    #[async_trait]
    impl TenderProvider for StaticProvider {
        fn jurisdiction(&self) -> Jurisdiction {
            self.jurisdiction
        }

        async fn fetch_live(&self, _query: &FetchQuery) -> Result<Vec<Tender>, ProviderError> {
            self.live_calls.fetch_add(1, AtomicOrdering::SeqCst);
            if self.fail_live {
                return Err(ProviderError::Server {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(self.live.clone())
        }

        fn fallback_tenders(&self, now: DateTime<Utc>) -> Vec<Tender> {
            vec![tender(
                &format!("{}-fallback", self.jurisdiction.code()),
                self.jurisdiction,
                now + Duration::days(30),
            )]
        }
    }

    fn engine_with(providers: Vec<Arc<StaticProvider>>, clock: Arc<ManualClock>) -> TenderEngine {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.insert(provider);
        }
        TenderEngine::with_parts(registry, clock, EngineConfig::default().with_bids_seed(7))
    }

    fn two_provider_engine() -> (TenderEngine, Arc<StaticProvider>, Arc<StaticProvider>) {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![
                tender("us-1", Jurisdiction::Usa, start() + Duration::days(20)),
                tender("us-2", Jurisdiction::Usa, start() + Duration::days(200)),
            ],
        ));
        let uk = Arc::new(StaticProvider::new(
            Jurisdiction::Uk,
            vec![tender("uk-1", Jurisdiction::Uk, start() + Duration::days(40))],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![Arc::clone(&usa), Arc::clone(&uk)], clock);
        (engine, usa, uk)
    }

    #[tokio::test]
    async fn aggregation_annotates_every_tender() {
        let (engine, _usa, _uk) = two_provider_engine();
        let batch = engine.fetch_all_tenders(&[]).await.unwrap();
        assert_eq!(batch.len(), 3);
        for t in &batch {
            assert!((0.0..=1.0).contains(&t.similarity));
            assert!((3..=25).contains(&t.bids_count));
            assert!(!t.time_left.is_empty());
            assert_eq!(t.fetched_at, Some(start()));
        }
        // Scores are descending; ties break on the earlier deadline.
        for pair in batch.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
            if pair[0].similarity == pair[1].similarity {
                assert!(pair[0].deadline <= pair[1].deadline);
            }
        }
    }

    #[tokio::test]
    async fn repeat_requests_hit_the_cache() {
        let (engine, usa, uk) = two_provider_engine();
        let first = engine.fetch_all_tenders(&[]).await.unwrap();
        let second = engine.fetch_all_tenders(&[]).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(usa.calls(), 1);
        assert_eq!(uk.calls(), 1);
    }

    #[tokio::test]
    async fn cache_expires_after_ttl() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![tender("us-1", Jurisdiction::Usa, start() + Duration::days(20))],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![Arc::clone(&usa)], Arc::clone(&clock));

        engine.fetch_all_tenders(&[]).await.unwrap();
        clock.advance(Duration::minutes(31));
        engine.fetch_all_tenders(&[]).await.unwrap();
        assert_eq!(usa.calls(), 2);
    }

    #[tokio::test]
    async fn code_order_does_not_split_the_cache() {
        let (engine, usa, uk) = two_provider_engine();
        engine
            .fetch_all_tenders(&["uk".into(), "usa".into()])
            .await
            .unwrap();
        engine
            .fetch_all_tenders(&["usa".into(), "uk".into()])
            .await
            .unwrap();
        assert_eq!(usa.calls(), 1);
        assert_eq!(uk.calls(), 1);
    }

    #[tokio::test]
    async fn failed_provider_falls_back_without_touching_others() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![tender("us-1", Jurisdiction::Usa, start() + Duration::days(20))],
        ));
        let uk = Arc::new(StaticProvider::failing(Jurisdiction::Uk));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![Arc::clone(&usa), Arc::clone(&uk)], clock);

        let batch = engine.fetch_all_tenders(&[]).await.unwrap();
        let ids: Vec<&str> = batch.iter().map(|t| t.id.as_str()).collect();
        assert!(ids.contains(&"us-1"));
        assert!(ids.contains(&"uk-fallback"));
    }

    #[tokio::test]
    async fn search_boosts_title_matches() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![
                {
                    let mut t =
                        tender("us-road", Jurisdiction::Usa, start() + Duration::days(200));
                    t.title = "Road resurfacing programme".into();
                    t
                },
                {
                    let mut t =
                        tender("us-cloud", Jurisdiction::Usa, start() + Duration::days(200));
                    t.title = "Cloud migration services".into();
                    t
                },
            ],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let results = engine
            .search_tenders("cloud", &[], &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "us-cloud");
        // Base 0.5 + 0.2 tech keyword, then + 0.3 title hit.
        assert!((results[0].similarity - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn blank_query_keeps_aggregation_scores() {
        let (engine, _usa, _uk) = two_provider_engine();
        let plain = engine.fetch_all_tenders(&[]).await.unwrap();
        let searched = engine
            .search_tenders("   ", &[], &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(plain, searched);
    }

    #[tokio::test]
    async fn invalid_filters_are_rejected_before_any_fetch() {
        let (engine, usa, uk) = two_provider_engine();
        let filters = SearchFilters {
            min_budget: Some(900.0),
            max_budget: Some(100.0),
            ..SearchFilters::default()
        };
        let err = engine
            .search_tenders("cloud", &[], &filters)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidFilter(FilterError::InvertedRange {
                min: 900.0,
                max: 100.0
            })
        );
        assert_eq!(usa.calls(), 0);
        assert_eq!(uk.calls(), 0);
    }

    #[tokio::test]
    async fn budget_filter_excludes_undisclosed_budgets() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![
                tender("us-priced", Jurisdiction::Usa, start() + Duration::days(20)),
                {
                    let mut t = tender(
                        "us-undisclosed",
                        Jurisdiction::Usa,
                        start() + Duration::days(20),
                    );
                    t.budget = None;
                    t
                },
            ],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let filters = SearchFilters {
            min_budget: Some(1.0),
            ..SearchFilters::default()
        };
        let results = engine.search_tenders("", &[], &filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "us-priced");
    }

    #[tokio::test]
    async fn recommendations_rank_and_explain_matches() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![
                {
                    let mut t = tender("us-ai", Jurisdiction::Usa, start() + Duration::days(30));
                    t.requirements = vec!["AI/ML".into(), "Cloud Computing".into()];
                    t.budget = Some(2_000_000.0);
                    t
                },
                {
                    let mut t =
                        tender("us-paving", Jurisdiction::Usa, start() + Duration::days(30));
                    t.requirements = vec!["Paving".into()];
                    t
                },
            ],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let profile = CompanyProfile {
            capabilities: vec!["AI/ML".into(), "Cloud Computing".into()],
            countries: vec!["USA".into()],
            total_revenue: Some(10_000_000.0),
        };
        let recs = engine.get_recommendations(&profile, &[]).await.unwrap();
        assert_eq!(recs[0].tender.id, "us-ai");
        assert!(recs[0].tender.similarity >= 0.8);
        assert!(
            recs[0]
                .match_reasons
                .iter()
                .any(|r| r.contains("capability"))
        );
        // The weak match still clears the floor but ranks below.
        assert!(recs.iter().all(|r| r.tender.similarity > 0.1));
    }

    #[tokio::test]
    async fn recommendations_cap_at_fifty() {
        let many: Vec<Tender> = (0..60)
            .map(|i| tender(&format!("us-{i}"), Jurisdiction::Usa, start() + Duration::days(20)))
            .collect();
        let usa = Arc::new(StaticProvider::new(Jurisdiction::Usa, many));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let profile = CompanyProfile {
            capabilities: vec!["General Services".into()],
            countries: vec![],
            total_revenue: None,
        };
        let recs = engine.get_recommendations(&profile, &[]).await.unwrap();
        assert_eq!(recs.len(), 50);
    }

    #[tokio::test]
    async fn profile_without_capabilities_gets_unscored_head() {
        let many: Vec<Tender> = (0..30)
            .map(|i| tender(&format!("us-{i}"), Jurisdiction::Usa, start() + Duration::days(20)))
            .collect();
        let usa = Arc::new(StaticProvider::new(Jurisdiction::Usa, many));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let profile = CompanyProfile::default();
        let recs = engine.get_recommendations(&profile, &[]).await.unwrap();
        assert_eq!(recs.len(), 20);
        assert!(recs.iter().all(|r| r.match_reasons.is_empty()));
    }

    #[tokio::test]
    async fn stats_cover_the_aggregated_batch() {
        let (engine, _usa, _uk) = two_provider_engine();
        let stats = engine.get_stats(&[]).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_country["USA"], 2);
        assert_eq!(stats.by_country["UK"], 1);
        assert_eq!(stats.open_count, 3);
        assert_eq!(stats.with_budget, 3);
        assert!((stats.average_budget - 1_000_000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn stats_and_recommendations_narrow_to_requested_codes() {
        let (engine, usa, uk) = two_provider_engine();

        let stats = engine.get_stats(&["usa".into()]).await.unwrap();
        assert_eq!(stats.total, 2);
        assert!(!stats.by_country.contains_key("UK"));

        let profile = CompanyProfile {
            capabilities: vec!["General Services".into()],
            countries: vec![],
            total_revenue: None,
        };
        let recs = engine
            .get_recommendations(&profile, &["usa".into()])
            .await
            .unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.tender.country == "USA"));

        // Both operations resolve through the same cache entry.
        assert_eq!(usa.calls(), 1);
        assert_eq!(uk.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_code_is_rejected_before_any_fetch() {
        let (engine, usa, uk) = two_provider_engine();
        let err = engine
            .fetch_all_tenders(&["mars".into()])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedJurisdiction(UnknownJurisdiction("mars".into()))
        );
        assert_eq!(usa.calls(), 0);
        assert_eq!(uk.calls(), 0);
    }

    #[tokio::test]
    async fn valid_but_unregistered_code_is_rejected() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![tender("us-1", Jurisdiction::Usa, start() + Duration::days(20))],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![Arc::clone(&usa)], clock);

        let err = engine.fetch_all_tenders(&["uk".into()]).await.unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedJurisdiction(_)));
        assert_eq!(usa.calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_codes_collapse() {
        let (engine, usa, _uk) = two_provider_engine();
        let batch = engine
            .fetch_all_tenders(&["usa".into(), "USA".into(), "us".into()])
            .await
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(usa.calls(), 1);
    }

    #[tokio::test]
    async fn fixed_seed_reproduces_bid_counts() {
        let build = || {
            let usa = Arc::new(StaticProvider::new(
                Jurisdiction::Usa,
                vec![
                    tender("us-1", Jurisdiction::Usa, start() + Duration::days(20)),
                    tender("us-2", Jurisdiction::Usa, start() + Duration::days(40)),
                    tender("us-3", Jurisdiction::Usa, start() + Duration::days(60)),
                ],
            ));
            let clock = Arc::new(ManualClock::at(start()));
            engine_with(vec![usa], clock)
        };
        let first = build().fetch_all_tenders(&[]).await.unwrap();
        let second = build().fetch_all_tenders(&[]).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn clear_cache_refetch_is_identical_under_a_frozen_clock() {
        let (engine, usa, _uk) = two_provider_engine();
        let first = engine.fetch_all_tenders(&[]).await.unwrap();
        engine.clear_cache();
        let second = engine.fetch_all_tenders(&[]).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(usa.calls(), 2);
    }

    #[tokio::test]
    async fn location_lookup_matches_region_and_country() {
        let usa = Arc::new(StaticProvider::new(
            Jurisdiction::Usa,
            vec![
                {
                    let mut t = tender("us-va", Jurisdiction::Usa, start() + Duration::days(20));
                    t.region = "Virginia".into();
                    t
                },
                {
                    let mut t = tender("us-md", Jurisdiction::Usa, start() + Duration::days(20));
                    t.region = "Maryland".into();
                    t
                },
            ],
        ));
        let clock = Arc::new(ManualClock::at(start()));
        let engine = engine_with(vec![usa], clock);

        let by_region = engine.get_tenders_by_location("virginia").await.unwrap();
        assert_eq!(by_region.len(), 1);
        assert_eq!(by_region[0].id, "us-va");

        let by_country = engine.get_tenders_by_location("usa").await.unwrap();
        assert_eq!(by_country.len(), 2);

        let everything = engine.get_tenders_by_location("  ").await.unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[tokio::test]
    async fn by_country_fetches_a_single_jurisdiction() {
        let (engine, usa, uk) = two_provider_engine();
        let batch = engine.get_tenders_by_country("usa").await.unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|t| t.country == "USA"));
        assert_eq!(usa.calls(), 1);
        assert_eq!(uk.calls(), 0);
    }

    #[tokio::test]
    async fn supported_jurisdictions_reflect_the_registry() {
        let (engine, _usa, _uk) = two_provider_engine();
        let infos = engine.supported_jurisdictions();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].code, "usa");
        assert_eq!(infos[1].code, "uk");
    }
}
