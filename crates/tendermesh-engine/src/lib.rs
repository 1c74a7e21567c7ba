//! Tender aggregation engine: cached parallel fetch across jurisdictions,
//! free-text search, profile recommendations, and batch statistics.

mod error;

pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;

pub use cache::TtlCache;
pub use clock::{Clock, SystemClock};
pub use config::EngineConfig;
pub use engine::TenderEngine;
pub use error::EngineError;
