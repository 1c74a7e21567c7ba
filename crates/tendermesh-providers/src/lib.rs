//! Jurisdiction adapters for national procurement portals.
//!
//! Each adapter normalises its portal's response shape into the shared
//! tender record and carries a deterministic fallback batch so the engine
//! keeps serving data when a portal is down.

pub mod adapter;
pub mod australia;
pub mod canada;
mod error;
mod normalize;
mod ocds;
pub mod registry;
pub mod uk;
pub mod usa;

pub use adapter::{FetchOutcome, FetchQuery, TenderProvider, fetch_with_fallback};
pub use australia::AustraliaProvider;
pub use canada::CanadaProvider;
pub use error::ProviderError;
pub use registry::ProviderRegistry;
pub use uk::UkProvider;
pub use usa::UsaProvider;
