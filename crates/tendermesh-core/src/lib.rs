pub mod deadline;
pub mod filters;
pub mod jurisdiction;
pub mod keywords;
pub mod score;
pub mod stats;
pub mod tender;

pub use filters::{FilterError, SearchFilters};
pub use jurisdiction::{Jurisdiction, JurisdictionInfo, UnknownJurisdiction};
pub use stats::TenderStats;
pub use tender::{CompanyProfile, Recommendation, Tender, TenderStatus};
