use tendermesh_core::{FilterError, UnknownJurisdiction};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("{0}")]
    UnsupportedJurisdiction(#[from] UnknownJurisdiction),
    #[error("{0}")]
    InvalidFilter(#[from] FilterError),
}
