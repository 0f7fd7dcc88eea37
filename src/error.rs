//! Error type shared by the operator catalog and the face locator.
//!
//! Every failure is local to the call that produced it: the catalog and any
//! previously returned image stay untouched.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VisionError {
    /// Empty image, inconsistent buffer, or unsupported channel count.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// Requested operator name is not registered in the catalog.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    /// Cascade artifact missing, unreadable, or not attached to the catalog.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),
    /// Operator parameters outside their supported range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, VisionError>;
