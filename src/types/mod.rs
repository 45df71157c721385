use thiserror::Error;

mod colors;
mod dates;
mod domain_types;
mod ids;
mod number;

pub use colors::*;
pub use dates::*;
pub use domain_types::*;
pub use ids::*;
pub use number::*;

/// Malformed builder input, raised locally before anything is serialized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Filter on property '{property}' expects a {expected} predicate, got {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Compound filter '{0}' needs at least one operand")]
    EmptyCompound(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Number must be finite, got {0}")]
    NonFiniteNumber(f64),

    #[error("Block type '{0}' cannot carry nested children")]
    ChildrenNotAccepted(String),
}
