//! # Error Taxonomy
//!
//! Every validation and lookup failure the engine can produce is one of three
//! variants of [`CatalogError`]. The boundary layer (CLI or any other front
//! end) maps them uniformly with [`CatalogError::status_code`]:
//!
//! | Variant        | Status | Meaning                                  |
//! |----------------|--------|------------------------------------------|
//! | `InvalidField` | 422    | A single request field broke a rule      |
//! | `InvalidRange` | 422    | A start/end pair is inverted             |
//! | `NotFound`     | 404    | A referenced entity does not exist       |
//!
//! Store and service code wraps these in `anyhow::Error`; use
//! [`CatalogError::find_in`] to recover the typed failure at the boundary.

use thiserror::Error;

/// A typed, recoverable failure caused by bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A request field failed a structural or semantic rule.
    /// Carries the wire name of the field (`"name"`, `"length"`, ...).
    #[error("invalid value for field `{0}`")]
    InvalidField(&'static str),

    /// `startTime` is after `endTime`.
    #[error("start time must not be after end time")]
    InvalidRange,

    /// A referenced entity does not exist. Carries the entity kind and id.
    #[error("{0} with id {1} not found")]
    NotFound(&'static str, i64),
}

impl CatalogError {
    /// HTTP-style status class for this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidField(_) | Self::InvalidRange => 422,
            Self::NotFound(..) => 404,
        }
    }

    /// Find a `CatalogError` anywhere in an `anyhow` error chain.
    #[must_use]
    pub fn find_in(err: &anyhow::Error) -> Option<&Self> {
        err.chain().find_map(|cause| cause.downcast_ref::<Self>())
    }
}
