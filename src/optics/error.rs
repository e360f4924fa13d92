//! Error type shared by the optics pipeline.

use thiserror::Error;

/// Failure while building shoot parameters or evaluating the DoF formulas.
///
/// Both variants are fatal for the computation in progress: no partial
/// [`DepthOfField`](super::DepthOfField) is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpticsError {
    /// A required input combination is absent (camera, lens, distance,
    /// aperture, focal length, or anything to derive a CoC from).
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Degenerate optics: a formula denominator vanished.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl OpticsError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }
}
