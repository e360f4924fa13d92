//! Lens description: focal length and aperture.

use serde::{Deserialize, Serialize};

use super::error::OpticsError;

/// Raw lens description from a shoot file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensInput {
    /// Focal length in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    /// f-number, e.g. `2.8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,
}

/// A lens with a mandatory aperture and an optional focal length.
///
/// Nothing is range-checked here. A lens without a focal length is valid on
/// its own but cannot take part in a DoF computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LensSpec {
    focal_length_mm: Option<f64>,
    aperture: f64,
}

impl LensSpec {
    pub fn new(focal_length_mm: Option<f64>, aperture: Option<f64>) -> Result<Self, OpticsError> {
        let aperture = aperture.ok_or_else(|| {
            OpticsError::configuration(
                "aperture must be set (an f-number from the powers of the square root of 2)",
            )
        })?;
        Ok(Self {
            focal_length_mm,
            aperture,
        })
    }

    pub fn from_input(input: &LensInput) -> Result<Self, OpticsError> {
        Self::new(input.focal_length, input.aperture)
    }

    pub fn focal_length_mm(&self) -> Option<f64> {
        self.focal_length_mm
    }

    /// Focal length, or a configuration error when the lens has none.
    pub fn require_focal_length(&self) -> Result<f64, OpticsError> {
        self.focal_length_mm.ok_or_else(|| {
            OpticsError::configuration("focal length must be set to calculate depth of field")
        })
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }
}
