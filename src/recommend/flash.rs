//! Flash working distance from a guide number.

use thiserror::Error;

use crate::units::round2;

/// Why a flash distance could not be computed.
///
/// These are soft failures: callers report them and carry on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    #[error("aperture can not be zero")]
    ZeroAperture,
    #[error("guide number must be set")]
    MissingGuideNumber,
    #[error("aperture must be set")]
    MissingAperture,
}

/// Maximum working distance for a flash, `GN / N`, rounded to 2 decimals.
///
/// The unit follows the guide number (a GN in meters gives meters).
///
/// # Examples
/// ```
/// # use hyperfocal::recommend::distance_with_flash;
/// assert_eq!(distance_with_flash(92.0, 2.8).unwrap(), 32.86);
/// ```
pub fn distance_with_flash(guide_number: f64, aperture: f64) -> Result<f64, FlashError> {
    if !guide_number.is_finite() {
        return Err(FlashError::MissingGuideNumber);
    }
    if aperture == 0.0 {
        return Err(FlashError::ZeroAperture);
    }
    Ok(round2(guide_number / aperture))
}
