//! Shoot parameters and the depth-of-field computation.
//!
//! [`ShootParameters`] bundles a resolved camera, a lens, and a subject
//! distance. [`DepthOfField::compute`] chains the formulas from
//! [`calculations`](super::calculations) in a fixed order:
//!
//! ```text
//! distance m → mm → hyperfocal → far point → near point → DoF
//! ```
//!
//! Any failure aborts the whole computation; there is no partial result.

use serde::Serialize;
use tracing::debug;

use super::calculations::{depth_of_field_mm, far_point_mm, hyperfocal_mm, near_point_mm};
use super::camera::{CameraInput, CameraProfile};
use super::error::OpticsError;
use super::lens::{LensInput, LensSpec};

/// Everything needed to evaluate depth of field for one shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShootParameters {
    pub camera: CameraProfile,
    pub lens: LensSpec,
    /// Subject distance in meters.
    pub subject_distance_m: f64,
}

impl ShootParameters {
    /// Build shoot parameters from raw inputs.
    ///
    /// All three inputs must be present; camera and lens are then resolved
    /// and may fail on their own.
    pub fn from_input(
        camera: Option<&CameraInput>,
        lens: Option<&LensInput>,
        subject_distance_m: Option<f64>,
    ) -> Result<Self, OpticsError> {
        let (Some(camera), Some(lens), Some(subject_distance_m)) = (camera, lens, subject_distance_m)
        else {
            return Err(OpticsError::configuration("missing data"));
        };
        Ok(Self {
            camera: CameraProfile::from_input(camera)?,
            lens: LensSpec::from_input(lens)?,
            subject_distance_m,
        })
    }
}

/// Depth-of-field figures for one shot. All distances in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthOfField {
    pub hyperfocal_mm: f64,
    /// Far limit of acceptable sharpness. Negative when the subject is
    /// focused beyond the hyperfocal distance.
    pub far_point_mm: f64,
    pub near_point_mm: f64,
    pub dof_mm: f64,
}

impl DepthOfField {
    pub fn compute(params: &ShootParameters) -> Result<Self, OpticsError> {
        let focal_length = params.lens.require_focal_length()?;
        let distance_mm = params.subject_distance_m * 1000.0;

        let hyperfocal = hyperfocal_mm(focal_length, params.lens.aperture(), params.camera.coc_mm())?;
        let far_point = far_point_mm(hyperfocal, distance_mm, focal_length)?;
        let near_point = near_point_mm(hyperfocal, distance_mm, focal_length)?;
        let dof = depth_of_field_mm(far_point, near_point);

        debug!(hyperfocal, far_point, near_point, dof, "computed depth of field");
        Ok(Self {
            hyperfocal_mm: hyperfocal,
            far_point_mm: far_point,
            near_point_mm: near_point,
            dof_mm: dof,
        })
    }

    /// True when the subject is beyond the hyperfocal distance, in which case
    /// the far point carries no physical meaning (sharp to infinity).
    pub fn focused_beyond_hyperfocal(&self) -> bool {
        self.far_point_mm < 0.0
    }
}

/// Resolve raw inputs and compute depth of field in one step.
pub fn depth_of_field(
    camera: Option<&CameraInput>,
    lens: Option<&LensInput>,
    subject_distance_m: Option<f64>,
) -> Result<DepthOfField, OpticsError> {
    let params = ShootParameters::from_input(camera, lens, subject_distance_m)?;
    DepthOfField::compute(&params)
}
