//! Depth-of-field optics: pure functions, no I/O.
//!
//! | Step | Type / function |
//! |---|---|
//! | **Camera** | [`CameraInput`] → [`CameraProfile`] (circle of confusion) |
//! | **Lens** | [`LensInput`] → [`LensSpec`] (focal length, aperture) |
//! | **Shoot** | camera + lens + distance → [`ShootParameters`] |
//! | **DoF** | [`DepthOfField::compute`] (hyperfocal, far, near, total) |
//!
//! The module is split into:
//! - **Calculations**: the individual thin-lens formulas (unit testable)
//! - **Camera / Lens**: raw inputs and their validated counterparts
//! - **Shoot**: the fixed-order pipeline that chains the formulas

mod calculations;
pub mod camera;
mod error;
pub mod lens;
pub mod shoot;

pub use calculations::{
    coc_from_viewing, depth_of_field_mm, far_point_mm, hyperfocal_mm, near_point_mm,
};
pub use camera::{CameraInput, CameraProfile, CocSource, SensorType, resolve_coc};
pub use error::OpticsError;
pub use lens::{LensInput, LensSpec};
pub use shoot::{DepthOfField, ShootParameters, depth_of_field};
