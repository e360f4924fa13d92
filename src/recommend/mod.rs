//! Advisory helpers for planning a shot.
//!
//! Stateless lookups with no dependency on the [`optics`](crate::optics)
//! pipeline:
//!
//! - [`distance_with_flash`]: how far a flash reaches at a given aperture.
//! - [`mode_and_settings`]: aperture or shutter priority, and what to set.

mod exposure;
mod flash;

pub use exposure::{
    Bokeh, ExposureMode, ExposureRecommendation, Light, Movement, SceneInput, ShotType,
    mode_and_settings, mode_and_settings_from_tokens, parse_token,
};
pub use flash::{FlashError, distance_with_flash};
