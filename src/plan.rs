//! Evaluate a whole shoot file into a report.
//!
//! The depth-of-field section is mandatory and its failure aborts the
//! report. Flash and scene sections are optional; a flash that cannot be
//! computed is kept in the report as an error line rather than failing it.

use serde::Serialize;
use tracing::warn;

use crate::config::ShootConfig;
use crate::optics::{DepthOfField, OpticsError};
use crate::output::DofSummary;
use crate::recommend::ExposureRecommendation;

/// Everything printed for one shoot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootReport {
    pub depth_of_field: DepthOfField,
    pub summary: DofSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<FlashReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure: Option<ExposureRecommendation>,
}

/// Flash section of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashReport {
    pub guide_number: Option<f64>,
    pub aperture: Option<f64>,
    /// Working distance, absent when it could not be computed.
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ShootReport {
    pub fn evaluate(config: &ShootConfig) -> Result<Self, OpticsError> {
        let depth_of_field = config.depth_of_field()?;

        let flash = config.flash.as_ref().map(|flash| {
            let lens = config.lens.as_ref();
            let aperture = flash.effective_aperture(lens);
            match flash.working_distance(lens) {
                Ok(distance) => FlashReport {
                    guide_number: flash.guide_number,
                    aperture,
                    distance: Some(distance),
                    error: None,
                },
                Err(e) => {
                    warn!("flash distance skipped: {e}");
                    FlashReport {
                        guide_number: flash.guide_number,
                        aperture,
                        distance: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        });

        let exposure = config.scene.as_ref().map(|scene| scene.recommend());

        Ok(Self {
            summary: DofSummary::from(&depth_of_field),
            depth_of_field,
            flash,
            exposure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlashConfig, demo_config};
    use crate::recommend::ExposureMode;

    #[test]
    fn demo_report_has_every_section() {
        let report = ShootReport::evaluate(&demo_config().unwrap()).unwrap();
        assert_eq!(report.summary.dof_mm, 30.86);
        assert_eq!(report.flash.as_ref().unwrap().distance, Some(32.86));
        let exposure = report.exposure.unwrap();
        assert_eq!(exposure.mode, ExposureMode::Aperture);
        assert_eq!(exposure.setting, "f/2.8");
    }

    #[test]
    fn zero_flash_aperture_does_not_fail_report() {
        let mut config = demo_config().unwrap();
        config.flash = Some(FlashConfig {
            guide_number: Some(92.0),
            aperture: Some(0.0),
        });
        let report = ShootReport::evaluate(&config).unwrap();
        let flash = report.flash.unwrap();
        assert_eq!(flash.distance, None);
        assert_eq!(flash.error.as_deref(), Some("aperture can not be zero"));
    }

    #[test]
    fn optional_sections_omitted() {
        let mut config = demo_config().unwrap();
        config.flash = None;
        config.scene = None;
        let report = ShootReport::evaluate(&config).unwrap();
        assert!(report.flash.is_none());
        assert!(report.exposure.is_none());
    }

    #[test]
    fn missing_lens_fails_report() {
        let mut config = demo_config().unwrap();
        config.lens = None;
        assert_eq!(
            ShootReport::evaluate(&config).unwrap_err(),
            OpticsError::Configuration("missing data".into())
        );
    }
}
