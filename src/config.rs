//! Shoot file configuration.
//!
//! A shoot file is a small TOML document describing one photo shoot: the
//! camera, the lens, the subject distance, and optionally a flash and the
//! scene for the exposure recommendation.
//!
//! ## File Format
//!
//! ```toml
//! distance = 1.0            # Subject distance in meters
//!
//! [camera]                  # One of: sensor_type, coc, or the viewing triple
//! coc = 0.029
//! # sensor_type = "Canon_APS-C"
//! # viewing_distance = 1.0  # m
//! # resolution = 10.0       # lp/mm at 25 cm
//! # enlargement = 8.0
//!
//! [lens]
//! focal_length = 50.0       # mm
//! aperture = 1.4            # f-number
//!
//! [flash]                   # Optional
//! guide_number = 92.0
//! aperture = 2.8            # Falls back to lens.aperture
//!
//! [scene]                   # Optional
//! type_wanted = "portrait"
//! movement_level = "no_movement_level"
//! light = "flash_inside"
//! bokeh_level = "max"
//! ```
//!
//! ## Layering
//!
//! Command-line flags are turned into a sparse TOML table and merged on top
//! of the file with [`merge_toml`], so a flag overrides just the key it names.
//! The CoC sources in `[camera]` are the exception: an overlay that names one
//! source drops the base file's other sources first, otherwise the fixed CoC
//! priority would let a file's `sensor_type` shadow a `--coc` flag.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::optics::{CameraInput, DepthOfField, LensInput, OpticsError, ShootParameters};
use crate::recommend::{FlashError, SceneInput, distance_with_flash};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// One photo shoot, as loaded from a shoot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShootConfig {
    /// Subject distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<LensInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<FlashConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneInput>,
}

/// Flash used during the shoot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlashConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_number: Option<f64>,
    /// f-number used with the flash. When absent, the lens aperture is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,
}

impl FlashConfig {
    /// Aperture to use with the flash: its own, else the lens aperture.
    pub fn effective_aperture(&self, lens: Option<&LensInput>) -> Option<f64> {
        self.aperture.or_else(|| lens.and_then(|l| l.aperture))
    }

    /// Working distance for this flash; see [`distance_with_flash`].
    pub fn working_distance(&self, lens: Option<&LensInput>) -> Result<f64, FlashError> {
        let guide_number = self.guide_number.ok_or(FlashError::MissingGuideNumber)?;
        let aperture = self
            .effective_aperture(lens)
            .ok_or(FlashError::MissingAperture)?;
        distance_with_flash(guide_number, aperture)
    }
}

impl ShootConfig {
    /// Reject values TOML accepts but the formulas cannot use (`nan`, `inf`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut numbers = vec![("distance", self.distance)];
        if let Some(camera) = &self.camera {
            numbers.extend([
                ("camera.coc", camera.coc),
                ("camera.viewing_distance", camera.viewing_distance),
                ("camera.resolution", camera.resolution),
                ("camera.enlargement", camera.enlargement),
            ]);
        }
        if let Some(lens) = &self.lens {
            numbers.extend([
                ("lens.focal_length", lens.focal_length),
                ("lens.aperture", lens.aperture),
            ]);
        }
        if let Some(flash) = &self.flash {
            numbers.extend([
                ("flash.guide_number", flash.guide_number),
                ("flash.aperture", flash.aperture),
            ]);
        }
        for (key, value) in numbers {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a finite number"
                )));
            }
        }
        Ok(())
    }

    pub fn shoot_parameters(&self) -> Result<ShootParameters, OpticsError> {
        ShootParameters::from_input(self.camera.as_ref(), self.lens.as_ref(), self.distance)
    }

    pub fn depth_of_field(&self) -> Result<DepthOfField, OpticsError> {
        DepthOfField::compute(&self.shoot_parameters()?)
    }

    /// Render as a sparse TOML value (unset keys are omitted).
    pub fn to_value(&self) -> Result<toml::Value, ConfigError> {
        Ok(toml::Value::try_from(self)?)
    }
}

// =============================================================================
// Loading, merging, and validation
// =============================================================================

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// `[camera]` keys grouped by the CoC source they describe.
const COC_SOURCE_KEYS: [&[&str]; 3] = [
    &["sensor_type"],
    &["coc"],
    &["viewing_distance", "resolution", "enlargement"],
];

/// Remove from `base.camera` every CoC source the overlay's camera does not name.
///
/// Keys within a named source still merge one by one, so `--resolution` alone
/// keeps the file's viewing distance and enlargement.
fn drop_shadowed_coc_sources(base: &mut toml::Value, overlay: &toml::Value) {
    let Some(overlay_camera) = overlay.get("camera").and_then(toml::Value::as_table) else {
        return;
    };
    let Some(base_camera) = base.get_mut("camera").and_then(toml::Value::as_table_mut) else {
        return;
    };
    let named = |group: &[&str]| group.iter().any(|key| overlay_camera.contains_key(*key));
    if !COC_SOURCE_KEYS.iter().any(|group| named(*group)) {
        return;
    }
    for group in COC_SOURCE_KEYS {
        if !named(group) {
            for key in group {
                base_camera.remove(*key);
            }
        }
    }
}

/// Load a shoot file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    debug!("loading shoot file {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// A CoC source named in the overlay replaces the base file's CoC sources.
pub fn resolve_config(
    mut base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ShootConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => {
            drop_shadowed_coc_sources(&mut base, &ov);
            merge_toml(base, ov)
        }
        None => base,
    };
    let config: ShootConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a shoot file.
pub fn load_config(path: &Path) -> Result<ShootConfig, ConfigError> {
    resolve_config(load_raw_config(path)?, None)
}

/// Empty base layer for when no shoot file is given.
pub fn empty_value() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

/// The demonstration shoot: the values of [`stock_config_toml`].
pub fn demo_config() -> Result<ShootConfig, ConfigError> {
    resolve_config(toml::from_str(stock_config_toml())?, None)
}

/// Returns a fully-commented shoot file with every key explained.
///
/// Used by the `gen-config` CLI command and as the `demo` shoot.
pub fn stock_config_toml() -> &'static str {
    r##"# hyperfocal shoot file
# =====================
# Describes one photo shoot. Values below are the demonstration shoot:
# a 50mm f/1.4 lens on full frame, focused at 1 meter.

# Subject distance in meters.
distance = 1.0

# ---------------------------------------------------------------------------
# Camera: how to find the circle of confusion (CoC).
# Give ONE of the following; when several are present the first wins:
#   1. sensor_type = "Canon_APS-C" (0.018mm) or "Nikon_APS-C" (0.019mm)
#   2. coc = <mm>
#   3. viewing_distance (m), resolution (lp/mm at 25cm), enlargement
# ---------------------------------------------------------------------------
[camera]
coc = 0.029
# sensor_type = "Canon_APS-C"
# viewing_distance = 1.0
# resolution = 10.0
# enlargement = 8.0

# ---------------------------------------------------------------------------
# Lens
# ---------------------------------------------------------------------------
[lens]
# Focal length in mm.
focal_length = 50.0
# f-number (required).
aperture = 1.4

# ---------------------------------------------------------------------------
# Flash (optional): working distance = guide_number / aperture.
# ---------------------------------------------------------------------------
[flash]
guide_number = 92.0
# Defaults to lens.aperture when omitted.
aperture = 2.8

# ---------------------------------------------------------------------------
# Scene (optional): drives the exposure mode recommendation.
#   type_wanted:    portrait, subject_focus, landscape, group, panning
#   movement_level: objects_in_high_speed, objects_in_medium_speed,
#                   objects_in_low_speed, no_movement_level
#   light:          daylight_outside, dark_outside, flash_outside,
#                   flash_inside, no_flash_inside
#   bokeh_level:    max, mid, min
# ---------------------------------------------------------------------------
[scene]
type_wanted = "portrait"
movement_level = "no_movement_level"
light = "flash_inside"
bokeh_level = "max"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // Stock / demo config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        assert!(value.is_table());
    }

    #[test]
    fn demo_config_values() {
        let config = demo_config().unwrap();
        assert_eq!(config.distance, Some(1.0));
        assert_eq!(config.camera, Some(CameraInput::coc(0.029)));
        assert_eq!(
            config.lens,
            Some(LensInput {
                focal_length: Some(50.0),
                aperture: Some(1.4),
            })
        );
        assert_eq!(config.flash.as_ref().unwrap().guide_number, Some(92.0));
        assert_eq!(
            config.scene.as_ref().unwrap().type_wanted.as_deref(),
            Some("portrait")
        );
    }

    #[test]
    fn demo_config_computes_dof() {
        let dof = demo_config().unwrap().depth_of_field().unwrap();
        assert!((dof.dof_mm - 30.86).abs() < 0.01);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[camera]", "[lens]", "[flash]", "[scene]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shoot.toml");
        fs::write(
            &path,
            r#"
distance = 3
[camera]
sensor_type = "Canon_APS-C"
[lens]
focal_length = 50
aperture = 2.8
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.distance, Some(3.0));
        assert_eq!(config.flash, None);
        let dof = config.depth_of_field().unwrap();
        assert!((dof.dof_mm - 358.1).abs() < 0.1);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shoot.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<ShootConfig, _> = toml::from_str("subject = 2.0");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<ShootConfig, _> = toml::from_str("[lens]\nzoom = 2.0");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_nan() {
        let result = resolve_config(toml::from_str("distance = nan").unwrap(), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_infinite_nested_value() {
        let result = resolve_config(toml::from_str("[lens]\naperture = inf").unwrap(), None);
        match result {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("lens.aperture")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_config_is_valid_but_missing_data() {
        let config = resolve_config(empty_value(), None).unwrap();
        assert_eq!(config, ShootConfig::default());
        assert_eq!(
            config.depth_of_field().unwrap_err(),
            OpticsError::Configuration("missing data".into())
        );
    }

    // =========================================================================
    // Merge tests
    // =========================================================================

    #[test]
    fn merge_overrides_single_nested_key() {
        let base: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let overlay: toml::Value = toml::from_str("[lens]\naperture = 2.8").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        let lens = config.lens.unwrap();
        assert_eq!(lens.aperture, Some(2.8));
        assert_eq!(lens.focal_length, Some(50.0));
    }

    #[test]
    fn merge_adds_new_keys() {
        let base: toml::Value = toml::from_str("distance = 2.0").unwrap();
        let overlay: toml::Value = toml::from_str("[camera]\ncoc = 0.03").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.distance, Some(2.0));
        assert_eq!(config.camera, Some(CameraInput::coc(0.03)));
    }

    #[test]
    fn overlay_coc_replaces_base_sensor() {
        let base: toml::Value =
            toml::from_str("[camera]\nsensor_type = 'Canon_APS-C'\nresolution = 10.0").unwrap();
        let overlay: toml::Value = toml::from_str("[camera]\ncoc = 0.029").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.camera, Some(CameraInput::coc(0.029)));
    }

    #[test]
    fn overlay_viewing_key_replaces_base_coc_and_keeps_triple() {
        let base: toml::Value = toml::from_str(
            "[camera]\ncoc = 0.029\nviewing_distance = 1.0\nresolution = 5.0\nenlargement = 8.0",
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[camera]\nresolution = 10.0").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.camera, Some(CameraInput::viewing(1.0, 10.0, 8.0)));
    }

    #[test]
    fn overlay_without_camera_keeps_base_sources() {
        let base: toml::Value =
            toml::from_str("[camera]\nsensor_type = 'Nikon_APS-C'\ncoc = 0.029").unwrap();
        let overlay: toml::Value = toml::from_str("distance = 2.0").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        let camera = config.camera.unwrap();
        assert_eq!(camera.sensor_type.as_deref(), Some("Nikon_APS-C"));
        assert_eq!(camera.coc, Some(0.029));
    }

    #[test]
    fn merge_non_table_replaces() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged, toml::Value::Integer(2));
    }

    #[test]
    fn sparse_overlay_omits_unset_keys() {
        let overlay = ShootConfig {
            distance: Some(3.0),
            ..ShootConfig::default()
        };
        let value = overlay.to_value().unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("distance"));
    }

    // =========================================================================
    // Flash config tests
    // =========================================================================

    #[test]
    fn flash_uses_own_aperture() {
        let flash = FlashConfig {
            guide_number: Some(92.0),
            aperture: Some(2.8),
        };
        assert_eq!(flash.working_distance(None).unwrap(), 32.86);
    }

    #[test]
    fn flash_falls_back_to_lens_aperture() {
        let flash = FlashConfig {
            guide_number: Some(40.0),
            aperture: None,
        };
        let lens = LensInput {
            focal_length: Some(50.0),
            aperture: Some(4.0),
        };
        assert_eq!(flash.working_distance(Some(&lens)).unwrap(), 10.0);
    }

    #[test]
    fn flash_without_guide_number() {
        let flash = FlashConfig {
            guide_number: None,
            aperture: Some(2.8),
        };
        assert_eq!(
            flash.working_distance(None),
            Err(FlashError::MissingGuideNumber)
        );
    }

    #[test]
    fn flash_without_any_aperture() {
        let flash = FlashConfig {
            guide_number: Some(92.0),
            aperture: None,
        };
        assert_eq!(flash.working_distance(None), Err(FlashError::MissingAperture));
    }
}
