//! Exposure mode recommendation.
//!
//! Suggests whether to shoot in aperture priority ("A" on Nikon, "Av" on
//! Canon) or shutter priority ("S" / "Tv"), and the value to dial in. The
//! decision is a fixed table in three phases:
//!
//! 1. **Mode**: any subject movement selects shutter priority, otherwise
//!    aperture priority.
//! 2. **Aperture** (aperture mode only): picked from the shot type, light and
//!    desired bokeh. A panning shot switches the mode to shutter here and
//!    leaves the setting for phase 3.
//! 3. **Shutter** (shutter mode, including the panning switch): picked from
//!    movement speed, panning, and whether a flash is used.
//!
//! Assumes lenses cover f/2.8 to f/22. Every input is optional; unset or
//! unrecognized values take the default branch of each phase.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Kind of picture the photographer is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Portrait,
    SubjectFocus,
    Landscape,
    Group,
    Panning,
}

/// How fast the subject moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    #[serde(rename = "objects_in_high_speed", alias = "high_speed")]
    HighSpeed,
    #[serde(rename = "objects_in_medium_speed", alias = "medium_speed")]
    MediumSpeed,
    #[serde(rename = "objects_in_low_speed", alias = "low_speed")]
    LowSpeed,
    #[serde(rename = "no_movement_level", alias = "no_movement")]
    NoMovement,
}

/// Light conditions, including whether a flash is fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Light {
    #[serde(rename = "daylight_outside", alias = "daylight_ouside")]
    DaylightOutside,
    #[serde(rename = "dark_outside", alias = "dark_ouside")]
    DarkOutside,
    #[serde(rename = "flash_outside", alias = "flash_ouside")]
    FlashOutside,
    #[serde(rename = "flash_inside")]
    FlashInside,
    #[serde(rename = "no_flash_inside")]
    NoFlashInside,
}

/// How much background blur is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bokeh {
    Max,
    Mid,
    Min,
}

/// Exposure priority mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureMode {
    Aperture,
    Shutter,
}

impl fmt::Display for ExposureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExposureMode::Aperture => "aperture",
            ExposureMode::Shutter => "shutter",
        })
    }
}

/// Recommended mode and the value to set for it (`"f/2.8"`, `"1/250"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRecommendation {
    pub mode: ExposureMode,
    pub setting: String,
}

/// Scene description as written in a shoot file or passed on the command line.
///
/// Values are kept as raw tokens so that unknown words reach the default
/// branches instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_wanted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bokeh_level: Option<String>,
}

impl SceneInput {
    pub fn recommend(&self) -> ExposureRecommendation {
        mode_and_settings_from_tokens(
            self.type_wanted.as_deref(),
            self.movement_level.as_deref(),
            self.light.as_deref(),
            self.bokeh_level.as_deref(),
        )
    }
}

/// Parse a token into one of the scene enums.
///
/// Returns `None` for unknown tokens, logging a warning so typos are visible
/// with `-v`.
pub fn parse_token<T: serde::de::DeserializeOwned>(token: &str) -> Option<T> {
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error, StrDeserializer};

    let de: StrDeserializer<'_, Error> = token.into_deserializer();
    match T::deserialize(de) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("unrecognized value '{token}', using the default branch");
            None
        }
    }
}

/// [`mode_and_settings`] over raw string tokens.
pub fn mode_and_settings_from_tokens(
    type_wanted: Option<&str>,
    movement_level: Option<&str>,
    light: Option<&str>,
    bokeh_level: Option<&str>,
) -> ExposureRecommendation {
    mode_and_settings(
        type_wanted.and_then(parse_token),
        movement_level.and_then(parse_token),
        light.and_then(parse_token),
        bokeh_level.and_then(parse_token),
    )
}

/// Recommend an exposure mode and setting for a scene.
pub fn mode_and_settings(
    type_wanted: Option<ShotType>,
    movement_level: Option<Movement>,
    light: Option<Light>,
    bokeh_level: Option<Bokeh>,
) -> ExposureRecommendation {
    let panning = type_wanted == Some(ShotType::Panning);

    let mut mode = match movement_level {
        Some(Movement::HighSpeed | Movement::MediumSpeed | Movement::LowSpeed) => {
            ExposureMode::Shutter
        }
        _ => ExposureMode::Aperture,
    };
    let mut setting = None;

    if mode == ExposureMode::Aperture {
        setting = match type_wanted {
            Some(ShotType::Portrait | ShotType::SubjectFocus) => match bokeh_level {
                Some(Bokeh::Max) => Some("f/2.8"),
                Some(Bokeh::Min) => Some("f/11"),
                _ => Some("f/5.6"),
            },
            Some(ShotType::Landscape) => match light {
                Some(Light::DaylightOutside) => Some("f/22"),
                _ => Some("f/11"),
            },
            Some(ShotType::Group) => match light {
                Some(Light::DarkOutside | Light::NoFlashInside) => Some("f/5.6"),
                _ => Some("f/11"),
            },
            Some(ShotType::Panning) => {
                mode = ExposureMode::Shutter;
                None
            }
            // Two stops above the widest supported aperture.
            None => Some("f/5.6"),
        };
    }

    if mode == ExposureMode::Shutter {
        setting = Some(match movement_level {
            Some(Movement::HighSpeed) => {
                if panning {
                    "1/5"
                } else if matches!(light, Some(Light::FlashOutside | Light::FlashInside)) {
                    // Only a flash freezes motion this fast.
                    "1/600"
                } else {
                    "1/250"
                }
            }
            Some(Movement::MediumSpeed) => {
                if panning {
                    "1/10"
                } else {
                    "1/250"
                }
            }
            Some(Movement::LowSpeed | Movement::NoMovement) => {
                if panning {
                    "1/25"
                } else {
                    "1/160"
                }
            }
            None => "1/200",
        });
    }

    ExposureRecommendation {
        mode,
        // Both phases above always assign a setting for the mode they leave.
        setting: setting.unwrap_or_default().to_string(),
    }
}
