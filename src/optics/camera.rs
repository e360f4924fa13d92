//! Camera profiles and circle-of-confusion resolution.
//!
//! A camera contributes exactly one number to the DoF pipeline: its circle of
//! confusion (CoC) in millimeters. That number can come from three places:
//!
//! | Source | Input | CoC |
//! |---|---|---|
//! | Sensor | `sensor_type = "Canon_APS-C"` | 0.018 mm |
//! | Sensor | `sensor_type = "Nikon_APS-C"` | 0.019 mm |
//! | Explicit | `coc = 0.029` | taken verbatim |
//! | Viewing | `viewing_distance`, `resolution`, `enlargement` | see [`coc_from_viewing`](super::coc_from_viewing) |
//!
//! When several are present the priority is sensor, then explicit value, then
//! viewing conditions. An unrecognized sensor name counts as absent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::calculations::coc_from_viewing;
use super::error::OpticsError;

/// Sensor formats with a known circle of confusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "Canon_APS-C")]
    CanonApsC,
    #[serde(rename = "Nikon_APS-C")]
    NikonApsC,
}

impl SensorType {
    /// Circle of confusion for this sensor, in mm.
    pub fn coc_mm(self) -> f64 {
        match self {
            SensorType::CanonApsC => 0.018,
            SensorType::NikonApsC => 0.019,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SensorType::CanonApsC => "Canon_APS-C",
            SensorType::NikonApsC => "Nikon_APS-C",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Canon_APS-C" => Ok(SensorType::CanonApsC),
            "Nikon_APS-C" => Ok(SensorType::NikonApsC),
            other => Err(format!("unknown sensor type '{other}'")),
        }
    }
}

/// Raw camera description as it appears in a shoot file or on the command line.
///
/// Every field is optional; [`CameraProfile::from_input`] decides which
/// combination wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraInput {
    /// Sensor name, e.g. `"Canon_APS-C"`. Unknown names are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
    /// Explicit circle of confusion in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coc: Option<f64>,
    /// Viewing distance of the final print, in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewing_distance: Option<f64>,
    /// Desired final-image resolution in lp/mm at 25 cm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    /// Enlargement from sensor to final print.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enlargement: Option<f64>,
}

impl CameraInput {
    /// Camera described only by its sensor name.
    pub fn sensor(name: impl Into<String>) -> Self {
        Self {
            sensor_type: Some(name.into()),
            ..Self::default()
        }
    }

    /// Camera described only by an explicit CoC.
    pub fn coc(coc_mm: f64) -> Self {
        Self {
            coc: Some(coc_mm),
            ..Self::default()
        }
    }

    /// Camera described by print viewing conditions.
    pub fn viewing(distance_m: f64, resolution_lp_per_mm: f64, enlargement: f64) -> Self {
        Self {
            viewing_distance: Some(distance_m),
            resolution: Some(resolution_lp_per_mm),
            enlargement: Some(enlargement),
            ..Self::default()
        }
    }

    fn known_sensor(&self) -> Option<SensorType> {
        let name = self.sensor_type.as_deref()?;
        match name.parse() {
            Ok(sensor) => Some(sensor),
            Err(e) => {
                debug!("{e}, ignoring sensor_type");
                None
            }
        }
    }
}

/// Where a camera's circle of confusion came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CocSource {
    Sensor { sensor: SensorType },
    Explicit { coc_mm: f64 },
    Viewing {
        distance_m: f64,
        resolution_lp_per_mm: f64,
        enlargement: f64,
    },
}

impl CocSource {
    /// Pick the highest-priority satisfiable alternative from raw input.
    ///
    /// Fails before any arithmetic when nothing is satisfiable.
    pub fn select(input: &CameraInput) -> Result<Self, OpticsError> {
        if let Some(sensor) = input.known_sensor() {
            return Ok(CocSource::Sensor { sensor });
        }
        if let Some(coc_mm) = input.coc {
            return Ok(CocSource::Explicit { coc_mm });
        }
        if let (Some(distance_m), Some(resolution_lp_per_mm), Some(enlargement)) =
            (input.viewing_distance, input.resolution, input.enlargement)
        {
            return Ok(CocSource::Viewing {
                distance_m,
                resolution_lp_per_mm,
                enlargement,
            });
        }
        Err(OpticsError::configuration(
            "missing parameters to calculate coc",
        ))
    }

    /// Evaluate this source to a CoC in mm.
    pub fn resolve(self) -> Result<f64, OpticsError> {
        match self {
            CocSource::Sensor { sensor } => Ok(sensor.coc_mm()),
            CocSource::Explicit { coc_mm } => Ok(coc_mm),
            CocSource::Viewing {
                distance_m,
                resolution_lp_per_mm,
                enlargement,
            } => coc_from_viewing(distance_m, resolution_lp_per_mm, enlargement),
        }
    }
}

/// A camera reduced to what the DoF formulas need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraProfile {
    source: CocSource,
    coc_mm: f64,
}

impl CameraProfile {
    pub fn from_input(input: &CameraInput) -> Result<Self, OpticsError> {
        let source = CocSource::select(input)?;
        let coc_mm = source.resolve()?;
        debug!(?source, coc_mm, "resolved circle of confusion");
        Ok(Self { source, coc_mm })
    }

    pub fn source(&self) -> CocSource {
        self.source
    }

    /// Circle of confusion in mm.
    pub fn coc_mm(&self) -> f64 {
        self.coc_mm
    }
}

/// Resolve a circle of confusion (mm) straight from raw camera input.
pub fn resolve_coc(input: &CameraInput) -> Result<f64, OpticsError> {
    CameraProfile::from_input(input).map(|camera| camera.coc_mm())
}
