//! # hyperfocal
//!
//! Depth-of-field calculator for photographers. Given a camera, a lens and a
//! subject distance it computes the hyperfocal distance, the near and far
//! limits of acceptable sharpness, and the total depth of field. Two small
//! advisors sit alongside: flash working distance from a guide number, and an
//! exposure mode recommendation for a scene.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! camera input  →  circle of confusion ┐
//! lens input    →  focal length, f/N   ├→  hyperfocal → far → near → DoF  →  output
//! distance (m)  ───────────────────────┘
//! ```
//!
//! Every stage is a pure function of its inputs. Nothing is cached and nothing
//! is shared, so the same inputs always give bit-identical results and every
//! type can be used from any thread.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`optics`] | Circle-of-confusion resolution, lens spec, DoF formulas and pipeline |
//! | [`recommend`] | Flash working distance and exposure mode advisors |
//! | [`config`] | Shoot file (`shoot.toml`) loading, validation and layering |
//! | [`plan`] | Evaluates a shoot file into a report (DoF + flash + exposure) |
//! | [`output`] | CLI output formatting: rounding, meters/feet, report layout |
//! | [`units`] | Rounding and unit conversion helpers |
//!
//! # Design Decisions
//!
//! ## Tagged CoC Sources
//!
//! A camera's circle of confusion comes from a sensor name, an explicit value,
//! or print viewing conditions. Raw input may carry several of these at once,
//! so [`optics::CocSource::select`] picks one by a fixed priority (sensor,
//! then explicit, then viewing) before any arithmetic runs.
//!
//! ## Hard and Soft Failures
//!
//! Missing inputs and degenerate optics ([`optics::OpticsError`]) abort the
//! computation: no partial DoF result exists. A flash distance that cannot be
//! computed ([`recommend::FlashError`]) is reported and the rest of the shoot
//! report still prints.
//!
//! ## Raw Far Point
//!
//! Focusing beyond the hyperfocal distance makes the far-point formula go
//! negative. The raw value is kept in [`optics::DepthOfField`]; the output
//! layer adds a "sharp to infinity" note instead of clamping numbers.

pub mod config;
pub mod optics;
pub mod output;
pub mod plan;
pub mod recommend;
pub mod units;
