//! CLI output formatting.
//!
//! Every command has a `format_*` function returning plain strings for
//! testability and, where useful, a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Shoot report (`plan`, `demo`)
//!
//! ```text
//! Depth of field
//!     DOF is: 30.86 mm, FAR point is: 1.02 m (3.35 feet), NEAR point is: 0.98 m (3.22 feet)
//!     Hyperfocal: 61.63 m
//! Flash
//!     Distance working with GN 92 and 2.8 aperture is : 32.86
//! Exposure
//!     aperture, f/2.8
//! ```
//!
//! Numbers are rounded to 2 decimals and printed in their shortest form
//! (`3.5`, not `3.50`), so parsing a printed value gives back exactly the
//! rounded number.

use serde::Serialize;

use crate::optics::DepthOfField;
use crate::plan::{FlashReport, ShootReport};
use crate::recommend::{ExposureRecommendation, FlashError};
use crate::units::{meters_to_feet, mm_to_m, round2};

/// Depth of field rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DofSummary {
    pub dof_mm: f64,
    pub far_m: f64,
    pub far_ft: f64,
    pub near_m: f64,
    pub near_ft: f64,
    pub hyperfocal_m: f64,
}

impl From<&DepthOfField> for DofSummary {
    fn from(dof: &DepthOfField) -> Self {
        let far_m = mm_to_m(dof.far_point_mm);
        let near_m = mm_to_m(dof.near_point_mm);
        Self {
            dof_mm: round2(dof.dof_mm),
            far_m,
            far_ft: meters_to_feet(far_m),
            near_m,
            near_ft: meters_to_feet(near_m),
            hyperfocal_m: mm_to_m(dof.hyperfocal_mm),
        }
    }
}

/// One-line DoF summary with far and near points in meters and feet.
pub fn format_dof_line(summary: &DofSummary) -> String {
    format!(
        "DOF is: {} mm, FAR point is: {} m ({} feet), NEAR point is: {} m ({} feet)",
        summary.dof_mm, summary.far_m, summary.far_ft, summary.near_m, summary.near_ft
    )
}

/// Lines for a depth-of-field result, without a section header.
pub fn format_dof(dof: &DepthOfField) -> Vec<String> {
    let summary = DofSummary::from(dof);
    let mut lines = vec![
        format_dof_line(&summary),
        format!("Hyperfocal: {} m", summary.hyperfocal_m),
    ];
    if dof.focused_beyond_hyperfocal() {
        lines.push("Focused beyond the hyperfocal distance: sharp to infinity".to_string());
    }
    lines
}

/// Flash working distance line, or the reason it could not be computed.
pub fn format_flash(guide_number: f64, aperture: f64, result: &Result<f64, FlashError>) -> String {
    match result {
        Ok(distance) => format!(
            "Distance working with GN {} and {} aperture is : {}",
            guide_number, aperture, distance
        ),
        Err(e) => format!("Error, {}", e),
    }
}

fn format_flash_report(flash: &FlashReport) -> String {
    match (flash.guide_number, flash.aperture, flash.distance) {
        (Some(gn), Some(aperture), Some(distance)) => format_flash(gn, aperture, &Ok(distance)),
        _ => format!(
            "Error, {}",
            flash.error.as_deref().unwrap_or("flash distance unavailable")
        ),
    }
}

/// `mode, setting`, e.g. `aperture, f/2.8`.
pub fn format_recommendation(rec: &ExposureRecommendation) -> String {
    format!("{}, {}", rec.mode, rec.setting)
}

/// Format a full shoot report as sections with indented context lines.
pub fn format_report(report: &ShootReport) -> Vec<String> {
    let mut lines = vec!["Depth of field".to_string()];
    lines.extend(
        format_dof(&report.depth_of_field)
            .into_iter()
            .map(|line| format!("    {}", line)),
    );

    if let Some(ref flash) = report.flash {
        lines.push("Flash".to_string());
        lines.push(format!("    {}", format_flash_report(flash)));
    }

    if let Some(ref exposure) = report.exposure {
        lines.push("Exposure".to_string());
        lines.push(format!("    {}", format_recommendation(exposure)));
    }

    lines
}

/// Print lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Print a shoot report to stdout.
pub fn print_report(report: &ShootReport) {
    print_lines(&format_report(report));
}
