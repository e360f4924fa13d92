//! Pure depth-of-field formulas.
//!
//! All functions here are pure and testable without any I/O. Distances are
//! in millimeters unless the name says otherwise. Equations follow the
//! classic thin-lens approximations published at
//! <http://www.dofmaster.com/equations.html>.

use super::error::OpticsError;

/// Calculate the circle of confusion from viewing conditions.
///
/// `CoC = (viewing distance in cm / 25 cm) / resolution / enlargement`, where
/// the resolution is the desired final-image resolution in line pairs per mm
/// at a 25 cm viewing distance.
///
/// # Examples
/// ```
/// # use hyperfocal::optics::coc_from_viewing;
/// // 1 m viewing distance, 10 lp/mm, 8x enlargement → 0.05 mm
/// assert_eq!(coc_from_viewing(1.0, 10.0, 8.0).unwrap(), 0.05);
/// ```
pub fn coc_from_viewing(
    viewing_distance_m: f64,
    resolution_lp_per_mm: f64,
    enlargement: f64,
) -> Result<f64, OpticsError> {
    if resolution_lp_per_mm == 0.0 || enlargement == 0.0 {
        return Err(OpticsError::division_by_zero(
            "resolution and enlargement must be non-zero to calculate coc",
        ));
    }
    Ok((viewing_distance_m * 100.0 / 25.0) / resolution_lp_per_mm / enlargement)
}

/// Calculate the hyperfocal distance: `H = f² / (N·c) + f`.
///
/// # Arguments
/// * `focal_length` - Focal length in mm
/// * `aperture` - f-number
/// * `coc` - Circle of confusion in mm
///
/// # Examples
/// ```
/// # use hyperfocal::optics::hyperfocal_mm;
/// // 200mm at f/4 with a 12.5mm CoC → 40000 / 50 + 200
/// assert_eq!(hyperfocal_mm(200.0, 4.0, 12.5).unwrap(), 1000.0);
/// ```
pub fn hyperfocal_mm(focal_length: f64, aperture: f64, coc: f64) -> Result<f64, OpticsError> {
    let blur = aperture * coc;
    if blur + focal_length == 0.0 || blur == 0.0 {
        return Err(OpticsError::division_by_zero(
            "check the values of aperture, coc and focal_length",
        ));
    }
    Ok((focal_length * focal_length) / blur + focal_length)
}

/// Calculate the far limit of acceptable sharpness: `d(H − f) / (H − d)`.
///
/// When the subject sits beyond the hyperfocal distance the result is
/// negative. It is returned as-is; callers decide how to present it.
pub fn far_point_mm(hyperfocal: f64, distance: f64, focal_length: f64) -> Result<f64, OpticsError> {
    let denominator = hyperfocal - distance;
    if denominator == 0.0 {
        return Err(OpticsError::division_by_zero(
            "subject distance equals the hyperfocal distance",
        ));
    }
    Ok((distance * (hyperfocal - focal_length)) / denominator)
}

/// Calculate the near limit of acceptable sharpness: `d(H − f) / (H + d − 2f)`.
pub fn near_point_mm(
    hyperfocal: f64,
    distance: f64,
    focal_length: f64,
) -> Result<f64, OpticsError> {
    let denominator = hyperfocal + distance - 2.0 * focal_length;
    if denominator == 0.0 {
        return Err(OpticsError::division_by_zero(
            "near point denominator is zero",
        ));
    }
    Ok((distance * (hyperfocal - focal_length)) / denominator)
}

/// Total depth of field: the span between far and near points.
pub fn depth_of_field_mm(far_point: f64, near_point: f64) -> f64 {
    far_point - near_point
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // coc_from_viewing tests
    // =========================================================================

    #[test]
    fn coc_from_one_meter_viewing() {
        // (1 * 100 / 25) / 10 / 8 = 4 / 80
        assert_eq!(coc_from_viewing(1.0, 10.0, 8.0).unwrap(), 0.05);
    }

    #[test]
    fn coc_scales_with_viewing_distance() {
        let near = coc_from_viewing(0.25, 5.0, 1.0).unwrap();
        let far = coc_from_viewing(0.5, 5.0, 1.0).unwrap();
        assert!((far - 2.0 * near).abs() < 1e-12);
    }

    #[test]
    fn coc_zero_enlargement_is_error() {
        let result = coc_from_viewing(1.0, 10.0, 0.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    #[test]
    fn coc_zero_resolution_is_error() {
        let result = coc_from_viewing(1.0, 0.0, 8.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    // =========================================================================
    // hyperfocal_mm tests
    // =========================================================================

    #[test]
    fn hyperfocal_fifty_mm_full_frame() {
        // 2500 / (1.4 * 0.029) + 50
        let h = hyperfocal_mm(50.0, 1.4, 0.029).unwrap();
        assert!((h - 61626.354).abs() < 0.001);
    }

    #[test]
    fn hyperfocal_halves_when_stopping_down_one_stop_twice() {
        let wide = hyperfocal_mm(50.0, 1.4, 0.029).unwrap() - 50.0;
        let narrow = hyperfocal_mm(50.0, 2.8, 0.029).unwrap() - 50.0;
        assert!((wide - 2.0 * narrow).abs() < 1e-6);
    }

    #[test]
    fn hyperfocal_zero_aperture_is_error() {
        let result = hyperfocal_mm(50.0, 0.0, 0.029);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    #[test]
    fn hyperfocal_zero_coc_is_error() {
        let result = hyperfocal_mm(50.0, 2.8, 0.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    #[test]
    fn hyperfocal_cancelling_denominator_is_error() {
        // N·c + f == 0
        let result = hyperfocal_mm(-1.0, 1.0, 1.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    // =========================================================================
    // far_point_mm / near_point_mm tests
    // =========================================================================

    #[test]
    fn far_and_near_bracket_subject() {
        let h = hyperfocal_mm(50.0, 2.8, 0.029).unwrap();
        let far = far_point_mm(h, 1000.0, 50.0).unwrap();
        let near = near_point_mm(h, 1000.0, 50.0).unwrap();
        assert!(near < 1000.0 && 1000.0 < far);
    }

    #[test]
    fn far_point_at_hyperfocal_is_error() {
        let result = far_point_mm(1000.0, 1000.0, 200.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    #[test]
    fn far_point_beyond_hyperfocal_is_negative() {
        let far = far_point_mm(1000.0, 2000.0, 200.0).unwrap();
        // 2000 * 800 / -1000
        assert_eq!(far, -1600.0);
    }

    #[test]
    fn near_point_zero_denominator_is_error() {
        // H + d - 2f = 100 + 100 - 200
        let result = near_point_mm(100.0, 100.0, 100.0);
        assert!(matches!(result, Err(OpticsError::DivisionByZero(_))));
    }

    #[test]
    fn near_point_exact_value() {
        // 500 * 800 / (1000 + 500 - 400)
        let near = near_point_mm(1000.0, 500.0, 200.0).unwrap();
        assert!((near - 363.636_363_636).abs() < 1e-6);
    }

    #[test]
    fn depth_of_field_is_difference() {
        assert_eq!(depth_of_field_mm(1200.0, 800.0), 400.0);
    }
}
