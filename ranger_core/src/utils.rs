// ranger_core/src/utils.rs

use std::f64::consts::{PI, TAU};

/// Wraps an angle to the half-open interval (-π, π].
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wraps_into_half_open_interval() {
        assert_abs_diff_eq!(normalize_angle(0.0), 0.0);
        assert_abs_diff_eq!(normalize_angle(PI), PI);
        assert_abs_diff_eq!(normalize_angle(-PI), PI);
        assert_abs_diff_eq!(normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-7.0), -7.0 + TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(8.0), 8.0 - TAU, epsilon = 1e-12);
    }
}
