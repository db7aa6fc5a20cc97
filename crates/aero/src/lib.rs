//! Lift and drag coefficients from a quadratic drag polar.

/// Calibration of the linear lift curve and quadratic drag polar.
///
/// Angles are in degrees; `cy_slope` is per degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolar {
    pub cy0: f64,
    pub cy_slope: f64,
    pub cx0: f64,
    pub induced_factor: f64,
    pub cx_min: f64,
    pub alpha_min_deg: f64,
    pub alpha_max_deg: f64,
}

impl Default for DragPolar {
    fn default() -> Self {
        Self {
            cy0: -0.06,
            cy_slope: 0.080,
            cx0: 0.018,
            induced_factor: 0.028,
            cx_min: 0.020,
            alpha_min_deg: 0.0,
            alpha_max_deg: 12.0,
        }
    }
}

impl DragPolar {
    /// Lift coefficient for an (unclamped) angle of attack.
    #[inline]
    pub fn lift_coefficient(&self, alpha_deg: f64) -> f64 {
        self.cy0 + self.cy_slope * alpha_deg
    }

    /// Drag coefficient `Cx = Cx0 + k·Cy²`, with alpha clamped to the polar's
    /// validity range and the result floored at `cx_min`.
    pub fn drag_coefficient(&self, alpha_deg: f64) -> f64 {
        let alpha = alpha_deg.clamp(self.alpha_min_deg, self.alpha_max_deg);
        let cy = self.lift_coefficient(alpha);
        (self.cx0 + self.induced_factor * cy * cy).max(self.cx_min)
    }

    /// Angle of attack at which lift (and therefore induced drag) vanishes.
    pub fn min_drag_alpha_deg(&self) -> f64 {
        -self.cy0 / self.cy_slope
    }
}

/// Drag coefficient of the baseline polar.
pub fn drag_coefficient(alpha_deg: f64) -> f64 {
    DragPolar::default().drag_coefficient(alpha_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_below_floor() {
        let polar = DragPolar::default();
        let mut alpha = -10.0;
        while alpha <= 25.0 {
            assert!(polar.drag_coefficient(alpha) >= 0.020);
            alpha += 0.25;
        }
    }

    #[test]
    fn clamps_angle_of_attack() {
        assert_eq!(drag_coefficient(-5.0), drag_coefficient(0.0));
        assert_eq!(drag_coefficient(20.0), drag_coefficient(12.0));
    }

    #[test]
    fn non_decreasing_away_from_min_drag() {
        let polar = DragPolar::default();
        let alpha0 = polar.min_drag_alpha_deg();
        assert!((alpha0 - 0.75).abs() < 1e-12);

        let mut previous = polar.drag_coefficient(alpha0);
        let mut offset = 0.0;
        while offset <= 12.0 {
            let cx = polar.drag_coefficient(alpha0 + offset);
            assert!(cx >= previous);
            previous = cx;
            offset += 0.1;
        }

        let mut previous = polar.drag_coefficient(alpha0);
        let mut offset = 0.0;
        while offset <= 5.0 {
            let cx = polar.drag_coefficient(alpha0 - offset);
            assert!(cx >= previous);
            previous = cx;
            offset += 0.1;
        }
    }

    #[test]
    fn high_alpha_matches_quadratic_polar() {
        // Cy(10°) = 0.74, Cx = 0.018 + 0.028 · 0.74²
        let cx = drag_coefficient(10.0);
        assert!((cx - (0.018 + 0.028 * 0.74 * 0.74)).abs() < 1e-12);
    }
}
