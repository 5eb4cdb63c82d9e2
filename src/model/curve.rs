//! Piecewise-linear response curve (e.g. skill -> shooting accuracy).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Sorted points, linearly interpolated; flat beyond both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    points: Vec<CurvePoint>,
}

impl ResponseCurve {
    pub fn new(mut points: Vec<CurvePoint>) -> Self {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Value at `x`. An empty curve evaluates to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            if x <= b.x {
                return lerp(a.y, b.y, inverse_lerp(a.x, b.x, x));
            }
        }
        last.y
    }
}

/// Linear blend from `a` to `b`, `t` clamped to `[0, 1]`. Exact at both ends.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return b;
    }
    let t = t.max(0.0);
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> ResponseCurve {
        ResponseCurve::new(vec![
            CurvePoint { x: 10.0, y: 1.0 },
            CurvePoint { x: 0.0, y: 0.5 },
        ])
    }

    #[test]
    fn interpolates_between_points() {
        assert!((curve().evaluate(5.0) - 0.75).abs() < 1e-12);
        assert_eq!(curve().evaluate(0.0), 0.5);
        assert_eq!(curve().evaluate(10.0), 1.0);
    }

    #[test]
    fn flat_outside_range() {
        assert_eq!(curve().evaluate(-3.0), 0.5);
        assert_eq!(curve().evaluate(25.0), 1.0);
    }

    #[test]
    fn empty_curve_is_zero() {
        assert_eq!(ResponseCurve::new(vec![]).evaluate(4.0), 0.0);
    }

    #[test]
    fn lerp_helpers() {
        assert_eq!(lerp(0.9, 0.6, 0.0), 0.9);
        assert_eq!(lerp(0.9, 0.6, 1.0), 0.6);
        assert_eq!(inverse_lerp(3.0, 12.0, 3.0), 0.0);
        assert_eq!(inverse_lerp(3.0, 12.0, 12.0), 1.0);
        assert_eq!(inverse_lerp(2.0, 2.0, 5.0), 0.0);
    }

    #[test]
    fn lerp_between_equal_values_is_exact() {
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            assert_eq!(lerp(0.7, 0.7, t), 0.7, "t = {}", t);
        }
    }
}
