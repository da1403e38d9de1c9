use serde::{Deserialize, Serialize};

/// Piecewise-linear spawn weight over floor depth.
///
/// Rises from `min_prob` at `start_floor` to `peak_prob` at `peak_floor`,
/// then falls back to `min_prob` at `end_floor`. Outside that window the
/// two segments are extended and the result is clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnCurve {
    pub min_prob: f64,
    pub peak_prob: f64,
    pub start_floor: i32,
    pub peak_floor: i32,
    pub end_floor: i32,
}

impl Default for SpawnCurve {
    fn default() -> Self {
        Self {
            min_prob: 0.0,
            peak_prob: 1.0,
            start_floor: 1,
            peak_floor: 5,
            end_floor: 10,
        }
    }
}

impl SpawnCurve {
    pub fn new(
        min_prob: f64,
        peak_prob: f64,
        start_floor: i32,
        peak_floor: i32,
        end_floor: i32,
    ) -> Self {
        Self {
            min_prob,
            peak_prob,
            start_floor,
            peak_floor,
            end_floor,
        }
    }

    /// Spawn weight on `floor`, never negative
    pub fn weight_at(&self, floor: i32) -> f64 {
        let rise = self.peak_prob - self.min_prob;
        let weight = if floor <= self.peak_floor {
            let span = self.peak_floor - self.start_floor;
            if span <= 0 {
                self.peak_prob
            } else {
                self.min_prob + rise * f64::from(floor - self.start_floor) / f64::from(span)
            }
        } else {
            let span = self.end_floor - self.peak_floor;
            if span <= 0 {
                self.peak_prob
            } else {
                self.peak_prob - rise * f64::from(floor - self.peak_floor) / f64::from(span)
            }
        };
        weight.max(0.0)
    }

    /// Floors must be ordered and probabilities within `[0, 1]`.
    pub fn is_well_formed(&self) -> bool {
        let prob_ok = |p: f64| (0.0..=1.0).contains(&p);
        self.start_floor <= self.peak_floor
            && self.peak_floor <= self.end_floor
            && prob_ok(self.min_prob)
            && prob_ok(self.peak_prob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_boundaries() {
        let curve = SpawnCurve::new(0.0, 1.0, 1, 5, 10);
        assert!(approx(curve.weight_at(1), 0.0));
        assert!(approx(curve.weight_at(5), 1.0));
        assert!(approx(curve.weight_at(10), 0.0));
        assert!(approx(curve.weight_at(7), 0.6));
        assert!(approx(curve.weight_at(3), 0.5));
    }

    #[test]
    fn test_outside_window_clamps_to_zero() {
        let curve = SpawnCurve::new(0.0, 1.0, 2, 5, 10);
        assert_eq!(curve.weight_at(1), 0.0);
        assert_eq!(curve.weight_at(15), 0.0);
    }

    #[test]
    fn test_flat_segments() {
        let curve = SpawnCurve::new(0.2, 0.8, 3, 3, 3);
        assert!(approx(curve.weight_at(3), 0.8));
        assert!(approx(curve.weight_at(9), 0.8));
    }

    #[test]
    fn test_well_formed() {
        assert!(SpawnCurve::default().is_well_formed());
        assert!(!SpawnCurve::new(0.0, 1.0, 6, 5, 10).is_well_formed());
        assert!(!SpawnCurve::new(0.0, 1.5, 1, 5, 10).is_well_formed());
    }
}
