//! Quadratic gas-usage fit for offline calibration
//!
//! Routes with size-dependent execution paths burn more gas on larger fills.
//! Fitting observed `(trade_size, gas_units)` samples gives a calibrated
//! `gas_limit` to feed the cost model; the fit never runs on the live path.

use nalgebra::{Matrix3, Vector3};

/// Least-squares fit of `gas_units ≈ a + b·size + c·size²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasUsageCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl GasUsageCurve {
    /// Normal-equations solve over the samples. `None` below three samples or
    /// when the system is singular (e.g. all samples at one size).
    pub fn fit(samples: &[(f64, f64)]) -> Option<Self> {
        if samples.len() < 3 {
            return None;
        }

        let n = samples.len() as f64;
        let (mut sx, mut sx2, mut sx3, mut sx4) = (0.0, 0.0, 0.0, 0.0);
        let (mut sy, mut sxy, mut sx2y) = (0.0, 0.0, 0.0);
        for &(x, y) in samples {
            let x2 = x * x;
            sx += x;
            sx2 += x2;
            sx3 += x2 * x;
            sx4 += x2 * x2;
            sy += y;
            sxy += x * y;
            sx2y += x2 * y;
        }

        let normal = Matrix3::new(
            n, sx, sx2, //
            sx, sx2, sx3, //
            sx2, sx3, sx4,
        );
        let rhs = Vector3::new(sy, sxy, sx2y);
        let coeffs = normal.lu().solve(&rhs)?;

        Some(Self {
            a: coeffs[0],
            b: coeffs[1],
            c: coeffs[2],
        })
    }

    /// Predicted gas units at a trade size, floored at zero.
    pub fn predict_units(&self, size: f64) -> f64 {
        (self.a + self.b * size + self.c * size * size).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_recovers_exact_quadratic() {
        let samples: Vec<(f64, f64)> = (1..=6)
            .map(|i| {
                let x = i as f64;
                (x, 120_000.0 + 350.0 * x + 12.5 * x * x)
            })
            .collect();
        let curve = GasUsageCurve::fit(&samples).expect("well-conditioned fit");
        assert_relative_eq!(curve.a, 120_000.0, max_relative = 1e-6);
        assert_relative_eq!(curve.b, 350.0, max_relative = 1e-6);
        assert_relative_eq!(curve.c, 12.5, max_relative = 1e-6);
        assert_relative_eq!(curve.predict_units(10.0), 124_750.0, max_relative = 1e-6);
    }

    #[test]
    fn test_fit_requires_three_samples() {
        assert!(GasUsageCurve::fit(&[]).is_none());
        assert!(GasUsageCurve::fit(&[(1.0, 100.0), (2.0, 200.0)]).is_none());
    }

    #[test]
    fn test_fit_rejects_degenerate_spread() {
        let samples = vec![(2.0, 100.0), (2.0, 110.0), (2.0, 120.0), (2.0, 130.0)];
        assert!(GasUsageCurve::fit(&samples).is_none());
    }

    #[test]
    fn test_prediction_floors_at_zero() {
        let curve = GasUsageCurve {
            a: -1_000.0,
            b: 0.0,
            c: 0.0,
        };
        assert_eq!(curve.predict_units(5.0), 0.0);
    }
}
