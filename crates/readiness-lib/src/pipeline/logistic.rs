//! L2-regularized binary logistic regression
//!
//! Minimizes `C * sum(logloss) + 0.5 * |w|^2` with an unpenalized intercept,
//! solved with Newton's method. The solver is deterministic, so refitting on
//! unchanged data reproduces the same parameters bit for bit.

use crate::models::NUM_FEATURES;
use serde::{Deserialize, Serialize};

/// Parameters are the feature weights followed by the intercept
const NUM_PARAMS: usize = NUM_FEATURES + 1;

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Inverse regularization strength
    pub regularization: f64,
    pub max_iterations: usize,
    /// Stop once the largest Newton step is below this
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            regularization: 1.0,
            max_iterations: 100,
            tolerance: 1e-10,
        }
    }
}

/// Fitted linear decision function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: [f64; NUM_FEATURES],
    pub intercept: f64,
}

/// Solver diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSummary {
    pub iterations: usize,
    pub converged: bool,
}

impl LogisticRegression {
    /// Fit on already-normalized rows against 0/1 targets
    pub fn fit(
        rows: &[[f64; NUM_FEATURES]],
        targets: &[f64],
        settings: &SolverSettings,
    ) -> Result<(Self, FitSummary), String> {
        if rows.is_empty() || rows.len() != targets.len() {
            return Err(format!(
                "need matching non-empty rows and targets, got {} and {}",
                rows.len(),
                targets.len()
            ));
        }
        if settings.regularization <= 0.0 || !settings.regularization.is_finite() {
            return Err(format!("regularization must be positive, got {}", settings.regularization));
        }

        let mut params = [0.0; NUM_PARAMS];
        let mut summary = FitSummary {
            iterations: 0,
            converged: false,
        };

        while summary.iterations < settings.max_iterations {
            summary.iterations += 1;

            let mut gradient = [0.0; NUM_PARAMS];
            let mut hessian = [[0.0; NUM_PARAMS]; NUM_PARAMS];

            for (row, &y) in rows.iter().zip(targets) {
                let x = augment(row);
                let p = sigmoid(dot(&x, &params));
                let w = p * (1.0 - p);
                for a in 0..NUM_PARAMS {
                    gradient[a] += settings.regularization * (p - y) * x[a];
                    for b in 0..NUM_PARAMS {
                        hessian[a][b] += settings.regularization * w * x[a] * x[b];
                    }
                }
            }

            // L2 penalty on the weights only
            for a in 0..NUM_FEATURES {
                gradient[a] += params[a];
                hessian[a][a] += 1.0;
            }

            let step = solve(hessian, gradient).ok_or_else(|| "singular Hessian".to_string())?;
            let mut largest = 0.0f64;
            for a in 0..NUM_PARAMS {
                params[a] -= step[a];
                largest = largest.max(step[a].abs());
            }

            if params.iter().any(|v| !v.is_finite()) {
                return Err("parameters diverged to non-finite values".to_string());
            }
            if largest < settings.tolerance {
                summary.converged = true;
                break;
            }
        }

        let mut weights = [0.0; NUM_FEATURES];
        weights.copy_from_slice(&params[..NUM_FEATURES]);
        let model = Self {
            weights,
            intercept: params[NUM_FEATURES],
        };
        Ok((model, summary))
    }

    pub fn decision_function(&self, z: &[f64; NUM_FEATURES]) -> f64 {
        self.weights.iter().zip(z).map(|(w, v)| w * v).sum::<f64>() + self.intercept
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, z: &[f64; NUM_FEATURES]) -> f64 {
        sigmoid(self.decision_function(z))
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.weights.iter().chain(std::iter::once(&self.intercept)).any(|v| !v.is_finite()) {
            return Err("classifier parameters are not finite".to_string());
        }
        Ok(())
    }
}

/// Numerically stable logistic function
pub fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

fn augment(row: &[f64; NUM_FEATURES]) -> [f64; NUM_PARAMS] {
    let mut x = [1.0; NUM_PARAMS];
    x[..NUM_FEATURES].copy_from_slice(row);
    x
}

fn dot(a: &[f64; NUM_PARAMS], b: &[f64; NUM_PARAMS]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Gaussian elimination with partial pivoting
fn solve(
    mut a: [[f64; NUM_PARAMS]; NUM_PARAMS],
    mut b: [f64; NUM_PARAMS],
) -> Option<[f64; NUM_PARAMS]> {
    for col in 0..NUM_PARAMS {
        let pivot = (col..NUM_PARAMS).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..NUM_PARAMS {
            let factor = a[row][col] / a[col][col];
            for k in col..NUM_PARAMS {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; NUM_PARAMS];
    for row in (0..NUM_PARAMS).rev() {
        let tail: f64 = ((row + 1)..NUM_PARAMS).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-15);
        assert!(sigmoid(-800.0) >= 0.0);
        assert_eq!(sigmoid(800.0), 1.0);
    }

    #[test]
    fn test_solve_linear_system() {
        let a = [[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
        let b = [3.0, 5.0, 5.0];
        let x = solve(a, b).unwrap();
        for (expected, got) in [1.0, 1.0, 1.0].iter().zip(x) {
            assert!((expected - got).abs() < 1e-12);
        }
    }

    #[test]
    fn test_solve_singular() {
        let a = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];
        assert!(solve(a, [1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_fit_separates_classes() {
        let rows = [[-2.0, 0.0], [-1.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        let targets = [0.0, 0.0, 1.0, 1.0];
        let (model, summary) = LogisticRegression::fit(&rows, &targets, &SolverSettings::default()).unwrap();

        assert!(summary.converged);
        assert!(model.weights[0] > 0.0);
        // Symmetric data, symmetric penalty: no intercept, no weight on a zero feature
        assert!(model.intercept.abs() < 1e-9);
        assert!(model.weights[1].abs() < 1e-9);
        assert!(model.predict_proba(&[2.0, 0.0]) > 0.5);
        assert!(model.predict_proba(&[-2.0, 0.0]) < 0.5);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let rows = [[-1.5, 0.3], [-0.2, -1.0], [0.4, 0.9], [1.3, -0.2], [0.1, 0.1]];
        let targets = [0.0, 0.0, 1.0, 1.0, 0.0];
        let settings = SolverSettings::default();
        let (first, _) = LogisticRegression::fit(&rows, &targets, &settings).unwrap();
        let (second, _) = LogisticRegression::fit(&rows, &targets, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let settings = SolverSettings::default();
        assert!(LogisticRegression::fit(&[], &[], &settings).is_err());
        assert!(LogisticRegression::fit(&[[0.0, 0.0]], &[1.0, 0.0], &settings).is_err());

        let bad = SolverSettings {
            regularization: 0.0,
            ..SolverSettings::default()
        };
        assert!(LogisticRegression::fit(&[[0.0, 0.0]], &[1.0], &bad).is_err());
    }
}
