//! Standard scaling (zero mean, unit variance) fit on the training set

use crate::models::NUM_FEATURES;
use serde::{Deserialize, Serialize};

/// Per-feature centering and scaling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; NUM_FEATURES],
    pub scale: [f64; NUM_FEATURES],
}

impl StandardScaler {
    /// Fit on raw feature rows. Uses the population standard deviation;
    /// a constant feature gets a scale of 1.0.
    pub fn fit(rows: &[[f64; NUM_FEATURES]]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let n = rows.len() as f64;
        let mut mean = [0.0; NUM_FEATURES];
        let mut scale = [1.0; NUM_FEATURES];

        for j in 0..NUM_FEATURES {
            mean[j] = rows.iter().map(|r| r[j]).sum::<f64>() / n;
            let var = rows.iter().map(|r| (r[j] - mean[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > f64::EPSILON {
                scale[j] = std;
            }
        }

        Some(Self { mean, scale })
    }

    pub fn transform(&self, features: &[f64; NUM_FEATURES]) -> [f64; NUM_FEATURES] {
        let mut out = [0.0; NUM_FEATURES];
        for j in 0..NUM_FEATURES {
            out[j] = (features[j] - self.mean[j]) / self.scale[j];
        }
        out
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.mean.iter().any(|v| !v.is_finite()) {
            return Err("scaler mean is not finite".to_string());
        }
        if self.scale.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("scaler scale must be finite and positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_mean_and_population_std() {
        let rows = [[2.0, 1.0], [4.0, 1.0], [4.0, 3.0], [6.0, 3.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        assert_eq!(scaler.mean, [4.0, 2.0]);
        assert!((scaler.scale[0] - 2.0f64.sqrt()).abs() < 1e-12);
        assert!((scaler.scale[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_centers_training_rows() {
        let rows = [[1.0, 10.0], [3.0, 20.0], [5.0, 30.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let z: Vec<_> = rows.iter().map(|r| scaler.transform(r)).collect();
        for j in 0..NUM_FEATURES {
            let mean: f64 = z.iter().map(|r| r[j]).sum::<f64>() / 3.0;
            let var: f64 = z.iter().map(|r| r[j].powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_feature_scale_one() {
        let rows = [[1.0, 2.0], [3.0, 2.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        assert_eq!(scaler.scale[1], 1.0);
        assert_eq!(scaler.transform(&[2.0, 2.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_empty_rows() {
        assert!(StandardScaler::fit(&[]).is_none());
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let scaler = StandardScaler {
            mean: [0.0, 0.0],
            scale: [1.0, 0.0],
        };
        assert!(scaler.validate().is_err());
    }
}
