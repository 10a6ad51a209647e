//! SMOTE over-sampling followed by Tomek-link cleaning

use super::config::ResamplerConfig;
use super::{majority_class, require_two_classes, ResampleResult, Sampler, Smote, TomekLinks};
use crate::dataset::LabeledData;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Combined over/under-sampler.
///
/// The minority class is first grown to the majority count with SMOTE, then
/// Tomek links are removed. The class cleaned by Tomek is the majority of the
/// input, fixed before over-sampling makes the counts equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoteTomek {
    smote: Smote,
    tomek: TomekLinks,
}

impl SmoteTomek {
    pub fn new(config: &ResamplerConfig) -> Self {
        Self {
            smote: Smote::new()
                .with_k_neighbors(config.k_neighbors)
                .with_seed(config.random_state)
                .with_neighbor_policy(config.neighbor_policy),
            tomek: TomekLinks::new(config.tomek_strategy),
        }
    }
}

impl Default for SmoteTomek {
    fn default() -> Self {
        Self::new(&ResamplerConfig::default())
    }
}

impl Sampler for SmoteTomek {
    fn fit_resample(&self, data: &LabeledData) -> Result<ResampleResult> {
        let counts = data.class_counts();
        require_two_classes(&counts)?;
        let (majority, _) = majority_class(&counts).unwrap_or_default();

        let over = self.smote.fit_resample(data)?;
        let cleaned = self.tomek.clean(&over.data, majority);

        info!(
            rows_in = data.n_rows(),
            synthetic = over.n_synthetic,
            removed = cleaned.n_removed,
            rows_out = cleaned.data.n_rows(),
            "resampled split"
        );

        Ok(ResampleResult {
            data: cleaned.data,
            n_synthetic: over.n_synthetic,
            n_removed: cleaned.n_removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::synthetic::NeighborPolicy;
    use ndarray::{array, Array1, Array2};

    fn overlapping_data() -> LabeledData {
        // majority on a line, minority interleaved near one end
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..16 {
            rows.push(i as f64);
            rows.push(0.0);
            labels.push(0i64);
        }
        for i in 0..4 {
            rows.push(12.4 + i as f64);
            rows.push(0.1);
            labels.push(1i64);
        }
        LabeledData::new(
            Array2::from_shape_vec((20, 2), rows).unwrap(),
            Array1::from_vec(labels),
        )
        .unwrap()
    }

    #[test]
    fn test_oversamples_then_cleans_majority() {
        let config = ResamplerConfig::new().with_k_neighbors(3);
        let result = SmoteTomek::new(&config)
            .fit_resample(&overlapping_data())
            .unwrap();

        assert_eq!(result.n_synthetic, 12);
        let counts = result.data.class_counts();
        assert_eq!(counts[&1], 16);
        assert_eq!(counts[&0], 16 - result.n_removed);
        assert_eq!(result.data.x().nrows(), result.data.y().len());
    }

    #[test]
    fn test_deterministic_across_calls() {
        let config = ResamplerConfig::new().with_k_neighbors(3);
        let sampler = SmoteTomek::new(&config);
        let a = sampler.fit_resample(&overlapping_data()).unwrap();
        let b = sampler.fit_resample(&overlapping_data()).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn test_default_strict_policy_needs_six_minority_rows() {
        let err = SmoteTomek::default()
            .fit_resample(&overlapping_data())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientSamples { .. }));

        let config = ResamplerConfig::new().with_neighbor_policy(NeighborPolicy::Shrink);
        assert!(SmoteTomek::new(&config)
            .fit_resample(&overlapping_data())
            .is_ok());
    }

    #[test]
    fn test_single_class_fails() {
        let data = LabeledData::new(array![[0.0], [1.0]], array![1, 1]).unwrap();
        assert!(SmoteTomek::default().fit_resample(&data).is_err());
    }
}
