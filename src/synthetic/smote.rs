//! SMOTE over-sampling of the minority class

use super::config::NeighborPolicy;
use super::neighbors::k_nearest;
use super::{minority_class, majority_class, require_two_classes, ResampleResult, Sampler};
use crate::constants::{DEFAULT_K_NEIGHBORS, DEFAULT_RANDOM_STATE};
use crate::dataset::LabeledData;
use crate::error::{PipelineError, Result};
use ndarray::{concatenate, Array1, Array2, Axis};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// SMOTE (Synthetic Minority Over-sampling Technique).
///
/// Generates `n_majority - n_minority` rows for the minority class only. Each
/// synthetic row lies on the segment between a minority row and one of its
/// `k_neighbors` nearest minority neighbours, and is appended after the
/// original rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smote {
    /// Number of nearest neighbours
    k_neighbors: usize,
    /// Random seed
    seed: u64,
    neighbor_policy: NeighborPolicy,
}

impl Smote {
    /// Create new SMOTE sampler
    pub fn new() -> Self {
        Self {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            seed: DEFAULT_RANDOM_STATE,
            neighbor_policy: NeighborPolicy::Strict,
        }
    }

    /// Set number of neighbors
    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = policy;
        self
    }

    /// Neighbour count usable for a minority class of `n_minority` rows
    fn effective_k(&self, class: i64, n_minority: usize) -> Result<usize> {
        let k = self.k_neighbors;
        if n_minority > k {
            return Ok(k);
        }
        match self.neighbor_policy {
            NeighborPolicy::Strict => Err(PipelineError::InsufficientSamples {
                split: String::new(),
                reason: format!(
                    "class {} has {} samples, SMOTE with k_neighbors={} needs at least {}",
                    class,
                    n_minority,
                    k,
                    k + 1
                ),
            }),
            NeighborPolicy::Shrink => Ok(n_minority.saturating_sub(1)),
        }
    }

    /// Interpolate `n_samples` new rows from the minority rows
    fn generate(&self, minority: &Array2<f64>, k: usize, n_samples: usize) -> Array2<f64> {
        let n_minority = minority.nrows();
        let mut rng = StdRng::seed_from_u64(self.seed);

        if k == 0 {
            // a lone row has no neighbour to interpolate towards
            let row = minority.row(0);
            return Array2::from_shape_fn((n_samples, minority.ncols()), |(_, j)| row[j]);
        }

        let neighbors = k_nearest(minority, k);
        let picks: Vec<usize> = (0..n_samples)
            .map(|_| rng.gen_range(0..n_minority * k))
            .collect();
        let gaps: Vec<f64> = (0..n_samples).map(|_| rng.gen::<f64>()).collect();

        let mut out = Array2::zeros((n_samples, minority.ncols()));
        for (i, (&pick, &gap)) in picks.iter().zip(gaps.iter()).enumerate() {
            let base = minority.row(pick / k);
            let neighbor = minority.row(neighbors[pick / k][pick % k]);
            for (j, cell) in out.row_mut(i).iter_mut().enumerate() {
                *cell = base[j] + gap * (neighbor[j] - base[j]);
            }
        }
        out
    }
}

impl Default for Smote {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for Smote {
    fn fit_resample(&self, data: &LabeledData) -> Result<ResampleResult> {
        if self.k_neighbors == 0 {
            return Err(PipelineError::ConfigError(
                "k_neighbors must be at least 1".to_string(),
            ));
        }
        let counts = data.class_counts();
        require_two_classes(&counts)?;

        let (minority, n_minority) =
            minority_class(&counts).ok_or_else(|| PipelineError::InsufficientSamples {
                split: String::new(),
                reason: "no rows to resample".to_string(),
            })?;
        let (_, n_majority) = majority_class(&counts).unwrap_or((minority, n_minority));

        let n_samples = n_majority - n_minority;
        if n_samples == 0 {
            return Ok(ResampleResult::unchanged(data));
        }

        let k = self.effective_k(minority, n_minority)?;

        let indices: Vec<usize> = data
            .y()
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == minority)
            .map(|(i, _)| i)
            .collect();
        let minority_x = data.x().select(Axis(0), &indices);

        debug!(
            class = minority,
            n_minority,
            n_samples,
            k,
            "generating synthetic minority rows"
        );
        let synthetic = self.generate(&minority_x, k, n_samples);

        let x = concatenate(Axis(0), &[data.x().view(), synthetic.view()])?;
        let y = concatenate(
            Axis(0),
            &[data.y().view(), Array1::from_elem(n_samples, minority).view()],
        )?;

        Ok(ResampleResult {
            data: LabeledData::new(x, y)?,
            n_synthetic: n_samples,
            n_removed: 0,
        })
    }
}
