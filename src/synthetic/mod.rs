//! Class-imbalance correction
//!
//! Provides the resamplers applied to each split:
//! - SMOTE over-sampling of the minority class
//! - Tomek-link cleaning near the class boundary
//! - SMOTE followed by Tomek cleaning, the combination used by the pipeline
//!
//! Every sampler consumes a [`LabeledData`] and produces a new one, so a
//! feature row and its label are always added or removed together.

mod combine;
mod config;
mod neighbors;
mod smote;
mod tomek;

pub use combine::SmoteTomek;
pub use config::{NeighborPolicy, ResamplerConfig, TomekStrategy};
pub use smote::Smote;
pub use tomek::TomekLinks;

use crate::dataset::LabeledData;
use crate::error::{PipelineError, Result};
use std::collections::BTreeMap;

/// Result of resampling
#[derive(Debug, Clone)]
pub struct ResampleResult {
    /// Resampled rows and labels
    pub data: LabeledData,
    /// Number of synthetic rows appended
    pub n_synthetic: usize,
    /// Number of rows removed
    pub n_removed: usize,
}

impl ResampleResult {
    fn unchanged(data: &LabeledData) -> Self {
        Self {
            data: data.clone(),
            n_synthetic: 0,
            n_removed: 0,
        }
    }
}

/// Trait for samplers.
///
/// Samplers hold configuration only; every call starts from the configured
/// seed, so resampling the same data twice gives the same rows.
pub trait Sampler: Send + Sync {
    fn fit_resample(&self, data: &LabeledData) -> Result<ResampleResult>;
}

/// Class with the fewest rows; ties resolve to the lowest label
pub fn minority_class(counts: &BTreeMap<i64, usize>) -> Option<(i64, usize)> {
    counts
        .iter()
        .min_by_key(|(_, &count)| count)
        .map(|(&class, &count)| (class, count))
}

/// Class with the most rows; ties resolve to the lowest label
pub fn majority_class(counts: &BTreeMap<i64, usize>) -> Option<(i64, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(i64, usize)>, (&class, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((class, count)),
        })
}

/// Both classes must be present before any resampling
pub(crate) fn require_two_classes(counts: &BTreeMap<i64, usize>) -> Result<()> {
    if counts.len() < 2 {
        return Err(PipelineError::InsufficientSamples {
            split: String::new(),
            reason: format!("need at least 2 classes to resample, found {}", counts.len()),
        });
    }
    Ok(())
}
