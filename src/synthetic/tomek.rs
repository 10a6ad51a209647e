//! Tomek-link cleaning

use super::config::TomekStrategy;
use super::neighbors::nearest;
use super::{majority_class, ResampleResult, Sampler};
use crate::dataset::LabeledData;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Removes rows that form Tomek links.
///
/// Rows `i` and `j` form a link when their labels differ and each is the
/// other's nearest neighbour. Such pairs sit on the class boundary; removing
/// them sharpens it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomekLinks {
    strategy: TomekStrategy,
}

impl TomekLinks {
    pub fn new(strategy: TomekStrategy) -> Self {
        Self { strategy }
    }

    /// Indices of every row that belongs to a Tomek link
    pub fn link_members(data: &LabeledData) -> Vec<usize> {
        let nn = nearest(data.x());
        let y = data.y();

        (0..data.n_rows())
            .filter(|&i| match nn[i] {
                Some(j) => y[i] != y[j] && nn[j] == Some(i),
                None => false,
            })
            .collect()
    }

    /// Drop link members according to the strategy.
    ///
    /// `majority` is the class cleaned under [`TomekStrategy::Majority`]; the
    /// caller passes the majority of the data before any over-sampling.
    pub fn clean(&self, data: &LabeledData, majority: i64) -> ResampleResult {
        let members = Self::link_members(data);
        let y = data.y();

        let mut removed = vec![false; data.n_rows()];
        for &i in &members {
            removed[i] = match self.strategy {
                TomekStrategy::Majority => y[i] == majority,
                TomekStrategy::All => true,
            };
        }

        let keep: Vec<usize> = (0..data.n_rows()).filter(|&i| !removed[i]).collect();
        let n_removed = data.n_rows() - keep.len();
        debug!(links = members.len() / 2, n_removed, "removed Tomek link rows");

        ResampleResult {
            data: data.select_rows(&keep),
            n_synthetic: 0,
            n_removed,
        }
    }
}

impl Sampler for TomekLinks {
    fn fit_resample(&self, data: &LabeledData) -> Result<ResampleResult> {
        match majority_class(&data.class_counts()) {
            Some((majority, _)) => Ok(self.clean(data, majority)),
            None => Ok(ResampleResult::unchanged(data)),
        }
    }
}
