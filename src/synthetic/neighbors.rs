//! Exact nearest-neighbour search over feature rows

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Distance paired with a row index; ties order by index
#[derive(Debug, Clone, Copy)]
struct DistIdx(f64, usize);

impl PartialEq for DistIdx {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for DistIdx {}
impl PartialOrd for DistIdx {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for DistIdx {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

/// Squared Euclidean distance
#[inline]
pub(crate) fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// The `k` nearest other rows of every row, closest first.
///
/// A row is never its own neighbour, but an identical row at another index
/// is. Equal distances resolve to the lower index. Rows are searched in
/// parallel; the result is identical to a sequential search.
pub(crate) fn k_nearest(points: &Array2<f64>, k: usize) -> Vec<Vec<usize>> {
    let n = points.nrows();
    (0..n)
        .into_par_iter()
        .map(|i| {
            let point = points.row(i);
            // Max-heap of the k best so far: O(n log k)
            let mut heap: BinaryHeap<DistIdx> = BinaryHeap::with_capacity(k + 1);
            for (j, other) in points.rows().into_iter().enumerate() {
                if j == i {
                    continue;
                }
                let candidate = DistIdx(squared_distance(point, other), j);
                if heap.len() < k {
                    heap.push(candidate);
                } else if let Some(worst) = heap.peek() {
                    if candidate < *worst {
                        heap.pop();
                        heap.push(candidate);
                    }
                }
            }
            heap.into_sorted_vec().into_iter().map(|d| d.1).collect()
        })
        .collect()
}

/// The single nearest other row of every row
pub(crate) fn nearest(points: &Array2<f64>) -> Vec<Option<usize>> {
    k_nearest(points, 1)
        .into_iter()
        .map(|nn| nn.first().copied())
        .collect()
}
