//! One-dimensional k-means used to split points of interest into day buckets
//!
//! Each value is its own feature, so "distance" between a value and a centre is
//! just the absolute difference. Runs are seeded, and the best of several
//! k-means++ initializations is kept, so the same input always yields the
//! same partition.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
pub struct KMeansParams {
    /// Requested number of clusters, capped by the number of distinct values
    pub clusters: usize,
    pub seed: u64,
    /// Number of independent initializations; the lowest inertia wins
    pub restarts: u32,
    pub max_iterations: u32,
    /// Convergence threshold relative to the variance of the input
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster index per input value. Index 0 is the cluster with the smallest centre.
    pub labels: Vec<usize>,
    /// Ascending
    pub centers: Vec<f64>,
    /// Sum of squared distances from each value to its centre
    pub inertia: f64,
}

impl Clustering {
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.centers.len()
    }
}

/// Partition `values` into at most `params.clusters` groups.
#[must_use]
pub fn fit(values: &[f64], params: &KMeansParams) -> Clustering {
    let k = params.clusters.min(distinct_count(values));
    if k == 0 {
        return Clustering {
            labels: Vec::new(),
            centers: Vec::new(),
            inertia: 0.0,
        };
    }
    if k == 1 {
        let center = mean(values);
        return Clustering {
            labels: vec![0; values.len()],
            centers: vec![center],
            inertia: inertia(values, &[center], &vec![0; values.len()]),
        };
    }

    let tolerance = params.tolerance * variance(values);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut best = lloyd(values, init_centers(values, k, &mut rng), params.max_iterations, tolerance);
    trace!(attempt = 0, inertia = best.inertia, "k-means run finished");

    for attempt in 1..params.restarts {
        let initial = init_centers(values, k, &mut rng);
        let run = lloyd(values, initial, params.max_iterations, tolerance);
        trace!(attempt, inertia = run.inertia, "k-means run finished");

        if run.inertia < best.inertia {
            best = run;
        }
    }

    relabel_ascending(best)
}

/// k-means++ seeding: the first centre uniformly, every further centre with
/// probability proportional to its squared distance from the nearest chosen one.
fn init_centers(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centers = Vec::with_capacity(k);
    centers.push(values[rng.random_range(0..values.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = values
            .iter()
            .map(|&v| {
                centers
                    .iter()
                    .map(|&c| (v - c).powi(2))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            break;
        }

        let target = rng.random_range(0.0..total);
        let mut acc = 0.0;
        // first index whose cumulative weight passes the target; zero-weight
        // values never qualify so a chosen centre is never picked twice
        let picked = weights
            .iter()
            .position(|&w| {
                acc += w;
                acc > target
            })
            .or_else(|| weights.iter().rposition(|&w| w > 0.0));

        match picked {
            Some(index) => centers.push(values[index]),
            None => break,
        }
    }

    centers
}

fn lloyd(values: &[f64], mut centers: Vec<f64>, max_iterations: u32, tolerance: f64) -> Clustering {
    let mut labels = assign(values, &centers);

    for iteration in 0..max_iterations {
        let mut sums = vec![0.0; centers.len()];
        let mut counts = vec![0usize; centers.len()];
        for (&value, &label) in values.iter().zip(&labels) {
            sums[label] += value;
            counts[label] += 1;
        }

        let mut shift = 0.0;
        for (index, center) in centers.iter_mut().enumerate() {
            // an empty cluster keeps its previous centre
            if counts[index] > 0 {
                let updated = sums[index] / counts[index] as f64;
                shift += (updated - *center).powi(2);
                *center = updated;
            }
        }

        labels = assign(values, &centers);
        if shift <= tolerance {
            trace!(iteration, "k-means converged");
            break;
        }
    }

    let inertia = inertia(values, &centers, &labels);
    Clustering {
        labels,
        centers,
        inertia,
    }
}

/// Nearest centre per value; ties go to the lowest centre index.
fn assign(values: &[f64], centers: &[f64]) -> Vec<usize> {
    values
        .iter()
        .map(|&value| {
            let mut nearest = 0;
            let mut nearest_distance = f64::INFINITY;
            for (index, &center) in centers.iter().enumerate() {
                let distance = (value - center).powi(2);
                if distance < nearest_distance {
                    nearest = index;
                    nearest_distance = distance;
                }
            }
            nearest
        })
        .collect()
}

fn relabel_ascending(clustering: Clustering) -> Clustering {
    let mut order: Vec<usize> = (0..clustering.centers.len()).collect();
    order.sort_by(|&a, &b| clustering.centers[a].total_cmp(&clustering.centers[b]));

    let mut remap = vec![0; order.len()];
    for (new_label, &old_label) in order.iter().enumerate() {
        remap[old_label] = new_label;
    }

    Clustering {
        labels: clustering.labels.iter().map(|&l| remap[l]).collect(),
        centers: order.iter().map(|&i| clustering.centers[i]).collect(),
        inertia: clustering.inertia,
    }
}

fn inertia(values: &[f64], centers: &[f64], labels: &[usize]) -> f64 {
    values
        .iter()
        .zip(labels)
        .map(|(&v, &l)| (v - centers[l]).powi(2))
        .sum()
}

fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(clusters: usize) -> KMeansParams {
        KMeansParams {
            clusters,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }

    #[test]
    fn test_empty_input() {
        let result = fit(&[], &params(3));
        assert!(result.labels.is_empty());
        assert_eq!(result.cluster_count(), 0);
    }

    #[test]
    fn test_separates_obvious_groups() {
        let values = [100.0, 120.0, 90.0, 5000.0, 5100.0, 4900.0];
        let result = fit(&values, &params(2));

        assert_eq!(result.labels, vec![0, 0, 0, 1, 1, 1]);
        assert!((result.centers[0] - 103.333).abs() < 0.01);
        assert!((result.centers[1] - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_groups_labelled_by_ascending_centre() {
        let values = [9000.0, 10.0, 4000.0, 20.0, 9100.0, 4100.0];
        let result = fit(&values, &params(3));

        assert_eq!(result.labels, vec![2, 0, 1, 0, 2, 1]);
        assert!(result.centers.windows(2).all(|w| w[0] < w[1]));
    }

    #[rstest]
    #[case(&[250.0, 250.0, 250.0], 3)]
    #[case(&[7.0], 2)]
    fn test_identical_values_form_single_cluster(#[case] values: &[f64], #[case] k: usize) {
        let result = fit(values, &params(k));
        assert_eq!(result.cluster_count(), 1);
        assert!(result.labels.iter().all(|&l| l == 0));
        assert_eq!(result.inertia, 0.0);
    }

    #[test]
    fn test_clusters_capped_by_distinct_values() {
        let values = [5.0, 5.0, 900.0, 900.0];
        let result = fit(&values, &params(4));
        assert_eq!(result.cluster_count(), 2);
        assert_eq!(result.labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_one_cluster_per_value() {
        let values = [300.0, 100.0, 200.0];
        let result = fit(&values, &params(3));
        assert_eq!(result.labels, vec![2, 0, 1]);
        assert_eq!(result.inertia, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let values: Vec<f64> = (0..40i32).map(|i| f64::from((i * 37) % 101) * 50.0).collect();
        let first = fit(&values, &params(4));
        let second = fit(&values, &params(4));
        assert_eq!(first, second);
    }

    #[test]
    fn test_restarts_never_worse_than_single_run() {
        let values: Vec<f64> = (0..30i32).map(|i| f64::from((i * 13) % 29) * 17.0).collect();
        let single = fit(&values, &KMeansParams { restarts: 1, ..params(5) });
        let many = fit(&values, &params(5));
        assert!(many.inertia <= single.inertia + 1e-9);
    }
}
