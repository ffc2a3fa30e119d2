use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algorithm::matching::ppm_delta;
use crate::error::PepcoreError;

/// A consensus precursor center and the number of raw observations folded into it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParentCluster {
    pub mz: f64,
    pub count: usize,
}

/// Groups raw precursor m/z observations into consensus clusters.
///
/// Precursor selection on real instruments repeats the same species across
/// consecutive MS2 scans; clustering collapses those near-duplicates into one
/// addressable parent ion.
///
/// # Arguments
///
/// * `observations` - raw precursor m/z values, any order
/// * `dedup_ppm` - join tolerance in ppm against the running cluster mean
///
/// # Returns
///
/// Clusters ordered by descending member count, ties by ascending center m/z.
/// Every input value lands in exactly one cluster.
///
/// # Algorithm
///
/// Single greedy pass over the ascending-sorted observations. A value joins
/// the open cluster when it lies within `dedup_ppm` of the cluster's mean over
/// all members seen so far (the mean is recomputed at every step, unlike the
/// fixed bin window used in peak averaging); otherwise the cluster is emitted
/// at its mean and a new one opens.
pub fn cluster_precursors(
    observations: &[f64],
    dedup_ppm: f64,
) -> Result<Vec<ParentCluster>, PepcoreError> {
    if dedup_ppm <= 0.0 {
        return Err(PepcoreError::InvalidTolerance(dedup_ppm));
    }
    if observations.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted = observations.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut clusters: Vec<ParentCluster> = Vec::new();
    let mut members: Vec<f64> = vec![sorted[0]];

    for &mz in &sorted[1..] {
        let center = members.iter().sum::<f64>() / members.len() as f64;
        if ppm_delta(mz, center) <= dedup_ppm {
            members.push(mz);
        } else {
            clusters.push(ParentCluster { mz: center, count: members.len() });
            members = vec![mz];
        }
    }
    let center = members.iter().sum::<f64>() / members.len() as f64;
    clusters.push(ParentCluster { mz: center, count: members.len() });

    clusters.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.mz.partial_cmp(&b.mz).unwrap_or(Ordering::Equal))
    });
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_counts_sum_to_input_length() {
        let observations = vec![500.0, 500.001, 600.0, 600.0005, 600.001, 700.0];
        let clusters = cluster_precursors(&observations, 10.0).unwrap();
        let total: usize = clusters.iter().map(|c| c.count).sum();
        assert_eq!(total, observations.len());
    }

    #[test]
    fn test_near_duplicates_collapse() {
        // 10 ppm at 500 m/z is 0.005 Da
        let clusters = cluster_precursors(&[500.001, 500.0, 700.0], 10.0).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count, 2);
        assert!((clusters[0].mz - 500.0005).abs() < 1e-9);
        assert_eq!(clusters[1].count, 1);
    }

    #[test]
    fn test_order_is_count_desc_then_mz_asc() {
        let observations = vec![500.0, 500.001, 600.0, 600.0005, 600.001, 700.0];
        let clusters = cluster_precursors(&observations, 10.0).unwrap();
        assert_eq!(clusters[0].count, 3); // 600 cluster
        assert_eq!(clusters[1].count, 2); // 500 cluster
        assert_eq!(clusters[2].count, 1); // 700 singleton
        // singletons tie on count and fall back to ascending m/z
        let singles = cluster_precursors(&[900.0, 300.0, 600.0], 10.0).unwrap();
        assert_eq!(
            singles.iter().map(|c| c.mz).collect::<Vec<f64>>(),
            vec![300.0, 600.0, 900.0]
        );
    }

    #[test]
    fn test_reclustering_centers_is_idempotent() {
        let observations = vec![500.0, 500.001, 600.0, 600.0005, 600.001, 700.0];
        let clusters = cluster_precursors(&observations, 10.0).unwrap();
        let centers: Vec<f64> = clusters.iter().map(|c| c.mz).collect();

        let reclustered = cluster_precursors(&centers, 10.0).unwrap();
        assert_eq!(reclustered.len(), clusters.len());
        for cluster in &reclustered {
            assert_eq!(cluster.count, 1);
        }
        let mut expected = centers.clone();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            reclustered.iter().map(|c| c.mz).collect::<Vec<f64>>(),
            expected
        );
    }

    #[test]
    fn test_empty_input_yields_no_clusters() {
        assert!(cluster_precursors(&[], 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_tolerance_is_rejected() {
        assert_eq!(
            cluster_precursors(&[500.0], 0.0),
            Err(PepcoreError::InvalidTolerance(0.0))
        );
    }
}
