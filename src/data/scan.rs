use serde::{Deserialize, Serialize};

use crate::algorithm::cluster::{cluster_precursors, ParentCluster};
use crate::algorithm::matching::ppm_delta;
use crate::data::spectrum::MzSpectrum;
use crate::error::PepcoreError;

/// One scan as exposed by an external spectrum source.
///
/// The source is consumed exactly once, in order; the core never assumes
/// random access or a second iteration over the same source instance.
/// Retention time is in minutes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ms_level: i32,
    pub precursor_mz: Option<f64>,
    pub retention_time: Option<f64>,
    pub spectrum: MzSpectrum,
}

impl ScanRecord {
    pub fn new(
        ms_level: i32,
        precursor_mz: Option<f64>,
        retention_time: Option<f64>,
        spectrum: MzSpectrum,
    ) -> Self {
        ScanRecord {
            ms_level,
            precursor_mz,
            retention_time,
            spectrum,
        }
    }
}

/// Collects the precursor m/z of every MS-level-2 scan, single pass.
///
/// Scans without a recorded precursor are skipped.
pub fn precursor_observations<I>(scans: I) -> Vec<f64>
where
    I: IntoIterator<Item = ScanRecord>,
{
    scans
        .into_iter()
        .filter(|scan| scan.ms_level == 2)
        .filter_map(|scan| scan.precursor_mz)
        .collect()
}

/// Ranks the precursor species present in a scan sequence.
///
/// Clusters the MS2 precursor observations within `dedup_ppm` and returns the
/// consensus parents ordered by descending scan count.
pub fn rank_precursors<I>(scans: I, dedup_ppm: f64) -> Result<Vec<ParentCluster>, PepcoreError>
where
    I: IntoIterator<Item = ScanRecord>,
{
    cluster_precursors(&precursor_observations(scans), dedup_ppm)
}

/// Gates a scan sequence down to the MS2 peak lists that feed averaging.
///
/// * scans with an MS level other than 2 are dropped
/// * if an RT window bound is given, scans with a known retention time outside
///   it are dropped; scans without a retention time pass
/// * if `precursor_mz` is given, scans must carry a precursor within
///   `precursor_ppm` of it; scans without a precursor are dropped
///
/// The peak lists are yielded in scan order, single pass.
pub fn filtered_fragment_spectra<I>(
    scans: I,
    precursor_mz: Option<f64>,
    precursor_ppm: f64,
    rt_min: Option<f64>,
    rt_max: Option<f64>,
) -> Vec<MzSpectrum>
where
    I: IntoIterator<Item = ScanRecord>,
{
    let mut spectra = Vec::new();
    for scan in scans {
        if scan.ms_level != 2 {
            continue;
        }

        if let Some(rt) = scan.retention_time {
            if rt_min.is_some_and(|lo| rt < lo) || rt_max.is_some_and(|hi| rt > hi) {
                continue;
            }
        }

        if let Some(target) = precursor_mz {
            match scan.precursor_mz {
                Some(observed) if ppm_delta(observed, target) <= precursor_ppm => {}
                _ => continue,
            }
        }

        spectra.push(scan.spectrum);
    }
    spectra
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms2(precursor_mz: Option<f64>, retention_time: Option<f64>) -> ScanRecord {
        ScanRecord::new(
            2,
            precursor_mz,
            retention_time,
            MzSpectrum::new(vec![100.0], vec![1.0]),
        )
    }

    #[test]
    fn test_precursor_observations_keeps_ms2_only() {
        let scans = vec![
            ScanRecord::new(1, None, None, MzSpectrum::default()),
            ms2(Some(500.0), None),
            ms2(None, None),
            ms2(Some(600.0), None),
        ];
        assert_eq!(precursor_observations(scans), vec![500.0, 600.0]);
    }

    #[test]
    fn test_rank_precursors_counts_repeated_species() {
        let scans = vec![
            ms2(Some(500.0), None),
            ms2(Some(500.001), None),
            ms2(Some(700.0), None),
        ];
        let clusters = rank_precursors(scans, 10.0).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count, 2);
        assert!((clusters[0].mz - 500.0005).abs() < 1e-9);
    }

    #[test]
    fn test_rt_window_gating() {
        let scans = vec![
            ms2(None, Some(4.0)),
            ms2(None, Some(12.5)),
            ms2(None, Some(30.0)),
            // a scan with no recorded RT passes an RT gate
            ms2(None, None),
        ];
        let spectra = filtered_fragment_spectra(scans, None, 10.0, Some(10.0), Some(20.0));
        assert_eq!(spectra.len(), 2);
    }

    #[test]
    fn test_precursor_gating() {
        let scans = vec![
            ms2(Some(500.0005), None),
            ms2(Some(500.02), None),
            // no precursor recorded, cannot pass a precursor gate
            ms2(None, None),
        ];
        let spectra = filtered_fragment_spectra(scans, Some(500.0), 10.0, None, None);
        assert_eq!(spectra.len(), 1);
    }

    #[test]
    fn test_ms1_scans_never_pass() {
        let scans = vec![ScanRecord::new(1, Some(500.0), Some(5.0), MzSpectrum::default())];
        assert!(filtered_fragment_spectra(scans, None, 10.0, None, None).is_empty());
    }
}
