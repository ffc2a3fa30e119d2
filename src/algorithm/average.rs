use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::data::spectrum::MzSpectrum;
use crate::error::PepcoreError;

/// Configuration for consensus spectrum building
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AveragingConfig {
    /// Half-width in ppm of the fixed window around each bin anchor (default: 10.0)
    pub bin_ppm: f64,
    /// Keep only this many of the most intense bins, if set (default: 200)
    pub take_top_n: Option<usize>,
}

impl Default for AveragingConfig {
    fn default() -> Self {
        AveragingConfig {
            bin_ppm: 10.0,
            take_top_n: Some(200),
        }
    }
}

/// Merges the peak lists of repeated scans into one consensus spectrum.
///
/// # Arguments
///
/// * `scans` - per-scan peak lists, already gated upstream by precursor and RT
/// * `config` - binning tolerance and optional intensity cap
///
/// # Returns
///
/// A spectrum strictly ascending in m/z whose bins carry the
/// intensity-weighted mean m/z and the summed intensity of their members.
///
/// # Algorithm
///
/// All peaks are pooled and sorted ascending. A bin opens at the m/z of the
/// first unconsumed peak; its window `[anchor*(1 - ppm*1e-6), anchor*(1 + ppm*1e-6)]`
/// stays fixed for the bin's lifetime and is NOT recentered as members are
/// absorbed (the precursor clustering step recenters, this step must not).
/// Contiguous in-window peaks are absorbed, the bin closes, the next opens at
/// the first peak outside the window. When `take_top_n` caps the result, the
/// most intense bins are kept and re-sorted ascending by m/z.
///
/// # Errors
///
/// * `InvalidTolerance` when `bin_ppm` is not positive
/// * `EmptyConsensusSpectrum` when no input peaks exist or no bin survives
pub fn average_spectra(
    scans: &[MzSpectrum],
    config: &AveragingConfig,
) -> Result<MzSpectrum, PepcoreError> {
    if config.bin_ppm <= 0.0 {
        return Err(PepcoreError::InvalidTolerance(config.bin_ppm));
    }

    let mut pooled: Vec<(f64, f64)> = scans.iter().flat_map(|scan| scan.iter()).collect();
    if pooled.is_empty() {
        return Err(PepcoreError::EmptyConsensusSpectrum);
    }
    pooled.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut bins: Vec<(f64, f64)> = Vec::new();
    let n = pooled.len();
    let mut i = 0;
    while i < n {
        let anchor = pooled[i].0;
        let lo = anchor * (1.0 - config.bin_ppm * 1e-6);
        let hi = anchor * (1.0 + config.bin_ppm * 1e-6);

        let mut j = i;
        let mut sum_intensity = 0.0;
        let mut sum_mz_weighted = 0.0;
        while j < n && lo <= pooled[j].0 && pooled[j].0 <= hi {
            sum_intensity += pooled[j].1;
            sum_mz_weighted += pooled[j].0 * pooled[j].1;
            j += 1;
        }
        if sum_intensity > 0.0 {
            bins.push((sum_mz_weighted / sum_intensity, sum_intensity));
        }
        i = j;
    }

    if bins.is_empty() {
        return Err(PepcoreError::EmptyConsensusSpectrum);
    }

    if let Some(top_n) = config.take_top_n {
        if top_n > 0 && bins.len() > top_n {
            bins.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            bins.truncate(top_n);
        }
    }
    bins.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let (mz, intensity) = bins.into_iter().unzip();
    Ok(MzSpectrum::new(mz, intensity))
}
