use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Represents a mass spectrum with associated m/z values and intensities.
///
/// Every spectrum exposed outside the averaging step is ordered by ascending
/// m/z; `is_sorted_by_mz` checks that invariant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MzSpectrum {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl MzSpectrum {
    /// Constructs a new `MzSpectrum`.
    ///
    /// # Arguments
    ///
    /// * `mz` - A vector of m/z values.
    /// * `intensity` - A vector of intensity values corresponding to the m/z values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pepcore::data::spectrum::MzSpectrum;
    ///
    /// let spectrum = MzSpectrum::new(vec![100.0, 200.0], vec![10.0, 20.0]);
    /// assert_eq!(spectrum.mz, vec![100.0, 200.0]);
    /// assert_eq!(spectrum.intensity, vec![10.0, 20.0]);
    /// ```
    pub fn new(mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        MzSpectrum { mz, intensity }
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Iterates the spectrum as (m/z, intensity) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz
            .iter()
            .copied()
            .zip(self.intensity.iter().copied())
    }

    pub fn total_intensity(&self) -> f64 {
        self.intensity.iter().sum()
    }

    pub fn is_sorted_by_mz(&self) -> bool {
        self.mz.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Formats the `MzSpectrum` for display.
impl Display for MzSpectrum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let base_peak = self
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match base_peak {
            Some((mz, intensity)) => write!(
                f,
                "MzSpectrum(data points: {}, max by intensity: ({:.3}, {}))",
                self.len(),
                mz,
                intensity
            ),
            None => write!(f, "MzSpectrum(data points: 0)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_pairs() {
        let spectrum = MzSpectrum::new(vec![100.0, 200.0], vec![10.0, 20.0]);
        let peaks: Vec<(f64, f64)> = spectrum.iter().collect();
        assert_eq!(peaks, vec![(100.0, 10.0), (200.0, 20.0)]);
    }

    #[test]
    fn test_total_intensity() {
        let spectrum = MzSpectrum::new(vec![100.0, 200.0, 300.0], vec![1.5, 2.5, 6.0]);
        assert_eq!(spectrum.total_intensity(), 10.0);
    }

    #[test]
    fn test_sort_invariant_check() {
        assert!(MzSpectrum::new(vec![100.0, 200.0], vec![1.0, 1.0]).is_sorted_by_mz());
        assert!(!MzSpectrum::new(vec![200.0, 100.0], vec![1.0, 1.0]).is_sorted_by_mz());
        assert!(MzSpectrum::default().is_sorted_by_mz());
    }

    #[test]
    fn test_display_handles_empty_spectrum() {
        assert_eq!(format!("{}", MzSpectrum::default()), "MzSpectrum(data points: 0)");
    }
}
