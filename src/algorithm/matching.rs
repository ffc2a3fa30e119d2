use std::collections::BTreeSet;

use itertools::Itertools;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::chemistry::modification::TerminalMod;
use crate::data::ion::{FragmentIon, IonSeries};
use crate::data::spectrum::MzSpectrum;
use crate::error::PepcoreError;

/// Signed relative mass error in parts per million.
///
/// A zero theoretical denominator yields 0 by convention: a legitimate ion m/z
/// is never physically zero, and this guards incidental division faults
/// without masking real errors.
pub fn ppm_error(observed: f64, theoretical: f64) -> f64 {
    if theoretical == 0.0 {
        return 0.0;
    }
    (observed - theoretical) / theoretical * 1e6
}

/// Absolute ppm difference between two m/z values.
pub fn ppm_delta(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    ((a - b) / b).abs() * 1e6
}

/// An observed peak accepted by the tolerance matcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakMatch {
    pub mz: f64,
    pub intensity: f64,
    /// absolute ppm distance to the queried target
    pub ppm: f64,
}

/// Finds the observed peak closest to `target_mz` within `ppm_tol`.
///
/// Scans the full spectrum; among qualifying peaks the one with the strictly
/// smallest ppm wins, so ties go to the first-encountered (lowest m/z, since
/// spectra are ascending). Returns `None` when the spectrum is empty or no
/// peak qualifies.
pub fn nearest_match(spectrum: &MzSpectrum, target_mz: f64, ppm_tol: f64) -> Option<PeakMatch> {
    let mut best: Option<PeakMatch> = None;
    let mut best_ppm = f64::INFINITY;
    for (mz, intensity) in spectrum.iter() {
        let ppm = ppm_delta(mz, target_mz);
        if ppm <= ppm_tol && ppm < best_ppm {
            best_ppm = ppm;
            best = Some(PeakMatch { mz, intensity, ppm });
        }
    }
    best
}

/// One reportable row joining a theoretical ion with its observed peak.
///
/// The observed fields are optional in the record layout shared with report
/// writers, but the assembler only ever emits matched rows, so both carry
/// values in every row it returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub charge: i32,
    pub series: IonSeries,
    pub index: usize,
    pub label: String,
    pub theoretical_mz: f64,
    pub observed_mz: Option<f64>,
    /// signed ppm error, (observed - theoretical) / theoretical * 1e6
    pub ppm: Option<f64>,
    pub intensity: f64,
}

/// Joins a theoretical ion list against a consensus spectrum.
///
/// Each ion is matched in generation order; ions with no qualifying peak are
/// dropped (absence is the not-matched signal, no placeholder rows). The
/// surviving rows are sorted by fragment charge, then series (b before y),
/// then residue index.
///
/// # Errors
///
/// * `InvalidTolerance` when `ppm_tol` is not positive
/// * `NoMatches` when not a single ion matched; distinguishable from
///   malformed input so the caller may retry with a wider tolerance
pub fn assemble_summary(
    spectrum: &MzSpectrum,
    ions: &[FragmentIon],
    ppm_tol: f64,
) -> Result<Vec<MatchRow>, PepcoreError> {
    if ppm_tol <= 0.0 {
        return Err(PepcoreError::InvalidTolerance(ppm_tol));
    }

    let mut rows: Vec<MatchRow> = Vec::new();
    for ion in ions {
        if let Some(hit) = nearest_match(spectrum, ion.mz, ppm_tol) {
            rows.push(MatchRow {
                charge: ion.charge,
                series: ion.series,
                index: ion.index,
                label: ion.label(),
                theoretical_mz: ion.mz,
                observed_mz: Some(hit.mz),
                ppm: Some(ppm_error(hit.mz, ion.mz)),
                intensity: hit.intensity,
            });
        }
    }
    if rows.is_empty() {
        return Err(PepcoreError::NoMatches);
    }

    rows.sort_by(|a, b| {
        (a.charge, a.series, a.index).cmp(&(b.charge, b.series, b.index))
    });
    Ok(rows)
}

/// Matches a batch of candidate ion lists against one consensus spectrum in
/// parallel. Results are per candidate; a `NoMatches` for one candidate does
/// not fail the batch.
pub fn assemble_summaries_for_candidates(
    spectrum: &MzSpectrum,
    candidates: &[Vec<FragmentIon>],
    ppm_tol: f64,
    num_threads: usize,
) -> Vec<Result<Vec<MatchRow>, PepcoreError>> {
    let pool = ThreadPoolBuilder::new().num_threads(num_threads).build().unwrap();
    pool.install(|| {
        candidates
            .par_iter()
            .map(|ions| assemble_summary(spectrum, ions, ppm_tol))
            .collect()
    })
}

/// Cleavage positions (1..L-1) covered by the matched rows.
///
/// A b-ion at index i marks the cut after residue i; a y-ion at index i marks
/// the cut after residue L-i. Consumed by coverage diagrams.
pub fn cleavage_positions(
    sequence_len: usize,
    rows: &[MatchRow],
) -> (BTreeSet<usize>, BTreeSet<usize>) {
    let mut b_cuts = BTreeSet::new();
    let mut y_cuts = BTreeSet::new();
    for row in rows {
        if row.index < 1 || row.index >= sequence_len {
            continue;
        }
        match row.series {
            IonSeries::B => {
                b_cuts.insert(row.index);
            }
            IonSeries::Y => {
                let cut = sequence_len - row.index;
                if cut >= 1 {
                    y_cuts.insert(cut);
                }
            }
        }
    }
    (b_cuts, y_cuts)
}

/// Provenance handed to the report-writer collaborator alongside the rows:
/// what was matched, against how many scans, under which gates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub peptide: String,
    pub charges: Vec<i32>,
    /// snapped parent m/z the scans were gated on
    pub parent_mz: Option<f64>,
    pub ppm_tolerance: f64,
    pub scans_averaged: usize,
    pub rt_min: Option<f64>,
    pub rt_max: Option<f64>,
    pub bin_ppm: f64,
    pub terminal_mod: TerminalMod,
}

impl RunParameters {
    /// Comma-joined charge list for report headers, e.g. "1,2".
    pub fn charge_label(&self) -> String {
        self.charges.iter().map(|z| z.to_string()).join(",")
    }
}
