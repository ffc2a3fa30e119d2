use itertools::Itertools;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::chemistry::amino_acid::ResidueMasses;
use crate::chemistry::constants::MASS_PROTON;
use crate::chemistry::modification::TerminalMod;
use crate::data::ion::{FragmentIon, IonSeries};
use crate::error::PepcoreError;

/// Normalizes a fragment charge set: positive, de-duplicated, ascending.
/// An empty set defaults to singly charged fragments.
fn normalize_charges(charges: &[i32]) -> Result<Vec<i32>, PepcoreError> {
    for &z in charges {
        if z <= 0 {
            return Err(PepcoreError::InvalidCharge(z));
        }
    }
    let normalized: Vec<i32> = charges.iter().copied().unique().sorted().collect();
    if normalized.is_empty() {
        Ok(vec![1])
    } else {
        Ok(normalized)
    }
}

fn residue_mass_vec(sequence: &str, masses: &ResidueMasses) -> Result<Vec<f64>, PepcoreError> {
    sequence.chars().map(|code| masses.mass(code)).collect()
}

fn calculate_mz(neutral_mass: f64, charge: i32) -> f64 {
    (neutral_mass + charge as f64 * MASS_PROTON) / charge as f64
}

/// Generates the theoretical b/y fragment ion series for a peptide.
///
/// # Arguments
///
/// * `sequence` - residue one-letter codes, N- to C-terminus
/// * `charges` - fragment charge states; validated positive, de-duplicated,
///   sorted ascending, empty defaults to {1}
/// * `masses` - residue mass table with any non-standard overrides
/// * `terminal_mod` - C-terminal modification; shifts y-ions only
///
/// # Returns
///
/// For every internal cleavage position i in 1..L and every charge z, one
/// b-ion at `(prefix_i + z*proton)/z` and one y-ion at
/// `(suffix_{L-i} + adjustment + z*proton)/z`, where the adjustment is the
/// modification's replacement for the hydrolysis water term. Exactly
/// `2*(L-1)*C` ions; a sequence shorter than two residues has no internal
/// cleavage and yields an empty list.
///
/// Deterministic, pure function of its inputs; performs no I/O.
///
/// # Errors
///
/// * `InvalidCharge` for any non-positive requested charge
/// * `InvalidSequence` for a non-alphabetic residue code
/// * `MissingResidueMass` for a residue with neither a standard entry nor an override
pub fn generate_b_y_ions(
    sequence: &str,
    charges: &[i32],
    masses: &ResidueMasses,
    terminal_mod: TerminalMod,
) -> Result<Vec<FragmentIon>, PepcoreError> {
    let charges = normalize_charges(charges)?;
    let residues = residue_mass_vec(sequence, masses)?;
    let length = residues.len();
    if length < 2 {
        return Ok(Vec::new());
    }

    // prefix[i-1] = neutral mass of the first i residues (b series base),
    // suffix[i-1] = neutral mass of the last i residues (y series base)
    let mut prefix = Vec::with_capacity(length);
    let mut acc = 0.0;
    for &mass in &residues {
        acc += mass;
        prefix.push(acc);
    }

    let mut suffix = Vec::with_capacity(length);
    let mut acc = 0.0;
    for &mass in residues.iter().rev() {
        acc += mass;
        suffix.push(acc);
    }

    // b-ions never receive the terminal delta
    let y_adjustment = terminal_mod.y_series_adjustment();

    let mut ions = Vec::with_capacity(2 * (length - 1) * charges.len());
    for i in 1..length {
        let b_neutral = prefix[i - 1];
        let y_index = length - i;
        let y_neutral = suffix[y_index - 1] + y_adjustment;
        for &z in &charges {
            ions.push(FragmentIon {
                series: IonSeries::B,
                index: i,
                charge: z,
                mz: calculate_mz(b_neutral, z),
            });
            ions.push(FragmentIon {
                series: IonSeries::Y,
                index: y_index,
                charge: z,
                mz: calculate_mz(y_neutral, z),
            });
        }
    }
    Ok(ions)
}

/// Generates b/y series for a batch of candidate sequences in parallel.
///
/// Each generation is a pure function over disjoint inputs, so the candidates
/// require no coordination.
pub fn generate_b_y_ions_for_sequences(
    sequences: Vec<&str>,
    num_threads: usize,
    charges: &[i32],
    masses: &ResidueMasses,
    terminal_mod: TerminalMod,
) -> Result<Vec<Vec<FragmentIon>>, PepcoreError> {
    let pool = ThreadPoolBuilder::new().num_threads(num_threads).build().unwrap();
    pool.install(|| {
        sequences
            .par_iter()
            .map(|sequence| generate_b_y_ions(sequence, charges, masses, terminal_mod))
            .collect()
    })
}
