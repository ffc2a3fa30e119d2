use thiserror::Error;

/// Errors raised by the matching core.
///
/// All variants are raised synchronously at the point of detection and are
/// never retried internally; recovery (e.g. widening a tolerance) is a caller
/// decision. `NoMatches` marks an empty but well-formed result, so callers can
/// tell it apart from malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PepcoreError {
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("no residue mass for code '{0}', supply an override for non-standard residues")]
    MissingResidueMass(char),

    #[error("fragment charge must be positive, got {0}")]
    InvalidCharge(i32),

    #[error("ppm tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("averaging produced no consensus bins")]
    EmptyConsensusSpectrum,

    #[error("no theoretical ion matched the consensus spectrum")]
    NoMatches,
}
