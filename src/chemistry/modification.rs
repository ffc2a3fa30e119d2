use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::chemistry::constants::{
    AMIDATION_DELTA, DECARBOXYLATION_LOSS, DEHYDRATION_DELTA, MASS_H_ATOM, MASS_WATER,
};

/// A chemical alteration fixed to the peptide C-terminus.
///
/// Only the C-terminal-bearing ion series (y) is affected; b-ions never
/// receive a terminal-modification delta. The closed variant set replaces the
/// free-form labels of older tooling, so every variant carries an explicit
/// mass adjustment and nothing is triggered by substring matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalMod {
    #[default]
    None,
    AmidatedCTerm,
    DehydratedCTerm,
    /// Daptide decarboxylation: the standard +H2O term is replaced entirely.
    DecarboxylatedCTerm,
}

impl TerminalMod {
    /// Neutral-mass term added to a y-series suffix sum.
    ///
    /// The unmodified series gains one water from hydrolysis; the modified
    /// variants shift or replace that water term.
    pub fn y_series_adjustment(&self) -> f64 {
        match self {
            TerminalMod::None => MASS_WATER,
            TerminalMod::AmidatedCTerm => MASS_WATER + AMIDATION_DELTA,
            TerminalMod::DehydratedCTerm => MASS_WATER + DEHYDRATION_DELTA,
            TerminalMod::DecarboxylatedCTerm => -DECARBOXYLATION_LOSS + MASS_H_ATOM,
        }
    }
}

impl Display for TerminalMod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TerminalMod::None => write!(f, "None"),
            TerminalMod::AmidatedCTerm => write!(f, "C-term: Amidated"),
            TerminalMod::DehydratedCTerm => write!(f, "C-term: Dehydrated"),
            TerminalMod::DecarboxylatedCTerm => write!(f, "C-term: Decarboxylated (daptide)"),
        }
    }
}
