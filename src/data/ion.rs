use std::fmt;
use std::fmt::{Display, Formatter};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Peptide backbone fragment ion series: b from the N-terminus, y from the
/// C-terminus. Ordered so b sorts before y in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IonSeries {
    B,
    Y,
}

impl Display for IonSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IonSeries::B => write!(f, "b"),
            IonSeries::Y => write!(f, "y"),
        }
    }
}

/// A theoretically predicted fragment ion.
///
/// For a b-ion the index is the prefix length; for a y-ion it is the number of
/// residues in the suffix. Labels are unique by construction
/// (series + index + charge).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FragmentIon {
    pub series: IonSeries,
    pub index: usize,
    pub charge: i32,
    pub mz: f64,
}

impl FragmentIon {
    /// Renders the conventional ion label, e.g. `b5^2+`.
    pub fn label(&self) -> String {
        format!("{}{}^{}+", self.series, self.index, self.charge)
    }
}

impl Display for FragmentIon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FragmentIon({}, mz: {:.4})", self.label(), self.mz)
    }
}

/// Recovers (series, index, charge) from a label like `b5^2+` or `y10^1+`.
///
/// Returns `None` for anything that does not match the label grammar.
pub fn parse_ion_label(label: &str) -> Option<(IonSeries, usize, i32)> {
    let pattern = Regex::new(r"^([by])(\d+)\^(\d+)\+$").unwrap();
    let captures = pattern.captures(label)?;
    let series = match &captures[1] {
        "b" => IonSeries::B,
        _ => IonSeries::Y,
    };
    let index = captures[2].parse().ok()?;
    let charge = captures[3].parse().ok()?;
    Some((series, index, charge))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_format() {
        let ion = FragmentIon { series: IonSeries::B, index: 5, charge: 2, mz: 345.1234 };
        assert_eq!(ion.label(), "b5^2+");
        let ion = FragmentIon { series: IonSeries::Y, index: 10, charge: 1, mz: 1045.5 };
        assert_eq!(ion.label(), "y10^1+");
    }

    #[test]
    fn test_label_round_trip() {
        let ion = FragmentIon { series: IonSeries::Y, index: 3, charge: 2, mz: 200.0 };
        assert_eq!(parse_ion_label(&ion.label()), Some((IonSeries::Y, 3, 2)));
    }

    #[test]
    fn test_malformed_labels_are_rejected() {
        assert_eq!(parse_ion_label("a5^2+"), None);
        assert_eq!(parse_ion_label("b5^2"), None);
        assert_eq!(parse_ion_label("b^2+"), None);
        assert_eq!(parse_ion_label(""), None);
    }

    #[test]
    fn test_series_orders_b_before_y() {
        assert!(IonSeries::B < IonSeries::Y);
    }
}
