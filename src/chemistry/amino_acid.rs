use std::collections::HashMap;

use crate::error::PepcoreError;

/// Amino Acid Masses
///
/// # Returns
///
/// * `HashMap<char, f64>` - a map of the 20 standard amino acid one-letter codes
///   to their monoisotopic neutral residue masses in Dalton
///
/// # Example
///
/// ```
/// use pepcore::chemistry::amino_acid::amino_acid_masses;
///
/// let amino_acid_masses = amino_acid_masses();
/// assert_eq!(amino_acid_masses.get(&'K'), Some(&128.09496));
/// ```
pub fn amino_acid_masses() -> HashMap<char, f64> {
    let mut map = HashMap::new();
    map.insert('A', 71.03711);
    map.insert('R', 156.10111);
    map.insert('N', 114.04293);
    map.insert('D', 115.02694);
    map.insert('C', 103.00919);
    map.insert('E', 129.04259);
    map.insert('Q', 128.05858);
    map.insert('G', 57.02146);
    map.insert('H', 137.05891);
    map.insert('I', 113.08406);
    map.insert('L', 113.08406);
    map.insert('K', 128.09496);
    map.insert('M', 131.04049);
    map.insert('F', 147.06841);
    map.insert('P', 97.05276);
    map.insert('S', 87.03203);
    map.insert('T', 101.04768);
    map.insert('W', 186.07931);
    map.insert('Y', 163.06333);
    map.insert('V', 99.06841);
    map
}

/// Residue mass configuration: the standard monoisotopic table plus
/// caller-supplied overrides for non-standard one-letter codes (e.g. B, J, X).
///
/// Overrides take precedence over the standard table. A code found in neither
/// is a data error, never a silent default.
#[derive(Debug, Clone)]
pub struct ResidueMasses {
    standard: HashMap<char, f64>,
    overrides: HashMap<char, f64>,
}

impl ResidueMasses {
    pub fn new() -> Self {
        ResidueMasses {
            standard: amino_acid_masses(),
            overrides: HashMap::new(),
        }
    }

    /// Builds a table honoring the given overrides. Keys are case-insensitive.
    pub fn with_overrides(overrides: HashMap<char, f64>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(code, mass)| (code.to_ascii_uppercase(), mass))
            .collect();
        ResidueMasses {
            standard: amino_acid_masses(),
            overrides,
        }
    }

    /// Monoisotopic residue mass for a one-letter code, case-insensitive.
    ///
    /// # Errors
    ///
    /// * `InvalidSequence` for a code outside the ASCII alphabet
    /// * `MissingResidueMass` for an alphabetic code with no standard entry and no override
    pub fn mass(&self, code: char) -> Result<f64, PepcoreError> {
        let code = code.to_ascii_uppercase();
        if !code.is_ascii_alphabetic() {
            return Err(PepcoreError::InvalidSequence(format!(
                "residue code '{}' is not a letter",
                code
            )));
        }
        if let Some(&mass) = self.overrides.get(&code) {
            return Ok(mass);
        }
        self.standard
            .get(&code)
            .copied()
            .ok_or(PepcoreError::MissingResidueMass(code))
    }
}

impl Default for ResidueMasses {
    fn default() -> Self {
        ResidueMasses::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_twenty_codes() {
        let masses = amino_acid_masses();
        assert_eq!(masses.len(), 20);
        assert_eq!(masses.get(&'P'), Some(&97.05276));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let masses = ResidueMasses::new();
        assert_eq!(masses.mass('k').unwrap(), 128.09496);
        assert_eq!(masses.mass('K').unwrap(), 128.09496);
    }

    #[test]
    fn test_missing_non_standard_code() {
        let masses = ResidueMasses::new();
        assert_eq!(masses.mass('B'), Err(PepcoreError::MissingResidueMass('B')));
        assert_eq!(masses.mass('X'), Err(PepcoreError::MissingResidueMass('X')));
    }

    #[test]
    fn test_override_takes_precedence() {
        let masses = ResidueMasses::with_overrides(HashMap::from([('x', 101.5), ('G', 60.0)]));
        assert_eq!(masses.mass('X').unwrap(), 101.5);
        assert_eq!(masses.mass('G').unwrap(), 60.0);
    }

    #[test]
    fn test_non_alphabetic_code_is_invalid() {
        let masses = ResidueMasses::new();
        assert!(matches!(
            masses.mass('*'),
            Err(PepcoreError::InvalidSequence(_))
        ));
    }
}
