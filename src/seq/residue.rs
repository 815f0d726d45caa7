use super::sequence::{Sequence, SequenceKind};
use crate::error::{Result, SeqError};

/// The one-letter codes accepted for amino acid sequences. Stop (`*`) and ambiguity codes
/// (`B`, `Z`, `X`, ...) are not accepted, so every accepted residue has a mass below.
pub const AMINO_ACIDS: &str = "ARNDCEQGHILKMFPSTWYV";

/// Average molecular weight of the free amino acid, in daltons.
pub fn average_mass(residue: char) -> Option<f64> {
    let mass = match residue.to_ascii_uppercase() {
        'A' => 89.09,
        'R' => 174.20,
        'N' => 132.12,
        'D' => 133.10,
        'C' => 121.16,
        'E' => 147.13,
        'Q' => 146.15,
        'G' => 75.07,
        'H' => 155.16,
        'I' => 131.17,
        'L' => 131.17,
        'K' => 146.19,
        'M' => 149.21,
        'F' => 165.19,
        'P' => 115.13,
        'S' => 105.09,
        'T' => 119.12,
        'W' => 204.23,
        'Y' => 181.19,
        'V' => 117.15,
        _ => return None,
    };
    Some(mass)
}

impl Sequence {
    /// Sums the average residue masses of an amino acid sequence. No water is subtracted for
    /// peptide bonds.
    ///
    /// # Errors
    ///
    /// * [`SeqError::UnsupportedOperation`] for nucleotide sequences.
    /// * [`SeqError::UnknownResidue`] if a residue has no table entry.
    pub fn molecular_weight(&self) -> Result<f64> {
        if self.kind() != SequenceKind::AminoAcid {
            return Err(SeqError::UnsupportedOperation {
                operation: "molecular_weight",
                kind: self.kind(),
            });
        }

        self.as_str()
            .chars()
            .map(|residue| average_mass(residue).ok_or(SeqError::UnknownResidue { residue }))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        assert_eq!(AMINO_ACIDS.len(), 20);
        for residue in AMINO_ACIDS.chars() {
            assert!(average_mass(residue).is_some(), "{residue}");
            assert!(average_mass(residue.to_ascii_lowercase()).is_some(), "{residue}");
        }
    }

    #[test]
    fn kek() {
        let weight = Sequence::protein("KEK").unwrap().molecular_weight().unwrap();
        assert!((weight - 439.5).abs() < 0.5, "{weight}");
    }

    #[test]
    fn case_insensitive_lookup() {
        let upper = Sequence::protein("MKV").unwrap().molecular_weight().unwrap();
        let lower = Sequence::protein("mkv").unwrap().molecular_weight().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn empty_weighs_nothing() {
        assert_eq!(Sequence::protein("").unwrap().molecular_weight().unwrap(), 0.0);
    }

    #[test]
    fn unknown_residue() {
        assert_eq!(average_mass('X'), None);
        assert_eq!(average_mass('*'), None);
    }

    #[test]
    fn nucleotides_have_no_weight() {
        let err = Sequence::dna("ACGT").unwrap().molecular_weight().unwrap_err();
        assert_eq!(
            err,
            SeqError::UnsupportedOperation {
                operation: "molecular_weight",
                kind: SequenceKind::Dna
            }
        );
    }
}
