use std::fmt;

use serde::Serialize;

use super::alphabet;
use crate::error::Result;

/// The kind of a sequence decides its alphabet and which operations it supports.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub enum SequenceKind {
    Dna,
    Rna,
    AminoAcid,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SequenceKind::Dna => "DNA",
            SequenceKind::Rna => "RNA",
            SequenceKind::AminoAcid => "amino acid",
        })
    }
}

/// An immutable run of symbols tagged with its kind.
///
/// Symbols keep the case they were given in. Every symbol is guaranteed (case-insensitively)
/// to belong to the alphabet of the kind, so a `Sequence` is always ASCII.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct Sequence {
    kind: SequenceKind,
    symbols: String,
}

impl Sequence {
    pub fn new(raw: &str, kind: SequenceKind) -> Result<Self> {
        alphabet::validate(raw, kind)
    }

    pub fn dna(raw: &str) -> Result<Self> {
        Self::new(raw, SequenceKind::Dna)
    }

    pub fn rna(raw: &str) -> Result<Self> {
        Self::new(raw, SequenceKind::Rna)
    }

    pub fn protein(raw: &str) -> Result<Self> {
        Self::new(raw, SequenceKind::AminoAcid)
    }

    /// Builds a DNA or RNA sequence, deciding the kind from the symbols present.
    pub fn nucleotide(raw: &str) -> Result<Self> {
        alphabet::infer_nucleotide(raw)
    }

    /// Callers must have checked `symbols` against the alphabet of `kind`.
    pub(crate) fn from_validated(kind: SequenceKind, symbols: String) -> Self {
        Self { kind, symbols }
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.symbols
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.symbols.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn into_string(self) -> String {
        self.symbols
    }

    /// Symbol-wise equality that ignores case. The kinds must match too.
    pub fn eq_ignore_case(&self, other: &Sequence) -> bool {
        self.kind == other.kind && self.symbols.eq_ignore_ascii_case(&other.symbols)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.symbols
    }
}
