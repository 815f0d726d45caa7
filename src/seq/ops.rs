use indexmap::IndexMap;

use super::dna::{self, DNA_COMPLEMENT, RNA_COMPLEMENT};
use super::sequence::{Sequence, SequenceKind};
use crate::error::{Result, SeqError};

// Nucleotide operations. Each returns a fresh `Sequence`; the receiver is never modified and
// the case of every symbol is carried over to its image.
impl Sequence {
    fn require_nucleotide(&self, operation: &'static str) -> Result<()> {
        match self.kind() {
            SequenceKind::Dna | SequenceKind::Rna => Ok(()),
            kind => Err(SeqError::UnsupportedOperation { operation, kind }),
        }
    }

    fn map_symbols(&self, kind: SequenceKind, f: impl Fn(char) -> char) -> Sequence {
        Sequence::from_validated(kind, self.as_str().chars().map(f).collect())
    }

    /// Watson-Crick complement: A/T (or A/U for RNA) and C/G swap places.
    pub fn complement(&self) -> Result<Sequence> {
        let table: &[u8; 128] = match self.kind() {
            SequenceKind::Dna => &*DNA_COMPLEMENT,
            SequenceKind::Rna => &*RNA_COMPLEMENT,
            kind => {
                return Err(SeqError::UnsupportedOperation {
                    operation: "complement",
                    kind,
                })
            }
        };

        Ok(self.map_symbols(self.kind(), |c| dna::complement(table, c)))
    }

    pub fn reverse(&self) -> Result<Sequence> {
        self.require_nucleotide("reverse")?;
        Ok(Sequence::from_validated(
            self.kind(),
            self.as_str().chars().rev().collect(),
        ))
    }

    pub fn reverse_complement(&self) -> Result<Sequence> {
        self.require_nucleotide("reverse_complement")?;
        self.complement()?.reverse()
    }

    /// Converts between the DNA and RNA representation: T becomes U for DNA input and U
    /// becomes T for RNA input.
    pub fn transcribe(&self) -> Result<Sequence> {
        match self.kind() {
            SequenceKind::Dna => Ok(self.map_symbols(SequenceKind::Rna, |c| match c {
                'T' => 'U',
                't' => 'u',
                c => c,
            })),
            SequenceKind::Rna => self.reverse_transcribe(),
            kind => Err(SeqError::UnsupportedOperation {
                operation: "transcribe",
                kind,
            }),
        }
    }

    /// RNA to DNA only.
    pub fn reverse_transcribe(&self) -> Result<Sequence> {
        match self.kind() {
            SequenceKind::Rna => Ok(self.map_symbols(SequenceKind::Dna, |c| match c {
                'U' => 'T',
                'u' => 't',
                c => c,
            })),
            kind => Err(SeqError::UnsupportedOperation {
                operation: "reverse_transcribe",
                kind,
            }),
        }
    }

    /// GC content as a percentage in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// [`SeqError::UndefinedOnEmptySequence`] when the sequence has no symbols.
    pub fn gc_content(&self) -> Result<f64> {
        self.require_nucleotide("gc_content")?;
        dna::gc_percent(self.as_bytes()).ok_or(SeqError::UndefinedOnEmptySequence {
            operation: "gc_content",
        })
    }

    /// Whether the sequence reads the same as its reverse complement, ignoring case. The
    /// empty sequence is its own reverse complement.
    pub fn is_palindrome(&self) -> Result<bool> {
        Ok(self.reverse_complement()?.eq_ignore_case(self))
    }

    /// Counts each symbol as written: `A` and `a` are separate keys. Keys are ordered by
    /// first appearance.
    pub fn nucleotide_count(&self) -> Result<IndexMap<char, usize>> {
        self.require_nucleotide("nucleotide_count")?;

        let mut counts = IndexMap::new();
        for symbol in self.as_str().chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
