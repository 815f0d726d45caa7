use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, SeqError};
use crate::seq::Sequence;

/// Procedures that can be applied to DNA or RNA sequences in bulk.
#[derive(clap::ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum Procedure {
    /// Swap T and U, turning DNA into RNA and back
    Transcribe,
    Reverse,
    Complement,
    ReverseComplement,
    /// Percentage of G and C, rounded to three decimals
    GcContent,
    /// Whether the sequence equals its reverse complement
    IsPalindrome,
    /// Count each symbol, case-sensitively
    NucleotideCount,
}

/// What a procedure produced for a single sequence.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Outcome {
    Sequence(String),
    Percent(f64),
    Flag(bool),
    Counts(IndexMap<char, usize>),
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Applies `procedure` to a single validated sequence.
pub fn apply(seq: &Sequence, procedure: Procedure) -> Result<Outcome> {
    let outcome = match procedure {
        Procedure::Transcribe => Outcome::Sequence(seq.transcribe()?.into_string()),
        Procedure::Reverse => Outcome::Sequence(seq.reverse()?.into_string()),
        Procedure::Complement => Outcome::Sequence(seq.complement()?.into_string()),
        Procedure::ReverseComplement => {
            Outcome::Sequence(seq.reverse_complement()?.into_string())
        }
        Procedure::GcContent => Outcome::Percent(round3(seq.gc_content()?)),
        Procedure::IsPalindrome => Outcome::Flag(seq.is_palindrome()?),
        Procedure::NucleotideCount => Outcome::Counts(seq.nucleotide_count()?),
    };
    Ok(outcome)
}

/// Validates every raw sequence as DNA or RNA and then applies `procedure` to each, keeping
/// the input order.
///
/// Validation happens for all inputs before any procedure runs, so either every sequence is
/// processed or none is.
///
/// # Errors
///
/// * [`SeqError::EmptyInput`] if no sequences are given or one of them is the empty string.
/// * [`SeqError::InvalidSymbol`] if a sequence is not valid DNA or RNA.
pub fn run_procedure<S: AsRef<str>>(sequences: &[S], procedure: Procedure) -> Result<Vec<Outcome>> {
    if sequences.is_empty() {
        return Err(SeqError::EmptyInput);
    }

    let sequences = sequences
        .iter()
        .map(|raw| match raw.as_ref() {
            "" => Err(SeqError::EmptyInput),
            raw => Sequence::nucleotide(raw),
        })
        .collect::<Result<Vec<_>>>()?;

    sequences.iter().map(|seq| apply(seq, procedure)).collect()
}
