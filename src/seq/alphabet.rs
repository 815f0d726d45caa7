use bio::alphabets::Alphabet;
use lazy_static::lazy_static;

use super::residue::AMINO_ACIDS;
use super::sequence::{Sequence, SequenceKind};
use crate::error::{Result, SeqError};

lazy_static! {
    static ref DNA: Alphabet = Alphabet::new(b"ACGTacgt");
    static ref RNA: Alphabet = Alphabet::new(b"ACGUacgu");
    static ref PROTEIN: Alphabet = Alphabet::new(
        AMINO_ACIDS
            .bytes()
            .chain(AMINO_ACIDS.bytes().map(|b| b.to_ascii_lowercase()))
    );
}

/// Returns the set of symbols a sequence of the given kind may contain, in both cases.
pub fn alphabet(kind: SequenceKind) -> &'static Alphabet {
    match kind {
        SequenceKind::Dna => &*DNA,
        SequenceKind::Rna => &*RNA,
        SequenceKind::AminoAcid => &*PROTEIN,
    }
}

fn is_member(alphabet: &Alphabet, symbol: char) -> bool {
    symbol.is_ascii() && alphabet.is_word([symbol as u8])
}

/// Checks that every character of `raw` belongs to the alphabet of `kind` and wraps it into a
/// [`Sequence`].
///
/// # Errors
///
/// Returns [`SeqError::InvalidSymbol`] for the first character outside the alphabet. The
/// position is a 0-based character index.
pub fn validate(raw: &str, kind: SequenceKind) -> Result<Sequence> {
    let alphabet = alphabet(kind);

    if let Some((position, symbol)) = raw
        .chars()
        .enumerate()
        .find(|(_, c)| !is_member(alphabet, *c))
    {
        return Err(SeqError::InvalidSymbol {
            symbol,
            position,
            kind,
        });
    }

    Ok(Sequence::from_validated(kind, raw.to_string()))
}

/// Validates a nucleotide string whose kind is not known up front.
///
/// The first T or U decides between DNA and RNA; a sequence containing only A, C and G is
/// treated as DNA. Mixing T and U is rejected at the first conflicting symbol.
pub fn infer_nucleotide(raw: &str) -> Result<Sequence> {
    let mut kind: Option<SequenceKind> = None;

    for (position, symbol) in raw.chars().enumerate() {
        let found = match symbol.to_ascii_uppercase() {
            'A' | 'C' | 'G' => continue,
            'T' => SequenceKind::Dna,
            'U' => SequenceKind::Rna,
            _ => {
                return Err(SeqError::InvalidSymbol {
                    symbol,
                    position,
                    kind: kind.unwrap_or(SequenceKind::Dna),
                })
            }
        };

        match kind {
            Some(k) if k != found => {
                return Err(SeqError::InvalidSymbol {
                    symbol,
                    position,
                    kind: k,
                })
            }
            _ => kind = Some(found),
        }
    }

    Ok(Sequence::from_validated(
        kind.unwrap_or(SequenceKind::Dna),
        raw.to_string(),
    ))
}
