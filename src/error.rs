use thiserror::Error;

use crate::seq::SequenceKind;

pub type Result<T> = std::result::Result<T, SeqError>;

/// Errors produced by the sequence engine and the read filter.
///
/// None of these are recovered from internally: each one means the caller (or the parser
/// upstream of it) handed over something the core cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeqError {
    #[error("invalid {kind} symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        symbol: char,
        position: usize,
        kind: SequenceKind,
    },

    #[error("operation `{operation}` is not supported for {kind} sequences")]
    UnsupportedOperation {
        operation: &'static str,
        kind: SequenceKind,
    },

    #[error("`{operation}` is undefined on an empty sequence")]
    UndefinedOnEmptySequence { operation: &'static str },

    #[error("no molecular weight is known for residue '{residue}'")]
    UnknownResidue { residue: char },

    #[error("malformed bounds: {reason}")]
    MalformedBounds { reason: String },

    #[error("no sequence was given")]
    EmptyInput,
}
