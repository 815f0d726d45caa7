pub mod alphabet;
pub mod dna;
pub mod ops;
pub mod residue;
pub mod sequence;

pub use self::alphabet::validate;
pub use self::sequence::{Sequence, SequenceKind};
