#[macro_use]
extern crate log;

pub mod error;
pub mod filter;
pub mod io;
pub mod seq;
pub mod tools;

pub use error::{Result, SeqError};
pub use filter::{Bounds, FilterOpts, ReadEntry};
pub use seq::{Sequence, SequenceKind};
