//! Diagram module - phonon lines and the polaron diagram state.

mod phonon;
mod polaron;

pub use phonon::PhononLine;
pub use polaron::{DiagramParams, Polaron, UpdateStats};

#[cfg(test)]
pub(crate) use polaron::tests::CountingRng;
