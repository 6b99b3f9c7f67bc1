//! Figures for printed travel documents.
//!
//! Layout and typesetting happen elsewhere; this module only computes the
//! values the renderer prints verbatim.

pub mod figures;
pub mod words;

pub use figures::{DocumentFigures, TravelerFigures};
pub use words::{spell_number, spell_rupiah};
