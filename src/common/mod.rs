//! Helpers shared by the presentation model, writer and reader.

pub mod unit;
pub mod xml;

pub use unit::Pt;
