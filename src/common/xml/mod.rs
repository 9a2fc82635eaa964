//! XML text helpers shared by the package writer and reader.

mod escape;

pub use escape::{escape_xml, unescape_xml};
