/// Open Packaging Conventions (OPC) support.
///
/// The ZIP + relationships container that every `.pptx` file is built on:
/// parts, content types and relationships, plus a writer that serializes
/// them to an archive.
pub mod constants;
pub mod pkgwriter;
pub mod rel;

pub use pkgwriter::{PackageWriter, Part};
pub use rel::{Relationship, Relationships};
