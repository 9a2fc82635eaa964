//! Presentation writer components for PPTX.

pub mod pres;
pub mod props;
pub mod slide;
pub mod text;

// Re-export main types
pub use pres::Presentation;
pub use props::DocumentProperties;
pub use slide::Slide;
pub use text::{Alignment, Paragraph, Run, TextFrame};
