//! Office Open XML (OOXML) support for presentations.
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **Errors** (`error`): the error type shared by every layer
//! 3. **PresentationML** (`pptx`): slides, text and the default template

pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
