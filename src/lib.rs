//! # attendance-deck
//!
//! Builds the Attendance App project presentation and writes it as a
//! PowerPoint Open XML (`.pptx`) package.
//!
//! The crate is layered like this:
//!
//! - [`deck`]: the fixed nine-slide content and the slide builders
//! - [`ooxml::pptx`]: a small presentation model (slides, text frames,
//!   paragraphs, runs, hyperlinks) plus a reader for written decks
//! - [`ooxml::opc`]: the ZIP + relationships package format underneath
//!
//! ```rust,no_run
//! attendance_deck::build_presentation("docs/Attendance_App_Demo.pptx")?;
//! # Ok::<(), attendance_deck::OoxmlError>(())
//! ```

pub mod common;
pub mod deck;
pub mod logger;
pub mod ooxml;

pub use deck::{
    BODY_FONT_SIZE, DEFAULT_OUTPUT_PATH, add_bulleted_slide, add_link_slide, build_deck,
    build_presentation,
};
pub use ooxml::error::{OoxmlError, Result};
pub use ooxml::pptx::{Presentation, Slide, SlideLayout, read_slides};
