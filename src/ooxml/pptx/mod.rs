//! PowerPoint (.pptx) presentation support.
//!
//! - [`writer`]: the in-memory presentation model (`Presentation`, `Slide`,
//!   `TextFrame`, `Paragraph`, `Run`) and its serialization
//! - [`reader`]: slide content extraction from a written package
//! - [`template`]: the slide master, layouts and theme every deck starts from
//!
//! ```rust,no_run
//! use attendance_deck::common::Pt;
//! use attendance_deck::ooxml::pptx::{Presentation, SlideLayout};
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide(SlideLayout::TitleAndContent);
//! slide.set_title("Agenda");
//! let para = slide.body_mut().add_paragraph();
//! para.set_text("Introduction");
//! para.set_font_size(Pt(18));
//! pres.save("agenda.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod reader;
pub mod template;
pub mod writer;

pub use reader::{ParagraphSummary, SlideSummary, read_slides, read_slides_from_bytes};
pub use template::SlideLayout;
pub use writer::{Alignment, DocumentProperties, Paragraph, Presentation, Run, Slide, TextFrame};
