//! The Attendance App project deck.
//!
//! Two builders append slides to a [`Presentation`]; [`build_presentation`]
//! runs them over the fixed content in [`content`] and writes the result.

pub mod content;

use crate::common::unit::Pt;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::{Alignment, Paragraph, Presentation, Slide, SlideLayout, TextFrame};
use std::path::Path;

pub use content::{BULLET_SLIDES, BulletSlide, DEMO_SLIDE, LinkSlide};

/// Where the binary writes the deck, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "docs/Attendance_App_Demo.pptx";

/// Size of every body paragraph.
pub const BODY_FONT_SIZE: Pt = Pt(18);

/// Append a "Title and Content" slide with one 18pt paragraph per bullet.
pub fn add_bulleted_slide<'a, S: AsRef<str>>(
    prs: &'a mut Presentation,
    title: &str,
    bullets: &[S],
) -> &'a mut Slide {
    let slide = prs.add_slide(SlideLayout::TitleAndContent);
    slide.set_title(title);

    let body = slide.body_mut();
    body.clear();
    fill_bullets(body, bullets);

    slide
}

/// Append a "Title and Content" slide with intro bullets followed by one
/// left-aligned paragraph whose single run links to `link_url`.
///
/// A rejected address does not fail the build: the run keeps `link_text`
/// without a link and the rejection is logged.
pub fn add_link_slide<'a, S: AsRef<str>>(
    prs: &'a mut Presentation,
    title: &str,
    intro_lines: &[S],
    link_text: &str,
    link_url: &str,
) -> &'a mut Slide {
    let slide = prs.add_slide(SlideLayout::TitleAndContent);
    slide.set_title(title);

    let body = slide.body_mut();
    body.clear();
    fill_bullets(body, intro_lines);

    // Mirrors the bullet loop: an empty intro leaves paragraph 0 unused
    // and the link always goes into a fresh trailing paragraph.
    let link_para = body.add_paragraph();
    format_bullet(link_para);
    link_para.set_alignment(Alignment::Left);

    let run = link_para.add_run();
    run.set_text(link_text);
    if let Err(e) = run.set_hyperlink(link_url) {
        tracing::warn!(slide = title, error = %e, "hyperlink not attached");
    }

    slide
}

fn fill_bullets<S: AsRef<str>>(body: &mut TextFrame, lines: &[S]) {
    for (index, line) in lines.iter().enumerate() {
        let para = if index == 0 {
            body.first_paragraph_mut()
        } else {
            body.add_paragraph()
        };
        para.set_text(line.as_ref());
        format_bullet(para);
    }
}

fn format_bullet(para: &mut Paragraph) {
    para.set_font_size(BODY_FONT_SIZE);
    para.set_level(0);
}

/// Build the nine-slide deck in memory.
pub fn build_deck() -> Presentation {
    let mut prs = Presentation::new();
    prs.properties_mut().title = Some(content::DECK_TITLE.to_string());

    for entry in &BULLET_SLIDES {
        add_bulleted_slide(&mut prs, entry.title, entry.bullets);
    }
    add_link_slide(
        &mut prs,
        DEMO_SLIDE.title,
        DEMO_SLIDE.intro,
        DEMO_SLIDE.link_text,
        DEMO_SLIDE.link_url,
    );

    tracing::debug!(slides = prs.slide_count(), "deck built");
    prs
}

/// Build the deck and write it to `output_path`, creating missing parent
/// directories.
pub fn build_presentation<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let prs = build_deck();

    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {},
    }

    prs.save(output_path)
}


#[cfg(test)]
mod deck_tests;
