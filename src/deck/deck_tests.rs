//! End-to-end checks on the written deck: build, save, read back.

use super::*;
use crate::ooxml::pptx::{SlideSummary, read_slides, read_slides_from_bytes};
use tempfile::tempdir;

fn written_deck() -> Vec<SlideSummary> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docs").join("Attendance_App_Demo.pptx");
    build_presentation(&path).unwrap();
    read_slides(&path).unwrap()
}

#[test]
fn test_nine_slides_in_order() {
    let slides = written_deck();
    assert_eq!(slides.len(), 9);

    let expected: Vec<&str> = BULLET_SLIDES
        .iter()
        .map(|s| s.title)
        .chain(std::iter::once(DEMO_SLIDE.title))
        .collect();
    let titles: Vec<&str> = slides.iter().filter_map(|s| s.title.as_deref()).collect();
    assert_eq!(titles, expected);

    for (index, slide) in slides.iter().enumerate() {
        assert_eq!(slide.partname, format!("ppt/slides/slide{}.xml", index + 1));
    }
}

#[test]
fn test_bullet_slides_match_literal_content() {
    let slides = written_deck();

    for (expected, slide) in BULLET_SLIDES.iter().zip(&slides) {
        assert_eq!(slide.paragraph_texts(), expected.bullets, "slide {:?}", expected.title);
        for para in &slide.paragraphs {
            assert_eq!(para.font_size, Some(BODY_FONT_SIZE));
            assert_eq!(para.level, 0);
            assert_eq!(para.hyperlink, None);
        }
    }
}

#[test]
fn test_demo_slide_link_paragraph() {
    let slides = written_deck();
    let demo = &slides[8];

    assert_eq!(demo.paragraphs.len(), 3);
    assert_eq!(&demo.paragraph_texts()[..2], DEMO_SLIDE.intro);
    assert!(demo.paragraphs[..2].iter().all(|p| p.hyperlink.is_none()));

    let link = &demo.paragraphs[2];
    assert_eq!(link.text, DEMO_SLIDE.link_text);
    assert_eq!(link.hyperlink.as_deref(), Some(DEMO_SLIDE.link_url));
    assert_eq!(link.alignment, Some(crate::ooxml::pptx::Alignment::Left));
    assert_eq!(link.font_size, Some(BODY_FONT_SIZE));
}

#[test]
fn test_rebuild_is_content_deterministic() {
    let first = read_slides_from_bytes(&build_deck().to_bytes().unwrap()).unwrap();
    let second = read_slides_from_bytes(&build_deck().to_bytes().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rejected_link_still_builds() {
    let mut prs = Presentation::new();
    add_link_slide(&mut prs, "Demo", &["intro"], "Open Demo", "not a url");
    let bytes = prs.to_bytes().unwrap();

    let slides = read_slides_from_bytes(&bytes).unwrap();
    assert_eq!(slides[0].paragraph_texts(), vec!["intro", "Open Demo"]);
    assert_eq!(slides[0].paragraphs[1].hyperlink, None);

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
    let mut rels = String::new();
    std::io::Read::read_to_string(
        &mut archive.by_name("ppt/slides/_rels/slide1.xml.rels").unwrap(),
        &mut rels,
    )
    .unwrap();
    assert!(!rels.contains("hyperlink"));
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    std::fs::write(&path, b"stale").unwrap();

    build_presentation(&path).unwrap();
    assert_eq!(read_slides(&path).unwrap().len(), 9);
}

#[test]
fn test_unwritable_output_propagates() {
    let dir = tempdir().unwrap();
    // A directory where the file should go cannot be overwritten.
    let path = dir.path().join("taken");
    std::fs::create_dir(&path).unwrap();

    assert!(build_presentation(&path).is_err());
}
