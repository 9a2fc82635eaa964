/// Presentation writer for PPTX.
use crate::common::unit::inches_to_emu;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace, part_name, relationship_type as rt};
use crate::ooxml::opc::{PackageWriter, Part, Relationships};
use crate::ooxml::pptx::template::{self, SlideLayout};
use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};
use std::path::Path;

use super::props::DocumentProperties;
use super::slide::Slide;

/// First ID handed out in `<p:sldIdLst>`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;
const SLIDE_MASTER_ID: u32 = 2_147_483_648;

/// An in-memory PowerPoint presentation.
///
/// Slides are appended in order and the whole package is serialized in one
/// go by [`Presentation::save`], [`Presentation::to_bytes`] or
/// [`Presentation::write_to`].
#[derive(Debug)]
pub struct Presentation {
    slides: Vec<Slide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    properties: DocumentProperties,
}

impl Presentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: inches_to_emu(10.0),
            slide_height: inches_to_emu(7.5),
            properties: DocumentProperties::default(),
        }
    }

    /// Append a slide based on `layout` and return it.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(Slide::new(slide_id, layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn set_slide_width(&mut self, width: i64) {
        self.slide_width = width;
    }

    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    pub fn set_slide_height(&mut self, height: i64) {
        self.slide_height = height;
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut DocumentProperties {
        &mut self.properties
    }

    /// Write the presentation to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            slides = self.slides.len(),
            bytes = bytes.len(),
            "saved presentation"
        );
        Ok(())
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package().to_bytes()
    }

    /// Serialize the presentation into a seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.package().write_to(writer)
    }

    /// Assemble every part of the package.
    fn package(&self) -> PackageWriter {
        let mut pkg = PackageWriter::new();

        let pkg_rels = pkg.rels_mut();
        pkg_rels.get_or_add(rt::OFFICE_DOCUMENT, part_name::PRESENTATION);
        pkg_rels.get_or_add(rt::CORE_PROPERTIES, part_name::CORE_PROPERTIES);
        pkg_rels.get_or_add(rt::EXTENDED_PROPERTIES, part_name::APP_PROPERTIES);

        // presentation.xml and its relationships: master, theme, then slides
        let mut pres_rels = Relationships::new();
        pres_rels.get_or_add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        pres_rels.get_or_add(rt::THEME, "theme/theme1.xml");

        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            slide_rel_ids.push(
                pres_rels.get_or_add(rt::SLIDE, &format!("slides/slide{}.xml", number)),
            );
            tracing::debug!(
                slide = number,
                title = slide.title().unwrap_or_default(),
                paragraphs = slide.body().paragraphs().len(),
                "serializing slide"
            );
        }

        let pres_xml = self.generate_presentation_xml(&slide_rel_ids);
        pkg.add_part(
            Part::new(part_name::PRESENTATION, ct::PML_PRESENTATION_MAIN, pres_xml)
                .with_rels(pres_rels),
        );

        for (index, slide) in self.slides.iter().enumerate() {
            pkg.add_part(slide.to_part(index + 1));
        }

        let mut master_rels = Relationships::new();
        for layout in SlideLayout::ALL {
            master_rels.get_or_add(rt::SLIDE_LAYOUT, &layout.relative_target());
        }
        master_rels.get_or_add(rt::THEME, "../theme/theme1.xml");
        pkg.add_part(
            Part::new(
                template::SLIDE_MASTER_PARTNAME,
                ct::PML_SLIDE_MASTER,
                template::default_slide_master_xml(),
            )
            .with_rels(master_rels),
        );

        for layout in SlideLayout::ALL {
            let mut layout_rels = Relationships::new();
            layout_rels.get_or_add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
            pkg.add_part(
                Part::new(layout.partname(), ct::PML_SLIDE_LAYOUT, layout.xml())
                    .with_rels(layout_rels),
            );
        }

        pkg.add_part(Part::new(
            template::THEME_PARTNAME,
            ct::OFC_THEME,
            template::default_theme_xml(),
        ));

        pkg.add_part(Part::new(
            part_name::CORE_PROPERTIES,
            ct::OPC_CORE_PROPERTIES,
            self.properties.core_xml(),
        ));
        pkg.add_part(Part::new(
            part_name::APP_PROPERTIES,
            ct::OFC_EXTENDED_PROPERTIES,
            self.properties.app_xml(self.slides.len()),
        ));

        pkg
    }

    /// Generate presentation.xml content.
    ///
    /// `slide_rel_ids` holds the relationship ID of each slide, in slide order.
    pub(crate) fn generate_presentation_xml(&self, slide_rel_ids: &[String]) -> String {
        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        );

        xml.push_str("<p:sldMasterIdLst>");
        let _ = write!(xml, r#"<p:sldMasterId id="{}" r:id="rId1"/>"#, SLIDE_MASTER_ID);
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                let _ = write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                );
            }
            xml.push_str("</p:sldIdLst>");
        }

        let _ = write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        );
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        xml
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_create_presentation() {
        let pres = Presentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 9144000);
        assert_eq!(pres.slide_height(), 6858000);
    }

    #[test]
    fn test_slide_ids_are_sequential() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleAndContent).set_title("One");
        pres.add_slide(SlideLayout::TitleAndContent).set_title("Two");

        let ids: Vec<u32> = pres.slides().iter().map(Slide::slide_id).collect();
        assert_eq!(ids, vec![256, 257]);
        assert_eq!(pres.slide(1).unwrap().title(), Some("Two"));
    }

    #[test]
    fn test_presentation_xml_lists_slides_in_order() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleAndContent);
        pres.add_slide(SlideLayout::TitleAndContent);

        let xml = pres.generate_presentation_xml(&["rId3".to_string(), "rId4".to_string()]);
        assert!(xml.contains(r#"<p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId4"/></p:sldIdLst>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        let xml = Presentation::new().generate_presentation_xml(&[]);
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_package_wiring() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleAndContent).set_title("Abstract");
        let bytes = pres.to_bytes().unwrap();

        let content_types = member(&bytes, "[Content_Types].xml");
        for partname in [
            "/ppt/presentation.xml",
            "/ppt/slides/slide1.xml",
            "/ppt/slideMasters/slideMaster1.xml",
            "/ppt/slideLayouts/slideLayout1.xml",
            "/ppt/slideLayouts/slideLayout2.xml",
            "/ppt/theme/theme1.xml",
            "/docProps/core.xml",
            "/docProps/app.xml",
        ] {
            assert!(
                content_types.contains(&format!(r#"PartName="{}""#, partname)),
                "missing override for {}",
                partname
            );
        }

        let pres_rels = member(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(pres_rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml""#));

        let master_rels = member(&bytes, "ppt/slideMasters/_rels/slideMaster1.xml.rels");
        assert!(master_rels.contains(r#"Id="rId3""#));
        assert!(master_rels.contains("../theme/theme1.xml"));

        let layout_rels = member(&bytes, "ppt/slideLayouts/_rels/slideLayout2.xml.rels");
        assert!(layout_rels.contains("../slideMasters/slideMaster1.xml"));
    }

    #[test]
    fn test_write_to_cursor_with_custom_size() {
        let mut pres = Presentation::new();
        pres.set_slide_width(12192000);
        pres.set_slide_height(6858000);
        pres.add_slide(SlideLayout::TitleAndContent).set_title("Widescreen");

        let cursor = pres.write_to(Cursor::new(Vec::new())).unwrap();
        let bytes = cursor.into_inner();

        let pres_xml = member(&bytes, "ppt/presentation.xml");
        assert!(pres_xml.contains(r#"<p:sldSz cx="12192000" cy="6858000"/>"#));
        assert_eq!(pres.slide_width(), 12192000);
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleSlide).set_title("Attendance App");
        pres.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(member(&bytes, "ppt/slides/slide1.xml").contains("Attendance App"));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");

        let err = Presentation::new().save(&path).unwrap_err();
        assert!(matches!(err, crate::ooxml::error::OoxmlError::Io(_)));
    }
}
