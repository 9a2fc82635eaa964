/// Slide type and its PresentationML serialization.
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{Part, Relationships};
use crate::ooxml::pptx::template::SlideLayout;
use std::fmt::Write as FmtWrite;

use super::text::TextFrame;

/// A slide built on one of the template layouts, with a title placeholder
/// and a body placeholder.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide ID as listed in `presentation.xml` (256 and up)
    slide_id: u32,
    layout: SlideLayout,
    title: Option<String>,
    body: TextFrame,
}

impl Slide {
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        Self {
            slide_id,
            layout,
            title: None,
            body: TextFrame::new(),
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The body placeholder's text frame.
    pub fn body(&self) -> &TextFrame {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut TextFrame {
        &mut self.body
    }

    /// Build the slide part. `number` is the 1-based slide position.
    pub(crate) fn to_part(&self, number: usize) -> Part {
        let mut rels = Relationships::new();
        rels.get_or_add(rt::SLIDE_LAYOUT, &self.layout.relative_target());

        let xml = self.to_xml(&mut rels);
        Part::new(slide_partname(number), ct::PML_SLIDE, xml).with_rels(rels)
    }

    /// Generate slide XML. Hyperlink relationships are added to `rels` as
    /// runs reference them.
    pub(crate) fn to_xml(&self, rels: &mut Relationships) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        );

        xml.push_str("<p:cSld><p:spTree>");

        // Group shape properties (required)
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str("<p:grpSpPr><a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm></p:grpSpPr>");

        self.write_title_shape(&mut xml);
        self.write_body_shape(&mut xml, rels);

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        xml
    }

    fn write_title_shape(&self, xml: &mut String) {
        write_placeholder_open(xml, 2, "Title 1", self.layout.title_placeholder());

        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p>");
        if let Some(ref title) = self.title {
            let _ = write!(
                xml,
                r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r>"#,
                escape_xml(title)
            );
        }
        xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/></a:p></p:txBody>"#);

        xml.push_str("</p:sp>");
    }

    fn write_body_shape(&self, xml: &mut String, rels: &mut Relationships) {
        write_placeholder_open(
            xml,
            3,
            self.layout.body_shape_name(),
            self.layout.body_placeholder(),
        );
        self.body.write_xml(xml, rels);
        xml.push_str("</p:sp>");
    }
}

/// Open a placeholder `<p:sp>` that inherits its geometry from the layout.
fn write_placeholder_open(xml: &mut String, shape_id: u32, name: &str, ph: &str) {
    xml.push_str("<p:sp><p:nvSpPr>");
    let _ = write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, escape_xml(name));
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    let _ = write!(xml, "<p:nvPr>{}</p:nvPr>", ph);
    xml.push_str("</p:nvSpPr><p:spPr/>");
}

pub(crate) fn slide_partname(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::unit::Pt;

    #[test]
    fn test_slide_xml_structure() {
        let mut slide = Slide::new(256, SlideLayout::TitleAndContent);
        slide.set_title("Results & Conclusions");
        let para = slide.body_mut().paragraph_mut(0).unwrap();
        para.set_text("Reports: color-coded PDFs for audits");
        para.set_font_size(Pt(18));

        let mut rels = Relationships::new();
        let xml = slide.to_xml(&mut rels);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains("<a:t>Results &amp; Conclusions</a:t>"));
        assert!(xml.contains("<a:t>Reports: color-coded PDFs for audits</a:t>"));
        assert!(xml.ends_with("</p:sld>"));
        // title before body
        assert!(xml.find("Title 1").unwrap() < xml.find("Content Placeholder 2").unwrap());
    }

    #[test]
    fn test_title_slide_layout_uses_subtitle() {
        let slide = Slide::new(256, SlideLayout::TitleSlide);
        let xml = slide.to_xml(&mut Relationships::new());
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
    }

    #[test]
    fn test_part_links_layout_first() {
        let mut slide = Slide::new(258, SlideLayout::TitleAndContent);
        slide
            .body_mut()
            .add_paragraph()
            .add_run()
            .set_hyperlink("https://example.com/")
            .unwrap();

        let part = slide.to_part(3);
        assert_eq!(part.partname(), "ppt/slides/slide3.xml");
        assert_eq!(part.content_type(), ct::PML_SLIDE);

        let layout = part.rels().get("rId1").unwrap();
        assert_eq!(layout.reltype(), rt::SLIDE_LAYOUT);
        assert_eq!(layout.target_ref(), "../slideLayouts/slideLayout2.xml");

        let link = part.rels().get("rId2").unwrap();
        assert_eq!(link.reltype(), rt::HYPERLINK);
        assert!(link.is_external());
    }
}
