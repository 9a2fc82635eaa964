//! Reading slide content back out of a `.pptx` package.
//!
//! Follows the package relationships to `presentation.xml`, walks its slide
//! ID list in order and extracts the title and body placeholders of each
//! slide, resolving hyperlinks through the slide's relationships.

use crate::common::unit::Pt;
use crate::common::xml::unescape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::{content_type as ct, part_name, relationship_type as rt};
use crate::ooxml::opc::pkgwriter::rels_partname_for;
use crate::ooxml::pptx::writer::Alignment;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// One body paragraph as stored in the package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphSummary {
    pub text: String,
    pub level: u8,
    /// Size of the first sized run, or of the end-of-paragraph properties.
    pub font_size: Option<Pt>,
    pub alignment: Option<Alignment>,
    /// Target of the first hyperlinked run.
    pub hyperlink: Option<String>,
}

/// Title and body content of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSummary {
    /// Archive member the slide was read from.
    pub partname: String,
    pub title: Option<String>,
    pub paragraphs: Vec<ParagraphSummary>,
}

impl SlideSummary {
    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Read every slide of the package at `path`, in presentation order.
pub fn read_slides<P: AsRef<Path>>(path: P) -> Result<Vec<SlideSummary>> {
    let file = std::fs::File::open(path)?;
    read_slides_from(file)
}

/// Read every slide of an in-memory package.
pub fn read_slides_from_bytes(bytes: &[u8]) -> Result<Vec<SlideSummary>> {
    read_slides_from(Cursor::new(bytes))
}

fn read_slides_from<R: Read + Seek>(reader: R) -> Result<Vec<SlideSummary>> {
    let mut archive = ZipArchive::new(reader)?;

    let pkg_rels = Relationships::from_xml(&member_bytes(&mut archive, part_name::PACKAGE_RELS)?)?;
    let pres_partname = pkg_rels
        .part_with_reltype(rt::OFFICE_DOCUMENT)?
        .target_partname("")?;

    check_content_type(&mut archive, &pres_partname)?;

    let pres_xml = member_bytes(&mut archive, &pres_partname)?;
    let pres_rels = read_rels(&mut archive, &pres_partname)?;
    let pres_dir = parent_dir(&pres_partname);

    let mut slides = Vec::new();
    for r_id in slide_rel_ids(&pres_xml)? {
        let rel = pres_rels.get(&r_id).ok_or_else(|| {
            OoxmlError::InvalidRelationship(format!("slide relationship {} not found", r_id))
        })?;
        if rel.reltype() != rt::SLIDE {
            return Err(OoxmlError::InvalidRelationship(format!(
                "{} is not a slide relationship",
                r_id
            )));
        }

        let slide_partname = rel.target_partname(pres_dir)?;
        let slide_xml = member_bytes(&mut archive, &slide_partname)?;
        let slide_rels = read_rels(&mut archive, &slide_partname)?;
        slides.push(parse_slide(&slide_partname, &slide_xml, &slide_rels)?);
    }

    tracing::debug!(slides = slides.len(), "read presentation");
    Ok(slides)
}

fn member_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(OoxmlError::PartNotFound(name.to_string()));
        },
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Relationships of a part; a part without a `.rels` member has none.
fn read_rels<R: Read + Seek>(archive: &mut ZipArchive<R>, partname: &str) -> Result<Relationships> {
    match member_bytes(archive, &rels_partname_for(partname)) {
        Ok(xml) => Relationships::from_xml(&xml),
        Err(OoxmlError::PartNotFound(_)) => Ok(Relationships::new()),
        Err(e) => Err(e),
    }
}

fn check_content_type<R: Read + Seek>(archive: &mut ZipArchive<R>, partname: &str) -> Result<()> {
    let types = member_bytes(archive, part_name::CONTENT_TYPES)?;
    let mut reader = Reader::from_reader(&types[..]);
    let wanted = format!("/{}", partname);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.local_name().as_ref() == b"Override" => {
                if attr_value(&e, b"PartName")?.as_deref() == Some(wanted.as_str()) {
                    let got = attr_value(&e, b"ContentType")?.unwrap_or_default();
                    if got != ct::PML_PRESENTATION_MAIN {
                        return Err(OoxmlError::InvalidContentType {
                            expected: ct::PML_PRESENTATION_MAIN.to_string(),
                            got,
                        });
                    }
                    return Ok(());
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Err(OoxmlError::PartNotFound(format!(
        "content type override for {}",
        wanted
    )))
}

/// Relationship IDs of `<p:sldId>` entries, in document order.
fn slide_rel_ids(pres_xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(pres_xml);
    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.local_name().as_ref() == b"sldId" => {
                let r_id = attr_value_local(&e, b"id", true)?.ok_or_else(|| {
                    OoxmlError::Xml("p:sldId without r:id".to_string())
                })?;
                ids.push(r_id);
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaceholderRole {
    Title,
    Body,
}

#[derive(Default)]
struct ShapeState {
    role: Option<PlaceholderRole>,
    paragraphs: Vec<ParagraphSummary>,
}

fn parse_slide(partname: &str, xml: &[u8], rels: &Relationships) -> Result<SlideSummary> {
    let mut reader = Reader::from_reader(xml);
    // Whitespace inside <a:t> is content, so text is never trimmed here.
    reader.config_mut().trim_text(false);

    let mut summary = SlideSummary {
        partname: partname.to_string(),
        ..Default::default()
    };

    let mut shape: Option<ShapeState> = None;
    let mut in_tx_body = false;
    let mut para: Option<ParagraphSummary> = None;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"sp" if !is_empty => shape = Some(ShapeState::default()),
                    b"ph" => {
                        if let Some(ref mut shape) = shape {
                            let kind = attr_value(e, b"type")?;
                            shape.role = Some(match kind.as_deref() {
                                Some("title" | "ctrTitle") => PlaceholderRole::Title,
                                _ => PlaceholderRole::Body,
                            });
                        }
                    },
                    b"txBody" if !is_empty => in_tx_body = shape.is_some(),
                    b"p" if in_tx_body => {
                        let fresh = ParagraphSummary::default();
                        if is_empty {
                            push_paragraph(&mut shape, fresh);
                        } else {
                            para = Some(fresh);
                        }
                    },
                    b"pPr" => {
                        if let Some(ref mut para) = para {
                            if let Some(lvl) = attr_value(e, b"lvl")? {
                                para.level = lvl.parse().unwrap_or(0);
                            }
                            para.alignment =
                                attr_value(e, b"algn")?.as_deref().and_then(Alignment::from_attr);
                        }
                    },
                    b"rPr" | b"endParaRPr" => match para {
                        Some(ref mut para) if para.font_size.is_none() => {
                            if let Some(sz) = attr_value(e, b"sz")? {
                                let sz: u32 = sz.parse().map_err(|_| {
                                    OoxmlError::Xml(format!("bad font size {:?}", sz))
                                })?;
                                para.font_size = Some(Pt::from_centipoints(sz));
                            }
                        },
                        _ => {},
                    },
                    b"hlinkClick" => match para {
                        Some(ref mut para) if para.hyperlink.is_none() => {
                            if let Some(r_id) = attr_value_local(e, b"id", true)? {
                                let rel = rels.get(&r_id).ok_or_else(|| {
                                    OoxmlError::InvalidRelationship(format!(
                                        "hyperlink {} not found in {}",
                                        r_id, partname
                                    ))
                                })?;
                                para.hyperlink = Some(rel.target_ref().to_string());
                            }
                        },
                        _ => {},
                    },
                    b"t" if !is_empty && para.is_some() => in_text = true,
                    _ => {},
                }
            },
            Event::Text(ref e) if in_text => {
                if let Some(ref mut para) = para {
                    let raw = std::str::from_utf8(e.as_ref())?;
                    para.text.push_str(&unescape_xml(raw));
                }
            },
            Event::GeneralRef(ref e) if in_text => {
                if let Some(ref mut para) = para {
                    let name = std::str::from_utf8(e.as_ref())?;
                    para.text.push_str(&resolve_entity(name)?);
                }
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if in_tx_body => {
                    if let Some(done) = para.take() {
                        push_paragraph(&mut shape, done);
                    }
                },
                b"txBody" => in_tx_body = false,
                b"sp" => {
                    if let Some(done) = shape.take() {
                        match done.role {
                            Some(PlaceholderRole::Title) => {
                                let title = done
                                    .paragraphs
                                    .iter()
                                    .map(|p| p.text.as_str())
                                    .collect::<Vec<_>>()
                                    .join("\n");
                                summary.title = Some(title);
                            },
                            Some(PlaceholderRole::Body) => summary.paragraphs = done.paragraphs,
                            None => {},
                        }
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(summary)
}

fn push_paragraph(shape: &mut Option<ShapeState>, para: ParagraphSummary) {
    if let Some(shape) = shape {
        shape.paragraphs.push(para);
    }
}

/// Expand a general entity reference (`amp`, `#8594`, `#x2192`).
fn resolve_entity(name: &str) -> Result<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
                .ok_or_else(|| OoxmlError::Xml(format!("unknown entity &{};", name)))?
        },
    };
    Ok(resolved.to_string())
}

/// Unprefixed attribute value by exact key.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    attr_value_local(e, key, false)
}

/// Attribute value matched by local name; `prefixed` selects namespaced
/// attributes such as `r:id` over a plain `id`.
fn attr_value_local(e: &BytesStart<'_>, local: &[u8], prefixed: bool) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        let has_prefix = attr.key.prefix().is_some();
        if attr.key.local_name().as_ref() == local && has_prefix == prefixed {
            let raw = std::str::from_utf8(&attr.value)?;
            return Ok(Some(unescape_xml(raw).into_owned()));
        }
    }
    Ok(None)
}

fn parent_dir(partname: &str) -> &str {
    partname.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::template::SlideLayout;
    use crate::ooxml::pptx::writer::Presentation;

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp").unwrap(), "&");
        assert_eq!(resolve_entity("#8594").unwrap(), "→");
        assert_eq!(resolve_entity("#x2192").unwrap(), "→");
        assert!(resolve_entity("nbsp").is_err());
    }

    #[test]
    fn test_parse_slide_handles_entities_and_spaces() {
        let xml = br#"<p:sld xmlns:a="a" xmlns:p="p" xmlns:r="r"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>Flowcharts &amp; Algorithm</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:pPr lvl="1" algn="ctr"/><a:r><a:rPr sz="2400"/><a:t> spaced &#8594; out </a:t></a:r></a:p><a:p/></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;

        let slide = parse_slide("ppt/slides/slide1.xml", xml, &Relationships::new()).unwrap();
        assert_eq!(slide.title.as_deref(), Some("Flowcharts & Algorithm"));
        assert_eq!(slide.paragraphs.len(), 2);
        assert_eq!(slide.paragraphs[0].text, " spaced → out ");
        assert_eq!(slide.paragraphs[0].level, 1);
        assert_eq!(slide.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(slide.paragraphs[0].font_size, Some(Pt(24)));
        assert_eq!(slide.paragraphs[1], ParagraphSummary::default());
    }

    #[test]
    fn test_dangling_hyperlink_is_an_error() {
        let xml = br#"<p:sld xmlns:a="a" xmlns:p="p" xmlns:r="r"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:r><a:rPr><a:hlinkClick r:id="rId9"/></a:rPr><a:t>x</a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;

        let err = parse_slide("ppt/slides/slide1.xml", xml, &Relationships::new()).unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidRelationship(_)));
    }

    #[test]
    fn test_roundtrip_through_writer() {
        let mut pres = Presentation::new();
        let slide = pres.add_slide(SlideLayout::TitleAndContent);
        slide.set_title("Proposed Work");
        let body = slide.body_mut();
        body.paragraph_mut(0)
            .unwrap()
            .set_text("Architecture: React SPA → Supabase → Postgres tables");
        let link = body.add_paragraph();
        link.set_font_size(Pt(18));
        let run = link.add_run();
        run.set_text("Open Demo");
        run.set_hyperlink("https://example.com/?a=1&b=2").unwrap();

        let slides = read_slides_from_bytes(&pres.to_bytes().unwrap()).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].partname, "ppt/slides/slide1.xml");
        assert_eq!(slides[0].title.as_deref(), Some("Proposed Work"));
        assert_eq!(
            slides[0].paragraph_texts(),
            vec!["Architecture: React SPA → Supabase → Postgres tables", "Open Demo"]
        );
        assert_eq!(slides[0].paragraphs[0].font_size, None);
        assert_eq!(slides[0].paragraphs[1].font_size, Some(Pt(18)));
        assert_eq!(
            slides[0].paragraphs[1].hyperlink.as_deref(),
            Some("https://example.com/?a=1&b=2")
        );
    }

    #[test]
    fn test_not_a_zip() {
        let err = read_slides_from_bytes(b"definitely not a package").unwrap_err();
        assert!(matches!(err, OoxmlError::Zip(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_slides(dir.path().join("absent.pptx")).unwrap_err();
        assert!(matches!(err, OoxmlError::Io(_)));
    }
}
