/// Text frame, paragraph and run types for slide placeholders.
use crate::common::unit::Pt;
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::relationship_type as rt;
use std::fmt::Write as FmtWrite;

/// Deepest indentation level DrawingML allows for a paragraph.
pub const MAX_LEVEL: u8 = 8;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `algn` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
            Alignment::Justify => "just",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Alignment::Left),
            "ctr" => Some(Alignment::Center),
            "r" => Some(Alignment::Right),
            "just" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// A span of text sharing one set of character properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    text: String,
    hyperlink: Option<String>,
}

impl Run {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// External address the run links to.
    pub fn hyperlink(&self) -> Option<&str> {
        self.hyperlink.as_deref()
    }

    /// Attach an external hyperlink to this run.
    ///
    /// The address must be an absolute URL. It is stored verbatim, so the
    /// relationship target written to the package equals `address` exactly.
    /// On error the run is left unchanged.
    pub fn set_hyperlink(&mut self, address: &str) -> Result<()> {
        if address.trim().is_empty() {
            return Err(OoxmlError::InvalidHyperlink {
                address: address.to_string(),
                reason: "address is empty".to_string(),
            });
        }

        url::Url::parse(address).map_err(|e| OoxmlError::InvalidHyperlink {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        self.hyperlink = Some(address.to_string());
        Ok(())
    }

    /// Runs carry the paragraph's size on their own `a:rPr`.
    fn write_xml(&self, xml: &mut String, font_size: Option<Pt>, rels: &mut Relationships) {
        xml.push_str("<a:r>");
        xml.push_str(r#"<a:rPr lang="en-US""#);
        if let Some(size) = font_size {
            let _ = write!(xml, r#" sz="{}""#, size.to_centipoints());
        }
        xml.push_str(r#" dirty="0""#);

        match self.hyperlink {
            Some(ref address) => {
                let r_id = rels.get_or_add_ext_rel(rt::HYPERLINK, address);
                let _ = write!(xml, r#"><a:hlinkClick r:id="{}"/></a:rPr>"#, r_id);
            },
            None => xml.push_str("/>"),
        }

        let _ = write!(xml, "<a:t>{}</a:t>", escape_xml(&self.text));
        xml.push_str("</a:r>");
    }
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    runs: Vec<Run>,
    level: u8,
    font_size: Option<Pt>,
    alignment: Option<Alignment>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Replace every run with a single run holding `text`.
    pub fn set_text(&mut self, text: &str) {
        self.runs.clear();
        self.runs.push(Run::new(text));
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Append an empty run and return it.
    pub fn add_run(&mut self) -> &mut Run {
        self.runs.push(Run::default());
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Indentation level, 0 for top-level bullets.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set the indentation level, capped at [`MAX_LEVEL`].
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }

    /// Default size for runs without their own size.
    pub fn font_size(&self) -> Option<Pt> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: Pt) {
        self.font_size = Some(size);
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    pub(crate) fn write_xml(&self, xml: &mut String, rels: &mut Relationships) {
        xml.push_str("<a:p>");

        if self.level > 0 || self.alignment.is_some() {
            xml.push_str("<a:pPr");
            if self.level > 0 {
                let _ = write!(xml, r#" lvl="{}""#, self.level);
            }
            if let Some(alignment) = self.alignment {
                let _ = write!(xml, r#" algn="{}""#, alignment.as_attr());
            }
            xml.push_str("/>");
        }

        for run in &self.runs {
            run.write_xml(xml, self.font_size, rels);
        }

        xml.push_str(r#"<a:endParaRPr lang="en-US""#);
        if let Some(size) = self.font_size {
            let _ = write!(xml, r#" sz="{}""#, size.to_centipoints());
        }
        xml.push_str(r#" dirty="0"/>"#);

        xml.push_str("</a:p>");
    }
}

/// The ordered paragraphs of a placeholder.
///
/// A text frame always holds at least one paragraph, matching what
/// PowerPoint expects inside `<p:txBody>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
        }
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all paragraphs except one empty one.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
        self.paragraphs.push(Paragraph::new());
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// The first paragraph, which every text frame has.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        &mut self.paragraphs[0]
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    /// Append an empty paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the content with one paragraph per line of `text`.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text
            .split('\n')
            .map(|line| {
                let mut para = Paragraph::new();
                para.set_text(line);
                para
            })
            .collect();
    }

    pub(crate) fn write_xml(&self, xml: &mut String, rels: &mut Relationships) {
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        for para in &self.paragraphs {
            para.write_xml(xml, rels);
        }
        xml.push_str("</p:txBody>");
    }
}
