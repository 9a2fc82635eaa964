//! Package writer for OPC packages.
//!
//! Collects parts in memory and serializes them to a ZIP container,
//! including `[Content_Types].xml`, the package relationships and each
//! part's own relationships.

use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace, part_name};
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One part of a package: its name inside the archive, content type, bytes
/// and outgoing relationships.
#[derive(Debug, Clone)]
pub struct Part {
    partname: String,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    /// Create a part. `partname` has no leading slash (`ppt/slides/slide1.xml`).
    pub fn new(partname: impl Into<String>, content_type: &str, blob: impl Into<Vec<u8>>) -> Self {
        Self {
            partname: partname.into(),
            content_type: content_type.to_string(),
            blob: blob.into(),
            rels: Relationships::new(),
        }
    }

    pub fn with_rels(mut self, rels: Relationships) -> Self {
        self.rels = rels;
        self
    }

    #[inline]
    pub fn partname(&self) -> &str {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Name of the `.rels` member holding this part's relationships.
    pub fn rels_partname(&self) -> String {
        rels_partname_for(&self.partname)
    }
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`
pub(crate) fn rels_partname_for(partname: &str) -> String {
    match partname.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", partname),
    }
}

/// Package writer that serializes parts to a ZIP file.
#[derive(Debug, Default)]
pub struct PackageWriter {
    parts: Vec<Part>,
    rels: Relationships,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package-level relationships (`_rels/.rels`).
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Serialize the package into a seekable writer and hand it back.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        // [Content_Types].xml goes first so consumers sniffing the archive find it quickly
        let content_types = ContentTypesItem::from_parts(&self.parts).to_xml();
        zip.start_file(part_name::CONTENT_TYPES, options)?;
        zip.write_all(content_types.as_bytes())?;

        zip.start_file(part_name::PACKAGE_RELS, options)?;
        zip.write_all(self.rels.to_xml().as_bytes())?;

        for part in &self.parts {
            zip.start_file(part.partname(), options)?;
            zip.write_all(part.blob())?;

            if !part.rels().is_empty() {
                zip.start_file(part.rels_partname(), options)?;
                zip.write_all(part.rels().to_xml().as_bytes())?;
            }
            tracing::trace!(part = part.partname(), bytes = part.blob().len(), "wrote part");
        }

        Ok(zip.finish()?)
    }
}

/// Helper for building [Content_Types].xml content.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by partname (with leading slash)
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_parts(parts: &[Part]) -> Self {
        let mut cti = Self::new();
        for part in parts {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &str, content_type: &str) {
        let ext = partname.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        if self.defaults.get(ext).is_some_and(|ty| ty == content_type) {
            return;
        }
        self.overrides
            .insert(format!("/{}", partname), content_type.to_string());
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);

        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
        }

        for (partname, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
        }

        xml.push_str("</Types>");
        xml
    }
}
