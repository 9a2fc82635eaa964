/// Relationships between parts of an OPC package.
///
/// Each part (and the package itself) owns one relationship collection,
/// serialized to its `_rels/*.rels` sibling.
use crate::common::xml::{escape_xml, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
///
/// Internal relationships point at another part by relative reference;
/// external ones carry an absolute URL (hyperlinks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,
    /// Relationship type URI
    reltype: String,
    /// Target reference - either a part URI or external URL
    target_ref: String,
    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a part reference relative to the
    /// source part's directory. For external relationships, an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Resolve an internal target against the directory of its source part.
    ///
    /// `source_dir` is the source part's directory inside the archive
    /// (`"ppt"` for `ppt/presentation.xml`, `""` for the package root).
    pub fn target_partname(&self, source_dir: &str) -> Result<String> {
        if self.is_external {
            return Err(OoxmlError::InvalidRelationship(format!(
                "{} points outside the package",
                self.r_id
            )));
        }
        Ok(resolve_part_ref(source_dir, &self.target_ref))
    }
}

/// Join a relative part reference onto a directory, collapsing `..` segments.
pub(crate) fn resolve_part_ref(source_dir: &str, target_ref: &str) -> String {
    if let Some(absolute) = target_ref.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source_dir.split('/').filter(|s| !s.is_empty()).collect();
    for seg in target_ref.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Collection of relationships from a single source.
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship with an explicit ID, replacing any previous one
    /// with the same ID.
    pub fn add_relationship(
        &mut self,
        reltype: &str,
        target_ref: &str,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship::new(
            r_id.clone(),
            reltype.to_string(),
            target_ref.to_string(),
            is_external,
        );
        self.rels.insert(r_id, rel);
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get or add an internal relationship and return its rId.
    ///
    /// A relationship of the same type to the same target is reused.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        self.find_or_insert(reltype, target_ref, false)
    }

    /// Get or add an external relationship (e.g. a hyperlink) and return its rId.
    pub fn get_or_add_ext_rel(&mut self, reltype: &str, target_ref: &str) -> String {
        self.find_or_insert(reltype, target_ref, true)
    }

    fn find_or_insert(&mut self, reltype: &str, target_ref: &str, is_external: bool) -> String {
        if let Some(rel) = self.rels.values().find(|rel| {
            rel.reltype() == reltype
                && rel.target_ref() == target_ref
                && rel.is_external() == is_external
        }) {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype, target_ref, r_id.clone(), is_external);
        r_id
    }

    /// Get the next available relationship ID.
    ///
    /// Generates IDs in the format "rId1", "rId2", etc., filling in gaps.
    fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> = self
            .rels
            .keys()
            .filter_map(|r_id| rid_number(r_id))
            .collect();
        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// Find the single relationship of a type.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OoxmlError::InvalidRelationship(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OoxmlError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Relationships ordered by their numeric rId.
    pub fn iter_sorted(&self) -> Vec<&Relationship> {
        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by_key(|rel| (rid_number(rel.r_id()).unwrap_or(u32::MAX), rel.r_id()));
        rels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to the XML of a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);

        for rel in self.iter_sorted() {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            );
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Parse the XML of a `.rels` part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e) | Event::Empty(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target = None;
                    let mut is_external = false;

                    for attr in e.attributes() {
                        let attr = attr?;
                        let value = std::str::from_utf8(&attr.value)?;
                        let value = unescape_xml(value).into_owned();
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = Some(value),
                            b"Target" => target = Some(value),
                            b"TargetMode" => is_external = value == "External",
                            _ => {},
                        }
                    }

                    match (r_id, reltype, target) {
                        (Some(r_id), Some(reltype), Some(target)) => {
                            rels.add_relationship(&reltype, &target, r_id, is_external);
                        },
                        _ => {
                            return Err(OoxmlError::InvalidRelationship(
                                "Relationship element missing Id, Type or Target".to_string(),
                            ));
                        },
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }
}

#[inline]
fn rid_number(r_id: &str) -> Option<u32> {
    r_id.strip_prefix("rId")
        .and_then(|digits| atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use proptest::prelude::*;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new();
        rels.add_relationship(rt::SLIDE, "slides/slide1.xml", "rId1".to_string(), false);
        rels.add_relationship(rt::SLIDE, "slides/slide3.xml", "rId3".to_string(), false);

        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_matching_target() {
        let mut rels = Relationships::new();

        assert_eq!(rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"), "rId1");
        assert_eq!(rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"), "rId1");
        assert_eq!(
            rels.get_or_add_ext_rel(rt::HYPERLINK, "https://example.com/"),
            "rId2"
        );
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_to_xml_marks_external_targets() {
        let mut rels = Relationships::new();
        rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml");
        rels.get_or_add_ext_rel(rt::HYPERLINK, "https://example.com/?a=1&b=2");

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External""#));
        assert!(xml.find("rId1").unwrap() < xml.find("rId2").unwrap());
    }

    #[test]
    fn test_xml_roundtrip_preserves_target_mode() {
        let mut rels = Relationships::new();
        rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml");
        let link = rels.get_or_add_ext_rel(rt::HYPERLINK, "https://example.com/");

        let parsed = Relationships::from_xml(rels.to_xml().as_bytes()).unwrap();
        assert_eq!(parsed.len(), 2);
        let rel = parsed.get(&link).unwrap();
        assert!(rel.is_external());
        assert_eq!(rel.target_ref(), "https://example.com/");
    }

    #[test]
    fn test_part_with_reltype() {
        let mut rels = Relationships::new();
        rels.get_or_add(rt::THEME, "theme/theme1.xml");
        assert_eq!(rels.part_with_reltype(rt::THEME).unwrap().r_id(), "rId1");
        assert!(rels.part_with_reltype(rt::SLIDE_MASTER).is_err());
    }

    #[test]
    fn test_resolve_part_ref() {
        assert_eq!(resolve_part_ref("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(
            resolve_part_ref("ppt/slides", "../slideLayouts/slideLayout2.xml"),
            "ppt/slideLayouts/slideLayout2.xml"
        );
        assert_eq!(resolve_part_ref("", "ppt/presentation.xml"), "ppt/presentation.xml");
        assert_eq!(resolve_part_ref("ppt/slides", "/docProps/app.xml"), "docProps/app.xml");
    }

    proptest! {
        #[test]
        fn allocated_ids_are_unique(targets in proptest::collection::vec("[a-z]{1,6}", 1..40)) {
            let mut rels = Relationships::new();
            let mut seen = std::collections::HashMap::new();
            for target in &targets {
                let r_id = rels.get_or_add(rt::SLIDE, target);
                let previous = seen.insert(target.clone(), r_id.clone());
                if let Some(previous) = previous {
                    prop_assert_eq!(previous, r_id);
                }
            }
            let unique_targets: std::collections::HashSet<_> = targets.iter().collect();
            prop_assert_eq!(rels.len(), unique_targets.len());
        }
    }
}
