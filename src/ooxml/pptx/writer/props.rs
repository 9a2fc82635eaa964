/// Core (`docProps/core.xml`) and extended (`docProps/app.xml`) document properties.
use crate::common::xml::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

pub const APPLICATION_NAME: &str = "attendance-deck";

#[derive(Debug, Clone)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub creator: String,
    pub created: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: None,
            creator: APPLICATION_NAME.to_string(),
            created: Utc::now(),
        }
    }
}

impl DocumentProperties {
    pub(crate) fn core_xml(&self) -> String {
        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
            r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
        ));
        if let Some(ref title) = self.title {
            let _ = write!(xml, "<dc:title>{}</dc:title>", escape_xml(title));
        }
        let _ = write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&self.creator));
        let _ = write!(
            xml,
            "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            escape_xml(&self.creator)
        );
        xml.push_str("<cp:revision>1</cp:revision>");
        let _ = write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#
        );
        let _ = write!(
            xml,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
        );
        xml.push_str("</cp:coreProperties>");

        xml
    }

    pub(crate) fn app_xml(&self, slide_count: usize) -> String {
        let mut xml = String::with_capacity(512);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
        ));
        let _ = write!(xml, "<Application>{}</Application>", APPLICATION_NAME);
        xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
        let _ = write!(xml, "<Slides>{}</Slides>", slide_count);
        xml.push_str("</Properties>");

        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_xml() {
        let props = DocumentProperties {
            title: Some("Attendance App".to_string()),
            creator: "Team <A&B>".to_string(),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };

        let xml = props.core_xml();
        assert!(xml.contains("<dc:title>Attendance App</dc:title>"));
        assert!(xml.contains("<dc:creator>Team &lt;A&amp;B&gt;</dc:creator>"));
        assert!(xml.contains(">2024-03-01T09:30:00Z</dcterms:created>"));
    }

    #[test]
    fn test_app_xml_counts_slides() {
        let xml = DocumentProperties::default().app_xml(9);
        assert!(xml.contains("<Slides>9</Slides>"));
        assert!(xml.contains("<Application>attendance-deck</Application>"));
    }
}
