//! Presentation template module.
//!
//! The fixed parts every new presentation starts from: one slide master, its
//! layouts and one theme. Slides, `presentation.xml` and the document
//! properties are generated per deck.

/// The slide master shared by every layout.
pub fn default_slide_master_xml() -> &'static str {
    include_str!("../../../resources/slideMasters/slideMaster1.xml")
}

/// The Office theme referenced by the master.
pub fn default_theme_xml() -> &'static str {
    include_str!("../../../resources/theme/theme1.xml")
}

pub const SLIDE_MASTER_PARTNAME: &str = "ppt/slideMasters/slideMaster1.xml";
pub const THEME_PARTNAME: &str = "ppt/theme/theme1.xml";

/// Layouts available in the default template, in master order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centered title and subtitle.
    TitleSlide,
    /// Title plus one bulleted content placeholder.
    TitleAndContent,
}

impl SlideLayout {
    pub const ALL: [SlideLayout; 2] = [SlideLayout::TitleSlide, SlideLayout::TitleAndContent];

    /// Position in the master's layout list (0-based).
    pub fn index(self) -> usize {
        match self {
            SlideLayout::TitleSlide => 0,
            SlideLayout::TitleAndContent => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => "Title Slide",
            SlideLayout::TitleAndContent => "Title and Content",
        }
    }

    pub fn partname(self) -> String {
        format!("ppt/slideLayouts/slideLayout{}.xml", self.index() + 1)
    }

    /// Reference to this layout from a sibling directory (slides, master).
    pub(crate) fn relative_target(self) -> String {
        format!("../slideLayouts/slideLayout{}.xml", self.index() + 1)
    }

    pub fn xml(self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => {
                include_str!("../../../resources/slideLayouts/slideLayout1.xml")
            },
            SlideLayout::TitleAndContent => {
                include_str!("../../../resources/slideLayouts/slideLayout2.xml")
            },
        }
    }

    /// `<p:ph>` element a slide uses to inherit this layout's title.
    pub(crate) fn title_placeholder(self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => r#"<p:ph type="ctrTitle"/>"#,
            SlideLayout::TitleAndContent => r#"<p:ph type="title"/>"#,
        }
    }

    /// `<p:ph>` element a slide uses to inherit this layout's body.
    pub(crate) fn body_placeholder(self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => r#"<p:ph type="subTitle" idx="1"/>"#,
            SlideLayout::TitleAndContent => r#"<p:ph idx="1"/>"#,
        }
    }

    pub(crate) fn body_shape_name(self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => "Subtitle 2",
            SlideLayout::TitleAndContent => "Content Placeholder 2",
        }
    }
}
