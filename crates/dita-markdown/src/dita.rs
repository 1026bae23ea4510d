/*
 * dita.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * DITA element names and their class tags.
 */

/// A DITA element: local name plus its `class` attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitaClass {
    pub local_name: &'static str,
    pub class: &'static str,
}

impl DitaClass {
    const fn new(local_name: &'static str, class: &'static str) -> Self {
        Self { local_name, class }
    }
}

// Topic structure
pub const TOPIC_TOPIC: DitaClass = DitaClass::new("topic", "- topic/topic ");
pub const TOPIC_TITLE: DitaClass = DitaClass::new("title", "- topic/title ");
pub const TOPIC_PROLOG: DitaClass = DitaClass::new("prolog", "- topic/prolog ");
pub const TOPIC_BODY: DitaClass = DitaClass::new("body", "- topic/body ");
pub const TOPIC_SECTION: DitaClass = DitaClass::new("section", "- topic/section ");

// Body blocks
pub const TOPIC_P: DitaClass = DitaClass::new("p", "- topic/p ");
pub const TOPIC_UL: DitaClass = DitaClass::new("ul", "- topic/ul ");
pub const TOPIC_OL: DitaClass = DitaClass::new("ol", "- topic/ol ");
pub const TOPIC_LI: DitaClass = DitaClass::new("li", "- topic/li ");
pub const TOPIC_LQ: DitaClass = DitaClass::new("lq", "- topic/lq ");
pub const TOPIC_SIMPLETABLE: DitaClass = DitaClass::new("simpletable", "- topic/simpletable ");
pub const TOPIC_STHEAD: DitaClass = DitaClass::new("sthead", "- topic/sthead ");
pub const TOPIC_STROW: DitaClass = DitaClass::new("strow", "- topic/strow ");
pub const TOPIC_STENTRY: DitaClass = DitaClass::new("stentry", "- topic/stentry ");
pub const TOPIC_REQUIRED_CLEANUP: DitaClass =
    DitaClass::new("required-cleanup", "- topic/required-cleanup ");
pub const PR_D_CODEBLOCK: DitaClass = DitaClass::new("codeblock", "+ topic/pre pr-d/codeblock ");

// Inlines
pub const HI_D_I: DitaClass = DitaClass::new("i", "+ topic/ph hi-d/i ");
pub const HI_D_B: DitaClass = DitaClass::new("b", "+ topic/ph hi-d/b ");
pub const HI_D_LINE_THROUGH: DitaClass =
    DitaClass::new("line-through", "+ topic/ph hi-d/line-through ");
pub const HI_D_SUP: DitaClass = DitaClass::new("sup", "+ topic/ph hi-d/sup ");
pub const HI_D_SUB: DitaClass = DitaClass::new("sub", "+ topic/ph hi-d/sub ");
pub const PR_D_CODEPH: DitaClass = DitaClass::new("codeph", "+ topic/ph pr-d/codeph ");
pub const TOPIC_XREF: DitaClass = DitaClass::new("xref", "- topic/xref ");
pub const TOPIC_IMAGE: DitaClass = DitaClass::new("image", "- topic/image ");
pub const TOPIC_ALT: DitaClass = DitaClass::new("alt", "- topic/alt ");

// Prolog metadata
pub const TOPIC_AUTHOR: DitaClass = DitaClass::new("author", "- topic/author ");
pub const TOPIC_SOURCE: DitaClass = DitaClass::new("source", "- topic/source ");
pub const TOPIC_PUBLISHER: DitaClass = DitaClass::new("publisher", "- topic/publisher ");
pub const TOPIC_PERMISSIONS: DitaClass = DitaClass::new("permissions", "- topic/permissions ");
pub const TOPIC_METADATA: DitaClass = DitaClass::new("metadata", "- topic/metadata ");
pub const TOPIC_AUDIENCE: DitaClass = DitaClass::new("audience", "- topic/audience ");
pub const TOPIC_CATEGORY: DitaClass = DitaClass::new("category", "- topic/category ");
pub const TOPIC_KEYWORDS: DitaClass = DitaClass::new("keywords", "- topic/keywords ");
pub const TOPIC_KEYWORD: DitaClass = DitaClass::new("keyword", "- topic/keyword ");
pub const TOPIC_RESOURCEID: DitaClass = DitaClass::new("resourceid", "- topic/resourceid ");
pub const TOPIC_DATA: DitaClass = DitaClass::new("data", "- topic/data ");

// Attribute names
pub const ATTRIBUTE_NAME_ID: &str = "id";
pub const ATTRIBUTE_NAME_NAME: &str = "name";
pub const ATTRIBUTE_NAME_VALUE: &str = "value";
pub const ATTRIBUTE_NAME_VIEW: &str = "view";
pub const ATTRIBUTE_NAME_AUDIENCE: &str = "audience";
pub const ATTRIBUTE_NAME_APPID: &str = "appid";
pub const ATTRIBUTE_NAME_HREF: &str = "href";
pub const ATTRIBUTE_NAME_SCOPE: &str = "scope";
pub const ATTRIBUTE_NAME_FORMAT: &str = "format";
pub const ATTRIBUTE_NAME_OUTPUTCLASS: &str = "outputclass";
pub const ATTRIBUTE_NAME_START: &str = "start";
