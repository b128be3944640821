//! HTML tag descriptors returned by markup transforms.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Where a tag is spliced into the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectTo {
    /// Right after the opening `<head>` tag
    #[default]
    HeadPrepend,
    /// Right before `</head>`
    Head,
    /// Right after the opening `<body>` tag
    BodyPrepend,
    /// Right before `</body>`
    Body,
}

/// A tag to inject: name, ordered attributes, optional text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    #[serde(default)]
    pub inject_to: InjectTo,
}

impl HtmlTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: None,
            inject_to: InjectTo::default(),
        }
    }

    /// `<link rel="stylesheet" href="...">`
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self::new("link")
            .attr("rel", "stylesheet")
            .attr("href", href)
    }

    /// `<script>` with inline content and the given `type` attribute
    pub fn inline_script(script_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new("script")
            .attr("type", script_type)
            .children(body)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn children(mut self, children: impl Into<String>) -> Self {
        self.children = Some(children.into());
        self
    }

    pub fn inject_to(mut self, inject_to: InjectTo) -> Self {
        self.inject_to = inject_to;
        self
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS
            .iter()
            .any(|void| void.eq_ignore_ascii_case(&self.tag))
    }

    /// Render the tag as markup
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(32);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if self.is_void() {
            return out;
        }

        if let Some(children) = &self.children {
            if self.tag.eq_ignore_ascii_case("script") {
                out.push_str(&neutralize_script_close(children));
            } else {
                out.push_str(children);
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// A literal `</script` inside inline content would end the element early.
fn neutralize_script_close(body: &str) -> String {
    body.replace("</script", "<\\/script")
        .replace("</SCRIPT", "<\\/SCRIPT")
}
