//! Rich-text bone with HTML tag and attribute allow-lists.
//!
//! Tags whose name is on the allow-list are rebuilt keeping only the
//! attributes allowed for that tag. Any other tag is escaped so it renders as
//! literal text.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::BoneOptions;
use crate::read::{present, ReadOutcome};

/// Tags allowed when a text bone does not restrict them further.
pub const DEFAULT_VALID_TAGS: &[&str] = &[
    "b", "a", "i", "u", "span", "div", "p", "img", "ol", "ul", "li", "abbr", "sub", "sup", "table",
    "thead", "tbody", "tfoot", "tr", "td", "th", "br", "hr", "strong", "blockquote", "em",
];

/// Attributes kept per tag. Tags not listed keep none.
pub const DEFAULT_VALID_ATTRS: &[(&str, &[&str])] = &[
    ("a", &["href", "target", "title"]),
    ("abbr", &["title"]),
    ("span", &["title"]),
    ("img", &["src", "alt", "title"]),
    ("td", &["colspan", "rowspan"]),
    ("p", &["data-indent"]),
    ("blockquote", &["cite"]),
];

/// Attributes holding a URL.
const URL_ATTRS: &[&str] = &["href", "src", "cite"];

/// URL schemes that execute code when followed.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b([^<>]*)>").expect("tag pattern is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

fn is_unsafe_url(value: &str) -> bool {
    let compact = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    UNSAFE_SCHEMES.iter().any(|scheme| compact.starts_with(scheme))
}

#[derive(Debug, Clone)]
pub struct TextBone {
    pub options: BoneOptions,
    valid_tags: BTreeSet<String>,
    valid_attrs: BTreeMap<String, BTreeSet<String>>,
}

impl Default for TextBone {
    fn default() -> Self {
        Self::with_valid_tags(DEFAULT_VALID_TAGS.iter().copied())
    }
}

impl TextBone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the tag allow-list. Names are matched case-insensitively.
    /// Attributes follow [`DEFAULT_VALID_ATTRS`].
    pub fn with_valid_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            options: BoneOptions::default(),
            valid_tags: tags
                .into_iter()
                .map(|t| t.as_ref().to_ascii_lowercase())
                .collect(),
            valid_attrs: DEFAULT_VALID_ATTRS
                .iter()
                .map(|(tag, attrs)| {
                    (
                        tag.to_string(),
                        attrs.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Replace the attributes kept on `tag`.
    pub fn valid_attrs<I, S>(mut self, tag: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.valid_attrs.insert(
            tag.to_ascii_lowercase(),
            attrs
                .into_iter()
                .map(|a| a.as_ref().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    pub fn with_options(mut self, options: BoneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn valid_tags(&self) -> impl Iterator<Item = &str> {
        self.valid_tags.iter().map(String::as_str)
    }

    /// Escape every tag that is not on the allow-list and strip disallowed
    /// attributes from the rest.
    pub fn sanitize(&self, html: &str) -> String {
        TAG_RE
            .replace_all(html, |caps: &Captures<'_>| {
                let name = caps[2].to_ascii_lowercase();
                if !self.valid_tags.contains(&name) {
                    return caps[0].replace('<', "&lt;").replace('>', "&gt;");
                }
                if !caps[1].is_empty() {
                    return format!("</{name}>");
                }
                self.rebuild_open_tag(&name, &caps[3])
            })
            .into_owned()
    }

    fn rebuild_open_tag(&self, name: &str, attrs: &str) -> String {
        let (attrs, self_closing) = match attrs.trim_end().strip_suffix('/') {
            Some(attrs) => (attrs, true),
            None => (attrs, false),
        };

        let mut tag = format!("<{name}");
        if let Some(allowed) = self.valid_attrs.get(name) {
            for caps in ATTR_RE.captures_iter(attrs) {
                let attr = caps[1].to_ascii_lowercase();
                if !allowed.contains(&attr) {
                    continue;
                }
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                if URL_ATTRS.contains(&attr.as_str()) && is_unsafe_url(value) {
                    continue;
                }
                tag.push_str(&format!(" {attr}=\"{}\"", value.replace('"', "&quot;")));
            }
        }
        if self_closing {
            tag.push('/');
        }
        tag.push('>');
        tag
    }

    pub fn from_client(&self, raw: Option<&str>) -> ReadOutcome<Value> {
        let raw = match present(raw) {
            Ok(raw) => raw,
            Err(outcome) => return outcome,
        };

        let value = Value::String(self.sanitize(raw));
        match self.options.is_invalid(&value) {
            Some(reason) => ReadOutcome::Invalid(reason),
            None => ReadOutcome::Valid(value),
        }
    }

    pub fn unserialize(&self, stored: &Value) -> Value {
        match stored {
            Value::String(_) => stored.clone(),
            _ => Value::Null,
        }
    }
}
