//! Tag catalog.
//!
//! Fixed data describing which tag names may be constructed, which of them
//! are void (self-closing, never render children) and which are deprecated
//! (always rejected). `html` is not listed: it is only valid as the implicit
//! document root, which [`is_permitted`] special-cases.

use strum_macros::Display;

use crate::error::TagError;

/// Tags that may be constructed anywhere in a tree.
pub const TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "i", "iframe", "img", "input", "ins", "kbd",
    "label", "legend", "li", "link", "main", "map", "mark", "math", "menu", "meta", "meter",
    "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p", "param", "picture",
    "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section",
    "select", "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup",
    "svg", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time",
    "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for void elements."
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// [§ 16.2 Non-conforming features](https://html.spec.whatwg.org/multipage/obsolete.html#non-conforming-features)
pub const DEPRECATED_TAGS: &[&str] = &[
    "acronym", "applet", "basefont", "bgsound", "big", "blink", "center", "dir", "font", "frame",
    "frameset", "image", "isindex", "keygen", "listing", "marquee", "menuitem", "multicol",
    "nextid", "nobr", "noembed", "noframes", "plaintext", "rb", "rtc", "spacer", "strike", "tt",
    "xmp",
];

/// The implicit document root tag.
pub const ROOT_TAG: &str = "html";

/// How the catalog classifies a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TagCategory {
    /// Permitted, child-bearing.
    Normal,
    /// Permitted, self-closing.
    Void,
    /// Always rejected.
    Deprecated,
    /// Not in the catalog.
    Unknown,
}

/// Whether `tag` may be constructed. `html` is always permitted.
pub fn is_permitted(tag: &str) -> bool {
    tag == ROOT_TAG || TAGS.contains(&tag)
}

/// Whether `tag` is self-closing.
pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Whether `tag` is always rejected.
pub fn is_deprecated(tag: &str) -> bool {
    DEPRECATED_TAGS.contains(&tag)
}

/// Classify a tag name.
pub fn category(tag: &str) -> TagCategory {
    if is_deprecated(tag) {
        TagCategory::Deprecated
    } else if is_void(tag) {
        TagCategory::Void
    } else if is_permitted(tag) {
        TagCategory::Normal
    } else {
        TagCategory::Unknown
    }
}

/// Check that an element may be built with `tag`.
///
/// # Errors
///
/// Returns [`TagError::Deprecated`] for deprecated tags and
/// [`TagError::Invalid`] for anything outside the permitted set.
pub fn validate(tag: &str) -> Result<(), TagError> {
    match category(tag) {
        TagCategory::Deprecated => Err(TagError::Deprecated {
            tag: tag.to_string(),
        }),
        TagCategory::Unknown => Err(TagError::Invalid {
            tag: tag.to_string(),
        }),
        TagCategory::Normal | TagCategory::Void => Ok(()),
    }
}

/// Check that a fragment may use `tag` as its root.
///
/// Stricter than [`validate`]: the document root tag is not accepted here.
///
/// # Errors
///
/// Same as [`validate`], plus [`TagError::Invalid`] for `html`.
pub fn validate_fragment_root(tag: &str) -> Result<(), TagError> {
    validate(tag)?;
    if tag == ROOT_TAG {
        return Err(TagError::Invalid {
            tag: tag.to_string(),
        });
    }
    Ok(())
}
