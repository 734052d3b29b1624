//! Markdown rendering.
//!
//! Output from comrak is trusted markup: it is attached as a text node, so
//! the renderer emits it verbatim.

use comrak::{ComrakOptions, markdown_to_html};
use trellis_dom::ElementData;

use crate::builder::Fragment;

/// Class carried by the element wrapping rendered markdown.
pub const MARKDOWN_CLASS: &str = "markdown";

/// Characters that count as indentation when dedenting.
const INDENT: [char; 2] = [' ', '\t'];

fn options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

/// Convert markdown text to markup.
pub fn to_html(text: &str) -> String {
    markdown_to_html(text, &options())
}

/// Render `text` into a fragment rooted at `<div class="markdown">`.
pub fn block(text: &str) -> Fragment {
    let mut block = Fragment::from_element(ElementData::wrapper(MARKDOWN_CLASS));
    let _ = block.text(to_html(text));
    block
}

/// Remove the indentation shared by every non-blank line.
///
/// Lines holding only spaces and tabs do not count towards the shared
/// indentation and come out empty.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.lines() {
        let rest = line.trim_start_matches(INDENT);
        if rest.is_empty() {
            continue;
        }
        let indent = &line[..line.len() - rest.len()];
        margin = Some(margin.map_or(indent, |m| common_prefix(m, indent)));
    }
    let margin = margin.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for piece in text.split_inclusive('\n') {
        let (line, ending) = piece
            .strip_suffix('\n')
            .map_or((piece, ""), |line| (line, "\n"));
        if !line.trim_matches(INDENT).is_empty() {
            out.push_str(line.strip_prefix(margin).unwrap_or(line));
        }
        out.push_str(ending);
    }
    out
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
