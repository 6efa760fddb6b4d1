//! Text extraction from located nodes.
use crate::markup::NodeRef;

/// How extracted text is post-processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Collapse every run of whitespace into a single space and trim the ends.
    #[default]
    Filtered,
    /// Return the text exactly as it appears in the document.
    Raw,
}

/// Extracts the text of `node`.
///
/// Without `recursive`, only the direct text children of `node` are concatenated, so the text of
/// nested elements is left out. With `recursive`, the text of the whole subtree is concatenated in
/// document order, so a node's own text is interleaved with its children's text where it appears
/// rather than placed before it. The text of a text node is its own content either way.
///
/// An absent node yields an empty string.
#[must_use]
pub fn extract(node: Option<NodeRef<'_>>, recursive: bool, mode: TextMode) -> String {
    let Some(node) = node else {
        return String::new();
    };

    let mut text = String::new();

    if recursive {
        collect_subtree(node, &mut text);
    } else {
        collect_own(node, &mut text);
    }

    match mode {
        TextMode::Filtered => normalize_whitespace(&text),
        TextMode::Raw => text,
    }
}

/// Shorthand for non-recursive [`extract`].
#[must_use]
pub fn own_text(node: Option<NodeRef<'_>>, mode: TextMode) -> String {
    extract(node, false, mode)
}

/// Shorthand for recursive [`extract`].
#[must_use]
pub fn deep_text(node: Option<NodeRef<'_>>, mode: TextMode) -> String {
    extract(node, true, mode)
}

/// Collapses whitespace runs into single spaces and trims both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_own(node: NodeRef<'_>, out: &mut String) {
    if let Some(text) = node.text() {
        out.push_str(text);
        return;
    }

    for text in node.children().filter_map(NodeRef::text) {
        out.push_str(text);
    }
}

fn collect_subtree(node: NodeRef<'_>, out: &mut String) {
    for text in node.descendants().filter_map(NodeRef::text) {
        out.push_str(text);
    }
}
