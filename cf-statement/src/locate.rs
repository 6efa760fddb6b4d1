//! Structural search by tag name and class.
//!
//! Every lookup walks the subtree of `root` depth-first in pre-order, visiting `root` itself
//! first. A `None` root is accepted so lookups can be chained on the result of a previous lookup
//! without checking it first; it never matches anything.
use crate::markup::NodeRef;

/// Returns `true` if `node` is an element named `tag` whose `class` attribute, when `class` is
/// given and non-empty, is exactly `class`.
///
/// The class comparison is on the whole attribute value: `class="title big"` does not match
/// `"title"`.
#[must_use]
pub fn matches(node: NodeRef<'_>, tag: &str, class: Option<&str>) -> bool {
    if node.tag_name() != Some(tag) {
        return false;
    }

    match class.filter(|class| !class.is_empty()) {
        Some(class) => node.attr("class") == Some(class),
        None => true,
    }
}

/// Returns the first matching node in pre-order, without visiting the rest of the tree.
#[must_use]
pub fn find_first<'a>(
    root: Option<NodeRef<'a>>,
    tag: &str,
    class: Option<&str>,
) -> Option<NodeRef<'a>> {
    root?
        .descendants()
        .find(|&node| matches(node, tag, class))
}

/// Returns every matching node in document order.
#[must_use]
pub fn find_all<'a>(root: Option<NodeRef<'a>>, tag: &str, class: Option<&str>) -> Vec<NodeRef<'a>> {
    root.map(|root| {
        root.descendants()
            .filter(|&node| matches(node, tag, class))
            .collect()
    })
    .unwrap_or_default()
}
