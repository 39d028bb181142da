//! Click resolution against the rendered layout.
//!
//! A click resolves to the deepest clickable element whose recorded rect
//! contains the point. Elements without a rect in the layout are invisible
//! to clicks, as are their subtrees.

use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Resolve a point to the deepest clickable element under it, if any.
///
/// Children are visited in reverse insertion order, so when rects overlap
/// the most recently rendered element wins.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    let rect = layout.get(&root.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    let children = match &root.content {
        Content::Children(children) => children.as_slice(),
        _ => &[],
    };

    children
        .iter()
        .rev()
        .find_map(|child| hit_test(layout, child, x, y))
        .or_else(|| root.clickable.then(|| root.id.clone()))
}
