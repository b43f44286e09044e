//! Segment converter: flattens a cue's DOM into styled text segments.

use crate::dom::{Dom, DomNode, NodeId};

/// Accumulated inline style for one segment. Flags union as ancestors are
/// walked; `font_color` is set by the innermost `<v>` ancestor that carries
/// non-empty attrs and is never overwritten by an outer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_color: Option<u32>,
}

impl Style {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

/// One flattened, styled run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Decodes XML/HTML entities in segment text. Kept as an injectable seam
/// rather than a built-in implementation, since the entity table itself is
/// a host concern outside this crate's text-segment model.
pub trait EntityDecoder {
    /// Return the entity-decoded form of `text`.
    fn decode(&self, text: &str) -> String;
}

/// An [`EntityDecoder`] that performs no decoding, for callers with no
/// entity table of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEntityDecoder;

impl EntityDecoder for IdentityEntityDecoder {
    fn decode(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Fold a `<v>` tag's attribute string into a stable 24-bit font color.
fn fold_font_color(attrs: &str) -> u32 {
    let mut acc: u32 = 0;
    for byte in attrs.bytes() {
        acc = (acc << 3) ^ u32::from(byte);
    }
    (0x007F_7F7F | acc) & 0x00FF_FFFF
}

/// Walk from `node` up through `parent` links to the root, accumulating
/// style flags. Ancestors closer to `node` are visited first; later (outer)
/// ancestors only add flags, they never clear one already set.
fn inherit_style(dom: &Dom, node: NodeId) -> Style {
    let mut style = Style::default();
    let mut cur = dom.node(node).parent();
    while let Some(id) = cur {
        if let DomNode::Element { tag, attrs, .. } = dom.node(id) {
            match tag.as_str() {
                "b" => style.bold = true,
                "i" => style.italic = true,
                "u" => style.underline = true,
                "v" => {
                    if let Some(attrs) = attrs {
                        if !attrs.is_empty() && style.font_color.is_none() {
                            style.font_color = Some(fold_font_color(attrs));
                        }
                    }
                }
                _ => {}
            }
        }
        cur = dom.node(id).parent();
    }
    style
}

fn walk(dom: &Dom, node: NodeId, decoder: &dyn EntityDecoder, out: &mut Vec<Segment>) {
    match dom.node(node) {
        DomNode::Text { text, .. } => out.push(Segment {
            text: decoder.decode(text),
            style: inherit_style(dom, node),
        }),
        DomNode::Element { children, .. } => {
            for &child in children {
                walk(dom, child, decoder, out);
            }
        }
    }
}

/// Depth-first walk of a cue's DOM producing a flat, document-order list of
/// styled segments.
#[must_use]
pub fn convert_cue_to_segments(dom: &Dom, decoder: &dyn EntityDecoder) -> Vec<Segment> {
    let mut out = Vec::new();
    for &root in dom.roots() {
        walk(dom, root, decoder, &mut out);
    }
    out
}
