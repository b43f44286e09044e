//! Cue-text mini-parser: builds a small, malformed-nesting-tolerant forest of
//! text/element nodes out of a raw cue payload.
//!
//! Nodes are stored in a flat arena and reference each other by index rather
//! than by pointer, since a node needs an upward parent reference for style
//! inheritance and an arena sidesteps the aliasing that pointer-based parent
//! links would otherwise require.

/// Index of a node within a [`Dom`]'s arena.
pub type NodeId = usize;

/// A single DOM node: either a text leaf or a tagged element with children.
/// A node never has both text and children at once.
#[derive(Debug, Clone)]
pub enum DomNode {
    Text {
        text: String,
        parent: Option<NodeId>,
    },
    Element {
        tag: String,
        attrs: Option<String>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    },
}

impl DomNode {
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            DomNode::Text { parent, .. } | DomNode::Element { parent, .. } => *parent,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            DomNode::Text { text, .. } => Some(text.as_str()),
            DomNode::Element { .. } => None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            DomNode::Element { tag, .. } => Some(tag.as_str()),
            DomNode::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn attrs(&self) -> Option<&str> {
        match self {
            DomNode::Element { attrs, .. } => attrs.as_deref(),
            DomNode::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match self {
            DomNode::Element { children, .. } => children.as_slice(),
            DomNode::Text { .. } => &[],
        }
    }
}

/// Arena owning every node of one cue's DOM forest, plus the ids of its
/// top-level roots in document order.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<DomNode>,
    roots: Vec<NodeId>,
}

impl Dom {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id]
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        self.roots.as_slice()
    }

    /// Document-order iterator over every node in the forest.
    ///
    /// Arena insertion order already *is* document order: the builder always
    /// descends into a freshly opened element before moving on to the next
    /// sibling, so nodes never need a separate post-hoc traversal.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DomNode)> {
        self.nodes.iter().enumerate()
    }

    /// Mutable access to a text node's text, or `None` for an element node.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match &mut self.nodes[id] {
            DomNode::Text { text, .. } => Some(text),
            DomNode::Element { .. } => None,
        }
    }

    fn push(&mut self, node: DomNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn append_child(&mut self, parent: Option<NodeId>, child: NodeId) {
        match parent {
            Some(id) => {
                if let DomNode::Element { children, .. } = &mut self.nodes[id] {
                    children.push(child);
                }
            }
            None => self.roots.push(child),
        }
    }

    fn push_text(&mut self, parent: Option<NodeId>, text: &str) -> NodeId {
        let id = self.push(DomNode::Text {
            text: text.to_string(),
            parent,
        });
        self.append_child(parent, id);
        id
    }

    fn push_element(&mut self, parent: Option<NodeId>, tag: &str, attrs: Option<&str>) -> NodeId {
        let id = self.push(DomNode::Element {
            tag: tag.to_string(),
            attrs: attrs.map(str::to_string),
            children: Vec::new(),
            parent,
        });
        self.append_child(parent, id);
        id
    }

    /// Resolve an end tag: starting at `current` (the innermost open
    /// element) and walking up through `parent` links, find the nearest
    /// node whose tag equals `name` and return *its* parent — i.e. pop past
    /// the matched element, so appending resumes as its sibling rather than
    /// its child. Tolerates misnested closers (`<b><v ...>foo</b>`) by
    /// matching an ancestor above the current node. Returns `None` (root
    /// level) both when no ancestor matches and when the matched ancestor
    /// was itself already at the root.
    fn pop_past_tag(&self, current: Option<NodeId>, name: &str) -> Option<NodeId> {
        let mut cur = current;
        while let Some(node_id) = cur {
            if self.nodes[node_id].tag() == Some(name) {
                return self.nodes[node_id].parent();
            }
            cur = self.nodes[node_id].parent();
        }
        None
    }
}

/// Count of visual lines `text` would occupy: `1 + total_newlines`, or zero
/// for empty input.
#[must_use]
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        1 + text.matches('\n').count()
    }
}

/// Is `psz[1..]` an end tag, i.e. does the tag open with `</`?
fn is_end_tag(tag: &str) -> bool {
    tag.as_bytes().get(1) == Some(&b'/')
}

/// Find the next `<...>` run in `text` starting at or after `from`, returning
/// `(start, end_exclusive)` byte offsets of a *valid* tag, or `None` if there
/// is no more valid tag (including the terminating cases: a `<>`, `</>`, or
/// `</x` pair that would stop scanning).
fn find_next_tag(text: &str, from: usize) -> Option<(usize, usize)> {
    let open = text[from..].find('<')? + from;
    let close_rel = text[open + 1..].find('>')?;
    let close = open + 1 + close_rel;
    let tag_len = close - open + 1;
    let tag = &text[open..=close];
    if tag_len == 2 || (tag_len == 3 && is_end_tag(tag)) {
        // `<>` is always invalid; `</>` stops the scan. A 3-char *open* tag
        // like `<b>` is valid and falls through to be accepted below.
        return None;
    }
    Some((open, close))
}

/// Split `<name attrs>` (or `</name attrs>`) into the name span and the
/// remainder of the tag content (the `attrs` string).
fn split_tag(tag: &str) -> (&str, &str) {
    let is_end = is_end_tag(tag);
    let skip = if is_end { 2 } else { 1 };
    let rest = &tag[skip..tag.len() - 1]; // strip leading `<`/`</` and trailing `>`
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .unwrap_or(rest.len());
    rest.split_at(name_end)
}

/// Build a cue's DOM forest from its raw `payl` payload, tolerating
/// malformed nesting. Returns the forest and its visual line count.
#[must_use]
pub fn build_dom(payload: &str) -> (Dom, usize) {
    let mut dom = Dom::default();
    let mut lines = 0usize;
    let mut parent: Option<NodeId> = None;
    let mut cursor = 0usize;

    // Adding text only bumps `lines` by its newline count, except for the
    // very first text this cue ever sees, which also counts its own first
    // line: the total is `1 + total_newlines` across the whole payload.
    fn account(lines: &mut usize, text: &str) {
        *lines += if *lines == 0 {
            count_lines(text)
        } else {
            text.matches('\n').count()
        };
    }

    while cursor < payload.len() {
        match find_next_tag(payload, cursor) {
            Some((tag_start, tag_end)) => {
                if tag_start > cursor {
                    let text = &payload[cursor..tag_start];
                    account(&mut lines, text);
                    dom.push_text(parent, text);
                }

                let tag = &payload[tag_start..=tag_end];
                if !is_end_tag(tag) {
                    let (name, attrs) = split_tag(tag);
                    let attrs = if attrs.is_empty() { None } else { Some(attrs) };
                    let id = dom.push_element(parent, name, attrs);
                    parent = Some(id);
                } else if parent.is_none() {
                    // End tag with nothing open: stop scanning entirely.
                    break;
                } else {
                    let (name, _attrs) = split_tag(tag);
                    parent = dom.pop_past_tag(parent, name);
                }
                cursor = tag_end + 1;
            }
            None => {
                let text = &payload[cursor..];
                if !text.is_empty() {
                    account(&mut lines, text);
                    dom.push_text(parent, text);
                }
                break;
            }
        }
    }

    (dom, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_only() {
        let (dom, lines) = build_dom("Hello world");
        assert_eq!(dom.roots().len(), 1);
        assert_eq!(dom.node(dom.roots()[0]).text(), Some("Hello world"));
        assert_eq!(lines, 1);
    }

    #[test]
    fn simple_bold_tag() {
        let (dom, _lines) = build_dom("Hello <b>world</b>");
        assert_eq!(dom.roots().len(), 2);
        let text_node = dom.node(dom.roots()[0]);
        assert_eq!(text_node.text(), Some("Hello "));
        let bold = dom.node(dom.roots()[1]);
        assert_eq!(bold.tag(), Some("b"));
        assert_eq!(bold.children().len(), 1);
        let inner = dom.node(bold.children()[0]);
        assert_eq!(inner.text(), Some("world"));
    }

    #[test]
    fn malformed_nesting_recovers_at_ancestor() {
        // <b><v Alice>foo</b>bar -> root b { v(attrs=" Alice") { "foo" } }, root "bar"
        let (dom, _lines) = build_dom("<b><v Alice>foo</b>bar");
        assert_eq!(dom.roots().len(), 2);
        let b = dom.node(dom.roots()[0]);
        assert_eq!(b.tag(), Some("b"));
        assert_eq!(b.children().len(), 1);
        let v = dom.node(b.children()[0]);
        assert_eq!(v.tag(), Some("v"));
        assert_eq!(v.attrs(), Some(" Alice"));
        assert_eq!(v.children().len(), 1);
        let foo = dom.node(v.children()[0]);
        assert_eq!(foo.text(), Some("foo"));
        let bar = dom.node(dom.roots()[1]);
        assert_eq!(bar.text(), Some("bar"));
    }

    #[test]
    fn multiline_counts_lines() {
        let (_dom, lines) = build_dom("a\nb\nc");
        assert_eq!(lines, 3);
    }

    #[test]
    fn empty_payload_has_no_lines() {
        let (dom, lines) = build_dom("");
        assert!(dom.is_empty());
        assert_eq!(lines, 0);
    }

    #[test]
    fn degenerate_tags_stop_the_scan() {
        // `<>` is invalid, `</>` and lone `</x` forms end the scan: the rest
        // of the string is kept as trailing text.
        let (dom, _) = build_dom("a<>b");
        // `<>` is not a valid tag start at all, so the scan treats it as
        // ending the tag search and keeps everything from `a` onward as text.
        assert_eq!(dom.roots().len(), 1);
        assert_eq!(dom.node(dom.roots()[0]).text(), Some("a<>b"));
    }

    #[test]
    fn end_tag_with_no_open_tag_breaks() {
        let (dom, _) = build_dom("</b>after");
        // No parent to close; scanning stops, nothing further is appended.
        assert!(dom.roots().is_empty());
    }
}
