//! Structured view of an API response.
//!
//! A [`ViewTree`] mirrors the collapsible tree a test runner shows for a
//! response body: object and array containers, key labels, scalar leaves,
//! and the markers that annotation adds. Nodes live in an arena and are
//! addressed by [`NodeId`]; inserting a node never moves or invalidates
//! existing ones.

use serde_json::Value;

/// Inline style shared by every marker.
const MARKER_FONT_STYLE: &str = "font-weight: bold; font-size: 1.3em;";

/// Left padding of markers placed next to a value.
pub const INLINE_MARKER_INDENT_PX: usize = 15;

/// Handle to a node in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node displays.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Wrapper around the top-level value.
    Document,
    /// An array; children are its elements.
    Array,
    /// An object; children alternate key labels and values.
    Object,
    /// A property key label.
    Key(String),
    /// A scalar value shown as JSON text.
    Scalar(String),
    /// An annotation added after the view was rendered.
    Marker(Marker),
}

/// Purpose of an annotation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Placed after an array that has no element at the addressed index.
    MissingElement,
    /// Synthetic line for a property that is absent from an object.
    MissingProperty,
    /// Placed next to a value that does not match the schema.
    Mismatch,
}

/// An annotation inserted into a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Purpose of the marker.
    pub kind: MarkerKind,
    /// Text shown to the reader.
    pub text: String,
    /// Color of the text.
    pub color: String,
    /// Nesting level of the line; the root object's members are at 1.
    pub depth: usize,
    /// Left padding in pixels.
    pub indent_px: usize,
}

impl Marker {
    /// Returns the inline CSS that paints this marker.
    #[must_use]
    pub fn inline_style(&self) -> String {
        format!(
            "{MARKER_FONT_STYLE} padding-left: {}px; color: {};",
            self.indent_px, self.color
        )
    }
}

/// One node of a [`ViewTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    /// What the node displays.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ViewNode {
    /// Parent node; `None` only for the document node.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in display order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    const fn is_marker(&self) -> bool {
        matches!(self.kind, NodeKind::Marker(_))
    }
}

/// Arena-backed structured view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
}

impl ViewTree {
    /// Renders `value` as a structured view.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let mut tree = Self {
            nodes: vec![ViewNode {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        };
        let root = tree.root();
        tree.push_value(root, value);
        tree
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The node of the top-level value.
    #[must_use]
    pub fn document_value(&self) -> Option<NodeId> {
        self.value_children(self.root()).next()
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(id.0)
    }

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    /// Returns `true` if the node is an array.
    #[must_use]
    pub fn is_array_container(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Array))
    }

    /// Returns `true` if the node is an object.
    #[must_use]
    pub fn is_object_container(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Object))
    }

    /// Returns `true` if the node is a scalar value.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Scalar(_)))
    }

    /// Children of `id` that are not markers.
    pub fn value_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .map(ViewNode::children)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|child| self.node(*child).is_some_and(|node| !node.is_marker()))
    }

    /// Element `index` of an array node.
    #[must_use]
    pub fn array_element(&self, array: NodeId, index: usize) -> Option<NodeId> {
        if !self.is_array_container(array) {
            return None;
        }
        self.value_children(array).nth(index)
    }

    /// Value of the property labelled exactly `key` in an object node.
    #[must_use]
    pub fn object_value(&self, object: NodeId, key: &str) -> Option<NodeId> {
        if !self.is_object_container(object) {
            return None;
        }
        let mut members = self.value_children(object);
        while let Some(member) = members.next() {
            if matches!(self.kind(member), Some(NodeKind::Key(label)) if label == key) {
                return members.next();
            }
        }
        None
    }

    /// Every marker in display order.
    #[must_use]
    pub fn markers(&self) -> Vec<&Marker> {
        let mut found = Vec::new();
        self.collect_markers(self.root(), &mut found);
        found
    }

    /// Markers that are direct children of `id`.
    #[must_use]
    pub fn child_markers(&self, id: NodeId) -> Vec<&Marker> {
        self.node(id)
            .map(ViewNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| match self.kind(*child) {
                Some(NodeKind::Marker(marker)) => Some(marker),
                _ => None,
            })
            .collect()
    }

    /// Inserts `marker` as the sibling right after `anchor`.
    ///
    /// Returns `None` when `anchor` is the document node or unknown.
    pub fn insert_after(&mut self, anchor: NodeId, marker: Marker) -> Option<NodeId> {
        let parent = self.node(anchor)?.parent?;
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|child| *child == anchor)?;
        let id = self.push_node(parent, NodeKind::Marker(marker));
        self.nodes.get_mut(parent.0)?.children.insert(position + 1, id);
        Some(id)
    }

    /// Inserts `marker` as the first child of `container`.
    pub fn insert_first_child(&mut self, container: NodeId, marker: Marker) -> Option<NodeId> {
        self.node(container)?;
        let id = self.push_node(container, NodeKind::Marker(marker));
        self.nodes.get_mut(container.0)?.children.insert(0, id);
        Some(id)
    }

    /// Renders the tree as indented text, one value or marker per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for child in self.node(self.root()).map(ViewNode::children).unwrap_or_default() {
            self.render_node(&mut out, *child, 0, None);
        }
        out
    }

    fn render_node(&self, out: &mut String, id: NodeId, level: usize, key: Option<&str>) {
        let Some(node) = self.node(id) else {
            return;
        };
        let pad = "  ".repeat(level);
        let label = key.map_or_else(String::new, |k| format!("\"{k}\": "));

        match &node.kind {
            NodeKind::Object | NodeKind::Array => {
                let (open, close) = if matches!(node.kind, NodeKind::Object) {
                    ('{', '}')
                } else {
                    ('[', ']')
                };
                out.push_str(&format!("{pad}{label}{open}\n"));
                let mut pending_key = None;
                for child in &node.children {
                    if let Some(NodeKind::Key(name)) = self.kind(*child) {
                        pending_key = Some(name.as_str());
                        continue;
                    }
                    let child_key = if self.node(*child).is_some_and(ViewNode::is_marker) {
                        None
                    } else {
                        pending_key.take()
                    };
                    self.render_node(out, *child, level + 1, child_key);
                }
                out.push_str(&format!("{pad}{close}\n"));
            }
            NodeKind::Scalar(text) => {
                out.push_str(&format!("{pad}{label}{text}\n"));
            }
            NodeKind::Marker(marker) => {
                out.push_str(&format!("{pad}» {}\n", marker.text));
            }
            NodeKind::Key(name) => {
                out.push_str(&format!("{pad}\"{name}\"\n"));
            }
            NodeKind::Document => {}
        }
    }

    fn collect_markers<'a>(&'a self, id: NodeId, found: &mut Vec<&'a Marker>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let NodeKind::Marker(marker) = &node.kind {
            found.push(marker);
        }
        for child in &node.children {
            self.collect_markers(*child, found);
        }
    }

    fn push_value(&mut self, parent: NodeId, value: &Value) -> NodeId {
        match value {
            Value::Object(map) => {
                let id = self.push_child(parent, NodeKind::Object);
                for (key, member) in map {
                    self.push_child(id, NodeKind::Key(key.clone()));
                    self.push_value(id, member);
                }
                id
            }
            Value::Array(items) => {
                let id = self.push_child(parent, NodeKind::Array);
                for item in items {
                    self.push_value(id, item);
                }
                id
            }
            scalar => self.push_child(parent, NodeKind::Scalar(scalar.to_string())),
        }
    }

    /// Appends a node to the arena and to the end of `parent`'s children.
    fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push_node(parent, kind);
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        id
    }

    /// Appends a node to the arena without linking it into `parent`.
    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ViewNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }
}
