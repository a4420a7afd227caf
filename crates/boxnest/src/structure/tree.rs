//! Arena-backed containment tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. Moving
//! a subtree during construction only rewrites `parent`/`children` indices,
//! so ownership of every node stays with the tree.
//!
//! # Architecture
//!
//! - [`NodeId`]: index of a node; `NodeId(0)` is always the sentinel root
//! - [`NodeKind`]: the root variant or a detected [`Element`]
//! - [`TreeBuilder`]: the only way to mutate a tree
//! - [`ElementTree`]: the finished, read-only tree
//!
//! Children are visited in a stable order (ascending box area, then insertion
//! index) whenever the insertion algorithm scans for containment, so the same
//! input always yields the same tree.

use std::fmt::{self, Write};

use log::{debug, trace, warn};

use boxnest_core::{
    element::{Element, ElementClass},
    geometry::{BBox, GeometryError},
};

/// Index of a node in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Id of the sentinel root.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in insertion order; the root is 0.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The sentinel root. Never rendered as a tag.
    Root,
    /// A detected element.
    Element(Element),
}

impl NodeKind {
    /// Returns the element, or `None` for the root.
    pub fn element(&self) -> Option<&Element> {
        match self {
            NodeKind::Root => None,
            NodeKind::Element(element) => Some(element),
        }
    }

    /// Returns the node's box; the root has a zero-area box at the origin.
    pub fn bbox(&self) -> BBox {
        match self {
            NodeKind::Root => BBox::default(),
            NodeKind::Element(element) => element.bbox(),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeKind::Root)
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element that was left out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    index: usize,
    class: ElementClass,
    bbox: BBox,
    reason: GeometryError,
}

impl Rejection {
    /// Position of the element in the input batch.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn class(&self) -> &ElementClass {
        &self.class
    }

    /// The offending box, as given.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn reason(&self) -> GeometryError {
        self.reason
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "element #{} ({}) rejected: {}",
            self.index, self.class, self.reason
        )
    }
}

/// Incrementally places elements into a containment tree.
///
/// # Examples
///
/// ```
/// use boxnest::structure::TreeBuilder;
/// use boxnest_core::{element::Element, geometry::BBox};
///
/// let mut builder = TreeBuilder::new();
/// let header = builder.push(Element::new("header", BBox::new(0, 0, 100, 20))).unwrap();
/// let button = builder.push(Element::new("button", BBox::new(10, 5, 40, 15))).unwrap();
/// let tree = builder.finish();
///
/// assert_eq!(tree.parent(button), Some(header));
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    rejections: Vec<Rejection>,
    pushed: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Creates a builder holding only the sentinel root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
            rejections: Vec::new(),
            pushed: 0,
        }
    }

    /// Adds an element and places it in the tree.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when the element's box is inverted or has
    /// zero area. The rejection is also recorded on the finished tree and the
    /// builder stays usable.
    pub fn push(&mut self, element: Element) -> Result<NodeId, Rejection> {
        let index = self.pushed;
        self.pushed += 1;

        if let Err(reason) = element.bbox().validate() {
            let rejection = Rejection {
                index,
                class: element.class().clone(),
                bbox: element.bbox(),
                reason,
            };
            warn!(
                index = index,
                class = element.class().as_str(),
                reason = reason.to_string();
                "Rejecting element with invalid box"
            );
            self.rejections.push(rejection.clone());
            return Err(rejection);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(NodeKind::Element(element)));
        self.insert(NodeId::ROOT, id);
        Ok(id)
    }

    /// Inserts a pushed node under the root unless it is already placed.
    ///
    /// Insertion is idempotent by identity: an attached node is left where
    /// it is, so calling this any number of times never changes the tree.
    pub fn reinsert(&mut self, id: NodeId) {
        if id == NodeId::ROOT || id.0 >= self.nodes.len() || self.nodes[id.0].parent.is_some() {
            trace!(node:% = id; "Node already placed");
            return;
        }
        self.insert(NodeId::ROOT, id);
    }

    /// Finishes construction.
    pub fn finish(self) -> ElementTree {
        debug!(
            nodes = self.nodes.len() - 1,
            rejected = self.rejections.len();
            "Tree built"
        );
        ElementTree {
            nodes: self.nodes,
            rejections: self.rejections,
        }
    }

    /// Inserts the detached `candidate` somewhere below `node`.
    fn insert(&mut self, node: NodeId, candidate: NodeId) {
        if self.nodes[node.0].children.contains(&candidate) {
            return;
        }

        let candidate_box = self.bbox(candidate);

        // Existing children that fit better inside the candidate move under it.
        let adopted: Vec<NodeId> = self
            .stable_children(node)
            .into_iter()
            .filter(|&child| candidate_box.contains(self.bbox(child)))
            .collect();
        for child in adopted {
            trace!(child:% = child, new_parent:% = candidate; "Reparenting");
            self.detach(node, child);
            self.insert(candidate, child);
        }

        // Delegate to the first remaining child that contains the candidate.
        let host = self
            .stable_children(node)
            .into_iter()
            .find(|&child| self.bbox(child).contains(candidate_box));
        if let Some(host) = host {
            self.insert(host, candidate);
            return;
        }

        self.attach(node, candidate);
    }

    /// Children of `node` ordered by ascending area, then insertion index.
    fn stable_children(&self, node: NodeId) -> Vec<NodeId> {
        let mut children = self.nodes[node.0].children.clone();
        children.sort_by_key(|&child| (self.bbox(child).area(), child));
        children
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|&id| id != child);
        self.nodes[child.0].parent = None;
    }

    fn bbox(&self, id: NodeId) -> BBox {
        self.nodes[id.0].kind.bbox()
    }
}

/// A finished containment tree.
///
/// Every accepted element appears exactly once; the root has no parent and
/// every other node has exactly one.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Node>,
    rejections: Vec<Rejection>,
}

impl ElementTree {
    /// Builds a tree from a batch, skipping elements with invalid boxes.
    ///
    /// Skipped elements are listed in [`ElementTree::rejections`].
    pub fn build(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut builder = TreeBuilder::new();
        for element in elements {
            // Rejections are recorded on the builder.
            let _ = builder.push(element);
        }
        builder.finish()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of element nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns true if no element was accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all element node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..self.nodes.len()).map(NodeId)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns the element at `id`, or `None` for the root.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.kind(id).element()
    }

    pub fn bbox(&self, id: NodeId) -> BBox {
        self.kind(id).bbox()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Direct children of `id` in the order they were attached.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// All nodes below `id`, depth first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Elements that were left out because of invalid geometry.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Indented text dump of the tree, one node per line.
    ///
    /// Siblings are listed by class label, then insertion index. Useful for
    /// debugging a reconstruction without rendering it.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for &child in &self.sorted_by_label(self.root()) {
            // Writing into a String cannot fail.
            let _ = self.write_outline(&mut out, child, 0);
        }
        out
    }

    fn write_outline(&self, out: &mut String, id: NodeId, indent: usize) -> fmt::Result {
        if let Some(element) = self.element(id) {
            write!(out, "{:indent$}{} {}", "", element.class(), element.bbox())?;
            if let Some(class_id) = element.class_id() {
                write!(out, " id={class_id}")?;
            }
            writeln!(out)?;
        }
        for child in self.sorted_by_label(id) {
            self.write_outline(out, child, indent + 2)?;
        }
        Ok(())
    }

    fn sorted_by_label(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by(|a, b| {
            let label = |id: &NodeId| self.element(*id).map(|e| e.class().as_str().to_string());
            label(a).cmp(&label(b)).then(a.cmp(b))
        });
        children
    }
}
