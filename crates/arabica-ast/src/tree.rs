//! Arena storage and navigation for the decompiled tree.

use crate::kind::NodeKind;
use crate::role::Role;

/// Index of a node in its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether an identifier names a declaration site or a use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Definition,
    Reference,
}

/// Opaque symbol annotation attached to an identifier node.
///
/// The handle is meaningful only to the consumer of the output sink's
/// `write_definition`/`write_reference` calls; the printer never interprets
/// it beyond forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefAnnotation {
    pub handle: u64,
    pub kind: RefKind,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    role: Role,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    index_in_parent: u32,
    origin_offset: Option<u32>,
    annotation: Option<RefAnnotation>,
}

/// Append-only arena holding one decompiled compilation unit.
///
/// Built once by the front end, then immutable during printing. Children of
/// a given role keep the relative order they were added in; sibling
/// navigation is O(1) via the stored index-in-parent.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root node. Must be called exactly once, before any children.
    pub fn add_root(&mut self, kind: NodeKind) -> NodeId {
        assert!(self.nodes.is_empty(), "tree already has a root");
        self.nodes.push(Node {
            kind,
            role: Role::Root,
            parent: None,
            children: Vec::new(),
            index_in_parent: 0,
            origin_offset: None,
            annotation: None,
        });
        NodeId(0)
    }

    /// Append a child in the given role. The child's relative order among
    /// all of the parent's children is its insertion order.
    pub fn add_child(&mut self, parent: NodeId, role: Role, kind: NodeKind) -> NodeId {
        assert!(role != Role::Root, "only the root carries the root role");
        let id = NodeId(self.nodes.len() as u32);
        let index_in_parent = self.nodes[parent.index()].children.len() as u32;
        self.nodes.push(Node {
            kind,
            role,
            parent: Some(parent),
            children: Vec::new(),
            index_in_parent,
            origin_offset: None,
            annotation: None,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// The root node. Panics on an empty tree.
    pub fn root(&self) -> NodeId {
        assert!(!self.nodes.is_empty(), "empty tree has no root");
        NodeId(0)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn role(&self, id: NodeId) -> Role {
        self.nodes[id.index()].role
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].children.first().copied()
    }

    /// The next sibling in the parent's full child list, across roles.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.index()];
        let parent = &self.nodes[node.parent?.index()];
        parent
            .children
            .get(node.index_in_parent as usize + 1)
            .copied()
    }

    /// The next following sibling carrying the given role.
    pub fn next_sibling_by_role(&self, id: NodeId, role: Role) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            if self.role(sibling) == role {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }

    /// All children of `parent` carrying the given role, in order.
    pub fn children_by_role<'a>(
        &'a self,
        parent: NodeId,
        role: Role,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(parent)
            .iter()
            .copied()
            .filter(move |&child| self.role(child) == role)
    }

    /// The first child of `parent` carrying the given role.
    pub fn child_by_role(&self, parent: NodeId, role: Role) -> Option<NodeId> {
        self.children_by_role(parent, role).next()
    }

    pub fn set_origin_offset(&mut self, id: NodeId, offset: u32) {
        self.nodes[id.index()].origin_offset = Some(offset);
    }

    pub fn origin_offset(&self, id: NodeId) -> Option<u32> {
        self.nodes[id.index()].origin_offset
    }

    pub fn set_annotation(&mut self, id: NodeId, annotation: RefAnnotation) {
        self.nodes[id.index()].annotation = Some(annotation);
    }

    pub fn annotation(&self, id: NodeId) -> Option<RefAnnotation> {
        self.nodes[id.index()].annotation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
