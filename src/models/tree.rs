//! Arena-backed classification tree
//!
//! Nodes live in a flat vector addressed by `NodeId`. Children are owned
//! through their indices; the parent link is a plain back-index used for
//! upward walks, so no reference cycles exist.

use crate::models::node::{ClassificationNode, NodeId};

#[derive(Clone, Debug)]
pub struct ClassificationTree {
    nodes: Vec<ClassificationNode>,
}

impl ClassificationTree {
    /// Start a tree from its root node. The root always gets `NodeId` 0.
    pub fn new(mut root: ClassificationNode) -> Self {
        root.parent = None;
        root.children.clear();
        root.child_codes.clear();
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn code(&self) -> &str {
        &self.nodes[0].code
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &ClassificationNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ClassificationNode {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ClassificationNode> {
        self.nodes.get(id.0)
    }

    /// Attach `node` as the last child of `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeId, mut node: ClassificationNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        let code = node.code.clone();
        self.nodes.push(node);

        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.child_codes.push(code);
        id
    }

    /// Direct child of `parent` carrying `code`, looked up through `child_codes`.
    pub fn find_child(&self, parent: NodeId, code: &str) -> Option<NodeId> {
        let parent_node = self.node(parent);
        parent_node
            .child_codes
            .iter()
            .position(|c| c == code)
            .map(|idx| parent_node.children[idx])
    }

    /// `id` and each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// All nodes below `id` in pre-order (source row order), excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().rev().copied());
        }
        out
    }

    /// Whole tree in pre-order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ClassificationNode)> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .map(move |id| (id, self.node(id)))
    }

    /// Apply `update` to `start` and every ancestor up to the root.
    pub fn aggregate_upward<F>(&mut self, start: NodeId, mut update: F)
    where
        F: FnMut(&mut ClassificationNode),
    {
        let mut current = Some(start);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            update(node);
            current = node.parent;
        }
    }
}

pub struct Ancestors<'a> {
    tree: &'a ClassificationTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
