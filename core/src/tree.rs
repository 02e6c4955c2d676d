/// The canonical in-memory menu tree.
///
/// Nodes live in an id-keyed arena; folders hold forward `children` edges and
/// every non-root node holds a `parent` back-reference. The two edge sets are
/// kept exact inverses of each other by every public mutation. Only forward
/// edges are serialized; back-references are rebuilt in the load walk.
use std::collections::{HashMap, HashSet};

use crate::errors::{MenuError, MenuResult};
use crate::node::{FolderData, LinkData, MenuNode, MenuNodeData, NodeId, NodePayload};

#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: HashMap<NodeId, MenuNode>,
    root: NodeId,
}

impl MenuTree {
    /// Create a tree holding a single empty, expanded root folder.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut root = MenuNode::folder(root_name);
        root.set_expanded(true);
        let root_id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);
        MenuTree { nodes, root: root_id }
    }

    /// Build a tree from its wire form, assigning fresh ids and parent
    /// back-references in a single walk.
    ///
    /// The root of a menu document is always treated as a folder; a bare
    /// link document is wrapped under a synthetic "Root" folder.
    pub fn from_data(data: MenuNodeData) -> Self {
        match data {
            MenuNodeData::Folder(folder) => {
                let mut root = MenuNode::folder(folder.name);
                root.set_expanded(true);
                let root_id = root.id;
                let mut nodes = HashMap::new();
                nodes.insert(root_id, root);
                let mut tree = MenuTree { nodes, root: root_id };
                for child in folder.children {
                    let child_id = tree.insert_data(child, root_id);
                    if let Some(children) = tree.nodes.get_mut(&root_id).and_then(MenuNode::children_mut) {
                        children.push(child_id);
                    }
                }
                tree
            }
            MenuNodeData::Link(_) => {
                let mut tree = MenuTree::new("Root");
                let root_id = tree.root;
                let child_id = tree.insert_data(data, root_id);
                if let Some(children) = tree.nodes.get_mut(&root_id).and_then(MenuNode::children_mut) {
                    children.push(child_id);
                }
                tree
            }
        }
    }

    fn insert_data(&mut self, data: MenuNodeData, parent: NodeId) -> NodeId {
        match data {
            MenuNodeData::Folder(folder) => {
                let mut node = MenuNode::folder(folder.name);
                node.set_expanded(folder.expanded);
                node.parent = Some(parent);
                let id = node.id;
                self.nodes.insert(id, node);
                for child in folder.children {
                    let child_id = self.insert_data(child, id);
                    if let Some(children) = self.nodes.get_mut(&id).and_then(MenuNode::children_mut) {
                        children.push(child_id);
                    }
                }
                id
            }
            MenuNodeData::Link(link) => {
                let mut node = MenuNode::link_node(link.name, link.link, link.target);
                node.parent = Some(parent);
                let id = node.id;
                self.nodes.insert(id, node);
                id
            }
        }
    }

    /// Serialize to the wire form: forward edges only, no `parent`, no
    /// `current_page`.
    pub fn to_data(&self) -> MenuNodeData {
        self.node_to_data(self.root)
    }

    fn node_to_data(&self, id: NodeId) -> MenuNodeData {
        let Some(node) = self.nodes.get(&id) else {
            // Unreachable under the tree invariants; keep serialization total.
            return MenuNodeData::folder("", vec![]);
        };
        match &node.payload {
            NodePayload::Folder { children, expanded, .. } => MenuNodeData::Folder(FolderData {
                name: node.name.clone(),
                children: children.iter().map(|c| self.node_to_data(*c)).collect(),
                expanded: *expanded,
            }),
            NodePayload::Link { link, target, .. } => MenuNodeData::Link(LinkData {
                name: node.name.clone(),
                link: link.clone(),
                target: target.clone(),
            }),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the arena (root included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of a node; empty for links and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .and_then(|n| n.children())
            .unwrap_or(&[])
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Strict ancestors of a node, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(ancestor) = current {
            out.push(ancestor);
            current = self.parent_of(ancestor);
        }
        out
    }

    /// True when `maybe_ancestor` is `node` itself or one of its ancestors.
    /// This is the drag-and-drop cycle-safety primitive.
    pub fn is_self_or_ancestor(&self, maybe_ancestor: NodeId, node: NodeId) -> bool {
        if maybe_ancestor == node {
            return true;
        }
        let mut current = self.parent_of(node);
        while let Some(ancestor) = current {
            if ancestor == maybe_ancestor {
                return true;
            }
            current = self.parent_of(ancestor);
        }
        false
    }

    /// Position of a node within its parent's child list.
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    // ========================================================================
    // Structural mutation
    // ========================================================================

    /// Allocate a detached folder node.
    pub fn alloc_folder(&mut self, name: impl Into<String>) -> NodeId {
        let node = MenuNode::folder(name);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Allocate a detached link node.
    pub fn alloc_link(
        &mut self,
        name: impl Into<String>,
        link: impl Into<String>,
        target: Option<String>,
    ) -> NodeId {
        let node = MenuNode::link_node(name, link, target);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Insert a detached node into a folder's child list at `index`
    /// (appending when `None` or past the end), and set its back-reference.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> MenuResult<()> {
        if !self.nodes.contains_key(&child) {
            return Err(MenuError::NodeNotFound);
        }
        let parent_node = self.nodes.get_mut(&parent).ok_or(MenuError::NodeNotFound)?;
        let name = parent_node.name.clone();
        let children = parent_node
            .children_mut()
            .ok_or(MenuError::NotAFolder(name))?;
        match index {
            Some(i) if i < children.len() => children.insert(i, child),
            _ => children.push(child),
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove a node from its parent's child list, returning the position it
    /// occupied. `None` means no mutation happened: the node is unknown, is
    /// the root, or was already gone from its parent (stale reference).
    pub fn detach(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        let children = self.nodes.get_mut(&parent).and_then(MenuNode::children_mut)?;
        let position = children.iter().position(|c| *c == id)?;
        children.remove(position);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
        Some(position)
    }

    /// Detach a node and drop it and all of its descendants from the arena.
    /// Stale references are a silent no-op, per the delete contract.
    pub fn remove_subtree(&mut self, id: NodeId) -> bool {
        if id == self.root || self.detach(id).is_none() {
            return false;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                if let Some(children) = node.children() {
                    stack.extend_from_slice(children);
                }
            }
        }
        true
    }

    // ========================================================================
    // Walks and lookups
    // ========================================================================

    /// Depth-first preorder walk from the root; the visitor receives each
    /// node id with its depth (root at 0).
    pub fn walk(&self, mut visitor: impl FnMut(NodeId, usize)) {
        self.walk_from(self.root, 0, &mut visitor);
    }

    fn walk_from(&self, id: NodeId, depth: usize, visitor: &mut impl FnMut(NodeId, usize)) {
        visitor(id, depth);
        for child in self.children(id) {
            self.walk_from(*child, depth + 1, visitor);
        }
    }

    /// Resolve a `/`-separated name path (root excluded) to a node id, e.g.
    /// `["Docs", "Intro"]`.
    pub fn find_by_name_path(&self, segments: &[&str]) -> Option<NodeId> {
        let mut current = self.root;
        for segment in segments {
            let next = self
                .children(current)
                .iter()
                .copied()
                .find(|id| self.nodes.get(id).map(|n| n.name == *segment).unwrap_or(false))?;
            current = next;
        }
        Some(current)
    }

    /// Invariant check: the root has no parent, every child's back-reference
    /// names its actual container, and every arena entry is reachable from
    /// the root exactly once. A node encountered twice (duplicate containment
    /// or a cycle) fails the check immediately rather than looping.
    pub fn verify_parents(&self) -> bool {
        match self.nodes.get(&self.root) {
            Some(root) if root.parent.is_none() => {}
            _ => return false,
        }
        let mut visited = HashSet::new();
        let mut ok = true;
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return false;
            }
            for child in self.children(current) {
                match self.nodes.get(child) {
                    Some(node) if node.parent == Some(current) => stack.push(*child),
                    _ => ok = false,
                }
            }
        }
        ok && visited.len() == self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuTree {
        MenuTree::from_data(MenuNodeData::folder(
            "Root",
            vec![
                MenuNodeData::folder("Docs", vec![MenuNodeData::link("Intro", "/intro")]),
                MenuNodeData::link("About", "/about"),
            ],
        ))
    }

    #[test]
    fn load_walk_sets_parents() {
        let tree = sample();
        assert!(tree.verify_parents());
        assert_eq!(tree.node_count(), 4);

        let docs = tree.find_by_name_path(&["Docs"]).unwrap();
        let intro = tree.find_by_name_path(&["Docs", "Intro"]).unwrap();
        assert_eq!(tree.parent_of(intro), Some(docs));
        assert_eq!(tree.parent_of(tree.root()), None);
    }

    #[test]
    fn detach_returns_position_and_clears_parent() {
        let mut tree = sample();
        let about = tree.find_by_name_path(&["About"]).unwrap();
        assert_eq!(tree.detach(about), Some(1));
        assert_eq!(tree.parent_of(about), None);
        // Second detach is a stale reference.
        assert_eq!(tree.detach(about), None);
    }

    #[test]
    fn remove_subtree_drops_descendants_from_arena() {
        let mut tree = sample();
        let docs = tree.find_by_name_path(&["Docs"]).unwrap();
        let intro = tree.find_by_name_path(&["Docs", "Intro"]).unwrap();
        assert!(tree.remove_subtree(docs));
        assert!(!tree.contains(docs));
        assert!(!tree.contains(intro));
        assert!(tree.verify_parents());
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut tree = sample();
        assert!(!tree.remove_subtree(tree.root()));
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn link_document_is_wrapped_under_a_root_folder() {
        let tree = MenuTree::from_data(MenuNodeData::link("Main Page", "/"));
        let root = tree.get(tree.root()).unwrap();
        assert!(root.is_folder());
        assert_eq!(tree.children(tree.root()).len(), 1);
    }

    #[test]
    fn allocated_link_exposes_its_url() {
        let mut tree = sample();
        let docs = tree.find_by_name_path(&["Docs"]).unwrap();
        let id = tree.alloc_link("Changelog", "/changelog", Some("_blank".into()));
        tree.attach(docs, id, None).unwrap();

        let node = tree.get(id).unwrap();
        assert!(!node.is_folder());
        assert_eq!(node.link(), Some("/changelog"));
        assert_eq!(node.target(), Some("_blank"));
    }

    #[test]
    fn verify_parents_rejects_duplicate_containment() {
        let mut tree = sample();
        let root = tree.root();
        let docs = tree.find_by_name_path(&["Docs"]).unwrap();
        // Corrupt the root's child list so Docs is claimed twice.
        if let Some(children) = tree.nodes.get_mut(&root).and_then(MenuNode::children_mut) {
            children.push(docs);
        }
        assert!(!tree.verify_parents());
    }

    #[test]
    fn self_or_ancestor_check() {
        let tree = sample();
        let docs = tree.find_by_name_path(&["Docs"]).unwrap();
        let intro = tree.find_by_name_path(&["Docs", "Intro"]).unwrap();
        assert!(tree.is_self_or_ancestor(docs, intro));
        assert!(tree.is_self_or_ancestor(tree.root(), intro));
        assert!(tree.is_self_or_ancestor(intro, intro));
        assert!(!tree.is_self_or_ancestor(intro, docs));
    }
}
