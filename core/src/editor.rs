/// Mutation engine: structural edits over a live menu tree.
///
/// Every operation validates its preconditions, mutates the tree in place,
/// then requests exactly one rebuild of the smallest affected subtree (two
/// for a cross-parent drop). Prompt-driven operations treat cancellation as
/// a first-class outcome and perform no mutation.
use std::sync::Arc;

use tracing::debug;

use crate::errors::{MenuResult, Prompted};
use crate::node::{NodeId, NodePayload};
use crate::traits::{
    AddItemContext, EditItemContext, FolderChoice, MenuPrompter, NewMenuItem, RenderCoordinator,
};
use crate::tree::MenuTree;

/// Where a dragged row lands relative to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// Insert as the sibling before the target.
    Above,
    /// Append as the target folder's last child.
    Inside,
    /// Insert as the sibling after the target.
    Below,
}

impl DropZone {
    /// Classify the drop zone from the pointer's vertical offset within the
    /// target row. Folder rows split into thirds (above/inside/below); link
    /// rows have no "inside" and split in half.
    pub fn classify(offset_y: f64, row_height: f64, target_is_folder: bool) -> DropZone {
        if row_height <= 0.0 {
            return if target_is_folder { DropZone::Inside } else { DropZone::Below };
        }
        let fraction = (offset_y / row_height).clamp(0.0, 1.0);
        if target_is_folder {
            if fraction < 1.0 / 3.0 {
                DropZone::Above
            } else if fraction < 2.0 / 3.0 {
                DropZone::Inside
            } else {
                DropZone::Below
            }
        } else if fraction < 0.5 {
            DropZone::Above
        } else {
            DropZone::Below
        }
    }
}

/// Result of a drag-and-drop reposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    /// The drop was illegal (cycle, stale reference, bad target); the tree
    /// is unchanged.
    Rejected,
}

pub struct MenuEditor {
    prompter: Arc<dyn MenuPrompter>,
    renderer: Arc<dyn RenderCoordinator>,
    url_root: String,
}

impl MenuEditor {
    pub fn new(
        prompter: Arc<dyn MenuPrompter>,
        renderer: Arc<dyn RenderCoordinator>,
        url_root: impl Into<String>,
    ) -> Self {
        MenuEditor {
            prompter,
            renderer,
            url_root: url_root.into(),
        }
    }

    // ========================================================================
    // Prompt-driven operations
    // ========================================================================

    /// Run the add-item flow against a folder. Returns the new node's id, or
    /// `None` when the user cancelled or the parent is not a valid folder.
    pub async fn add_item(&self, tree: &mut MenuTree, parent: NodeId) -> MenuResult<Option<NodeId>> {
        let Some(parent_node) = tree.get(parent) else {
            return Ok(None);
        };
        if !parent_node.is_folder() {
            return Ok(None);
        }
        let context = AddItemContext {
            parent_name: parent_node.name.clone(),
            link_base: self.link_base(tree, parent),
        };
        match self.prompter.add_item(context).await? {
            Prompted::Cancelled => Ok(None),
            Prompted::Value(item) => {
                let id = match item {
                    NewMenuItem::Folder { name } => tree.alloc_folder(name),
                    NewMenuItem::Link { name, link, target } => tree.alloc_link(name, link, target),
                };
                tree.attach(parent, id, None)?;
                self.renderer.rebuild_subtree(tree, parent);
                Ok(Some(id))
            }
        }
    }

    /// Run the edit flow: overwrite the node's name (and link, for links).
    /// The rebuild targets the parent, since the node's own row re-renders;
    /// editing the root rebuilds nothing.
    pub async fn edit_item(&self, tree: &mut MenuTree, id: NodeId) -> MenuResult<bool> {
        let Some(node) = tree.get(id) else {
            return Ok(false);
        };
        let context = EditItemContext {
            name: node.name.clone(),
            link: node.link().map(str::to_string),
        };
        match self.prompter.edit_item(context).await? {
            Prompted::Cancelled => Ok(false),
            Prompted::Value(edit) => {
                if let Some(node) = tree.get_mut(id) {
                    node.name = edit.name;
                    if let (NodePayload::Link { link, .. }, Some(new_link)) =
                        (&mut node.payload, edit.link)
                    {
                        *link = new_link;
                    }
                }
                if let Some(parent) = tree.parent_of(id) {
                    self.renderer.rebuild_subtree(tree, parent);
                }
                Ok(true)
            }
        }
    }

    /// Run the delete flow. A node that is already gone from its parent
    /// (stale reference) is a silent no-op with no rebuild.
    pub async fn delete_item(&self, tree: &mut MenuTree, id: NodeId) -> MenuResult<bool> {
        let Some(node) = tree.get(id) else {
            return Ok(false);
        };
        if node.parent.is_none() {
            // The root is not deletable; don't even prompt.
            return Ok(false);
        }
        let name = node.name.clone();
        match self.prompter.confirm_delete(&name).await? {
            Prompted::Cancelled => Ok(false),
            Prompted::Value(()) => {
                let parent = tree.parent_of(id);
                if !tree.remove_subtree(id) {
                    return Ok(false);
                }
                if let Some(parent) = parent {
                    self.renderer.rebuild_subtree(tree, parent);
                }
                Ok(true)
            }
        }
    }

    /// Nest a node under one of its sibling folders, chosen by the user.
    pub async fn move_to_child(&self, tree: &mut MenuTree, id: NodeId) -> MenuResult<bool> {
        let Some(node) = tree.get(id) else {
            return Ok(false);
        };
        let name = node.name.clone();
        let Some(parent) = tree.parent_of(id) else {
            return Ok(false);
        };
        let choices: Vec<FolderChoice> = tree
            .children(parent)
            .iter()
            .copied()
            .filter(|sibling| *sibling != id)
            .filter(|sibling| tree.get(*sibling).map(|n| n.is_folder()).unwrap_or(false))
            .map(|sibling| FolderChoice {
                id: sibling,
                name: tree.get(sibling).map(|n| n.name.clone()).unwrap_or_default(),
            })
            .collect();
        if choices.is_empty() {
            return Ok(false);
        }
        let offered: Vec<NodeId> = choices.iter().map(|c| c.id).collect();
        let prompt = format!("Nest {name} under...");
        match self.prompter.choose_folder(&prompt, choices).await? {
            Prompted::Cancelled => Ok(false),
            Prompted::Value(target) => {
                if !offered.contains(&target) {
                    debug!("chooser returned a folder that was not offered, ignoring");
                    return Ok(false);
                }
                if tree.detach(id).is_none() {
                    return Ok(false);
                }
                if tree.attach(target, id, None).is_err() {
                    return Ok(false);
                }
                self.renderer.rebuild_subtree(tree, parent);
                Ok(true)
            }
        }
    }

    // ========================================================================
    // Synchronous structural operations
    // ========================================================================

    /// Swap a node with the sibling before it; no-op on the first child.
    pub fn move_up(&self, tree: &mut MenuTree, id: NodeId) -> bool {
        let Some(parent) = tree.parent_of(id) else {
            return false;
        };
        let Some(position) = tree.position_in_parent(id) else {
            return false;
        };
        if position == 0 {
            return false;
        }
        if let Some(children) = tree.get_mut(parent).and_then(|n| n.children_mut()) {
            children.swap(position - 1, position);
        }
        self.renderer.rebuild_subtree(tree, parent);
        true
    }

    /// Swap a node with the sibling after it; no-op on the last child.
    pub fn move_down(&self, tree: &mut MenuTree, id: NodeId) -> bool {
        let Some(parent) = tree.parent_of(id) else {
            return false;
        };
        let Some(position) = tree.position_in_parent(id) else {
            return false;
        };
        if position + 1 >= tree.children(parent).len() {
            return false;
        }
        if let Some(children) = tree.get_mut(parent).and_then(|n| n.children_mut()) {
            children.swap(position, position + 1);
        }
        self.renderer.rebuild_subtree(tree, parent);
        true
    }

    /// Promote a node: append it to its grandparent's children. No-op when
    /// the node's parent is the root.
    pub fn move_to_parent(&self, tree: &mut MenuTree, id: NodeId) -> bool {
        let Some(parent) = tree.parent_of(id) else {
            return false;
        };
        let Some(grandparent) = tree.parent_of(parent) else {
            return false;
        };
        if tree.detach(id).is_none() {
            return false;
        }
        if tree.attach(grandparent, id, None).is_err() {
            return false;
        }
        self.renderer.rebuild_subtree(tree, grandparent);
        true
    }

    /// Drag-and-drop reposition. The mandatory safety check walks up from
    /// the destination parent: finding the dragged node among its ancestors
    /// (or being it) would create a cycle, so the drop is rejected whole.
    pub fn drop_item(
        &self,
        tree: &mut MenuTree,
        dragged: NodeId,
        target: NodeId,
        zone: DropZone,
    ) -> DropOutcome {
        if dragged == target || !tree.contains(dragged) {
            return DropOutcome::Rejected;
        }
        let Some(target_node) = tree.get(target) else {
            return DropOutcome::Rejected;
        };
        let Some(source_parent) = tree.parent_of(dragged) else {
            // The root row is not draggable.
            return DropOutcome::Rejected;
        };

        let (dest_parent, positional) = match zone {
            DropZone::Inside => {
                if !target_node.is_folder() {
                    return DropOutcome::Rejected;
                }
                (target, false)
            }
            DropZone::Above | DropZone::Below => match tree.parent_of(target) {
                Some(parent) => (parent, true),
                // Nothing sits beside the root.
                None => return DropOutcome::Rejected,
            },
        };

        if tree.is_self_or_ancestor(dragged, dest_parent) {
            debug!("drop rejected: destination is inside the dragged subtree");
            return DropOutcome::Rejected;
        }

        if tree.detach(dragged).is_none() {
            return DropOutcome::Rejected;
        }

        // Index is computed against the post-detach sibling list, so a move
        // within the same parent accounts for the shrunk array.
        let index = if positional {
            let target_position = tree.children(dest_parent).iter().position(|c| *c == target);
            match (target_position, zone) {
                (Some(i), DropZone::Below) => Some(i + 1),
                (Some(i), _) => Some(i),
                (None, _) => None,
            }
        } else {
            None
        };

        if tree.attach(dest_parent, dragged, index).is_err() {
            return DropOutcome::Rejected;
        }

        self.renderer.rebuild_subtree(tree, source_parent);
        if dest_parent != source_parent {
            self.renderer.rebuild_subtree(tree, dest_parent);
        }
        DropOutcome::Moved
    }

    // ========================================================================
    // Link auto-suggestion
    // ========================================================================

    /// Path prefix for a new link under `parent`: the url root followed by
    /// the slugified names of the folders from the root down to `parent`.
    pub fn link_base(&self, tree: &MenuTree, parent: NodeId) -> String {
        let mut base = self
            .url_root
            .trim_end_matches(['/', '\\'])
            .to_string();
        if parent == tree.root() {
            return base;
        }
        let mut chain = tree.ancestors(parent);
        chain.reverse();
        for id in chain.into_iter().skip(1) {
            if let Some(node) = tree.get(id) {
                base.push('/');
                base.push_str(&slugify(&node.name));
            }
        }
        if let Some(node) = tree.get(parent) {
            base.push('/');
            base.push_str(&slugify(&node.name));
        }
        base
    }
}

/// Auto-typed link for a new item: the base path plus the slugified name.
/// The user can override the result in the dialog.
pub fn suggest_link(link_base: &str, name: &str) -> String {
    format!("{}/{}", link_base.trim_end_matches('/'), slugify(name))
}

/// Lowercased URL path segment: whitespace becomes `-`, punctuation drops.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            out.push('-');
        } else if ch.is_alphanumeric() || ch == '-' {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
