/// Collaborator seams for the tree-menu engine.
///
/// The engine owns the tree and its mutations; everything user-facing
/// (network, persistence, rendering, dialogs) arrives through these traits.
use async_trait::async_trait;

use crate::errors::{MenuResult, Prompted};
use crate::node::{MenuNodeData, NodeId};
use crate::tree::MenuTree;

/// Retrieves a menu document from its source URL.
#[async_trait]
pub trait MenuFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> MenuResult<MenuNodeData>;
}

/// Session-scoped key-value persistence (the browser-sessionStorage analog).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> MenuResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> MenuResult<()>;
}

/// The render-side half of the rebuild protocol.
///
/// Implementations must be idempotent: a rebuild request always reflects the
/// current tree state and leaves unaffected sibling subtrees (and their
/// expansion state) alone.
pub trait RenderCoordinator: Send + Sync {
    fn rebuild_subtree(&self, tree: &MenuTree, root: NodeId);
}

/// No-op renderer for hosts without a live view (tests, batch CLI edits).
pub struct NullRenderer;

impl RenderCoordinator for NullRenderer {
    fn rebuild_subtree(&self, _tree: &MenuTree, _root: NodeId) {}
}

// ============================================================================
// Prompt collaborator
// ============================================================================

/// What the add-item dialog needs to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemContext {
    /// Name of the folder the new item will be appended to.
    pub parent_name: String,
    /// Path prefix for auto-typing a link URL from the typed name
    /// (url root + slugified ancestor names).
    pub link_base: String,
}

/// A finished node description coming back from the add-item dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewMenuItem {
    Folder {
        name: String,
    },
    Link {
        name: String,
        link: String,
        target: Option<String>,
    },
}

/// Current values shown in the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditItemContext {
    pub name: String,
    /// `None` for folders; the edit dialog hides the link field.
    pub link: Option<String>,
}

/// Updated values coming back from the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEdit {
    pub name: String,
    /// Ignored for folders.
    pub link: Option<String>,
}

/// One pickable folder in the move-to-child chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChoice {
    pub id: NodeId,
    pub name: String,
}

/// The dialog collaborator. Every method suspends until the user resolves or
/// dismisses the prompt; dismissal is the `Prompted::Cancelled` variant, not
/// an error.
#[async_trait]
pub trait MenuPrompter: Send + Sync {
    async fn add_item(&self, context: AddItemContext) -> MenuResult<Prompted<NewMenuItem>>;

    async fn edit_item(&self, context: EditItemContext) -> MenuResult<Prompted<ItemEdit>>;

    async fn confirm_delete(&self, name: &str) -> MenuResult<Prompted<()>>;

    async fn choose_folder(
        &self,
        prompt: &str,
        choices: Vec<FolderChoice>,
    ) -> MenuResult<Prompted<NodeId>>;
}
