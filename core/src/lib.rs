// treemenu-core: hierarchical, collapsible navigation-menu engine.
// Node model, tree mutations, derived state, and the load/cache lifecycle;
// rendering, dialogs, and persistence arrive through collaborator traits.

pub mod config;
pub mod editor;
pub mod errors;
pub mod fetch;
pub mod node;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod traits;
pub mod tree;

// Re-export commonly used types
pub use errors::{MenuError, MenuResult, Prompted};

pub use node::{FolderData, LinkData, MenuNode, MenuNodeData, NodeId, NodePayload};

pub use tree::MenuTree;

pub use provider::{
    cache_key, fallback_tree, MenuItemRow, RowKind, ScrollOffsets, SessionRecord,
    TreeMenuProvider, CACHE_KEY_PREFIX,
};

pub use editor::{slugify, suggest_link, DropOutcome, DropZone, MenuEditor};

pub use traits::{
    AddItemContext, EditItemContext, FolderChoice, ItemEdit, MenuFetcher, MenuPrompter,
    NewMenuItem, NullRenderer, RenderCoordinator, SessionStore,
};

pub use fetch::{FileMenuFetcher, HttpMenuFetcher};

pub use store::{FileSessionStore, MemorySessionStore};

pub use prompt::{PromptResolver, PromptSlot, PromptTicket};

pub use config::{normalize_url_root, TreeMenuConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
