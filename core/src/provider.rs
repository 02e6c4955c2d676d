/// Tree provider: owns the canonical menu tree and its load/cache lifecycle.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::MenuResult;
use crate::node::{MenuNodeData, NodeId};
use crate::traits::{MenuFetcher, SessionStore};
use crate::tree::MenuTree;

/// Key prefix for session records, derived deterministically from the menu
/// source URL.
pub const CACHE_KEY_PREFIX: &str = "treemenu-cache-";

pub fn cache_key(source_url: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{source_url}")
}

/// The persisted form of one menu session: tree structure (forward edges
/// only), the cache-invalidation token, and the host scroll position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub version: String,
    pub data: MenuNodeData,
    #[serde(rename = "scrollLeft", default)]
    pub scroll_left: f64,
    #[serde(rename = "scrollTop", default)]
    pub scroll_top: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffsets {
    pub left: f64,
    pub top: f64,
}

/// Row classification consumed by the render coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Root,
    Folder,
    Link,
}

/// Everything the renderer needs to bind one menu row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemRow {
    pub name: String,
    /// Resolved against the url root; `None` for folders.
    pub link: Option<String>,
    pub target: String,
    pub kind: RowKind,
    pub expanded: bool,
    pub current_page: bool,
}

pub struct TreeMenuProvider {
    fetcher: Arc<dyn MenuFetcher>,
    store: Arc<dyn SessionStore>,
    /// Path of the page the menu is embedded in, for highlight computation.
    page_path: String,
    tree: MenuTree,
    storage_key: String,
    version: String,
    url_root: String,
    scroll: ScrollOffsets,
}

impl TreeMenuProvider {
    pub fn new(
        fetcher: Arc<dyn MenuFetcher>,
        store: Arc<dyn SessionStore>,
        page_path: impl Into<String>,
    ) -> Self {
        TreeMenuProvider {
            fetcher,
            store,
            page_path: page_path.into(),
            tree: MenuTree::new("Root"),
            storage_key: String::new(),
            version: String::new(),
            url_root: String::new(),
            scroll: ScrollOffsets::default(),
        }
    }

    /// Load the menu: session cache first, network on miss or stale version,
    /// fallback tree on fetch failure. The loaded tree fully replaces the
    /// previous one, and the derived-state pass runs regardless of source.
    ///
    /// Menu absence must never block page rendering, so fetch and parse
    /// failures are recovered here instead of propagating.
    pub async fn load_menu(&mut self, url: &str, version: &str, url_root: &str) -> MenuResult<()> {
        self.storage_key = cache_key(url);
        self.version = version.to_string();
        self.url_root = url_root.to_string();

        match self.read_cached_record() {
            Some(record) => {
                debug!(key = %self.storage_key, "restoring menu from session cache");
                self.tree = MenuTree::from_data(record.data);
                self.scroll = ScrollOffsets {
                    left: record.scroll_left,
                    top: record.scroll_top,
                };
            }
            None => {
                self.tree = match self.fetcher.fetch(url).await {
                    Ok(data) => MenuTree::from_data(data),
                    Err(err) => {
                        warn!(%url, %err, "menu fetch failed, using fallback tree");
                        fallback_tree()
                    }
                };
                self.scroll = ScrollOffsets::default();
                info!(%url, nodes = self.tree.node_count(), "menu loaded");
            }
        }

        self.apply_page_state();
        Ok(())
    }

    /// A cached record is only usable when it exists, parses, and carries the
    /// requested version; everything else is a cache miss.
    fn read_cached_record(&self) -> Option<SessionRecord> {
        let raw = match self.store.get(&self.storage_key) {
            Ok(value) => value?,
            Err(err) => {
                warn!(key = %self.storage_key, %err, "session store read failed, treating as cache miss");
                return None;
            }
        };
        let record: SessionRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                debug!(key = %self.storage_key, %err, "corrupt session record, treating as cache miss");
                return None;
            }
        };
        if record.version != self.version {
            debug!(
                cached = %record.version,
                requested = %self.version,
                "session record version mismatch, reloading"
            );
            return None;
        }
        Some(record)
    }

    /// Serialize the tree plus scroll offsets into the session store.
    /// Fire-and-forget: called at page unload, so failures are only logged.
    pub fn cache_menu(&self, scroll_left: f64, scroll_top: f64) {
        let record = SessionRecord {
            version: self.version.clone(),
            data: self.tree.to_data(),
            scroll_left,
            scroll_top,
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "failed to serialize session record");
                return;
            }
        };
        if let Err(err) = self.store.put(&self.storage_key, &raw) {
            warn!(key = %self.storage_key, %err, "failed to persist session record");
        }
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Recompute `current_page` across the whole tree and force-open the
    /// ancestor chain of the active link. Always recomputed after a load,
    /// never persisted; user expansion toggles are left untouched.
    fn apply_page_state(&mut self) {
        let mut all = Vec::new();
        self.tree.walk(|id, _| all.push(id));

        for id in &all {
            if let Some(node) = self.tree.get_mut(*id) {
                node.set_current_page(false);
            }
        }

        let active: Vec<NodeId> = all
            .iter()
            .copied()
            .filter(|id| {
                self.tree
                    .get(*id)
                    .and_then(|n| n.link())
                    .map(|link| self.matches_page(link))
                    .unwrap_or(false)
            })
            .collect();

        for id in active {
            if let Some(node) = self.tree.get_mut(id) {
                node.set_current_page(true);
            }
            for ancestor in self.tree.ancestors(id) {
                if let Some(node) = self.tree.get_mut(ancestor) {
                    node.set_current_page(true);
                    node.set_expanded(true);
                }
            }
        }

        let root = self.tree.root();
        if let Some(node) = self.tree.get_mut(root) {
            node.set_expanded(true);
        }
    }

    fn matches_page(&self, link: &str) -> bool {
        link == self.page_path || self.resolve_link(link) == self.page_path
    }

    fn resolve_link(&self, link: &str) -> String {
        if link.contains("://") || self.url_root.is_empty() {
            return link.to_string();
        }
        if link.starts_with('/') {
            format!("{}{}", self.url_root, link)
        } else {
            format!("{}/{}", self.url_root, link)
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Scroll offsets restored from the session record (zero after a fetch).
    pub fn scroll(&self) -> ScrollOffsets {
        self.scroll
    }

    pub fn url_root(&self) -> &str {
        &self.url_root
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// A link's href with the url root applied to relative paths.
    pub fn resolved_link(&self, id: NodeId) -> Option<String> {
        let link = self.tree.get(id)?.link()?;
        Some(self.resolve_link(link))
    }

    /// The renderer's input shape for one node.
    pub fn row_model(&self, id: NodeId) -> Option<MenuItemRow> {
        let node = self.tree.get(id)?;
        let kind = if id == self.tree.root() {
            RowKind::Root
        } else if node.is_folder() {
            RowKind::Folder
        } else {
            RowKind::Link
        };
        Some(MenuItemRow {
            name: node.name.clone(),
            link: node.link().map(|l| self.resolve_link(l)),
            target: node.target().unwrap_or("_self").to_string(),
            kind,
            expanded: node.expanded(),
            current_page: node.current_page(),
        })
    }
}

/// The one-node menu used when the source is unreachable: a root folder
/// holding a single "Main Page" link to `/`.
pub fn fallback_tree() -> MenuTree {
    MenuTree::from_data(MenuNodeData::folder(
        "Root",
        vec![MenuNodeData::link("Main Page", "/")],
    ))
}
