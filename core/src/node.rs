/// Node model for the tree menu: the live in-memory node shape and the wire
/// shape exchanged with the server and the session cache.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a live node within one in-memory session.
///
/// Ids are minted when a document is loaded into a [`crate::tree::MenuTree`]
/// and are never serialized; the persisted form carries structure only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live menu node.
///
/// `parent` and `current_page` are runtime-only derived state: they are
/// rebuilt by a full tree walk after every load and never persisted.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub id: NodeId,
    pub name: String,
    /// Back-reference to the owning folder; `None` only for the root.
    pub parent: Option<NodeId>,
    pub payload: NodePayload,
}

/// The folder/link discriminant with each variant's storage.
#[derive(Debug, Clone)]
pub enum NodePayload {
    Folder {
        /// Display and mutation order of the children.
        children: Vec<NodeId>,
        expanded: bool,
        /// True when this folder is a strict ancestor of the active page link.
        current_page: bool,
    },
    Link {
        link: String,
        target: Option<String>,
        /// True when `link` matches the active page path.
        current_page: bool,
    },
}

impl MenuNode {
    pub(crate) fn folder(name: impl Into<String>) -> Self {
        MenuNode {
            id: NodeId::new(),
            name: name.into(),
            parent: None,
            payload: NodePayload::Folder {
                children: Vec::new(),
                expanded: false,
                current_page: false,
            },
        }
    }

    pub(crate) fn link_node(name: impl Into<String>, link: impl Into<String>, target: Option<String>) -> Self {
        MenuNode {
            id: NodeId::new(),
            name: name.into(),
            parent: None,
            payload: NodePayload::Link {
                link: link.into(),
                target,
                current_page: false,
            },
        }
    }

    /// The single authoritative folder/link discriminant.
    pub fn is_folder(&self) -> bool {
        matches!(self.payload, NodePayload::Folder { .. })
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.payload {
            NodePayload::Folder { children, .. } => Some(children),
            NodePayload::Link { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.payload {
            NodePayload::Folder { children, .. } => Some(children),
            NodePayload::Link { .. } => None,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Link { link, .. } => Some(link),
            NodePayload::Folder { .. } => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Link { target, .. } => target.as_deref(),
            NodePayload::Folder { .. } => None,
        }
    }

    pub fn expanded(&self) -> bool {
        match &self.payload {
            NodePayload::Folder { expanded, .. } => *expanded,
            NodePayload::Link { .. } => false,
        }
    }

    pub fn set_expanded(&mut self, value: bool) {
        if let NodePayload::Folder { expanded, .. } = &mut self.payload {
            *expanded = value;
        }
    }

    pub fn current_page(&self) -> bool {
        match &self.payload {
            NodePayload::Folder { current_page, .. } => *current_page,
            NodePayload::Link { current_page, .. } => *current_page,
        }
    }

    pub fn set_current_page(&mut self, value: bool) {
        match &mut self.payload {
            NodePayload::Folder { current_page, .. } => *current_page = value,
            NodePayload::Link { current_page, .. } => *current_page = value,
        }
    }
}

// ============================================================================
// WIRE FORM: what the server sends and the session cache stores
// ============================================================================

/// Serialized node shape: forward `children` edges only, no back-references,
/// no `current_page` highlight state.
///
/// The Folder variant is listed first so that a document carrying both
/// `children` and `link` deserializes with folder semantics, matching the
/// `is_folder` precedence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuNodeData {
    Folder(FolderData),
    Link(LinkData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderData {
    pub name: String,
    pub children: Vec<MenuNodeData>,
    /// Expansion toggles survive the session cache, unlike highlight state.
    #[serde(default, skip_serializing_if = "is_false")]
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MenuNodeData {
    pub fn folder(name: impl Into<String>, children: Vec<MenuNodeData>) -> Self {
        MenuNodeData::Folder(FolderData {
            name: name.into(),
            children,
            expanded: false,
        })
    }

    pub fn link(name: impl Into<String>, link: impl Into<String>) -> Self {
        MenuNodeData::Link(LinkData {
            name: name.into(),
            link: link.into(),
            target: None,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            MenuNodeData::Folder(f) => &f.name,
            MenuNodeData::Link(l) => &l.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_wins_when_both_children_and_link_present() {
        let raw = r#"{"name":"odd","children":[],"link":"/odd"}"#;
        let parsed: MenuNodeData = serde_json::from_str(raw).unwrap();
        assert!(matches!(parsed, MenuNodeData::Folder(_)));
    }

    #[test]
    fn link_parses_without_target() {
        let raw = r#"{"name":"Intro","link":"/intro"}"#;
        let parsed: MenuNodeData = serde_json::from_str(raw).unwrap();
        match parsed {
            MenuNodeData::Link(l) => {
                assert_eq!(l.link, "/intro");
                assert!(l.target.is_none());
            }
            MenuNodeData::Folder(_) => panic!("expected a link"),
        }
    }

    #[test]
    fn collapsed_folder_serializes_without_expanded_field() {
        let data = MenuNodeData::folder("Docs", vec![]);
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("expanded"));

        let expanded = MenuNodeData::Folder(FolderData {
            name: "Docs".into(),
            children: vec![],
            expanded: true,
        });
        let json = serde_json::to_string(&expanded).unwrap();
        assert!(json.contains("\"expanded\":true"));
    }
}
