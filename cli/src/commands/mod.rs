pub mod add;
pub mod edit;
pub mod mv;
pub mod rm;
pub mod show;

use std::path::Path;

use anyhow::{bail, Context};
use treemenu_core::{MenuNodeData, MenuTree, NodeId};

/// Parse a menu document from disk into a live tree.
pub fn load_tree(source: &Path) -> anyhow::Result<MenuTree> {
    let raw = std::fs::read_to_string(source)
        .with_context(|| format!("cannot read menu document {}", source.display()))?;
    let data: MenuNodeData = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid menu document", source.display()))?;
    Ok(MenuTree::from_data(data))
}

/// Write a tree back as a menu document.
pub fn save_tree(source: &Path, tree: &MenuTree) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(&tree.to_data())?;
    std::fs::write(source, raw)
        .with_context(|| format!("cannot write menu document {}", source.display()))?;
    Ok(())
}

/// Resolve a `/`-separated name path like `Docs/Intro` to a node.
pub fn resolve_node(tree: &MenuTree, path: &str) -> anyhow::Result<NodeId> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match tree.find_by_name_path(&segments) {
        Some(id) => Ok(id),
        None => bail!("no node at path '{path}'"),
    }
}

/// Render the tree as an indented listing.
pub fn print_tree(tree: &MenuTree) {
    tree.walk(|id, depth| {
        let Some(node) = tree.get(id) else { return };
        let indent = "  ".repeat(depth);
        let marker = if node.is_folder() {
            if node.expanded() {
                "▾"
            } else {
                "▸"
            }
        } else {
            "-"
        };
        let highlight = if node.current_page() { " *" } else { "" };
        match node.link() {
            Some(link) => println!("{indent}{marker} {} ({link}){highlight}", node.name),
            None => println!("{indent}{marker} {}{highlight}", node.name),
        }
    });
}
