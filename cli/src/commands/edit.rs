/// `treemenu edit` - rename a node and, for links, change its URL.
use std::path::Path;
use std::sync::Arc;

use treemenu_core::{ItemEdit, MenuEditor, NullRenderer};

use crate::prompter::ArgPrompter;

use super::{load_tree, print_tree, resolve_node, save_tree};

pub async fn execute(
    source: &Path,
    node_path: &str,
    name: &str,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let mut tree = load_tree(source)?;
    let node = resolve_node(&tree, node_path)?;

    let prompter = ArgPrompter {
        edit: Some(ItemEdit {
            name: name.to_string(),
            link: url.map(str::to_string),
        }),
        ..ArgPrompter::default()
    };
    let editor = MenuEditor::new(Arc::new(prompter), Arc::new(NullRenderer), "");

    editor.edit_item(&mut tree, node).await?;
    save_tree(source, &tree)?;
    print_tree(&tree);
    Ok(())
}
