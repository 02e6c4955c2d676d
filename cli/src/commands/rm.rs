/// `treemenu rm` - delete a node and its subtree.
use std::path::Path;
use std::sync::Arc;

use treemenu_core::{MenuEditor, NullRenderer};

use crate::prompter::ArgPrompter;

use super::{load_tree, print_tree, resolve_node, save_tree};

pub async fn execute(source: &Path, node_path: &str, yes: bool) -> anyhow::Result<()> {
    let mut tree = load_tree(source)?;
    let node = resolve_node(&tree, node_path)?;

    let prompter = ArgPrompter {
        confirm_delete: yes,
        ..ArgPrompter::default()
    };
    let editor = MenuEditor::new(Arc::new(prompter), Arc::new(NullRenderer), "");

    if editor.delete_item(&mut tree, node).await? {
        save_tree(source, &tree)?;
        print_tree(&tree);
    } else {
        println!("not deleted (pass --yes to confirm)");
    }
    Ok(())
}
