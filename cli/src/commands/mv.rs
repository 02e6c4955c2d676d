/// `treemenu mv` - reorder a node among its siblings or move it across levels.
use std::path::Path;
use std::sync::Arc;

use treemenu_core::{MenuEditor, NullRenderer};

use crate::prompter::ArgPrompter;

use super::{load_tree, print_tree, resolve_node, save_tree};

pub enum Direction {
    Up,
    Down,
    Promote,
    Into(String),
}

pub async fn execute(source: &Path, node_path: &str, direction: Direction) -> anyhow::Result<()> {
    let mut tree = load_tree(source)?;
    let node = resolve_node(&tree, node_path)?;

    // For --into, pre-answer the nest chooser with the folder's name. The
    // chooser offers sibling folders by name, so a full path and a bare
    // sibling name both resolve.
    let choose = match &direction {
        Direction::Into(folder_path) => {
            let folder = resolve_node(&tree, folder_path)?;
            tree.get(folder).map(|n| n.name.clone())
        }
        _ => None,
    };
    let prompter = ArgPrompter {
        choose,
        ..ArgPrompter::default()
    };
    let editor = MenuEditor::new(Arc::new(prompter), Arc::new(NullRenderer), "");

    let moved = match direction {
        Direction::Up => editor.move_up(&mut tree, node),
        Direction::Down => editor.move_down(&mut tree, node),
        Direction::Promote => editor.move_to_parent(&mut tree, node),
        Direction::Into(_) => editor.move_to_child(&mut tree, node).await?,
    };

    if moved {
        save_tree(source, &tree)?;
        print_tree(&tree);
    } else {
        println!("no move performed");
    }
    Ok(())
}
