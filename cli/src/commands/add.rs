/// `treemenu add` - append a folder or link under an existing folder.
use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use treemenu_core::{suggest_link, MenuEditor, NewMenuItem, NullRenderer};

use crate::prompter::ArgPrompter;

use super::{load_tree, print_tree, resolve_node, save_tree};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    source: &Path,
    parent_path: &str,
    folder: Option<&str>,
    link: Option<&str>,
    url: Option<&str>,
    target: Option<&str>,
    url_root: &str,
) -> anyhow::Result<()> {
    let mut tree = load_tree(source)?;
    let parent = resolve_node(&tree, parent_path)?;

    // The editor is built first so the flag-driven "dialog" can reuse its
    // link auto-suggestion when no explicit URL was given.
    let scaffold = MenuEditor::new(
        Arc::new(ArgPrompter::default()),
        Arc::new(NullRenderer),
        url_root,
    );

    let item = match (folder, link) {
        (Some(name), None) => NewMenuItem::Folder { name: name.into() },
        (None, Some(name)) => {
            let link_url = match url {
                Some(url) => url.to_string(),
                None => suggest_link(&scaffold.link_base(&tree, parent), name),
            };
            NewMenuItem::Link {
                name: name.into(),
                link: link_url,
                target: target.map(str::to_string),
            }
        }
        _ => bail!("pass exactly one of --folder NAME or --link NAME"),
    };

    let prompter = ArgPrompter {
        add: Some(item),
        ..ArgPrompter::default()
    };
    let editor = MenuEditor::new(Arc::new(prompter), Arc::new(NullRenderer), url_root);

    match editor.add_item(&mut tree, parent).await? {
        Some(_) => {
            save_tree(source, &tree)?;
            print_tree(&tree);
            Ok(())
        }
        None => bail!("'{parent_path}' is not a folder"),
    }
}
