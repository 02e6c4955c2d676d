/// Non-interactive prompter answering from command-line flags.
///
/// Each command pre-loads the answer its flags describe; anything the flags
/// don't cover reads as a dismissed dialog, which the engine treats as
/// cancellation.
use async_trait::async_trait;
use treemenu_core::{
    AddItemContext, EditItemContext, FolderChoice, ItemEdit, MenuPrompter, MenuResult,
    NewMenuItem, NodeId, Prompted,
};

#[derive(Default)]
pub struct ArgPrompter {
    pub add: Option<NewMenuItem>,
    pub edit: Option<ItemEdit>,
    pub confirm_delete: bool,
    /// Target folder for the nest chooser, by name.
    pub choose: Option<String>,
}

#[async_trait]
impl MenuPrompter for ArgPrompter {
    async fn add_item(&self, _context: AddItemContext) -> MenuResult<Prompted<NewMenuItem>> {
        Ok(match &self.add {
            Some(item) => Prompted::Value(item.clone()),
            None => Prompted::Cancelled,
        })
    }

    async fn edit_item(&self, _context: EditItemContext) -> MenuResult<Prompted<ItemEdit>> {
        Ok(match &self.edit {
            Some(edit) => Prompted::Value(edit.clone()),
            None => Prompted::Cancelled,
        })
    }

    async fn confirm_delete(&self, _name: &str) -> MenuResult<Prompted<()>> {
        Ok(if self.confirm_delete {
            Prompted::Value(())
        } else {
            Prompted::Cancelled
        })
    }

    async fn choose_folder(
        &self,
        _prompt: &str,
        choices: Vec<FolderChoice>,
    ) -> MenuResult<Prompted<NodeId>> {
        Ok(match &self.choose {
            Some(name) => choices
                .iter()
                .find(|c| &c.name == name)
                .map(|c| Prompted::Value(c.id))
                .unwrap_or(Prompted::Cancelled),
            None => Prompted::Cancelled,
        })
    }
}
