/// `treemenu show` - cache-aware load and display of a menu source.
use std::path::Path;
use std::sync::Arc;

use treemenu_core::{
    normalize_url_root, FileMenuFetcher, FileSessionStore, HttpMenuFetcher, MenuFetcher,
    TreeMenuProvider,
};

pub async fn execute(
    source: &str,
    version: &str,
    url_root: &str,
    page_path: &str,
    session: &Path,
) -> anyhow::Result<()> {
    let fetcher: Arc<dyn MenuFetcher> =
        if source.starts_with("http://") || source.starts_with("https://") {
            Arc::new(HttpMenuFetcher::new())
        } else {
            Arc::new(FileMenuFetcher)
        };
    let store = Arc::new(FileSessionStore::open(session)?);

    let mut provider = TreeMenuProvider::new(fetcher, store, page_path);
    provider
        .load_menu(source, version, &normalize_url_root(url_root))
        .await?;

    let tree = provider.tree();
    tracing::debug!(nodes = tree.node_count(), "menu loaded");
    tree.walk(|id, depth| {
        let Some(row) = provider.row_model(id) else { return };
        let indent = "  ".repeat(depth);
        let marker = match row.link {
            None if row.expanded => "▾",
            None => "▸",
            Some(_) => "-",
        };
        let highlight = if row.current_page { " *" } else { "" };
        match &row.link {
            Some(link) => println!("{indent}{marker} {} ({link}){highlight}", row.name),
            None => println!("{indent}{marker} {}{highlight}", row.name),
        }
    });

    // The CLI's "page unload": persist the session record for the next run.
    let scroll = provider.scroll();
    provider.cache_menu(scroll.left, scroll.top);
    Ok(())
}
