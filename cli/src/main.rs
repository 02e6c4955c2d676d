/// Treemenu CLI - Command-line interface for the menu engine
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod prompter;

use commands::{add, edit, mv, rm, show};

#[derive(Parser)]
#[command(name = "treemenu")]
#[command(about = "Hierarchical menu engine with session caching", long_about = None)]
#[command(version = "0.1.0")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Override log level
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a menu source and display the resolved tree
    Show {
        /// Menu document: a URL or a local file path
        source: String,

        /// Menu version; cached sessions from other versions are discarded
        #[arg(long, default_value = "1")]
        version: String,

        /// Prefix applied to relative links
        #[arg(long, default_value = "")]
        url_root: String,

        /// Page path to highlight as the current page
        #[arg(long, default_value = "")]
        page: String,

        /// Session cache file
        #[arg(long, default_value = "treemenu-session.json")]
        session: PathBuf,
    },

    /// Add a folder or link under an existing folder
    Add {
        /// Menu document (local file path)
        source: PathBuf,

        /// Name path of the parent folder, e.g. `Docs/Guides`
        parent: String,

        /// Add a folder with this name
        #[arg(long)]
        folder: Option<String>,

        /// Add a link with this name
        #[arg(long)]
        link: Option<String>,

        /// Link URL; derived from the parent chain when omitted
        #[arg(long)]
        url: Option<String>,

        /// Link target attribute, e.g. `_blank`
        #[arg(long)]
        target: Option<String>,

        /// Prefix used when deriving link URLs
        #[arg(long, default_value = "")]
        url_root: String,
    },

    /// Rename a node and, for links, change its URL
    Edit {
        /// Menu document (local file path)
        source: PathBuf,

        /// Name path of the node, e.g. `Docs/Intro`
        node: String,

        /// New name
        #[arg(long)]
        name: String,

        /// New link URL (ignored for folders)
        #[arg(long)]
        url: Option<String>,
    },

    /// Delete a node and its subtree
    Rm {
        /// Menu document (local file path)
        source: PathBuf,

        /// Name path of the node
        node: String,

        /// Confirm the deletion; without it nothing is removed
        #[arg(long)]
        yes: bool,
    },

    /// Move a node among its siblings or across levels
    Mv {
        /// Menu document (local file path)
        source: PathBuf,

        /// Name path of the node
        node: String,

        /// Swap with the previous sibling
        #[arg(long)]
        up: bool,

        /// Swap with the next sibling
        #[arg(long)]
        down: bool,

        /// Move into the grandparent, after the current parent
        #[arg(long)]
        promote: bool,

        /// Nest into this sibling folder (name path or bare name)
        #[arg(long, value_name = "FOLDER")]
        into: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing with custom level if provided
    let log_level = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match args.command {
        Commands::Show {
            source,
            version,
            url_root,
            page,
            session,
        } => {
            show::execute(&source, &version, &url_root, &page, &session).await?;
        }

        Commands::Add {
            source,
            parent,
            folder,
            link,
            url,
            target,
            url_root,
        } => {
            add::execute(
                &source,
                &parent,
                folder.as_deref(),
                link.as_deref(),
                url.as_deref(),
                target.as_deref(),
                &url_root,
            )
            .await?;
        }

        Commands::Edit {
            source,
            node,
            name,
            url,
        } => {
            edit::execute(&source, &node, &name, url.as_deref()).await?;
        }

        Commands::Rm { source, node, yes } => {
            rm::execute(&source, &node, yes).await?;
        }

        Commands::Mv {
            source,
            node,
            up,
            down,
            promote,
            into,
        } => {
            let direction = match (up, down, promote, into) {
                (true, false, false, None) => mv::Direction::Up,
                (false, true, false, None) => mv::Direction::Down,
                (false, false, true, None) => mv::Direction::Promote,
                (false, false, false, Some(folder)) => mv::Direction::Into(folder),
                _ => anyhow::bail!("pass exactly one of --up, --down, --promote, --into FOLDER"),
            };
            mv::execute(&source, &node, direction).await?;
        }
    }

    Ok(())
}
