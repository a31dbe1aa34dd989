//! Command-line client for the bookmark service.
//!
//! Talks to a running server over HTTP through the same list synchronizer a
//! UI would use.
//!
//! # Usage
//!
//! ```bash
//! # First two pages, filtered locally
//! cargo run --bin bookmarks -- list --pages 2 --search rust
//!
//! # Add and remove
//! cargo run --bin bookmarks -- add --title "Rust Book" --url https://doc.rust-lang.org/book/
//! cargo run --bin bookmarks -- delete 6f1c... -y
//!
//! # Totals
//! cargo run --bin bookmarks -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKMARKS_API_URL`: API base URL (default: `http://localhost:3001/api/v1`)

use bookmark_manager::api::dto::bookmark::CreateBookmarkRequest;
use bookmark_manager::client::api::DEFAULT_API_URL;
use bookmark_manager::client::{
    BookmarkApi, HttpBookmarkApi, ListSynchronizer, Notice, NoticeLevel, PageLoader,
};
use bookmark_manager::domain::entities::Bookmark;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// Command-line client for the bookmark service.
#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "BOOKMARKS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookmarks, newest first
    List {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Bookmarks per page (1-100)
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Only show bookmarks whose title, url or description contain this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one bookmark
    Show {
        id: String,
    },

    /// Add a bookmark
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a bookmark
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show collection statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let api = Arc::new(
        HttpBookmarkApi::new(&cli.api_url).context("Failed to create HTTP client")?,
    );

    match cli.command {
        Commands::List {
            pages,
            limit,
            search,
        } => handle_list(api, pages, limit, search).await?,
        Commands::Show { id } => handle_show(api, &id).await?,
        Commands::Add {
            title,
            url,
            description,
        } => handle_add(api, title, url, description).await?,
        Commands::Delete { id, yes } => handle_delete(api, &id, yes).await?,
        Commands::Stats => handle_stats(api).await?,
    }

    Ok(())
}

async fn handle_list(
    api: Arc<HttpBookmarkApi>,
    pages: u32,
    limit: u32,
    search: Option<String>,
) -> Result<()> {
    let mut sync = ListSynchronizer::with_loader(api, PageLoader::new(limit));

    for _ in 0..pages.max(1) {
        if !sync.has_more() {
            break;
        }
        if let Err(e) = sync.load_more().await {
            print_notices(sync.drain_notices());
            return Err(e).context("Failed to load bookmarks");
        }
    }

    if let Some(query) = &search {
        sync.set_search(query.as_str());
    }

    println!("{}", "📚 Bookmarks".bright_blue().bold());
    println!();

    let visible = sync.visible();
    if visible.is_empty() {
        println!("{}", "  No bookmarks found".yellow());
    }
    for bookmark in &visible {
        print_row(bookmark);
    }

    println!();
    if let Some(meta) = sync.meta() {
        println!(
            "  Showing {} of {} loaded, {} total ({} pages)",
            visible.len().to_string().bright_white().bold(),
            sync.items().len().to_string().bright_white(),
            meta.total_items.to_string().bright_white(),
            meta.total_pages
        );
        if sync.has_more() {
            println!(
                "  {}",
                format!("More available: --pages {}", meta.current_page + 1).bright_black()
            );
        }
    }
    if let Some(query) = &search {
        println!("  Search: {}", query.cyan());
    }
    println!();

    Ok(())
}

async fn handle_show(api: Arc<HttpBookmarkApi>, id: &str) -> Result<()> {
    let bookmark = api.get(id).await.context("Failed to fetch bookmark")?;

    println!("{}", bookmark.title.bright_white().bold());
    println!("  URL:         {}", bookmark.url.cyan());
    if let Some(description) = &bookmark.description {
        println!("  Description: {}", description);
    }
    println!("  ID:          {}", bookmark.id.bright_black());
    println!(
        "  Created:     {}",
        bookmark.created_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  Updated:     {}",
        bookmark.updated_at.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}

async fn handle_add(
    api: Arc<HttpBookmarkApi>,
    title: String,
    url: String,
    description: Option<String>,
) -> Result<()> {
    let mut sync = ListSynchronizer::new(api);
    let result = sync
        .create(CreateBookmarkRequest {
            title,
            url,
            description,
        })
        .await;
    print_notices(sync.drain_notices());

    let bookmark = result.context("Failed to add bookmark")?;
    println!();
    print_row(&bookmark);
    Ok(())
}

async fn handle_delete(api: Arc<HttpBookmarkApi>, id: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete bookmark {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut sync = ListSynchronizer::new(api);
    let result = sync.delete(id).await;
    print_notices(sync.drain_notices());

    result.context("Failed to delete bookmark")?;
    Ok(())
}

async fn handle_stats(api: Arc<HttpBookmarkApi>) -> Result<()> {
    let stats = api.stats().await.context("Failed to fetch statistics")?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!(
        "  Total bookmarks: {}",
        stats.total_bookmarks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_row(bookmark: &Bookmark) {
    println!(
        "  {} {}",
        bookmark.title.bright_white().bold(),
        bookmark
            .updated_at
            .format("%Y-%m-%d")
            .to_string()
            .bright_black()
    );
    println!("    {}", bookmark.url.cyan());
    if let Some(description) = &bookmark.description {
        println!("    {}", description.bright_black());
    }
    println!("    {}", bookmark.id.bright_black());
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => println!("{}", format!("✅ {notice}").green().bold()),
            NoticeLevel::Error => eprintln!("{}", format!("❌ {notice}").red().bold()),
        }
    }
}
