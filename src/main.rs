use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use folio::catalog::{Catalog, Item};
use folio::config::{Config, StorageKind};
use folio::state::StateStore;
use folio::storage::{FileBackend, KeyValueBackend, MemoryBackend, SqliteBackend, StoreAdapter};

/// Get the config directory path (~/.config/folio/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("folio"))
}

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Browse the book club catalog and keep favorites")]
struct Args {
    /// Config file (defaults to ~/.config/folio/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Clear saved search, category and favorites before anything else
    #[arg(long)]
    reset: bool,

    /// Set the title search text
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Set the category filter ("all" for no filter)
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Toggle an item as favorite by id (repeatable)
    #[arg(long, value_name = "ID")]
    toggle: Vec<i64>,

    /// Remove all favorites
    #[arg(long)]
    clear_favorites: bool,

    /// List the selectable categories and exit
    #[arg(long)]
    categories: bool,
}

/// Open the configured backend. A medium that cannot be opened is not fatal:
/// the session runs on an in-memory store instead.
fn open_backend(config: &Config, config_dir: &Path) -> Box<dyn KeyValueBackend> {
    let opened: Result<Box<dyn KeyValueBackend>> = match config.storage {
        StorageKind::Memory => Ok(Box::new(MemoryBackend::new()) as Box<dyn KeyValueBackend>),
        StorageKind::File => {
            let path = config
                .storage_path
                .clone()
                .unwrap_or_else(|| config_dir.join("state.json"));
            Ok(Box::new(FileBackend::new(path)) as Box<dyn KeyValueBackend>)
        }
        StorageKind::Sqlite => {
            let path = config
                .storage_path
                .clone()
                .unwrap_or_else(|| config_dir.join("folio.db"));
            path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))
                .and_then(|p| SqliteBackend::open(p).context("Failed to open database"))
                .map(|b| Box::new(b) as Box<dyn KeyValueBackend>)
        }
    };

    opened.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Storage unavailable, state will not be saved");
        eprintln!("Warning: {e:#}. Changes will not be saved this session.");
        Box::new(MemoryBackend::new()) as Box<dyn KeyValueBackend>
    })
}

fn print_item(item: &Item, favorite: bool) {
    let marker = if favorite { "*" } else { " " };
    println!(
        "{marker} [{:>3}] {} by {} ({})",
        item.id, item.title, item.author, item.category
    );
}

fn render(store: &StateStore) {
    let items = store.filtered();
    if items.is_empty() {
        println!("No matching books.");
    } else {
        for item in items {
            print_item(item, store.is_favorite(item.id));
        }
    }

    println!();
    println!("Favorites:");
    if store.favorites().is_empty() {
        println!("  (none yet)");
    } else {
        for fav in store.favorites().items() {
            println!("  - {} by {}", fav.title, fav.author);
        }
    }

    println!();
    println!(
        "Search: \"{}\" | Category: {} | Favorites: {}",
        store.search_text(),
        store.selected_category(),
        store.favorites().len()
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };

    let adapter = StoreAdapter::from_boxed(open_backend(&config, &config_dir));
    let mut store = StateStore::initialize(catalog, adapter, config.storage_keys());

    if args.categories {
        for category in store.categories().iter() {
            println!("{category}");
        }
        return Ok(());
    }

    if args.reset {
        store.reset();
    }
    if let Some(text) = args.search {
        store.set_search_text(text);
    }
    if let Some(category) = args.category {
        if !store.categories().contains(&category) {
            eprintln!("Warning: unknown category '{category}', nothing will match.");
        }
        store.set_category(category);
    }
    for id in &args.toggle {
        match store.catalog().get(*id).cloned() {
            Some(item) => store.toggle_favorite(&item),
            None => eprintln!("Warning: no book with id {id}"),
        }
    }
    if args.clear_favorites {
        store.clear_favorites();
    }

    render(&store);

    if store.adapter().failed_writes() > 0 {
        eprintln!(
            "Warning: {} change(s) could not be saved.",
            store.adapter().failed_writes()
        );
    }
    Ok(())
}
