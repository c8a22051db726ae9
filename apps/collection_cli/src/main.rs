use std::path::PathBuf;

use anyhow::{anyhow, Result};
use asset_store::AssetStore;
use clap::{Parser, Subcommand, ValueEnum};
use collection_engine::{default_categories, EngineContext};
use shared::{
    domain::{CategoryId, HostTrigger, SortMode},
    error::{ApiError, ErrorCode},
    protocol::CategoryView,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod inventory;

use config::load_settings;
use inventory::Inventory;

#[derive(Parser, Debug)]
#[command(about = "Sort and paginate collection tabs")]
struct Cli {
    #[arg(long, default_value = "collection.toml")]
    settings: PathBuf,
    #[arg(long, default_value = "inventory.json")]
    inventory: PathBuf,
    /// Print views as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out one category under a sort mode.
    Show {
        category: String,
        #[arg(long, default_value = "canonical", value_parser = parse_mode)]
        mode: SortMode,
    },
    /// Open a category, then click its tab repeatedly.
    Cycle {
        category: String,
        #[arg(long, value_enum, default_value_t = Click::Select)]
        click: Click,
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
    /// List configured categories.
    Categories,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Click {
    Select,
    Alt,
}

impl From<Click> for HostTrigger {
    fn from(value: Click) -> Self {
        match value {
            Click::Select => HostTrigger::Select,
            Click::Alt => HostTrigger::AltSelect,
        }
    }
}

fn parse_mode(raw: &str) -> Result<SortMode, String> {
    SortMode::parse(raw).ok_or_else(|| {
        let names: Vec<&str> = SortMode::ALL.iter().map(|m| m.as_str()).collect();
        format!("unknown sort mode '{raw}', expected one of {}", names.join(", "))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings(&cli.settings);
    let store = AssetStore::new(&settings.assets_dir);
    let mut ctx: EngineContext<String> = EngineContext::load(
        default_categories(),
        &store,
        settings.grid().map_err(|err| report(err.into(), cli.json))?,
        settings.sentinels,
    );
    ctx.refresh_labels(&store.load_translations());
    info!(
        assets = %store.root().display(),
        categories = ctx.registry().len(),
        colors = ctx.colors().len(),
        "engine ready"
    );

    if let Command::Categories = cli.command {
        for id in ctx.registry().ids() {
            if let Some(config) = ctx.registry().get(id) {
                println!(
                    "{id}\t{}\t{}\t{} canonical ids",
                    config.simple_name(),
                    config.translated_name,
                    config.canonical_order.len()
                );
            }
        }
        return Ok(());
    }

    let inventory = Inventory::load(&cli.inventory)?;
    for id in ctx.registry().ids().collect::<Vec<_>>() {
        let Some(def) = ctx.registry().get(id).map(|config| config.def.clone()) else {
            continue;
        };
        ctx.aggregate(id, inventory.raw_items(&def), &inventory, &inventory);
    }

    match cli.command {
        Command::Show { category, mode } => {
            let id = resolve_category(&ctx, &category, cli.json)?;
            ctx.set_mode(id, mode);
            if let Some(view) = ctx.handle_trigger(id, HostTrigger::Open) {
                print_view(&view, cli.json)?;
            }
        }
        Command::Cycle {
            category,
            click,
            times,
        } => {
            let id = resolve_category(&ctx, &category, cli.json)?;
            let mut view = ctx.handle_trigger(id, HostTrigger::Open);
            for _ in 0..times {
                view = ctx.handle_trigger(id, click.into());
            }
            if let Some(view) = view {
                print_view(&view, cli.json)?;
            }
        }
        Command::Categories => {}
    }

    Ok(())
}

fn resolve_category(ctx: &EngineContext<String>, name: &str, json: bool) -> Result<CategoryId> {
    if let Some(config) = ctx.registry().find_by_name(name) {
        return Ok(config.id());
    }
    if let Some(id) = name.parse::<i64>().ok().map(CategoryId) {
        if ctx.registry().contains(id) {
            return Ok(id);
        }
    }
    Err(report(
        ApiError::new(ErrorCode::NotFound, format!("unknown category '{name}'")),
        json,
    ))
}

/// Echoes the error as JSON for machine consumers before failing.
fn report(error: ApiError, json: bool) -> anyhow::Error {
    if json {
        if let Ok(raw) = serde_json::to_string_pretty(&error) {
            println!("{raw}");
        }
    }
    anyhow!(error.message)
}

fn print_view(view: &CategoryView<String>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("{}", view.status);
    if view.pages.is_empty() {
        println!("(no items)");
    }
    for (number, page) in view.pages.iter().enumerate() {
        println!("-- page {} ({} items)", number + 1, page.len());
        let mut row: Option<usize> = None;
        let mut line = Vec::new();
        for slot in &page.slots {
            if row.is_some_and(|r| r != slot.row) {
                println!("  {}", line.join(" "));
                line.clear();
            }
            row = Some(slot.row);
            line.push(format!("{:>6}", slot.item_id));
        }
        if !line.is_empty() {
            println!("  {}", line.join(" "));
        }
    }
    Ok(())
}
