use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store::TaskStore;
use crate::io::{config_io, logging, paths};
use crate::model::config::Config;

/// Everything a command needs to reach the task file
pub struct Workspace {
    pub data_dir: PathBuf,
    pub config: Config,
    pub store: TaskStore,
}

/// Resolve the data directory, start logging, read config.toml and locate
/// the task file.
pub fn open_workspace(cli: &Cli) -> Result<Workspace, Box<dyn std::error::Error>> {
    let data_dir = paths::resolve_data_dir(cli.data_dir.as_deref())?;
    logging::init_file_logging(&data_dir);
    let config = config_io::load_config(&data_dir);
    let path = paths::task_file_path(&data_dir, &config, cli.file.as_deref());
    info!(data_dir = %data_dir.display(), file = %path.display(), "workspace resolved");
    let store = TaskStore::new(path, config.storage.on_corrupt);
    Ok(Workspace {
        data_dir,
        config,
        store,
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ws = open_workspace(&cli)?;
    match cli.command {
        None => crate::tui::run(ws.store, ws.config),
        Some(Commands::List(args)) => cmd_list(&ws, args),
        Some(Commands::Stats(args)) => cmd_stats(&ws, args),
        Some(Commands::Path) => cmd_path(&ws),
    }
}

fn cmd_list(ws: &Workspace, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let status = StatusFilter::parse(&args.status)?;
    let tasks = ws.store.load()?;
    let priority = args.priority.as_deref();

    if args.json {
        let selected = select(&tasks, priority, status);
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        print!("{}", format_listing(&tasks, priority, status, Utc::now()));
    }
    Ok(())
}

fn cmd_stats(ws: &Workspace, args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = ws.store.load()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats_json(&tasks))?);
    } else {
        print!("{}", format_stats(&tasks));
    }
    Ok(())
}

fn cmd_path(ws: &Workspace) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", ws.store.path().display());
    Ok(())
}
