use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::logging;
use crate::io::paths::AppPaths;
use crate::model::{Config, Tab};
use crate::ops::store::{ErrorKind, Store, StoreError};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Everything a command needs: where things live, the loaded config, and
/// the open store.
pub struct Session {
    pub paths: AppPaths,
    pub config: Config,
    pub store: Store,
}

/// Resolve paths, read config, start logging, and open the data file.
///
/// Precedence for the data file is `--data`, then `[data] path` from the
/// config (relative paths resolve against the app directory), then
/// `data.json` in the app directory.
pub fn open_session(cli: &Cli) -> Result<Session, Box<dyn std::error::Error>> {
    let paths = match &cli.dir {
        Some(dir) => AppPaths::new(dir.clone()),
        None => AppPaths::discover().map_err(|e| format!("cannot locate app directory: {}", e))?,
    };
    let config = config_io::read_config(&paths.config_file())?;
    logging::init(&paths.log_file(), &config.log.level);
    log::info!(
        "terminal-todo v{} in {}",
        env!("CARGO_PKG_VERSION"),
        paths.dir().display()
    );

    let data_path = data_path(cli, &config, &paths);
    let store = open_store(&data_path, cli.reset)?;
    Ok(Session {
        paths,
        config,
        store,
    })
}

fn data_path(cli: &Cli, config: &Config, paths: &AppPaths) -> PathBuf {
    if let Some(ref data) = cli.data {
        return data.clone();
    }
    match &config.data.path {
        Some(path) if path.is_relative() => paths.dir().join(path),
        Some(path) => path.clone(),
        None => paths.data_file(),
    }
}

fn open_store(path: &std::path::Path, reset: bool) -> Result<Store, Box<dyn std::error::Error>> {
    if reset {
        let (store, backup) = Store::open_or_reset(path)?;
        if let Some(backup) = backup {
            eprintln!(
                "warning: {} was unreadable; backed up to {}",
                path.display(),
                backup.display()
            );
        }
        return Ok(store);
    }
    match Store::open(path) {
        Ok(store) => Ok(store),
        Err(e) if e.kind() == ErrorKind::CorruptData => Err(format!(
            "{}\nhint: rerun with --reset to back up the file and start a fresh list",
            e
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, json: bool, store: &mut Store) -> CmdResult {
    match command {
        Commands::Tabs => cmd_tabs(store, json),
        Commands::Tab(args) => match args.action {
            TabAction::Add(args) => cmd_tab_add(store, args),
            TabAction::Rm(args) => cmd_tab_rm(store, args),
            TabAction::Use(args) => cmd_tab_use(store, args),
        },
        Commands::List(args) => cmd_list(store, args, json),
        Commands::Add(args) => cmd_add(store, args),
        Commands::Done(args) => cmd_done(store, args),
        Commands::Rm(args) => cmd_rm(store, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The tab named by `key` (id or exact name), or the focused tab
fn target_tab<'a>(store: &'a Store, key: Option<&str>) -> Result<&'a Tab, StoreError> {
    match key {
        Some(key) => store
            .resolve_tab(key)
            .ok_or_else(|| StoreError::TabNotFound(key.to_string())),
        None => store
            .snapshot()
            .active_tab()
            .ok_or_else(|| StoreError::TabNotFound("(no tabs)".to_string())),
    }
}

fn target_tab_id(store: &Store, key: Option<&str>) -> Result<String, StoreError> {
    target_tab(store, key).map(|t| t.id.clone())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_tabs(store: &Store, json: bool) -> CmdResult {
    let state = store.snapshot();
    let active = state.active_tab_id.as_deref();

    if json {
        let tabs: Vec<TabJson> = state
            .tabs
            .iter()
            .map(|t| tab_to_json(t, active == Some(t.id.as_str())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tabs)?);
    } else if state.tabs.is_empty() {
        println!("no tabs");
    } else {
        for tab in &state.tabs {
            println!("{}", format_tab_line(tab, active == Some(tab.id.as_str())));
        }
    }
    Ok(())
}

fn cmd_list(store: &Store, args: ListArgs, json: bool) -> CmdResult {
    let tab = target_tab(store, args.tab.as_deref())?;

    if json {
        let list = TaskListJson {
            tab: tab.id.clone(),
            tasks: tab.display_order().into_iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for task in tab.display_order() {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_tab_add(store: &mut Store, args: TabAddArgs) -> CmdResult {
    let id = store.add_tab(&args.name)?;
    println!("{}", id);
    Ok(())
}

fn cmd_tab_rm(store: &mut Store, args: TabArg) -> CmdResult {
    let id = target_tab_id(store, Some(&args.tab))?;
    store.remove_tab(&id)?;
    Ok(())
}

fn cmd_tab_use(store: &mut Store, args: TabArg) -> CmdResult {
    let id = target_tab_id(store, Some(&args.tab))?;
    store.set_active_tab(&id)?;
    Ok(())
}

fn cmd_add(store: &mut Store, args: AddArgs) -> CmdResult {
    let tab_id = target_tab_id(store, args.tab.as_deref())?;
    let id = store.add_task(&tab_id, &args.title)?;
    println!("{}", id);
    Ok(())
}

fn cmd_done(store: &mut Store, args: TaskArgs) -> CmdResult {
    let tab_id = target_tab_id(store, args.tab.as_deref())?;
    let done = store.toggle_task(&tab_id, &args.task)?;
    println!("{} {}", args.task, if done { "[x]" } else { "[ ]" });
    Ok(())
}

fn cmd_rm(store: &mut Store, args: TaskArgs) -> CmdResult {
    let tab_id = target_tab_id(store, args.tab.as_deref())?;
    store.remove_task(&tab_id, &args.task)?;
    Ok(())
}
