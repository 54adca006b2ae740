use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng;
use tracing_subscriber::EnvFilter;

use picka_host::{Entry, EntryAction, Host, Query};
use picka_store::{JsonStorage, Store};

mod host;
mod plugin;

use crate::host::TerminalHost;
use crate::plugin::Plugin;

/// Keyword a launcher would route our queries with; the terminal shell
/// implies it.
const ACTION_KEYWORD: &str = "rnd";

#[derive(Parser)]
#[command(
    name = "picka",
    about = "Pick randomly from a predefined list, optionally using weights"
)]
struct Args {
    /// Directory for the persisted store (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Draw from a random definition and print the results
    Pick {
        /// <RandomDefinition>[ <ResultCount>[ <MaxRepCount>]]
        request: String,
    },
    /// List pick history, newest first
    History { search: Option<String> },
    /// List favorite definitions
    Favorites { search: Option<String> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = picka_config::Config::new();
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }

    let storage = JsonStorage::new(config.store_path());
    let store = Store::open_with_capacity(storage, config.history_capacity);
    let mut plugin = Plugin::new(store);
    let mut host = TerminalHost::new();

    match args.command {
        Some(Command::Pick { request }) => {
            run_query(&mut plugin, &mut host, &format!("pick {request}"), true)
        }
        Some(Command::History { search }) => {
            let search = search.unwrap_or_default();
            run_query(&mut plugin, &mut host, &format!("history {search}"), false)
        }
        Some(Command::Favorites { search }) => {
            let search = search.unwrap_or_default();
            run_query(&mut plugin, &mut host, &format!("favorites {search}"), false)
        }
        None => interactive(&mut plugin, &mut host),
    }
}

/// Runs one query; with `trigger` set, the generate entry is activated so a
/// single invocation goes through the whole two-phase draw.
fn run_query<R: Rng>(
    plugin: &mut Plugin<R>,
    host: &mut TerminalHost,
    search: &str,
    trigger: bool,
) -> anyhow::Result<()> {
    let query = Query::new(ACTION_KEYWORD, search.trim_end());
    let mut entries = plugin.handle_query(&query);

    if trigger {
        let generate = entries
            .iter()
            .find(|entry| matches!(entry.action, EntryAction::Generate { .. }))
            .cloned();
        if let Some(entry) = generate {
            plugin.activate(&entry, host);
            drain_pending(plugin, host, &mut entries);
            return Ok(());
        }
        // Nothing to trigger (e.g. a bad-format warning): fall through and
        // show it.
    }

    host.present(&entries);
    Ok(())
}

fn interactive<R: Rng>(plugin: &mut Plugin<R>, host: &mut TerminalHost) -> anyhow::Result<()> {
    println!("picka interactive shell");
    println!("type a query (e.g. `pick a;b:2 2`), `!N` to activate entry N,");
    println!("`?N` for its context menu, `quit` to leave");

    let stdin = io::stdin();
    let mut entries: Vec<Entry> = Vec::new();

    loop {
        print!("{ACTION_KEYWORD}> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            _ if line.starts_with('!') => {
                match indexed(&entries, &line[1..]) {
                    Some(entry) => {
                        plugin.activate(&entry, host);
                        drain_pending(plugin, host, &mut entries);
                    }
                    None => println!("no such entry"),
                }
            }
            _ if line.starts_with('?') => {
                match indexed(&entries, &line[1..]) {
                    Some(entry) => {
                        let menu = plugin.context_menu(&entry);
                        if menu.is_empty() {
                            println!("no context menu for this entry");
                        } else {
                            // The menu becomes the current list so `!N`
                            // activates its items.
                            entries = menu;
                            host.present(&entries);
                        }
                    }
                    None => println!("no such entry"),
                }
            }
            _ => {
                let query = Query::new(ACTION_KEYWORD, line);
                entries = plugin.handle_query(&query);
                host.present(&entries);
            }
        }
    }

    Ok(())
}

/// Re-runs queries queued by actions until the display settles.
fn drain_pending<R: Rng>(
    plugin: &mut Plugin<R>,
    host: &mut TerminalHost,
    entries: &mut Vec<Entry>,
) {
    while let Some(raw) = host.take_pending_query() {
        let query = Query::from_raw(ACTION_KEYWORD, &raw);
        *entries = plugin.handle_query(&query);
        host.present(entries);
    }
}

fn indexed(entries: &[Entry], index_text: &str) -> Option<Entry> {
    let index: usize = index_text.trim().parse().ok()?;
    entries.get(index).cloned()
}
