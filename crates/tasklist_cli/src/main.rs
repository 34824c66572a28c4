//! Interactive task list front end.
//!
//! # Responsibility
//! - Parse options, initialize logging and open the durable slot store.
//! - Run a line-oriented event loop that dispatches commands to the core.

mod cli;
mod terminal;

use clap::Parser;
use log::{error, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;
use tasklist_core::{
    init_logging, split_verb, Command, Frame, HtmlSurface, MemorySlotStore, SlotStore, SqliteSlotStore,
    Surface, TaskApp, TaskPersistence, TaskStore, ViewRenderer,
};
use terminal::{StdinConfirm, TerminalSurface};

const HELP: &str = "commands:
  add <text>        add a task
  toggle <id>       flip completion
  delete <id>       delete a task (asks first)
  clear             delete completed tasks (asks first)
  filter <name>     all | active | completed
  list              show tasks again
  html <path>       write an HTML snapshot
  help              this text
  quit              leave";

fn main() {
    let config = cli::Cli::parse().into_config();
    if let Err(err) = config.validate() {
        eprintln!("tasklist: {err}");
        std::process::exit(2);
    }

    let log_dir = config.log_dir.to_string_lossy();
    if let Err(err) = init_logging(&config.log_level, &log_dir) {
        eprintln!("tasklist: logging disabled: {err}");
    }

    let slots = open_slots(config.db_path.as_deref());
    let store = TaskStore::open(TaskPersistence::new(slots), StdinConfirm);
    let renderer = ViewRenderer::with_timings(
        TerminalSurface::new(io::stdout()),
        config.notifications,
    );
    let mut app = TaskApp::start(store, renderer, Instant::now());

    run_loop(&mut app);
}

fn open_slots(db_path: Option<&Path>) -> Box<dyn SlotStore> {
    let Some(path) = db_path else {
        return Box::new(MemorySlotStore::new());
    };
    match SqliteSlotStore::open(path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            error!("event=slots_open module=cli status=error error={err}");
            eprintln!("tasklist: cannot open `{}` ({err}); tasks will not be saved", path.display());
            warn!("event=slots_open module=cli status=fallback mode=memory");
            Box::new(MemorySlotStore::new())
        }
    }
}

fn run_loop<W: Write>(app: &mut TaskApp<Box<dyn SlotStore>, TerminalSurface<W>>) {
    let stdin = io::stdin();
    loop {
        app.tick(Instant::now());
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("event=stdin_read module=cli status=error error={err}");
                break;
            }
        }

        let input = line.trim();
        let (verb, rest) = split_verb(input);
        match verb.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "list" => app.refresh(),
            "html" => write_html_snapshot(app, rest.trim()),
            _ => match Command::parse(input) {
                Ok(command) => {
                    let _ = app.dispatch(command, Instant::now());
                }
                Err(err) => println!("{err}; type `help`"),
            },
        }
    }
}

fn write_html_snapshot<W: Write>(
    app: &TaskApp<Box<dyn SlotStore>, TerminalSurface<W>>,
    path: &str,
) {
    if path.is_empty() {
        println!("`html` needs a file path");
        return;
    }
    let store = app.store();
    let mut surface = HtmlSurface::new();
    surface.present(&Frame::build(store.tasks(), store.filter()));
    match std::fs::write(path, surface.document()) {
        Ok(()) => println!("wrote {path}"),
        Err(err) => println!("cannot write {path}: {err}"),
    }
}
