//! In-memory note board: a note store, view and filter state, the query
//! pipeline that derives the visible list, and the editing session, driven
//! by a line-oriented shell.

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

pub mod args;
pub mod backup;
pub mod config;
pub mod content;
pub mod error;
pub mod formatting;
pub mod help;
pub mod note;
pub mod query;
pub mod render;
pub mod seed;
pub mod session;
pub mod shared;
pub mod shell;
pub mod state;
pub mod store;
pub mod tags;
pub mod theme;
pub mod view;

pub use config::Config;
pub use error::{NotesError, Result, ValidationErrors};
pub use note::{Note, NotePatch};
pub use session::{Draft, EditingSession, SessionMode};
pub use shell::{Flow, Shell};
pub use state::AppState;
pub use store::NoteStore;
pub use theme::{AccentColor, FontFamily, Theme, ThemeMode, ThemePatch};
pub use view::{SortBy, ViewKind, ViewState};

enum Startup {
    Seed,
    Empty,
    Import(PathBuf),
}

pub fn entry() -> std::result::Result<(), Box<dyn Error>> {
    config::init_logging();
    let args: Vec<String> = env::args().skip(1).collect();

    let mut startup = Startup::Seed;
    let mut parser = args::ArgParser::new(args, "jotboard");
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--import" | "-i" => {
                startup = Startup::Import(PathBuf::from(parser.extract_value("--import")?));
            }
            "--empty" => startup = Startup::Empty,
            "help" | "--help" | "-h" => {
                let topic = parser.next();
                let mut stdout = io::stdout().lock();
                for line in help::render(topic.as_deref()) {
                    writeln!(stdout, "{line}")?;
                }
                return Ok(());
            }
            other => return Err(parser.unknown(other).into()),
        }
    }

    let state = match startup {
        Startup::Seed => AppState::with_seed(),
        Startup::Empty => AppState::new(Vec::new()),
        Startup::Import(path) => {
            let notes = backup::read_backup(&path)?;
            info!(count = notes.len(), path = %path.display(), "loaded backup");
            AppState::new(notes)
        }
    };

    let mut shell = Shell::new(state, Config::from_env());
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    shell.run(stdin, &mut stdout, &mut stderr)?;
    Ok(())
}
