//! The game of rock, paper, scissors.

mod choice;
mod command;
mod console;
mod error;
mod game;
mod round;
mod session;
mod source;
mod stats;
mod store;
mod theme;
#[cfg(feature = "tui")]
mod tui;
use self::command::Command;
use self::error::{GameError, PolicyError, StoreError};
use self::game::{match_headline, Event, RoundReport};
use self::round::{Outcome, Round};
use self::session::{MatchSession, SessionState, Side};
use self::stats::LifetimeStats;
use self::theme::Theme;
#[cfg(feature = "tui")]
use self::tui::{tui_init, tui_restore, Tui};

pub use self::choice::Choice;
pub use self::console::Console;
pub use self::game::Game;
pub use self::session::MatchPolicy;
pub use self::source::{ChoiceSource, RandomSource, ScriptedSource};
pub use self::stats::StatsStore;
pub use self::store::{FileStore, KeyValueStore, MemoryStore};

/// Runs the game with a simple command-line interface.
pub fn cli_main(mut game: Game, mut console: Console) -> anyhow::Result<()> {
    console::run(&mut game, &mut console, std::io::stdin().lock())
}

/// Runs the game in a rich terminal UI.
#[cfg(feature = "tui")]
pub fn tui_main(game: Game, prefs: Box<dyn KeyValueStore>) -> anyhow::Result<()> {
    let tui = Tui::new(game, prefs);
    let terminal = tui_init()?;
    let result = tui.run(terminal);
    tui_restore()?;
    result
}
