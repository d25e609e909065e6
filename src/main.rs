use std::fs;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod rps;
use self::args::{Args, Ui};
use self::rps::{
    cli_main, ChoiceSource, Console, FileStore, Game, KeyValueStore, MemoryStore, RandomSource,
    ScriptedSource, StatsStore,
};

/// Installs the log subscriber. The TUI owns the terminal, so it logs to a file instead.
fn init_logging(args: &Args, ui: Ui) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match ui {
        Ui::Console => builder.with_writer(std::io::stderr).try_init(),
        Ui::Tui => match args.log_path() {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir)
                        .with_context(|| format!("creating {}", dir.display()))?;
                }
                let log_file = fs::File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                builder
                    .with_writer(Arc::new(log_file))
                    .with_ansi(false)
                    .try_init()
            }
            None => builder.with_writer(std::io::sink).try_init(),
        },
    };
    result.map_err(|err| anyhow::anyhow!(err))
}

fn open_store(args: &Args) -> Box<dyn KeyValueStore> {
    if args.ephemeral {
        Box::<MemoryStore>::default()
    } else {
        Box::new(FileStore::new(args.data_dir()))
    }
}

fn choice_source(args: &Args) -> Box<dyn ChoiceSource> {
    match (&args.script, args.seed) {
        (Some(script), _) => Box::new(script.0.iter().copied().collect::<ScriptedSource>()),
        (None, Some(seed)) => Box::new(RandomSource::seeded(seed)),
        (None, None) => Box::new(RandomSource::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ui = args.ui.unwrap_or_default();
    init_logging(&args, ui)?;
    info!(
        mode = %args.mode,
        data_dir = %args.data_dir().display(),
        ephemeral = args.ephemeral,
        "starting"
    );

    let stats = StatsStore::open(open_store(&args));
    let game = Game::new(args.mode, stats, choice_source(&args));
    match ui {
        Ui::Console => {
            let console = Console::new(!args.no_color, !args.quiet, open_store(&args));
            cli_main(game, console)
        }
        #[cfg(feature = "tui")]
        Ui::Tui => rps::tui_main(game, open_store(&args)),
        #[cfg(not(feature = "tui"))]
        Ui::Tui => anyhow::bail!("built without the terminal UI; rebuild with `--features tui`"),
    }
}
