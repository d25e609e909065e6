//! Command line arguments

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::rps::{Choice, MatchPolicy};

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long)]
    pub ui: Option<Ui>,

    /// Match length: "endless", or an odd number of rounds.
    #[arg(short, long, default_value = "endless")]
    pub mode: MatchPolicy,

    /// Where lifetime stats and preferences are kept.
    #[arg(long, env = "ROSHAMBO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep stats in memory only, for this session.
    #[arg(long)]
    pub ephemeral: bool,

    /// Seed for the computer's random choices.
    #[arg(long, conflicts_with = "script")]
    pub seed: Option<u64>,

    /// Make the computer throw a fixed, repeating sequence, e.g. "rpss".
    #[arg(long)]
    pub script: Option<Script>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Never ring the terminal bell.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Ui {
    #[default]
    Console,
    Tui,
}

impl Args {
    /// The data directory, defaulting to `~/.roshambo`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".roshambo")
        })
    }

    /// Where the TUI writes its log. Ephemeral sessions write nothing to disk.
    pub fn log_path(&self) -> Option<PathBuf> {
        (!self.ephemeral).then(|| self.data_dir().join("roshambo.log"))
    }
}

/// A sequence of computer choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(pub Vec<Choice>);

impl FromStr for Script {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let script = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Choice::try_from(c).map_err(|()| format!("{c:?} is not one of r, p, s")))
            .collect::<Result<Vec<_>, _>>()?;
        if script.is_empty() {
            return Err("script is empty".into());
        }
        Ok(Self(script))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["roshambo"]);
        assert_eq!(args.ui, None);
        assert_eq!(args.mode, MatchPolicy::Endless);
        assert!(!args.ephemeral);
        assert_eq!(args.script, None);
        assert!(!args.quiet);
    }

    #[test]
    fn log_path() {
        let args = Args::parse_from(["roshambo", "--data-dir", "/tmp/rps"]);
        assert_eq!(args.log_path(), Some(PathBuf::from("/tmp/rps/roshambo.log")));
        let args = Args::parse_from(["roshambo", "--data-dir", "/tmp/rps", "--ephemeral"]);
        assert_eq!(args.log_path(), None);
    }

    #[test]
    fn options() {
        let args = Args::parse_from(["roshambo", "--mode", "5", "--script", "r, p, s"]);
        assert_eq!(args.mode, MatchPolicy::best_of(5).unwrap());
        assert_eq!(
            args.script,
            Some(Script(vec![Choice::Rock, Choice::Paper, Choice::Scissors]))
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["roshambo", "--mode", "4"]).is_err());
        assert!(Args::try_parse_from(["roshambo", "--script", "rpx"]).is_err());
        assert!(Args::try_parse_from(["roshambo", "--seed", "1", "--script", "r"]).is_err());
    }
}
