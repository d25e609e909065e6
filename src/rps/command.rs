//! Player commands.

use std::str::FromStr;

use super::{Choice, MatchPolicy, PolicyError};

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Throw a choice.
    Play(Choice),
    /// Change the match policy, starting a new match.
    SetPolicy(MatchPolicy),
    /// Switch to the next preset policy.
    CyclePolicy,
    /// Start a new match under the same policy.
    Restart,
    /// Zero the lifetime stats.
    ResetStats,
    ToggleTheme,
    ShowStats,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(choice) = Choice::from_str(s) {
            return Ok(Command::Play(choice));
        }
        let (word, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();
        Ok(match word.to_ascii_lowercase().as_str() {
            "mode" | "m" if rest.is_empty() => Command::CyclePolicy,
            "mode" | "m" => Command::SetPolicy(rest.parse()?),
            "restart" | "n" => Command::Restart,
            "reset" => Command::ResetStats,
            "theme" | "t" => Command::ToggleTheme,
            "stats" => Command::ShowStats,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(s.to_string())),
        })
    }
}

impl Command {
    /// One line of help per command.
    pub fn help() -> &'static [(&'static str, &'static str)] {
        &[
            ("r, p, s", "throw rock, paper, or scissors"),
            ("mode <endless|N>", "play endlessly, or best of N (odd)"),
            ("mode", "switch to the next of endless, best of 3, 5, 7"),
            ("restart", "start a new match"),
            ("reset", "erase lifetime stats"),
            ("theme", "toggle light/dark colors"),
            ("stats", "show lifetime stats"),
            ("quit", "leave the game"),
        ]
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    fn parse(s: &str) -> Result<Command, CommandError> {
        s.parse()
    }

    #[test]
    fn choices() {
        assert_eq!(parse("r"), Ok(Command::Play(Choice::Rock)));
        assert_eq!(parse(" Paper "), Ok(Command::Play(Choice::Paper)));
        assert_eq!(parse("S"), Ok(Command::Play(Choice::Scissors)));
    }

    #[test]
    fn modes() {
        assert_eq!(
            parse("mode 5"),
            Ok(Command::SetPolicy(MatchPolicy::best_of(5).unwrap()))
        );
        assert_eq!(
            parse("MODE endless"),
            Ok(Command::SetPolicy(MatchPolicy::Endless))
        );
        assert_eq!(parse("mode"), Ok(Command::CyclePolicy));
        assert_eq!(parse("m"), Ok(Command::CyclePolicy));
        assert_eq!(
            parse("mode 2"),
            Err(CommandError::Policy(PolicyError::Even(2)))
        );
    }

    #[test]
    fn others() {
        assert_eq!(parse("restart"), Ok(Command::Restart));
        assert_eq!(parse("n"), Ok(Command::Restart));
        assert_eq!(parse("reset"), Ok(Command::ResetStats));
        assert_eq!(parse("t"), Ok(Command::ToggleTheme));
        assert_eq!(parse("stats"), Ok(Command::ShowStats));
        assert_eq!(parse("?"), Ok(Command::Help));
        assert_eq!(parse("q"), Ok(Command::Quit));
        assert_matches!(parse("lizard"), Err(CommandError::Unknown(_)));
        assert_matches!(parse(""), Err(CommandError::Unknown(_)));
    }
}
