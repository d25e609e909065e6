//! Simple console front end.

use std::io::{self, BufRead, Write};

use ansi_term::{ANSIString, ANSIStrings, Colour, Style};
use itertools::Itertools;
use tracing::debug;

use super::{
    match_headline, Command, Event, Game, GameError, KeyValueStore, LifetimeStats, Outcome,
    RoundReport, SessionState, Side, Theme,
};

const CONFETTI_COLORS: [u8; 5] = [203, 214, 42, 75, 141];

const BELL: &str = "\x07";

pub struct Console {
    color: bool,
    bell: bool,
    theme: Theme,
    prefs: Box<dyn KeyValueStore>,
}

/// Reads a line from `input`, or `None` at end of input.
fn prompt<R: BufRead>(input: &mut R, prompt: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    print!("{prompt}");
    stdout.flush()?;
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// The color palette for a theme.
struct Palette {
    win: Style,
    lose: Style,
    muted: Style,
    accent: Style,
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                win: Colour::Green.bold(),
                lose: Colour::Red.bold(),
                muted: Style::new().dimmed(),
                accent: Colour::Blue.normal(),
            },
            Theme::Dark => Palette {
                win: Colour::Fixed(84).bold(),
                lose: Colour::Fixed(210).bold(),
                muted: Colour::Fixed(245).normal(),
                accent: Colour::Fixed(117).normal(),
            },
        }
    }
}

impl Console {
    /// Creates a console, restoring the saved theme from `prefs`.
    pub fn new(color: bool, bell: bool, prefs: Box<dyn KeyValueStore>) -> Self {
        let theme = Theme::load(prefs.as_ref());
        Self {
            color,
            bell,
            theme,
            prefs,
        }
    }

    fn palette(&self) -> Palette {
        Palette::from(self.theme)
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_one(&self, s: ANSIString) -> String {
        self.format(&ANSIStrings(&[s]))
    }

    /// The result line for a round.
    fn format_round(&self, report: &RoundReport) -> String {
        let palette = self.palette();
        let round = &report.round;
        let style = match round.outcome {
            Outcome::Win => palette.win,
            Outcome::Lose => palette.lose,
            Outcome::Tie => palette.muted,
        };
        self.format(&ANSIStrings(&[
            format!("You: {}  Computer: {}  ", round.player, round.computer).into(),
            style.paint(round.headline()),
        ]))
    }

    /// The score line, with the tally that changed most recently highlighted.
    fn format_tallies(&self, tallies: &SessionState, pulse: Option<Outcome>) -> String {
        let palette = self.palette();
        let cell = |label: &str, value: u32, outcome: Outcome, style: Style| -> ANSIString<'static> {
            let text = format!("{label} {value}");
            if pulse == Some(outcome) {
                style.reverse().paint(text)
            } else {
                Style::new().paint(text)
            }
        };
        let round = format!("round {}, {}", tallies.rounds_played, tallies.policy);
        self.format(&ANSIStrings(&[
            cell("You", tallies.wins(Side::Player), Outcome::Win, palette.win),
            " · ".into(),
            cell(
                "Computer",
                tallies.wins(Side::Computer),
                Outcome::Lose,
                palette.lose,
            ),
            " · ".into(),
            cell("Ties", tallies.ties, Outcome::Tie, palette.muted),
            "  ".into(),
            palette.muted.paint(format!("({round})")),
        ]))
    }

    fn format_stats(&self, stats: &LifetimeStats) -> String {
        let rate = stats
            .win_rate()
            .map_or_else(|| "-".to_string(), |r| format!("{:.0}%", r * 100.0));
        self.format_one(self.palette().accent.paint(format!(
            "Lifetime: {} rounds, {} wins, {} losses, {} ties ({rate} won) · matches {} won, {} lost",
            stats.total_rounds(),
            stats.total_wins,
            stats.total_losses,
            stats.total_ties,
            stats.matches_won,
            stats.matches_lost,
        )))
    }

    fn format_match(&self, winner: Side, tallies: &SessionState) -> String {
        let style = match winner {
            Side::Player => self.palette().win,
            Side::Computer => self.palette().lose,
        };
        self.format_one(style.paint(match_headline(winner, tallies)))
    }

    /// A burst of colored glyphs to celebrate a won match.
    fn format_confetti(&self) -> String {
        let parts: Vec<ANSIString> = "*+x*o+*x+o*+x*o+*x+o*+x*o"
            .chars()
            .zip(CONFETTI_COLORS.iter().cycle())
            .map(|(c, &color)| Colour::Fixed(color).bold().paint(c.to_string()))
            .collect();
        self.format(&ANSIStrings(&parts))
    }

    /// The terminal bell for a round. A terminal has a single tone, so ties stay silent.
    fn chime(&self, outcome: Outcome) -> Option<&'static str> {
        (self.bell && outcome != Outcome::Tie).then_some(BELL)
    }

    fn help(&self) {
        let width = Command::help().iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let text = Command::help()
            .iter()
            .map(|(keys, what)| format!("  {keys:width$}  {what}"))
            .join("\n");
        println!("{text}");
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.theme.save(self.prefs.as_mut());
        println!("Theme: {}", self.theme);
    }

    /// Asks a yes/no question. Anything but an explicit yes is a no.
    fn confirm<R: BufRead>(&self, input: &mut R, question: &str) -> io::Result<bool> {
        let answer = prompt(input, question)?.unwrap_or_default();
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    /// Presents a game event.
    fn notify(&self, event: &Event) {
        match event {
            Event::Round(report) => {
                println!("{}", self.format_round(report));
                println!(
                    "{}",
                    self.format_tallies(&report.tallies, Some(report.round.outcome))
                );
                if let Some(tone) = self.chime(report.round.outcome) {
                    print!("{tone}");
                }
            }
            Event::Match(winner, tallies) => {
                println!("{}", self.format_match(*winner, tallies));
                if *winner == Side::Player {
                    println!("{}", self.format_confetti());
                    if self.bell {
                        print!("{BELL}");
                    }
                }
            }
            Event::Stats(stats) => println!("{}", self.format_stats(stats)),
            Event::Reset(policy) => println!("New match: {policy}"),
        }
    }
}

/// Runs the game on the console until the player quits or `input` ends.
pub fn run<R: BufRead>(
    game: &mut Game,
    console: &mut Console,
    mut input: R,
) -> anyhow::Result<()> {
    println!("Rock, paper, scissors. Type \"help\" for commands.");
    println!("Mode: {}", game.policy());
    println!("{}", console.format_stats(game.stats()));
    while let Some(line) = prompt(&mut input, "> ")? {
        if line.is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        debug!(?command, "command");
        match command {
            Command::Quit => break,
            Command::Help => console.help(),
            Command::ShowStats => {
                println!("{}", console.format_tallies(game.state(), None));
                println!("{}", console.format_stats(game.stats()));
            }
            Command::ToggleTheme => console.toggle_theme(),
            Command::ResetStats
                if !console.confirm(
                    &mut input,
                    "Reset all saved stats? This cannot be undone. [y/N] ",
                )? =>
            {
                continue
            }
            _ => (),
        }
        match game.apply(&command) {
            Ok(_) => (),
            Err(GameError::MatchOver) => {
                println!("The match is over. Type \"restart\" to play again.");
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        while let Some(event) = game.pop_event() {
            console.notify(&event);
        }
    }
    Ok(())
}
