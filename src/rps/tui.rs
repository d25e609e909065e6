//! Rich terminal UI.

use std::io::{self, stdout, Stdout};

use ratatui::crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Row, Table};
use tracing::warn;

use super::{
    match_headline, Choice, Event, Game, GameError, KeyValueStore, LifetimeStats, MatchPolicy,
    Outcome, RoundReport, Side, Theme,
};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal for the TUI.
pub fn tui_init() -> io::Result<Term> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restores the original terminal mode.
pub fn tui_restore() -> io::Result<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Colors for the current theme.
struct Palette {
    fg: Color,
    bg: Color,
    win: Color,
    lose: Color,
    muted: Color,
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                win: Color::Green,
                lose: Color::Red,
                muted: Color::DarkGray,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                win: Color::LightGreen,
                lose: Color::LightRed,
                muted: Color::Gray,
            },
        }
    }
}

/// Modal interface state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Waiting for the player's throw.
    Play,
    /// Asking the player to confirm erasing lifetime stats.
    ConfirmReset,
}

/// Terminal UI state.
pub struct Tui {
    mode: Mode,
    game: Game,
    prefs: Box<dyn KeyValueStore>,
    theme: Theme,
    /// The most recent round, and the match result it produced.
    last: Option<RoundReport>,
    /// A status message to display to the user.
    message: Option<Line<'static>>,
    /// Set to true to exit the main loop.
    exit: bool,
}

impl Tui {
    pub fn new(game: Game, prefs: Box<dyn KeyValueStore>) -> Self {
        let theme = Theme::load(prefs.as_ref());
        Self {
            mode: Mode::Play,
            game,
            prefs,
            theme,
            last: None,
            message: None,
            exit: false,
        }
    }

    /// Runs the terminal UI until the user exits.
    pub fn run(mut self, mut terminal: Term) -> anyhow::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    // Top-level frame renderer.
    fn render_frame(&self, frame: &mut Frame) {
        let palette = Palette::from(self.theme);
        let base = Style::default().fg(palette.fg).bg(palette.bg);
        frame.render_widget(Block::default().style(base), frame.area());

        let [score, result, stats, help] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .areas(frame.area());
        frame.render_widget(self.scoreboard(&palette), score);
        frame.render_widget(self.result(&palette), result);
        frame.render_widget(stats_widget(self.game.stats(), &palette), stats);

        let footer = match (&self.message, self.mode) {
            (_, Mode::ConfirmReset) => {
                Line::from("Reset all saved stats? This cannot be undone. [y/N]")
                    .fg(palette.lose)
                    .bold()
            }
            (Some(message), _) => message.clone(),
            (None, _) => Line::from(
                "[r]ock [p]aper [s]cissors · [m]ode [n]ew match · [x] reset stats · [t]heme · [q]uit",
            )
            .fg(palette.muted),
        };
        frame.render_widget(Paragraph::new(footer), help);
    }

    /// Round tallies, with the tally that changed last highlighted.
    fn scoreboard(&self, palette: &Palette) -> Table<'static> {
        let tallies = self.game.state();
        let pulse = self.last.as_ref().map(|r| r.round.outcome);
        let cell = |value: u32, outcome: Outcome, color: Color| {
            let text = Text::from(value.to_string());
            if pulse == Some(outcome) {
                text.fg(color).bold().reversed()
            } else {
                text.fg(color)
            }
        };
        Table::new(
            [Row::new([
                cell(tallies.wins(Side::Player), Outcome::Win, palette.win),
                cell(tallies.wins(Side::Computer), Outcome::Lose, palette.lose),
                cell(tallies.ties, Outcome::Tie, palette.muted),
            ])],
            [Constraint::Length(10); 3],
        )
        .header(Row::new(["You", "Computer", "Ties"]))
        .block(Block::bordered().title(format!(
            " {} · round {} ",
            tallies.policy, tallies.rounds_played
        )))
    }

    /// The last round's choices and result.
    fn result(&self, palette: &Palette) -> Paragraph<'static> {
        let block = Block::bordered().title(" Result ");
        let Some(report) = &self.last else {
            return Paragraph::new("Make your choice.").block(block);
        };
        let round = &report.round;
        let color = match round.outcome {
            Outcome::Win => palette.win,
            Outcome::Lose => palette.lose,
            Outcome::Tie => palette.muted,
        };
        let mut lines = vec![
            Line::from(format!("You: {}   Computer: {}", round.player, round.computer)),
            Line::from(round.headline()).fg(color).bold(),
        ];
        if let Some(winner) = report.completion {
            let color = if winner == Side::Player {
                palette.win
            } else {
                palette.lose
            };
            let mut line = Line::from(match_headline(winner, &report.tallies))
                .fg(color)
                .bold();
            if winner == Side::Player {
                line.push_span(Span::from("  ✦ ✧ ✦ ✧ ✦").fg(Color::Yellow));
            }
            lines.push(line);
        }
        Paragraph::new(lines).block(block)
    }

    /// Top-level event handler.
    fn handle_events(&mut self) -> io::Result<()> {
        if let event::Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        // Messages only persist for one refresh cycle.
        self.message = None;

        match (self.mode, code) {
            (Mode::ConfirmReset, KeyCode::Char('y' | 'Y')) => {
                self.game.reset_stats();
                self.mode = Mode::Play;
            }
            (Mode::ConfirmReset, _) => self.mode = Mode::Play,

            (Mode::Play, KeyCode::Char('q') | KeyCode::Esc) => self.exit = true,
            (Mode::Play, KeyCode::Char('m')) => {
                let policy = self.game.policy().next_preset();
                self.set_policy(policy);
            }
            (Mode::Play, KeyCode::Char('n')) => {
                self.game.restart();
                self.last = None;
            }
            (Mode::Play, KeyCode::Char('x')) => self.mode = Mode::ConfirmReset,
            (Mode::Play, KeyCode::Char('t')) => {
                self.theme = self.theme.toggle();
                self.theme.save(self.prefs.as_mut());
            }
            (Mode::Play, KeyCode::Char(c)) => {
                if let Ok(choice) = Choice::try_from(c) {
                    self.play(choice);
                }
            }
            _ => (),
        }

        // Everything worth showing is read straight from the game state.
        while let Some(event) = self.game.pop_event() {
            if let Event::Reset(policy) = event {
                self.message = Some(Line::from(format!("New match: {policy}")));
            }
        }
    }

    fn set_policy(&mut self, policy: MatchPolicy) {
        self.game.set_policy(policy);
        self.last = None;
    }

    fn play(&mut self, choice: Choice) {
        match self.game.play(choice) {
            Ok(report) => self.last = Some(report),
            Err(GameError::MatchOver) => {
                self.message = Some(Line::from("The match is over. Press [n] for a new match."));
            }
            Err(err) => {
                warn!(%err, "round rejected");
                self.message = Some(Line::from(err.to_string()).red().bold());
            }
        }
    }
}

fn stats_widget(stats: &LifetimeStats, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(format!(
            "Rounds: {} played, {} won, {} lost, {} tied",
            stats.total_rounds(),
            stats.total_wins,
            stats.total_losses,
            stats.total_ties
        )),
        Line::from(format!(
            "Matches: {} won, {} lost",
            stats.matches_won, stats.matches_lost
        ))
        .fg(palette.muted),
    ])
    .block(Block::bordered().title(" Lifetime "))
}
