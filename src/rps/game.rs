//! Game management.
//!
//! A [`Game`] ties together the current [`MatchSession`], the lifetime [`StatsStore`], and the
//! [`ChoiceSource`] that plays for the computer. Front ends drive it with [`Command`]s and drain
//! [`Event`]s from it to update the display.

use std::collections::VecDeque;

use delegate::delegate;
use tracing::info;

use super::{
    Choice, ChoiceSource, Command, GameError, LifetimeStats, MatchPolicy, MatchSession, Round,
    SessionState, Side, StatsStore,
};

/// Everything a front end needs to show the result of a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// The evaluated round.
    pub round: Round,
    /// Match tallies, including this round.
    pub tallies: SessionState,
    /// The match winner, if this round completed the match.
    pub completion: Option<Side>,
}

/// Summarizes a match won by `winner` with the final `tallies`, e.g. "You won the match! (3–2)".
pub fn match_headline(winner: Side, tallies: &SessionState) -> String {
    let (player, computer) = (tallies.player_round_wins, tallies.computer_round_wins);
    match winner {
        Side::Player => format!("You won the match! ({player}–{computer})"),
        Side::Computer => format!("Computer won the match. ({player}–{computer})"),
    }
}

/// A state change that front ends may want to present.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A round was played.
    Round(RoundReport),
    /// The match is over.
    Match(Side, SessionState),
    /// Lifetime stats changed.
    Stats(LifetimeStats),
    /// A new match began under the given policy.
    Reset(MatchPolicy),
}

/// A game session.
pub struct Game {
    session: MatchSession,
    stats: StatsStore,
    source: Box<dyn ChoiceSource>,
    events: VecDeque<Event>,
}

impl Game {
    pub fn new(policy: MatchPolicy, stats: StatsStore, source: Box<dyn ChoiceSource>) -> Self {
        Self {
            session: MatchSession::new(policy),
            stats,
            source,
            events: VecDeque::new(),
        }
    }

    delegate! {
        to self.session {
            pub fn policy(&self) -> MatchPolicy;
            pub fn state(&self) -> &SessionState;
            pub fn is_complete(&self) -> bool;
        }
    }

    /// Returns the lifetime stats.
    pub fn stats(&self) -> &LifetimeStats {
        self.stats.stats()
    }

    /// Pops the oldest unseen event.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Plays a round against the computer.
    pub fn play(&mut self, choice: Choice) -> Result<RoundReport, GameError> {
        if self.is_complete() {
            return Err(GameError::MatchOver);
        }
        let round = Round::new(choice, self.source.next());
        self.session.record_round(round.outcome)?;
        self.stats.record_round(round.outcome);
        let completion = self.session.winner();
        if let Some(winner) = completion {
            self.stats.record_match_result(winner == Side::Player);
        }

        let report = RoundReport {
            round,
            tallies: *self.session.state(),
            completion,
        };
        self.events.push_back(Event::Round(report.clone()));
        if let Some(winner) = completion {
            self.events.push_back(Event::Match(winner, report.tallies));
        }
        self.events.push_back(Event::Stats(*self.stats.stats()));
        Ok(report)
    }

    /// Switches to a different match policy, abandoning the current match.
    pub fn set_policy(&mut self, policy: MatchPolicy) {
        info!(%policy, "match policy changed");
        self.session.reset(policy);
        self.events.push_back(Event::Reset(policy));
    }

    /// Abandons the current match and starts another under the same policy.
    pub fn restart(&mut self) {
        let policy = self.session.policy();
        self.session.reset(policy);
        self.events.push_back(Event::Reset(policy));
    }

    /// Zeroes the lifetime stats. The current match is unaffected.
    pub fn reset_stats(&mut self) {
        info!("lifetime stats reset");
        self.stats.reset_all();
        self.events.push_back(Event::Stats(*self.stats.stats()));
    }

    /// Applies a game command. Returns `Ok(None)` for commands that don't play a round, and for
    /// commands that are handled by the front end itself.
    pub fn apply(&mut self, command: &Command) -> Result<Option<RoundReport>, GameError> {
        match command {
            Command::Play(choice) => self.play(*choice).map(Some),
            Command::SetPolicy(policy) => {
                self.set_policy(*policy);
                Ok(None)
            }
            Command::CyclePolicy => {
                self.set_policy(self.policy().next_preset());
                Ok(None)
            }
            Command::Restart => {
                self.restart();
                Ok(None)
            }
            Command::ResetStats => {
                self.reset_stats();
                Ok(None)
            }
            Command::ToggleTheme | Command::ShowStats | Command::Help | Command::Quit => Ok(None),
        }
    }
}
