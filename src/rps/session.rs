//! Match management.
//!
//! A match consists of a sequence of rounds, governed by a [`MatchPolicy`]. Under
//! [`MatchPolicy::BestOf`], the first side to win a majority of the rounds wins the match. Under
//! [`MatchPolicy::Endless`], rounds accumulate until the session is reset.

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{GameError, Outcome, PolicyError};

/// The number of rounds in a best-of match. Always a positive odd number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MatchLength(u32);

impl TryFrom<u32> for MatchLength {
    type Error = PolicyError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            0 => Err(PolicyError::Zero),
            n if n % 2 == 0 => Err(PolicyError::Even(n)),
            n => Ok(Self(n)),
        }
    }
}
impl From<MatchLength> for u32 {
    fn from(value: MatchLength) -> Self {
        value.0
    }
}

impl MatchLength {
    /// The total number of rounds that may be played.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The number of round wins needed to take the match.
    pub fn goal(self) -> u32 {
        self.0.div_ceil(2)
    }
}

/// How long a match lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// The match never completes.
    #[default]
    Endless,
    /// The match completes when either side wins a majority of the rounds.
    BestOf(MatchLength),
}
impl Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::Endless => f.write_str("endless"),
            MatchPolicy::BestOf(n) => write!(f, "best of {}", n.get()),
        }
    }
}
impl FromStr for MatchPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "endless" {
            return Ok(MatchPolicy::Endless);
        }
        let digits = ["best of ", "best-of-", "bestof", "bo"]
            .iter()
            .find_map(|prefix| lower.strip_prefix(prefix))
            .unwrap_or(&lower)
            .trim();
        let n: u32 = digits
            .parse()
            .map_err(|_| PolicyError::Unrecognized(s.to_string()))?;
        MatchPolicy::best_of(n)
    }
}

impl MatchPolicy {
    /// Creates a best-of-`n` policy.
    pub fn best_of(n: u32) -> Result<Self, PolicyError> {
        MatchLength::try_from(n).map(MatchPolicy::BestOf)
    }

    /// The number of round wins needed to take the match, if the match can complete.
    pub fn goal(self) -> Option<u32> {
        match self {
            MatchPolicy::Endless => None,
            MatchPolicy::BestOf(n) => Some(n.goal()),
        }
    }

    /// The policies offered by the front ends, in cycling order.
    pub fn presets() -> [MatchPolicy; 4] {
        [
            MatchPolicy::Endless,
            MatchPolicy::BestOf(MatchLength(3)),
            MatchPolicy::BestOf(MatchLength(5)),
            MatchPolicy::BestOf(MatchLength(7)),
        ]
    }

    /// The preset following this one, wrapping around.
    pub fn next_preset(self) -> MatchPolicy {
        let presets = Self::presets();
        let idx = presets.iter().position(|p| *p == self);
        idx.map_or(presets[0], |i| presets[(i + 1) % presets.len()])
    }
}

/// A side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Computer,
}
impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Player => "Player",
            Side::Computer => "Computer",
        })
    }
}

/// Round tallies for the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub rounds_played: u32,
    pub player_round_wins: u32,
    pub computer_round_wins: u32,
    pub ties: u32,
    pub policy: MatchPolicy,
}

impl SessionState {
    /// A fresh tally for the given policy.
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The number of rounds won by `side`.
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_round_wins,
            Side::Computer => self.computer_round_wins,
        }
    }
}

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Completed(Side),
}

/// The state machine for a single match.
#[derive(Debug, Clone)]
pub struct MatchSession {
    state: SessionState,
    status: MatchStatus,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

impl MatchSession {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            state: SessionState::new(policy),
            status: MatchStatus::InProgress,
        }
    }

    /// Returns the current tallies.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn policy(&self) -> MatchPolicy {
        self.state.policy
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, MatchStatus::Completed(_))
    }

    /// Returns the winning side, if the match is over.
    pub fn winner(&self) -> Option<Side> {
        match self.status {
            MatchStatus::Completed(side) => Some(side),
            MatchStatus::InProgress => None,
        }
    }

    /// Records the outcome of a round, and checks whether the match is over.
    ///
    /// A completed match accepts no further rounds until it is [`reset`](Self::reset).
    pub fn record_round(&mut self, outcome: Outcome) -> Result<MatchStatus, GameError> {
        if self.is_complete() {
            return Err(GameError::MatchOver);
        }
        // Tallies are committed only once the round is known to be valid.
        let mut tally = self.state;
        tally.rounds_played += 1;
        match outcome {
            Outcome::Win => tally.player_round_wins += 1,
            Outcome::Lose => tally.computer_round_wins += 1,
            Outcome::Tie => tally.ties += 1,
        }
        let status = Self::judge(&tally)?;
        self.state = tally;
        self.status = status;
        debug!(
            round = tally.rounds_played,
            %outcome,
            player = tally.player_round_wins,
            computer = tally.computer_round_wins,
            ties = tally.ties,
            "recorded round"
        );
        if let MatchStatus::Completed(winner) = status {
            info!(
                %winner,
                player = tally.player_round_wins,
                computer = tally.computer_round_wins,
                "match complete"
            );
        }
        Ok(status)
    }

    /// Decides whether `tally` ends the match.
    fn judge(tally: &SessionState) -> Result<MatchStatus, GameError> {
        let Some(goal) = tally.policy.goal() else {
            return Ok(MatchStatus::InProgress);
        };
        let (player, computer) = (tally.player_round_wins, tally.computer_round_wins);
        if player < goal && computer < goal {
            return Ok(MatchStatus::InProgress);
        }
        match player.cmp(&computer) {
            Ordering::Greater => Ok(MatchStatus::Completed(Side::Player)),
            Ordering::Less => Ok(MatchStatus::Completed(Side::Computer)),
            Ordering::Equal => Err(GameError::TiedCompletion { player, computer }),
        }
    }

    /// Discards the current match and starts a new one under `policy`.
    pub fn reset(&mut self, policy: MatchPolicy) {
        debug!(%policy, "reset match");
        *self = Self::new(policy);
    }
}
