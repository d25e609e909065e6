//! Round evaluation.
//!
//! A round compares one player [`Choice`] against one computer [`Choice`]. The result is an
//! [`Outcome`] relative to the player, along with a short reason suitable for display.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Choice;

/// The result of a round, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Tie => "tie",
        })
    }
}

/// A fully evaluated round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
    pub reason: String,
}

impl Round {
    /// Evaluates a round between the player and the computer.
    pub fn new(player: Choice, computer: Choice) -> Self {
        let (outcome, reason) = evaluate(player, computer);
        Self {
            player,
            computer,
            outcome,
            reason,
        }
    }

    /// The headline shown for this round, e.g. "You win — Rock crushes Scissors".
    pub fn headline(&self) -> String {
        match self.outcome {
            Outcome::Tie => format!("It's a tie — {}.", self.reason),
            Outcome::Win => format!("You win — {}", self.reason),
            Outcome::Lose => format!("You lose — {}", self.reason),
        }
    }
}

/// Determines the outcome of `player` against `computer`, and a reason for it.
pub fn evaluate(player: Choice, computer: Choice) -> (Outcome, String) {
    if player == computer {
        (Outcome::Tie, format!("both chose {player}"))
    } else if player.beats() == computer {
        (Outcome::Win, reason(player, computer))
    } else {
        (Outcome::Lose, reason(computer, player))
    }
}

fn reason(winner: Choice, loser: Choice) -> String {
    format!("{winner} {} {loser}", winner.verb())
}
