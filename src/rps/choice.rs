//! The three throws.

use std::{convert::TryFrom, fmt::Display, str::FromStr};

use rand::distributions::{Distribution, Standard};
use serde::{Deserialize, Serialize};

/// A hand shape thrown in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}
impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        })
    }
}
impl Distribution<Choice> for Standard {
    fn sample<R: rand::prelude::Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        match rng.gen_range(0..=2) {
            0 => Choice::Rock,
            1 => Choice::Paper,
            2 => Choice::Scissors,
            _ => unreachable!(),
        }
    }
}

impl TryFrom<char> for Choice {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'R' | 'r' => Choice::Rock,
            'P' | 'p' => Choice::Paper,
            'S' | 's' => Choice::Scissors,
            _ => return Err(()),
        })
    }
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Choice::try_from(c),
            _ => match s.to_ascii_lowercase().as_str() {
                "rock" => Ok(Choice::Rock),
                "paper" => Ok(Choice::Paper),
                "scissors" => Ok(Choice::Scissors),
                _ => Err(()),
            },
        }
    }
}

impl Choice {
    /// All possible choices.
    pub fn all_choices() -> &'static [Choice; 3] {
        static CHOICES: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];
        &CHOICES
    }

    /// The choice that this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    /// The choice that defeats this one.
    pub fn beaten_by(self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }

    /// The verb used when this choice wins, e.g. "crushes" for rock.
    pub fn verb(self) -> &'static str {
        match self {
            Choice::Rock => "crushes",
            Choice::Paper => "covers",
            Choice::Scissors => "cuts",
        }
    }

    /// Returns the keyboard shortcut for this choice.
    pub fn to_abbr(self) -> char {
        match self {
            Choice::Rock => 'r',
            Choice::Paper => 'p',
            Choice::Scissors => 's',
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn win_relation_is_a_three_cycle() {
        for &c in Choice::all_choices() {
            assert_ne!(c.beats(), c);
            assert_eq!(c.beats().beats().beats(), c);
            assert_eq!(c.beaten_by().beats(), c);
            assert_eq!(c.beats().beaten_by(), c);
        }
        let losers: HashSet<_> = Choice::all_choices().iter().map(|c| c.beats()).collect();
        assert_eq!(losers.len(), 3);
    }

    #[test]
    fn rock_scissors_paper_cycle() {
        assert_eq!(Choice::Rock.beats(), Choice::Scissors);
        assert_eq!(Choice::Scissors.beats(), Choice::Paper);
        assert_eq!(Choice::Paper.beats(), Choice::Rock);
    }

    #[test]
    fn parse() {
        assert_eq!("r".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!("P".parse::<Choice>(), Ok(Choice::Paper));
        assert_eq!("Scissors".parse::<Choice>(), Ok(Choice::Scissors));
        assert_eq!("ROCK".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!("x".parse::<Choice>(), Err(()));
        assert_eq!("rocks".parse::<Choice>(), Err(()));
        assert_eq!("".parse::<Choice>(), Err(()));
        for &c in Choice::all_choices() {
            assert_eq!(Choice::try_from(c.to_abbr()), Ok(c));
        }
    }

    #[test]
    fn sampling_covers_every_choice() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<Choice> = (0..200).map(|_| rng.gen()).collect();
        assert_eq!(seen.len(), 3);
    }
}
