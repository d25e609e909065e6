//! Where the computer's choices come from.

use std::collections::VecDeque;
use std::iter::FromIterator;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Choice;

/// A strategy that supplies the computer's choice for each round.
pub trait ChoiceSource {
    /// Returns the computer's choice for the next round.
    fn next(&mut self) -> Choice;
}

/// Uniformly random choices, drawn independently for each round.
#[derive(Debug, Clone)]
pub struct RandomSource<R> {
    rng: R,
}

impl Default for RandomSource<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl RandomSource<StdRng> {
    /// Creates a reproducible source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ChoiceSource for RandomSource<R> {
    fn next(&mut self) -> Choice {
        self.rng.gen()
    }
}

/// A fixed sequence of choices, replayed in order.
///
/// Once the script runs out, the sequence starts over from the beginning. An empty script always
/// returns [`Choice::Rock`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Vec<Choice>,
    queue: VecDeque<Choice>,
}

impl FromIterator<Choice> for ScriptedSource {
    fn from_iter<T: IntoIterator<Item = Choice>>(iter: T) -> Self {
        let script: Vec<_> = iter.into_iter().collect();
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }
}

impl ChoiceSource for ScriptedSource {
    fn next(&mut self) -> Choice {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(Choice::Rock)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        let xs: Vec<_> = (0..32).map(|_| a.next()).collect();
        let ys: Vec<_> = (0..32).map(|_| b.next()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut source = [Choice::Paper, Choice::Scissors, Choice::Rock]
            .into_iter()
            .collect::<ScriptedSource>();
        let picks: Vec<_> = (0..5).map(|_| source.next()).collect();
        assert_eq!(
            picks,
            [
                Choice::Paper,
                Choice::Scissors,
                Choice::Rock,
                Choice::Paper,
                Choice::Scissors
            ]
        );
    }

    #[test]
    fn empty_script() {
        let mut source = ScriptedSource::default();
        assert_eq!(source.next(), Choice::Rock);
    }
}
