//! Lifetime statistics, persisted across sessions.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{KeyValueStore, Outcome, StoreError};

/// The key under which lifetime statistics are stored.
pub const STATS_KEY: &str = "rps_pro_stats";

/// Counters aggregated over every round and match ever played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifetimeStats {
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_ties: u64,
    pub matches_won: u64,
    pub matches_lost: u64,
}

impl LifetimeStats {
    /// The total number of rounds played.
    pub fn total_rounds(&self) -> u64 {
        self.total_wins
            .saturating_add(self.total_losses)
            .saturating_add(self.total_ties)
    }

    /// The fraction of decided rounds won by the player, if any were decided.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.total_wins.saturating_add(self.total_losses);
        (decided > 0).then(|| self.total_wins as f64 / decided as f64)
    }
}

/// Owns the [`LifetimeStats`], writing them through to a [`KeyValueStore`] after every change.
pub struct StatsStore {
    store: Box<dyn KeyValueStore>,
    stats: LifetimeStats,
}

impl StatsStore {
    /// Opens the stats held in `store`.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let mut this = Self {
            store,
            stats: LifetimeStats::default(),
        };
        this.stats = this.load();
        this
    }

    /// Returns the current stats.
    pub fn stats(&self) -> &LifetimeStats {
        &self.stats
    }

    /// Reads the persisted stats.
    ///
    /// Missing or unreadable data is not an error: it yields all-zero stats, so that a damaged
    /// store never prevents play.
    pub fn load(&self) -> LifetimeStats {
        let raw = match self.store.get(STATS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved stats");
                return LifetimeStats::default();
            }
            Err(err) => {
                warn!(%err, "failed to read stats");
                return LifetimeStats::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(%err, "discarding corrupt stats");
            LifetimeStats::default()
        })
    }

    /// Counts a round. Counters stop at `u64::MAX`.
    pub fn record_round(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Win => &mut self.stats.total_wins,
            Outcome::Lose => &mut self.stats.total_losses,
            Outcome::Tie => &mut self.stats.total_ties,
        };
        *counter = counter.saturating_add(1);
        self.save();
    }

    /// Counts a completed match.
    pub fn record_match_result(&mut self, won: bool) {
        let counter = if won {
            &mut self.stats.matches_won
        } else {
            &mut self.stats.matches_lost
        };
        *counter = counter.saturating_add(1);
        self.save();
    }

    /// Zeroes every counter. This cannot be undone.
    pub fn reset_all(&mut self) {
        self.stats = LifetimeStats::default();
        self.save();
    }

    /// Writes the current stats through to the store. Failures are logged, not returned.
    fn save(&mut self) {
        let result = serde_json::to_string(&self.stats)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(STATS_KEY, &raw));
        if let Err(err) = result {
            warn!(%err, "failed to save stats");
        }
    }
}

#[cfg(test)]
mod test {
    use maplit::hashmap;

    use super::*;
    use crate::rps::MemoryStore;

    fn store_with(raw: &str) -> Box<dyn KeyValueStore> {
        Box::new(MemoryStore::from(hashmap! {
            STATS_KEY.to_string() => raw.to_string(),
        }))
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("broken").into())
        }

        fn set(&mut self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("broken").into())
        }
    }

    #[test]
    fn missing_is_zero() {
        let stats = StatsStore::open(Box::<MemoryStore>::default());
        assert_eq!(*stats.stats(), LifetimeStats::default());
    }

    #[test]
    fn corrupt_is_zero() {
        for raw in ["", "{", "null", "\"text\"", "{\"totalWins\":-1}", "not json"] {
            let stats = StatsStore::open(store_with(raw));
            assert_eq!(*stats.stats(), LifetimeStats::default(), "{raw:?}");
        }
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let stats = StatsStore::open(store_with("{\"totalWins\":4,\"matchesWon\":1,\"extra\":true}"));
        assert_eq!(
            *stats.stats(),
            LifetimeStats {
                total_wins: 4,
                matches_won: 1,
                ..LifetimeStats::default()
            }
        );
    }

    #[test]
    fn wire_format() {
        let stats = LifetimeStats {
            total_wins: 1,
            total_losses: 2,
            total_ties: 3,
            matches_won: 4,
            matches_lost: 5,
        };
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            "{\"totalWins\":1,\"totalLosses\":2,\"totalTies\":3,\"matchesWon\":4,\"matchesLost\":5}"
        );
    }

    #[test]
    fn every_change_is_persisted() {
        let mut stats = StatsStore::open(Box::<MemoryStore>::default());
        stats.record_round(Outcome::Win);
        stats.record_round(Outcome::Win);
        stats.record_round(Outcome::Lose);
        stats.record_round(Outcome::Tie);
        stats.record_match_result(true);
        stats.record_match_result(false);
        let expected = LifetimeStats {
            total_wins: 2,
            total_losses: 1,
            total_ties: 1,
            matches_won: 1,
            matches_lost: 1,
        };
        assert_eq!(*stats.stats(), expected);
        assert_eq!(stats.load(), expected);
        assert_eq!(expected.total_rounds(), 4);
    }

    #[test]
    fn reset_all_then_load() {
        let mut stats = StatsStore::open(store_with("{\"totalWins\":9,\"matchesLost\":3}"));
        assert_eq!(stats.stats().total_wins, 9);
        stats.reset_all();
        assert_eq!(*stats.stats(), LifetimeStats::default());
        assert_eq!(stats.load(), LifetimeStats::default());
    }

    #[test]
    fn broken_store_does_not_block_play() {
        let mut stats = StatsStore::open(Box::new(BrokenStore));
        assert_eq!(*stats.stats(), LifetimeStats::default());
        stats.record_round(Outcome::Win);
        stats.record_match_result(true);
        assert_eq!(stats.stats().total_wins, 1);
        assert_eq!(stats.stats().matches_won, 1);
    }

    #[test]
    fn saturated_counters_stay_put() {
        let mut stats = StatsStore::open(store_with(
            "{\"totalWins\":18446744073709551615,\"totalTies\":1,\"matchesWon\":18446744073709551615}",
        ));
        assert_eq!(stats.stats().total_wins, u64::MAX);
        stats.record_round(Outcome::Win);
        stats.record_match_result(true);
        stats.record_round(Outcome::Lose);
        assert_eq!(stats.stats().total_wins, u64::MAX);
        assert_eq!(stats.stats().matches_won, u64::MAX);
        assert_eq!(stats.stats().total_losses, 1);
        assert_eq!(stats.stats().total_rounds(), u64::MAX);
        assert_eq!(stats.load(), *stats.stats());

        let rate = stats.stats().win_rate().unwrap();
        assert!(rate > 0.99 && rate <= 1.0);
    }

    #[test]
    fn win_rate() {
        assert_eq!(LifetimeStats::default().win_rate(), None);
        let stats = LifetimeStats {
            total_wins: 3,
            total_losses: 1,
            total_ties: 10,
            ..LifetimeStats::default()
        };
        assert_eq!(stats.win_rate(), Some(0.75));
    }
}
