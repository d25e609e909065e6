//! Error types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// A match must have at least one round.
    #[error("a match must be at least one round long")]
    Zero,

    /// An even-length match can end in a tie.
    #[error("best of {0} can end in a tie; use an odd number")]
    Even(u32),

    #[error("unrecognized match mode {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("match over")]
    MatchOver,

    /// Both sides reached the goal with equal round wins, which an odd-length match rules out.
    #[error("match completed with tied score {player}–{computer}")]
    TiedCompletion { player: u32, computer: u32 },
}
