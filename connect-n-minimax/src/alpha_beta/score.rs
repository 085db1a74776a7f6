use std::{cmp::Reverse, fmt::Debug};

use types::types::{Player, VictorDeterminableGame};

#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Copy)]
/// The wrapped score type. This takes into account the score provided by the score function, but
/// wraps it with a Score based on the game state. This allows us to say that wins are better than
/// any score and loses are worse than any score, without reusing integer extremes as infinities.
pub enum WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// We lost, the depth is recorded because we prefer losing as late as possible
    Lose(i64),
    /// We order this based on the score provided by the score function
    ///
    /// Draws land here too, scored as `ScoreType::default()`
    Scored(ScoreType),
    /// We won, the depth is recorded because we prefer winning sooner
    Win(Reverse<i64>),
}

impl<ScoreType> WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// Returns the best possible score
    ///
    /// This is a Win with the depth set as the minimum i64 such that no WrappedScore can be higher
    /// than this given the Ord
    pub fn best_possible_score() -> Self {
        WrappedScore::Win(Reverse(i64::MIN))
    }

    /// Returns the worst possible score
    ///
    /// This is a Lose with the depth set as the minimum i64 such that no WrappedScore can be lower
    /// than this given the Ord
    pub fn worst_possible_score() -> Self {
        WrappedScore::Lose(i64::MIN)
    }

    /// Returns the depth from this score IFF the game was decided. Otherwise returns None
    pub fn terminal_depth(&self) -> Option<i64> {
        match self {
            Self::Win(Reverse(d)) | Self::Lose(d) => Some(*d),
            Self::Scored(_) => None,
        }
    }
}

/// This trait is used to control something that can return a score from a game board
///
/// The score is always from the point of view of `you`, the player the search is deciding for.
pub trait Scorable<GameType, ScoreType> {
    /// Convert the given GameType into a ScoreType
    fn score(&self, game: &GameType, you: Player) -> ScoreType;
}

impl<GameType, ScoreType, FnLike: Fn(&GameType, Player) -> ScoreType>
    Scorable<GameType, ScoreType> for FnLike
{
    fn score(&self, game: &GameType, you: Player) -> ScoreType {
        (self)(game, you)
    }
}

/// Provides an implementation for `wrapped_score` if the implementer implements the `score`
/// function.
///
/// `wrapped_score` takes into account if the node is an end state, and depth based ordering so
/// that the underlying scoring functions don't need to worry about this
pub trait WrappedScorable<GameType, ScoreType>
where
    ScoreType: PartialOrd + Ord + Copy + Debug + Default,
    GameType: VictorDeterminableGame,
{
    /// This is the scoring function for non terminal nodes at the ply limit
    fn score(&self, node: &GameType, you: Player) -> ScoreType;

    /// `wrapped_score` checks the game board and decides if this is a leaf in our Minimax tree.
    /// If it IS a leaf we score it based on the outcome of the game board. If we've hit the
    /// ply limit, we use the scoring function provided by `score`
    fn wrapped_score(
        &self,
        node: &GameType,
        you: Player,
        depth: i64,
        max_depth: i64,
    ) -> Option<WrappedScore<ScoreType>> {
        if node.is_over() {
            let score = match node.get_winner() {
                Some(winner) if winner == you => WrappedScore::Win(Reverse(depth)),
                Some(_) => WrappedScore::Lose(depth),
                None => WrappedScore::Scored(ScoreType::default()),
            };

            return Some(score);
        }

        if depth >= max_depth {
            return Some(WrappedScore::Scored(self.score(node, you)));
        }

        None
    }
}
