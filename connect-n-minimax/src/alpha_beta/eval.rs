use std::{fmt::Debug, marker::PhantomData, time::Duration};

use derivative::Derivative;
use tracing::{debug, info, info_span, warn};
use types::types::{
    GridQueryableGame, Player, PlayerToMoveGame, ReversibleGame, VictorDeterminableGame,
};

use super::{
    clock::{Clock, Deadline, SystemClock},
    score::Scorable,
    MinMaxReturn, WrappedScorable, WrappedScore,
};

/// What happens to the ply limit between two calls to [AlphaBetaPlayer::decide]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlyRamp {
    /// Keep the limit where the previous decision left it
    #[default]
    CarryForward,
    /// Start every decision again from [EngineOptions::initial_ply_limit]
    Reset,
}

/// Whether subtrees that can not change the result are skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// Stop looking at a node's columns once `alpha > beta`
    #[default]
    AlphaBeta,
    /// Plain minimax, every column of every node is searched
    FullWidth,
}

#[derive(Debug, Clone, Copy)]
/// Optional properties that can be defined for an [AlphaBetaPlayer]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use connect_n_minimax::alpha_beta::{EngineOptions, PlyRamp, Pruning};
///
/// let defaults: EngineOptions = Default::default();
///
/// assert_eq!(defaults.initial_ply_limit, 2);
/// assert_eq!(defaults.ply_ramp, PlyRamp::CarryForward);
/// assert_eq!(defaults.pruning, Pruning::AlphaBeta);
/// assert!(!defaults.record_tree);
/// ```
pub struct EngineOptions {
    /// The ply limit of the first iteration of a fresh player
    ///
    /// Values below 1 are treated as 1
    pub initial_ply_limit: usize,
    /// How the ply limit carries over between decisions
    pub ply_ramp: PlyRamp,
    /// How the tree is searched
    pub pruning: Pruning,
    /// Keep every searched subtree in the returned [MinMaxReturn] instead of only the scores of
    /// the root's children. Only useful for debugging, it gets big fast
    pub record_tree: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            initial_ply_limit: 2,
            ply_ramp: PlyRamp::default(),
            pruning: Pruning::default(),
            record_tree: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// This type is used to represent that the deadline passed while we were searching, so we
/// returned out of the current context
pub struct AbortedEarly;

/// Where the column of a [Decision] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// The best column of the deepest iteration that searched every root column
    CompletedIteration,
    /// No iteration completed, this is the best of the root columns that were fully searched
    /// before time ran out
    PartialIteration,
    /// Nothing was searched in time, this is the lowest open column
    FirstLegalColumn,
}

/// The result of [AlphaBetaPlayer::decide_with_stats]
#[derive(Debug, Clone)]
pub struct Decision<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// The column to play
    pub column: usize,
    /// The score the column was chosen with, `None` for [DecisionSource::FirstLegalColumn]
    pub score: Option<WrappedScore<ScoreType>>,
    /// The ply limit of the deepest completed iteration
    pub depth: Option<usize>,
    /// How many iterations searched every root column
    pub completed_iterations: usize,
    #[allow(missing_docs)]
    pub source: DecisionSource,
    /// Time spent deciding, according to the player's clock
    pub elapsed: Duration,
    /// The root of the deepest completed iteration
    pub tree: Option<MinMaxReturn<ScoreType>>,
}

impl<ScoreType> Decision<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Whether time ran out before a single iteration completed
    pub fn used_fallback(&self) -> bool {
        self.source != DecisionSource::CompletedIteration
    }
}

enum Iteration<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    Completed(MinMaxReturn<ScoreType>),
    Aborted {
        /// Best fully searched root column so far
        partial: Option<(usize, WrappedScore<ScoreType>)>,
    },
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "ClockType: Debug"))]
/// This is the struct that wraps a scoring function and can be used to run minimax
///
/// It keeps the ply limit between decisions, see [PlyRamp]. It also outputs traces using the
/// [tracing] crate.
pub struct AlphaBetaPlayer<ScoreType, ScorableType, ClockType = SystemClock> {
    /// Shows up in the traces
    pub name: &'static str,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: EngineOptions,
    clock: ClockType,
    ply_limit: usize,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<ScoreType>,
}

impl<GameType, ScoreType, ScorableType, ClockType> WrappedScorable<GameType, ScoreType>
    for AlphaBetaPlayer<ScoreType, ScorableType, ClockType>
where
    GameType: VictorDeterminableGame,
    ScoreType: Debug + PartialOrd + Ord + Copy + Default,
    ScorableType: Scorable<GameType, ScoreType>,
{
    fn score(&self, node: &GameType, you: Player) -> ScoreType {
        self.score_function.score(node, you)
    }
}

impl<ScoreType, ScorableType> AlphaBetaPlayer<ScoreType, ScorableType, SystemClock>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy + Default,
{
    /// Construct a new `AlphaBetaPlayer` that plays against the real clock
    ///
    /// [EngineOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    ///
    /// ```rust
    /// use connect_n_minimax::alpha_beta::{AlphaBetaPlayer, EngineOptions, PlyRamp};
    /// use types::{Board, Player};
    ///
    /// // Anything that turns a board into an `Ord` can be used to score the leaves
    /// fn score_function(_board: &Board, _you: Player) -> i64 { 4 }
    ///
    /// let options = EngineOptions {
    ///     ply_ramp: PlyRamp::Reset,
    ///     ..Default::default()
    /// };
    ///
    /// let player: AlphaBetaPlayer<i64, _> = AlphaBetaPlayer::new(score_function, "constant", options);
    /// assert_eq!(player.ply_limit(), 2);
    /// ```
    pub fn new(score_function: ScorableType, name: &'static str, options: EngineOptions) -> Self {
        Self::with_clock(score_function, name, options, SystemClock)
    }
}

impl<ScoreType, ScorableType, ClockType> AlphaBetaPlayer<ScoreType, ScorableType, ClockType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy + Default,
    ClockType: Clock,
{
    /// Construct a new `AlphaBetaPlayer` that measures its time budget with the given clock
    pub fn with_clock(
        score_function: ScorableType,
        name: &'static str,
        options: EngineOptions,
        clock: ClockType,
    ) -> Self {
        Self {
            name,
            score_function,
            ply_limit: options.initial_ply_limit.max(1),
            options,
            clock,
            _phantom: PhantomData,
        }
    }

    /// The ply limit the next iteration will start from
    pub fn ply_limit(&self) -> usize {
        self.ply_limit
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The clock the time budget is measured with
    pub fn clock(&self) -> &ClockType {
        &self.clock
    }

    /// Pick the column to play
    ///
    /// This uses [AlphaBetaPlayer::decide_with_stats()] to run iterative deepening until we run
    /// out of time. For more information on the inner workings see the docs there.
    pub fn decide<GameType>(&mut self, board: &mut GameType, time_budget: Duration) -> usize
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        self.decide_with_stats(board, time_budget).column
    }

    /// This does an iterative deepening minimax until the time budget runs out. The first
    /// iteration searches to the current [AlphaBetaPlayer::ply_limit()], every iteration that
    /// completes with time to spare raises the limit by one and searches again from the root.
    ///
    /// The deadline is polled at every node. When it passes mid iteration the search unwinds,
    /// the ply limit is lowered by one (never below 1) and we answer with the deepest completed
    /// iteration. If none completed we take the best root column that was fully searched, and
    /// if there is none of those either the lowest open column.
    ///
    /// Deepening stops early once the root score is a proven win or loss, or once the ply limit
    /// reaches every empty cell on the board.
    ///
    /// The board is handed back exactly as it was passed in.
    ///
    /// # Panics
    ///
    /// If the game is already over, there is no move to decide on.
    pub fn decide_with_stats<GameType>(
        &mut self,
        board: &mut GameType,
        time_budget: Duration,
    ) -> Decision<ScoreType>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        assert!(!board.is_over(), "decide called on a game that is over");
        let Some(first_legal_column) = (0..board.columns()).find(|&c| !board.is_full(c)) else {
            panic!("decide called on a board without an open column");
        };

        if self.options.ply_ramp == PlyRamp::Reset {
            self.ply_limit = self.options.initial_ply_limit.max(1);
        }

        let you = board.player_to_move();

        info_span!(
            "deepened_minimax",
            player_name = self.name,
            player = %you,
            budget = ?time_budget,
            chosen_column = tracing::field::Empty,
            score = tracing::field::Empty,
            depth = tracing::field::Empty,
        )
        .in_scope(|| {
            let deadline = Deadline::start(&self.clock, time_budget);

            let mut completed: Option<(usize, MinMaxReturn<ScoreType>)> = None;
            let mut completed_iterations = 0;
            let mut partial = None;

            loop {
                let ply_limit = self.ply_limit;

                let result = match self.root_iteration(board, you, ply_limit, Some(&deadline)) {
                    Iteration::Completed(result) => result,
                    Iteration::Aborted { partial: best } => {
                        self.ply_limit = ply_limit.saturating_sub(1).max(1);
                        warn!(
                            ply_limit,
                            next_ply_limit = self.ply_limit,
                            "Ran out of time mid iteration"
                        );

                        partial = best;
                        break;
                    }
                };

                completed_iterations += 1;
                debug!(
                    ply_limit,
                    column = ?result.best_column(),
                    score = ?result.score(),
                    "Completed iteration"
                );

                let decided = result.score().terminal_depth().is_some();
                completed = Some((ply_limit, result));

                if decided {
                    info!(ply_limit, "This game is decided, no need to keep going");
                    break;
                }
                if ply_limit >= board.empty_cells() {
                    info!(ply_limit, "We can see the end of the game, no need to keep going");
                    break;
                }
                if deadline.expired(&self.clock) {
                    break;
                }

                self.ply_limit = ply_limit + 1;
            }

            let elapsed = deadline.elapsed(&self.clock);
            let decision = match (completed, partial) {
                (Some((depth, tree)), _) => Decision {
                    column: tree.best_column().unwrap_or(first_legal_column),
                    score: Some(*tree.score()),
                    depth: Some(depth),
                    completed_iterations,
                    source: DecisionSource::CompletedIteration,
                    elapsed,
                    tree: Some(tree),
                },
                (None, Some((column, score))) => {
                    warn!(column, "No iteration completed, using the partial iteration");

                    Decision {
                        column,
                        score: Some(score),
                        depth: None,
                        completed_iterations,
                        source: DecisionSource::PartialIteration,
                        elapsed,
                        tree: None,
                    }
                }
                (None, None) => {
                    warn!(
                        column = first_legal_column,
                        "Nothing was searched in time, playing the first legal column"
                    );

                    Decision {
                        column: first_legal_column,
                        score: None,
                        depth: None,
                        completed_iterations,
                        source: DecisionSource::FirstLegalColumn,
                        elapsed,
                        tree: None,
                    }
                }
            };

            let current_span = tracing::Span::current();
            current_span.record("chosen_column", decision.column);
            if let Some(score) = &decision.score {
                current_span.record("score", format!("{:?}", score).as_str());
            }
            if let Some(depth) = decision.depth {
                current_span.record("depth", depth);
            }
            info!(
                column = decision.column,
                completed_iterations,
                elapsed = ?decision.elapsed,
                source = ?decision.source,
                "Decided"
            );

            decision
        })
    }

    /// This runs the minimax algorithm to the specified ply limit, returning a struct that
    /// contains all the information about the 'tree' we searched.
    ///
    /// There is no deadline and the carried ply limit is left alone. This is also used as a
    /// benchmark entry point
    pub fn single_minimax<GameType>(
        &self,
        board: &mut GameType,
        ply_limit: usize,
    ) -> MinMaxReturn<ScoreType>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        let you = board.player_to_move();

        self.unbounded_iteration(board, you, ply_limit.max(1))
    }

    /// This will do an iterative deepening minimax until the specified ply limit, without a
    /// deadline. This is currently used mostly for debugging and benchmarking
    ///
    /// It starts from [EngineOptions::initial_ply_limit] and stops early under the same
    /// conditions as [AlphaBetaPlayer::decide_with_stats()].
    pub fn deepened_minimax_to_depth<GameType>(
        &self,
        board: &mut GameType,
        max_ply_limit: usize,
    ) -> MinMaxReturn<ScoreType>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        let you = board.player_to_move();
        let max_ply_limit = max_ply_limit.max(1);

        let mut ply_limit = self.options.initial_ply_limit.clamp(1, max_ply_limit);
        loop {
            let result = self.unbounded_iteration(board, you, ply_limit);

            if ply_limit >= max_ply_limit
                || ply_limit >= board.empty_cells()
                || result.score().terminal_depth().is_some()
            {
                return result;
            }

            ply_limit += 1;
        }
    }

    fn unbounded_iteration<GameType>(
        &self,
        board: &mut GameType,
        you: Player,
        ply_limit: usize,
    ) -> MinMaxReturn<ScoreType>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        match self.root_iteration(board, you, ply_limit, None) {
            Iteration::Completed(result) => result,
            Iteration::Aborted { .. } => unreachable!("searches without a deadline never abort"),
        }
    }

    /// Search every open root column, keeping the first column with the strictly highest score
    fn root_iteration<GameType>(
        &self,
        board: &mut GameType,
        you: Player,
        ply_limit: usize,
        deadline: Option<&Deadline>,
    ) -> Iteration<ScoreType>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        if let Some(score) = self.wrapped_score(&*board, you, 0, ply_limit as i64) {
            return Iteration::Completed(MinMaxReturn::Leaf { score });
        }

        let mut alpha = WrappedScore::<ScoreType>::worst_possible_score();
        let beta = WrappedScore::<ScoreType>::best_possible_score();

        let mut best: Option<(usize, WrappedScore<ScoreType>)> = None;
        let mut options = Vec::with_capacity(board.columns());

        for column in 0..board.columns() {
            if board.is_full(column) {
                continue;
            }

            board.apply_move(column);
            let result = self.minimax(board, you, 1, alpha, beta, ply_limit, deadline);
            board.undo_move();

            let Ok(result) = result else {
                return Iteration::Aborted { partial: best };
            };

            let value = *result.score();
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((column, value));
            }
            alpha = std::cmp::max(alpha, value);

            options.push((column, self.keep_subtree(result)));
        }

        let (chosen_column, score) = best.expect("a game that is not over has an open column");

        Iteration::Completed(MinMaxReturn::Node {
            is_maximizing: true,
            options,
            moving_player: you,
            chosen_column,
            score,
            alpha_beta_cutoff: false,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax<GameType>(
        &self,
        board: &mut GameType,
        you: Player,
        ply: usize,
        mut alpha: WrappedScore<ScoreType>,
        mut beta: WrappedScore<ScoreType>,
        ply_limit: usize,
        deadline: Option<&Deadline>,
    ) -> Result<MinMaxReturn<ScoreType>, AbortedEarly>
    where
        GameType:
            GridQueryableGame + PlayerToMoveGame + ReversibleGame + VictorDeterminableGame,
        ScorableType: Scorable<GameType, ScoreType>,
    {
        if let Some(deadline) = deadline {
            if deadline.expired(&self.clock) {
                return Err(AbortedEarly);
            }
        }

        if let Some(score) = self.wrapped_score(&*board, you, ply as i64, ply_limit as i64) {
            return Ok(MinMaxReturn::Leaf { score });
        }

        let moving_player = board.player_to_move();
        let is_maximizing = moving_player == you;

        let mut best: Option<(usize, WrappedScore<ScoreType>)> = None;
        let mut options = Vec::with_capacity(board.columns());
        let mut alpha_beta_cutoff = false;

        for column in 0..board.columns() {
            if board.is_full(column) {
                continue;
            }

            board.apply_move(column);
            let result = self.minimax(board, you, ply + 1, alpha, beta, ply_limit, deadline);
            board.undo_move();
            let result = result?;

            let value = *result.score();
            let improves = match best {
                None => true,
                Some((_, best_value)) if is_maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((column, value));
            }

            options.push((column, self.keep_subtree(result)));

            if is_maximizing {
                alpha = std::cmp::max(alpha, value);
            } else {
                beta = std::cmp::min(beta, value);
            }

            if self.options.pruning == Pruning::AlphaBeta && alpha > beta {
                alpha_beta_cutoff = true;
                break;
            }
        }

        let (chosen_column, score) = best.expect("a game that is not over has an open column");

        Ok(MinMaxReturn::Node {
            is_maximizing,
            options,
            moving_player,
            chosen_column,
            score,
            alpha_beta_cutoff,
        })
    }

    fn keep_subtree(&self, result: MinMaxReturn<ScoreType>) -> MinMaxReturn<ScoreType> {
        if self.options.record_tree {
            result
        } else {
            MinMaxReturn::Leaf {
                score: *result.score(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use types::{wire_representation::GameRecord, Board, BoardConfig};

    use super::*;
    use crate::{alpha_beta::TickingClock, evaluator::LineEvaluator};

    type TestPlayer = AlphaBetaPlayer<i64, LineEvaluator, TickingClock>;

    fn fixture(json: &str) -> Board {
        let record: GameRecord = serde_json::from_str(json).unwrap();
        Board::try_from(record).unwrap()
    }

    fn board(moves: &[usize]) -> Board {
        Board::from_moves(BoardConfig::default(), moves).unwrap()
    }

    /// Every poll of the clock moves it forward by a millisecond, so a budget of `n` ms allows
    /// roughly `n` nodes
    fn player(options: EngineOptions) -> TestPlayer {
        AlphaBetaPlayer::with_clock(
            LineEvaluator::default(),
            "test",
            options,
            TickingClock::new(Duration::from_millis(1)),
        )
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_takes_the_immediate_win() {
        for initial_ply_limit in 1..=4 {
            let mut board = fixture(include_str!("../../fixtures/immediate_win.json"));
            let mut player = player(EngineOptions {
                initial_ply_limit,
                ..Default::default()
            });

            let decision = player.decide_with_stats(&mut board, ms(20_000));

            assert_eq!(decision.column, 3, "ply limit {initial_ply_limit}");
            assert_eq!(decision.score, Some(WrappedScore::Win(Reverse(1))));
        }
    }

    #[test]
    fn test_stops_deepening_once_the_game_is_decided() {
        let mut board = fixture(include_str!("../../fixtures/immediate_win.json"));
        let mut player = player(Default::default());

        let decision = player.decide_with_stats(&mut board, ms(20_000));

        assert_eq!(decision.completed_iterations, 1);
        assert_eq!(decision.depth, Some(2));
        assert_eq!(player.ply_limit(), 2);
    }

    #[test]
    fn test_blocks_the_immediate_loss() {
        let mut board = fixture(include_str!("../../fixtures/block_threat.json"));

        for ply_limit in 1..=4 {
            let result = player(Default::default()).single_minimax(&mut board, ply_limit);
            assert_eq!(result.best_column(), Some(3), "ply limit {ply_limit}");
        }

        let mut player = player(Default::default());
        assert_eq!(player.decide(&mut board, ms(20_000)), 3);
    }

    #[test]
    fn test_center_leads_on_the_empty_board() {
        let mut empty = board(&[]);
        let player = player(Default::default());

        let result = player.deepened_minimax_to_depth(&mut empty, 3);
        assert_eq!(result.best_column(), Some(3));

        // Columns 2 through 4 tie at four plies, the center is one of the best
        let result = player.single_minimax(&mut empty, 4);
        let scores = result.column_scores();
        assert_eq!(scores[3].1, *result.score());
        assert!(scores[0].1 < scores[3].1);
        assert!(scores[6].1 < scores[3].1);
    }

    #[test]
    fn test_pruning_never_changes_the_result() {
        let positions: [&[usize]; 6] = [
            &[],
            &[3],
            &[3, 3, 4],
            &[0, 1, 2, 3, 4, 5, 6, 3],
            &[2, 2, 3, 3, 4, 2, 2, 3, 3, 4, 4, 4],
            &[3, 2, 4, 4, 5, 6, 2],
        ];
        let pruned = player(Default::default());
        let full_width = player(EngineOptions {
            pruning: Pruning::FullWidth,
            ..Default::default()
        });

        for moves in positions {
            let mut position = board(moves);
            for ply_limit in 1..=4 {
                let a = pruned.single_minimax(&mut position, ply_limit);
                let b = full_width.single_minimax(&mut position, ply_limit);

                assert_eq!(
                    (a.best_column(), a.score()),
                    (b.best_column(), b.score()),
                    "position {moves:?} at ply limit {ply_limit}"
                );
            }
        }
    }

    #[test]
    fn test_decisions_are_deterministic_with_a_ticking_clock() {
        let decide = || {
            let mut board = fixture(include_str!("../../fixtures/midgame.json"));
            let decision = player(Default::default()).decide_with_stats(&mut board, ms(5_000));

            (
                decision.column,
                decision.score,
                decision.depth,
                decision.completed_iterations,
            )
        };

        assert_eq!(decide(), decide());
    }

    #[test]
    fn test_board_is_restored_after_deciding() {
        for budget in [0, 10, 3_000] {
            let mut board = fixture(include_str!("../../fixtures/midgame.json"));
            let before = board.clone();

            player(Default::default()).decide(&mut board, ms(budget));

            assert_eq!(board, before, "budget {budget}ms");
        }
    }

    #[test]
    fn test_partial_iteration_fallback() {
        let mut empty = board(&[]);
        let mut player = player(Default::default());

        // Enough time to search column 0 to ply 2, but not column 1
        let decision = player.decide_with_stats(&mut empty, ms(10));

        assert_eq!(decision.source, DecisionSource::PartialIteration);
        assert!(decision.used_fallback());
        assert_eq!(decision.column, 0);
        assert_eq!(decision.score, Some(WrappedScore::Scored(-4)));
        assert_eq!(decision.depth, None);
        assert_eq!(player.ply_limit(), 1);
    }

    #[test]
    fn test_first_legal_column_fallback() {
        // Column 0 is full
        let mut board = board(&[0, 0, 0, 0, 0, 0]);

        for budget in [0, 5] {
            let mut player = player(Default::default());
            let decision = player.decide_with_stats(&mut board, ms(budget));

            assert_eq!(decision.source, DecisionSource::FirstLegalColumn);
            assert_eq!(decision.column, 1);
            assert_eq!(decision.score, None);
            assert_eq!(player.ply_limit(), 1);
        }
    }

    #[test]
    fn test_ply_limit_never_drops_below_one() {
        let mut empty = board(&[]);
        let mut player = player(EngineOptions {
            initial_ply_limit: 1,
            ..Default::default()
        });

        player.decide(&mut empty, ms(0));
        assert_eq!(player.ply_limit(), 1);
    }

    #[test]
    fn test_ply_limit_carries_forward_between_decisions() {
        let mut empty = board(&[]);
        let mut player = player(Default::default());

        // Plies 2, 3 and 4 complete, 5 runs out of time and backs the limit off again
        let first = player.decide_with_stats(&mut empty, ms(3_000));
        assert_eq!(first.completed_iterations, 3);
        assert_eq!(first.depth, Some(4));
        assert_eq!(player.ply_limit(), 4);

        let second = player.decide_with_stats(&mut empty, ms(3_000));
        assert_eq!(second.completed_iterations, 1);
        assert_eq!(second.depth, Some(4));
        assert_eq!(player.ply_limit(), 4);
    }

    #[test]
    fn test_ply_limit_reset_between_decisions() {
        let mut empty = board(&[]);
        let mut player = player(EngineOptions {
            ply_ramp: PlyRamp::Reset,
            ..Default::default()
        });

        for _ in 0..2 {
            let decision = player.decide_with_stats(&mut empty, ms(3_000));

            assert_eq!(decision.completed_iterations, 3);
            assert_eq!(decision.depth, Some(4));
            assert_eq!(player.ply_limit(), 4);
        }
    }

    #[test]
    fn test_stops_deepening_at_the_end_of_the_board() {
        let config = BoardConfig {
            columns: 4,
            rows: 4,
            win_length: 3,
        };
        // Four empty cells left, best play from here is a draw
        let mut board =
            Board::from_moves(config, &[1, 2, 3, 0, 1, 1, 1, 3, 0, 0, 0, 2]).unwrap();
        let mut player = player(Default::default());

        let decision = player.decide_with_stats(&mut board, ms(100_000));

        assert_eq!(decision.column, 2);
        assert_eq!(decision.score, Some(WrappedScore::Scored(0)));
        assert_eq!(decision.completed_iterations, 3);
        assert_eq!(decision.depth, Some(4));
    }

    #[test]
    fn test_recorded_tree_follows_the_principal_variation() {
        let mut empty = board(&[]);

        let recorded = player(EngineOptions {
            record_tree: true,
            ..Default::default()
        })
        .single_minimax(&mut empty, 2);
        let route = recorded.chosen_route();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0], (Player::First, recorded.best_column().unwrap()));
        assert_eq!(route[1].0, Player::Second);

        let collapsed = player(Default::default()).single_minimax(&mut empty, 2);
        assert_eq!(collapsed.chosen_route().len(), 1);
        assert_eq!(collapsed.best_column(), recorded.best_column());
    }

    #[test]
    fn test_closures_can_score_leaves() {
        let mut empty = board(&[]);
        let player: AlphaBetaPlayer<i64, _, _> = AlphaBetaPlayer::with_clock(
            |board: &Board, _you: Player| board.first_open_row(6).unwrap_or(0) as i64,
            "closure",
            Default::default(),
            TickingClock::new(ms(1)),
        );

        // Only stacking the last column raises the score, which the second player avoids
        assert_eq!(player.single_minimax(&mut empty, 1).best_column(), Some(6));
        assert_eq!(player.single_minimax(&mut empty, 2).best_column(), Some(6));
    }

    #[test]
    #[should_panic(expected = "decide called on a game that is over")]
    fn test_deciding_a_finished_game_panics() {
        let mut won = board(&[0, 1, 0, 1, 0, 1, 0]);

        player(Default::default()).decide(&mut won, ms(100));
    }
}
