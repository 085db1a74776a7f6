//! Positional evaluation over open line segments
//!
//! Every run of `win_length` cells in one of the four orientations is a window. A window that
//! only holds pieces of one player (and at least one empty cell) is an open threat for that
//! player, bucketed by how many pieces it already holds. Windows holding pieces of both players
//! are dead and count for nobody.

use std::ops::RangeInclusive;

use itertools::{Itertools, MinMaxResult};
use types::types::{GridQueryableGame, Player};

use crate::alpha_beta::Scorable;

/// The weight exponent the engine plays with by default
pub const DEFAULT_EXPONENT: u32 = 5;

/// Row, column steps of the four line orientations. Each window is anchored at its bottom cell,
/// or its leftmost cell for horizontals, so every window is visited exactly once.
const ORIENTATIONS: [(usize, isize); 4] = [(1, 0), (1, 1), (1, -1), (0, 1)];

/// Open window counts for both players
///
/// `friendly[k - 1]` is the number of windows holding exactly `k` of our pieces and nothing of
/// the opponent's, for `k` in `1..win_length`. `opposing` is the same from the opponent's side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreatCounts {
    #[allow(missing_docs)]
    pub friendly: Vec<u32>,
    #[allow(missing_docs)]
    pub opposing: Vec<u32>,
}

impl ThreatCounts {
    fn new(win_length: usize) -> Self {
        Self {
            friendly: vec![0; win_length - 1],
            opposing: vec![0; win_length - 1],
        }
    }

    fn weighted(buckets: &[u32], exponent: u32) -> i64 {
        buckets
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                (index as i64 + 1)
                    .saturating_pow(exponent)
                    .saturating_mul(count.into())
            })
            .fold(0_i64, i64::saturating_add)
    }
}

/// Scores a board by weighting each open window by `(pieces in window) ^ exponent`
///
/// ```
/// use connect_n_minimax::evaluator::LineEvaluator;
/// use types::{Board, BoardConfig, Player};
///
/// let board = Board::from_moves(BoardConfig::default(), &[3]).unwrap();
/// let evaluator = LineEvaluator::default();
///
/// assert!(evaluator.evaluate(&board, Player::First) > 0);
/// assert_eq!(
///     evaluator.evaluate(&board, Player::First),
///     -evaluator.evaluate(&board, Player::Second)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEvaluator {
    exponent: u32,
}

impl Default for LineEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_EXPONENT)
    }
}

impl LineEvaluator {
    /// Create an evaluator using the given weight exponent
    pub fn new(exponent: u32) -> Self {
        Self { exponent }
    }

    /// The weight exponent
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// The signed score of the board from `you`'s point of view
    pub fn evaluate<G: GridQueryableGame>(&self, board: &G, you: Player) -> i64 {
        let counts = self.threat_counts(board, you);

        ThreatCounts::weighted(&counts.friendly, self.exponent)
            - ThreatCounts::weighted(&counts.opposing, self.exponent)
    }

    /// Count the open windows of both players
    ///
    /// Only the band of rows that can hold a window with both a piece and an empty cell is
    /// scanned: from `win_length - 1` rows under the lowest open row up to the highest occupied
    /// row. Anything below is completely full and anything above is completely empty.
    pub fn threat_counts<G: GridQueryableGame>(&self, board: &G, you: Player) -> ThreatCounts {
        match scan_band(board) {
            Some(rows) => count_windows(board, you, rows),
            None => ThreatCounts::new(board.win_length()),
        }
    }
}

impl<G: GridQueryableGame> Scorable<G, i64> for LineEvaluator {
    fn score(&self, game: &G, you: Player) -> i64 {
        self.evaluate(game, you)
    }
}

fn scan_band<G: GridQueryableGame>(board: &G) -> Option<RangeInclusive<usize>> {
    let heights = (0..board.columns()).map(|column| {
        board
            .first_open_row(column)
            .unwrap_or_else(|| board.rows())
    });

    let (lowest, highest) = match heights.minmax() {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(height) => (height, height),
        MinMaxResult::MinMax(lowest, highest) => (lowest, highest),
    };

    // A full board or an empty board has no open windows with pieces in them
    if lowest == board.rows() || highest == 0 {
        return None;
    }

    let first_open_row = lowest;
    let last_occupied_row = highest - 1;

    Some(first_open_row.saturating_sub(board.win_length() - 1)..=last_occupied_row)
}

fn count_windows<G: GridQueryableGame>(
    board: &G,
    you: Player,
    rows: impl Iterator<Item = usize>,
) -> ThreatCounts {
    let win_length = board.win_length();
    let mut counts = ThreatCounts::new(win_length);

    for row in rows {
        for column in 0..board.columns() {
            for &(dr, dc) in &ORIENTATIONS {
                let Some(cells) = window(board, row, column, dr, dc) else {
                    continue;
                };

                let (mut ours, mut theirs) = (0, 0);
                for (r, c) in cells {
                    match board.cell(r, c) {
                        Some(player) if player == you => ours += 1,
                        Some(_) => theirs += 1,
                        None => {}
                    }
                }

                if theirs == 0 && ours > 0 && ours < win_length {
                    counts.friendly[ours - 1] += 1;
                } else if ours == 0 && theirs > 0 && theirs < win_length {
                    counts.opposing[theirs - 1] += 1;
                }
            }
        }
    }

    counts
}

/// The cells of the window anchored at `(row, column)`, `None` if it leaves the board
fn window<G: GridQueryableGame>(
    board: &G,
    row: usize,
    column: usize,
    dr: usize,
    dc: isize,
) -> Option<impl Iterator<Item = (usize, usize)>> {
    let reach = board.win_length() - 1;

    let last_row = row + dr * reach;
    let last_column = column.checked_add_signed(dc * reach as isize)?;
    if last_row >= board.rows() || last_column >= board.columns() {
        return None;
    }

    Some((0..=reach).map(move |step| {
        (
            row + dr * step,
            column.wrapping_add_signed(dc * step as isize),
        )
    }))
}
