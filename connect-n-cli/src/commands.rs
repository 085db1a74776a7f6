pub mod analyze;
pub mod selfplay;

use std::{fs, path::PathBuf, time::Duration};

use analyze::Analyze;
use selfplay::SelfPlay;

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use connect_n_minimax::{
    alpha_beta::{AlphaBetaPlayer, EngineOptions},
    evaluator::{LineEvaluator, DEFAULT_EXPONENT},
};
use types::{wire_representation::GameRecord, Board, BoardConfig};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pick a move for the player to move in a position
    Analyze(Analyze),
    /// Let the engine play both sides until the game ends
    #[clap(name = "selfplay")]
    SelfPlay(SelfPlay),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Analyze(a) => a.run()?,
            Command::SelfPlay(s) => s.run()?,
        }

        Ok(())
    }
}

/// Where the starting position comes from
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct PositionArgs {
    /// A JSON game record with the board dimensions and the moves played so far
    #[clap(short, long, value_parser, conflicts_with = "moves")]
    position: Option<PathBuf>,

    /// Columns played so far, comma separated, starting with the first player
    #[clap(short, long, value_parser, value_delimiter = ',')]
    moves: Vec<usize>,

    #[clap(long, value_parser, default_value_t = 7)]
    columns: usize,

    #[clap(long, value_parser, default_value_t = 6)]
    rows: usize,

    /// How many pieces in a line win the game
    #[clap(long, value_parser, default_value_t = 4)]
    win_length: usize,
}

impl PositionArgs {
    pub(crate) fn load(&self) -> Result<Board> {
        if let Some(path) = &self.position {
            let contents = fs::read_to_string(path)
                .wrap_err_with(|| format!("Couldn't read {}", path.display()))?;
            let record: GameRecord = serde_json::from_str(&contents)
                .wrap_err_with(|| format!("{} is not a game record", path.display()))?;

            return Board::try_from(record).wrap_err("The game record is not a legal game");
        }

        let config = BoardConfig {
            columns: self.columns,
            rows: self.rows,
            win_length: self.win_length,
        };

        Board::from_moves(config, &self.moves).wrap_err("The moves are not a legal game")
    }
}

/// How the engine searches
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct EngineArgs {
    /// Wall clock budget per move, in milliseconds
    #[clap(short, long, value_parser, default_value_t = 300)]
    time_ms: u64,

    /// Weight exponent of the line evaluator
    #[clap(short, long, value_parser, default_value_t = DEFAULT_EXPONENT)]
    exponent: u32,
}

impl EngineArgs {
    pub(crate) fn player(&self, options: EngineOptions) -> AlphaBetaPlayer<i64, LineEvaluator> {
        AlphaBetaPlayer::new(LineEvaluator::new(self.exponent), "connect-n-cli", options)
    }

    pub(crate) fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }
}

#[cfg(test)]
mod tests {
    use types::types::{GridQueryableGame, PlayerToMoveGame};
    use types::Player;

    use super::*;

    fn moves(moves: Vec<usize>) -> PositionArgs {
        PositionArgs {
            position: None,
            moves,
            columns: 5,
            rows: 4,
            win_length: 3,
        }
    }

    #[test]
    fn test_loads_moves_onto_the_configured_board() {
        let board = moves(vec![2, 2]).load().unwrap();

        assert_eq!(board.columns(), 5);
        assert_eq!(board.first_open_row(2), Some(2));
        assert_eq!(board.player_to_move(), Player::First);
    }

    #[test]
    fn test_illegal_moves_are_reported() {
        assert!(moves(vec![9]).load().is_err());
        assert!(moves(vec![0, 0, 0, 0, 0]).load().is_err());
    }
}
