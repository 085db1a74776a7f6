use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use tracing::info;

use connect_n_minimax::alpha_beta::{EngineOptions, PlyRamp};
use types::{
    types::{PlayerToMoveGame, VictorDeterminableGame},
    Outcome, Player,
};

use super::{EngineArgs, PositionArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct SelfPlay {
    #[clap(flatten)]
    position: PositionArgs,

    #[clap(flatten)]
    engine: EngineArgs,

    /// Start every move from the initial ply limit instead of carrying it over
    #[clap(long, action)]
    reset_ramp: bool,

    /// Stop after this many moves even if the game isn't over
    #[clap(long, value_parser)]
    max_moves: Option<usize>,
}

impl SelfPlay {
    pub(crate) fn run(self) -> Result<()> {
        let mut board = self.position.load()?;

        let options = EngineOptions {
            ply_ramp: if self.reset_ramp {
                PlyRamp::Reset
            } else {
                PlyRamp::CarryForward
            },
            ..Default::default()
        };
        // One engine per side so each carries its own ply limit
        let mut first = self.engine.player(options);
        let mut second = self.engine.player(options);

        let mut played = 0;
        while !board.is_over() && self.max_moves.map_or(true, |max| played < max) {
            let mover = board.player_to_move();
            let engine = match mover {
                Player::First => &mut first,
                Player::Second => &mut second,
            };

            let decision = engine.decide_with_stats(&mut board, self.engine.time_budget());
            board
                .play(decision.column)
                .wrap_err_with(|| format!("The engine chose column {}", decision.column))?;
            played += 1;

            println!(
                "{} {} plays {} (score {}, depth {})",
                board.move_count(),
                mover,
                decision.column,
                decision
                    .score
                    .map_or_else(|| "unknown".to_owned(), |score| format!("{:?}", score)),
                decision
                    .depth
                    .map_or_else(|| "none".to_owned(), |depth| depth.to_string()),
            );
        }

        println!();
        println!("{board}");
        println!();

        let summary = match board.outcome() {
            Outcome::Won(winner) => format!("{winner} ({}) wins", winner.symbol()).green(),
            Outcome::Draw => "The board is full, it's a draw".yellow(),
            Outcome::InProgress => format!("Stopped after {played} moves").normal(),
        };
        println!("{summary}");

        info!(moves = ?board.moves(), "Finished self play");
        println!("{}", serde_json::to_string(&board.to_record())?);

        Ok(())
    }
}
