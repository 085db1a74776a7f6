use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use connect_n_minimax::alpha_beta::{Decision, EngineOptions};
use types::{
    types::{PlayerToMoveGame, VictorDeterminableGame},
    wire_representation::GameRecord,
    Player,
};

use super::{EngineArgs, PositionArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Analyze {
    #[clap(flatten)]
    position: PositionArgs,

    #[clap(flatten)]
    engine: EngineArgs,

    /// Keep and print the whole searched tree of the deepest completed iteration
    #[clap(long, action)]
    tree: bool,

    /// Print the decision as JSON instead of text
    #[clap(long, action)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    position: GameRecord,
    to_move: Player,
    column: usize,
    score: Option<String>,
    depth: Option<usize>,
    completed_iterations: usize,
    source: String,
    elapsed_ms: u128,
    principal_variation: Vec<(Player, usize)>,
}

impl Report {
    fn new(position: GameRecord, to_move: Player, decision: &Decision<i64>) -> Self {
        Self {
            position,
            to_move,
            column: decision.column,
            score: decision.score.map(|score| format!("{:?}", score)),
            depth: decision.depth,
            completed_iterations: decision.completed_iterations,
            source: format!("{:?}", decision.source),
            elapsed_ms: decision.elapsed.as_millis(),
            principal_variation: decision
                .tree
                .as_ref()
                .map(|tree| tree.chosen_route())
                .unwrap_or_default(),
        }
    }
}

impl Analyze {
    pub(crate) fn run(self) -> Result<()> {
        let mut board = self.position.load()?;
        if board.is_over() {
            return Err(eyre!("There is nothing to analyze, {:?}", board.outcome()));
        }

        let mut player = self.engine.player(EngineOptions {
            record_tree: self.tree,
            ..Default::default()
        });
        let to_move = board.player_to_move();
        let decision = player.decide_with_stats(&mut board, self.engine.time_budget());
        let report = Report::new(board.to_record(), to_move, &decision);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);

            return Ok(());
        }

        println!("{board}");
        println!();
        println!(
            "{}",
            format!("{} ({}) should play column {}", to_move, to_move.symbol(), report.column)
                .green()
        );
        println!(
            "Score {} at depth {} after {} completed iterations in {}ms",
            report.score.as_deref().unwrap_or("unknown"),
            report
                .depth
                .map_or_else(|| "none".to_owned(), |depth| depth.to_string()),
            report.completed_iterations,
            report.elapsed_ms,
        );

        if decision.used_fallback() {
            println!(
                "{}",
                format!("No iteration completed in time, this is a {}", report.source).yellow()
            );
        }

        if !report.principal_variation.is_empty() {
            println!(
                "Principal variation: {}",
                report
                    .principal_variation
                    .iter()
                    .map(|(player, column)| format!("{player} {column}"))
                    .join(", ")
            );
        }

        if self.tree {
            if let Some(tree) = decision.tree.as_ref().and_then(|tree| tree.to_text_tree()) {
                println!();
                println!("{tree}");
            }
        }

        Ok(())
    }
}
