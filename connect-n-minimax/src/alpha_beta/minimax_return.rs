use std::fmt::Debug;
use text_trees::StringTreeNode;
use types::types::Player;

use super::WrappedScore;

#[derive(Debug, Clone)]
/// This is returned from an iteration of the minimax algorithm
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<ScoreType: Clone + Debug + PartialOrd + Ord + Copy> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// The columns we looked at, in the ascending order they were searched, with the result
        /// under each of them
        ///
        /// Unless the tree is being recorded the results are collapsed into [MinMaxReturn::Leaf]s
        /// holding only their score
        options: Vec<(usize, Self)>,
        /// Which player was moving at this node
        moving_player: Player,
        /// The first column, in search order, that reached the chosen score
        chosen_column: usize,
        /// The chosen score
        score: WrappedScore<ScoreType>,
        /// Whether we stopped looking at columns early because of an alpha-beta cutoff
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose/draw)
    /// or when we reach the ply limit
    Leaf {
        #[allow(missing_docs)]
        score: WrappedScore<ScoreType>,
    },
}

impl<ScoreType> MinMaxReturn<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Returns the score for this node
    pub fn score(&self) -> &WrappedScore<ScoreType> {
        match self {
            MinMaxReturn::Node { score, .. } => score,
            MinMaxReturn::Leaf { score } => score,
        }
    }

    /// Returns the column the moving player should play to reach the chosen score
    /// If we are a leaf node, this will return None
    pub fn best_column(&self) -> Option<usize> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node { chosen_column, .. } => Some(*chosen_column),
        }
    }

    /// Returns the score under each column that was searched at this node
    pub fn column_scores(&self) -> Vec<(usize, WrappedScore<ScoreType>)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node { options, .. } => options
                .iter()
                .map(|(column, result)| (*column, *result.score()))
                .collect(),
        }
    }

    /// Returns all the moves in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows each of the moves both players were expected to
    /// make. Collapsed subtrees end the route early
    pub fn chosen_route(&self) -> Vec<(Player, usize)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_player,
                options,
                chosen_column,
                ..
            } => {
                let chosen = options.iter().find(|(column, _)| column == chosen_column);

                if let Some((column, result)) = chosen {
                    let mut tail = result.chosen_route();
                    tail.insert(0, (*moving_player, *column));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the chosen score, the moving player and the column at each level
    pub fn to_text_tree(&self) -> Option<String> {
        let tree_node = self.to_text_tree_node("root".to_owned())?;
        Some(format!("{}", tree_node))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            MinMaxReturn::Leaf { score } => {
                Some(StringTreeNode::new(format!("{} {:?}", label, score)))
            }
            MinMaxReturn::Node {
                moving_player,
                options,
                score,
                alpha_beta_cutoff,
                ..
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!("{} {:?}{}", label, score, cutoff));
                for (column, result) in options {
                    if let Some(next_node) =
                        result.to_text_tree_node(format!("{} plays {}", moving_player, column))
                    {
                        node.push_node(next_node);
                    }
                }

                Some(node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use super::*;

    fn sample() -> MinMaxReturn<i64> {
        MinMaxReturn::Node {
            is_maximizing: true,
            moving_player: Player::First,
            chosen_column: 2,
            score: WrappedScore::Scored(5),
            alpha_beta_cutoff: false,
            options: vec![
                (
                    1,
                    MinMaxReturn::Leaf {
                        score: WrappedScore::Scored(-3),
                    },
                ),
                (
                    2,
                    MinMaxReturn::Node {
                        is_maximizing: false,
                        moving_player: Player::Second,
                        chosen_column: 0,
                        score: WrappedScore::Scored(5),
                        alpha_beta_cutoff: true,
                        options: vec![(
                            0,
                            MinMaxReturn::Leaf {
                                score: WrappedScore::Scored(5),
                            },
                        )],
                    },
                ),
                (
                    3,
                    MinMaxReturn::Leaf {
                        score: WrappedScore::Win(Reverse(4)),
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_chosen_route_follows_chosen_columns() {
        assert_eq!(
            sample().chosen_route(),
            vec![(Player::First, 2), (Player::Second, 0)]
        );
    }

    #[test]
    fn test_best_column_and_scores() {
        let tree = sample();
        assert_eq!(tree.best_column(), Some(2));
        assert_eq!(tree.column_scores()[0], (1, WrappedScore::Scored(-3)));
        assert_eq!(
            MinMaxReturn::Leaf {
                score: WrappedScore::Scored(1_i64)
            }
            .best_column(),
            None
        );
    }

    #[test]
    fn test_text_tree_mentions_cutoffs() {
        let rendered = sample().to_text_tree().unwrap();

        assert!(rendered.starts_with("root Scored(5)"));
        assert!(rendered.contains("first plays 2 Scored(5) (cutoff)"));
        assert!(rendered.contains("second plays 0 Scored(5)"));
    }
}
