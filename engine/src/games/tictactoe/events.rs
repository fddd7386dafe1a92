use std::fmt;

use super::board::Board;
use super::types::{Mark, Scores, WinningLine};

/// Notifications for the presentation layer, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        starting_mark: Mark,
        starting_player: String,
    },
    MovePlayed {
        index: usize,
        mark: Mark,
        player: String,
        board: Board,
    },
    TurnChanged {
        mark: Mark,
        player: String,
        is_computer: bool,
    },
    RoundWon {
        mark: Mark,
        player: String,
        line: WinningLine,
        scores: Scores,
    },
    RoundDrawn {
        scores: Scores,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoundStarted { starting_mark, starting_player, .. } => {
                write!(f, "{} starts the game with \"{}\".", starting_player, starting_mark)
            }
            GameEvent::MovePlayed { index, mark, player, .. } => {
                write!(f, "{} placed {} on cell {}.", player, mark, index + 1)
            }
            GameEvent::TurnChanged { mark, player, .. } => write!(f, "{}'s turn ({}).", player, mark),
            GameEvent::RoundWon { player, .. } => write!(f, "{} wins!", player),
            GameEvent::RoundDrawn { .. } => write!(f, "It's a draw!"),
        }
    }
}
