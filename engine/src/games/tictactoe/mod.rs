mod board;
mod bot_controller;
mod engine;
mod error;
mod events;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

#[cfg(test)]
pub(crate) mod test_support;

pub use board::{BOARD_CELLS, Board};
pub use bot_controller::{
    BotInput, BotStrategy, calculate_minimax_move, calculate_move, calculate_random_move,
    minimax_scores, resolve_strategy,
};
pub use engine::{
    COMPUTER_NAME, ComputerTurn, GameSetup, MoveAccepted, MovePlan, RoundStarted, TicTacToeEngine, TurnOutcome,
};
pub use error::{MoveError, SetupError};
pub use events::GameEvent;
pub use game_state::TicTacToeGameState;
pub use session::{SessionSnapshot, TicTacToeSession};
pub use settings::{DEFAULT_COMPUTER_DELAY, TicTacToeSessionSettings};
pub use types::{Difficulty, GameMode, GameStatus, Mark, Player, Position, Scores, WinningLine};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, find_winning_line};
