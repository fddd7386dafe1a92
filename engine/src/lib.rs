pub mod config;
pub mod games;
pub mod logger;

pub use games::tictactoe::{
    Difficulty, GameEvent, GameMode, GameSetup, GameStatus, Mark, MoveAccepted, MoveError,
    Player, Position, RoundStarted, Scores, SetupError, TicTacToeEngine, TicTacToeSession,
    TicTacToeSessionSettings, TurnOutcome, WinningLine,
};
pub use games::{ChannelBroadcaster, GameBroadcaster, RandomSource, SessionRng};
