/// Why a move was refused. The round is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    InvalidCellIndex(usize),
    CellOccupied(usize),
    MoveAfterGameOver,
    RoundNotStarted,
    ComputerTurnPending,
    NotComputerTurn,
    StaleRound { expected: u32, found: u32 },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::InvalidCellIndex(index) => {
                write!(f, "Cell index {} is outside the board (0-8)", index)
            }
            MoveError::CellOccupied(index) => write!(f, "Cell {} is already marked", index),
            MoveError::MoveAfterGameOver => write!(f, "Game is already over"),
            MoveError::RoundNotStarted => write!(f, "No round has been started"),
            MoveError::ComputerTurnPending => write!(f, "Waiting for the computer to move"),
            MoveError::NotComputerTurn => write!(f, "It is not the computer's turn"),
            MoveError::StaleRound { expected, found } => {
                write!(f, "Move planned for round {} but round {} is running", found, expected)
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Configuration problems, reported before any round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    UnknownDifficulty(String),
    MissingPlayerName,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::UnknownDifficulty(raw) => {
                write!(f, "Unknown difficulty '{}', expected easy, medium or hard", raw)
            }
            SetupError::MissingPlayerName => write!(f, "Please enter names for both players."),
        }
    }
}

impl std::error::Error for SetupError {}
