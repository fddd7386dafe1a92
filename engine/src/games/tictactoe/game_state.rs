use super::board::{BOARD_CELLS, Board};
use super::error::MoveError;
use super::types::{GameStatus, Mark};
use super::win_detector::find_winning_line;

/// Board, turn and status of a single round.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<usize>,
    move_count: usize,
}

impl TicTacToeGameState {
    pub fn new(starting_mark: Mark) -> Self {
        debug_assert!(starting_mark != Mark::Empty);
        Self {
            board: Board::empty(),
            current_mark: starting_mark,
            status: GameStatus::InProgress,
            last_move: None,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Puts the current mark on `index`, then settles win, draw or the next turn.
    pub fn place_mark(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::MoveAfterGameOver);
        }

        if index >= BOARD_CELLS {
            return Err(MoveError::InvalidCellIndex(index));
        }

        if !self.board.is_valid_move(index) {
            return Err(MoveError::CellOccupied(index));
        }

        self.board.place(index, self.current_mark);
        self.last_move = Some(index);
        self.move_count += 1;

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        };
    }

    fn check_game_over(&mut self) {
        if let Some(line) = find_winning_line(&self.board, self.current_mark) {
            self.status = GameStatus::Won(line);
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }
}
