use super::board::Board;
use super::types::{Mark, WinningLine};

pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board, mark: Mark) -> bool {
    find_winning_line(board, mark).is_some()
}

/// First triple in [`WIN_LINES`] order fully held by `mark`.
pub fn find_winning_line(board: &Board, mark: Mark) -> Option<WinningLine> {
    if mark == Mark::Empty {
        return None;
    }

    let cells = board.cells();
    WIN_LINES
        .iter()
        .find(|line| line.iter().all(|&index| cells[index] == mark))
        .map(|&line| WinningLine::new(mark, line))
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    find_winning_line(board, Mark::X).or_else(|| find_winning_line(board, Mark::O))
}
