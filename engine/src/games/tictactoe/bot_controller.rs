use crate::games::RandomSource;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark};
use super::win_detector::check_win;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }

    pub fn from_game_state(state: &TicTacToeGameState, bot_mark: Mark) -> Self {
        Self::new(*state.board(), bot_mark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStrategy {
    Random,
    Minimax,
}

/// Medium flips a fresh coin on every computer turn.
pub fn resolve_strategy(difficulty: Difficulty, rng: &mut dyn RandomSource) -> BotStrategy {
    match difficulty {
        Difficulty::Easy => BotStrategy::Random,
        Difficulty::Hard => BotStrategy::Minimax,
        Difficulty::Medium => {
            if rng.random_bool() {
                BotStrategy::Random
            } else {
                BotStrategy::Minimax
            }
        }
    }
}

pub fn calculate_move(
    strategy: BotStrategy,
    input: &BotInput,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    match strategy {
        BotStrategy::Random => calculate_random_move(&input.board, rng),
        BotStrategy::Minimax => calculate_minimax_move(input),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut dyn RandomSource) -> Option<usize> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_index(available_moves.len());
    Some(available_moves[idx])
}

/// Best cell for `input.bot_mark`; the lowest index wins among equal scores.
pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for (index, score) in minimax_scores(input) {
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

/// Minimax value of every empty cell, from the bot's point of view.
pub fn minimax_scores(input: &BotInput) -> Vec<(usize, i32)> {
    let Some(opponent_mark) = input.bot_mark.opponent() else {
        return Vec::new();
    };

    let mut board = input.board;
    board
        .available_moves()
        .into_iter()
        .map(|index| {
            board.place(index, input.bot_mark);
            let score = minimax(&mut board, 0, false, input.bot_mark, opponent_mark);
            board.clear(index);
            (index, score)
        })
        .collect()
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    if check_win(board, opponent_mark) {
        return -WIN_SCORE + depth;
    }
    if check_win(board, bot_mark) {
        return WIN_SCORE - depth;
    }

    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board.place(index, bot_mark);
            let eval = minimax(board, depth + 1, false, bot_mark, opponent_mark);
            board.clear(index);
            max_eval = max_eval.max(eval);
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in moves {
            board.place(index, opponent_mark);
            let eval = minimax(board, depth + 1, true, bot_mark, opponent_mark);
            board.clear(index);
            min_eval = min_eval.min(eval);
        }
        min_eval
    }
}
