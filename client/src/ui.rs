use tictactoe_engine::games::tictactoe::Board;
use tictactoe_engine::{GameEvent, Mark, Player, Position, WinningLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    Scores,
    Help,
    Quit,
}

pub const HELP: &str = "Enter a cell 1-9 (or \"row col\" with 1-3), r = restart round, s = scores, h = help, q = quit";

/// Cells are typed 1-9 like a phone keypad read left to right, top to bottom.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "r" | "restart" => return Some(Command::Restart),
        "s" | "scores" => return Some(Command::Scores),
        "h" | "help" | "?" => return Some(Command::Help),
        "q" | "quit" | "exit" => return Some(Command::Quit),
        _ => {}
    }

    let numbers: Vec<usize> = line
        .split_whitespace()
        .map(|part| part.parse::<usize>())
        .collect::<Result<_, _>>()
        .ok()?;

    match numbers.as_slice() {
        [cell] if *cell >= 1 => Some(Command::Place(cell - 1)),
        [row, col] if (1..=3).contains(row) && (1..=3).contains(col) => {
            Some(Command::Place(Position::new(row - 1, col - 1).to_index()))
        }
        _ => None,
    }
}

pub fn render_board(board: &Board, winning_line: Option<&WinningLine>) -> String {
    let mut rows = Vec::with_capacity(3);
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = Position::new(row, col).to_index();
                let label = match board.get(index) {
                    Some(Mark::Empty) | None => (index + 1).to_string(),
                    Some(mark) => mark.to_string(),
                };
                if winning_line.is_some_and(|line| line.contains(index)) {
                    format!("[{}]", label)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect();
        rows.push(cells.join("|"));
    }
    rows.join("\n---+---+---\n")
}

pub fn render_scores(players: &[Player; 2]) -> String {
    players
        .iter()
        .map(|player| format!("{} ({}): {}", player.name, player.mark, player.score))
        .collect::<Vec<_>>()
        .join("   ")
}

/// The board is reprinted after every move; the rest are plain messages.
pub fn render_event(event: &GameEvent) -> String {
    match event {
        GameEvent::MovePlayed { board, .. } => format!("{}\n{}", event, render_board(board, None)),
        _ => event.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Empty as E, O, X};

    #[test]
    fn test_parse_single_cell_numbers() {
        assert_eq!(parse_command("1"), Some(Command::Place(0)));
        assert_eq!(parse_command(" 9 "), Some(Command::Place(8)));
        assert_eq!(parse_command("0"), None);
    }

    #[test]
    fn test_out_of_range_cell_reaches_engine() {
        // The engine owns the range check and answers with InvalidCellIndex.
        assert_eq!(parse_command("12"), Some(Command::Place(11)));
    }

    #[test]
    fn test_parse_row_col() {
        assert_eq!(parse_command("2 3"), Some(Command::Place(5)));
        assert_eq!(parse_command("3 1"), Some(Command::Place(6)));
        assert_eq!(parse_command("4 1"), None);
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_command("R"), Some(Command::Restart));
        assert_eq!(parse_command("scores"), Some(Command::Scores));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("?"), Some(Command::Help));
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_render_board_labels_free_cells() {
        let board = Board::from_cells([X, E, E, E, O, E, E, E, E]);

        let rendered = render_board(&board, None);

        assert_eq!(
            rendered,
            " X | 2 | 3 \n---+---+---\n 4 | O | 6 \n---+---+---\n 7 | 8 | 9 "
        );
    }

    #[test]
    fn test_render_board_highlights_winning_line() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        let line = WinningLine::new(X, [0, 1, 2]);

        let rendered = render_board(&board, Some(&line));

        assert!(rendered.starts_with("[X]|[X]|[X]"));
        assert!(rendered.contains(" O | O | 6 "));
    }
}
