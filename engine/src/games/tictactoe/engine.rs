use std::sync::Arc;

use crate::games::{GameBroadcaster, RandomSource};
use crate::log;
use super::board::Board;
use super::bot_controller::{
    BotInput, BotStrategy, calculate_minimax_move, calculate_random_move, resolve_strategy,
};
use super::error::{MoveError, SetupError};
use super::events::GameEvent;
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, GameMode, GameStatus, Mark, Player, Scores, WinningLine};

pub const COMPUTER_NAME: &str = "Computer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub player1_name: String,
    pub player2_name: String,
    pub mode: GameMode,
}

impl GameSetup {
    pub fn human_vs_human(player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        Self {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            mode: GameMode::HumanVsHuman,
        }
    }

    /// Player 2 is always the computer.
    pub fn human_vs_computer(player_name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            player1_name: player_name.into(),
            player2_name: COMPUTER_NAME.to_string(),
            mode: GameMode::HumanVsComputer { difficulty },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStarted {
    pub round: u32,
    pub starting_mark: Mark,
    pub starting_player: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    NextTurn { mark: Mark, player: String },
    Won { line: WinningLine, player: String },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAccepted {
    pub index: usize,
    pub mark: Mark,
    pub board: Board,
    pub outcome: TurnOutcome,
    /// The computer's answer when it was played in the same call.
    pub reply: Option<Box<MoveAccepted>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    Ready(usize),
    Search(BotInput),
}

/// A computer move decided against a specific round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerTurn {
    pub round: u32,
    pub mark: Mark,
    pub plan: MovePlan,
}

impl ComputerTurn {
    /// Runs the search if one is needed. Blocking for the minimax plan.
    pub fn resolve(&self) -> Option<usize> {
        match &self.plan {
            MovePlan::Ready(index) => Some(*index),
            MovePlan::Search(input) => calculate_minimax_move(input),
        }
    }
}

/// Two players, their scores, and the round currently being played.
pub struct TicTacToeEngine {
    players: [Player; 2],
    mode: GameMode,
    round: Option<TicTacToeGameState>,
    round_number: u32,
    rng: Box<dyn RandomSource>,
    broadcaster: Arc<dyn GameBroadcaster>,
    computer_autoplay: bool,
}

impl TicTacToeEngine {
    pub fn new(
        setup: GameSetup,
        rng: Box<dyn RandomSource>,
        broadcaster: Arc<dyn GameBroadcaster>,
    ) -> Result<Self, SetupError> {
        let player1_name = setup.player1_name.trim();
        let player2_name = setup.player2_name.trim();
        if player1_name.is_empty() || player2_name.is_empty() {
            return Err(SetupError::MissingPlayerName);
        }

        let vs_computer = matches!(setup.mode, GameMode::HumanVsComputer { .. });

        Ok(Self {
            players: [
                Player::new(player1_name.to_string(), false),
                Player::new(player2_name.to_string(), vs_computer),
            ],
            mode: setup.mode,
            round: None,
            round_number: 0,
            rng,
            broadcaster,
            computer_autoplay: true,
        })
    }

    /// With autoplay off the computer only moves through
    /// [`plan_computer_turn`](Self::plan_computer_turn) and
    /// [`apply_computer_move`](Self::apply_computer_move).
    pub fn set_computer_autoplay(&mut self, enabled: bool) {
        self.computer_autoplay = enabled;
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round_state(&self) -> Option<&TicTacToeGameState> {
        self.round.as_ref()
    }

    pub fn board(&self) -> Board {
        self.round.as_ref().map(|round| *round.board()).unwrap_or_default()
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.round.as_ref().map(|round| round.status())
    }

    pub fn scores(&self) -> Scores {
        Scores {
            player1: self.players[0].score,
            player2: self.players[1].score,
        }
    }

    pub fn player_by_mark(&self, mark: Mark) -> Option<&Player> {
        self.players.iter().find(|player| player.mark == mark && mark != Mark::Empty)
    }

    /// `None` once the round is over or before the first round.
    pub fn current_player(&self) -> Option<&Player> {
        let round = self.round.as_ref()?;
        if round.status().is_over() {
            return None;
        }
        self.player_by_mark(round.current_mark())
    }

    pub fn is_computer_turn(&self) -> bool {
        self.current_player().is_some_and(|player| player.is_computer)
    }

    /// Clears the board, deals the marks and picks who opens.
    pub fn start_round(&mut self) -> RoundStarted {
        self.round_number += 1;

        let (player1_mark, player2_mark) = if self.rng.random_bool() {
            (Mark::X, Mark::O)
        } else {
            (Mark::O, Mark::X)
        };
        self.players[0].mark = player1_mark;
        self.players[1].mark = player2_mark;

        let starting_mark = if self.rng.random_bool() { Mark::X } else { Mark::O };
        self.round = Some(TicTacToeGameState::new(starting_mark));

        let starting_player = self.name_of(starting_mark);
        log!(
            "Round {} started: {} plays {}, {} plays {}, {} opens",
            self.round_number,
            self.players[0].name,
            player1_mark,
            self.players[1].name,
            player2_mark,
            starting_player
        );

        let started = RoundStarted {
            round: self.round_number,
            starting_mark,
            starting_player,
        };
        self.broadcaster.broadcast(GameEvent::RoundStarted {
            round: started.round,
            starting_mark: started.starting_mark,
            starting_player: started.starting_player.clone(),
        });

        if self.computer_autoplay && self.is_computer_turn() {
            self.autoplay_computer();
        }

        started
    }

    /// A human move. The computer answers in the same call when autoplay is on.
    pub fn apply_move(&mut self, index: usize) -> Result<MoveAccepted, MoveError> {
        let round = self.round.as_ref().ok_or(MoveError::RoundNotStarted)?;
        if round.status().is_over() {
            return Err(MoveError::MoveAfterGameOver);
        }
        if self.is_computer_turn() {
            log!("Rejected move on cell {}: computer is about to move", index);
            return Err(MoveError::ComputerTurnPending);
        }

        let mut accepted = self.commit_move(index)?;

        if self.computer_autoplay && self.is_computer_turn() {
            accepted.reply = self.autoplay_computer().map(Box::new);
        }

        Ok(accepted)
    }

    /// Decides how the computer will move without touching the board.
    /// Random picks are settled here; minimax is left to [`ComputerTurn::resolve`].
    pub fn plan_computer_turn(&mut self) -> Option<ComputerTurn> {
        let difficulty = self.mode.difficulty()?;
        if !self.is_computer_turn() {
            return None;
        }

        let round = self.round.as_ref()?;
        let mark = round.current_mark();

        let plan = match resolve_strategy(difficulty, self.rng.as_mut()) {
            BotStrategy::Random => {
                MovePlan::Ready(calculate_random_move(round.board(), self.rng.as_mut())?)
            }
            BotStrategy::Minimax => MovePlan::Search(BotInput::from_game_state(round, mark)),
        };

        log!("Computer ({}, {}) plans {:?} in round {}", mark, difficulty, plan, self.round_number);

        Some(ComputerTurn {
            round: self.round_number,
            mark,
            plan,
        })
    }

    pub fn apply_computer_move(&mut self, round: u32, index: usize) -> Result<MoveAccepted, MoveError> {
        if round != self.round_number {
            return Err(MoveError::StaleRound {
                expected: self.round_number,
                found: round,
            });
        }

        let state = self.round.as_ref().ok_or(MoveError::RoundNotStarted)?;
        if state.status().is_over() {
            return Err(MoveError::MoveAfterGameOver);
        }
        if !self.is_computer_turn() {
            return Err(MoveError::NotComputerTurn);
        }

        self.commit_move(index)
    }

    /// Plans, searches and applies the computer move inline.
    pub fn play_computer_turn(&mut self) -> Option<Result<MoveAccepted, MoveError>> {
        let turn = self.plan_computer_turn()?;
        let index = turn.resolve()?;
        Some(self.apply_computer_move(turn.round, index))
    }

    fn autoplay_computer(&mut self) -> Option<MoveAccepted> {
        match self.play_computer_turn()? {
            Ok(accepted) => Some(accepted),
            Err(e) => {
                log!("Computer move failed in round {}: {}", self.round_number, e);
                None
            }
        }
    }

    fn commit_move(&mut self, index: usize) -> Result<MoveAccepted, MoveError> {
        let (mark, status, board, next_mark) = {
            let round = self.round.as_mut().ok_or(MoveError::RoundNotStarted)?;
            let mark = round.current_mark();
            let status = round.place_mark(index).inspect_err(|e| {
                log!("Rejected move on cell {}: {}", index, e);
            })?;
            (mark, status, *round.board(), round.current_mark())
        };

        let player = self.name_of(mark);
        self.broadcaster.broadcast(GameEvent::MovePlayed {
            index,
            mark,
            player: player.clone(),
            board,
        });

        let outcome = match status {
            GameStatus::Won(line) => {
                if let Some(winner) = self.players.iter_mut().find(|p| p.mark == line.mark) {
                    winner.score += 1;
                }
                let scores = self.scores();
                log!("Round {} won by {} on {:?}, scores {:?}", self.round_number, player, line.cells, scores);
                self.broadcaster.broadcast(GameEvent::RoundWon {
                    mark,
                    player: player.clone(),
                    line,
                    scores,
                });
                TurnOutcome::Won { line, player }
            }
            GameStatus::Draw => {
                let scores = self.scores();
                log!("Round {} drawn", self.round_number);
                self.broadcaster.broadcast(GameEvent::RoundDrawn { scores });
                TurnOutcome::Draw
            }
            GameStatus::InProgress => {
                let next_player = self.name_of(next_mark);
                let is_computer = self.player_by_mark(next_mark).is_some_and(|p| p.is_computer);
                self.broadcaster.broadcast(GameEvent::TurnChanged {
                    mark: next_mark,
                    player: next_player.clone(),
                    is_computer,
                });
                TurnOutcome::NextTurn {
                    mark: next_mark,
                    player: next_player,
                }
            }
        };

        Ok(MoveAccepted {
            index,
            mark,
            board,
            outcome,
            reply: None,
        })
    }

    fn name_of(&self, mark: Mark) -> String {
        self.player_by_mark(mark)
            .map(|player| player.name.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::test_support::ScriptedRng;
    use crate::games::{ChannelBroadcaster, SessionRng};
    use tokio::sync::mpsc::UnboundedReceiver;
    use Mark::{Empty as E, O, X};

    fn create_engine(
        setup: GameSetup,
        rng: impl RandomSource + 'static,
    ) -> (TicTacToeEngine, UnboundedReceiver<GameEvent>) {
        let (broadcaster, receiver) = ChannelBroadcaster::channel();
        let engine = TicTacToeEngine::new(setup, Box::new(rng), Arc::new(broadcaster)).unwrap();
        (engine, receiver)
    }

    fn drain(receiver: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    fn humans() -> GameSetup {
        GameSetup::human_vs_human("Alice", "Bob")
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let (broadcaster, _receiver) = ChannelBroadcaster::channel();
        let result = TicTacToeEngine::new(
            GameSetup::human_vs_human("Alice", "   "),
            Box::new(SessionRng::new(1)),
            Arc::new(broadcaster),
        );

        assert!(matches!(result, Err(SetupError::MissingPlayerName)));
    }

    #[test]
    fn test_move_before_first_round_is_rejected() {
        let (mut engine, _events) = create_engine(humans(), ScriptedRng::new(vec![], vec![]));

        assert_eq!(engine.apply_move(4), Err(MoveError::RoundNotStarted));
        assert_eq!(engine.status(), None);
    }

    #[test]
    fn test_start_round_deals_marks_and_opener_from_rng() {
        let (mut engine, mut events) =
            create_engine(humans(), ScriptedRng::new(vec![true, false], vec![]));

        let started = engine.start_round();

        assert_eq!(engine.players()[0].mark, X);
        assert_eq!(engine.players()[1].mark, O);
        assert_eq!(
            started,
            RoundStarted { round: 1, starting_mark: O, starting_player: "Bob".to_string() }
        );
        assert_eq!(engine.current_player().unwrap().name, "Bob");
        assert_eq!(engine.board(), Board::empty());
        assert_eq!(
            drain(&mut events),
            vec![GameEvent::RoundStarted { round: 1, starting_mark: O, starting_player: "Bob".to_string() }]
        );
    }

    #[test]
    fn test_marks_are_redealt_every_round() {
        let (mut engine, _events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true, false, true], vec![]));

        engine.start_round();
        assert_eq!((engine.players()[0].mark, engine.players()[1].mark), (X, O));

        engine.start_round();
        assert_eq!((engine.players()[0].mark, engine.players()[1].mark), (O, X));
        assert_eq!(engine.round_number(), 2);
    }

    #[test]
    fn test_completing_a_row_wins_and_scores_once() {
        let (mut engine, mut events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true], vec![]));
        engine.start_round();
        for index in [0, 3, 1, 4] {
            engine.apply_move(index).unwrap();
        }
        drain(&mut events);

        // Alice (X) holds 0 and 1 with 2 open.
        let accepted = engine.apply_move(2).unwrap();

        let line = WinningLine::new(X, [0, 1, 2]);
        assert_eq!(accepted.outcome, TurnOutcome::Won { line, player: "Alice".to_string() });
        assert_eq!(engine.status(), Some(GameStatus::Won(line)));
        assert_eq!(engine.scores(), Scores { player1: 1, player2: 0 });
        assert_eq!(
            drain(&mut events),
            vec![
                GameEvent::MovePlayed {
                    index: 2,
                    mark: X,
                    player: "Alice".to_string(),
                    board: Board::from_cells([X, X, X, O, O, E, E, E, E]),
                },
                GameEvent::RoundWon {
                    mark: X,
                    player: "Alice".to_string(),
                    line,
                    scores: Scores { player1: 1, player2: 0 },
                },
            ]
        );

        assert_eq!(engine.apply_move(8), Err(MoveError::MoveAfterGameOver));
        assert_eq!(engine.scores(), Scores { player1: 1, player2: 0 });
        assert_eq!(engine.current_player(), None);
    }

    #[test]
    fn test_draw_scores_nothing_and_freezes_round() {
        let (mut engine, mut events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true], vec![]));
        engine.start_round();

        let mut last = None;
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            last = Some(engine.apply_move(index).unwrap());
        }

        assert_eq!(last.unwrap().outcome, TurnOutcome::Draw);
        assert_eq!(engine.status(), Some(GameStatus::Draw));
        assert_eq!(engine.scores(), Scores::default());
        assert_eq!(drain(&mut events).last(), Some(&GameEvent::RoundDrawn { scores: Scores::default() }));
        assert_eq!(engine.apply_move(0), Err(MoveError::MoveAfterGameOver));
    }

    #[test]
    fn test_rejected_move_keeps_turn_and_emits_nothing() {
        let (mut engine, mut events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true], vec![]));
        engine.start_round();
        engine.apply_move(4).unwrap();
        drain(&mut events);

        assert_eq!(engine.apply_move(4), Err(MoveError::CellOccupied(4)));
        assert_eq!(engine.apply_move(12), Err(MoveError::InvalidCellIndex(12)));

        assert!(drain(&mut events).is_empty());
        assert_eq!(engine.current_player().unwrap().name, "Bob");
        assert_eq!(engine.board().count(X), 1);
    }

    #[test]
    fn test_turn_change_names_next_player() {
        let (mut engine, _events) =
            create_engine(humans(), ScriptedRng::new(vec![false, true], vec![]));
        engine.start_round();

        // Bob holds X and opens.
        let accepted = engine.apply_move(0).unwrap();

        assert_eq!(accepted.mark, X);
        assert_eq!(
            accepted.outcome,
            TurnOutcome::NextTurn { mark: O, player: "Alice".to_string() }
        );
    }

    #[test]
    fn test_scores_persist_across_rounds() {
        let (mut engine, _events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true, true, false], vec![]));

        engine.start_round();
        for index in [0, 3, 1, 4, 2] {
            engine.apply_move(index).unwrap();
        }

        // Round 2: Alice X, Bob (O) opens and takes the left column.
        engine.start_round();
        assert_eq!(engine.board(), Board::empty());
        for index in [0, 1, 3, 2, 6] {
            engine.apply_move(index).unwrap();
        }

        assert_eq!(engine.scores(), Scores { player1: 1, player2: 1 });
    }

    #[test]
    fn test_hard_computer_opens_when_it_starts() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Hard);
        let (mut engine, mut events) = create_engine(setup, ScriptedRng::new(vec![true, false], vec![]));

        let started = engine.start_round();

        assert_eq!(started.starting_player, COMPUTER_NAME);
        assert_eq!(engine.board(), Board::from_cells([O, E, E, E, E, E, E, E, E]));
        assert_eq!(engine.current_player().unwrap().name, "Alice");
        let events = drain(&mut events);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], GameEvent::MovePlayed { index: 0, mark: O, .. }));
    }

    #[test]
    fn test_hard_computer_answers_in_same_call() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Hard);
        let (mut engine, _events) = create_engine(setup, ScriptedRng::new(vec![true, true], vec![]));
        engine.start_round();

        let accepted = engine.apply_move(0).unwrap();
        let reply = accepted.reply.expect("computer should answer");
        assert_eq!(reply.index, 4);
        assert_eq!(reply.mark, O);

        // Alice threatens the top row; the computer has to block at 2.
        let accepted = engine.apply_move(1).unwrap();
        assert_eq!(accepted.reply.map(|r| r.index), Some(2));
        assert_eq!(engine.current_player().unwrap().name, "Alice");
    }

    #[test]
    fn test_easy_computer_picks_with_rng() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Easy);
        let (mut engine, _events) =
            create_engine(setup, ScriptedRng::new(vec![true, true], vec![3]));
        engine.start_round();

        let accepted = engine.apply_move(4).unwrap();

        // Free cells are 0,1,2,3,5,6,7,8; the fourth is 3.
        assert_eq!(accepted.reply.map(|r| r.index), Some(3));
    }

    #[test]
    fn test_medium_computer_flips_each_turn() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Medium);
        // Marks, opener, then coin flips: random, minimax.
        let (mut engine, _events) =
            create_engine(setup, ScriptedRng::new(vec![true, true, true, false], vec![7]));
        engine.start_round();

        let first = engine.apply_move(0).unwrap();
        // Free cells are 1..=8; index 7 is cell 8.
        assert_eq!(first.reply.map(|r| r.index), Some(8));

        let second = engine.apply_move(1).unwrap();
        assert_eq!(second.reply.map(|r| r.index), Some(2));
    }

    #[test]
    fn test_human_input_rejected_while_computer_pending() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Hard);
        let (mut engine, _events) = create_engine(setup, ScriptedRng::new(vec![true, true], vec![]));
        engine.set_computer_autoplay(false);
        engine.start_round();

        let accepted = engine.apply_move(0).unwrap();
        assert_eq!(accepted.reply, None);
        assert!(engine.is_computer_turn());

        assert_eq!(engine.apply_move(8), Err(MoveError::ComputerTurnPending));
        assert_eq!(engine.board().count(X), 1);

        let turn = engine.plan_computer_turn().unwrap();
        assert_eq!(turn.round, 1);
        assert!(matches!(turn.plan, MovePlan::Search(_)));
        let index = turn.resolve().unwrap();
        let accepted = engine.apply_computer_move(turn.round, index).unwrap();

        assert_eq!(accepted.index, 4);
        assert!(!engine.is_computer_turn());
        assert_eq!(engine.apply_computer_move(1, 8), Err(MoveError::NotComputerTurn));
    }

    #[test]
    fn test_computer_move_planned_for_old_round_is_refused() {
        let setup = GameSetup::human_vs_computer("Alice", Difficulty::Hard);
        let (mut engine, _events) =
            create_engine(setup, ScriptedRng::new(vec![true, true, true, true], vec![]));
        engine.set_computer_autoplay(false);
        engine.start_round();
        engine.apply_move(0).unwrap();
        let turn = engine.plan_computer_turn().unwrap();

        engine.start_round();

        assert_eq!(
            engine.apply_computer_move(turn.round, turn.resolve().unwrap()),
            Err(MoveError::StaleRound { expected: 2, found: 1 })
        );
        assert_eq!(engine.board(), Board::empty());
    }

    #[test]
    fn test_no_computer_turn_in_human_game() {
        let (mut engine, _events) =
            create_engine(humans(), ScriptedRng::new(vec![true, true], vec![]));
        engine.start_round();

        assert!(!engine.is_computer_turn());
        assert_eq!(engine.plan_computer_turn(), None);
        assert!(engine.play_computer_turn().is_none());
    }

    #[test]
    fn test_hard_computer_never_loses_to_random_player() {
        for seed in 0..20 {
            let setup = GameSetup::human_vs_computer("Alice", Difficulty::Hard);
            let (mut engine, _events) = create_engine(setup, SessionRng::new(seed));
            let mut human_rng = SessionRng::new(seed + 1000);
            engine.start_round();

            while engine.status() == Some(GameStatus::InProgress) {
                let free = engine.board().available_moves();
                let index = free[human_rng.random_index(free.len())];
                engine.apply_move(index).unwrap();
            }

            assert_eq!(engine.scores().player1, 0, "seed {}", seed);
        }
    }
}
