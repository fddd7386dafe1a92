use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::log;
use super::board::Board;
use super::engine::{MoveAccepted, MovePlan, RoundStarted, TicTacToeEngine};
use super::error::MoveError;
use super::settings::TicTacToeSessionSettings;
use super::types::{GameStatus, Player, Scores};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub round: u32,
    pub board: Board,
    pub status: Option<GameStatus>,
    pub players: [Player; 2],
    pub current_player: Option<String>,
    pub scores: Scores,
}

struct PendingComputerMove {
    round: u32,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives an engine with a delayed, cancellable computer move.
#[derive(Clone)]
pub struct TicTacToeSession {
    engine: Arc<Mutex<TicTacToeEngine>>,
    pending: Arc<Mutex<Option<PendingComputerMove>>>,
    settings: TicTacToeSessionSettings,
}

impl TicTacToeSession {
    pub fn new(mut engine: TicTacToeEngine, settings: TicTacToeSessionSettings) -> Self {
        engine.set_computer_autoplay(false);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            pending: Arc::new(Mutex::new(None)),
            settings,
        }
    }

    /// Any computer move still waiting from the previous round is dropped first.
    pub async fn start_round(&self) -> RoundStarted {
        self.cancel_pending().await;
        let started = self.engine.lock().await.start_round();
        self.schedule_computer_turn().await;
        started
    }

    pub async fn apply_move(&self, index: usize) -> Result<MoveAccepted, MoveError> {
        let accepted = self.engine.lock().await.apply_move(index)?;
        self.schedule_computer_turn().await;
        Ok(accepted)
    }

    pub async fn is_computer_turn(&self) -> bool {
        self.engine.lock().await.is_computer_turn()
    }

    /// Resolves once the scheduled computer move, if any, has landed or been cancelled.
    pub async fn wait_for_computer(&self) {
        let pending = self.pending.lock().await.take();
        if let Some(pending) = pending
            && let Err(e) = pending.handle.await
            && !e.is_cancelled()
        {
            log!("Computer task for round {} failed: {}", pending.round, e);
        }
    }

    pub async fn scores(&self) -> Scores {
        self.engine.lock().await.scores()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let engine = self.engine.lock().await;
        SessionSnapshot {
            round: engine.round_number(),
            board: engine.board(),
            status: engine.status(),
            players: engine.players().clone(),
            current_player: engine.current_player().map(|player| player.name.clone()),
            scores: engine.scores(),
        }
    }

    async fn cancel_pending(&self) {
        if let Some(pending) = self.pending.lock().await.take() {
            pending.token.cancel();
            pending.handle.abort();
            log!("Cancelled pending computer move for round {}", pending.round);
        }
    }

    async fn schedule_computer_turn(&self) {
        let round = {
            let engine = self.engine.lock().await;
            if !engine.is_computer_turn() {
                return;
            }
            engine.round_number()
        };

        let token = CancellationToken::new();
        let handle = tokio::spawn(run_computer_turn(
            self.engine.clone(),
            token.clone(),
            self.settings.computer_delay,
        ));

        let previous = self.pending.lock().await.replace(PendingComputerMove { round, token, handle });
        if let Some(previous) = previous {
            previous.token.cancel();
        }
    }
}

async fn run_computer_turn(
    engine: Arc<Mutex<TicTacToeEngine>>,
    token: CancellationToken,
    delay: Duration,
) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(delay) => {}
    }

    let Some(turn) = engine.lock().await.plan_computer_turn() else {
        return;
    };

    let index = match turn.plan {
        MovePlan::Ready(index) => Some(index),
        MovePlan::Search(_) => {
            let search = turn.clone();
            match tokio::task::spawn_blocking(move || search.resolve()).await {
                Ok(index) => index,
                Err(e) => {
                    log!("Computer search for round {} failed: {}", turn.round, e);
                    None
                }
            }
        }
    };

    let Some(index) = index else {
        return;
    };
    if token.is_cancelled() {
        return;
    }

    // The round check inside the engine catches a restart that raced this task.
    if let Err(e) = engine.lock().await.apply_computer_move(turn.round, index) {
        log!("Computer move on cell {} dropped: {}", index, e);
    }
}
