use tokio::sync::mpsc;

use crate::games::tictactoe::GameEvent;
use crate::log;

/// Receives every notification the engine produces for the presentation layer.
pub trait GameBroadcaster: Send + Sync {
    fn broadcast(&self, event: GameEvent);
}

/// Forwards events into an unbounded channel. A dropped receiver is not an
/// error: the game keeps running without anyone watching.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelBroadcaster {
    pub fn new(sender: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    fn broadcast(&self, event: GameEvent) {
        let _ = self.sender.send(event);
    }
}

#[derive(Clone, Copy, Default)]
pub struct LogBroadcaster;

impl GameBroadcaster for LogBroadcaster {
    fn broadcast(&self, event: GameEvent) {
        log!("{}", event);
    }
}
