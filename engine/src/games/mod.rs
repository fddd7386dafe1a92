pub mod tictactoe;

mod broadcaster;
mod session_rng;

pub use broadcaster::{ChannelBroadcaster, GameBroadcaster, LogBroadcaster};
pub use session_rng::{RandomSource, SessionRng};
