use std::time::Duration;

/// Pause before the computer moves, so its answer does not appear instantly.
pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub computer_delay: Duration,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            computer_delay: DEFAULT_COMPUTER_DELAY,
        }
    }
}

impl TicTacToeSessionSettings {
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            computer_delay: Duration::from_millis(delay_ms),
        }
    }
}
