use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::{Difficulty, GameSetup, SetupError, TicTacToeSessionSettings};

pub const CONFIG_FILE: &str = "tictactoe_client_config.yaml";
const MAX_COMPUTER_DELAY_MS: u64 = 5000;

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Human,
    Computer,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub player1_name: String,
    pub player2_name: String,
    pub opponent: Opponent,
    /// Kept as text so a typo surfaces as an unknown difficulty, not a YAML error.
    pub difficulty: String,
    pub computer_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            opponent: Opponent::Computer,
            difficulty: Difficulty::Medium.to_string(),
            computer_delay_ms: 500,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.player1_name.trim().is_empty() {
            return Err("player1_name must not be empty".to_string());
        }
        if self.opponent == Opponent::Human && self.player2_name.trim().is_empty() {
            return Err("player2_name must not be empty".to_string());
        }
        if self.computer_delay_ms > MAX_COMPUTER_DELAY_MS {
            return Err(format!("computer_delay_ms must not exceed {}", MAX_COMPUTER_DELAY_MS));
        }
        if self.opponent == Opponent::Computer {
            self.difficulty.parse::<Difficulty>().map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

impl ClientConfig {
    pub fn game_setup(&self) -> Result<GameSetup, SetupError> {
        match self.opponent {
            Opponent::Human => Ok(GameSetup::human_vs_human(
                self.player1_name.clone(),
                self.player2_name.clone(),
            )),
            Opponent::Computer => {
                let difficulty = self.difficulty.parse::<Difficulty>()?;
                Ok(GameSetup::human_vs_computer(self.player1_name.clone(), difficulty))
            }
        }
    }

    pub fn session_settings(&self) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings::with_delay_ms(self.computer_delay_ms)
    }
}
