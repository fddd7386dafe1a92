mod config;
mod ui;

use std::sync::Arc;

use clap::Parser;
use tictactoe_engine::config::Validate;
use tictactoe_engine::logger::{self, LogSink};
use tictactoe_engine::{
    ChannelBroadcaster, GameEvent, SessionRng, TicTacToeEngine, TicTacToeSession, log,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::{ClientConfig, Opponent};
use ui::Command;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Tic-tac-toe against a friend or the computer")]
struct Args {
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: String,

    #[arg(long)]
    player1: Option<String>,

    #[arg(long)]
    player2: Option<String>,

    #[arg(long, value_enum)]
    opponent: Option<Opponent>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    delay_ms: Option<u64>,

    /// Fixes mark assignment, starting turns and random computer moves.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn apply_overrides(mut config: ClientConfig, args: &Args) -> ClientConfig {
    if let Some(ref name) = args.player1 {
        config.player1_name = name.clone();
    }
    if let Some(ref name) = args.player2 {
        config.player2_name = name.clone();
    }
    if let Some(opponent) = args.opponent {
        config.opponent = opponent;
    }
    if let Some(ref difficulty) = args.difficulty {
        config.difficulty = difficulty.clone();
    }
    if let Some(delay_ms) = args.delay_ms {
        config.computer_delay_ms = delay_ms;
    }
    config
}

async fn show_event(session: &TicTacToeSession, event: &GameEvent) {
    match event {
        GameEvent::RoundWon { line, .. } => {
            let snapshot = session.snapshot().await;
            println!("{}", ui::render_board(&snapshot.board, Some(line)));
            println!("{}", event);
            println!("{}", ui::render_scores(&snapshot.players));
            println!("Press r to play another round.");
        }
        GameEvent::RoundDrawn { .. } => {
            println!("{}", event);
            println!("{}", ui::render_scores(&session.snapshot().await.players));
            println!("Press r to play another round.");
        }
        _ => println!("{}", ui::render_event(event)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        let prefix = args.use_log_prefix.then(|| "Client".to_string());
        logger::init_logger(prefix, LogSink::Stderr);
    }

    let manager = config::get_config_manager(&args.config);
    let config = apply_overrides(manager.get_config()?, &args);
    config.validate()?;
    if args.save_config {
        manager.set_config(&config)?;
    }

    let setup = config.game_setup()?;
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed {}", rng.seed());

    let (broadcaster, mut events) = ChannelBroadcaster::channel();
    let engine = TicTacToeEngine::new(setup, Box::new(rng), Arc::new(broadcaster))?;
    let session = TicTacToeSession::new(engine, config.session_settings());

    println!("{}", ui::HELP);
    session.start_round().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                show_event(&session, &event).await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match ui::parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Restart) => {
                        session.start_round().await;
                    }
                    Some(Command::Scores) => {
                        println!("{}", ui::render_scores(&session.snapshot().await.players));
                    }
                    Some(Command::Help) => println!("{}", ui::HELP),
                    Some(Command::Place(index)) => {
                        if let Err(e) = session.apply_move(index).await {
                            println!("{}", e);
                        }
                    }
                    None => println!("Unrecognized input. {}", ui::HELP),
                }
            }
        }
    }

    log!("Final scores {:?}", session.scores().await);
    Ok(())
}
