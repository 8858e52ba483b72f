use std::thread;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::prelude::*;
use zapador_core::{Agent, AgentError};

use client::HttpGameApi;

mod client;

/// Pause after a game that could not be started or finished.
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(version, about = "Plays the minesweeper mini-game by itself", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Root of the game API
    #[arg(long, default_value = "https://play.hypnos2026.fr/api/arg/minesweeper")]
    base_url: String,

    /// Session cookie value
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    auth_token: String,

    /// Anti-forgery token, sent both as cookie and header
    #[arg(long, env = "CSRF_TOKEN", hide_env_values = true)]
    csrf_token: String,

    /// How many games to play, 0 keeps playing until interrupted
    #[arg(short, long, default_value_t = 0)]
    games: u32,

    /// Seconds to wait between games
    #[arg(long, default_value_t = 2)]
    cooldown_secs: u64,

    /// Force a seed instead of a random one
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new().filter_level(args.verbose.log_level_filter()).init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let api = HttpGameApi::new(&args.base_url, &args.auth_token, &args.csrf_token)?;
    let mut agent = Agent::new(api, SmallRng::seed_from_u64(seed));

    let cooldown = Duration::from_secs(args.cooldown_secs);
    let mut played: u32 = 0;
    let mut wins: u32 = 0;

    while args.games == 0 || played < args.games {
        match agent.play_game() {
            Ok(report) => {
                played += 1;
                if report.won {
                    wins += 1;
                }
                log::info!("{wins}/{played} games won so far");
                thread::sleep(cooldown);
            }
            Err(AgentError::Transport(err)) => {
                log::warn!("giving the server a moment: {err}");
                thread::sleep(RETRY_BACKOFF);
            }
            Err(err @ AgentError::ExhaustedBoard) => {
                played += 1;
                log::error!("{err}");
                thread::sleep(cooldown);
            }
        }
    }

    log::info!("session over: {wins}/{played} games won");
    Ok(())
}
