//! Tournament bot on a console transport.
//!
//! Reads chat messages from stdin, runs the ones carrying the command prefix
//! through the tournament engine and prints the replies to stdout.

mod config;
mod console;
mod logging;

use std::path::PathBuf;

use anyhow::Error;
use config::BotConfig;
use ctrlc::set_handler;
use log::{error, info, warn};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tourney::{
    CommandHandler, TournamentRegistry,
    tournament::{RegistrySnapshot, Seeder},
};

const HELP: &str = "\
Run the tournament bot on stdin/stdout

USAGE:
  tourney_bot [OPTIONS]

  Each input line is `<user_id> <display_name> <message>`, e.g.
  `1001 Alice !join Summer Cup`

OPTIONS:
  --prefix      TEXT    Command prefix                 [default: env COMMAND_PREFIX or !]
  --state-file  PATH    JSON snapshot of tournaments   [default: env TOURNAMENT_STATE_FILE or none]
  --seed        N       Seed for bracket shuffling     [default: env TOURNAMENT_SEED or random]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  COMMAND_PREFIX           Command prefix
  TOURNAMENT_STATE_FILE    Snapshot path, loaded at startup and saved after each change
  TOURNAMENT_SEED          Seed for reproducible brackets
  MAX_PARTICIPANTS_LIMIT   Largest tournament accepted by create_tournament [default: 128]
  RUST_LOG                 Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let prefix: Option<String> = pargs.opt_value_from_str("--prefix")?;
    let state_file: Option<PathBuf> = pargs.opt_value_from_str("--state-file")?;
    let seed: Option<u64> = pargs.opt_value_from_str("--seed")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = BotConfig::from_env(prefix, state_file, seed)?;
    config.validate()?;

    let seeder = config.seed.map_or_else(Seeder::new, Seeder::from_seed);
    let registry = match &config.state_file {
        Some(path) => {
            let snapshot = RegistrySnapshot::load(path).await?;
            TournamentRegistry::from_snapshot(snapshot, seeder)
                .map_err(|e| anyhow::anyhow!("Rejected snapshot {}: {}", path.display(), e))?
        }
        None => TournamentRegistry::with_seeder(seeder),
    };
    let handler =
        CommandHandler::new(registry).with_max_participants_limit(config.max_participants_limit);

    info!(
        "Tournament bot ready, prefix '{}'. Press Ctrl+C to stop.",
        config.command_prefix
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let message = match console::parse_line(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Skipping console line: {}", e);
                eprintln!("{}", e);
                continue;
            }
        };

        let Some(input) = console::strip_prefix(message.content, &config.command_prefix) else {
            continue;
        };

        let reply = handler.handle_text(&message.caller, input).await;
        let keyword = input.split_whitespace().next().unwrap_or_default();
        logging::log_command_event(message.caller.id, keyword, reply.ok);
        println!("{}", reply.text);

        if reply.ok
            && reply.changed
            && let Some(path) = &config.state_file
            && let Err(e) = handler.registry().snapshot().await.save(path).await
        {
            error!("Failed to save tournaments to {}: {}", path.display(), e);
        }
    }

    info!("Input closed, shutting down");

    Ok(())
}
