//! DIESEL headless driver
//!
//! Starts or restores a game, lets a scripted player run it for a number
//! of turns, prints the final floor and the last messages, and optionally
//! saves the result.

mod autoplay;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use ds_core::dungeon::GenerationParams;
use ds_core::templates::TemplateSet;
use ds_core::{CoreError, GameLoop, GameLoopResult, GameState, GenerationError};
use ds_data::DataError;
use ds_save::SaveError;

use autoplay::Autoplayer;

/// Run DIESEL without a display
#[derive(Parser, Debug)]
#[command(name = "diesel")]
#[command(about = "Run the DIESEL simulation headless with a scripted player")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Player turns to attempt
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Entity template file (JSON); the shipped set is used otherwise
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Write the game here when the run ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue a saved game instead of starting a new one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long, default_value_t = 80)]
    map_width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = 40)]
    map_height: i32,

    /// Room placement attempts per floor
    #[arg(long, default_value_t = 30)]
    max_rooms: u32,

    /// How many recent messages to print
    #[arg(long, default_value_t = 10)]
    messages: usize,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("could not load templates: {0}")]
    Data(#[from] DataError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("could not generate the first floor: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RunError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let state = match &args.load {
        Some(path) => ds_save::load_game(path)?,
        None => {
            let templates = load_templates(args.templates.as_deref())?;
            let params = GenerationParams {
                map_width: args.map_width,
                map_height: args.map_height,
                max_rooms: args.max_rooms,
                ..GenerationParams::default()
            };
            GameState::new_game(seed, templates, params)?
        }
    };

    let mut game = GameLoop::new(state);
    let mut player = Autoplayer::new(seed);
    let mut rejected = 0u32;
    for _ in 0..args.turns {
        if game.state().is_player_dead() {
            break;
        }
        let action = player.next_action(game.state());
        match game.tick(action)? {
            GameLoopResult::Continue => {}
            GameLoopResult::Rejected(_) => {
                rejected += 1;
                player.rejected();
            }
            GameLoopResult::PlayerDied(msg) => {
                info!(%msg, "player died");
                break;
            }
        }
    }

    let state = game.into_state();
    info!(
        turns = state.turns,
        rejected,
        floor = state.world.current_floor,
        "run finished"
    );
    print_summary(&state, args.messages);

    if let Some(path) = &args.save {
        ds_save::save_game(&state, path)?;
    }
    Ok(())
}

fn load_templates(path: Option<&Path>) -> Result<TemplateSet, DataError> {
    match path {
        Some(path) => ds_data::load_templates(path),
        None => ds_data::default_templates(),
    }
}

fn print_summary(state: &GameState, messages: usize) {
    print!("{}", state.map.render_ascii());
    if let Some(actor) = state.player().and_then(|p| p.as_actor()) {
        println!(
            "Floor {}  Turn {}  HP {}/{}  Power {}  Defense {}",
            state.world.current_floor,
            state.turns,
            actor.fighter.hp(),
            actor.fighter.max_hp,
            actor.power(),
            actor.defense(),
        );
    }
    for msg in state.log.recent(messages) {
        println!("{msg}");
    }
}
