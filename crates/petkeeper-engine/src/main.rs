//! # Petkeeper
//!
//! Headless virtual pet. Loads or creates a pet in a save slot, then reads
//! commands from stdin while the simulation ticks.
//!
//! Usage: `petkeeper [slot] [name species]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{bail, Context, Result};
use petkeeper_common::SaveSlot;
use petkeeper_core::{
    GameState, Pet, SaveError, SaveStore, Session, Species, SystemClock, UserPreferences,
};
use petkeeper_engine::{status_line, Command, Driver, EngineConfig, COMMAND_QUEUE};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "usage: petkeeper [slot] [name species]";

const HELP: &str =
    "commands: feed, play, gift, exercise, vet, sleep, use <item>, pause, ack, status, save, quit";

/// Main entry point.
fn main() -> Result<()> {
    let config = EngineConfig::load();

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("Petkeeper starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config, &args));
    // The stdin reader sits in a blocking read; don't wait for it
    runtime.shutdown_background();
    result?;

    info!("Petkeeper shutdown complete");
    Ok(())
}

async fn run(config: EngineConfig, args: &[String]) -> Result<()> {
    let store = SaveStore::new(&config.save_dir);
    let prefs = store.load_preferences();

    let slot = match args.first() {
        Some(arg) => arg.parse::<SaveSlot>().context(USAGE)?,
        None => SaveSlot::new(1),
    };
    let state = match args {
        [_, name, species] => new_game(&store, slot, name, species, &prefs)?,
        [] | [_] => continue_game(&store, slot, &prefs)?,
        _ => bail!(USAGE),
    };

    let session = Session::start(state, config.sim.clone(), Box::new(SystemClock));
    println!("{}", status_line(&session));
    println!("{HELP}");

    let (tx, rx) = mpsc::channel(COMMAND_QUEUE);
    tokio::spawn(read_commands(tx));

    let state = Driver::new(session, store, config.autosave_on_exit)
        .run(rx)
        .await?;
    println!(
        "Goodbye! {} has been played for {}.",
        state.pet.name(),
        state.pet.formatted_play_time()
    );
    Ok(())
}

fn new_game(
    store: &SaveStore,
    slot: SaveSlot,
    name: &str,
    species: &str,
    prefs: &UserPreferences,
) -> Result<GameState> {
    let species: Species = species.parse().context(USAGE)?;
    if store.slot_exists(slot) {
        warn!(%slot, "Overwriting existing save");
    }

    let state = GameState::new(Pet::new(name, species, slot), prefs.parent_controls_enabled);
    store
        .save_game(slot, &state)
        .with_context(|| format!("failed to create {slot}"))?;
    info!(%slot, name, %species, "Created new pet");
    Ok(state)
}

fn continue_game(store: &SaveStore, slot: SaveSlot, prefs: &UserPreferences) -> Result<GameState> {
    match store.load_game(slot) {
        Ok(mut state) => {
            state.parent_controls_enabled = prefs.parent_controls_enabled;
            Ok(state)
        },
        Err(SaveError::NotFound(_)) => {
            let saves = store.list_saves()?;
            if saves.is_empty() {
                println!("No saved pets yet.");
            }
            for save in saves {
                println!(
                    "{}: {} the {}, played {}, saved {}{}",
                    save.slot,
                    save.name,
                    save.species,
                    save.formatted_playtime(),
                    save.formatted_timestamp(),
                    if save.alive { "" } else { " (deceased)" },
                );
            }
            bail!("no pet in {slot}; start one with `petkeeper {slot} <name> <species>`")
        },
        Err(e) => Err(e).with_context(|| format!("failed to load {slot}")),
    }
}

async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                let quit = command == Command::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            },
            Err(e) => println!("{e}. {HELP}"),
        }
    }
}
