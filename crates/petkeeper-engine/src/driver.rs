//! Async driver: owns the session and feeds it timer ticks and commands.
//!
//! One task runs the loop, so ticks and actions never interleave. Commands
//! that arrive mid-tick wait in the channel.

use petkeeper_core::{
    ActionOutcome, GameState, Item, PetAction, PetEvent, SaveStore, Session, TickOutcome,
};
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Capacity of the command queue.
pub const COMMAND_QUEUE: usize = 32;

/// A player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Perform an action
    Act(PetAction),
    /// Choose the food or gift item
    Use(Item),
    /// Pause or unpause
    TogglePause,
    /// Try to resume after a guard pause
    Acknowledge,
    /// Print the pet's status
    Status,
    /// Save now
    Save,
    /// End the session
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| "empty command".to_string())?;
        let command = match head.to_ascii_lowercase().as_str() {
            "pause" => Self::TogglePause,
            "ack" | "resume" => Self::Acknowledge,
            "status" => Self::Status,
            "save" => Self::Save,
            "quit" | "exit" => Self::Quit,
            "use" => {
                let item = words.next().ok_or_else(|| "use which item?".to_string())?;
                Self::Use(item.parse()?)
            },
            other => Self::Act(other.parse()?),
        };
        Ok(command)
    }
}

/// One-line summary of the pet.
pub fn status_line(session: &Session) -> String {
    let pet = session.pet();
    let stats = pet.stats();
    format!(
        "{} the {} | hunger {} happiness {} energy {} health {} | score {} | played {} | {:?}",
        pet.name(),
        pet.species(),
        stats.hunger(),
        stats.happiness(),
        stats.energy(),
        stats.health(),
        session.score(),
        pet.formatted_play_time(),
        session.status(),
    )
}

/// Runs the session until quit, ctrl-c or the command channel closes.
pub struct Driver {
    session: Session,
    store: SaveStore,
    autosave: bool,
}

impl Driver {
    /// Wraps a started session.
    pub fn new(session: Session, store: SaveStore, autosave: bool) -> Self {
        Self {
            session,
            store,
            autosave,
        }
    }

    /// Drives the session, then stops it and autosaves if configured.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> anyhow::Result<GameState> {
        let config = self.session.config();
        let tick_period = Duration::from_millis(config.tick_interval_ms);
        let score_period = Duration::from_millis(config.score_interval_ms);

        // First tick lands one period in, not immediately
        let mut sim = interval_at(Instant::now() + tick_period, tick_period);
        sim.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut score = interval_at(Instant::now() + score_period, score_period);
        score.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!(tick_ms = config.tick_interval_ms, "Driver started");

        loop {
            tokio::select! {
                _ = sim.tick() => self.on_tick(),
                _ = score.tick() => {
                    self.session.score_tick();
                },
                command = commands.recv() => match command {
                    None | Some(Command::Quit) => break,
                    Some(command) => self.handle(command),
                },
                _ = &mut shutdown => {
                    info!("Received ctrl-c, shutting down");
                    break;
                }
            }
            self.report_events();
        }

        self.session.stop();
        if self.autosave {
            self.session.save(&self.store)?;
        }
        info!("Driver stopped");
        Ok(self.session.into_game_state())
    }

    fn on_tick(&mut self) {
        match self.session.tick() {
            TickOutcome::Paused(reason) => {
                println!("Paused: {reason}. A parent can adjust limits; type `ack` to retry.");
            },
            TickOutcome::Advanced | TickOutcome::Skipped(_) | TickOutcome::GameOver => {},
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Act(action) => match self.session.dispatch(action) {
                ActionOutcome::Applied(_) => println!("{}", status_line(&self.session)),
                ActionOutcome::Rejected(reason) => println!("Can't {action}: {reason}"),
            },
            Command::Use(item) => {
                self.session.select_item(item);
                println!("Now using {item}");
            },
            Command::TogglePause => {
                let status = self.session.toggle_pause();
                println!("{status:?}");
            },
            Command::Acknowledge => {
                if !self.session.acknowledge_pause() {
                    println!("Still {:?}", self.session.status());
                }
            },
            Command::Status => println!("{}", status_line(&self.session)),
            Command::Save => match self.session.save(&self.store) {
                Ok(()) => println!("Saved to {}", self.session.pet().save_id()),
                Err(e) => warn!("Save failed: {e}"),
            },
            Command::Quit => {},
        }
    }

    fn report_events(&self) {
        for event in self.session.events().drain() {
            match event {
                PetEvent::CriticalEntered { metric } => println!("Warning: {metric} is critical!"),
                PetEvent::FellAsleep => println!("{} fell asleep.", self.session.pet().name()),
                PetEvent::WokeUp => println!("{} woke up.", self.session.pet().name()),
                PetEvent::Resumed => println!("Resumed."),
                PetEvent::GameOver { score } => {
                    println!("{} has died. Final score: {score}", self.session.pet().name());
                },
                other => debug!(?other, "Event"),
            }
        }
    }
}
