//! Play session: the tick-driven simulation loop.
//!
//! A [`Session`] owns the [`GameState`] for as long as the pet is being
//! played. It handles:
//! - Per-second decay and critical-state reconciliation
//! - Sleep and wake transitions
//! - Action dispatch
//! - Parental guards (time limit, allowed window)
//! - Game over and revival

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::actions::{ActionOutcome, PetAction, RejectReason};
use crate::config::SimConfig;
use crate::events::{EventBus, PetEvent};
use crate::inventory::Item;
use crate::parental::{ParentalControls, ParentalResult};
use crate::pet::{GameState, Pet};
use crate::save::{SaveResult, SaveStore};
use crate::score::ScoreKeeper;
use crate::vitals::Metric;

// ============================================================================
// Clock
// ============================================================================

/// Wall-clock source for the allowed-window guard.
pub trait Clock: Send + fmt::Debug {
    /// Current local time of day.
    fn now(&self) -> NaiveTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Arc<AtomicU32>,
}

impl ManualClock {
    /// Creates a clock stopped at `time`.
    #[must_use]
    pub fn new(time: NaiveTime) -> Self {
        let clock = Self::default();
        clock.set(time);
        clock
    }

    /// Moves the clock.
    pub fn set(&self, time: NaiveTime) {
        self.seconds
            .store(time.num_seconds_from_midnight(), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveTime {
        let seconds = self.seconds.load(Ordering::Relaxed);
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or(NaiveTime::MIN)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Why a session is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseReason {
    /// Player pressed pause
    PlayerPaused,
    /// Session time limit used up
    TimeLimitReached,
    /// Current time is outside the allowed window
    OutsideAllowedWindow,
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PlayerPaused => "paused",
            Self::TimeLimitReached => "time limit reached",
            Self::OutsideAllowedWindow => "outside allowed hours",
        })
    }
}

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Ticking and accepting actions
    Running,
    /// Ticking; energy recovers, only Sleep is accepted
    Asleep,
    /// Not ticking
    Paused(PauseReason),
    /// Pet died; terminal until revived
    GameOver,
    /// Session ended
    Stopped,
}

impl SessionStatus {
    /// Whether ticks advance the simulation.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Running | Self::Asleep)
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation advanced one second
    Advanced,
    /// Nothing happened in this status
    Skipped(SessionStatus),
    /// Advanced, then a guard paused the session
    Paused(PauseReason),
    /// The pet died this tick
    GameOver,
}

// ============================================================================
// Session
// ============================================================================

/// One continuous period of play with a single pet.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    config: SimConfig,
    score: ScoreKeeper,
    status: SessionStatus,
    sleeping: bool,
    events: EventBus,
    clock: Box<dyn Clock>,
}

impl Session {
    /// Starts a session for a loaded or freshly created game.
    pub fn start(mut state: GameState, config: SimConfig, clock: Box<dyn Clock>) -> Self {
        let pet = &mut state.pet;
        pet.stats_mut().set_rules(config.vitals.clone());
        pet.reset_current_play_time();

        let mut score = ScoreKeeper::new(config.points_per_second);
        score.set_score(pet.score());

        let alive = pet.stats().is_alive();
        let sleeping = alive && pet.stats().energy() == 0;
        let status = if !alive {
            SessionStatus::GameOver
        } else if sleeping {
            SessionStatus::Asleep
        } else {
            SessionStatus::Running
        };
        if status.is_live() {
            score.start();
        }

        info!(
            pet = pet.name(),
            species = %pet.species(),
            slot = %pet.save_id(),
            ?status,
            "Session started"
        );

        let mut session = Self {
            events: EventBus::new(config.event_capacity),
            state,
            config,
            score,
            status,
            sleeping,
            clock,
        };
        if session.status.is_live() {
            session.enforce_guards();
        }
        session
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// The pet being played.
    #[must_use]
    pub const fn pet(&self) -> &Pet {
        &self.state.pet
    }

    /// Live score, ahead of the pet's stored score until synced.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score.score()
    }

    /// Simulation parameters.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Event bus for observers.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Advances the simulation by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_live() {
            return TickOutcome::Skipped(self.status);
        }

        let before = self.state.pet.stats().state();
        self.apply_decay();
        if self.reconcile(before) {
            return TickOutcome::GameOver;
        }

        self.state.pet.record_play_second();

        match self.enforce_guards() {
            Some(reason) => TickOutcome::Paused(reason),
            None => TickOutcome::Advanced,
        }
    }

    /// Score timer tick. Returns the live score.
    pub fn score_tick(&mut self) -> i64 {
        self.score.tick();
        self.score.score()
    }

    /// Performs a player action as one transaction.
    pub fn dispatch(&mut self, action: PetAction) -> ActionOutcome {
        let blocked = match self.status {
            SessionStatus::GameOver => Some(RejectReason::GameOver),
            SessionStatus::Paused(_) | SessionStatus::Stopped => Some(RejectReason::NotRunning),
            SessionStatus::Asleep if action != PetAction::Sleep => Some(RejectReason::Asleep),
            SessionStatus::Running | SessionStatus::Asleep => None,
        };
        if let Some(reason) = blocked {
            return self.reject(action, reason);
        }

        let pet = &self.state.pet;
        let effect = match action.prepare(pet) {
            Ok(effect) => effect,
            // A sleeping pet can always keep sleeping, whatever its mood
            Err(RejectReason::Angry) if self.status == SessionStatus::Asleep => {
                action.effect(pet.food_item(), pet.gift_item())
            },
            Err(reason) => return self.reject(action, reason),
        };

        let before = self.state.pet.stats().state();
        if let Err(reason) = effect.apply(&mut self.state.pet) {
            return self.reject(action, reason);
        }
        self.score.add(effect.score);
        debug!(%action, deltas = ?effect.deltas, "Action applied");
        self.events.publish(PetEvent::ActionApplied { action });
        self.reconcile(before);

        ActionOutcome::Applied(effect)
    }

    /// Chooses the item Feed or Gift will use, depending on its kind.
    pub fn select_item(&mut self, item: Item) {
        let pet = &mut self.state.pet;
        if item.is_food() {
            pet.select_food(item);
        } else {
            pet.select_gift(item);
        }
        debug!(%item, "Item selected");
    }

    /// Player pause toggle.
    ///
    /// Pauses a live session, or resumes one the player paused. Guard pauses
    /// are left alone.
    pub fn toggle_pause(&mut self) -> SessionStatus {
        match self.status {
            SessionStatus::Running | SessionStatus::Asleep => {
                self.pause(PauseReason::PlayerPaused);
            },
            SessionStatus::Paused(PauseReason::PlayerPaused) => {
                self.acknowledge_pause();
            },
            _ => {},
        }
        self.status
    }

    /// Resumes from any pause if no guard is still violated.
    ///
    /// Returns whether the session resumed.
    pub fn acknowledge_pause(&mut self) -> bool {
        if !matches!(self.status, SessionStatus::Paused(_)) {
            return false;
        }
        if let Some(reason) = self.violated_guard() {
            debug!(%reason, "Pause acknowledged but guard still violated");
            return false;
        }
        self.resume();
        true
    }

    /// Ends the session. Ticks and actions are ignored afterwards.
    pub fn stop(&mut self) {
        self.score.stop();
        self.sync_score();
        self.status = SessionStatus::Stopped;
        info!(pet = self.state.pet.name(), score = self.score.score(), "Session stopped");
    }

    /// Parent-authorized revival of a dead pet.
    pub fn revive(&mut self, controls: &ParentalControls<'_>, pin: &str) -> ParentalResult<()> {
        controls.revive(pin, &mut self.state.pet)?;
        if self.status == SessionStatus::GameOver {
            self.sleeping = false;
            self.status = SessionStatus::Running;
            self.score.start();
        }
        self.events.publish(PetEvent::Revived);
        if self.status.is_live() {
            self.enforce_guards();
        }
        Ok(())
    }

    /// Runs a PIN-gated parental change against the live pet.
    ///
    /// If the session was paused by a guard the change no longer violates,
    /// play resumes.
    pub fn apply_parental<F>(&mut self, controls: &ParentalControls<'_>, change: F) -> ParentalResult<()>
    where
        F: FnOnce(&ParentalControls<'_>, &mut Pet) -> ParentalResult<()>,
    {
        change(controls, &mut self.state.pet)?;
        let guard_paused = matches!(
            self.status,
            SessionStatus::Paused(reason) if reason != PauseReason::PlayerPaused
        );
        if guard_paused && self.violated_guard().is_none() {
            self.resume();
        }
        Ok(())
    }

    /// Copies the live score into the pet.
    pub fn sync_score(&mut self) {
        self.state.pet.set_score(self.score.score());
    }

    /// The game state as of the last sync.
    #[must_use]
    pub const fn game_state(&self) -> &GameState {
        &self.state
    }

    /// Ends ownership, returning the synced game state.
    #[must_use]
    pub fn into_game_state(mut self) -> GameState {
        self.sync_score();
        self.state
    }

    /// Writes the game to the pet's slot.
    pub fn save(&mut self, store: &SaveStore) -> SaveResult<()> {
        self.sync_score();
        self.state.touch();
        store.save_game(self.state.pet.save_id(), &self.state)
    }

    fn apply_decay(&mut self) {
        let profile = self.state.pet.species().profile();
        let sleeping = self.sleeping;
        let recovery = self.config.sleep_recovery_per_tick;
        let stats = self.state.pet.stats_mut();
        let mods = stats.modifiers();

        stats.decrease(Metric::Hunger, (profile.hunger + mods.hunger).max(0));
        stats.decrease(Metric::Happiness, (profile.happiness + mods.happiness).max(0));
        if sleeping {
            stats.increase(Metric::Energy, recovery);
        } else {
            stats.decrease(Metric::Energy, (profile.energy + mods.energy).max(0));
        }
        // Health only suffers from compounding
        if mods.health > 0 {
            stats.decrease(Metric::Health, (mods.health + profile.health_bias).max(0));
        }
    }

    /// Publishes state changes and applies sleep, wake and death.
    ///
    /// Returns true when the pet died.
    fn reconcile(&mut self, before: [u8; 4]) -> bool {
        let stats = self.state.pet.stats();
        let after = stats.state();
        for metric in Metric::ALL {
            let i = metric.index();
            if before[i] == after[i] {
                continue;
            }
            if after[i] != 0 {
                debug!(%metric, "Critical state entered");
                self.events.publish(PetEvent::CriticalEntered { metric });
            } else {
                debug!(%metric, "Critical state cleared");
                self.events.publish(PetEvent::CriticalCleared { metric });
            }
        }
        self.events.publish(PetEvent::StatsChanged {
            values: stats.values(),
        });

        if !stats.is_alive() {
            self.enter_game_over();
            return true;
        }

        let energy = stats.energy();
        if !self.sleeping && energy == 0 {
            self.sleeping = true;
            if self.status == SessionStatus::Running {
                self.status = SessionStatus::Asleep;
            }
            info!(pet = self.state.pet.name(), "Pet fell asleep");
            self.events.publish(PetEvent::FellAsleep);
        } else if self.sleeping && energy >= self.config.wake_energy {
            self.sleeping = false;
            if self.status == SessionStatus::Asleep {
                self.status = SessionStatus::Running;
            }
            info!(pet = self.state.pet.name(), "Pet woke up");
            self.events.publish(PetEvent::WokeUp);
        }
        false
    }

    fn enter_game_over(&mut self) {
        self.score.stop();
        self.sync_score();
        self.sleeping = false;
        self.status = SessionStatus::GameOver;
        warn!(
            pet = self.state.pet.name(),
            score = self.score.score(),
            "Pet died, game over"
        );
        self.events.publish(PetEvent::GameOver {
            score: self.score.score(),
        });
    }

    fn violated_guard(&self) -> Option<PauseReason> {
        if !self.state.parent_controls_enabled {
            return None;
        }
        let pet = &self.state.pet;
        if pet.time_limit_reached() {
            return Some(PauseReason::TimeLimitReached);
        }
        match pet.allowed_window() {
            Some(window) if !window.contains(self.clock.now()) => {
                Some(PauseReason::OutsideAllowedWindow)
            },
            _ => None,
        }
    }

    fn enforce_guards(&mut self) -> Option<PauseReason> {
        let reason = self.violated_guard()?;
        self.pause(reason);
        Some(reason)
    }

    fn pause(&mut self, reason: PauseReason) {
        self.score.stop();
        self.status = SessionStatus::Paused(reason);
        info!(%reason, "Session paused");
        self.events.publish(PetEvent::Paused { reason });
    }

    fn resume(&mut self) {
        self.status = if self.sleeping {
            SessionStatus::Asleep
        } else {
            SessionStatus::Running
        };
        self.score.start();
        info!("Session resumed");
        self.events.publish(PetEvent::Resumed);
    }

    fn reject(&self, action: PetAction, reason: RejectReason) -> ActionOutcome {
        debug!(%action, %reason, "Action rejected");
        self.events.publish(PetEvent::ActionRejected { action, reason });
        ActionOutcome::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parental::ParentalError;
    use crate::prefs::UserPreferences;
    use crate::species::Species;
    use petkeeper_common::SaveSlot;
    use tempfile::TempDir;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn session_with(pet: Pet, parent_controls: bool, clock: ManualClock) -> Session {
        Session::start(
            GameState::new(pet, parent_controls),
            SimConfig::default(),
            Box::new(clock),
        )
    }

    fn buddy() -> Pet {
        Pet::new("Buddy", Species::Mole, SaveSlot::new(1))
    }

    fn session() -> Session {
        session_with(buddy(), false, ManualClock::new(at(12, 0)))
    }

    #[test]
    fn test_feed_then_five_ticks() {
        let mut session = session();
        assert!(session.dispatch(PetAction::Feed).is_applied());

        let pet = session.pet();
        assert_eq!(pet.stats().hunger(), 100);
        assert_eq!(pet.stats().happiness(), 80);
        assert_eq!(pet.inventory().count(Item::Kibble), 98);

        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Advanced);
        }
        let stats = session.pet().stats();
        assert_eq!(stats.hunger(), 95);
        assert_eq!(stats.happiness(), 75);
        assert_eq!(stats.energy(), 95);
        assert_eq!(session.pet().total_time_spent(), 5);
        assert_eq!(session.pet().current_play_time(), 5);
    }

    #[test]
    fn test_critical_hunger_raises_modifier() {
        let mut session = session();
        session.tick();
        let mut state = session.into_game_state();
        state.pet.stats_mut().set_hunger(10);
        assert_eq!(state.pet.stats().state()[0], 1);
        assert_ne!(state.pet.stats().modifier(Metric::Hunger), 0);
    }

    #[test]
    fn test_species_decay_differs() {
        let mut cat = session_with(
            Pet::new("Tom", Species::Cat, SaveSlot::new(1)),
            false,
            ManualClock::new(at(12, 0)),
        );
        cat.tick();
        assert_eq!(cat.pet().stats().hunger(), 78);
        assert_eq!(cat.pet().stats().energy(), 100);
    }

    #[test]
    fn test_energy_zero_sleeps_and_wakes() {
        let mut pet = buddy();
        pet.stats_mut().set_energy(1);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));

        session.tick();
        assert_eq!(session.status(), SessionStatus::Asleep);
        assert!(session.events().drain().contains(&PetEvent::FellAsleep));

        assert_eq!(
            session.dispatch(PetAction::Play),
            ActionOutcome::Rejected(RejectReason::Asleep)
        );
        assert!(session.dispatch(PetAction::Sleep).is_applied());

        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.status(), SessionStatus::Running);
        assert!(session.events().drain().contains(&PetEvent::WokeUp));
    }

    #[test]
    fn test_angry_pet_refuses_exercise() {
        let mut pet = buddy();
        pet.stats_mut().set_happiness(10);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));

        assert_eq!(
            session.dispatch(PetAction::Exercise),
            ActionOutcome::Rejected(RejectReason::Angry)
        );
        assert_eq!(
            session.dispatch(PetAction::Vet),
            ActionOutcome::Rejected(RejectReason::Angry)
        );
        assert!(session.dispatch(PetAction::Play).is_applied());
    }

    #[test]
    fn test_health_zero_ends_session() {
        let mut pet = buddy();
        pet.stats_mut().set_health(30);
        pet.select_gift(Item::Candy);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));
        session.score_tick();

        assert!(session.dispatch(PetAction::Gift).is_applied());
        assert_eq!(session.status(), SessionStatus::GameOver);
        assert_eq!(session.tick(), TickOutcome::Skipped(SessionStatus::GameOver));
        assert_eq!(
            session.dispatch(PetAction::Feed),
            ActionOutcome::Rejected(RejectReason::GameOver)
        );

        let score = session.score();
        session.score_tick();
        assert_eq!(session.score(), score);
        assert!(session
            .events()
            .drain()
            .iter()
            .any(|e| matches!(e, PetEvent::GameOver { .. })));
    }

    #[test]
    fn test_starving_pet_dies_on_tick() {
        let mut pet = buddy();
        pet.stats_mut().set_hunger(0);
        pet.stats_mut().set_health(1);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));

        assert_eq!(session.tick(), TickOutcome::GameOver);
        assert_eq!(session.pet().total_time_spent(), 0);
    }

    #[test]
    fn test_time_limit_pauses() {
        let mut pet = buddy();
        pet.set_time_limit(3);
        let mut session = session_with(pet, true, ManualClock::new(at(12, 0)));

        assert_eq!(session.tick(), TickOutcome::Advanced);
        assert_eq!(session.tick(), TickOutcome::Advanced);
        assert_eq!(session.tick(), TickOutcome::Paused(PauseReason::TimeLimitReached));
        assert_eq!(
            session.status(),
            SessionStatus::Paused(PauseReason::TimeLimitReached)
        );
        assert!(!session.acknowledge_pause());
        assert_eq!(
            session.tick(),
            TickOutcome::Skipped(SessionStatus::Paused(PauseReason::TimeLimitReached))
        );
    }

    #[test]
    fn test_parent_extends_time_limit_mid_session() {
        let mut prefs = UserPreferences::default();
        ParentalControls::set_pin(&mut prefs, "2468", "2468").expect("pin");
        let controls = ParentalControls::new(&prefs);

        let mut pet = buddy();
        pet.set_time_limit(3);
        let mut session = session_with(pet, true, ManualClock::new(at(12, 0)));
        assert_eq!(session.tick(), TickOutcome::Advanced);
        assert_eq!(session.tick(), TickOutcome::Advanced);
        assert_eq!(session.tick(), TickOutcome::Paused(PauseReason::TimeLimitReached));

        let wrong = session.apply_parental(&controls, |controls, pet| {
            controls.set_time_limit_minutes("0000", pet, 5)
        });
        assert_eq!(wrong, Err(ParentalError::WrongPin));
        assert_eq!(
            session.status(),
            SessionStatus::Paused(PauseReason::TimeLimitReached)
        );

        session
            .apply_parental(&controls, |controls, pet| {
                controls.set_time_limit_minutes("2468", pet, 5)
            })
            .expect("extend limit");
        assert_eq!(session.status(), SessionStatus::Running);
        assert!(session.events().drain().contains(&PetEvent::Resumed));
        assert_eq!(session.tick(), TickOutcome::Advanced);
    }

    #[test]
    fn test_parental_change_keeps_player_pause() {
        let mut prefs = UserPreferences::default();
        ParentalControls::set_pin(&mut prefs, "2468", "2468").expect("pin");
        let controls = ParentalControls::new(&prefs);

        let mut session = session_with(buddy(), true, ManualClock::new(at(12, 0)));
        session.toggle_pause();
        session
            .apply_parental(&controls, |controls, pet| {
                controls.set_item_count("2468", pet, Item::Kibble, 10)
            })
            .expect("items");
        assert_eq!(
            session.status(),
            SessionStatus::Paused(PauseReason::PlayerPaused)
        );
        assert_eq!(session.pet().inventory().count(Item::Kibble), 10);
    }

    #[test]
    fn test_time_limit_ignored_without_parent_controls() {
        let mut pet = buddy();
        pet.set_time_limit(1);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));
        assert_eq!(session.tick(), TickOutcome::Advanced);
        assert_eq!(session.tick(), TickOutcome::Advanced);
    }

    #[test]
    fn test_window_guard_pauses_and_resumes() {
        let clock = ManualClock::new(at(19, 59));
        let mut pet = buddy();
        pet.set_allowed_window(Some(crate::playtime::AllowedWindow::new(at(8, 0), at(20, 0))));
        let mut session = session_with(pet, true, clock.clone());

        assert_eq!(session.tick(), TickOutcome::Advanced);
        clock.set(at(20, 0));
        assert_eq!(
            session.tick(),
            TickOutcome::Paused(PauseReason::OutsideAllowedWindow)
        );
        assert!(!session.acknowledge_pause());

        clock.set(at(8, 0));
        assert!(session.acknowledge_pause());
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_start_outside_window_is_paused() {
        let mut pet = buddy();
        pet.set_allowed_window(Some(crate::playtime::AllowedWindow::new(at(8, 0), at(20, 0))));
        let session = session_with(pet, true, ManualClock::new(at(23, 0)));
        assert_eq!(
            session.status(),
            SessionStatus::Paused(PauseReason::OutsideAllowedWindow)
        );
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = session();
        assert_eq!(
            session.toggle_pause(),
            SessionStatus::Paused(PauseReason::PlayerPaused)
        );
        assert_eq!(
            session.dispatch(PetAction::Play),
            ActionOutcome::Rejected(RejectReason::NotRunning)
        );
        session.score_tick();
        assert_eq!(session.score(), 0);

        assert_eq!(session.toggle_pause(), SessionStatus::Running);
        session.score_tick();
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_score_bonus_and_sync() {
        let mut session = session();
        session.score_tick();
        session.dispatch(PetAction::Play);
        assert_eq!(session.score(), 60);
        assert_eq!(session.pet().score(), 0);

        session.sync_score();
        assert_eq!(session.game_state().pet.score(), 60);
    }

    #[test]
    fn test_revive_requires_pin() {
        let mut prefs = UserPreferences::default();
        ParentalControls::set_pin(&mut prefs, "2468", "2468").expect("pin");
        let controls = ParentalControls::new(&prefs);

        let mut pet = buddy();
        pet.stats_mut().set_health(0);
        let mut session = session_with(pet, true, ManualClock::new(at(12, 0)));
        assert_eq!(session.status(), SessionStatus::GameOver);

        assert!(session.revive(&controls, "1111").is_err());
        assert_eq!(session.status(), SessionStatus::GameOver);

        session.revive(&controls, "2468").expect("revive");
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.pet().stats().health(), 100);
        assert_eq!(session.tick(), TickOutcome::Advanced);
    }

    #[test]
    fn test_angry_sleeping_pet_can_keep_sleeping() {
        let mut pet = buddy();
        pet.stats_mut().set_energy(1);
        pet.stats_mut().set_happiness(5);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));

        session.tick();
        assert_eq!(session.status(), SessionStatus::Asleep);
        assert!(session.pet().stats().is_angry());

        assert!(session.dispatch(PetAction::Sleep).is_applied());
        assert_eq!(session.pet().stats().energy(), 10);
        assert_eq!(
            session.dispatch(PetAction::Vet),
            ActionOutcome::Rejected(RejectReason::Asleep)
        );
    }

    #[test]
    fn test_out_of_range_save_is_clamped_on_start() {
        let mut value = serde_json::to_value(GameState::new(buddy(), false)).expect("to value");
        value["pet"]["stats"]["hunger"] = 500.into();
        value["pet"]["stats"]["happiness"] = (-40).into();
        value["pet"]["inventory"]["item1"] = 5000.into();
        let state: GameState = serde_json::from_value(value).expect("from value");

        let session = Session::start(state, SimConfig::default(), Box::new(ManualClock::new(at(12, 0))));
        let stats = session.pet().stats();
        assert_eq!(stats.hunger(), 100);
        assert_eq!(stats.happiness(), 0);
        assert!(stats.is_angry());
        assert_eq!(session.pet().inventory().count(Item::Kibble), 99);
    }

    #[test]
    fn test_select_item() {
        let mut session = session();
        session.select_item(Item::Fish);
        session.select_item(Item::Feast);
        assert_eq!(session.pet().food_item(), Item::Fish);
        assert_eq!(session.pet().gift_item(), Item::Feast);

        assert!(session.dispatch(PetAction::Gift).is_applied());
        assert_eq!(session.pet().inventory().count(Item::Feast), 99);
        assert!(session.dispatch(PetAction::Gift).is_applied());
        assert_eq!(session.pet().inventory().count(Item::Feast), 98);
    }

    #[test]
    fn test_stop() {
        let mut session = session();
        session.stop();
        assert_eq!(session.tick(), TickOutcome::Skipped(SessionStatus::Stopped));
        assert_eq!(
            session.dispatch(PetAction::Feed),
            ActionOutcome::Rejected(RejectReason::NotRunning)
        );
    }

    #[test]
    fn test_start_resets_session_time_and_seeds_score() {
        let mut pet = buddy();
        pet.record_play_second();
        pet.set_score(500);
        let mut session = session_with(pet, false, ManualClock::new(at(12, 0)));
        assert_eq!(session.pet().current_play_time(), 0);
        assert_eq!(session.pet().total_time_spent(), 1);
        assert_eq!(session.score_tick(), 510);
    }

    #[test]
    fn test_save_writes_slot() {
        let temp = TempDir::new().expect("temp dir");
        let store = SaveStore::new(temp.path());
        let mut session = session();
        session.dispatch(PetAction::Feed);
        session.score_tick();
        session.save(&store).expect("save");

        let loaded = store.load_game(SaveSlot::new(1)).expect("load");
        assert_eq!(loaded.pet.score(), 10);
        assert_eq!(loaded.pet.stats().hunger(), 100);
        assert_eq!(&loaded, session.game_state());
    }
}
