//! PIN-gated parental controls.
//!
//! Every gated operation needs the controls enabled and the correct PIN.

use thiserror::Error;
use tracing::info;

use crate::inventory::Item;
use crate::pet::Pet;
use crate::playtime::AllowedWindow;
use crate::prefs::UserPreferences;

/// Shortest PIN accepted.
pub const MIN_PIN_LENGTH: usize = 4;

/// Parental control errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParentalError {
    /// Controls are off or no PIN exists
    #[error("parental controls are disabled")]
    ControlsDisabled,
    /// PIN didn't match
    #[error("incorrect PIN")]
    WrongPin,
    /// PIN and confirmation differ
    #[error("PINs do not match")]
    PinMismatch,
    /// PIN isn't all digits or is too short
    #[error("PIN must be at least {} digits", MIN_PIN_LENGTH)]
    InvalidPin,
    /// Time of day couldn't be parsed
    #[error("invalid time: {0}")]
    InvalidTime(String),
    /// Revival requested for a living pet
    #[error("the pet is still alive")]
    PetAlive,
}

/// Result type for parental operations.
pub type ParentalResult<T> = Result<T, ParentalError>;

/// Gatekeeper over a pet's parental settings.
#[derive(Debug, Clone, Copy)]
pub struct ParentalControls<'a> {
    prefs: &'a UserPreferences,
}

impl<'a> ParentalControls<'a> {
    /// Borrows the preferences holding the PIN.
    #[must_use]
    pub const fn new(prefs: &'a UserPreferences) -> Self {
        Self { prefs }
    }

    /// Whether a PIN has been created.
    #[must_use]
    pub fn has_pin(&self) -> bool {
        self.prefs.has_pin()
    }

    /// Creates the PIN and turns the controls on.
    pub fn set_pin(prefs: &mut UserPreferences, pin: &str, confirm: &str) -> ParentalResult<()> {
        if pin.len() < MIN_PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParentalError::InvalidPin);
        }
        if pin != confirm {
            return Err(ParentalError::PinMismatch);
        }
        prefs.parent_password = pin.to_string();
        prefs.parent_controls_enabled = true;
        info!("Parent PIN set");
        Ok(())
    }

    /// Removes the parent profile and disables the controls.
    pub fn remove_profile(prefs: &mut UserPreferences) {
        prefs.parent_password.clear();
        prefs.parent_username.clear();
        prefs.parent_controls_enabled = false;
        info!("Parent profile removed");
    }

    /// Checks a PIN.
    #[must_use]
    pub fn verify(&self, pin: &str) -> bool {
        self.has_pin() && self.prefs.parent_password == pin
    }

    fn authorize(&self, pin: &str) -> ParentalResult<()> {
        if !self.prefs.parent_controls_enabled || !self.has_pin() {
            return Err(ParentalError::ControlsDisabled);
        }
        if !self.verify(pin) {
            return Err(ParentalError::WrongPin);
        }
        Ok(())
    }

    /// Brings a dead pet back at full stats.
    pub fn revive(&self, pin: &str, pet: &mut Pet) -> ParentalResult<()> {
        self.authorize(pin)?;
        if pet.stats().is_alive() {
            return Err(ParentalError::PetAlive);
        }
        pet.stats_mut().restore_all();
        info!(pet = pet.name(), "Pet revived");
        Ok(())
    }

    /// Sets the per-session limit. Zero removes it.
    pub fn set_time_limit_minutes(&self, pin: &str, pet: &mut Pet, minutes: u64) -> ParentalResult<()> {
        self.authorize(pin)?;
        pet.set_time_limit(minutes.saturating_mul(60));
        info!(pet = pet.name(), minutes, "Time limit set");
        Ok(())
    }

    /// Restricts play to a daily window given as `H:mm` / `HH:mm`.
    pub fn set_allowed_window(&self, pin: &str, pet: &mut Pet, start: &str, end: &str) -> ParentalResult<()> {
        self.authorize(pin)?;
        let window =
            AllowedWindow::parse(start, end).map_err(|e| ParentalError::InvalidTime(e.to_string()))?;
        pet.set_allowed_window(Some(window));
        info!(pet = pet.name(), start, end, "Allowed window set");
        Ok(())
    }

    /// Removes the daily window.
    pub fn clear_allowed_window(&self, pin: &str, pet: &mut Pet) -> ParentalResult<()> {
        self.authorize(pin)?;
        pet.set_allowed_window(None);
        Ok(())
    }

    /// Zeroes lifetime play time.
    pub fn reset_total_time(&self, pin: &str, pet: &mut Pet) -> ParentalResult<()> {
        self.authorize(pin)?;
        pet.reset_total_time();
        Ok(())
    }

    /// Overwrites an item count, clamped like any inventory edit.
    pub fn set_item_count(&self, pin: &str, pet: &mut Pet, item: Item, count: i32) -> ParentalResult<()> {
        self.authorize(pin)?;
        pet.inventory_mut().set(item, count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use petkeeper_common::SaveSlot;

    fn prefs_with_pin() -> UserPreferences {
        let mut prefs = UserPreferences::default();
        ParentalControls::set_pin(&mut prefs, "1234", "1234").expect("set pin");
        prefs
    }

    fn pet() -> Pet {
        Pet::new("Buddy", Species::Mole, SaveSlot::new(1))
    }

    #[test]
    fn test_set_pin_validation() {
        let mut prefs = UserPreferences::default();
        assert_eq!(
            ParentalControls::set_pin(&mut prefs, "12", "12"),
            Err(ParentalError::InvalidPin)
        );
        assert_eq!(
            ParentalControls::set_pin(&mut prefs, "12ab", "12ab"),
            Err(ParentalError::InvalidPin)
        );
        assert_eq!(
            ParentalControls::set_pin(&mut prefs, "1234", "1235"),
            Err(ParentalError::PinMismatch)
        );
        assert!(!prefs.has_pin());

        ParentalControls::set_pin(&mut prefs, "1234", "1234").expect("set pin");
        assert!(prefs.parent_controls_enabled);
        assert!(ParentalControls::new(&prefs).verify("1234"));
    }

    #[test]
    fn test_revive_requires_pin() {
        let prefs = prefs_with_pin();
        let controls = ParentalControls::new(&prefs);
        let mut pet = pet();
        pet.stats_mut().set_health(0);

        assert_eq!(controls.revive("0000", &mut pet), Err(ParentalError::WrongPin));
        assert!(!pet.stats().is_alive());

        controls.revive("1234", &mut pet).expect("revive");
        assert_eq!(pet.stats().values(), [100, 100, 100, 100]);
        assert_eq!(controls.revive("1234", &mut pet), Err(ParentalError::PetAlive));
    }

    #[test]
    fn test_disabled_controls_refuse() {
        let mut prefs = prefs_with_pin();
        prefs.parent_controls_enabled = false;
        let controls = ParentalControls::new(&prefs);
        let mut pet = pet();
        assert_eq!(
            controls.set_time_limit_minutes("1234", &mut pet, 30),
            Err(ParentalError::ControlsDisabled)
        );
    }

    #[test]
    fn test_remove_profile() {
        let mut prefs = prefs_with_pin();
        ParentalControls::remove_profile(&mut prefs);
        assert!(!prefs.has_pin());
        assert!(!prefs.parent_controls_enabled);
        assert!(!ParentalControls::new(&prefs).verify(""));
    }

    #[test]
    fn test_time_limit_and_window() {
        let prefs = prefs_with_pin();
        let controls = ParentalControls::new(&prefs);
        let mut pet = pet();

        controls.set_time_limit_minutes("1234", &mut pet, 30).expect("limit");
        assert_eq!(pet.time_limit(), 1800);

        controls
            .set_allowed_window("1234", &mut pet, "8:00", "20:30")
            .expect("window");
        assert!(pet.allowed_window().is_some());

        let err = controls
            .set_allowed_window("1234", &mut pet, "8", "20:30")
            .expect_err("bad time");
        assert!(matches!(err, ParentalError::InvalidTime(_)));

        controls.clear_allowed_window("1234", &mut pet).expect("clear");
        assert!(pet.allowed_window().is_none());
    }

    #[test]
    fn test_item_count_and_total_time() {
        let prefs = prefs_with_pin();
        let controls = ParentalControls::new(&prefs);
        let mut pet = pet();
        pet.record_play_second();

        controls
            .set_item_count("1234", &mut pet, Item::Feast, 500)
            .expect("items");
        assert_eq!(pet.inventory().count(Item::Feast), 99);

        controls.reset_total_time("1234", &mut pet).expect("reset");
        assert_eq!(pet.total_time_spent(), 0);
    }
}
