//! Test Fixtures
//!
//! Provides shared test helpers for creating combatants, sessions,
//! scripted dice, and storage doubles.

use std::collections::VecDeque;

use crate::core::dice::DiceSource;
use crate::core::session::combat::{CombatSession, Combatant, CombatantKind};
use crate::storage::{KeyValueStore, StorageError};

// =============================================================================
// Logging
// =============================================================================

/// Initialize env_logger once for tests that exercise logged fallbacks.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Dice Fixtures
// =============================================================================

/// Dice source that replays a scripted sequence of d10 faces.
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(rolls: &[u32]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn d10(&mut self) -> u32 {
        self.rolls
            .pop_front()
            .expect("scripted dice ran out of rolls")
    }
}

// =============================================================================
// Combatant Fixtures
// =============================================================================

/// Create a test combatant with explicit REF and HP (default armor).
pub fn create_test_combatant(name: &str, reflex: i32, hp: u32) -> Combatant {
    Combatant::new(name, CombatantKind::Pc)
        .with_reflex(reflex)
        .with_hp(hp)
}

/// Create an enemy with the default stat line.
pub fn create_enemy(name: &str) -> Combatant {
    Combatant::new(name, CombatantKind::Enemy)
}

/// Session with two combatants: Raze (REF 7, 40 HP) and Dummy (REF 3, 10 HP).
pub fn create_test_session() -> CombatSession {
    let mut session = CombatSession::new();
    session
        .add_combatant(create_test_combatant("Raze", 7, 40))
        .expect("add Raze");
    session
        .add_combatant(create_test_combatant("Dummy", 3, 10))
        .expect("add Dummy");
    session
}

/// Id of the named combatant.
pub fn id_of(session: &CombatSession, name: &str) -> String {
    session
        .combatants
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id.clone())
        .expect("combatant not found")
}

// =============================================================================
// Storage Doubles
// =============================================================================

/// Store whose writes always fail; reads can be made to fail too.
pub struct FailingStore {
    fail_reads: bool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self { fail_reads: false }
    }

    pub fn failing_reads() -> Self {
        Self { fail_reads: true }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            Err(StorageError::Backend("read refused".to_string()))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("remove refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_dice_replays_in_order() {
        let mut dice = ScriptedDice::new(&[6, 2, 10]);
        assert_eq!(dice.d10(), 6);
        assert_eq!(dice.d10(), 2);
        assert_eq!(dice.d10(), 10);
    }

    #[test]
    fn test_create_test_session() {
        let session = create_test_session();
        assert_eq!(session.len(), 2);
        assert_eq!(session.combatants[0].name, "Raze");
        assert_eq!(session.combatants[1].hp.current, 10);
    }

    #[test]
    fn test_create_enemy_uses_defaults() {
        let enemy = create_enemy("Scorpion");
        assert_eq!(enemy.kind, CombatantKind::Enemy);
        assert_eq!(enemy.armor.body.current, 11);
    }
}
