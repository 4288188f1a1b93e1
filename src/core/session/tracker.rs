//! Combat Tracker
//!
//! Facade the screen talks to: one combat session wired to one persistence
//! target. Every mutating operation is followed by a fire-and-forget save,
//! so reloading the screen mid-fight comes back to the same state. Save
//! failures are logged by the store and never roll back the mutation.

use crate::config::AppConfig;
use crate::core::dice::DiceRoller;
use crate::core::session::combat::{
    CombatResult, CombatSession, Combatant, DamageReport, HealReport, HitLocation,
    InitiativeRoll,
};
use crate::storage::{FileStore, KeyValueStore, SessionStore};

/// Combat session plus persistence plus dice.
pub struct CombatTracker<S: KeyValueStore> {
    session: CombatSession,
    store: SessionStore<S>,
    roller: DiceRoller,
    autosave: bool,
}

impl CombatTracker<FileStore> {
    /// Tracker wired from application config: session document under the
    /// configured key, stored as a file in the data directory.
    pub fn from_config(config: &AppConfig) -> Self {
        let store = SessionStore::new(FileStore::new(config.data_dir()))
            .with_key(config.combat.storage_key.clone());
        Self::restore(store).with_autosave(config.combat.autosave)
    }
}

impl<S: KeyValueStore> CombatTracker<S> {
    /// Fresh tracker over an empty session.
    pub fn new(store: SessionStore<S>) -> Self {
        Self {
            session: CombatSession::new(),
            store,
            roller: DiceRoller::new(),
            autosave: true,
        }
    }

    /// Resume from whatever the store holds; a missing or unreadable
    /// document starts fresh.
    pub fn restore(store: SessionStore<S>) -> Self {
        let session = store.load();
        Self {
            session,
            store,
            roller: DiceRoller::new(),
            autosave: true,
        }
    }

    /// Swap in a seeded roller for reproducible initiative.
    pub fn with_roller(mut self, roller: DiceRoller) -> Self {
        self.roller = roller;
        self
    }

    /// Turn autosave off; mutations then persist only on [`save`](Self::save).
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn session(&self) -> &CombatSession {
        &self.session
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Persist the session now. Only needed with autosave off.
    pub fn save(&mut self) {
        self.store.save(&self.session);
    }

    fn persist(&mut self) {
        if self.autosave {
            self.store.save(&self.session);
        }
    }

    // ------------------------------------------------------------------
    // Operations (session ops + persistence)
    // ------------------------------------------------------------------

    pub fn add_combatant(&mut self, combatant: Combatant) -> CombatResult<String> {
        let id = self.session.add_combatant(combatant)?;
        self.persist();
        Ok(id)
    }

    pub fn remove_combatant(&mut self, id: &str) -> CombatResult<Combatant> {
        let removed = self.session.remove_combatant(id)?;
        self.persist();
        Ok(removed)
    }

    pub fn apply_damage(
        &mut self,
        id: &str,
        amount: i32,
        location: HitLocation,
    ) -> CombatResult<DamageReport> {
        let report = self.session.apply_damage(id, amount, location)?;
        self.persist();
        Ok(report)
    }

    pub fn heal(&mut self, id: &str, amount: i32) -> CombatResult<HealReport> {
        let report = self.session.heal(id, amount)?;
        self.persist();
        Ok(report)
    }

    pub fn set_armor(&mut self, id: &str, body: Option<i32>, head: Option<i32>) -> CombatResult<()> {
        self.session.set_armor(id, body, head)?;
        self.persist();
        Ok(())
    }

    pub fn add_status(&mut self, id: &str, tag: &str) -> CombatResult<bool> {
        let added = self.session.add_status(id, tag)?;
        self.persist();
        Ok(added)
    }

    pub fn remove_status(&mut self, id: &str, tag: &str) -> CombatResult<bool> {
        let removed = self.session.remove_status(id, tag)?;
        self.persist();
        Ok(removed)
    }

    pub fn roll_initiative(&mut self, id: &str) -> CombatResult<Option<InitiativeRoll>> {
        let roll = self.session.roll_initiative(id, &mut self.roller)?;
        self.persist();
        Ok(roll)
    }

    pub fn roll_all_initiative(&mut self) -> usize {
        let rolled = self.session.roll_all_initiative(&mut self.roller);
        self.persist();
        rolled
    }

    pub fn toggle_combat(&mut self) -> bool {
        let active = self.session.toggle_combat();
        self.persist();
        active
    }

    pub fn next_turn(&mut self) -> bool {
        let advanced = self.session.next_turn();
        if advanced {
            self.persist();
        }
        advanced
    }

    pub fn clear_combat(&mut self) {
        self.session.clear_combat();
        self.persist();
    }

    pub fn clear_log(&mut self) {
        self.session.clear_log();
        self.persist();
    }
}
