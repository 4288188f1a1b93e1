//! Combat session: roster, initiative order, turn flow, event log.

pub mod combat;
pub mod conditions;
pub mod log;
pub mod tracker;

pub use combat::{
    Armor, ArmorValue, CombatError, CombatResult, CombatSession, Combatant, CombatantKind,
    DamageReport, HealReport, HitLocation, HitPoints, InitiativeRoll,
};
pub use conditions::{ConditionTemplates, DEAD_STATUS};
pub use log::{CombatLog, LogEntry, LogKind, LOG_CAP, LOG_DISPLAY};
pub use tracker::CombatTracker;
