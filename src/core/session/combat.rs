//! Combat Session
//!
//! State machine for one encounter: the combatant roster, initiative order,
//! round counter, turn cursor, and the combat log. Operations validate input
//! at this boundary, mutate state, and record log entries; persistence is
//! wired on top by the tracker facade.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::dice::DiceSource;
use crate::core::session::conditions::DEAD_STATUS;
use crate::core::session::log::{CombatLog, LogKind};

/// Default REF attribute for a new combatant.
pub const DEFAULT_REFLEX: i32 = 5;

/// Default hit point maximum for a new combatant.
pub const DEFAULT_HP: u32 = 40;

/// Default stopping power per armor location (Light Armorjack).
pub const DEFAULT_SP: u32 = 11;

/// Persistence schema version written with every session document.
pub const SESSION_VERSION: u32 = 1;

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by combat session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("Combatant name must not be empty")]
    EmptyName,

    #[error("Combatant not found: {0}")]
    UnknownCombatant(String),

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i32),

    #[error("Status tag must not be empty")]
    EmptyStatus,

    #[error("Status '{0}' is managed automatically")]
    ReservedStatus(String),
}

pub type CombatResult<T> = Result<T, CombatError>;

// ============================================================================
// Combatant
// ============================================================================

/// Participant role. Display only; every kind follows the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantKind {
    Pc,
    #[default]
    Npc,
    Enemy,
}

impl CombatantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatantKind::Pc => "PC",
            CombatantKind::Npc => "NPC",
            CombatantKind::Enemy => "Enemy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pc" | "player" => Some(CombatantKind::Pc),
            "npc" => Some(CombatantKind::Npc),
            "enemy" => Some(CombatantKind::Enemy),
            _ => None,
        }
    }
}

impl std::fmt::Display for CombatantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hit point pool. `current` stays in `[0, max]` under damage and healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: u32,
    pub max: u32,
}

impl HitPoints {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Heal up to `amount`, clamped at `max`. Returns the healing applied.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max.saturating_sub(self.current));
        self.current += healed;
        healed
    }

    pub fn is_down(&self) -> bool {
        self.current == 0
    }
}

/// Stopping power for one hit location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorValue {
    pub current: u32,
    pub max: u32,
}

impl ArmorValue {
    pub fn new(sp: u32) -> Self {
        Self { current: sp, max: sp }
    }

    /// Lose one point of stopping power, to a floor of 0.
    pub fn ablate(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

/// Body and head armor, tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub body: ArmorValue,
    pub head: ArmorValue,
}

impl Armor {
    pub fn new(body_sp: u32, head_sp: u32) -> Self {
        Self {
            body: ArmorValue::new(body_sp),
            head: ArmorValue::new(head_sp),
        }
    }

    pub fn at(&self, location: HitLocation) -> &ArmorValue {
        match location {
            HitLocation::Body => &self.body,
            HitLocation::Head => &self.head,
        }
    }

    pub fn at_mut(&mut self, location: HitLocation) -> &mut ArmorValue {
        match location {
            HitLocation::Body => &mut self.body,
            HitLocation::Head => &mut self.head,
        }
    }
}

impl Default for Armor {
    fn default() -> Self {
        Self::new(DEFAULT_SP, DEFAULT_SP)
    }
}

/// Where a hit lands. Armor is ablated per location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitLocation {
    Body,
    Head,
}

impl HitLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitLocation::Body => "body",
            HitLocation::Head => "head",
        }
    }
}

impl std::fmt::Display for HitLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One participant in the encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CombatantKind,
    #[serde(rename = "ref")]
    pub reflex: i32,
    pub hp: HitPoints,
    pub armor: Armor,
    #[serde(default)]
    pub initiative: i32,
    #[serde(default)]
    pub status: Vec<String>,
}

impl Combatant {
    /// New combatant with the screen's default stat line.
    pub fn new(name: &str, kind: CombatantKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind,
            reflex: DEFAULT_REFLEX,
            hp: HitPoints::new(DEFAULT_HP),
            armor: Armor::default(),
            initiative: 0,
            status: Vec::new(),
        }
    }

    pub fn with_reflex(mut self, reflex: i32) -> Self {
        self.reflex = reflex;
        self
    }

    pub fn with_hp(mut self, max: u32) -> Self {
        self.hp = HitPoints::new(max);
        self
    }

    pub fn with_armor(mut self, body_sp: u32, head_sp: u32) -> Self {
        self.armor = Armor::new(body_sp, head_sp);
        self
    }

    pub fn is_down(&self) -> bool {
        self.hp.is_down()
    }

    pub fn has_status(&self, tag: &str) -> bool {
        self.status.iter().any(|s| s == tag)
    }

    /// Add a status tag unless already present. Returns true when added.
    pub fn add_status_tag(&mut self, tag: &str) -> bool {
        if self.has_status(tag) {
            return false;
        }
        self.status.push(tag.to_string());
        true
    }

    /// Remove a status tag. Returns true when it was present.
    pub fn remove_status_tag(&mut self, tag: &str) -> bool {
        let before = self.status.len();
        self.status.retain(|s| s != tag);
        self.status.len() != before
    }
}

// ============================================================================
// Operation Reports
// ============================================================================

/// Breakdown of a single initiative roll: d10 + REF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeRoll {
    pub die: u32,
    pub reflex: i32,
    pub total: i32,
}

/// Outcome of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage soaked by armor at the hit location.
    pub absorbed: u32,
    /// Damage applied to HP after absorption.
    pub applied: u32,
    /// HP remaining after the hit.
    pub remaining: u32,
    /// True when this hit dropped the combatant to 0 HP.
    pub downed: bool,
}

/// Outcome of a heal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealReport {
    /// Healing applied after clamping at max HP.
    pub healed: u32,
    /// HP after the heal.
    pub remaining: u32,
    /// True when the heal brought the combatant back above 0 HP.
    pub revived: bool,
}

// ============================================================================
// Combat Session
// ============================================================================

/// Full encounter state. Fields are public for the screen's read paths;
/// mutation goes through the operations so the log and invariants hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatSession {
    pub version: u32,
    pub combatants: Vec<Combatant>,
    pub round: u32,
    pub current_turn: usize,
    #[serde(rename = "combatActive")]
    pub active: bool,
    #[serde(rename = "combatLog")]
    pub log: CombatLog,
}

impl Default for CombatSession {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            combatants: Vec::new(),
            round: 1,
            current_turn: 0,
            active: false,
            log: CombatLog::new(),
        }
    }
}

impl CombatSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    /// Add a combatant to the end of the roster (no re-sort until the next
    /// initiative roll). The trimmed name must be non-empty. Returns the id.
    pub fn add_combatant(&mut self, mut combatant: Combatant) -> CombatResult<String> {
        let name = combatant.name.trim();
        if name.is_empty() {
            return Err(CombatError::EmptyName);
        }
        combatant.name = name.to_string();

        let id = combatant.id.clone();
        self.log
            .record(format!("{} joined combat", combatant.name), LogKind::Info);
        self.combatants.push(combatant);
        Ok(id)
    }

    /// Remove a combatant by id and hand it back. The turn cursor is clamped
    /// into the shortened roster. Destructive; confirmation is on the caller.
    pub fn remove_combatant(&mut self, id: &str) -> CombatResult<Combatant> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;
        let removed = self.combatants.remove(idx);

        if self.combatants.is_empty() {
            self.current_turn = 0;
        } else {
            self.current_turn = self.current_turn.min(self.combatants.len() - 1);
        }

        self.log
            .record(format!("{} left combat", removed.name), LogKind::Info);
        Ok(removed)
    }

    pub fn combatant(&self, id: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: &str) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Combatant under the turn cursor, if the roster is non-empty.
    pub fn current_combatant(&self) -> Option<&Combatant> {
        self.combatants.get(self.current_turn)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    // ------------------------------------------------------------------
    // Damage and healing
    // ------------------------------------------------------------------

    /// Apply damage to one hit location.
    ///
    /// Armor at the location soaks up to its current stopping power and
    /// ablates by exactly 1 point when it soaked anything; the remainder
    /// comes off HP, floored at 0. Dropping to 0 adds the death tag and
    /// logs it. `amount` must be positive.
    pub fn apply_damage(
        &mut self,
        id: &str,
        amount: i32,
        location: HitLocation,
    ) -> CombatResult<DamageReport> {
        if amount <= 0 {
            return Err(CombatError::InvalidAmount(amount));
        }
        let raw = amount as u32;

        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;
        let combatant = &mut self.combatants[idx];

        let sp = combatant.armor.at(location).current;
        let (absorbed, applied) = if sp > 0 {
            combatant.armor.at_mut(location).ablate();
            (raw.min(sp), raw.saturating_sub(sp))
        } else {
            (0, raw)
        };

        let was_down = combatant.is_down();
        combatant.hp.damage(applied);
        let downed = !was_down && combatant.is_down();
        if combatant.is_down() {
            combatant.add_status_tag(DEAD_STATUS);
        }

        let remaining = combatant.hp.current;
        let name = combatant.name.clone();

        let message = if absorbed > 0 {
            format!("{name} takes {applied} damage to the {location} ({absorbed} absorbed by armor)")
        } else {
            format!("{name} takes {applied} damage to the {location}")
        };
        self.log.record(message, LogKind::Damage);
        if downed {
            self.log.record(format!("{name} is down!"), LogKind::Status);
        }

        Ok(DamageReport {
            absorbed,
            applied,
            remaining,
            downed,
        })
    }

    /// Heal a combatant, clamped at max HP. Healing above 0 clears the death
    /// tag. `amount` must be positive.
    pub fn heal(&mut self, id: &str, amount: i32) -> CombatResult<HealReport> {
        if amount <= 0 {
            return Err(CombatError::InvalidAmount(amount));
        }

        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;
        let combatant = &mut self.combatants[idx];

        let was_down = combatant.is_down();
        let healed = combatant.hp.heal(amount as u32);
        let revived = was_down && !combatant.is_down();
        if !combatant.is_down() {
            combatant.remove_status_tag(DEAD_STATUS);
        }

        let remaining = combatant.hp.current;
        let name = combatant.name.clone();

        let message = if revived {
            format!("{name} heals {healed} HP and is back up")
        } else {
            format!("{name} heals {healed} HP")
        };
        self.log.record(message, LogKind::Heal);

        Ok(HealReport {
            healed,
            remaining,
            revived,
        })
    }

    /// Overwrite current stopping power for the given locations. Negative
    /// values floor at 0; `None` leaves a location untouched.
    pub fn set_armor(
        &mut self,
        id: &str,
        body: Option<i32>,
        head: Option<i32>,
    ) -> CombatResult<()> {
        let combatant = self
            .combatant_mut(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;

        if let Some(sp) = body {
            combatant.armor.body.current = sp.max(0) as u32;
        }
        if let Some(sp) = head {
            combatant.armor.head.current = sp.max(0) as u32;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Status tags
    // ------------------------------------------------------------------

    /// Apply a status tag. Returns true when newly added, false when the
    /// combatant already had it. The death tag is reserved.
    pub fn add_status(&mut self, id: &str, tag: &str) -> CombatResult<bool> {
        let tag = Self::check_status_tag(tag)?;

        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;
        let combatant = &mut self.combatants[idx];

        let added = combatant.add_status_tag(tag);
        if added {
            let name = combatant.name.clone();
            self.log.record(format!("{name} is {tag}"), LogKind::Status);
        }
        Ok(added)
    }

    /// Remove a status tag. Returns true when it was present. The death tag
    /// is reserved.
    pub fn remove_status(&mut self, id: &str, tag: &str) -> CombatResult<bool> {
        let tag = Self::check_status_tag(tag)?;

        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;
        let combatant = &mut self.combatants[idx];

        let removed = combatant.remove_status_tag(tag);
        if removed {
            let name = combatant.name.clone();
            self.log
                .record(format!("{name} is no longer {tag}"), LogKind::Status);
        }
        Ok(removed)
    }

    fn check_status_tag(tag: &str) -> CombatResult<&str> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CombatError::EmptyStatus);
        }
        if tag.eq_ignore_ascii_case(DEAD_STATUS) {
            return Err(CombatError::ReservedStatus(tag.to_string()));
        }
        Ok(tag)
    }

    // ------------------------------------------------------------------
    // Initiative
    // ------------------------------------------------------------------

    /// Roll initiative (d10 + REF) for one combatant and re-sort the roster.
    /// Downed combatants keep their place and are not rerolled; that case
    /// returns `Ok(None)`.
    pub fn roll_initiative(
        &mut self,
        id: &str,
        dice: &mut dyn DiceSource,
    ) -> CombatResult<Option<InitiativeRoll>> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))?;

        let Some(roll) = self.roll_single(idx, dice) else {
            return Ok(None);
        };

        let name = self.combatants[idx].name.clone();
        self.log.record(
            format!(
                "{name} rolls initiative: {} + {} = {}",
                roll.die, roll.reflex, roll.total
            ),
            LogKind::Initiative,
        );
        self.sort_initiative();
        Ok(Some(roll))
    }

    /// Roll initiative for every living combatant, then re-sort once and log
    /// a single summary entry. Returns how many combatants rolled.
    pub fn roll_all_initiative(&mut self, dice: &mut dyn DiceSource) -> usize {
        let mut rolled = 0;
        for idx in 0..self.combatants.len() {
            if self.roll_single(idx, dice).is_some() {
                rolled += 1;
            }
        }
        self.sort_initiative();
        self.log
            .record("Rolled initiative for all combatants", LogKind::Initiative);
        rolled
    }

    fn roll_single(&mut self, idx: usize, dice: &mut dyn DiceSource) -> Option<InitiativeRoll> {
        let combatant = &mut self.combatants[idx];
        if combatant.is_down() {
            return None;
        }
        let die = dice.d10();
        let total = die as i32 + combatant.reflex;
        combatant.initiative = total;
        Some(InitiativeRoll {
            die,
            reflex: combatant.reflex,
            total,
        })
    }

    /// Stable initiative sort: living combatants before downed ones, then
    /// initiative descending. Ties keep their prior relative order. The turn
    /// cursor is a raw index and is not remapped.
    pub fn sort_initiative(&mut self) {
        self.combatants.sort_by(|a, b| {
            a.is_down()
                .cmp(&b.is_down())
                .then_with(|| b.initiative.cmp(&a.initiative))
        });
    }

    // ------------------------------------------------------------------
    // Turn and round flow
    // ------------------------------------------------------------------

    /// Flip the combat-active flag. Starting combat resets the round counter
    /// and turn cursor; ending leaves them in place for review.
    pub fn toggle_combat(&mut self) -> bool {
        self.active = !self.active;
        if self.active {
            self.round = 1;
            self.current_turn = 0;
            self.log.record("Combat started!", LogKind::Info);
        } else {
            self.log.record("Combat ended.", LogKind::Info);
        }
        self.active
    }

    /// Advance to the next turn, skipping downed combatants.
    ///
    /// The cursor wraps at the end of the roster into a new round (logged).
    /// The skip sweep is bounded by one extra pass, so a roster with nobody
    /// left standing still terminates: the cursor parks where the sweep
    /// stopped and that turn is announced anyway. Returns false (and does
    /// nothing) while combat is inactive or the roster is empty.
    pub fn next_turn(&mut self) -> bool {
        if !self.active || self.combatants.is_empty() {
            return false;
        }

        self.advance_cursor();
        let mut steps = 0;
        while self.combatants[self.current_turn].is_down() && steps < self.combatants.len() {
            self.advance_cursor();
            steps += 1;
        }

        let name = self.combatants[self.current_turn].name.clone();
        self.log.record(format!("{name}'s turn"), LogKind::Turn);
        true
    }

    fn advance_cursor(&mut self) {
        self.current_turn += 1;
        if self.current_turn >= self.combatants.len() {
            self.current_turn = 0;
            self.round += 1;
            self.log
                .record(format!("Round {} started", self.round), LogKind::Turn);
        }
    }

    // ------------------------------------------------------------------
    // Resets
    // ------------------------------------------------------------------

    /// Reset everything to a fresh session, log included. Destructive;
    /// confirmation is on the caller.
    pub fn clear_combat(&mut self) {
        *self = Self::default();
    }

    /// Empty the log without touching combat state. Destructive;
    /// confirmation is on the caller.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Clamp loaded state back into range: cursor inside the roster, round
    /// at least 1. Documents written by hand or by older builds may violate
    /// either.
    pub(crate) fn normalize(&mut self) {
        if self.combatants.is_empty() {
            self.current_turn = 0;
        } else {
            self.current_turn = self.current_turn.min(self.combatants.len() - 1);
        }
        self.round = self.round.max(1);
    }
}
