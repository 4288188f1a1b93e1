//! Condition Templates
//!
//! Catalog of status tags the screen offers in its condition picker.
//! Tags are free-form strings on the combatant; the catalog only feeds the
//! picker, so an unknown tag is never an error.

/// Tag applied automatically when a combatant drops to 0 HP and removed when
/// healed back above 0. Rejected by the manual status operations.
pub const DEAD_STATUS: &str = "dead";

const TEMPLATES: &[&str] = &[
    "stunned",
    "prone",
    "grappled",
    "blinded",
    "deafened",
    "on fire",
    "seriously wounded",
];

/// Built-in condition catalog.
pub struct ConditionTemplates;

impl ConditionTemplates {
    /// Names offered by the condition picker.
    pub fn list_names() -> &'static [&'static str] {
        TEMPLATES
    }

    /// Whether a tag is one of the built-in templates.
    pub fn is_known(tag: &str) -> bool {
        let tag = tag.trim();
        TEMPLATES.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
