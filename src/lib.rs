/// Redscreen - Combat Tracker Core (GM Screen Edition)
///
/// Core library providing the combat session state machine: initiative
/// order, turn and round tracking, damage and healing, status tags, a
/// bounded event log, and pluggable persistence for game masters.

pub mod config;
pub mod core;
pub mod storage;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
