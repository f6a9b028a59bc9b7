//! Per-visitor session identity
//!
//! This module decides which session a turn belongs to:
//! - `SessionLifecycle` - Decode-or-mint session resolution per turn
//! - `ResolvedTurn` - The id plus the cleaned and to-persist histories

pub mod lifecycle;

pub use lifecycle::{ResolvedTurn, SessionLifecycle, SESSION_ID_PREFIX};
