//! # Session State
//!
//! The mutable state owned by one dispatcher process.
//!
//! One process serves one frontend window, so there is exactly one
//! session: one calculator engine and one unit converter, owned directly
//! with no locking. A multi-client front door would instantiate one
//! `Session` per client instead of sharing this one - the core provides
//! no cross-instance synchronization because none is needed when each
//! instance has a single owner.

use suanpan_core::{CalculatorEngine, UnitConverter};

/// Everything a dispatcher needs to serve requests.
#[derive(Debug)]
pub struct Session {
    /// The long-lived calculator state machine.
    pub engine: CalculatorEngine,
    /// Unit registry; immutable after construction.
    pub converter: UnitConverter,
}

impl Session {
    /// Creates a session with a fresh engine and the default unit registry.
    pub fn new() -> Self {
        Session {
            engine: CalculatorEngine::new(),
            converter: UnitConverter::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
