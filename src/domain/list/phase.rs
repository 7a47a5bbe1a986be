//! Pagination load phase.
//!
//! The lifecycle of one list's pagination:
//!
//! ```text
//! Idle --[reach-end / initial load]--> Fetching
//! Fetching --[page, more remaining]--> Idle
//! Fetching --[short page]--> Exhausted
//! Fetching --[fetch failure]--> Error
//! Error --[user retry]--> Fetching
//! ```
//!
//! `Exhausted` is terminal for pagination. Local mutations are legal in
//! every phase and never transition it.

use crate::domain::foundation::StateMachine;

/// Pagination state of one list controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No request outstanding; more pages may remain.
    Idle,
    /// Exactly one page request is in flight.
    Fetching,
    /// A short page was observed; the collection is exhausted.
    Exhausted,
    /// The last fetch failed; a user-initiated retry is available.
    Error,
}

impl LoadPhase {
    /// Returns true while a page request is outstanding.
    pub fn is_fetching(&self) -> bool {
        matches!(self, LoadPhase::Fetching)
    }

    /// Returns true once pagination has observed exhaustion.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LoadPhase::Exhausted)
    }
}

impl StateMachine for LoadPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use LoadPhase::*;
        matches!(
            (self, target),
            (Idle, Fetching)
                | (Fetching, Idle)
                | (Fetching, Exhausted)
                | (Fetching, Error)
                | (Error, Fetching)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LoadPhase::*;
        match self {
            Idle => vec![Fetching],
            Fetching => vec![Idle, Exhausted, Error],
            Error => vec![Fetching],
            Exhausted => vec![],
        }
    }
}
