//! Foundation module - Shared domain primitives.
//!
//! Contains the entity-identity and state-machine traits that form
//! the vocabulary shared by the list domain and the application layer.

mod entity;
mod state_machine;

pub use entity::Identify;
pub use state_machine::{InvalidTransition, StateMachine};
