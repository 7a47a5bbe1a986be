//! Application layer - orchestration of trigger, fetcher, and store.

mod controller;
mod trigger;

pub use controller::{DetachHandle, ListController, LoadOutcome, SkipReason};
pub use trigger::SentinelTrigger;
