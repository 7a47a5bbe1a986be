//! Entity identity trait.
//!
//! Every item held by a list store must expose a stable identifier.
//! All reconciliation operations (replace, remove, deduplication on
//! append) locate items by this id, never by positional index, so they
//! stay correct regardless of how many pages have been appended since
//! the caller last looked at the list.

use std::fmt;

/// Trait for list items with a stable entity identity.
///
/// The id must be unique within one list and must not change over the
/// item's lifetime. Equality on ids is the only operation the store
/// needs; ordering and hashing are not required.
pub trait Identify {
    /// The identifier type (e.g. a numeric id or UUID newtype).
    type Id: PartialEq + Clone + fmt::Debug;

    /// Returns this item's identifier.
    fn entity_id(&self) -> &Self::Id;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Booking {
        id: u64,
        #[allow(dead_code)]
        guest: String,
    }

    impl Identify for Booking {
        type Id = u64;

        fn entity_id(&self) -> &u64 {
            &self.id
        }
    }

    #[test]
    fn entity_id_returns_the_id_field() {
        let booking = Booking {
            id: 42,
            guest: "Ada".to_string(),
        };
        assert_eq!(*booking.entity_id(), 42);
    }
}
