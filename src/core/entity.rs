//! Identifier types.
//!
//! Static definitions (cards, producer items) are identified by the id the
//! definition store assigns them. Runtime objects (card instances, item
//! instances, modifier instances) get ids from the injected id generator, so
//! two simulations driven by the same generator allocate the same ids.
//!
//! ```
//! use lesson_engine::core::{CardInstanceId, IdSequence};
//!
//! let mut ids = IdSequence::new();
//! let first = CardInstanceId::new(ids.next_id());
//! let second = CardInstanceId::new(ids.next_id());
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a static card definition.
    CardId,
    "Card"
);

id_type!(
    /// Identifier of a static producer item definition.
    ItemId,
    "Item"
);

id_type!(
    /// Identifier of one card instance inside a lesson.
    CardInstanceId,
    "CardInstance"
);

id_type!(
    /// Identifier of one producer item instance inside a lesson.
    ItemInstanceId,
    "ItemInstance"
);

id_type!(
    /// Identifier of one modifier instance held by the idol.
    ///
    /// Merging modifiers keep their id for the whole time they are held;
    /// non-merging modifiers get a fresh id per acquisition.
    ModifierId,
    "Modifier"
);

/// Default id generator: a plain counter starting at 1.
///
/// Callers that need a different allocation scheme inject their own closure
/// into [`EngineContext`](super::EngineContext) instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    last: u32,
}

impl IdSequence {
    /// Create a sequence whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence that continues after `last`.
    #[must_use]
    pub fn starting_after(last: u32) -> Self {
        Self { last }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}
