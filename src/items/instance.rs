//! Producer item instances - per-lesson activation state.

use serde::{Deserialize, Serialize};

use crate::core::{ItemId, ItemInstanceId};

/// A producer item attached to the idol for one lesson.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerItem {
    pub id: ItemInstanceId,
    pub item_id: ItemId,
    #[serde(default)]
    pub enhanced: bool,
    /// Activations so far in this lesson.
    #[serde(default)]
    pub activation_count: u32,
}

impl ProducerItem {
    #[must_use]
    pub fn new(id: ItemInstanceId, item_id: ItemId, enhanced: bool) -> Self {
        Self {
            id,
            item_id,
            enhanced,
            activation_count: 0,
        }
    }

    /// Whether another activation fits in `budget`.
    #[must_use]
    pub fn has_budget(&self, budget: Option<u32>) -> bool {
        budget.is_none_or(|limit| self.activation_count < limit)
    }
}
