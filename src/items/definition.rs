//! Producer item definitions - static item data.

use serde::{Deserialize, Serialize};

use crate::core::ItemId;
use crate::effects::{Condition, Cost, Effect};
use crate::triggers::TriggerDeclaration;

/// One content tier of a producer item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContent {
    /// When the item activates.
    pub trigger: TriggerDeclaration,

    /// Checked against the lesson at the moment the trigger matches.
    #[serde(default)]
    pub condition: Option<Condition>,

    /// Paid on activation. Activation is skipped when unaffordable.
    #[serde(default)]
    pub cost: Option<Cost>,

    pub effects: Vec<Effect>,

    /// Activation budget per lesson. `None` = unlimited.
    #[serde(default)]
    pub times: Option<u32>,
}

impl ItemContent {
    /// Create content with a trigger and no effects.
    #[must_use]
    pub fn new(trigger: TriggerDeclaration) -> Self {
        Self {
            trigger,
            condition: None,
            cost: None,
            effects: Vec::new(),
            times: None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_times(mut self, times: u32) -> Self {
        self.times = Some(times);
        self
    }
}

/// Static producer item definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub base: ItemContent,
    #[serde(default)]
    pub enhanced: Option<ItemContent>,
}

impl ItemDefinition {
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, base: ItemContent) -> Self {
        Self {
            id,
            name: name.into(),
            base,
            enhanced: None,
        }
    }

    #[must_use]
    pub fn with_enhanced(mut self, content: ItemContent) -> Self {
        self.enhanced = Some(content);
        self
    }

    /// Content tier selected by the instance's enhanced flag.
    #[must_use]
    pub fn content(&self, enhanced: bool) -> &ItemContent {
        match (&self.enhanced, enhanced) {
            (Some(content), true) => content,
            _ => &self.base,
        }
    }
}
