//! Producer items: passive abilities attached to the idol.
//!
//! An item declares a trigger, an optional condition and cost, its effects
//! and an optional activation budget. The orchestrator asks the trigger
//! validator whether an item matches "what just happened" and activates it.

mod definition;
mod instance;

pub use definition::{ItemContent, ItemDefinition};
pub use instance::ProducerItem;
