//! Modifier vocabulary.
//!
//! Modifiers are the idol's status effects: score and vitality boosters,
//! life-cost adjusters, protections, queued effects and reactive buffs.
//! This module is pure data plus lookup helpers; behaviour lives in the
//! effect resolver, the cost arithmetic and the orchestrator.

mod modifier;

pub use modifier::{
    find_modifier, find_modifier_by_id, has_modifier, modifier_value, Modifier,
    ModifierField, ModifierInstance, ModifierKind, MIGHTY_PERFORMANCE_PERCENT,
};
