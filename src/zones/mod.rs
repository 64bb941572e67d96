//! Card piles.
//!
//! ## Key Types
//!
//! - `Piles`: deck, hand, discard and removed piles of one lesson
//! - `PileChange`: replacement contents for any subset of piles (diff payload)
//! - `DrawOutcome`: where a single drawn card landed

pub mod piles;

pub use piles::{shuffle, DrawOutcome, PileChange, Piles};
