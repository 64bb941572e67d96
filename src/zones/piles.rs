//! Card piles of a lesson.
//!
//! Four ordered piles hold card instance ids:
//! - deck: draw order, front is the next card drawn
//! - hand: display order, capped at [`HAND_CAPACITY`]
//! - discard
//! - removed: once-per-lesson cards after use
//!
//! Pile operations mutate a working copy. Callers compare it against the
//! original with [`Piles::change_to`] to produce a single pile diff.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{pick_index, CardInstanceId, HAND_CAPACITY};

/// Deck, hand, discard and removed piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    pub deck: Vector<CardInstanceId>,
    pub hand: Vector<CardInstanceId>,
    pub discard: Vector<CardInstanceId>,
    pub removed: Vector<CardInstanceId>,
}

/// Replacement contents for any subset of the piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileChange {
    #[serde(default)]
    pub deck: Option<Vector<CardInstanceId>>,
    #[serde(default)]
    pub hand: Option<Vector<CardInstanceId>>,
    #[serde(default)]
    pub discard: Option<Vector<CardInstanceId>>,
    #[serde(default)]
    pub removed: Option<Vector<CardInstanceId>>,
}

/// Where a drawn card ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Hand,
    /// Hand was full.
    Discard,
    /// Deck and discard were both empty.
    Exhausted,
}

/// Shuffle `pile` in place (Fisher-Yates) with uniform rolls in `[0, 1)`.
pub fn shuffle(pile: &mut Vector<CardInstanceId>, mut random: impl FnMut() -> f64) {
    for i in (1..pile.len()).rev() {
        if let Some(j) = pick_index(i + 1, random()) {
            pile.swap(i, j);
        }
    }
}

impl Piles {
    /// Create piles with the given deck and everything else empty.
    #[must_use]
    pub fn with_deck(deck: Vector<CardInstanceId>) -> Self {
        Self {
            deck,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hand_is_full(&self) -> bool {
        self.hand.len() >= HAND_CAPACITY
    }

    #[must_use]
    pub fn in_hand(&self, card: CardInstanceId) -> bool {
        self.hand.contains(&card)
    }

    /// Draw one card.
    ///
    /// An empty deck is refilled by shuffling the discard pile into it.
    pub fn draw_one(&mut self, random: impl FnMut() -> f64) -> DrawOutcome {
        if self.deck.is_empty() {
            if self.discard.is_empty() {
                return DrawOutcome::Exhausted;
            }
            self.deck = std::mem::take(&mut self.discard);
            shuffle(&mut self.deck, random);
        }

        let Some(card) = self.deck.pop_front() else {
            return DrawOutcome::Exhausted;
        };
        if self.hand_is_full() {
            self.discard.push_back(card);
            DrawOutcome::Discard
        } else {
            self.hand.push_back(card);
            DrawOutcome::Hand
        }
    }

    /// Draw up to `count` cards, returning how many were actually drawn.
    pub fn draw(&mut self, count: usize, mut random: impl FnMut() -> f64) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            if self.draw_one(&mut random) == DrawOutcome::Exhausted {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// Move the whole hand to discard, keeping hand order.
    pub fn discard_hand(&mut self) -> usize {
        let hand = std::mem::take(&mut self.hand);
        let count = hand.len();
        self.discard.append(hand);
        count
    }

    /// Move a used card from hand to discard, or to removed for
    /// once-per-lesson cards. Returns false when the card is not in hand.
    pub fn play(&mut self, card: CardInstanceId, used_once: bool) -> bool {
        let Some(index) = self.hand.index_of(&card) else {
            return false;
        };
        self.hand.remove(index);
        if used_once {
            self.removed.push_back(card);
        } else {
            self.discard.push_back(card);
        }
        true
    }

    /// Put a new card into hand, or discard when the hand is full.
    pub fn add_generated(&mut self, card: CardInstanceId) -> DrawOutcome {
        if self.hand_is_full() {
            self.discard.push_back(card);
            DrawOutcome::Discard
        } else {
            self.hand.push_back(card);
            DrawOutcome::Hand
        }
    }

    /// Move the given deck cards to the front of the deck, keeping their
    /// relative order.
    pub fn move_to_deck_front(&mut self, cards: &[CardInstanceId]) {
        let (front, rest): (Vector<_>, Vector<_>) =
            self.deck.iter().copied().partition(|id| cards.contains(id));
        let mut deck = front;
        deck.append(rest);
        self.deck = deck;
    }

    /// The change turning `self` into `after`, or `None` when nothing moved.
    #[must_use]
    pub fn change_to(&self, after: &Piles) -> Option<PileChange> {
        let changed = |before: &Vector<CardInstanceId>, after: &Vector<CardInstanceId>| {
            (before != after).then(|| after.clone())
        };
        let change = PileChange {
            deck: changed(&self.deck, &after.deck),
            hand: changed(&self.hand, &after.hand),
            discard: changed(&self.discard, &after.discard),
            removed: changed(&self.removed, &after.removed),
        };
        (!change.is_empty()).then_some(change)
    }

    /// Replace every pile present in `change`.
    pub fn apply(&mut self, change: &PileChange) {
        if let Some(deck) = &change.deck {
            self.deck = deck.clone();
        }
        if let Some(hand) = &change.hand {
            self.hand = hand.clone();
        }
        if let Some(discard) = &change.discard {
            self.discard = discard.clone();
        }
        if let Some(removed) = &change.removed {
            self.removed = removed.clone();
        }
    }

    /// Total number of cards across all piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.removed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PileChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_none() && self.hand.is_none() && self.discard.is_none() && self.removed.is_none()
    }
}
