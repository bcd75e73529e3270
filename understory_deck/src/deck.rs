// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck controller: the item list, the top-card cursor, and exactly-once commits.
//!
//! ## Overview
//!
//! [`DeckController`] owns an [`ItemList`] and a cursor into it. Each
//! [`commit`](DeckController::commit) hands the top item to the caller's
//! [`SwipeHandler`] and then advances the cursor by one. The cursor only moves backwards
//! when the caller supplies a different list through
//! [`replace_items`](DeckController::replace_items).
//!
//! ## List identity
//!
//! An [`ItemList`] is a shared, immutable slice. Two lists are the same batch only if
//! they share the same allocation; cloning an `ItemList` keeps the batch, while building
//! a new one from equal contents starts a new batch.
//!
//! ```
//! use understory_deck::deck::{DeckController, ItemList};
//! use understory_deck::handler::NoHandler;
//! use understory_deck::types::Direction;
//!
//! let items = ItemList::from(vec![1_u32, 2, 3]);
//! let mut deck = DeckController::new(items.clone());
//! deck.commit(Direction::Right, &mut NoHandler).unwrap();
//! assert_eq!(deck.index(), 1);
//!
//! // Same batch: progress is kept.
//! assert!(!deck.replace_items(items));
//! assert_eq!(deck.index(), 1);
//!
//! // Equal contents, new batch: progress is discarded.
//! assert!(deck.replace_items(ItemList::from(vec![1_u32, 2, 3])));
//! assert_eq!(deck.index(), 0);
//! ```

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Vec2;

use crate::error::DeckError;
use crate::handler::SwipeHandler;
use crate::transform::CardTransform;
use crate::types::{DeckItem, Direction};

/// Shared, immutable list of deck items compared by identity.
pub struct ItemList<T> {
    items: Arc<[T]>,
}

impl<T> Clone for ItemList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ItemList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> From<Arc<[T]>> for ItemList<T> {
    fn from(items: Arc<[T]>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ItemList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> ItemList<T> {
    /// An empty list. Every call creates a distinct batch.
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// True if both lists are the same batch (same allocation).
    pub fn same_batch(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

/// A change of the top-card cursor, signalled once so the presentation layer can
/// animate the stack re-staggering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LayoutChange {
    /// Cursor before the change.
    pub from: usize,
    /// Cursor after the change.
    pub to: usize,
}

/// What to render for one position of the stack.
#[derive(Debug, PartialEq)]
pub enum CardSlot<'a, T> {
    /// The interactive top card.
    Top {
        /// Position in the item list.
        index: usize,
        /// The item.
        item: &'a T,
        /// Live drag transform.
        transform: CardTransform,
    },
    /// A static card beneath the top card.
    Stacked {
        /// Position in the item list.
        index: usize,
        /// The item.
        item: &'a T,
        /// Depth below the top card, starting at 1.
        position: usize,
        /// Stagger offset for this depth.
        offset: Vec2,
    },
}

impl<'a, T> CardSlot<'a, T> {
    /// Position in the item list.
    pub fn index(&self) -> usize {
        match self {
            Self::Top { index, .. } | Self::Stacked { index, .. } => *index,
        }
    }

    /// The item in this slot.
    pub fn item(&self) -> &'a T {
        match self {
            Self::Top { item, .. } | Self::Stacked { item, .. } => *item,
        }
    }

    /// True for the interactive top card.
    pub fn is_top(&self) -> bool {
        matches!(self, Self::Top { .. })
    }

    /// Transform to apply to this slot's card.
    pub fn transform(&self) -> CardTransform {
        match self {
            Self::Top { transform, .. } => *transform,
            Self::Stacked { offset, .. } => CardTransform::translate(*offset),
        }
    }
}

/// Classification of the whole list for one render pass.
///
/// Dismissed items (before the cursor) are omitted.
#[derive(Debug, PartialEq)]
pub enum RenderDecision<'a, T> {
    /// No top card remains; render the empty state.
    Exhausted,
    /// The top card followed by the stacked cards, in list order.
    Cards(Vec<CardSlot<'a, T>>),
}

/// Owner of the item list and the top-card cursor.
#[derive(Debug)]
pub struct DeckController<T> {
    items: ItemList<T>,
    index: usize,
    layout_change: Option<LayoutChange>,
}

impl<T: DeckItem> DeckController<T> {
    /// Create a controller positioned at the first item.
    pub fn new(items: impl Into<ItemList<T>>) -> Self {
        Self {
            items: items.into(),
            index: 0,
            layout_change: None,
        }
    }

    /// Current item list.
    pub fn items(&self) -> &ItemList<T> {
        &self.items
    }

    /// Cursor of the top card. Equal to the list length once exhausted.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Items not yet dismissed, including the top card.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.index
    }

    /// True once every item has been dismissed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.items.len()
    }

    /// The top item, if any.
    pub fn top(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Commit the top item in `direction`.
    ///
    /// Invokes the matching handler method exactly once with the top item, then advances
    /// the cursor. Returns the committed item's id.
    ///
    /// Committing an exhausted deck is a contract violation and returns
    /// [`DeckError::Exhausted`] without side effects.
    pub fn commit<H: SwipeHandler<T> + ?Sized>(
        &mut self,
        direction: Direction,
        handler: &mut H,
    ) -> Result<T::Id, DeckError> {
        let Some(item) = self.items.get(self.index) else {
            return Err(DeckError::Exhausted {
                index: self.index,
                len: self.items.len(),
            });
        };
        match direction {
            Direction::Right => handler.on_swipe_right(item),
            Direction::Left => handler.on_swipe_left(item),
        }
        let id = item.id();
        let from = self.index;
        self.index += 1;
        self.layout_change = Some(LayoutChange {
            from,
            to: self.index,
        });
        tracing::debug!(?id, ?direction, index = self.index, "card committed");
        Ok(id)
    }

    /// Replace the item list.
    ///
    /// A different batch resets the cursor to `0` and returns `true`; the same batch is
    /// kept as is and returns `false`. Contents are never compared.
    pub fn replace_items(&mut self, items: ItemList<T>) -> bool {
        if self.items.same_batch(&items) {
            return false;
        }
        let from = self.index;
        self.items = items;
        self.index = 0;
        if from != 0 {
            self.layout_change = Some(LayoutChange { from, to: 0 });
        }
        tracing::debug!(len = self.items.len(), previous_index = from, "items replaced");
        true
    }

    /// Take the pending cursor change, if the cursor moved since the last call.
    pub fn take_layout_change(&mut self) -> Option<LayoutChange> {
        self.layout_change.take()
    }

    /// Classify every item for rendering.
    ///
    /// Pure in the list, the cursor, and its arguments: `top` is the live transform of the
    /// top card and `stagger` the per-depth offset of stacked cards.
    pub fn render_decision(&self, top: CardTransform, stagger: f64) -> RenderDecision<'_, T> {
        if self.is_exhausted() {
            return RenderDecision::Exhausted;
        }
        let slots = self.items.as_slice()[self.index..]
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let index = self.index + position;
                if position == 0 {
                    CardSlot::Top {
                        index,
                        item,
                        transform: top,
                    }
                } else {
                    // Lossy only past 2^53 cards.
                    let depth = position as f64 * stagger;
                    CardSlot::Stacked {
                        index,
                        item,
                        position,
                        offset: Vec2::new(depth, depth),
                    }
                }
            })
            .collect();
        RenderDecision::Cards(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::NoHandler;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Card {
        id: u32,
    }

    impl DeckItem for Card {
        type Id = u32;
        fn id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Default)]
    struct Recorder {
        right: Vec<u32>,
        left: Vec<u32>,
    }

    impl SwipeHandler<Card> for Recorder {
        fn on_swipe_right(&mut self, item: &Card) {
            self.right.push(item.id);
        }
        fn on_swipe_left(&mut self, item: &Card) {
            self.left.push(item.id);
        }
    }

    fn cards(ids: &[u32]) -> ItemList<Card> {
        ids.iter().map(|&id| Card { id }).collect()
    }

    #[test]
    fn commit_calls_handler_with_top_then_advances() {
        let mut deck = DeckController::new(cards(&[1, 2, 3]));
        let mut rec = Recorder::default();
        assert_eq!(deck.commit(Direction::Right, &mut rec), Ok(1));
        assert_eq!(deck.index(), 1);
        assert_eq!(deck.top(), Some(&Card { id: 2 }));
        assert_eq!(deck.commit(Direction::Left, &mut rec), Ok(2));
        assert_eq!(rec.right, vec![1]);
        assert_eq!(rec.left, vec![2]);
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn commit_on_exhausted_deck_is_rejected() {
        let mut deck = DeckController::new(cards(&[1]));
        let mut rec = Recorder::default();
        deck.commit(Direction::Right, &mut rec).unwrap();
        assert!(deck.is_exhausted());
        assert_eq!(
            deck.commit(Direction::Right, &mut rec),
            Err(DeckError::Exhausted { index: 1, len: 1 })
        );
        assert_eq!(rec.right, vec![1]);
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn new_batch_resets_even_with_equal_contents() {
        let mut deck = DeckController::new(cards(&[1, 2]));
        deck.commit(Direction::Left, &mut NoHandler).unwrap();
        assert!(deck.replace_items(cards(&[1, 2])));
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn same_batch_keeps_progress() {
        let items = cards(&[1, 2]);
        let mut deck = DeckController::new(items.clone());
        deck.commit(Direction::Left, &mut NoHandler).unwrap();
        assert!(!deck.replace_items(items));
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn empty_list_is_exhausted_immediately() {
        let mut deck = DeckController::new(cards(&[1]));
        assert!(deck.replace_items(ItemList::empty()));
        assert!(deck.is_exhausted());
        assert_eq!(
            deck.render_decision(CardTransform::REST, 8.0),
            RenderDecision::Exhausted
        );
        assert!(!ItemList::<u32>::empty().same_batch(&ItemList::empty()));
    }

    #[test]
    fn render_decision_classifies_remaining_items() {
        let mut deck = DeckController::new(cards(&[1, 2, 3, 4]));
        deck.commit(Direction::Right, &mut NoHandler).unwrap();
        let top = CardTransform::for_offset(Vec2::new(40.0, 0.0), 400.0, 50.0);
        let RenderDecision::Cards(slots) = deck.render_decision(top, 8.0) else {
            panic!("deck should not be exhausted");
        };
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_top());
        assert_eq!(slots[0].item().id, 2);
        assert_eq!(slots[0].transform(), top);
        assert_eq!(
            slots[2],
            CardSlot::Stacked {
                index: 3,
                item: &Card { id: 4 },
                position: 2,
                offset: Vec2::new(16.0, 16.0),
            }
        );
        let indices: Vec<usize> = slots.iter().map(CardSlot::index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn render_decision_is_pure() {
        let deck = DeckController::new(cards(&[1, 2, 3]));
        let top = CardTransform::for_offset(Vec2::new(-12.0, 0.0), 300.0, 50.0);
        assert_eq!(deck.render_decision(top, 8.0), deck.render_decision(top, 8.0));
    }

    #[test]
    fn layout_change_fires_once_per_cursor_move() {
        let mut deck = DeckController::new(cards(&[1, 2]));
        assert_eq!(deck.take_layout_change(), None);
        deck.commit(Direction::Right, &mut NoHandler).unwrap();
        assert_eq!(
            deck.take_layout_change(),
            Some(LayoutChange { from: 0, to: 1 })
        );
        assert_eq!(deck.take_layout_change(), None);
        deck.replace_items(cards(&[5]));
        assert_eq!(
            deck.take_layout_change(),
            Some(LayoutChange { from: 1, to: 0 })
        );
        // Replacing while already at the start does not move the cursor.
        deck.replace_items(cards(&[6]));
        assert_eq!(deck.take_layout_change(), None);
    }
}
