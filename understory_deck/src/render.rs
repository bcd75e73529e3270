// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering seam: turn a [`RenderDecision`] into caller content with placement.
//!
//! The deck never inspects rendered content. A [`CardRenderer`] produces one output per
//! visible card, or a single output for the empty state, and [`render`] wraps each card
//! output with its key, affine transform, z-index and [`CardFlags`].

use alloc::vec::Vec;

use kurbo::{Affine, Size};

use crate::deck::{CardSlot, RenderDecision};
use crate::types::DeckItem;

bitflags::bitflags! {
    /// Per-card presentation flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CardFlags: u8 {
        /// Card is drawn.
        const VISIBLE     = 0b0000_0001;
        /// Card receives pointer input. Only the top card has this.
        const INTERACTIVE = 0b0000_0010;
    }
}

impl Default for CardFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Caller-supplied content rendering.
pub trait CardRenderer<T> {
    /// Rendered content type; opaque to the deck.
    type Output;
    /// Render one card's content.
    fn render_card(&mut self, item: &T) -> Self::Output;
    /// Render the view shown once the deck is exhausted.
    fn render_no_more_cards(&mut self) -> Self::Output;
}

/// One placed card.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCard<K, O> {
    /// Stable key: the item's id.
    pub key: K,
    /// Position in the item list.
    pub index: usize,
    /// Card-space to deck-space transform, rotation pivoting about the card center.
    pub transform: Affine,
    /// Stacking order; higher is drawn on top.
    pub z_index: i32,
    /// Visibility and interactivity.
    pub flags: CardFlags,
    /// Caller content.
    pub content: O,
}

/// Output of a render pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered<K, O> {
    /// The empty-state content.
    NoMoreCards(O),
    /// Placed cards in list order (top card first).
    Cards(Vec<RenderedCard<K, O>>),
}

impl<K, O> Rendered<K, O> {
    /// The top card, if any.
    pub fn top(&self) -> Option<&RenderedCard<K, O>> {
        match self {
            Self::Cards(cards) => cards.first(),
            Self::NoMoreCards(_) => None,
        }
    }

    /// Cards sorted back to front.
    pub fn paint_order(&self) -> Vec<&RenderedCard<K, O>> {
        let mut cards: Vec<_> = match self {
            Self::Cards(cards) => cards.iter().collect(),
            Self::NoMoreCards(_) => Vec::new(),
        };
        cards.sort_by_key(|card| card.z_index);
        cards
    }
}

/// Render a decision through `renderer`.
///
/// Every card is `card_size`; the top card gets `top_z` and full interactivity, stacked
/// cards get decreasing z-indices below zero by depth.
pub fn render<T, R>(
    decision: &RenderDecision<'_, T>,
    card_size: Size,
    top_z: i32,
    renderer: &mut R,
) -> Rendered<T::Id, R::Output>
where
    T: DeckItem,
    R: CardRenderer<T> + ?Sized,
{
    let RenderDecision::Cards(slots) = decision else {
        return Rendered::NoMoreCards(renderer.render_no_more_cards());
    };
    let cards = slots
        .iter()
        .map(|slot| {
            let (z_index, flags) = match slot {
                CardSlot::Top { .. } => (top_z, CardFlags::VISIBLE | CardFlags::INTERACTIVE),
                CardSlot::Stacked { position, .. } => (
                    i32::try_from(*position).map_or(i32::MIN, |depth| -depth),
                    CardFlags::VISIBLE,
                ),
            };
            let item = slot.item();
            RenderedCard {
                key: item.id(),
                index: slot.index(),
                transform: slot.transform().to_affine(card_size),
                z_index,
                flags,
                content: renderer.render_card(item),
            }
        })
        .collect();
    Rendered::Cards(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckController;
    use crate::handler::NoHandler;
    use crate::transform::CardTransform;
    use crate::types::Direction;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use kurbo::Vec2;

    struct Labels {
        calls: usize,
    }

    impl CardRenderer<u32> for Labels {
        type Output = String;
        fn render_card(&mut self, item: &u32) -> String {
            self.calls += 1;
            format!("card {item}")
        }
        fn render_no_more_cards(&mut self) -> String {
            self.calls += 1;
            String::from("done")
        }
    }

    const CARD: Size = Size::new(300.0, 500.0);

    #[test]
    fn places_top_and_stacked_cards() {
        let deck = DeckController::new(vec![10_u32, 11, 12]);
        let top = CardTransform::for_offset(Vec2::new(30.0, 0.0), 300.0, 50.0);
        let mut labels = Labels { calls: 0 };
        let out = render(&deck.render_decision(top, 8.0), CARD, 999, &mut labels);
        let Rendered::Cards(cards) = &out else {
            panic!("expected cards");
        };
        assert_eq!(labels.calls, 3);
        assert_eq!(cards.len(), 3);

        let first = &cards[0];
        assert_eq!(first.key, 10);
        assert_eq!(first.content, "card 10");
        assert_eq!(first.z_index, 999);
        assert!(first.flags.contains(CardFlags::INTERACTIVE));
        assert_eq!(first.transform, top.to_affine(CARD));

        let third = &cards[2];
        assert_eq!(third.flags, CardFlags::VISIBLE);
        assert_eq!(third.z_index, -2);
        assert_eq!(third.transform, Affine::translate((16.0, 16.0)));

        let order: Vec<u32> = out.paint_order().iter().map(|c| c.key).collect();
        assert_eq!(order, vec![12, 11, 10]);
        assert_eq!(out.top().map(|c| c.key), Some(10));
    }

    #[test]
    fn exhausted_renders_empty_state_only() {
        let mut deck = DeckController::new(vec![1_u32]);
        deck.commit(Direction::Left, &mut NoHandler).unwrap();
        let mut labels = Labels { calls: 0 };
        let out = render(
            &deck.render_decision(CardTransform::REST, 8.0),
            CARD,
            999,
            &mut labels,
        );
        assert_eq!(out, Rendered::NoMoreCards(String::from("done")));
        assert_eq!(labels.calls, 1);
        assert!(out.top().is_none());
        assert!(out.paint_order().is_empty());
    }
}
