// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handlers, forced swipes, external completion and item replacement.
//!
//! The host here runs its own animations and only reports completion, so the deck is
//! driven with `complete_animation` instead of `advance`. Duplicate completion signals
//! are ignored.
//!
//! Run:
//! - `cargo run -p understory_demos --example deck_handlers`

use kurbo::Size;
use understory_deck::SwipeDeck;
use understory_deck::config::DeckConfig;
use understory_deck::deck::ItemList;
use understory_deck::error::DeckError;
use understory_deck::handler::SwipeHandler;
use understory_deck::types::Direction;

#[derive(Debug, Default)]
struct Votes {
    yes: Vec<u64>,
    no: Vec<u64>,
}

impl SwipeHandler<u64> for Votes {
    fn on_swipe_right(&mut self, item: &u64) {
        self.yes.push(*item);
    }
    fn on_swipe_left(&mut self, item: &u64) {
        self.no.push(*item);
    }
}

fn main() {
    let config = DeckConfig::default().with_max_rotation_degrees(30.0);
    let batch: ItemList<u64> = (100..104).collect();
    let mut deck =
        SwipeDeck::new(batch.clone(), Size::new(400.0, 700.0), config).with_handler(Votes::default());

    // Buttons instead of gestures.
    deck.force_swipe(Direction::Right).unwrap();
    assert_eq!(deck.force_swipe(Direction::Left), Err(DeckError::Busy));
    println!("completion: {:?}", deck.complete_animation());
    println!("duplicate:  {:?}", deck.complete_animation());

    deck.force_swipe(Direction::Left).unwrap();
    deck.complete_animation();

    // Re-supplying the same batch keeps progress.
    assert!(!deck.replace_items(batch));
    assert_eq!(deck.index(), 2);

    // A fresh batch restarts, even with equal contents.
    assert!(deck.replace_items((100..104).collect::<ItemList<u64>>()));
    assert_eq!(deck.index(), 0);
    println!("layout change: {:?}", deck.take_layout_change());

    println!("votes: {:?}", deck.handler());
    assert_eq!(deck.handler().yes, vec![100]);
    assert_eq!(deck.handler().no, vec![101]);
}
