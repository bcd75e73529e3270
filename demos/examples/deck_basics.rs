// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag, release and frame stepping on a small deck.
//!
//! This example drags the top card past the threshold, steps frames until the swipe-out
//! settles, then drags the next card only a little so it springs back.
//!
//! Run:
//! - `cargo run -p understory_demos --example deck_basics`

use std::time::Duration;

use kurbo::Size;
use understory_deck::config::DeckConfig;
use understory_deck::handler::SwipeHandler;
use understory_deck::render::{CardRenderer, Rendered};
use understory_deck::types::{DeckItem, Decision, Direction};
use understory_deck::{DeckEvent, SwipeDeck};

#[derive(Clone, Debug)]
struct Profile {
    id: u32,
    name: &'static str,
}

impl DeckItem for Profile {
    type Id = u32;
    fn id(&self) -> u32 {
        self.id
    }
}

struct Text;
impl CardRenderer<Profile> for Text {
    type Output = String;
    fn render_card(&mut self, item: &Profile) -> String {
        item.name.to_string()
    }
    fn render_no_more_cards(&mut self) -> String {
        "No more cards".to_string()
    }
}

fn dump(deck: &SwipeDeck<Profile, impl Sized>) {
    match deck.render(&mut Text) {
        Rendered::NoMoreCards(text) => println!("  [{text}]"),
        Rendered::Cards(cards) => {
            for card in cards.iter().rev() {
                let [_, _, _, _, x, y] = card.transform.as_coeffs();
                println!(
                    "  z={:4} {:<6} at ({x:6.1}, {y:6.1}) {:?}",
                    card.z_index, card.content, card.flags
                );
            }
        }
    }
}

fn run_frames(deck: &mut SwipeDeck<Profile, impl SwipeHandler<Profile>>) -> DeckEvent<u32> {
    let mut frames = 0;
    loop {
        frames += 1;
        if let Some(event) = deck.advance(Duration::from_millis(16)) {
            println!("  settled after {frames} frames: {event:?}");
            return event;
        }
    }
}

fn main() {
    let profiles = vec![
        Profile { id: 1, name: "Ada" },
        Profile { id: 2, name: "Grace" },
        Profile { id: 3, name: "Edsger" },
    ];
    let mut deck = SwipeDeck::new(profiles, Size::new(320.0, 560.0), DeckConfig::default());

    println!("== Initial ==");
    dump(&deck);

    // 30% of the width: past the 20% threshold.
    assert!(deck.on_drag_start());
    for dx in [20.0, 60.0, 96.0] {
        deck.on_drag_move(dx);
    }
    println!("== Dragging ==");
    dump(&deck);
    assert_eq!(deck.on_drag_end(96.0), Some(Decision::Swipe(Direction::Right)));
    let event = run_frames(&mut deck);
    assert!(matches!(
        event,
        DeckEvent::Swiped {
            id: 1,
            direction: Direction::Right,
            ..
        }
    ));
    println!("  layout change: {:?}", deck.take_layout_change());

    // 5% of the width: springs back.
    assert!(deck.on_drag_start());
    deck.on_drag_move(16.0);
    assert_eq!(deck.on_drag_end(16.0), Some(Decision::Reset));
    assert_eq!(run_frames(&mut deck), DeckEvent::Restored);

    println!("== After one swipe ==");
    dump(&deck);
    assert_eq!(deck.index(), 1);
}
