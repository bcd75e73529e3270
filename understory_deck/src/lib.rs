// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_deck --heading-base-level=0

//! Understory Deck: a headless, `no_std` swipeable card stack.
//!
//! ## Overview
//!
//! A deck shows one top card at a time. The user drags it sideways; releasing past a
//! threshold dismisses it left or right, anything less springs it back. Each dismissal
//! runs the caller's handler exactly once and reveals the next card.
//!
//! This crate owns the interaction logic only. It does not draw, does not own a clock,
//! and does not perform hit testing. Feed it pointer deltas and frame times, and read
//! back transforms, z-order and events.
//!
//! ## Pieces
//!
//! - [`GestureTracker`](crate::tracker::GestureTracker): drag offset, release decision,
//!   swipe-out and spring-back animations.
//! - [`DeckController`](crate::deck::DeckController): item list, top-card cursor,
//!   exactly-once commits.
//! - [`CardTransform`](crate::transform::CardTransform): offset plus tilt, convertible to
//!   a Kurbo [`Affine`](kurbo::Affine).
//! - [`Animator`](crate::animation::Animator): tween and spring capability; the bundled
//!   [`FrameAnimator`](crate::animation::FrameAnimator) is stepped by frame time.
//! - [`SwipeDeck`]: all of the above behind a single element.
//!
//! ## Workflow
//!
//! 1) Build a [`SwipeDeck`] from an [`ItemList`](crate::deck::ItemList), the viewport size
//!    and a [`DeckConfig`](crate::config::DeckConfig). Attach a
//!    [`SwipeHandler`](crate::handler::SwipeHandler) for the side effects.
//! 2) Route pointer down/move/up on the top card to
//!    [`on_drag_start`](SwipeDeck::on_drag_start), [`on_drag_move`](SwipeDeck::on_drag_move)
//!    and [`on_drag_end`](SwipeDeck::on_drag_end), with the horizontal delta since press.
//! 3) Every frame, call [`advance`](SwipeDeck::advance) with the elapsed time and render
//!    with [`render`](SwipeDeck::render).
//! 4) When the caller's data changes, call [`replace_items`](SwipeDeck::replace_items).
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_deck::{DeckEvent, SwipeDeck};
//! use understory_deck::config::DeckConfig;
//! use understory_deck::handler::Callbacks;
//! use understory_deck::types::Direction;
//!
//! let mut liked = Vec::new();
//! let handler = Callbacks::new(|_: &u32| {}, |item: &u32| liked.push(*item));
//! let mut deck = SwipeDeck::new(vec![1_u32, 2, 3], Size::new(300.0, 600.0), DeckConfig::default())
//!     .with_handler(handler);
//!
//! // Drag 30% of the width to the right and let go.
//! deck.on_drag_start();
//! deck.on_drag_move(90.0);
//! deck.on_drag_end(90.0);
//!
//! // Run frames until the swipe-out finishes.
//! let event = loop {
//!     if let Some(event) = deck.advance(Duration::from_millis(16)) {
//!         break event;
//!     }
//! };
//! assert_eq!(event, DeckEvent::Swiped { id: 1, direction: Direction::Right, index: 0 });
//! assert_eq!(deck.index(), 1);
//! assert_eq!(deck.top_item(), Some(&2));
//! drop(deck);
//! assert_eq!(liked, vec![1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod deck;
pub mod error;
pub mod handler;
pub mod render;
pub mod tracker;
pub mod transform;
pub mod types;

use core::time::Duration;

use kurbo::Size;

use crate::animation::{Animator, FrameAnimator};
use crate::config::DeckConfig;
use crate::deck::{DeckController, ItemList, LayoutChange, RenderDecision};
use crate::error::DeckError;
use crate::handler::{NoHandler, SwipeHandler};
use crate::render::{CardRenderer, Rendered};
use crate::tracker::GestureTracker;
use crate::transform::CardTransform;
use crate::types::{DeckItem, Decision, Direction, GestureState, Settled};

/// Something that happened while advancing a [`SwipeDeck`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeckEvent<K> {
    /// The card at `index` was committed in `direction`; the handler has run.
    Swiped {
        /// Id of the committed item.
        id: K,
        /// Swipe direction.
        direction: Direction,
        /// Cursor of the committed item, before advancing.
        index: usize,
    },
    /// A released card finished springing back to rest.
    Restored,
}

/// A mountable swipe deck: item list, gesture tracking, animations and handlers.
///
/// Pointer input is only accepted while a top card exists and no animation is in flight,
/// which is what keeps commits in bounds.
pub struct SwipeDeck<T: DeckItem, H = NoHandler, A: Animator = FrameAnimator> {
    controller: DeckController<T>,
    tracker: GestureTracker<A>,
    handler: H,
    stack_stagger: f64,
    top_card_z: i32,
}

impl<T: DeckItem, H, A: Animator> core::fmt::Debug for SwipeDeck<T, H, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwipeDeck")
            .field("index", &self.controller.index())
            .field("len", &self.controller.items().len())
            .field("state", &self.tracker.state())
            .field("offset", &self.tracker.offset())
            .finish_non_exhaustive()
    }
}

impl<T: DeckItem> SwipeDeck<T> {
    /// Create a deck over `items` for a `viewport`-sized card area.
    ///
    /// The viewport is read once; it sets the swipe threshold, the swipe-out distance and
    /// the card size.
    pub fn new(items: impl Into<ItemList<T>>, viewport: Size, config: DeckConfig) -> Self {
        Self {
            controller: DeckController::new(items),
            tracker: GestureTracker::new(viewport, &config),
            handler: NoHandler,
            stack_stagger: config.stack_stagger,
            top_card_z: config.top_card_z,
        }
    }
}

impl<T: DeckItem, H, A: Animator> SwipeDeck<T, H, A> {
    /// Replace the swipe handler.
    pub fn with_handler<H2: SwipeHandler<T>>(self, handler: H2) -> SwipeDeck<T, H2, A> {
        SwipeDeck {
            controller: self.controller,
            tracker: self.tracker,
            handler,
            stack_stagger: self.stack_stagger,
            top_card_z: self.top_card_z,
        }
    }

    /// Replace the animator.
    pub fn with_animator<B: Animator>(self, animator: B) -> SwipeDeck<T, H, B> {
        SwipeDeck {
            controller: self.controller,
            tracker: self.tracker.replace_animator(animator),
            handler: self.handler,
            stack_stagger: self.stack_stagger,
            top_card_z: self.top_card_z,
        }
    }

    /// The swipe handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The swipe handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The gesture tracker.
    pub fn tracker(&self) -> &GestureTracker<A> {
        &self.tracker
    }

    /// The deck controller.
    pub fn controller(&self) -> &DeckController<T> {
        &self.controller
    }

    /// Current item list.
    pub fn items(&self) -> &ItemList<T> {
        self.controller.items()
    }

    /// Cursor of the top card.
    pub fn index(&self) -> usize {
        self.controller.index()
    }

    /// The top item, if any.
    pub fn top_item(&self) -> Option<&T> {
        self.controller.top()
    }

    /// True once every item has been dismissed.
    pub fn is_exhausted(&self) -> bool {
        self.controller.is_exhausted()
    }

    /// Current gesture phase.
    pub fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    /// Live transform of the top card.
    pub fn current_transform(&self) -> CardTransform {
        self.tracker.current_transform()
    }

    /// Pointer pressed on the top card. Returns `false` if the deck is exhausted or busy.
    pub fn on_drag_start(&mut self) -> bool {
        if self.controller.is_exhausted() {
            tracing::debug!("drag start ignored on exhausted deck");
            return false;
        }
        self.tracker.on_drag_start()
    }

    /// Pointer moved by `delta_x` since press.
    pub fn on_drag_move(&mut self, delta_x: f64) -> bool {
        self.tracker.on_drag_move(delta_x)
    }

    /// Pointer released at `delta_x` since press.
    pub fn on_drag_end(&mut self, delta_x: f64) -> Option<Decision> {
        self.tracker.on_drag_end(delta_x)
    }

    /// Dismiss the top card in `direction` without a gesture.
    ///
    /// The commit happens when the swipe-out animation settles.
    pub fn force_swipe(&mut self, direction: Direction) -> Result<(), DeckError> {
        if self.controller.is_exhausted() {
            return Err(DeckError::Exhausted {
                index: self.controller.index(),
                len: self.controller.items().len(),
            });
        }
        if !self.tracker.force_decide(direction) {
            return Err(DeckError::Busy);
        }
        Ok(())
    }

    /// Replace the item list. A new batch restarts at the first item and drops any drag
    /// or animation in progress, so a pending swipe never lands on the new batch.
    ///
    /// Returns `true` if the list was a new batch.
    pub fn replace_items(&mut self, items: impl Into<ItemList<T>>) -> bool {
        let replaced = self.controller.replace_items(items.into());
        if replaced {
            self.tracker.reset();
        }
        replaced
    }

    /// Take the pending cursor change so the stack re-stagger can be animated.
    ///
    /// Only cursor moves produce a change; plain re-renders never do.
    pub fn take_layout_change(&mut self) -> Option<LayoutChange> {
        self.controller.take_layout_change()
    }

    /// Classify every item for rendering with the live top-card transform.
    pub fn render_decision(&self) -> RenderDecision<'_, T> {
        self.controller
            .render_decision(self.tracker.current_transform(), self.stack_stagger)
    }

    /// Render the deck through `renderer`.
    pub fn render<R: CardRenderer<T> + ?Sized>(&self, renderer: &mut R) -> Rendered<T::Id, R::Output> {
        render::render(
            &self.render_decision(),
            self.tracker.geometry().viewport(),
            self.top_card_z,
            renderer,
        )
    }
}

impl<T: DeckItem, H: SwipeHandler<T>, A: Animator> SwipeDeck<T, H, A> {
    /// Step animations by `dt`, committing a finished swipe.
    pub fn advance(&mut self, dt: Duration) -> Option<DeckEvent<T::Id>> {
        let settled = self.tracker.advance(dt)?;
        self.on_settled(settled)
    }

    /// Report that an externally driven animation finished.
    ///
    /// Extra completion signals for the same animation are ignored.
    pub fn complete_animation(&mut self) -> Option<DeckEvent<T::Id>> {
        let settled = self.tracker.complete_animation()?;
        self.on_settled(settled)
    }

    fn on_settled(&mut self, settled: Settled) -> Option<DeckEvent<T::Id>> {
        match settled {
            Settled::Rested => Some(DeckEvent::Restored),
            Settled::Swiped(direction) => {
                let index = self.controller.index();
                match self.controller.commit(direction, &mut self.handler) {
                    Ok(id) => Some(DeckEvent::Swiped {
                        id,
                        direction,
                        index,
                    }),
                    Err(err) => {
                        tracing::error!(%err, "swipe settled without a top card");
                        None
                    }
                }
            }
        }
    }
}
