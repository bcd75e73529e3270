// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe handlers: the caller's per-direction side effects.
//!
//! [`DeckController::commit`](crate::deck::DeckController::commit) invokes exactly one
//! handler method per commit, synchronously, with the item that was on top before the
//! cursor advanced.
//!
//! ```
//! use understory_deck::handler::{Callbacks, SwipeHandler};
//!
//! let mut liked = Vec::new();
//! let mut passed = Vec::new();
//! let mut handler = Callbacks::new(|item: &u32| passed.push(*item), |item: &u32| liked.push(*item));
//! handler.on_swipe_right(&1);
//! handler.on_swipe_left(&2);
//! drop(handler);
//! assert_eq!((liked, passed), (vec![1], vec![2]));
//! ```

/// Receives committed swipes. Both methods default to no-ops.
pub trait SwipeHandler<T> {
    /// The top card was swiped right.
    fn on_swipe_right(&mut self, _item: &T) {}
    /// The top card was swiped left.
    fn on_swipe_left(&mut self, _item: &T) {}
}

impl<T, H: SwipeHandler<T> + ?Sized> SwipeHandler<T> for &mut H {
    fn on_swipe_right(&mut self, item: &T) {
        (**self).on_swipe_right(item);
    }

    fn on_swipe_left(&mut self, item: &T) {
        (**self).on_swipe_left(item);
    }
}

/// A handler that ignores every swipe.
///
/// Used by [`SwipeDeck::new`](crate::SwipeDeck::new).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHandler;

impl<T> SwipeHandler<T> for NoHandler {}

/// Closure-backed handler.
pub struct Callbacks<L, R> {
    on_left: L,
    on_right: R,
}

impl<L, R> core::fmt::Debug for Callbacks<L, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl<L, R> Callbacks<L, R> {
    /// Wrap a left-swipe and a right-swipe closure.
    pub fn new(on_left: L, on_right: R) -> Self {
        Self { on_left, on_right }
    }
}

impl<T, L: FnMut(&T), R: FnMut(&T)> SwipeHandler<T> for Callbacks<L, R> {
    fn on_swipe_right(&mut self, item: &T) {
        (self.on_right)(item);
    }

    fn on_swipe_left(&mut self, item: &T) {
        (self.on_left)(item);
    }
}
