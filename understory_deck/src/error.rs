// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by the deck.
//!
//! Pointer input never produces these; it is ignored or clamped instead. They only
//! surface from programmatic calls made against a deck that cannot honor them.

/// Errors returned by [`DeckController`](crate::deck::DeckController) and
/// [`SwipeDeck`](crate::SwipeDeck).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum DeckError {
    /// There is no top card to commit or swipe.
    #[error("deck is exhausted: index {index} of {len} items")]
    Exhausted {
        /// Cursor at the time of the call.
        index: usize,
        /// Length of the current item list.
        len: usize,
    },
    /// A swipe-out or spring-back animation is still in flight.
    #[error("a card animation is already in flight")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_cursor() {
        let err = DeckError::Exhausted { index: 3, len: 3 };
        assert_eq!(err.to_string(), "deck is exhausted: index 3 of 3 items");
        assert_eq!(
            DeckError::Busy.to_string(),
            "a card animation is already in flight"
        );
    }
}
