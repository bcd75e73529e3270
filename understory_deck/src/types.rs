// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the deck: swipe directions, gesture decisions, observable gesture state, and item identity.
//!
//! ## Overview
//!
//! These types describe the protocol between the [tracker](crate::tracker) and the
//! [deck controller](crate::deck). They carry no behavior beyond small helpers.

use core::fmt::Debug;

/// Direction of a committed swipe.
///
/// Produced once per commit by the [tracker](crate::tracker::GestureTracker) and passed to
/// [`DeckController::commit`](crate::deck::DeckController::commit). Never stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Dismissed towards negative x.
    Left,
    /// Dismissed towards positive x.
    Right,
}

impl Direction {
    /// Sign of the horizontal axis this direction points along: `-1.0` or `1.0`.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Terminal decision taken when a drag is released.
///
/// Returned by [`GestureTracker::on_drag_end`](crate::tracker::GestureTracker::on_drag_end).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Decision {
    /// The card leaves the deck in the given direction; a commit follows once the
    /// swipe-out animation settles.
    Swipe(Direction),
    /// The card springs back to rest; nothing is committed.
    Reset,
}

/// Observable phase of the gesture state machine.
///
/// ```text
/// Idle ──drag start──▶ Dragging ──drag end──▶ Animating ──settle──▶ Idle
///   └──────────────force decide──────────────────▲
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GestureState {
    /// No pointer interaction; the offset is at rest.
    #[default]
    Idle,
    /// A pointer is down and the offset follows its horizontal delta.
    Dragging,
    /// A swipe-out or spring-back animation is in flight; pointer input is ignored.
    Animating,
}

/// Outcome reported exactly once when an animation started by the tracker finishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Settled {
    /// The swipe-out animation finished; the owner must commit in this direction.
    Swiped(Direction),
    /// The spring-back animation finished; the card is back at rest.
    Rested,
}

/// An item that can be placed in a deck.
///
/// The identifier keys rendered cards and is reported with every commit, so it must be
/// stable for the lifetime of the item and unique within a list.
pub trait DeckItem {
    /// Identifier type.
    type Id: Copy + Eq + Debug;
    /// Returns this item's identifier.
    fn id(&self) -> Self::Id;
}

macro_rules! impl_deck_item_for_ids {
    ($($t:ty),*) => {
        $(
            impl DeckItem for $t {
                type Id = $t;
                #[inline]
                fn id(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

impl_deck_item_for_ids!(u16, u32, u64, usize, i32, i64);
