// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck configuration and the viewport-derived swipe geometry.

use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::animation::{Easing, FrameAnimator, SpringSpec};
use crate::types::{Decision, Direction};

/// Default z-index of the top card. Stacked cards sit below zero.
pub const TOP_CARD_Z: i32 = 999;

/// Tunable constants of a deck.
///
/// All distances are expressed relative to the viewport captured at construction, except
/// [`stack_stagger`](Self::stack_stagger) which is in layout units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckConfig {
    /// Fraction of the viewport width a release must exceed to commit.
    pub swipe_threshold: f64,
    /// Multiple of the viewport width a committed card travels before it is removed.
    pub swipe_out_factor: f64,
    /// Duration of the swipe-out animation.
    pub swipe_out_duration: Duration,
    /// Rotation, in degrees, of a card dragged a full viewport width.
    pub max_rotation_degrees: f64,
    /// Per-position offset of stacked cards on both axes.
    pub stack_stagger: f64,
    /// Z-index of the top card.
    pub top_card_z: i32,
    /// Easing of the swipe-out animation.
    pub easing: Easing,
    /// Spring used to return a released card to rest.
    pub spring: SpringSpec,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 0.2,
            swipe_out_factor: 1.5,
            swipe_out_duration: Duration::from_millis(350),
            max_rotation_degrees: 50.0,
            stack_stagger: 8.0,
            top_card_z: TOP_CARD_Z,
            easing: Easing::default(),
            spring: SpringSpec::default(),
        }
    }
}

impl DeckConfig {
    /// Set the commit threshold as a fraction of the viewport width.
    pub fn with_swipe_threshold(mut self, fraction: f64) -> Self {
        self.swipe_threshold = fraction;
        self
    }

    /// Set the swipe-out distance as a multiple of the viewport width.
    pub fn with_swipe_out_factor(mut self, factor: f64) -> Self {
        self.swipe_out_factor = factor;
        self
    }

    /// Set the swipe-out duration.
    pub fn with_swipe_out_duration(mut self, duration: Duration) -> Self {
        self.swipe_out_duration = duration;
        self
    }

    /// Set the rotation reached at a full-width drag.
    pub fn with_max_rotation_degrees(mut self, degrees: f64) -> Self {
        self.max_rotation_degrees = degrees;
        self
    }

    /// Set the per-position stagger of stacked cards.
    pub fn with_stack_stagger(mut self, stagger: f64) -> Self {
        self.stack_stagger = stagger;
        self
    }

    /// Set the swipe-out easing.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the spring-back parameters.
    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    /// The bundled animator configured with this deck's easing and spring.
    pub fn animator(&self) -> FrameAnimator {
        FrameAnimator::new(self.easing, self.spring)
    }
}

#[inline]
fn extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Pixel thresholds derived once from the viewport and a [`DeckConfig`].
///
/// The viewport is not revalidated afterwards; resizes require a new geometry.
/// Non-finite or negative inputs collapse to zero, which turns every release into a reset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeGeometry {
    viewport: Size,
    threshold: f64,
    swipe_out_distance: f64,
}

impl SwipeGeometry {
    /// Derive the geometry for `viewport`.
    pub fn new(viewport: Size, config: &DeckConfig) -> Self {
        let viewport = Size::new(extent(viewport.width), extent(viewport.height));
        Self {
            viewport,
            threshold: extent(viewport.width * config.swipe_threshold),
            swipe_out_distance: extent(viewport.width * config.swipe_out_factor),
        }
    }

    /// Sanitized viewport; also the size of every card.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Horizontal distance a release must exceed to commit.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Horizontal distance a committed card travels.
    pub fn swipe_out_distance(&self) -> f64 {
        self.swipe_out_distance
    }

    /// Clamp a raw pointer delta into the range the tracker works with.
    ///
    /// NaN becomes `0.0`; anything beyond the swipe-out distance, including infinities,
    /// is clamped to it.
    pub fn sanitize(&self, delta_x: f64) -> f64 {
        if delta_x.is_nan() {
            0.0
        } else {
            delta_x.clamp(-self.swipe_out_distance, self.swipe_out_distance)
        }
    }

    /// Decide the outcome of releasing a drag at `delta_x`.
    pub fn decide(&self, delta_x: f64) -> Decision {
        let dx = self.sanitize(delta_x);
        if dx > self.threshold {
            Decision::Swipe(Direction::Right)
        } else if dx < -self.threshold {
            Decision::Swipe(Direction::Left)
        } else {
            Decision::Reset
        }
    }

    /// Offset at which a card swiped in `direction` leaves the screen.
    pub fn swipe_out_target(&self, direction: Direction) -> Vec2 {
        Vec2::new(direction.sign() * self.swipe_out_distance, 0.0)
    }
}
