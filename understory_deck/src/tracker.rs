// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracker: turns a horizontal drag into an offset stream and a terminal decision.
//!
//! ## Overview
//!
//! The tracker owns the top card's drag offset and an explicit [`GestureState`].
//! Pointer callbacks map to transitions:
//!
//! - [`on_drag_start`](GestureTracker::on_drag_start): `Idle → Dragging`, offset cleared.
//! - [`on_drag_move`](GestureTracker::on_drag_move): offset follows the horizontal delta.
//! - [`on_drag_end`](GestureTracker::on_drag_end): `Dragging → Animating`, deciding
//!   [`Swipe`](Decision::Swipe) past the threshold or [`Reset`](Decision::Reset) otherwise.
//! - [`force_decide`](GestureTracker::force_decide): programmatic swipe, straight to `Animating`.
//!
//! Animations are stepped with [`advance`](GestureTracker::advance). The step that
//! finishes the animation returns its [`Settled`] outcome, puts the offset back at rest
//! and returns to `Idle`. Because the outcome lives inside the animating state, it can
//! be taken at most once; stepping again or calling
//! [`complete_animation`](GestureTracker::complete_animation) afterwards yields `None`.
//!
//! Malformed deltas never error: NaN counts as zero and extreme values are clamped to the
//! swipe-out distance (see [`SwipeGeometry::sanitize`]).
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_deck::config::DeckConfig;
//! use understory_deck::tracker::GestureTracker;
//! use understory_deck::types::{Decision, Direction, GestureState, Settled};
//!
//! let mut tracker = GestureTracker::new(Size::new(400.0, 800.0), &DeckConfig::default());
//! assert!(tracker.on_drag_start());
//! tracker.on_drag_move(150.0);
//! assert_eq!(tracker.on_drag_end(150.0), Some(Decision::Swipe(Direction::Right)));
//! assert_eq!(tracker.state(), GestureState::Animating);
//!
//! let mut settled = None;
//! while settled.is_none() {
//!     settled = tracker.advance(Duration::from_millis(16));
//! }
//! assert_eq!(settled, Some(Settled::Swiped(Direction::Right)));
//! assert_eq!(tracker.state(), GestureState::Idle);
//! ```

use alloc::boxed::Box;
use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::animation::{Animator, FrameAnimator, Motion};
use crate::config::{DeckConfig, SwipeGeometry};
use crate::transform::CardTransform;
use crate::types::{Decision, Direction, GestureState, Settled};

#[derive(Debug)]
struct Flight {
    motion: Box<dyn Motion>,
    outcome: Settled,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Dragging,
    Animating(Flight),
}

/// Drag-offset state machine for the top card.
///
/// Generic over the [`Animator`] that produces swipe-out and spring-back motions.
#[derive(Debug)]
pub struct GestureTracker<A: Animator = FrameAnimator> {
    geometry: SwipeGeometry,
    max_rotation_degrees: f64,
    swipe_out_duration: Duration,
    animator: A,
    offset: Vec2,
    state: State,
}

impl GestureTracker<FrameAnimator> {
    /// Create a tracker for `viewport` using the bundled frame animator.
    pub fn new(viewport: Size, config: &DeckConfig) -> Self {
        Self::with_animator(viewport, config, config.animator())
    }
}

impl<A: Animator> GestureTracker<A> {
    /// Create a tracker for `viewport` driven by `animator`.
    ///
    /// The viewport is captured once; resizes are not tracked.
    pub fn with_animator(viewport: Size, config: &DeckConfig, animator: A) -> Self {
        Self {
            geometry: SwipeGeometry::new(viewport, config),
            max_rotation_degrees: config.max_rotation_degrees,
            swipe_out_duration: config.swipe_out_duration,
            animator,
            offset: Vec2::ZERO,
            state: State::Idle,
        }
    }

    /// Swap the animator, keeping any in-flight motion.
    pub fn replace_animator<B: Animator>(self, animator: B) -> GestureTracker<B> {
        GestureTracker {
            geometry: self.geometry,
            max_rotation_degrees: self.max_rotation_degrees,
            swipe_out_duration: self.swipe_out_duration,
            animator,
            offset: self.offset,
            state: self.state,
        }
    }

    /// Geometry derived from the viewport.
    pub fn geometry(&self) -> &SwipeGeometry {
        &self.geometry
    }

    /// Current phase of the state machine.
    pub fn state(&self) -> GestureState {
        match self.state {
            State::Idle => GestureState::Idle,
            State::Dragging => GestureState::Dragging,
            State::Animating(_) => GestureState::Animating,
        }
    }

    /// True while a swipe-out or spring-back is in flight.
    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Animating(_))
    }

    /// Outcome the in-flight animation will report, if any.
    pub fn pending(&self) -> Option<Settled> {
        match &self.state {
            State::Animating(flight) => Some(flight.outcome),
            _ => None,
        }
    }

    /// Current drag offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Begin a drag. Returns `false`, leaving state untouched, while animating.
    ///
    /// Starting again while already dragging restarts from rest.
    pub fn on_drag_start(&mut self) -> bool {
        if self.is_animating() {
            tracing::debug!("drag start ignored while animating");
            return false;
        }
        self.offset = Vec2::ZERO;
        self.state = State::Dragging;
        tracing::debug!("drag started");
        true
    }

    /// Follow the pointer's horizontal delta since drag start.
    ///
    /// Returns `false` when no drag is active. Vertical motion is not tracked.
    pub fn on_drag_move(&mut self, delta_x: f64) -> bool {
        if !matches!(self.state, State::Dragging) {
            return false;
        }
        self.offset = Vec2::new(self.geometry.sanitize(delta_x), 0.0);
        tracing::trace!(x = self.offset.x, "drag moved");
        true
    }

    /// Release the drag at `delta_x` and start the matching animation.
    ///
    /// Returns `None` when no drag is active.
    pub fn on_drag_end(&mut self, delta_x: f64) -> Option<Decision> {
        if !matches!(self.state, State::Dragging) {
            tracing::warn!("drag end without an active drag");
            return None;
        }
        self.offset = Vec2::new(self.geometry.sanitize(delta_x), 0.0);
        let decision = self.geometry.decide(delta_x);
        tracing::debug!(?decision, x = self.offset.x, "drag released");
        match decision {
            Decision::Swipe(direction) => self.launch(direction),
            Decision::Reset => {
                let motion = self.animator.spring_to(self.offset, Vec2::ZERO);
                self.state = State::Animating(Flight {
                    motion,
                    outcome: Settled::Rested,
                });
            }
        }
        Some(decision)
    }

    /// Swipe the card out in `direction` without a drag, as if released a full viewport
    /// width away.
    ///
    /// Allowed from `Idle` or `Dragging` (the drag is abandoned). Returns `false` while
    /// animating.
    pub fn force_decide(&mut self, direction: Direction) -> bool {
        if self.is_animating() {
            tracing::warn!(?direction, "forced swipe ignored while animating");
            return false;
        }
        tracing::debug!(?direction, "forced swipe");
        self.launch(direction);
        true
    }

    fn launch(&mut self, direction: Direction) {
        let target = self.geometry.swipe_out_target(direction);
        let motion = self
            .animator
            .animate_to(self.offset, target, self.swipe_out_duration);
        self.state = State::Animating(Flight {
            motion,
            outcome: Settled::Swiped(direction),
        });
    }

    /// Step the in-flight animation by `dt`.
    ///
    /// Returns the outcome on the step that finishes the animation, `None` otherwise.
    pub fn advance(&mut self, dt: Duration) -> Option<Settled> {
        let State::Animating(flight) = &mut self.state else {
            return None;
        };
        let step = flight.motion.step(dt);
        self.offset = step.value;
        if step.finished { self.settle() } else { None }
    }

    /// Finish the in-flight animation immediately, for platforms that run the animation
    /// themselves and only report its completion.
    ///
    /// Returns `None` when nothing is in flight, so repeated completion signals are inert.
    pub fn complete_animation(&mut self) -> Option<Settled> {
        if let State::Animating(flight) = &self.state {
            self.offset = flight.motion.target();
        }
        self.settle()
    }

    fn settle(&mut self) -> Option<Settled> {
        match core::mem::take(&mut self.state) {
            State::Animating(flight) => {
                self.offset = Vec2::ZERO;
                tracing::debug!(outcome = ?flight.outcome, "animation settled");
                Some(flight.outcome)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drop any drag or animation and put the card back at rest. No outcome is reported.
    pub fn reset(&mut self) {
        if self.is_animating() {
            tracing::debug!("in-flight animation dropped");
        }
        self.offset = Vec2::ZERO;
        self.state = State::Idle;
    }

    /// Visual transform for the current offset, valid at any time including mid-animation.
    pub fn current_transform(&self) -> CardTransform {
        CardTransform::for_offset(
            self.offset,
            self.geometry.viewport().width,
            self.max_rotation_degrees,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 300.0;
    const FRAME: Duration = Duration::from_millis(16);

    fn tracker() -> GestureTracker {
        GestureTracker::new(Size::new(WIDTH, 600.0), &DeckConfig::default())
    }

    fn run(tracker: &mut GestureTracker) -> Option<Settled> {
        for _ in 0..1_000 {
            if let Some(settled) = tracker.advance(FRAME) {
                return Some(settled);
            }
        }
        None
    }

    fn release(tracker: &mut GestureTracker, dx: f64) -> Option<Decision> {
        assert!(tracker.on_drag_start());
        assert!(tracker.on_drag_move(dx));
        tracker.on_drag_end(dx)
    }

    #[test]
    fn threshold_partitions_decisions() {
        let threshold = WIDTH * 0.2;
        let cases = [
            (threshold + 0.01, Decision::Swipe(Direction::Right)),
            (WIDTH, Decision::Swipe(Direction::Right)),
            (-threshold - 0.01, Decision::Swipe(Direction::Left)),
            (-WIDTH * 3.0, Decision::Swipe(Direction::Left)),
            (threshold, Decision::Reset),
            (-threshold, Decision::Reset),
            (0.0, Decision::Reset),
            (WIDTH * 0.05, Decision::Reset),
        ];
        for (dx, expected) in cases {
            let mut t = tracker();
            assert_eq!(release(&mut t, dx), Some(expected), "dx = {dx}");
            assert_eq!(t.state(), GestureState::Animating);
        }
    }

    #[test]
    fn drag_move_tracks_horizontal_only() {
        let mut t = tracker();
        t.on_drag_start();
        t.on_drag_move(42.0);
        assert_eq!(t.offset(), Vec2::new(42.0, 0.0));
        t.on_drag_move(-17.5);
        assert_eq!(t.offset(), Vec2::new(-17.5, 0.0));
        assert_eq!(t.state(), GestureState::Dragging);
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut t = tracker();
        assert!(!t.on_drag_move(50.0));
        assert_eq!(t.offset(), Vec2::ZERO);
        assert_eq!(t.on_drag_end(200.0), None);
        assert_eq!(t.state(), GestureState::Idle);
    }

    #[test]
    fn reset_springs_back_to_rest() {
        let mut t = tracker();
        assert_eq!(release(&mut t, 20.0), Some(Decision::Reset));
        assert_eq!(t.pending(), Some(Settled::Rested));
        assert_eq!(run(&mut t), Some(Settled::Rested));
        assert_eq!(t.offset(), Vec2::ZERO);
        assert_eq!(t.state(), GestureState::Idle);
        assert_eq!(t.current_transform(), CardTransform::REST);
    }

    #[test]
    fn long_frame_settles_in_one_step() {
        let mut t = tracker();
        assert_eq!(release(&mut t, 10.0), Some(Decision::Reset));
        assert_eq!(
            t.advance(Duration::from_secs(1_000_000_000)),
            Some(Settled::Rested)
        );
        assert_eq!(t.offset(), Vec2::ZERO);

        assert_eq!(
            release(&mut t, WIDTH),
            Some(Decision::Swipe(Direction::Right))
        );
        assert_eq!(
            t.advance(Duration::from_secs(u64::MAX)),
            Some(Settled::Swiped(Direction::Right))
        );
    }

    #[test]
    fn swipe_travels_out_then_rests() {
        let mut t = tracker();
        release(&mut t, 90.0);
        let mut furthest = 0.0_f64;
        let mut settled = None;
        for _ in 0..100 {
            settled = t.advance(FRAME);
            if settled.is_some() {
                break;
            }
            furthest = furthest.max(t.offset().x);
        }
        assert_eq!(settled, Some(Settled::Swiped(Direction::Right)));
        assert!(furthest > WIDTH, "card should leave the viewport, got {furthest}");
        assert_eq!(t.offset(), Vec2::ZERO);
        assert_eq!(t.state(), GestureState::Idle);
    }

    #[test]
    fn completion_is_single_fire() {
        let mut t = tracker();
        release(&mut t, -200.0);
        assert_eq!(
            t.complete_animation(),
            Some(Settled::Swiped(Direction::Left))
        );
        assert_eq!(t.complete_animation(), None);
        assert_eq!(t.advance(FRAME), None);
        assert_eq!(t.state(), GestureState::Idle);
    }

    #[test]
    fn input_is_ignored_while_animating() {
        let mut t = tracker();
        release(&mut t, 10.0);
        t.advance(FRAME);
        let mid = t.offset();
        assert!(!t.on_drag_start());
        assert!(!t.on_drag_move(100.0));
        assert_eq!(t.on_drag_end(100.0), None);
        assert!(!t.force_decide(Direction::Right));
        assert_eq!(t.offset(), mid);
        assert_eq!(t.pending(), Some(Settled::Rested));
    }

    #[test]
    fn force_decide_swipes_from_idle() {
        let mut t = tracker();
        assert!(t.force_decide(Direction::Left));
        assert_eq!(t.state(), GestureState::Animating);
        assert_eq!(run(&mut t), Some(Settled::Swiped(Direction::Left)));
        assert_eq!(t.offset(), Vec2::ZERO);
    }

    #[test]
    fn force_decide_abandons_drag() {
        let mut t = tracker();
        t.on_drag_start();
        t.on_drag_move(-10.0);
        assert!(t.force_decide(Direction::Right));
        assert_eq!(t.pending(), Some(Settled::Swiped(Direction::Right)));
    }

    #[test]
    fn malformed_deltas_degrade_gracefully() {
        let mut t = tracker();
        assert_eq!(release(&mut t, f64::NAN), Some(Decision::Reset));
        let mut t = tracker();
        assert_eq!(
            release(&mut t, f64::INFINITY),
            Some(Decision::Swipe(Direction::Right))
        );
        let mut t = tracker();
        t.on_drag_start();
        t.on_drag_move(f64::NEG_INFINITY);
        assert_eq!(t.offset(), Vec2::new(-WIDTH * 1.5, 0.0));
        assert_eq!(t.current_transform().rotation_degrees, -50.0);
    }

    #[test]
    fn transform_follows_offset_mid_animation() {
        let mut t = tracker();
        release(&mut t, 150.0);
        t.advance(FRAME);
        let transform = t.current_transform();
        assert_eq!(transform.offset, t.offset());
        assert!(transform.rotation_degrees > 0.0);
    }

    #[test]
    fn reset_drops_in_flight_animation() {
        let mut t = tracker();
        release(&mut t, 200.0);
        t.reset();
        assert_eq!(t.state(), GestureState::Idle);
        assert_eq!(t.offset(), Vec2::ZERO);
        assert_eq!(t.advance(FRAME), None);
    }

    #[test]
    fn drag_start_clears_stale_offset() {
        let mut t = tracker();
        t.on_drag_start();
        t.on_drag_move(33.0);
        assert!(t.on_drag_start());
        assert_eq!(t.offset(), Vec2::ZERO);
    }
}
