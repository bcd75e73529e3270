// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation capability: tweens and springs over a 2D offset.
//!
//! ## Overview
//!
//! The tracker does not own a clock. It asks an [`Animator`] for a [`Motion`] and the
//! owner steps that motion from its frame loop through
//! [`GestureTracker::advance`](crate::tracker::GestureTracker::advance).
//! A motion reports `finished` on the step that reaches its target; the tracker leaves
//! its animating state in that same step, which is what makes completion single-fire.
//!
//! [`FrameAnimator`] is the bundled implementation: an eased [`Tween`] for swipe-outs and
//! a damped [`Spring`] for snap-backs. Platforms with native animation primitives can
//! implement [`Animator`] themselves, or drive completion externally with
//! [`GestureTracker::complete_animation`](crate::tracker::GestureTracker::complete_animation).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Vec2;
//! use understory_deck::animation::{Animator, FrameAnimator};
//!
//! let mut animator = FrameAnimator::default();
//! let mut tween = animator.animate_to(Vec2::ZERO, Vec2::new(100.0, 0.0), Duration::from_millis(100));
//! let halfway = tween.step(Duration::from_millis(50));
//! assert!(!halfway.finished);
//! let end = tween.step(Duration::from_millis(50));
//! assert!(end.finished);
//! assert_eq!(end.value, Vec2::new(100.0, 0.0));
//! ```

use alloc::boxed::Box;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::Vec2;

/// Integration substep for [`Spring`], in seconds.
const SPRING_SUBSTEP: f64 = 1.0 / 240.0;

/// Upper bound on how long a [`Spring`] may run before it snaps to its target.
const SPRING_SETTLE_LIMIT: Duration = Duration::from_secs(5);

/// Easing curves for [`Tween`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic ease in, `(0.42, 0, 1, 1)`.
    EaseIn,
    /// Cubic ease out, `(0, 0, 0.58, 1)`.
    EaseOut,
    /// Cubic ease in and out, `(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` through the curve.
    pub fn transform(self, fraction: f64) -> f64 {
        match self {
            Self::Linear if fraction.is_nan() => 0.0,
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

#[inline]
fn within(value: f64, epsilon: f64) -> bool {
    value <= epsilon && value >= -epsilon
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction.is_nan() || fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let derivative = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson on x(t) = fraction, then bisection if it stalls.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if within(x, 1e-7) {
            solved = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if within(dx, 1e-7) {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..32 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if within(delta, 1e-7) {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Damped spring parameters for [`Spring`].
///
/// The defaults correspond to a tension of 40 and friction of 7 in the origami spring
/// model: slightly underdamped, so a released card overshoots its rest position a little.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    /// Spring constant.
    pub stiffness: f64,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Mass of the moving card. Non-positive values are treated as `1.0`.
    pub mass: f64,
    /// Distance from the target below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            stiffness: 230.2,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}

/// Result of stepping a [`Motion`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionStep {
    /// Offset after the step.
    pub value: Vec2,
    /// True once the motion has reached its target. `value` equals the target exactly.
    pub finished: bool,
}

/// An in-flight animation of a 2D offset.
pub trait Motion: Debug {
    /// Advance the motion by `dt` and return the new value.
    ///
    /// Once a step has reported `finished`, further steps keep returning the target.
    fn step(&mut self, dt: Duration) -> MotionStep;

    /// Current value without advancing.
    fn value(&self) -> Vec2;

    /// Value the motion ends at.
    fn target(&self) -> Vec2;
}

/// Factory for the two motions the tracker needs.
pub trait Animator {
    /// Timed animation from `from` to `target` over `duration`.
    fn animate_to(&mut self, from: Vec2, target: Vec2, duration: Duration) -> Box<dyn Motion>;

    /// Spring-driven animation from `from` to `target`, starting at rest.
    fn spring_to(&mut self, from: Vec2, target: Vec2) -> Box<dyn Motion>;
}

impl<A: Animator + ?Sized> Animator for &mut A {
    fn animate_to(&mut self, from: Vec2, target: Vec2, duration: Duration) -> Box<dyn Motion> {
        (**self).animate_to(from, target, duration)
    }

    fn spring_to(&mut self, from: Vec2, target: Vec2) -> Box<dyn Motion> {
        (**self).spring_to(from, target)
    }
}

/// Frame-stepped [`Animator`] producing [`Tween`]s and [`Spring`]s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameAnimator {
    /// Easing applied to tweens.
    pub easing: Easing,
    /// Parameters applied to springs.
    pub spring: SpringSpec,
}

impl FrameAnimator {
    /// Create an animator with explicit easing and spring parameters.
    pub fn new(easing: Easing, spring: SpringSpec) -> Self {
        Self { easing, spring }
    }
}

impl Animator for FrameAnimator {
    fn animate_to(&mut self, from: Vec2, target: Vec2, duration: Duration) -> Box<dyn Motion> {
        Box::new(Tween::new(from, target, duration, self.easing))
    }

    fn spring_to(&mut self, from: Vec2, target: Vec2) -> Box<dyn Motion> {
        Box::new(Spring::new(from, target, self.spring))
    }
}

/// Eased interpolation between two offsets over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: Vec2,
    target: Vec2,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    value: Vec2,
}

impl Tween {
    /// Create a tween starting at `from`.
    pub fn new(from: Vec2, target: Vec2, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            target,
            duration,
            elapsed: Duration::ZERO,
            easing,
            value: from,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Motion for Tween {
    fn step(&mut self, dt: Duration) -> MotionStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let progress = self.progress();
        let finished = progress >= 1.0;
        self.value = if finished {
            self.target
        } else {
            self.from.lerp(self.target, self.easing.transform(progress))
        };
        tracing::trace!(progress, x = self.value.x, "tween step");
        MotionStep {
            value: self.value,
            finished,
        }
    }

    fn value(&self) -> Vec2 {
        self.value
    }

    fn target(&self) -> Vec2 {
        self.target
    }
}

/// Damped harmonic motion towards a target, integrated with semi-implicit Euler.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    spec: SpringSpec,
    elapsed: Duration,
    finished: bool,
}

impl Spring {
    /// Create a spring at rest at `from`, pulling towards `target`.
    pub fn new(from: Vec2, target: Vec2, spec: SpringSpec) -> Self {
        Self {
            position: from,
            velocity: Vec2::ZERO,
            target,
            spec,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Current velocity, in offset units per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn is_at_rest(&self) -> bool {
        let d = self.position - self.target;
        within(d.x, self.spec.rest_displacement)
            && within(d.y, self.spec.rest_displacement)
            && within(self.velocity.x, self.spec.rest_speed)
            && within(self.velocity.y, self.spec.rest_speed)
    }
}

impl Motion for Spring {
    fn step(&mut self, dt: Duration) -> MotionStep {
        if !self.finished {
            let mass = if self.spec.mass > 0.0 {
                self.spec.mass
            } else {
                1.0
            };
            // Past the settle limit the spring snaps to its target, so longer steps
            // integrate no further.
            let mut remaining = dt
                .min(SPRING_SETTLE_LIMIT.saturating_sub(self.elapsed))
                .as_secs_f64();
            while remaining > 0.0 {
                let h = remaining.min(SPRING_SUBSTEP);
                let displacement = self.position - self.target;
                let accel = (displacement * -self.spec.stiffness
                    - self.velocity * self.spec.damping)
                    / mass;
                self.velocity += accel * h;
                self.position += self.velocity * h;
                remaining -= h;
            }
            self.elapsed = self.elapsed.saturating_add(dt);
            if self.is_at_rest() || self.elapsed >= SPRING_SETTLE_LIMIT {
                self.position = self.target;
                self.velocity = Vec2::ZERO;
                self.finished = true;
            }
            tracing::trace!(x = self.position.x, vx = self.velocity.x, "spring step");
        }
        MotionStep {
            value: self.position,
            finished: self.finished,
        }
    }

    fn value(&self) -> Vec2 {
        self.position
    }

    fn target(&self) -> Vec2 {
        self.target
    }
}
