// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card transforms: drag offset plus an interpolated tilt.
//!
//! A dragged card moves with the pointer and tilts proportionally to its horizontal
//! offset. The tilt is a piecewise-linear map from `[-width, 0, width]` to
//! `[-max, 0, max]` degrees, clamped at both ends.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_deck::transform::CardTransform;
//!
//! let t = CardTransform::for_offset(Vec2::new(200.0, 0.0), 400.0, 50.0);
//! assert_eq!(t.rotation_degrees, 25.0);
//!
//! // Past the viewport edge the tilt saturates.
//! let t = CardTransform::for_offset(Vec2::new(-900.0, 0.0), 400.0, 50.0);
//! assert_eq!(t.rotation_degrees, -50.0);
//!
//! // Compose into an affine pivoting about the card center.
//! let _affine = t.to_affine(Size::new(400.0, 800.0));
//! ```

use kurbo::{Affine, Point, Size, Vec2};

/// Piecewise-linear interpolation with clamping at the range ends.
///
/// `input` must be non-decreasing. Values below `input[0]` map to `output[0]`, values
/// above the last breakpoint map to the last output, and NaN is treated as below the
/// range. Zero-width segments resolve to their left output.
pub fn interpolate_clamped<const N: usize>(input: &[f64; N], output: &[f64; N], value: f64) -> f64 {
    let (Some(&first_in), Some(&last_in), Some(&first_out), Some(&last_out)) =
        (input.first(), input.last(), output.first(), output.last())
    else {
        return value;
    };
    if value.is_nan() || value <= first_in {
        return first_out;
    }
    if value >= last_in {
        return last_out;
    }
    for (i, pair) in input.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        if value <= b {
            let span = b - a;
            if span <= 0.0 {
                return output[i];
            }
            return output[i] + (output[i + 1] - output[i]) * ((value - a) / span);
        }
    }
    last_out
}

/// Visual transform of a card: layout offset and tilt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardTransform {
    /// Displacement from the card's rest position.
    pub offset: Vec2,
    /// Clockwise tilt in degrees.
    pub rotation_degrees: f64,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::REST
    }
}

impl CardTransform {
    /// Untransformed card.
    pub const REST: Self = Self {
        offset: Vec2::ZERO,
        rotation_degrees: 0.0,
    };

    /// A pure translation, used for stacked cards.
    pub const fn translate(offset: Vec2) -> Self {
        Self {
            offset,
            rotation_degrees: 0.0,
        }
    }

    /// Transform of a card dragged to `offset` within a viewport `width` wide.
    pub fn for_offset(offset: Vec2, width: f64, max_rotation_degrees: f64) -> Self {
        let rotation_degrees = if width > 0.0 {
            interpolate_clamped(
                &[-width, 0.0, width],
                &[-max_rotation_degrees, 0.0, max_rotation_degrees],
                offset.x,
            )
        } else {
            0.0
        };
        Self {
            offset,
            rotation_degrees,
        }
    }

    /// Tilt in radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Compose into an affine for a card of `card_size` laid out at the origin.
    ///
    /// The card is rotated about its own center, then translated by the offset.
    pub fn to_affine(&self, card_size: Size) -> Affine {
        let center = Point::new(card_size.width * 0.5, card_size.height * 0.5);
        Affine::translate(self.offset) * Affine::rotate_about(self.rotation_radians(), center)
    }
}
