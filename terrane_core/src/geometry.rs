// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel rounding and degenerate-size sanitization.
//!
//! Anchor arithmetic works in continuous coordinates but the output must land
//! on pixel boundaries, otherwise neighboring frames shimmer against each
//! other as sub-pixel fractions accumulate. [`round`] converts a value to a
//! multiple of a unit (normally one pixel) under an explicit [`Rounding`]
//! policy; [`NearestNotZero`](Rounding::NearestNotZero) is the policy used on
//! anchor offsets.

use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size, Vec2};

/// Rounding policy for point-to-pixel conversions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round to the nearest unit, ties away from zero.
    #[default]
    Nearest,
    /// Round to the nearest unit, ties away from zero, but a nonzero input
    /// never rounds to zero: the magnitude is clamped to at least one unit.
    NearestNotZero,
    /// Round up (toward positive infinity).
    Up,
    /// Round down (toward negative infinity).
    Down,
}

/// Rounds `value` to a multiple of `unit` under the given policy.
///
/// `unit` is the rounding granularity: with `unit = 2.0` the result is a
/// multiple of 2. Anchor code passes `1.0` (one pixel).
#[must_use]
pub fn round(value: f64, unit: f64, method: Rounding) -> f64 {
    match method {
        Rounding::Nearest => (value / unit).round() * unit,
        Rounding::NearestNotZero => {
            if value > 0.0 {
                ((value / unit).round() * unit).max(1.0)
            } else if value < 0.0 {
                ((value / unit).round() * unit).min(-1.0)
            } else {
                0.0
            }
        }
        Rounding::Up => (value / unit).ceil() * unit,
        Rounding::Down => (value / unit).floor() * unit,
    }
}

/// Rounds both components of a vector to pixel multiples.
#[must_use]
pub fn round_vec2(v: Vec2, unit: f64, method: Rounding) -> Vec2 {
    Vec2::new(round(v.x, unit, method), round(v.y, unit, method))
}

/// Rounds both components of a point to pixel multiples.
#[must_use]
pub fn round_point(p: Point, unit: f64, method: Rounding) -> Point {
    Point::new(round(p.x, unit, method), round(p.y, unit, method))
}

/// Clamps a reference size to finite, non-negative extents.
///
/// Anchor targets can report degenerate apparent sizes (zero, negative while
/// mid-layout, or NaN from an upstream division). Downstream arithmetic must
/// never see those, so each extent collapses to zero unless it is finite and
/// positive.
#[must_use]
pub fn sanitize_size(size: Size) -> Size {
    Size::new(sanitize_extent(size.width), sanitize_extent(size.height))
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
