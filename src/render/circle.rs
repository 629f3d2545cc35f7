//! Circle rasterization.
//!
//! Both decision procedures walk one octant with integer arithmetic and
//! reflect every offset into the other seven via
//! [`reflect_octants`](crate::geometry::reflect_octants). Offsets on an axis
//! or on the diagonal are emitted once per octant they belong to; callers
//! that need a set deduplicate themselves.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::{reflect_octants, Circle, Pixel, Point};

/// Closed set of circle algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CircleAlgorithm {
    /// Midpoint decision variable starting at `1 - r`.
    #[default]
    Midpoint,
    /// Bresenham decision variable starting at `3 - 2r`.
    Bresenham,
}

impl CircleAlgorithm {
    /// Every algorithm.
    pub const ALL: [Self; 2] = [Self::Midpoint, Self::Bresenham];

    /// Canonical wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Midpoint => "midpoint",
            Self::Bresenham => "bresenham",
        }
    }

    /// Upper bound on the number of pixels emitted for a circle of `radius`.
    ///
    /// One octant spans at most `r/√2 + 1` steps; `3r/4 + 2` bounds that.
    /// Both variants stop at the same diagonal, so they share the bound; the
    /// receiver keeps the call shape of [`LineAlgorithm::max_pixels`].
    ///
    /// [`LineAlgorithm::max_pixels`]: crate::render::LineAlgorithm::max_pixels
    #[must_use]
    pub fn max_pixels(self, radius: u64) -> u64 {
        if radius == 0 {
            return 1;
        }
        (radius.saturating_mul(3) / 4)
            .saturating_add(2)
            .saturating_mul(8)
    }
}

impl fmt::Display for CircleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CircleAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "midpoint" => Ok(Self::Midpoint),
            "bresenham" => Ok(Self::Bresenham),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Rasterize `circle` with the midpoint algorithm.
///
/// # Errors
///
/// As [`rasterize_circle_with`].
pub fn rasterize_circle(circle: Circle) -> Result<Vec<Pixel>> {
    rasterize_circle_with(circle, CircleAlgorithm::Midpoint)
}

/// Rasterize `circle` with the given decision procedure.
///
/// # Errors
///
/// Returns [`Error::InvalidRadius`] if the radius is negative, or so large
/// that part of the circle would fall off the `i32` grid.
pub fn rasterize_circle_with(circle: Circle, algorithm: CircleAlgorithm) -> Result<Vec<Pixel>> {
    let r = i64::from(circle.radius);
    let limit = Circle::radius_limit(circle.center);
    if !(0..=limit).contains(&r) {
        return Err(Error::InvalidRadius { radius: r, limit });
    }
    if r == 0 {
        return Ok(vec![Pixel::solid(circle.center)]);
    }

    let bound = algorithm.max_pixels(r.unsigned_abs());
    let mut pixels = Vec::with_capacity(usize::try_from(bound).unwrap_or(0));
    let mut emit = |x: i64, y: i64| {
        pixels.extend(reflect_octants(circle.center, x, y).map(Pixel::solid));
    };

    match algorithm {
        CircleAlgorithm::Midpoint => midpoint(r, &mut emit),
        CircleAlgorithm::Bresenham => bresenham(r, &mut emit),
    }
    Ok(pixels)
}

/// Walks the octant from (r, 0) toward the diagonal.
fn midpoint(r: i64, emit: &mut impl FnMut(i64, i64)) {
    let mut x = r;
    let mut y = 0;
    let mut err = 1 - r;

    while x >= y {
        emit(x, y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Walks the octant from (0, r) toward the diagonal.
///
/// `d` is updated from the pre-step `x` and `y`, then `x` advances. Advancing
/// `x` first instead shifts every decision by one column and emits one extra
/// step past the diagonal.
fn bresenham(r: i64, emit: &mut impl FnMut(i64, i64)) {
    let mut x = 0;
    let mut y = r;
    let mut d = 3 - 2 * r;

    while y >= x {
        emit(x, y);

        if d > 0 {
            d += 4 * (x - y) + 10;
            y -= 1;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }
}

/// Distinct points of a pixel sequence, for callers that need a set.
#[must_use]
pub fn distinct_points(pixels: &[Pixel]) -> BTreeSet<Point> {
    pixels.iter().map(Pixel::point).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Pixel sets are invariant under 90° rotation and both axis reflections.
        #[test]
        fn prop_circle_symmetric(r in 0i32..300, use_bresenham in any::<bool>()) {
            let algorithm = if use_bresenham {
                CircleAlgorithm::Bresenham
            } else {
                CircleAlgorithm::Midpoint
            };
            let pixels = rasterize_circle_with(Circle::new(Point::ORIGIN, r), algorithm).unwrap();
            let set = distinct_points(&pixels);

            let rotated: BTreeSet<Point> = set.iter().map(|p| Point::new(-p.y, p.x)).collect();
            let mirror_x: BTreeSet<Point> = set.iter().map(|p| Point::new(-p.x, p.y)).collect();
            let mirror_y: BTreeSet<Point> = set.iter().map(|p| Point::new(p.x, -p.y)).collect();
            prop_assert_eq!(&set, &rotated);
            prop_assert_eq!(&set, &mirror_x);
            prop_assert_eq!(&set, &mirror_y);
        }

        /// Every pixel lies within one unit of the true circle.
        #[test]
        fn prop_circle_pixels_near_radius(
            r in 1i32..300, xc in -100i32..100, yc in -100i32..100
        ) {
            let circle = Circle::new(Point::new(xc, yc), r);
            for algorithm in CircleAlgorithm::ALL {
                let pixels = rasterize_circle_with(circle, algorithm).unwrap();
                for p in pixels {
                    let d = f64::from(p.x - xc).hypot(f64::from(p.y - yc));
                    prop_assert!((d - f64::from(r)).abs() < 1.0);
                }
            }
        }
    }
}
