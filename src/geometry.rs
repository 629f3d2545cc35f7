//! Geometric primitives for rasterization.
//!
//! Provides the integer grid types shared by every rasterizer, plus the pure
//! coordinate transforms (axis swap, sign reflection) that map a canonical
//! first-octant offset back into world coordinates.
//!
//! Coordinates are logical: origin at the grid center, y increasing upward.

/// A point on the integer logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if `other` is one of the eight neighbours of `self`.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        let dx = (i64::from(other.x) - i64::from(self.x)).abs();
        let dy = (i64::from(other.y) - i64::from(self.y)).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

/// A line segment between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// The same segment traversed from `end` to `start`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Signed deltas `(dx, dy)`, widened so extreme coordinates cannot overflow.
    #[must_use]
    pub fn delta(&self) -> (i64, i64) {
        (
            i64::from(self.end.x) - i64::from(self.start.x),
            i64::from(self.end.y) - i64::from(self.start.y),
        )
    }

    /// Number of unit steps along the dominant axis.
    #[must_use]
    pub fn major_steps(&self) -> u64 {
        let (dx, dy) = self.delta();
        dx.unsigned_abs().max(dy.unsigned_abs())
    }

    /// True if both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// A circle on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius in grid units. Negative values are rejected by the rasterizers.
    pub radius: i32,
}

impl Circle {
    /// Create a new circle.
    #[must_use]
    pub const fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Largest radius for which a circle around `center` stays on the `i32`
    /// grid in every direction.
    #[must_use]
    pub fn radius_limit(center: Point) -> i64 {
        let room = |c: i32| {
            let c = i64::from(c);
            (i64::from(i32::MAX) - c).min(c - i64::from(i32::MIN))
        };
        room(center.x).min(room(center.y))
    }
}

/// A rasterized pixel with coverage intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Coverage; 1.0 for every non-antialiased pixel.
    pub intensity: f32,
}

impl Pixel {
    /// A fully covered pixel.
    #[must_use]
    pub const fn solid(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            intensity: 1.0,
        }
    }

    /// A partially covered pixel. Intensity is clamped into `[0, 1]`.
    #[must_use]
    pub fn with_intensity(point: Point, intensity: f32) -> Self {
        Self {
            x: point.x,
            y: point.y,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// Grid position of this pixel.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ============================================================================
// Octant Transforms
// ============================================================================

/// Maps canonical first-octant offsets `(u, v)` with `u >= v >= 0` onto one
/// of the eight world octants around an origin.
///
/// `u` runs along the dominant axis and `v` along the minor axis. The
/// transform is an axis swap followed by a sign reflection, so it never
/// changes the order in which offsets are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octant {
    /// Dominant axis is y rather than x.
    pub steep: bool,
    /// Step direction along world x (+1 or -1).
    pub sx: i32,
    /// Step direction along world y (+1 or -1).
    pub sy: i32,
}

impl Octant {
    /// Octant of the direction `(dx, dy)`. Ties (|dx| == |dy|) are x-major.
    #[must_use]
    pub fn of(dx: i64, dy: i64) -> Self {
        Self {
            steep: dy.abs() > dx.abs(),
            sx: if dx < 0 { -1 } else { 1 },
            sy: if dy < 0 { -1 } else { 1 },
        }
    }

    /// Canonical extents `(du, dv)` of the delta in this octant.
    #[must_use]
    pub fn canonical(self, dx: i64, dy: i64) -> (i64, i64) {
        let (du, dv) = (dx.abs(), dy.abs());
        if self.steep {
            (dv, du)
        } else {
            (du, dv)
        }
    }

    /// Sign of the world minor-axis step.
    #[must_use]
    pub const fn minor_sign(self) -> i32 {
        if self.steep {
            self.sx
        } else {
            self.sy
        }
    }

    /// World point at canonical offset `(u, v)` from `origin`.
    #[must_use]
    pub fn to_world(self, origin: Point, u: i64, v: i64) -> Point {
        let (ox, oy) = swap_axes(u, v, self.steep);
        let (ox, oy) = reflect(ox, oy, self.sx, self.sy);
        translate(origin, ox, oy)
    }
}

/// Swap the two axes of an offset when `swap` is set.
#[must_use]
pub const fn swap_axes(u: i64, v: i64, swap: bool) -> (i64, i64) {
    if swap {
        (v, u)
    } else {
        (u, v)
    }
}

/// Reflect an offset by per-axis signs.
#[must_use]
pub const fn reflect(x: i64, y: i64, sx: i32, sy: i32) -> (i64, i64) {
    (x * sx as i64, y * sy as i64)
}

/// Translate `origin` by a widened offset.
///
/// Circles are bounded by [`Circle::radius_limit`] before rasterizing; a
/// result outside `i32` saturates rather than wrapping.
#[must_use]
pub fn translate(origin: Point, dx: i64, dy: i64) -> Point {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Point::new(
        clamp(i64::from(origin.x) + dx),
        clamp(i64::from(origin.y) + dy),
    )
}

/// Reflect a first-octant circle offset `(x, y)` into all eight octants.
///
/// Order: (+x,+y) (-x,+y) (+x,-y) (-x,-y) (+y,+x) (-y,+x) (+y,-x) (-y,-x).
/// Offsets on an axis or on the diagonal produce repeated points.
#[must_use]
pub fn reflect_octants(center: Point, x: i64, y: i64) -> [Point; 8] {
    let signs = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
    let mut out = [center; 8];
    for (i, swap) in [false, true].into_iter().enumerate() {
        let (a, b) = swap_axes(x, y, swap);
        for (j, (sx, sy)) in signs.into_iter().enumerate() {
            let (ox, oy) = reflect(a, b, sx, sy);
            out[i * 4 + j] = translate(center, ox, oy);
        }
    }
    out
}
