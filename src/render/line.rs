//! Line rasterization algorithms.
//!
//! Every algorithm emits pixels in sweep order from `line.start` to
//! `line.end`. The integer algorithms and Wu's algorithm work on canonical
//! first-octant offsets and map each one through [`Octant::to_world`] as it
//! is produced, so emission order is never permuted.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::{Line, Octant, Pixel, Point};

/// Strategy interface shared by all line algorithms.
///
/// Implementations are pure: no I/O, no timing, no shared state.
pub trait LineRasterizer: Send + Sync {
    /// Rasterize `line` into an ordered pixel sequence.
    fn rasterize(&self, line: Line) -> Vec<Pixel>;
}

/// Closed set of line algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAlgorithm {
    /// Digital differential analyzer: accumulated floating increments.
    Incremental,
    /// Minor coordinate evaluated from the slope at every step.
    StepByStep,
    /// Bresenham's integer decision variable.
    IntegerStepped,
    /// Castle-Pitteway move-string generation.
    CastlePitteway,
    /// Wu's antialiased dual-pixel stepping.
    Antialiased,
}

impl LineAlgorithm {
    /// Every algorithm, in wire-name order.
    pub const ALL: [Self; 5] = [
        Self::Incremental,
        Self::StepByStep,
        Self::IntegerStepped,
        Self::CastlePitteway,
        Self::Antialiased,
    ];

    /// Canonical wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::StepByStep => "step-by-step",
            Self::IntegerStepped => "integer-stepped",
            Self::CastlePitteway => "castle-pitteway",
            Self::Antialiased => "antialiased",
        }
    }

    /// True if the algorithm may emit intensities below 1.0.
    #[must_use]
    pub const fn is_antialiased(self) -> bool {
        matches!(self, Self::Antialiased)
    }

    /// Upper bound on the number of pixels emitted for `line`.
    #[must_use]
    pub fn max_pixels(self, line: &Line) -> u64 {
        let per_step = if self.is_antialiased() { 2 } else { 1 };
        let steps = line.major_steps().saturating_add(1);
        steps.saturating_mul(per_step)
    }

    /// The rasterizer implementing this algorithm.
    #[must_use]
    pub fn rasterizer(self) -> &'static dyn LineRasterizer {
        match self {
            Self::Incremental => &Dda,
            Self::StepByStep => &StepByStep,
            Self::IntegerStepped => &Bresenham,
            Self::CastlePitteway => &CastlePitteway,
            Self::Antialiased => &Wu,
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineAlgorithm {
    type Err = Error;

    /// Accepts the canonical identifiers plus the legacy names
    /// `dda`, `bresenham`, `wu`, `step_by_step` and `castle_pitway`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incremental" | "dda" => Ok(Self::Incremental),
            "step-by-step" | "step_by_step" => Ok(Self::StepByStep),
            "integer-stepped" | "bresenham" => Ok(Self::IntegerStepped),
            "castle-pitteway" | "castle_pitway" => Ok(Self::CastlePitteway),
            "antialiased" | "wu" => Ok(Self::Antialiased),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Rasterize `line` with `algorithm`.
#[must_use]
pub fn rasterize_line(line: Line, algorithm: LineAlgorithm) -> Vec<Pixel> {
    algorithm.rasterizer().rasterize(line)
}

/// Canonical sweep parameters, or `None` for a zero-length line.
fn sweep(line: &Line) -> Option<(Octant, i64, i64)> {
    if line.is_degenerate() {
        return None;
    }
    let (dx, dy) = line.delta();
    let octant = Octant::of(dx, dy);
    let (du, dv) = octant.canonical(dx, dy);
    Some((octant, du, dv))
}

fn capacity(steps: i64) -> usize {
    usize::try_from(steps).map_or(0, |n| n.saturating_add(1))
}

// ============================================================================
// Floating-point Algorithms
// ============================================================================

/// DDA: one unit along the dominant axis, slope fraction along the other,
/// rounded per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dda;

impl LineRasterizer for Dda {
    fn rasterize(&self, line: Line) -> Vec<Pixel> {
        let (dx, dy) = line.delta();
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            return vec![Pixel::solid(line.start)];
        }

        let x_inc = dx as f64 / steps as f64;
        let y_inc = dy as f64 / steps as f64;
        let mut x = f64::from(line.start.x);
        let mut y = f64::from(line.start.y);

        let mut pixels = Vec::with_capacity(capacity(steps));
        for _ in 0..=steps {
            pixels.push(Pixel::solid(Point::new(x.round() as i32, y.round() as i32)));
            x += x_inc;
            y += y_inc;
        }
        pixels
    }
}

/// Step-by-step: minor offset is `round(u * slope)` at every step, so no
/// error accumulates along long lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepByStep;

impl LineRasterizer for StepByStep {
    fn rasterize(&self, line: Line) -> Vec<Pixel> {
        let Some((octant, du, dv)) = sweep(&line) else {
            return vec![Pixel::solid(line.start)];
        };

        let slope = dv as f64 / du as f64;
        (0..=du)
            .map(|u| {
                let v = (u as f64 * slope).round() as i64;
                Pixel::solid(octant.to_world(line.start, u, v))
            })
            .collect()
    }
}

// ============================================================================
// Integer Algorithms
// ============================================================================

/// Bresenham's line algorithm.
///
/// The decision variable `d = 2u·dv - (2v+1)·du` tracks which side of the
/// midpoint the ideal line passes at the next column. When it passes exactly
/// through the midpoint, the candidate with the lower world minor-axis
/// coordinate is taken, which keeps the pixel set identical when the
/// endpoints are swapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bresenham;

impl LineRasterizer for Bresenham {
    fn rasterize(&self, line: Line) -> Vec<Pixel> {
        let Some((octant, du, dv)) = sweep(&line) else {
            return vec![Pixel::solid(line.start)];
        };

        let step_on_tie = octant.minor_sign() < 0;
        let mut d = 2 * dv - du;
        let mut v = 0;

        let mut pixels = Vec::with_capacity(capacity(du));
        pixels.push(Pixel::solid(line.start));
        for u in 1..=du {
            if d > 0 || (d == 0 && step_on_tie) {
                v += 1;
                d -= 2 * du;
            }
            d += 2 * dv;
            pixels.push(Pixel::solid(octant.to_world(line.start, u, v)));
        }
        pixels
    }
}

/// A single step along the dominant axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// Major axis only.
    Straight,
    /// Major and minor axis.
    Diagonal,
}

/// Castle-Pitteway line algorithm.
///
/// Builds the whole straight/diagonal move word for the canonical extents
/// by a Euclid-style reduction of `(du - dv, dv)`, then walks it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastlePitteway;

impl CastlePitteway {
    fn moves(du: i64, dv: i64) -> Vec<Move> {
        let len = usize::try_from(du).unwrap_or(0);
        if dv == 0 {
            return vec![Move::Straight; len];
        }
        if dv == du {
            return vec![Move::Diagonal; len];
        }

        let mut x = du - dv;
        let mut y = dv;
        let mut m1 = vec![Move::Straight];
        let mut m2 = vec![Move::Diagonal];

        // Repeated subtraction is applied a quotient at a time.
        while x != y {
            if x > y {
                let q = (x - 1) / y;
                x -= q * y;
                m2 = Self::rewrite(&m1, &m2, q);
            } else {
                let q = (y - 1) / x;
                y -= q * x;
                m1 = Self::rewrite(&m2, &m1, q);
            }
        }

        let mut unit = m2;
        unit.extend(m1.iter().rev());
        unit.repeat(usize::try_from(x).unwrap_or(0))
    }

    /// `q` applications of `w <- a + reverse(w)`, in closed form:
    /// `a^ceil(q/2) + (w or reverse(w)) + reverse(a)^floor(q/2)`.
    fn rewrite(a: &[Move], w: &[Move], q: i64) -> Vec<Move> {
        let q = usize::try_from(q).unwrap_or(0);
        let (lead, trail) = ((q + 1) / 2, q / 2);

        let mut out = Vec::with_capacity(a.len() * q + w.len());
        for _ in 0..lead {
            out.extend_from_slice(a);
        }
        if q % 2 == 1 {
            out.extend(w.iter().rev());
        } else {
            out.extend_from_slice(w);
        }
        for _ in 0..trail {
            out.extend(a.iter().rev());
        }
        out
    }
}

impl LineRasterizer for CastlePitteway {
    fn rasterize(&self, line: Line) -> Vec<Pixel> {
        let Some((octant, du, dv)) = sweep(&line) else {
            return vec![Pixel::solid(line.start)];
        };

        let mut pixels = Vec::with_capacity(capacity(du));
        pixels.push(Pixel::solid(line.start));
        let (mut u, mut v) = (0, 0);
        for step in Self::moves(du, dv) {
            u += 1;
            if step == Move::Diagonal {
                v += 1;
            }
            pixels.push(Pixel::solid(octant.to_world(line.start, u, v)));
        }
        pixels
    }
}

// ============================================================================
// Anti-aliased Algorithm
// ============================================================================

/// Xiaolin Wu's antialiased line algorithm.
///
/// The perpendicular position `u·dv/du` is tracked as an integer part plus a
/// remainder, so the fraction is exact and a zero fraction is detected
/// exactly. Interior steps emit the near pixel with `1 - frac` and the far
/// pixel with `frac`; a zero fraction emits one solid pixel. Endpoints are
/// always solid.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wu;

impl LineRasterizer for Wu {
    fn rasterize(&self, line: Line) -> Vec<Pixel> {
        let Some((octant, du, dv)) = sweep(&line) else {
            return vec![Pixel::solid(line.start)];
        };

        let mut pixels = Vec::with_capacity(capacity(du).saturating_mul(2));
        pixels.push(Pixel::solid(line.start));

        let mut ipart = 0;
        let mut rem = 0;
        for u in 1..du {
            rem += dv;
            if rem >= du {
                rem -= du;
                ipart += 1;
            }

            let near = octant.to_world(line.start, u, ipart);
            if rem == 0 {
                pixels.push(Pixel::solid(near));
                continue;
            }

            let frac = rem as f64 / du as f64;
            let far = octant.to_world(line.start, u, ipart + 1);
            pixels.push(Pixel::with_intensity(near, (1.0 - frac) as f32));
            pixels.push(Pixel::with_intensity(far, frac as f32));
        }

        pixels.push(Pixel::solid(line.end));
        pixels
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn points(pixels: &[Pixel]) -> Vec<(i32, i32)> {
        pixels.iter().map(|p| (p.x, p.y)).collect()
    }

    fn parse(name: &str) -> LineAlgorithm {
        name.parse().unwrap()
    }

    #[test]
    fn test_parse_canonical_and_legacy_names() {
        for algorithm in LineAlgorithm::ALL {
            assert_eq!(parse(algorithm.as_str()), algorithm);
        }
        assert_eq!(parse("dda"), LineAlgorithm::Incremental);
        assert_eq!(parse("step_by_step"), LineAlgorithm::StepByStep);
        assert_eq!(parse("bresenham"), LineAlgorithm::IntegerStepped);
        assert_eq!(parse("wu"), LineAlgorithm::Antialiased);
        assert_eq!(parse("castle_pitway"), LineAlgorithm::CastlePitteway);
    }

    #[test]
    fn test_parse_unknown_algorithm() {
        let err = "foo".parse::<LineAlgorithm>().unwrap_err();
        assert_eq!(err, Error::UnknownAlgorithm("foo".to_string()));
        assert!(err.is_validation());
    }

    #[test]
    fn test_horizontal_line_every_algorithm() {
        let line = Line::from_coords(0, 0, 5, 0);
        for algorithm in LineAlgorithm::ALL {
            let pixels = rasterize_line(line, algorithm);
            assert_eq!(
                points(&pixels),
                vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)],
                "{algorithm}"
            );
            assert!(pixels.iter().all(|p| p.intensity == 1.0), "{algorithm}");
        }
    }

    #[test]
    fn test_degenerate_line_single_pixel() {
        let line = Line::from_coords(-3, 7, -3, 7);
        for algorithm in LineAlgorithm::ALL {
            let pixels = rasterize_line(line, algorithm);
            assert_eq!(points(&pixels), vec![(-3, 7)], "{algorithm}");
        }
    }

    #[test]
    fn test_vertical_and_diagonal_lines_are_solid() {
        for line in [
            Line::from_coords(2, 4, 2, -3),
            Line::from_coords(-1, -1, 4, 4),
        ] {
            for algorithm in LineAlgorithm::ALL {
                let pixels = rasterize_line(line, algorithm);
                assert_eq!(pixels.len() as u64, line.major_steps() + 1, "{algorithm}");
                assert!(pixels.iter().all(|p| p.intensity == 1.0), "{algorithm}");
            }
        }
    }

    #[test]
    fn test_bresenham_classic_path() {
        let line = Line::from_coords(0, 0, 5, 2);
        let pixels = rasterize_line(line, LineAlgorithm::IntegerStepped);
        assert_eq!(
            points(&pixels),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        );
    }

    #[test]
    fn test_bresenham_emits_from_start() {
        let line = Line::from_coords(5, 2, 0, 0);
        let pixels = rasterize_line(line, LineAlgorithm::IntegerStepped);
        assert_eq!(pixels.first().map(Pixel::point), Some(Point::new(5, 2)));
        assert_eq!(pixels.last().map(Pixel::point), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_bresenham_tie_prefers_lower_minor() {
        // Ideal y at x = 1 is exactly 0.5 in both directions.
        let line = Line::from_coords(0, 0, 2, 1);
        let forward = rasterize_line(line, LineAlgorithm::IntegerStepped);
        let backward = rasterize_line(line.reversed(), LineAlgorithm::IntegerStepped);
        assert_eq!(points(&forward), vec![(0, 0), (1, 0), (2, 1)]);
        assert_eq!(points(&backward), vec![(2, 1), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_dda_steep_negative() {
        let pixels = rasterize_line(Line::from_coords(0, 0, -1, -4), LineAlgorithm::Incremental);
        assert_eq!(pixels.len(), 5);
        assert_eq!(pixels[0].point(), Point::new(0, 0));
        assert_eq!(pixels[4].point(), Point::new(-1, -4));
        let drops: Vec<i32> = pixels.windows(2).map(|w| w[0].y - w[1].y).collect();
        assert!(drops.iter().all(|&d| d == 1));
    }

    #[test]
    fn test_step_by_step_matches_rounded_slope() {
        let pixels = rasterize_line(Line::from_coords(0, 0, 10, 3), LineAlgorithm::StepByStep);
        for (u, p) in pixels.iter().enumerate() {
            let ideal = u as f64 * 0.3;
            assert!((f64::from(p.y) - ideal).abs() <= 0.5, "step {u}: {p:?}");
            assert_eq!(p.x, u as i32);
        }
    }

    #[test]
    fn test_castle_pitteway_move_words() {
        use Move::{Diagonal as D, Straight as S};
        assert_eq!(CastlePitteway::moves(5, 2), vec![S, D, S, D, S]);
        assert_eq!(CastlePitteway::moves(7, 3), vec![S, D, S, D, S, D, S]);
        assert_eq!(CastlePitteway::moves(4, 0), vec![S; 4]);
        assert_eq!(CastlePitteway::moves(3, 3), vec![D; 3]);
    }

    #[test]
    fn test_castle_pitteway_octants() {
        let line = Line::from_coords(0, 0, -2, 5);
        let pixels = rasterize_line(line, LineAlgorithm::CastlePitteway);
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[5].point(), Point::new(-2, 5));
    }

    #[test]
    fn test_wu_endpoints_solid_and_pairs_sum_to_one() {
        let pixels = rasterize_line(Line::from_coords(0, 0, 8, 3), LineAlgorithm::Antialiased);
        assert_eq!(pixels.first().map(|p| p.intensity), Some(1.0));
        assert_eq!(pixels.last().map(|p| p.intensity), Some(1.0));

        for x in 1..8 {
            let total: f32 = pixels
                .iter()
                .filter(|p| p.x == x)
                .map(|p| p.intensity)
                .sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_wu_straddles_ideal_position() {
        let pixels = rasterize_line(Line::from_coords(0, 0, 4, 1), LineAlgorithm::Antialiased);
        // x = 1: ideal y = 0.25
        let column: Vec<_> = pixels.iter().filter(|p| p.x == 1).collect();
        assert_eq!(column.len(), 2);
        assert_eq!((column[0].y, column[1].y), (0, 1));
        assert_abs_diff_eq!(column[0].intensity, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(column[1].intensity, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_wu_negative_minor_direction() {
        let pixels = rasterize_line(Line::from_coords(0, 0, -1, -4), LineAlgorithm::Antialiased);
        // y = -1: ideal x = -0.25, near pixel is x = 0
        let row: Vec<_> = pixels.iter().filter(|p| p.y == -1).collect();
        assert_eq!((row[0].x, row[1].x), (0, -1));
        assert_abs_diff_eq!(row[0].intensity, 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_max_pixels_bound() {
        let line = Line::from_coords(0, 0, 10, 4);
        assert_eq!(LineAlgorithm::IntegerStepped.max_pixels(&line), 11);
        assert_eq!(LineAlgorithm::Antialiased.max_pixels(&line), 22);
        for algorithm in LineAlgorithm::ALL {
            let emitted = rasterize_line(line, algorithm).len() as u64;
            assert!(emitted <= algorithm.max_pixels(&line), "{algorithm}");
        }
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================
