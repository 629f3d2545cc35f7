//! Rasterization of geometric primitives.
//!
//! # Algorithms
//!
//! - **DDA** and **step-by-step**: floating slope stepping, rounded per step
//! - **Bresenham's Line**: integer decision variable, no division
//! - **Castle-Pitteway**: move-string generation by Euclid-style reduction
//! - **Wu's Anti-aliased Line**: two straddling pixels per step
//! - **Midpoint / Bresenham Circle**: one octant plus eight-way reflection
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Castle, C. M. A., & Pitteway, M. L. V. (1987). "An Efficient Structural
//!   Technique for Encoding 'Best-Fit' Straight Lines."

mod circle;
mod line;

pub use circle::{distinct_points, rasterize_circle, rasterize_circle_with, CircleAlgorithm};
pub use line::{
    rasterize_line, Bresenham, CastlePitteway, Dda, LineAlgorithm, LineRasterizer, StepByStep, Wu,
};

use crate::error::Result;
use crate::geometry::{Circle, Line, Pixel};

/// A primitive paired with the algorithm that rasterizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// A line segment.
    Line {
        /// Segment to draw.
        line: Line,
        /// Line algorithm.
        algorithm: LineAlgorithm,
    },
    /// A circle outline.
    Circle {
        /// Circle to draw.
        circle: Circle,
        /// Circle algorithm.
        algorithm: CircleAlgorithm,
    },
}

impl Primitive {
    /// Rasterize into an ordered pixel sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadius`](crate::Error::InvalidRadius) for a
    /// circle with negative radius or one that leaves the `i32` grid.
    pub fn rasterize(&self) -> Result<Vec<Pixel>> {
        match *self {
            Self::Line { line, algorithm } => Ok(rasterize_line(line, algorithm)),
            Self::Circle { circle, algorithm } => rasterize_circle_with(circle, algorithm),
        }
    }

    /// Upper bound on the number of pixels [`rasterize`](Self::rasterize) emits.
    #[must_use]
    pub fn max_pixels(&self) -> u64 {
        match self {
            Self::Line { line, algorithm } => algorithm.max_pixels(line),
            Self::Circle { circle, algorithm } => {
                algorithm.max_pixels(u64::try_from(circle.radius).unwrap_or(0))
            }
        }
    }

    /// True if the output may carry fractional intensities.
    #[must_use]
    pub fn is_antialiased(&self) -> bool {
        matches!(self, Self::Line { algorithm, .. } if algorithm.is_antialiased())
    }

    /// Name of the algorithm in use.
    #[must_use]
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Line { algorithm, .. } => algorithm.as_str(),
            Self::Circle { algorithm, .. } => algorithm.as_str(),
        }
    }
}
