//! # Trueno-Raster
//!
//! Integer-grid rasterization of lines and circles with interchangeable
//! algorithms.
//!
//! Every rasterizer is a pure function of its inputs: no I/O, no timing, no
//! shared state. The [`handler`] module adds request validation, magnitude
//! limits, per-request timing and a JSON wire format on top.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let pixels = rasterize_line(Line::from_coords(0, 0, 5, 2), LineAlgorithm::IntegerStepped);
//! assert_eq!(pixels.len(), 6);
//!
//! let ring = rasterize_circle(Circle::new(Point::ORIGIN, 5))?;
//! assert!(ring.iter().all(|p| p.intensity == 1.0));
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Coordinates
//!
//! Logical coordinates: origin at the grid center, y increasing upward. Any
//! flip to device coordinates belongs to the presentation layer.
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Castle, C. M. A., & Pitteway, M. L. V. (1987). "An Efficient Structural
//!   Technique for Encoding 'Best-Fit' Straight Lines."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Grid points, segments, circles, pixels and octant transforms.
pub mod geometry;

/// Line and circle rasterizers.
pub mod render;

// ============================================================================
// Request Handling
// ============================================================================

/// Handler limits and YAML loading.
pub mod config;

/// Validation, dispatch and timing of drawing requests.
pub mod handler;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RasterConfig;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Circle, Line, Pixel, Point};
    pub use crate::handler::{
        CircleRequest, LineRequest, RasterRequest, RasterRequestHandler, RasterResult,
    };
    pub use crate::render::{
        rasterize_circle, rasterize_circle_with, rasterize_line, CircleAlgorithm, LineAlgorithm,
        LineRasterizer, Primitive,
    };
}
