//! Request validation, dispatch and timing.
//!
//! The handler holds only immutable limits, so a single instance can serve
//! concurrent requests from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use trueno_raster::handler::{LineRequest, RasterRequestHandler};
//!
//! let handler = RasterRequestHandler::default();
//! let result = handler
//!     .handle_line(&LineRequest::new("integer-stepped", 0, 0, 5, 0))
//!     .unwrap();
//! assert_eq!(result.count, 6);
//! ```

use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::RasterConfig;
use crate::error::{Error, Result};
use crate::geometry::{Circle, Line, Pixel, Point};
use crate::render::{CircleAlgorithm, LineAlgorithm, Primitive};

// ============================================================================
// Requests
// ============================================================================

/// Unvalidated line request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    /// Algorithm identifier, e.g. `"integer-stepped"`.
    pub algorithm: String,
    /// Start x.
    pub x1: i64,
    /// Start y.
    pub y1: i64,
    /// End x.
    pub x2: i64,
    /// End y.
    pub y2: i64,
}

impl LineRequest {
    /// Create a line request.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            algorithm: algorithm.into(),
            x1,
            y1,
            x2,
            y2,
        }
    }
}

/// Unvalidated circle request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleRequest {
    /// Center x.
    pub xc: i64,
    /// Center y.
    pub yc: i64,
    /// Radius; must be non-negative.
    pub r: i64,
    /// Optional algorithm identifier; midpoint when absent.
    pub algorithm: Option<String>,
}

impl CircleRequest {
    /// Create a midpoint circle request.
    #[must_use]
    pub fn new(xc: i64, yc: i64, r: i64) -> Self {
        Self {
            xc,
            yc,
            r,
            algorithm: None,
        }
    }

    /// Select the circle algorithm by identifier.
    #[must_use]
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }
}

/// Either kind of drawing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterRequest {
    /// Draw a line.
    Line(LineRequest),
    /// Draw a circle.
    Circle(CircleRequest),
}

/// Wire form of a line request. Every field is optional so that absent
/// fields are reported by name.
#[derive(Debug, Deserialize)]
struct LineWire {
    algorithm: Option<String>,
    x1: Option<i64>,
    y1: Option<i64>,
    x2: Option<i64>,
    y2: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CircleWire {
    xc: Option<i64>,
    yc: Option<i64>,
    r: Option<i64>,
    algorithm: Option<String>,
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(Error::MissingField(field))
}

impl LineWire {
    fn into_request(self) -> Result<LineRequest> {
        Ok(LineRequest {
            algorithm: require(self.algorithm, "algorithm")?,
            x1: require(self.x1, "x1")?,
            y1: require(self.y1, "y1")?,
            x2: require(self.x2, "x2")?,
            y2: require(self.y2, "y2")?,
        })
    }
}

impl CircleWire {
    fn into_request(self) -> Result<CircleRequest> {
        Ok(CircleRequest {
            xc: require(self.xc, "xc")?,
            yc: require(self.yc, "yc")?,
            r: require(self.r, "r")?,
            algorithm: self.algorithm,
        })
    }
}

// ============================================================================
// Result
// ============================================================================

/// Pixels produced by one request, with the time spent rasterizing.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterResult {
    /// Pixels in emission order.
    pub pixels: Vec<Pixel>,
    /// Wall time spent inside the rasterizer.
    pub elapsed: Duration,
    /// Number of pixels; always `pixels.len()`.
    pub count: usize,
    /// Whether intensities are meaningful (antialiased output).
    pub antialiased: bool,
}

#[derive(Serialize)]
struct PixelWire {
    x: i32,
    y: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    intensity: Option<f32>,
}

#[derive(Serialize)]
struct ResultWire {
    pixels: Vec<PixelWire>,
    time: f64,
    count: usize,
}

impl RasterResult {
    fn new(pixels: Vec<Pixel>, elapsed: Duration, antialiased: bool) -> Self {
        let count = pixels.len();
        Self {
            pixels,
            elapsed,
            count,
            antialiased,
        }
    }

    /// Elapsed time in fractional milliseconds.
    #[must_use]
    pub fn time_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Encode as `{"pixels": [{x, y, intensity?}], "time": ms, "count": n}`.
    ///
    /// `intensity` is only written for antialiased output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        let wire = ResultWire {
            pixels: self
                .pixels
                .iter()
                .map(|p| PixelWire {
                    x: p.x,
                    y: p.y,
                    intensity: self.antialiased.then_some(p.intensity),
                })
                .collect(),
            time: self.time_ms(),
            count: self.count,
        };
        serde_json::to_string(&wire).map_err(|e| Error::Internal(e.to_string()))
    }
}

// ============================================================================
// Handler
// ============================================================================

/// Validates drawing requests and runs the matching rasterizer.
#[derive(Debug, Clone, Default)]
pub struct RasterRequestHandler {
    config: RasterConfig,
}

impl RasterRequestHandler {
    /// Create a handler enforcing `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the limits are out of range.
    pub fn new(config: RasterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Limits in force.
    #[must_use]
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Validate, rasterize and time any request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input, or
    /// [`Error::ComputationLimitExceeded`] when the primitive is too large.
    pub fn handle(&self, request: &RasterRequest) -> Result<RasterResult> {
        match request {
            RasterRequest::Line(req) => self.handle_line(req),
            RasterRequest::Circle(req) => self.handle_circle(req),
        }
    }

    /// Validate, rasterize and time a line request.
    ///
    /// # Errors
    ///
    /// See [`handle`](Self::handle).
    pub fn handle_line(&self, request: &LineRequest) -> Result<RasterResult> {
        match self.validate_line(request) {
            Ok(primitive) => self.execute(primitive),
            Err(err) => Err(reject("line", err)),
        }
    }

    /// Validate, rasterize and time a circle request.
    ///
    /// # Errors
    ///
    /// See [`handle`](Self::handle).
    pub fn handle_circle(&self, request: &CircleRequest) -> Result<RasterResult> {
        match self.validate_circle(request) {
            Ok(primitive) => self.execute(primitive),
            Err(err) => Err(reject("circle", err)),
        }
    }

    /// Decode a JSON line request (`{algorithm, x1, y1, x2, y2}`) and handle it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRequest`] for invalid JSON,
    /// [`Error::MissingField`] for an absent field, then as [`handle`](Self::handle).
    pub fn handle_line_json(&self, body: &str) -> Result<RasterResult> {
        let wire: LineWire = serde_json::from_str(body)
            .map_err(|e| Error::MalformedRequest(e.to_string()))?;
        self.handle_line(&wire.into_request().map_err(|err| reject("line", err))?)
    }

    /// Decode a JSON circle request (`{xc, yc, r, algorithm?}`) and handle it.
    ///
    /// # Errors
    ///
    /// As [`handle_line_json`](Self::handle_line_json).
    pub fn handle_circle_json(&self, body: &str) -> Result<RasterResult> {
        let wire: CircleWire = serde_json::from_str(body)
            .map_err(|e| Error::MalformedRequest(e.to_string()))?;
        self.handle_circle(&wire.into_request().map_err(|err| reject("circle", err))?)
    }

    fn validate_line(&self, req: &LineRequest) -> Result<Primitive> {
        let algorithm: LineAlgorithm = req.algorithm.parse()?;
        let start = Point::new(
            self.coordinate("x1", req.x1)?,
            self.coordinate("y1", req.y1)?,
        );
        let end = Point::new(
            self.coordinate("x2", req.x2)?,
            self.coordinate("y2", req.y2)?,
        );
        self.within_budget(Primitive::Line {
            line: Line::new(start, end),
            algorithm,
        })
    }

    fn validate_circle(&self, req: &CircleRequest) -> Result<Primitive> {
        let algorithm = match &req.algorithm {
            Some(name) => name.parse()?,
            None => CircleAlgorithm::default(),
        };
        let center = Point::new(
            self.coordinate("xc", req.xc)?,
            self.coordinate("yc", req.yc)?,
        );

        // The whole outline, not only the center, has to stay on the grid.
        let limit = self.config.max_coordinate.min(Circle::radius_limit(center));
        if !(0..=limit).contains(&req.r) {
            return Err(Error::InvalidRadius {
                radius: req.r,
                limit,
            });
        }
        let radius = to_grid("r", req.r)?;

        self.within_budget(Primitive::Circle {
            circle: Circle::new(center, radius),
            algorithm,
        })
    }

    fn coordinate(&self, field: &'static str, value: i64) -> Result<i32> {
        let limit = self.config.max_coordinate;
        if value.unsigned_abs() > limit.unsigned_abs() {
            return Err(Error::CoordinateOutOfRange {
                field,
                value,
                limit,
            });
        }
        to_grid(field, value)
    }

    fn within_budget(&self, primitive: Primitive) -> Result<Primitive> {
        let estimated = primitive.max_pixels();
        if estimated > self.config.max_pixels {
            return Err(Error::ComputationLimitExceeded {
                estimated,
                limit: self.config.max_pixels,
            });
        }
        Ok(primitive)
    }

    fn execute(&self, primitive: Primitive) -> Result<RasterResult> {
        let started = Instant::now();
        let pixels = primitive.rasterize()?;
        let elapsed = started.elapsed();

        let result = RasterResult::new(pixels, elapsed, primitive.is_antialiased());
        debug!(
            "{}: {} pixels in {:.3} ms",
            primitive.algorithm_name(),
            result.count,
            result.time_ms()
        );
        Ok(result)
    }
}

fn reject(kind: &str, err: Error) -> Error {
    warn!("rejected {kind} request: {err}");
    err
}

/// Narrow a bounds-checked value onto the `i32` grid.
fn to_grid(field: &'static str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Internal(format!("{field} = {value} exceeds i32")))
}
