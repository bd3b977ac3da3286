use std::f64::consts::{PI, TAU};
use std::ops::Sub;
use thiserror::Error;

pub const DEFAULT_INNER_RADIUS: f64 = 150.0;
pub const DEFAULT_OUTER_RADIUS: f64 = 340.0;
pub const DEFAULT_ANGULAR_STEP: f64 = PI / 40.0;
/// Upper bound on segments per arc; finer steps are rejected as `InvalidStep`.
pub const MAX_ARC_STEPS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Point at `radius` from `self` along `angle` (radians, y grows downwards).
    pub fn polar(&self, angle: f64, radius: f64) -> Self {
        Self::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),
    #[error("radius must be finite, got {0}")]
    NonFiniteRadius(f64),
    #[error("inner radius {inner} exceeds outer radius {outer}")]
    InvertedRadii { inner: f64, outer: f64 },
    #[error("angular step must be positive, finite and yield at most 4096 segments per arc, got {0}")]
    InvalidStep(f64),
}

/// Inner and outer radius of the ring. Only constructible through [`Radii::new`],
/// so a value of this type always satisfies `0 <= inner <= outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radii {
    inner: f64,
    outer: f64,
}

impl Radii {
    pub fn new(inner: f64, outer: f64) -> Result<Self, GeometryError> {
        for r in [inner, outer] {
            if !r.is_finite() {
                return Err(GeometryError::NonFiniteRadius(r));
            }
            if r < 0.0 {
                return Err(GeometryError::NegativeRadius(r));
            }
        }
        if inner > outer {
            return Err(GeometryError::InvertedRadii { inner, outer });
        }
        Ok(Self { inner, outer })
    }

    pub fn inner(&self) -> f64 {
        self.inner
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    pub fn mid(&self) -> f64 {
        self.inner + (self.outer - self.inner) * 0.5
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, dist: f64) -> bool {
        dist >= self.inner && dist <= self.outer
    }
}

impl Default for Radii {
    fn default() -> Self {
        Self {
            inner: DEFAULT_INNER_RADIUS,
            outer: DEFAULT_OUTER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceBounds {
    pub start: f64,
    pub end: f64,
}

impl SliceBounds {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) * 0.5
    }
}

/// Angular width of one slice, `None` when there is nothing to divide.
fn slice_width(count: usize) -> Option<f64> {
    (count > 0).then(|| TAU / count as f64)
}

pub fn compute_slice_bounds(count: usize) -> Vec<SliceBounds> {
    let Some(width) = slice_width(count) else {
        return Vec::new();
    };
    (0..count)
        .map(|i| SliceBounds {
            start: i as f64 * width,
            end: (i + 1) as f64 * width,
        })
        .collect()
}

/// Angle of `dir` normalized into `[0, 2π)`.
fn normalized_angle(dir: Point) -> f64 {
    let angle = dir.y.atan2(dir.x);
    if angle < 0.0 { angle + TAU } else { angle }
}

pub fn hit_test(point: Point, center: Point, radii: Radii, slice_count: usize) -> Option<usize> {
    let width = slice_width(slice_count)?;
    let dir = point - center;
    if !radii.contains(dir.length()) {
        return None;
    }
    // floor: a point on a boundary belongs to the slice starting there
    let index = (normalized_angle(dir) / width).floor() as usize;
    Some(index % slice_count)
}

fn arc_steps(bounds: SliceBounds, angular_step: f64) -> Result<usize, GeometryError> {
    if !angular_step.is_finite() || angular_step <= 0.0 {
        return Err(GeometryError::InvalidStep(angular_step));
    }
    let steps = (bounds.span() / angular_step).ceil();
    if !steps.is_finite() || steps > MAX_ARC_STEPS as f64 {
        return Err(GeometryError::InvalidStep(angular_step));
    }
    Ok((steps as usize).max(1))
}

fn arc_points(
    center: Point,
    bounds: SliceBounds,
    radius: f64,
    steps: usize,
) -> impl DoubleEndedIterator<Item = Point> {
    let step = bounds.span() / steps as f64;
    (0..=steps).map(move |i| center.polar(bounds.start + step * i as f64, radius))
}

/// Closed ring polygon for one slice: the outer arc walked from `start` to `end`,
/// then the inner arc walked back from `end` to `start`.
pub fn build_sector_outline(
    center: Point,
    bounds: SliceBounds,
    radii: Radii,
    angular_step: f64,
) -> Result<Vec<Point>, GeometryError> {
    let steps = arc_steps(bounds, angular_step)?;
    let mut outline = Vec::with_capacity(2 * (steps + 1));
    outline.extend(arc_points(center, bounds, radii.outer(), steps));
    outline.extend(arc_points(center, bounds, radii.inner(), steps).rev());
    Ok(outline)
}

/// Slice bounds bound to a center and ring. Outlines, label anchors and hit-testing
/// all go through the same slice width, so drawing and picking cannot disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorLayout {
    pub center: Point,
    pub radii: Radii,
    bounds: Vec<SliceBounds>,
}

impl SectorLayout {
    pub fn new(center: Point, radii: Radii, count: usize) -> Self {
        Self {
            center,
            radii,
            bounds: compute_slice_bounds(count),
        }
    }

    pub fn empty(center: Point, radii: Radii) -> Self {
        Self::new(center, radii, 0)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn bounds(&self) -> &[SliceBounds] {
        &self.bounds
    }

    pub fn hit_test(&self, point: Point) -> Option<usize> {
        hit_test(point, self.center, self.radii, self.bounds.len())
    }

    pub fn outline(
        &self,
        index: usize,
        angular_step: f64,
    ) -> Option<Result<Vec<Point>, GeometryError>> {
        self.bounds
            .get(index)
            .map(|&b| build_sector_outline(self.center, b, self.radii, angular_step))
    }

    /// Where the icon and name of a slice are centered: mid angle, mid radius.
    pub fn label_anchor(&self, index: usize) -> Option<Point> {
        self.bounds
            .get(index)
            .map(|b| self.center.polar(b.mid(), self.radii.mid()))
    }

    /// Open polyline along the outside of the outer arc, used as the hover border.
    pub fn highlight_arc(
        &self,
        index: usize,
        angular_step: f64,
        line_width: f64,
    ) -> Option<Result<Vec<Point>, GeometryError>> {
        let bounds = *self.bounds.get(index)?;
        let radius = self.radii.outer() + line_width * 0.5;
        Some(
            arc_steps(bounds, angular_step)
                .map(|steps| arc_points(self.center, bounds, radius, steps).collect()),
        )
    }
}
