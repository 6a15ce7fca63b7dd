use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Slack applied when comparing a distance against a boundary threshold.
/// A point exactly on the boundary (up to rounding) counts as inside.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// A point (or vector) in normalized scene coordinates.
///
/// Origin is top-left, +y points down. One unit is the width of the
/// reference canvas divided by 0.46.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// The vector rotated by +90 degrees: `(-y, x)`.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Unit vector with the same direction. A zero-length vector is returned
    /// unchanged so callers see a zero offset instead of NaN.
    pub fn normalized_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 { self * (1.0 / len) } else { self }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle stored as its min (top-left) and max (bottom-right)
/// corners. Storing both corners lets adjacent rows share an edge value
/// bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin, Point::new(origin.x + width, origin.y + height))
    }

    pub fn left(&self) -> f64 {
        self.min.x
    }

    pub fn right(&self) -> f64 {
        self.max.x
    }

    pub fn top(&self) -> f64 {
        self.min.y
    }

    pub fn bottom(&self) -> f64 {
        self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp each axis of `p` independently into the rectangle.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Distance from `p` to the rectangle (zero when inside).
    pub fn distance_to(&self, p: Point) -> f64 {
        p.distance(self.clamp(p))
    }

    /// Closest point on the rectangle's outline. For an outside point this is
    /// the clamped point; for an inside point it is the projection onto the
    /// nearest edge.
    pub fn nearest_edge_point(&self, p: Point) -> Point {
        if !self.contains(p) {
            return self.clamp(p);
        }
        let candidates = [
            (p.x - self.min.x, Point::new(self.min.x, p.y)),
            (self.max.x - p.x, Point::new(self.max.x, p.y)),
            (p.y - self.min.y, Point::new(p.x, self.min.y)),
            (self.max.y - p.y, Point::new(p.x, self.max.y)),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        best.1
    }

    /// Split into `rows` equal-height rows that tile the rectangle exactly:
    /// row `i`'s bottom edge is the same value as row `i + 1`'s top edge.
    pub fn split_rows(&self, rows: usize) -> Vec<Rect> {
        let edge = |i: usize| {
            if i == rows {
                self.max.y
            } else {
                self.min.y + self.height() * i as f64 / rows as f64
            }
        };
        (0..rows)
            .map(|i| {
                Rect::new(
                    Point::new(self.min.x, edge(i)),
                    Point::new(self.max.x, edge(i + 1)),
                )
            })
            .collect()
    }
}

/// Closest point to `p` on the segment `a`-`b`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < 1e-18 {
        // Degenerate segment (point)
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Ray-casting point-in-polygon test. The polygon is implicitly closed.
///
/// Casts a horizontal ray towards +x and counts edge crossings using a
/// half-open rule on y so that shared vertices are counted once. Polygons
/// with fewer than three vertices contain nothing.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut crossings = 0;
    for i in 0..n {
        let v0 = vertices[i];
        let v1 = vertices[(i + 1) % n];
        let (y_min, y_max) = if v0.y < v1.y {
            (v0.y, v1.y)
        } else {
            (v1.y, v0.y)
        };
        if p.y < y_min || p.y >= y_max {
            continue;
        }
        let t = (p.y - v0.y) / (v1.y - v0.y);
        let x_crossing = v0.x + t * (v1.x - v0.x);
        if x_crossing > p.x {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// Closest point to `p` on the edges of the closed polygon `vertices`.
/// Returns `None` for an empty polygon.
pub fn nearest_point_on_polygon(p: Point, vertices: &[Point]) -> Option<Point> {
    match vertices {
        [] => None,
        [only] => Some(*only),
        _ => {
            let n = vertices.len();
            let mut best: Option<(f64, Point)> = None;
            for i in 0..n {
                let candidate = closest_point_on_segment(p, vertices[i], vertices[(i + 1) % n]);
                let d = p.distance(candidate);
                if best.is_none_or(|(best_d, _)| d < best_d) {
                    best = Some((d, candidate));
                }
            }
            best.map(|(_, point)| point)
        },
    }
}
