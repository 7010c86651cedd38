//! Plane geometry value types shared by the graph, templates, and relaxer.

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    pub const ZERO: XY = XY { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: XY) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product of two plane vectors.
    pub fn cross(self, rhs: XY) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn approx_eq(self, other: XY, tolerance: f64) -> bool {
        (self - other).length() < tolerance
    }

    pub fn min(self, rhs: XY) -> XY {
        XY::new(self.x.min(rhs.x), self.y.min(rhs.y))
    }

    pub fn max(self, rhs: XY) -> XY {
        XY::new(self.x.max(rhs.x), self.y.max(rhs.y))
    }

    pub fn rot90(self) -> XY {
        XY::new(self.y, -self.x)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<XY> {
        let length = self.length();
        if length == 0.0 { None } else { Some(self / length) }
    }
}

impl Add for XY {
    type Output = XY;

    fn add(self, rhs: XY) -> XY {
        XY::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for XY {
    type Output = XY;

    fn sub(self, rhs: XY) -> XY {
        XY::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for XY {
    type Output = XY;

    fn neg(self) -> XY {
        XY::new(-self.x, -self.y)
    }
}

impl Mul<f64> for XY {
    type Output = XY;

    fn mul(self, rhs: f64) -> XY {
        XY::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for XY {
    type Output = XY;

    fn div(self, rhs: f64) -> XY {
        XY::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned box. The empty box has no position and absorbs nothing in `union`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    extent: Option<(XY, XY)>,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox { extent: None };

    /// Panics if `min` exceeds `max` on either axis.
    pub fn new(min: XY, max: XY) -> Self {
        assert!(min.x <= max.x, "bounding box with negative X size");
        assert!(min.y <= max.y, "bounding box with negative Y size");
        Self { extent: Some((min, max)) }
    }

    pub fn around_disc(center: XY, radius: f64) -> Self {
        let r = XY::new(radius.abs(), radius.abs());
        Self::new(center - r, center + r)
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    pub fn min(&self) -> Option<XY> {
        self.extent.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<XY> {
        self.extent.map(|(_, max)| max)
    }

    pub fn center(&self) -> Option<XY> {
        self.extent.map(|(min, max)| (min + max) / 2.0)
    }

    /// Zero for an empty box.
    pub fn diagonal(&self) -> XY {
        self.extent.map_or(XY::ZERO, |(min, max)| max - min)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        match (self.extent, other.extent) {
            (None, _) => *other,
            (_, None) => *self,
            (Some((a_min, a_max)), Some((b_min, b_max))) => {
                BoundingBox::new(a_min.min(b_min), a_max.max(b_max))
            }
        }
    }

    pub fn include_point(&mut self, point: XY) {
        *self = self.union(&BoundingBox::new(point, point));
    }

    pub fn include_disc(&mut self, center: XY, radius: f64) {
        *self = self.union(&BoundingBox::around_disc(center, radius));
    }

    /// Empty boxes are disjoint from everything.
    pub fn disjoint(&self, other: &BoundingBox) -> bool {
        match (self.extent, other.extent) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => {
                a_min.x > b_max.x || a_min.y > b_max.y || a_max.x < b_min.x || a_max.y < b_min.y
            }
            _ => true,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Where the closed segments `a0..a1` and `b0..b1` meet, as fractions along each.
///
/// Parallel and degenerate segments are reported as not intersecting.
pub fn segment_intersection(a0: XY, a1: XY, b0: XY, b1: XY) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denominator = da.cross(db);
    if denominator.abs() < 1e-12 {
        return None;
    }

    let offset = b0 - a0;
    let t = offset.cross(db) / denominator;
    let u = offset.cross(da) / denominator;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) { Some((t, u)) } else { None }
}

/// Closest point to `point` on segment `start..end`, with its fraction along the segment.
pub fn closest_point_on_segment(point: XY, start: XY, end: XY) -> (XY, f64) {
    let direction = end - start;
    let length_squared = direction.length_squared();
    if length_squared == 0.0 {
        return (start, 0.0);
    }
    let t = ((point - start).dot(direction) / length_squared).clamp(0.0, 1.0);
    (start + direction * t, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic_matches_component_math() {
        let a = XY::new(-4.0, 3.0);
        let b = XY::new(-14.0, -7.0);
        assert_eq!(a + (b - a) * 0.1, XY::new(-5.0, 2.0));
        assert_eq!(-a, XY::new(4.0, -3.0));
        assert_eq!(a.length(), 5.0);
        assert_eq!(XY::new(2.0, 0.0).rot90(), XY::new(0.0, -2.0));
        assert!(XY::ZERO.normalized().is_none());
    }

    #[test]
    fn empty_box_is_identity_for_union() {
        let b = BoundingBox::new(XY::new(1.0, 2.0), XY::new(3.0, 5.0));
        assert_eq!(BoundingBox::EMPTY.union(&b), b);
        assert_eq!(b.union(&BoundingBox::EMPTY), b);
        assert_eq!(b.diagonal(), XY::new(2.0, 3.0));
        assert_eq!(BoundingBox::EMPTY.diagonal(), XY::ZERO);
        assert!(BoundingBox::EMPTY.disjoint(&b));
    }

    #[test]
    fn include_disc_grows_by_radius() {
        let mut bounds = BoundingBox::EMPTY;
        bounds.include_disc(XY::new(0.0, 0.0), 2.0);
        bounds.include_point(XY::new(10.0, -1.0));
        assert_eq!(bounds.min(), Some(XY::new(-2.0, -2.0)));
        assert_eq!(bounds.max(), Some(XY::new(10.0, 2.0)));
        assert_eq!(bounds.center(), Some(XY::new(4.0, 0.0)));
    }

    #[test]
    #[should_panic(expected = "negative X size")]
    fn inverted_box_is_rejected() {
        let _ = BoundingBox::new(XY::new(1.0, 0.0), XY::new(0.0, 0.0));
    }

    #[test]
    fn crossing_segments_report_fractions() {
        let hit = segment_intersection(
            XY::new(-10.0, 0.0),
            XY::new(10.0, 0.0),
            XY::new(0.0, -10.0),
            XY::new(0.0, 30.0),
        )
        .expect("segments cross");
        assert!((hit.0 - 0.5).abs() < 1e-12);
        assert!((hit.1 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_separated_segments_do_not_intersect() {
        assert!(
            segment_intersection(
                XY::new(0.0, 0.0),
                XY::new(10.0, 0.0),
                XY::new(0.0, 1.0),
                XY::new(10.0, 1.0),
            )
            .is_none()
        );
        assert!(
            segment_intersection(
                XY::new(0.0, 0.0),
                XY::new(1.0, 0.0),
                XY::new(5.0, -1.0),
                XY::new(5.0, 1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn closest_point_clamps_to_segment_ends() {
        let (p, t) = closest_point_on_segment(XY::new(-5.0, 3.0), XY::ZERO, XY::new(10.0, 0.0));
        assert_eq!(p, XY::ZERO);
        assert_eq!(t, 0.0);
        let (p, t) = closest_point_on_segment(XY::new(4.0, 3.0), XY::ZERO, XY::new(10.0, 0.0));
        assert_eq!(p, XY::new(4.0, 0.0));
        assert!((t - 0.4).abs() < 1e-12);
    }
}
