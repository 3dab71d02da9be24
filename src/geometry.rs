//! Fundamental geometric types for thin-walled cross-sections.
//!
//! Section coordinates live in the plane normal to the span: `x` runs along
//! the chord and `z` is vertical. The spanwise coordinate `y` is carried by
//! [`CrossSection`] itself.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::errors::GeometryError;

/// Position in the section plane measured in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the chordwise X axis.
    pub x: f64,
    /// Distance along the vertical Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.z)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Linear interpolation towards `other` with `fraction` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Point, fraction: f64) -> Point {
        Point::from(self.to_vector() + (other.to_vector() - self.to_vector()) * fraction)
    }

    /// Rotate the point about the origin by `angle` radians (counter-clockwise in x-z).
    #[must_use]
    pub fn rotated(self, angle: f64) -> Point {
        Point::from(Rotation2::new(angle) * self.to_vector())
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use spoilerx::point;
///
/// let leading_edge = point(0.0, 0.0);
/// assert_eq!(leading_edge.z, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, z: f64) -> Point {
    Point::new(x, z)
}

/// Straight piece of skin between two consecutive boundary points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First boundary point.
    pub start: Point,
    /// Second boundary point.
    pub end: Point,
}

impl Segment {
    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.start.lerp(self.end, 0.5)
    }

    /// Orientation of the segment against the chordwise axis in radians.
    ///
    /// Segments whose chordwise extent is below `1e-10` are treated as vertical.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let dx = self.start.x - self.end.x;
        if dx.abs() < 1.0e-10 {
            std::f64::consts::FRAC_PI_2
        } else {
            ((self.start.z - self.end.z) / dx).atan()
        }
    }
}

/// Closed thin-walled boundary at a fixed spanwise coordinate.
///
/// The boundary is an ordered list of points; the closing segment is implied
/// by repeating the first point at the end of the list.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossSection {
    /// Spanwise coordinate of the section in metres.
    y: f64,
    /// Ordered boundary points.
    points: Vec<Point>,
}

impl CrossSection {
    /// Smallest number of boundary points accepted for a section.
    pub const MIN_POINTS: usize = 4;

    /// Create a section after checking the boundary invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] when fewer than
    /// [`CrossSection::MIN_POINTS`] points are given and
    /// [`GeometryError::CoincidentPoints`] when two consecutive points coincide.
    ///
    /// # Examples
    /// ```
    /// use spoilerx::{point, CrossSection};
    ///
    /// let square = CrossSection::new(
    ///     0.0,
    ///     vec![
    ///         point(0.0, 0.0),
    ///         point(1.0, 0.0),
    ///         point(1.0, 1.0),
    ///         point(0.0, 1.0),
    ///         point(0.0, 0.0),
    ///     ],
    /// )
    /// .expect("valid square");
    /// assert_eq!(square.segments().count(), 4);
    /// assert!((square.enclosed_area() - 1.0).abs() < 1.0e-12);
    /// ```
    pub fn new(y: f64, points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                min: Self::MIN_POINTS,
                received: points.len(),
            });
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[0].distance(pair[1]) <= f64::EPSILON)
        {
            return Err(GeometryError::CoincidentPoints { index });
        }
        Ok(Self { y, points })
    }

    /// Spanwise coordinate of the section.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Ordered boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The same boundary placed at another spanwise coordinate.
    #[must_use]
    pub fn at_y(&self, y: f64) -> Self {
        Self {
            y,
            points: self.points.clone(),
        }
    }

    /// Iterate over the straight segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|pair| Segment {
            start: pair[0],
            end: pair[1],
        })
    }

    /// Total length of the boundary.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.segments().map(|segment| segment.length()).sum()
    }

    /// Planform area enclosed by the boundary (shoelace formula).
    #[must_use]
    pub fn enclosed_area(&self) -> f64 {
        let twice_area: f64 = self
            .points
            .windows(2)
            .map(|pair| pair[0].x * pair[1].z - pair[1].x * pair[0].z)
            .sum();
        let closing = match (self.points.last(), self.points.first()) {
            (Some(last), Some(first)) => last.x * first.z - first.x * last.z,
            _ => 0.0,
        };
        (twice_area + closing).abs() / 2.0
    }
}

/// Sample `count` points equally spaced by arc length along a closed polyline.
///
/// The polyline is closed back to its first point if needed. The first and
/// last samples coincide with the first input point, so the result describes
/// `count - 1` segments of equal length along the original boundary.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewPoints`] when fewer than three distinct input
/// points or fewer than [`CrossSection::MIN_POINTS`] samples are requested.
pub fn resample_closed(outline: &[Point], count: usize) -> Result<Vec<Point>, GeometryError> {
    if count < CrossSection::MIN_POINTS {
        return Err(GeometryError::TooFewPoints {
            min: CrossSection::MIN_POINTS,
            received: count,
        });
    }
    let mut loop_points: Vec<Point> = Vec::with_capacity(outline.len() + 1);
    for &candidate in outline {
        if loop_points
            .last()
            .map_or(true, |last: &Point| last.distance(candidate) > f64::EPSILON)
        {
            loop_points.push(candidate);
        }
    }
    if loop_points.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            min: 3,
            received: loop_points.len(),
        });
    }
    if let (Some(&first), Some(&last)) = (loop_points.first(), loop_points.last()) {
        if first.distance(last) > f64::EPSILON {
            loop_points.push(first);
        }
    }

    let mut cumulative = Vec::with_capacity(loop_points.len());
    let mut running = 0.0;
    cumulative.push(running);
    for pair in loop_points.windows(2) {
        running += pair[0].distance(pair[1]);
        cumulative.push(running);
    }
    let total = running;

    let mut samples = Vec::with_capacity(count);
    let mut piece = 0;
    for k in 0..count {
        let target = total * k as f64 / (count - 1) as f64;
        while piece + 2 < cumulative.len() && cumulative[piece + 1] < target {
            piece += 1;
        }
        let piece_length = cumulative[piece + 1] - cumulative[piece];
        let fraction = if piece_length > 0.0 {
            ((target - cumulative[piece]) / piece_length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        samples.push(loop_points[piece].lerp(loop_points[piece + 1], fraction));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
        ]
    }

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = origin.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), origin);
    }

    #[test]
    fn rotation_by_quarter_turn() {
        let rotated = point(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(rotated.z, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn vertical_segment_angle_is_a_right_angle() {
        let segment = Segment {
            start: point(0.3, -0.1),
            end: point(0.3, 0.1),
        };
        assert_relative_eq!(segment.angle(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(segment.length(), 0.2, epsilon = 1.0e-12);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let error = CrossSection::new(
            0.0,
            vec![
                point(0.0, 0.0),
                point(1.0, 0.0),
                point(1.0, 0.0),
                point(0.0, 1.0),
            ],
        )
        .expect_err("duplicate point rejected");
        assert_eq!(error, GeometryError::CoincidentPoints { index: 1 });
    }

    #[test]
    fn resampling_closes_the_loop_with_equal_spacing() {
        let samples = resample_closed(&unit_square(), 9).expect("square resamples");
        assert_eq!(samples.len(), 9);
        assert_eq!(samples.first(), samples.last());
        for pair in samples.windows(2) {
            assert_relative_eq!(pair[0].distance(pair[1]), 0.5, epsilon = 1.0e-12);
        }
        let section = CrossSection::new(0.0, samples).expect("valid section");
        assert_relative_eq!(section.perimeter(), 4.0, epsilon = 1.0e-12);
        assert_relative_eq!(section.enclosed_area(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn resampling_rejects_degenerate_outline() {
        let error = resample_closed(&[point(0.0, 0.0), point(1.0, 0.0)], 10)
            .expect_err("two points cannot enclose an area");
        assert!(matches!(error, GeometryError::TooFewPoints { .. }));
    }
}
