//! Line segment entity

use super::Entity;
use crate::math::{angle, TOLERANCE, TOLERANCE15};
use crate::types::{BoundingBox2D, Vector2};

/// A line defined by two endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
}

impl Line {
    /// Create a new line between two points
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Line { start, end }
    }

    /// Create a new line from coordinates
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Direction from start to end (not normalized)
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    /// Angle of the direction from start to end
    pub fn angle(&self) -> f64 {
        self.start.angle_to(&self.end)
    }

    /// Get the midpoint of the line
    pub fn middle_point(&self) -> Vector2 {
        (self.start + self.end) * 0.5
    }

    /// Foot of the perpendicular from `coord`, clamped to the segment when
    /// `on_entity` is set; also returns the distance to `coord`
    pub fn nearest_point(&self, coord: Vector2, on_entity: bool) -> (Vector2, f64) {
        let direction = self.direction();
        let len2 = direction.length_squared();
        if len2 < TOLERANCE15 {
            return (self.start, coord.distance(&self.start));
        }
        let mut t = (coord - self.start).dot(&direction) / len2;
        if on_entity {
            t = t.clamp(0.0, 1.0);
        }
        let point = self.start + direction * t;
        (point, coord.distance(&point))
    }

    /// Distance from `coord` to the segment
    pub fn distance_to_point(&self, coord: Vector2) -> f64 {
        self.nearest_point(coord, true).1
    }

    /// Point at `distance` along the line, measured from whichever endpoint
    /// is nearer to `coord`, plus its distance to `coord`
    pub fn nearest_dist(&self, distance: f64, coord: Vector2) -> (Vector2, f64) {
        let dv = Vector2::polar(distance, self.angle());
        let point = if coord.distance_squared(&self.start) < coord.distance_squared(&self.end) {
            self.start + dv
        } else {
            self.end - dv
        };
        (point, coord.distance(&point))
    }

    /// Intersection of the infinite lines through both segments, `None` when
    /// they are parallel
    pub fn intersection(&self, other: &Line) -> Option<Vector2> {
        let d1 = self.direction();
        let d2 = other.direction();
        let det = d1.cross(&d2);
        let scale = d1.length() * d2.length();
        if scale < TOLERANCE15 || det.abs() <= TOLERANCE * scale {
            return None;
        }
        let t = (other.start - self.start).cross(&d2) / det;
        Some(self.start + d1 * t)
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new(Vector2::ZERO, Vector2::ZERO)
    }
}

impl Entity for Line {
    fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_corners(self.start, self.end)
    }

    fn move_by(&mut self, offset: Vector2) {
        self.start += offset;
        self.end += offset;
    }

    fn rotate_by_vector(&mut self, center: Vector2, angle_vector: Vector2) {
        self.start = self.start.rotate_around(center, angle_vector);
        self.end = self.end.rotate_around(center, angle_vector);
    }

    fn scale(&mut self, center: Vector2, factor: Vector2) {
        self.start = self.start.scale_around(center, factor);
        self.end = self.end.scale_around(center, factor);
    }

    fn mirror(&mut self, axis1: Vector2, axis2: Vector2) {
        self.start = self.start.mirror(axis1, axis2);
        self.end = self.end.mirror(axis1, axis2);
    }

    fn nearest_point_on_entity(&self, coord: Vector2, on_entity: bool) -> Option<(Vector2, f64)> {
        coord.is_finite().then(|| self.nearest_point(coord, on_entity))
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }
}

/// Index of a vertex that lies alone on one side of `line` while two others
/// lie on the opposite side
fn outlying_vertex(line: &Line, vertices: &[Vector2]) -> Option<usize> {
    let a0 = line.angle();
    let mut left: Vec<usize> = Vec::new();
    let mut right: Vec<usize> = Vec::new();
    for (index, vertex) in vertices.iter().enumerate() {
        let (foot, _) = line.nearest_point(*vertex, false);
        let dir = *vertex - foot;
        if dir.length_squared() < TOLERANCE15 {
            continue;
        }
        if angle::remainder(dir.angle() - a0, std::f64::consts::TAU) > 0.0 {
            left.push(index);
        } else {
            right.push(index);
        }
        match (left.len(), right.len()) {
            (2, 1) => return Some(right[0]),
            (1, 2) => return Some(left[0]),
            _ => {}
        }
    }
    None
}

/// Vertices of the quadrilateral bounded by four lines, ordered by angle
/// around their centroid.
///
/// Lines are treated as infinite. With four lines in general position there
/// are six pairwise intersections; a vertex that lies alone on one side of
/// some line while two others lie on the opposite side is not a corner of
/// the quadrilateral and is discarded. Returns `None` unless exactly four
/// vertices remain.
pub fn quadrilateral(lines: &[Line; 4]) -> Option<[Vector2; 4]> {
    let mut vertices: Vec<Vector2> = Vec::with_capacity(6);
    for i in 1..4 {
        for j in 0..i {
            if let Some(p) = lines[i].intersection(&lines[j]) {
                vertices.push(p);
            }
        }
    }

    match vertices.len() {
        4 => {}
        5 | 6 => {
            for line in lines {
                if let Some(index) = outlying_vertex(line, &vertices) {
                    vertices.remove(index);
                }
                if vertices.len() == 4 {
                    break;
                }
            }
            if vertices.len() != 4 {
                return None;
            }
        }
        _ => return None,
    }

    let center = vertices.iter().fold(Vector2::ZERO, |acc, v| acc + *v) * 0.25;
    vertices.sort_by(|a, b| center.angle_to(a).total_cmp(&center.angle_to(b)));
    Some([vertices[0], vertices[1], vertices[2], vertices[3]])
}
