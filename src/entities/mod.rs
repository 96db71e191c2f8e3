//! Geometric entity types and traits

use crate::types::{BoundingBox2D, Vector2};

pub mod circle;
pub mod ellipse;
pub mod line;

pub use ellipse::{DrawParams, Ellipse, EllipseConstruction, EllipseData, Ending};
pub use line::{quadrilateral, Line};

/// Base trait for planar entities
pub trait Entity {
    /// Get the axis-aligned bounding box of the entity
    fn bounding_box(&self) -> BoundingBox2D;

    /// Translate the entity by the given offset
    fn move_by(&mut self, offset: Vector2);

    /// Rotate the entity around `center` by a unit direction vector
    fn rotate_by_vector(&mut self, center: Vector2, angle_vector: Vector2);

    /// Scale the entity around `center`, independently per axis
    fn scale(&mut self, center: Vector2, factor: Vector2);

    /// Mirror the entity across the line through `axis1` and `axis2`
    fn mirror(&mut self, axis1: Vector2, axis2: Vector2);

    /// Nearest point on the entity to `coord` and its distance.
    ///
    /// With `on_entity` the result is restricted to the drawn part of the
    /// entity; otherwise the underlying unbounded curve is used.
    fn nearest_point_on_entity(&self, coord: Vector2, on_entity: bool) -> Option<(Vector2, f64)>;

    /// Get the entity type name
    fn entity_type(&self) -> &'static str;

    /// Rotate the entity around `center` by `angle` radians
    fn rotate_around(&mut self, center: Vector2, angle: f64) {
        self.rotate_by_vector(center, Vector2::from_angle(angle));
    }

    /// Rotate the entity around the origin by `angle` radians
    fn rotate(&mut self, angle: f64) {
        self.rotate_around(Vector2::ZERO, angle);
    }

    /// Uniform scale around `center`
    fn scale_uniform(&mut self, center: Vector2, factor: f64) {
        self.scale(center, Vector2::new(factor, factor));
    }
}
