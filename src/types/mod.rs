//! Core value types: planar vectors and bounding boxes

pub mod bounds;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use vector::Vector2;
