//! Planar vector type used for both points and directions

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Zero vector
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Unit X vector
    pub const UNIT_X: Vector2 = Vector2::new(1.0, 0.0);

    /// Unit Y vector
    pub const UNIT_Y: Vector2 = Vector2::new(0.0, 1.0);

    /// Unit vector pointing at `angle` radians from the X axis
    pub fn from_angle(angle: f64) -> Self {
        Vector2::new(angle.cos(), angle.sin())
    }

    /// Vector of the given length pointing at `angle`
    pub fn polar(length: f64, angle: f64) -> Self {
        Vector2::from_angle(angle) * length
    }

    /// Calculate the length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Calculate the squared length (avoids sqrt for performance)
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Normalize the vector (make it unit length)
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Vector2::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (returns scalar for 2D)
    pub fn cross(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Distance to another point
    pub fn distance(&self, other: &Vector2) -> f64 {
        (*self - *other).length()
    }

    /// Squared distance to another point
    pub fn distance_squared(&self, other: &Vector2) -> f64 {
        (*self - *other).length_squared()
    }

    /// Angle of the vector from the X axis, in `[0, 2π)`
    pub fn angle(&self) -> f64 {
        crate::math::angle::correct_angle(self.y.atan2(self.x))
    }

    /// Angle of the direction from this point to `other`
    pub fn angle_to(&self, other: &Vector2) -> f64 {
        (*other - *self).angle()
    }

    /// Whether both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Counter-clockwise perpendicular
    pub fn perpendicular(&self) -> Self {
        Vector2::new(-self.y, self.x)
    }

    /// Rotate around the origin by `angle` radians
    pub fn rotate(&self, angle: f64) -> Self {
        self.rotate_by(Vector2::from_angle(angle))
    }

    /// Rotate around the origin by a unit direction vector `(cos, sin)`
    pub fn rotate_by(&self, angle_vector: Vector2) -> Self {
        Vector2::new(
            self.x * angle_vector.x - self.y * angle_vector.y,
            self.x * angle_vector.y + self.y * angle_vector.x,
        )
    }

    /// Rotate around `center` by a unit direction vector
    pub fn rotate_around(&self, center: Vector2, angle_vector: Vector2) -> Self {
        center + (*self - center).rotate_by(angle_vector)
    }

    /// Component-wise scaling around the origin
    pub fn scale(&self, factor: Vector2) -> Self {
        Vector2::new(self.x * factor.x, self.y * factor.y)
    }

    /// Component-wise scaling around `center`
    pub fn scale_around(&self, center: Vector2, factor: Vector2) -> Self {
        center + (*self - center).scale(factor)
    }

    /// Mirror across the line through `axis1` and `axis2`
    pub fn mirror(&self, axis1: Vector2, axis2: Vector2) -> Self {
        let direction = axis2 - axis1;
        let len2 = direction.length_squared();
        if len2 <= 0.0 {
            return *self;
        }
        let projected = axis1 + direction * ((*self - axis1).dot(&direction) / len2);
        projected * 2.0 - *self
    }

    /// Horizontal shear: `x += k * y`
    pub fn shear(&self, k: f64) -> Self {
        Vector2::new(self.x + k * self.y, self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Vector2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, other: Vector2) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;
    fn div(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
