use std::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

use crate::error::FlowError;

/// 2D vector in world space.
///
/// Plain `Copy` value: every operation returns a new vector and nothing
/// mutates in place, so particles and seeds never alias each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians from the +x axis.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn add(a: Self, b: Self) -> Self {
        Self::new(a.x + b.x, a.y + b.y)
    }

    pub fn subtract(a: Self, b: Self) -> Self {
        Self::new(a.x - b.x, a.y - b.y)
    }

    pub fn multiply(scalar: f64, v: Self) -> Self {
        Self::new(scalar * v.x, scalar * v.y)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction.
    /// Fails with `DivisionByZero` for the zero vector.
    pub fn normalized(self) -> Result<Self, FlowError> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(FlowError::DivisionByZero);
        }
        Ok(Self::multiply(1.0 / m, self))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Vector2::subtract(self, rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::multiply(self, rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Vector2::multiply(-1.0, self)
    }
}
