//! Planar and spatial vectors in target coordinates

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A 2-D vector (planar position or facing direction)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    ///
    /// The division happens in f64 so subnormal components still normalize.
    pub fn normalized(&self) -> Option<Vec2> {
        let (x, y) = (self.x as f64, self.y as f64);
        let magnitude = x.hypot(y);
        if magnitude == 0.0 || !magnitude.is_finite() {
            return None;
        }
        Some(Vec2::new((x / magnitude) as f32, (y / magnitude) as f32))
    }

    /// 2-D cross product `self × other`
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn distance_squared(&self, other: Vec2) -> f32 {
        let d = *self - other;
        d.x * d.x + d.y * d.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 3-D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// Drops the height component
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn components(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// IEEE-754 bit patterns of x, y and z as `0x…` strings
    pub fn hex_bits(&self) -> [String; 3] {
        self.components()
            .map(|c| format!("0x{}", hex::encode(c.to_bits().to_be_bytes())))
    }
}
