//! Planar geometry used by the simulation: a small 2D vector, the rectangular arena, the
//! bounding edges of a circle, and the walls of the arena with their unit normals.
//!
//! Coordinates follow screen conventions: `x` grows to the right and `y` grows downward, so
//! the "top" edge of a circle has the smaller `y` value.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde_derive::{Deserialize, Serialize};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Vector {
        Vector { x, y }
    }

    /// The unit vector for a compass heading in degrees, where 0° points up (north) and
    /// headings increase clockwise.
    #[must_use]
    pub fn from_heading(degrees: f64) -> Vector {
        let radians = degrees.to_radians();
        Vector::new(radians.sin(), -radians.cos())
    }

    #[must_use]
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn distance(self, other: Vector) -> f64 {
        (self - other).length()
    }

    /// Elastic reflection about the unit normal `normal`: `v' = v - 2(v·n)n`.
    #[must_use]
    pub fn reflect(self, normal: Vector) -> Vector {
        self - normal * (2.0 * self.dot(normal))
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

/// The rectangular arena `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Bounds {
        Bounds { width, height }
    }

    /// Whether a circle of the given radius fits inside the arena at all.
    #[must_use]
    pub fn fits(&self, radius: f64) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 2.0 * radius
            && self.height > 2.0 * radius
    }

    /// Whether a circle with these edges lies within the arena, touching allowed.
    #[must_use]
    pub fn contains(&self, edges: &Edges) -> bool {
        edges.left >= 0.0
            && edges.top >= 0.0
            && edges.right <= self.width
            && edges.bottom <= self.height
    }
}

/// The axis-aligned edges of a circle's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Edges {
    #[must_use]
    pub fn around(center: Vector, radius: f64) -> Edges {
        Edges {
            top: center.y - radius,
            bottom: center.y + radius,
            left: center.x - radius,
            right: center.x + radius,
        }
    }
}

/// One of the four walls of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::West, Wall::East, Wall::North, Wall::South];

    /// The unit normal used to reflect off this wall. Opposite walls share a normal since
    /// reflection only depends on the axis.
    #[must_use]
    pub fn normal(self) -> Vector {
        match self {
            Wall::North | Wall::South => Vector::from_heading(0.0),
            Wall::East | Wall::West => Vector::from_heading(90.0),
        }
    }

    /// Whether a circle with the given edges has reached or crossed this wall.
    #[must_use]
    pub fn is_crossed_by(self, edges: &Edges, bounds: &Bounds) -> bool {
        match self {
            Wall::West => edges.left <= 0.0,
            Wall::East => edges.right >= bounds.width,
            Wall::North => edges.top <= 0.0,
            Wall::South => edges.bottom >= bounds.height,
        }
    }
}
