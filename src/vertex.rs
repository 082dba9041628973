use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector3};

/// A vertex of a polygon, holding position, normal, and optional UV.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Option<Point2<Real>>,
}

impl Vertex {
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex {
            pos,
            normal,
            uv: None,
        }
    }

    pub const fn with_uv(pos: Point3<Real>, normal: Vector3<Real>, uv: Point2<Real>) -> Self {
        Vertex {
            pos,
            normal,
            uv: Some(uv),
        }
    }

    /// Flip orientation-specific data (like normals)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linearly interpolate between `self` and `other` by parameter `t`.
    ///
    /// UVs interpolate only when both endpoints carry one; otherwise the
    /// result has none.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        let new_uv = match (self.uv, other.uv) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            _ => None,
        };
        Vertex {
            pos: new_pos,
            normal: new_normal,
            uv: new_uv,
        }
    }
}
