use crate::float_types::Real;
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::Vector3;

/// A convex planar polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
///
/// Callers feed triangles in (always planar); BSP clipping keeps fragments
/// convex and coplanar, so convexity is an invariant here rather than a
/// checked property.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices. Panics on fewer than three vertices
    /// or a degenerate plane; use [`Polygon::try_new`] for inputs that may
    /// be degenerate.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        Self::try_new(vertices, metadata).expect("degenerate polygon")
    }

    /// Create a polygon from vertices, returning `None` when the first three
    /// vertices do not define a plane (coincident or collinear points).
    pub fn try_new(vertices: Vec<Vertex>, metadata: Option<S>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(
            &vertices[0].pos,
            &vertices[1].pos,
            &vertices[2].pos,
        )?;
        Some(Polygon {
            vertices,
            plane,
            metadata,
        })
    }

    /// Reverses winding order, flips vertex normals, and flips the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Triangulate this polygon as a fan from its first vertex.
    ///
    /// Valid because BSP clipping of convex input yields convex output; a
    /// non-convex polygon here would be a construction bug upstream.
    pub fn triangulate(&self) -> impl Iterator<Item = [&Vertex; 3]> {
        let first = &self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(move |pair| [first, &pair[0], &pair[1]])
    }

    /// The polygon's face normal, taken from its plane.
    #[inline]
    pub fn face_normal(&self) -> Vector3<Real> {
        self.plane.normal
    }

}
