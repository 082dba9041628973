use crate::float_types::{Real, EPSILON};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Orientation of a point or polygon relative to a plane. SPANNING only
// arises as the bitwise OR of FRONT and BACK over a polygon's vertices.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in 3D space defined by a unit normal and a w-value, in the sense
/// `normal · p == w` for points p on the plane.
#[derive(Debug, Clone)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from three points. Returns `None` when the points are
    /// collinear or coincident (near-zero cross product).
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Option<Plane> {
        let cross = (b - a).cross(&(c - a));
        if cross.norm_squared() < EPSILON * EPSILON {
            return None;
        }
        let n = cross.normalize();
        Some(Plane {
            normal: n,
            w: n.dot(&a.coords),
        })
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point as COPLANAR, FRONT, or BACK. Points within EPSILON
    /// of the plane (inclusive) are COPLANAR.
    #[inline]
    pub fn orient_point(&self, p: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&p.coords) - self.w;
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Split `polygon` by this plane if needed, distributing the results into
    /// `coplanar_front`, `coplanar_back`, `front`, and `back`.
    ///
    /// Spanning polygons are split by parametric interpolation along each
    /// edge that crosses the plane; fragments with fewer than three vertices
    /// are discarded.
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        coplanar_front: &mut Vec<Polygon<S>>,
        coplanar_back: &mut Vec<Polygon<S>>,
        front: &mut Vec<Polygon<S>>,
        back: &mut Vec<Polygon<S>>,
    ) {
        let mut polygon_type: i8 = 0;
        let mut types = Vec::with_capacity(polygon.vertices.len());

        for v in &polygon.vertices {
            let vertex_type = self.orient_point(&v.pos);
            polygon_type |= vertex_type;
            types.push(vertex_type);
        }

        match polygon_type {
            COPLANAR => {
                // Coincident normals => belongs in front vs. back
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                // SPANNING
                let mut f: Vec<Vertex> = Vec::new();
                let mut b: Vec<Vertex> = Vec::new();
                let vcount = polygon.vertices.len();

                for i in 0..vcount {
                    let j = (i + 1) % vcount;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if ti != BACK {
                        f.push(vi.clone());
                    }
                    if ti != FRONT {
                        b.push(vi.clone());
                    }

                    if (ti | tj) == SPANNING {
                        let denom = self.normal.dot(&(vj.pos - vi.pos));
                        // Avoid dividing by zero
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vi.pos.coords)) / denom;
                            let v = vi.interpolate(vj, t);
                            f.push(v.clone());
                            b.push(v);
                        }
                    }
                }

                if f.len() >= 3 {
                    if let Some(poly) = Polygon::try_new(f, polygon.metadata.clone()) {
                        front.push(poly);
                    }
                }
                if b.len() >= 3 {
                    if let Some(poly) = Polygon::try_new(b, polygon.metadata.clone()) {
                        back.push(poly);
                    }
                }
            }
        }
    }
}
