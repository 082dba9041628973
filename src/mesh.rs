use crate::errors::BooleanError;
use crate::float_types::{
    parry3d::bounding_volume::Aabb, Real, EPSILON,
};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use hashbrown::HashMap;
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3};

/// A triangle mesh in the external buffer representation: flat vertex
/// buffers, a flat `u32` index buffer (three per triangle), a world
/// transform applied at operation time, and an opaque material tag the CSG
/// core carries through without interpreting.
#[derive(Debug, Clone)]
pub struct Mesh<S: Clone> {
    pub positions: Vec<Point3<Real>>,
    pub normals: Option<Vec<Vector3<Real>>>,
    pub uvs: Option<Vec<Point2<Real>>>,
    pub indices: Vec<u32>,
    pub transform: Matrix4<Real>,
    pub material: Option<S>,
    /// Cached bounds of the transformed mesh, refreshed by cleanup.
    pub bounds: Option<Aabb>,
}

impl<S: Clone> Mesh<S> {
    pub fn new(positions: Vec<Point3<Real>>, indices: Vec<u32>) -> Self {
        Mesh {
            positions,
            normals: None,
            uvs: None,
            indices,
            transform: Matrix4::identity(),
            material: None,
            bounds: None,
        }
    }

    pub fn with_transform(mut self, transform: Matrix4<Real>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: S) -> Self {
        self.material = Some(material);
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Reject meshes the BSP stage cannot meaningfully process. BSP over
    /// zero polygons would silently yield an empty result, so misuse is
    /// reported here instead.
    pub fn validate(&self) -> Result<(), BooleanError> {
        if self.positions.is_empty() {
            return Err(BooleanError::InvalidMesh("no vertex positions".into()));
        }
        if self.indices.is_empty() {
            return Err(BooleanError::InvalidMesh("no triangle indices".into()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(BooleanError::InvalidMesh(format!(
                "index buffer length {} is not a multiple of 3 (non-triangulated mesh?)",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(BooleanError::InvalidMesh(format!(
                "vertex index {} out of range ({} vertices)",
                bad,
                self.positions.len()
            )));
        }
        if let Some(ref normals) = self.normals {
            if normals.len() != self.positions.len() {
                return Err(BooleanError::InvalidMesh(
                    "normal buffer length does not match position buffer".into(),
                ));
            }
        }
        if let Some(ref uvs) = self.uvs {
            if uvs.len() != self.positions.len() {
                return Err(BooleanError::InvalidMesh(
                    "uv buffer length does not match position buffer".into(),
                ));
            }
        }
        Ok(())
    }

    /// Positions and normals with the world transform applied. Normals go
    /// through the inverse-transpose of the upper 3x3 (identity fallback for
    /// singular transforms) and are re-normalized.
    fn transformed_buffers(&self) -> (Vec<Point3<Real>>, Option<Vec<Vector3<Real>>>) {
        let positions: Vec<Point3<Real>> = self
            .positions
            .iter()
            .map(|p| self.transform.transform_point(p))
            .collect();

        let normals = self.normals.as_ref().map(|normals| {
            let linear: Matrix3<Real> = self.transform.fixed_view::<3, 3>(0, 0).into_owned();
            let normal_matrix = linear
                .try_inverse()
                .map(|m| m.transpose())
                .unwrap_or_else(Matrix3::identity);
            normals
                .iter()
                .map(|n| {
                    (normal_matrix * n)
                        .try_normalize(EPSILON)
                        .unwrap_or(Vector3::z())
                })
                .collect()
        });

        (positions, normals)
    }

    /// Convert to a list of planar polygons, one per triangle, with the
    /// world transform applied. Degenerate triangles (duplicate or collinear
    /// vertices) are dropped so they cannot corrupt plane classification.
    pub fn to_polygons(&self) -> Vec<Polygon<S>> {
        let (positions, normals) = self.transformed_buffers();
        let mut polygons = Vec::with_capacity(self.triangle_count());

        for tri in self.indices.chunks_exact(3) {
            let [ia, ib, ic] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (pa, pb, pc) = (positions[ia], positions[ib], positions[ic]);

            // Face normal via the edge cross product; near-zero => degenerate.
            let Some(face_normal) = (pb - pa).cross(&(pc - pa)).try_normalize(EPSILON) else {
                continue;
            };

            let vertex = |i: usize, p: Point3<Real>| Vertex {
                pos: p,
                normal: normals.as_ref().map_or(face_normal, |ns| ns[i]),
                uv: self.uvs.as_ref().map(|uvs| uvs[i]),
            };

            if let Some(poly) = Polygon::try_new(
                vec![vertex(ia, pa), vertex(ib, pb), vertex(ic, pc)],
                self.material.clone(),
            ) {
                polygons.push(poly);
            }
        }
        polygons
    }

    /// Convert a polygon list back to buffers, fan-triangulating each
    /// polygon from its first vertex. The output transform is identity; the
    /// polygons are already in world space.
    pub fn from_polygons(polygons: &[Polygon<S>], material: Option<S>) -> Mesh<S> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices = Vec::new();
        let mut all_uvs = true;

        for poly in polygons {
            let plane_normal = poly.face_normal();
            for [a, b, c] in poly.triangulate() {
                // Clipping can leave collinear fan triangles; skip them.
                let area2 = (b.pos - a.pos).cross(&(c.pos - a.pos)).norm_squared();
                if area2 < EPSILON * EPSILON {
                    continue;
                }
                let base = positions.len() as u32;
                for v in [a, b, c] {
                    positions.push(v.pos);
                    normals.push(v.normal.try_normalize(EPSILON).unwrap_or(plane_normal));
                    match v.uv {
                        Some(uv) => uvs.push(uv),
                        None => all_uvs = false,
                    }
                }
                indices.extend([base, base + 1, base + 2]);
            }
        }

        Mesh {
            positions,
            normals: Some(normals),
            uvs: if all_uvs && !uvs.is_empty() {
                Some(uvs)
            } else {
                None
            },
            indices,
            transform: Matrix4::identity(),
            material,
            bounds: None,
        }
    }

    /// Axis-aligned bounds of the transformed mesh.
    pub fn bounding_box(&self) -> Aabb {
        if self.positions.is_empty() {
            return Aabb::new_invalid();
        }
        let points: Vec<Point3<Real>> = self
            .positions
            .iter()
            .map(|p| self.transform.transform_point(p))
            .collect();
        Aabb::from_points(&points)
    }

    /// Refresh the cached bounding volume.
    pub fn update_bounds(&mut self) {
        self.bounds = Some(self.bounding_box());
    }

    /// Merge vertices whose positions quantize to the same tolerance-grid
    /// cell, dropping triangles the merge collapses. Returns `false` without
    /// touching the mesh when welding would destroy all geometry, so the
    /// caller can keep the un-welded buffers.
    pub fn weld(&mut self, tolerance: Real) -> bool {
        if self.positions.is_empty() {
            return true;
        }

        let quantize = |p: &Point3<Real>| -> (i64, i64, i64) {
            (
                (p.x / tolerance).round() as i64,
                (p.y / tolerance).round() as i64,
                (p.z / tolerance).round() as i64,
            )
        };

        let mut cells: HashMap<(i64, i64, i64), u32> = HashMap::new();
        let mut remap: Vec<u32> = Vec::with_capacity(self.positions.len());
        let mut new_positions: Vec<Point3<Real>> = Vec::new();
        let mut new_normals = self.normals.as_ref().map(|_| Vec::new());
        let mut new_uvs = self.uvs.as_ref().map(|_| Vec::new());

        for (i, p) in self.positions.iter().enumerate() {
            let idx = *cells.entry(quantize(p)).or_insert_with(|| {
                new_positions.push(*p);
                if let (Some(dst), Some(src)) = (new_normals.as_mut(), self.normals.as_ref()) {
                    dst.push(src[i]);
                }
                if let (Some(dst), Some(src)) = (new_uvs.as_mut(), self.uvs.as_ref()) {
                    dst.push(src[i]);
                }
                (new_positions.len() - 1) as u32
            });
            remap.push(idx);
        }

        let mut new_indices = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            );
            // Welding collapsed this triangle to an edge or a point.
            if a != b && b != c && a != c {
                new_indices.extend([a, b, c]);
            }
        }

        if new_indices.is_empty() && !self.indices.is_empty() {
            return false;
        }

        self.positions = new_positions;
        self.normals = new_normals;
        self.uvs = new_uvs;
        self.indices = new_indices;
        true
    }

    /// Recompute per-vertex normals from adjacent face normals, weighted by
    /// face area (the unnormalized cross product). Last-resort guarantee
    /// that the mesh is at least renderable.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (self.positions[b] - self.positions[a])
                .cross(&(self.positions[c] - self.positions[a]));
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        self.normals = Some(
            accum
                .into_iter()
                .map(|n| n.try_normalize(EPSILON).unwrap_or(Vector3::z()))
                .collect(),
        );
    }
}
