use crate::bsp::Node;
use crate::errors::BooleanError;
use crate::float_types::{
    parry3d::bounding_volume::BoundingVolume, EPSILON, WELD_EPSILON_CARVE, WELD_EPSILON_UNION,
};
use crate::mesh::Mesh;
use crate::polygon::Polygon;
use tracing::{debug, warn};

/// Boolean operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Subtract,
    Intersect,
}

/// A solid represented as a polygon soup. Contains a list of polygons.
#[derive(Debug, Clone)]
pub struct Csg<S: Clone> {
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync> Csg<S> {
    /// Create an empty solid.
    pub fn new() -> Self {
        Csg {
            polygons: Vec::new(),
        }
    }

    /// Build a solid from an existing polygon list.
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        Csg { polygons }
    }

    /// Return the internal polygons.
    pub fn to_polygons(&self) -> &[Polygon<S>] {
        &self.polygons
    }

    /// CSG union: this ∪ other
    pub fn union(&self, other: &Csg<S>) -> Csg<S> {
        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Csg::from_polygons(a.all_polygons())
    }

    /// CSG subtract: this \ other
    pub fn subtract(&self, other: &Csg<S>) -> Csg<S> {
        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Csg::from_polygons(a.all_polygons())
    }

    /// CSG intersect: this ∩ other
    ///
    /// The clip sequence below is the standard equivalent of the De Morgan
    /// construction ¬(¬A ∪ ¬B); the test suite asserts the identity holds.
    pub fn intersect(&self, other: &Csg<S>) -> Csg<S> {
        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Csg::from_polygons(a.all_polygons())
    }

    /// Invert this solid (flip inside vs. outside).
    pub fn inverse(&self) -> Csg<S> {
        let mut csg = self.clone();
        for p in &mut csg.polygons {
            p.flip();
        }
        csg
    }
}

impl<S: Clone + Send + Sync> Default for Csg<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one boolean operation over two meshes and return the result mesh.
///
/// The result carries mesh A's material. Union first attempts the direct
/// merge fast path; any reason it does not apply falls through to the BSP
/// path without surfacing to the caller.
pub fn boolean_op<S: Clone + Send + Sync>(
    mesh_a: &Mesh<S>,
    mesh_b: &Mesh<S>,
    op: BoolOp,
) -> Result<Mesh<S>, BooleanError> {
    mesh_a.validate()?;
    mesh_b.validate()?;

    if op == BoolOp::Union {
        if let Some(mut merged) = direct_merge(mesh_a, mesh_b) {
            debug!(
                triangles = merged.triangle_count(),
                "disjoint union resolved by direct merge"
            );
            cleanup(&mut merged, op);
            return Ok(merged);
        }
        debug!("direct merge not applicable, using BSP union");
    }

    let csg_a = Csg::from_polygons(mesh_a.to_polygons());
    let csg_b = Csg::from_polygons(mesh_b.to_polygons());
    if csg_a.polygons.is_empty() || csg_b.polygons.is_empty() {
        return Err(BooleanError::InvalidMesh(
            "all triangles degenerate after transform".into(),
        ));
    }

    let result = match op {
        BoolOp::Union => csg_a.union(&csg_b),
        BoolOp::Subtract => csg_a.subtract(&csg_b),
        BoolOp::Intersect => csg_a.intersect(&csg_b),
    };

    // An empty intersection is legitimate (disjoint solids); an empty union
    // or subtraction of non-empty inputs is not.
    if result.polygons.is_empty() && op != BoolOp::Intersect {
        return Err(BooleanError::OperationFailed(
            "empty result; models may have complex or non-manifold geometry".into(),
        ));
    }

    let mut out = Mesh::from_polygons(&result.polygons, mesh_a.material.clone());
    cleanup(&mut out, op);
    Ok(out)
}

/// Union fast path: when the transformed bounds do not touch, the union is
/// exactly the concatenation of both triangle sets. Returns `None` whenever
/// the merge does not apply; the caller falls back to the BSP path.
fn direct_merge<S: Clone>(mesh_a: &Mesh<S>, mesh_b: &Mesh<S>) -> Option<Mesh<S>> {
    // Mixed attribute layouts would leave ragged buffers; let BSP handle it.
    if mesh_a.normals.is_some() != mesh_b.normals.is_some()
        || mesh_a.uvs.is_some() != mesh_b.uvs.is_some()
    {
        return None;
    }

    let bounds_a = mesh_a.bounding_box();
    let bounds_b = mesh_b.bounding_box();
    if bounds_a.loosened(EPSILON).intersects(&bounds_b) {
        return None;
    }

    // Bake both transforms so the concatenated buffers share one space.
    let baked_a = Mesh::from_polygons(&mesh_a.to_polygons(), mesh_a.material.clone());
    let baked_b = Mesh::<S>::from_polygons(&mesh_b.to_polygons(), None);
    if baked_a.indices.is_empty() || baked_b.indices.is_empty() {
        return None;
    }

    let mut merged = baked_a;
    let offset = merged.positions.len() as u32;
    merged.positions.extend(baked_b.positions);
    merged
        .indices
        .extend(baked_b.indices.iter().map(|&i| i + offset));
    match (&mut merged.normals, baked_b.normals) {
        (Some(dst), Some(src)) => dst.extend(src),
        _ => merged.normals = None,
    }
    match (&mut merged.uvs, baked_b.uvs) {
        (Some(dst), Some(src)) => dst.extend(src),
        _ => merged.uvs = None,
    }
    Some(merged)
}

/// Post-operation cleanup: weld seam vertices with an op-dependent
/// tolerance, recompute vertex normals, and refresh the bounding volume.
/// A failed weld is non-fatal; the un-welded mesh is still returned.
fn cleanup<S: Clone>(mesh: &mut Mesh<S>, op: BoolOp) {
    let tolerance = match op {
        BoolOp::Union => WELD_EPSILON_UNION,
        BoolOp::Subtract | BoolOp::Intersect => WELD_EPSILON_CARVE,
    };
    if !mesh.weld(tolerance) {
        warn!(%tolerance, "vertex weld abandoned, keeping un-welded buffers");
    }
    mesh.recompute_normals();
    mesh.update_bounds();
}
