// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Epsilon for plane classification. This is a geometric tolerance, not a
/// representational one, so it is the same for both float widths: smaller
/// values over-subdivide from floating-point noise, larger values eat fine
/// features.
pub const EPSILON: Real = 1e-5;

/// Vertex-welding tolerance for union results. Union output tends to have
/// deliberately close-but-distinct seams, so the tolerance stays tight.
pub const WELD_EPSILON_UNION: Real = 1e-4;

/// Vertex-welding tolerance for subtract/intersect results, where cut
/// surfaces produce many near-coincident vertices.
pub const WELD_EPSILON_CARVE: Real = 1e-3;
