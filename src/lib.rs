#![forbid(unsafe_code)]

//! BSP-based constructive solid geometry over triangle meshes.
//!
//! The crate consumes externally-produced triangle meshes (flat position and
//! index buffers, optional per-vertex normals and UVs, a 4x4 world transform,
//! an opaque material tag) and combines two of them with a boolean
//! [`BoolOp`], returning one mesh of the same shape or a single generic
//! [`BooleanError`]. Everything is transient within one invocation: meshes
//! become polygon lists, polygon lists become BSP trees, and only buffers
//! come back out. There is no I/O and no shared state, so concurrent
//! invocations over independently-owned meshes need no locking.
//!
//! ```
//! use csgkit::{boolean_op, BoolOp, Mesh};
//! use nalgebra::Point3;
//!
//! // A unit tetrahedron, twice, half a unit apart.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let indices = vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
//! let a = Mesh::<()>::new(positions.clone(), indices.clone());
//! let b = Mesh::<()>::new(positions, indices)
//!     .with_transform(nalgebra::Matrix4::new_translation(&nalgebra::Vector3::new(0.5, 0.0, 0.0)));
//!
//! let result = boolean_op(&a, &b, BoolOp::Union).unwrap();
//! assert!(result.triangle_count() > 0);
//! ```

pub mod bsp;
pub mod csg;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod vertex;

pub use csg::{boolean_op, BoolOp, Csg};
pub use errors::BooleanError;
pub use float_types::{Real, EPSILON};
pub use mesh::Mesh;
pub use plane::Plane;
pub use polygon::Polygon;
pub use vertex::Vertex;
