//! Generic planar-subdivision data structures.
//!
//! This library implements a *doubly-connected edge list* (DCEL): a
//! representation of a subdivision of the plane into vertices, directed
//! halfedges and faces, as used by planar arrangements, map overlay and
//! other computational-geometry algorithms. Its three pillars:
//!
//! - **The container**: [`Dcel`] owns all elements in handle-addressed
//!   arenas and offers purely topological mutators (insert isolated
//!   vertices, thread edges into boundary cycles, split and merge faces,
//!   remove edges again) which maintain the full set of structural
//!   invariants: twin/next/prev consistency, closed boundary cycles, and
//!   the partition of halfedges among face boundary components.
//! - **Extensibility**: the element types are generic. Wrap any record in
//!   [`Ext`][ext::Ext] to attach an auxiliary payload to vertices,
//!   halfedges or faces without touching the structural algorithms; the
//!   [`ExtendedDcel`][ext::ExtendedDcel] alias bundles the common case.
//! - **Rebinding**: a DCEL type is parameterized over a geometric traits
//!   class ([`GeomTraits`]) supplying its point and curve types.
//!   [`Rebind`]/[`Rebound`] re-instantiate an extended DCEL type over a
//!   different traits class at the type level, keeping all payload
//!   configuration, so generic algorithms can retarget the structure
//!   without spelling it out again.
//!
//! What this library deliberately does *not* contain: the geometry-driven
//! construction algorithms (sweep line, incremental insertion, point
//! location). Those decide *where* edges go and are expected to sit on top
//! of the mutator contract; the small [`construct`] module supplies the
//! closed-form numeric helpers such layers typically need.

pub mod construct;
pub mod dcel;
pub mod elem;
pub mod ext;
pub mod handle;
pub mod map;
pub mod prelude;
pub mod refs;
pub mod traits;

pub use self::{
    dcel::Dcel,
    ext::{Ext, ExtendedDcel, FaceExtendedDcel},
    handle::{hsize, EdgeHandle, FaceHandle, Handle, HalfedgeHandle, VertexHandle},
    traits::{FaceRecord, GeomTraits, HalfedgeRecord, Rebind, Rebound, VertexRecord},
};
