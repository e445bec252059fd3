//! Types for references to elements within a subdivision.
//!
//! A handle on its own cannot navigate anywhere; these types pair a handle
//! with a reference to its container so that incidences can be chained
//! fluently:
//!
//! ```
//! # use planar::{Dcel, elem::{Vertex, Halfedge, Face}};
//! # let mut dcel = Dcel::<Vertex<(f32, f32)>, Halfedge<u8>, Face>::new();
//! # let a = dcel.add_vertex((0.0, 0.0));
//! # let b = dcel.add_vertex((1.0, 0.0));
//! # let face = dcel.unbounded_face();
//! # let he = dcel.add_edge_disjoint(0, a, b, face);
//! let v = dcel.halfedge_ref(he).twin().next().origin();
//! assert_eq!(v.handle(), a);
//! ```

use crate::{
    dcel::Dcel,
    handle::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle},
    traits::{FaceRecord, HalfedgeRecord, VertexRecord},
};


/// A reference to a vertex within a subdivision: just a handle paired with
/// the container it belongs to.
#[derive(Debug)]
pub struct VertexRef<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    dcel: &'a Dcel<V, H, F>,
    handle: VertexHandle,
}

/// A reference to a halfedge within a subdivision. See [`VertexRef`].
#[derive(Debug)]
pub struct HalfedgeRef<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    dcel: &'a Dcel<V, H, F>,
    handle: HalfedgeHandle,
}

/// A reference to a face within a subdivision. See [`VertexRef`].
#[derive(Debug)]
pub struct FaceRef<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    dcel: &'a Dcel<V, H, F>,
    handle: FaceHandle,
}

macro_rules! impl_copy_clone {
    ($name:ident) => {
        impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Clone for $name<'_, V, H, F> {
            fn clone(&self) -> Self {
                Self {
                    dcel: self.dcel,
                    handle: self.handle,
                }
            }
        }

        impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Copy for $name<'_, V, H, F> {}
    }
}

impl_copy_clone!(VertexRef);
impl_copy_clone!(HalfedgeRef);
impl_copy_clone!(FaceRef);


impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Dcel<V, H, F> {
    /// Returns a navigable reference to the given vertex.
    pub fn vertex_ref(&self, handle: VertexHandle) -> VertexRef<'_, V, H, F> {
        VertexRef { dcel: self, handle }
    }

    /// Returns a navigable reference to the given halfedge.
    pub fn halfedge_ref(&self, handle: HalfedgeHandle) -> HalfedgeRef<'_, V, H, F> {
        HalfedgeRef { dcel: self, handle }
    }

    /// Returns a navigable reference to the given face.
    pub fn face_ref(&self, handle: FaceHandle) -> FaceRef<'_, V, H, F> {
        FaceRef { dcel: self, handle }
    }
}

impl<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> VertexRef<'a, V, H, F> {
    /// Returns the stored handle.
    pub fn handle(&self) -> VertexHandle {
        self.handle
    }

    /// Returns the vertex record.
    pub fn record(&self) -> &'a V {
        &self.dcel[self.handle]
    }

    /// Returns the geometric point, if one is attached.
    pub fn point(&self) -> Option<&'a V::Point> {
        self.record().point()
    }

    /// Returns one outgoing halfedge, or `None` for an isolated vertex.
    pub fn halfedge(&self) -> Option<HalfedgeRef<'a, V, H, F>> {
        self.record().halfedge().map(|handle| HalfedgeRef {
            dcel: self.dcel,
            handle,
        })
    }

    /// Checks whether this vertex has no incident edges.
    pub fn is_isolated(&self) -> bool {
        self.record().halfedge().is_none()
    }
}

impl<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> HalfedgeRef<'a, V, H, F> {
    /// Returns the stored handle.
    pub fn handle(&self) -> HalfedgeHandle {
        self.handle
    }

    /// Returns the halfedge record.
    pub fn record(&self) -> &'a H {
        &self.dcel[self.handle]
    }

    /// Returns the twin halfedge.
    pub fn twin(&self) -> Self {
        Self {
            dcel: self.dcel,
            handle: self.dcel.twin(self.handle),
        }
    }

    /// Returns the next halfedge on the boundary cycle.
    pub fn next(&self) -> Self {
        Self {
            dcel: self.dcel,
            handle: self.dcel.next(self.handle),
        }
    }

    /// Returns the previous halfedge on the boundary cycle.
    pub fn prev(&self) -> Self {
        Self {
            dcel: self.dcel,
            handle: self.dcel.prev(self.handle),
        }
    }

    /// Returns the vertex this halfedge points away from.
    pub fn origin(&self) -> VertexRef<'a, V, H, F> {
        VertexRef {
            dcel: self.dcel,
            handle: self.dcel.origin(self.handle),
        }
    }

    /// Returns the vertex this halfedge points towards.
    pub fn target(&self) -> VertexRef<'a, V, H, F> {
        VertexRef {
            dcel: self.dcel,
            handle: self.dcel.target(self.handle),
        }
    }

    /// Returns the face this halfedge bounds.
    pub fn face(&self) -> FaceRef<'a, V, H, F> {
        FaceRef {
            dcel: self.dcel,
            handle: self.dcel.face_of(self.handle),
        }
    }

    /// Returns the full edge this halfedge is half of.
    pub fn edge(&self) -> EdgeHandle {
        self.dcel.edge_of(self.handle)
    }

    /// Returns the curve of the underlying edge, if one is attached.
    pub fn curve(&self) -> Option<&'a H::Curve> {
        self.record().curve()
    }
}

impl<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> FaceRef<'a, V, H, F> {
    /// Returns the stored handle.
    pub fn handle(&self) -> FaceHandle {
        self.handle
    }

    /// Returns the face record.
    pub fn record(&self) -> &'a F {
        &self.dcel[self.handle]
    }

    /// Checks whether this is the unbounded face.
    pub fn is_unbounded(&self) -> bool {
        self.record().is_unbounded()
    }

    /// Returns a halfedge on the outer boundary, or `None` for the
    /// unbounded face.
    pub fn outer(&self) -> Option<HalfedgeRef<'a, V, H, F>> {
        self.record().outer().map(|handle| HalfedgeRef {
            dcel: self.dcel,
            handle,
        })
    }

    /// Returns an iterator over one representative halfedge per hole
    /// boundary of this face.
    pub fn holes(&self) -> impl Iterator<Item = HalfedgeRef<'a, V, H, F>> + 'a {
        let dcel = self.dcel;
        self.record()
            .holes()
            .iter()
            .map(move |&handle| HalfedgeRef { dcel, handle })
    }
}
