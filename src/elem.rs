//! The base element records stored inside a [`Dcel`][crate::Dcel].
//!
//! These types only carry what the structural algorithms need: incidence
//! handles plus the geometric attachment. If you want to associate your own
//! data with the elements of a subdivision, wrap them in
//! [`Ext`][crate::ext::Ext]; the container works with anything
//! implementing the record traits.

use std::fmt;

use optional::Optioned as Opt;
use smallvec::SmallVec;

use crate::{
    handle::{FaceHandle, HalfedgeHandle, VertexHandle},
    traits::{FaceRecord, HalfedgeRecord, VertexRecord},
};


// ===============================================================================================
// ===== Vertex
// ===============================================================================================

/// The base vertex record: one outgoing halfedge plus a geometric point.
///
/// - For an isolated vertex, `halfedge` is `None`.
/// - Otherwise it is one arbitrary halfedge whose origin is this vertex.
#[derive(Clone, PartialEq)]
pub struct Vertex<P> {
    halfedge: Opt<HalfedgeHandle>,
    point: Option<P>,
}

impl<P> Default for Vertex<P> {
    fn default() -> Self {
        Self {
            halfedge: Opt::none(),
            point: None,
        }
    }
}

impl<P: Clone + fmt::Debug> VertexRecord for Vertex<P> {
    type Point = P;
    type Rebound<P2: Clone + fmt::Debug> = Vertex<P2>;

    fn halfedge(&self) -> Option<HalfedgeHandle> {
        self.halfedge.into_option()
    }

    fn set_halfedge(&mut self, he: Option<HalfedgeHandle>) {
        self.halfedge = match he {
            Some(he) => Opt::some(he),
            None => Opt::none(),
        };
    }

    fn point(&self) -> Option<&P> {
        self.point.as_ref()
    }

    fn set_point(&mut self, point: P) {
        self.point = Some(point);
    }
}

impl<P: fmt::Debug> fmt::Debug for Vertex<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ halfedge: {:?}, point: {:?} }}",
            self.halfedge,
            self.point,
        )
    }
}


// ===============================================================================================
// ===== Halfedge
// ===============================================================================================

/// The base halfedge record: cycle links, origin, incident face and the
/// curve of its edge.
///
/// The twin is not stored: twins are always allocated as adjacent pairs by
/// the container, so the twin handle is derived from the handle itself.
/// The `next`/`prev` links are only `None` while the container is still
/// threading a freshly created pair; from the outside they are always set.
#[derive(Clone, PartialEq)]
pub struct Halfedge<C> {
    next: Opt<HalfedgeHandle>,
    prev: Opt<HalfedgeHandle>,
    origin: Opt<VertexHandle>,
    face: Opt<FaceHandle>,
    curve: Option<C>,
}

impl<C> Default for Halfedge<C> {
    fn default() -> Self {
        Self {
            next: Opt::none(),
            prev: Opt::none(),
            origin: Opt::none(),
            face: Opt::none(),
            curve: None,
        }
    }
}

impl<C: Clone + fmt::Debug> HalfedgeRecord for Halfedge<C> {
    type Curve = C;
    type Rebound<C2: Clone + fmt::Debug> = Halfedge<C2>;

    fn next(&self) -> Option<HalfedgeHandle> {
        self.next.into_option()
    }
    fn set_next(&mut self, he: Option<HalfedgeHandle>) {
        self.next = match he {
            Some(he) => Opt::some(he),
            None => Opt::none(),
        };
    }

    fn prev(&self) -> Option<HalfedgeHandle> {
        self.prev.into_option()
    }
    fn set_prev(&mut self, he: Option<HalfedgeHandle>) {
        self.prev = match he {
            Some(he) => Opt::some(he),
            None => Opt::none(),
        };
    }

    fn origin(&self) -> Option<VertexHandle> {
        self.origin.into_option()
    }
    fn set_origin(&mut self, v: Option<VertexHandle>) {
        self.origin = match v {
            Some(v) => Opt::some(v),
            None => Opt::none(),
        };
    }

    fn face(&self) -> Option<FaceHandle> {
        self.face.into_option()
    }
    fn set_face(&mut self, f: Option<FaceHandle>) {
        self.face = match f {
            Some(f) => Opt::some(f),
            None => Opt::none(),
        };
    }

    fn curve(&self) -> Option<&C> {
        self.curve.as_ref()
    }
    fn set_curve(&mut self, curve: C) {
        self.curve = Some(curve);
    }
}

impl<C: fmt::Debug> fmt::Debug for Halfedge<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Halfedge {{ next: {:?}, prev: {:?}, origin: {:?}, face: {:?}, curve: {:?} }}",
            self.next,
            self.prev,
            self.origin,
            self.face,
            self.curve,
        )
    }
}


// ===============================================================================================
// ===== Face
// ===============================================================================================

/// The base face record: one representative halfedge per connected boundary
/// component.
///
/// `outer` is a halfedge on the outer boundary and absent exactly for the
/// unbounded face; `holes` holds one representative per hole boundary.
/// Almost all faces have no or very few holes, so the hole list lives
/// inline until it grows past two entries.
#[derive(Clone, PartialEq)]
pub struct Face {
    outer: Opt<HalfedgeHandle>,
    holes: SmallVec<[HalfedgeHandle; 2]>,
}

impl Default for Face {
    fn default() -> Self {
        Self {
            outer: Opt::none(),
            holes: SmallVec::new(),
        }
    }
}

impl FaceRecord for Face {
    fn outer(&self) -> Option<HalfedgeHandle> {
        self.outer.into_option()
    }

    fn set_outer(&mut self, he: Option<HalfedgeHandle>) {
        self.outer = match he {
            Some(he) => Opt::some(he),
            None => Opt::none(),
        };
    }

    fn holes(&self) -> &[HalfedgeHandle] {
        &self.holes
    }

    fn add_hole(&mut self, he: HalfedgeHandle) {
        self.holes.push(he);
    }

    fn remove_hole(&mut self, he: HalfedgeHandle) {
        let pos = self.holes.iter().position(|&h| h == he).unwrap_or_else(|| {
            panic!("{:?} is not a hole boundary entry of this face", he)
        });
        self.holes.swap_remove(pos);
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ outer: {:?}, holes: {:?} }}", self.outer, &self.holes[..])
    }
}
