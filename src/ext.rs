//! Attaching auxiliary data to the elements of a subdivision.
//!
//! [`Ext<B, D>`] wraps any base record `B` and adds one payload field of a
//! caller-chosen type `D`. The wrapper forwards the whole record capability
//! of its base, so the container treats an extended element exactly like a
//! plain one; the payload is opaque to all structural algorithms. The
//! payload is default-constructed when the container creates the element,
//! and it is copied by value whenever the element is duplicated (assignment,
//! container clone, overlay-style merges).
//!
//! The [`ExtendedDcel`] and [`FaceExtendedDcel`] aliases bundle the common
//! configurations: a DCEL over a geometric traits class with payloads on
//! all three element kinds, or on faces only.

use crate::{
    dcel::Dcel,
    elem::{Face, Halfedge, Vertex},
    traits::{FaceRecord, GeomTraits, HalfedgeRecord, VertexRecord},
};

use std::fmt;

use crate::handle::{FaceHandle, HalfedgeHandle, VertexHandle};


/// A record extended with one auxiliary data field.
///
/// `Ext<B, D>` implements every record trait its base implements, so it can
/// be stored in a [`Dcel`] wherever `B` could. Nesting works too:
/// `Ext<Ext<B, D1>, D2>` attaches two independent payloads.
#[derive(Clone, Default, PartialEq)]
pub struct Ext<B, D> {
    base: B,
    data: D,
}

impl<B, D> Ext<B, D> {
    /// Returns a reference to the auxiliary data.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Returns a mutable reference to the auxiliary data.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Replaces the auxiliary data.
    pub fn set_data(&mut self, data: D) {
        self.data = data;
    }
}

impl<B: VertexRecord, D: Clone + Default> VertexRecord for Ext<B, D> {
    type Point = B::Point;
    type Rebound<P2: Clone + fmt::Debug> = Ext<B::Rebound<P2>, D>;

    fn halfedge(&self) -> Option<HalfedgeHandle> {
        self.base.halfedge()
    }
    fn set_halfedge(&mut self, he: Option<HalfedgeHandle>) {
        self.base.set_halfedge(he);
    }
    fn point(&self) -> Option<&Self::Point> {
        self.base.point()
    }
    fn set_point(&mut self, point: Self::Point) {
        self.base.set_point(point);
    }
}

impl<B: HalfedgeRecord, D: Clone + Default> HalfedgeRecord for Ext<B, D> {
    type Curve = B::Curve;
    type Rebound<C2: Clone + fmt::Debug> = Ext<B::Rebound<C2>, D>;

    fn next(&self) -> Option<HalfedgeHandle> {
        self.base.next()
    }
    fn set_next(&mut self, he: Option<HalfedgeHandle>) {
        self.base.set_next(he);
    }
    fn prev(&self) -> Option<HalfedgeHandle> {
        self.base.prev()
    }
    fn set_prev(&mut self, he: Option<HalfedgeHandle>) {
        self.base.set_prev(he);
    }
    fn origin(&self) -> Option<VertexHandle> {
        self.base.origin()
    }
    fn set_origin(&mut self, v: Option<VertexHandle>) {
        self.base.set_origin(v);
    }
    fn face(&self) -> Option<FaceHandle> {
        self.base.face()
    }
    fn set_face(&mut self, f: Option<FaceHandle>) {
        self.base.set_face(f);
    }
    fn curve(&self) -> Option<&Self::Curve> {
        self.base.curve()
    }
    fn set_curve(&mut self, curve: Self::Curve) {
        self.base.set_curve(curve);
    }
}

impl<B: FaceRecord, D: Clone + Default> FaceRecord for Ext<B, D> {
    fn outer(&self) -> Option<HalfedgeHandle> {
        self.base.outer()
    }
    fn set_outer(&mut self, he: Option<HalfedgeHandle>) {
        self.base.set_outer(he);
    }
    fn holes(&self) -> &[HalfedgeHandle] {
        self.base.holes()
    }
    fn add_hole(&mut self, he: HalfedgeHandle) {
        self.base.add_hole(he);
    }
    fn remove_hole(&mut self, he: HalfedgeHandle) {
        self.base.remove_hole(he);
    }
}

impl<B: fmt::Debug, D: fmt::Debug> fmt::Debug for Ext<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ext {{ base: {:?}, data: {:?} }}", self.base, self.data)
    }
}


// ===============================================================================================
// ===== Bundle aliases
// ===============================================================================================

/// A DCEL over the traits class `T` whose vertices, halfedges and faces all
/// carry auxiliary data (`VD`, `HD` and `FD` respectively), built on the
/// base records from [`elem`][crate::elem].
///
/// Rebinding such a type over a new traits class (see
/// [`Rebind`][crate::traits::Rebind]) keeps all three payload types and the
/// face record. To extend custom base records instead, wrap them in
/// [`Ext`] and pass them to [`Dcel`] directly; rebinding works for those
/// all the same.
pub type ExtendedDcel<T, VD, HD, FD> = Dcel<
    Ext<Vertex<<T as GeomTraits>::Point>, VD>,
    Ext<Halfedge<<T as GeomTraits>::Curve>, HD>,
    Ext<Face, FD>,
>;

/// A DCEL over the traits class `T` whose faces carry auxiliary data `FD`;
/// vertices and halfedges stay plain.
pub type FaceExtendedDcel<T, FD> = Dcel<
    Vertex<<T as GeomTraits>::Point>,
    Halfedge<<T as GeomTraits>::Curve>,
    Ext<Face, FD>,
>;
