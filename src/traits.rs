//! Traits connecting the DCEL container to its collaborators.
//!
//! There are two groups of traits in here:
//!
//! - [`GeomTraits`] describes the *geometric traits class*: the collaborator
//!   type supplying the concrete point and x-monotone curve types the
//!   structural types are parameterized over.
//! - [`VertexRecord`], [`HalfedgeRecord`] and [`FaceRecord`] describe what
//!   the [`Dcel`][crate::Dcel] container requires from the element types it
//!   stores. The base records in [`elem`][crate::elem] implement them, and
//!   the [`Ext`][crate::ext::Ext] wrapper forwards them, so a payload-
//!   extended element can be stored wherever a base element can.
//!
//! Additionally, [`Rebind`] (with its [`Rebound`] shorthand) is the
//! type-level operation that re-instantiates a whole DCEL type over a new
//! geometric traits class.

use std::fmt;

use crate::handle::{FaceHandle, HalfedgeHandle, VertexHandle};


/// A geometric traits class: supplies the geometric primitive types a
/// subdivision is embedded with.
///
/// The container itself treats both types as opaque attachments; all
/// geometric reasoning happens in the construction algorithms layered on
/// top. A type missing one of the associated types simply cannot implement
/// this trait, which is what makes invalid rebind arguments a compile-time
/// error.
pub trait GeomTraits: 'static {
    /// The point type attached to vertices.
    type Point: Clone + fmt::Debug;

    /// The x-monotone curve type attached to halfedges.
    type Curve: Clone + fmt::Debug;
}


/// Element types that can be stored as the vertices of a
/// [`Dcel`][crate::Dcel].
///
/// A vertex knows one of its outgoing halfedges (if any) and carries a
/// geometric point. The `Default` value is the record of a fresh, isolated
/// vertex; the container relies on that for element creation.
pub trait VertexRecord: Clone + Default {
    /// The geometric point attached to vertices of this record type.
    type Point: Clone + fmt::Debug;

    /// The same record kind, re-instantiated over a different point type.
    ///
    /// This is the vertex record's own rebinding rule: it only replaces the
    /// point type and keeps everything else (in particular any auxiliary
    /// payload) fixed. Implementations must make rebinding independent of
    /// the current point type, i.e. `Rebound<P2>` must not depend on
    /// `Self::Point`; that is what makes repeated rebinding compose.
    type Rebound<P2: Clone + fmt::Debug>: VertexRecord<Point = P2>;

    /// One outgoing halfedge, i.e. a halfedge whose origin is this vertex.
    /// `None` for isolated vertices.
    fn halfedge(&self) -> Option<HalfedgeHandle>;

    /// Sets the outgoing halfedge reference.
    fn set_halfedge(&mut self, he: Option<HalfedgeHandle>);

    /// The geometric point of this vertex. Only `None` for records that
    /// have not been placed yet.
    fn point(&self) -> Option<&Self::Point>;

    /// Attaches a geometric point to this vertex.
    fn set_point(&mut self, point: Self::Point);

    /// Overwrites `self` with a copy of `other`.
    ///
    /// The assignment is total: no field of the prior `self` survives.
    fn assign(&mut self, other: &Self) {
        *self = other.clone();
    }
}


/// Element types that can be stored as the halfedges of a
/// [`Dcel`][crate::Dcel].
///
/// A halfedge knows its `next`/`prev` neighbors on its boundary cycle, its
/// origin vertex, its incident face and carries the curve of its edge. The
/// twin reference is *not* part of the record: the container derives it
/// from the handle pairing (see
/// [`HalfedgeHandle`][crate::handle::HalfedgeHandle]).
pub trait HalfedgeRecord: Clone + Default {
    /// The x-monotone curve attached to halfedges of this record type.
    type Curve: Clone + fmt::Debug;

    /// The same record kind, re-instantiated over a different curve type.
    /// See [`VertexRecord::Rebound`] for the rules.
    type Rebound<C2: Clone + fmt::Debug>: HalfedgeRecord<Curve = C2>;

    /// The next halfedge on this halfedge's boundary cycle.
    fn next(&self) -> Option<HalfedgeHandle>;
    /// Sets the `next` link.
    fn set_next(&mut self, he: Option<HalfedgeHandle>);

    /// The previous halfedge on this halfedge's boundary cycle.
    fn prev(&self) -> Option<HalfedgeHandle>;
    /// Sets the `prev` link.
    fn set_prev(&mut self, he: Option<HalfedgeHandle>);

    /// The vertex this halfedge points away from.
    fn origin(&self) -> Option<VertexHandle>;
    /// Sets the origin vertex reference.
    fn set_origin(&mut self, v: Option<VertexHandle>);

    /// The face this halfedge bounds (the face lies to its left).
    fn face(&self) -> Option<FaceHandle>;
    /// Sets the incident face reference.
    fn set_face(&mut self, f: Option<FaceHandle>);

    /// The curve of the edge this halfedge is half of. Both twins carry the
    /// same curve; the direction is implied by the halfedge's origin.
    fn curve(&self) -> Option<&Self::Curve>;
    /// Attaches a curve.
    fn set_curve(&mut self, curve: Self::Curve);

    /// Overwrites `self` with a copy of `other` (total assignment).
    fn assign(&mut self, other: &Self) {
        *self = other.clone();
    }
}


/// Element types that can be stored as the faces of a
/// [`Dcel`][crate::Dcel].
///
/// A face stores one representative halfedge per connected boundary
/// component: one for the outer boundary (absent exactly for the unbounded
/// face) and one per hole. Face records carry no geometric attachment and
/// therefore have no rebinding rule: rebinding a DCEL keeps its face record
/// type (payload included) unchanged.
pub trait FaceRecord: Clone + Default {
    /// A halfedge on the outer boundary, or `None` for the unbounded face.
    fn outer(&self) -> Option<HalfedgeHandle>;
    /// Sets the outer boundary representative.
    fn set_outer(&mut self, he: Option<HalfedgeHandle>);

    /// The representatives of all hole boundaries, one per hole.
    fn holes(&self) -> &[HalfedgeHandle];
    /// Registers a new hole boundary representative.
    fn add_hole(&mut self, he: HalfedgeHandle);
    /// Removes the hole entry `he`. Panics if there is no such entry.
    fn remove_hole(&mut self, he: HalfedgeHandle);

    /// Whether this is the unbounded face.
    fn is_unbounded(&self) -> bool {
        self.outer().is_none()
    }

    /// Overwrites `self` with a copy of `other` (total assignment).
    fn assign(&mut self, other: &Self) {
        *self = other.clone();
    }
}


/// Type-level rebinding of a DCEL type over a new geometric traits class.
///
/// Generic algorithms are written once against an abstract traits
/// parameter; when such an algorithm is instantiated with a concrete traits
/// class `T`, it uses `Rebound<D, T>` to retarget the DCEL type `D` it was
/// handed, without anyone spelling the whole DCEL type out again. The
/// vertex record is re-derived over `T::Point`, the halfedge record over
/// `T::Curve`, and the face record (with its payload) is kept as is.
///
/// Rebinding is a pure type-level computation: it has no runtime cost and
/// no runtime representation. It also composes: rebinding `T1 → T2 → T3`
/// names the same type as rebinding `T1 → T3` directly, since every step
/// only depends on the target traits class.
pub trait Rebind<T: GeomTraits> {
    /// The rebound type.
    type Output;
}

/// Shorthand for the result of [`Rebind`]ing `D` over the traits class `T`.
pub type Rebound<D, T> = <D as Rebind<T>>::Output;
