//! The DCEL container for planar subdivisions.
//!
//! A [`Dcel`] owns three arenas (vertices, halfedges, faces) and maintains
//! the incidences between them: every halfedge has a twin, `next`/`prev`
//! links chaining the boundary cycles, an origin vertex and an incident
//! face; every face knows one representative halfedge per connected
//! boundary component. The unbounded face always exists.
//!
//! The mutators in here are purely *topological*: they perform exactly the
//! relinking the caller asks for and keep all invariants intact, but they
//! never look at points or curves. Deciding *where* an edge goes (which
//! halfedges to thread after, which side of a split cycle encloses the
//! other) requires geometry and is the job of the construction algorithms
//! layered on top. Violating a mutator's preconditions is a programming
//! error and panics; no mutator leaves a half-updated structure behind.

// # Some notes for developers about this implementation
//
// - The twin halfedges are stored implicitly: twins are always stored next
//   to one another in the underlying arena and thus always have handle
//   indices only one apart. Since we start with handle index 0, the indices
//   of two twins are always 2k and 2k + 1 where k is an integer. Edge
//   handles map to halfedge handles by multiplying by two, and back by
//   integer division by two.
// - Halfedges are only ever created and removed in pairs, so the pairing
//   above survives arbitrary mutation sequences.

use std::{fmt, mem, ops};

use smallvec::SmallVec;

use crate::{
    handle::hsize,
    map::Store,
    prelude::*,
};
use self::adj::{CycleIter, VertexCirculator};


pub mod adj;

#[cfg(test)]
mod tests;


const NO_NEXT: &str = "internal DCEL error: halfedge has no `next` link";
const NO_PREV: &str = "internal DCEL error: halfedge has no `prev` link";
const NO_ORIGIN: &str = "internal DCEL error: halfedge has no origin";
const NO_FACE: &str = "internal DCEL error: halfedge has no incident face";


// ===============================================================================================
// ===== Twin pairing on `HalfedgeHandle`
// ===============================================================================================

impl HalfedgeHandle {
    /// Returns the handle of this halfedge's twin (the halfedge of the same
    /// edge pointing in the opposite direction).
    ///
    /// This only works due to an assumption about the data structure in
    /// this module: two twins are always stored right next to each other,
    /// starting at an even index. Thus we can simply flip the last bit of
    /// the handle index to get the twin handle.
    #[inline(always)]
    pub(crate) fn twin(self) -> HalfedgeHandle {
        HalfedgeHandle::new(self.idx() ^ 1)
    }

    /// Returns the halfedge of the given edge with the lower index value.
    #[inline(always)]
    pub(crate) fn lower_half_of(edge: EdgeHandle) -> Self {
        Self::new(edge.idx() * 2)
    }

    /// Returns the full edge this halfedge belongs to.
    #[inline(always)]
    pub(crate) fn full_edge(self) -> EdgeHandle {
        EdgeHandle::new(self.idx() / 2)
    }
}


// ===============================================================================================
// ===== Definition of the container
// ===============================================================================================

/// A doubly-connected edge list representing a subdivision of the plane.
///
/// The three type parameters are the element record types; use the base
/// records from [`elem`][crate::elem], wrap them in
/// [`Ext`][crate::ext::Ext] for auxiliary payloads, or supply your own
/// implementations of the record traits. The alias
/// [`ExtendedDcel`][crate::ext::ExtendedDcel] covers the common case.
///
/// All elements are owned by the container and referred to by handles;
/// handles stay valid until the element itself is removed. The container
/// performs no locking: mutation requires `&mut self`, concurrent use needs
/// external synchronization.
#[derive(Clone)]
pub struct Dcel<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    vertices: Store<VertexHandle, V>,
    halfedges: Store<HalfedgeHandle, H>,
    faces: Store<FaceHandle, F>,
    unbounded: FaceHandle,
}

impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Dcel<V, H, F> {
    /// Creates a subdivision of the empty plane: no vertices, no edges, and
    /// only the unbounded face.
    pub fn new() -> Self {
        let mut faces = Store::new();
        let unbounded = faces.push(F::default());
        Self {
            vertices: Store::new(),
            halfedges: Store::new(),
            faces,
            unbounded,
        }
    }

    // ===========================================================================================
    // ===== Counts, containment, handle iteration
    // ===========================================================================================

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    /// Returns the number of halfedges (always twice the number of edges).
    pub fn num_halfedges(&self) -> hsize {
        self.halfedges.num_elements()
    }

    /// Returns the number of (full) edges.
    pub fn num_edges(&self) -> hsize {
        self.halfedges.num_elements() / 2
    }

    /// Returns the number of faces, including the unbounded one.
    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    /// Checks whether the given vertex exists in this subdivision.
    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.contains_handle(v)
    }

    /// Checks whether the given halfedge exists in this subdivision.
    pub fn contains_halfedge(&self, he: HalfedgeHandle) -> bool {
        self.halfedges.contains_handle(he)
    }

    /// Checks whether the given edge exists in this subdivision.
    pub fn contains_edge(&self, e: EdgeHandle) -> bool {
        self.halfedges.contains_handle(HalfedgeHandle::lower_half_of(e))
    }

    /// Checks whether the given face exists in this subdivision.
    pub fn contains_face(&self, f: FaceHandle) -> bool {
        self.faces.contains_handle(f)
    }

    /// Returns an iterator over all vertex handles.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    /// Returns an iterator over all halfedge handles.
    pub fn halfedges(&self) -> impl Iterator<Item = HalfedgeHandle> + '_ {
        self.halfedges.handles()
    }

    /// Returns an iterator over all edge handles.
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.halfedges
            .handles()
            .filter(|he| he.idx() % 2 == 0)
            .map(HalfedgeHandle::full_edge)
    }

    /// Returns an iterator over all face handles (the unbounded face
    /// included).
    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }

    // ===========================================================================================
    // ===== Topology accessors
    // ===========================================================================================

    /// Returns the handle of the unbounded face.
    pub fn unbounded_face(&self) -> FaceHandle {
        self.unbounded
    }

    /// Returns the twin of the given halfedge.
    pub fn twin(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.check_halfedge(he);
        he.twin()
    }

    /// Returns the halfedge following `he` on its boundary cycle.
    pub fn next(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.check_halfedge(he);
        self.next_of(he)
    }

    /// Returns the halfedge preceding `he` on its boundary cycle.
    pub fn prev(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.check_halfedge(he);
        self.prev_of(he)
    }

    /// Returns the vertex the given halfedge points away from.
    pub fn origin(&self, he: HalfedgeHandle) -> VertexHandle {
        self.check_halfedge(he);
        self.origin_of(he)
    }

    /// Returns the vertex the given halfedge points towards (the origin of
    /// its twin).
    pub fn target(&self, he: HalfedgeHandle) -> VertexHandle {
        self.check_halfedge(he);
        self.origin_of(he.twin())
    }

    /// Returns the face the given halfedge bounds.
    pub fn face_of(&self, he: HalfedgeHandle) -> FaceHandle {
        self.check_halfedge(he);
        self.incident_face_of(he)
    }

    /// Returns the full edge the given halfedge is half of.
    pub fn edge_of(&self, he: HalfedgeHandle) -> EdgeHandle {
        self.check_halfedge(he);
        he.full_edge()
    }

    /// Returns the two halfedges of the given edge (the two are twins of
    /// each other).
    pub fn halfedges_of(&self, e: EdgeHandle) -> [HalfedgeHandle; 2] {
        let lower = HalfedgeHandle::lower_half_of(e);
        self.check_halfedge(lower);
        [lower, lower.twin()]
    }

    /// Checks whether the given vertex has no incident edges.
    pub fn is_isolated(&self, v: VertexHandle) -> bool {
        self.check_vertex(v);
        self.vertices[v].halfedge().is_none()
    }

    /// Returns the geometric point of the given vertex. Panics if the
    /// vertex has no point attached.
    pub fn point_of(&self, v: VertexHandle) -> &V::Point {
        self.check_vertex(v);
        self.vertices[v].point().unwrap_or_else(|| {
            panic!("{:?} has no point attached", v)
        })
    }

    /// Returns the curve of the given edge. Panics if the edge has no curve
    /// attached.
    pub fn curve_of(&self, e: EdgeHandle) -> &H::Curve {
        let lower = HalfedgeHandle::lower_half_of(e);
        self.check_halfedge(lower);
        self.halfedges[lower].curve().unwrap_or_else(|| {
            panic!("{:?} has no curve attached", e)
        })
    }

    /// Returns an iterator over the halfedges of the boundary cycle through
    /// `he`, starting with `he` itself.
    pub fn cycle(&self, he: HalfedgeHandle) -> CycleIter<'_, V, H, F> {
        self.check_halfedge(he);
        CycleIter::new(self, he)
    }

    /// Returns the number of halfedges on the boundary cycle through `he`.
    pub fn cycle_len(&self, he: HalfedgeHandle) -> usize {
        self.cycle(he).count()
    }

    /// Returns an iterator over all halfedges whose origin is `v`, i.e. the
    /// edges around `v` in rotation order. Empty for isolated vertices.
    pub fn outgoing_around(&self, v: VertexHandle) -> VertexCirculator<'_, V, H, F> {
        self.check_vertex(v);
        VertexCirculator::new(self, self.vertices[v].halfedge())
    }

    // ===========================================================================================
    // ===== Internal helpers
    // ===========================================================================================

    /// Makes sure the given handle points to an existing element; panics
    /// otherwise.
    fn check_vertex(&self, v: VertexHandle) {
        if !self.vertices.contains_handle(v) {
            panic!("{:?} was passed to this DCEL, but no such vertex exists", v);
        }
    }

    /// Makes sure the given handle points to an existing element; panics
    /// otherwise.
    fn check_halfedge(&self, he: HalfedgeHandle) {
        if !self.halfedges.contains_handle(he) {
            panic!("{:?} was passed to this DCEL, but no such halfedge exists", he);
        }
    }

    /// Makes sure the given handle points to an existing element; panics
    /// otherwise.
    fn check_face(&self, f: FaceHandle) {
        if !self.faces.contains_handle(f) {
            panic!("{:?} was passed to this DCEL, but no such face exists", f);
        }
    }

    pub(crate) fn next_of(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.halfedges[he].next().expect(NO_NEXT)
    }

    pub(crate) fn prev_of(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.halfedges[he].prev().expect(NO_PREV)
    }

    pub(crate) fn origin_of(&self, he: HalfedgeHandle) -> VertexHandle {
        self.halfedges[he].origin().expect(NO_ORIGIN)
    }

    fn incident_face_of(&self, he: HalfedgeHandle) -> FaceHandle {
        self.halfedges[he].face().expect(NO_FACE)
    }

    /// Links `prev -> next`, updating both directions.
    fn link(&mut self, prev: HalfedgeHandle, next: HalfedgeHandle) {
        self.halfedges[prev].set_next(Some(next));
        self.halfedges[next].set_prev(Some(prev));
    }

    /// Allocates a twin pair carrying `curve`, with origins `from`/`to`.
    /// The `next`/`prev` links and the incident faces are left unset; the
    /// caller has to thread the pair before returning. Returns the halfedge
    /// pointing away from `from`.
    fn push_edge_pair(
        &mut self,
        curve: H::Curve,
        from: VertexHandle,
        to: VertexHandle,
    ) -> HalfedgeHandle {
        let mut fwd = H::default();
        fwd.set_origin(Some(from));
        fwd.set_curve(curve.clone());

        let mut bwd = H::default();
        bwd.set_origin(Some(to));
        bwd.set_curve(curve);

        let he = self.halfedges.push(fwd);
        let twin = self.halfedges.push(bwd);
        debug_assert_eq!(he.twin(), twin);

        he
    }

    /// Checks whether `a` and `b` lie on the same boundary cycle.
    fn same_cycle(&self, a: HalfedgeHandle, b: HalfedgeHandle) -> bool {
        self.cycle(a).any(|he| he == b)
    }

    /// Walks the boundary cycle through `he` and returns the component
    /// entry of `face` that carries this cycle.
    ///
    /// Panics if the cycle is not registered in `face` at all, which would
    /// mean the structure is broken or `he` does not actually bound `face`.
    fn cycle_component(&self, face: FaceHandle, he: HalfedgeHandle) -> Component {
        let outer = self.faces[face].outer();
        for h in self.cycle(he) {
            if outer == Some(h) {
                return Component::Outer;
            }
            if self.faces[face].holes().contains(&h) {
                return Component::Hole(h);
            }
        }

        panic!(
            "internal DCEL error: boundary cycle of {:?} has no component entry in {:?}",
            he, face,
        );
    }

    /// Sets the incident face of every halfedge on the cycle through `he`.
    fn assign_cycle_to_face(&mut self, he: HalfedgeHandle, face: FaceHandle) {
        let cycle: SmallVec<[HalfedgeHandle; 8]> = self.cycle(he).collect();
        for h in cycle {
            self.halfedges[h].set_face(Some(face));
        }
    }

    // ===========================================================================================
    // ===== Mutators
    // ===========================================================================================

    /// Adds a new isolated vertex located at `point`.
    pub fn add_vertex(&mut self, point: V::Point) -> VertexHandle {
        let mut v = V::default();
        v.set_point(point);
        self.vertices.push(v)
    }

    /// Adds an edge between two isolated vertices.
    ///
    /// The twin pair forms a new boundary cycle of length two, registered
    /// as a hole component of `face` (the face the edge floats in; the
    /// construction layer knows it from point location). Returns the
    /// halfedge pointing away from `from`; its twin is the other half.
    pub fn add_edge_disjoint(
        &mut self,
        curve: H::Curve,
        from: VertexHandle,
        to: VertexHandle,
        face: FaceHandle,
    ) -> HalfedgeHandle {
        self.check_vertex(from);
        self.check_vertex(to);
        self.check_face(face);
        assert_ne!(from, to, "cannot add a disjoint edge from a vertex to itself");
        assert!(
            self.vertices[from].halfedge().is_none(),
            "{:?} already has incident edges, expected an isolated vertex",
            from,
        );
        assert!(
            self.vertices[to].halfedge().is_none(),
            "{:?} already has incident edges, expected an isolated vertex",
            to,
        );

        let he = self.push_edge_pair(curve, from, to);
        let twin = he.twin();
        self.link(he, twin);
        self.link(twin, he);
        self.halfedges[he].set_face(Some(face));
        self.halfedges[twin].set_face(Some(face));

        self.vertices[from].set_halfedge(Some(he));
        self.vertices[to].set_halfedge(Some(twin));
        self.faces[face].add_hole(he);

        he
    }

    /// Adds an edge from a connected vertex to an isolated vertex `to`.
    ///
    /// The new pair is threaded into the cycle right after `prev`, i.e.
    /// between `prev` and `prev.next`; the connected endpoint is
    /// `target(prev)`. This grows the boundary cycle by two halfedges and
    /// changes no face components. Returns the halfedge pointing towards
    /// `to`.
    pub fn add_edge_from_vertex(
        &mut self,
        curve: H::Curve,
        prev: HalfedgeHandle,
        to: VertexHandle,
    ) -> HalfedgeHandle {
        self.check_halfedge(prev);
        self.check_vertex(to);
        assert!(
            self.vertices[to].halfedge().is_none(),
            "{:?} already has incident edges, expected an isolated vertex",
            to,
        );

        let from = self.origin_of(prev.twin());
        let old_next = self.next_of(prev);
        let face = self.incident_face_of(prev);

        let he = self.push_edge_pair(curve, from, to);
        let twin = he.twin();
        self.link(prev, he);
        self.link(he, twin);
        self.link(twin, old_next);
        self.halfedges[he].set_face(Some(face));
        self.halfedges[twin].set_face(Some(face));
        self.vertices[to].set_halfedge(Some(twin));

        he
    }

    /// Adds an edge between two already connected vertices.
    ///
    /// The new pair is threaded after `prev1` and after `prev2`: the
    /// returned halfedge runs from `target(prev1)` to `target(prev2)`. Both
    /// `prev1` and `prev2` must bound the same face (the new edge cannot
    /// cross a boundary); rotational placement around the endpoints is the
    /// caller's geometric decision, expressed by the choice of
    /// `prev1`/`prev2`.
    ///
    /// Two cases, distinguished purely topologically:
    ///
    /// - `prev1` and `prev2` lie on *different* boundary components of the
    ///   face: the two components fuse into one; no face is created and one
    ///   component entry is retired. Returns `(he, None)`.
    /// - They lie on the *same* boundary cycle: the cycle splits in two and
    ///   the face is split. The cycle through the returned halfedge becomes
    ///   the outer boundary of a brand new face; the twin's cycle stays
    ///   with the old face and inherits the old component entry. Callers
    ///   orient `prev1`/`prev2` so that the enclosed side is the returned
    ///   one. Hole components of the old face that now lie inside the new
    ///   face must be relocated by the caller via
    ///   [`move_hole`][Self::move_hole] (deciding that takes geometry).
    ///   Returns `(he, Some(new_face))`.
    pub fn add_edge_at_vertices(
        &mut self,
        curve: H::Curve,
        prev1: HalfedgeHandle,
        prev2: HalfedgeHandle,
    ) -> (HalfedgeHandle, Option<FaceHandle>) {
        self.check_halfedge(prev1);
        self.check_halfedge(prev2);
        assert_ne!(prev1, prev2, "`prev1` and `prev2` must be distinct halfedges");

        let face = self.incident_face_of(prev1);
        assert_eq!(
            self.incident_face_of(prev2), face,
            "`prev1` and `prev2` bound different faces; the new edge would cross a boundary",
        );

        let from = self.origin_of(prev1.twin());
        let to = self.origin_of(prev2.twin());
        let next1 = self.next_of(prev1);
        let next2 = self.next_of(prev2);
        let split = self.same_cycle(prev1, prev2);

        // The component entries have to be identified before relinking
        // destroys the old cycles.
        let comp1 = self.cycle_component(face, prev1);
        let comp2 = if split {
            None
        } else {
            Some(self.cycle_component(face, prev2))
        };

        let he = self.push_edge_pair(curve, from, to);
        let twin = he.twin();
        self.link(prev1, he);
        self.link(he, next2);
        self.link(prev2, twin);
        self.link(twin, next1);

        if split {
            // The old cycle fell apart into the cycle through `he` and the
            // cycle through `twin`. The latter stays with the old face and
            // takes over the old component entry; the former becomes the
            // outer boundary of a new face.
            self.halfedges[twin].set_face(Some(face));

            let mut record = F::default();
            record.set_outer(Some(he));
            let new_face = self.faces.push(record);
            self.assign_cycle_to_face(he, new_face);

            match comp1 {
                Component::Outer => self.faces[face].set_outer(Some(twin)),
                Component::Hole(rep) => {
                    self.faces[face].remove_hole(rep);
                    self.faces[face].add_hole(twin);
                }
            }

            (he, Some(new_face))
        } else {
            // Two components of `face` fused into a single cycle. All old
            // representatives still lie on that cycle, so only the now
            // redundant entry has to be retired.
            self.halfedges[he].set_face(Some(face));
            self.halfedges[twin].set_face(Some(face));

            match (comp1, comp2.expect("just checked")) {
                (Component::Outer, Component::Hole(rep))
                | (Component::Hole(rep), Component::Outer) => {
                    self.faces[face].remove_hole(rep);
                }
                (Component::Hole(_), Component::Hole(rep2)) => {
                    self.faces[face].remove_hole(rep2);
                }
                (Component::Outer, Component::Outer) => {
                    unreachable!("two outer boundary components on one face");
                }
            }

            (he, None)
        }
    }

    /// Splits the edge of `he` into two edges by inserting a new vertex at
    /// `point`.
    ///
    /// `he` keeps its handle and becomes the half from its old origin to
    /// the new vertex (carrying `near_curve`); a new pair is created for
    /// the other half (carrying `far_curve`). Faces and face components are
    /// untouched. Returns the new vertex.
    pub fn split_edge(
        &mut self,
        he: HalfedgeHandle,
        point: V::Point,
        near_curve: H::Curve,
        far_curve: H::Curve,
    ) -> VertexHandle {
        self.check_halfedge(he);

        let twin = he.twin();
        let old_next = self.next_of(he);
        let old_prev_of_twin = self.prev_of(twin);
        let far_vertex = self.origin_of(twin);
        let face_fwd = self.incident_face_of(he);
        let face_bwd = self.incident_face_of(twin);

        let mid = self.add_vertex(point);
        let far = self.push_edge_pair(far_curve, mid, far_vertex);
        let far_twin = far.twin();

        // `he`/`twin` shrink to the near half.
        self.halfedges[twin].set_origin(Some(mid));
        self.halfedges[he].set_curve(near_curve.clone());
        self.halfedges[twin].set_curve(near_curve);
        self.halfedges[far].set_face(Some(face_fwd));
        self.halfedges[far_twin].set_face(Some(face_bwd));

        if old_next == twin {
            // The far endpoint is a degree-one tip: the cycle turns around
            // right there and the whole subchain is `he -> far -> far_twin
            // -> twin`.
            self.link(he, far);
            self.link(far, far_twin);
            self.link(far_twin, twin);
        } else {
            self.link(far, old_next);
            self.link(he, far);
            self.link(far_twin, twin);
            self.link(old_prev_of_twin, far_twin);
        }

        // The far vertex may have referenced `twin` as its outgoing
        // halfedge; that one now leaves from `mid` instead.
        if self.vertices[far_vertex].halfedge() == Some(twin) {
            self.vertices[far_vertex].set_halfedge(Some(far_twin));
        }
        self.vertices[mid].set_halfedge(Some(far));

        mid
    }

    /// Removes the edge of `he`, the inverse of the `add_edge_*` mutators.
    ///
    /// If the twin pair borders two distinct faces, the faces are merged:
    /// the face whose *outer* boundary runs through the pair is deleted
    /// (the pair is re-oriented automatically, so either halfedge of the
    /// edge may be passed; the unbounded face is never deleted) and its
    /// remaining boundary components migrate to the survivor. Returns the
    /// deleted face.
    ///
    /// If both halfedges border the same face, no face dies and `None` is
    /// returned:
    ///
    /// - a dangling (antenna) edge is unthreaded and its tip vertex becomes
    ///   isolated;
    /// - a lone edge (a two-cycle component) disappears together with its
    ///   hole entry, isolating both endpoints;
    /// - a bridge edge splits its cycle into two components: the cycle
    ///   through `next(twin)` keeps the old entry's role, the cycle
    ///   through `next(he)` is registered as a new hole of the face.
    pub fn remove_edge(&mut self, he: HalfedgeHandle) -> Option<FaceHandle> {
        self.check_halfedge(he);

        let mut he = he;
        let mut twin = he.twin();
        let face_fwd = self.incident_face_of(he);
        let face_bwd = self.incident_face_of(twin);

        if face_fwd != face_bwd {
            // The pair separates two faces; one of them is merged away. The
            // doomed face is the one whose outer boundary runs through the
            // pair, so re-orient first. (For the unbounded face the cycle
            // is necessarily a hole component, so this also guarantees the
            // unbounded face survives.)
            if let Component::Hole(_) = self.cycle_component(face_fwd, he) {
                mem::swap(&mut he, &mut twin);
            }
            let dead = self.incident_face_of(he);
            let survivor = self.incident_face_of(twin);
            match self.cycle_component(dead, he) {
                Component::Outer => {}
                Component::Hole(_) => panic!(
                    "remove_edge: {:?} lies on hole boundaries of both incident faces, \
                     the structure is broken",
                    he,
                ),
            }

            let prev_fwd = self.prev_of(he);
            let next_fwd = self.next_of(he);
            let prev_bwd = self.prev_of(twin);
            let next_bwd = self.next_of(twin);
            let comp = self.cycle_component(survivor, twin);

            self.link(prev_fwd, next_bwd);
            self.link(prev_bwd, next_fwd);

            // Everything that bounded the dead face bounds the survivor
            // now: the merged cycle as well as all holes of the dead face.
            self.assign_cycle_to_face(next_fwd, survivor);
            let dead_holes: SmallVec<[HalfedgeHandle; 2]> =
                self.faces[dead].holes().iter().copied().collect();
            for hole in dead_holes {
                self.assign_cycle_to_face(hole, survivor);
                self.faces[survivor].add_hole(hole);
            }

            // The survivor's entry for the merged cycle may have referenced
            // the dying halfedge.
            match comp {
                Component::Outer if self.faces[survivor].outer() == Some(twin) => {
                    self.faces[survivor].set_outer(Some(next_fwd));
                }
                Component::Hole(rep) if rep == twin => {
                    self.faces[survivor].remove_hole(rep);
                    self.faces[survivor].add_hole(next_fwd);
                }
                _ => {}
            }

            let from = self.origin_of(he);
            let to = self.origin_of(twin);
            if self.vertices[from].halfedge() == Some(he) {
                self.vertices[from].set_halfedge(Some(next_bwd));
            }
            if self.vertices[to].halfedge() == Some(twin) {
                self.vertices[to].set_halfedge(Some(next_fwd));
            }

            self.halfedges.remove(he);
            self.halfedges.remove(twin);
            self.faces.remove(dead);

            Some(dead)
        } else {
            let face = face_fwd;

            // Normalize a dangling edge so that the tip is `target(he)`.
            if self.next_of(twin) == he {
                mem::swap(&mut he, &mut twin);
            }

            if self.next_of(he) == twin {
                // Dangling edge: `target(he)` has degree one.
                let prev_fwd = self.prev_of(he);
                let next_bwd = self.next_of(twin);
                let base = self.origin_of(he);
                let tip = self.origin_of(twin);
                let comp = self.cycle_component(face, he);

                if prev_fwd == twin {
                    // A lone two-cycle: the whole component disappears.
                    match comp {
                        Component::Hole(rep) => self.faces[face].remove_hole(rep),
                        Component::Outer => panic!(
                            "remove_edge: cannot remove the last edge of the outer \
                             boundary of {:?}",
                            face,
                        ),
                    }
                    self.vertices[base].set_halfedge(None);
                } else {
                    self.link(prev_fwd, next_bwd);
                    match comp {
                        Component::Outer if self.faces[face].outer() == Some(he)
                            || self.faces[face].outer() == Some(twin) =>
                        {
                            self.faces[face].set_outer(Some(next_bwd));
                        }
                        Component::Hole(rep) if rep == he || rep == twin => {
                            self.faces[face].remove_hole(rep);
                            self.faces[face].add_hole(next_bwd);
                        }
                        _ => {}
                    }
                    if self.vertices[base].halfedge() == Some(he) {
                        self.vertices[base].set_halfedge(Some(next_bwd));
                    }
                }
                self.vertices[tip].set_halfedge(None);

                self.halfedges.remove(he);
                self.halfedges.remove(twin);
                None
            } else {
                // Bridge: both halfedges lie (non-adjacently) on the same
                // cycle; removing the pair splits it into two components.
                let prev_fwd = self.prev_of(he);
                let next_fwd = self.next_of(he);
                let prev_bwd = self.prev_of(twin);
                let next_bwd = self.next_of(twin);
                let from = self.origin_of(he);
                let to = self.origin_of(twin);
                let comp = self.cycle_component(face, he);

                self.link(prev_fwd, next_bwd);
                self.link(prev_bwd, next_fwd);

                // The cycle through `next_bwd` keeps the old entry's role;
                // the cycle through `next_fwd` becomes a new hole.
                match comp {
                    Component::Outer => self.faces[face].set_outer(Some(next_bwd)),
                    Component::Hole(rep) => {
                        self.faces[face].remove_hole(rep);
                        self.faces[face].add_hole(next_bwd);
                    }
                }
                self.faces[face].add_hole(next_fwd);

                if self.vertices[from].halfedge() == Some(he) {
                    self.vertices[from].set_halfedge(Some(next_bwd));
                }
                if self.vertices[to].halfedge() == Some(twin) {
                    self.vertices[to].set_halfedge(Some(next_fwd));
                }

                self.halfedges.remove(he);
                self.halfedges.remove(twin);
                None
            }
        }
    }

    /// Removes an isolated vertex and returns its record. Panics if the
    /// vertex still has incident edges.
    pub fn remove_isolated_vertex(&mut self, v: VertexHandle) -> V {
        self.check_vertex(v);
        assert!(
            self.vertices[v].halfedge().is_none(),
            "cannot remove {:?}: it still has incident edges",
            v,
        );

        self.vertices.remove(v).expect("just checked that the vertex exists")
    }

    /// Relocates the hole component represented by `hole` from face `from`
    /// to face `to`, updating the incident-face references of the whole
    /// cycle.
    ///
    /// Construction layers use this after a face split when geometry shows
    /// that a hole of the old face lies inside the new one.
    pub fn move_hole(&mut self, from: FaceHandle, to: FaceHandle, hole: HalfedgeHandle) {
        self.check_face(from);
        self.check_face(to);
        self.check_halfedge(hole);

        self.faces[from].remove_hole(hole);
        self.faces[to].add_hole(hole);
        self.assign_cycle_to_face(hole, to);
    }

    // ===========================================================================================
    // ===== Integrity checking
    // ===========================================================================================

    /// Checks every structural invariant of the subdivision and panics with
    /// a description of the first violation found.
    ///
    /// This is an expensive full sweep intended for tests and debugging of
    /// construction algorithms; the mutators above maintain the invariants
    /// on their own.
    pub fn check_invariants(&self) {
        use ahash::AHashSet;

        // Twin pairing and link mutuality.
        for he in self.halfedges() {
            let twin = he.twin();
            assert!(
                self.halfedges.contains_handle(twin),
                "{:?} exists but its twin {:?} does not",
                he, twin,
            );
            assert_ne!(he, twin, "{:?} is its own twin", he);
            assert_eq!(twin.twin(), he, "twin pairing of {:?} is not an involution", he);

            let next = self.next_of(he);
            assert_eq!(
                self.prev_of(next), he,
                "`prev` of {:?} does not point back to {:?}", next, he,
            );
            let prev = self.prev_of(he);
            assert_eq!(
                self.next_of(prev), he,
                "`next` of {:?} does not point back to {:?}", prev, he,
            );
        }

        // Vertex/origin consistency.
        for v in self.vertices() {
            if let Some(he) = self.vertices[v].halfedge() {
                assert!(
                    self.halfedges.contains_handle(he),
                    "{:?} references nonexistent {:?}", v, he,
                );
                assert_eq!(
                    self.origin_of(he), v,
                    "the outgoing halfedge {:?} of {:?} does not originate there", he, v,
                );
            }
        }

        // Faces partition the halfedges: every boundary cycle is closed,
        // every halfedge lies on exactly one registered component, and its
        // incident-face reference matches the component's owner.
        let mut owned = AHashSet::new();
        let total = self.num_halfedges() as usize;
        for f in self.faces() {
            if f == self.unbounded {
                assert!(
                    self.faces[f].outer().is_none(),
                    "the unbounded face has an outer boundary",
                );
            }

            let record = &self.faces[f];
            let components = record.outer().into_iter().chain(record.holes().iter().copied());
            for rep in components {
                assert!(
                    self.halfedges.contains_handle(rep),
                    "{:?} references nonexistent component representative {:?}", f, rep,
                );

                let mut current = rep;
                for steps in 0.. {
                    assert!(
                        steps <= total,
                        "boundary cycle through {:?} does not close", rep,
                    );
                    assert_eq!(
                        self.incident_face_of(current), f,
                        "{:?} lies on a boundary component of {:?} but references another face",
                        current, f,
                    );
                    assert!(
                        owned.insert(current),
                        "{:?} lies on two registered boundary components", current,
                    );

                    current = self.next_of(current);
                    if current == rep {
                        break;
                    }
                }
            }
        }
        assert_eq!(
            owned.len(), total,
            "some halfedges lie on no registered boundary component",
        );
    }
}

/// The role of a boundary cycle within its face: the outer boundary, or a
/// hole with the registered representative halfedge.
enum Component {
    Outer,
    Hole(HalfedgeHandle),
}

impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Default for Dcel<V, H, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> fmt::Debug for Dcel<V, H, F>
where
    V: fmt::Debug,
    H: fmt::Debug,
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dcel")
            .field("vertices", &self.vertices)
            .field("halfedges", &self.halfedges)
            .field("faces", &self.faces)
            .field("unbounded", &self.unbounded)
            .finish()
    }
}


// ===============================================================================================
// ===== Indexing by handles
// ===============================================================================================

macro_rules! impl_index {
    ($handle:ident, $field:ident, $out:ident) => {
        impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> ops::Index<$handle>
            for Dcel<V, H, F>
        {
            type Output = $out;

            #[inline(always)]
            fn index(&self, idx: $handle) -> &Self::Output {
                &self.$field[idx]
            }
        }

        impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> ops::IndexMut<$handle>
            for Dcel<V, H, F>
        {
            #[inline(always)]
            fn index_mut(&mut self, idx: $handle) -> &mut Self::Output {
                &mut self.$field[idx]
            }
        }
    }
}

impl_index!(VertexHandle, vertices, V);
impl_index!(HalfedgeHandle, halfedges, H);
impl_index!(FaceHandle, faces, F);


// ===============================================================================================
// ===== Rebinding
// ===============================================================================================

impl<T, V, H, F> Rebind<T> for Dcel<V, H, F>
where
    T: GeomTraits,
    V: VertexRecord,
    H: HalfedgeRecord,
    F: FaceRecord,
{
    type Output = Dcel<V::Rebound<T::Point>, H::Rebound<T::Curve>, F>;
}
