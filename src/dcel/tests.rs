use cgmath::Point2;

use crate::{
    prelude::*,
    construct::{CartesianTraits, Segment2},
    elem::{Face, Halfedge, Vertex},
    ext::{Ext, ExtendedDcel, FaceExtendedDcel},
};
use super::Dcel;


/// Most tests only exercise topology, so points and curves are simple
/// dummy types.
type TopoDcel = Dcel<Vertex<(f32, f32)>, Halfedge<u8>, Face>;

/// A triangle with the inner face on the counterclockwise side:
///
///         (C)
///        /   \
///       /     \
///      /       \
///    (A) ----- (B)
///
/// `ab`, `bc` and `ca` are the halfedges bounding the inner face.
struct Tri {
    dcel: TopoDcel,
    va: VertexHandle,
    vb: VertexHandle,
    vc: VertexHandle,
    ab: HalfedgeHandle,
    bc: HalfedgeHandle,
    ca: HalfedgeHandle,
    inner: FaceHandle,
}

fn triangle() -> Tri {
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();

    let va = dcel.add_vertex((0.0, 0.0));
    let vb = dcel.add_vertex((1.0, 0.0));
    let vc = dcel.add_vertex((0.0, 1.0));

    let ab = dcel.add_edge_disjoint(0, va, vb, ub);
    let bc = dcel.add_edge_from_vertex(1, ab, vc);
    let ba = dcel.twin(ab);
    let (ca, new_face) = dcel.add_edge_at_vertices(2, bc, ba);
    let inner = new_face.expect("closing a cycle must split the face");

    dcel.check_invariants();
    Tri { dcel, va, vb, vc, ab, bc, ca, inner }
}


// ===============================================================================================
// ===== Basics
// ===============================================================================================

#[test]
fn empty() {
    let dcel = TopoDcel::new();
    assert_eq!(dcel.num_vertices(), 0);
    assert_eq!(dcel.num_halfedges(), 0);
    assert_eq!(dcel.num_edges(), 0);
    assert_eq!(dcel.num_faces(), 1);

    let ub = dcel.unbounded_face();
    assert!(dcel.contains_face(ub));
    assert!(dcel[ub].is_unbounded());
    assert!(dcel[ub].holes().is_empty());

    dcel.check_invariants();
}

#[test]
fn isolated_vertices() {
    let mut dcel = TopoDcel::new();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((3.0, 4.0));

    assert_eq!(dcel.num_vertices(), 2);
    assert_ne!(a, b);
    assert!(dcel.is_isolated(a));
    assert!(dcel.is_isolated(b));
    assert_eq!(*dcel.point_of(b), (3.0, 4.0));
    assert_eq!(dcel.outgoing_around(a).count(), 0);
    dcel.check_invariants();

    let record = dcel.remove_isolated_vertex(a);
    assert_eq!(record.point(), Some(&(0.0, 0.0)));
    assert_eq!(dcel.num_vertices(), 1);
    assert!(!dcel.contains_vertex(a));
    assert!(dcel.contains_vertex(b));
    dcel.check_invariants();
}

#[test]
#[should_panic(expected = "still has incident edges")]
fn remove_connected_vertex_panics() {
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));
    dcel.add_edge_disjoint(0, a, b, ub);
    dcel.remove_isolated_vertex(a);
}


// ===============================================================================================
// ===== Scenario A: a single edge between two isolated vertices
// ===============================================================================================

#[test]
fn single_edge() {
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));

    let he = dcel.add_edge_disjoint(7, a, b, ub);
    let twin = dcel.twin(he);

    assert_eq!(dcel.num_halfedges(), 2);
    assert_eq!(dcel.num_edges(), 1);
    assert_eq!(dcel.num_faces(), 1);

    // The two new halfedges are mutual twins and distinct.
    assert_eq!(dcel.twin(twin), he);
    assert_ne!(twin, he);
    assert_eq!(dcel.edge_of(he), dcel.edge_of(twin));
    assert_eq!(dcel.halfedges_of(dcel.edge_of(he)), [he, twin]);
    assert!(dcel.contains_edge(dcel.edge_of(he)));
    assert_eq!(dcel.edges().collect::<Vec<_>>(), vec![dcel.edge_of(he)]);

    // Direction and incidences.
    assert_eq!(dcel.origin(he), a);
    assert_eq!(dcel.target(he), b);
    assert_eq!(dcel.origin(twin), b);
    assert_eq!(dcel[a].halfedge(), Some(he));
    assert_eq!(dcel[b].halfedge(), Some(twin));

    // Both halves lie on the unbounded face, forming one hole cycle of
    // length two.
    assert_eq!(dcel.face_of(he), ub);
    assert_eq!(dcel.face_of(twin), ub);
    assert_eq!(dcel.next(he), twin);
    assert_eq!(dcel.next(twin), he);
    assert_eq!(dcel.prev(he), twin);
    assert_eq!(dcel.cycle(he).collect::<Vec<_>>(), vec![he, twin]);
    assert_eq!(dcel[ub].holes(), [he]);

    assert_eq!(*dcel.curve_of(dcel.edge_of(he)), 7);
    dcel.check_invariants();
}

#[test]
fn edge_chain() {
    //    (A) ----- (B) ----- (C)
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));
    let c = dcel.add_vertex((2.0, 0.0));

    let ab = dcel.add_edge_disjoint(0, a, b, ub);
    let bc = dcel.add_edge_from_vertex(1, ab, c);

    assert_eq!(dcel.num_edges(), 2);
    assert_eq!(dcel.num_faces(), 1);
    assert_eq!(dcel.origin(bc), b);
    assert_eq!(dcel.target(bc), c);
    assert_eq!(dcel[c].halfedge(), Some(dcel.twin(bc)));

    // One boundary cycle: A→B→C→B→A.
    assert_eq!(dcel.cycle_len(ab), 4);
    assert_eq!(
        dcel.cycle(ab).collect::<Vec<_>>(),
        vec![ab, bc, dcel.twin(bc), dcel.twin(ab)],
    );
    assert_eq!(dcel[ub].holes().len(), 1);

    // The middle vertex has two outgoing halfedges, the tips one each.
    assert_eq!(dcel.outgoing_around(b).count(), 2);
    assert_eq!(dcel.outgoing_around(a).count(), 1);
    assert_eq!(dcel.outgoing_around(c).count(), 1);

    dcel.check_invariants();
}


// ===============================================================================================
// ===== Scenario B: a triangle
// ===============================================================================================

#[test]
fn triangle_splits_the_unbounded_face() {
    let tri = triangle();
    let dcel = &tri.dcel;
    let ub = dcel.unbounded_face();

    // Exactly two faces: the bounded one and the unbounded one.
    assert_eq!(dcel.num_faces(), 2);
    assert_ne!(tri.inner, ub);
    assert!(!dcel[tri.inner].is_unbounded());

    // The bounded boundary cycle has length three and consists of the
    // halfedges returned by the three insertions.
    assert_eq!(dcel.cycle_len(tri.ca), 3);
    assert_eq!(
        dcel.cycle(tri.ca).collect::<Vec<_>>(),
        vec![tri.ca, tri.ab, tri.bc],
    );
    for he in dcel.cycle(tri.ca) {
        assert_eq!(dcel.face_of(he), tri.inner);
    }
    assert_eq!(dcel[tri.inner].outer(), Some(tri.ca));
    assert!(dcel[tri.inner].holes().is_empty());

    // Every twin lies on the unbounded face's (single) hole boundary.
    for he in dcel.cycle(tri.ca) {
        assert_eq!(dcel.face_of(dcel.twin(he)), ub);
    }
    assert_eq!(dcel[ub].holes().len(), 1);
    assert_eq!(dcel.cycle_len(dcel.twin(tri.ca)), 3);

    // Vertex → outgoing halfedge consistency.
    for &v in &[tri.va, tri.vb, tri.vc] {
        let out = dcel[v].halfedge().unwrap();
        assert_eq!(dcel.origin(out), v);
        assert_eq!(dcel.outgoing_around(v).count(), 2);
    }
}

#[test]
fn remove_edge_undoes_each_insertion_kind() {
    let Tri { mut dcel, va, vb, vc, ab, bc, ca, inner } = triangle();
    let ub = dcel.unbounded_face();

    // Removing the closing edge merges the bounded face away.
    assert_eq!(dcel.remove_edge(ca), Some(inner));
    assert_eq!(dcel.num_faces(), 1);
    assert!(!dcel.contains_halfedge(ca));
    assert_eq!(dcel.cycle_len(ab), 4);
    dcel.check_invariants();

    // Removing the chain edge unthreads a dangling edge; C becomes
    // isolated.
    assert_eq!(dcel.remove_edge(bc), None);
    assert!(dcel.is_isolated(vc));
    assert_eq!(dcel.cycle_len(ab), 2);
    dcel.check_invariants();

    // Removing the last edge retires the whole hole component.
    assert_eq!(dcel.remove_edge(ab), None);
    assert!(dcel.is_isolated(va));
    assert!(dcel.is_isolated(vb));
    assert_eq!(dcel.num_edges(), 0);
    assert_eq!(dcel[ub].holes().len(), 0);
    dcel.check_invariants();
}

#[test]
fn remove_edge_reorients_automatically() {
    // Passing the unbounded-side halfedge must still delete the bounded
    // face, never the unbounded one.
    let Tri { mut dcel, ca, inner, .. } = triangle();
    let outer_side = dcel.twin(ca);

    assert_eq!(dcel.remove_edge(outer_side), Some(inner));
    assert!(dcel.contains_face(dcel.unbounded_face()));
    dcel.check_invariants();
}


// ===============================================================================================
// ===== Face split and component fusion
// ===============================================================================================

#[test]
fn diagonal_splits_a_bounded_face() {
    //    (D) ----- (C)
    //     |  \      |
    //     |    \    |
    //     |      \  |
    //    (A) ----- (B)
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));
    let c = dcel.add_vertex((1.0, 1.0));
    let d = dcel.add_vertex((0.0, 1.0));

    let ab = dcel.add_edge_disjoint(0, a, b, ub);
    let bc = dcel.add_edge_from_vertex(1, ab, c);
    let cd = dcel.add_edge_from_vertex(2, bc, d);
    let ba = dcel.twin(ab);
    let (da, quad) = dcel.add_edge_at_vertices(3, cd, ba);
    let quad = quad.expect("closing the square must create a face");
    assert_eq!(dcel.num_faces(), 2);
    assert_eq!(dcel.cycle_len(da), 4);
    dcel.check_invariants();

    // Insert the diagonal B–D inside the bounded face: it must split it.
    let (bd, right) = dcel.add_edge_at_vertices(4, ab, cd);
    let right = right.expect("a diagonal must split the face");
    assert_eq!(dcel.num_faces(), 3);
    dcel.check_invariants();

    // The returned halfedge bounds the new face, its twin the old one.
    assert_eq!(dcel.face_of(bd), right);
    assert_eq!(dcel.face_of(dcel.twin(bd)), quad);
    assert_eq!(dcel.cycle_len(bd), 3);
    assert_eq!(dcel.cycle_len(dcel.twin(bd)), 3);
    assert_eq!(dcel[right].outer(), Some(bd));

    // Removing the diagonal merges the two triangles back together.
    assert_eq!(dcel.remove_edge(bd), Some(right));
    assert_eq!(dcel.num_faces(), 2);
    assert_eq!(dcel.cycle_len(da), 4);
    assert_eq!(dcel.face_of(da), quad);
    dcel.check_invariants();
}

#[test]
fn connecting_two_components_fuses_their_cycles() {
    //    (A) --- (B)     (C) --- (D)
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));
    let c = dcel.add_vertex((2.0, 0.0));
    let d = dcel.add_vertex((3.0, 0.0));

    let ab = dcel.add_edge_disjoint(0, a, b, ub);
    let cd = dcel.add_edge_disjoint(1, c, d, ub);
    assert_eq!(dcel[ub].holes().len(), 2);
    dcel.check_invariants();

    // Connect B to C: the two hole cycles fuse, no face appears.
    let dc = dcel.twin(cd);
    let (bc, split) = dcel.add_edge_at_vertices(2, ab, dc);
    assert_eq!(split, None);
    assert_eq!(dcel.num_faces(), 1);
    assert_eq!(dcel[ub].holes().len(), 1);
    assert_eq!(dcel.cycle_len(ab), 6);
    dcel.check_invariants();

    // Removing the bridge splits the fused component again.
    assert_eq!(dcel.remove_edge(bc), None);
    assert_eq!(dcel[ub].holes().len(), 2);
    assert_eq!(dcel.cycle_len(ab), 2);
    assert_eq!(dcel.cycle_len(cd), 2);
    dcel.check_invariants();
}

#[test]
#[should_panic(expected = "bound different faces")]
fn edge_across_a_boundary_panics() {
    let Tri { mut dcel, ab, .. } = triangle();
    // `ab` bounds the inner face, its twin the unbounded one.
    let ba = dcel.twin(ab);
    dcel.add_edge_at_vertices(9, ab, ba);
}


// ===============================================================================================
// ===== Holes in bounded faces
// ===============================================================================================

#[test]
fn floating_edge_inside_a_bounded_face() {
    let Tri { mut dcel, inner, .. } = triangle();
    let ub = dcel.unbounded_face();

    // An edge floating inside the bounded face becomes a hole of it.
    let x = dcel.add_vertex((0.2, 0.2));
    let y = dcel.add_vertex((0.3, 0.3));
    let xy = dcel.add_edge_disjoint(5, x, y, inner);

    assert_eq!(dcel[inner].holes(), [xy]);
    assert_eq!(dcel.face_of(xy), inner);
    assert_eq!(dcel.face_of(dcel.twin(xy)), inner);
    dcel.check_invariants();

    // A construction layer may decide (geometrically) that the hole
    // belongs elsewhere and relocate it.
    dcel.move_hole(inner, ub, xy);
    assert!(dcel[inner].holes().is_empty());
    assert_eq!(dcel[ub].holes().len(), 2);
    assert_eq!(dcel.face_of(xy), ub);
    dcel.check_invariants();
}


// ===============================================================================================
// ===== Edge splitting
// ===============================================================================================

#[test]
fn split_a_lone_edge() {
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((2.0, 0.0));
    let ab = dcel.add_edge_disjoint(9, a, b, ub);

    let mid = dcel.split_edge(ab, (1.0, 0.0), 1, 2);

    assert_eq!(dcel.num_vertices(), 3);
    assert_eq!(dcel.num_edges(), 2);
    assert_eq!(dcel.num_faces(), 1);
    assert_eq!(*dcel.point_of(mid), (1.0, 0.0));

    // `ab` now ends at the midpoint; the far half carries the other curve.
    assert_eq!(dcel.origin(ab), a);
    assert_eq!(dcel.target(ab), mid);
    assert_eq!(*dcel.curve_of(dcel.edge_of(ab)), 1);
    let far = dcel.next(ab);
    assert_eq!(dcel.origin(far), mid);
    assert_eq!(dcel.target(far), b);
    assert_eq!(*dcel.curve_of(dcel.edge_of(far)), 2);

    assert_eq!(dcel.cycle_len(ab), 4);
    assert_eq!(dcel.outgoing_around(mid).count(), 2);
    dcel.check_invariants();
}

#[test]
fn split_a_triangle_edge() {
    let Tri { mut dcel, ab, inner, .. } = triangle();
    let ub = dcel.unbounded_face();

    let mid = dcel.split_edge(ab, (0.5, 0.0), 1, 2);

    // Both incident boundary cycles grew by one, no face changed.
    assert_eq!(dcel.num_faces(), 2);
    assert_eq!(dcel.cycle_len(ab), 4);
    assert_eq!(dcel.cycle_len(dcel.twin(ab)), 4);
    assert_eq!(dcel.face_of(ab), inner);
    assert_eq!(dcel.face_of(dcel.next(ab)), inner);
    assert_eq!(dcel.face_of(dcel.twin(ab)), ub);
    assert_eq!(dcel.outgoing_around(mid).count(), 2);
    dcel.check_invariants();
}


// ===============================================================================================
// ===== Stable identities
// ===============================================================================================

#[test]
fn handles_survive_unrelated_mutations() {
    let Tri { mut dcel, va, vb, bc, ca, inner, .. } = triangle();

    let vb_record_before = dcel[vb].clone();
    dcel.remove_edge(ca);

    // The removed face and pair are gone ...
    assert!(!dcel.contains_face(inner));
    assert!(!dcel.contains_halfedge(ca));

    // ... but everything else kept its identity and (where untouched by
    // the relinking) its record.
    assert!(dcel.contains_vertex(va));
    assert!(dcel.contains_halfedge(bc));
    assert_eq!(dcel[vb], vb_record_before);
    assert_eq!(dcel.origin(bc), vb);
}

#[test]
#[should_panic(expected = "no such halfedge exists")]
fn stale_halfedge_handle_panics() {
    let Tri { mut dcel, ca, .. } = triangle();
    dcel.remove_edge(ca);
    dcel.next(ca);
}

#[test]
#[should_panic(expected = "expected an isolated vertex")]
fn disjoint_edge_needs_isolated_endpoints() {
    let mut dcel = TopoDcel::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex((0.0, 0.0));
    let b = dcel.add_vertex((1.0, 0.0));
    let c = dcel.add_vertex((2.0, 0.0));
    dcel.add_edge_disjoint(0, a, b, ub);
    dcel.add_edge_disjoint(1, b, c, ub);
}


// ===============================================================================================
// ===== Extended elements at the container level
// ===============================================================================================

#[test]
fn face_payload_survives_duplication() {
    // Scenario: tag the bounded face of a triangle with `7`, duplicate,
    // and check that the copies are independent.
    type Arr = FaceExtendedDcel<CartesianTraits<f64>, i32>;

    let mut dcel = Arr::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex(Point2::new(0.0, 0.0));
    let b = dcel.add_vertex(Point2::new(1.0, 0.0));
    let c = dcel.add_vertex(Point2::new(0.0, 1.0));

    let pa = Point2::new(0.0, 0.0);
    let pb = Point2::new(1.0, 0.0);
    let pc = Point2::new(0.0, 1.0);
    let ab = dcel.add_edge_disjoint(Segment2::new(pa, pb), a, b, ub);
    let bc = dcel.add_edge_from_vertex(Segment2::new(pb, pc), ab, c);
    let ba = dcel.twin(ab);
    let (_, inner) = dcel.add_edge_at_vertices(Segment2::new(pc, pa), bc, ba);
    let inner = inner.unwrap();
    dcel.check_invariants();

    dcel[inner].set_data(7);
    assert_eq!(*dcel[inner].data(), 7);

    // Duplicating the whole container copies payloads by value.
    let mut copy = dcel.clone();
    assert_eq!(*copy[inner].data(), 7);
    copy[inner].set_data(13);
    assert_eq!(*dcel[inner].data(), 7);
    assert_eq!(*copy[inner].data(), 13);

    // Duplicating a single record via `assign` does too.
    let mut dup = Ext::<crate::elem::Face, i32>::default();
    dup.assign(&dcel[inner]);
    assert_eq!(*dup.data(), 7);
    assert_eq!(dup.outer(), dcel[inner].outer());
    dup.set_data(1);
    assert_eq!(*dcel[inner].data(), 7);
}

#[test]
fn payloads_on_all_element_kinds() {
    type Arr = ExtendedDcel<CartesianTraits<f32>, &'static str, u32, i64>;

    let mut dcel = Arr::new();
    let ub = dcel.unbounded_face();
    let a = dcel.add_vertex(Point2::new(0.0, 0.0));
    let b = dcel.add_vertex(Point2::new(1.0, 0.0));
    let he = dcel.add_edge_disjoint(
        Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
        a,
        b,
        ub,
    );
    dcel.check_invariants();

    // Freshly created elements carry default payloads.
    assert_eq!(*dcel[a].data(), "");
    assert_eq!(*dcel[he].data(), 0);
    assert_eq!(*dcel[ub].data(), 0);

    dcel[a].set_data("source");
    dcel[he].set_data(42);
    dcel[ub].set_data(-1);

    assert_eq!(*dcel[a].data(), "source");
    assert_eq!(*dcel[he].data(), 42);
    assert_eq!(*dcel[ub].data(), -1);

    // The twin is its own element with its own payload.
    let twin = dcel.twin(he);
    assert_eq!(*dcel[twin].data(), 0);

    // The payload does not interfere with topology.
    assert_eq!(dcel.origin(he), a);
    assert_eq!(dcel.next(he), twin);
}


// ===============================================================================================
// ===== Navigation refs
// ===============================================================================================

#[test]
fn refs_navigate_incidences() {
    let Tri { dcel, va, vb, ab, inner, .. } = triangle();

    let he = dcel.halfedge_ref(ab);
    assert_eq!(he.origin().handle(), va);
    assert_eq!(he.target().handle(), vb);
    assert_eq!(he.face().handle(), inner);
    assert_eq!(he.next().prev().handle(), ab);
    assert_eq!(he.twin().twin().handle(), ab);
    assert!(he.twin().face().is_unbounded());

    let v = dcel.vertex_ref(va);
    assert!(!v.is_isolated());
    assert_eq!(v.halfedge().unwrap().origin().handle(), va);
    assert_eq!(v.point(), Some(&(0.0, 0.0)));

    let f = dcel.face_ref(dcel.unbounded_face());
    assert!(f.is_unbounded());
    assert_eq!(f.holes().count(), 1);
    assert_eq!(f.holes().next().unwrap().face().handle(), f.handle());
}
