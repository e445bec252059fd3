//! Iterators over adjacent elements: boundary cycles and vertex orbits.

use crate::{
    handle::HalfedgeHandle,
    traits::{FaceRecord, HalfedgeRecord, VertexRecord},
};
use super::Dcel;


/// Iterator over the halfedges of one boundary cycle, following `next`
/// links. Yields the start halfedge first and stops after the cycle closed.
///
/// Returned by [`Dcel::cycle`].
#[derive(Debug)]
pub struct CycleIter<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    dcel: &'a Dcel<V, H, F>,
    start: HalfedgeHandle,
    current: Option<HalfedgeHandle>,
}

impl<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> CycleIter<'a, V, H, F> {
    pub(super) fn new(dcel: &'a Dcel<V, H, F>, start: HalfedgeHandle) -> Self {
        Self {
            dcel,
            start,
            current: Some(start),
        }
    }
}

impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Iterator for CycleIter<'_, V, H, F> {
    type Item = HalfedgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        let succ = self.dcel.next_of(out);
        self.current = if succ == self.start { None } else { Some(succ) };
        Some(out)
    }
}


/// Iterator over the outgoing halfedges around one vertex, in rotation
/// order (each step hops to `next(twin(current))`). Empty for isolated
/// vertices.
///
/// Returned by [`Dcel::outgoing_around`].
#[derive(Debug)]
pub struct VertexCirculator<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> {
    dcel: &'a Dcel<V, H, F>,
    start: Option<HalfedgeHandle>,
    current: Option<HalfedgeHandle>,
}

impl<'a, V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> VertexCirculator<'a, V, H, F> {
    pub(super) fn new(dcel: &'a Dcel<V, H, F>, start: Option<HalfedgeHandle>) -> Self {
        Self {
            dcel,
            start,
            current: start,
        }
    }
}

impl<V: VertexRecord, H: HalfedgeRecord, F: FaceRecord> Iterator for VertexCirculator<'_, V, H, F> {
    type Item = HalfedgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        let succ = self.dcel.next_of(out.twin());
        self.current = if Some(succ) == self.start { None } else { Some(succ) };
        Some(out)
    }
}
