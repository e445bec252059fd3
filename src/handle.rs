//! Everything about handles (aka indices into a planar subdivision).
//!
//! All elements of a [`Dcel`][crate::Dcel] live in arenas owned by the
//! container and are referred to by *handles*. A handle is just a small
//! integer wrapper; it carries no reference to the container it came from.
//! This means that a handle on its own cannot answer anything about the
//! element it denotes; you always have to go through the container. In
//! exchange, cross-references between elements never own each other, so the
//! twin/next/prev/face web of a subdivision cannot form ownership cycles.

use std::fmt;


/// The integer type used in handles to index elements.
///
/// The default is `u32` which is sufficient for subdivisions with up to
/// about 4 billion elements of one kind. If you need more, enable the
/// `large-handle` feature to use `u64` instead (this doubles the memory
/// used for storing handles).
#[allow(non_camel_case_types)]
#[cfg(not(feature = "large-handle"))]
pub type hsize = u32;

/// The integer type used in handles to index elements (`large-handle` is
/// enabled, so this is `u64`).
#[allow(non_camel_case_types)]
#[cfg(feature = "large-handle")]
pub type hsize = u64;


/// Types that can be used as a handle to an element of a planar
/// subdivision.
///
/// A handle type is just a wrapper around a simple integer of type
/// [`hsize`]. The `idx` value `hsize::max_value()` is reserved: it serves
/// as the "none" sentinel when a handle is stored inside an
/// [`optional::Optioned`], so a valid element never has that index.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + std::hash::Hash {
    /// Creates a new handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function either
    /// panics or returns a nonsensical handle.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw as u64 <= hsize::max_value() as u64,
            "handle index overflow: {} cannot be represented by `hsize`",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as a `usize` directly from a handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

/// Generates a handle type. The `Debug` output is the given short prefix
/// followed by the index, e.g. `V12`.
macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::max_value())
            }
        }

        impl optional::OptEq for $name {
            #[inline(always)]
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.0)
            }
        }
    }
}

make_handle_type!{
    /// A handle referring to a vertex.
    VertexHandle = "V";
}
make_handle_type!{
    /// A handle referring to a halfedge: one directed half of an edge.
    ///
    /// The two halfedges of one edge are *twins* of each other. The
    /// container stores twins next to one another, so the two handles of
    /// one edge always have the indices `2k` and `2k + 1`.
    HalfedgeHandle = "HE";
}
make_handle_type!{
    /// A handle referring to a full (undirected) edge, i.e. a twin pair of
    /// halfedges.
    EdgeHandle = "E";
}
make_handle_type!{
    /// A handle referring to a face.
    FaceHandle = "F";
}
