//! Reexports of all important traits of this library for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use planar::prelude::*;
//! ```
//!
//! Now you have all important traits in scope.

pub use crate::{
    handle::Handle,
    traits::{FaceRecord, GeomTraits, HalfedgeRecord, Rebind, VertexRecord},
};

// This is just for internal convenience: types that are used all the time.
pub(crate) use crate::handle::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle};
