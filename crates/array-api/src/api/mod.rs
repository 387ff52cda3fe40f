//! Forwarding functions
//!
//! One function per operation that takes at least one array. Each finds the
//! namespace owning its array arguments and calls the identically named
//! method on it, returning the result unchanged. Creation functions that take
//! no array (`zeros`, `arange`, ...) cannot pick a namespace and are called
//! on a [`Namespace`] directly.

mod creation;
mod data_type;
mod elementwise;
mod linear_algebra;
pub mod linalg;
mod manipulation;
mod searching;
mod set;
mod sorting;
mod statistical;
mod utility;

pub use creation::*;
pub use data_type::*;
pub use elementwise::*;
pub use linear_algebra::*;
pub use manipulation::*;
pub use searching::*;
pub use set::*;
pub use sorting::*;
pub use statistical::*;
pub use utility::*;

use crate::namespace::Namespace;
use crate::protocol::{ArrayRef, Candidate};
use crate::resolve::get_namespace;
use crate::Result;

/// Namespace of a fixed set of array arguments.
fn namespace_of(arrays: &[&ArrayRef]) -> Result<Namespace> {
    get_namespace(arrays.iter().map(|x| &***x as &dyn Candidate))
}

/// Namespace of a variadic array argument.
fn namespace_of_all(arrays: &[ArrayRef]) -> Result<Namespace> {
    get_namespace(arrays.iter().map(|x| &**x as &dyn Candidate))
}
