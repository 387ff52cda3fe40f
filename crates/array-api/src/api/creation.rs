use super::{namespace_of, namespace_of_all};
use crate::args::{CreationOptions, Indexing};
use crate::protocol::ArrayRef;
use crate::Result;

/// Uninitialized array with the shape of `x`.
pub fn empty_like(x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.empty_like(x, opts)
}

/// Array with the shape of `x` filled with `fill_value`.
pub fn full_like(x: &ArrayRef, fill_value: f64, opts: &CreationOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.full_like(x, fill_value, opts)
}

/// Coordinate matrices from one-dimensional coordinate vectors.
pub fn meshgrid(arrays: &[ArrayRef], indexing: Indexing) -> Result<Vec<ArrayRef>> {
    namespace_of_all(arrays)?.meshgrid(arrays, indexing)
}

pub fn ones_like(x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.ones_like(x, opts)
}

pub fn tril(x: &ArrayRef, k: isize) -> Result<ArrayRef> {
    namespace_of(&[x])?.tril(x, k)
}

pub fn triu(x: &ArrayRef, k: isize) -> Result<ArrayRef> {
    namespace_of(&[x])?.triu(x, k)
}

pub fn zeros_like(x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.zeros_like(x, opts)
}
