use super::{namespace_of, namespace_of_all};
use crate::args::Axes;
use crate::protocol::ArrayRef;
use crate::Result;

/// Joins `arrays` along `axis`, or flattened with `axis = None`.
pub fn concat(arrays: &[ArrayRef], axis: Option<isize>) -> Result<ArrayRef> {
    namespace_of_all(arrays)?.concat(arrays, axis)
}

pub fn expand_dims(x: &ArrayRef, axis: isize) -> Result<ArrayRef> {
    namespace_of(&[x])?.expand_dims(x, axis)
}

pub fn flip(x: &ArrayRef, axis: &Axes) -> Result<ArrayRef> {
    namespace_of(&[x])?.flip(x, axis)
}

pub fn permute_dims(x: &ArrayRef, axes: &[usize]) -> Result<ArrayRef> {
    namespace_of(&[x])?.permute_dims(x, axes)
}

pub fn reshape(x: &ArrayRef, shape: &[isize], copy: Option<bool>) -> Result<ArrayRef> {
    namespace_of(&[x])?.reshape(x, shape, copy)
}

pub fn roll(x: &ArrayRef, shift: &[isize], axis: &Axes) -> Result<ArrayRef> {
    namespace_of(&[x])?.roll(x, shift, axis)
}

pub fn squeeze(x: &ArrayRef, axis: &[isize]) -> Result<ArrayRef> {
    namespace_of(&[x])?.squeeze(x, axis)
}

/// Joins `arrays` along a new axis.
pub fn stack(arrays: &[ArrayRef], axis: isize) -> Result<ArrayRef> {
    namespace_of_all(arrays)?.stack(arrays, axis)
}
