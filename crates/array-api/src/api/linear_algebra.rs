use super::namespace_of;
use crate::args::TensordotAxes;
use crate::protocol::ArrayRef;
use crate::Result;

pub fn matmul(x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.matmul(x1, x2)
}

pub fn matrix_transpose(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.matrix_transpose(x)
}

pub fn tensordot(x1: &ArrayRef, x2: &ArrayRef, axes: &TensordotAxes) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.tensordot(x1, x2, axes)
}

pub fn vecdot(x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.vecdot(x1, x2, axis)
}
