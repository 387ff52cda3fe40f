//! Forwarding for the `linalg` extension
//!
//! A namespace that does not provide the extension fails every call here
//! with [`ArrayApiError::Unsupported`](crate::ArrayApiError::Unsupported)
//! naming `linalg`.

use super::namespace_of;
use crate::args::{Axes, MatrixNormOrd, QrMode, TensordotAxes, Tolerance};
use crate::namespace::Namespace;
use crate::protocol::ArrayRef;
use crate::Result;

pub fn cholesky(x: &ArrayRef, upper: bool) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.cholesky(x, upper)
}

pub fn cross(x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.cross(x1, x2, axis)
}

pub fn det(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.det(x)
}

pub fn diagonal(x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.diagonal(x, offset)
}

/// Eigenvalues and eigenvectors of a symmetric matrix.
pub fn eigh(x: &ArrayRef) -> Result<(ArrayRef, ArrayRef)> {
    namespace_of(&[x])?.linalg()?.eigh(x)
}

pub fn eigvalsh(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.eigvalsh(x)
}

pub fn inv(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.inv(x)
}

pub fn matmul(x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.matmul(x1, x2)
}

pub fn matrix_norm(x: &ArrayRef, keepdims: bool, ord: MatrixNormOrd) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.matrix_norm(x, keepdims, ord)
}

pub fn matrix_power(x: &ArrayRef, n: i64) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.matrix_power(x, n)
}

pub fn matrix_rank(x: &ArrayRef, rtol: Option<&Tolerance>) -> Result<ArrayRef> {
    with_tolerance(x, rtol)?.linalg()?.matrix_rank(x, rtol)
}

pub fn matrix_transpose(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.matrix_transpose(x)
}

pub fn outer(x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.outer(x1, x2)
}

pub fn pinv(x: &ArrayRef, rtol: Option<&Tolerance>) -> Result<ArrayRef> {
    with_tolerance(x, rtol)?.linalg()?.pinv(x, rtol)
}

pub fn qr(x: &ArrayRef, mode: QrMode) -> Result<(ArrayRef, ArrayRef)> {
    namespace_of(&[x])?.linalg()?.qr(x, mode)
}

pub fn slogdet(x: &ArrayRef) -> Result<(ArrayRef, ArrayRef)> {
    namespace_of(&[x])?.linalg()?.slogdet(x)
}

pub fn solve(x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.solve(x1, x2)
}

pub fn svd(x: &ArrayRef, full_matrices: bool) -> Result<(ArrayRef, ArrayRef, ArrayRef)> {
    namespace_of(&[x])?.linalg()?.svd(x, full_matrices)
}

pub fn svdvals(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.svdvals(x)
}

pub fn tensordot(x1: &ArrayRef, x2: &ArrayRef, axes: &TensordotAxes) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.tensordot(x1, x2, axes)
}

pub fn trace(x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.trace(x, offset)
}

pub fn vecdot(x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
    namespace_of(&[x1, x2])?.linalg()?.vecdot(x1, x2, axis)
}

pub fn vector_norm(x: &ArrayRef, axis: &Axes, keepdims: bool, ord: f64) -> Result<ArrayRef> {
    namespace_of(&[x])?.linalg()?.vector_norm(x, axis, keepdims, ord)
}

/// An array tolerance takes part in resolution alongside `x`.
fn with_tolerance(x: &ArrayRef, rtol: Option<&Tolerance>) -> Result<Namespace> {
    match rtol {
        Some(Tolerance::Array(tol)) => namespace_of(&[x, tol]),
        _ => namespace_of(&[x]),
    }
}
