//! Linear algebra for the test backend
//!
//! Matrix products are limited to one- and two-dimensional operands.

use super::array::NdArray;
use super::broadcast::broadcast_binary_op;
use super::creation::shape_error;
use super::data_type::{floating, promote};
use super::stats::reduce;
use super::{normalize_axis, NdNamespace};
use array_api::args::Axes;
use array_api::ops::{LinalgFunctions, LinearAlgebraFunctions};
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result};
use ndarray::{arr0, ArrayD, Axis, Dimension, Ix1, Ix2, IxDyn};

fn matrices_only(a: &NdArray, b: &NdArray) -> ArrayApiError {
    ArrayApiError::InvalidArgument(format!(
        "matmul supports one- and two-dimensional operands, got shapes {:?} and {:?}",
        a.dims(),
        b.dims()
    ))
}

fn matmul_data(a: &NdArray, b: &NdArray) -> Result<ArrayD<f64>> {
    let (da, db) = (a.dims(), b.dims());
    let inner_a = *da.last().ok_or_else(|| matrices_only(a, b))?;
    let inner_b = match db.len() {
        1 | 2 => db[0],
        _ => return Err(matrices_only(a, b)),
    };
    if inner_a != inner_b {
        return Err(ArrayApiError::IncompatibleShapes(da.to_vec(), db.to_vec()));
    }

    let va = a.as_ndarray().view();
    let vb = b.as_ndarray().view();
    let out = match (da.len(), db.len()) {
        (1, 1) => {
            let (x, y) = (
                va.into_dimensionality::<Ix1>().map_err(shape_error)?,
                vb.into_dimensionality::<Ix1>().map_err(shape_error)?,
            );
            arr0(x.dot(&y)).into_dyn()
        }
        (1, 2) => {
            let x = va.into_dimensionality::<Ix1>().map_err(shape_error)?;
            let y = vb.into_dimensionality::<Ix2>().map_err(shape_error)?;
            x.dot(&y).into_dyn()
        }
        (2, 1) => {
            let x = va.into_dimensionality::<Ix2>().map_err(shape_error)?;
            let y = vb.into_dimensionality::<Ix1>().map_err(shape_error)?;
            x.dot(&y).into_dyn()
        }
        (2, 2) => {
            let x = va.into_dimensionality::<Ix2>().map_err(shape_error)?;
            let y = vb.into_dimensionality::<Ix2>().map_err(shape_error)?;
            x.dot(&y).into_dyn()
        }
        _ => return Err(matrices_only(a, b)),
    };
    Ok(out)
}

fn transpose_data(arr: &NdArray) -> Result<ArrayD<f64>> {
    let ndim = arr.ndim();
    if ndim < 2 {
        return Err(ArrayApiError::InvalidArgument(format!(
            "matrix_transpose requires at least two dimensions, got {ndim}"
        )));
    }
    let mut data = arr.as_ndarray().clone();
    data.swap_axes(ndim - 2, ndim - 1);
    Ok(data)
}

/// Diagonal `offset` of every matrix in `arr`, batch dimensions first.
fn diagonal_data(arr: &NdArray, offset: isize) -> Result<ArrayD<f64>> {
    let ndim = arr.ndim();
    if ndim < 2 {
        return Err(ArrayApiError::InvalidArgument(format!(
            "diagonal requires at least two dimensions, got {ndim}"
        )));
    }
    let dims = arr.dims();
    let (rows, cols) = (dims[ndim - 2] as isize, dims[ndim - 1] as isize);
    let (row0, col0) = if offset >= 0 { (0, offset) } else { (-offset, 0) };
    let len = (rows - row0).min(cols - col0).max(0) as usize;

    let batch = &dims[..ndim - 2];
    let mut values = Vec::with_capacity(batch.iter().product::<usize>() * len);
    for index in ndarray::indices(IxDyn(batch)) {
        let mut at: Vec<usize> = index.slice().to_vec();
        at.extend([0, 0]);
        for i in 0..len {
            at[ndim - 2] = row0 as usize + i;
            at[ndim - 1] = col0 as usize + i;
            values.push(arr.as_ndarray()[IxDyn(&at)]);
        }
    }
    let mut shape = batch.to_vec();
    shape.push(len);
    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(shape_error)
}

impl LinearAlgebraFunctions for NdNamespace {
    fn matmul(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        let (a, b) = (self.local(x1)?, self.local(x2)?);
        let dtype = promote(a.dtype_tag(), b.dtype_tag())?;
        Ok(self.wrap(matmul_data(a, b)?, dtype))
    }

    fn matrix_transpose(&self, x: &ArrayRef) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        Ok(self.wrap(transpose_data(arr)?, arr.dtype_tag()))
    }

    fn vecdot(&self, x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        let (a, b) = (self.local(x1)?, self.local(x2)?);
        let dtype = promote(a.dtype_tag(), b.dtype_tag())?;
        let products = broadcast_binary_op(a.as_ndarray(), b.as_ndarray(), |x, y| x * y)?;
        let axis = normalize_axis(axis, products.ndim())?;
        let along = |arr: &NdArray| {
            let ndim = arr.ndim() as isize;
            let local = axis as isize - (products.ndim() as isize - ndim);
            usize::try_from(local).ok().map(|i| arr.dims()[i])
        };
        if along(a) != along(b) {
            return Err(ArrayApiError::IncompatibleShapes(
                a.dims().to_vec(),
                b.dims().to_vec(),
            ));
        }
        Ok(self.wrap(products.sum_axis(Axis(axis)), dtype))
    }
}

impl LinalgFunctions for NdNamespace {
    fn diagonal(&self, x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        Ok(self.wrap(diagonal_data(arr, offset)?, arr.dtype_tag()))
    }

    fn matmul(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        LinearAlgebraFunctions::matmul(self, x1, x2)
    }

    fn matrix_transpose(&self, x: &ArrayRef) -> Result<ArrayRef> {
        LinearAlgebraFunctions::matrix_transpose(self, x)
    }

    fn outer(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        let (a, b) = (self.local(x1)?, self.local(x2)?);
        if a.ndim() != 1 || b.ndim() != 1 {
            return Err(ArrayApiError::InvalidArgument(
                "outer requires one-dimensional operands".into(),
            ));
        }
        let column = a
            .as_ndarray()
            .view()
            .into_shape_with_order(IxDyn(&[a.dims()[0], 1]))
            .map_err(shape_error)?;
        let data = broadcast_binary_op(&column.to_owned(), b.as_ndarray(), |x, y| x * y)?;
        Ok(self.wrap(data, promote(a.dtype_tag(), b.dtype_tag())?))
    }

    fn trace(&self, x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let diagonal = diagonal_data(arr, offset)?;
        let last = Axis(diagonal.ndim() - 1);
        Ok(self.wrap(diagonal.sum_axis(last), arr.dtype_tag()))
    }

    fn vecdot(&self, x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        LinearAlgebraFunctions::vecdot(self, x1, x2, axis)
    }

    fn vector_norm(&self, x: &ArrayRef, axis: &Axes, keepdims: bool, ord: f64) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let data = reduce(arr, axis, keepdims, "vector_norm", |lane| {
            let magnitudes = lane.iter().map(|v| v.abs());
            Some(if ord == f64::INFINITY {
                magnitudes.fold(0.0, f64::max)
            } else if ord == f64::NEG_INFINITY {
                magnitudes.fold(f64::INFINITY, f64::min)
            } else if ord == 0.0 {
                magnitudes.filter(|&v| v != 0.0).count() as f64
            } else {
                magnitudes.map(|v| v.powf(ord)).sum::<f64>().powf(ord.recip())
            })
        })?;
        Ok(self.wrap(data, floating(arr.dtype_tag())))
    }
}
