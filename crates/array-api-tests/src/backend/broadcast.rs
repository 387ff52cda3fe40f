//! Broadcasting utilities
//!
//! Shapes are aligned from the trailing dimension; two dimensions are
//! compatible when they are equal or one of them is 1.

use array_api::{ArrayApiError, Result};
use ndarray::{ArrayD, IxDyn, Zip};

/// Broadcast shape of two input shapes.
///
/// - `[3, 1] + [1, 4] → [3, 4]`
/// - `[3, 4] + [4] → [3, 4]`
/// - `[3, 4] + [2, 4] → Error (incompatible)`
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>> {
    let ndim_a = shape_a.len();
    let ndim_b = shape_b.len();
    let ndim_out = ndim_a.max(ndim_b);

    let mut result = vec![0; ndim_out];

    for i in 0..ndim_out {
        let dim_a = if i < ndim_a { shape_a[ndim_a - 1 - i] } else { 1 };
        let dim_b = if i < ndim_b { shape_b[ndim_b - 1 - i] } else { 1 };

        if dim_a == dim_b || dim_a == 1 || dim_b == 1 {
            result[ndim_out - 1 - i] = if dim_a == 1 { dim_b } else { dim_a };
        } else {
            return Err(ArrayApiError::IncompatibleShapes(
                shape_a.to_vec(),
                shape_b.to_vec(),
            ));
        }
    }

    Ok(result)
}

/// Materializes `arr` broadcast to `target_shape`.
pub fn broadcast_to(arr: &ArrayD<f64>, target_shape: &[usize]) -> Result<ArrayD<f64>> {
    if arr.shape() == target_shape {
        return Ok(arr.clone());
    }

    arr.broadcast(IxDyn(target_shape))
        .map(|view| view.to_owned())
        .ok_or_else(|| {
            ArrayApiError::IncompatibleShapes(arr.shape().to_vec(), target_shape.to_vec())
        })
}

/// Applies `op` elementwise after broadcasting `a` against `b`.
pub fn broadcast_binary_op<F>(a: &ArrayD<f64>, b: &ArrayD<f64>, op: F) -> Result<ArrayD<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    if a.shape() == b.shape() {
        return Ok(Zip::from(a).and(b).map_collect(|&x, &y| op(x, y)));
    }

    let output_shape = broadcast_shapes(a.shape(), b.shape())?;
    let incompatible = || ArrayApiError::IncompatibleShapes(a.shape().to_vec(), b.shape().to_vec());
    let a_view = a.broadcast(IxDyn(&output_shape)).ok_or_else(incompatible)?;
    let b_view = b.broadcast(IxDyn(&output_shape)).ok_or_else(incompatible)?;

    Ok(Zip::from(a_view).and(b_view).map_collect(|&x, &y| op(x, y)))
}
