//! Shape manipulation for the test backend

use super::creation::shape_error;
use super::data_type::promote;
use super::{normalize_axis, NdArray, NdNamespace};
use array_api::args::Axes;
use array_api::ops::ManipulationFunctions;
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result, StandardDType};
use ndarray::{concatenate, stack, ArrayD, ArrayViewD, Axis, IxDyn, Slice};

impl NdNamespace {
    fn locals<'a>(&self, arrays: &'a [ArrayRef]) -> Result<Vec<&'a NdArray>> {
        if arrays.is_empty() {
            return Err(ArrayApiError::InvalidArgument(
                "at least one array is required".into(),
            ));
        }
        arrays.iter().map(|x| self.local(x)).collect()
    }
}

fn common_dtype(arrays: &[&NdArray]) -> Result<StandardDType> {
    arrays
        .iter()
        .map(|arr| arr.dtype_tag())
        .try_fold(arrays[0].dtype_tag(), promote)
}

fn resolve_axes(axes: &Axes, ndim: usize) -> Result<Vec<usize>> {
    axes.resolve(ndim)
        .map_err(|axis| ArrayApiError::InvalidAxis { axis, ndim })
}

fn incompatible(arrays: &[&NdArray]) -> ArrayApiError {
    let first = arrays[0].dims().to_vec();
    let other = arrays
        .iter()
        .map(|arr| arr.dims().to_vec())
        .find(|dims| *dims != first)
        .unwrap_or_default();
    ArrayApiError::IncompatibleShapes(first, other)
}

impl ManipulationFunctions for NdNamespace {
    fn concat(&self, arrays: &[ArrayRef], axis: Option<isize>) -> Result<ArrayRef> {
        let locals = self.locals(arrays)?;
        let dtype = common_dtype(&locals)?;
        let data = match axis {
            None => {
                let values: Vec<f64> = locals.iter().flat_map(|arr| arr.to_vec()).collect();
                ArrayD::from_shape_vec(IxDyn(&[values.len()]), values).map_err(shape_error)?
            }
            Some(axis) => {
                let axis = normalize_axis(axis, locals[0].ndim())?;
                let views: Vec<ArrayViewD<f64>> =
                    locals.iter().map(|arr| arr.as_ndarray().view()).collect();
                concatenate(Axis(axis), &views).map_err(|_| incompatible(&locals))?
            }
        };
        Ok(self.wrap(data, dtype))
    }

    fn expand_dims(&self, x: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let axis = normalize_axis(axis, arr.ndim() + 1)?;
        let data = arr.as_ndarray().clone().insert_axis(Axis(axis));
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn flip(&self, x: &ArrayRef, axis: &Axes) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let mut data = arr.as_ndarray().clone();
        for axis in resolve_axes(axis, arr.ndim())? {
            data.invert_axis(Axis(axis));
        }
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn permute_dims(&self, x: &ArrayRef, axes: &[usize]) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let mut seen = vec![false; arr.ndim()];
        let valid = axes.len() == arr.ndim()
            && axes
                .iter()
                .all(|&a| a < seen.len() && !std::mem::replace(&mut seen[a], true));
        if !valid {
            return Err(ArrayApiError::InvalidArgument(format!(
                "{axes:?} is not a permutation of the axes of an array with {} dimensions",
                arr.ndim()
            )));
        }
        let data = arr.as_ndarray().clone().permuted_axes(IxDyn(axes));
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn reshape(&self, x: &ArrayRef, shape: &[isize], copy: Option<bool>) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        if copy == Some(false) {
            return Err(ArrayApiError::InvalidArgument(
                "reshape without copying is not supported".into(),
            ));
        }
        let size = arr.as_ndarray().len();
        let inferred: Vec<usize> = (0..shape.len()).filter(|&i| shape[i] == -1).collect();
        if inferred.len() > 1 || shape.iter().any(|&d| d < -1) {
            return Err(ArrayApiError::InvalidArgument(format!("invalid shape {shape:?}")));
        }
        let known: usize = shape.iter().filter(|&&d| d >= 0).map(|&d| d as usize).product();
        let mut target: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
        if let Some(&i) = inferred.first() {
            if known == 0 || size % known != 0 {
                return Err(ArrayApiError::InvalidArgument(format!(
                    "cannot reshape array of size {size} into shape {shape:?}"
                )));
            }
            target[i] = size / known;
        }
        let data = ArrayD::from_shape_vec(IxDyn(&target), arr.to_vec()).map_err(|_| {
            ArrayApiError::InvalidArgument(format!(
                "cannot reshape array of size {size} into shape {shape:?}"
            ))
        })?;
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn roll(&self, x: &ArrayRef, shift: &[isize], axis: &Axes) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let dtype = arr.dtype_tag();

        if *axis == Axes::All {
            let [shift] = shift else {
                return Err(ArrayApiError::InvalidArgument(
                    "roll over the flattened array takes a single shift".into(),
                ));
            };
            let mut values = arr.to_vec();
            if !values.is_empty() {
                let n = values.len() as isize;
                values.rotate_right(shift.rem_euclid(n) as usize);
            }
            let data = ArrayD::from_shape_vec(IxDyn(arr.dims()), values).map_err(shape_error)?;
            return Ok(self.wrap(data, dtype));
        }

        let axes = resolve_axes(axis, arr.ndim())?;
        let shifts: Vec<isize> = match shift {
            [s] => vec![*s; axes.len()],
            many if many.len() == axes.len() => many.to_vec(),
            _ => {
                return Err(ArrayApiError::InvalidArgument(format!(
                    "roll got {} shifts for {} axes",
                    shift.len(),
                    axes.len()
                )))
            }
        };
        let mut data = arr.as_ndarray().clone();
        for (axis, shift) in axes.into_iter().zip(shifts) {
            let n = data.len_of(Axis(axis)) as isize;
            if n == 0 {
                continue;
            }
            let split = n - shift.rem_euclid(n);
            let (head, tail) = (
                data.slice_axis(Axis(axis), Slice::from(split..)),
                data.slice_axis(Axis(axis), Slice::from(..split)),
            );
            data = concatenate(Axis(axis), &[head, tail]).map_err(shape_error)?;
        }
        Ok(self.wrap(data, dtype))
    }

    fn squeeze(&self, x: &ArrayRef, axis: &[isize]) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let mut axes = resolve_axes(&Axes::Axes(axis.to_vec()), arr.ndim())?;
        if let Some(&bad) = axes.iter().find(|&&a| arr.dims()[a] != 1) {
            return Err(ArrayApiError::InvalidArgument(format!(
                "cannot squeeze axis {bad} of size {}",
                arr.dims()[bad]
            )));
        }
        axes.sort_unstable_by(|a, b| b.cmp(a));
        axes.dedup();
        let mut data = arr.as_ndarray().clone();
        for axis in axes {
            data = data.remove_axis(Axis(axis));
        }
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn stack(&self, arrays: &[ArrayRef], axis: isize) -> Result<ArrayRef> {
        let locals = self.locals(arrays)?;
        let dtype = common_dtype(&locals)?;
        let axis = normalize_axis(axis, locals[0].ndim() + 1)?;
        let views: Vec<ArrayViewD<f64>> = locals.iter().map(|arr| arr.as_ndarray().view()).collect();
        let data = stack(Axis(axis), &views).map_err(|_| incompatible(&locals))?;
        Ok(self.wrap(data, dtype))
    }
}
