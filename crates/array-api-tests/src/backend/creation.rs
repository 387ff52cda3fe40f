//! Array creation for the test backend

use super::{NdDevice, NdNamespace};
use array_api::args::{AsArrayInput, CreationOptions, Indexing};
use array_api::ops::CreationFunctions;
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Device, Result, StandardDType};
use ndarray::{Array2, ArrayD, IxDyn};
use std::sync::Arc;

impl NdNamespace {
    /// Data type requested by `opts`, or `default`. Rejects foreign devices.
    fn creation_dtype(&self, opts: &CreationOptions, default: StandardDType) -> Result<StandardDType> {
        if let Some(device) = &opts.device {
            let device: &dyn Device = &**device;
            if !device.device_eq(&NdDevice::Cpu) {
                return Err(ArrayApiError::InvalidArgument(format!(
                    "unsupported device {device:?}"
                )));
            }
        }
        match &opts.dtype {
            Some(dtype) => self.standard_dtype(dtype),
            None => Ok(default),
        }
    }

    fn filled(&self, shape: &[usize], value: f64, opts: &CreationOptions) -> Result<ArrayRef> {
        let dtype = self.creation_dtype(opts, StandardDType::Float64)?;
        Ok(self.wrap(ArrayD::from_elem(IxDyn(shape), value), dtype))
    }

    fn filled_like(&self, x: &ArrayRef, value: f64, opts: &CreationOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let dtype = self.creation_dtype(opts, arr.dtype_tag())?;
        Ok(self.wrap(ArrayD::from_elem(IxDyn(arr.dims()), value), dtype))
    }

    /// Keeps the lower (`lower = true`) or upper triangle relative to the
    /// `k`th diagonal of every matrix in `x`.
    fn triangle(&self, x: &ArrayRef, k: isize, lower: bool) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        if arr.ndim() < 2 {
            return Err(ArrayApiError::InvalidArgument(
                "triangle extraction requires at least two dimensions".into(),
            ));
        }
        let ndim = arr.ndim();
        let mut data = arr.as_ndarray().clone();
        for (index, value) in data.indexed_iter_mut() {
            let (row, col) = (index[ndim - 2] as isize, index[ndim - 1] as isize);
            let keep = if lower { col - row <= k } else { col - row >= k };
            if !keep {
                *value = 0.0;
            }
        }
        Ok(self.wrap(data, arr.dtype_tag()))
    }
}

/// Flattens nested `asarray` input, checking that it is rectangular.
fn flatten_input(
    input: &AsArrayInput,
    depth: usize,
    shape: &mut Vec<usize>,
    values: &mut Vec<f64>,
    dtype: &mut StandardDType,
) -> Result<()> {
    let ragged = || ArrayApiError::InvalidArgument("nested sequences must be rectangular".into());
    match input {
        AsArrayInput::Nested(items) => {
            match shape.get(depth) {
                Some(&len) if len != items.len() => return Err(ragged()),
                Some(_) => {}
                None if shape.len() == depth && values.is_empty() => shape.push(items.len()),
                None => return Err(ragged()),
            }
            for item in items {
                flatten_input(item, depth + 1, shape, values, dtype)?;
            }
        }
        AsArrayInput::Array(_) => {
            return Err(ArrayApiError::InvalidArgument(
                "arrays cannot be nested inside sequences".into(),
            ))
        }
        AsArrayInput::Bool(b) => {
            push_scalar(*b as u8 as f64, StandardDType::Bool, depth, shape, values, dtype)?
        }
        AsArrayInput::Int(i) => {
            push_scalar(*i as f64, StandardDType::Int64, depth, shape, values, dtype)?
        }
        AsArrayInput::Float(f) => {
            push_scalar(*f, StandardDType::Float64, depth, shape, values, dtype)?
        }
    }
    Ok(())
}

fn push_scalar(
    value: f64,
    kind: StandardDType,
    depth: usize,
    shape: &[usize],
    values: &mut Vec<f64>,
    dtype: &mut StandardDType,
) -> Result<()> {
    if shape.len() != depth {
        return Err(ArrayApiError::InvalidArgument(
            "nested sequences must be rectangular".into(),
        ));
    }
    *dtype = if values.is_empty() {
        kind
    } else if dtype.is_floating() || kind.is_floating() {
        StandardDType::Float64
    } else if dtype.is_integral() || kind.is_integral() {
        StandardDType::Int64
    } else {
        StandardDType::Bool
    };
    values.push(value);
    Ok(())
}

impl CreationFunctions for NdNamespace {
    fn arange(
        &self,
        start: f64,
        stop: Option<f64>,
        step: f64,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        if step == 0.0 {
            return Err(ArrayApiError::InvalidArgument("arange step must be nonzero".into()));
        }
        let (start, stop) = match stop {
            Some(stop) => (start, stop),
            None => (0.0, start),
        };
        let len = ((stop - start) / step).ceil().max(0.0) as usize;
        let values: Vec<f64> = (0..len).map(|i| start + i as f64 * step).collect();
        let dtype = self.creation_dtype(opts, StandardDType::Float64)?;
        Ok(self.wrap(ArrayD::from_shape_vec(IxDyn(&[len]), values).map_err(shape_error)?, dtype))
    }

    fn asarray(
        &self,
        obj: &AsArrayInput,
        opts: &CreationOptions,
        copy: Option<bool>,
    ) -> Result<ArrayRef> {
        if let AsArrayInput::Array(x) = obj {
            let arr = self.local(x)?;
            let dtype = self.creation_dtype(opts, arr.dtype_tag())?;
            if dtype != arr.dtype_tag() && copy == Some(false) {
                return Err(ArrayApiError::InvalidArgument(
                    "conversion to a new data type requires a copy".into(),
                ));
            }
            if dtype == arr.dtype_tag() && copy != Some(true) {
                return Ok(Arc::clone(x));
            }
            return Ok(self.wrap(arr.as_ndarray().clone(), dtype));
        }

        let (mut shape, mut values) = (Vec::new(), Vec::new());
        let mut inferred = StandardDType::Bool;
        flatten_input(obj, 0, &mut shape, &mut values, &mut inferred)?;
        if values.is_empty() {
            inferred = StandardDType::Float64;
        }
        let dtype = self.creation_dtype(opts, inferred)?;
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(shape_error)?;
        Ok(self.wrap(data, dtype))
    }

    fn empty(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled(shape, 0.0, opts)
    }

    fn empty_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled_like(x, 0.0, opts)
    }

    fn eye(
        &self,
        n_rows: usize,
        n_cols: Option<usize>,
        k: isize,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        let n_cols = n_cols.unwrap_or(n_rows);
        let dtype = self.creation_dtype(opts, StandardDType::Float64)?;
        let data = Array2::from_shape_fn((n_rows, n_cols), |(i, j)| {
            if j as isize - i as isize == k { 1.0 } else { 0.0 }
        });
        Ok(self.wrap(data.into_dyn(), dtype))
    }

    fn full(&self, shape: &[usize], fill_value: f64, opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled(shape, fill_value, opts)
    }

    fn full_like(
        &self,
        x: &ArrayRef,
        fill_value: f64,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        self.filled_like(x, fill_value, opts)
    }

    fn linspace(
        &self,
        start: f64,
        stop: f64,
        num: usize,
        endpoint: bool,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        let divisions = if endpoint { num.saturating_sub(1) } else { num };
        let step = if divisions == 0 { 0.0 } else { (stop - start) / divisions as f64 };
        let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
        if endpoint && num > 1 {
            values[num - 1] = stop;
        }
        let dtype = self.creation_dtype(opts, StandardDType::Float64)?;
        Ok(self.wrap(ArrayD::from_shape_vec(IxDyn(&[num]), values).map_err(shape_error)?, dtype))
    }

    fn meshgrid(&self, arrays: &[ArrayRef], indexing: Indexing) -> Result<Vec<ArrayRef>> {
        let locals = arrays
            .iter()
            .map(|x| self.local(x))
            .collect::<Result<Vec<_>>>()?;
        if let Some(arr) = locals.iter().find(|arr| arr.ndim() != 1) {
            return Err(ArrayApiError::InvalidArgument(format!(
                "meshgrid inputs must be one-dimensional, got shape {:?}",
                arr.dims()
            )));
        }

        let mut shape: Vec<usize> = locals.iter().map(|arr| arr.dims()[0]).collect();
        if indexing == Indexing::Xy && shape.len() >= 2 {
            shape.swap(0, 1);
        }
        let dtype = locals
            .iter()
            .map(|arr| arr.dtype_tag())
            .try_fold(None, |acc: Option<StandardDType>, dtype| match acc {
                Some(acc) => super::data_type::promote(acc, dtype).map(Some),
                None => Ok(Some(dtype)),
            })?
            .unwrap_or(StandardDType::Float64);

        locals
            .iter()
            .enumerate()
            .map(|(i, arr)| {
                let axis = match (indexing, i) {
                    (Indexing::Xy, 0) if shape.len() >= 2 => 1,
                    (Indexing::Xy, 1) => 0,
                    _ => i,
                };
                let mut view_shape = vec![1; shape.len()];
                view_shape[axis] = shape[axis];
                let column = arr
                    .as_ndarray()
                    .view()
                    .into_shape_with_order(IxDyn(&view_shape))
                    .map_err(shape_error)?;
                let grid = column
                    .broadcast(IxDyn(&shape))
                    .ok_or_else(|| {
                        ArrayApiError::IncompatibleShapes(view_shape.clone(), shape.clone())
                    })?
                    .to_owned();
                Ok(self.wrap(grid, dtype))
            })
            .collect()
    }

    fn ones(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled(shape, 1.0, opts)
    }

    fn ones_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled_like(x, 1.0, opts)
    }

    fn tril(&self, x: &ArrayRef, k: isize) -> Result<ArrayRef> {
        self.triangle(x, k, true)
    }

    fn triu(&self, x: &ArrayRef, k: isize) -> Result<ArrayRef> {
        self.triangle(x, k, false)
    }

    fn zeros(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled(shape, 0.0, opts)
    }

    fn zeros_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        self.filled_like(x, 0.0, opts)
    }
}

pub(crate) fn shape_error(err: ndarray::ShapeError) -> ArrayApiError {
    ArrayApiError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdArray;

    fn ns() -> NdNamespace {
        NdNamespace::new("nd")
    }

    fn values(x: &ArrayRef) -> (Vec<usize>, Vec<f64>) {
        let arr = x.as_any().downcast_ref::<NdArray>().unwrap();
        (arr.dims().to_vec(), arr.to_vec())
    }

    // ============ arange / linspace ============

    #[test]
    fn test_arange() {
        let x = ns().arange(1.0, Some(2.0), 0.25, &Default::default()).unwrap();
        assert_eq!(values(&x), (vec![4], vec![1.0, 1.25, 1.5, 1.75]));

        let y = ns().arange(3.0, None, 1.0, &Default::default()).unwrap();
        assert_eq!(values(&y), (vec![3], vec![0.0, 1.0, 2.0]));
    }

    #[test]
    fn test_arange_zero_step() {
        assert!(ns().arange(0.0, Some(1.0), 0.0, &Default::default()).is_err());
    }

    #[test]
    fn test_linspace() {
        let x = ns().linspace(0.0, 1.0, 5, true, &Default::default()).unwrap();
        assert_eq!(values(&x).1, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let y = ns().linspace(0.0, 1.0, 4, false, &Default::default()).unwrap();
        assert_eq!(values(&y).1, vec![0.0, 0.25, 0.5, 0.75]);
    }

    // ============ asarray ============

    #[test]
    fn test_asarray_nested() {
        let obj = AsArrayInput::Nested(vec![vec![1.0, 2.0].into(), vec![3.0, 4.0].into()]);
        let x = ns().asarray(&obj, &Default::default(), None).unwrap();
        assert_eq!(values(&x), (vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_asarray_ragged() {
        let obj = AsArrayInput::Nested(vec![vec![1.0, 2.0].into(), vec![3.0].into()]);
        assert!(ns().asarray(&obj, &Default::default(), None).is_err());
    }

    #[test]
    fn test_asarray_infers_integer_dtype() {
        let obj = AsArrayInput::Nested(vec![AsArrayInput::Int(1), AsArrayInput::Int(2)]);
        let x = ns().asarray(&obj, &Default::default(), None).unwrap();
        let arr = x.as_any().downcast_ref::<NdArray>().unwrap();
        assert_eq!(arr.dtype_tag(), StandardDType::Int64);
    }

    #[test]
    fn test_asarray_returns_same_array_without_copy() {
        let ns = ns();
        let x = ns.from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let y = ns.asarray(&AsArrayInput::Array(x.clone()), &Default::default(), None).unwrap();
        assert!(Arc::ptr_eq(&x, &y));

        let z = ns
            .asarray(&AsArrayInput::Array(x.clone()), &Default::default(), Some(true))
            .unwrap();
        assert!(!Arc::ptr_eq(&x, &z));
    }

    // ============ eye / triangles ============

    #[test]
    fn test_eye_offset() {
        let x = ns().eye(2, Some(3), 1, &Default::default()).unwrap();
        assert_eq!(values(&x), (vec![2, 3], vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_tril_triu() {
        let ns = ns();
        let x = ns.from_vec((1..=9).map(f64::from).collect(), &[3, 3]).unwrap();
        let lower = ns.tril(&x, 0).unwrap();
        assert_eq!(values(&lower).1, vec![1.0, 0.0, 0.0, 4.0, 5.0, 0.0, 7.0, 8.0, 9.0]);
        let upper = ns.triu(&x, 1).unwrap();
        assert_eq!(values(&upper).1, vec![0.0, 2.0, 3.0, 0.0, 0.0, 6.0, 0.0, 0.0, 0.0]);
    }

    // ============ like ============

    #[test]
    fn test_full_like_keeps_shape_and_dtype() {
        let ns = ns();
        let x = ns.from_vec_typed(vec![1.0, 2.0, 3.0], &[3], StandardDType::Int32).unwrap();
        let y = ns.full_like(&x, 7.0, &Default::default()).unwrap();
        let arr = y.as_any().downcast_ref::<NdArray>().unwrap();
        assert_eq!(arr.dtype_tag(), StandardDType::Int32);
        assert_eq!(arr.to_vec(), vec![7.0, 7.0, 7.0]);
    }

    // ============ meshgrid ============

    #[test]
    fn test_meshgrid_xy() {
        let ns = ns();
        let x = ns.from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let y = ns.from_vec(vec![4.0, 5.0], &[2]).unwrap();
        let grids = ns.meshgrid(&[x, y], Indexing::Xy).unwrap();
        assert_eq!(values(&grids[0]), (vec![2, 3], vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]));
        assert_eq!(values(&grids[1]), (vec![2, 3], vec![4.0, 4.0, 4.0, 5.0, 5.0, 5.0]));
    }

    #[test]
    fn test_meshgrid_ij() {
        let ns = ns();
        let x = ns.from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let y = ns.from_vec(vec![4.0, 5.0], &[2]).unwrap();
        let grids = ns.meshgrid(&[x, y], Indexing::Ij).unwrap();
        assert_eq!(values(&grids[0]), (vec![3, 2], vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]));
    }
}
