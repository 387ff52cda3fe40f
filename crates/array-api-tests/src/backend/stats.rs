//! Reductions: statistical and utility functions for the test backend

use super::array::NdArray;
use super::creation::shape_error;
use super::data_type::floating;
use super::NdNamespace;
use array_api::args::{Axes, ReduceOptions, SumOptions, VarianceOptions};
use array_api::dtype::{DTypeKind, DTypeRef};
use array_api::ops::{StatisticalFunctions, UtilityFunctions};
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result, StandardDType};
use ndarray::{ArrayD, IxDyn};

/// Reduces `arr` over `axes`, applying `f` to the elements of each group.
///
/// `f` returns `None` for an empty group when the reduction has no identity.
pub(crate) fn reduce<F>(
    arr: &NdArray,
    axes: &Axes,
    keepdims: bool,
    op: &'static str,
    f: F,
) -> Result<ArrayD<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let ndim = arr.ndim();
    let mut reduced = axes
        .resolve(ndim)
        .map_err(|axis| ArrayApiError::InvalidAxis { axis, ndim })?;
    let requested = reduced.len();
    reduced.sort_unstable();
    reduced.dedup();
    if reduced.len() != requested {
        return Err(ArrayApiError::InvalidArgument(format!(
            "repeated axis in {op}: {axes:?}"
        )));
    }

    let dims = arr.dims();
    let kept: Vec<usize> = (0..ndim).filter(|a| !reduced.contains(a)).collect();
    let perm: Vec<usize> = kept.iter().chain(&reduced).copied().collect();
    let group: usize = reduced.iter().map(|&a| dims[a]).product();
    let groups: usize = kept.iter().map(|&a| dims[a]).product();

    let no_identity = || {
        ArrayApiError::InvalidArgument(format!(
            "zero-size array to reduction operation {op} which has no identity"
        ))
    };
    let values: Vec<f64> = if group == 0 {
        let empty = f(&[]);
        (0..groups)
            .map(|_| empty.ok_or_else(no_identity))
            .collect::<Result<_>>()?
    } else {
        let flat: Vec<f64> = arr
            .as_ndarray()
            .view()
            .permuted_axes(IxDyn(&perm))
            .iter()
            .copied()
            .collect();
        flat.chunks(group)
            .map(|lane| f(lane).ok_or_else(no_identity))
            .collect::<Result<_>>()?
    };

    let shape: Vec<usize> = if keepdims {
        (0..ndim)
            .map(|a| if reduced.contains(&a) { 1 } else { dims[a] })
            .collect()
    } else {
        kept.iter().map(|&a| dims[a]).collect()
    };
    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(shape_error)
}

fn nan_aware(pick: fn(f64, f64) -> f64) -> impl Fn(&[f64]) -> Option<f64> {
    move |lane: &[f64]| {
        lane.iter().copied().reduce(|a, b| {
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                pick(a, b)
            }
        })
    }
}

fn variance(lane: &[f64], correction: f64) -> f64 {
    let n = lane.len() as f64;
    let mean = lane.iter().sum::<f64>() / n;
    let squares: f64 = lane.iter().map(|v| (v - mean).powi(2)).sum();
    squares / (n - correction)
}

impl NdNamespace {
    /// Accumulator data type of `sum` and `prod`.
    fn accumulator(&self, input: StandardDType, requested: Option<&DTypeRef>) -> Result<StandardDType> {
        if let Some(dtype) = requested {
            return self.standard_dtype(dtype);
        }
        Ok(match input.kind() {
            DTypeKind::Bool | DTypeKind::SignedInteger => StandardDType::Int64,
            DTypeKind::UnsignedInteger => StandardDType::UInt64,
            DTypeKind::RealFloating | DTypeKind::ComplexFloating => input,
        })
    }

    fn floating_input<'a>(&self, x: &'a ArrayRef, op: &str) -> Result<&'a NdArray> {
        let arr = self.local(x)?;
        if !arr.dtype_tag().is_floating() {
            return Err(ArrayApiError::InvalidArgument(format!(
                "{op} requires a floating-point array, got {}",
                arr.dtype_tag()
            )));
        }
        Ok(arr)
    }
}

impl StatisticalFunctions for NdNamespace {
    fn max(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "max", nan_aware(f64::max))?;
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn mean(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        let arr = self.floating_input(x, "mean")?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "mean", |lane| {
            Some(lane.iter().sum::<f64>() / lane.len() as f64)
        })?;
        Ok(self.wrap(data, floating(arr.dtype_tag())))
    }

    fn min(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "min", nan_aware(f64::min))?;
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn prod(&self, x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let dtype = self.accumulator(arr.dtype_tag(), opts.dtype.as_ref())?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "prod", |lane| {
            Some(lane.iter().product())
        })?;
        Ok(self.wrap(data, dtype))
    }

    fn std(&self, x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
        let arr = self.floating_input(x, "std")?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "std", |lane| {
            Some(variance(lane, opts.correction).sqrt())
        })?;
        Ok(self.wrap(data, arr.dtype_tag()))
    }

    fn sum(&self, x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let dtype = self.accumulator(arr.dtype_tag(), opts.dtype.as_ref())?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "sum", |lane| {
            Some(lane.iter().sum())
        })?;
        Ok(self.wrap(data, dtype))
    }

    fn var(&self, x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
        let arr = self.floating_input(x, "var")?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "var", |lane| {
            Some(variance(lane, opts.correction))
        })?;
        Ok(self.wrap(data, arr.dtype_tag()))
    }
}

impl UtilityFunctions for NdNamespace {
    fn all(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "all", |lane| {
            Some(lane.iter().all(|&v| v != 0.0) as u8 as f64)
        })?;
        Ok(self.wrap(data, StandardDType::Bool))
    }

    fn any(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let data = reduce(arr, &opts.axis, opts.keepdims, "any", |lane| {
            Some(lane.iter().any(|&v| v != 0.0) as u8 as f64)
        })?;
        Ok(self.wrap(data, StandardDType::Bool))
    }
}
