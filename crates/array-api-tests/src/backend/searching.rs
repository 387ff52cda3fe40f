//! Searching functions for the test backend

use super::broadcast::broadcast_shapes;
use super::creation::shape_error;
use super::data_type::promote;
use super::stats::reduce;
use super::NdNamespace;
use array_api::args::{ArgReduceOptions, Axes};
use array_api::ops::SearchingFunctions;
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result, StandardDType};
use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn, Zip};

/// Index of the first element of `lane` that `better` prefers over every
/// other. NaN wins over any number.
fn arg_best(lane: &[f64], better: fn(f64, f64) -> bool) -> Option<f64> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in lane.iter().enumerate() {
        best = match best {
            Some((_, b)) if b.is_nan() => best,
            Some((_, b)) if !v.is_nan() && !better(v, b) => best,
            _ => Some((i, v)),
        };
    }
    best.map(|(i, _)| i as f64)
}

fn broadcast_view<'a>(data: &'a ArrayD<f64>, shape: &[usize]) -> Result<ArrayViewD<'a, f64>> {
    data.broadcast(IxDyn(shape))
        .ok_or_else(|| ArrayApiError::IncompatibleShapes(data.shape().to_vec(), shape.to_vec()))
}

impl NdNamespace {
    fn arg_reduce(
        &self,
        x: &ArrayRef,
        opts: &ArgReduceOptions,
        op: &'static str,
        better: fn(f64, f64) -> bool,
    ) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let axes = opts.axis.map_or(Axes::All, Axes::Axis);
        let data = reduce(arr, &axes, opts.keepdims, op, |lane| arg_best(lane, better))?;
        Ok(self.wrap(data, StandardDType::Int64))
    }
}

impl SearchingFunctions for NdNamespace {
    fn argmax(&self, x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
        self.arg_reduce(x, opts, "argmax", |v, best| v > best)
    }

    fn argmin(&self, x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
        self.arg_reduce(x, opts, "argmin", |v, best| v < best)
    }

    fn nonzero(&self, x: &ArrayRef) -> Result<Vec<ArrayRef>> {
        let arr = self.local(x)?;
        if arr.ndim() == 0 {
            return Err(ArrayApiError::InvalidArgument(
                "nonzero is not defined for zero-dimensional arrays".into(),
            ));
        }
        let mut coordinates = vec![Vec::new(); arr.ndim()];
        for (index, &v) in arr.as_ndarray().indexed_iter() {
            if v != 0.0 {
                for (dim, &i) in index.slice().iter().enumerate() {
                    coordinates[dim].push(i as f64);
                }
            }
        }
        coordinates
            .into_iter()
            .map(|indices| {
                let data = ArrayD::from_shape_vec(IxDyn(&[indices.len()]), indices)
                    .map_err(shape_error)?;
                Ok(self.wrap(data, StandardDType::Int64))
            })
            .collect()
    }

    fn where_(&self, condition: &ArrayRef, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        let cond = self.local(condition)?;
        let (a, b) = (self.local(x1)?, self.local(x2)?);
        let dtype = promote(a.dtype_tag(), b.dtype_tag())?;

        let shape = broadcast_shapes(&broadcast_shapes(cond.dims(), a.dims())?, b.dims())?;
        let data = Zip::from(broadcast_view(cond.as_ndarray(), &shape)?)
            .and(broadcast_view(a.as_ndarray(), &shape)?)
            .and(broadcast_view(b.as_ndarray(), &shape)?)
            .map_collect(|&c, &x, &y| if c != 0.0 { x } else { y });
        Ok(self.wrap(data, dtype))
    }
}
