//! Sorting functions for the test backend

use super::{normalize_axis, NdNamespace};
use array_api::args::SortOptions;
use array_api::ops::SortingFunctions;
use array_api::protocol::ArrayRef;
use array_api::{Result, StandardDType};
use ndarray::{ArrayD, Axis, Zip};

/// Positions of `lane` in sorted order. Equal elements keep their relative
/// order; NaN sorts after every number.
fn lane_order(lane: &[f64], descending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..lane.len()).collect();
    order.sort_by(|&i, &j| {
        let ordering = lane[i].total_cmp(&lane[j]);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    order
}

impl NdNamespace {
    /// Rewrites every lane along the sort axis from its sorted order.
    fn sort_lanes<F>(
        &self,
        x: &ArrayRef,
        opts: &SortOptions,
        dtype: Option<StandardDType>,
        emit: F,
    ) -> Result<ArrayRef>
    where
        F: Fn(&[f64], usize) -> f64,
    {
        let arr = self.local(x)?;
        let axis = Axis(normalize_axis(opts.axis, arr.ndim())?);
        let mut out: ArrayD<f64> = arr.as_ndarray().clone();
        Zip::from(out.lanes_mut(axis))
            .and(arr.as_ndarray().lanes(axis))
            .for_each(|mut out_lane, lane| {
                let values = lane.to_vec();
                for (k, i) in lane_order(&values, opts.descending).into_iter().enumerate() {
                    out_lane[k] = emit(&values, i);
                }
            });
        Ok(self.wrap(out, dtype.unwrap_or(arr.dtype_tag())))
    }
}

impl SortingFunctions for NdNamespace {
    fn argsort(&self, x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
        self.sort_lanes(x, opts, Some(StandardDType::Int64), |_, i| i as f64)
    }

    fn sort(&self, x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
        self.sort_lanes(x, opts, None, |values, i| values[i])
    }
}
