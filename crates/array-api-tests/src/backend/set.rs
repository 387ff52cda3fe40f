//! Set functions for the test backend
//!
//! NaN values are never equal, so each NaN is its own unique value.

use super::creation::shape_error;
use super::NdNamespace;
use array_api::ops::{SetFunctions, UniqueAll, UniqueCounts, UniqueInverse};
use array_api::protocol::ArrayRef;
use array_api::{Result, StandardDType};
use ndarray::{ArrayD, IxDyn};

struct Uniques {
    values: Vec<f64>,
    first_indices: Vec<f64>,
    inverse: Vec<f64>,
    counts: Vec<f64>,
}

/// Sorted unique elements of `data`, with first occurrences, inverse
/// indices and counts.
fn uniques(data: &[f64]) -> Uniques {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&i, &j| data[i].total_cmp(&data[j]));

    let mut out = Uniques {
        values: Vec::new(),
        first_indices: Vec::new(),
        inverse: vec![0.0; data.len()],
        counts: Vec::new(),
    };
    for i in order {
        let v = data[i];
        match out.values.last() {
            Some(&last) if last == v => {
                if let Some(count) = out.counts.last_mut() {
                    *count += 1.0;
                }
            }
            _ => {
                out.values.push(v);
                out.first_indices.push(i as f64);
                out.counts.push(1.0);
            }
        }
        out.inverse[i] = (out.values.len() - 1) as f64;
    }
    out
}

impl NdNamespace {
    fn vector(&self, values: Vec<f64>, dtype: StandardDType) -> Result<ArrayRef> {
        let data = ArrayD::from_shape_vec(IxDyn(&[values.len()]), values).map_err(shape_error)?;
        Ok(self.wrap(data, dtype))
    }
}

impl SetFunctions for NdNamespace {
    fn unique_all(&self, x: &ArrayRef) -> Result<UniqueAll> {
        let arr = self.local(x)?;
        let u = uniques(&arr.to_vec());
        let inverse = ArrayD::from_shape_vec(IxDyn(arr.dims()), u.inverse).map_err(shape_error)?;
        Ok(UniqueAll {
            values: self.vector(u.values, arr.dtype_tag())?,
            indices: self.vector(u.first_indices, StandardDType::Int64)?,
            inverse_indices: self.wrap(inverse, StandardDType::Int64),
            counts: self.vector(u.counts, StandardDType::Int64)?,
        })
    }

    fn unique_counts(&self, x: &ArrayRef) -> Result<UniqueCounts> {
        let arr = self.local(x)?;
        let u = uniques(&arr.to_vec());
        Ok(UniqueCounts {
            values: self.vector(u.values, arr.dtype_tag())?,
            counts: self.vector(u.counts, StandardDType::Int64)?,
        })
    }

    fn unique_inverse(&self, x: &ArrayRef) -> Result<UniqueInverse> {
        let arr = self.local(x)?;
        let u = uniques(&arr.to_vec());
        let inverse = ArrayD::from_shape_vec(IxDyn(arr.dims()), u.inverse).map_err(shape_error)?;
        Ok(UniqueInverse {
            values: self.vector(u.values, arr.dtype_tag())?,
            inverse_indices: self.wrap(inverse, StandardDType::Int64),
        })
    }

    fn unique_values(&self, x: &ArrayRef) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        self.vector(uniques(&arr.to_vec()).values, arr.dtype_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::nd;

    fn ns() -> NdNamespace {
        NdNamespace::new("nd")
    }

    #[test]
    fn test_unique_values_sorted() {
        let x = ns().from_vec(vec![3.0, 1.0, 3.0, 2.0, 1.0], &[5]).unwrap();
        let u = ns().unique_values(&x).unwrap();
        assert_eq!(nd(&u).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unique_all() {
        let x = ns().from_vec(vec![3.0, 1.0, 3.0, 2.0], &[2, 2]).unwrap();
        let u = ns().unique_all(&x).unwrap();
        assert_eq!(nd(&u.values).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(nd(&u.indices).to_vec(), vec![1.0, 3.0, 0.0]);
        assert_eq!(nd(&u.counts).to_vec(), vec![1.0, 1.0, 2.0]);
        assert_eq!(nd(&u.inverse_indices).dims(), &[2, 2]);
        assert_eq!(nd(&u.inverse_indices).to_vec(), vec![2.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_nans_are_distinct() {
        let x = ns().from_vec(vec![f64::NAN, 1.0, f64::NAN], &[3]).unwrap();
        let u = ns().unique_counts(&x).unwrap();
        assert_eq!(nd(&u.values).to_vec().len(), 3);
        assert_eq!(nd(&u.counts).to_vec(), vec![1.0, 1.0, 1.0]);
    }
}
