//! Keyword arguments of the namespace operations
//!
//! Each struct's `Default` impl carries the defaults documented by the
//! standard, so `&Default::default()` reproduces a call that passes no
//! keywords.

use crate::device::DeviceRef;
use crate::dtype::DTypeRef;
use crate::protocol::ArrayRef;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Axis selection for reductions and axis-aware manipulation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axes {
    /// Every axis (`axis=None`).
    #[default]
    All,
    Axis(isize),
    Axes(Vec<isize>),
}

impl Axes {
    /// Normalizes to non-negative axis indices for an array of rank `ndim`.
    ///
    /// Returns the offending axis if one is outside `[-ndim, ndim)`.
    pub fn resolve(&self, ndim: usize) -> std::result::Result<Vec<usize>, isize> {
        let normalize = |axis: isize| {
            let idx = if axis < 0 { axis + ndim as isize } else { axis };
            if idx < 0 || idx >= ndim as isize {
                Err(axis)
            } else {
                Ok(idx as usize)
            }
        };
        match self {
            Axes::All => Ok((0..ndim).collect()),
            Axes::Axis(axis) => Ok(vec![normalize(*axis)?]),
            Axes::Axes(axes) => axes.iter().map(|&a| normalize(a)).collect(),
        }
    }
}

impl From<isize> for Axes {
    fn from(axis: isize) -> Self {
        Axes::Axis(axis)
    }
}

impl From<Vec<isize>> for Axes {
    fn from(axes: Vec<isize>) -> Self {
        Axes::Axes(axes)
    }
}

impl From<Option<isize>> for Axes {
    fn from(axis: Option<isize>) -> Self {
        axis.map_or(Axes::All, Axes::Axis)
    }
}

/// `dtype` / `device` keywords of the creation functions.
#[derive(Debug, Clone, Default)]
pub struct CreationOptions {
    pub dtype: Option<DTypeRef>,
    pub device: Option<DeviceRef>,
}

impl CreationOptions {
    pub fn with_dtype(mut self, dtype: DTypeRef) -> Self {
        self.dtype = Some(dtype);
        self
    }

    pub fn with_device(mut self, device: DeviceRef) -> Self {
        self.device = Some(device);
        self
    }
}

/// Input accepted by `asarray`.
#[derive(Debug, Clone)]
pub enum AsArrayInput {
    Array(ArrayRef),
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Nested sequence; nesting depth becomes the rank.
    Nested(Vec<AsArrayInput>),
}

impl From<f64> for AsArrayInput {
    fn from(v: f64) -> Self {
        AsArrayInput::Float(v)
    }
}

impl From<Vec<f64>> for AsArrayInput {
    fn from(values: Vec<f64>) -> Self {
        AsArrayInput::Nested(values.into_iter().map(AsArrayInput::Float).collect())
    }
}

/// Cartesian (`xy`) or matrix (`ij`) indexing for `meshgrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indexing {
    #[default]
    Xy,
    Ij,
}

impl FromStr for Indexing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xy" => Ok(Indexing::Xy),
            "ij" => Ok(Indexing::Ij),
            other => Err(format!("indexing must be 'xy' or 'ij', got '{other}'")),
        }
    }
}

/// Either a data type or an array whose data type is meant.
#[derive(Debug, Clone)]
pub enum DTypeOrArray {
    DType(DTypeRef),
    Array(ArrayRef),
}

impl DTypeOrArray {
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            DTypeOrArray::Array(x) => Some(x),
            DTypeOrArray::DType(_) => None,
        }
    }
}

/// `axes` keyword of `tensordot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensordotAxes {
    /// Contract the last N axes of `x1` with the first N axes of `x2`.
    Count(usize),
    /// Explicit axis pairs.
    Pairs(Vec<isize>, Vec<isize>),
}

impl Default for TensordotAxes {
    fn default() -> Self {
        TensordotAxes::Count(2)
    }
}

/// Options of `max`, `min`, `mean`, `all` and `any`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReduceOptions {
    pub axis: Axes,
    pub keepdims: bool,
}

impl ReduceOptions {
    pub fn along(axis: impl Into<Axes>) -> Self {
        Self {
            axis: axis.into(),
            keepdims: false,
        }
    }
}

/// Options of `sum` and `prod`.
#[derive(Debug, Clone, Default)]
pub struct SumOptions {
    pub axis: Axes,
    pub dtype: Option<DTypeRef>,
    pub keepdims: bool,
}

/// Options of `std` and `var`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarianceOptions {
    pub axis: Axes,
    /// Degrees of freedom adjustment; `0.0` gives the population statistic.
    pub correction: f64,
    pub keepdims: bool,
}

/// Options of `argmax` and `argmin`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArgReduceOptions {
    /// `None` searches the flattened array.
    pub axis: Option<isize>,
    pub keepdims: bool,
}

/// Options of `sort` and `argsort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub axis: isize,
    pub descending: bool,
    pub stable: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            axis: -1,
            descending: false,
            stable: true,
        }
    }
}

/// `ord` keyword of `linalg.matrix_norm`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MatrixNormOrd {
    #[default]
    Frobenius,
    Nuclear,
    Order(f64),
}

/// `mode` keyword of `linalg.qr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrMode {
    #[default]
    Reduced,
    Complete,
}

/// `rtol` keyword of `linalg.matrix_rank` and `linalg.pinv`.
#[derive(Debug, Clone)]
pub enum Tolerance {
    Scalar(f64),
    Array(ArrayRef),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_keyword_defaults() {
        let sort = SortOptions::default();
        assert_eq!((sort.axis, sort.descending, sort.stable), (-1, false, true));
        assert_eq!(TensordotAxes::default(), TensordotAxes::Count(2));
        assert_eq!(ReduceOptions::default().axis, Axes::All);
        assert_eq!(VarianceOptions::default().correction, 0.0);
        assert_eq!(MatrixNormOrd::default(), MatrixNormOrd::Frobenius);
        assert_eq!(Indexing::default(), Indexing::Xy);
    }

    #[test]
    fn test_axes_resolve() {
        assert_eq!(Axes::All.resolve(3), Ok(vec![0, 1, 2]));
        assert_eq!(Axes::Axis(-1).resolve(3), Ok(vec![2]));
        assert_eq!(Axes::Axes(vec![0, -2]).resolve(2), Ok(vec![0, 0]));
        assert_eq!(Axes::Axis(3).resolve(3), Err(3));
        assert_eq!(Axes::Axis(-4).resolve(3), Err(-4));
    }

    #[test]
    fn test_indexing_parse() {
        assert_eq!("ij".parse::<Indexing>(), Ok(Indexing::Ij));
        assert!("yx".parse::<Indexing>().is_err());
    }

    #[test]
    fn test_sort_options_serde() {
        let json = serde_json::to_string(&SortOptions::default()).unwrap();
        assert_eq!(json, r#"{"axis":-1,"descending":false,"stable":true}"#);
    }
}
