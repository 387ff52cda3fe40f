//! Test array backed by ndarray

use super::NdNamespace;
use array_api::device::DeviceRef;
use array_api::dtype::DTypeRef;
use array_api::protocol::{HasDType, HasDevice, HasShape};
use array_api::{ApiVersion, ArrayApiError, HasArrayNamespace, Namespace, Result, StandardDType};
use ndarray::{ArrayD, IxDyn};
use std::sync::Arc;

/// The one device of the test backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NdDevice {
    #[default]
    Cpu,
}

/// N-dimensional array owned by an [`NdNamespace`]
///
/// Elements are stored as `f64` whatever the data type; the dtype tag
/// decides how results are rounded and promoted.
#[derive(Debug, Clone)]
pub struct NdArray {
    data: ArrayD<f64>,
    dtype: StandardDType,
    device: NdDevice,
    namespace: NdNamespace,
}

impl NdArray {
    /// Wraps `data`, casting every element to `dtype`.
    pub fn new(namespace: NdNamespace, data: ArrayD<f64>, dtype: StandardDType) -> Self {
        Self {
            data: data.mapv(|v| cast_value(v, dtype)),
            dtype,
            device: NdDevice::Cpu,
            namespace,
        }
    }

    pub fn from_vec(
        namespace: NdNamespace,
        data: Vec<f64>,
        shape: &[usize],
        dtype: StandardDType,
    ) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ArrayApiError::InvalidArgument(format!(
                "Data length {} doesn't match shape {:?} (expected {})",
                data.len(),
                shape,
                expected
            )));
        }
        let arr = ArrayD::from_shape_vec(IxDyn(shape), data)
            .map_err(|e| ArrayApiError::InvalidArgument(e.to_string()))?;
        Ok(Self::new(namespace, arr, dtype))
    }

    pub fn as_ndarray(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn into_ndarray(self) -> ArrayD<f64> {
        self.data
    }

    pub fn dtype_tag(&self) -> StandardDType {
        self.dtype
    }

    pub fn namespace(&self) -> &NdNamespace {
        &self.namespace
    }

    pub fn dims(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Elements in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().cloned().collect()
    }
}

impl HasArrayNamespace for NdArray {
    fn array_namespace(&self, api_version: Option<&ApiVersion>) -> Namespace {
        match api_version {
            Some(version) => Namespace::new(self.namespace.clone().with_api_version(version.clone())),
            None => Namespace::new(self.namespace.clone()),
        }
    }
}

impl HasDType for NdArray {
    fn dtype(&self) -> DTypeRef {
        Arc::new(self.dtype)
    }
}

impl HasDevice for NdArray {
    fn device(&self) -> DeviceRef {
        Arc::new(self.device)
    }
}

impl HasShape for NdArray {
    fn shape(&self) -> Vec<Option<usize>> {
        self.data.shape().iter().map(|&d| Some(d)).collect()
    }
}

array_api::impl_candidate!(NdArray: namespace, dtype, device, shape);

/// Rounds `v` into the value set of `dtype`.
pub(crate) fn cast_value(v: f64, dtype: StandardDType) -> f64 {
    match dtype {
        StandardDType::Bool => (v != 0.0) as u8 as f64,
        StandardDType::Float32 | StandardDType::Complex64 => v as f32 as f64,
        StandardDType::Float64 | StandardDType::Complex128 => v,
        _ => match dtype.iinfo() {
            Some(info) if v.is_finite() => v.trunc().clamp(info.min as f64, info.max as f64),
            _ => 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use array_api::DType;

    fn ns() -> NdNamespace {
        NdNamespace::new("nd")
    }

    #[test]
    fn test_from_vec() {
        let arr = NdArray::from_vec(ns(), vec![1.0, 2.0, 3.0, 4.0], &[2, 2], StandardDType::Float64)
            .unwrap();
        assert_eq!(arr.dims(), &[2, 2]);
        assert_eq!(arr.ndim(), 2);
        assert_eq!(arr.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let result = NdArray::from_vec(ns(), vec![1.0, 2.0, 3.0], &[2, 2], StandardDType::Float64);
        assert!(matches!(result, Err(ArrayApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_values_cast_to_dtype() {
        let arr = NdArray::from_vec(ns(), vec![1.7, -2.5, 300.0], &[3], StandardDType::Int8).unwrap();
        assert_eq!(arr.to_vec(), vec![1.0, -2.0, 127.0]);

        let flags = NdArray::from_vec(ns(), vec![0.0, 2.0], &[2], StandardDType::Bool).unwrap();
        assert_eq!(flags.to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_reports_its_namespace() {
        let arr = NdArray::from_vec(ns(), vec![1.0], &[1], StandardDType::Float64).unwrap();
        assert_eq!(arr.array_namespace(None).id().name, "nd");

        let versioned = arr.array_namespace(Some(&ApiVersion::V2023_12));
        assert_eq!(versioned.id().api_version, Some(ApiVersion::V2023_12));
    }

    #[test]
    fn test_shape_and_dtype_protocols() {
        let arr = NdArray::from_vec(ns(), vec![0.0; 6], &[2, 3], StandardDType::Int32).unwrap();
        assert_eq!(HasShape::shape(&arr), vec![Some(2), Some(3)]);
        assert_eq!(arr.size(), Some(6));
        let expected: DTypeRef = Arc::new(StandardDType::Int32);
        assert!(arr.dtype().as_ref().dtype_eq(expected.as_ref()));
    }
}
