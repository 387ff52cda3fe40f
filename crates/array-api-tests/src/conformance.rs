//! Data type and device protocol behaviour of backend objects

#[cfg(test)]
mod tests {
    use crate::backend::{NdDevice, NdNamespace};
    use array_api::device::DeviceRef;
    use array_api::dtype::DTypeRef;
    use array_api::protocol::{HasDType, HasDevice};
    use array_api::{Capability, CapabilitySet, DType, StandardDType};
    use std::sync::Arc;

    /// A data type object from some other library.
    #[derive(Debug, PartialEq)]
    struct ForeignDType(&'static str);

    #[derive(Debug, PartialEq)]
    enum ForeignDevice {
        Gpu(u8),
    }

    #[test]
    fn test_array_dtype_matches_standard_dtype() {
        let ns = NdNamespace::new("nd");
        let x = ns
            .from_vec_typed(vec![1.0], &[1], StandardDType::Int16)
            .unwrap();
        let arr = crate::utils::nd(&x);
        let expected: DTypeRef = Arc::new(StandardDType::Int16);
        assert!(arr.dtype().as_ref().dtype_eq(expected.as_ref()));
        assert!(!arr.dtype().as_ref().dtype_eq(&StandardDType::Int32));
    }

    #[test]
    fn test_unrelated_dtypes_never_equal() {
        let ours: DTypeRef = Arc::new(StandardDType::Float64);
        let theirs: DTypeRef = Arc::new(ForeignDType("float64"));
        assert!(!ours.as_ref().dtype_eq(theirs.as_ref()));
        assert!(!theirs.as_ref().dtype_eq(ours.as_ref()));
        assert!(theirs.as_ref().dtype_eq(&ForeignDType("float64")));
    }

    #[test]
    fn test_unrelated_devices_never_equal() {
        let ns = NdNamespace::new("nd");
        let x = ns.from_vec(vec![1.0], &[1]).unwrap();
        let device: DeviceRef = crate::utils::nd(&x).device();
        assert!(device.as_ref().device_eq(&NdDevice::Cpu));
        assert!(!device.as_ref().device_eq(&ForeignDevice::Gpu(0)));
    }

    #[test]
    fn test_backend_arrays_satisfy_every_capability() {
        let ns = NdNamespace::new("nd");
        let x = ns.from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let all: CapabilitySet = [
            Capability::ArrayNamespace,
            Capability::DType,
            Capability::Device,
            Capability::Shape,
        ]
        .into();
        assert!(all.is_satisfied_by(&*x));
        assert!(!all.is_satisfied_by(&1.0f64));
        assert_eq!(x.as_shape().map(|s| s.shape()), Some(vec![Some(2)]));
    }

    #[test]
    fn test_standard_dtype_queries() {
        let float = StandardDType::from_name("float32").unwrap();
        assert_eq!(float.finfo().map(|f| f.eps), Some(f32::EPSILON as f64));
        assert_eq!(StandardDType::UInt8.iinfo().map(|i| i.max), Some(255));
        assert!(StandardDType::Bool.finfo().is_none());
    }
}
