//! Data type functions and type promotion for the test backend

use super::broadcast::{broadcast_shapes, broadcast_to};
use super::NdNamespace;
use array_api::args::DTypeOrArray;
use array_api::dtype::{DTypeKind, DTypeRef, FInfo, IInfo};
use array_api::ops::DataTypeFunctions;
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result, StandardDType};
use std::sync::Arc;

/// Promotes two data types.
///
/// Follows the standard's lattice within a kind. Mixed integer and floating
/// operands promote to the floating type, as NumPy does.
pub(crate) fn promote(a: StandardDType, b: StandardDType) -> Result<StandardDType> {
    use DTypeKind::*;
    use StandardDType as D;

    if a == b {
        return Ok(a);
    }
    let wider = |x: StandardDType, y: StandardDType| if x.bits() >= y.bits() { x } else { y };
    match (a.kind(), b.kind()) {
        (Bool, _) | (_, Bool) => Err(ArrayApiError::InvalidArgument(format!(
            "no promotion between {a} and {b}"
        ))),
        (SignedInteger, SignedInteger) | (UnsignedInteger, UnsignedInteger) => Ok(wider(a, b)),
        (SignedInteger, UnsignedInteger) | (UnsignedInteger, SignedInteger) => {
            let (signed, unsigned) = if a.kind() == SignedInteger { (a, b) } else { (b, a) };
            if signed.bits() > unsigned.bits() {
                return Ok(signed);
            }
            match unsigned {
                D::UInt8 => Ok(D::Int16),
                D::UInt16 => Ok(D::Int32),
                D::UInt32 => Ok(D::Int64),
                _ => Err(ArrayApiError::InvalidArgument(format!(
                    "no promotion between {a} and {b}"
                ))),
            }
        }
        (RealFloating, RealFloating) | (ComplexFloating, ComplexFloating) => Ok(wider(a, b)),
        (RealFloating, ComplexFloating) | (ComplexFloating, RealFloating) => {
            if a.bits().max(b.bits()) > 64 || a == D::Float64 || b == D::Float64 {
                Ok(D::Complex128)
            } else {
                Ok(D::Complex64)
            }
        }
        (_, RealFloating) | (_, ComplexFloating) => Ok(b),
        (RealFloating, _) | (ComplexFloating, _) => Ok(a),
    }
}

/// Data type of a floating result computed from `dtype`.
pub(crate) fn floating(dtype: StandardDType) -> StandardDType {
    if dtype.is_floating() {
        dtype
    } else {
        StandardDType::Float64
    }
}

fn can_cast_to(from: StandardDType, to: StandardDType) -> bool {
    promote(from, to).is_ok_and(|promoted| promoted == to)
}

impl NdNamespace {
    fn dtype_of(&self, value: &DTypeOrArray) -> Result<StandardDType> {
        match value {
            DTypeOrArray::DType(dtype) => self.standard_dtype(dtype),
            DTypeOrArray::Array(x) => Ok(self.local(x)?.dtype_tag()),
        }
    }
}

impl DataTypeFunctions for NdNamespace {
    fn astype(&self, x: &ArrayRef, dtype: &DTypeRef, copy: bool) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let target = self.standard_dtype(dtype)?;
        if !copy && arr.dtype_tag() == target {
            return Ok(Arc::clone(x));
        }
        Ok(self.wrap(arr.as_ndarray().clone(), target))
    }

    fn broadcast_arrays(&self, arrays: &[ArrayRef]) -> Result<Vec<ArrayRef>> {
        let locals = arrays
            .iter()
            .map(|x| self.local(x))
            .collect::<Result<Vec<_>>>()?;
        let shape = locals
            .iter()
            .try_fold(Vec::new(), |shape, arr| broadcast_shapes(&shape, arr.dims()))?;
        locals
            .into_iter()
            .map(|arr| Ok(self.wrap(broadcast_to(arr.as_ndarray(), &shape)?, arr.dtype_tag())))
            .collect()
    }

    fn broadcast_to(&self, x: &ArrayRef, shape: &[usize]) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let target = broadcast_shapes(arr.dims(), shape)?;
        if target != shape {
            return Err(ArrayApiError::IncompatibleShapes(arr.dims().to_vec(), shape.to_vec()));
        }
        Ok(self.wrap(broadcast_to(arr.as_ndarray(), shape)?, arr.dtype_tag()))
    }

    fn can_cast(&self, from: &DTypeOrArray, to: &DTypeRef) -> Result<bool> {
        Ok(can_cast_to(self.dtype_of(from)?, self.standard_dtype(to)?))
    }

    fn finfo(&self, dtype: &DTypeOrArray) -> Result<FInfo> {
        let dtype = self.dtype_of(dtype)?;
        dtype.finfo().ok_or_else(|| {
            ArrayApiError::InvalidArgument(format!("finfo requires a floating data type, got {dtype}"))
        })
    }

    fn iinfo(&self, dtype: &DTypeOrArray) -> Result<IInfo> {
        let dtype = self.dtype_of(dtype)?;
        dtype.iinfo().ok_or_else(|| {
            ArrayApiError::InvalidArgument(format!("iinfo requires an integer data type, got {dtype}"))
        })
    }

    fn result_type(&self, arrays_and_dtypes: &[DTypeOrArray]) -> Result<DTypeRef> {
        let mut dtypes = arrays_and_dtypes.iter().map(|value| self.dtype_of(value));
        let first = dtypes.next().ok_or_else(|| {
            ArrayApiError::InvalidArgument("at least one array or dtype is required".into())
        })??;
        let promoted = dtypes.try_fold(first, |acc, dtype| promote(acc, dtype?))?;
        Ok(Arc::new(promoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StandardDType as D;

    #[test]
    fn test_promote_within_kind() {
        assert_eq!(promote(D::Int8, D::Int32).unwrap(), D::Int32);
        assert_eq!(promote(D::UInt16, D::UInt8).unwrap(), D::UInt16);
        assert_eq!(promote(D::Float32, D::Float64).unwrap(), D::Float64);
    }

    #[test]
    fn test_promote_mixed_signedness() {
        assert_eq!(promote(D::Int8, D::UInt8).unwrap(), D::Int16);
        assert_eq!(promote(D::UInt32, D::Int64).unwrap(), D::Int64);
        assert!(promote(D::UInt64, D::Int64).is_err());
    }

    #[test]
    fn test_promote_to_floating() {
        assert_eq!(promote(D::Int64, D::Float32).unwrap(), D::Float32);
        assert_eq!(promote(D::Float32, D::Complex64).unwrap(), D::Complex64);
        assert_eq!(promote(D::Float64, D::Complex64).unwrap(), D::Complex128);
        assert!(promote(D::Bool, D::Int8).is_err());
    }

    #[test]
    fn test_can_cast() {
        assert!(can_cast_to(D::Int8, D::Int64));
        assert!(!can_cast_to(D::Float64, D::Float32));
        assert!(!can_cast_to(D::Int64, D::UInt64));
    }
}
