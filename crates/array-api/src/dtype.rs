//! Data type protocol and the standard data types

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Data type protocol
///
/// The only requirement is an equality test against another data type.
/// Every `PartialEq` type conforms through the blanket impl below, so
/// backends can use their own dtype objects as-is. Compare through
/// `&dyn DType` (e.g. `a.as_ref().dtype_eq(b.as_ref())`), not through the
/// `Arc`.
pub trait DType: fmt::Debug + Send + Sync + 'static {
    /// Computes `self == other`. Data types of unrelated concrete types are
    /// never equal.
    fn dtype_eq(&self, other: &dyn DType) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<T> DType for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn dtype_eq(&self, other: &dyn DType) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared handle to a backend data type object.
pub type DTypeRef = Arc<dyn DType>;

/// Category of a data type, as used by the standard's promotion tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeKind {
    Bool,
    SignedInteger,
    UnsignedInteger,
    RealFloating,
    ComplexFloating,
}

/// Data types defined by the array API standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardDType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl StandardDType {
    pub const ALL: [StandardDType; 13] = [
        StandardDType::Bool,
        StandardDType::Int8,
        StandardDType::Int16,
        StandardDType::Int32,
        StandardDType::Int64,
        StandardDType::UInt8,
        StandardDType::UInt16,
        StandardDType::UInt32,
        StandardDType::UInt64,
        StandardDType::Float32,
        StandardDType::Float64,
        StandardDType::Complex64,
        StandardDType::Complex128,
    ];

    /// Size in bytes
    pub fn size(&self) -> usize {
        match self {
            StandardDType::Bool | StandardDType::Int8 | StandardDType::UInt8 => 1,
            StandardDType::Int16 | StandardDType::UInt16 => 2,
            StandardDType::Int32 | StandardDType::UInt32 | StandardDType::Float32 => 4,
            StandardDType::Int64
            | StandardDType::UInt64
            | StandardDType::Float64
            | StandardDType::Complex64 => 8,
            StandardDType::Complex128 => 16,
        }
    }

    /// Size in bits
    pub fn bits(&self) -> u32 {
        self.size() as u32 * 8
    }

    /// Name used by the standard
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardDType::Bool => "bool",
            StandardDType::Int8 => "int8",
            StandardDType::Int16 => "int16",
            StandardDType::Int32 => "int32",
            StandardDType::Int64 => "int64",
            StandardDType::UInt8 => "uint8",
            StandardDType::UInt16 => "uint16",
            StandardDType::UInt32 => "uint32",
            StandardDType::UInt64 => "uint64",
            StandardDType::Float32 => "float32",
            StandardDType::Float64 => "float64",
            StandardDType::Complex64 => "complex64",
            StandardDType::Complex128 => "complex128",
        }
    }

    pub fn kind(&self) -> DTypeKind {
        match self {
            StandardDType::Bool => DTypeKind::Bool,
            StandardDType::Int8
            | StandardDType::Int16
            | StandardDType::Int32
            | StandardDType::Int64 => DTypeKind::SignedInteger,
            StandardDType::UInt8
            | StandardDType::UInt16
            | StandardDType::UInt32
            | StandardDType::UInt64 => DTypeKind::UnsignedInteger,
            StandardDType::Float32 | StandardDType::Float64 => DTypeKind::RealFloating,
            StandardDType::Complex64 | StandardDType::Complex128 => DTypeKind::ComplexFloating,
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self.kind(),
            DTypeKind::SignedInteger | DTypeKind::UnsignedInteger
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(
            self.kind(),
            DTypeKind::RealFloating | DTypeKind::ComplexFloating
        )
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// Machine limits for a real floating-point type.
    pub fn finfo(&self) -> Option<FInfo> {
        match self {
            StandardDType::Float32 | StandardDType::Complex64 => Some(FInfo {
                bits: 32,
                eps: f32::EPSILON as f64,
                max: f32::MAX as f64,
                min: f32::MIN as f64,
                smallest_normal: f32::MIN_POSITIVE as f64,
            }),
            StandardDType::Float64 | StandardDType::Complex128 => Some(FInfo {
                bits: 64,
                eps: f64::EPSILON,
                max: f64::MAX,
                min: f64::MIN,
                smallest_normal: f64::MIN_POSITIVE,
            }),
            _ => None,
        }
    }

    /// Machine limits for an integer type.
    pub fn iinfo(&self) -> Option<IInfo> {
        let (min, max) = match self {
            StandardDType::Int8 => (i8::MIN as i128, i8::MAX as i128),
            StandardDType::Int16 => (i16::MIN as i128, i16::MAX as i128),
            StandardDType::Int32 => (i32::MIN as i128, i32::MAX as i128),
            StandardDType::Int64 => (i64::MIN as i128, i64::MAX as i128),
            StandardDType::UInt8 => (0, u8::MAX as i128),
            StandardDType::UInt16 => (0, u16::MAX as i128),
            StandardDType::UInt32 => (0, u32::MAX as i128),
            StandardDType::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(IInfo {
            bits: self.bits(),
            max,
            min,
        })
    }
}

impl fmt::Display for StandardDType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for StandardDType {
    fn default() -> Self {
        StandardDType::Float64
    }
}

/// Result of `finfo`: limits of a floating-point data type.
///
/// For complex types the limits are those of the real component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FInfo {
    pub bits: u32,
    pub eps: f64,
    pub max: f64,
    pub min: f64,
    pub smallest_normal: f64,
}

/// Result of `iinfo`: limits of an integer data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IInfo {
    pub bits: u32,
    pub max: i128,
    pub min: i128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct TorchDType(&'static str);

    #[test]
    fn test_protocol_equality_same_type() {
        let a: DTypeRef = Arc::new(StandardDType::Float32);
        let b: DTypeRef = Arc::new(StandardDType::Float32);
        let c: DTypeRef = Arc::new(StandardDType::Int32);
        assert!(a.as_ref().dtype_eq(b.as_ref()));
        assert!(!a.as_ref().dtype_eq(c.as_ref()));
    }

    #[test]
    fn test_protocol_equality_across_types_is_false() {
        let ours: DTypeRef = Arc::new(StandardDType::Float32);
        let theirs: DTypeRef = Arc::new(TorchDType("float32"));
        assert!(!ours.as_ref().dtype_eq(theirs.as_ref()));
        assert!(!theirs.as_ref().dtype_eq(ours.as_ref()));
    }

    #[test]
    fn test_sizes_and_names() {
        assert_eq!(StandardDType::Bool.size(), 1);
        assert_eq!(StandardDType::Complex128.size(), 16);
        assert_eq!(StandardDType::UInt16.bits(), 16);
        assert_eq!(StandardDType::from_name("uint64"), Some(StandardDType::UInt64));
        assert_eq!(StandardDType::from_name("float16"), None);
    }

    #[test]
    fn test_finfo_iinfo() {
        let f = StandardDType::Float64.finfo().unwrap();
        assert_eq!(f.bits, 64);
        assert_eq!(f.eps, f64::EPSILON);
        assert!(StandardDType::Int8.finfo().is_none());

        let i = StandardDType::UInt8.iinfo().unwrap();
        assert_eq!((i.min, i.max, i.bits), (0, 255, 8));
        assert!(StandardDType::Float32.iinfo().is_none());
    }
}
