//! Conformance protocol
//!
//! A value is array API conformant when it can report the namespace that
//! implements operations on it. Rust cannot ask "does this value happen to
//! have method X" of an arbitrary type, so conformance is probed instead:
//! every value handed to the resolver implements [`Candidate`], whose probe
//! methods return the capability trait objects the value supports. Probes
//! default to `None`, so plain values take part with an empty impl and are
//! simply never conformant.

use crate::device::DeviceRef;
use crate::dtype::DTypeRef;
use crate::namespace::Namespace;
use crate::version::ApiVersion;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The base capability: report the owning namespace.
pub trait HasArrayNamespace {
    /// Returns the namespace implementing operations for this value.
    ///
    /// `api_version` is the revision the caller asked for; `None` means the
    /// backend's default.
    fn array_namespace(&self, api_version: Option<&ApiVersion>) -> Namespace;
}

pub trait HasDType {
    fn dtype(&self) -> DTypeRef;
}

pub trait HasDevice {
    fn device(&self) -> DeviceRef;
}

/// Shape access. Unknown (data-dependent) dimensions are `None`.
pub trait HasShape {
    fn shape(&self) -> Vec<Option<usize>>;

    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Number of elements, or `None` if any dimension is unknown or the
    /// count overflows `usize`.
    fn size(&self) -> Option<usize> {
        self.shape()
            .into_iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(dim?))
    }
}

/// A value the resolver can inspect.
///
/// Implement it with [`impl_candidate!`](crate::impl_candidate), listing the
/// capabilities the type supports.
pub trait Candidate: Any + fmt::Debug + Send + Sync {
    /// Upcast for backends that need the concrete array type back.
    fn as_any(&self) -> &dyn Any;

    fn as_array_namespace(&self) -> Option<&dyn HasArrayNamespace> {
        None
    }

    fn as_dtype(&self) -> Option<&dyn HasDType> {
        None
    }

    fn as_device(&self) -> Option<&dyn HasDevice> {
        None
    }

    fn as_shape(&self) -> Option<&dyn HasShape> {
        None
    }
}

/// Shared handle to a backend array.
pub type ArrayRef = Arc<dyn Candidate>;

/// Implements [`Candidate`] for a type.
///
/// ```ignore
/// impl_candidate!(MyArray: namespace, dtype, device, shape);
/// impl_candidate!(MyScalar);
/// ```
#[macro_export]
macro_rules! impl_candidate {
    (@probe namespace) => {
        fn as_array_namespace(&self) -> Option<&dyn $crate::protocol::HasArrayNamespace> {
            Some(self)
        }
    };
    (@probe dtype) => {
        fn as_dtype(&self) -> Option<&dyn $crate::protocol::HasDType> {
            Some(self)
        }
    };
    (@probe device) => {
        fn as_device(&self) -> Option<&dyn $crate::protocol::HasDevice> {
            Some(self)
        }
    };
    (@probe shape) => {
        fn as_shape(&self) -> Option<&dyn $crate::protocol::HasShape> {
            Some(self)
        }
    };
    ($ty:ty) => {
        impl $crate::protocol::Candidate for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
    ($ty:ty : $($cap:ident),+ $(,)?) => {
        impl $crate::protocol::Candidate for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            $( $crate::impl_candidate!(@probe $cap); )+
        }
    };
}

// Plain values can be passed to the resolver but never conform.
impl_candidate!(());
impl_candidate!(bool);
impl_candidate!(char);
impl_candidate!(i8);
impl_candidate!(i16);
impl_candidate!(i32);
impl_candidate!(i64);
impl_candidate!(i128);
impl_candidate!(isize);
impl_candidate!(u8);
impl_candidate!(u16);
impl_candidate!(u32);
impl_candidate!(u64);
impl_candidate!(u128);
impl_candidate!(usize);
impl_candidate!(f32);
impl_candidate!(f64);
impl_candidate!(String);
impl_candidate!(&'static str);

/// A structural contract a candidate may satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Reports its owning namespace. Required of every resolved value.
    ArrayNamespace,
    DType,
    Device,
    Shape,
}

impl Capability {
    pub fn is_satisfied_by(self, value: &dyn Candidate) -> bool {
        match self {
            Capability::ArrayNamespace => value.as_array_namespace().is_some(),
            Capability::DType => value.as_dtype().is_some(),
            Capability::Device => value.as_device().is_some(),
            Capability::Shape => value.as_shape().is_some(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ArrayNamespace => "array_namespace",
            Capability::DType => "dtype",
            Capability::Device => "device",
            Capability::Shape => "shape",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intersection of capabilities: a value qualifies only if it satisfies
/// every member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    required: Vec<Capability>,
}

impl CapabilitySet {
    /// The empty intersection. Every value satisfies it.
    pub fn empty() -> Self {
        Self {
            required: Vec::new(),
        }
    }

    pub fn with(mut self, capability: Capability) -> Self {
        if !self.required.contains(&capability) {
            self.required.push(capability);
        }
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.required.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.required.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    pub fn is_satisfied_by(&self, value: &dyn Candidate) -> bool {
        self.required.iter().all(|cap| cap.is_satisfied_by(value))
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::empty().with(Capability::ArrayNamespace)
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        Self::empty().with(capability)
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(capabilities: [Capability; N]) -> Self {
        capabilities.into_iter().collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ShapeOnly;

    impl HasShape for ShapeOnly {
        fn shape(&self) -> Vec<Option<usize>> {
            vec![Some(2), None]
        }
    }

    impl_candidate!(ShapeOnly: shape);

    #[test]
    fn test_plain_values_satisfy_nothing() {
        let values: [&dyn Candidate; 4] = [&42i64, &"str", &1.5f64, &String::from("x")];
        for v in values {
            assert!(!Capability::ArrayNamespace.is_satisfied_by(v));
            assert!(!Capability::Shape.is_satisfied_by(v));
            assert!(!CapabilitySet::default().is_satisfied_by(v));
        }
    }

    #[test]
    fn test_probe_reports_declared_capabilities_only() {
        let v: &dyn Candidate = &ShapeOnly;
        assert!(Capability::Shape.is_satisfied_by(v));
        assert!(!Capability::ArrayNamespace.is_satisfied_by(v));
        assert!(!CapabilitySet::from([Capability::Shape, Capability::DType]).is_satisfied_by(v));
        assert!(CapabilitySet::from(Capability::Shape).is_satisfied_by(v));
    }

    #[test]
    fn test_shape_defaults() {
        let s = ShapeOnly;
        assert_eq!(s.ndim(), 2);
        assert_eq!(s.size(), None);
    }

    #[derive(Debug)]
    struct Huge;

    impl HasShape for Huge {
        fn shape(&self) -> Vec<Option<usize>> {
            vec![Some(usize::MAX), Some(2)]
        }
    }

    #[test]
    fn test_size_overflow_is_unknown() {
        assert_eq!(Huge.size(), None);
        assert_eq!(Huge.ndim(), 2);
    }

    #[test]
    fn test_set_deduplicates() {
        let set = CapabilitySet::from([
            Capability::ArrayNamespace,
            Capability::Device,
            Capability::ArrayNamespace,
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Capability::Device));
        assert_eq!(CapabilitySet::default().len(), 1);
        assert!(CapabilitySet::empty().is_satisfied_by(&42i32));
    }

    #[test]
    fn test_downcast_through_candidate() {
        let v: ArrayRef = Arc::new(ShapeOnly);
        assert!(v.as_any().downcast_ref::<ShapeOnly>().is_some());
        assert!(v.as_any().downcast_ref::<i32>().is_none());
    }
}
