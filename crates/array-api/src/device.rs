//! Device protocol

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Device protocol
///
/// Mirrors [`DType`](crate::dtype::DType): a device only has to support an
/// equality test, and any `PartialEq` type conforms automatically.
pub trait Device: fmt::Debug + Send + Sync + 'static {
    /// Computes `self == other`. Devices of unrelated concrete types are
    /// never equal.
    fn device_eq(&self, other: &dyn Device) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<T> Device for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn device_eq(&self, other: &dyn Device) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared handle to a backend device object.
pub type DeviceRef = Arc<dyn Device>;
