//! ndarray-backed test backend
//!
//! [`NdNamespace`] implements a working subset of the standard on `f64`
//! storage tagged with a [`StandardDType`]. Namespaces with different names
//! behave as unrelated array libraries, which is what resolution and
//! forwarding tests need. Operations outside the subset keep the default
//! `Unsupported` bodies.

mod array;
mod broadcast;
mod creation;
mod data_type;
mod elementwise;
mod linalg;
mod manipulation;
mod searching;
mod set;
mod sorting;
mod stats;

pub use array::{NdArray, NdDevice};
pub use broadcast::{broadcast_binary_op, broadcast_shapes};

use array_api::dtype::DTypeRef;
use array_api::ops::{Constants, LinalgFunctions};
use array_api::protocol::ArrayRef;
use array_api::{
    ApiVersion, ArrayApiError, ArrayNamespace, DType, Namespace, NamespaceId, NamespaceIdentity,
    Result, StandardDType,
};
use ndarray::ArrayD;
use std::borrow::Cow;
use std::sync::Arc;

/// A named instance of the test backend
#[derive(Debug, Clone)]
pub struct NdNamespace {
    name: Cow<'static, str>,
    api_version: Option<ApiVersion>,
}

impl NdNamespace {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            api_version: None,
        }
    }

    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// This backend as a resolver-comparable handle.
    pub fn handle(&self) -> Namespace {
        Namespace::new(self.clone())
    }

    /// Wraps ndarray data as an array of this namespace.
    pub fn wrap(&self, data: ArrayD<f64>, dtype: StandardDType) -> ArrayRef {
        Arc::new(NdArray::new(self.clone(), data, dtype))
    }

    /// Float64 array from row-major values.
    pub fn from_vec(&self, data: Vec<f64>, shape: &[usize]) -> Result<ArrayRef> {
        self.from_vec_typed(data, shape, StandardDType::Float64)
    }

    pub fn from_vec_typed(
        &self,
        data: Vec<f64>,
        shape: &[usize],
        dtype: StandardDType,
    ) -> Result<ArrayRef> {
        Ok(Arc::new(NdArray::from_vec(self.clone(), data, shape, dtype)?))
    }

    /// Borrows `x` as an array of this namespace.
    ///
    /// Fails with [`ArrayApiError::ForeignArray`] for arrays of another
    /// namespace and for values that are not arrays at all.
    pub fn local<'a>(&self, x: &'a ArrayRef) -> Result<&'a NdArray> {
        match (**x).as_any().downcast_ref::<NdArray>() {
            Some(arr) if arr.namespace().name == self.name => Ok(arr),
            _ => {
                let found = match x.as_array_namespace() {
                    Some(reporter) => reporter.array_namespace(None).id().to_string(),
                    None => format!("{x:?}"),
                };
                Err(ArrayApiError::ForeignArray {
                    namespace: self.id(),
                    found,
                })
            }
        }
    }

    /// Data type named by a requested dtype object.
    pub(crate) fn standard_dtype(&self, dtype: &DTypeRef) -> Result<StandardDType> {
        let dtype: &dyn DType = &**dtype;
        dtype
            .as_any()
            .downcast_ref::<StandardDType>()
            .copied()
            .ok_or_else(|| ArrayApiError::InvalidArgument(format!("unknown data type {dtype:?}")))
    }
}

impl NamespaceIdentity for NdNamespace {
    fn id(&self) -> NamespaceId {
        let id = NamespaceId::new(self.name.clone());
        match &self.api_version {
            Some(version) => id.with_api_version(version.clone()),
            None => id,
        }
    }
}

impl Constants for NdNamespace {}

impl ArrayNamespace for NdNamespace {
    fn linalg(&self) -> Option<&dyn LinalgFunctions> {
        Some(self)
    }
}

/// Normalizes a possibly negative axis for an array of rank `ndim`.
pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let idx = if axis < 0 { axis + ndim as isize } else { axis };
    if idx < 0 || idx >= ndim as isize {
        return Err(ArrayApiError::InvalidAxis { axis, ndim });
    }
    Ok(idx as usize)
}
