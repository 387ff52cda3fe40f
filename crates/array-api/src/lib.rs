//! array-api - namespace resolution and dispatch for the array API standard
//!
//! Array libraries implement the operation traits in [`ops`] on a namespace
//! object and make their arrays report that namespace through the
//! conformance protocol in [`protocol`]. Generic code then calls the
//! functions in [`api`], which find the namespace owning their arguments
//! and forward to it, without depending on any particular library.
//!
//! ```ignore
//! use array_api::api;
//!
//! let total = api::sum(&x, &Default::default())?;
//! let ns = array_api::get_namespace([x.as_ref(), y.as_ref()])?;
//! let z = ns.zeros(&[2, 2], &Default::default())?;
//! ```

pub mod api;
pub mod args;
pub mod constants;
pub mod device;
pub mod dtype;
pub mod error;
pub mod namespace;
pub mod ops;
pub mod protocol;
pub mod resolve;
pub mod version;

pub use device::{Device, DeviceRef};
pub use dtype::{DType, DTypeRef, StandardDType};
pub use error::{ArrayApiError, Result};
pub use namespace::{ArrayNamespace, Namespace, NamespaceId, NamespaceIdentity};
pub use protocol::{ArrayRef, Candidate, Capability, CapabilitySet, HasArrayNamespace};
pub use resolve::{get_namespace, Resolver};
pub use version::ApiVersion;

/// Everything a backend needs to implement a namespace.
pub mod prelude {
    pub use crate::args::*;
    pub use crate::device::{Device, DeviceRef};
    pub use crate::dtype::{DType, DTypeKind, DTypeRef, FInfo, IInfo, StandardDType};
    pub use crate::error::{ArrayApiError, Result};
    pub use crate::namespace::{ArrayNamespace, Namespace, NamespaceId, NamespaceIdentity};
    pub use crate::ops::*;
    pub use crate::protocol::{
        ArrayRef, Candidate, Capability, CapabilitySet, HasArrayNamespace, HasDType, HasDevice,
        HasShape,
    };
    pub use crate::version::ApiVersion;
}
