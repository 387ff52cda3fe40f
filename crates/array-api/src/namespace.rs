//! Namespace handles
//!
//! A backend exposes its operations through one object implementing
//! [`ArrayNamespace`]. Values report that object wrapped in a [`Namespace`],
//! which compares by the backend's [`NamespaceId`] and its concrete type so
//! that the resolver can deduplicate handles coming from different arrays.
//! Two unrelated backend types never merge, even under the same id.

use crate::ops::*;
use crate::version::ApiVersion;
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Stable identity of a backend namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId {
    pub name: Cow<'static, str>,
    /// Revision of the standard the namespace implements, if it tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<ApiVersion>,
}

impl NamespaceId {
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
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.api_version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

/// Identity of the namespace an operation trait belongs to.
///
/// Ids are how errors name a backend, so they should be unique per library.
/// Handles of different backend types stay distinct even when ids collide.
pub trait NamespaceIdentity {
    fn id(&self) -> NamespaceId;
}

/// A complete backend namespace
///
/// Backends implement the individual operation traits (every operation has
/// a default body reporting it as unsupported) and then this marker trait.
pub trait ArrayNamespace:
    NamespaceIdentity
    + Constants
    + CreationFunctions
    + DataTypeFunctions
    + ElementwiseFunctions
    + LinearAlgebraFunctions
    + ManipulationFunctions
    + SearchingFunctions
    + SetFunctions
    + SortingFunctions
    + StatisticalFunctions
    + UtilityFunctions
    + Send
    + Sync
    + 'static
{
    /// The `linalg` extension, if the backend provides it.
    fn linalg(&self) -> Option<&dyn LinalgFunctions> {
        None
    }
}

/// Shared, comparable handle to a backend namespace.
#[derive(Clone)]
pub struct Namespace {
    inner: Arc<dyn ArrayNamespace>,
    backend: TypeId,
}

impl Namespace {
    pub fn new<N: ArrayNamespace>(namespace: N) -> Self {
        Self::from_arc(Arc::new(namespace))
    }

    pub fn from_arc<N: ArrayNamespace>(inner: Arc<N>) -> Self {
        Self {
            inner,
            backend: TypeId::of::<N>(),
        }
    }

    pub fn id(&self) -> NamespaceId {
        self.inner.id()
    }

    /// The `linalg` extension, or `Unsupported` if the backend has none.
    pub fn linalg(&self) -> crate::Result<&dyn LinalgFunctions> {
        self.inner
            .linalg()
            .ok_or_else(|| crate::ArrayApiError::unsupported(self.id(), "linalg"))
    }
}

impl Deref for Namespace {
    type Target = dyn ArrayNamespace;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.backend == other.backend && self.id() == other.id()
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.backend.hash(state);
        self.id().hash(state);
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Namespace").field(&self.id()).finish()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Bare(&'static str);

    impl NamespaceIdentity for Bare {
        fn id(&self) -> NamespaceId {
            NamespaceId::new(self.0)
        }
    }

    impl Constants for Bare {}
    impl CreationFunctions for Bare {}
    impl DataTypeFunctions for Bare {}
    impl ElementwiseFunctions for Bare {}
    impl LinearAlgebraFunctions for Bare {}
    impl ManipulationFunctions for Bare {}
    impl SearchingFunctions for Bare {}
    impl SetFunctions for Bare {}
    impl SortingFunctions for Bare {}
    impl StatisticalFunctions for Bare {}
    impl UtilityFunctions for Bare {}
    impl ArrayNamespace for Bare {}

    /// A second library that happens to pick the same ids as `Bare`.
    struct Lookalike(&'static str);

    impl NamespaceIdentity for Lookalike {
        fn id(&self) -> NamespaceId {
            NamespaceId::new(self.0)
        }
    }

    impl Constants for Lookalike {}
    impl CreationFunctions for Lookalike {}
    impl DataTypeFunctions for Lookalike {}
    impl ElementwiseFunctions for Lookalike {}
    impl LinearAlgebraFunctions for Lookalike {}
    impl ManipulationFunctions for Lookalike {}
    impl SearchingFunctions for Lookalike {}
    impl SetFunctions for Lookalike {}
    impl SortingFunctions for Lookalike {}
    impl StatisticalFunctions for Lookalike {}
    impl UtilityFunctions for Lookalike {}
    impl ArrayNamespace for Lookalike {}

    #[test]
    fn test_handles_compare_by_id() {
        let a = Namespace::new(Bare("numpy"));
        let b = Namespace::new(Bare("numpy"));
        let c = Namespace::new(Bare("cupy"));
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Namespace> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_same_id_from_different_backends_stays_distinct() {
        let ours = Namespace::new(Bare("numpy"));
        let theirs = Namespace::new(Lookalike("numpy"));
        assert_eq!(ours.id(), theirs.id());
        assert_ne!(ours, theirs);

        let again = Namespace::from_arc(Arc::new(Bare("numpy")));
        let set: HashSet<Namespace> = [ours.clone(), theirs, again].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&ours));
    }

    #[test]
    fn test_display_includes_version() {
        let id = NamespaceId::new("jax").with_api_version(ApiVersion::V2023_12);
        assert_eq!(id.to_string(), "jax@2023.12");
        assert_eq!(NamespaceId::new("jax").to_string(), "jax");
    }

    #[test]
    fn test_missing_linalg_is_unsupported() {
        let ns = Namespace::new(Bare("minimal"));
        let err = ns.linalg().err().unwrap();
        assert_eq!(err, crate::ArrayApiError::unsupported(NamespaceId::new("minimal"), "linalg"));
    }

    #[test]
    fn test_constants_default_to_ieee_values() {
        let ns = Namespace::new(Bare("minimal"));
        assert_eq!(ns.e(), std::f64::consts::E);
        assert_eq!(ns.pi(), std::f64::consts::PI);
        assert!(ns.nan().is_nan());
    }
}
