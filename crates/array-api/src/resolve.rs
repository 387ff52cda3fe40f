//! Namespace resolution
//!
//! Given the arguments of an operation, find the one namespace that owns all
//! of the conformant ones.

use crate::namespace::Namespace;
use crate::protocol::{Candidate, CapabilitySet};
use crate::version::ApiVersion;
use crate::{ArrayApiError, Result};
use indexmap::IndexSet;
use tracing::{debug, trace};

/// Configurable namespace resolver
///
/// Holds configuration only; every call to [`Resolver::resolve`] starts
/// from scratch.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    capabilities: CapabilitySet,
    api_version: Option<ApiVersion>,
}

impl Resolver {
    /// Resolver requiring only the base capability, with no API version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities a value must satisfy (all of them) to be considered.
    ///
    /// The base namespace capability is always checked as well, since a
    /// value without it has no namespace to report.
    pub fn with_capabilities(mut self, capabilities: impl Into<CapabilitySet>) -> Self {
        self.capabilities = capabilities.into();
        self
    }

    /// Version tag passed to every namespace-reporting call.
    pub fn with_api_version(mut self, api_version: impl Into<ApiVersion>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the single namespace shared by every qualifying value in `xs`.
    ///
    /// Values are inspected in order. Fails with
    /// [`ArrayApiError::UnrecognizedInput`] if no value qualifies, and with
    /// [`ArrayApiError::MultipleNamespaces`] (listing each distinct
    /// namespace in first-seen order) if qualifying values disagree.
    pub fn resolve<'a, I>(&self, xs: I) -> Result<Namespace>
    where
        I: IntoIterator<Item = &'a dyn Candidate>,
    {
        let mut namespaces: IndexSet<Namespace> = IndexSet::new();

        for (index, x) in xs.into_iter().enumerate() {
            if !self.capabilities.is_satisfied_by(x) {
                trace!(index, "input skipped: missing required capability");
                continue;
            }
            let Some(reporter) = x.as_array_namespace() else {
                trace!(index, "input skipped: reports no namespace");
                continue;
            };
            let namespace = reporter.array_namespace(self.api_version.as_ref());
            trace!(index, namespace = %namespace, "input qualifies");
            namespaces.insert(namespace);
        }

        let mut found = namespaces.into_iter();
        match (found.next(), found.next()) {
            (None, _) => {
                debug!(capabilities = ?self.capabilities, "no conformant input");
                Err(ArrayApiError::UnrecognizedInput)
            }
            (Some(namespace), None) => {
                debug!(namespace = %namespace, "namespace resolved");
                Ok(namespace)
            }
            (Some(first), Some(second)) => {
                let namespaces: Vec<_> = [first, second]
                    .into_iter()
                    .chain(found)
                    .map(|ns| ns.id())
                    .collect();
                debug!(count = namespaces.len(), "inputs span multiple namespaces");
                Err(ArrayApiError::MultipleNamespaces { namespaces })
            }
        }
    }
}

/// Resolves with the default capability set and no API version.
pub fn get_namespace<'a, I>(xs: I) -> Result<Namespace>
where
    I: IntoIterator<Item = &'a dyn Candidate>,
{
    Resolver::new().resolve(xs)
}
