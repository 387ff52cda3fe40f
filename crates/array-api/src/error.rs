//! Error types for array-api

use crate::namespace::NamespaceId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayApiError {
    /// None of the inputs satisfied the required capability set.
    #[error("Unrecognized array input")]
    UnrecognizedInput,

    /// The inputs were reported by more than one namespace.
    #[error("Multiple namespaces for array inputs: {}", format_ids(.namespaces))]
    MultipleNamespaces { namespaces: Vec<NamespaceId> },

    #[error("Namespace {namespace} does not implement '{operation}'")]
    Unsupported {
        namespace: NamespaceId,
        operation: &'static str,
    },

    #[error("Namespace {namespace} cannot operate on an array from {found}")]
    ForeignArray {
        namespace: NamespaceId,
        found: String,
    },

    #[error("Incompatible shapes for operation: {0:?} and {1:?}")]
    IncompatibleShapes(Vec<usize>, Vec<usize>),

    #[error("Invalid axis: {axis} for array with {ndim} dimensions")]
    InvalidAxis { axis: isize, ndim: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl ArrayApiError {
    pub fn unsupported(namespace: NamespaceId, operation: &'static str) -> Self {
        Self::Unsupported {
            namespace,
            operation,
        }
    }

    pub fn is_unrecognized_input(&self) -> bool {
        matches!(self, Self::UnrecognizedInput)
    }

    pub fn is_multiple_namespaces(&self) -> bool {
        matches!(self, Self::MultipleNamespaces { .. })
    }
}

fn format_ids(ids: &[NamespaceId]) -> String {
    let names: Vec<String> = ids.iter().map(ToString::to_string).collect();
    format!("{{{}}}", names.join(", "))
}

pub type Result<T> = std::result::Result<T, ArrayApiError>;
