use super::namespace_of;
use crate::args::ReduceOptions;
use crate::protocol::ArrayRef;
use crate::Result;

/// Logical AND reduction.
pub fn all(x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.all(x, opts)
}

/// Logical OR reduction.
pub fn any(x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.any(x, opts)
}
