use super::namespace_of;
use crate::args::ArgReduceOptions;
use crate::protocol::ArrayRef;
use crate::Result;

pub fn argmax(x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.argmax(x, opts)
}

pub fn argmin(x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.argmin(x, opts)
}

pub fn nonzero(x: &ArrayRef) -> Result<Vec<ArrayRef>> {
    namespace_of(&[x])?.nonzero(x)
}

/// Picks from `x1` where `condition` holds and from `x2` elsewhere.
pub fn where_(condition: &ArrayRef, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[condition, x1, x2])?.where_(condition, x1, x2)
}
