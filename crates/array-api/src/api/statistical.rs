use super::namespace_of;
use crate::args::{ReduceOptions, SumOptions, VarianceOptions};
use crate::protocol::ArrayRef;
use crate::Result;

pub fn max(x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.max(x, opts)
}

pub fn mean(x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.mean(x, opts)
}

pub fn min(x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.min(x, opts)
}

pub fn prod(x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.prod(x, opts)
}

/// Standard deviation; `opts.correction` sets the degrees of freedom.
pub fn std(x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.std(x, opts)
}

pub fn sum(x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.sum(x, opts)
}

pub fn var(x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.var(x, opts)
}
