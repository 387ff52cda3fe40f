use super::namespace_of;
use crate::args::SortOptions;
use crate::protocol::ArrayRef;
use crate::Result;

pub fn argsort(x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.argsort(x, opts)
}

pub fn sort(x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
    namespace_of(&[x])?.sort(x, opts)
}
