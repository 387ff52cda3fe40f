use super::namespace_of;
use crate::ops::{UniqueAll, UniqueCounts, UniqueInverse};
use crate::protocol::ArrayRef;
use crate::Result;

pub fn unique_all(x: &ArrayRef) -> Result<UniqueAll> {
    namespace_of(&[x])?.unique_all(x)
}

pub fn unique_counts(x: &ArrayRef) -> Result<UniqueCounts> {
    namespace_of(&[x])?.unique_counts(x)
}

pub fn unique_inverse(x: &ArrayRef) -> Result<UniqueInverse> {
    namespace_of(&[x])?.unique_inverse(x)
}

pub fn unique_values(x: &ArrayRef) -> Result<ArrayRef> {
    namespace_of(&[x])?.unique_values(x)
}
