use super::{namespace_of, namespace_of_all};
use crate::args::DTypeOrArray;
use crate::dtype::{DTypeRef, FInfo, IInfo};
use crate::namespace::Namespace;
use crate::protocol::{ArrayRef, Candidate};
use crate::resolve::get_namespace;
use crate::Result;

/// Copies `x` to `dtype`, ignoring promotion rules.
pub fn astype(x: &ArrayRef, dtype: &DTypeRef, copy: bool) -> Result<ArrayRef> {
    namespace_of(&[x])?.astype(x, dtype, copy)
}

pub fn broadcast_arrays(arrays: &[ArrayRef]) -> Result<Vec<ArrayRef>> {
    namespace_of_all(arrays)?.broadcast_arrays(arrays)
}

pub fn broadcast_to(x: &ArrayRef, shape: &[usize]) -> Result<ArrayRef> {
    namespace_of(&[x])?.broadcast_to(x, shape)
}

/// Whether `from` can be cast to `to`. Dispatches on `from`, which must
/// therefore be an array.
pub fn can_cast(from: &DTypeOrArray, to: &DTypeRef) -> Result<bool> {
    dtype_namespace(std::slice::from_ref(from))?.can_cast(from, to)
}

pub fn finfo(dtype: &DTypeOrArray) -> Result<FInfo> {
    dtype_namespace(std::slice::from_ref(dtype))?.finfo(dtype)
}

pub fn iinfo(dtype: &DTypeOrArray) -> Result<IInfo> {
    dtype_namespace(std::slice::from_ref(dtype))?.iinfo(dtype)
}

/// Promoted data type of the arguments. At least one must be an array.
pub fn result_type(arrays_and_dtypes: &[DTypeOrArray]) -> Result<DTypeRef> {
    dtype_namespace(arrays_and_dtypes)?.result_type(arrays_and_dtypes)
}

/// Bare data types carry no namespace; only the array arguments count.
fn dtype_namespace(args: &[DTypeOrArray]) -> Result<Namespace> {
    get_namespace(
        args.iter()
            .filter_map(DTypeOrArray::as_array)
            .map(|x| &**x as &dyn Candidate),
    )
}
