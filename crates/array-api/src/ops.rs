//! Operation traits that namespaces implement
//!
//! Every operation has a default body that fails with
//! [`ArrayApiError::Unsupported`], so a backend implements exactly the
//! operations it supports. Broadcasting, type promotion and numerics are the
//! backend's business; these traits only fix the call shapes.

#![allow(unused_variables)]

use crate::args::*;
use crate::dtype::{DTypeRef, FInfo, IInfo};
use crate::namespace::NamespaceIdentity;
use crate::protocol::ArrayRef;
use crate::{constants, ArrayApiError, Result};

macro_rules! unsupported {
    ($self:ident, $op:expr) => {
        Err(ArrayApiError::unsupported($self.id(), $op))
    };
}

/// Invokes `$callback!` with the names of the one-argument elementwise
/// functions.
macro_rules! with_unary_functions {
    ($callback:ident) => {
        $callback!(
            abs,
            acos,
            acosh,
            asin,
            asinh,
            atan,
            atanh,
            bitwise_invert,
            ceil,
            cos,
            cosh,
            exp,
            expm1,
            floor,
            isfinite,
            isinf,
            isnan,
            log,
            log1p,
            log2,
            log10,
            logical_not,
            negative,
            positive,
            round,
            sign,
            sin,
            sinh,
            square,
            sqrt,
            tan,
            tanh,
            trunc,
        );
    };
}

/// Invokes `$callback!` with the names of the two-argument elementwise
/// functions.
macro_rules! with_binary_functions {
    ($callback:ident) => {
        $callback!(
            add,
            atan2,
            bitwise_and,
            bitwise_left_shift,
            bitwise_or,
            bitwise_right_shift,
            bitwise_xor,
            divide,
            equal,
            floor_divide,
            greater,
            greater_equal,
            less,
            less_equal,
            logaddexp,
            logical_and,
            logical_or,
            logical_xor,
            multiply,
            not_equal,
            pow,
            remainder,
            subtract,
        );
    };
}

pub(crate) use with_binary_functions;
pub(crate) use with_unary_functions;

macro_rules! unary_defaults {
    ($($name:ident),+ $(,)?) => {
        $(
            fn $name(&self, x: &ArrayRef) -> Result<ArrayRef> {
                unsupported!(self, stringify!($name))
            }
        )+
    };
}

macro_rules! binary_defaults {
    ($($name:ident),+ $(,)?) => {
        $(
            fn $name(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
                unsupported!(self, stringify!($name))
            }
        )+
    };
}

/// Constants exposed by a namespace
pub trait Constants {
    fn e(&self) -> f64 {
        constants::E
    }

    fn inf(&self) -> f64 {
        constants::INF
    }

    fn nan(&self) -> f64 {
        constants::NAN
    }

    fn pi(&self) -> f64 {
        constants::PI
    }
}

/// Array creation functions
pub trait CreationFunctions: NamespaceIdentity {
    /// Evenly spaced values in `[start, stop)`. With `stop = None` the
    /// interval is `[0, start)`.
    fn arange(
        &self,
        start: f64,
        stop: Option<f64>,
        step: f64,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        unsupported!(self, "arange")
    }

    fn asarray(
        &self,
        obj: &AsArrayInput,
        opts: &CreationOptions,
        copy: Option<bool>,
    ) -> Result<ArrayRef> {
        unsupported!(self, "asarray")
    }

    fn empty(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "empty")
    }

    fn empty_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "empty_like")
    }

    /// Two-dimensional array with ones on the `k`th diagonal.
    fn eye(
        &self,
        n_rows: usize,
        n_cols: Option<usize>,
        k: isize,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        unsupported!(self, "eye")
    }

    fn full(&self, shape: &[usize], fill_value: f64, opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "full")
    }

    fn full_like(
        &self,
        x: &ArrayRef,
        fill_value: f64,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        unsupported!(self, "full_like")
    }

    fn linspace(
        &self,
        start: f64,
        stop: f64,
        num: usize,
        endpoint: bool,
        opts: &CreationOptions,
    ) -> Result<ArrayRef> {
        unsupported!(self, "linspace")
    }

    fn meshgrid(&self, arrays: &[ArrayRef], indexing: Indexing) -> Result<Vec<ArrayRef>> {
        unsupported!(self, "meshgrid")
    }

    fn ones(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "ones")
    }

    fn ones_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "ones_like")
    }

    /// Lower triangle of a matrix (or stack of matrices).
    fn tril(&self, x: &ArrayRef, k: isize) -> Result<ArrayRef> {
        unsupported!(self, "tril")
    }

    /// Upper triangle of a matrix (or stack of matrices).
    fn triu(&self, x: &ArrayRef, k: isize) -> Result<ArrayRef> {
        unsupported!(self, "triu")
    }

    fn zeros(&self, shape: &[usize], opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "zeros")
    }

    fn zeros_like(&self, x: &ArrayRef, opts: &CreationOptions) -> Result<ArrayRef> {
        unsupported!(self, "zeros_like")
    }
}

/// Data type functions
pub trait DataTypeFunctions: NamespaceIdentity {
    /// Copies `x` to `dtype` irrespective of promotion rules. With
    /// `copy = false` and a matching dtype the input may be returned as-is.
    fn astype(&self, x: &ArrayRef, dtype: &DTypeRef, copy: bool) -> Result<ArrayRef> {
        unsupported!(self, "astype")
    }

    fn broadcast_arrays(&self, arrays: &[ArrayRef]) -> Result<Vec<ArrayRef>> {
        unsupported!(self, "broadcast_arrays")
    }

    fn broadcast_to(&self, x: &ArrayRef, shape: &[usize]) -> Result<ArrayRef> {
        unsupported!(self, "broadcast_to")
    }

    fn can_cast(&self, from: &DTypeOrArray, to: &DTypeRef) -> Result<bool> {
        unsupported!(self, "can_cast")
    }

    fn finfo(&self, dtype: &DTypeOrArray) -> Result<FInfo> {
        unsupported!(self, "finfo")
    }

    fn iinfo(&self, dtype: &DTypeOrArray) -> Result<IInfo> {
        unsupported!(self, "iinfo")
    }

    fn result_type(&self, arrays_and_dtypes: &[DTypeOrArray]) -> Result<DTypeRef> {
        unsupported!(self, "result_type")
    }
}

/// Elementwise functions
///
/// Binary functions broadcast their operands according to the backend's
/// broadcasting rules.
pub trait ElementwiseFunctions: NamespaceIdentity {
    with_unary_functions!(unary_defaults);
    with_binary_functions!(binary_defaults);
}

/// Linear algebra functions in the main namespace
pub trait LinearAlgebraFunctions: NamespaceIdentity {
    fn matmul(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "matmul")
    }

    /// Transposes the last two axes.
    fn matrix_transpose(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "matrix_transpose")
    }

    fn tensordot(&self, x1: &ArrayRef, x2: &ArrayRef, axes: &TensordotAxes) -> Result<ArrayRef> {
        unsupported!(self, "tensordot")
    }

    fn vecdot(&self, x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        unsupported!(self, "vecdot")
    }
}

/// The `linalg` extension namespace
pub trait LinalgFunctions: NamespaceIdentity + Send + Sync {
    fn cholesky(&self, x: &ArrayRef, upper: bool) -> Result<ArrayRef> {
        unsupported!(self, "linalg.cholesky")
    }

    fn cross(&self, x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        unsupported!(self, "linalg.cross")
    }

    fn det(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.det")
    }

    fn diagonal(&self, x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
        unsupported!(self, "linalg.diagonal")
    }

    /// Eigenvalues and eigenvectors of a symmetric matrix.
    fn eigh(&self, x: &ArrayRef) -> Result<(ArrayRef, ArrayRef)> {
        unsupported!(self, "linalg.eigh")
    }

    fn eigvalsh(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.eigvalsh")
    }

    fn inv(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.inv")
    }

    fn matmul(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.matmul")
    }

    fn matrix_norm(&self, x: &ArrayRef, keepdims: bool, ord: MatrixNormOrd) -> Result<ArrayRef> {
        unsupported!(self, "linalg.matrix_norm")
    }

    fn matrix_power(&self, x: &ArrayRef, n: i64) -> Result<ArrayRef> {
        unsupported!(self, "linalg.matrix_power")
    }

    fn matrix_rank(&self, x: &ArrayRef, rtol: Option<&Tolerance>) -> Result<ArrayRef> {
        unsupported!(self, "linalg.matrix_rank")
    }

    fn matrix_transpose(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.matrix_transpose")
    }

    fn outer(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.outer")
    }

    fn pinv(&self, x: &ArrayRef, rtol: Option<&Tolerance>) -> Result<ArrayRef> {
        unsupported!(self, "linalg.pinv")
    }

    fn qr(&self, x: &ArrayRef, mode: QrMode) -> Result<(ArrayRef, ArrayRef)> {
        unsupported!(self, "linalg.qr")
    }

    /// Sign and natural log of the absolute determinant.
    fn slogdet(&self, x: &ArrayRef) -> Result<(ArrayRef, ArrayRef)> {
        unsupported!(self, "linalg.slogdet")
    }

    fn solve(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.solve")
    }

    /// `(U, S, Vh)`.
    fn svd(&self, x: &ArrayRef, full_matrices: bool) -> Result<(ArrayRef, ArrayRef, ArrayRef)> {
        unsupported!(self, "linalg.svd")
    }

    fn svdvals(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "linalg.svdvals")
    }

    fn tensordot(&self, x1: &ArrayRef, x2: &ArrayRef, axes: &TensordotAxes) -> Result<ArrayRef> {
        unsupported!(self, "linalg.tensordot")
    }

    fn trace(&self, x: &ArrayRef, offset: isize) -> Result<ArrayRef> {
        unsupported!(self, "linalg.trace")
    }

    fn vecdot(&self, x1: &ArrayRef, x2: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        unsupported!(self, "linalg.vecdot")
    }

    fn vector_norm(&self, x: &ArrayRef, axis: &Axes, keepdims: bool, ord: f64) -> Result<ArrayRef> {
        unsupported!(self, "linalg.vector_norm")
    }
}

/// Array manipulation functions
pub trait ManipulationFunctions: NamespaceIdentity {
    /// Joins arrays along an existing axis; `axis = None` flattens first.
    fn concat(&self, arrays: &[ArrayRef], axis: Option<isize>) -> Result<ArrayRef> {
        unsupported!(self, "concat")
    }

    fn expand_dims(&self, x: &ArrayRef, axis: isize) -> Result<ArrayRef> {
        unsupported!(self, "expand_dims")
    }

    fn flip(&self, x: &ArrayRef, axis: &Axes) -> Result<ArrayRef> {
        unsupported!(self, "flip")
    }

    fn permute_dims(&self, x: &ArrayRef, axes: &[usize]) -> Result<ArrayRef> {
        unsupported!(self, "permute_dims")
    }

    /// `shape` may contain a single `-1`, inferred from the remaining
    /// dimensions.
    fn reshape(&self, x: &ArrayRef, shape: &[isize], copy: Option<bool>) -> Result<ArrayRef> {
        unsupported!(self, "reshape")
    }

    fn roll(&self, x: &ArrayRef, shift: &[isize], axis: &Axes) -> Result<ArrayRef> {
        unsupported!(self, "roll")
    }

    fn squeeze(&self, x: &ArrayRef, axis: &[isize]) -> Result<ArrayRef> {
        unsupported!(self, "squeeze")
    }

    fn stack(&self, arrays: &[ArrayRef], axis: isize) -> Result<ArrayRef> {
        unsupported!(self, "stack")
    }
}

/// Searching functions
pub trait SearchingFunctions: NamespaceIdentity {
    fn argmax(&self, x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "argmax")
    }

    fn argmin(&self, x: &ArrayRef, opts: &ArgReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "argmin")
    }

    /// One index array per dimension of `x`.
    fn nonzero(&self, x: &ArrayRef) -> Result<Vec<ArrayRef>> {
        unsupported!(self, "nonzero")
    }

    /// `where` in the standard; renamed because `where` is a keyword.
    fn where_(&self, condition: &ArrayRef, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "where")
    }
}

/// Result of `unique_all`.
#[derive(Debug, Clone)]
pub struct UniqueAll {
    pub values: ArrayRef,
    pub indices: ArrayRef,
    pub inverse_indices: ArrayRef,
    pub counts: ArrayRef,
}

/// Result of `unique_counts`.
#[derive(Debug, Clone)]
pub struct UniqueCounts {
    pub values: ArrayRef,
    pub counts: ArrayRef,
}

/// Result of `unique_inverse`.
#[derive(Debug, Clone)]
pub struct UniqueInverse {
    pub values: ArrayRef,
    pub inverse_indices: ArrayRef,
}

/// Set functions
pub trait SetFunctions: NamespaceIdentity {
    fn unique_all(&self, x: &ArrayRef) -> Result<UniqueAll> {
        unsupported!(self, "unique_all")
    }

    fn unique_counts(&self, x: &ArrayRef) -> Result<UniqueCounts> {
        unsupported!(self, "unique_counts")
    }

    fn unique_inverse(&self, x: &ArrayRef) -> Result<UniqueInverse> {
        unsupported!(self, "unique_inverse")
    }

    fn unique_values(&self, x: &ArrayRef) -> Result<ArrayRef> {
        unsupported!(self, "unique_values")
    }
}

/// Sorting functions
pub trait SortingFunctions: NamespaceIdentity {
    fn argsort(&self, x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
        unsupported!(self, "argsort")
    }

    fn sort(&self, x: &ArrayRef, opts: &SortOptions) -> Result<ArrayRef> {
        unsupported!(self, "sort")
    }
}

/// Statistical functions
pub trait StatisticalFunctions: NamespaceIdentity {
    fn max(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "max")
    }

    fn mean(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "mean")
    }

    fn min(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "min")
    }

    fn prod(&self, x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
        unsupported!(self, "prod")
    }

    fn std(&self, x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
        unsupported!(self, "std")
    }

    fn sum(&self, x: &ArrayRef, opts: &SumOptions) -> Result<ArrayRef> {
        unsupported!(self, "sum")
    }

    fn var(&self, x: &ArrayRef, opts: &VarianceOptions) -> Result<ArrayRef> {
        unsupported!(self, "var")
    }
}

/// Utility functions
pub trait UtilityFunctions: NamespaceIdentity {
    fn all(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "all")
    }

    fn any(&self, x: &ArrayRef, opts: &ReduceOptions) -> Result<ArrayRef> {
        unsupported!(self, "any")
    }
}
