//! Shared test suite for array-api
//!
//! Holds an ndarray-backed test backend and the scenario tests that run
//! resolution and forwarding against it. Several instances of the backend
//! under different names stand in for unrelated array libraries.

pub mod backend;
pub mod conformance;
pub mod forwarding;
pub mod resolution;

/// Test utilities
pub mod utils {
    use crate::backend::NdArray;
    use array_api::ArrayRef;

    /// Check if two f64 values are approximately equal
    pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() && b.is_nan() {
            return true;
        }
        if a.is_infinite() && b.is_infinite() {
            return a.signum() == b.signum();
        }
        (a - b).abs() < tol
    }

    /// Borrows `x` as a test backend array. Panics for anything else.
    pub fn nd(x: &ArrayRef) -> &NdArray {
        x.as_any()
            .downcast_ref::<NdArray>()
            .unwrap_or_else(|| panic!("not a test backend array: {x:?}"))
    }

    /// Check if two test backend arrays are approximately equal
    pub fn arrays_approx_eq(a: &ArrayRef, b: &ArrayRef, tol: f64) -> bool {
        let (a, b) = (nd(a), nd(b));
        if a.dims() != b.dims() {
            return false;
        }
        a.to_vec()
            .iter()
            .zip(b.to_vec().iter())
            .all(|(&x, &y)| approx_eq(x, y, tol))
    }

    /// Default tolerance for floating point comparisons
    pub const DEFAULT_TOL: f64 = 1e-10;

    /// Relaxed tolerance for operations with accumulated error
    pub const RELAXED_TOL: f64 = 1e-6;
}

/// Macro to generate a test against one backend namespace
///
/// `$ns` names the namespace value inside the body.
#[macro_export]
macro_rules! backend_tests {
    ($backend:expr, $test_name:ident, |$ns:ident| $body:block) => {
        #[test]
        fn $test_name() {
            let $ns = $backend;
            $body
        }
    };
}
