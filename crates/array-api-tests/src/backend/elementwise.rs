//! Elementwise functions for the test backend

use super::broadcast::broadcast_binary_op;
use super::data_type::{floating, promote};
use super::NdNamespace;
use array_api::ops::ElementwiseFunctions;
use array_api::protocol::ArrayRef;
use array_api::{ArrayApiError, Result, StandardDType};

fn same(dtype: StandardDType) -> Result<StandardDType> {
    Ok(dtype)
}

fn to_float(dtype: StandardDType) -> Result<StandardDType> {
    Ok(floating(dtype))
}

fn to_bool(_: StandardDType) -> Result<StandardDType> {
    Ok(StandardDType::Bool)
}

fn integral(dtype: StandardDType) -> Result<StandardDType> {
    if dtype.is_integral() || dtype == StandardDType::Bool {
        Ok(dtype)
    } else {
        Err(ArrayApiError::InvalidArgument(format!(
            "bitwise operations require integer or boolean operands, got {dtype}"
        )))
    }
}

fn truth(v: f64) -> f64 {
    (v != 0.0) as u8 as f64
}

/// Floor-mode remainder: the result takes the sign of the divisor.
fn remainder(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
    } else {
        r
    }
}

fn logaddexp(x: f64, y: f64) -> f64 {
    let max = x.max(y);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + ((x - max).exp() + (y - max).exp()).ln()
}

impl NdNamespace {
    fn map_unary<D, F>(&self, x: &ArrayRef, result_dtype: D, op: F) -> Result<ArrayRef>
    where
        D: Fn(StandardDType) -> Result<StandardDType>,
        F: Fn(f64) -> f64,
    {
        let arr = self.local(x)?;
        let dtype = result_dtype(arr.dtype_tag())?;
        Ok(self.wrap(arr.as_ndarray().mapv(op), dtype))
    }

    fn map_binary<D, F>(&self, x1: &ArrayRef, x2: &ArrayRef, result_dtype: D, op: F) -> Result<ArrayRef>
    where
        D: Fn(StandardDType) -> Result<StandardDType>,
        F: Fn(f64, f64) -> f64,
    {
        let (a, b) = (self.local(x1)?, self.local(x2)?);
        let operands = promote(a.dtype_tag(), b.dtype_tag())?;
        let dtype = result_dtype(operands)?;
        let data = broadcast_binary_op(a.as_ndarray(), b.as_ndarray(), op)?;
        Ok(self.wrap(data, dtype))
    }
}

macro_rules! impl_unary_op {
    ($name:ident, $dtype:expr, $op:expr) => {
        fn $name(&self, x: &ArrayRef) -> Result<ArrayRef> {
            self.map_unary(x, $dtype, $op)
        }
    };
}

macro_rules! impl_binary_op {
    ($name:ident, $dtype:expr, $op:expr) => {
        fn $name(&self, x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
            self.map_binary(x1, x2, $dtype, $op)
        }
    };
}

impl ElementwiseFunctions for NdNamespace {
    // Trigonometric
    impl_unary_op!(sin, to_float, |x: f64| x.sin());
    impl_unary_op!(cos, to_float, |x: f64| x.cos());
    impl_unary_op!(tan, to_float, |x: f64| x.tan());
    impl_unary_op!(asin, to_float, |x: f64| x.asin());
    impl_unary_op!(acos, to_float, |x: f64| x.acos());
    impl_unary_op!(atan, to_float, |x: f64| x.atan());

    // Hyperbolic
    impl_unary_op!(sinh, to_float, |x: f64| x.sinh());
    impl_unary_op!(cosh, to_float, |x: f64| x.cosh());
    impl_unary_op!(tanh, to_float, |x: f64| x.tanh());
    impl_unary_op!(asinh, to_float, |x: f64| x.asinh());
    impl_unary_op!(acosh, to_float, |x: f64| x.acosh());
    impl_unary_op!(atanh, to_float, |x: f64| x.atanh());

    // Exponential and logarithmic
    impl_unary_op!(exp, to_float, |x: f64| x.exp());
    impl_unary_op!(expm1, to_float, |x: f64| x.exp_m1());
    impl_unary_op!(log, to_float, |x: f64| x.ln());
    impl_unary_op!(log1p, to_float, |x: f64| x.ln_1p());
    impl_unary_op!(log2, to_float, |x: f64| x.log2());
    impl_unary_op!(log10, to_float, |x: f64| x.log10());
    impl_unary_op!(sqrt, to_float, |x: f64| x.sqrt());

    // Rounding
    impl_unary_op!(ceil, same, |x: f64| x.ceil());
    impl_unary_op!(floor, same, |x: f64| x.floor());
    impl_unary_op!(round, same, |x: f64| x.round_ties_even());
    impl_unary_op!(trunc, same, |x: f64| x.trunc());

    // Sign and magnitude
    impl_unary_op!(abs, same, |x: f64| x.abs());
    impl_unary_op!(negative, same, |x: f64| -x);
    impl_unary_op!(positive, same, |x: f64| x);
    impl_unary_op!(square, same, |x: f64| x * x);
    impl_unary_op!(sign, same, |x: f64| if x == 0.0 || x.is_nan() { x } else { x.signum() });

    // Classification
    impl_unary_op!(isfinite, to_bool, |x: f64| x.is_finite() as u8 as f64);
    impl_unary_op!(isinf, to_bool, |x: f64| x.is_infinite() as u8 as f64);
    impl_unary_op!(isnan, to_bool, |x: f64| x.is_nan() as u8 as f64);

    // Logical and bitwise
    impl_unary_op!(logical_not, to_bool, |x: f64| (x == 0.0) as u8 as f64);

    fn bitwise_invert(&self, x: &ArrayRef) -> Result<ArrayRef> {
        let arr = self.local(x)?;
        let dtype = integral(arr.dtype_tag())?;
        let data = if dtype == StandardDType::Bool {
            arr.as_ndarray().mapv(|v| (v == 0.0) as u8 as f64)
        } else {
            arr.as_ndarray().mapv(|v| !(v as i64) as f64)
        };
        Ok(self.wrap(data, dtype))
    }

    // Arithmetic
    impl_binary_op!(add, same, |x, y| x + y);
    impl_binary_op!(subtract, same, |x, y| x - y);
    impl_binary_op!(multiply, same, |x, y| x * y);
    impl_binary_op!(divide, to_float, |x, y| x / y);
    impl_binary_op!(floor_divide, same, |x: f64, y: f64| (x / y).floor());
    impl_binary_op!(remainder, same, remainder);
    impl_binary_op!(pow, same, |x: f64, y: f64| x.powf(y));
    impl_binary_op!(atan2, to_float, |x: f64, y: f64| x.atan2(y));
    impl_binary_op!(logaddexp, to_float, logaddexp);

    // Comparison
    impl_binary_op!(equal, to_bool, |x, y| (x == y) as u8 as f64);
    impl_binary_op!(not_equal, to_bool, |x, y| (x != y) as u8 as f64);
    impl_binary_op!(greater, to_bool, |x, y| (x > y) as u8 as f64);
    impl_binary_op!(greater_equal, to_bool, |x, y| (x >= y) as u8 as f64);
    impl_binary_op!(less, to_bool, |x, y| (x < y) as u8 as f64);
    impl_binary_op!(less_equal, to_bool, |x, y| (x <= y) as u8 as f64);

    // Logical
    impl_binary_op!(logical_and, to_bool, |x, y| truth(x) * truth(y));
    impl_binary_op!(logical_or, to_bool, |x, y| truth(x).max(truth(y)));
    impl_binary_op!(logical_xor, to_bool, |x, y| (truth(x) != truth(y)) as u8 as f64);

    // Bitwise
    impl_binary_op!(bitwise_and, integral, |x, y| ((x as i64) & (y as i64)) as f64);
    impl_binary_op!(bitwise_or, integral, |x, y| ((x as i64) | (y as i64)) as f64);
    impl_binary_op!(bitwise_xor, integral, |x, y| ((x as i64) ^ (y as i64)) as f64);
    impl_binary_op!(bitwise_left_shift, integral, |x, y| {
        (x as i64).checked_shl(y as u32).unwrap_or(0) as f64
    });
    impl_binary_op!(bitwise_right_shift, integral, |x, y| {
        (x as i64).checked_shr(y as u32).unwrap_or(if x < 0.0 { -1 } else { 0 }) as f64
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::*;

    fn ns() -> NdNamespace {
        NdNamespace::new("nd")
    }

    // ============ unary ============

    #[test]
    fn test_sqrt_of_integers_is_float() {
        let ns = ns();
        let x = ns.from_vec_typed(vec![1.0, 4.0, 9.0], &[3], StandardDType::Int32).unwrap();
        let y = ns.sqrt(&x).unwrap();
        assert_eq!(nd(&y).dtype_tag(), StandardDType::Float64);
        assert_eq!(nd(&y).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_round_half_to_even() {
        let x = ns().from_vec(vec![0.5, 1.5, 2.5, -0.5], &[4]).unwrap();
        let y = ns().round(&x).unwrap();
        assert_eq!(nd(&y).to_vec(), vec![0.0, 2.0, 2.0, -0.0]);
    }

    #[test]
    fn test_isnan_returns_bool() {
        let x = ns().from_vec(vec![1.0, f64::NAN], &[2]).unwrap();
        let y = ns().isnan(&x).unwrap();
        assert_eq!(nd(&y).dtype_tag(), StandardDType::Bool);
        assert_eq!(nd(&y).to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_bitwise_invert() {
        let ns = ns();
        let x = ns.from_vec_typed(vec![0.0, 5.0], &[2], StandardDType::Int8).unwrap();
        assert_eq!(nd(&ns.bitwise_invert(&x).unwrap()).to_vec(), vec![-1.0, -6.0]);

        let f = ns.from_vec(vec![1.0], &[1]).unwrap();
        assert!(matches!(
            ns.bitwise_invert(&f),
            Err(ArrayApiError::InvalidArgument(_))
        ));
    }

    // ============ binary ============

    #[test]
    fn test_add_broadcasts() {
        let ns = ns();
        let a = ns.from_vec(vec![1.0, 2.0], &[2, 1]).unwrap();
        let b = ns.from_vec(vec![10.0, 20.0, 30.0], &[3]).unwrap();
        let c = ns.add(&a, &b).unwrap();
        assert_eq!(nd(&c).dims(), &[2, 3]);
        assert_eq!(nd(&c).to_vec(), vec![11.0, 21.0, 31.0, 12.0, 22.0, 32.0]);
    }

    #[test]
    fn test_add_incompatible_shapes() {
        let ns = ns();
        let a = ns.from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = ns.from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        assert_eq!(
            ns.add(&a, &b).unwrap_err(),
            ArrayApiError::IncompatibleShapes(vec![2], vec![3])
        );
    }

    #[test]
    fn test_remainder_follows_divisor_sign() {
        let ns = ns();
        let a = ns.from_vec(vec![5.0, -5.0, 5.0], &[3]).unwrap();
        let b = ns.from_vec(vec![3.0, 3.0, -3.0], &[3]).unwrap();
        assert_eq!(nd(&ns.remainder(&a, &b).unwrap()).to_vec(), vec![2.0, 1.0, -1.0]);
    }

    #[test]
    fn test_divide_integers_is_float() {
        let ns = ns();
        let a = ns.from_vec_typed(vec![1.0, 3.0], &[2], StandardDType::Int64).unwrap();
        let b = ns.from_vec_typed(vec![2.0, 2.0], &[2], StandardDType::Int64).unwrap();
        let c = ns.divide(&a, &b).unwrap();
        assert_eq!(nd(&c).dtype_tag(), StandardDType::Float64);
        assert_eq!(nd(&c).to_vec(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_logaddexp() {
        let ns = ns();
        let a = ns.from_vec(vec![0.0], &[1]).unwrap();
        let r = ns.logaddexp(&a, &a).unwrap();
        assert!(approx_eq(nd(&r).to_vec()[0], 2f64.ln(), DEFAULT_TOL));
    }

    #[test]
    fn test_comparison_and_logical() {
        let ns = ns();
        let a = ns.from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let b = ns.from_vec(vec![3.0, 2.0, 1.0], &[3]).unwrap();
        let lt = ns.less(&a, &b).unwrap();
        assert_eq!(nd(&lt).dtype_tag(), StandardDType::Bool);
        assert_eq!(nd(&lt).to_vec(), vec![1.0, 0.0, 0.0]);

        let eq = ns.equal(&a, &b).unwrap();
        let either = ns.logical_or(&lt, &eq).unwrap();
        assert_eq!(nd(&either).to_vec(), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bitwise_shifts() {
        let ns = ns();
        let a = ns.from_vec_typed(vec![1.0, -8.0], &[2], StandardDType::Int32).unwrap();
        let s = ns.from_vec_typed(vec![3.0, 1.0], &[2], StandardDType::Int32).unwrap();
        assert_eq!(nd(&ns.bitwise_left_shift(&a, &s).unwrap()).to_vec(), vec![8.0, -16.0]);
        assert_eq!(nd(&ns.bitwise_right_shift(&a, &s).unwrap()).to_vec(), vec![0.0, -4.0]);
    }
}
