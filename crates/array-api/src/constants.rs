//! Constants of the standard

/// IEEE 754 floating-point representation of Euler's constant.
pub const E: f64 = std::f64::consts::E;

/// IEEE 754 floating-point representation of positive infinity.
pub const INF: f64 = f64::INFINITY;

/// IEEE 754 floating-point representation of Not a Number.
pub const NAN: f64 = f64::NAN;

/// IEEE 754 floating-point representation of pi.
pub const PI: f64 = std::f64::consts::PI;
