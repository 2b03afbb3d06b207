use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Upper bound on the size, in bits, of an exactly computed power.
///
/// Larger results are rejected with [`RuntimeError::Overflow`] instead of
/// consuming unbounded time and memory.
pub const MAX_EXACT_BITS: u64 = 1 << 24;

/// Upper bound on factorial arguments.
pub const MAX_FACTORIAL: u64 = 100_000;

/// Computes `n!` exactly by repeated multiplication.
///
/// ## Errors
/// Returns [`RuntimeError::FactorialDomain`] for negative `n` and
/// [`RuntimeError::Overflow`] when `n` exceeds [`MAX_FACTORIAL`].
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use operon::util::num::factorial;
///
/// assert_eq!(factorial(&BigInt::from(0)).unwrap(), BigInt::from(1));
/// assert_eq!(factorial(&BigInt::from(5)).unwrap(), BigInt::from(120));
/// assert!(factorial(&BigInt::from(-1)).is_err());
/// ```
pub fn factorial(n: &BigInt) -> EvalResult<BigInt> {
    if n.is_negative() {
        return Err(RuntimeError::FactorialDomain { value: n.to_string() });
    }
    let limit = n.to_u64()
                 .filter(|k| *k <= MAX_FACTORIAL)
                 .ok_or(RuntimeError::Overflow)?;

    let mut result = BigInt::one();
    for k in 2..=limit {
        result *= k;
    }
    Ok(result)
}

/// Narrows a non-negative exponent to `u32`, refusing results that would
/// exceed [`MAX_EXACT_BITS`].
///
/// Bases 0, 1 and -1 take any exponent: it is reduced to 0, 1 or 2 with the
/// same result.
///
/// ## Parameters
/// - `base`: The integer that will be raised (numerator or denominator).
/// - `exponent`: The non-negative exponent.
///
/// ## Returns
/// - `Ok(u32)`: The exponent, if the power stays within bounds.
/// - `Err(RuntimeError::Overflow)`: Otherwise.
pub fn checked_exponent(base: &BigInt, exponent: &BigInt) -> EvalResult<u32> {
    if base.magnitude().is_one() || base.is_zero() {
        return Ok(if exponent.is_zero() {
                      0
                  } else if exponent.is_odd() {
                      1
                  } else {
                      2
                  });
    }
    let e = exponent.to_u32().ok_or(RuntimeError::Overflow)?;
    if base.bits().saturating_mul(u64::from(e)) > MAX_EXACT_BITS {
        return Err(RuntimeError::Overflow);
    }
    Ok(e)
}

/// Converts a big integer to `f64`, saturating to infinity when out of range.
#[must_use]
pub fn bigint_to_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(if value.is_negative() {
                                 f64::NEG_INFINITY
                             } else {
                                 f64::INFINITY
                             })
}
