use std::{cmp::Ordering, fmt, str::FromStr};

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{FromPrimitive, One, Pow, Signed, Zero};
use ordered_float::OrderedFloat;

use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        lexer::{Token, classify},
    },
    util::num::{bigint_to_f64, checked_exponent, factorial},
};

/// The result of evaluating an element: a number, or the absent value
/// ("void").
pub type Value = Option<Number>;

/// Represents a numeric value in the interpreter.
///
/// Integers and fractions are exact and unbounded. Operations promote to
/// `Float` only when an operand already is one or when no exact result exists
/// (e.g. a fractional exponent). The evaluator never inspects which variant is
/// active; everything goes through the methods below.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    /// An exact integer of arbitrary size.
    Integer(BigInt),
    /// An exact fraction `numerator / denominator`, always normalized: the
    /// denominator is greater than one and shares no factor with the
    /// numerator.
    Fraction(BigInt, BigInt),
    /// A double precision floating-point value.
    Float(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(BigInt::from(v))
    }
}

impl From<BigInt> for Number {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(OrderedFloat(v))
    }
}

impl From<bool> for Number {
    fn from(v: bool) -> Self {
        Self::from(i64::from(v))
    }
}

impl FromStr for Number {
    type Err = ParseError;

    /// Parses a numeric literal.
    ///
    /// # Example
    /// ```
    /// use operon::interpreter::value::core::Number;
    ///
    /// assert_eq!("42".parse::<Number>().unwrap(), Number::from(42));
    /// assert_eq!("2.5".parse::<Number>().unwrap(), Number::from(2.5));
    /// assert!("x".parse::<Number>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match classify(s) {
            Some(Token::Integer(n)) => Ok(Self::Integer(n)),
            Some(Token::Real(r)) => Ok(Self::from(r)),
            _ => Err(ParseError::UnrecognizedToken { token: s.to_string() }),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Fraction(n, d) => write!(f, "{n}/{d}"),
            Self::Float(x) => {
                let text = x.0.to_string();
                if text.contains(['.', 'e', 'i', 'N']) {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            },
        }
    }
}

impl Number {
    /// Builds the normalized exact value `numerator / denominator`.
    ///
    /// # Returns
    /// - `Ok(Number::Integer)` when the denominator divides the numerator.
    /// - `Ok(Number::Fraction)` otherwise, reduced with a positive
    ///   denominator.
    /// - `Err(RuntimeError::DivisionByZero)` for a zero denominator.
    ///
    /// # Example
    /// ```
    /// use num_bigint::BigInt;
    /// use operon::interpreter::value::core::Number;
    ///
    /// let half = Number::fraction(BigInt::from(-2), BigInt::from(-4)).unwrap();
    /// assert_eq!(half.to_string(), "1/2");
    ///
    /// let two = Number::fraction(BigInt::from(6), BigInt::from(3)).unwrap();
    /// assert_eq!(two, Number::from(2));
    /// ```
    pub fn fraction(numerator: BigInt, denominator: BigInt) -> EvalResult<Self> {
        if denominator.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        let gcd = numerator.gcd(&denominator);
        let (mut n, mut d) = (numerator / &gcd, denominator / &gcd);
        if d.is_negative() {
            n = -n;
            d = -d;
        }
        if d.is_one() {
            Ok(Self::Integer(n))
        } else {
            Ok(Self::Fraction(n, d))
        }
    }

    /// Returns the exact `(numerator, denominator)` pair, or `None` for
    /// floats.
    fn ratio(&self) -> Option<(BigInt, BigInt)> {
        match self {
            Self::Integer(n) => Some((n.clone(), BigInt::one())),
            Self::Fraction(n, d) => Some((n.clone(), d.clone())),
            Self::Float(_) => None,
        }
    }

    /// Converts the value to `f64`, losing precision where necessary.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => bigint_to_f64(n),
            Self::Fraction(n, d) => bigint_to_f64(n) / bigint_to_f64(d),
            Self::Float(x) => x.0,
        }
    }

    /// Returns the value as an integer if it is integral, whatever its
    /// representation.
    #[must_use]
    pub fn to_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(n) => Some(n.clone()),
            Self::Fraction(..) => None,
            Self::Float(x) if x.0.fract() == 0.0 => BigInt::from_f64(x.0),
            Self::Float(_) => None,
        }
    }

    /// Tests whether the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_zero(),
            Self::Fraction(..) => false,
            Self::Float(x) => x.0 == 0.0,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// Only exactly 0 and exactly 1 carry a truth value; everything else is
    /// neither true nor false.
    ///
    /// # Example
    /// ```
    /// use operon::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::from(1).truth(), Some(true));
    /// assert_eq!(Number::from(0.0).truth(), Some(false));
    /// assert_eq!(Number::from(5).truth(), None);
    /// ```
    #[must_use]
    pub fn truth(&self) -> Option<bool> {
        match self.to_integer() {
            Some(n) if n.is_zero() => Some(false),
            Some(n) if n.is_one() => Some(true),
            _ => None,
        }
    }

    /// Applies an exact rule when both operands are exact, a float rule
    /// otherwise.
    fn combine(&self,
               other: &Self,
               exact: impl FnOnce((BigInt, BigInt), (BigInt, BigInt)) -> EvalResult<Self>,
               float: impl FnOnce(f64, f64) -> EvalResult<Self>)
               -> EvalResult<Self> {
        match (self.ratio(), other.ratio()) {
            (Some(a), Some(b)) => exact(a, b),
            _ => float(self.to_f64(), other.to_f64()),
        }
    }

    /// Adds two numbers.
    pub fn add(&self, other: &Self) -> EvalResult<Self> {
        self.combine(other,
                     |(n1, d1), (n2, d2)| Self::fraction(n1 * &d2 + n2 * &d1, d1 * d2),
                     |a, b| Ok(Self::from(a + b)))
    }

    /// Subtracts `other` from `self`.
    pub fn sub(&self, other: &Self) -> EvalResult<Self> {
        self.combine(other,
                     |(n1, d1), (n2, d2)| Self::fraction(n1 * &d2 - n2 * &d1, d1 * d2),
                     |a, b| Ok(Self::from(a - b)))
    }

    /// Multiplies two numbers.
    pub fn mul(&self, other: &Self) -> EvalResult<Self> {
        self.combine(other,
                     |(n1, d1), (n2, d2)| Self::fraction(n1 * n2, d1 * d2),
                     |a, b| Ok(Self::from(a * b)))
    }

    /// Divides `self` by `other`. Integer division is exact and may produce a
    /// fraction.
    pub fn div(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        self.combine(other,
                     |(n1, d1), (n2, d2)| Self::fraction(n1 * d2, d1 * n2),
                     |a, b| Ok(Self::from(a / b)))
    }

    /// Divides and rounds towards negative infinity (`//`).
    pub fn floor_div(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        self.combine(other,
                     |(n1, d1), (n2, d2)| Ok(Self::Integer((n1 * d2).div_floor(&(d1 * n2)))),
                     |a, b| Ok(Self::from((a / b).floor())))
    }

    /// Floored remainder (`%`): the result takes the sign of the divisor.
    pub fn rem(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        self.combine(other,
                     |(n1, d1), (n2, d2)| {
                         let denominator = &d1 * &d2;
                         Self::fraction((n1 * d2).mod_floor(&(n2 * d1)), denominator)
                     },
                     |a, b| Ok(Self::from(a - b * (a / b).floor())))
    }

    /// Raises `self` to the power `other` (`^`).
    ///
    /// Exact for exact bases with integral exponents; a fractional exponent
    /// or a float operand produces a float.
    ///
    /// # Example
    /// ```
    /// use operon::interpreter::value::core::Number;
    ///
    /// let two = Number::from(2);
    /// assert_eq!(two.pow(&Number::from(10)).unwrap(), Number::from(1024));
    /// assert_eq!(two.pow(&Number::from(-1)).unwrap().to_string(), "1/2");
    /// ```
    pub fn pow(&self, other: &Self) -> EvalResult<Self> {
        let exponent = match other {
            Self::Integer(e) => e,
            _ => return Ok(Self::from(self.to_f64().powf(other.to_f64()))),
        };
        let Some((n, d)) = self.ratio() else {
            return Ok(Self::from(self.to_f64().powf(bigint_to_f64(exponent))));
        };

        if exponent.is_negative() {
            if n.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            let e = exponent.abs();
            let (en, ed) = (checked_exponent(&n, &e)?, checked_exponent(&d, &e)?);
            return Self::fraction(Pow::pow(d, ed), Pow::pow(n, en));
        }
        let (en, ed) = (checked_exponent(&n, exponent)?, checked_exponent(&d, exponent)?);
        Self::fraction(Pow::pow(n, en), Pow::pow(d, ed))
    }

    /// Compares two numbers by value across representations.
    ///
    /// Returns `None` only when a float operand is NaN.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.ratio(), other.ratio()) {
            (Some((n1, d1)), Some((n2, d2))) => Some((n1 * d2).cmp(&(n2 * d1))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Tests numeric equality across representations (`2 == 2.0`).
    #[must_use]
    pub fn numeric_eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Negates the value.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::Integer(n) => Self::Integer(-n),
            Self::Fraction(n, d) => Self::Fraction(-n, d.clone()),
            Self::Float(x) => Self::from(-x.0),
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Integer(n) => Self::Integer(n.abs()),
            Self::Fraction(n, d) => Self::Fraction(n.abs(), d.clone()),
            Self::Float(x) => Self::from(x.0.abs()),
        }
    }

    /// Returns -1, 0 or 1 as an integer.
    #[must_use]
    pub fn sign(&self) -> Self {
        match self.compare(&Self::from(0)) {
            Some(Ordering::Less) => Self::from(-1),
            Some(Ordering::Greater) => Self::from(1),
            _ => Self::from(0),
        }
    }

    /// Largest integer not greater than the value.
    #[must_use]
    pub fn floor(&self) -> Self {
        match self {
            Self::Integer(_) => self.clone(),
            Self::Fraction(n, d) => Self::Integer(n.div_floor(d)),
            Self::Float(x) => Self::from(x.0.floor()),
        }
    }

    /// Smallest integer not less than the value.
    #[must_use]
    pub fn ceil(&self) -> Self {
        match self {
            Self::Integer(_) => self.clone(),
            Self::Fraction(n, d) => Self::Integer(-((-n).div_floor(d))),
            Self::Float(x) => Self::from(x.0.ceil()),
        }
    }

    /// Nearest integer, rounding halves away from zero.
    #[must_use]
    pub fn round(&self) -> Self {
        match self {
            Self::Integer(_) => self.clone(),
            Self::Fraction(n, d) => {
                let twice = (n.abs() * BigInt::from(2) + d).div_floor(&(d * BigInt::from(2)));
                Self::Integer(if n.is_negative() { -twice } else { twice })
            },
            Self::Float(x) => Self::from(x.0.round()),
        }
    }

    /// Square root; exact for perfect squares and perfect-square fractions.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidArgument`] for negative values.
    pub fn sqrt(&self) -> EvalResult<Self> {
        if self.compare(&Self::from(0)) == Some(Ordering::Less) {
            return Err(RuntimeError::InvalidArgument { details: format!("square root of negative value {self}") });
        }
        if let Some((n, d)) = self.ratio() {
            let (rn, rd) = (n.sqrt(), d.sqrt());
            if &rn * &rn == n && &rd * &rd == d {
                return Self::fraction(rn, rd);
            }
        }
        Ok(Self::from(self.to_f64().sqrt()))
    }

    /// Factorial of a non-negative integral value, computed exactly.
    ///
    /// # Errors
    /// Returns [`RuntimeError::FactorialDomain`] for negative or non-integral
    /// values.
    ///
    /// # Example
    /// ```
    /// use operon::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::from(5).factorial().unwrap(), Number::from(120));
    /// assert!(Number::from(1.5).factorial().is_err());
    /// ```
    pub fn factorial(&self) -> EvalResult<Self> {
        let n = self.to_integer()
                    .ok_or_else(|| RuntimeError::FactorialDomain { value: self.to_string() })?;
        Ok(Self::Integer(factorial(&n)?))
    }

    /// Whether the printed form must be parenthesized when nested inside
    /// another expression (negative values and fractions).
    #[must_use]
    pub fn is_compound_text(&self) -> bool {
        matches!(self, Self::Fraction(..)) || self.compare(&Self::from(0)) == Some(Ordering::Less)
    }
}

/// Renders a numeric-or-absent value, using `void` for the absent value.
#[must_use]
pub fn display_value(value: &Value) -> String {
    value.as_ref()
         .map_or_else(|| "void".to_string(), ToString::to_string)
}
