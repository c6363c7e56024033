//! Arbitrary-precision decimal values
//!
//! `Decimal` is an exact rational under the hood: `+ - * /` and integer
//! powers never lose precision. Transcendental operations (non-integer
//! powers, logarithms, trigonometry, hyperbolics) run in a fixed
//! high-precision binary context sized for [`PRECISION`] decimal digits and
//! convert back to an exact rational, so later ring operations on the result
//! stay exact. The decimal half-up rounding the calculator promises is
//! applied where it is observable: in canonical rendering.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use astro_float::{BigFloat, Consts, Radix, RoundingMode};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::error::CalcError;

/// Significant decimal digits of the transcendental context and of rendering
pub const PRECISION: usize = 100;

/// Rounding mode of the binary context (ties away from zero, the binary
/// counterpart of the decimal half-up applied in rendering)
const RM: RoundingMode = RoundingMode::FromZero;

/// Convert decimal digit precision to the nominal bit precision.
/// astro-float rounds precision up to 64-bit word boundaries internally;
/// one extra word of guard bits keeps the last decimal digits honest.
fn precision_bits(digits: usize) -> usize {
    let base_bits = (digits as f64 * std::f64::consts::LOG2_10).ceil() as usize;
    (((base_bits + 63) & !63) + 64).max(128)
}

/// An exact arbitrary-precision decimal value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(BigRational);

// 100 fractional digits each; parsed once and cached.
const PI_DIGITS: (&str, &str) = (
    "3",
    "1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679",
);
const EULER_DIGITS: (&str, &str) = (
    "2",
    "7182818284590452353602874713526624977572470936999595749669676277240766303535475945713821785251664274",
);

fn digits_to_bigint(s: &str) -> BigInt {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(BigInt::zero(), |acc, b| {
            acc * 10 + BigInt::from(u32::from(b - b'0'))
        })
}

fn constant(int_part: &str, frac_part: &str) -> Decimal {
    let numer = digits_to_bigint(int_part) * BigInt::from(10u32).pow(frac_part.len() as u32)
        + digits_to_bigint(frac_part);
    Decimal(BigRational::new(
        numer,
        BigInt::from(10u32).pow(frac_part.len() as u32),
    ))
}

/// The constant pi at full context precision
pub fn pi() -> Decimal {
    static PI: OnceLock<Decimal> = OnceLock::new();
    PI.get_or_init(|| constant(PI_DIGITS.0, PI_DIGITS.1)).clone()
}

/// The constant e at full context precision
pub fn euler() -> Decimal {
    static EULER: OnceLock<Decimal> = OnceLock::new();
    EULER
        .get_or_init(|| constant(EULER_DIGITS.0, EULER_DIGITS.1))
        .clone()
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal(BigRational::zero())
    }

    pub fn one() -> Self {
        Decimal(BigRational::one())
    }

    pub fn from_u32(n: u32) -> Self {
        Decimal(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn from_bigint(n: BigInt) -> Self {
        Decimal(BigRational::from_integer(n))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Whether the value is a whole number
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Whether |value| <= 1
    pub fn magnitude_le_one(&self) -> bool {
        self.0.abs() <= BigRational::one()
    }

    /// The value as u64, when it is a whole number in range
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.is_integer() {
            self.0.numer().to_u64()
        } else {
            None
        }
    }

    /// The value as i32, when it is a whole number in range
    pub fn to_i32(&self) -> Option<i32> {
        if self.0.is_integer() {
            self.0.numer().to_i32()
        } else {
            None
        }
    }

    // Digit-by-digit literal construction, used by the open numeric leaf.

    /// Append `d` as the next integer digit: value = value * 10 + d
    pub(crate) fn push_integer_digit(&mut self, d: u32) {
        self.0 = &self.0 * BigRational::from_integer(BigInt::from(10u32))
            + BigRational::from_integer(BigInt::from(d));
    }

    /// Append `d` as the fractional digit at 10^-scale
    pub(crate) fn push_fraction_digit(&mut self, d: u32, scale: u32) {
        self.0 = &self.0
            + BigRational::new(BigInt::from(d), BigInt::from(10u32).pow(scale));
    }

    /// Exact division; `None` when `rhs` is zero
    pub fn checked_div(&self, rhs: &Decimal) -> Option<Decimal> {
        if rhs.0.is_zero() {
            None
        } else {
            Some(Decimal(&self.0 / &rhs.0))
        }
    }

    /// Exact integer power (negative exponents invert; caller excludes
    /// zero base with negative exponent)
    pub fn pow_int(&self, exp: i32) -> Decimal {
        Decimal(Pow::pow(self.0.clone(), exp))
    }

    // ----- transcendental context -----

    fn float_ctx() -> Result<(usize, Consts), CalcError> {
        let cc = Consts::new().map_err(|_| CalcError::FailedToProcess)?;
        Ok((precision_bits(PRECISION), cc))
    }

    fn to_bigfloat(&self, bits: usize, cc: &mut Consts) -> BigFloat {
        let n = BigFloat::parse(&self.0.numer().to_string(), Radix::Dec, bits, RM, cc);
        let d = BigFloat::parse(&self.0.denom().to_string(), Radix::Dec, bits, RM, cc);
        n.div(&d, bits, RM)
    }

    /// Recover an exact rational from the float's mantissa and exponent:
    /// value = sign * mantissa * 2^(exponent - 64 * words)
    fn from_bigfloat(bf: &BigFloat) -> Result<Decimal, CalcError> {
        let (words, _sig_bits, sign, exponent, _inexact) =
            bf.as_raw_parts().ok_or(CalcError::FailedToProcess)?;

        if words.iter().all(|&w| w == 0) {
            return Ok(Decimal::zero());
        }

        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let mantissa = BigInt::from(BigUint::from_bytes_le(&bytes));
        let shift = i64::from(exponent) - (words.len() as i64) * 64;

        let magnitude = if shift >= 0 {
            BigRational::from_integer(mantissa << shift as usize)
        } else {
            BigRational::new(mantissa, BigInt::one() << (-shift) as usize)
        };

        // The float engine works in binary; quantizing here to the decimal
        // context keeps every transcendental result a PRECISION-digit
        // decimal, so near-integers like log_2(8) collapse to the integer.
        let magnitude = Self::round_to_precision(magnitude);

        Ok(Decimal(if sign.is_negative() {
            -magnitude
        } else {
            magnitude
        }))
    }

    /// Decimal digit count of the integer part of n/d; zero or negative
    /// when the value is below one (count of leading fractional zeros,
    /// negated)
    fn int_digit_count(n: &BigInt, d: &BigInt) -> i64 {
        if n >= d {
            (n / d).to_string().len() as i64
        } else {
            let mut x = n * BigInt::from(10u32);
            let mut leading = 1i64;
            while &x < d {
                x *= BigInt::from(10u32);
                leading += 1;
            }
            1 - leading
        }
    }

    /// Round the magnitude of `r` to PRECISION significant digits, half-up
    fn round_to_precision(r: BigRational) -> BigRational {
        if r.is_zero() {
            return r;
        }
        let negative = r.is_negative();
        let n = r.numer().abs();
        let d = r.denom().clone();
        let shift = PRECISION as i64 - Self::int_digit_count(&n, &d);
        let (num, den) = if shift >= 0 {
            (&n * BigInt::from(10u32).pow(shift as u32), d)
        } else {
            (n, &d * BigInt::from(10u32).pow((-shift) as u32))
        };
        let rounded = (BigInt::from(2u32) * &num + &den) / (BigInt::from(2u32) * &den);
        let magnitude = if shift >= 0 {
            BigRational::new(rounded, BigInt::from(10u32).pow(shift as u32))
        } else {
            BigRational::from_integer(rounded * BigInt::from(10u32).pow((-shift) as u32))
        };
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }

    fn transcend<F>(&self, f: F) -> Result<Decimal, CalcError>
    where
        F: FnOnce(BigFloat, usize, &mut Consts) -> BigFloat,
    {
        let (bits, mut cc) = Self::float_ctx()?;
        let x = self.to_bigfloat(bits, &mut cc);
        let y = f(x, bits, &mut cc);
        Decimal::from_bigfloat(&y)
    }

    pub fn sin(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.sin(p, RM, cc))
    }

    pub fn cos(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.cos(p, RM, cc))
    }

    pub fn tan(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.tan(p, RM, cc))
    }

    /// cot x = cos x / sin x (caller excludes sin x = 0)
    pub fn cot(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| {
            let c = x.cos(p, RM, cc);
            let s = x.sin(p, RM, cc);
            c.div(&s, p, RM)
        })
    }

    pub fn asin(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.asin(p, RM, cc))
    }

    pub fn acos(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.acos(p, RM, cc))
    }

    pub fn atan(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.atan(p, RM, cc))
    }

    /// acot x = pi/2 - atan x
    pub fn acot(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| {
            let half_pi = cc.pi(p, RM).div(&BigFloat::from_i32(2, p), p, RM);
            half_pi.sub(&x.atan(p, RM, cc), p, RM)
        })
    }

    pub fn sinh(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.sinh(p, RM, cc))
    }

    pub fn cosh(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.cosh(p, RM, cc))
    }

    pub fn tanh(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| x.tanh(p, RM, cc))
    }

    /// coth x = cosh x / sinh x (caller excludes x = 0)
    pub fn coth(&self) -> Result<Decimal, CalcError> {
        self.transcend(|x, p, cc| {
            let c = x.cosh(p, RM, cc);
            let s = x.sinh(p, RM, cc);
            c.div(&s, p, RM)
        })
    }

    /// Logarithm of self in the given base (caller enforces the domain)
    pub fn log_base(&self, base: &Decimal) -> Result<Decimal, CalcError> {
        let (bits, mut cc) = Self::float_ctx()?;
        let x = self.to_bigfloat(bits, &mut cc);
        let b = base.to_bigfloat(bits, &mut cc);
        Decimal::from_bigfloat(&x.log(&b, bits, RM, &mut cc))
    }

    /// Power with a non-integer exponent, in the transcendental context
    pub fn pow_float(&self, exp: &Decimal) -> Result<Decimal, CalcError> {
        let (bits, mut cc) = Self::float_ctx()?;
        let b = self.to_bigfloat(bits, &mut cc);
        let e = exp.to_bigfloat(bits, &mut cc);
        Decimal::from_bigfloat(&b.pow(&e, bits, RM, &mut cc))
    }

    // ----- canonical rendering -----

    /// Number of factors of `p` in `n`, and the cofactor
    fn strip_factor(mut n: BigInt, p: u32) -> (BigInt, u32) {
        let p = BigInt::from(p);
        let mut count = 0;
        while (&n % &p).is_zero() && !n.is_zero() {
            n /= &p;
            count += 1;
        }
        (n, count)
    }

    /// When the denominator is 2^a * 5^b the expansion is finite; returns
    /// the scale max(a, b) such that value * 10^scale is an integer.
    fn finite_scale(denom: &BigInt) -> Option<u32> {
        let (rest, twos) = Self::strip_factor(denom.clone(), 2);
        let (rest, fives) = Self::strip_factor(rest, 5);
        if rest.is_one() {
            Some(twos.max(fives))
        } else {
            None
        }
    }

    fn to_canonical_string(&self) -> String {
        if self.0.is_zero() {
            return "0".to_string();
        }

        let negative = self.0.is_negative();
        let n = self.0.numer().abs();
        let d = self.0.denom().clone();

        let (digits, int_len) = if let Some(scale) = Self::finite_scale(&d) {
            // Exact expansion, rendered in full regardless of length.
            let scaled = &n * BigInt::from(10u32).pow(scale) / &d;
            let digits = scaled.to_string();
            let int_len = digits.len() as i64 - i64::from(scale);
            (digits, int_len)
        } else {
            // Infinite expansion: PRECISION significant digits, half-up.
            let int_digits = Self::int_digit_count(&n, &d);
            let shift = PRECISION as i64 - int_digits;
            let (num, den) = if shift >= 0 {
                (&n * BigInt::from(10u32).pow(shift as u32), d)
            } else {
                (n, &d * BigInt::from(10u32).pow((-shift) as u32))
            };
            // floor(num/den + 1/2) = (2*num + den) / (2*den)
            let rounded = (BigInt::from(2u32) * &num + &den) / (BigInt::from(2u32) * &den);
            let digits = rounded.to_string();
            // A rounding carry lengthens the digit string by one.
            let int_len = int_digits + digits.len() as i64 - PRECISION as i64;
            (digits, int_len)
        };

        let mut out = String::new();
        if negative && !digits.bytes().all(|b| b == b'0') {
            out.push('-');
        }
        Self::place_point(&mut out, &digits, int_len);
        out
    }

    fn place_point(out: &mut String, digits: &str, int_len: i64) {
        if digits.bytes().all(|b| b == b'0') {
            out.push('0');
            return;
        }
        if int_len <= 0 {
            let frac = format!("{}{}", "0".repeat((-int_len) as usize), digits);
            let frac = frac.trim_end_matches('0');
            out.push_str("0.");
            out.push_str(frac);
        } else if int_len as usize >= digits.len() {
            out.push_str(digits);
            out.push_str(&"0".repeat(int_len as usize - digits.len()));
        } else {
            let (int_part, frac_part) = digits.split_at(int_len as usize);
            out.push_str(int_part);
            let frac_part = frac_part.trim_end_matches('0');
            if !frac_part.is_empty() {
                out.push('.');
                out.push_str(frac_part);
            }
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}
