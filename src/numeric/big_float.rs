// ============================================================================
// Big Float
// Arbitrary-precision binary floating point with an explicit working precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Arbitrary-precision binary float.
///
/// Represents `mantissa × 2^exponent`, rounded to at most `precision`
/// significant bits (round half to even). The stored form is canonical:
/// the mantissa is odd or zero, so equal values compare equal.
///
/// The precision travels with every value instead of living in a global
/// default. Binary operations require both operands to share one precision
/// and reject mixed operands with [`NumericError::PrecisionMismatch`].
///
/// # Example
/// ```
/// use chudnovsky_pi::numeric::BigFloat;
///
/// let two = BigFloat::from_u64(2, 128)?;
/// let root = two.checked_sqrt()?;
/// assert_eq!(root.to_decimal_string(10), "1.4142135623");
/// # Ok::<(), chudnovsky_pi::numeric::NumericError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigFloat {
    mantissa: BigInt,
    exponent: i64,
    precision: u64,
}

// ============================================================================
// Rounding helpers
// ============================================================================

/// `exponent + by`, failing if the exponent leaves i64.
#[inline]
fn raise_exponent(exponent: i64, by: u64) -> NumericResult<i64> {
    i64::try_from(by)
        .ok()
        .and_then(|by| exponent.checked_add(by))
        .ok_or(NumericError::ExponentOverflow)
}

/// `exponent - by`, failing if the exponent leaves i64.
#[inline]
fn lower_exponent(exponent: i64, by: u64) -> NumericResult<i64> {
    i64::try_from(by)
        .ok()
        .and_then(|by| exponent.checked_sub(by))
        .ok_or(NumericError::ExponentOverflow)
}

/// Round `magnitude × 2^exponent` to `precision` bits and strip trailing
/// zero bits.
fn round_magnitude(
    magnitude: BigUint,
    exponent: i64,
    precision: u64,
) -> NumericResult<(BigUint, i64)> {
    if magnitude.is_zero() {
        return Ok((magnitude, 0));
    }

    let bits = magnitude.bits();
    let (mut magnitude, mut exponent) = if bits <= precision {
        (magnitude, exponent)
    } else {
        let shift = bits - precision;
        let half = BigUint::one() << (shift - 1);
        let mask = (BigUint::one() << shift) - 1u32;
        let remainder = &magnitude & &mask;
        let mut quotient = magnitude >> shift;

        let round_up = match remainder.cmp(&half) {
            Ordering::Greater => true,
            Ordering::Equal => quotient.is_odd(),
            Ordering::Less => false,
        };
        if round_up {
            // A carry out of the top bit leaves 2^precision, which the
            // trailing-zero strip below folds back into the exponent.
            quotient += 1u32;
        }

        (quotient, raise_exponent(exponent, shift)?)
    };

    if let Some(zeros) = magnitude.trailing_zeros() {
        if zeros > 0 {
            magnitude >>= zeros;
            exponent = raise_exponent(exponent, zeros)?;
        }
    }

    Ok((magnitude, exponent))
}

impl BigFloat {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero at the given precision.
    #[inline]
    pub fn zero(precision: u64) -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
            precision,
        }
    }

    fn from_parts(
        sign: Sign,
        magnitude: BigUint,
        exponent: i64,
        precision: u64,
    ) -> NumericResult<Self> {
        if precision == 0 {
            return Err(NumericError::InvalidPrecision);
        }

        let (magnitude, exponent) = round_magnitude(magnitude, exponent, precision)?;
        if magnitude.is_zero() || sign == Sign::NoSign {
            return Ok(Self::zero(precision));
        }

        Ok(Self {
            mantissa: BigInt::from_biguint(sign, magnitude),
            exponent,
            precision,
        })
    }

    /// Convert an exact integer, rounding to nearest when it does not fit.
    ///
    /// Integers with at most `precision` significant bits convert exactly.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero.
    pub fn from_bigint(value: BigInt, precision: u64) -> NumericResult<Self> {
        let (sign, magnitude) = value.into_parts();
        Self::from_parts(sign, magnitude, 0, precision)
    }

    /// Convert a machine integer.
    #[inline]
    pub fn from_u64(value: u64, precision: u64) -> NumericResult<Self> {
        Self::from_bigint(BigInt::from(value), precision)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Working precision in bits.
    #[inline]
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// Signed mantissa of the canonical form.
    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Binary exponent of the canonical form.
    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    /// Number of decimal digits the precision can carry (`⌊bits·log10 2⌋`).
    pub fn decimal_digits(&self) -> usize {
        usize::try_from(self.precision.saturating_mul(30_103) / 100_000).unwrap_or(usize::MAX)
    }

    /// Exponent just above the leading bit (`|x| < 2^top_bit`).
    fn top_bit(&self) -> i128 {
        i128::from(self.exponent) + i128::from(self.mantissa.bits())
    }

    fn shared_precision(&self, rhs: &Self) -> NumericResult<u64> {
        if self.precision == rhs.precision {
            Ok(self.precision)
        } else {
            Err(NumericError::PrecisionMismatch {
                left: self.precision,
                right: rhs.precision,
            })
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition, rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `PrecisionMismatch` if the operands disagree on precision,
    /// or `ExponentOverflow` if the result leaves the exponent range.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.shared_precision(rhs)?;
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        if self.is_zero() {
            return Ok(rhs.clone());
        }

        let (large, small) = if self.top_bit() >= rhs.top_bit() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // An operand lying wholly below the rounding position only decides
        // the direction of rounding, so it is folded into a sticky bit
        // instead of being aligned bit for bit.
        let headroom = precision + 2;
        if small.top_bit() <= i128::from(large.exponent) - i128::from(headroom) {
            let sticky = if small.is_negative() {
                -BigInt::one()
            } else {
                BigInt::one()
            };
            let sum = (large.mantissa.clone() << headroom) + sticky;
            let exponent = lower_exponent(large.exponent, headroom)?;

            let (sign, magnitude) = sum.into_parts();
            return Self::from_parts(sign, magnitude, exponent, precision);
        }

        // Align both mantissas on the smaller exponent; the sum is exact
        // before the final rounding.
        let exponent = self.exponent.min(rhs.exponent);
        let lhs_shift = self.exponent.abs_diff(exponent);
        let rhs_shift = rhs.exponent.abs_diff(exponent);
        let sum = (self.mantissa.clone() << lhs_shift) + (rhs.mantissa.clone() << rhs_shift);

        let (sign, magnitude) = sum.into_parts();
        Self::from_parts(sign, magnitude, exponent, precision)
    }

    /// Checked subtraction, rounded to the shared precision.
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.checked_add(&-rhs.clone())
    }

    /// Checked multiplication, rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `PrecisionMismatch` or `ExponentOverflow`.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.shared_precision(rhs)?;
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero(precision));
        }

        let exponent = self
            .exponent
            .checked_add(rhs.exponent)
            .ok_or(NumericError::ExponentOverflow)?;
        let (sign, magnitude) = (&self.mantissa * &rhs.mantissa).into_parts();
        Self::from_parts(sign, magnitude, exponent, precision)
    }

    /// Checked division, correctly rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.shared_precision(rhs)?;
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero(precision));
        }

        let numerator = self.mantissa.magnitude();
        let denominator = rhs.mantissa.magnitude();

        // Widen the numerator so the quotient carries two bits beyond the
        // precision; a non-zero remainder becomes a sticky bit.
        let shift = (precision + 2 + denominator.bits()).saturating_sub(numerator.bits());
        let (mut quotient, remainder) = (numerator.clone() << shift).div_rem(denominator);

        let exponent = self
            .exponent
            .checked_sub(rhs.exponent)
            .ok_or(NumericError::ExponentOverflow)?;
        let mut exponent = lower_exponent(exponent, shift)?;
        if !remainder.is_zero() {
            quotient = (quotient << 1u32) | BigUint::one();
            exponent = lower_exponent(exponent, 1)?;
        }

        let sign = self.mantissa.sign() * rhs.mantissa.sign();
        Self::from_parts(sign, quotient, exponent, precision)
    }

    /// Checked square root, correctly rounded to this value's precision.
    ///
    /// # Errors
    /// Returns `NegativeSqrt` for negative input.
    pub fn checked_sqrt(&self) -> NumericResult<Self> {
        if self.is_negative() {
            return Err(NumericError::NegativeSqrt);
        }
        if self.is_zero() {
            return Ok(self.clone());
        }

        let magnitude = self.mantissa.magnitude();
        let mut shift = (2 * self.precision + 4).saturating_sub(magnitude.bits());
        let mut scaled_exponent = lower_exponent(self.exponent, shift)?;
        if scaled_exponent.rem_euclid(2) != 0 {
            shift += 1;
            scaled_exponent = lower_exponent(scaled_exponent, 1)?;
        }

        let radicand = magnitude.clone() << shift;
        let mut root = radicand.sqrt();
        let mut exponent = scaled_exponent / 2;
        if &root * &root != radicand {
            root = (root << 1u32) | BigUint::one();
            exponent = lower_exponent(exponent, 1)?;
        }

        Self::from_parts(Sign::Plus, root, exponent, self.precision)
    }

    // ========================================================================
    // Decimal Rendering
    // ========================================================================

    /// Render in positional decimal with `frac_digits` digits after the
    /// point, truncated toward zero.
    pub fn to_decimal_string(&self, frac_digits: usize) -> String {
        let scale = num_traits::pow(BigUint::from(10u8), frac_digits);
        let magnitude = self.mantissa.magnitude() * scale;
        let scaled = if self.exponent >= 0 {
            magnitude << self.exponent.unsigned_abs()
        } else {
            magnitude >> self.exponent.unsigned_abs()
        };

        let mut digits = scaled.to_str_radix(10);
        if digits.len() <= frac_digits {
            digits = format!("{:0>width$}", digits, width = frac_digits + 1);
        }

        let sign = if self.is_negative() && !scaled.is_zero() {
            "-"
        } else {
            ""
        };

        if frac_digits == 0 {
            return format!("{}{}", sign, digits);
        }

        let (integer, fraction) = digits.split_at(digits.len() - frac_digits);
        format!("{}{}.{}", sign, integer, fraction)
    }
}

impl Neg for BigFloat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            mantissa: -self.mantissa,
            ..self
        }
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigFloat")
            .field("mantissa", &self.mantissa)
            .field("exponent", &self.exponent)
            .field("precision", &self.precision)
            .finish()
    }
}

/// Formats with `{:.N}` fraction digits, defaulting to what the precision
/// can carry.
impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac_digits = f.precision().unwrap_or_else(|| self.decimal_digits());
        f.write_str(&self.to_decimal_string(frac_digits))
    }
}

// ============================================================================
// Tests
// ============================================================================
