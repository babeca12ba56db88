use std::{
  num::NonZeroU32,
  ops::{DivAssign, RemAssign},
};

use crate::{
  error::{BigError, OrPanic},
  BigUint, Digit, LongDigit, DIGIT_BITS,
};

impl BigUint {
  /// Replaces `self` with `self / divisor`, returning the remainder.
  pub(crate) fn divide_digit(&mut self, divisor: NonZeroU32) -> Digit {
    let divisor = divisor.get() as LongDigit;
    let mut rem: LongDigit = 0;
    for d in self.0.iter_mut().rev() {
      let current = rem << DIGIT_BITS | *d as LongDigit;
      *d = (current / divisor) as Digit;
      rem = current % divisor;
    }
    self.normalize();
    rem as Digit
  }

  pub fn div_rem_digit(&self, divisor: Digit) -> Result<(BigUint, Digit), BigError> {
    let divisor = NonZeroU32::new(divisor).ok_or(BigError::DivisionByZero)?;
    let mut quotient = self.clone();
    let rem = quotient.divide_digit(divisor);
    Ok((quotient, rem))
  }

  pub fn div_digit(&self, divisor: Digit) -> Result<BigUint, BigError> {
    Ok(self.div_rem_digit(divisor)?.0)
  }

  /// Long division, yielding `(quotient, remainder)`.
  ///
  /// The dividend is consumed one digit at a time from the most significant
  /// end. Each quotient digit is first estimated from the leading digits of
  /// the partial remainder and the divisor, rounding the divisor up so that
  /// the estimate is never too large, then corrected upwards by at most a
  /// couple of extra subtractions.
  pub fn div_rem(&self, divisor: &BigUint) -> Result<(BigUint, BigUint), BigError> {
    if divisor.is_zero() {
      Err(BigError::DivisionByZero)?
    }

    let n = divisor.0.len();
    let top = n.min(2);
    let divisor_top = leading_value(&divisor.0[n - top..]) + (n > top) as u128;

    let mut rem = BigUint::zero();
    let mut quotient = Vec::with_capacity(self.0.len());
    for &d in self.0.iter().rev() {
      rem.push_low_digit(d);

      let rem_top = rem.0.get(n - top..).map(leading_value).unwrap_or(0);
      let mut q = (rem_top / divisor_top).min(Digit::MAX as u128) as Digit;
      if q != 0 {
        let mut product = divisor.clone();
        product.mul_digit(q);
        rem.sub_assign_unchecked(&product);
      }
      while rem >= *divisor {
        rem.sub_assign_unchecked(divisor);
        q += 1;
      }

      quotient.push(q);
    }

    quotient.reverse();
    Ok((BigUint::from_digits(quotient), rem))
  }

  pub fn checked_div(&self, divisor: &BigUint) -> Result<BigUint, BigError> {
    Ok(self.div_rem(divisor)?.0)
  }

  pub fn checked_rem(&self, divisor: &BigUint) -> Result<BigUint, BigError> {
    Ok(self.div_rem(divisor)?.1)
  }

  /// `self = self * B + d`.
  fn push_low_digit(&mut self, d: Digit) {
    if self.is_zero() {
      self.0[0] = d;
    } else {
      self.0.insert(0, d);
    }
  }
}

/// The value of at most three digits, given least significant first.
fn leading_value(digits: &[Digit]) -> u128 {
  digits.iter().rev().fold(0, |acc, &d| acc << DIGIT_BITS | d as u128)
}

impl DivAssign<Digit> for BigUint {
  #[track_caller]
  fn div_assign(&mut self, rhs: Digit) {
    let divisor = NonZeroU32::new(rhs).ok_or(BigError::DivisionByZero).or_panic();
    self.divide_digit(divisor);
  }
}

impl RemAssign<Digit> for BigUint {
  #[track_caller]
  fn rem_assign(&mut self, rhs: Digit) {
    let divisor = NonZeroU32::new(rhs).ok_or(BigError::DivisionByZero).or_panic();
    *self = self.divide_digit(divisor).into();
  }
}

impl DivAssign<&BigUint> for BigUint {
  #[track_caller]
  fn div_assign(&mut self, rhs: &BigUint) {
    *self = self.div_rem(rhs).or_panic().0;
  }
}

impl RemAssign<&BigUint> for BigUint {
  #[track_caller]
  fn rem_assign(&mut self, rhs: &BigUint) {
    *self = self.div_rem(rhs).or_panic().1;
  }
}
