use std::{
  ops::MulAssign,
  sync::atomic::{AtomicUsize, Ordering},
};

use log::{debug, trace};

use crate::{BigUint, Digit, LongDigit, DIGIT_BITS};

pub const DEFAULT_KARATSUBA_THRESHOLD: usize = 32;

static KARATSUBA_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_KARATSUBA_THRESHOLD);

/// Sets the operand length, in digits, at or below which Karatsuba
/// multiplication hands off to school multiplication. Values below 1 are
/// treated as 1.
///
/// Each multiplication reads the threshold once when it starts, so products
/// already in flight on other threads keep the value they started with.
pub fn set_karatsuba_threshold(threshold: usize) {
  let threshold = threshold.max(1);
  debug!("karatsuba threshold set to {threshold} digits");
  KARATSUBA_THRESHOLD.store(threshold, Ordering::Relaxed);
}

pub fn karatsuba_threshold() -> usize {
  KARATSUBA_THRESHOLD.load(Ordering::Relaxed)
}

impl BigUint {
  pub(crate) fn mul_digit(&mut self, n: Digit) {
    if n == 0 {
      *self = BigUint::zero();
      return;
    }
    let mut carry = 0;
    for d in &mut self.0 {
      let total = *d as LongDigit * n as LongDigit + carry;
      *d = total as Digit;
      carry = total >> DIGIT_BITS;
    }
    if carry != 0 {
      self.0.push(carry as Digit);
    }
  }

  /// Quadratic multiplication: one digit-scaled copy of `lhs` per digit of
  /// `rhs`, each shift-added into the accumulator.
  pub fn school_multiply(lhs: &BigUint, rhs: &BigUint) -> BigUint {
    let mut acc = BigUint::zero();
    for (shift, &d) in rhs.0.iter().enumerate() {
      if d == 0 {
        continue;
      }
      let mut partial = lhs.clone();
      partial.mul_digit(d);
      acc.add_shifted(&partial, shift);
    }
    acc
  }

  /// Karatsuba multiplication under the process-wide threshold.
  pub fn karatsuba_multiply(lhs: &BigUint, rhs: &BigUint) -> BigUint {
    Self::karatsuba_multiply_with(lhs, rhs, karatsuba_threshold())
  }

  /// Karatsuba multiplication, recursing until either operand is at most
  /// `threshold` digits long.
  pub fn karatsuba_multiply_with(lhs: &BigUint, rhs: &BigUint, threshold: usize) -> BigUint {
    let threshold = threshold.max(1);
    if lhs.0.len() <= threshold || rhs.0.len() <= threshold {
      return Self::school_multiply(lhs, rhs);
    }

    let k = lhs.0.len().max(rhs.0.len()) / 2;
    trace!("karatsuba split of {}x{} digits at {k}", lhs.0.len(), rhs.0.len());
    let (lhs_low, lhs_high) = lhs.split_at_digit(k);
    let (rhs_low, rhs_high) = rhs.split_at_digit(k);

    let low = Self::karatsuba_multiply_with(&lhs_low, &rhs_low, threshold);
    let high = Self::karatsuba_multiply_with(&lhs_high, &rhs_high, threshold);
    let mut cross =
      Self::karatsuba_multiply_with(&(lhs_low + lhs_high), &(rhs_low + rhs_high), threshold);
    cross.sub_assign_unchecked(&high);
    cross.sub_assign_unchecked(&low);

    let mut result = low;
    result.add_shifted(&cross, k);
    result.add_shifted(&high, 2 * k);
    result
  }

  /// Raises `self` to the power `e` by repeated squaring; `x.pow(0)` is one
  /// for every `x`, zero included.
  pub fn pow(&self, mut e: u32) -> BigUint {
    let mut acc = BigUint::one();
    let mut base = self.clone();
    while e != 0 {
      if e & 1 == 1 {
        acc *= &base;
      }
      e >>= 1;
      if e != 0 {
        base = &base * &base;
      }
    }
    acc
  }
}

impl MulAssign<Digit> for BigUint {
  fn mul_assign(&mut self, rhs: Digit) {
    self.mul_digit(rhs);
  }
}

impl MulAssign<&BigUint> for BigUint {
  fn mul_assign(&mut self, rhs: &BigUint) {
    *self = BigUint::karatsuba_multiply(self, rhs);
  }
}
