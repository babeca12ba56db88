use std::ops::AddAssign;

use crate::{BigUint, Digit, LongDigit, DIGIT_BITS};

impl BigUint {
  pub(crate) fn add_digit(&mut self, mut n: Digit) {
    for d in &mut self.0 {
      if n == 0 {
        return;
      }
      let (new, carry) = d.overflowing_add(n);
      *d = new;
      n = carry as Digit;
    }
    if n != 0 {
      self.0.push(n);
    }
  }

  /// Adds `x * B^shift` into `self`, where `B` is the digit base.
  pub fn add_shifted(&mut self, x: &BigUint, shift: usize) {
    if x.is_zero() {
      return;
    }
    let len = self.0.len().max(x.0.len() + shift);
    self.0.resize(len, 0);
    let mut carry: LongDigit = 0;
    let mut i = shift;
    for &digit in &x.0 {
      let total = self.0[i] as LongDigit + digit as LongDigit + carry;
      self.0[i] = total as Digit;
      carry = total >> DIGIT_BITS;
      i += 1;
    }
    while carry != 0 {
      if i == self.0.len() {
        self.0.push(0);
      }
      let total = self.0[i] as LongDigit + carry;
      self.0[i] = total as Digit;
      carry = total >> DIGIT_BITS;
      i += 1;
    }
  }

  /// Prefix increment.
  pub fn increment(&mut self) -> &mut Self {
    self.add_digit(1);
    self
  }

  /// Postfix increment; returns the value from before the increment.
  pub fn post_increment(&mut self) -> BigUint {
    let old = self.clone();
    self.increment();
    old
  }
}

impl AddAssign<Digit> for BigUint {
  fn add_assign(&mut self, rhs: Digit) {
    self.add_digit(rhs);
  }
}

impl AddAssign<&BigUint> for BigUint {
  fn add_assign(&mut self, rhs: &BigUint) {
    self.add_shifted(rhs, 0);
  }
}

#[cfg(test)]
mod tests {
  use quickcheck_macros::quickcheck;

  use crate::BigUint;

  #[test]
  fn carry_grows_by_one_digit() {
    let n = BigUint::from(u32::MAX) + BigUint::from(1u32);
    assert_eq!(n.digits(), [0, 1]);
    assert_eq!(n, 4294967296u64);
    assert!(n.satisfies_invariant());
  }

  #[test]
  fn digit_carry_ripples() {
    let mut n = BigUint::from_digits(vec![u32::MAX, u32::MAX, u32::MAX]);
    n += 1u32;
    assert_eq!(n.digits(), [0, 0, 0, 1]);
    assert_eq!((7u32 + BigUint::from(5u32)).digits(), [12]);
  }

  #[test]
  fn shifted_add_into_zero() {
    let mut acc = BigUint::zero();
    acc.add_shifted(&BigUint::from(3u32), 2);
    assert_eq!(acc.digits(), [0, 0, 3]);
    acc.add_shifted(&BigUint::zero(), 5);
    assert_eq!(acc.digits(), [0, 0, 3]);
    acc.add_shifted(&BigUint::from_digits(vec![u32::MAX, 1]), 1);
    assert_eq!(acc.digits(), [0, u32::MAX, 4]);
  }

  #[test]
  fn increments() {
    let mut n = BigUint::from(u32::MAX);
    assert_eq!(n.post_increment(), u32::MAX);
    assert_eq!(n.digits(), [0, 1]);
    assert_eq!(n.increment().digits(), [1, 1]);
  }

  #[quickcheck]
  fn add_matches_u128(a: u64, b: u64) -> bool {
    let sum = BigUint::from(a) + BigUint::from(b);
    let expected = a as u128 + b as u128;
    sum.satisfies_invariant()
      && sum.digits().iter().rev().fold(0u128, |acc, &d| acc << 32 | d as u128) == expected
  }

  #[quickcheck]
  fn add_commutes(a: Vec<u32>, b: Vec<u32>) -> bool {
    let (a, b) = (BigUint::from_digits(a), BigUint::from_digits(b));
    let sum = &a + &b;
    sum.satisfies_invariant() && sum == &b + &a && sum >= a && sum >= b
  }
}
