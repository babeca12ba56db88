use std::ops::SubAssign;

use crate::{
  error::{BigError, OrPanic},
  BigUint, Digit,
};

impl BigUint {
  /// Subtracts `rhs` in place, failing with [`BigError::Underflow`] (and
  /// leaving `self` untouched) when `rhs` is greater than `self`.
  pub fn try_sub_assign(&mut self, rhs: &BigUint) -> Result<(), BigError> {
    if *self < *rhs {
      Err(BigError::Underflow)?
    }
    self.sub_assign_unchecked(rhs);
    Ok(())
  }

  /// Requires `self >= rhs`.
  pub(crate) fn sub_assign_unchecked(&mut self, rhs: &BigUint) {
    let mut borrow = false;
    for (i, d) in self.0.iter_mut().enumerate() {
      let r = match rhs.0.get(i) {
        Some(&r) => r,
        None if !borrow => break,
        None => 0,
      };
      let (diff, under_a) = d.overflowing_sub(r);
      let (diff, under_b) = diff.overflowing_sub(borrow as Digit);
      *d = diff;
      borrow = under_a || under_b;
    }
    debug_assert!(!borrow);
    self.normalize();
  }

  pub fn try_sub_assign_digit(&mut self, mut n: Digit) -> Result<(), BigError> {
    if self.cmp_u64(n as u64).is_lt() {
      Err(BigError::Underflow)?
    }
    for d in &mut self.0 {
      if n == 0 {
        break;
      }
      let (diff, borrow) = d.overflowing_sub(n);
      *d = diff;
      n = borrow as Digit;
    }
    self.normalize();
    Ok(())
  }

  pub fn checked_sub(&self, rhs: &BigUint) -> Result<BigUint, BigError> {
    let mut result = self.clone();
    result.try_sub_assign(rhs)?;
    Ok(result)
  }

  pub fn checked_sub_digit(&self, rhs: Digit) -> Result<BigUint, BigError> {
    let mut result = self.clone();
    result.try_sub_assign_digit(rhs)?;
    Ok(result)
  }

  /// Prefix decrement, failing on zero.
  pub fn checked_decrement(&mut self) -> Result<&mut Self, BigError> {
    self.try_sub_assign_digit(1)?;
    Ok(self)
  }

  /// Prefix decrement.
  ///
  /// # Panics
  /// If `self` is zero.
  #[track_caller]
  pub fn decrement(&mut self) -> &mut Self {
    self.checked_decrement().or_panic()
  }

  /// Postfix decrement; returns the value from before the decrement.
  ///
  /// # Panics
  /// If `self` is zero.
  #[track_caller]
  pub fn post_decrement(&mut self) -> BigUint {
    let old = self.clone();
    self.decrement();
    old
  }
}

impl SubAssign<Digit> for BigUint {
  #[track_caller]
  fn sub_assign(&mut self, rhs: Digit) {
    self.try_sub_assign_digit(rhs).or_panic()
  }
}

impl SubAssign<&BigUint> for BigUint {
  #[track_caller]
  fn sub_assign(&mut self, rhs: &BigUint) {
    self.try_sub_assign(rhs).or_panic()
  }
}

#[cfg(test)]
mod tests {
  use quickcheck_macros::quickcheck;

  use crate::{BigError, BigUint};

  #[test]
  fn borrow_shrinks() {
    let n = BigUint::from_digits(vec![0, 0, 1]) - BigUint::from(1u32);
    assert_eq!(n.digits(), [u32::MAX, u32::MAX]);
    assert!(n.satisfies_invariant());
    let n = BigUint::from_digits(vec![0, 1]) - 1u32;
    assert_eq!(n.digits(), [u32::MAX]);
  }

  #[test]
  fn equal_values_give_zero() {
    let n = BigUint::from_digits(vec![4, 5, 6]);
    let zero = &n - &n;
    assert_eq!(zero.digits(), [0]);
  }

  #[test]
  fn underflow_is_reported() {
    let small = BigUint::from(3u32);
    let large = BigUint::from_digits(vec![0, 1]);
    assert_eq!(small.checked_sub(&large), Err(BigError::Underflow));
    assert_eq!(small.checked_sub_digit(4), Err(BigError::Underflow));
    assert_eq!(BigUint::zero().checked_decrement().map(|n| n.clone()), Err(BigError::Underflow));

    let mut untouched = small.clone();
    assert!(untouched.try_sub_assign(&large).is_err());
    assert_eq!(untouched, small);
  }

  #[test]
  #[should_panic(expected = "attempt to subtract with underflow")]
  fn operator_panics_on_underflow() {
    let _ = BigUint::from(1u32) - BigUint::from(2u32);
  }

  #[test]
  #[should_panic(expected = "attempt to subtract with underflow")]
  fn decrementing_zero_panics() {
    BigUint::zero().decrement();
  }

  #[test]
  fn decrements() {
    let mut n = BigUint::from_digits(vec![0, 1]);
    assert_eq!(n.post_decrement(), 1u64 << 32);
    assert_eq!(n.digits(), [u32::MAX]);
    assert_eq!(n.decrement().digits(), [u32::MAX - 1]);
  }

  #[quickcheck]
  fn increment_then_decrement(digits: Vec<u32>) -> bool {
    let n = BigUint::from_digits(digits);
    let mut m = n.clone();
    m.increment().decrement();
    m == n && m.satisfies_invariant()
  }

  #[quickcheck]
  fn sub_undoes_add(a: Vec<u32>, b: Vec<u32>) -> bool {
    let (a, b) = (BigUint::from_digits(a), BigUint::from_digits(b));
    let diff = (&a + &b) - &b;
    diff.satisfies_invariant() && diff == a
  }
}
