use std::cmp::Ordering;

pub type Digit = u32;
/// Wide enough for any `Digit * Digit + Digit + Digit`.
pub type LongDigit = u64;

pub const DIGIT_BITS: u32 = Digit::BITS;

/// An arbitrary-precision unsigned integer.
///
/// The magnitude is a sequence of base-2^32 digits, least significant first.
/// The sequence is never empty and its last digit is only zero for the value
/// zero itself, so every value has exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigUint(pub(crate) Vec<Digit>);

impl Default for BigUint {
  fn default() -> Self {
    BigUint::zero()
  }
}

impl BigUint {
  pub fn zero() -> Self {
    BigUint(vec![0])
  }

  pub fn one() -> Self {
    BigUint(vec![1])
  }

  /// Builds a value from `digits`, least significant first. Any trailing
  /// zero digits are dropped; an empty or all-zero list is zero.
  pub fn from_digits(digits: Vec<Digit>) -> Self {
    let mut n = BigUint(digits);
    n.normalize();
    n
  }

  pub(crate) fn normalize(&mut self) {
    while self.0.len() > 1 && self.0.last() == Some(&0) {
      self.0.pop();
    }
    if self.0.is_empty() {
      self.0.push(0);
    }
  }

  /// The digits of the value, least significant first.
  pub fn digits(&self) -> &[Digit] {
    &self.0
  }

  pub fn into_digits(self) -> Vec<Digit> {
    self.0
  }

  pub fn digit_count(&self) -> usize {
    self.0.len()
  }

  pub fn is_zero(&self) -> bool {
    self.0[..] == [0]
  }

  pub fn to_u64(&self) -> Option<u64> {
    match self.0[..] {
      [n] => Some(n as u64),
      [n, m] => Some(n as u64 | (m as u64) << DIGIT_BITS),
      _ => None,
    }
  }

  /// Whether the digit sequence is in canonical form: non-empty, and free of
  /// leading zero digits unless the value is zero.
  pub fn satisfies_invariant(&self) -> bool {
    match self.0.last() {
      None => false,
      Some(0) => self.0.len() == 1,
      Some(_) => true,
    }
  }

  /// Splits into the low `k` digits and the remaining high digits.
  pub(crate) fn split_at_digit(&self, k: usize) -> (BigUint, BigUint) {
    if k >= self.0.len() {
      (self.clone(), BigUint::zero())
    } else {
      let (low, high) = self.0.split_at(k);
      (BigUint::from_digits(low.to_vec()), BigUint::from_digits(high.to_vec()))
    }
  }

  pub fn cmp_u64(&self, n: u64) -> Ordering {
    match self.to_u64() {
      Some(value) => value.cmp(&n),
      None => Ordering::Greater,
    }
  }
}

impl Ord for BigUint {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.len().cmp(&other.0.len()).then_with(|| self.0.iter().rev().cmp(other.0.iter().rev()))
  }
}

impl PartialOrd for BigUint {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

macro_rules! scalar_cmp {
  ($($ty:ty),*) => {$(
    impl PartialEq<$ty> for BigUint {
      fn eq(&self, other: &$ty) -> bool {
        self.cmp_u64(u64::from(*other)).is_eq()
      }
    }

    impl PartialEq<BigUint> for $ty {
      fn eq(&self, other: &BigUint) -> bool {
        other.cmp_u64(u64::from(*self)).is_eq()
      }
    }

    impl PartialOrd<$ty> for BigUint {
      fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
        Some(self.cmp_u64(u64::from(*other)))
      }
    }

    impl PartialOrd<BigUint> for $ty {
      fn partial_cmp(&self, other: &BigUint) -> Option<Ordering> {
        Some(other.cmp_u64(u64::from(*self)).reverse())
      }
    }
  )*};
}

scalar_cmp!(Digit, LongDigit);

impl From<Digit> for BigUint {
  fn from(n: Digit) -> BigUint {
    BigUint(vec![n])
  }
}

impl From<LongDigit> for BigUint {
  fn from(n: LongDigit) -> BigUint {
    if n <= Digit::MAX as LongDigit {
      (n as Digit).into()
    } else {
      BigUint(vec![n as Digit, (n >> DIGIT_BITS) as Digit])
    }
  }
}

impl From<usize> for BigUint {
  fn from(n: usize) -> BigUint {
    (n as u64).into()
  }
}

impl FromIterator<Digit> for BigUint {
  /// Collects digits given least significant first.
  fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
    BigUint::from_digits(iter.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use std::cmp::Ordering;

  use quickcheck_macros::quickcheck;

  use super::BigUint;

  #[test]
  fn zero_is_one_digit() {
    for zero in [
      BigUint::default(),
      BigUint::zero(),
      BigUint::from(0u32),
      BigUint::from(0u64),
      BigUint::from_digits(vec![]),
      BigUint::from_digits(vec![0, 0, 0]),
    ] {
      assert_eq!(zero.digits(), [0]);
      assert!(zero.is_zero());
      assert!(zero.satisfies_invariant());
    }
  }

  #[test]
  fn from_digits_strips_leading_zeros() {
    let n = BigUint::from_digits(vec![7, 0, 3, 0, 0]);
    assert_eq!(n.digits(), [7, 0, 3]);
    assert!(n.satisfies_invariant());
    assert_eq!([1, 2, 0].into_iter().collect::<BigUint>().digits(), [1, 2]);
  }

  #[test]
  fn long_digit_splits() {
    assert_eq!(BigUint::from(u64::MAX).digits(), [u32::MAX, u32::MAX]);
    assert_eq!(BigUint::from(1u64 << 32).digits(), [0, 1]);
    assert_eq!(BigUint::from(5usize).digits(), [5]);
    assert_eq!(BigUint::from(u64::MAX).to_u64(), Some(u64::MAX));
    assert_eq!(BigUint::from_digits(vec![0, 0, 1]).to_u64(), None);
  }

  #[test]
  fn invariant_rejects_noncanonical() {
    assert!(!BigUint(vec![]).satisfies_invariant());
    assert!(!BigUint(vec![1, 0]).satisfies_invariant());
    assert!(!BigUint(vec![0, 0]).satisfies_invariant());
    assert!(BigUint(vec![0, 1]).satisfies_invariant());
  }

  #[test]
  fn longer_is_greater() {
    let short = BigUint::from_digits(vec![u32::MAX, u32::MAX]);
    let long = BigUint::from_digits(vec![0, 0, 1]);
    assert!(short < long);
    assert!(long > short);
    assert_eq!(long.cmp(&long.clone()), Ordering::Equal);
  }

  #[test]
  fn scalar_comparisons() {
    let n = BigUint::from(1u64 << 40);
    assert!(n > 5u32);
    assert!(5u32 < n);
    assert!(n == 1u64 << 40);
    assert!(1u64 << 40 == n);
    assert!(n <= 1u64 << 40);
    assert!(n != u64::MAX);
    assert!(BigUint::from_digits(vec![0, 0, 1]) > u64::MAX);
    assert!(u64::MAX < BigUint::from_digits(vec![0, 0, 1]));
    assert!(BigUint::zero() == 0u32);
  }

  #[quickcheck]
  fn ordering_matches_u128(a: u128, b: u128) -> bool {
    let big = |n: u128| BigUint::from_digits((0..4).map(|i| (n >> (32 * i)) as u32).collect());
    let (x, y) = (big(a), big(b));
    x.cmp(&y) == a.cmp(&b) && [x < y, x == y, x > y].iter().filter(|&&hit| hit).count() == 1
  }

  #[quickcheck]
  fn scalar_ordering_matches(a: u64, b: u64) -> bool {
    BigUint::from(a).partial_cmp(&b) == Some(a.cmp(&b))
      && b.partial_cmp(&BigUint::from(a)) == Some(b.cmp(&a))
  }
}
