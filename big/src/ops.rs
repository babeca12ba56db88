//! Binary operators, all forwarded to the compound-assignment primitives.

use std::ops::{
  Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign,
};

use crate::{BigUint, Digit};

macro_rules! forward_ops {
  (@by_value commutes, $op_assign:ident, $lhs:ident, $rhs:ident) => {{
    let mut rhs = $rhs;
    rhs.$op_assign($lhs);
    rhs
  }};
  (@by_value ordered, $op_assign:ident, $lhs:ident, $rhs:ident) => {{
    let mut lhs = $lhs.clone();
    lhs.$op_assign(&$rhs);
    lhs
  }};
  ($($Op:ident $op:ident $OpAssign:ident $op_assign:ident $order:ident;)*) => {$(
    impl $OpAssign<BigUint> for BigUint {
      #[track_caller]
      fn $op_assign(&mut self, rhs: BigUint) {
        self.$op_assign(&rhs);
      }
    }

    impl $Op<&BigUint> for BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(mut self, rhs: &BigUint) -> BigUint {
        self.$op_assign(rhs);
        self
      }
    }

    impl $Op<BigUint> for BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(mut self, rhs: BigUint) -> BigUint {
        self.$op_assign(&rhs);
        self
      }
    }

    impl $Op<&BigUint> for &BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(self, rhs: &BigUint) -> BigUint {
        let mut result = self.clone();
        result.$op_assign(rhs);
        result
      }
    }

    impl $Op<BigUint> for &BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(self, rhs: BigUint) -> BigUint {
        let lhs = self;
        forward_ops!(@by_value $order, $op_assign, lhs, rhs)
      }
    }

    impl $Op<Digit> for BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(mut self, rhs: Digit) -> BigUint {
        self.$op_assign(rhs);
        self
      }
    }

    impl $Op<Digit> for &BigUint {
      type Output = BigUint;
      #[track_caller]
      fn $op(self, rhs: Digit) -> BigUint {
        let mut result = self.clone();
        result.$op_assign(rhs);
        result
      }
    }
  )*};
}

forward_ops! {
  Add add AddAssign add_assign commutes;
  Sub sub SubAssign sub_assign ordered;
  Mul mul MulAssign mul_assign commutes;
  Div div DivAssign div_assign ordered;
  Rem rem RemAssign rem_assign ordered;
}

/// A digit on the left is only meaningful for the commutative operators.
macro_rules! digit_lhs_ops {
  ($($Op:ident $op:ident $op_assign:ident;)*) => {$(
    impl $Op<BigUint> for Digit {
      type Output = BigUint;
      fn $op(self, mut rhs: BigUint) -> BigUint {
        rhs.$op_assign(self);
        rhs
      }
    }

    impl $Op<&BigUint> for Digit {
      type Output = BigUint;
      fn $op(self, rhs: &BigUint) -> BigUint {
        let mut result = rhs.clone();
        result.$op_assign(self);
        result
      }
    }
  )*};
}

digit_lhs_ops! {
  Add add add_assign;
  Mul mul mul_assign;
}
