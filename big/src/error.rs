use std::{
  error::Error,
  fmt::{self, Display},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigError {
  /// A division or remainder by zero.
  DivisionByZero,
  /// Text that is not a plain decimal numeral.
  InvalidFormat,
  /// A subtraction or decrement whose result would be negative.
  Underflow,
}

impl Display for BigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      BigError::DivisionByZero => "attempt to divide by zero",
      BigError::InvalidFormat => "invalid decimal numeral",
      BigError::Underflow => "attempt to subtract with underflow",
    })
  }
}

impl Error for BigError {}

/// The operator forms report their failures the way the primitive integer
/// operators do, by panicking with the error's message.
pub(crate) trait OrPanic<T> {
  fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T, BigError> {
  #[track_caller]
  fn or_panic(self) -> T {
    match self {
      Ok(value) => value,
      Err(err) => panic!("{err}"),
    }
  }
}
