use std::{
  fmt::{self, Display, Write},
  io::{self, BufRead},
  num::NonZeroU32,
  str::{self, FromStr},
};

use crate::{BigError, BigUint, Digit};

/// The largest power of ten that fits in a digit.
const CHUNK: NonZeroU32 = match NonZeroU32::new(1_000_000_000) {
  Some(chunk) => chunk,
  None => unreachable!(),
};
const CHUNK_WIDTH: usize = 9;

impl Display for BigUint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut chunks = Vec::new();
    let mut rest = self.clone();
    loop {
      chunks.push(rest.divide_digit(CHUNK));
      if rest.is_zero() {
        break;
      }
    }
    let mut out = String::with_capacity(chunks.len() * CHUNK_WIDTH);
    let mut chunks = chunks.iter().rev();
    if let Some(first) = chunks.next() {
      write!(out, "{first}")?;
    }
    for chunk in chunks {
      write!(out, "{chunk:0width$}", width = CHUNK_WIDTH)?;
    }
    f.pad_integral(true, "", &out)
  }
}

/// Parses a plain decimal numeral. Signs, separators and surrounding
/// whitespace are all rejected; leading zeros are accepted.
impl FromStr for BigUint {
  type Err = BigError;

  fn from_str(s: &str) -> Result<Self, BigError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
      Err(BigError::InvalidFormat)?
    }
    let mut n = BigUint::zero();
    for chunk in s.as_bytes().chunks(CHUNK_WIDTH) {
      let value = chunk.iter().fold(0, |acc: Digit, &b| acc * 10 + (b - b'0') as Digit);
      n.mul_digit(10u32.pow(chunk.len() as u32));
      n.add_digit(value);
    }
    Ok(n)
  }
}

impl BigUint {
  /// Reads one whitespace-delimited decimal numeral from `reader`, skipping
  /// any leading whitespace.
  ///
  /// Fails with [`io::ErrorKind::UnexpectedEof`] if the stream ends before a
  /// numeral starts, and with [`io::ErrorKind::InvalidData`] if the token is
  /// not a numeral. The token is consumed either way, so the reader can carry
  /// on with whatever follows it.
  pub fn read_from<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<BigUint> {
    let mut token = Vec::new();
    loop {
      let buf = reader.fill_buf()?;
      if buf.is_empty() {
        break;
      }
      let skip =
        if token.is_empty() { buf.iter().take_while(|b| b.is_ascii_whitespace()).count() } else { 0 };
      let rest = &buf[skip..];
      let len = rest.iter().take_while(|b| !b.is_ascii_whitespace()).count();
      token.extend_from_slice(&rest[..len]);
      let done = len < rest.len();
      reader.consume(skip + len);
      if done {
        break;
      }
    }
    if token.is_empty() {
      return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "expected a decimal numeral"));
    }
    str::from_utf8(&token)
      .map_err(|_| BigError::InvalidFormat)
      .and_then(str::parse::<BigUint>)
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }
}

#[cfg(test)]
mod tests {
  use std::io::{self, Cursor};

  use quickcheck_macros::quickcheck;

  use crate::{BigError, BigUint};

  #[test]
  fn zero_renders() {
    let zero: BigUint = "0".parse().unwrap();
    assert_eq!(zero.digits(), [0]);
    assert_eq!(zero.to_string(), "0");
    assert_eq!("0000".parse::<BigUint>().unwrap().digits(), [0]);
  }

  #[test]
  fn renders_inner_zero_chunks() {
    let n: BigUint = "1000000000000000000000000001".parse().unwrap();
    assert_eq!(n.to_string(), "1000000000000000000000000001");
    assert_eq!(BigUint::from(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!(BigUint::from_digits(vec![0, 0, 1]).to_string(), "18446744073709551616");
    assert_eq!(format!("{:>6}", BigUint::from(42u32)), "    42");
  }

  #[test]
  fn parses_across_chunks() {
    let n: BigUint = "340282366920938463463374607431768211456".parse().unwrap();
    assert_eq!(n.digits(), [0, 0, 0, 0, 1]);
    assert_eq!("007".parse::<BigUint>().unwrap(), 7u32);
  }

  #[test]
  fn rejects_malformed() {
    for s in ["", " 1", "1 ", "-1", "+1", "1_000", "12a", "0x10", "１"] {
      assert_eq!(s.parse::<BigUint>(), Err(BigError::InvalidFormat), "{s:?}");
    }
  }

  #[test]
  fn reads_tokens_from_stream() {
    let mut input = Cursor::new("  12345678901234567890\n\t42 oops 7");
    assert_eq!(BigUint::read_from(&mut input).unwrap().to_string(), "12345678901234567890");
    assert_eq!(BigUint::read_from(&mut input).unwrap(), 42u32);
    assert_eq!(BigUint::read_from(&mut input).unwrap_err().kind(), io::ErrorKind::InvalidData);
    assert_eq!(BigUint::read_from(&mut input).unwrap(), 7u32);
    assert_eq!(BigUint::read_from(&mut input).unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
  }

  #[test]
  fn reads_across_buffer_boundaries() {
    let digits = "9".repeat(100);
    let mut input = io::BufReader::with_capacity(7, Cursor::new(format!("   {digits} 1")));
    assert_eq!(BigUint::read_from(&mut input).unwrap().to_string(), digits);
    assert_eq!(BigUint::read_from(&mut input).unwrap(), 1u32);
  }

  #[quickcheck]
  fn round_trip(digits: Vec<u32>) -> bool {
    let n = BigUint::from_digits(digits);
    let parsed: BigUint = n.to_string().parse().unwrap();
    parsed.satisfies_invariant() && parsed == n
  }

  #[quickcheck]
  fn renders_like_u128(n: u128) -> bool {
    let big = BigUint::from_digits((0..4).map(|i| (n >> (32 * i)) as u32).collect());
    big.to_string() == n.to_string()
  }
}
