use std::{
  fmt::{self, Display, Write},
  time::Duration,
};

/// Statistics about an evaluation session.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
  pub statements: u64,

  // Counts of arithmetic operations, by kind.
  pub add: u64,
  pub sub: u64,
  pub div: u64,
  pub compare: u64,

  /// Products taken by Karatsuba multiplication, which is also what `*`, `^`
  /// and `pow` use.
  pub mul_karatsuba: u64,
  /// Products taken explicitly through `school`.
  pub mul_school: u64,

  /// The length, in digits, of the largest value produced.
  pub max_digits: u64,

  pub time: Duration,
}

impl Stats {
  pub fn operations(&self) -> u64 {
    self.add + self.sub + self.mul() + self.div + self.compare
  }

  pub fn mul(&self) -> u64 {
    self.mul_karatsuba + self.mul_school
  }

  pub fn observe_digits(&mut self, digits: usize) {
    self.max_digits = self.max_digits.max(digits as u64);
  }
}

impl Display for Stats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines = [
      ("Evaluation", None),
      ("  Statements", Some((self.statements, ""))),
      ("  Operations", Some((self.operations(), ""))),
      ("", None),
      ("Arithmetic", None),
      ("  Add", Some((self.add, ""))),
      ("  Subtract", Some((self.sub, ""))),
      ("  Multiply", Some((self.mul(), ""))),
      ("    Karatsuba", Some((self.mul_karatsuba, ""))),
      ("    School", Some((self.mul_school, ""))),
      ("  Divide", Some((self.div, ""))),
      ("  Compare", Some((self.compare, ""))),
      ("", None),
      ("Values", None),
      ("  Largest", Some((self.max_digits, "digits"))),
      ("", None),
      ("Performance", None),
      ("  Time", Some((self.time.as_millis() as u64, "ms"))),
    ];

    let max_label_width = lines.iter().map(|x| x.0.len()).max().unwrap_or(0) + 1;
    let max_value =
      lines.iter().filter_map(|x| x.1).map(|x| x.0).max().unwrap_or(0).max(1_000_000);
    let max_value_width = measure_int(max_value);

    for (label, value) in lines {
      f.write_char('\n')?;
      f.write_str(label)?;
      if let Some((value, unit)) = value {
        let padding = max_label_width + 2 + max_value_width - label.len() - measure_int(value);
        write!(f, "{:padding$}", "")?;
        write_grouped(f, value)?;
        if !unit.is_empty() {
          write!(f, " {unit}")?;
        }
      }
    }

    Ok(())
  }
}

/// Writes `value` with its digits grouped in threes by underscores.
fn write_grouped(f: &mut impl Write, value: u64) -> fmt::Result {
  let digits = value.to_string();
  for (i, c) in digits.chars().enumerate() {
    if i != 0 && (digits.len() - i) % 3 == 0 {
      f.write_char('_')?;
    }
    f.write_char(c)?;
  }
  Ok(())
}

/// Count the number of characters needed to pretty-print an integer.
const fn measure_int(int: u64) -> usize {
  if int == 0 {
    1
  } else {
    let digits = int.ilog10() + 1;
    (digits + (digits - 1) / 3) as usize
  }
}
