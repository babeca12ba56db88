use std::fmt::{self, Display};

use big::BigUint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
  Assign(String, Expr),
  Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Num(BigUint),
  Var(String),
  BinaryOp(BinaryOp, Box<Expr>, Box<Expr>),
  /// `a < b <= c` holds when every adjacent pair does.
  ComparisonOp(Box<Expr>, Vec<(ComparisonOp, Expr)>),
  Call(Builtin, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
  Eq,
  Ne,
  Lt,
  Gt,
  Le,
  Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
  School,
  Karatsuba,
  DivMod,
  Pow,
  Digits,
  Inc,
  Dec,
}

impl BinaryOp {
  pub fn as_str(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Rem => "%",
      BinaryOp::Pow => "^",
    }
  }
}

impl ComparisonOp {
  pub fn as_str(self) -> &'static str {
    match self {
      ComparisonOp::Eq => "==",
      ComparisonOp::Ne => "!=",
      ComparisonOp::Lt => "<",
      ComparisonOp::Gt => ">",
      ComparisonOp::Le => "<=",
      ComparisonOp::Ge => ">=",
    }
  }

  pub fn holds(self, lhs: &BigUint, rhs: &BigUint) -> bool {
    match self {
      ComparisonOp::Eq => lhs == rhs,
      ComparisonOp::Ne => lhs != rhs,
      ComparisonOp::Lt => lhs < rhs,
      ComparisonOp::Gt => lhs > rhs,
      ComparisonOp::Le => lhs <= rhs,
      ComparisonOp::Ge => lhs >= rhs,
    }
  }
}

impl Builtin {
  #[rustfmt::skip]
  const ALL: &'static [(&'static str, Builtin)] = &[
    ("school",    Builtin::School),
    ("karatsuba", Builtin::Karatsuba),
    ("divmod",    Builtin::DivMod),
    ("pow",       Builtin::Pow),
    ("digits",    Builtin::Digits),
    ("inc",       Builtin::Inc),
    ("dec",       Builtin::Dec),
  ];

  pub fn from_name(name: &str) -> Option<Builtin> {
    Self::ALL.iter().find(|&&(n, _)| n == name).map(|&(_, builtin)| builtin)
  }

  pub fn name(self) -> &'static str {
    Self::ALL.iter().find(|&&(_, b)| b == self).map_or("", |&(n, _)| n)
  }

  pub fn arity(self) -> usize {
    match self {
      Builtin::School | Builtin::Karatsuba | Builtin::DivMod | Builtin::Pow => 2,
      Builtin::Digits | Builtin::Inc | Builtin::Dec => 1,
    }
  }
}

impl Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stmt::Assign(name, value) => write!(f, "{name} = {value}"),
      Stmt::Expr(expr) => write!(f, "{expr}"),
    }
  }
}

/// Renders fully parenthesized, so the tree shape is visible.
impl Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Num(n) => write!(f, "{n}"),
      Expr::Var(name) => f.write_str(name),
      Expr::BinaryOp(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.as_str()),
      Expr::ComparisonOp(first, rest) => {
        write!(f, "({first}")?;
        for (op, expr) in rest {
          write!(f, " {} {expr}", op.as_str())?;
        }
        f.write_str(")")
      }
      Expr::Call(builtin, args) => {
        write!(f, "{}(", builtin.name())?;
        for (i, arg) in args.iter().enumerate() {
          if i != 0 {
            f.write_str(", ")?;
          }
          write!(f, "{arg}")?;
        }
        f.write_str(")")
      }
    }
  }
}
