use std::{
  error::Error,
  fmt::{self, Display},
  time::Instant,
};

use anyhow::anyhow;
use big::{BigError, BigUint, Digit};
use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
  ast::{BinaryOp, Builtin, Expr, Stmt},
  parser::CalcParser,
  stats::Stats,
};

/// The result of an expression statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
  Int(BigUint),
  /// Quotient and remainder, from `divmod`.
  Pair(BigUint, BigUint),
  /// Base 2^32 digits, least significant first, from `digits`.
  Digits(Vec<Digit>),
}

impl Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Int(n) => write!(f, "{n}"),
      Value::Pair(q, r) => write!(f, "{q} {r}"),
      Value::Digits(digits) => write!(f, "{digits:?}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
  Arith(BigError),
  UnknownVariable(String),
  ExponentTooLarge,
  NotAnInteger(Builtin),
}

impl Display for EvalError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvalError::Arith(err) => write!(f, "{err}"),
      EvalError::UnknownVariable(name) => write!(f, "unknown variable `{name}`"),
      EvalError::ExponentTooLarge => f.write_str("exponent does not fit in 32 bits"),
      EvalError::NotAnInteger(builtin) => {
        write!(f, "`{}` does not produce a single integer", builtin.name())
      }
    }
  }
}

impl Error for EvalError {}

impl From<BigError> for EvalError {
  fn from(err: BigError) -> Self {
    EvalError::Arith(err)
  }
}

type Eval<T> = Result<T, EvalError>;

/// Evaluates statements against a set of variable bindings.
#[derive(Debug, Default)]
pub struct Evaluator {
  vars: IndexMap<String, BigUint>,
  pub stats: Stats,
}

impl Evaluator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Bindings in the order they were first assigned.
  pub fn vars(&self) -> impl Iterator<Item = (&str, &BigUint)> {
    self.vars.iter().map(|(name, value)| (name.as_str(), value))
  }

  /// Parses and executes one line, yielding the value of an expression
  /// statement.
  pub fn exec_line(&mut self, line: &str) -> anyhow::Result<Option<Value>> {
    let Some(stmt) = CalcParser::parse_line(line).map_err(|err| anyhow!("{err}"))? else {
      return Ok(None);
    };
    Ok(self.exec(stmt)?)
  }

  pub fn exec(&mut self, stmt: Stmt) -> Eval<Option<Value>> {
    let start = Instant::now();
    self.stats.statements += 1;
    let result = match stmt {
      Stmt::Assign(name, expr) => {
        let value = self.eval_int(&expr)?;
        debug!("{name} = {} digit(s)", value.digit_count());
        self.vars.insert(name, value);
        None
      }
      Stmt::Expr(expr) => Some(self.eval(&expr)?),
    };
    self.stats.time += start.elapsed();
    Ok(result)
  }

  pub fn eval(&mut self, expr: &Expr) -> Eval<Value> {
    match expr {
      Expr::Call(Builtin::DivMod, args) => {
        let (a, b) = self.eval_pair(args)?;
        self.stats.div += 1;
        let (q, r) = a.div_rem(&b)?;
        self.stats.observe_digits(q.digit_count());
        Ok(Value::Pair(q, r))
      }
      Expr::Call(Builtin::Digits, args) => {
        let a = self.eval_arg(args, 0)?;
        Ok(Value::Digits(a.into_digits()))
      }
      _ => self.eval_int(expr).map(Value::Int),
    }
  }

  pub fn eval_int(&mut self, expr: &Expr) -> Eval<BigUint> {
    let value = match expr {
      Expr::Num(n) => n.clone(),
      Expr::Var(name) => {
        self.vars.get(name).cloned().ok_or_else(|| EvalError::UnknownVariable(name.clone()))?
      }
      Expr::BinaryOp(op, lhs, rhs) => {
        let lhs = self.eval_int(lhs)?;
        let rhs = self.eval_int(rhs)?;
        self.binary_op(*op, lhs, &rhs)?
      }
      Expr::ComparisonOp(first, rest) => {
        let mut lhs = self.eval_int(first)?;
        let mut holds = true;
        for (op, rhs) in rest {
          let rhs = self.eval_int(rhs)?;
          self.stats.compare += 1;
          holds &= op.holds(&lhs, &rhs);
          lhs = rhs;
        }
        BigUint::from(holds as Digit)
      }
      Expr::Call(builtin, args) => self.call(*builtin, args)?,
    };
    self.stats.observe_digits(value.digit_count());
    Ok(value)
  }

  fn binary_op(&mut self, op: BinaryOp, lhs: BigUint, rhs: &BigUint) -> Eval<BigUint> {
    trace!("{} {} {}-digit operands", op.as_str(), lhs.digit_count(), rhs.digit_count());
    Ok(match op {
      BinaryOp::Add => {
        self.stats.add += 1;
        lhs + rhs
      }
      BinaryOp::Sub => {
        self.stats.sub += 1;
        lhs.checked_sub(rhs)?
      }
      BinaryOp::Mul => {
        self.stats.mul_karatsuba += 1;
        BigUint::karatsuba_multiply(&lhs, rhs)
      }
      BinaryOp::Div => {
        self.stats.div += 1;
        lhs.checked_div(rhs)?
      }
      BinaryOp::Rem => {
        self.stats.div += 1;
        lhs.checked_rem(rhs)?
      }
      BinaryOp::Pow => {
        let e = rhs.to_u64().and_then(|e| u32::try_from(e).ok());
        let e = e.ok_or(EvalError::ExponentTooLarge)?;
        // one squaring per bit below the top, one product per set bit
        self.stats.mul_karatsuba += e.checked_ilog2().unwrap_or(0) as u64 + e.count_ones() as u64;
        lhs.pow(e)
      }
    })
  }

  fn call(&mut self, builtin: Builtin, args: &[Expr]) -> Eval<BigUint> {
    Ok(match builtin {
      Builtin::School => {
        let (a, b) = self.eval_pair(args)?;
        self.stats.mul_school += 1;
        BigUint::school_multiply(&a, &b)
      }
      Builtin::Karatsuba => {
        let (a, b) = self.eval_pair(args)?;
        self.binary_op(BinaryOp::Mul, a, &b)?
      }
      Builtin::Pow => {
        let (a, e) = self.eval_pair(args)?;
        self.binary_op(BinaryOp::Pow, a, &e)?
      }
      Builtin::Inc => {
        let mut a = self.eval_arg(args, 0)?;
        self.stats.add += 1;
        a.increment();
        a
      }
      Builtin::Dec => {
        let mut a = self.eval_arg(args, 0)?;
        self.stats.sub += 1;
        a.checked_decrement()?;
        a
      }
      Builtin::DivMod | Builtin::Digits => Err(EvalError::NotAnInteger(builtin))?,
    })
  }

  fn eval_arg(&mut self, args: &[Expr], i: usize) -> Eval<BigUint> {
    self.eval_int(&args[i])
  }

  fn eval_pair(&mut self, args: &[Expr]) -> Eval<(BigUint, BigUint)> {
    Ok((self.eval_arg(args, 0)?, self.eval_arg(args, 1)?))
  }
}
