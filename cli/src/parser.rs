use std::{
  error::Error,
  fmt::{self, Display},
  ops::Range,
};

use big::BigUint;
use logos::{Lexer, Logos};

use crate::{
  ast::{BinaryOp, Builtin, ComparisonOp, Expr, Stmt},
  lexer::{Token, TokenSet},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<'src> {
  LexError { span: Range<usize>, text: &'src str },
  UnexpectedToken { expected: TokenSet, found: Option<&'src str> },
  InvalidNum(&'src str),
  UnknownFunction(&'src str),
  WrongArity { builtin: Builtin, found: usize },
  InvalidAssignment,
}

impl Display for ParseError<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::LexError { span, text } => {
        write!(f, "unrecognized input `{text}` at column {}", span.start + 1)
      }
      ParseError::UnexpectedToken { expected, found: Some(found) } => {
        write!(f, "expected one of {expected:?}; found `{found}`")
      }
      ParseError::UnexpectedToken { expected, found: None } => {
        write!(f, "expected one of {expected:?}; found end of input")
      }
      ParseError::InvalidNum(text) => write!(f, "invalid numeric literal `{text}`"),
      ParseError::UnknownFunction(name) => write!(f, "unknown function `{name}`"),
      ParseError::WrongArity { builtin, found } => write!(
        f,
        "`{}` takes {} argument(s) but {found} were given",
        builtin.name(),
        builtin.arity()
      ),
      ParseError::InvalidAssignment => f.write_str("only a variable can be assigned to"),
    }
  }
}

impl Error for ParseError<'_> {}

pub struct ParserState<'src> {
  pub lexer: Lexer<'src, Token>,
  pub token: Option<Token>,
  pub expected: TokenSet,
}

impl<'src> ParserState<'src> {
  pub fn new(src: &'src str) -> Self {
    ParserState { lexer: Token::lexer(src), token: None, expected: TokenSet::default() }
  }
}

pub struct CalcParser<'src> {
  pub state: ParserState<'src>,
}

type Parse<'src, T = ()> = Result<T, ParseError<'src>>;

impl<'src> CalcParser<'src> {
  /// Parses one line. Blank and comment-only lines yield `None`.
  pub fn parse_line(src: &'src str) -> Parse<'src, Option<Stmt>> {
    let mut parser = CalcParser { state: ParserState::new(src) };
    parser.bump()?;
    if parser.state.token.is_none() {
      return Ok(None);
    }
    let stmt = parser.parse_stmt()?;
    if parser.state.token.is_some() {
      parser.unexpected()?
    }
    Ok(Some(stmt))
  }

  fn bump(&mut self) -> Parse<'src> {
    self.state.expected.reset();
    let token = self.state.lexer.next().transpose();
    self.state.token = token.map_err(|()| ParseError::LexError {
      span: self.state.lexer.span(),
      text: self.state.lexer.slice(),
    })?;
    Ok(())
  }

  fn check(&mut self, kind: Token) -> bool {
    self.state.expected.add(kind);
    self.state.token == Some(kind)
  }

  fn eat(&mut self, kind: Token) -> Parse<'src, bool> {
    let matches = self.check(kind);
    if matches {
      self.bump()?;
    }
    Ok(matches)
  }

  fn expect(&mut self, kind: Token) -> Parse<'src, &'src str> {
    if self.check(kind) {
      let token = self.state.lexer.slice();
      self.bump()?;
      Ok(token)
    } else {
      self.unexpected()
    }
  }

  fn unexpected<T>(&self) -> Parse<'src, T> {
    Err(ParseError::UnexpectedToken {
      expected: self.state.expected,
      found: self.state.token.map(|_| self.state.lexer.slice()),
    })
  }

  fn parse_stmt(&mut self) -> Parse<'src, Stmt> {
    let expr = self.parse_expr()?;
    if self.eat(Token::Eq)? {
      let Expr::Var(name) = expr else { return Err(ParseError::InvalidAssignment) };
      return Ok(Stmt::Assign(name, self.parse_expr()?));
    }
    Ok(Stmt::Expr(expr))
  }

  fn parse_expr(&mut self) -> Parse<'src, Expr> {
    self.parse_expr_bp(BP::Min)
  }

  fn parse_expr_bp(&mut self, bp: BP) -> Parse<'src, Expr> {
    let mut expr = self.parse_expr_prefix()?;
    loop {
      expr = match self.parse_expr_postfix(expr, bp)? {
        Ok(expr) => expr,
        Err(expr) => return Ok(expr),
      }
    }
  }

  fn parse_expr_prefix(&mut self) -> Parse<'src, Expr> {
    if self.check(Token::Num) {
      return Ok(Expr::Num(self.parse_num()?));
    }
    if self.check(Token::Ident) {
      let name = self.expect(Token::Ident)?;
      if self.check(Token::OpenParen) {
        let builtin = Builtin::from_name(name).ok_or(ParseError::UnknownFunction(name))?;
        let args = self.parse_args()?;
        if args.len() != builtin.arity() {
          Err(ParseError::WrongArity { builtin, found: args.len() })?
        }
        return Ok(Expr::Call(builtin, args));
      }
      return Ok(Expr::Var(name.to_owned()));
    }
    if self.eat(Token::OpenParen)? {
      let expr = self.parse_expr()?;
      self.expect(Token::CloseParen)?;
      return Ok(expr);
    }
    self.unexpected()
  }

  /// Returns `Err(lhs)` when no operator binding at least as tightly as `bp`
  /// follows.
  fn parse_expr_postfix(&mut self, lhs: Expr, bp: BP) -> Parse<'src, Result<Expr, Expr>> {
    for &(lbp, token, op) in BINARY_OP_TABLE {
      let rbp = if lbp == BP::Power { lbp } else { lbp.inc() };
      if bp.permits(lbp) && self.eat(token)? {
        let rhs = self.parse_expr_bp(rbp)?;
        return Ok(Ok(Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs))));
      }
    }

    if bp.permits(BP::Comparison) {
      let mut rhs = Vec::new();
      'main: loop {
        for &(token, op) in COMPARISON_OP_TABLE {
          if self.eat(token)? {
            rhs.push((op, self.parse_expr_bp(BP::Comparison.inc())?));
            continue 'main;
          }
        }
        break;
      }
      if !rhs.is_empty() {
        return Ok(Ok(Expr::ComparisonOp(Box::new(lhs), rhs)));
      }
    }

    Ok(Err(lhs))
  }

  fn parse_num(&mut self) -> Parse<'src, BigUint> {
    let token = self.expect(Token::Num)?;
    let digits: String = token.chars().filter(|&c| c != '_').collect();
    digits.parse().map_err(|_| ParseError::InvalidNum(token))
  }

  fn parse_args(&mut self) -> Parse<'src, Vec<Expr>> {
    self.expect(Token::OpenParen)?;
    let mut args = Vec::new();
    while !self.check(Token::CloseParen) {
      args.push(self.parse_expr()?);
      if !self.eat(Token::Comma)? {
        break;
      }
    }
    self.expect(Token::CloseParen)?;
    Ok(args)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BP {
  Min,
  Comparison,
  Additive,
  Multiplicative,
  Power,
  Max,
}

impl BP {
  const fn inc(self) -> Self {
    match self {
      BP::Min => BP::Comparison,
      BP::Comparison => BP::Additive,
      BP::Additive => BP::Multiplicative,
      BP::Multiplicative => BP::Power,
      BP::Power | BP::Max => BP::Max,
    }
  }

  fn permits(self, other: Self) -> bool {
    other >= self
  }
}

#[rustfmt::skip]
const BINARY_OP_TABLE: &[(BP, Token, BinaryOp)] = &[
  (BP::Additive,       Token::Plus,    BinaryOp::Add),
  (BP::Additive,       Token::Minus,   BinaryOp::Sub),
  (BP::Multiplicative, Token::Star,    BinaryOp::Mul),
  (BP::Multiplicative, Token::Slash,   BinaryOp::Div),
  (BP::Multiplicative, Token::Percent, BinaryOp::Rem),
  (BP::Power,          Token::Caret,   BinaryOp::Pow),
];

#[rustfmt::skip]
const COMPARISON_OP_TABLE: &[(Token, ComparisonOp)] = &[
  (Token::EqEq, ComparisonOp::Eq),
  (Token::Ne,   ComparisonOp::Ne),
  (Token::Lt,   ComparisonOp::Lt),
  (Token::Gt,   ComparisonOp::Gt),
  (Token::Le,   ComparisonOp::Le),
  (Token::Ge,   ComparisonOp::Ge),
];
