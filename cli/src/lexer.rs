use std::fmt::{self, Debug};

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[repr(u8)]
pub enum Token {
  #[token("(")]
  OpenParen,
  #[token(")")]
  CloseParen,
  #[token(",")]
  Comma,
  #[token("+")]
  Plus,
  #[token("-")]
  Minus,
  #[token("*")]
  Star,
  #[token("/")]
  Slash,
  #[token("%")]
  Percent,
  #[token("^")]
  Caret,
  #[token("=")]
  Eq,
  #[token("==")]
  EqEq,
  #[token("!=")]
  Ne,
  #[token("<")]
  Lt,
  #[token(">")]
  Gt,
  #[token("<=")]
  Le,
  #[token(">=")]
  Ge,

  #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
  Ident,
  #[regex(r"[0-9][0-9_]*")]
  Num,

  #[regex("#.*", logos::skip)]
  Skip,
}

impl Token {
  #[rustfmt::skip]
  const ALL: &'static [Token] = &[
    Token::OpenParen, Token::CloseParen, Token::Comma,
    Token::Plus, Token::Minus, Token::Star, Token::Slash, Token::Percent, Token::Caret,
    Token::Eq, Token::EqEq, Token::Ne, Token::Lt, Token::Gt, Token::Le, Token::Ge,
    Token::Ident, Token::Num,
  ];
}

/// The tokens a parser was prepared to accept at its current position.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u32);

impl TokenSet {
  pub fn reset(&mut self) {
    self.0 = 0;
  }

  pub fn add(&mut self, kind: Token) {
    self.0 |= 1 << kind as u8;
  }

  pub fn contains(&self, kind: Token) -> bool {
    self.0 & 1 << kind as u8 != 0
  }

  pub fn iter(self) -> impl Iterator<Item = Token> {
    Token::ALL.iter().copied().filter(move |&kind| self.contains(kind))
  }
}

impl Debug for TokenSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}
