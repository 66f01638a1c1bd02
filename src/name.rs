use super::*;

/// A name, e.g. a recipe, variable, or parameter name. Identical to a
/// `Token` of kind `Identifier`, but without the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Name<'src> {
  pub(crate) column: usize,
  pub(crate) length: usize,
  pub(crate) line: usize,
  pub(crate) offset: usize,
  pub(crate) src: &'src str,
}

impl<'src> Name<'src> {
  pub(crate) fn from_identifier(token: Token<'src>) -> Name<'src> {
    assert_eq!(token.kind, TokenKind::Identifier);
    Name {
      column: token.column,
      length: token.length,
      line: token.line,
      offset: token.offset,
      src: token.src,
    }
  }

  pub(crate) fn lexeme(&self) -> &'src str {
    &self.src[self.offset..self.offset + self.length]
  }

  pub(crate) fn token(&self) -> Token<'src> {
    Token {
      column: self.column,
      kind: TokenKind::Identifier,
      length: self.length,
      line: self.line,
      offset: self.offset,
      src: self.src,
    }
  }

  pub(crate) fn error(&self, kind: CompileErrorKind<'src>) -> CompileError<'src> {
    self.token().error(kind)
  }
}

impl<'src> fmt::Display for Name<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.lexeme())
  }
}
