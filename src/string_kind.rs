use super::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub(crate) struct StringKind {
  delimiter: StringDelimiter,
  indented: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
enum StringDelimiter {
  Backtick,
  QuoteDouble,
  QuoteSingle,
}

impl StringKind {
  const BACKTICK: Self = Self::new(StringDelimiter::Backtick, false);
  const BACKTICK_INDENTED: Self = Self::new(StringDelimiter::Backtick, true);
  const COOKED: Self = Self::new(StringDelimiter::QuoteDouble, false);
  const COOKED_INDENTED: Self = Self::new(StringDelimiter::QuoteDouble, true);
  const RAW: Self = Self::new(StringDelimiter::QuoteSingle, false);
  const RAW_INDENTED: Self = Self::new(StringDelimiter::QuoteSingle, true);

  /// Indented values must come before non-indented values, or else
  /// `from_token_start` will incorrectly return the non-indented version.
  const ALL: &'static [Self] = &[
    Self::BACKTICK_INDENTED,
    Self::BACKTICK,
    Self::COOKED_INDENTED,
    Self::COOKED,
    Self::RAW_INDENTED,
    Self::RAW,
  ];

  const fn new(delimiter: StringDelimiter, indented: bool) -> Self {
    Self {
      delimiter,
      indented,
    }
  }

  pub(crate) fn delimiter(self) -> &'static str {
    match (self.delimiter, self.indented) {
      (StringDelimiter::Backtick, false) => "`",
      (StringDelimiter::Backtick, true) => "```",
      (StringDelimiter::QuoteDouble, false) => "\"",
      (StringDelimiter::QuoteDouble, true) => "\"\"\"",
      (StringDelimiter::QuoteSingle, false) => "'",
      (StringDelimiter::QuoteSingle, true) => "'''",
    }
  }

  pub(crate) fn delimiter_len(self) -> usize {
    self.delimiter().len()
  }

  pub(crate) fn token_kind(self) -> TokenKind {
    match self.delimiter {
      StringDelimiter::Backtick => TokenKind::Backtick,
      StringDelimiter::QuoteDouble | StringDelimiter::QuoteSingle => TokenKind::StringToken,
    }
  }

  pub(crate) fn unterminated_error_kind(self) -> CompileErrorKind<'static> {
    match self.delimiter {
      StringDelimiter::Backtick => CompileErrorKind::UnterminatedBacktick,
      StringDelimiter::QuoteDouble | StringDelimiter::QuoteSingle => {
        CompileErrorKind::UnterminatedString
      }
    }
  }

  pub(crate) fn processes_escape_sequences(self) -> bool {
    match self.delimiter {
      StringDelimiter::QuoteDouble => true,
      StringDelimiter::Backtick | StringDelimiter::QuoteSingle => false,
    }
  }

  pub(crate) fn indented(self) -> bool {
    self.indented
  }

  pub(crate) fn from_token_start(token_start: &str) -> Option<Self> {
    Self::ALL
      .iter()
      .find(|&kind| token_start.starts_with(kind.delimiter()))
      .copied()
  }

  pub(crate) fn from_string_or_backtick(token: Token) -> CompileResult<Self> {
    Self::from_token_start(token.lexeme()).ok_or_else(|| {
      token.error(CompileErrorKind::Internal {
        message: "StringKind::from_string_or_backtick: Expected string or backtick token start"
          .to_owned(),
      })
    })
  }
}
