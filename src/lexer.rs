use super::*;

use CompileErrorKind::*;
use TokenKind::*;

/// Just language lexer
///
/// The lexer proceeds character-by-character, as opposed to using regular
/// expressions to lex tokens or semi-tokens at a time. The justfile grammar
/// is line-oriented, so the lexer maintains a stack of states to know
/// whether it is at the top level, inside a recipe body, inside body text,
/// or inside an interpolation, and handles indentation at line starts.
pub(crate) struct Lexer<'src> {
  /// Source text
  src: &'src str,
  /// Source characters
  chars: Chars<'src>,
  /// Next character to be lexed
  next: Option<char>,
  /// Current token start
  token_start: Position,
  /// Current token end
  token_end: Position,
  /// Tokens that have been lexed
  tokens: Vec<Token<'src>>,
  /// State stack
  state: Vec<State<'src>>,
  /// Number of unclosed parenthesis
  open_delimiters: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
  offset: usize,
  column: usize,
  line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State<'src> {
  /// Lexing outside of a recipe body
  Normal,
  /// Lexing inside a recipe body, between lines
  Indented { indentation: &'src str },
  /// Lexing the text of a recipe body line
  Text,
  /// Lexing an interpolation inside a recipe body line
  Interpolation { interpolation_start: Token<'src> },
}

impl<'src> Lexer<'src> {
  /// Lex `src`
  pub(crate) fn lex(src: &'src str) -> CompileResult<'src, Vec<Token<'src>>> {
    Lexer::new(src).tokenize()
  }

  fn new(src: &'src str) -> Lexer<'src> {
    let mut chars = src.chars();
    let next = chars.next();

    let start = Position {
      offset: 0,
      column: 0,
      line: 0,
    };

    Lexer {
      state: vec![State::Normal],
      tokens: Vec::new(),
      token_start: start,
      token_end: start,
      open_delimiters: 0,
      chars,
      next,
      src,
    }
  }

  /// Advance over the character in `self.next`
  fn advance(&mut self) -> CompileResult<'src, ()> {
    match self.next {
      Some(c) => {
        let len = c.len_utf8();

        if c == '\n' {
          self.token_end.line += 1;
          self.token_end.column = 0;
        } else {
          self.token_end.column += len;
        }

        self.token_end.offset += len;
        self.next = self.chars.next();

        Ok(())
      }
      None => Err(self.internal_error("Lexer advanced past end of text")),
    }
  }

  /// Lexeme of the token in progress
  fn lexeme(&self) -> &'src str {
    &self.src[self.token_start.offset..self.token_end.offset]
  }

  /// Length of the token in progress
  fn current_token_length(&self) -> usize {
    self.token_end.offset - self.token_start.offset
  }

  fn next_is(&self, c: char) -> bool {
    self.next == Some(c)
  }

  fn next_is_whitespace(&self) -> bool {
    self.next_is(' ') || self.next_is('\t')
  }

  /// Un-lexed text
  fn rest(&self) -> &'src str {
    &self.src[self.token_end.offset..]
  }

  fn rest_starts_with(&self, prefix: &str) -> bool {
    self.rest().starts_with(prefix)
  }

  fn at_eol(&self) -> bool {
    self.next_is('\n') || self.rest_starts_with("\r\n")
  }

  fn at_eof(&self) -> bool {
    self.rest().is_empty()
  }

  fn at_eol_or_eof(&self) -> bool {
    self.at_eol() || self.at_eof()
  }

  /// The leading whitespace of the line that starts at the current position
  fn indentation(&self) -> &'src str {
    let rest = self.rest();
    let trimmed = rest.trim_start_matches(|c| c == ' ' || c == '\t');
    &rest[..rest.len() - trimmed.len()]
  }

  fn accepted(&mut self, c: char) -> CompileResult<'src, bool> {
    if self.next_is(c) {
      self.advance()?;
      Ok(true)
    } else {
      Ok(false)
    }
  }

  fn presume(&mut self, c: char) -> CompileResult<'src, ()> {
    if !self.next_is(c) {
      return Err(self.internal_error(format!("Lexer presumed character `{c}`")));
    }
    self.advance()
  }

  /// Add a token of kind `kind` whose lexeme is between `self.token_start`
  /// and `self.token_end`
  fn token(&mut self, kind: TokenKind) {
    self.tokens.push(Token {
      offset: self.token_start.offset,
      column: self.token_start.column,
      line: self.token_start.line,
      length: self.token_end.offset - self.token_start.offset,
      src: self.src,
      kind,
    });

    self.token_start = self.token_end;
  }

  fn error(&self, kind: CompileErrorKind<'src>) -> CompileError<'src> {
    // The location of the error is the text between `token_start` and
    // `token_end`, or the next character if that range is empty.
    let length = if self.current_token_length() == 0 {
      self.next.map_or(0, char::len_utf8)
    } else {
      self.current_token_length()
    };

    let token = Token {
      offset: self.token_start.offset,
      column: self.token_start.column,
      line: self.token_start.line,
      src: self.src,
      kind: Unspecified,
      length,
    };

    CompileError::new(token, kind)
  }

  fn internal_error(&self, message: impl Into<String>) -> CompileError<'src> {
    let token = Token {
      offset: self.token_end.offset,
      column: self.token_end.column,
      line: self.token_end.line,
      src: self.src,
      kind: Unspecified,
      length: 0,
    };

    CompileError::new(
      token,
      Internal {
        message: message.into(),
      },
    )
  }

  fn unterminated_interpolation_error(interpolation_start: Token<'src>) -> CompileError<'src> {
    CompileError::new(interpolation_start, UnterminatedInterpolation)
  }

  fn state(&self) -> CompileResult<'src, State<'src>> {
    self
      .state
      .last()
      .copied()
      .ok_or_else(|| self.internal_error("Lexer state stack empty"))
  }

  fn pop_state(&mut self) -> CompileResult<'src, ()> {
    if self.state.pop().is_none() {
      Err(self.internal_error("Lexer attempted to pop in start state"))
    } else {
      Ok(())
    }
  }

  /// Consume the text and produce a series of tokens
  fn tokenize(mut self) -> CompileResult<'src, Vec<Token<'src>>> {
    if self.src.starts_with('\u{feff}') {
      self.advance()?;
      self.token(ByteOrderMark);
    }

    loop {
      if self.token_start.column == 0 {
        self.lex_line_start()?;
      }

      match self.next {
        Some(first) => match self.state()? {
          State::Normal => self.lex_normal(first)?,
          State::Interpolation {
            interpolation_start,
          } => self.lex_interpolation(interpolation_start, first)?,
          State::Text => self.lex_text()?,
          State::Indented { .. } => self.lex_indented()?,
        },
        None => break,
      }
    }

    if let State::Interpolation {
      interpolation_start,
    } = self.state()?
    {
      return Err(Self::unterminated_interpolation_error(interpolation_start));
    }

    // the file may end mid-line, leaving the text state on the stack
    if let State::Text = self.state()? {
      self.pop_state()?;
    }

    if let State::Indented { .. } = self.state()? {
      self.token(Dedent);
    }

    self.token(Eof);

    Ok(self.tokens)
  }

  /// Handle blank lines and indentation at the start of a line
  fn lex_line_start(&mut self) -> CompileResult<'src, ()> {
    let indentation = self.indentation();

    let rest = &self.rest()[indentation.len()..];
    let blank = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");

    match self.state()? {
      State::Normal => {
        if indentation.is_empty() || blank || self.open_delimiters > 0 {
          return Ok(());
        }

        while self.next_is_whitespace() {
          self.advance()?;
        }

        if indentation.contains(' ') && indentation.contains('\t') {
          return Err(self.error(MixedLeadingWhitespace {
            whitespace: indentation,
          }));
        }

        self.state.push(State::Indented { indentation });
        self.token(Indent);
        self.state.push(State::Text);
      }
      State::Indented {
        indentation: expected,
      } => {
        if blank {
          // lexed as whitespace and end of line in the indented state
          return Ok(());
        }

        if indentation.starts_with(expected) {
          // deeper indentation than the recipe body belongs to the text
          for _ in expected.chars() {
            self.advance()?;
          }
          self.token(Whitespace);
          self.state.push(State::Text);
        } else if indentation.is_empty() {
          self.token(Dedent);
          self.pop_state()?;
        } else {
          while self.next_is_whitespace() {
            self.advance()?;
          }
          return Err(self.error(InconsistentLeadingWhitespace {
            expected,
            found: indentation,
          }));
        }
      }
      State::Text | State::Interpolation { .. } => {}
    }

    Ok(())
  }

  /// Lex token in normal state
  fn lex_normal(&mut self, start: char) -> CompileResult<'src, ()> {
    match start {
      ' ' | '\t' => self.lex_whitespace(),
      '!' => self.lex_digraph('!', '=', BangEquals),
      '#' => self.lex_comment(),
      '$' => self.lex_single(Dollar),
      '(' => {
        self.open_delimiters += 1;
        self.lex_single(ParenL)
      }
      ')' => {
        self.open_delimiters = self.open_delimiters.saturating_sub(1);
        self.lex_single(ParenR)
      }
      '*' => self.lex_single(Asterisk),
      '+' => self.lex_single(Plus),
      ',' => self.lex_single(Comma),
      '/' => self.lex_single(Slash),
      ':' => self.lex_colon(),
      '=' => self.lex_choices('=', &[('=', EqualsEquals)], Equals),
      '@' => self.lex_single(At),
      '[' => self.lex_single(BracketL),
      ']' => self.lex_single(BracketR),
      '`' | '"' | '\'' => self.lex_string(),
      '{' => self.lex_single(BraceL),
      '}' => self.lex_single(BraceR),
      '\n' | '\r' => self.lex_eol(),
      '\\' if self.rest_starts_with("\\\n") || self.rest_starts_with("\\\r\n") => {
        self.lex_continuation()
      }
      _ if Self::is_identifier_start(start) => self.lex_identifier(),
      _ => {
        self.advance()?;
        Err(self.error(UnknownStartOfToken))
      }
    }
  }

  /// Lex token in interpolation state
  fn lex_interpolation(
    &mut self,
    interpolation_start: Token<'src>,
    start: char,
  ) -> CompileResult<'src, ()> {
    if self.rest_starts_with("}}") {
      self.presume('}')?;
      self.presume('}')?;
      self.token(InterpolationEnd);
      self.pop_state()
    } else if self.at_eol_or_eof() {
      Err(Self::unterminated_interpolation_error(interpolation_start))
    } else {
      self.lex_normal(start)
    }
  }

  /// Lex token in text state
  fn lex_text(&mut self) -> CompileResult<'src, ()> {
    loop {
      if self.at_eol_or_eof() || self.rest_starts_with("{{") {
        break;
      }
      self.advance()?;
    }

    if self.current_token_length() > 0 {
      self.token(Text);
    }

    if self.at_eof() {
      self.pop_state()?;
    } else if self.at_eol() {
      self.pop_state()?;
      self.lex_eol()?;
    } else {
      self.presume('{')?;
      self.presume('{')?;
      self.token(InterpolationStart);
      let interpolation_start = self.tokens[self.tokens.len() - 1];
      self.state.push(State::Interpolation {
        interpolation_start,
      });
    }

    Ok(())
  }

  /// Lex token in indented state. Only blank lines are lexed here; lines
  /// with content push the text state in `lex_line_start`.
  fn lex_indented(&mut self) -> CompileResult<'src, ()> {
    match self.next {
      Some(' ' | '\t') => self.lex_whitespace(),
      Some('\n' | '\r') => self.lex_eol(),
      _ => Err(self.internal_error("Lexer in indented state at non-blank line")),
    }
  }

  fn lex_single(&mut self, kind: TokenKind) -> CompileResult<'src, ()> {
    self.advance()?;
    self.token(kind);
    Ok(())
  }

  /// Lex a token which may be one of several two-character digraphs,
  /// falling back to `otherwise`
  fn lex_choices(
    &mut self,
    first: char,
    choices: &[(char, TokenKind)],
    otherwise: TokenKind,
  ) -> CompileResult<'src, ()> {
    self.presume(first)?;

    for (second, kind) in choices {
      if self.accepted(*second)? {
        self.token(*kind);
        return Ok(());
      }
    }

    self.token(otherwise);

    Ok(())
  }

  /// Lex a two-character digraph whose first character has no
  /// single-character meaning
  fn lex_digraph(&mut self, left: char, right: char, token: TokenKind) -> CompileResult<'src, ()> {
    self.presume(left)?;

    if self.accepted(right)? {
      self.token(token);
      Ok(())
    } else {
      // The first character is not a valid token on its own
      Err(self.error(UnexpectedCharacter { expected: right }))
    }
  }

  fn lex_colon(&mut self) -> CompileResult<'src, ()> {
    self.lex_choices(':', &[('=', ColonEquals)], Colon)
  }

  fn lex_whitespace(&mut self) -> CompileResult<'src, ()> {
    while self.next_is_whitespace() {
      self.advance()?;
    }

    self.token(Whitespace);

    Ok(())
  }

  /// Lex a backslash at the end of a line, which joins it to the next
  fn lex_continuation(&mut self) -> CompileResult<'src, ()> {
    self.presume('\\')?;
    self.accepted('\r')?;
    self.presume('\n')?;
    self.token(Whitespace);
    Ok(())
  }

  fn lex_eol(&mut self) -> CompileResult<'src, ()> {
    if self.accepted('\r')? {
      if !self.accepted('\n')? {
        self.advance()?;
        return Err(self.error(UnknownStartOfToken));
      }
    } else {
      self.presume('\n')?;
    }

    // Newlines are significant, except inside parenthesized expressions
    if self.open_delimiters > 0 {
      self.token(Whitespace);
    } else {
      self.token(Eol);
    }

    Ok(())
  }

  fn lex_comment(&mut self) -> CompileResult<'src, ()> {
    self.presume('#')?;

    while !self.at_eol_or_eof() {
      self.advance()?;
    }

    self.token(Comment);

    Ok(())
  }

  fn lex_string(&mut self) -> CompileResult<'src, ()> {
    let kind = StringKind::from_token_start(self.rest())
      .ok_or_else(|| self.internal_error("Lexer presumed string character"))?;

    let delimiter = kind.delimiter();

    for _ in delimiter.chars() {
      self.advance()?;
    }

    let mut escape = false;

    loop {
      if self.next.is_none() {
        return Err(self.error(kind.unterminated_error_kind()));
      }

      if escape {
        escape = false;
        self.advance()?;
      } else if kind.processes_escape_sequences() && self.next_is('\\') {
        escape = true;
        self.advance()?;
      } else if self.rest_starts_with(delimiter) {
        for _ in delimiter.chars() {
          self.advance()?;
        }
        break;
      } else {
        self.advance()?;
      }
    }

    self.token(kind.token_kind());

    Ok(())
  }

  fn is_identifier_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
  }

  fn is_identifier_continue(c: char) -> bool {
    Self::is_identifier_start(c) || matches!(c, '0'..='9' | '-')
  }

  fn lex_identifier(&mut self) -> CompileResult<'src, ()> {
    self.advance()?;

    while let Some(c) = self.next {
      if !Self::is_identifier_continue(c) {
        break;
      }
      self.advance()?;
    }

    self.token(Identifier);

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use pretty_assertions::assert_eq;

  fn summarize(tokens: &[Token]) -> String {
    tokens
      .iter()
      .map(|token| match token.kind {
        Asterisk => "*",
        At => "@",
        Backtick => "`",
        BangEquals => "!=",
        BraceL => "{",
        BraceR => "}",
        BracketL => "[",
        BracketR => "]",
        ByteOrderMark => "B",
        Colon => ":",
        ColonEquals => ":=",
        Comma => ",",
        Comment => "#",
        Dedent => "<",
        Dollar => "D",
        Eof => ".",
        Eol => "$",
        Equals => "=",
        EqualsEquals => "==",
        Identifier => "N",
        Indent => ">",
        InterpolationEnd => "}}",
        InterpolationStart => "{{",
        ParenL => "(",
        ParenR => ")",
        Plus => "+",
        Slash => "/",
        StringToken => "\"",
        Text => "_",
        Unspecified => "?",
        Whitespace => "",
      })
      .collect()
  }

  fn lex_summary(text: &str, expected: &str) {
    let tokens = Lexer::lex(text).expect("lexing failed");

    // Tokens should round-trip to the source text
    let roundtrip = tokens
      .iter()
      .map(Token::lexeme)
      .collect::<Vec<&str>>()
      .join("");
    assert_eq!(roundtrip, text);

    assert_eq!(summarize(&tokens), expected);
  }

  fn lex_error(text: &str, line: usize, column: usize, kind: CompileErrorKind) {
    match Lexer::lex(text) {
      Ok(tokens) => panic!("Lexing succeeded but expected error: {tokens:?}"),
      Err(error) => {
        assert_eq!(*error.kind, kind);
        assert_eq!(error.line(), line);
        assert_eq!(error.column(), column);
      }
    }
  }

  #[test]
  fn empty() {
    lex_summary("", ".");
  }

  #[test]
  fn comment() {
    lex_summary("# hello\n", "#$.");
  }

  #[test]
  fn assignment() {
    lex_summary("x := 'hello'\n", "N:=\"$.");
  }

  #[test]
  fn export_assignment() {
    lex_summary("export x := \"hello\"", "NN:=\".");
  }

  #[test]
  fn recipe() {
    lex_summary("foo:\n", "N:$.");
  }

  #[test]
  fn recipe_body() {
    lex_summary("foo:\n  bar\n", "N:$>_$<.");
  }

  #[test]
  fn recipe_body_multiple_lines() {
    lex_summary("foo:\n  a\n  b\n", "N:$>_$_$<.");
  }

  #[test]
  fn recipe_body_blank_lines() {
    lex_summary("foo:\n  a\n\n  b\n", "N:$>_$$_$<.");
  }

  #[test]
  fn recipe_body_whitespace_blank_line() {
    lex_summary("foo:\n  a\n   \n  b\n", "N:$>_$$_$<.");
  }

  #[test]
  fn recipe_body_interpolation() {
    lex_summary("foo:\n  echo {{bar}}baz\n", "N:$>_{{N}}_$<.");
  }

  #[test]
  fn recipe_body_extra_indentation() {
    lex_summary("foo:\n  a\n    b\n", "N:$>_$_$<.");
  }

  #[test]
  fn two_recipes() {
    lex_summary("a:\n  x\nb:\n  y\n", "N:$>_$<N:$>_$<.");
  }

  #[test]
  fn body_without_trailing_newline() {
    lex_summary("a:\n  x", "N:$>_<.");
  }

  #[test]
  fn parameters_and_dependencies() {
    lex_summary("a b='c' +d: e f\n  x\n", "NN=\"+N:NN$>_$<.");
  }

  #[test]
  fn interpolation_expression() {
    lex_summary("a:\n  {{ b + 'c' }}\n", "N:$>{{N+\"}}$<.");
  }

  #[test]
  fn conditional_tokens() {
    lex_summary("x := if a == b { 'c' } else { 'd' }", "N:=NN==N{\"}N{\"}.");
  }

  #[test]
  fn parenthesized_newlines_insignificant() {
    lex_summary("x := (\n  'a'\n)\n", "N:=(\")$.");
  }

  #[test]
  fn backtick_assignment() {
    lex_summary("x := `which sh`\n", "N:=`$.");
  }

  #[test]
  fn triple_string_multiline() {
    lex_summary("x := '''\nfoo\nbar\n'''\n", "N:=\"$.");
  }

  #[test]
  fn continuation_at_top_level() {
    lex_summary("x := 'a' + \\\n'b'\n", "N:=\"+\"$.");
  }

  #[test]
  fn crlf() {
    lex_summary("foo:\r\n  bar\r\n", "N:$>_$<.");
  }

  #[test]
  fn attribute_brackets() {
    lex_summary("[private]\nfoo:\n", "[N]$N:$.");
  }

  #[test]
  fn unknown_start_of_token() {
    lex_error("x := %", 1, 6, CompileErrorKind::UnknownStartOfToken);
  }

  #[test]
  fn unterminated_string() {
    lex_error("x := 'abc", 1, 6, CompileErrorKind::UnterminatedString);
  }

  #[test]
  fn unterminated_backtick() {
    lex_error("x := `abc", 1, 6, CompileErrorKind::UnterminatedBacktick);
  }

  #[test]
  fn unterminated_interpolation() {
    lex_error(
      "a:\n  {{ b\n",
      2,
      3,
      CompileErrorKind::UnterminatedInterpolation,
    );
  }

  #[test]
  fn lone_bang() {
    lex_error("x := a ! b", 1, 8, CompileErrorKind::UnexpectedCharacter { expected: '=' });
  }

  #[test]
  fn mixed_leading_whitespace() {
    lex_error(
      "a:\n\t  x\n",
      2,
      1,
      CompileErrorKind::MixedLeadingWhitespace { whitespace: "\t  " },
    );
  }

  #[test]
  fn inconsistent_leading_whitespace() {
    lex_error(
      "a:\n\t\tx\n\t y\n",
      3,
      1,
      CompileErrorKind::InconsistentLeadingWhitespace {
        expected: "\t\t",
        found: "\t ",
      },
    );
  }
}
