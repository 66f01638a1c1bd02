use super::*;

use CompileErrorKind::*;
use TokenKind::*;

/// Recursive descent parser for the justfile grammar.
///
/// Whitespace tokens are dropped up front, so the parser works against a
/// dense token stream addressed by a cursor, with `peek` providing the
/// lookahead needed to disambiguate constructs like `alias x := y` from a
/// recipe named `alias`.
///
/// Methods come in three families. `parse_*` methods consume a grammar
/// production and build its node. `expect_*` methods consume a token the
/// grammar requires next and report a syntax error when it is missing.
/// `presume_*` methods consume a token that lookahead has already
/// established, so a mismatch is reported as an internal error rather than
/// a syntax error.
///
/// Syntax errors list everything the parser would have accepted at the
/// point of failure: every failed token test records the kind it was
/// looking for in `expected`, and consuming any token clears the record.
pub(crate) struct Parser<'src> {
  /// Significant tokens, whitespace already dropped
  tokens: Vec<Token<'src>>,
  /// Index of the next unconsumed token
  cursor: usize,
  /// Token kinds that would have been accepted since the last consumed
  /// token
  expected: BTreeSet<TokenKind>,
  /// Expression nesting depth, bounded to reject pathological inputs
  depth: usize,
}

impl<'src> Parser<'src> {
  /// Parse `tokens` into an `Ast`
  pub(crate) fn parse(tokens: &[Token<'src>]) -> CompileResult<'src, Ast<'src>> {
    Parser {
      tokens: tokens
        .iter()
        .copied()
        .filter(|token| token.kind != Whitespace)
        .collect(),
      cursor: 0,
      expected: BTreeSet::new(),
      depth: 0,
    }
    .parse_ast()
  }

  /// The token `offset` positions past the cursor, if any
  fn peek(&self, offset: usize) -> Option<Token<'src>> {
    self.tokens.get(self.cursor + offset).copied()
  }

  /// The token at the cursor
  fn next(&self) -> CompileResult<'src, Token<'src>> {
    match self.peek(0) {
      Some(token) => Ok(token),
      None => Err(self.internal_error("cursor advanced past end of token stream")),
    }
  }

  /// The token to anchor an error to. Lexing always produces a final EOF
  /// token, so the stream is never empty.
  fn anchor(&self) -> Token<'src> {
    self
      .peek(0)
      .or_else(|| self.tokens.last().copied())
      .expect("token stream contains no tokens")
  }

  fn internal_error(&self, message: impl Into<String>) -> CompileError<'src> {
    self.anchor().error(Internal {
      message: message.into(),
    })
  }

  /// A syntax error listing the token kinds recorded in `expected`
  fn unexpected_token(&self) -> CompileError<'src> {
    let found = self.anchor();

    found.error(UnexpectedToken {
      expected: self
        .expected
        .iter()
        .copied()
        .filter(|kind| *kind != ByteOrderMark)
        .collect(),
      found: found.kind,
    })
  }

  /// Record `kind` as acceptable here and report whether the next token
  /// matches it
  fn next_is(&mut self, kind: TokenKind) -> bool {
    self.expected.insert(kind);
    self.peek(0).map_or(false, |token| token.kind == kind)
  }

  /// Report whether the next tokens match `kinds`, recording only the
  /// first as acceptable
  fn next_are(&mut self, kinds: &[TokenKind]) -> bool {
    if let Some(&first) = kinds.first() {
      self.expected.insert(first);
    }

    kinds
      .iter()
      .enumerate()
      .all(|(offset, kind)| self.peek(offset).map_or(false, |token| token.kind == *kind))
  }

  /// Consume and return the next token, clearing the expected set
  fn advance(&mut self) -> CompileResult<'src, Token<'src>> {
    let token = self.next()?;
    self.cursor += 1;
    self.expected.clear();
    Ok(token)
  }

  /// Consume and return the next token if it is of kind `kind`
  fn accept(&mut self, kind: TokenKind) -> CompileResult<'src, Option<Token<'src>>> {
    if self.next_is(kind) {
      Ok(Some(self.advance()?))
    } else {
      Ok(None)
    }
  }

  /// Consume the next token if it is of kind `kind`, reporting whether it
  /// was
  fn accepted(&mut self, kind: TokenKind) -> CompileResult<'src, bool> {
    Ok(self.accept(kind)?.is_some())
  }

  /// Consume a token of kind `kind` or fail with a syntax error
  fn expect(&mut self, kind: TokenKind) -> CompileResult<'src, Token<'src>> {
    match self.accept(kind)? {
      Some(token) => Ok(token),
      None => Err(self.unexpected_token()),
    }
  }

  /// Consume an optional trailing comment and the end of the line
  fn expect_eol(&mut self) -> CompileResult<'src, ()> {
    self.accept(Comment)?;

    if self.next_is(Eof) {
      return Ok(());
    }

    self.expect(Eol).map(|_| ())
  }

  fn expect_keyword(&mut self, expected: Keyword) -> CompileResult<'src, ()> {
    let found = self.advance()?;

    if found.kind == Identifier && expected == found.lexeme() {
      Ok(())
    } else {
      Err(found.error(ExpectedKeyword {
        expected: vec![expected],
        found,
      }))
    }
  }

  /// Consume a token lookahead has already established
  fn presume(&mut self, kind: TokenKind) -> CompileResult<'src, Token<'src>> {
    let token = self.advance()?;

    if token.kind == kind {
      Ok(token)
    } else {
      Err(self.internal_error(format!("presumed {kind}, but found {}", token.kind)))
    }
  }

  /// Consume a token lookahead has established to be one of `kinds`
  fn presume_any(&mut self, kinds: &[TokenKind]) -> CompileResult<'src, Token<'src>> {
    let token = self.advance()?;

    if kinds.contains(&token.kind) {
      Ok(token)
    } else {
      Err(self.internal_error(format!(
        "presumed {}, but found {}",
        List::or(kinds),
        token.kind
      )))
    }
  }

  /// Consume a keyword lookahead has already established
  fn presume_keyword(&mut self, keyword: Keyword) -> CompileResult<'src, ()> {
    let token = self.presume(Identifier)?;

    if keyword == token.lexeme() {
      Ok(())
    } else {
      Err(self.internal_error(format!(
        "presumed keyword `{keyword}`, but found `{}`",
        token.lexeme()
      )))
    }
  }

  /// Consume the next token if it is the keyword `keyword`
  fn accepted_keyword(&mut self, keyword: Keyword) -> CompileResult<'src, bool> {
    let next = self.next()?;

    if next.kind == Identifier && next.lexeme() == keyword.lexeme() {
      self.advance()?;
      Ok(true)
    } else {
      Ok(false)
    }
  }

  /// Consume an identifier as a `Name`, if one is next
  fn accept_name(&mut self) -> CompileResult<'src, Option<Name<'src>>> {
    if self.next_is(Identifier) {
      Ok(Some(self.parse_name()?))
    } else {
      Ok(None)
    }
  }

  /// When a recipe directly follows a comment line, the comment becomes
  /// the recipe's doc string
  fn take_doc(items: &mut Vec<Item<'src>>, eligible: bool) -> Option<&'src str> {
    if !eligible {
      return None;
    }

    if let Some(Item::Comment(contents)) = items.last() {
      let contents: &'src str = contents;
      items.pop();
      Some(contents[1..].trim_start())
    } else {
      None
    }
  }

  /// Parse a justfile, consuming self
  fn parse_ast(mut self) -> CompileResult<'src, Ast<'src>> {
    let mut items: Vec<Item<'src>> = Vec::new();

    // whether the last item is a comment line with no blank line after it
    let mut doc_eligible = false;

    self.accept(ByteOrderMark)?;

    loop {
      let next = self.next()?;

      match next.kind {
        Comment => {
          self.advance()?;
          items.push(Item::Comment(next.lexeme().trim_end()));
          self.expect_eol()?;
          doc_eligible = true;
        }
        Eol => {
          self.advance()?;
          doc_eligible = false;
        }
        Eof => {
          self.advance()?;
          break;
        }
        Identifier => match Keyword::from_lexeme(next.lexeme()) {
          Some(Keyword::Alias) if self.next_are(&[Identifier, Identifier, ColonEquals]) => {
            items.push(Item::Alias(self.parse_alias(BTreeSet::new())?));
          }
          Some(Keyword::Export) if self.next_are(&[Identifier, Identifier, ColonEquals]) => {
            self.presume_keyword(Keyword::Export)?;
            items.push(Item::Assignment(self.parse_assignment(true)?));
          }
          Some(Keyword::Import) if self.next_are(&[Identifier, StringToken]) => {
            return Err(next.error(UnimplementedFeature {
              feature: "`import`".to_owned(),
            }));
          }
          Some(Keyword::Set)
            if self.next_are(&[Identifier, Identifier, ColonEquals])
              || self.next_are(&[Identifier, Identifier, Comment])
              || self.next_are(&[Identifier, Identifier, Eof])
              || self.next_are(&[Identifier, Identifier, Eol]) =>
          {
            items.push(Item::Set(self.parse_set()?));
          }
          _ => {
            if self.next_are(&[Identifier, ColonEquals]) {
              items.push(Item::Assignment(self.parse_assignment(false)?));
            } else {
              let doc = Self::take_doc(&mut items, doc_eligible);
              items.push(Item::Recipe(self.parse_recipe(
                doc,
                false,
                BTreeSet::new(),
              )?));
            }
          }
        },
        At => {
          self.presume(At)?;
          let doc = Self::take_doc(&mut items, doc_eligible);
          items.push(Item::Recipe(self.parse_recipe(doc, true, BTreeSet::new())?));
        }
        BracketL => {
          let attributes = self.parse_attributes()?;

          match Keyword::from_lexeme(self.next()?.lexeme()) {
            Some(Keyword::Alias) if self.next_are(&[Identifier, Identifier, ColonEquals]) => {
              items.push(Item::Alias(self.parse_alias(attributes)?));
            }
            _ => {
              let quiet = self.accepted(At)?;
              let doc = Self::take_doc(&mut items, doc_eligible);
              items.push(Item::Recipe(self.parse_recipe(doc, quiet, attributes)?));
            }
          }
        }
        _ => {
          for kind in [At, BracketL, Comment, Eof, Eol, Identifier] {
            self.expected.insert(kind);
          }
          return Err(self.unexpected_token());
        }
      }
    }

    if self.cursor == self.tokens.len() {
      Ok(Ast { items })
    } else {
      Err(self.internal_error(format!(
        "parse completed with {} unconsumed tokens",
        self.tokens.len() - self.cursor,
      )))
    }
  }

  /// Parse an alias, e.g `alias name := target`
  fn parse_alias(
    &mut self,
    attributes: BTreeSet<Attribute>,
  ) -> CompileResult<'src, Alias<'src>> {
    self.presume_keyword(Keyword::Alias)?;
    let name = self.parse_name()?;
    self.presume_any(&[Equals, ColonEquals])?;
    let target = self.parse_name()?;
    self.expect_eol()?;

    Ok(Alias {
      attributes,
      name,
      target,
    })
  }

  /// Parse an assignment, e.g. `foo := bar`
  fn parse_assignment(&mut self, export: bool) -> CompileResult<'src, Assignment<'src>> {
    let name = self.parse_name()?;
    self.presume_any(&[Equals, ColonEquals])?;
    let value = self.parse_expression()?;
    self.expect_eol()?;

    Ok(Assignment {
      export,
      name,
      value,
    })
  }

  /// Parse an expression. Concatenation and join are right associative,
  /// so `'a' + 'b' + 'c'` parses as `'a' + ('b' + 'c')`.
  fn parse_expression(&mut self) -> CompileResult<'src, Expression<'src>> {
    if self.depth == 256 {
      return Err(self.next()?.error(ParsingRecursionDepthExceeded));
    }

    self.depth += 1;

    let expression = if self.accepted_keyword(Keyword::If)? {
      self.parse_conditional()?
    } else if self.accepted(Slash)? {
      Expression::Join {
        lhs: None,
        rhs: self.parse_expression()?.into(),
      }
    } else {
      let value = self.parse_value()?;

      if self.accepted(Slash)? {
        Expression::Join {
          lhs: Some(value.into()),
          rhs: self.parse_expression()?.into(),
        }
      } else if self.accepted(Plus)? {
        Expression::Concatenation {
          lhs: value.into(),
          rhs: self.parse_expression()?.into(),
        }
      } else {
        value
      }
    };

    self.depth -= 1;

    Ok(expression)
  }

  /// Parse a conditional, e.g. `if a == b { 'foo' } else { 'bar' }`. The
  /// `if` keyword has already been consumed.
  fn parse_conditional(&mut self) -> CompileResult<'src, Expression<'src>> {
    let lhs = self.parse_expression()?;

    let operator = if self.accepted(BangEquals)? {
      ConditionalOperator::Inequality
    } else {
      self.expect(EqualsEquals)?;
      ConditionalOperator::Equality
    };

    let rhs = self.parse_expression()?;

    self.expect(BraceL)?;
    let then = self.parse_expression()?;
    self.expect(BraceR)?;

    self.expect_keyword(Keyword::Else)?;

    let otherwise = if self.accepted_keyword(Keyword::If)? {
      self.parse_conditional()?
    } else {
      self.expect(BraceL)?;
      let otherwise = self.parse_expression()?;
      self.expect(BraceR)?;
      otherwise
    };

    Ok(Expression::Conditional {
      lhs: lhs.into(),
      rhs: rhs.into(),
      then: then.into(),
      otherwise: otherwise.into(),
      operator,
    })
  }

  /// Parse a value: a string, backtick, call, variable, or group
  fn parse_value(&mut self) -> CompileResult<'src, Expression<'src>> {
    if self.next_is(StringToken) {
      return Ok(Expression::StringLiteral {
        string_literal: self.parse_string_literal()?,
      });
    }

    if self.next_is(Backtick) {
      return self.parse_backtick();
    }

    if self.next_is(Identifier) {
      let name = self.parse_name()?;

      return if self.next_is(ParenL) {
        Ok(Expression::Call {
          name,
          arguments: self.parse_sequence()?,
        })
      } else {
        Ok(Expression::Variable { name })
      };
    }

    if self.accepted(ParenL)? {
      let contents = self.parse_expression()?.into();
      self.expect(ParenR)?;
      return Ok(Expression::Group { contents });
    }

    Err(self.unexpected_token())
  }

  /// Parse a backtick, e.g. `` `echo hello` ``
  fn parse_backtick(&mut self) -> CompileResult<'src, Expression<'src>> {
    let token = self.expect(Backtick)?;

    let kind = StringKind::from_string_or_backtick(token)?;
    let delimiter = kind.delimiter_len();
    let contents = &token.lexeme()[delimiter..token.lexeme().len() - delimiter];

    let contents = if kind.indented() {
      unindent(contents)
    } else {
      contents.to_owned()
    };

    if contents.starts_with("#!") {
      return Err(token.error(BacktickShebang));
    }

    Ok(Expression::Backtick { contents, token })
  }

  /// Parse a string literal, e.g. `"FOO"`
  fn parse_string_literal(&mut self) -> CompileResult<'src, StringLiteral<'src>> {
    let token = self.expect(StringToken)?;

    let kind = StringKind::from_string_or_backtick(token)?;
    let delimiter = kind.delimiter_len();
    let raw = &token.lexeme()[delimiter..token.lexeme().len() - delimiter];

    let unindented = if kind.indented() {
      unindent(raw)
    } else {
      raw.to_owned()
    };

    let cooked = if kind.processes_escape_sequences() {
      Self::cook(token, &unindented)?
    } else {
      unindented
    };

    Ok(StringLiteral { kind, raw, cooked })
  }

  /// Translate the escape sequences of a double-quoted string
  fn cook(token: Token<'src>, text: &str) -> CompileResult<'src, String> {
    let mut cooked = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
      if c != '\\' {
        cooked.push(c);
        continue;
      }

      match chars.next() {
        Some('n') => cooked.push('\n'),
        Some('r') => cooked.push('\r'),
        Some('t') => cooked.push('\t'),
        Some('\\') => cooked.push('\\'),
        Some('"') => cooked.push('"'),
        // an escaped newline joins the surrounding lines
        Some('\n') | None => {}
        Some(character) => {
          return Err(token.error(InvalidEscapeSequence { character }));
        }
      }
    }

    Ok(cooked)
  }

  /// Parse a name from an identifier token
  fn parse_name(&mut self) -> CompileResult<'src, Name<'src>> {
    self.expect(Identifier).map(Name::from_identifier)
  }

  /// Parse a parenthesized, comma-separated argument list
  fn parse_sequence(&mut self) -> CompileResult<'src, Vec<Expression<'src>>> {
    self.presume(ParenL)?;

    let mut arguments = Vec::new();

    while !self.next_is(ParenR) {
      arguments.push(self.parse_expression()?);

      if !self.accepted(Comma)? {
        break;
      }
    }

    self.expect(ParenR)?;

    Ok(arguments)
  }

  /// Parse a recipe: name, parameters, dependencies, and body
  fn parse_recipe(
    &mut self,
    doc: Option<&'src str>,
    quiet: bool,
    attributes: BTreeSet<Attribute>,
  ) -> CompileResult<'src, Recipe<'src>> {
    let name = self.parse_name()?;

    let mut parameters: Vec<Parameter<'src>> = Vec::new();

    loop {
      let kind = if self.accepted(Asterisk)? {
        ParameterKind::Star
      } else if self.accepted(Plus)? {
        ParameterKind::Plus
      } else {
        ParameterKind::Singular
      };

      if kind == ParameterKind::Singular && !self.next_is(Dollar) && !self.next_is(Identifier) {
        break;
      }

      // a variadic parameter swallows the rest of the arguments, so
      // nothing may follow it
      if parameters.last().map_or(false, |last| last.kind.is_variadic()) {
        let token = self.next()?;
        return Err(token.error(ParameterFollowsVariadicParameter {
          parameter: token.lexeme(),
        }));
      }

      parameters.push(self.parse_parameter(kind)?);
    }

    self.expect(Colon)?;

    let mut dependencies = Vec::new();

    while let Some(dependency) = self.accept_name()? {
      dependencies.push(dependency);
    }

    self.expect_eol()?;

    let body = self.parse_body()?;

    Ok(Recipe {
      private: name.lexeme().starts_with('_'),
      shebang: body.first().map_or(false, Line::is_shebang),
      attributes,
      body,
      dependencies,
      doc,
      name,
      parameters,
      quiet,
    })
  }

  /// Parse a recipe parameter
  fn parse_parameter(&mut self, kind: ParameterKind) -> CompileResult<'src, Parameter<'src>> {
    let export = self.accepted(Dollar)?;
    let name = self.parse_name()?;

    let default = if self.accepted(Equals)? {
      Some(self.parse_value()?)
    } else {
      None
    };

    Ok(Parameter {
      default,
      export,
      kind,
      name,
    })
  }

  /// Parse an indented recipe body into lines of text and interpolation
  /// fragments. Blank lines inside the body are kept, so that later lines
  /// report accurate source line numbers; trailing blank lines are
  /// dropped.
  fn parse_body(&mut self) -> CompileResult<'src, Vec<Line<'src>>> {
    let mut body: Vec<Line<'src>> = Vec::new();

    if self.accepted(Indent)? {
      while !self.accepted(Dedent)? {
        let number = self.next()?.line;
        let mut fragments = Vec::new();

        while !(self.accepted(Eol)? || self.next_is(Dedent)) {
          if let Some(token) = self.accept(Text)? {
            fragments.push(Fragment::Text { token });
          } else if self.accepted(InterpolationStart)? {
            fragments.push(Fragment::Interpolation {
              expression: self.parse_expression()?,
            });
            self.expect(InterpolationEnd)?;
          } else {
            return Err(self.unexpected_token());
          }
        }

        body.push(Line { fragments, number });
      }
    }

    while body.last().map_or(false, Line::is_empty) {
      body.pop();
    }

    Ok(body)
  }

  /// Parse a boolean setting value; a bare `set name` means true
  fn parse_set_bool(&mut self) -> CompileResult<'src, bool> {
    if !self.accepted(ColonEquals)? {
      return Ok(true);
    }

    let identifier = self.expect(Identifier)?;

    if Keyword::True == identifier.lexeme() {
      Ok(true)
    } else if Keyword::False == identifier.lexeme() {
      Ok(false)
    } else {
      Err(identifier.error(ExpectedKeyword {
        expected: vec![Keyword::True, Keyword::False],
        found: identifier,
      }))
    }
  }

  /// Parse a setting. Boolean settings may omit their value entirely;
  /// everything else requires `:=` and a value of the setting's type.
  fn parse_set(&mut self) -> CompileResult<'src, Set<'src>> {
    self.presume_keyword(Keyword::Set)?;

    let name = Name::from_identifier(self.presume(Identifier)?);

    let unknown = |name: Name<'src>| {
      name.error(UnknownSetting {
        setting: name.lexeme(),
      })
    };

    let Some(keyword) = Keyword::from_lexeme(name.lexeme()) else {
      return Err(unknown(name));
    };

    let value = match keyword {
      Keyword::AllowDuplicateRecipes => Setting::AllowDuplicateRecipes(self.parse_set_bool()?),
      Keyword::DotenvLoad => Setting::DotenvLoad(self.parse_set_bool()?),
      Keyword::Export => Setting::Export(self.parse_set_bool()?),
      Keyword::Fallback => Setting::Fallback(self.parse_set_bool()?),
      Keyword::IgnoreComments => Setting::IgnoreComments(self.parse_set_bool()?),
      Keyword::PositionalArguments => Setting::PositionalArguments(self.parse_set_bool()?),
      Keyword::WindowsPowershell => Setting::WindowsPowerShell(self.parse_set_bool()?),
      Keyword::DotenvFilename => {
        self.expect(ColonEquals)?;
        Setting::DotenvFilename(self.parse_string_literal()?.cooked)
      }
      Keyword::DotenvPath => {
        self.expect(ColonEquals)?;
        Setting::DotenvPath(self.parse_string_literal()?.cooked)
      }
      Keyword::Shell => {
        self.expect(ColonEquals)?;
        Setting::Shell(self.parse_shell()?)
      }
      Keyword::Tempdir => {
        self.expect(ColonEquals)?;
        Setting::Tempdir(self.parse_string_literal()?.cooked)
      }
      Keyword::WindowsShell => {
        self.expect(ColonEquals)?;
        Setting::WindowsShell(self.parse_shell()?)
      }
      _ => return Err(unknown(name)),
    };

    Ok(Set { name, value })
  }

  /// Parse a shell setting value, e.g. `['bash', '-c']`
  fn parse_shell(&mut self) -> CompileResult<'src, Shell<'src>> {
    self.expect(BracketL)?;

    let command = self.parse_string_literal()?;

    let mut arguments = Vec::new();

    if self.accepted(Comma)? {
      while !self.next_is(BracketR) {
        arguments.push(self.parse_string_literal()?);

        if !self.accepted(Comma)? {
          break;
        }
      }
    }

    self.expect(BracketR)?;

    Ok(Shell { arguments, command })
  }

  /// Parse one or more `[attribute]` lines
  fn parse_attributes(&mut self) -> CompileResult<'src, BTreeSet<Attribute>> {
    let mut attributes: BTreeMap<Attribute, usize> = BTreeMap::new();

    while self.accepted(BracketL)? {
      let name = self.parse_name()?;

      let attribute = Attribute::from_name(name).ok_or_else(|| {
        name.error(UnknownAttribute {
          attribute: name.lexeme(),
        })
      })?;

      if let Some(first) = attributes.insert(attribute, name.line) {
        return Err(name.error(DuplicateAttribute {
          attribute: name.lexeme(),
          first,
        }));
      }

      self.expect(BracketR)?;
      self.expect_eol()?;
    }

    Ok(attributes.into_keys().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use pretty_assertions::assert_eq;

  /// Parse `text` and compare the rendered AST against `want`. Both
  /// arguments are unindented, so tests can be written naturally inside
  /// indented string literals.
  fn parse_test(text: &str, want: &str) {
    let text = unindent(text);
    let tokens = Lexer::lex(&text).expect("lexing failed");
    let ast = Parser::parse(&tokens).expect("parsing failed");
    assert_eq!(ast.to_string(), unindent(want));
  }

  fn parse_error(text: &str, line: usize, column: usize, kind: CompileErrorKind) {
    let tokens = Lexer::lex(text).expect("lexing failed");
    match Parser::parse(&tokens) {
      Ok(ast) => panic!("Parsing unexpectedly succeeded: {ast}"),
      Err(error) => {
        assert_eq!(*error.kind, kind);
        assert_eq!(error.line(), line);
        assert_eq!(error.column(), column);
      }
    }
  }

  #[test]
  fn empty() {
    parse_test("", "");
  }

  #[test]
  fn comment() {
    parse_test("# hello", "# hello\n");
  }

  #[test]
  fn assignment() {
    parse_test(
      "
      x := 'hello'
      ",
      "
      x := 'hello'
      ",
    );
  }

  #[test]
  fn export_assignment() {
    parse_test(
      "
      export x := \"hello\"
      ",
      "
      export x := \"hello\"
      ",
    );
  }

  #[test]
  fn concatenation() {
    parse_test(
      "
      x := 'a' + 'b' + 'c'
      ",
      "
      x := 'a' + 'b' + 'c'
      ",
    );
  }

  #[test]
  fn join() {
    parse_test(
      "
      x := 'a' / 'b'
      ",
      "
      x := 'a' / 'b'
      ",
    );
  }

  #[test]
  fn group() {
    parse_test(
      "
      x := ('a' + 'b')
      ",
      "
      x := ('a' + 'b')
      ",
    );
  }

  #[test]
  fn backtick() {
    parse_test(
      "
      x := `which sh`
      ",
      "
      x := `which sh`
      ",
    );
  }

  #[test]
  fn conditional() {
    parse_test(
      "
      x := if 'a' == 'b' { 'c' } else { 'd' }
      ",
      "
      x := if 'a' == 'b' { 'c' } else { 'd' }
      ",
    );
  }

  #[test]
  fn conditional_inequality() {
    parse_test(
      "
      x := if 'a' != 'b' { 'c' } else { 'd' }
      ",
      "
      x := if 'a' != 'b' { 'c' } else { 'd' }
      ",
    );
  }

  #[test]
  fn conditional_else_if() {
    parse_test(
      "
      x := if 'a' == 'b' { 'c' } else if 'd' == 'e' { 'f' } else { 'g' }
      ",
      "
      x := if 'a' == 'b' { 'c' } else if 'd' == 'e' { 'f' } else { 'g' }
      ",
    );
  }

  #[test]
  fn call() {
    parse_test(
      "
      x := env_var('HOME')
      ",
      "
      x := env_var('HOME')
      ",
    );
  }

  #[test]
  fn call_multiple_arguments() {
    parse_test(
      "
      x := env_var_or_default('HOME', '/tmp')
      ",
      "
      x := env_var_or_default('HOME', '/tmp')
      ",
    );
  }

  #[test]
  fn alias() {
    parse_test(
      "
      alias t := test
      ",
      "
      alias t := test
      ",
    );
  }

  #[test]
  fn recipe() {
    parse_test(
      "
      foo:
      ",
      "
      foo:
      ",
    );
  }

  #[test]
  fn recipe_body() {
    parse_test(
      "
      foo:
        echo hello
      ",
      "
      foo:
          echo hello
      ",
    );
  }

  #[test]
  fn recipe_interpolation() {
    parse_test(
      "
      foo:
        echo {{ 'hello' }}
      ",
      "
      foo:
          echo {{ 'hello' }}
      ",
    );
  }

  #[test]
  fn recipe_quiet() {
    parse_test(
      "
      @foo:
      ",
      "
      @foo:
      ",
    );
  }

  #[test]
  fn recipe_parameters() {
    parse_test(
      "
      foo bar baz='qux':
      ",
      "
      foo bar baz='qux':
      ",
    );
  }

  #[test]
  fn recipe_variadic_star() {
    parse_test(
      "
      foo *args:
      ",
      "
      foo *args:
      ",
    );
  }

  #[test]
  fn recipe_variadic_plus_default() {
    parse_test(
      "
      foo +args='a':
      ",
      "
      foo +args='a':
      ",
    );
  }

  #[test]
  fn recipe_exported_parameter() {
    parse_test(
      "
      foo $bar:
      ",
      "
      foo $bar:
      ",
    );
  }

  #[test]
  fn recipe_dependencies() {
    parse_test(
      "
      foo: bar baz
      ",
      "
      foo: bar baz
      ",
    );
  }

  #[test]
  fn recipe_doc_comment() {
    parse_test(
      "
      # comment
      foo:
      ",
      "
      # comment
      foo:
      ",
    );
  }

  #[test]
  fn doc_comment_cleared_by_blank_line() {
    parse_test(
      "
      # comment

      foo:
      ",
      "
      # comment

      foo:
      ",
    );
  }

  #[test]
  fn recipe_attributes() {
    parse_test(
      "
      [private]
      [no-cd]
      foo:
      ",
      "
      [no-cd]
      [private]
      foo:
      ",
    );
  }

  #[test]
  fn settings() {
    parse_test(
      "
      set export
      set dotenv-load := false
      set shell := ['bash', '-c']
      set dotenv-filename := '.env.local'
      ",
      "
      set export := true
      set dotenv-load := false
      set shell := ['bash', '-c']
      set dotenv-filename := \".env.local\"
      ",
    );
  }

  #[test]
  fn escape_sequences() {
    parse_test(
      r#"
      x := "a\nb\tc\"d\\e"
      "#,
      r#"
      x := "a\nb\tc\"d\\e"
      "#,
    );
  }

  #[test]
  fn unknown_attribute() {
    parse_error(
      "[bogus]\nfoo:\n",
      1,
      2,
      CompileErrorKind::UnknownAttribute { attribute: "bogus" },
    );
  }

  #[test]
  fn unknown_setting() {
    parse_error(
      "set bogus := 'x'\n",
      1,
      5,
      CompileErrorKind::UnknownSetting { setting: "bogus" },
    );
  }

  #[test]
  fn parameter_follows_variadic() {
    parse_error(
      "foo *args bar:\n",
      1,
      11,
      CompileErrorKind::ParameterFollowsVariadicParameter { parameter: "bar" },
    );
  }

  #[test]
  fn import_unsupported() {
    parse_error(
      "import 'other.just'\n",
      1,
      1,
      CompileErrorKind::UnimplementedFeature {
        feature: "`import`".to_owned(),
      },
    );
  }

  #[test]
  fn backtick_shebang() {
    parse_error("x := `#!/bin/sh`\n", 1, 6, CompileErrorKind::BacktickShebang);
  }

  #[test]
  fn invalid_escape() {
    parse_error(
      "x := \"\\q\"\n",
      1,
      6,
      CompileErrorKind::InvalidEscapeSequence { character: 'q' },
    );
  }

  #[test]
  fn duplicate_attribute() {
    parse_error(
      "[private]\n[private]\nfoo:\n",
      2,
      2,
      CompileErrorKind::DuplicateAttribute {
        attribute: "private",
        first: 0,
      },
    );
  }

  #[test]
  fn unexpected_token() {
    parse_error(
      "foo: :\n",
      1,
      6,
      CompileErrorKind::UnexpectedToken {
        expected: vec![
          TokenKind::Comment,
          TokenKind::Eof,
          TokenKind::Eol,
          TokenKind::Identifier,
        ],
        found: TokenKind::Colon,
      },
    );
  }
}
