use super::*;

#[derive(Debug, PartialEq)]
pub(crate) struct CompileError<'src> {
  pub(crate) token: Token<'src>,
  pub(crate) kind: Box<CompileErrorKind<'src>>,
}

impl<'src> CompileError<'src> {
  pub(crate) fn new(token: Token<'src>, kind: CompileErrorKind<'src>) -> CompileError<'src> {
    CompileError {
      token,
      kind: kind.into(),
    }
  }

  pub(crate) fn line(&self) -> usize {
    self.token.line + 1
  }

  pub(crate) fn column(&self) -> usize {
    self.token.column + 1
  }
}

fn show_whitespace(text: &str) -> String {
  text
    .chars()
    .map(|c| match c {
      '\t' => '␉',
      ' ' => '␠',
      _ => c,
    })
    .collect()
}

fn write_expected(f: &mut Formatter, expected: &Range<usize>) -> fmt::Result {
  if expected.start == expected.end {
    write!(f, "but takes {}", expected.start)
  } else if expected.end == usize::MAX {
    write!(f, "but takes {} or more", expected.start)
  } else {
    write!(f, "but takes {} to {}", expected.start, expected.end)
  }
}

impl<'src> fmt::Display for CompileError<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    use CompileErrorKind::*;

    match &*self.kind {
      AliasInvalidAttribute { alias, attribute } => write!(
        f,
        "Alias `{alias}` has invalid attribute `{}`",
        attribute.name()
      )?,
      AliasShadowsRecipe { alias, recipe_line } => write!(
        f,
        "Alias `{alias}` defined on line {} shadows recipe `{alias}` defined on line {}",
        self.line(),
        recipe_line + 1,
      )?,
      BacktickShebang => write!(f, "Backticks may not start with `#!`")?,
      CircularAliasDependency { alias, circle } => {
        if circle.len() == 2 {
          write!(f, "Alias `{alias}` is defined in terms of itself")?;
        } else {
          write!(
            f,
            "Alias `{alias}` has circular target `{}`",
            circle.join(" -> ")
          )?;
        }
      }
      CircularRecipeDependency { recipe, circle } => {
        if circle.len() == 2 {
          write!(f, "Recipe `{recipe}` depends on itself")?;
        } else {
          write!(
            f,
            "Recipe `{recipe}` has circular dependency `{}`",
            circle.join(" -> ")
          )?;
        }
      }
      CircularVariableDependency { variable, circle } => {
        if circle.len() == 2 {
          write!(f, "Variable `{variable}` is defined in terms of itself")?;
        } else {
          write!(
            f,
            "Variable `{variable}` depends on its own value: `{}`",
            circle.join(" -> ")
          )?;
        }
      }
      DuplicateAlias { alias, first } => write!(
        f,
        "Alias `{alias}` first defined on line {} is redefined on line {}",
        first + 1,
        self.line(),
      )?,
      DuplicateAttribute { attribute, first } => write!(
        f,
        "Recipe attribute `{attribute}` first used on line {} is duplicated on line {}",
        first + 1,
        self.line(),
      )?,
      DuplicateParameter { recipe, parameter } => {
        write!(f, "Recipe `{recipe}` has duplicate parameter `{parameter}`")?;
      }
      DuplicateRecipe { recipe, first } => write!(
        f,
        "Recipe `{recipe}` first defined on line {} is redefined on line {}",
        first + 1,
        self.line(),
      )?,
      DuplicateSet { setting, first } => write!(
        f,
        "Setting `{setting}` first set on line {} is redefined on line {}",
        first + 1,
        self.line(),
      )?,
      DuplicateVariable { variable } => {
        write!(f, "Variable `{variable}` has multiple definitions")?;
      }
      ExpectedKeyword { expected, found } => {
        if found.kind == TokenKind::Identifier {
          write!(
            f,
            "Expected keyword {} but found identifier `{}`",
            List::or(expected),
            found.lexeme()
          )?;
        } else {
          write!(
            f,
            "Expected keyword {} but found `{}`",
            List::or(expected),
            found.kind
          )?;
        }
      }
      FunctionArgumentCountMismatch {
        function,
        found,
        expected,
      } => {
        write!(
          f,
          "Function `{function}` called with {} ",
          Count("argument", *found),
        )?;
        write_expected(f, expected)?;
      }
      FunctionCall { function, message } => {
        write!(f, "Call to function `{function}` failed: {message}")?;
      }
      InconsistentLeadingWhitespace { expected, found } => write!(
        f,
        "Recipe line has inconsistent leading whitespace. Recipe started with `{}` but found \
         line with `{}`",
        show_whitespace(expected),
        show_whitespace(found)
      )?,
      Internal { message } => write!(
        f,
        "Internal error, this may indicate a bug in just-sh: {message}"
      )?,
      InvalidEscapeSequence { character } => {
        write!(f, "`\\{character}` is not a valid escape sequence")?;
      }
      MixedLeadingWhitespace { whitespace } => write!(
        f,
        "Found a mix of tabs and spaces in leading whitespace: `{}`\nLeading whitespace may \
         consist of tabs or spaces, but not both",
        show_whitespace(whitespace)
      )?,
      ParameterFollowsVariadicParameter { parameter } => {
        write!(f, "Parameter `{parameter}` follows variadic parameter")?;
      }
      ParameterShadowsVariable { parameter } => write!(
        f,
        "Parameter `{parameter}` shadows variable of the same name"
      )?,
      ParsingRecursionDepthExceeded => write!(f, "Parsing recursion depth exceeded")?,
      RequiredParameterFollowsDefaultParameter { parameter } => write!(
        f,
        "Non-default parameter `{parameter}` follows default parameter"
      )?,
      UndefinedVariable { variable } => write!(f, "Variable `{variable}` not defined")?,
      UnexpectedCharacter { expected } => write!(f, "Expected character `{expected}`")?,
      UnexpectedToken { expected, found } => {
        write!(f, "Expected {}, but found {found}", List::or(expected))?;
      }
      UnimplementedFeature { feature } => {
        write!(f, "{feature} is not supported by the shell code generator")?;
      }
      UnknownAliasTarget {
        alias,
        target,
        suggestion,
      } => {
        write!(f, "Alias `{alias}` has an unknown target `{target}`")?;
        if let Some(suggestion) = suggestion {
          write!(f, "\n{suggestion}")?;
        }
      }
      UnknownAttribute { attribute } => write!(f, "Unknown attribute `{attribute}`")?,
      UnknownDependency {
        recipe,
        unknown,
        suggestion,
      } => {
        write!(f, "Recipe `{recipe}` has unknown dependency `{unknown}`")?;
        if let Some(suggestion) = suggestion {
          write!(f, "\n{suggestion}")?;
        }
      }
      UnknownFunction {
        function,
        suggestion,
      } => {
        write!(f, "Call to unknown function `{function}`")?;
        if let Some(suggestion) = suggestion {
          write!(f, "\n{suggestion}")?;
        }
      }
      UnknownSetting { setting } => write!(f, "Unknown setting `{setting}`")?,
      UnknownStartOfToken => write!(f, "Unknown start of token:")?,
      UnterminatedBacktick => write!(f, "Unterminated backtick")?,
      UnterminatedInterpolation => write!(f, "Unterminated interpolation")?,
      UnterminatedString => write!(f, "Unterminated string")?,
    }

    writeln!(f)?;
    self.token.write_context(f)
  }
}
