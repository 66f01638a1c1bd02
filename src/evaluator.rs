use super::*;

use crate::function::Emission;

/// Lowers expressions to POSIX shell words.
///
/// Every expression lowers to a single shell word, safe to splice into the
/// generated script anywhere a word is expected. Subtrees that are pure
/// functions of literal text are folded at compile time and spliced as
/// quoted literals; everything else defers to runtime expansion against
/// the generated script's variables and helper functions.
pub(crate) struct Evaluator {
  /// Names of runtime helpers referenced by lowered expressions, to be
  /// carried in the emitted script
  pub(crate) helpers: BTreeSet<&'static str>,
}

impl Evaluator {
  pub(crate) fn new() -> Evaluator {
    Evaluator {
      helpers: BTreeSet::new(),
    }
  }

  /// Lower `expression` to a shell word. When `recipe` is given, variable
  /// references may resolve to its parameters.
  pub(crate) fn evaluate_expression<'src>(
    &mut self,
    expression: &Expression<'src>,
    recipe: Option<&Recipe<'src>>,
  ) -> CompileResult<'src, String> {
    if let Some(folded) = self.fold(expression)? {
      return Ok(sh_quote(&folded));
    }

    match expression {
      Expression::Backtick { contents, .. } => Ok(format!("\"$( {contents} )\"")),
      Expression::Call { name, arguments } => {
        let function = Function::get(name.lexeme()).ok_or_else(|| {
          name.error(CompileErrorKind::Internal {
            message: format!("unknown function `{}` reached lowering", name.lexeme()),
          })
        })?;

        let mut words = Vec::new();
        for argument in arguments {
          words.push(self.evaluate_expression(argument, recipe)?);
        }

        match function.emission {
          Emission::Word(word) => Ok(word.to_owned()),
          Emission::Helper(helper) => {
            self.insert_helper(helper);
            if words.is_empty() {
              Ok(format!("\"$( {helper} )\""))
            } else {
              Ok(format!("\"$( {helper} {} )\"", words.join(" ")))
            }
          }
        }
      }
      Expression::Concatenation { lhs, rhs } => {
        let lhs = self.evaluate_expression(lhs, recipe)?;
        let rhs = self.evaluate_expression(rhs, recipe)?;
        Ok(format!("{lhs}{rhs}"))
      }
      Expression::Conditional {
        lhs,
        rhs,
        then,
        otherwise,
        operator,
      } => {
        if let (Some(lhs), Some(rhs)) = (self.fold(lhs)?, self.fold(rhs)?) {
          let taken = match operator {
            ConditionalOperator::Equality => lhs == rhs,
            ConditionalOperator::Inequality => lhs != rhs,
          };
          let branch = if taken { then } else { otherwise };
          return self.evaluate_expression(branch, recipe);
        }

        let lhs = self.evaluate_expression(lhs, recipe)?;
        let rhs = self.evaluate_expression(rhs, recipe)?;
        let then = self.evaluate_expression(then, recipe)?;
        let otherwise = self.evaluate_expression(otherwise, recipe)?;

        let operator = match operator {
          ConditionalOperator::Equality => "=",
          ConditionalOperator::Inequality => "!=",
        };

        Ok(format!(
          "\"$( if [ {lhs} {operator} {rhs} ]; then printf '%s' {then}; else printf '%s' \
           {otherwise}; fi )\""
        ))
      }
      Expression::Group { contents } => self.evaluate_expression(contents, recipe),
      Expression::Join { lhs, rhs } => {
        let rhs = self.evaluate_expression(rhs, recipe)?;
        match lhs {
          Some(lhs) => {
            let lhs = self.evaluate_expression(lhs, recipe)?;
            Ok(format!("{lhs}'/'{rhs}"))
          }
          None => Ok(format!("'/'{rhs}")),
        }
      }
      Expression::StringLiteral { string_literal } => Ok(sh_quote(&string_literal.cooked)),
      Expression::Variable { name } => {
        let lexeme = name.lexeme();

        if let Some(recipe) = recipe {
          if recipe
            .parameters
            .iter()
            .any(|parameter| parameter.name.lexeme() == lexeme)
          {
            return Ok(format!(
              "\"${{PARAM_{}_{}}}\"",
              mangle(recipe.name.lexeme()),
              mangle(lexeme)
            ));
          }
        }

        Ok(format!("\"${{VAR_{}}}\"", mangle(lexeme)))
      }
    }
  }

  /// Evaluate an expression at compile time, if it is a pure function of
  /// literal text
  fn fold<'src>(&self, expression: &Expression<'src>) -> CompileResult<'src, Option<String>> {
    match expression {
      Expression::Backtick { .. } | Expression::Variable { .. } => Ok(None),
      Expression::Call { name, arguments } => {
        let function = Function::get(name.lexeme()).ok_or_else(|| {
          name.error(CompileErrorKind::Internal {
            message: format!("unknown function `{}` reached lowering", name.lexeme()),
          })
        })?;

        let Some(fold) = function.fold else {
          return Ok(None);
        };

        let mut folded_arguments = Vec::new();
        for argument in arguments {
          match self.fold(argument)? {
            Some(folded) => folded_arguments.push(folded),
            None => return Ok(None),
          }
        }

        match fold(&folded_arguments) {
          Ok(value) => Ok(Some(value)),
          Err(message) => Err(name.error(CompileErrorKind::FunctionCall {
            function: name.lexeme(),
            message,
          })),
        }
      }
      Expression::Concatenation { lhs, rhs } => {
        match (self.fold(lhs)?, self.fold(rhs)?) {
          (Some(lhs), Some(rhs)) => Ok(Some(lhs + &rhs)),
          _ => Ok(None),
        }
      }
      Expression::Conditional {
        lhs,
        rhs,
        then,
        otherwise,
        operator,
      } => match (self.fold(lhs)?, self.fold(rhs)?) {
        (Some(lhs), Some(rhs)) => {
          let taken = match operator {
            ConditionalOperator::Equality => lhs == rhs,
            ConditionalOperator::Inequality => lhs != rhs,
          };
          self.fold(if taken { then } else { otherwise })
        }
        _ => Ok(None),
      },
      Expression::Group { contents } => self.fold(contents),
      Expression::Join { lhs, rhs } => {
        let rhs_folded = match self.fold(rhs)? {
          Some(folded) => folded,
          None => return Ok(None),
        };
        match lhs {
          Some(lhs) => match self.fold(lhs)? {
            Some(lhs) => Ok(Some(Utf8Path::new(&lhs).join(&rhs_folded).to_string())),
            None => Ok(None),
          },
          None => Ok(Some(Utf8Path::new("/").join(&rhs_folded).to_string())),
        }
      }
      Expression::StringLiteral { string_literal } => Ok(Some(string_literal.cooked.clone())),
    }
  }

  fn insert_helper(&mut self, name: &'static str) {
    if !self.helpers.insert(name) {
      return;
    }

    if let Some(helper) = Function::helper(name) {
      for dependency in helper.dependencies {
        self.insert_helper(dependency);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use pretty_assertions::assert_eq;

  fn lower(text: &str) -> String {
    lower_with(text, &mut Evaluator::new())
  }

  fn lower_with(text: &str, evaluator: &mut Evaluator) -> String {
    let tokens = Lexer::lex(text).expect("lexing failed");
    let ast = Parser::parse(&tokens).expect("parsing failed");
    let justfile = Analyzer::analyze(&ast, text).expect("analysis failed");
    evaluator
      .evaluate_expression(&justfile.assignments[0].value, None)
      .expect("lowering failed")
  }

  #[test]
  fn literal() {
    assert_eq!(lower("x := 'hello'\n"), "'hello'");
  }

  #[test]
  fn literal_with_quote() {
    assert_eq!(lower("x := \"don't\"\n"), "'don'\\''t'");
  }

  #[test]
  fn variable_reference() {
    assert_eq!(lower("x := y\ny := 'a'\n"), "\"${VAR_y}\"");
  }

  #[test]
  fn hyphenated_variable_reference() {
    assert_eq!(lower("x := a-b\na-b := 'a'\n"), "\"${VAR_a_b}\"");
  }

  #[test]
  fn concatenation_folds() {
    assert_eq!(lower("x := 'a' + 'b'\n"), "'ab'");
  }

  #[test]
  fn concatenation_with_variable() {
    assert_eq!(lower("x := y + 'b'\ny := 'a'\n"), "\"${VAR_y}\"'b'");
  }

  #[test]
  fn join_folds() {
    assert_eq!(lower("x := 'a' / 'b'\n"), "'a/b'");
    assert_eq!(lower("x := 'a/' / 'b'\n"), "'a/b'");
    assert_eq!(lower("x := 'a' / '/b'\n"), "'/b'");
  }

  #[test]
  fn join_with_variable() {
    assert_eq!(lower("x := y / 'b'\ny := 'a'\n"), "\"${VAR_y}\"'/''b'");
  }

  #[test]
  fn pure_call_folds() {
    assert_eq!(lower("x := uppercase('foo')\n"), "'FOO'");
    assert_eq!(lower("x := replace('aXb', 'X', '-')\n"), "'a-b'");
  }

  #[test]
  fn impure_call_emits_helper() {
    let mut evaluator = Evaluator::new();
    assert_eq!(
      lower_with("x := env_var('HOME')\n", &mut evaluator),
      "\"$( env_var 'HOME' )\""
    );
    assert!(evaluator.helpers.contains("env_var"));
  }

  #[test]
  fn dynamic_call_emits_helper_with_dependencies() {
    let mut evaluator = Evaluator::new();
    assert_eq!(
      lower_with("x := snakecase(y)\ny := 'a'\n", &mut evaluator),
      "\"$( snakecase \"${VAR_y}\" )\""
    );
    assert!(evaluator.helpers.contains("snakecase"));
    assert!(evaluator.helpers.contains("split_words"));
  }

  #[test]
  fn nullary_runtime_word() {
    assert_eq!(lower("x := os()\n"), "\"${PLATFORM_OS}\"");
    assert_eq!(lower("x := just_pid()\n"), "\"$$\"");
  }

  #[test]
  fn static_conditional_folds() {
    assert_eq!(
      lower("x := if 'a' == 'a' { 'yes' } else { 'no' }\n"),
      "'yes'"
    );
    assert_eq!(
      lower("x := if 'a' != 'a' { 'yes' } else { 'no' }\n"),
      "'no'"
    );
  }

  #[test]
  fn static_conditional_with_dynamic_branch() {
    assert_eq!(
      lower("x := if 'a' == 'a' { os() } else { 'no' }\n"),
      "\"${PLATFORM_OS}\""
    );
  }

  #[test]
  fn dynamic_conditional() {
    assert_eq!(
      lower("x := if os() == 'linux' { 'l' } else { 'o' }\n"),
      "\"$( if [ \"${PLATFORM_OS}\" = 'linux' ]; then printf '%s' 'l'; else printf '%s' 'o'; fi \
       )\""
    );
  }

  #[test]
  fn backtick() {
    assert_eq!(lower("x := `which sh`\n"), "\"$( which sh )\"");
  }

  #[test]
  fn error_call_lowered_to_runtime() {
    let mut evaluator = Evaluator::new();
    assert_eq!(
      lower_with("x := error('boom')\n", &mut evaluator),
      "\"$( runtime_error 'boom' )\""
    );
  }

  #[test]
  fn parameter_reference() {
    let text = "greet name='world':\n  echo {{ name }}\n";
    let tokens = Lexer::lex(text).expect("lexing failed");
    let ast = Parser::parse(&tokens).expect("parsing failed");
    let justfile = Analyzer::analyze(&ast, text).expect("analysis failed");
    let recipe = &justfile.recipes[0];
    let Fragment::Interpolation { expression } = &recipe.body[0].fragments[1] else {
      panic!("expected interpolation");
    };
    let word = Evaluator::new()
      .evaluate_expression(expression, Some(recipe))
      .expect("lowering failed");
    assert_eq!(word, "\"${PARAM_greet_name}\"");
  }

  #[test]
  fn invalid_regex_fails_at_compile_time() {
    let text = "x := replace_regex('a', '[', '')\n";
    let tokens = Lexer::lex(text).expect("lexing failed");
    let ast = Parser::parse(&tokens).expect("parsing failed");
    let justfile = Analyzer::analyze(&ast, text).expect("analysis failed");
    let result = Evaluator::new().evaluate_expression(&justfile.assignments[0].value, None);
    match result {
      Err(error) => assert!(matches!(
        *error.kind,
        CompileErrorKind::FunctionCall {
          function: "replace_regex",
          ..
        }
      )),
      Ok(word) => panic!("lowering unexpectedly succeeded: {word}"),
    }
  }
}
