use super::*;

pub(crate) struct Compiler;

impl Compiler {
  /// Compile a justfile into a self-contained POSIX shell script
  pub(crate) fn compile<'src>(
    src: &'src str,
    source_name: &str,
    script_name: &str,
  ) -> CompileResult<'src, String> {
    let tokens = Lexer::lex(src)?;
    let ast = Parser::parse(&tokens)?;
    let justfile = Analyzer::analyze(&ast, src)?;
    Generator::generate(&justfile, source_name, script_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compiles_to_shell() {
    let script = Compiler::compile("hello:\n  echo world\n", "justfile", "just.sh")
      .expect("compilation failed");
    assert!(script.starts_with("#!/bin/sh\n"));
    assert!(script.contains("FUN_hello()"));
  }

  #[test]
  fn reports_first_error() {
    let error = Compiler::compile("x := y\n", "justfile", "just.sh").unwrap_err();
    assert!(matches!(
      *error.kind,
      CompileErrorKind::UndefinedVariable { variable: "y" }
    ));
    assert_eq!(error.line(), 1);
    assert_eq!(error.column(), 6);
  }
}
