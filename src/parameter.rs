use super::*;

/// A single function parameter
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Parameter<'src> {
  /// An optional default expression
  pub(crate) default: Option<Expression<'src>>,
  /// Export parameter as environment variable
  pub(crate) export: bool,
  /// The kind of parameter
  pub(crate) kind: ParameterKind,
  /// The parameter name
  pub(crate) name: Name<'src>,
}

impl<'src> fmt::Display for Parameter<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.export {
      write!(f, "$")?;
    }
    write!(f, "{}", self.kind.prefix())?;
    write!(f, "{}", self.name.lexeme())?;
    if let Some(ref default) = self.default {
      write!(f, "={default}")?;
    }
    Ok(())
  }
}
