use super::*;

/// An assignment, e.g. `foo := bar`
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Assignment<'src> {
  /// Export assignment as environment variable
  pub(crate) export: bool,
  /// Variable name
  pub(crate) name: Name<'src>,
  /// Assigned expression
  pub(crate) value: Expression<'src>,
}

impl<'src> Assignment<'src> {
  pub(crate) fn is_private(&self) -> bool {
    self.name.lexeme().starts_with('_')
  }
}

impl<'src> fmt::Display for Assignment<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.export {
      write!(f, "export ")?;
    }
    write!(f, "{} := {}", self.name, self.value)
  }
}
