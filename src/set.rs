use super::*;

/// A `set` statement, e.g. `set export`
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Set<'src> {
  pub(crate) name: Name<'src>,
  pub(crate) value: Setting<'src>,
}

impl<'src> fmt::Display for Set<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "set {} := {}", self.name, self.value)
  }
}
