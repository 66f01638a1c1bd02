use super::*;

/// An alias, e.g. `name := target`
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Alias<'src> {
  pub(crate) attributes: BTreeSet<Attribute>,
  pub(crate) name: Name<'src>,
  pub(crate) target: Name<'src>,
}

impl<'src> Alias<'src> {
  pub(crate) fn is_private(&self) -> bool {
    self.name.lexeme().starts_with('_') || self.attributes.contains(&Attribute::Private)
  }
}

impl<'src> fmt::Display for Alias<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "alias {} := {}", self.name.lexeme(), self.target.lexeme())
  }
}
