use super::*;

#[derive(
  EnumString, Display, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "kebab_case")]
pub(crate) enum Attribute {
  Confirm,
  Linewise,
  Linux,
  Macos,
  NoCd,
  NoExitMessage,
  Private,
  Unix,
  Windows,
}

impl Attribute {
  pub(crate) fn from_name(name: Name) -> Option<Attribute> {
    name.lexeme().parse().ok()
  }

  pub(crate) fn name(self) -> &'static str {
    self.into()
  }

  pub(crate) fn is_platform(self) -> bool {
    use Attribute::*;
    matches!(self, Linux | Macos | Unix | Windows)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attribute_case() {
    assert_eq!(Attribute::NoCd.name(), "no-cd");
    assert_eq!(Attribute::NoExitMessage.name(), "no-exit-message");
    assert_eq!("private".parse::<Attribute>().ok(), Some(Attribute::Private));
    assert!("bogus".parse::<Attribute>().is_err());
  }
}
