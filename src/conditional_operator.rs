use super::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ConditionalOperator {
  Equality,
  Inequality,
}

impl fmt::Display for ConditionalOperator {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Equality => write!(f, "=="),
      Self::Inequality => write!(f, "!="),
    }
  }
}
