use super::*;

/// A line fragment consisting either of a literal chunk of text or an
/// interpolation to be expanded when the line runs.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Fragment<'src> {
  Text { token: Token<'src> },
  Interpolation { expression: Expression<'src> },
}
