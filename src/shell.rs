use super::*;

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Shell<'src> {
  pub(crate) arguments: Vec<StringLiteral<'src>>,
  pub(crate) command: StringLiteral<'src>,
}

impl<'src> fmt::Display for Shell<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "[{}", self.command)?;

    for argument in &self.arguments {
      write!(f, ", {argument}")?;
    }

    write!(f, "]")
  }
}
