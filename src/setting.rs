use super::*;

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Setting<'src> {
  AllowDuplicateRecipes(bool),
  DotenvFilename(String),
  DotenvLoad(bool),
  DotenvPath(String),
  Export(bool),
  Fallback(bool),
  IgnoreComments(bool),
  PositionalArguments(bool),
  Shell(Shell<'src>),
  Tempdir(String),
  WindowsPowerShell(bool),
  WindowsShell(Shell<'src>),
}

impl<'src> fmt::Display for Setting<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Setting::AllowDuplicateRecipes(value)
      | Setting::DotenvLoad(value)
      | Setting::Export(value)
      | Setting::Fallback(value)
      | Setting::IgnoreComments(value)
      | Setting::PositionalArguments(value)
      | Setting::WindowsPowerShell(value) => write!(f, "{value}"),
      Setting::Shell(shell) | Setting::WindowsShell(shell) => write!(f, "{shell}"),
      Setting::DotenvFilename(value) | Setting::DotenvPath(value) | Setting::Tempdir(value) => {
        write!(f, "\"{value}\"")
      }
    }
  }
}
