use super::*;

/// The `set` statements of a justfile, folded into a single value by the
/// analyzer.
#[derive(Debug, PartialEq, Default)]
pub(crate) struct Settings<'src> {
  pub(crate) allow_duplicate_recipes: bool,
  pub(crate) dotenv_filename: Option<String>,
  pub(crate) dotenv_load: bool,
  pub(crate) dotenv_path: Option<String>,
  pub(crate) export: bool,
  pub(crate) fallback: bool,
  pub(crate) ignore_comments: bool,
  pub(crate) positional_arguments: bool,
  pub(crate) shell: Option<Shell<'src>>,
  pub(crate) tempdir: Option<String>,
  pub(crate) windows_powershell: bool,
  pub(crate) windows_shell: Option<Shell<'src>>,
}

impl<'src> Settings<'src> {
  /// The filename consulted by dotenv loading, relative to the justfile
  /// directory unless `dotenv-path` is absolute.
  pub(crate) fn dotenv(&self) -> Option<String> {
    if let Some(path) = &self.dotenv_path {
      Some(path.clone())
    } else if self.dotenv_load || self.dotenv_filename.is_some() {
      Some(
        self
          .dotenv_filename
          .clone()
          .unwrap_or_else(|| ".env".to_owned()),
      )
    } else {
      None
    }
  }
}
