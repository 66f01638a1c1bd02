use super::*;

/// A single line in a recipe body, consisting of any number of `Fragment`s.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Line<'src> {
  pub(crate) fragments: Vec<Fragment<'src>>,
  /// Zero-based line number in the source text.
  pub(crate) number: usize,
}

impl<'src> Line<'src> {
  pub(crate) fn first_text(&self) -> Option<&'src str> {
    if let Some(Fragment::Text { token }) = self.fragments.first() {
      Some(token.lexeme())
    } else {
      None
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.fragments.is_empty()
  }

  pub(crate) fn is_comment(&self) -> bool {
    self.first_text().map_or(false, |text| text.starts_with('#'))
  }

  pub(crate) fn is_continuation(&self) -> bool {
    match self.fragments.last() {
      Some(Fragment::Text { token }) => token.lexeme().ends_with('\\'),
      _ => false,
    }
  }

  pub(crate) fn is_shebang(&self) -> bool {
    self.first_text().map_or(false, |text| text.starts_with("#!"))
  }

  pub(crate) fn is_quiet(&self) -> bool {
    self.first_text().map_or(false, |text| text.starts_with('@'))
  }

  pub(crate) fn is_infallible(&self) -> bool {
    self.first_text().map_or(false, |text| text.starts_with('-'))
  }
}
