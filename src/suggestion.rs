use super::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Suggestion<'src> {
  pub(crate) name: &'src str,
}

impl<'src> Suggestion<'src> {
  /// The closest candidate to `target`, if any is close enough to be a
  /// plausible typo.
  pub(crate) fn closest(
    target: &str,
    candidates: impl IntoIterator<Item = &'src str>,
  ) -> Option<Suggestion<'src>> {
    candidates
      .into_iter()
      .map(|name| (edit_distance(name, target), name))
      .filter(|(distance, _)| *distance <= 2)
      .min_by_key(|(distance, _)| *distance)
      .map(|(_, name)| Suggestion { name })
  }
}

impl<'src> fmt::Display for Suggestion<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Did you mean `{}`?", self.name)
  }
}
