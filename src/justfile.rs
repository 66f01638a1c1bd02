use super::*;

/// The analyzed semantic model of a justfile: items indexed by name, with
/// aliases, settings, and an initialization order for variables.
#[derive(Debug)]
pub(crate) struct Justfile<'src> {
  pub(crate) aliases: BTreeMap<&'src str, Alias<'src>>,
  /// Assignments in source order
  pub(crate) assignments: Vec<Assignment<'src>>,
  /// Indices into `assignments`, ordered so that every assignment comes
  /// after the assignments it references
  pub(crate) initialization_order: Vec<usize>,
  /// Recipes in source order
  pub(crate) recipes: Vec<Recipe<'src>>,
  pub(crate) settings: Settings<'src>,
  /// The source text, reproduced verbatim by `--dump`
  pub(crate) source: &'src str,
}

impl<'src> Justfile<'src> {
  pub(crate) fn recipe(&self, name: &str) -> Option<&Recipe<'src>> {
    self
      .recipes
      .iter()
      .find(|recipe| recipe.name.lexeme() == name)
  }

  pub(crate) fn assignment(&self, name: &str) -> Option<&Assignment<'src>> {
    self
      .assignments
      .iter()
      .find(|assignment| assignment.name.lexeme() == name)
  }

  /// The default recipe, run when the generated script is invoked with no
  /// arguments
  pub(crate) fn first(&self) -> Option<&Recipe<'src>> {
    self.recipes.first()
  }

  pub(crate) fn public_recipes(&self) -> impl Iterator<Item = &Recipe<'src>> {
    self.recipes.iter().filter(|recipe| recipe.is_public())
  }

  /// The recipe an alias ultimately refers to. Alias chains were
  /// validated by the analyzer, so this always terminates.
  pub(crate) fn resolve_alias(&self, alias: &Alias<'src>) -> &'src str {
    let mut target = alias.target.lexeme();

    while let Some(next) = self.aliases.get(target) {
      target = next.target.lexeme();
    }

    target
  }
}
