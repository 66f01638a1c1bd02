use super::*;

use CompileErrorKind::*;

/// Check that every recipe dependency refers to a recipe that exists, and
/// that the dependency graph contains no cycles.
pub(crate) struct RecipeResolver<'src, 'run> {
  recipes: &'run [Recipe<'src>],
  resolved: BTreeSet<&'src str>,
}

impl<'src, 'run> RecipeResolver<'src, 'run> {
  pub(crate) fn resolve_recipes(recipes: &'run [Recipe<'src>]) -> CompileResult<'src, ()> {
    let mut resolver = RecipeResolver {
      resolved: BTreeSet::new(),
      recipes,
    };

    for recipe in recipes {
      let mut stack = Vec::new();
      resolver.resolve_recipe(recipe, &mut stack)?;
    }

    Ok(())
  }

  fn recipe(&self, name: &str) -> Option<&'run Recipe<'src>> {
    self
      .recipes
      .iter()
      .find(|recipe| recipe.name.lexeme() == name)
  }

  fn resolve_recipe(
    &mut self,
    recipe: &'run Recipe<'src>,
    stack: &mut Vec<&'src str>,
  ) -> CompileResult<'src, ()> {
    if self.resolved.contains(recipe.name.lexeme()) {
      return Ok(());
    }

    stack.push(recipe.name.lexeme());

    for dependency in &recipe.dependencies {
      match self.recipe(dependency.lexeme()) {
        Some(resolved) => {
          if stack.contains(&dependency.lexeme()) {
            let first = stack
              .iter()
              .position(|name| *name == dependency.lexeme())
              .unwrap_or(0);
            let mut circle: Vec<&str> = stack[first..].to_vec();
            circle.push(dependency.lexeme());
            return Err(dependency.error(CircularRecipeDependency {
              recipe: dependency.lexeme(),
              circle,
            }));
          }
          self.resolve_recipe(resolved, stack)?;
        }
        None => {
          return Err(dependency.error(UnknownDependency {
            recipe: recipe.name.lexeme(),
            unknown: dependency.lexeme(),
            suggestion: Suggestion::closest(
              dependency.lexeme(),
              self.recipes.iter().map(|recipe| recipe.name.lexeme()),
            ),
          }));
        }
      }
    }

    stack.pop();
    self.resolved.insert(recipe.name.lexeme());

    Ok(())
  }
}
