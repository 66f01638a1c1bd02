use super::*;

use CompileErrorKind::*;

/// Construct the semantic model from a parsed AST: index items by name,
/// reject duplicates, fold settings, validate aliases, attributes,
/// parameters, and expressions, and resolve recipe dependencies and
/// variable references.
#[derive(Default)]
pub(crate) struct Analyzer<'src> {
  assignments: Vec<Assignment<'src>>,
  aliases: BTreeMap<&'src str, Alias<'src>>,
}

impl<'src> Analyzer<'src> {
  pub(crate) fn analyze(ast: &Ast<'src>, source: &'src str) -> CompileResult<'src, Justfile<'src>> {
    Analyzer::default().justfile(ast, source)
  }

  fn justfile(mut self, ast: &Ast<'src>, source: &'src str) -> CompileResult<'src, Justfile<'src>> {
    let mut unresolved_recipes = Vec::new();
    let mut sets: BTreeMap<&'src str, Set<'src>> = BTreeMap::new();

    for item in &ast.items {
      match item {
        Item::Alias(alias) => {
          if let Some(first) = self.aliases.get(alias.name.lexeme()) {
            return Err(alias.name.error(DuplicateAlias {
              alias: alias.name.lexeme(),
              first: first.name.line,
            }));
          }
          for attribute in &alias.attributes {
            if *attribute != Attribute::Private {
              return Err(alias.name.error(AliasInvalidAttribute {
                alias: alias.name.lexeme(),
                attribute: *attribute,
              }));
            }
          }
          self.aliases.insert(alias.name.lexeme(), alias.clone());
        }
        Item::Assignment(assignment) => {
          if self.assignment(assignment.name.lexeme()).is_some() {
            return Err(assignment.name.error(DuplicateVariable {
              variable: assignment.name.lexeme(),
            }));
          }
          self.assignments.push(assignment.clone());
        }
        Item::Comment(_) => {}
        Item::Recipe(recipe) => {
          unresolved_recipes.push(recipe.clone());
        }
        Item::Set(set) => {
          if let Some(first) = sets.get(set.name.lexeme()) {
            return Err(set.name.error(DuplicateSet {
              setting: set.name.lexeme(),
              first: first.name.line,
            }));
          }
          sets.insert(set.name.lexeme(), set.clone());
        }
      }
    }

    let settings = Self::settings(&sets);

    let mut recipes: Vec<Recipe<'src>> = Vec::new();
    for recipe in unresolved_recipes {
      if let Some(original) = recipes
        .iter()
        .position(|existing| existing.name.lexeme() == recipe.name.lexeme())
      {
        if settings.allow_duplicate_recipes {
          recipes.remove(original);
        } else {
          return Err(recipe.name.error(DuplicateRecipe {
            recipe: recipe.name.lexeme(),
            first: recipes[original].line_number(),
          }));
        }
      }
      recipes.push(recipe);
    }

    for recipe in &recipes {
      self.analyze_recipe(recipe)?;
    }

    for assignment in &self.assignments {
      self.analyze_expression(&assignment.value, None)?;
    }

    self.analyze_aliases(&recipes)?;

    RecipeResolver::resolve_recipes(&recipes)?;

    let initialization_order = AssignmentResolver::resolve_assignments(&self.assignments)?;

    Ok(Justfile {
      aliases: self.aliases,
      assignments: self.assignments,
      initialization_order,
      recipes,
      settings,
      source,
    })
  }

  fn assignment(&self, name: &str) -> Option<&Assignment<'src>> {
    self
      .assignments
      .iter()
      .find(|assignment| assignment.name.lexeme() == name)
  }

  fn settings(sets: &BTreeMap<&'src str, Set<'src>>) -> Settings<'src> {
    let mut settings = Settings::default();

    for set in sets.values() {
      match &set.value {
        Setting::AllowDuplicateRecipes(value) => settings.allow_duplicate_recipes = *value,
        Setting::DotenvFilename(value) => settings.dotenv_filename = Some(value.clone()),
        Setting::DotenvLoad(value) => settings.dotenv_load = *value,
        Setting::DotenvPath(value) => settings.dotenv_path = Some(value.clone()),
        Setting::Export(value) => settings.export = *value,
        Setting::Fallback(value) => settings.fallback = *value,
        Setting::IgnoreComments(value) => settings.ignore_comments = *value,
        Setting::PositionalArguments(value) => settings.positional_arguments = *value,
        Setting::Shell(shell) => settings.shell = Some(shell.clone()),
        Setting::Tempdir(value) => settings.tempdir = Some(value.clone()),
        Setting::WindowsPowerShell(value) => settings.windows_powershell = *value,
        Setting::WindowsShell(shell) => settings.windows_shell = Some(shell.clone()),
      }
    }

    settings
  }

  fn analyze_recipe(&self, recipe: &Recipe<'src>) -> CompileResult<'src, ()> {
    if recipe.attributes.contains(&Attribute::Confirm) {
      return Err(recipe.name.error(UnimplementedFeature {
        feature: "The `[confirm]` attribute".to_owned(),
      }));
    }

    let mut parameters: BTreeSet<&'src str> = BTreeSet::new();
    let mut passed_default = false;

    for parameter in &recipe.parameters {
      if parameters.contains(parameter.name.lexeme()) {
        return Err(parameter.name.error(DuplicateParameter {
          recipe: recipe.name.lexeme(),
          parameter: parameter.name.lexeme(),
        }));
      }

      if self.assignment(parameter.name.lexeme()).is_some() {
        return Err(parameter.name.error(ParameterShadowsVariable {
          parameter: parameter.name.lexeme(),
        }));
      }

      if parameter.default.is_some() {
        passed_default = true;
      } else if passed_default {
        return Err(
          parameter
            .name
            .error(RequiredParameterFollowsDefaultParameter {
              parameter: parameter.name.lexeme(),
            }),
        );
      }

      // default expressions may reference global variables and
      // earlier-in-signature parameters only
      if let Some(default) = &parameter.default {
        self.analyze_expression(default, Some(&parameters))?;
      }

      parameters.insert(parameter.name.lexeme());
    }

    for line in &recipe.body {
      for fragment in &line.fragments {
        if let Fragment::Interpolation { expression } = fragment {
          self.analyze_expression(expression, Some(&parameters))?;
        }
      }
    }

    Ok(())
  }

  /// Validate the function calls and, when `parameters` is given, the
  /// variable references of an expression. Variable references in
  /// assignment values are resolved by the `AssignmentResolver` instead,
  /// which also detects cycles.
  fn analyze_expression(
    &self,
    expression: &Expression<'src>,
    parameters: Option<&BTreeSet<&'src str>>,
  ) -> CompileResult<'src, ()> {
    match expression {
      Expression::Backtick { .. } | Expression::StringLiteral { .. } => Ok(()),
      Expression::Call { name, arguments } => {
        match Function::get(name.lexeme()) {
          Some(function) => {
            let argc = function.argc();
            let found = arguments.len();
            if found < argc.start || (argc.end != usize::MAX && found > argc.end) {
              return Err(name.error(FunctionArgumentCountMismatch {
                function: name.lexeme(),
                found,
                expected: argc,
              }));
            }
          }
          None => {
            return Err(name.error(UnknownFunction {
              function: name.lexeme(),
              suggestion: Suggestion::closest(name.lexeme(), Function::names()),
            }));
          }
        }

        for argument in arguments {
          self.analyze_expression(argument, parameters)?;
        }

        Ok(())
      }
      Expression::Concatenation { lhs, rhs } => {
        self.analyze_expression(lhs, parameters)?;
        self.analyze_expression(rhs, parameters)
      }
      Expression::Conditional {
        lhs,
        rhs,
        then,
        otherwise,
        ..
      } => {
        self.analyze_expression(lhs, parameters)?;
        self.analyze_expression(rhs, parameters)?;
        self.analyze_expression(then, parameters)?;
        self.analyze_expression(otherwise, parameters)
      }
      Expression::Group { contents } => self.analyze_expression(contents, parameters),
      Expression::Join { lhs, rhs } => {
        if let Some(lhs) = lhs {
          self.analyze_expression(lhs, parameters)?;
        }
        self.analyze_expression(rhs, parameters)
      }
      Expression::Variable { name } => {
        if parameters.is_none() {
          return Ok(());
        }

        let variable = name.lexeme();

        if parameters.map_or(false, |parameters| parameters.contains(variable))
          || self.assignment(variable).is_some()
        {
          Ok(())
        } else {
          Err(name.error(UndefinedVariable { variable }))
        }
      }
    }
  }

  fn analyze_aliases(&self, recipes: &[Recipe<'src>]) -> CompileResult<'src, ()> {
    for alias in self.aliases.values() {
      if let Some(recipe) = recipes
        .iter()
        .find(|recipe| recipe.name.lexeme() == alias.name.lexeme())
      {
        return Err(alias.name.error(AliasShadowsRecipe {
          alias: alias.name.lexeme(),
          recipe_line: recipe.line_number(),
        }));
      }

      // walk the alias chain to a recipe, detecting cycles
      let mut seen = vec![alias.name.lexeme()];
      let mut target = alias.target;

      loop {
        if seen.contains(&target.lexeme()) {
          seen.push(target.lexeme());
          return Err(alias.name.error(CircularAliasDependency {
            alias: alias.name.lexeme(),
            circle: seen,
          }));
        }

        seen.push(target.lexeme());

        if recipes
          .iter()
          .any(|recipe| recipe.name.lexeme() == target.lexeme())
        {
          break;
        }

        match self.aliases.get(target.lexeme()) {
          Some(next) => target = next.target,
          None => {
            return Err(alias.name.error(UnknownAliasTarget {
              alias: alias.name.lexeme(),
              target: target.lexeme(),
              suggestion: Suggestion::closest(
                target.lexeme(),
                recipes.iter().map(|recipe| recipe.name.lexeme()),
              ),
            }));
          }
        }
      }
    }

    Ok(())
  }
}
