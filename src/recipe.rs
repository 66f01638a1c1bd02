use super::*;

/// A recipe, e.g. `name: dependencies`
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Recipe<'src> {
  pub(crate) attributes: BTreeSet<Attribute>,
  pub(crate) body: Vec<Line<'src>>,
  pub(crate) dependencies: Vec<Name<'src>>,
  pub(crate) doc: Option<&'src str>,
  pub(crate) name: Name<'src>,
  pub(crate) parameters: Vec<Parameter<'src>>,
  pub(crate) private: bool,
  pub(crate) quiet: bool,
  pub(crate) shebang: bool,
}

impl<'src> Recipe<'src> {
  pub(crate) fn min_arguments(&self) -> usize {
    self
      .parameters
      .iter()
      .filter(|p| p.default.is_none() && p.kind != ParameterKind::Star)
      .count()
  }

  pub(crate) fn max_arguments(&self) -> usize {
    if self.is_variadic() {
      usize::MAX - 1
    } else {
      self.parameters.len()
    }
  }

  pub(crate) fn is_variadic(&self) -> bool {
    self
      .parameters
      .last()
      .map_or(false, |p| p.kind.is_variadic())
  }

  pub(crate) fn is_public(&self) -> bool {
    !self.private && !self.attributes.contains(&Attribute::Private)
  }

  pub(crate) fn line_number(&self) -> usize {
    self.name.line
  }

  /// Platform attributes gating this recipe, if any. A recipe with no
  /// platform attributes runs everywhere.
  pub(crate) fn platforms(&self) -> Vec<Attribute> {
    self
      .attributes
      .iter()
      .copied()
      .filter(|attribute| attribute.is_platform())
      .collect()
  }

  pub(crate) fn no_cd(&self) -> bool {
    self.attributes.contains(&Attribute::NoCd)
  }

  pub(crate) fn no_exit_message(&self) -> bool {
    self.attributes.contains(&Attribute::NoExitMessage)
  }

  /// True if running the recipe should print no banner: quiet recipes,
  /// private recipes, and recipes whose every line is `@`-silenced.
  pub(crate) fn silent(&self) -> bool {
    !self.is_public()
      || self.quiet
      || self
        .body
        .iter()
        .filter(|line| !line.is_empty())
        .all(Line::is_quiet)
  }

  /// The signature shown by `--list`, e.g. `name param="default"`.
  pub(crate) fn signature(&self) -> String {
    let mut signature = self.name.lexeme().to_owned();

    for parameter in &self.parameters {
      signature.push(' ');
      signature.push_str(&parameter.to_string());
    }

    signature
  }
}

impl<'src> fmt::Display for Recipe<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if let Some(doc) = self.doc {
      writeln!(f, "# {doc}")?;
    }

    for attribute in &self.attributes {
      writeln!(f, "[{}]", attribute.name())?;
    }

    if self.quiet {
      write!(f, "@{}", self.name)?;
    } else {
      write!(f, "{}", self.name)?;
    }

    for parameter in &self.parameters {
      write!(f, " {parameter}")?;
    }

    write!(f, ":")?;

    for dependency in &self.dependencies {
      write!(f, " {dependency}")?;
    }

    for (i, line) in self.body.iter().enumerate() {
      if i == 0 {
        writeln!(f)?;
      }
      for (j, fragment) in line.fragments.iter().enumerate() {
        if j == 0 {
          write!(f, "    ")?;
        }
        match fragment {
          Fragment::Text { token } => write!(f, "{}", token.lexeme())?,
          Fragment::Interpolation { expression } => write!(f, "{{{{ {expression} }}}}")?,
        }
      }
      if i + 1 < self.body.len() {
        writeln!(f)?;
      }
    }

    Ok(())
  }
}
