use super::*;

use CompileErrorKind::*;

/// Resolve the variable references in assignment values, detecting
/// undefined variables and definition cycles, and producing the order in
/// which the generated script must initialize variables so that every
/// variable is initialized after the variables it references.
pub(crate) struct AssignmentResolver<'src, 'run> {
  assignments: &'run [Assignment<'src>],
  stack: Vec<&'src str>,
  evaluated: BTreeSet<&'src str>,
  order: Vec<usize>,
}

impl<'src, 'run> AssignmentResolver<'src, 'run> {
  pub(crate) fn resolve_assignments(
    assignments: &'run [Assignment<'src>],
  ) -> CompileResult<'src, Vec<usize>> {
    let mut resolver = AssignmentResolver {
      stack: Vec::new(),
      evaluated: BTreeSet::new(),
      order: Vec::new(),
      assignments,
    };

    for index in 0..assignments.len() {
      resolver.resolve_assignment(index)?;
    }

    Ok(resolver.order)
  }

  fn resolve_assignment(&mut self, index: usize) -> CompileResult<'src, ()> {
    let assignment = &self.assignments[index];
    let name = assignment.name.lexeme();

    if self.evaluated.contains(name) {
      return Ok(());
    }

    self.stack.push(name);
    self.resolve_expression(&assignment.value)?;
    self.stack.pop();

    self.evaluated.insert(name);
    self.order.push(index);

    Ok(())
  }

  fn resolve_expression(&mut self, expression: &Expression<'src>) -> CompileResult<'src, ()> {
    match expression {
      Expression::Variable { name } => {
        let variable = name.lexeme();

        if self.evaluated.contains(variable) {
          Ok(())
        } else if self.stack.contains(&variable) {
          let first = self
            .stack
            .iter()
            .position(|name| *name == variable)
            .unwrap_or(0);
          let mut circle: Vec<&str> = self.stack[first..].to_vec();
          circle.push(variable);
          self.stack.clear();
          Err(name.error(CircularVariableDependency { variable, circle }))
        } else if let Some(index) = self
          .assignments
          .iter()
          .position(|assignment| assignment.name.lexeme() == variable)
        {
          self.resolve_assignment(index)
        } else {
          Err(name.error(UndefinedVariable { variable }))
        }
      }
      Expression::Call { arguments, .. } => {
        for argument in arguments {
          self.resolve_expression(argument)?;
        }
        Ok(())
      }
      Expression::Concatenation { lhs, rhs } => {
        self.resolve_expression(lhs)?;
        self.resolve_expression(rhs)
      }
      Expression::Conditional {
        lhs,
        rhs,
        then,
        otherwise,
        ..
      } => {
        self.resolve_expression(lhs)?;
        self.resolve_expression(rhs)?;
        self.resolve_expression(then)?;
        self.resolve_expression(otherwise)
      }
      Expression::Group { contents } => self.resolve_expression(contents),
      Expression::Join { lhs, rhs } => {
        if let Some(lhs) = lhs {
          self.resolve_expression(lhs)?;
        }
        self.resolve_expression(rhs)
      }
      Expression::Backtick { .. } | Expression::StringLiteral { .. } => Ok(()),
    }
  }
}
