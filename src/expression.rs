use super::*;

/// An expression. Note that the `Group` variant is only used to preserve
/// parenthesization in output, and does not otherwise change the meaning
/// of an expression.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Expression<'src> {
  /// `` `contents` ``
  Backtick {
    contents: String,
    token: Token<'src>,
  },
  /// `name(arguments…)`
  Call {
    name: Name<'src>,
    arguments: Vec<Expression<'src>>,
  },
  /// `lhs + rhs`
  Concatenation {
    lhs: Box<Expression<'src>>,
    rhs: Box<Expression<'src>>,
  },
  /// `if lhs operator rhs { then } else { otherwise }`
  Conditional {
    lhs: Box<Expression<'src>>,
    rhs: Box<Expression<'src>>,
    then: Box<Expression<'src>>,
    otherwise: Box<Expression<'src>>,
    operator: ConditionalOperator,
  },
  /// `(contents)`
  Group { contents: Box<Expression<'src>> },
  /// `lhs / rhs`
  Join {
    lhs: Option<Box<Expression<'src>>>,
    rhs: Box<Expression<'src>>,
  },
  /// `"string_literal"` or `'string_literal'`
  StringLiteral { string_literal: StringLiteral<'src> },
  /// `variable`
  Variable { name: Name<'src> },
}

impl<'src> fmt::Display for Expression<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Expression::Backtick { token, .. } => write!(f, "{}", token.lexeme()),
      Expression::Call { name, arguments } => {
        write!(f, "{name}(")?;
        for (i, argument) in arguments.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{argument}")?;
        }
        write!(f, ")")
      }
      Expression::Concatenation { lhs, rhs } => write!(f, "{lhs} + {rhs}"),
      Expression::Conditional {
        lhs,
        rhs,
        then,
        otherwise,
        operator,
      } => {
        write!(f, "if {lhs} {operator} {rhs} {{ {then} }} else ")?;
        if let Expression::Conditional { .. } = otherwise.as_ref() {
          write!(f, "{otherwise}")
        } else {
          write!(f, "{{ {otherwise} }}")
        }
      }
      Expression::Group { contents } => write!(f, "({contents})"),
      Expression::Join { lhs: None, rhs } => write!(f, "/ {rhs}"),
      Expression::Join {
        lhs: Some(lhs),
        rhs,
      } => write!(f, "{lhs} / {rhs}"),
      Expression::StringLiteral { string_literal } => write!(f, "{string_literal}"),
      Expression::Variable { name } => write!(f, "{}", name.lexeme()),
    }
  }
}
