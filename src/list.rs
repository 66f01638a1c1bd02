use super::*;

/// Format a list of items with a conjunction before the final item, for
/// use in error messages.
pub(crate) struct List<'a, T: Display>(&'static str, &'a [T]);

impl<'a, T: Display> List<'a, T> {
  pub(crate) fn or(items: &'a [T]) -> List<'a, T> {
    List("or", items)
  }

  pub(crate) fn and(items: &'a [T]) -> List<'a, T> {
    List("and", items)
  }
}

impl<'a, T: Display> fmt::Display for List<'a, T> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self.1 {
      [] => Ok(()),
      [item] => write!(f, "{item}"),
      [first, second] => write!(f, "{first} {} {second}", self.0),
      [head @ .., last] => {
        for item in head {
          write!(f, "{item}, ")?;
        }
        write!(f, "{} {last}", self.0)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lists() {
    assert_eq!(List::or(&["a"]).to_string(), "a");
    assert_eq!(List::or(&["a", "b"]).to_string(), "a or b");
    assert_eq!(List::or(&["a", "b", "c"]).to_string(), "a, b, or c");
    assert_eq!(List::and(&["a", "b"]).to_string(), "a and b");
  }
}
