use super::*;

/// The parsed contents of a justfile
#[derive(Debug, Clone)]
pub(crate) struct Ast<'src> {
  pub(crate) items: Vec<Item<'src>>,
}

impl<'src> fmt::Display for Ast<'src> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut iter = self.items.iter().peekable();

    while let Some(item) = iter.next() {
      writeln!(f, "{item}")?;

      if let Some(next_item) = iter.peek() {
        if matches!(item, Item::Recipe(_)) || matches!(next_item, Item::Recipe(_)) {
          writeln!(f)?;
        }
      }
    }

    Ok(())
  }
}
