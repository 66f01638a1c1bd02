/// Remove the common indentation from a multi-line string, along with a
/// leading blank first line and the indentation of the final line.
///
/// Used to process indented (triple-delimited) strings and backticks, and
/// by tests to write source text naturally inside indented Rust strings.
pub fn unindent(text: &str) -> String {
  let lines = lines(text);

  let common_indentation = lines
    .iter()
    .copied()
    .filter(|line| !blank(line))
    .map(indentation)
    .fold(None, |common: Option<&str>, current| match common {
      None => Some(current),
      Some(common) => Some(common_prefix(common, current)),
    })
    .unwrap_or("");

  let mut replacements = Vec::new();

  for (i, line) in lines.iter().enumerate() {
    let blank = blank(line);
    let first = i == 0;
    let last = i == lines.len() - 1;

    let replacement = match (blank, first, last) {
      (true, false, false) => "\n",
      (true, ..) => "",
      (false, ..) => &line[common_indentation.len()..],
    };

    replacements.push(replacement);
  }

  replacements.into_iter().collect()
}

/// Split `text` into lines, each including its terminating newline
fn lines(text: &str) -> Vec<&str> {
  let mut lines = Vec::new();
  let mut start = 0;
  for (i, c) in text.char_indices() {
    if c == '\n' {
      lines.push(&text[start..=i]);
      start = i + 1;
    }
  }
  if start < text.len() || lines.is_empty() {
    lines.push(&text[start..]);
  }
  lines
}

fn blank(line: &str) -> bool {
  line.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

fn indentation(line: &str) -> &str {
  let i = line
    .char_indices()
    .find(|(_, c)| !matches!(c, ' ' | '\t'))
    .map_or(line.len(), |(i, _)| i);
  &line[..i]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
  let i = a
    .char_indices()
    .zip(b.chars())
    .take_while(|((_, x), y)| x == y)
    .last()
    .map_or(0, |((i, c), _)| i + c.len_utf8());
  &a[..i]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unindents() {
    assert_eq!(unindent("foo"), "foo");
    assert_eq!(unindent("foo\nbar\nbaz\n"), "foo\nbar\nbaz\n");
    assert_eq!(unindent(""), "");
    assert_eq!(unindent("  foo\n  bar"), "foo\nbar");
    assert_eq!(unindent("  foo\n  bar\n"), "foo\nbar\n");
    assert_eq!(unindent("\n\t\tfoo\n\t\tbar\n\t"), "foo\nbar\n");
  }

  #[test]
  fn indentations() {
    assert_eq!(indentation(""), "");
    assert_eq!(indentation("foo"), "");
    assert_eq!(indentation("   foo"), "   ");
    assert_eq!(indentation("\t\tfoo"), "\t\t");
    assert_eq!(indentation("\t \t foo"), "\t \t ");
  }

  #[test]
  fn blanks() {
    assert!(blank("       \n"));
    assert!(!blank("       foo\n"));
    assert!(blank("\t\t\n"));
  }

  #[test]
  fn commons() {
    assert_eq!(common_prefix("foo", "foobar"), "foo");
    assert_eq!(common_prefix("foo", "bar"), "");
    assert_eq!(common_prefix("", ""), "");
    assert_eq!(common_prefix("", "bar"), "");
  }

  #[test]
  fn middle_blank_lines_preserved() {
    assert_eq!(unindent("  foo\n\n  bar\n"), "foo\n\nbar\n");
  }
}
