/// Quote an arbitrary string as a single POSIX shell word.
///
/// The result is a single-quoted string with embedded single quotes
/// rendered as `'\''`. For every string `s`, evaluating
/// `printf '%s' <quoted s>` in a POSIX shell produces `s` exactly.
pub(crate) fn sh_quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);

  quoted.push('\'');

  for c in value.chars() {
    if c == '\'' {
      quoted.push_str("'\\''");
    } else {
      quoted.push(c);
    }
  }

  quoted.push('\'');

  quoted
}
