/// Convert a justfile identifier into a shell-safe identifier fragment.
///
/// Justfile identifiers may contain hyphens, which are invalid in shell
/// variable and function names. Every mangled name is spliced into the
/// generated script behind a fixed namespace prefix (`VAR_`, `FUN_`, and
/// friends), so mangled names never collide with the runtime's own
/// variables.
pub(crate) fn mangle(name: &str) -> String {
  name.replace('-', "_")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn passthrough() {
    assert_eq!(mangle("build"), "build");
    assert_eq!(mangle("_private"), "_private");
    assert_eq!(mangle("test_2"), "test_2");
  }

  #[test]
  fn hyphens() {
    assert_eq!(mangle("build-all"), "build_all");
    assert_eq!(mangle("a-b-c"), "a_b_c");
  }
}
