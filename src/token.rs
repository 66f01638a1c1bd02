use super::*;

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct Token<'src> {
  pub(crate) column: usize,
  pub(crate) kind: TokenKind,
  pub(crate) length: usize,
  pub(crate) line: usize,
  pub(crate) offset: usize,
  pub(crate) src: &'src str,
}

impl<'src> Token<'src> {
  pub(crate) fn lexeme(&self) -> &'src str {
    &self.src[self.offset..self.offset + self.length]
  }

  pub(crate) fn error(&self, kind: CompileErrorKind<'src>) -> CompileError<'src> {
    CompileError::new(*self, kind)
  }

  /// Write the source line containing this token, with a caret line
  /// underneath marking the token itself.
  pub(crate) fn write_context(&self, f: &mut Formatter) -> fmt::Result {
    let line_number = self.line + 1;

    let line_start = self.src[..self.offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = self.src[line_start..]
      .find('\n')
      .map_or(self.src.len(), |i| line_start + i);
    let line_text = &self.src[line_start..line_end];

    let gutter = line_number.to_string().len();

    let prefix = &self.src[line_start..self.offset.min(line_end)];
    let padding = UnicodeWidthStr::width(prefix);

    let lexeme = self.lexeme();
    let underline = lexeme.split('\n').next().unwrap_or("");
    let carets = cmp::max(1, UnicodeWidthStr::width(underline));

    writeln!(f, "{0:1$} |", "", gutter)?;
    writeln!(f, "{line_number} | {line_text}")?;
    write!(f, "{0:1$} | ", "", gutter)?;
    write!(f, "{0:1$}", "", padding)?;
    write!(f, "{0:^<1$}", "", carets)?;
    Ok(())
  }
}
