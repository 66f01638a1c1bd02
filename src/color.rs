use super::*;

use ansi_term::{ANSIGenericString, Color::Red, Style};
use atty::Stream;

/// Whether and how to color diagnostic output
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Color {
  atty: bool,
  style: Style,
  use_color: UseColor,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum UseColor {
  Always,
  Auto,
  Never,
}

impl Color {
  fn new(use_color: UseColor) -> Color {
    Color {
      atty: false,
      style: Style::new(),
      use_color,
    }
  }

  pub(crate) fn auto() -> Color {
    Color::new(UseColor::Auto)
  }

  pub(crate) fn always() -> Color {
    Color::new(UseColor::Always)
  }

  pub(crate) fn never() -> Color {
    Color::new(UseColor::Never)
  }

  /// Color for text written to the standard error stream
  pub(crate) fn stderr(self) -> Color {
    Color {
      atty: atty::is(Stream::Stderr),
      ..self
    }
  }

  pub(crate) fn error(self) -> Color {
    self.restyle(Style::new().fg(Red).bold())
  }

  fn restyle(self, style: Style) -> Color {
    Color { style, ..self }
  }

  fn active(&self) -> bool {
    match self.use_color {
      UseColor::Always => true,
      UseColor::Never => false,
      UseColor::Auto => self.atty,
    }
  }

  fn effective_style(&self) -> Style {
    if self.active() {
      self.style
    } else {
      Style::new()
    }
  }

  pub(crate) fn paint<'a>(&self, text: &'a str) -> ANSIGenericString<'a, str> {
    self.effective_style().paint(text)
  }
}

impl Default for Color {
  fn default() -> Color {
    Color::auto()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn never_is_inert() {
    assert_eq!(Color::never().error().paint("error").to_string(), "error");
  }

  #[test]
  fn always_is_active() {
    assert_ne!(Color::always().error().paint("error").to_string(), "error");
  }
}
