use super::*;

#[derive(Debug, Snafu)]
pub(crate) enum ConfigError {
  #[snafu(display("Failed to read justfile at `{}`: {}", path.display(), source))]
  JustfileRead { path: PathBuf, source: io::Error },
  #[snafu(display("Justfile path `{}` has no file name", path.display()))]
  JustfileName { path: PathBuf },
  #[snafu(display("Failed to write generated script to `{}`: {}", path.display(), source))]
  OutputWrite { path: PathBuf, source: io::Error },
}
