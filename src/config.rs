use super::*;

use clap::{App, AppSettings, Arg, ArgMatches};

pub(crate) const DEFAULT_JUSTFILE: &str = "justfile";
pub(crate) const DEFAULT_OUTPUT: &str = "just.sh";

#[derive(Debug, PartialEq)]
pub(crate) struct Config {
  pub(crate) color: Color,
  pub(crate) justfile: PathBuf,
  pub(crate) outfile_name: Option<String>,
  pub(crate) output: PathBuf,
  pub(crate) verbose: bool,
}

mod arg {
  pub(crate) const JUSTFILE: &str = "JUSTFILE";
  pub(crate) const NO_COLOR: &str = "NO-COLOR";
  pub(crate) const OUTFILE_NAME: &str = "OUTFILE-NAME";
  pub(crate) const OUTPUT: &str = "OUTPUT";
  pub(crate) const VERBOSE: &str = "VERBOSE";
}

impl Config {
  pub(crate) fn app() -> App<'static, 'static> {
    App::new(env!("CARGO_PKG_NAME"))
      .version(env!("CARGO_PKG_VERSION"))
      .about(env!("CARGO_PKG_DESCRIPTION"))
      .help_message("Print help information")
      .version_message("Print version information")
      .setting(AppSettings::ColoredHelp)
      .arg(
        Arg::with_name(arg::JUSTFILE)
          .short("f")
          .long("justfile")
          .takes_value(true)
          .default_value(DEFAULT_JUSTFILE)
          .help("Compile <JUSTFILE>"),
      )
      .arg(
        Arg::with_name(arg::OUTPUT)
          .short("o")
          .long("output")
          .takes_value(true)
          .default_value(DEFAULT_OUTPUT)
          .help("Write the generated script to <OUTPUT>, or to stdout when `-`"),
      )
      .arg(
        Arg::with_name(arg::OUTFILE_NAME)
          .long("outfile-name")
          .takes_value(true)
          .help(
            "Name the generated script uses to refer to itself, defaulting to the output file \
             name",
          ),
      )
      .arg(
        Arg::with_name(arg::NO_COLOR)
          .long("no-color")
          .help("Disable colored diagnostics"),
      )
      .arg(
        Arg::with_name(arg::VERBOSE)
          .short("v")
          .long("verbose")
          .help("Print progress information"),
      )
  }

  pub(crate) fn from_matches(matches: &ArgMatches) -> Config {
    Config {
      color: if matches.is_present(arg::NO_COLOR) {
        Color::never()
      } else {
        Color::auto()
      },
      justfile: matches
        .value_of(arg::JUSTFILE)
        .unwrap_or(DEFAULT_JUSTFILE)
        .into(),
      outfile_name: matches.value_of(arg::OUTFILE_NAME).map(str::to_owned),
      output: matches
        .value_of(arg::OUTPUT)
        .unwrap_or(DEFAULT_OUTPUT)
        .into(),
      verbose: matches.is_present(arg::VERBOSE),
    }
  }

  pub(crate) fn run(self) -> Result<(), i32> {
    let color = self.color.stderr();

    let text = match fs::read_to_string(&self.justfile) {
      Ok(text) => text,
      Err(source) => {
        let error = ConfigError::JustfileRead {
          path: self.justfile.clone(),
          source,
        };
        eprintln!("{}: {error}", color.error().paint("error"));
        return Err(EXIT_FAILURE);
      }
    };

    let source_name = match self.justfile.file_name() {
      Some(name) => name.to_string_lossy().into_owned(),
      None => {
        let error = ConfigError::JustfileName {
          path: self.justfile.clone(),
        };
        eprintln!("{}: {error}", color.error().paint("error"));
        return Err(EXIT_FAILURE);
      }
    };

    let script_name = self.outfile_name.clone().unwrap_or_else(|| {
      self
        .output
        .file_name()
        .map_or_else(|| DEFAULT_OUTPUT.to_owned(), |name| {
          name.to_string_lossy().into_owned()
        })
    });

    info!("compiling `{}`", self.justfile.display());

    let script = match Compiler::compile(&text, &source_name, &script_name) {
      Ok(script) => script,
      Err(error) => {
        eprintln!("{}: {error}", color.error().paint("error"));
        return Err(EXIT_FAILURE);
      }
    };

    if self.output == Path::new("-") {
      print!("{script}");
      return Ok(());
    }

    if let Err(source) = fs::write(&self.output, &script) {
      let error = ConfigError::OutputWrite {
        path: self.output.clone(),
        source,
      };
      eprintln!("{}: {error}", color.error().paint("error"));
      return Err(EXIT_FAILURE);
    }

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      if let Err(source) = fs::set_permissions(&self.output, fs::Permissions::from_mode(0o755)) {
        let error = ConfigError::OutputWrite {
          path: self.output.clone(),
          source,
        };
        eprintln!("{}: {error}", color.error().paint("error"));
        return Err(EXIT_FAILURE);
      }
    }

    if self.verbose {
      eprintln!("Wrote `{}`", self.output.display());
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(arguments: &[&str]) -> Config {
    let mut all = vec!["just-sh"];
    all.extend(arguments);
    let matches = Config::app()
      .get_matches_from_safe(all)
      .expect("argument parsing failed");
    Config::from_matches(&matches)
  }

  #[test]
  fn defaults() {
    let config = config(&[]);
    assert_eq!(config.justfile, PathBuf::from("justfile"));
    assert_eq!(config.output, PathBuf::from("just.sh"));
    assert_eq!(config.outfile_name, None);
    assert!(!config.verbose);
  }

  #[test]
  fn flags() {
    let config = config(&[
      "--justfile",
      "other.just",
      "--output",
      "-",
      "--outfile-name",
      "runner.sh",
      "--no-color",
      "--verbose",
    ]);
    assert_eq!(config.justfile, PathBuf::from("other.just"));
    assert_eq!(config.output, PathBuf::from("-"));
    assert_eq!(config.outfile_name, Some("runner.sh".to_owned()));
    assert_eq!(config.color, Color::never());
    assert!(config.verbose);
  }

  #[test]
  fn unknown_flag_rejected() {
    assert!(Config::app()
      .get_matches_from_safe(vec!["just-sh", "--bogus"])
      .is_err());
  }
}
