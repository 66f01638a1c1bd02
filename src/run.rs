use super::*;

pub fn run() -> Result<(), i32> {
  env_logger::init();

  let matches = match Config::app().get_matches_safe() {
    Ok(matches) => matches,
    Err(error) => {
      if error.use_stderr() {
        eprintln!("{error}");
        return Err(2);
      }
      // --help and --version are reported as errors by clap
      println!("{error}");
      return Ok(());
    }
  };

  Config::from_matches(&matches).run()
}
