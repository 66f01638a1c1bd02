fn main() {
  if let Err(code) = just_sh::run() {
    std::process::exit(code);
  }
}
