use executable_path::executable_path;
use std::{
  fs,
  process::{Command, Output},
  str,
};
use tempfile::TempDir;

/// Write `justfile` into a fresh tempdir and compile it to `just.sh`
fn compile(justfile: &str) -> TempDir {
  let tmp = TempDir::new().expect("failed to create tempdir");

  fs::write(tmp.path().join("justfile"), justfile).expect("failed to write justfile");

  let output = Command::new(executable_path("just-sh"))
    .current_dir(tmp.path())
    .output()
    .expect("failed to run just-sh");

  assert!(
    output.status.success(),
    "just-sh failed:\n{}",
    String::from_utf8_lossy(&output.stderr)
  );

  tmp
}

/// Run the generated script with `sh`
fn run(tmp: &TempDir, arguments: &[&str]) -> Output {
  Command::new("sh")
    .arg("just.sh")
    .args(arguments)
    .current_dir(tmp.path())
    .output()
    .expect("failed to run generated script")
}

fn stdout(output: &Output) -> &str {
  str::from_utf8(&output.stdout).expect("stdout was not utf-8")
}

fn stderr(output: &Output) -> &str {
  str::from_utf8(&output.stderr).expect("stderr was not utf-8")
}

#[test]
fn hello_world() {
  let tmp = compile("hello:\n    echo world\n");
  let output = run(&tmp, &[]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo world\nworld\n");
}

#[test]
fn default_and_positional_parameters() {
  let tmp = compile("greet name=\"world\":\n    echo \"hello {{name}}\"\n");

  let output = run(&tmp, &["greet", "alice"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("hello alice"));

  let output = run(&tmp, &["greet"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("hello world"));
}

#[test]
fn dependencies_run_at_most_once() {
  let tmp = compile("a:\n    echo a\nb: a\n    echo b\n");

  let output = run(&tmp, &["b"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo a\na\necho b\nb\n");

  // a second invocation of b in the same run is a no-op
  let output = run(&tmp, &["b", "b"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo a\na\necho b\nb\n");
}

#[test]
fn aliases_dispatch_to_target() {
  let tmp = compile("alias t := test\ntest:\n    echo ok\n");
  let output = run(&tmp, &["t"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("ok"));
}

#[test]
fn evaluate_prints_variables() {
  let tmp = compile("x := \"1\"\ny := x + \"2\"\n");
  let output = run(&tmp, &["--evaluate"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "x := \"1\"\ny := \"12\"\n");
}

#[test]
fn evaluate_single_variable() {
  let tmp = compile("x := '1'\n_y := '2'\n");

  let output = run(&tmp, &["--evaluate"]);
  assert_eq!(stdout(&output), "x := \"1\"\n");

  let output = run(&tmp, &["--evaluate", "_y"]);
  assert_eq!(stdout(&output), "2");

  let output = run(&tmp, &["--evaluate", "bogus"]);
  assert!(!output.status.success());
}

#[test]
fn private_recipes_hidden_but_runnable() {
  let tmp = compile("[private]\n_internal:\n    echo hidden\n");

  let output = run(&tmp, &["--list"]);
  assert!(output.status.success());
  assert!(!stdout(&output).contains("_internal"));

  let output = run(&tmp, &["_internal"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("hidden"));
}

#[test]
fn summary_in_declaration_order() {
  let tmp = compile("b:\na:\nc:\n");
  let output = run(&tmp, &["--summary"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "b a c\n");
}

#[test]
fn dump_reproduces_source() {
  let source = "# a comment\nx := '1'\n\nhello:\n    echo 'single' \"double\" $dollar\n";
  let tmp = compile(source);
  let output = run(&tmp, &["--dump"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), source);
}

#[test]
fn list_aligns_doc_comments() {
  let tmp = compile("# say hello\ngreet name=\"world\":\n    echo hi\n\nbuild:\n    echo b\n");
  let output = run(&tmp, &["--list"]);
  assert!(output.status.success());
  assert_eq!(
    stdout(&output),
    "Available recipes:\n    build\n    greet name=\"world\" # say hello\n"
  );
}

#[test]
fn quiet_lines_suppress_echo_and_banner() {
  let tmp = compile("hello:\n    @echo world\n");
  let output = run(&tmp, &[]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "world\n");
  assert!(!stderr(&output).contains("===>"));
}

#[test]
fn infallible_lines_ignore_failure() {
  let tmp = compile("fail:\n    -false\n    echo ok\n");
  let output = run(&tmp, &["fail"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("ok"));
}

#[test]
fn failed_recipes_surface_exit_code_and_message() {
  let tmp = compile("boom:\n    exit 3\n");
  let output = run(&tmp, &["boom"]);
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Recipe `boom` failed on line 2 with exit code 3"));
}

#[test]
fn no_exit_message_suppresses_message() {
  let tmp = compile("[no-exit-message]\nboom:\n    @exit 3\n");
  let output = run(&tmp, &["boom"]);
  assert_eq!(output.status.code(), Some(3));
  assert!(!stderr(&output).contains("failed on line"));
}

#[test]
fn shebang_recipes_run_as_scripts() {
  let tmp = compile("script:\n    #!/bin/sh\n    echo from-script\n");
  let output = run(&tmp, &["script"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "from-script\n");
}

#[test]
fn recipes_cached_per_argument_tuple() {
  let tmp = compile("r x:\n    echo run {{x}}\n");

  let output = run(&tmp, &["r", "1", "r", "1"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo run 1\nrun 1\n");

  let output = run(&tmp, &["r", "1", "r", "2"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo run 1\nrun 1\necho run 2\nrun 2\n");
}

#[test]
fn force_reruns_recipes() {
  let tmp = compile("a:\n    echo a\nb: a\n    echo b\n");
  let output = run(&tmp, &["--force", "b", "b"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo a\na\necho b\nb\necho b\nb\n");
}

#[test]
fn set_overrides_propagate_to_dependent_variables() {
  let tmp = compile("x := '1'\ny := x + '2'\nshow:\n    @echo {{y}}\n");
  let output = run(&tmp, &["--set", "x", "9", "show"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "92\n");
}

#[test]
fn show_prints_recipe_source() {
  let tmp = compile("greet name=\"world\":\n    echo \"hello {{name}}\"\n");
  let output = run(&tmp, &["--show", "greet"]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("greet name=\"world\":"));
}

#[test]
fn dry_run_prints_without_executing() {
  let tmp = compile("hello:\n    echo world\n");
  let output = run(&tmp, &["--dry-run"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "echo world\n");
}

#[test]
fn quiet_flag_suppresses_echo() {
  let tmp = compile("hello:\n    echo world\n");
  let output = run(&tmp, &["--quiet"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "world\n");
  assert!(!stderr(&output).contains("===>"));
}

#[test]
fn unknown_recipes_are_errors() {
  let tmp = compile("hello:\n    echo world\n");
  let output = run(&tmp, &["nope"]);
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Justfile does not contain recipe `nope`."));
}

#[test]
fn unknown_flags_exit_with_usage() {
  let tmp = compile("hello:\n    echo world\n");
  let output = run(&tmp, &["--bogus"]);
  assert_eq!(output.status.code(), Some(2));
}

#[test]
fn zero_recipe_justfiles_dispatch_cleanly() {
  let tmp = compile("x := '1'\n");

  let output = run(&tmp, &["--evaluate"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "x := \"1\"\n");

  let output = run(&tmp, &[]);
  assert!(output.status.success());
  assert!(stderr(&output).contains("Justfile contains no recipes."));
}

#[test]
fn exported_variables_reach_child_processes() {
  let tmp = compile("export greeting := 'hey'\nshow:\n    @echo $greeting\n");
  let output = run(&tmp, &["show"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "hey\n");
}

#[test]
fn exported_parameters_reach_child_processes() {
  let tmp = compile("show $who:\n    @echo $who\n");
  let output = run(&tmp, &["show", "me"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "me\n");
}

#[test]
fn positional_arguments_setting() {
  let tmp = compile("set positional-arguments\nr a:\n    @echo \"$1\"\n");
  let output = run(&tmp, &["r", "pos"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "pos\n");
}

#[test]
fn dotenv_load() {
  let tmp = compile("set dotenv-load\nshow:\n    @echo $FROM_DOTENV\n");
  fs::write(tmp.path().join(".env"), "FROM_DOTENV=hi\n").expect("failed to write .env");
  let output = run(&tmp, &["show"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "hi\n");
}

#[test]
fn env_var_or_default_falls_back() {
  let tmp = compile(
    "v := env_var_or_default('JUST_SH_TEST_UNSET_VARIABLE', 'fallback')\nshow:\n    @echo \
     {{v}}\n",
  );
  let output = run(&tmp, &["show"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "fallback\n");
}

#[test]
fn variadic_parameters_capture_tail() {
  let tmp = compile("r *args:\n    @echo got {{args}}\n");
  let output = run(&tmp, &["r", "one", "two", "three"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "got one two three\n");
}

#[test]
fn argument_count_errors_match_reference_phrasing() {
  let tmp = compile("r a:\n    @echo {{a}}\n");
  let output = run(&tmp, &["r"]);
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Recipe `r` got 0 arguments but takes 1"));
}

#[test]
fn no_cd_runs_in_invocation_directory() {
  let tmp = compile("[no-cd]\nwhere:\n    @pwd\n");

  let inner = tmp.path().join("inner");
  fs::create_dir(&inner).expect("failed to create inner directory");

  let output = Command::new("sh")
    .arg("../just.sh")
    .arg("where")
    .current_dir(&inner)
    .output()
    .expect("failed to run generated script");

  assert!(output.status.success());
  assert!(stdout(&output).trim_end().ends_with("inner"));
}

#[test]
fn recipes_run_in_justfile_directory_by_default() {
  let tmp = compile("where:\n    @pwd\n");

  let inner = tmp.path().join("inner");
  fs::create_dir(&inner).expect("failed to create inner directory");

  let output = Command::new("sh")
    .arg("../just.sh")
    .arg("where")
    .current_dir(&inner)
    .output()
    .expect("failed to run generated script");

  assert!(output.status.success());
  assert!(!stdout(&output).trim_end().ends_with("inner"));
}

#[test]
fn continuation_lines_join() {
  let tmp = compile("hello:\n    @echo one \\\n         two\n");
  let output = run(&tmp, &["hello"]);
  assert!(output.status.success());
  assert_eq!(stdout(&output), "one two\n");
}

#[test]
fn list_output_is_idempotent() {
  let tmp = compile("# doc\na:\n    echo a\n");
  let first = run(&tmp, &["--list"]);
  let second = run(&tmp, &["--list"]);
  assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn script_to_stdout() {
  let tmp = TempDir::new().expect("failed to create tempdir");
  fs::write(tmp.path().join("justfile"), "a:\n    echo a\n").expect("failed to write justfile");

  let output = Command::new(executable_path("just-sh"))
    .args(["--output", "-"])
    .current_dir(tmp.path())
    .output()
    .expect("failed to run just-sh");

  assert!(output.status.success());
  assert!(stdout(&output).starts_with("#!/bin/sh\n"));
}

#[test]
fn compile_errors_exit_with_status_one() {
  let tmp = TempDir::new().expect("failed to create tempdir");
  fs::write(tmp.path().join("justfile"), "x := bogus_function()\n")
    .expect("failed to write justfile");

  let output = Command::new(executable_path("just-sh"))
    .current_dir(tmp.path())
    .output()
    .expect("failed to run just-sh");

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Call to unknown function `bogus_function`"));
}

#[test]
fn usage_errors_exit_with_status_two() {
  let output = Command::new(executable_path("just-sh"))
    .arg("--bogus")
    .output()
    .expect("failed to run just-sh");

  assert_eq!(output.status.code(), Some(2));
}
