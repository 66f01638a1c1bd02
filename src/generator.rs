use super::*;

/// Emits the output script.
///
/// The bulk of the script is a fixed runtime library, stored as an
/// embedded resource and carried verbatim. The generator fills its
/// interpolation holes with the sections that depend on the justfile:
/// variable initialization, per-recipe functions, the dispatch table, and
/// the bodies of the subcommands.
pub(crate) struct Generator<'src, 'run> {
  justfile: &'run Justfile<'src>,
  evaluator: Evaluator,
  /// Name of the source justfile, embedded in the banner
  source_name: &'run str,
  /// Name the emitted script uses to refer to itself
  script_name: &'run str,
}

const RUNTIME: &str = include_str!("runtime.sh");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The width at which `--list` stops aligning doc comments
const MAX_LIST_WIDTH: usize = 30;

fn exportable(name: &str) -> bool {
  !name.is_empty()
    && !name.starts_with(|c: char| c.is_ascii_digit())
    && name
      .chars()
      .all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Replace every `{{name}}` hole in `template`. Filled values are not
/// rescanned, so generated content may safely contain `{{`.
fn fill(template: &str, values: &BTreeMap<&str, String>) -> String {
  let mut output = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find("{{") {
    output.push_str(&rest[..start]);
    let after = &rest[start + 2..];
    let end = after
      .find("}}")
      .expect("unterminated hole in runtime template");
    let name = &after[..end];
    output.push_str(
      values
        .get(name)
        .unwrap_or_else(|| panic!("runtime template references unknown hole `{name}`")),
    );
    rest = &after[end + 2..];
  }

  output.push_str(rest);
  output
}

impl<'src, 'run> Generator<'src, 'run> {
  pub(crate) fn generate(
    justfile: &'run Justfile<'src>,
    source_name: &'run str,
    script_name: &'run str,
  ) -> CompileResult<'src, String> {
    Generator {
      evaluator: Evaluator::new(),
      justfile,
      source_name,
      script_name,
    }
    .emit()
  }

  fn emit(mut self) -> CompileResult<'src, String> {
    // generated sections come first, so that the set of runtime helpers
    // referenced by lowered expressions is complete before it is emitted
    let variables = self.variables_section()?;
    let recipes = self.recipes_section()?;
    let helpers = self.helpers_section();

    let settings = &self.justfile.settings;

    let (shell, shell_args) = match &settings.shell {
      Some(shell) => (
        sh_quote(&shell.command.cooked),
        sh_quote(
          &shell
            .arguments
            .iter()
            .map(|argument| argument.cooked.as_str())
            .collect::<Vec<&str>>()
            .join(" "),
        ),
      ),
      None => (sh_quote("sh"), sh_quote("-cu")),
    };

    let tempdir_command = match &settings.tempdir {
      Some(tempdir) => format!("mktemp -d {}'/just-sh.XXXXXXXX'", sh_quote(tempdir)),
      None => {
        "mktemp -d \"${TMPDIR:-/tmp}/just-sh.XXXXXXXX\" 2>/dev/null \
         || mktemp -d \"${HOME:-/tmp}/.just-sh.XXXXXXXX\""
          .to_owned()
      }
    };

    let dotenv = match settings.dotenv() {
      Some(path) => format!("  load_dotenv {}\n", sh_quote(&path)),
      None => String::new(),
    };

    let default_invocation = match self.justfile.first() {
      Some(recipe) => format!("    set -- '{}'", recipe.name.lexeme()),
      None => "    err 'Justfile contains no recipes.'\n    exit 0".to_owned(),
    };

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    values.insert("version", VERSION.to_owned());
    values.insert("source", self.source_name.to_owned());
    values.insert("script", self.script_name.to_owned());
    values.insert("helpers", helpers);
    values.insert("variables", variables);
    values.insert("recipes", recipes);
    values.insert("override_arms", self.override_arms());
    values.insert("summary", self.summary());
    values.insert("list_body", self.list_body());
    values.insert("dump", sh_quote(self.justfile.source));
    values.insert("evaluate_single", self.evaluate_single());
    values.insert("evaluate_all", self.evaluate_all());
    values.insert("show_body", self.show_body());
    values.insert("choose_list", self.choose_list());
    values.insert("shell", shell);
    values.insert("shell_args", shell_args);
    values.insert(
      "positional_arguments",
      settings.positional_arguments.to_string(),
    );
    values.insert("tempdir_command", tempdir_command);
    values.insert("dotenv", dotenv);
    values.insert("default_invocation", default_invocation);
    values.insert("alias_arms", self.alias_arms());
    values.insert("dispatch_arms", self.dispatch_arms());
    values.insert("unknown_recipe", self.unknown_recipe());

    Ok(fill(RUNTIME, &values))
  }

  fn variables_section(&mut self) -> CompileResult<'src, String> {
    let justfile = self.justfile;
    let mut out = String::new();

    for &index in &justfile.initialization_order {
      let assignment = &justfile.assignments[index];
      let name = assignment.name.lexeme();
      let mangled = mangle(name);
      let word = self.evaluator.evaluate_expression(&assignment.value, None)?;

      out += &format!("  if [ -n \"${{OVERRIDE_{mangled}+x}}\" ]; then\n");
      out += &format!("    VAR_{mangled}=\"${{OVERRIDE_{mangled}}}\"\n");
      out += "  else\n";
      out += &format!("    VAR_{mangled}={word}\n");
      out += "  fi\n";

      if assignment.export || justfile.settings.export {
        if exportable(name) {
          out += &format!("  export {name}=\"${{VAR_{mangled}}}\"\n");
        } else {
          out += &format!("  export VAR_{mangled}\n");
        }
      }
    }

    Ok(out)
  }

  fn recipes_section(&mut self) -> CompileResult<'src, String> {
    let justfile = self.justfile;
    let mut out = String::new();

    for recipe in &justfile.recipes {
      out += &self.recipe_functions(recipe)?;
    }

    Ok(out)
  }

  fn recipe_functions(&mut self, recipe: &Recipe<'src>) -> CompileResult<'src, String> {
    let name = recipe.name.lexeme();
    let mangled = mangle(name);
    let mut out = String::new();

    out += &format!("PRE_{mangled}() {{\n");
    out += &format!(
      "  if [ \"${{OPT_FORCE}}\" != true ] && recipe_has_run '{name}' \"$@\"; then\n    return \
       1\n  fi\n"
    );
    for dependency in &recipe.dependencies {
      let dependency = mangle(dependency.lexeme());
      out += &format!("  [ \"${{HAS_RUN_{dependency}:-0}}\" = 1 ] || FUN_{dependency}\n");
    }
    if !recipe.silent() {
      out += &format!("  banner '{name}'\n");
    }
    out += "  return 0\n}\n\n";

    out += &format!("FUN_{mangled}() {{\n");

    let platforms = recipe.platforms();
    if !platforms.is_empty() {
      let platforms = platforms
        .iter()
        .map(|attribute| attribute.name())
        .collect::<Vec<&str>>()
        .join(" ");
      out += &format!(
        "  if ! platform_enabled {platforms}; then\n    die \"Justfile does not contain recipe \
         \\`{name}\\`.\"\n  fi\n"
      );
    }

    let min = recipe.min_arguments();
    let max = recipe.max_arguments();
    let phrase = if recipe.is_variadic() {
      format!("takes at least {min}")
    } else if min == max {
      format!("takes {min}")
    } else {
      format!("takes between {min} and {max}")
    };

    if min > 0 {
      out += &format!(
        "  if [ $# -lt {min} ]; then\n    die \"Recipe \\`{name}\\` got $# arguments but \
         {phrase}\"\n  fi\n"
      );
    }
    if !recipe.is_variadic() {
      out += &format!(
        "  if [ $# -gt {max} ]; then\n    die \"Recipe \\`{name}\\` got $# arguments but \
         {phrase}\"\n  fi\n"
      );
    }

    out += &format!("  PRE_{mangled} \"$@\" || return 0\n");

    for (i, parameter) in recipe.parameters.iter().enumerate() {
      let binding = format!("PARAM_{mangled}_{}", mangle(parameter.name.lexeme()));
      let position = i + 1;
      let default = match &parameter.default {
        Some(default) => self.evaluator.evaluate_expression(default, Some(recipe))?,
        None => "''".to_owned(),
      };

      out += &format!("  if [ $# -ge {position} ]; then\n");
      if parameter.kind.is_variadic() {
        if i == 0 {
          out += &format!("    {binding}=\"$*\"\n");
        } else {
          out += &format!("    {binding}=\"$(shift {i}; printf '%s' \"$*\")\"\n");
        }
      } else {
        out += &format!("    {binding}=\"${{{position}}}\"\n");
      }
      out += &format!("  else\n    {binding}={default}\n  fi\n");

      if parameter.export || self.justfile.settings.export {
        if exportable(parameter.name.lexeme()) {
          out += &format!(
            "  export {}=\"${{{binding}}}\"\n",
            parameter.name.lexeme()
          );
        } else {
          out += &format!("  export {binding}\n");
        }
      }
    }

    let exit_message = if recipe.no_exit_message() {
      "false"
    } else {
      "true"
    };

    if recipe.shebang {
      out += "  {\n";
      for line in &recipe.body {
        let word = self.line_word_raw(recipe, line)?;
        if word.is_empty() {
          out += "    printf '%s\\n' ''\n";
        } else {
          out += &format!("    printf '%s\\n' {word}\n");
        }
      }
      out += &format!("  }} > \"${{TEMP_DIR}}/{name}\"\n");
      out += &format!("  run_shebang '{name}' {exit_message} \"${{TEMP_DIR}}/{name}\"\n");
    } else {
      for group in Self::line_groups(&recipe.body) {
        if self.justfile.settings.ignore_comments && group[0].is_comment() {
          continue;
        }

        let (word, quiet, infallible) = self.group_word(recipe, &group)?;
        if word.is_empty() {
          continue;
        }

        let echo = if quiet || recipe.quiet { "false" } else { "true" };
        let infallible = if infallible { "true" } else { "false" };
        let line_number = group[0].number + 1;

        let invocation = format!(
          "body_line {echo} {infallible} {exit_message} '{name}' {line_number} {word} \"$@\""
        );

        if recipe.no_cd() {
          out += &format!("  ( cd \"${{INVOCATION_DIR}}\" && {invocation} ) || exit \"$?\"\n");
        } else {
          out += &format!("  {invocation}\n");
        }
      }
    }

    out += &format!("  mark_recipe_ran '{name}' \"$@\"\n");
    out += &format!("  HAS_RUN_{mangled}=1\n");
    out += "}\n\n";

    Ok(out)
  }

  /// Group body lines into logical lines: a line ending with `\` is
  /// joined with the lines that follow it.
  fn line_groups<'a>(body: &'a [Line<'src>]) -> Vec<Vec<&'a Line<'src>>> {
    let mut groups = Vec::new();
    let mut current: Vec<&Line> = Vec::new();

    for line in body {
      if line.is_empty() && current.is_empty() {
        continue;
      }

      current.push(line);

      if !line.is_continuation() {
        groups.push(current);
        current = Vec::new();
      }
    }

    if !current.is_empty() {
      groups.push(current);
    }

    groups
  }

  /// Lower a logical line to a single shell word, stripping the `@` and
  /// `-` execution prefixes and the joining backslashes.
  fn group_word(
    &mut self,
    recipe: &Recipe<'src>,
    group: &[&Line<'src>],
  ) -> CompileResult<'src, (String, bool, bool)> {
    let mut word = String::new();
    let mut quiet = false;
    let mut infallible = false;

    for (li, line) in group.iter().enumerate() {
      let last_line = li + 1 == group.len();

      for (fi, fragment) in line.fragments.iter().enumerate() {
        match fragment {
          Fragment::Text { token } => {
            let mut text = token.lexeme();

            if li == 0 && fi == 0 {
              loop {
                if let Some(rest) = text.strip_prefix('@') {
                  quiet = true;
                  text = rest;
                } else if let Some(rest) = text.strip_prefix('-') {
                  infallible = true;
                  text = rest;
                } else {
                  break;
                }
              }
            }

            if !last_line && fi + 1 == line.fragments.len() {
              text = text.strip_suffix('\\').unwrap_or(text);
            }

            if !text.is_empty() {
              word.push_str(&sh_quote(text));
            }
          }
          Fragment::Interpolation { expression } => {
            word.push_str(&self.evaluator.evaluate_expression(expression, Some(recipe))?);
          }
        }
      }
    }

    Ok((word, quiet, infallible))
  }

  /// Lower a body line verbatim, for shebang recipes
  fn line_word_raw(
    &mut self,
    recipe: &Recipe<'src>,
    line: &Line<'src>,
  ) -> CompileResult<'src, String> {
    let mut word = String::new();

    for fragment in &line.fragments {
      match fragment {
        Fragment::Text { token } => {
          if !token.lexeme().is_empty() {
            word.push_str(&sh_quote(token.lexeme()));
          }
        }
        Fragment::Interpolation { expression } => {
          word.push_str(&self.evaluator.evaluate_expression(expression, Some(recipe))?);
        }
      }
    }

    Ok(word)
  }

  fn helpers_section(&self) -> String {
    let mut out = String::new();

    for name in &self.evaluator.helpers {
      if let Some(helper) = Function::helper(name) {
        out += helper.source;
        out += "\n";
      }
    }

    out
  }

  fn override_arms(&self) -> String {
    let mut out = String::new();

    for assignment in &self.justfile.assignments {
      let name = assignment.name.lexeme();
      out += &format!("    '{name}') OVERRIDE_{}=\"$2\" ;;\n", mangle(name));
    }

    out
  }

  fn summary(&self) -> String {
    self
      .justfile
      .public_recipes()
      .map(|recipe| recipe.name.lexeme())
      .collect::<Vec<&str>>()
      .join(" ")
  }

  fn list_body(&self) -> String {
    let mut entries: Vec<(String, String, Option<String>)> = Vec::new();

    for recipe in self.justfile.public_recipes() {
      entries.push((
        recipe.name.lexeme().to_owned(),
        recipe.signature(),
        recipe.doc.map(str::to_owned),
      ));
    }

    for alias in self.justfile.aliases.values() {
      if alias.is_private() {
        continue;
      }
      entries.push((
        alias.name.lexeme().to_owned(),
        alias.name.lexeme().to_owned(),
        Some(format!("alias for `{}`", alias.target.lexeme())),
      ));
    }

    entries.sort();

    let max_width = entries
      .iter()
      .map(|(_, signature, _)| UnicodeWidthStr::width(signature.as_str()))
      .filter(|width| *width <= MAX_LIST_WIDTH)
      .max()
      .unwrap_or(0);

    let mut out = String::new();

    for (_, signature, doc) in entries {
      match doc {
        Some(doc) => {
          let width = UnicodeWidthStr::width(signature.as_str());
          let padding = " ".repeat(max_width.saturating_sub(width));
          out += &format!(
            "  printf '    %s %s%s# %s%s\\n' {} '{padding}' \"${{COLOR_DOC}}\" {} \
             \"${{COLOR_RESET}}\"\n",
            sh_quote(&signature),
            sh_quote(&doc),
          );
        }
        None => {
          out += &format!("  printf '    %s\\n' {}\n", sh_quote(&signature));
        }
      }
    }

    out
  }

  fn evaluate_single(&self) -> String {
    let mut out = String::new();

    for assignment in &self.justfile.assignments {
      let name = assignment.name.lexeme();
      out += &format!(
        "      '{name}') printf '%s' \"${{VAR_{}}}\" ;;\n",
        mangle(name)
      );
    }

    out
  }

  fn evaluate_all(&self) -> String {
    let mut names: Vec<&str> = self
      .justfile
      .assignments
      .iter()
      .filter(|assignment| !assignment.is_private())
      .map(|assignment| assignment.name.lexeme())
      .collect();
    names.sort_unstable();

    let max_width = names
      .iter()
      .map(|name| UnicodeWidthStr::width(*name))
      .max()
      .unwrap_or(0);

    let mut out = String::new();

    for name in names {
      let padded = format!("{name:max_width$}");
      out += &format!(
        "    printf '%s := \"%s\"\\n' '{padded}' \"${{VAR_{}}}\"\n",
        mangle(name)
      );
    }

    out
  }

  fn show_body(&self) -> String {
    let mut out = String::new();

    for recipe in &self.justfile.recipes {
      out += &format!(
        "    '{}') printf '%s\\n' {} ;;\n",
        recipe.name.lexeme(),
        sh_quote(&recipe.to_string())
      );
    }

    for alias in self.justfile.aliases.values() {
      let mut text = alias.to_string();
      if let Some(target) = self.justfile.recipe(self.justfile.resolve_alias(alias)) {
        text.push('\n');
        text += &target.to_string();
      }
      out += &format!(
        "    '{}') printf '%s\\n' {} ;;\n",
        alias.name.lexeme(),
        sh_quote(&text)
      );
    }

    out
  }

  fn choose_list(&self) -> String {
    let names: Vec<String> = self
      .justfile
      .public_recipes()
      .map(|recipe| sh_quote(recipe.name.lexeme()))
      .collect();

    if names.is_empty() {
      "printf ''".to_owned()
    } else {
      format!("printf '%s\\n' {}", names.join(" "))
    }
  }

  fn alias_arms(&self) -> String {
    let mut out = String::new();

    for alias in self.justfile.aliases.values() {
      out += &format!(
        "      '{}') RECIPE='{}' ;;\n",
        alias.name.lexeme(),
        self.justfile.resolve_alias(alias)
      );
    }

    out
  }

  fn dispatch_arms(&self) -> String {
    let mut out = String::new();

    for recipe in &self.justfile.recipes {
      let name = recipe.name.lexeme();
      let mangled = mangle(name);

      out += &format!("      '{name}')\n");

      if recipe.is_variadic() {
        out += &format!("        FUN_{mangled} \"$@\"\n        set --\n");
      } else if recipe.max_arguments() == 0 {
        out += &format!("        FUN_{mangled}\n");
      } else {
        let max = recipe.max_arguments();
        for n in (1..=max).rev() {
          let keyword = if n == max { "if" } else { "elif" };
          let args = (1..=n)
            .map(|k| format!("\"${{{k}}}\""))
            .collect::<Vec<String>>()
            .join(" ");
          out += &format!(
            "        {keyword} [ $# -ge {n} ]; then\n          FUN_{mangled} {args}\n          \
             shift {n}\n"
          );
        }
        out += &format!("        else\n          FUN_{mangled}\n        fi\n");
      }

      out += "        ;;\n";
    }

    out
  }

  fn unknown_recipe(&self) -> String {
    let die = "        die \"Justfile does not contain recipe \\`${RECIPE}\\`.\"".to_owned();

    if self.justfile.settings.fallback {
      let script = self.script_name;
      format!(
        "        jsh_dir=\"$(dirname \"${{JUSTFILE_DIR}}\")\"\n        while [ \"${{jsh_dir}}\" \
         != \"$(dirname \"${{jsh_dir}}\")\" ]; do\n          if [ -x \"${{jsh_dir}}/{script}\" ]; \
         then\n            rm -rf \"${{TEMP_DIR}}\"\n            exec \
         \"${{jsh_dir}}/{script}\" \"${{RECIPE}}\" \"$@\"\n          fi\n          \
         jsh_dir=\"$(dirname \"${{jsh_dir}}\")\"\n        done\n{die}"
      )
    } else {
      die
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use pretty_assertions::assert_eq;
  use std::{
    io::Write as _,
    process::{Command, Stdio},
  };

  fn generate(text: &str) -> String {
    let tokens = Lexer::lex(text).expect("lexing failed");
    let ast = Parser::parse(&tokens).expect("parsing failed");
    let justfile = Analyzer::analyze(&ast, text).expect("analysis failed");
    Generator::generate(&justfile, "justfile", "just.sh").expect("generation failed")
  }

  fn syntax_check(script: &str) {
    let mut child = Command::new("sh")
      .arg("-n")
      .stdin(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .expect("failed to spawn sh");
    child
      .stdin
      .as_mut()
      .expect("no stdin")
      .write_all(script.as_bytes())
      .expect("failed to write script");
    let output = child.wait_with_output().expect("failed to wait for sh");
    assert!(
      output.status.success(),
      "sh -n failed:\n{}",
      String::from_utf8_lossy(&output.stderr)
    );
  }

  const KITCHEN_SINK: &str = r#"set dotenv-load
set positional-arguments

export version := "1.0"
target := `uname`
greeting := if os() == 'linux' { 'hello' } else { 'howdy' }

alias b := build

# build the thing
build triple='native':
    echo building {{ triple }} {{ version }}

[private]
_helper:
    @echo hidden

[no-cd]
here:
    -pwd

run *args: build
    echo running "$@"

script:
    #!/bin/sh
    echo from a script
"#;

  #[test]
  fn emitted_script_is_posix() {
    syntax_check(&generate(KITCHEN_SINK));
  }

  #[test]
  fn emitted_script_is_deterministic() {
    assert_eq!(generate(KITCHEN_SINK), generate(KITCHEN_SINK));
  }

  #[test]
  fn shebang_is_first_line() {
    assert!(generate("a:\n  echo a\n").starts_with("#!/bin/sh\n"));
  }

  #[test]
  fn recipe_functions_present() {
    let script = generate(KITCHEN_SINK);
    assert!(script.contains("FUN_build()"));
    assert!(script.contains("PRE_build()"));
    assert!(script.contains("FUN__helper()"));
  }

  #[test]
  fn summary_in_declaration_order() {
    let script = generate("b:\na:\nc:\n");
    assert!(script.contains("printf '%s\\n' 'b a c'"));
  }

  #[test]
  fn private_recipes_omitted_from_summary() {
    let script = generate("a:\n_b:\n");
    assert!(script.contains("printf '%s\\n' 'a'"));
  }

  #[test]
  fn default_recipe_is_first() {
    let script = generate("b:\na:\n");
    assert!(script.contains("set -- 'b'"));
  }

  #[test]
  fn no_recipes_message() {
    let script = generate("x := '1'\n");
    assert!(script.contains("Justfile contains no recipes."));
    syntax_check(&script);
  }

  #[test]
  fn helpers_emitted_on_demand() {
    let with = generate("x := env_var('HOME')\na:\n");
    assert!(with.contains("env_var() {"));

    let without = generate("x := 'static'\na:\n");
    assert!(!without.contains("env_var() {"));
    assert!(!without.contains("uuid() {"));
  }

  #[test]
  fn helper_dependencies_emitted() {
    let script = generate("n := 'X'\nx := snakecase(n)\na:\n");
    assert!(script.contains("snakecase() {"));
    assert!(script.contains("split_words() {"));
  }

  #[test]
  fn folded_literals_inlined() {
    let script = generate("x := uppercase('foo')\na:\n");
    assert!(script.contains("VAR_x='FOO'"));
  }

  #[test]
  fn alias_rewrites_to_target() {
    let script = generate("alias t := test\ntest:\n  echo ok\n");
    assert!(script.contains("'t') RECIPE='test' ;;"));
  }

  #[test]
  fn dependency_guarded_by_has_run() {
    let script = generate("a:\n  echo a\nb: a\n  echo b\n");
    assert!(script.contains("[ \"${HAS_RUN_a:-0}\" = 1 ] || FUN_a"));
  }

  #[test]
  fn dump_reproduces_source() {
    let source = "a:\n  echo 'x'\n";
    let script = generate(source);
    assert!(script.contains(&sh_quote(source)));
  }

  #[test]
  fn hyphenated_names_mangled() {
    let script = generate("build-all:\n  echo ok\n");
    assert!(script.contains("FUN_build_all()"));
    assert!(script.contains("'build-all')"));
    syntax_check(&script);
  }

  #[test]
  fn windows_settings_accepted_and_ignored() {
    let script = generate("set windows-powershell\nset windows-shell := ['cmd', '/c']\na:\n");
    syntax_check(&script);
  }

  #[test]
  fn platform_gate_emitted() {
    let script = generate("[linux]\na:\n  echo linux\n");
    assert!(script.contains("platform_enabled linux"));
  }
}
