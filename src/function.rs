use super::*;

use heck::{
  ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
  ToUpperCamelCase,
};

use Arity::*;
use Emission::{Helper, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
  Nullary,
  Unary,
  Binary,
  BinaryPlus,
  Ternary,
}

/// How a call lowers to shell when it cannot be folded at compile time
pub(crate) enum Emission {
  /// A fixed shell word, e.g. a reference to a runtime variable
  Word(&'static str),
  /// A command substitution around a named runtime helper
  Helper(&'static str),
}

/// A builtin function.
///
/// Calls whose arguments are all known at compile time are evaluated by
/// `fold` and spliced into the script as literals; `fold` is `None` for
/// functions that observe the runtime environment, which always lower to
/// their `emission` instead.
pub(crate) struct Function {
  pub(crate) arity: Arity,
  pub(crate) fold: Option<fn(&[String]) -> Result<String, String>>,
  pub(crate) emission: Emission,
}

const NAMES: &[&str] = &[
  "absolute_path",
  "arch",
  "blake3",
  "blake3_file",
  "capitalize",
  "clean",
  "env_var",
  "env_var_or_default",
  "error",
  "extension",
  "file_name",
  "file_stem",
  "invocation_directory",
  "invocation_directory_native",
  "join",
  "just_executable",
  "just_pid",
  "justfile",
  "justfile_directory",
  "kebabcase",
  "lowercamelcase",
  "lowercase",
  "os",
  "os_family",
  "parent_directory",
  "path_exists",
  "quote",
  "replace",
  "replace_regex",
  "sha256",
  "sha256_file",
  "shoutykebabcase",
  "shoutysnakecase",
  "snakecase",
  "titlecase",
  "trim",
  "trim_end",
  "trim_end_match",
  "trim_end_matches",
  "trim_start",
  "trim_start_match",
  "trim_start_matches",
  "uppercamelcase",
  "uppercase",
  "uuid",
  "without_extension",
];

impl Function {
  pub(crate) fn get(name: &str) -> Option<Function> {
    let function = match name {
      "absolute_path" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("absolute_path"),
      },
      "arch" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${PLATFORM_ARCH}\""),
      },
      "blake3" => Function {
        arity: Unary,
        fold: Some(blake3),
        emission: Helper("blake3"),
      },
      "blake3_file" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("blake3_file"),
      },
      "capitalize" => Function {
        arity: Unary,
        fold: Some(capitalize),
        emission: Helper("capitalize"),
      },
      "clean" => Function {
        arity: Unary,
        fold: Some(clean),
        emission: Helper("clean_path"),
      },
      "env_var" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("env_var"),
      },
      "env_var_or_default" => Function {
        arity: Binary,
        fold: None,
        emission: Helper("env_var_or_default"),
      },
      "error" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("runtime_error"),
      },
      "extension" => Function {
        arity: Unary,
        fold: Some(extension),
        emission: Helper("extension"),
      },
      "file_name" => Function {
        arity: Unary,
        fold: Some(file_name),
        emission: Helper("file_name"),
      },
      "file_stem" => Function {
        arity: Unary,
        fold: Some(file_stem),
        emission: Helper("file_stem"),
      },
      "invocation_directory" | "invocation_directory_native" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${INVOCATION_DIR}\""),
      },
      "join" => Function {
        arity: BinaryPlus,
        fold: Some(join),
        emission: Helper("join_paths"),
      },
      "just_executable" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${SCRIPT_PATH}\""),
      },
      "just_pid" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"$$\""),
      },
      "justfile" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${JUSTFILE_PATH}\""),
      },
      "justfile_directory" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${JUSTFILE_DIR}\""),
      },
      "kebabcase" => Function {
        arity: Unary,
        fold: Some(kebabcase),
        emission: Helper("kebabcase"),
      },
      "lowercamelcase" => Function {
        arity: Unary,
        fold: Some(lowercamelcase),
        emission: Helper("lowercamelcase"),
      },
      "lowercase" => Function {
        arity: Unary,
        fold: Some(lowercase),
        emission: Helper("lowercase"),
      },
      "os" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${PLATFORM_OS}\""),
      },
      "os_family" => Function {
        arity: Nullary,
        fold: None,
        emission: Word("\"${PLATFORM_FAMILY}\""),
      },
      "parent_directory" => Function {
        arity: Unary,
        fold: Some(parent_directory),
        emission: Helper("parent_directory"),
      },
      "path_exists" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("path_exists"),
      },
      "quote" => Function {
        arity: Unary,
        fold: Some(quote),
        emission: Helper("quote"),
      },
      "replace" => Function {
        arity: Ternary,
        fold: Some(replace),
        emission: Helper("str_replace"),
      },
      "replace_regex" => Function {
        arity: Ternary,
        fold: Some(replace_regex),
        emission: Helper("replace_regex"),
      },
      "sha256" => Function {
        arity: Unary,
        fold: Some(sha256),
        emission: Helper("sha256"),
      },
      "sha256_file" => Function {
        arity: Unary,
        fold: None,
        emission: Helper("sha256_file"),
      },
      "shoutykebabcase" => Function {
        arity: Unary,
        fold: Some(shoutykebabcase),
        emission: Helper("shoutykebabcase"),
      },
      "shoutysnakecase" => Function {
        arity: Unary,
        fold: Some(shoutysnakecase),
        emission: Helper("shoutysnakecase"),
      },
      "snakecase" => Function {
        arity: Unary,
        fold: Some(snakecase),
        emission: Helper("snakecase"),
      },
      "titlecase" => Function {
        arity: Unary,
        fold: Some(titlecase),
        emission: Helper("titlecase"),
      },
      "trim" => Function {
        arity: Unary,
        fold: Some(trim),
        emission: Helper("trim"),
      },
      "trim_end" => Function {
        arity: Unary,
        fold: Some(trim_end),
        emission: Helper("trim_end"),
      },
      "trim_end_match" => Function {
        arity: Binary,
        fold: Some(trim_end_match),
        emission: Helper("trim_end_match"),
      },
      "trim_end_matches" => Function {
        arity: Binary,
        fold: Some(trim_end_matches),
        emission: Helper("trim_end_matches"),
      },
      "trim_start" => Function {
        arity: Unary,
        fold: Some(trim_start),
        emission: Helper("trim_start"),
      },
      "trim_start_match" => Function {
        arity: Binary,
        fold: Some(trim_start_match),
        emission: Helper("trim_start_match"),
      },
      "trim_start_matches" => Function {
        arity: Binary,
        fold: Some(trim_start_matches),
        emission: Helper("trim_start_matches"),
      },
      "uppercamelcase" => Function {
        arity: Unary,
        fold: Some(uppercamelcase),
        emission: Helper("uppercamelcase"),
      },
      "uppercase" => Function {
        arity: Unary,
        fold: Some(uppercase),
        emission: Helper("uppercase"),
      },
      "uuid" => Function {
        arity: Nullary,
        fold: None,
        emission: Helper("uuid"),
      },
      "without_extension" => Function {
        arity: Unary,
        fold: Some(without_extension),
        emission: Helper("without_extension"),
      },
      _ => return None,
    };
    Some(function)
  }

  pub(crate) fn names() -> impl Iterator<Item = &'static str> {
    NAMES.iter().copied()
  }

  pub(crate) fn argc(&self) -> Range<usize> {
    match self.arity {
      Nullary => 0..0,
      Unary => 1..1,
      Binary => 2..2,
      BinaryPlus => 2..usize::MAX,
      Ternary => 3..3,
    }
  }

  /// The runtime helper named `name`, if it is not part of the fixed
  /// runtime library
  pub(crate) fn helper(name: &str) -> Option<&'static RuntimeHelper> {
    HELPERS.iter().find(|helper| helper.name == name)
  }
}

fn blake3(arguments: &[String]) -> Result<String, String> {
  Ok(blake3::hash(arguments[0].as_bytes()).to_hex().to_string())
}

fn capitalize(arguments: &[String]) -> Result<String, String> {
  let mut capitalized = String::new();
  for (i, c) in arguments[0].chars().enumerate() {
    if i == 0 {
      capitalized.extend(c.to_uppercase());
    } else {
      capitalized.extend(c.to_lowercase());
    }
  }
  Ok(capitalized)
}

fn clean(arguments: &[String]) -> Result<String, String> {
  Path::new(&arguments[0])
    .lexiclean()
    .to_str()
    .map(str::to_owned)
    .ok_or_else(|| format!("Path is not valid unicode: {}", arguments[0]))
}

fn extension(arguments: &[String]) -> Result<String, String> {
  let path = &arguments[0];
  Utf8Path::new(path)
    .extension()
    .map(str::to_owned)
    .ok_or_else(|| format!("Could not extract extension from `{path}`"))
}

fn file_name(arguments: &[String]) -> Result<String, String> {
  let path = &arguments[0];
  Utf8Path::new(path)
    .file_name()
    .map(str::to_owned)
    .ok_or_else(|| format!("Could not extract file name from `{path}`"))
}

fn file_stem(arguments: &[String]) -> Result<String, String> {
  let path = &arguments[0];
  Utf8Path::new(path)
    .file_stem()
    .map(str::to_owned)
    .ok_or_else(|| format!("Could not extract file stem from `{path}`"))
}

fn join(arguments: &[String]) -> Result<String, String> {
  let mut result = Utf8Path::new(&arguments[0]).join(&arguments[1]);
  for argument in &arguments[2..] {
    result.push(argument);
  }
  Ok(result.to_string())
}

fn kebabcase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_kebab_case())
}

fn lowercamelcase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_lower_camel_case())
}

fn lowercase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_lowercase())
}

fn parent_directory(arguments: &[String]) -> Result<String, String> {
  let path = &arguments[0];
  Utf8Path::new(path)
    .parent()
    .map(Utf8Path::to_string)
    .ok_or_else(|| format!("Could not extract parent directory from `{path}`"))
}

fn quote(arguments: &[String]) -> Result<String, String> {
  Ok(format!("'{}'", arguments[0].replace('\'', "'\\''")))
}

fn replace(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].replace(&arguments[1], &arguments[2]))
}

fn replace_regex(arguments: &[String]) -> Result<String, String> {
  Ok(
    Regex::new(&arguments[1])
      .map_err(|err| err.to_string())?
      .replace_all(&arguments[0], arguments[2].as_str())
      .to_string(),
  )
}

fn sha256(arguments: &[String]) -> Result<String, String> {
  use sha2::{Digest, Sha256};
  let mut hasher = Sha256::new();
  hasher.update(&arguments[0]);
  let hash = hasher.finalize();
  Ok(format!("{hash:x}"))
}

fn shoutykebabcase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_shouty_kebab_case())
}

fn shoutysnakecase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_shouty_snake_case())
}

fn snakecase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_snake_case())
}

fn titlecase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_title_case())
}

fn trim(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].trim().to_owned())
}

fn trim_end(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].trim_end().to_owned())
}

fn trim_end_match(arguments: &[String]) -> Result<String, String> {
  let s = &arguments[0];
  Ok(s.strip_suffix(&arguments[1]).unwrap_or(s).to_owned())
}

fn trim_end_matches(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].trim_end_matches(&arguments[1]).to_owned())
}

fn trim_start(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].trim_start().to_owned())
}

fn trim_start_match(arguments: &[String]) -> Result<String, String> {
  let s = &arguments[0];
  Ok(s.strip_prefix(&arguments[1]).unwrap_or(s).to_owned())
}

fn trim_start_matches(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].trim_start_matches(&arguments[1]).to_owned())
}

fn uppercamelcase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_upper_camel_case())
}

fn uppercase(arguments: &[String]) -> Result<String, String> {
  Ok(arguments[0].to_uppercase())
}

fn without_extension(arguments: &[String]) -> Result<String, String> {
  let path = &arguments[0];

  let parent = Utf8Path::new(path)
    .parent()
    .ok_or_else(|| format!("Could not extract parent from `{path}`"))?;

  let file_stem = Utf8Path::new(path)
    .file_stem()
    .ok_or_else(|| format!("Could not extract file stem from `{path}`"))?;

  Ok(parent.join(file_stem).to_string())
}

/// A pure-shell implementation of a builtin, carried in the generated
/// script when a call to it survives constant folding
pub(crate) struct RuntimeHelper {
  pub(crate) name: &'static str,
  pub(crate) dependencies: &'static [&'static str],
  pub(crate) source: &'static str,
}

pub(crate) const HELPERS: &[RuntimeHelper] = &[
  RuntimeHelper {
    name: "absolute_path",
    dependencies: &["clean_path"],
    source: r#"absolute_path() {
  case "$1" in
    /*) clean_path "$1" ;;
    *) clean_path "${PWD}/$1" ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "blake3",
    dependencies: &["hash_blake3"],
    source: r#"blake3() {
  printf '%s' "$1" | hash_blake3
}
"#,
  },
  RuntimeHelper {
    name: "blake3_file",
    dependencies: &["hash_blake3"],
    source: r#"blake3_file() {
  hash_blake3 < "$1"
}
"#,
  },
  RuntimeHelper {
    name: "capitalize",
    dependencies: &[],
    source: r#"capitalize() {
  printf '%s%s' \
    "$(printf '%s' "$1" | cut -c1 | tr '[:lower:]' '[:upper:]')" \
    "$(printf '%s' "$1" | cut -c2- | tr '[:upper:]' '[:lower:]')"
}
"#,
  },
  RuntimeHelper {
    name: "clean_path",
    dependencies: &[],
    source: r#"clean_path() (
  case "$1" in
    /*) prefix='/' ;;
    *) prefix='' ;;
  esac
  IFS='/'
  set -f
  # shellcheck disable=SC2086
  set -- $1
  out=''
  for component in "$@"; do
    case "${component}" in
      '' | '.') ;;
      '..')
        case "${out}" in
          '')
            if [ -z "${prefix}" ]; then
              out='..'
            fi
            ;;
          '..' | */..) out="${out}/.." ;;
          */*) out="${out%/*}" ;;
          *) out='' ;;
        esac
        ;;
      *)
        if [ -n "${out}" ]; then
          out="${out}/${component}"
        else
          out="${component}"
        fi
        ;;
    esac
  done
  result="${prefix}${out}"
  if [ -z "${result}" ]; then
    if [ -n "${prefix}" ]; then
      result='/'
    else
      result='.'
    fi
  fi
  printf '%s' "${result}"
)
"#,
  },
  RuntimeHelper {
    name: "env_var",
    dependencies: &[],
    source: r#"env_var() {
  case "$1" in
    '' | [0-9]* | *[!A-Za-z0-9_]*)
      runtime_error "Call to function \`env_var\` failed: invalid environment variable name \`$1\`"
      ;;
  esac
  if eval "[ -n \"\${$1+x}\" ]"; then
    eval "printf '%s' \"\${$1}\""
  else
    runtime_error "Call to function \`env_var\` failed: environment variable \`$1\` not present"
  fi
}
"#,
  },
  RuntimeHelper {
    name: "env_var_or_default",
    dependencies: &[],
    source: r#"env_var_or_default() {
  case "$1" in
    '' | [0-9]* | *[!A-Za-z0-9_]*)
      runtime_error "Call to function \`env_var_or_default\` failed: invalid environment variable name \`$1\`"
      ;;
  esac
  if eval "[ -n \"\${$1+x}\" ]"; then
    eval "printf '%s' \"\${$1}\""
  else
    printf '%s' "$2"
  fi
}
"#,
  },
  RuntimeHelper {
    name: "extension",
    dependencies: &[],
    source: r#"extension() {
  base="${1##*/}"
  case "${base}" in
    ?*.*) printf '%s' "${base##*.}" ;;
    *) runtime_error "Call to function \`extension\` failed: Could not extract extension from \`$1\`" ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "file_name",
    dependencies: &[],
    source: r#"file_name() {
  path="${1%/}"
  printf '%s' "${path##*/}"
}
"#,
  },
  RuntimeHelper {
    name: "file_stem",
    dependencies: &[],
    source: r#"file_stem() {
  base="${1##*/}"
  case "${base}" in
    ?*.*) printf '%s' "${base%.*}" ;;
    *) printf '%s' "${base}" ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "hash_blake3",
    dependencies: &[],
    source: r#"hash_blake3() {
  if command -v b3sum >/dev/null 2>&1; then
    b3sum --no-names
  else
    runtime_error 'blake3 requires the `b3sum` tool, which was not found'
  fi
}
"#,
  },
  RuntimeHelper {
    name: "hash_sha256",
    dependencies: &[],
    source: r#"hash_sha256() {
  if command -v sha256sum >/dev/null 2>&1; then
    sha256sum | cut -d ' ' -f 1
  elif command -v shasum >/dev/null 2>&1; then
    shasum -a 256 | cut -d ' ' -f 1
  elif command -v openssl >/dev/null 2>&1; then
    openssl dgst -sha256 | sed 's/^.* //'
  else
    runtime_error 'sha256 requires sha256sum, shasum, or openssl, none of which were found'
  fi
}
"#,
  },
  RuntimeHelper {
    name: "join_paths",
    dependencies: &[],
    source: r#"join_paths() {
  joined=''
  for part in "$@"; do
    case "${part}" in
      /*) joined="${part}" ;;
      *)
        case "${joined}" in
          '') joined="${part}" ;;
          */) joined="${joined}${part}" ;;
          *) joined="${joined}/${part}" ;;
        esac
        ;;
    esac
  done
  printf '%s' "${joined}"
}
"#,
  },
  RuntimeHelper {
    name: "kebabcase",
    dependencies: &["split_words"],
    source: r#"kebabcase() {
  split_words "$1" | tr '[:upper:]' '[:lower:]' | tr ' ' '-'
}
"#,
  },
  RuntimeHelper {
    name: "lowercamelcase",
    dependencies: &["split_words", "capitalize"],
    source: r#"lowercamelcase() (
  first=true
  out=''
  for word in $(split_words "$1"); do
    if [ "${first}" = true ]; then
      out="$(printf '%s' "${word}" | tr '[:upper:]' '[:lower:]')"
      first=false
    else
      out="${out}$(capitalize "${word}")"
    fi
  done
  printf '%s' "${out}"
)
"#,
  },
  RuntimeHelper {
    name: "lowercase",
    dependencies: &[],
    source: r#"lowercase() {
  printf '%s' "$1" | tr '[:upper:]' '[:lower:]'
}
"#,
  },
  RuntimeHelper {
    name: "parent_directory",
    dependencies: &[],
    source: r#"parent_directory() {
  case "$1" in
    /)
      runtime_error "Call to function \`parent_directory\` failed: Could not extract parent directory from \`/\`"
      ;;
    */*)
      parent="${1%/*}"
      if [ -z "${parent}" ]; then
        printf '/'
      else
        printf '%s' "${parent}"
      fi
      ;;
    *) ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "path_exists",
    dependencies: &[],
    source: r#"path_exists() {
  if [ -e "$1" ]; then
    printf 'true'
  else
    printf 'false'
  fi
}
"#,
  },
  RuntimeHelper {
    name: "replace_regex",
    dependencies: &[],
    source: r#"replace_regex() {
  delim="$(printf '\037')"
  case "$2$3" in
    *"${delim}"*)
      runtime_error "Call to function \`replace_regex\` failed: unsupported character in pattern"
      ;;
  esac
  printf '%s' "$1" | sed -E "s${delim}$2${delim}$3${delim}g"
}
"#,
  },
  RuntimeHelper {
    name: "sha256",
    dependencies: &["hash_sha256"],
    source: r#"sha256() {
  printf '%s' "$1" | hash_sha256
}
"#,
  },
  RuntimeHelper {
    name: "sha256_file",
    dependencies: &["hash_sha256"],
    source: r#"sha256_file() {
  hash_sha256 < "$1"
}
"#,
  },
  RuntimeHelper {
    name: "shoutykebabcase",
    dependencies: &["split_words"],
    source: r#"shoutykebabcase() {
  split_words "$1" | tr '[:lower:]' '[:upper:]' | tr ' ' '-'
}
"#,
  },
  RuntimeHelper {
    name: "shoutysnakecase",
    dependencies: &["split_words"],
    source: r#"shoutysnakecase() {
  split_words "$1" | tr '[:lower:]' '[:upper:]' | tr ' ' '_'
}
"#,
  },
  RuntimeHelper {
    name: "snakecase",
    dependencies: &["split_words"],
    source: r#"snakecase() {
  split_words "$1" | tr '[:upper:]' '[:lower:]' | tr ' ' '_'
}
"#,
  },
  RuntimeHelper {
    name: "split_words",
    dependencies: &[],
    source: r#"split_words() {
  printf '%s' "$1" | sed -E \
    -e 's/([a-z0-9])([A-Z])/\1 \2/g' \
    -e 's/([A-Z]+)([A-Z][a-z])/\1 \2/g' \
    -e 's/[^A-Za-z0-9]+/ /g' \
    -e 's/^ //' \
    -e 's/ $//'
}
"#,
  },
  RuntimeHelper {
    name: "str_replace",
    dependencies: &[],
    source: r#"str_replace() {
  haystack="$1"
  out=''
  if [ -z "$2" ]; then
    printf '%s' "${haystack}"
    return 0
  fi
  while :; do
    case "${haystack}" in
      *"$2"*)
        out="${out}${haystack%%"$2"*}$3"
        haystack="${haystack#*"$2"}"
        ;;
      *)
        out="${out}${haystack}"
        break
        ;;
    esac
  done
  printf '%s' "${out}"
}
"#,
  },
  RuntimeHelper {
    name: "titlecase",
    dependencies: &["split_words", "capitalize"],
    source: r#"titlecase() (
  out=''
  for word in $(split_words "$1"); do
    if [ -n "${out}" ]; then
      out="${out} "
    fi
    out="${out}$(capitalize "${word}")"
  done
  printf '%s' "${out}"
)
"#,
  },
  RuntimeHelper {
    name: "trim",
    dependencies: &["trim_start", "trim_end"],
    source: r#"trim() {
  trim_start "$(trim_end "$1")"
}
"#,
  },
  RuntimeHelper {
    name: "trim_end",
    dependencies: &[],
    source: r#"trim_end() {
  s="$1"
  while :; do
    case "${s}" in
      *[[:space:]]) s="${s%?}" ;;
      *) break ;;
    esac
  done
  printf '%s' "${s}"
}
"#,
  },
  RuntimeHelper {
    name: "trim_end_match",
    dependencies: &[],
    source: r#"trim_end_match() {
  case "$1" in
    *"$2") printf '%s' "${1%"$2"}" ;;
    *) printf '%s' "$1" ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "trim_end_matches",
    dependencies: &[],
    source: r#"trim_end_matches() {
  s="$1"
  while [ -n "$2" ]; do
    case "${s}" in
      *"$2") s="${s%"$2"}" ;;
      *) break ;;
    esac
  done
  printf '%s' "${s}"
}
"#,
  },
  RuntimeHelper {
    name: "trim_start",
    dependencies: &[],
    source: r#"trim_start() {
  s="$1"
  while :; do
    case "${s}" in
      [[:space:]]*) s="${s#?}" ;;
      *) break ;;
    esac
  done
  printf '%s' "${s}"
}
"#,
  },
  RuntimeHelper {
    name: "trim_start_match",
    dependencies: &[],
    source: r#"trim_start_match() {
  case "$1" in
    "$2"*) printf '%s' "${1#"$2"}" ;;
    *) printf '%s' "$1" ;;
  esac
}
"#,
  },
  RuntimeHelper {
    name: "trim_start_matches",
    dependencies: &[],
    source: r#"trim_start_matches() {
  s="$1"
  while [ -n "$2" ]; do
    case "${s}" in
      "$2"*) s="${s#"$2"}" ;;
      *) break ;;
    esac
  done
  printf '%s' "${s}"
}
"#,
  },
  RuntimeHelper {
    name: "uppercamelcase",
    dependencies: &["split_words", "capitalize"],
    source: r#"uppercamelcase() (
  out=''
  for word in $(split_words "$1"); do
    out="${out}$(capitalize "${word}")"
  done
  printf '%s' "${out}"
)
"#,
  },
  RuntimeHelper {
    name: "uppercase",
    dependencies: &[],
    source: r#"uppercase() {
  printf '%s' "$1" | tr '[:lower:]' '[:upper:]'
}
"#,
  },
  RuntimeHelper {
    name: "uuid",
    dependencies: &[],
    source: r#"uuid() {
  if [ -r /proc/sys/kernel/random/uuid ]; then
    cat /proc/sys/kernel/random/uuid
  elif command -v uuidgen >/dev/null 2>&1; then
    uuidgen | tr '[:upper:]' '[:lower:]'
  else
    od -An -N16 -tx1 /dev/urandom | tr -d ' \n' |
      sed -E 's/^(.{8})(.{4})(.{4})(.{4})(.{12})$/\1-\2-\3-\4-\5/'
  fi
}
"#,
  },
  RuntimeHelper {
    name: "without_extension",
    dependencies: &[],
    source: r#"without_extension() {
  dir=''
  case "$1" in
    */*) dir="${1%/*}/" ;;
  esac
  base="${1##*/}"
  case "${base}" in
    ?*.*) base="${base%.*}" ;;
  esac
  printf '%s%s' "${dir}" "${base}"
}
"#,
  },
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_is_closed() {
    assert!(Function::get("datetime").is_none());
    assert!(Function::get("sha256").is_some());
    for name in Function::names() {
      assert!(Function::get(name).is_some(), "missing function: {name}");
    }
  }

  #[test]
  fn argc_ranges() {
    assert_eq!(Function::get("os").unwrap().argc(), 0..0);
    assert_eq!(Function::get("env_var").unwrap().argc(), 1..1);
    assert_eq!(Function::get("join").unwrap().argc(), 2..usize::MAX);
    assert_eq!(Function::get("replace").unwrap().argc(), 3..3);
  }

  #[test]
  fn folds() {
    fn fold(name: &str, arguments: &[&str]) -> String {
      let arguments: Vec<String> = arguments.iter().map(|s| (*s).to_owned()).collect();
      (Function::get(name).unwrap().fold.unwrap())(&arguments).unwrap()
    }

    assert_eq!(fold("uppercase", &["foo"]), "FOO");
    assert_eq!(fold("capitalize", &["heLLo"]), "Hello");
    assert_eq!(fold("snakecase", &["Foo Bar"]), "foo_bar");
    assert_eq!(fold("kebabcase", &["FooBar"]), "foo-bar");
    assert_eq!(fold("clean", &["a/b/../c"]), "a/c");
    assert_eq!(fold("join", &["a", "b", "c"]), "a/b/c");
    assert_eq!(fold("join", &["a", "/b"]), "/b");
    assert_eq!(fold("extension", &["a/b.txt"]), "txt");
    assert_eq!(fold("file_name", &["a/b.txt"]), "b.txt");
    assert_eq!(fold("file_stem", &["a/b.txt"]), "b");
    assert_eq!(fold("without_extension", &["a/b.txt"]), "a/b");
    assert_eq!(fold("parent_directory", &["a/b.txt"]), "a");
    assert_eq!(fold("replace", &["aXbXc", "X", "-"]), "a-b-c");
    assert_eq!(fold("replace_regex", &["a1b2", "[0-9]", ""]), "ab");
    assert_eq!(fold("trim", &["  x "]), "x");
    assert_eq!(fold("trim_end_match", &["foo.txt", ".txt"]), "foo");
    assert_eq!(fold("quote", &["don't"]), "'don'\\''t'");
    assert_eq!(
      fold("sha256", &[""]),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
  }

  #[test]
  fn fold_errors_propagate() {
    let arguments = vec!["x".to_owned(), "[".to_owned(), String::new()];
    assert!((Function::get("replace_regex").unwrap().fold.unwrap())(&arguments).is_err());
  }

  #[test]
  fn helpers_close_over_dependencies() {
    for helper in HELPERS {
      for dependency in helper.dependencies {
        assert!(
          Function::helper(dependency).is_some(),
          "missing helper dependency: {dependency}"
        );
      }
    }
  }

  #[test]
  fn impure_functions_do_not_fold() {
    for name in ["os", "arch", "env_var", "uuid", "error", "path_exists"] {
      assert!(Function::get(name).unwrap().fold.is_none(), "{name}");
    }
  }
}
