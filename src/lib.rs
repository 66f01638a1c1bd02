#![deny(clippy::all, clippy::pedantic)]
#![allow(
  clippy::default_trait_access,
  clippy::doc_markdown,
  clippy::enum_glob_use,
  clippy::missing_errors_doc,
  clippy::needless_pass_by_value,
  clippy::non_ascii_literal,
  clippy::shadow_unrelated,
  clippy::struct_excessive_bools,
  clippy::too_many_lines,
  clippy::type_repetition_in_bounds,
  clippy::wildcard_imports
)]

pub(crate) use {
  crate::{
    alias::Alias, analyzer::Analyzer, assignment::Assignment,
    assignment_resolver::AssignmentResolver, ast::Ast, attribute::Attribute, color::Color,
    compile_error::CompileError, compile_error_kind::CompileErrorKind, compiler::Compiler,
    conditional_operator::ConditionalOperator, config::Config, config_error::ConfigError,
    count::Count, evaluator::Evaluator, expression::Expression, fragment::Fragment,
    function::Function, generator::Generator, item::Item, justfile::Justfile, keyword::Keyword,
    lexer::Lexer, line::Line, list::List, mangle::mangle, name::Name, parameter::Parameter,
    parameter_kind::ParameterKind, parser::Parser, quoting::sh_quote, recipe::Recipe,
    recipe_resolver::RecipeResolver, set::Set, setting::Setting, settings::Settings, shell::Shell,
    string_kind::StringKind, string_literal::StringLiteral, suggestion::Suggestion, token::Token,
    token_kind::TokenKind, unindent::unindent,
  },
  std::{
    cmp,
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Debug, Display, Formatter},
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
    str::Chars,
  },
  {
    camino::Utf8Path,
    edit_distance::edit_distance,
    lexiclean::Lexiclean,
    libc::EXIT_FAILURE,
    log::info,
    regex::Regex,
    snafu::Snafu,
    strum::{Display, EnumString, IntoStaticStr},
    unicode_width::UnicodeWidthStr,
  },
};

pub use crate::run::run;

pub(crate) type CompileResult<'a, T> = Result<T, CompileError<'a>>;

mod alias;
mod analyzer;
mod assignment;
mod assignment_resolver;
mod ast;
mod attribute;
mod color;
mod compile_error;
mod compile_error_kind;
mod compiler;
mod conditional_operator;
mod config;
mod config_error;
mod count;
mod evaluator;
mod expression;
mod fragment;
mod function;
mod generator;
mod item;
mod justfile;
mod keyword;
mod lexer;
mod line;
mod list;
mod mangle;
mod name;
mod parameter;
mod parameter_kind;
mod parser;
mod quoting;
mod recipe;
mod recipe_resolver;
mod run;
mod set;
mod setting;
mod settings;
mod shell;
mod string_kind;
mod string_literal;
mod suggestion;
mod token;
mod token_kind;
mod unindent;
