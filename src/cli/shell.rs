//! Line-oriented driver for the expense form shell.

use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;

use crate::cli::commands::config::CONFIG_KEYS;
use crate::cli::output;
use crate::cli::shell_context::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::expense::fields::EXPENSE_FORM;

const SCRIPT_ENV: &str = "EXPENSE_FORM_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_usages())));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if execute(context, trimmed)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || execute(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line and reports command failures without leaving the loop.
fn execute(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names, field names after `set`, and config keys after
/// `config set`. Hints the remaining usage once a command name is typed.
struct ShellHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl ShellHelper {
    fn new(commands: Vec<(&'static str, &'static str)>) -> Self {
        Self { commands }
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|(name, _)| *name).collect()
    }

    /// Start of the word under the cursor and the names that complete it.
    fn candidates(&self, before_cursor: &str) -> (usize, Vec<&'static str>) {
        let start = before_cursor
            .trim_end_matches(|c: char| !c.is_whitespace())
            .len();
        let previous: Vec<String> = before_cursor[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let previous: Vec<&str> = previous.iter().map(String::as_str).collect();

        let pool: Vec<&'static str> = match previous.as_slice() {
            [] | ["help"] => self.command_names(),
            ["set"] => EXPENSE_FORM.keys().collect(),
            ["config"] => vec!["show", "set"],
            ["config", "set"] => CONFIG_KEYS.to_vec(),
            _ => Vec::new(),
        };

        let needle = before_cursor[start..].to_ascii_lowercase();
        let matches = pool
            .into_iter()
            .filter(|name| name.starts_with(&needle))
            .collect();
        (start, matches)
    }

    /// Usage arguments for `line` when it is a bare command name plus a space.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let command = line.trim_start().strip_suffix(' ')?;
        if command.contains(char::is_whitespace) {
            return None;
        }
        let (name, usage) = self
            .commands
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(command))?;
        let args = usage.strip_prefix(name)?.trim_start();
        (!args.is_empty()).then(|| args.to_string())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = self.candidates(&line[..pos]);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

// Every line is accepted as typed; multi-line input is never needed.
impl Validator for ShellHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
