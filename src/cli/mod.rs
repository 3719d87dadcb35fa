mod commands;
mod help;
pub mod output;
mod shell;
mod shell_context;
pub mod view;

pub use shell::run_cli;
pub use shell_context::{CliError, CliMode, ConsoleNotifier, ShellContext};
