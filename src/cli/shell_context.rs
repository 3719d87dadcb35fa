use std::{cell::Cell, io, rc::Rc};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::debug;

use crate::cli::commands::{self, CommandDefinition, CommandRegistry};
use crate::cli::output;
use crate::config::{ConfigManager, FormConfig};
use crate::errors::{ConfigError, FormError};
use crate::expense::fields::EXPENSE_FORM;
use crate::expense::{ExpenseForm, ExpenseRecord, FormProps};
use crate::notify::Notifier;
use crate::storage::InMemoryExpenseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No expense form is open. Use `new` or `edit` first.")]
    NoActiveForm,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Prints toasts straight to the terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&mut self, message: &str) {
        output::success(message);
    }

    fn notify_error(&mut self, message: &str) {
        output::error(message);
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) theme: ColorfulTheme,
    pub(crate) config_manager: Option<ConfigManager>,
    pub(crate) config: FormConfig,
    pub(crate) store: InMemoryExpenseStore,
    pub(crate) form: Option<ExpenseForm<'static>>,
    visible: Rc<Cell<bool>>,
    pub running: bool,
    pub last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let mut context = Self::with_config(mode, config);
        context.config_manager = Some(manager);
        Ok(context)
    }

    /// Context without a backing config file. Config changes stay in memory.
    pub fn with_config(mode: CliMode, config: FormConfig) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager: None,
            config,
            store: InMemoryExpenseStore::new(),
            form: None,
            visible: Rc::new(Cell::new(false)),
            running: true,
            last_command: None,
        }
    }

    pub fn prompt(&self) -> String {
        match self.form.as_ref().and_then(|form| form.record()) {
            Some(record) => format!("expense[edit {}]> ", short_id(&record.id)),
            None if self.form.is_some() => "expense[add]> ".to_string(),
            None => "expense> ".to_string(),
        }
    }

    /// Name and usage line of every registered command.
    pub fn command_usages(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .iter()
            .map(|entry| (entry.name, entry.usage))
            .collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let result = handler(self, args);
        self.sync_visibility();
        match result {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Mounts a fresh form whose visibility callback is wired to this shell.
    pub(crate) fn open_form(&mut self, project_id: String, record: Option<ExpenseRecord>) {
        self.visible.set(true);
        let visible = Rc::clone(&self.visible);
        let mut props = FormProps::new(project_id, move |open| visible.set(open));
        if let Some(record) = record {
            props = props.with_record(record);
        }
        self.form = Some(ExpenseForm::mount_with_config(props, &self.config));
    }

    pub(crate) fn active_form(&mut self) -> Result<&mut ExpenseForm<'static>, CommandError> {
        self.form.as_mut().ok_or(CommandError::NoActiveForm)
    }

    /// Drops the form once it has asked to be hidden.
    fn sync_visibility(&mut self) {
        if self.form.is_some() && !self.visible.get() {
            self.form = None;
            debug!("expense form unmounted");
            output::info("Expense form closed.");
        }
    }

    /// Finds a record by id or by its 1-based position in `list`.
    pub(crate) fn find_record(&self, key: &str) -> Option<&ExpenseRecord> {
        self.store.get(key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| self.store.records().get(index))
        })
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        suggest(input, self.registry.names());
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Form(FormError::UnknownField(name)) => {
                output::error(format!("Unknown field `{}`.", name));
                suggest(&name, EXPENSE_FORM.keys());
            }
            CommandError::NoActiveForm => {
                output::error(CommandError::NoActiveForm);
                output::hint("Try `new <project>` to start a new expense.");
            }
            other => output::error(other),
        }
        Ok(())
    }
}

fn suggest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) {
    let best = candidates
        .map(|candidate| (levenshtein(candidate, input), candidate))
        .min_by_key(|(distance, _)| *distance);
    if let Some((distance, candidate)) = best {
        if distance <= 3 {
            output::info(format!("Suggestion: `{}`?", candidate));
        }
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
