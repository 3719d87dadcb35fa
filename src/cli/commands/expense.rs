use crate::cli::commands::CommandDefinition;
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, ConsoleNotifier, ShellContext};
use crate::cli::view;
use crate::expense::{ExpenseField, ExpenseRecord, SubmitOutcome};
use crate::forms::format_amount;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "new",
            "Open a blank expense form",
            "new [project]",
            cmd_new,
        ),
        CommandDefinition::new(
            "edit",
            "Open the form prefilled from an existing expense",
            "edit <id|index>",
            cmd_edit,
        ),
        CommandDefinition::new(
            "set",
            "Change one field of the open form",
            "set <amount|category|description|date> [value]",
            cmd_set,
        ),
        CommandDefinition::new("show", "Show the open form", "show", cmd_show),
        CommandDefinition::new(
            "submit",
            "Validate and save the open form",
            "submit",
            cmd_submit,
        ),
        CommandDefinition::new(
            "cancel",
            "Close the open form without saving",
            "cancel",
            cmd_cancel,
        ),
        CommandDefinition::new("list", "List recorded expenses", "list [project]", cmd_list),
    ]
}

fn ensure_no_open_form(context: &ShellContext) -> CommandResult {
    if context.form.is_some() {
        return Err(CommandError::InvalidArguments(
            "An expense form is already open. Use `submit` or `cancel` first.".into(),
        ));
    }
    Ok(())
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_no_open_form(context)?;
    let project_id = args
        .first()
        .map(|project| project.to_string())
        .or_else(|| context.config.default_project.clone())
        .ok_or_else(|| {
            CommandError::InvalidArguments(
                "Project required: `new <project>` or set `default_project`.".into(),
            )
        })?;
    context.open_form(project_id, None);
    cmd_show(context, &[])
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_no_open_form(context)?;
    let key = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("Usage: edit <id|index>".into()))?;
    let record = context.find_record(key).cloned().ok_or_else(|| {
        CommandError::InvalidArguments(format!("No expense matches `{}`.", key))
    })?;
    context.open_form(record.project_id.clone(), Some(record));
    cmd_show(context, &[])
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, value) = match args.split_first() {
        Some((name, rest)) => (*name, rest.join(" ")),
        None => {
            return Err(CommandError::InvalidArguments(
                "Usage: set <field> [value]".into(),
            ))
        }
    };
    let field: ExpenseField = name.parse()?;
    let form = context.active_form()?;
    form.update(field, value)?;
    output::info(format!("{} = {:?}", field, form.fields().get(field)));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let currency = context.config.currency.clone();
    let form = context.active_form()?;
    let mut lines = view::render_form(form, &currency).into_iter();
    if let Some(title) = lines.next() {
        output::section(title);
    }
    for line in lines {
        output::info(line);
    }
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ShellContext { form, store, .. } = context;
    let form = form.as_mut().ok_or(CommandError::NoActiveForm)?;
    let outcome = form.submit(store, &mut ConsoleNotifier)?;
    if let SubmitOutcome::Invalid(errors) = outcome {
        output::warning("Expense not saved. Fix the following fields:");
        for field in ExpenseField::ALL {
            if let Some(message) = errors.get(field) {
                output::info(format!("  {}: {}", field, message));
            }
        }
    }
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.active_form()?.cancel()?;
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let records: Vec<(usize, &ExpenseRecord)> = context
        .store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| args.first().map_or(true, |p| record.project_id == *p))
        .collect();

    if records.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }

    output::section("Expenses");
    for (index, record) in records {
        output::info(format!(
            "  {:>2}. {}  {:<16} {:>10} {}  [{}] {}",
            index + 1,
            record.calendar_date(),
            record.category,
            format_amount(record.amount),
            context.config.currency,
            record.project_id,
            record.id
        ));
    }
    Ok(())
}
