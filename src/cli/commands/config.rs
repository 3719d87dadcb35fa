use crate::cli::commands::CommandDefinition;
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};

/// Keys accepted by `config set`.
pub(crate) const CONFIG_KEYS: [&str; 3] = ["currency", "default_project", "strict_formats"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change form preferences",
        "config [show|set <currency|default_project|strict_formats> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <currency|default_project|strict_formats> <value>".into(),
                ));
            }
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown config subcommand `{}`.",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  currency        : {}", config.currency));
    output::info(format!(
        "  default_project : {}",
        config.default_project.as_deref().unwrap_or("(none)")
    ));
    output::info(format!("  strict_formats  : {}", config.strict_formats));
    if let Some(manager) = &context.config_manager {
        output::info(format!("  file            : {}", manager.path().display()));
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    match key.to_lowercase().as_str() {
        "currency" => context.config.currency = value.to_uppercase(),
        "default_project" => {
            context.config.default_project = match value {
                "" | "none" => None,
                project => Some(project.to_string()),
            }
        }
        "strict_formats" => {
            context.config.strict_formats = value.parse().map_err(|_| {
                CommandError::InvalidArguments("strict_formats must be `true` or `false`.".into())
            })?
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown config key `{}`.",
                other
            )))
        }
    }

    if let Some(manager) = &context.config_manager {
        manager.save(&context.config)?;
    }
    output::success(format!("{} updated.", key));
    if context.form.is_some() {
        output::hint("The open form keeps its settings until it is reopened.");
    }
    Ok(())
}
