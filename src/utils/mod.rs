pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIR_NAME: &str = ".expense_form";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_DIRECTIVES: &str = "warn,expense_form=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// `RUST_LOG` wins as given; the crate default applies only without it.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    let directives = directives
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LOG_DIRECTIVES);
    EnvFilter::builder().parse_lossy(directives)
}

/// Returns the application data directory, defaulting to `~/.expense_form`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_FORM_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
