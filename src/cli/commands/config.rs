//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{BookshelfError, BookshelfResult};
use crate::ui::{self, UiContext};

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "api.base_url",
    "api.timeout_secs",
    "auth.username",
    "auth.password",
    "routes.public_paths",
    "routes.login_path",
    "routes.home_path",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> BookshelfResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut updated = config.clone();
            set_value(&mut updated, &key, &value)?;
            manager.save(&updated).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> BookshelfResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> BookshelfResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok(&ctx, "Configuration initialized");
    ui::remark(&ctx, &path.display().to_string());

    Ok(())
}

/// Apply a dot-separated `key = value` to the config
fn set_value(config: &mut Config, key: &str, value: &str) -> BookshelfResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,

        ["api", "base_url"] => config.api.base_url = value.trim_end_matches('/').to_string(),
        ["api", "timeout_secs"] => {
            config.api.timeout_secs = value
                .parse()
                .map_err(|_| BookshelfError::User(format!("Invalid number: {}", value)))?
        }

        ["auth", "username"] => config.auth.username = value.to_string(),
        ["auth", "password"] => config.auth.password = value.to_string(),

        ["routes", "public_paths"] => {
            config.routes.public_paths = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        ["routes", "login_path"] => config.routes.login_path = parse_path(value)?,
        ["routes", "home_path"] => config.routes.home_path = parse_path(value)?,

        _ => {
            return Err(BookshelfError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn parse_log_format(value: &str) -> BookshelfResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(BookshelfError::User(format!(
            "Invalid log format: {}. Use text or json",
            value
        ))),
    }
}

fn parse_path(value: &str) -> BookshelfResult<String> {
    if value.starts_with('/') {
        Ok(value.to_string())
    } else {
        Err(BookshelfError::User(format!(
            "Route paths must start with '/': {}",
            value
        )))
    }
}
