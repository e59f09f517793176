//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{AppshellError, AppshellResult};
use crate::ui::{self, Step, UiContext};

const VALID_KEYS: [&str; 8] = [
    "general.verbose",
    "general.log_format",
    "boot.root_url",
    "boot.shadow_document",
    "boot.check_timeout_ms",
    "boot.bootloader_script",
    "fetch.origin",
    "fetch.timeout_secs",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> AppshellResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> AppshellResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step(
            &ctx,
            Step::Info,
            &format!("Config already exists at {} (use --force to overwrite)", path.display()),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step(&ctx, Step::Ok, &format!("Configuration initialized ({})", path.display()));
    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> AppshellResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,

        ["boot", "root_url"] => config.boot.root_url = normalize_root_url(value),
        ["boot", "shadow_document"] => config.boot.shadow_document = value.to_string(),
        ["boot", "check_timeout_ms"] => config.boot.check_timeout_ms = parse_u64(value)?,
        ["boot", "bootloader_script"] => config.boot.bootloader_script = value.to_string(),

        ["fetch", "origin"] => config.fetch.origin = value.to_string(),
        ["fetch", "timeout_secs"] => config.fetch.timeout_secs = parse_u64(value)?,

        _ => {
            ui::step(&ctx, Step::Fail, &format!("Unknown config key: {}", key));
            ui::remark(&ctx, &format!("Valid keys: {}", VALID_KEYS.join(", ")));
            return Err(AppshellError::User(format!("Unknown config key: {}", key)));
        }
    }

    manager.save(&config).await?;
    ui::step(&ctx, Step::Ok, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Root URLs are joined with file names, so they always end with "/"
fn normalize_root_url(value: &str) -> String {
    let trimmed = value.trim_end_matches('/');
    if trimmed.starts_with('/') || trimmed.contains("://") {
        format!("{}/", trimmed)
    } else {
        format!("/{}/", trimmed).replace("//", "/")
    }
}

fn parse_bool(value: &str) -> AppshellResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppshellError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> AppshellResult<u64> {
    value
        .parse()
        .map_err(|_| AppshellError::User(format!("Invalid number: {}", value)))
}

fn parse_log_format(value: &str) -> AppshellResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(AppshellError::User(format!(
            "Invalid log format: {}. Use text or json",
            value
        ))),
    }
}
