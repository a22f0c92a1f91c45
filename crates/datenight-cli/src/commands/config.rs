use crate::output::{Output, OutputFormat};
use crate::{ConfigCommands, Provider};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use datenight_config::{Config, CredentialStore, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init { force } => init_config(force, output),
        ConfigCommands::ApiKey { provider, key } => configure_api_key(provider, key, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Defaults are in effect. Run 'datenight config init' to write them to disk.");
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let credentials = load_credentials(&path_manager)?;

    let omdb_key = display_key(credentials.resolve_omdb_api_key(), full);
    let tmdb_key = display_key(credentials.resolve_tmdb_api_key(), full);

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{}", config_file.display().to_string().bright_black());
            println!();

            let mut server = section("Server");
            server.add_row(vec![Cell::new("Address"), Cell::new(config.bind_address())]);
            server.add_row(vec![
                Cell::new("Default participants"),
                Cell::new(config.participants.default_users.join(", ")),
            ]);
            server.add_row(vec![Cell::new("Snapshots"), Cell::new(check(config.storage.snapshot))]);
            server.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
            println!("{}\n", server);

            let omdb = &config.providers.omdb;
            let mut omdb_table = section("OMDb");
            omdb_table.add_row(vec![Cell::new("Enabled"), Cell::new(check(omdb.enabled))]);
            omdb_table.add_row(vec![Cell::new("Base URL"), Cell::new(&omdb.base_url)]);
            omdb_table.add_row(vec![Cell::new("API key"), Cell::new(&omdb_key)]);
            omdb_table.add_row(vec![
                Cell::new("Timeouts"),
                Cell::new(format!("search {}s, details {}s", omdb.search_timeout_secs, omdb.details_timeout_secs)),
            ]);
            println!("{}\n", omdb_table);

            let tmdb = &config.providers.tmdb;
            let mut tmdb_table = section("TMDb");
            tmdb_table.add_row(vec![Cell::new("Enabled"), Cell::new(check(tmdb.enabled))]);
            tmdb_table.add_row(vec![Cell::new("Base URL"), Cell::new(&tmdb.base_url)]);
            tmdb_table.add_row(vec![Cell::new("Image base URL"), Cell::new(&tmdb.image_base_url)]);
            tmdb_table.add_row(vec![Cell::new("API key"), Cell::new(&tmdb_key)]);
            tmdb_table.add_row(vec![
                Cell::new("Timeouts"),
                Cell::new(format!("search {}s, details {}s", tmdb.search_timeout_secs, tmdb.details_timeout_secs)),
            ]);
            println!("{}", tmdb_table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "server": {
                    "host": config.server.host,
                    "port": config.server.port,
                },
                "participants": config.participants.default_users,
                "storage": { "snapshot": config.storage.snapshot },
                "logging": {
                    "level": config.logging.level,
                    "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
                },
                "providers": {
                    "omdb": {
                        "enabled": config.providers.omdb.enabled,
                        "base_url": config.providers.omdb.base_url,
                        "api_key": omdb_key,
                    },
                    "tmdb": {
                        "enabled": config.providers.tmdb.enabled,
                        "base_url": config.providers.tmdb.base_url,
                        "api_key": tmdb_key,
                    },
                },
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn configure_api_key(provider: Provider, key_arg: Option<String>, output: &Output) -> Result<()> {
    let key = match key_arg {
        Some(key) => key,
        None => rpassword::prompt_password(format!("{} API key: ", provider.label()))
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key is required"));
    }

    let path_manager = PathManager::default();
    let mut credentials = load_credentials(&path_manager)?;
    match provider {
        Provider::Omdb => credentials.set_omdb_api_key(key.clone()),
        Provider::Tmdb => credentials.set_tmdb_api_key(key.clone()),
    }
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials.path().display(), e))?;

    output.success(format!("{} API key saved ({})", provider.label(), mask_string(&key)));
    Ok(())
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn check(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn display_key(key: Option<String>, full: bool) -> String {
    match key {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "<not set>".to_string(),
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdef12"), "ab***12");
    }

    #[test]
    fn test_display_key() {
        assert_eq!(display_key(None, true), "<not set>");
        assert_eq!(display_key(Some("secretkey".to_string()), false), "se***ey");
        assert_eq!(display_key(Some("secretkey".to_string()), true), "secretkey");
    }
}
