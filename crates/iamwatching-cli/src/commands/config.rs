use clap::ValueEnum;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use media_track_config::CredentialStore;

use super::prompts::prompt_secret;
use super::AppContext;
use crate::output::Output;
use crate::ConfigCommands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Catalog {
    Tmdb,
    Rawg,
}

impl Catalog {
    fn display_name(self) -> &'static str {
        match self {
            Catalog::Tmdb => "TMDB",
            Catalog::Rawg => "RAWG",
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            Catalog::Tmdb => "TMDB_API_KEY",
            Catalog::Rawg => "RAWG_API_KEY",
        }
    }
}

pub fn run_config(context: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(context, full, output),
        ConfigCommands::SetKey { catalog, value } => set_key(context, catalog, value, output),
        ConfigCommands::Path => show_paths(context, output),
    }
}

fn show_config(context: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config = &context.config;
    let keys = &context.api_keys;
    let shown = |key: &Option<String>| match key {
        Some(k) if full => k.clone(),
        Some(k) => mask_string(k),
        None => "<not set>".to_string(),
    };

    if !output.is_human() {
        let mut value = serde_json::to_value(config)?;
        value["api_keys"] = serde_json::json!({
            "tmdb": shown(&keys.tmdb),
            "rawg": shown(&keys.rawg),
        });
        output.json(&value);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec!["Config File".to_string(), context.paths.config_file().display().to_string()]);
    table.add_row(vec!["TMDB Base URL".to_string(), config.tmdb.base_url.clone()]);
    table.add_row(vec!["TMDB API Key".to_string(), shown(&keys.tmdb)]);
    table.add_row(vec!["RAWG Base URL".to_string(), config.rawg.base_url.clone()]);
    table.add_row(vec!["RAWG API Key".to_string(), shown(&keys.rawg)]);
    table.add_row(vec!["Search Debounce".to_string(), format!("{} ms", config.search.debounce_ms)]);
    table.add_row(vec!["Minimum Query Length".to_string(), config.search.min_query_len.to_string()]);
    table.add_row(vec!["Request Timeout".to_string(), format!("{} s", config.search.timeout_secs)]);
    table.add_row(vec!["Log Level".to_string(), config.logging.level.clone()]);

    output.info(table.to_string());
    Ok(())
}

fn set_key(context: &AppContext, catalog: Catalog, value: Option<String>, output: &Output) -> Result<()> {
    let value = match value {
        Some(v) => v,
        None => prompt_secret(&format!("{} API key", catalog.display_name()))?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut store = CredentialStore::new(context.paths.credentials_file());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    match catalog {
        Catalog::Tmdb => store.set_tmdb_api_key(value),
        Catalog::Rawg => store.set_rawg_api_key(value),
    }
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "{} API key saved to {}",
        catalog.display_name(),
        context.paths.credentials_file().display()
    ));
    if std::env::var(catalog.env_var()).is_ok_and(|v| !v.trim().is_empty()) {
        output.warn(format!("{} is set and takes precedence over the saved key", catalog.env_var()));
    }
    Ok(())
}

fn show_paths(context: &AppContext, output: &Output) -> Result<()> {
    let paths = &context.paths;
    if !output.is_human() {
        output.json(&serde_json::json!({
            "config": paths.config_file(),
            "credentials": paths.credentials_file(),
            "data": paths.store_dir(),
            "logs": paths.log_dir(),
        }));
        return Ok(());
    }
    output.info(format!("Config:      {}", paths.config_file().display()));
    output.info(format!("Credentials: {}", paths.credentials_file().display()));
    output.info(format!("Data:        {}", paths.store_dir().display()));
    output.info(format!("Logs:        {}", paths.log_dir().display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    match (s.get(..2), s.get(s.len() - 2..)) {
        (Some(head), Some(tail)) => format!("{}***{}", head, tail),
        _ => "*".repeat(s.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }
}
