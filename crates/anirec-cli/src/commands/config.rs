use crate::output::Output;
use anirec_config::{Config, ConfigError, PathManager};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(
    cmd: crate::ConfigCommands,
    path_manager: &PathManager,
    loaded: std::result::Result<Config, ConfigError>,
    output: &Output,
) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, path_manager, loaded, output),
    }
}

fn show_config(
    full: bool,
    path_manager: &PathManager,
    loaded: std::result::Result<Config, ConfigError>,
    output: &Output,
) -> Result<()> {
    let config_file = path_manager.config_file();
    let file_state = if config_file.exists() { "found" } else { "not found, using environment only" };

    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::Missing(keys)) => {
            output.error(format!("Configuration incomplete ({}: {})", config_file.display(), file_state));
            for key in &keys {
                output.error(format!("  missing {}", key));
            }
            return Err(ConfigError::Missing(keys)).wrap_err("Failed to load configuration");
        }
        Err(e) => return Err(e).wrap_err("Failed to load configuration"),
    };

    let token = if full { config.annict.token.clone() } else { mask_string(&config.annict.token) };

    if !output.is_human() {
        let mut value = serde_json::to_value(&config).wrap_err("Failed to serialize configuration")?;
        value["annict"]["token"] = json!(token);
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "log_file": config.logging.log_file(path_manager).map(|p| p.display().to_string()),
            "config": value,
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    println!();

    let mut info_table = Table::new();
    info_table.set_header(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(format!("{} ({})", config_file.display(), file_state)),
    ]);
    output.block(styled(info_table));

    let mut annict_table = section("Annict");
    annict_table.add_row(vec![Cell::new("Token"), Cell::new(token)]);
    annict_table.add_row(vec![Cell::new("Users"), Cell::new(config.annict.users.join(", "))]);
    annict_table.add_row(vec![Cell::new("Endpoint"), Cell::new(&config.annict.endpoint)]);
    output.block(styled(annict_table));

    let mut epg_table = section("EPGStation");
    epg_table.add_row(vec![Cell::new("URL"), Cell::new(&config.epgstation.url)]);
    epg_table.add_row(vec![Cell::new("Parent Directory"), Cell::new(&config.epgstation.parent_directory)]);
    epg_table.add_row(vec![Cell::new("Recorded Format"), Cell::new(&config.epgstation.recorded_format)]);
    output.block(styled(epg_table));

    let mut reserve_table = section("Reserve");
    reserve_table.add_row(vec![
        Cell::new("Statuses"),
        Cell::new(
            config.reserve.statuses.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
        ),
    ]);
    reserve_table.add_row(vec![
        Cell::new("Media Types"),
        Cell::new(
            config.reserve.media_types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", "),
        ),
    ]);
    output.block(styled(reserve_table));

    let log_file = config
        .logging
        .log_file(path_manager)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".bright_black().to_string());
    let mut logging_table = section("Logging");
    logging_table.add_row(vec![Cell::new("File"), Cell::new(log_file)]);
    output.block(styled(logging_table));

    Ok(())
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
    ]);
    table
}

fn styled(mut table: Table) -> Table {
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
        assert_eq!(mask_string("トークン文字列"), "トー***字列");
    }
}
