use super::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use cinestream_config::{Config, ProviderKind, TMDB_API_KEY_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { force } => init_config(force, ctx, output),
    }
}

fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let api_key = config.provider.effective_api_key();
    let file_exists = ctx.config_file.exists();

    if output.is_quiet() {
        return Ok(());
    }
    if !output.is_human() {
        output.data(
            "config",
            &json!({
                "configFile": ctx.config_file,
                "configFileExists": file_exists,
                "provider": {
                    "kind": config.provider.kind,
                    "baseUrl": config.provider.base_url,
                    "apiKey": api_key.as_deref().map(mask_string),
                    "timeoutSecs": config.provider.timeout_secs,
                },
                "content": config.content,
                "playback": config.playback,
                "listsDir": ctx.lists_dir(),
                "logFile": ctx.paths.log_file(),
            }),
        );
        return Ok(());
    }

    if !file_exists {
        output.warn(format!(
            "No config file at {}; showing defaults. Run 'cinestream config init' to create one.",
            ctx.config_file.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    let provider_kind = match config.provider.kind {
        ProviderKind::Tmdb => "tmdb",
        ProviderKind::Proxy => "proxy",
    };
    let api_key_display = match (&api_key, config.provider.kind) {
        (Some(key), _) => mask_string(key),
        (None, ProviderKind::Tmdb) => format!("{} (set provider.api_key or {})", "<not set>".red(), TMDB_API_KEY_ENV),
        (None, ProviderKind::Proxy) => "<not needed>".to_string(),
    };

    let rows = [
        ("Config file", ctx.config_file.display().to_string()),
        ("Provider", provider_kind.to_string()),
        ("Base URL", config.provider.base_url.clone()),
        ("API key", api_key_display),
        (
            "Timeout",
            config
                .provider
                .timeout_secs
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string()),
        ),
        ("Popular limit", config.content.popular_limit.to_string()),
        ("Search limit", config.content.search_limit.to_string()),
        ("Movie player", config.playback.movie_template.clone()),
        ("Series player", config.playback.series_template.clone()),
        ("Lists directory", ctx.lists_dir().display().to_string()),
        ("Log file", ctx.paths.log_file().display().to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is not usable yet: {}", e));
    }
    Ok(())
}

fn init_config(force: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let path = &ctx.config_file;
    if path.exists() && !force {
        output.warn(format!("Config file already exists at {}", path.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;

    output.success(format!("Wrote default configuration to {}", path.display()));
    output.info(format!(
        "Set provider.api_key (or {}) before running 'cinestream popular'.",
        TMDB_API_KEY_ENV
    ));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
