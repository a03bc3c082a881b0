use super::content::rating_cell;
use super::AppContext;
use crate::output::Output;
use chrono::Utc;
use cinestream_core::{export_file_name, ExportFormat};
use cinestream_models::{ListName, MediaItem, MediaKind};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run_show(list: ListName, ctx: &AppContext, output: &Output) -> Result<()> {
    let entries = ctx.list_store().entries(list);

    if output.is_quiet() {
        return Ok(());
    }
    if !output.is_human() {
        output.data("list", &json!({ "list": list.storage_key(), "entries": entries }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info(format!("Your {} is empty", list.display_name()));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Added").add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for entry in &entries {
        let item = &entry.item;
        table.add_row(vec![
            Cell::new(&item.title),
            Cell::new(item.kind.label()),
            Cell::new(item.year().map(|y| y.to_string()).unwrap_or_default()),
            rating_cell(item.vote_average),
            Cell::new(item.id),
            Cell::new(entry.added_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!(
        "\n{} {}",
        list.display_name().bright_cyan().bold(),
        format!("({})", entries.len()).dimmed()
    );
    println!("{}", table);
    Ok(())
}

pub fn run_add(list: ListName, item: MediaItem, ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.list_store();
    let added = store
        .add(list, &item)
        .wrap_err_with(|| format!("Failed to update {}", list.display_name()))?;

    if added {
        output.success(format!("Added \"{}\" to {}", item.title, list.display_name()));
    } else {
        output.info(format!("\"{}\" is already in {}", item.title, list.display_name()));
    }
    Ok(())
}

pub fn run_toggle(list: ListName, item: MediaItem, ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.list_store();
    let member = store
        .toggle(list, &item)
        .wrap_err_with(|| format!("Failed to update {}", list.display_name()))?;

    if member {
        output.success(format!("Added \"{}\" to {}", item.title, list.display_name()));
    } else {
        output.success(format!("Removed \"{}\" from {}", item.title, list.display_name()));
    }
    Ok(())
}

pub fn run_remove(list: ListName, id: u64, kind: MediaKind, ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.list_store();
    let removed = store
        .remove(list, id, kind)
        .wrap_err_with(|| format!("Failed to update {}", list.display_name()))?;

    if removed {
        output.success(format!("Removed {} {} from {}", kind.label(), id, list.display_name()));
    } else {
        output.info(format!("{} {} is not in {}", kind.label(), id, list.display_name()));
    }
    Ok(())
}

pub fn run_clear(list: ListName, ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.list_store();
    let count = store.len(list);
    store
        .clear(list)
        .wrap_err_with(|| format!("Failed to clear {}", list.display_name()))?;
    output.success(format!("Cleared {} ({} entries removed)", list.display_name(), count));
    Ok(())
}

pub fn run_export(
    list: ListName,
    format: ExportFormat,
    dir: Option<PathBuf>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let store = ctx.list_store();
    let bytes = store
        .export(list, format)
        .wrap_err_with(|| format!("Failed to export {}", list.display_name()))?;

    let path = ctx
        .output_dir(dir)?
        .join(export_file_name(list, format, Utc::now().date_naive()));
    std::fs::write(&path, &bytes).wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    output.success(format!(
        "Exported {} entries from {} to {}",
        store.len(list),
        list.display_name(),
        path.display()
    ));
    Ok(())
}
