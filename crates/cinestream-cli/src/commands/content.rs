use super::AppContext;
use crate::output::Output;
use cinestream_core::{FileStorage, ListStore, SearchOutcome};
use cinestream_models::{ListName, MediaItem};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_popular(ctx: &AppContext, output: &Output) -> Result<()> {
    let pipeline = ctx.pipeline()?;
    let (movies, series) = pipeline.fetch_popular().await;

    if output.is_quiet() {
        return Ok(());
    }
    if !output.is_human() {
        output.data(
            "popular",
            &json!({ "provider": pipeline.provider_name(), "movies": movies, "series": series }),
        );
        return Ok(());
    }

    let store = ctx.list_store();
    let via = format!("(via {})", pipeline.provider_name());
    println!("\n{} {}", "Popular Movies".bright_cyan().bold(), via.dimmed());
    println!("{}", media_table(&movies, &store));
    println!("\n{} {}", "Popular TV Shows".bright_cyan().bold(), via.dimmed());
    println!("{}", media_table(&series, &store));
    Ok(())
}

pub async fn run_search(query: &str, ctx: &AppContext, output: &Output) -> Result<()> {
    let pipeline = ctx.pipeline()?;

    let results = match pipeline.search(query).await {
        SearchOutcome::Results(items) => items,
        SearchOutcome::Cleared => {
            output.warn("Nothing to search for");
            return Ok(());
        }
        // A single command issues a single search
        SearchOutcome::Superseded => Vec::new(),
    };

    if output.is_quiet() {
        return Ok(());
    }
    if !output.is_human() {
        output.data(
            "search",
            &json!({ "provider": pipeline.provider_name(), "query": query.trim(), "results": results }),
        );
        return Ok(());
    }

    if results.is_empty() {
        output.info(format!("No results for \"{}\"", query.trim()));
        return Ok(());
    }

    println!(
        "\n{} {}",
        format!("Results for \"{}\"", query.trim()).bright_cyan().bold(),
        format!("({})", results.len()).dimmed()
    );
    println!("{}", media_table(&results, &ctx.list_store()));
    Ok(())
}

/// One row per item, with watchlist (W) and favorites (F) membership marks
pub fn media_table(items: &[MediaItem], store: &ListStore<FileStorage>) -> Table {
    let watchlist = store.load(ListName::Watchlist);
    let favorites = store.load(ListName::Favorites);

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Lists").add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for (index, item) in items.iter().enumerate() {
        let key = item.key();
        let mut marks = String::new();
        if watchlist.iter().any(|e| e.key() == key) {
            marks.push('W');
        }
        if favorites.iter().any(|e| e.key() == key) {
            marks.push('F');
        }

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(item.kind.label()),
            Cell::new(item.year().map(|y| y.to_string()).unwrap_or_default()),
            rating_cell(item.vote_average),
            Cell::new(item.id),
            Cell::new(marks),
        ]);
    }
    table
}

pub fn rating_cell(rating: f64) -> Cell {
    let cell = Cell::new(format!("{:.1}", rating));
    if rating >= 7.5 {
        cell.fg(Color::Green)
    } else if rating >= 5.0 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}
