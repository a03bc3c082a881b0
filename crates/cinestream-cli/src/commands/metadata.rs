use super::AppContext;
use crate::output::Output;
use chrono::Utc;
use cinestream_core::{item_metadata_json, metadata_file_name};
use cinestream_models::MediaItem;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::path::PathBuf;

pub fn run_metadata(item: &MediaItem, dir: Option<PathBuf>, ctx: &AppContext, output: &Output) -> Result<()> {
    let bytes = item_metadata_json(item, Utc::now()).wrap_err("Failed to build metadata document")?;
    let path = ctx.output_dir(dir)?.join(metadata_file_name(&item.title));
    std::fs::write(&path, &bytes).wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    output.success(format!("Saved metadata for \"{}\" to {}", item.title, path.display()));
    Ok(())
}
