use super::AppContext;
use crate::output::Output;
use cinestream_core::PlaybackRequest;
use cinestream_models::MediaKind;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_play(id: u64, kind: MediaKind, title: &str, ctx: &AppContext, output: &Output) -> Result<()> {
    let request = PlaybackRequest::new(id, kind, title, &ctx.config.playback);
    let player_path = request.player_path();

    if output.is_quiet() {
        return Ok(());
    }
    if !output.is_human() {
        output.data(
            "playback",
            &json!({
                "url": request.url,
                "title": request.title,
                "mediaType": request.kind,
                "playerPath": player_path,
            }),
        );
        return Ok(());
    }

    println!("{} {}", "▶".green(), request.title.bold());
    println!("  {} {}", "Embed:".dimmed(), request.url);
    println!("  {} {}", "Player:".dimmed(), player_path);
    Ok(())
}
