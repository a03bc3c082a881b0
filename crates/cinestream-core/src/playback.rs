use cinestream_config::PlaybackConfig;
use cinestream_models::{MediaItem, MediaKind};
use serde::Serialize;

/// Embed URL for an item, built from the per-kind template's `{id}` placeholder
pub fn embed_url(id: u64, kind: MediaKind, config: &PlaybackConfig) -> String {
    let template = match kind {
        MediaKind::Movie => &config.movie_template,
        MediaKind::Series => &config.series_template,
    };
    template.replace("{id}", &id.to_string())
}

/// Everything the player surface needs to start playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackRequest {
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl PlaybackRequest {
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>, config: &PlaybackConfig) -> Self {
        Self {
            url: embed_url(id, kind, config),
            title: title.into(),
            kind,
        }
    }

    pub fn for_item(item: &MediaItem, config: &PlaybackConfig) -> Self {
        Self::new(item.id, item.kind, item.title.clone(), config)
    }

    /// `/player?url=<enc>&title=<enc>&type=<movie|tv>`
    pub fn player_path(&self) -> String {
        format!(
            "/player?url={}&title={}&type={}",
            urlencoding::encode(&self.url),
            urlencoding::encode(&self.title),
            self.kind.as_tag()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(embed_url(603, MediaKind::Movie, &config), "https://vidsrc.me/embed/movie?tmdb=603");
        assert_eq!(embed_url(1399, MediaKind::Series, &config), "https://vidsrc.me/embed/tv?tmdb=1399");
    }

    #[test]
    fn test_custom_template() {
        let config = PlaybackConfig {
            movie_template: "https://player.example/m/{id}/embed".to_string(),
            ..PlaybackConfig::default()
        };
        assert_eq!(embed_url(7, MediaKind::Movie, &config), "https://player.example/m/7/embed");
    }

    #[test]
    fn test_player_path_is_encoded_and_deterministic() {
        let config = PlaybackConfig::default();
        let request = PlaybackRequest::new(603, MediaKind::Movie, "The Matrix & Co", &config);
        let path = request.player_path();
        assert_eq!(
            path,
            "/player?url=https%3A%2F%2Fvidsrc.me%2Fembed%2Fmovie%3Ftmdb%3D603&title=The%20Matrix%20%26%20Co&type=movie"
        );

        let item = MediaItem::new(603, MediaKind::Movie, "The Matrix & Co");
        assert_eq!(PlaybackRequest::for_item(&item, &config).player_path(), path);
    }

    #[test]
    fn test_series_player_path_type() {
        let request = PlaybackRequest::new(1399, MediaKind::Series, "Game of Thrones", &PlaybackConfig::default());
        assert!(request.player_path().ends_with("&type=tv"));
    }
}
