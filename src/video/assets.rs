use regex::Regex;
use serde::Deserialize;

use crate::errors::VideoError;
use crate::video::{Container, Resolution};

// The embed page inlines its asset manifest as a JSON array right after this
// marker, inside a script element. The capture stays on one line.
const MANIFEST_PATTERN: &str = r#"W\.iframeInit\(\{"assets":(\[.*\])"#;

/// One encoded variant of a video as listed in the asset manifest. The
/// manifest carries many more fields; only these three matter for selection,
/// and not every asset has all of them.
#[derive(Debug, Clone, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Extract the asset manifest embedded in an embed page.
///
/// # Errors
///
/// `VideoError::AssetNotFound` when no script on the page carries the
/// manifest marker, `VideoError::ManifestParse` when the captured array is
/// not valid JSON.
pub fn parse_embed_page(html: &str, id: &str) -> anyhow::Result<Vec<Rendition>> {
    let document = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse("script").map_err(|_| VideoError::ManifestParse)?;
    let pattern = Regex::new(MANIFEST_PATTERN)?;
    for script in document.select(&selector) {
        let text = script.text().collect::<String>();
        if let Some(found) = pattern.captures(&text) {
            let assets = serde_json::from_str(&found[1]).map_err(|e| {
                log::error!("Error loading manifest JSON for video {id}: {e}");
                VideoError::ManifestParse
            })?;
            return Ok(assets);
        }
    }
    Err(VideoError::AssetNotFound(id.to_string()).into())
}

/// Pick the download URL for the requested container and resolution.
/// Requires exactly one matching rendition; zero or several matches yield
/// nothing. The manifest lists streaming `.bin` URLs, so the placeholder
/// extension is rewritten to the container's.
#[must_use]
pub fn select_rendition(
    assets: &[Rendition],
    container: Container,
    resolution: Resolution,
) -> Option<String> {
    let mut matching = assets.iter().filter(|asset| {
        asset.container.as_deref() == Some(container.extension())
            && asset.display_name.as_deref() == Some(resolution.label())
    });
    let rendition = matching.next()?;
    if matching.next().is_some() {
        return None;
    }
    let url = rendition.url.as_deref()?;
    let ext = container.extension();
    Some(url.replace(".bin", &format!(".{ext}")))
}
