pub mod assets;
pub mod download;

pub use assets::Rendition;

const BASE_ADDR: &str = "http://fast.wistia.net/embed/iframe/";

/// Quality tiers served by the embed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    R224p,
    R360p,
    R720p,
    R1080p,
    R4k,
}

impl Resolution {
    // 1080p is both a tier and the fallback for unrecognized labels.
    #[must_use]
    pub fn normalize(label: &str) -> Self {
        match label {
            "224p" => Resolution::R224p,
            "360p" => Resolution::R360p,
            "720p" => Resolution::R720p,
            "4k" => Resolution::R4k,
            _ => Resolution::R1080p,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Resolution::R224p => "224p",
            Resolution::R360p => "360p",
            Resolution::R720p => "720p",
            Resolution::R1080p => "1080p",
            Resolution::R4k => "4k",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Mp4,
}

impl Container {
    // mp4 is the only container the host serves; anything else falls back to it.
    #[must_use]
    pub fn normalize(_label: &str) -> Self {
        Container::Mp4
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
        }
    }
}

/// One video behind the embed service, identified by its id. Resolves its
/// asset manifest and download URL lazily, then streams the file to disk.
pub struct Video {
    name: Option<String>,
    id: String,
    resolution: Resolution,
    container: Container,
    assets: Option<Vec<Rendition>>,
    video_url: Option<String>,
}

impl Video {
    #[must_use]
    pub fn new(name: Option<String>, id: String, resolution: &str, container: &str) -> Self {
        Video {
            name,
            id,
            resolution: Resolution::normalize(resolution),
            container: Container::normalize(container),
            assets: None,
            video_url: None,
        }
    }

    async fn fetch_assets(&mut self) -> anyhow::Result<()> {
        let srcpage = String::from(BASE_ADDR) + &self.id;
        let resp = reqwest::get(srcpage).await?;
        let html = resp.text().await?;
        self.assets = Some(assets::parse_embed_page(&html, &self.id)?);
        Ok(())
    }

    // Each step is skipped once its field is populated, so repeated calls
    // never refetch the page or rerun the selection.
    async fn resolve_video_url(&mut self) -> Option<String> {
        if self.video_url.is_none() {
            if self.assets.is_none() {
                if let Err(e) = self.fetch_assets().await {
                    log::warn!("Failed to get asset information for video {}: {e}", self.id);
                }
            }
            let assets = self.assets.as_deref()?;
            self.video_url = assets::select_rendition(assets, self.container, self.resolution);
        }
        self.video_url.clone()
    }

    fn destination(&self, url: &str) -> String {
        match &self.name {
            Some(name) => {
                let ext = self.container.extension();
                format!("{name}.{ext}")
            }
            None => final_path_segment(url).to_string(),
        }
    }

    /// Resolve and download the video, returning the resolved URL. `None`
    /// means nothing could be resolved or the download request itself failed;
    /// a non-200 response still yields the URL with no file written.
    pub async fn download(&mut self) -> Option<String> {
        let url = self.resolve_video_url().await?;
        let path = self.destination(&url);
        match download::save_stream(&url, &path).await {
            Ok(_) => Some(url),
            Err(e) => {
                log::warn!(
                    "Error downloading {}: {e}",
                    self.name.as_deref().unwrap_or(&self.id)
                );
                None
            }
        }
    }
}

fn final_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_resolutions_round_trip() {
        for label in ["224p", "360p", "720p", "1080p", "4k"] {
            assert_eq!(Resolution::normalize(label).label(), label);
        }
    }

    #[test]
    fn unknown_resolution_falls_back_to_1080p() {
        assert_eq!(Resolution::normalize("999p"), Resolution::R1080p);
        assert_eq!(Resolution::normalize(""), Resolution::R1080p);
    }

    #[test]
    fn unknown_container_falls_back_to_mp4() {
        assert_eq!(Container::normalize("avi"), Container::Mp4);
        assert_eq!(Container::normalize("mp4"), Container::Mp4);
    }

    #[test]
    fn named_video_downloads_to_named_file() {
        let video = Video::new(Some("MyVideo".to_string()), "abc123".to_string(), "224p", "mp4");
        assert_eq!(video.destination("http://host/deliveries/abc.mp4"), "MyVideo.mp4");
    }

    #[test]
    fn unnamed_video_uses_final_url_segment() {
        let video = Video::new(None, "abc123".to_string(), "224p", "mp4");
        assert_eq!(video.destination("http://host/deliveries/abc.mp4"), "abc.mp4");
    }

    #[test]
    fn segmentless_url_is_used_whole() {
        assert_eq!(final_path_segment("abc.mp4"), "abc.mp4");
    }

    #[tokio::test]
    async fn resolution_skips_fetch_when_assets_present() {
        let mut video = Video::new(Some("MyVideo".to_string()), "abc123".to_string(), "224p", "mp4");
        video.assets = Some(vec![Rendition {
            container: Some("mp4".to_string()),
            display_name: Some("224p".to_string()),
            url: Some("http://host/deliveries/file.bin".to_string()),
        }]);
        let url = video.resolve_video_url().await;
        assert_eq!(url.as_deref(), Some("http://host/deliveries/file.mp4"));
    }

    #[tokio::test]
    async fn resolved_url_is_returned_unchanged() {
        let mut video = Video::new(None, "abc123".to_string(), "224p", "mp4");
        video.assets = Some(Vec::new());
        video.video_url = Some("http://host/deliveries/file.mp4".to_string());
        let url = video.resolve_video_url().await;
        assert_eq!(url.as_deref(), Some("http://host/deliveries/file.mp4"));
    }
}
