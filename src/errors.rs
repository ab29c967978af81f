#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("No asset manifest found for video {0}")]
    AssetNotFound(String),

    #[error("Malformed asset manifest")]
    ManifestParse,
}
