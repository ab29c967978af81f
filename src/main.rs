mod batch;
mod errors;
mod video;

use std::fs;

use anyhow::{anyhow, Context};

const VIDEO_LIST_FILE: &str = "vid_ids.csv";
const TITLE_COLUMN: &str = "Video_Title";
const ID_COLUMN: &str = "vid_id";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let file_content = fs::read_to_string(VIDEO_LIST_FILE)
        .with_context(|| format!("Failed to read {VIDEO_LIST_FILE}"))?;
    let videos = parse_video_list(&file_content)?;
    log::info!("Queued {} videos from {VIDEO_LIST_FILE}", videos.len());
    batch::run_all(videos, batch::POOL_WIDTH).await;
    Ok(())
}

// The list is a small comma-separated table: `#` lines are comments, the
// first remaining line is a header naming the title and id columns.
fn parse_video_list(content: &str) -> anyhow::Result<Vec<(Option<String>, String)>> {
    let mut rows = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    let header = rows
        .next()
        .ok_or_else(|| anyhow!("Video list has no header row"))?;
    let columns = header.split(',').map(str::trim).collect::<Vec<_>>();
    let title_idx = columns
        .iter()
        .position(|column| *column == TITLE_COLUMN)
        .ok_or_else(|| anyhow!("Video list is missing a {TITLE_COLUMN} column"))?;
    let id_idx = columns
        .iter()
        .position(|column| *column == ID_COLUMN)
        .ok_or_else(|| anyhow!("Video list is missing a {ID_COLUMN} column"))?;

    let mut videos = Vec::new();
    for row in rows {
        let fields = row.split(',').map(str::trim).collect::<Vec<_>>();
        let id = fields.get(id_idx).copied().unwrap_or_default();
        if id.is_empty() {
            log::warn!("Skipping row without a video id: {row}");
            continue;
        }
        let name = fields
            .get(title_idx)
            .copied()
            .filter(|name| !name.is_empty())
            .map(String::from);
        videos.push((name, id.to_string()));
    }
    Ok(videos)
}
