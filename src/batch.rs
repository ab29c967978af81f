use std::time::Instant;

use futures::{stream, StreamExt};

use crate::video::Video;

/// Width of the worker pool driving a batch run.
pub const POOL_WIDTH: usize = 14;

// Batch runs fetch the smallest rendition the embed host serves.
const BATCH_RESOLUTION: &str = "224p";
const BATCH_CONTAINER: &str = "mp4";

/// Download every `(title, id)` pair through a bounded pool of concurrent
/// jobs, printing each resolved URL as its job completes (completion order,
/// not input order) and the total wall-clock time at the end. A failed job
/// only logs; it never aborts its siblings.
pub async fn run_all(videos: Vec<(Option<String>, String)>, width: usize) {
    let start = Instant::now();
    let mut results = stream::iter(videos)
        .map(|(name, id)| async move {
            let mut video = Video::new(name, id, BATCH_RESOLUTION, BATCH_CONTAINER);
            video.download().await
        })
        .buffer_unordered(width);
    while let Some(result) = results.next().await {
        match result {
            Some(url) => println!("{url}"),
            None => log::warn!("Video finished without a downloadable URL"),
        }
    }
    let secs = start.elapsed().as_secs_f64();
    println!("Total time = {secs:.2} seconds");
}
