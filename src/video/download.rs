use futures::StreamExt;
use tokio::io::AsyncWriteExt;

/// Stream a GET response body straight to `path`, returning whether a file
/// was written. Any status other than 200 writes nothing and is not an error.
pub async fn save_stream(url: &str, path: &str) -> anyhow::Result<bool> {
    let resp = reqwest::get(url).await?;
    if resp.status() != reqwest::StatusCode::OK {
        return Ok(false);
    }
    // Copy chunk by chunk so large videos never sit in memory whole.
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(true)
}
