//! Amplitude samples streamed over standard input, one integer per line.

use anyhow::anyhow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Samples buffered between the reader task and the UI loop.
const STDIN_BACKLOG: usize = 256;

/// Spawns a task forwarding samples read from stdin.
///
/// The channel closes when stdin reaches end of file.
///
/// # Errors
/// - If called outside a tokio runtime
pub fn spawn_stdin_feed() -> anyhow::Result<mpsc::Receiver<i32>> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| anyhow!("Reading samples from stdin requires a tokio runtime: {e}"))?;

    let (tx, rx) = mpsc::channel(STDIN_BACKLOG);
    runtime.spawn(forward_samples(BufReader::new(tokio::io::stdin()), tx));
    tracing::debug!("Reading samples from stdin");
    Ok(rx)
}

/// Reads lines from `reader` and sends every parsable sample to `tx`.
///
/// Blank lines are ignored and malformed ones are logged and skipped.
pub async fn forward_samples<R>(reader: R, tx: mpsc::Sender<i32>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_sample(&line) {
                Some(Ok(sample)) => {
                    if tx.send(sample).await.is_err() {
                        break;
                    }
                }
                Some(Err(e)) => tracing::warn!("Skipping sample line: {e}"),
                None => {}
            },
            Ok(None) => {
                tracing::info!("Sample input closed");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read sample input: {e}");
                break;
            }
        }
    }
}

/// Parses one input line. Returns `None` for blank lines.
///
/// Decimal values are rounded to the nearest integer.
pub fn parse_sample(line: &str) -> Option<anyhow::Result<i32>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(sample) = trimmed.parse::<i32>() {
        return Some(Ok(sample));
    }

    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= f64::from(i32::MAX))
        .map(|value| value.round() as i32)
        .ok_or_else(|| anyhow!("'{trimmed}' is not an amplitude"));
    Some(parsed)
}
