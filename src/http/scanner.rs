//! Header scanning: raw bytes up to the blank line, split into lines.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::http::headers::HeaderLines;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// End-of-input before a single line was read.
    #[error("empty request")]
    Empty,
    #[error("transport error while reading headers: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads lines until the empty line that ends the header block.
///
/// End-of-input also ends the scan; whatever was read so far is returned.
/// A trailing partial line without `\n` is dropped. The terminating empty
/// line is kept as the last element.
pub async fn read_header_lines<R>(reader: &mut R) -> Result<HeaderLines, ScanError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = HeaderLines::new();
    let mut raw = Vec::with_capacity(256);

    loop {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw).await?;
        if n == 0 || raw.last() != Some(&b'\n') {
            break;
        }

        let line = String::from_utf8_lossy(strip_line_ending(&raw)).into_owned();
        let done = line.is_empty();
        lines.push(line);

        if done {
            break;
        }
    }

    if lines.is_empty() {
        return Err(ScanError::Empty);
    }

    Ok(lines)
}

fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    line.strip_suffix(b"\r").unwrap_or(line)
}
