//! Newline-delimited command source (stdin in the binary).
//!
//! One token per line: `backup`/`b`/`f1`, `restore`/`r`/`f5`,
//! `quit`/`q`/`ctrl+q`. Blank lines are skipped, unknown tokens and
//! oversized lines are logged and skipped, EOF ends the stream.

use std::io::{self, BufRead};

use tracing::warn;

use super::{Action, ActionSource};
use crate::error::{SnapError, SnapResult};

/// Maximum size of a single command line.
const MAX_LINE_BYTES: usize = 4 * 1024;

/// Reads actions line by line from any buffered reader.
#[derive(Debug)]
pub struct LineActionSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineActionSource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> ActionSource for LineActionSource<R> {
    fn next_action(&mut self) -> SnapResult<Option<Action>> {
        loop {
            self.buf.clear();
            let line = read_line_limited(&mut self.reader, &mut self.buf, MAX_LINE_BYTES)
                .map_err(|e| SnapError::EventSource(format!("failed to read input: {e}")))?;

            match line {
                Line::Eof => return Ok(None),
                Line::Oversized => {
                    warn!(max_bytes = MAX_LINE_BYTES, "ignoring oversized input line");
                }
                Line::Complete => {
                    let text = String::from_utf8_lossy(&self.buf);
                    let token = text.trim();
                    if token.is_empty() {
                        continue;
                    }
                    match token.parse::<Action>() {
                        Ok(action) => return Ok(Some(action)),
                        Err(e) => warn!(error = %e, "ignoring input (use b, r or q)"),
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Eof,
    Complete,
    Oversized,
}

/// Read one line from `reader` into `buf`, keeping at most `max_bytes`.
///
/// An oversized line is consumed up to its newline (or EOF) and discarded.
/// The last line counts as complete even without a trailing newline.
fn read_line_limited(
    reader: &mut impl BufRead,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> io::Result<Line> {
    let mut seen_any = false;
    let mut oversized = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if available.is_empty() {
            return Ok(match (seen_any, oversized) {
                (false, _) => Line::Eof,
                (true, false) => Line::Complete,
                (true, true) => Line::Oversized,
            });
        }
        seen_any = true;

        let (consumed, found_newline) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };

        if !oversized {
            if buf.len() + consumed > max_bytes {
                oversized = true;
                buf.clear();
            } else {
                buf.extend_from_slice(&available[..consumed]);
            }
        }
        reader.consume(consumed);

        if found_newline {
            return Ok(if oversized { Line::Oversized } else { Line::Complete });
        }
    }
}
