// src/nameslist/reader.rs
// Line reader for NamesList files. The published files have used CR, LF and
// CRLF at various times, so all three terminate a line and come out as '\n'.

use std::io::{self, BufRead};

/// Longest line we keep, terminator included. Content past
/// `MAX_LINE - 1` characters is dropped for that line.
pub const MAX_LINE: usize = 1998;

// Enough bytes to hold MAX_LINE - 1 characters of any UTF-8 width.
const MAX_LINE_BYTES: usize = MAX_LINE * 4;

pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    lines: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(256),
            lines: 0,
        }
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.lines
    }

    /// Next logical line with its terminator normalized to a single '\n'.
    /// The last line of a stream without a terminator comes back without one.
    /// `None` only once the stream is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let mut seen_any = false;
        let mut terminated = false;

        loop {
            let avail = match self.inner.fill_buf() {
                Ok(a) => a,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if avail.is_empty() {
                break;
            }
            seen_any = true;

            match avail.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    let was_cr = avail[i] == b'\r';
                    keep_bytes(&mut self.buf, &avail[..i]);
                    self.inner.consume(i + 1);
                    if was_cr {
                        self.skip_lf_after_cr()?;
                    }
                    terminated = true;
                    break;
                }
                None => {
                    let n = avail.len();
                    keep_bytes(&mut self.buf, avail);
                    self.inner.consume(n);
                }
            }
        }

        if !seen_any {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&self.buf).into_owned();
        if let Some((cut, _)) = line.char_indices().nth(MAX_LINE - 1) {
            line.truncate(cut);
        }
        if terminated {
            line.push('\n');
        }
        self.lines += 1;
        Ok(Some(line))
    }

    // CR followed by LF is one terminator; anything else after a CR belongs
    // to the next line and is left in the stream.
    fn skip_lf_after_cr(&mut self) -> io::Result<()> {
        loop {
            match self.inner.fill_buf() {
                Ok(avail) => {
                    if avail.first() == Some(&b'\n') {
                        self.inner.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[inline]
fn keep_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    let room = MAX_LINE_BYTES.saturating_sub(buf.len());
    buf.extend_from_slice(&bytes[..bytes.len().min(room)]);
}
