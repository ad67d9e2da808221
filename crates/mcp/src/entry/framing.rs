#![forbid(unsafe_code)]

use serde_json::Value;
use std::io::{self, BufRead, Read, Write};

// Applies to Content-Length bodies and to newline-delimited lines alike.
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Framing {
    NewlineJson,
    ContentLength,
}

impl Framing {
    /// Guesses the framing from a client's first non-empty line.
    pub(crate) fn detect(line: &[u8]) -> Option<Self> {
        let trimmed = line.trim_ascii_start();
        if trimmed.starts_with(b"{") || trimmed.starts_with(b"[") {
            return Some(Self::NewlineJson);
        }
        // Any header line means header mode, even when Content-Type comes first.
        let has_prefix = |name: &[u8]| {
            trimmed
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
        };
        if has_prefix(b"content-length:") || has_prefix(b"content-type:") {
            return Some(Self::ContentLength);
        }
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Raw message body; not guaranteed to be UTF-8 or JSON.
    Message(Vec<u8>),
    /// A message over the size cap. Its bytes were discarded and the stream stays usable.
    Oversized,
}

/// Splits an input stream into JSON message bodies.
///
/// Framing is detected once and then fixed for the lifetime of the reader so that replies
/// never mix styles on one transport.
pub(crate) struct FrameReader<R> {
    reader: R,
    framing: Option<Framing>,
}

impl<R: BufRead> FrameReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            framing: None,
        }
    }

    pub(crate) fn framing(&self) -> Option<Framing> {
        self.framing
    }

    /// Next message, `None` once the peer closed the stream.
    pub(crate) fn next_frame(&mut self) -> io::Result<Option<Frame>> {
        let mut line = Vec::new();
        loop {
            let Some(complete) = self.read_line(&mut line)? else {
                return Ok(None);
            };
            if !complete {
                tracing::warn!(limit = MAX_FRAME_BYTES, "dropping oversized line");
                return Ok(Some(Frame::Oversized));
            }
            if line.trim_ascii().is_empty() {
                continue;
            }

            let framing = match self.framing {
                Some(framing) => framing,
                None => match Framing::detect(&line) {
                    Some(framing) => {
                        self.framing = Some(framing);
                        framing
                    }
                    None => continue,
                },
            };

            return match framing {
                Framing::NewlineJson => Ok(Some(Frame::Message(line.trim_ascii().to_vec()))),
                Framing::ContentLength => self.read_content_length_body(&line),
            };
        }
    }

    /// Reads one line into `buf` without ever holding more than the frame cap.
    ///
    /// `None` at EOF, `Some(false)` when the line was too long and has been skipped.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<Option<bool>> {
        buf.clear();
        let cap = MAX_FRAME_BYTES as u64 + 1;
        if (&mut self.reader).take(cap).read_until(b'\n', buf)? == 0 {
            return Ok(None);
        }
        if buf.len() <= MAX_FRAME_BYTES || buf.ends_with(b"\n") {
            return Ok(Some(true));
        }

        // Drain the rest of the overlong line in bounded chunks.
        loop {
            buf.clear();
            let read = (&mut self.reader).take(cap).read_until(b'\n', buf)?;
            if read == 0 || buf.ends_with(b"\n") {
                buf.clear();
                return Ok(Some(false));
            }
        }
    }

    fn read_content_length_body(&mut self, first_header: &[u8]) -> io::Result<Option<Frame>> {
        let mut content_length = parse_content_length_header(first_header);
        let mut header = Vec::new();
        loop {
            let Some(complete) = self.read_line(&mut header)? else {
                // EOF inside the header block closes the connection.
                return Ok(None);
            };
            if !complete {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "header line exceeds max allowed size",
                ));
            }
            if header.trim_ascii().is_empty() {
                break;
            }
            if content_length.is_none() {
                content_length = parse_content_length_header(&header);
            }
        }

        let Some(len) = content_length else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "missing Content-Length header",
            ));
        };
        if len > MAX_FRAME_BYTES {
            tracing::warn!(len, limit = MAX_FRAME_BYTES, "dropping oversized body");
            io::copy(&mut (&mut self.reader).take(len as u64), &mut io::sink())?;
            return Ok(Some(Frame::Oversized));
        }

        let mut body = vec![0u8; len];
        self.reader.read_exact(&mut body)?;
        Ok(Some(Frame::Message(body)))
    }
}

fn parse_content_length_header(line: &[u8]) -> Option<usize> {
    let line = std::str::from_utf8(line).ok()?;
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

pub(crate) fn write_frame<W: Write>(
    writer: &mut W,
    framing: Framing,
    payload: &Value,
) -> io::Result<()> {
    let body = serde_json::to_vec(payload)?;
    match framing {
        Framing::NewlineJson => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
        Framing::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()
}
