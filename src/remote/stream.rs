//! Server-sent-event reassembly for streamed translations.
//!
//! Bytes arrive in arbitrary chunks. [`SseDecoder`] buffers incomplete UTF-8
//! sequences and incomplete events, and yields a [`StreamFrame`] for every
//! complete `data: {...}` line. [`FrameReader`] pulls chunks from any
//! [`Read`] and exposes frames as an iterator; [`reassemble`] folds them into
//! the output string in arrival order.
//!
//! A frame whose JSON does not parse is logged and skipped. The stream ends
//! when the reader reports end of file; no terminating frame is expected.

use serde::Deserialize;
use std::io::{self, Read};

const READ_CHUNK: usize = 4096;

/// One decoded event payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamFrame {
    /// Incremental text to append. Frames without it carry no output.
    #[serde(default)]
    pub response: Option<String>,
    /// Opaque continuation token some backends attach to every frame.
    #[serde(default, rename = "p")]
    pub continuation: Option<String>,
}

/// Incremental bytes → frames decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending_bytes: Vec<u8>,
    pending_text: String,
    malformed: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the frames it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        self.pending_bytes.extend_from_slice(chunk);
        self.decode_utf8();

        let mut frames = Vec::new();
        while let Some(end) = self.pending_text.find("\n\n") {
            let event: String = self.pending_text.drain(..end + 2).collect();
            self.parse_event(&event, &mut frames);
        }
        frames
    }

    /// Flushes whatever is buffered once the stream has closed.
    pub fn finish(&mut self) -> Vec<StreamFrame> {
        if !self.pending_bytes.is_empty() {
            let rest = std::mem::take(&mut self.pending_bytes);
            self.pending_text.push_str(&String::from_utf8_lossy(&rest));
        }
        let event = std::mem::take(&mut self.pending_text);
        let mut frames = Vec::new();
        if !event.trim().is_empty() {
            self.parse_event(&event, &mut frames);
        }
        frames
    }

    /// Number of `data:` lines that failed to parse so far.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Moves every complete UTF-8 character from `pending_bytes` into
    /// `pending_text`, keeping a trailing partial sequence for the next chunk.
    fn decode_utf8(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending_bytes) {
                Ok(text) => {
                    self.pending_text.push_str(&text.replace("\r\n", "\n"));
                    self.pending_bytes.clear();
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    let text = String::from_utf8_lossy(&self.pending_bytes[..valid]).replace("\r\n", "\n");
                    self.pending_text.push_str(&text);
                    match err.error_len() {
                        Some(bad) => {
                            self.pending_text.push(char::REPLACEMENT_CHARACTER);
                            self.pending_bytes.drain(..valid + bad);
                        }
                        None => {
                            self.pending_bytes.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn parse_event(&mut self, event: &str, frames: &mut Vec<StreamFrame>) {
        for line in event.lines() {
            let Some(payload) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim_start();
            match serde_json::from_str::<StreamFrame>(payload) {
                Ok(frame) => frames.push(frame),
                Err(err) => {
                    self.malformed += 1;
                    tracing::warn!(error = %err, payload, "skipping malformed stream frame");
                }
            }
        }
    }
}

/// Pull-based iterator over the frames of a byte stream.
///
/// The reader is owned, so dropping the iterator releases it.
pub struct FrameReader<R> {
    reader: R,
    decoder: SseDecoder,
    ready: std::collections::VecDeque<StreamFrame>,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: SseDecoder::new(),
            ready: std::collections::VecDeque::new(),
            done: false,
        }
    }

    pub fn malformed(&self) -> usize {
        self.decoder.malformed()
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = io::Result<StreamFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Some(Ok(frame));
            }
            if self.done {
                return None;
            }
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    self.ready.extend(self.decoder.finish());
                }
                Ok(n) => self.ready.extend(self.decoder.push(&buf[..n])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Reads `reader` to the end, handing each fragment to `on_fragment` as it
/// arrives, and returns everything appended.
pub fn reassemble<R: Read>(reader: R, mut on_fragment: impl FnMut(&str)) -> io::Result<String> {
    let mut output = String::new();
    for frame in FrameReader::new(reader) {
        if let Some(fragment) = frame?.response {
            on_fragment(&fragment);
            output.push_str(&fragment);
        }
    }
    Ok(output)
}
