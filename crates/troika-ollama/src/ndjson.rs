// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NDJSON stream parser for Ollama streaming chat responses.
//!
//! Ollama streams newline-delimited JSON objects rather than SSE. This
//! module re-frames the raw byte stream into lines and converts each line
//! into a typed [`ChatChunk`] with an explicit completion signal.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};

use troika_core::types::ChatChunk;
use troika_core::{ChunkStream, TroikaError};

use crate::types::ApiChatChunk;

/// Line-framing adapter over a raw HTTP byte stream.
///
/// Buffers bytes until a newline is seen, then yields the completed line
/// with surrounding whitespace trimmed. Blank lines are skipped. A partial
/// trailing line is flushed when the inner stream ends.
struct NdjsonLines {
    inner: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    buf: Vec<u8>,
    finished: bool,
}

impl NdjsonLines {
    fn new(inner: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            finished: false,
        }
    }
}

impl Stream for NdjsonLines {
    type Item = Result<String, TroikaError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(pos) = this.buf.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = this.buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&raw).trim().to_string();
                if line.is_empty() {
                    continue;
                }
                return Poll::Ready(Some(Ok(line)));
            }

            if this.finished {
                if this.buf.is_empty() {
                    return Poll::Ready(None);
                }
                let raw = std::mem::take(&mut this.buf);
                let line = String::from_utf8_lossy(&raw).trim().to_string();
                if line.is_empty() {
                    return Poll::Ready(None);
                }
                return Poll::Ready(Some(Ok(line)));
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buf.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(TroikaError::Provider {
                        message: format!("stream read error: {e}"),
                        source: Some(Box::new(e)),
                    })));
                }
                Poll::Ready(None) => this.finished = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Convert one NDJSON line into a [`ChatChunk`].
///
/// A line carrying an `error` field is a mid-stream backend failure and
/// becomes an `Err` item.
fn line_to_chunk(line: &str) -> Result<ChatChunk, TroikaError> {
    let chunk: ApiChatChunk =
        serde_json::from_str(line).map_err(|e| TroikaError::Provider {
            message: format!("failed to parse stream chunk: {e}"),
            source: Some(Box::new(e)),
        })?;

    if let Some(error) = chunk.error {
        return Err(TroikaError::Provider {
            message: format!("backend stream error: {error}"),
            source: None,
        });
    }

    Ok(ChatChunk {
        content: chunk.message.map(|m| m.content).unwrap_or_default(),
        done: chunk.done,
    })
}

/// Parses a streaming chat response into a stream of typed [`ChatChunk`]s.
pub fn parse_chat_stream(response: reqwest::Response) -> ChunkStream {
    let lines = NdjsonLines::new(Box::pin(response.bytes_stream()));
    Box::pin(lines.map(|result| result.and_then(|line| line_to_chunk(&line))))
}
