//! Suppression marker domain: decide whether a source file already opts out of type checking
//! and produce the marked content when it does not.
//!
//! Pure string logic; reading and writing files is the caller's job.

#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
    Present,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("file is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    NotUtf8 { valid_up_to: usize },
}

/// The line to insert and the substring that proves it is already there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub line: String,
    pub directive: String,
}

impl Marker {
    pub fn new(line: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            directive: directive.into(),
        }
    }

    /// Inspect the first non-blank line only; later lines never count.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn state(&self, content: &str) -> MarkerState {
        match content
            .split(['\n', '\r'])
            .find(|line| !line.trim().is_empty())
        {
            Some(line) if line.contains(&self.directive) => MarkerState::Present,
            _ => MarkerState::Missing,
        }
    }

    /// Marked content, or `None` when the file already carries the directive.
    pub fn apply(&self, content: &str) -> Option<String> {
        match self.state(content) {
            MarkerState::Present => None,
            MarkerState::Missing => {
                let mut out = String::with_capacity(self.line.len() + 1 + content.len());
                out.push_str(&self.line);
                out.push('\n');
                out.push_str(content);
                Some(out)
            }
        }
    }
}

/// Decode raw file bytes, refusing anything that is not UTF-8.
pub fn decode(bytes: Vec<u8>) -> Result<String, MarkerError> {
    String::from_utf8(bytes).map_err(|e| MarkerError::NotUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
