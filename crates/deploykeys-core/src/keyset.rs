//! Splitting the raw key input into PEM blocks

use std::path::Path;

use crate::error::ProvisionError;

pub const BEGIN_MARKER: &str = "-----BEGIN";
pub const END_MARKER: &str = "-----END";
const MARKER_CLOSE: &str = "-----";

/// One PEM object from the key set, as trimmed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBlock {
    lines: Vec<String>,
}

impl KeyBlock {
    /// Build a block from raw text; `\n` and `\r\n` both end a line
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.trim().lines().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Key text with every line, including the last, terminated by `\n`
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Check the `-----BEGIN...-----` / `-----END...-----` envelope
    ///
    /// # Errors
    /// `KeyTooShort` for fewer than two lines, `MalformedEnvelope` otherwise
    pub fn check_envelope(&self, key_file: &Path) -> Result<(), ProvisionError> {
        let [first, .., last] = self.lines.as_slice() else {
            return Err(ProvisionError::KeyTooShort {
                key_file: key_file.to_path_buf(),
            });
        };

        let framed = |line: &str, marker: &str| {
            line.starts_with(marker) && line.ends_with(MARKER_CLOSE)
        };
        if !framed(first.as_str(), BEGIN_MARKER) || !framed(last.as_str(), END_MARKER) {
            return Err(ProvisionError::MalformedEnvelope {
                key_file: key_file.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Split concatenated PEM keys at every `-----BEGIN`
///
/// Input order is kept; identical blocks are not merged. Text before the
/// first `-----BEGIN` becomes a block of its own and fails the envelope check
/// later.
///
/// # Errors
/// Returns `EmptyKeys` when the input is absent or blank
pub fn split_key_set(keys: Option<&str>) -> Result<Vec<KeyBlock>, ProvisionError> {
    let trimmed = keys.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ProvisionError::EmptyKeys);
    }

    let mut blocks = Vec::new();
    let mut start = 0;
    for (at, _) in trimmed.match_indices(BEGIN_MARKER) {
        if at > start {
            blocks.push(KeyBlock::parse(&trimmed[start..at]));
            start = at;
        }
    }
    blocks.push(KeyBlock::parse(&trimmed[start..]));

    if blocks.is_empty() {
        return Err(ProvisionError::EmptyKeys);
    }
    Ok(blocks)
}
