//! Browser-style session history keyed by URL fragment.
//!
//! The fragment (`#<target>`) is the only persisted navigation state. Pushing
//! an entry encodes the target into the fragment; moving back or forward
//! yields a [`PopState`] carrying the decoded fragment of the new entry.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a fragment. `%` is included so decoding round-trips.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'%');

/// Encode a target for use after `#`.
pub fn encode_fragment(target: &str) -> String {
    utf8_percent_encode(target, FRAGMENT).to_string()
}

/// Extract and decode the fragment of a URL. Empty fragments are `None`.
pub fn decode_fragment(url: &str) -> Option<String> {
    let (_, fragment) = url.split_once('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(percent_decode_str(fragment).decode_utf8_lossy().into_owned())
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Path plus optional fragment
    pub url: String,

    /// Target recorded with the entry
    pub state: Option<String>,
}

/// A back/forward event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopState {
    /// Decoded fragment of the entry that became current
    pub fragment: Option<String>,
}

impl PopState {
    pub fn from_url(url: &str) -> Self {
        Self {
            fragment: decode_fragment(url),
        }
    }
}

/// Linear history with a cursor, like a browser tab's.
#[derive(Debug, Clone)]
pub struct History {
    pathname: String,
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl History {
    /// Start with a single entry for `pathname` and no fragment.
    pub fn new(pathname: impl Into<String>) -> Self {
        let pathname = pathname.into();
        Self {
            entries: vec![HistoryEntry {
                url: pathname.clone(),
                state: None,
            }],
            pathname,
            index: 0,
        }
    }

    /// Record a navigation. Drops any forward entries.
    pub fn push(&mut self, target: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            url: format!("{}#{}", self.pathname, encode_fragment(target)),
            state: Some(target.to_string()),
        });
        self.index += 1;
    }

    pub fn back(&mut self) -> Option<PopState> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(PopState::from_url(&self.current().url))
    }

    pub fn forward(&mut self) -> Option<PopState> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(PopState::from_url(&self.current().url))
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}
