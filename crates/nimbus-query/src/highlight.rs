//! Highlighted-name segmentation.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One run of a candidate name, marked as matching or not.
///
/// Segments always concatenate back to exactly the original name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The run of text.
    pub text: String,
    /// Whether this run matched the free-text remainder.
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Split `name` on every case-insensitive occurrence of the compiled
/// remainder pattern, marking the occurrences.
///
/// The pattern must come from [`super::search::SearchQuery`], which
/// escapes the remainder before compiling it — splitting on an
/// unescaped user string would let `.` or `(` corrupt the segmentation.
pub(crate) fn split_marked(name: &str, pattern: &Regex) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in pattern.find_iter(name) {
        if m.start() > last {
            segments.push(Segment::plain(&name[last..m.start()]));
        }
        segments.push(Segment::matched(m.as_str()));
        last = m.end();
    }

    if last < name.len() {
        segments.push(Segment::plain(&name[last..]));
    }

    if segments.is_empty() {
        segments.push(Segment::plain(name));
    }

    segments
}

/// A single unsegmented, unmarked run covering the whole name.
pub(crate) fn unsegmented(name: &str) -> Vec<Segment> {
    vec![Segment::plain(name)]
}
