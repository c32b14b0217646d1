#![forbid(unsafe_code)]

//! Best-effort source location from a stack trace.
//!
//! Stacks differ per engine and per bundler, so this is advisory metadata
//! only: callers must cope with `None`. Patterns are tried in priority
//! order over the whole stack; the first pattern with any match wins, and
//! within a pattern the topmost frame wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `file:line[:column]` of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}:{column}", self.file, self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

const FRAME_PATTERNS: [&str; 7] = [
    // Project segments keep their directory for context.
    r"at .+/(app/[^:)]+):(\d+):(\d+)",
    r"at .+/(components/[^:)]+):(\d+):(\d+)",
    r"at .+/(src/[^:)]+):(\d+):(\d+)",
    r"at .+/([^/]+\.tsx?):(\d+):(\d+)",
    r"at .+/([^/]+\.rs):(\d+):(\d+)",
    r"at .+/([^/]+\.bundle[^:]*):(\d+):(\d+)",
    r"at .+/([^/\s:)]+\.[jt]sx?):(\d+):(\d+)",
];

/// Last resort: a source file with a line but no column.
const LINE_ONLY_PATTERN: &str = r"at .+/([^/\s:)]+\.(?:[jt]sx?|rs)):(\d+)";

static FRAMES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FRAME_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static LINE_ONLY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(LINE_ONLY_PATTERN).ok());

/// Find the most relevant project frame in `stack`.
#[must_use]
pub fn extract_source_location(stack: &str) -> Option<SourceLocation> {
    if stack.is_empty() {
        return None;
    }
    // A frame whose line number does not fit is skipped, not fatal.
    let framed = FRAMES.iter().find_map(|pattern| {
        pattern.captures_iter(stack).find_map(|caps| {
            Some(SourceLocation {
                file: caps[1].to_owned(),
                line: caps[2].parse().ok()?,
                column: caps[3].parse().ok(),
            })
        })
    });
    if framed.is_some() {
        return framed;
    }
    LINE_ONLY.as_ref()?.captures_iter(stack).find_map(|caps| {
        Some(SourceLocation {
            file: caps[1].to_owned(),
            line: caps[2].parse().ok()?,
            column: None,
        })
    })
}

/// File name of a script URL: everything after the last `/`, or
/// `"unknown"` when empty.
#[must_use]
pub fn file_name(url: &str) -> &str {
    match url.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "unknown",
    }
}
