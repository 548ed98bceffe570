//! Landing rendered output in a target file.
//!
//! In splice mode only the region between the first start-marker line and
//! the next end-marker line is replaced; everything else is preserved.
//! Markers match by substring, so they can sit inside comments
//! (`# START_PIN_HERE`).

use serde::{Deserialize, Serialize};

/// How an app's target file receives rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the whole file.
    Overwrite,
    /// Replace the marker-delimited region.
    #[default]
    Splice,
}

impl WriteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Splice => "splice",
        }
    }
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" | "rewrite" => Ok(Self::Overwrite),
            "splice" | "insert" => Ok(Self::Splice),
            other => Err(format!(
                "unknown write mode `{other}` (expected `overwrite` or `splice`)"
            )),
        }
    }
}

/// Start/end marker substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new("START_PIN_HERE", "END_PIN_HERE")
    }
}

/// Result of a splice attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice<'a> {
    /// Markers found; the new, trimmed file text.
    Spliced(String),
    /// Marker pair incomplete; the original text, untouched.
    Unchanged(&'a str),
}

impl Splice<'_> {
    /// Text to compare or write, whichever branch was taken.
    pub fn text(&self) -> &str {
        match self {
            Self::Spliced(text) => text,
            Self::Unchanged(text) => text,
        }
    }

    pub fn is_spliced(&self) -> bool {
        matches!(self, Self::Spliced(_))
    }
}

/// Replace the region between the first marker pair of `existing` with
/// `rendered`.
///
/// The start-marker line and end-marker line are kept. Splicing the same
/// block into its own output is a no-op.
pub fn splice<'a>(existing: &'a str, rendered: &str, markers: &Markers) -> Splice<'a> {
    let mut out = String::with_capacity(existing.len() + rendered.len());
    let mut start_found = false;
    let mut end_found = false;

    for line in existing.split('\n') {
        if !start_found {
            out.push_str(line);
            out.push('\n');
            if line.contains(&markers.start) {
                start_found = true;
                out.push_str(rendered);
                out.push('\n');
            }
            continue;
        }
        if !end_found {
            if !line.contains(&markers.end) {
                continue;
            }
            end_found = true;
        }
        out.push_str(line);
        out.push('\n');
    }

    if start_found && end_found {
        Splice::Spliced(out.trim().to_string())
    } else {
        Splice::Unchanged(existing)
    }
}

/// Final file text for `mode`: the rendered output itself, or a splice of it
/// into `existing`.
pub fn compose<'a>(
    mode: WriteMode,
    existing: &'a str,
    rendered: &str,
    markers: &Markers,
) -> Splice<'a> {
    match mode {
        WriteMode::Overwrite => Splice::Spliced(rendered.trim().to_string()),
        WriteMode::Splice => splice(existing, rendered, markers),
    }
}

/// Recover a template body from an app's current target file.
///
/// Overwrite mode takes the whole file. Splice mode takes the text between
/// the first marker pair, falling back to the whole file when either marker
/// is missing. Always trimmed.
pub fn extract_template(existing: &str, markers: &Markers, mode: WriteMode) -> String {
    if mode == WriteMode::Overwrite {
        return existing.trim().to_string();
    }

    let mut body = String::new();
    let mut start_found = false;
    let mut end_found = false;
    for line in existing.split('\n') {
        if !start_found {
            start_found = line.contains(&markers.start);
            continue;
        }
        if line.contains(&markers.end) {
            end_found = true;
            break;
        }
        body.push_str(line);
        body.push('\n');
    }

    if start_found && end_found {
        body.trim().to_string()
    } else {
        existing.trim().to_string()
    }
}
