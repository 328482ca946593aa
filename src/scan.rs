use memchr::{memchr, memrchr};

/// A structural heading hit with byte offsets into the scanned text.
///
/// `start` is the offset of the first `=` of the opening run; `end` is where
/// the content of the new section begins (the closing run extended across
/// trailing whitespace, see [`heading_matches`]).
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingMatch {
    pub level: u8,
    pub title: String,
    pub start: usize,
    pub end: usize,
}

/// Scans every physical line for `== Title ==` markers, depth 2 through 6.
///
/// The delimiter runs must have the same length on both sides and must not
/// overlap; mismatched or all-equals lines stay ordinary text. Requires the
/// opening run at the very start of the line. A match's `end` covers the
/// whitespace after the closing run: all of it when only whitespace remains
/// in the document, otherwise up to (not including) the run's last newline,
/// which keeps one separator in front of whatever follows.
pub fn heading_matches(text: &str) -> Vec<HeadingMatch> {
    let mut matches = Vec::new();
    let bytes = text.as_bytes();
    let mut line_start = 0;

    loop {
        let line_end = match memchr(b'\n', &bytes[line_start..]) {
            Some(off) => line_start + off,
            None => bytes.len(),
        };
        let line = &text[line_start..line_end];
        if let Some((level, title, close_end)) = parse_heading_line(line) {
            let end = extend_past_trailing_whitespace(text, line_start + close_end);
            matches.push(HeadingMatch {
                level,
                title,
                start: line_start,
                end,
            });
        }
        if line_end == bytes.len() {
            break;
        }
        line_start = line_end + 1;
    }

    matches
}

/// Level, trimmed title, and the offset just past the closing run, or `None`
/// when the line is not a well-formed heading.
fn parse_heading_line(line: &str) -> Option<(u8, String, usize)> {
    let leading = line.bytes().take_while(|&b| b == b'=').count();
    if !(2..=6).contains(&leading) {
        return None;
    }

    let trimmed = line.trim_end();
    let trailing = trimmed.bytes().rev().take_while(|&b| b == b'=').count();
    if trailing != leading || leading + trailing > trimmed.len() {
        return None;
    }

    let title = trimmed[leading..trimmed.len() - trailing].trim().to_string();
    Some((leading as u8, title, trimmed.len()))
}

/// Extends a closing-run offset across the whitespace run that follows.
///
/// When the run reaches the end of the document the whole run is consumed;
/// otherwise the extension stops at the run's last newline, leaving that
/// newline unconsumed. No whitespace means no movement.
fn extend_past_trailing_whitespace(text: &str, from: usize) -> usize {
    let tail = &text[from..];
    let run_len = tail.len() - tail.trim_start().len();
    if run_len == tail.len() {
        return text.len();
    }
    match memrchr(b'\n', &text.as_bytes()[from..from + run_len]) {
        Some(off) => from + off,
        None => from,
    }
}
