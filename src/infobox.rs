use std::collections::HashMap;

use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;

static INFOBOX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\{\{Infobox(.*?)\n\}\}").unwrap());

/// Extracts `| name = value` parameters from the first infobox block.
///
/// Only the first `{{Infobox ...}}` block terminated by a `\n}}` line is
/// consulted; a document without one yields an empty map. Names are runs of
/// word characters. Values keep embedded newlines up to the next newline
/// that is immediately followed by `|`, or to the end of the block, and are
/// trimmed. Later duplicates of a name overwrite earlier ones.
pub fn parse_infobox(wikitext: &str) -> HashMap<String, String> {
    let caps = match INFOBOX_REGEX.captures(wikitext) {
        Some(caps) => caps,
        None => return HashMap::new(),
    };
    parse_params(&caps[1])
}

fn parse_params(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let bytes = body.as_bytes();
    let mut search_from = 0;

    while let Some(off) = memchr(b'|', &bytes[search_from..]) {
        let pipe = search_from + off;
        match parse_param(body, pipe) {
            Some((name, value, resume)) => {
                params.insert(name, value);
                search_from = resume;
            }
            None => search_from = pipe + 1,
        }
    }

    params
}

/// Parses one `| name = value` starting at the `|` byte. Returns the pair
/// and the offset scanning resumes from: the `|` of the next boundary, or
/// the end of the body.
fn parse_param(body: &str, pipe: usize) -> Option<(String, String, usize)> {
    let name_start = skip_whitespace(body, pipe + 1);
    let name_end = word_end(body, name_start);
    if name_end == name_start {
        return None;
    }

    let after_name = skip_whitespace(body, name_end);
    if body.as_bytes().get(after_name) != Some(&b'=') {
        return None;
    }

    let value_start = after_name + 1;
    let (value_end, resume) = find_value_end(body, value_start);
    let name = body[name_start..name_end].to_string();
    let value = body[value_start..value_end].trim().to_string();
    Some((name, value, resume))
}

fn skip_whitespace(body: &str, from: usize) -> usize {
    let tail = &body[from..];
    from + (tail.len() - tail.trim_start().len())
}

/// End of the run of word characters (alphanumerics or `_`) starting at `from`.
fn word_end(body: &str, from: usize) -> usize {
    match body[from..]
        .char_indices()
        .find(|&(_, c)| !c.is_alphanumeric() && c != '_')
    {
        Some((i, _)) => from + i,
        None => body.len(),
    }
}

/// A value ends at the first newline directly followed by `|`, or at the end
/// of the body. Pipes elsewhere in the value do not terminate it.
fn find_value_end(body: &str, from: usize) -> (usize, usize) {
    let bytes = body.as_bytes();
    let mut search_from = from;

    while let Some(off) = memchr(b'\n', &bytes[search_from..]) {
        let newline = search_from + off;
        if bytes.get(newline + 1) == Some(&b'|') {
            return (newline, newline + 1);
        }
        search_from = newline + 1;
    }

    (body.len(), body.len())
}
