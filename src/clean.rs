use once_cell::sync::Lazy;
use regex::Regex;

static TEMPLATE_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());

static FILE_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[File:[^\]]+\]\]").unwrap());

static LINK_DISPLAY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(?:[^\]|]+\|)?([^\]]+)\]\]").unwrap());

static BOLD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"'''(.*?)'''").unwrap());

static ITALIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"''(.*?)''").unwrap());

/// Renders wikitext as plain text by stripping markup in five ordered
/// passes: template spans, `[[File:...]]` links, link display unwrapping,
/// bold quotes, italic quotes. The result is trimmed.
///
/// Template removal is non-greedy, so a block whose body contains `}}` (an
/// infobox holding a nested template, say) is cut short at that `}}` and
/// leaves the rest behind. Bold must unwrap before italic or the `''` pass
/// would eat into `'''` runs.
pub fn clean_wikitext(wikitext: &str) -> String {
    let text = TEMPLATE_SPAN_REGEX.replace_all(wikitext, "");
    let text = FILE_LINK_REGEX.replace_all(&text, "");
    let text = LINK_DISPLAY_REGEX.replace_all(&text, "$1");
    let text = BOLD_REGEX.replace_all(&text, "$1");
    let text = ITALIC_REGEX.replace_all(&text, "$1");
    text.trim().to_string()
}
