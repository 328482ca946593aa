use once_cell::sync::Lazy;
use regex::Regex;

static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap());

static REF_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<ref[^>]*>(.*?)</ref>").unwrap());

static TEMPLATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());

/// Returns internal link targets in document order, duplicates included.
/// Display text after `|` is discarded.
pub fn parse_links(wikitext: &str) -> Vec<String> {
    LINK_REGEX
        .captures_iter(wikitext)
        .map(|c| c[1].trim().to_string())
        .collect()
}

/// Returns the contents of `<ref>...</ref>` pairs in document order.
/// Self-closing or unterminated refs produce nothing.
pub fn parse_references(wikitext: &str) -> Vec<String> {
    REF_REGEX
        .captures_iter(wikitext)
        .map(|c| c[1].trim().to_string())
        .collect()
}

/// Returns the bodies of `{{...}}` templates in document order.
///
/// The match is non-greedy: the first `}}` after an opener closes it, so a
/// nested template truncates its enclosing one. `{{a {{b}} c}}` yields
/// `a {{b` and nothing else.
pub fn parse_templates(wikitext: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(wikitext)
        .map(|c| c[1].trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_basic() {
        let links = parse_links("[[Paris]] and [[Berlin|the capital]]");
        assert_eq!(links, vec!["Paris", "Berlin"]);
    }

    #[test]
    fn links_target_trimmed() {
        let links = parse_links("[[ Paris ]]");
        assert_eq!(links, vec!["Paris"]);
    }

    #[test]
    fn links_duplicates_preserved() {
        let links = parse_links("[[Paris]] then [[Paris]] again");
        assert_eq!(links, vec!["Paris", "Paris"]);
    }

    #[test]
    fn links_keep_anchor() {
        let links = parse_links("[[Paris#History]]");
        assert_eq!(links, vec!["Paris#History"]);
    }

    #[test]
    fn links_empty_target_ignored() {
        assert!(parse_links("[[|display only]]").is_empty());
    }

    #[test]
    fn links_none() {
        assert!(parse_links("no links here").is_empty());
    }

    #[test]
    fn references_basic() {
        let refs = parse_references("<ref>cite1</ref> text <ref name=\"x\">cite2</ref>");
        assert_eq!(refs, vec!["cite1", "cite2"]);
    }

    #[test]
    fn references_case_insensitive() {
        let refs = parse_references("<REF>upper</REF>");
        assert_eq!(refs, vec!["upper"]);
    }

    #[test]
    fn references_span_lines() {
        let refs = parse_references("<ref>line one\nline two</ref>");
        assert_eq!(refs, vec!["line one\nline two"]);
    }

    #[test]
    fn references_unterminated_ignored() {
        assert!(parse_references("<ref>never closed").is_empty());
    }

    #[test]
    fn references_self_closing_ignored() {
        assert!(parse_references("<ref name=\"x\" />").is_empty());
    }

    #[test]
    fn templates_basic() {
        let templates = parse_templates("{{cite web}} and {{reflist}}");
        assert_eq!(templates, vec!["cite web", "reflist"]);
    }

    #[test]
    fn templates_span_lines() {
        let templates = parse_templates("{{cite\nweb}}");
        assert_eq!(templates, vec!["cite\nweb"]);
    }

    #[test]
    fn templates_nested_truncates() {
        let templates = parse_templates("{{a {{b}} c}}");
        assert_eq!(templates, vec!["a {{b"]);
    }

    #[test]
    fn templates_empty_body() {
        let templates = parse_templates("{{}}");
        assert_eq!(templates, vec![""]);
    }

    #[test]
    fn templates_duplicates_in_order() {
        let templates = parse_templates("{{a}} x {{b}} y {{a}}");
        assert_eq!(templates, vec!["a", "b", "a"]);
    }
}
