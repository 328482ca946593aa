use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::clean;
use crate::content;
use crate::infobox;
use crate::section;
use crate::titles;

/// Named parameters for an operation, JSON-coerced from `key=value` input.
pub type ParamMap = HashMap<String, Value>;

/// A parsing function exposed on the command surface.
pub struct Operation {
    pub name: &'static str,
    pub summary: &'static str,
    pub details: &'static str,
    pub params: &'static [&'static str],
    run: fn(&ParamMap) -> Result<Value>,
}

/// Every operation, sorted by name.
pub fn operations() -> &'static [Operation] {
    OPERATIONS
}

pub fn find(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Runs an operation after rejecting parameters it does not declare.
pub fn invoke(op: &Operation, params: &ParamMap) -> Result<Value> {
    for key in params.keys() {
        if !op.params.contains(&key.as_str()) {
            bail!("unknown parameter '{}' for operation '{}'", key, op.name);
        }
    }
    debug!(operation = op.name, params = params.len(), "Invoking operation");
    (op.run)(params)
}

/// Parses `key=value` arguments, splitting on the first `=`. A value that
/// parses as JSON is kept as JSON; anything else stays a raw string.
pub fn parse_kv_params(pairs: &[String]) -> Result<ParamMap> {
    let mut params = ParamMap::new();
    for pair in pairs {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => bail!("invalid parameter format: '{}'. Use key=value", pair),
        };
        let coerced = serde_json::from_str(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        params.insert(key.to_string(), coerced);
    }
    Ok(params)
}

/// Loads a file's contents into the `wikitext` parameter. Refuses to
/// overwrite an explicit `wikitext=` argument.
pub fn load_input(params: &mut ParamMap, path: &Path) -> Result<()> {
    if params.contains_key("wikitext") {
        bail!("--input conflicts with an explicit wikitext= parameter");
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    params.insert("wikitext".to_string(), Value::String(text));
    Ok(())
}

fn require_str<'a>(params: &'a ParamMap, name: &str) -> Result<&'a str> {
    match params.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => bail!("parameter '{}' must be a string", name),
        None => bail!("missing required parameter '{}'", name),
    }
}

fn run_clean_wikitext(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(Value::String(clean::clean_wikitext(wikitext)))
}

fn run_normalize_title(params: &ParamMap) -> Result<Value> {
    let title = require_str(params, "title")?;
    Ok(Value::String(titles::normalize_title(title)))
}

fn run_parse_infobox(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(serde_json::to_value(infobox::parse_infobox(wikitext))?)
}

fn run_parse_links(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(serde_json::to_value(content::parse_links(wikitext))?)
}

fn run_parse_references(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(serde_json::to_value(content::parse_references(wikitext))?)
}

fn run_parse_sections(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(serde_json::to_value(section::parse_sections(wikitext))?)
}

fn run_parse_templates(params: &ParamMap) -> Result<Value> {
    let wikitext = require_str(params, "wikitext")?;
    Ok(serde_json::to_value(content::parse_templates(wikitext))?)
}

fn run_slugify(params: &ParamMap) -> Result<Value> {
    let text = require_str(params, "text")?;
    Ok(Value::String(titles::slugify(text)))
}

static OPERATIONS: &[Operation] = &[
    Operation {
        name: "clean_wikitext",
        summary: "Render wikitext as plain text with markup stripped",
        details: "Renders wikitext as plain text.

Five ordered passes strip markup: {{template}} spans and [[File:...]] links
are removed, [[target|display]] links keep their display text, '''bold''' and
''italic'' quotes are unwrapped. The result is trimmed.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_clean_wikitext,
    },
    Operation {
        name: "normalize_title",
        summary: "Normalize a page title for display",
        details: "Normalizes a page title: underscores become spaces, surrounding
whitespace is removed, and the first character is uppercased.

Parameters:
  title  the page title",
        params: &["title"],
        run: run_normalize_title,
    },
    Operation {
        name: "parse_infobox",
        summary: "Extract parameters from the first infobox block",
        details: "Extracts | name = value parameters from the first {{Infobox ...}}
block as a JSON object. Later duplicates of a name overwrite earlier
ones; a document without an infobox yields an empty object.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_parse_infobox,
    },
    Operation {
        name: "parse_links",
        summary: "List internal link targets",
        details: "Lists [[...]] link targets in document order, duplicates included.
Display text after | is discarded.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_parse_links,
    },
    Operation {
        name: "parse_references",
        summary: "List the contents of <ref> tags",
        details: "Lists the contents of <ref>...</ref> pairs in document order.
Self-closing or unterminated refs produce nothing.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_parse_references,
    },
    Operation {
        name: "parse_sections",
        summary: "Build the nested section tree",
        details: "Builds the nested section tree as a JSON array. Each section has a
title, a kind (Heading or Fragment), its content, and its subsections.
A document without headings becomes a single Introduction section.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_parse_sections,
    },
    Operation {
        name: "parse_templates",
        summary: "List template bodies",
        details: "Lists the bodies of {{...}} templates in document order. Matching is
non-greedy: the first }} after an opener closes it, so nested templates
truncate their enclosing ones.

Parameters:
  wikitext  raw article markup",
        params: &["wikitext"],
        run: run_parse_templates,
    },
    Operation {
        name: "slugify",
        summary: "Convert text to a URL slug",
        details: "Converts text to a URL slug: lowercased, ASCII letters and digits
kept, runs of whitespace and hyphens collapsed to a single hyphen.

Parameters:
  text  the text to slugify",
        params: &["text"],
        run: run_slugify,
    },
];
