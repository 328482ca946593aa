//! Knossos: structured data extraction from Wikipedia wikitext
//!
//! This crate parses raw wikitext markup into plain data structures without
//! touching the network or expanding templates:
//!
//! 1. **Section tree** -- `== Heading ==` markers (depth 2-6) become a nested
//!    forest of sections; loose text between headings turns into untitled
//!    fragment nodes, and leading text becomes an Introduction section
//! 2. **Infobox** -- the first `{{Infobox ...}}` block yields a map of its
//!    `| name = value` parameters
//! 3. **Flat extraction** -- internal links, `<ref>` contents, and template
//!    bodies as ordered lists, duplicates preserved
//! 4. **Plain text** -- a five-pass cleaner that strips templates, file
//!    links, link markup, and bold/italic quotes
//!
//! Every parsing function is total: malformed or absent markup yields empty
//! results rather than errors, for any input.
//!
//! # Key Modules
//!
//! - [`scan`] -- Line scanner for heading markers with byte offsets
//! - [`section`] -- Section tree construction from the heading sequence
//! - [`infobox`] -- Infobox parameter extraction
//! - [`content`] -- Link, reference, and template extraction
//! - [`clean`] -- Markup stripping for plain-text rendering
//! - [`titles`] -- Page title slugs and normalization
//! - [`ops`] -- Named operation registry behind the command surface
//!
//! # Example Usage
//!
//! ```bash
//! # List the available operations with summaries
//! knossos list --long
//!
//! # Parse an article's section tree from a file
//! knossos run parse_sections --input article.txt
//!
//! # Extract infobox parameters from inline wikitext
//! knossos run parse_infobox 'wikitext={{Infobox settlement
//! | name = Paris
//! | population = 2102650
//! }}'
//! ```

pub mod clean;
pub mod content;
pub mod infobox;
pub mod ops;
pub mod scan;
pub mod section;
pub mod titles;
