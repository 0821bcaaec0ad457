//! Markup extraction for framework content blobs.
//!
//! Contract:
//! - Tag pairs `<name>...</name>` win; names are normalized into keys
//!   (`<Scratchpad Flow>` becomes `scratchpad_flow`).
//! - Without tag pairs, `[Label: text]` markers produce a section list, and a
//!   fenced block splits usage prose from the template body.
//! - Without either, the cleaned text comes back under `content`.
//! - Extraction never fails; unbalanced tags fall through to leftover text.

mod brackets;
mod clean;
mod extractor;
mod section;
mod tags;

pub use brackets::{FencedTemplate, find_fenced_template, section_labels};
pub use clean::clean_text;
pub use extractor::{MarkupKind, detect, extract};
pub use section::{Section, Structure};
pub use tags::{TagPair, find_tag_pairs, normalize_tag_name, strip_tag_pairs};

/// Compile a hardcoded pattern; an invalid one degrades to a never-matching regex.
pub(crate) fn compile_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match regex::Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// Reserved key for text left outside every matched tag.
pub const INSTRUCTIONS_KEY: &str = "instructions";
/// Key for leftover text when an `<instructions>` tag already owns
/// [`INSTRUCTIONS_KEY`].
pub const UNTAGGED_KEY: &str = "untagged_instructions";
/// Key used when no markup is present.
pub const CONTENT_KEY: &str = "content";
/// Key holding bracketed section labels.
pub const SECTIONS_KEY: &str = "sections";
/// Key holding the cleaned source of a top-level bracketed document.
pub const RAW_FORMAT_KEY: &str = "raw_format";
/// Format marker stored on bracketed values nested inside a tag.
pub const BRACKETED_FORMAT: &str = "bracketed_sections";
