//! Bracketed section markers and fenced templates.
//!
//! A marker is `[Label: free text]` on a single bracket level; the label is
//! everything before the first colon. Frameworks written this way usually
//! carry their fill-in template inside a triple-backtick fence, preceded by
//! usage prose.

use std::sync::LazyLock;

use regex::Regex;

use crate::compile_regex;
use crate::clean::clean_text;

static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\[([^\[\]:\n]+):[^\[\]]*\]"));
static FENCE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?s)```[^\n]*\n(.*?)```"));

/// Template body split out of a fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedTemplate {
    /// Cleaned prose before the fence, when there is any.
    pub usage: Option<String>,
    /// Cleaned fence body.
    pub template: String,
}

/// Labels of every `[Label: ...]` marker, in document order.
///
/// Duplicates are kept; blank labels are ignored.
#[must_use]
pub fn section_labels(text: &str) -> Vec<String> {
    SECTION_MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|label| label.as_str().trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// First fenced block in `text`, split into usage prose and template body.
#[must_use]
pub fn find_fenced_template(text: &str) -> Option<FencedTemplate> {
    let caps = FENCE.captures(text)?;
    let fence = caps.get(0)?;
    let body = caps.get(1)?;

    let usage = clean_text(&text[..fence.start()]);
    Some(FencedTemplate {
        usage: (!usage.is_empty()).then_some(usage),
        template: clean_text(body.as_str()),
    })
}
