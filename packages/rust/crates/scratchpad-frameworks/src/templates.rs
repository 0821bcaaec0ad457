//! Metadata templates and backfill.
//!
//! Each framework family has a `(purpose, use_case, version)` template keyed
//! by a substring of the file stem. Rules are checked in order and the first
//! match wins, so more specific keys must come before keys they contain.
//! Backfill only fills blanks; authored values are never replaced.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::canonical::to_canonical_yaml;
use crate::error::Result;
use crate::loader::{load, write_text};
use crate::record::{is_blank, keys};

/// Metadata defaults for one framework family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// `documentation.purpose` default.
    pub purpose: String,
    /// `documentation.use_case` default.
    pub use_case: String,
    /// `version` default.
    pub version: String,
}

/// Substring rule mapping a file stem to its template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRule {
    /// Substring looked for in the identifier.
    pub pattern: &'static str,
    /// `documentation.purpose`.
    pub purpose: &'static str,
    /// `documentation.use_case`.
    pub use_case: &'static str,
    /// `version`.
    pub version: &'static str,
}

impl TemplateRule {
    const fn new(
        pattern: &'static str,
        purpose: &'static str,
        use_case: &'static str,
        version: &'static str,
    ) -> Self {
        Self {
            pattern,
            purpose,
            use_case,
            version,
        }
    }

    /// Owned template.
    #[must_use]
    pub fn template(&self) -> Template {
        Template {
            purpose: self.purpose.to_string(),
            use_case: self.use_case.to_string(),
            version: self.version.to_string(),
        }
    }
}

/// Known framework families, in match order.
pub const TEMPLATE_RULES: [TemplateRule; 22] = [
    // Core
    TemplateRule::new(
        "scratchpad-2.5",
        "Structured AI reasoning framework with comprehensive cognitive operations",
        "Complex reasoning tasks requiring detailed analysis, synthesis, and metacognition",
        "2.5",
    ),
    TemplateRule::new(
        "scratchpad-2.6",
        "Enhanced reasoning framework with improved attention management and pathway clarity",
        "Advanced problem-solving, strategic planning, research analysis",
        "2.6",
    ),
    TemplateRule::new(
        "scratchpad-2.7",
        "Latest comprehensive scratchpad framework with optimized cognitive workflow",
        "High-complexity tasks requiring systematic reasoning, quality validation, and exploration",
        "2.7",
    ),
    TemplateRule::new(
        "scratchpad-lite",
        "Lightweight reasoning framework optimized for character-constrained environments",
        "Quick tasks in Comet Browser or similar character-limited platforms",
        "1.0",
    ),
    TemplateRule::new(
        "scratchpad-concise",
        "Minimal scratchpad framework focusing on essential reasoning steps only",
        "Simple queries requiring structured thinking without extensive metacognition",
        "1.0",
    ),
    TemplateRule::new(
        "scratchpad-think",
        "Thinking-focused framework emphasizing deliberate cognitive processes",
        "Deep analytical tasks requiring explicit thought articulation",
        "1.0",
    ),
    TemplateRule::new(
        "pplx-profile",
        "Scratchpad framework optimized for Perplexity AI platform constraints",
        "Research queries on Perplexity requiring structured reasoning within platform limits",
        "1.0",
    ),
    // Purpose-built
    TemplateRule::new(
        "deep-researcher",
        "Systematic research framework for thorough investigation and source analysis",
        "Academic research, literature reviews, comprehensive topic exploration",
        "1.0",
    ),
    TemplateRule::new(
        "deeper-research",
        "Advanced research framework with enhanced depth and source validation",
        "Complex research projects requiring rigorous methodology and citation tracking",
        "1.0",
    ),
    TemplateRule::new(
        "emotional-intelligence",
        "Framework emphasizing emotional awareness, empathy, and nuanced human interaction",
        "Counseling scenarios, interpersonal communication, emotional support contexts",
        "1.0",
    ),
    TemplateRule::new(
        "planning-13",
        "Structured planning framework with 13-step systematic approach",
        "Project planning, strategic initiatives, complex task decomposition",
        "1.3",
    ),
    TemplateRule::new(
        "novelize-review",
        "Literary analysis framework for narrative structure and storytelling evaluation",
        "Novel critique, creative writing feedback, narrative arc analysis",
        "1.0",
    ),
    TemplateRule::new(
        "saganpad",
        "Science communication framework inspired by Carl Sagan's accessible style",
        "Explaining complex scientific concepts to general audiences",
        "1.0",
    ),
    TemplateRule::new(
        "unified-conscious",
        "Holistic framework integrating multiple cognitive and awareness dimensions",
        "Philosophical inquiry, consciousness exploration, integrated thinking",
        "1.0",
    ),
    TemplateRule::new(
        "sonnet-thinking",
        "Reasoning framework optimized for Claude Sonnet model capabilities",
        "Complex reasoning tasks leveraging Sonnet's strengths in analysis and synthesis",
        "1.0",
    ),
    TemplateRule::new(
        "gemini-cli",
        "Command-line optimized framework for Gemini API interactions",
        "Terminal-based workflows, scripting, automated Gemini API calls",
        "1.0",
    ),
    TemplateRule::new(
        "flow-gpt5",
        "Framework designed for fluid, conversational reasoning with GPT-5 architecture",
        "Natural dialogue-based problem solving, iterative refinement conversations",
        "5.0",
    ),
    TemplateRule::new(
        "game-design-gabg",
        "Game design framework for mechanics, balance, and gameplay analysis",
        "Game development, mechanics design, player experience optimization",
        "1.0",
    ),
    TemplateRule::new(
        "nlm-extended",
        "Extended natural language modeling framework with enhanced linguistic analysis",
        "NLP tasks, linguistic research, language model evaluation",
        "1.0",
    ),
    TemplateRule::new(
        "nlm-framework-500",
        "Compact NLM framework optimized for 500-word constraint environments",
        "Brief linguistic analysis, summarization, constrained NLP tasks",
        "1.0",
    ),
    TemplateRule::new(
        "human-condition-benchmark",
        "Framework for evaluating AI understanding of human experiences and conditions",
        "Ethics evaluation, empathy testing, human-centered AI assessment",
        "1.0",
    ),
    TemplateRule::new(
        "podsynth",
        "Podcast synthesis framework for audio content analysis and summarization",
        "Podcast production, audio content strategy, episode planning",
        "1.0",
    ),
];

/// Version used when no rule matches.
pub const FALLBACK_VERSION: &str = "1.0";

/// Template for a file stem and its category directory.
///
/// Falls back to a generic template built from the title-cased identifier
/// and category.
#[must_use]
pub fn lookup(identifier: &str, category: &str) -> Template {
    TEMPLATE_RULES
        .iter()
        .find(|rule| identifier.contains(rule.pattern))
        .map_or_else(
            || Template {
                purpose: format!(
                    "{} framework for specialized AI reasoning",
                    title_case(identifier)
                ),
                use_case: format!(
                    "{} tasks requiring structured cognitive approach",
                    title_case(category)
                ),
                version: FALLBACK_VERSION.to_string(),
            },
            TemplateRule::template,
        )
}

/// Hyphens become spaces; each letter that follows a non-letter is
/// uppercased, all others lowercased.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Fields a backfill may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilledField {
    /// `documentation.purpose`.
    Purpose,
    /// `documentation.use_case`.
    UseCase,
    /// `version`.
    Version,
}

/// Outcome of a backfill.
#[derive(Debug, Clone, PartialEq)]
pub enum Backfill {
    /// Every field already had a value.
    Complete,
    /// The document cannot carry metadata.
    Skipped(&'static str),
    /// One or more fields were filled.
    Filled {
        /// Updated record.
        record: Value,
        /// Fields that were blank, in fill order.
        fields: Vec<FilledField>,
    },
}

/// Fill blank metadata in `value` from `template`.
///
/// `None` (an empty document) starts from an empty record.
#[must_use]
pub fn backfill(value: Option<&Value>, template: &Template) -> Backfill {
    let empty = Mapping::new();
    let root = match value {
        None => &empty,
        Some(Value::Mapping(map)) => map,
        Some(_) => return Backfill::Skipped("document is not a mapping"),
    };

    let mut doc = match root.get(keys::DOCUMENTATION) {
        None | Some(Value::Null) => Mapping::new(),
        Some(Value::Mapping(doc)) => doc.clone(),
        Some(_) => return Backfill::Skipped("documentation is not a mapping"),
    };

    let mut fields = Vec::new();
    if is_blank(doc.get(keys::PURPOSE)) {
        doc.insert(keys::PURPOSE.into(), template.purpose.as_str().into());
        fields.push(FilledField::Purpose);
    }
    if is_blank(doc.get(keys::USE_CASE)) {
        doc.insert(keys::USE_CASE.into(), template.use_case.as_str().into());
        fields.push(FilledField::UseCase);
    }
    let version_blank = is_blank(root.get(keys::VERSION));
    if version_blank {
        fields.push(FilledField::Version);
    }
    if fields.is_empty() {
        return Backfill::Complete;
    }

    let mut record = root.clone();
    if version_blank {
        set_version(&mut record, &template.version);
    }
    // Mapping::insert keeps the position of an existing key.
    record.insert(keys::DOCUMENTATION.into(), Value::Mapping(doc));
    Backfill::Filled {
        record: Value::Mapping(record),
        fields,
    }
}

/// Replace a blank version in place, or insert one right after `name`
/// (first when there is no name).
fn set_version(record: &mut Mapping, version: &str) {
    let version = Value::String(version.to_string());
    if record.contains_key(keys::VERSION) {
        record.insert(keys::VERSION.into(), version);
        return;
    }

    let has_name = record.contains_key(keys::NAME);
    let mut rebuilt = Mapping::with_capacity(record.len() + 1);
    if !has_name {
        rebuilt.insert(keys::VERSION.into(), version.clone());
    }
    for (k, v) in &*record {
        rebuilt.insert(k.clone(), v.clone());
        if k.as_str() == Some(keys::NAME) {
            rebuilt.insert(keys::VERSION.into(), version.clone());
        }
    }
    *record = rebuilt;
}

/// Backfill one file using its stem and parent directory name.
///
/// Writes only when a field was filled.
///
/// # Errors
/// Returns load or save failures.
pub fn backfill_file(path: &Path) -> Result<Backfill> {
    let identifier = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let category = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let value = load(path)?;
    let outcome = backfill(value.as_ref(), &lookup(&identifier, &category));
    if let Backfill::Filled { record, .. } = &outcome {
        write_text(path, &to_canonical_yaml(record))?;
    }
    Ok(outcome)
}
