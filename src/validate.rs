use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use tracing::debug;

use crate::config::TemplateSettings;
use crate::content::ValidationResult;
use crate::merge_field::extract_merge_fields;
use crate::metadata::word_count;

pub(crate) const EMPTY_ISSUE: &str = "Template content is empty";
pub(crate) const ADD_MERGE_FIELDS: &str =
    "Consider adding merge fields like [FIRST_NAME] for personalization";
pub(crate) const SPLIT_LONG_TEMPLATE: &str =
    "Consider breaking long templates into smaller sections";
pub(crate) const ADD_HEADINGS: &str = "Consider adding headings to organize your template";

static HTML_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h[1-6][\s>]").expect("Invalid HTML heading regex"));

/// Check a template (raw or formatted) with default settings.
pub fn validate_template(content: &str) -> ValidationResult {
    validate_template_with_settings(content, &TemplateSettings::default())
}

/// Check a template. Only empty content is invalid; everything else is a
/// suggestion.
pub fn validate_template_with_settings(
    content: &str,
    settings: &TemplateSettings,
) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult {
            is_valid: false,
            issues: vec![EMPTY_ISSUE.to_string()],
            suggestions: Vec::new(),
            word_count: 0,
            merge_field_count: 0,
            has_headings: false,
        };
    }

    let words = word_count(content);
    let merge_field_count = extract_merge_fields(content).len();
    let has_headings = has_headings(content);

    let mut suggestions = Vec::new();
    if merge_field_count == 0 {
        suggestions.push(ADD_MERGE_FIELDS.to_string());
    }
    if words > settings.long_template_words {
        suggestions.push(SPLIT_LONG_TEMPLATE.to_string());
    }
    if !has_headings {
        suggestions.push(ADD_HEADINGS.to_string());
    }

    debug!(
        words,
        merge_field_count,
        has_headings,
        suggestions = suggestions.len(),
        "validated template"
    );

    ValidationResult {
        is_valid: true,
        issues: Vec::new(),
        suggestions,
        word_count: words,
        merge_field_count,
        has_headings,
    }
}

/// True if the content has a markdown heading or an `<h1>`..`<h6>` element.
fn has_headings(content: &str) -> bool {
    Parser::new(content).any(|event| match event {
        Event::Start(Tag::Heading { .. }) => true,
        Event::Html(html) | Event::InlineHtml(html) => HTML_HEADING.is_match(&html),
        _ => false,
    })
}
