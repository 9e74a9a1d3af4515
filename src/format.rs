use tracing::debug;

use crate::config::{Config, TemplateSettings};
use crate::content::{AccessibilityInfo, FormattedContent, FormattingOptions};
use crate::merge_field::extract_merge_fields;
use crate::metadata::{accessibility_label, heading_outline, reading_time, word_count};
use crate::pipeline;

pub(crate) const EMPTY_LABEL: &str = "Empty template";

/// Format a template with explicit options and settings.
///
/// Never fails: malformed markers are left as literal text.
pub fn format(
    raw: &str,
    options: &FormattingOptions,
    settings: &TemplateSettings,
) -> FormattedContent {
    if raw.trim().is_empty() {
        return FormattedContent {
            content: raw.to_string(),
            merge_fields: Vec::new(),
            estimated_read_time: 0,
            accessibility: AccessibilityInfo {
                aria_label: EMPTY_LABEL.to_string(),
                heading_structure: Vec::new(),
            },
        };
    }

    let merge_fields = extract_merge_fields(raw);
    let content = pipeline::run(raw, options, settings);

    let words = word_count(raw);
    let minutes = reading_time(words, settings.words_per_minute);
    let heading_structure = heading_outline(&content);

    debug!(
        words,
        merge_fields = merge_fields.len(),
        headings = heading_structure.len(),
        "formatted template"
    );

    FormattedContent {
        content,
        merge_fields,
        estimated_read_time: minutes,
        accessibility: AccessibilityInfo {
            aria_label: accessibility_label(settings.content_type, words, minutes),
            heading_structure,
        },
    }
}

/// Format a template with every pass enabled.
pub fn format_template_content(raw: &str) -> FormattedContent {
    format_template_content_with_options(raw, &FormattingOptions::default())
}

/// Format a template with custom options and default settings.
pub fn format_template_content_with_options(
    raw: &str,
    options: &FormattingOptions,
) -> FormattedContent {
    format(raw, options, &TemplateSettings::default())
}

/// Format a template using a loaded [`Config`].
pub fn format_template_content_with_config(raw: &str, config: &Config) -> FormattedContent {
    format(raw, &config.formatting, &config.template)
}
