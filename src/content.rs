use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Independent toggles for the formatting passes. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    pub enhance_typography: bool,
    pub highlight_merge_fields: bool,
    pub improve_spacing: bool,
    pub add_accessibility_tags: bool,
    pub mobile_optimized: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enhance_typography: true,
            highlight_merge_fields: true,
            improve_spacing: true,
            add_accessibility_tags: true,
            mobile_optimized: true,
        }
    }
}

impl FormattingOptions {
    /// Options with every pass turned off.
    pub fn none() -> Self {
        Self {
            enhance_typography: false,
            highlight_merge_fields: false,
            improve_spacing: false,
            add_accessibility_tags: false,
            mobile_optimized: false,
        }
    }
}

/// What kind of content a template holds. Drives accessible labelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Email,
    Lesson,
    Article,
    General,
}

impl ContentType {
    /// Label for the `role="article"` container.
    pub fn container_label(self) -> &'static str {
        match self {
            ContentType::Email => "Email template content",
            ContentType::Lesson => "Lesson content",
            ContentType::Article => "Article content",
            ContentType::General => "Template content",
        }
    }

    /// Noun used at the start of the generated accessibility summary.
    pub fn noun(self) -> &'static str {
        match self {
            ContentType::Email => "Email template",
            ContentType::Lesson => "Lesson",
            ContentType::Article => "Article",
            ContentType::General => "Template",
        }
    }
}

/// A heading found in formatted markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
}

impl fmt::Display for HeadingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}: {}", self.level, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityInfo {
    pub aria_label: String,
    pub heading_structure: Vec<HeadingEntry>,
}

impl AccessibilityInfo {
    /// Heading outline rendered as `H{level}: {text}` lines.
    pub fn outline(&self) -> Vec<String> {
        self.heading_structure.iter().map(|h| h.to_string()).collect()
    }
}

/// Result of formatting a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedContent {
    pub content: String,
    pub merge_fields: Vec<String>,
    /// Whole minutes, at least 1 for non-empty input.
    pub estimated_read_time: u32,
    pub accessibility: AccessibilityInfo,
}

/// Advisory feedback on a template. Only empty content makes it invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub word_count: usize,
    pub merge_field_count: usize,
    pub has_headings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub processing_time: Duration,
    /// Output length in characters.
    pub output_size: usize,
    /// Input characters divided by output characters.
    pub compression_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_all_enabled() {
        let options = FormattingOptions::default();
        assert!(options.enhance_typography);
        assert!(options.highlight_merge_fields);
        assert!(options.improve_spacing);
        assert!(options.add_accessibility_tags);
        assert!(options.mobile_optimized);
    }

    #[test]
    fn heading_entry_display() {
        let heading = HeadingEntry {
            level: 2,
            text: "Impact".to_string(),
        };
        assert_eq!(heading.to_string(), "H2: Impact");
    }

    #[test]
    fn content_type_labels() {
        assert_eq!(ContentType::default(), ContentType::Email);
        assert_eq!(ContentType::Email.container_label(), "Email template content");
        assert_eq!(ContentType::Lesson.noun(), "Lesson");
    }
}
