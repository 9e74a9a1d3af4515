//! Format lightweight-markdown templates with `[MERGE_FIELD]` placeholders
//! into styled, accessible HTML, plus reading time, merge-field inventory and
//! a heading outline.
//!
//! Formatting never fails. Empty input comes back unchanged; malformed
//! markers stay as literal text.

mod config;
mod content;
mod error;
mod format;
mod input;
mod merge_field;
mod metadata;
mod metrics;
mod pipeline;
mod plain;
mod transform;
mod validate;

pub use config::{Config, TemplateSettings};
pub use content::{
    AccessibilityInfo, ContentType, FormattedContent, FormattingOptions, HeadingEntry,
    PerformanceMetrics, ValidationResult,
};
pub use error::{Error, Result};
pub use format::{
    format_template_content, format_template_content_with_config,
    format_template_content_with_options,
};
pub use input::{read_template, strip_frontmatter};
pub use merge_field::{MergeField, MergeFieldKind, classify_merge_fields, extract_merge_fields};
pub use metrics::get_performance_metrics;
pub use pipeline::{PIPELINE, Pass};
pub use plain::to_plain_text;
pub use validate::{validate_template, validate_template_with_settings};
