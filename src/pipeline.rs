//! Ordered table of formatting passes.
//!
//! The order is part of the contract: spacing, typography, highlight,
//! mobile, accessibility. Each pass is skipped when its toggle is off.

use tracing::{debug, trace};

use crate::config::TemplateSettings;
use crate::content::FormattingOptions;
use crate::transform;

/// A named, optionally enabled string rewrite.
pub struct Pass {
    pub name: &'static str,
    enabled: fn(&FormattingOptions) -> bool,
    apply: fn(&str, &TemplateSettings) -> String,
}

impl Pass {
    pub fn is_enabled(&self, options: &FormattingOptions) -> bool {
        (self.enabled)(options)
    }
}

pub const PIPELINE: [Pass; 5] = [
    Pass {
        name: "spacing",
        enabled: |o| o.improve_spacing,
        apply: |text, _| transform::normalize_spacing(text),
    },
    Pass {
        name: "typography",
        enabled: |o| o.enhance_typography,
        apply: |text, _| transform::enhance_typography(text),
    },
    Pass {
        name: "highlight",
        enabled: |o| o.highlight_merge_fields,
        apply: |text, settings| {
            transform::highlight_merge_fields(text, settings.show_merge_field_types)
        },
    },
    Pass {
        name: "mobile",
        enabled: |o| o.mobile_optimized,
        apply: |text, _| transform::optimize_for_mobile(text),
    },
    Pass {
        name: "accessibility",
        enabled: |o| o.add_accessibility_tags,
        apply: |text, settings| transform::add_accessibility_markup(text, settings.content_type),
    },
];

/// Run every enabled pass over `text` in table order.
pub fn run(text: &str, options: &FormattingOptions, settings: &TemplateSettings) -> String {
    let mut out = text.to_string();
    for pass in &PIPELINE {
        if !pass.is_enabled(options) {
            trace!(pass = pass.name, "skipping formatting pass");
            continue;
        }
        out = (pass.apply)(&out, settings);
        debug!(pass = pass.name, len = out.len(), "applied formatting pass");
    }
    out
}
