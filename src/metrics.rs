use std::time::Instant;

use crate::content::{FormattingOptions, PerformanceMetrics};
use crate::format::format_template_content_with_options;

/// Time a single default-options formatting call.
pub fn get_performance_metrics(content: &str) -> PerformanceMetrics {
    let start = Instant::now();
    let formatted = format_template_content_with_options(content, &FormattingOptions::default());
    let processing_time = start.elapsed();

    let input_size = content.chars().count();
    let output_size = formatted.content.chars().count();
    let compression_ratio = if output_size == 0 {
        0.0
    } else {
        input_size as f64 / output_size as f64
    };

    PerformanceMetrics {
        processing_time,
        output_size,
        compression_ratio,
    }
}
