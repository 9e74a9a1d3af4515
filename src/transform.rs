//! The individual formatting passes.
//!
//! Each pass is a pure `&str -> String` rewrite. They assume the order laid
//! out in [`crate::pipeline::PIPELINE`]: spacing leaves clean line breaks for
//! typography, highlighting sees placeholders already inside headings, and
//! the accessibility wrapper goes on last.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::content::ContentType;
use crate::merge_field::{MERGE_FIELD, MergeFieldKind};

pub(crate) const H1_CLASS: &str = "text-2xl font-bold text-gray-900 mb-4 mt-8";
pub(crate) const H2_CLASS: &str = "text-xl font-bold text-gray-900 mb-3 mt-6";
pub(crate) const H3_CLASS: &str = "text-lg font-semibold text-gray-900 mb-2 mt-4";
pub(crate) const P_CLASS: &str = "mb-4";
const STRONG_CLASS: &str = "font-semibold text-gray-900";
const EM_CLASS: &str = "italic text-gray-700";
const MERGE_FIELD_CLASS: &str = "inline-flex items-center px-2 py-0.5 rounded-md bg-purple-100 text-purple-800 font-medium text-sm border border-purple-200";

const H1_MOBILE_CLASS: &str =
    "text-xl sm:text-2xl font-bold text-gray-900 mb-3 sm:mb-4 mt-6 sm:mt-8";
const H2_MOBILE_CLASS: &str =
    "text-lg sm:text-xl font-bold text-gray-900 mb-2 sm:mb-3 mt-4 sm:mt-6";
const H3_MOBILE_CLASS: &str = "text-base sm:text-lg font-semibold text-gray-900 mb-2 mt-3 sm:mt-4";
const P_MOBILE_CLASS: &str = "mb-3 sm:mb-4";

const CONTENT_ANCHOR: &str = "template-content";

static SENTENCE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").expect("Invalid sentence gap regex"));

static TEXT_BEFORE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S)(\[[A-Z_]+\])").expect("Invalid merge field spacing regex")
});

static TEXT_AFTER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\[[A-Z_]+\])(\S)").expect("Invalid merge field spacing regex")
});

static H3_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^###[ \t]+(.+?)[ \t]*$").expect("Invalid h3 regex"));

static H2_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^##[ \t]+(.+?)[ \t]*$").expect("Invalid h2 regex"));

static H1_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^#[ \t]+(.+?)[ \t]*$").expect("Invalid h1 regex"));

static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("Invalid bold italic regex"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("Invalid italic regex"));

static HEADING_TAG_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h[1-6][\s>]").expect("Invalid heading tag regex"));

static PARAGRAPH_TAG_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p[\s>]").expect("Invalid paragraph tag regex"));

/// Tidy whitespace and punctuation so later passes see clean lines.
pub fn normalize_spacing(text: &str) -> String {
    let text = SENTENCE_GAP.replace_all(text, "${1} ${2}");
    // Adjacent fields share a boundary, so one side is fixed per regex.
    let text = TEXT_BEFORE_FIELD.replace_all(&text, "${1} ${2}");
    let text = TEXT_AFTER_FIELD.replace_all(&text, "${1} ${2}");

    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(&line);
    }

    out
}

/// Convert headings, emphasis and paragraphs to styled HTML.
pub fn enhance_typography(text: &str) -> String {
    let text = H3_LINE.replace_all(text, format!(r#"<h3 class="{H3_CLASS}">${{1}}</h3>"#));
    let text = H2_LINE.replace_all(&text, format!(r#"<h2 class="{H2_CLASS}">${{1}}</h2>"#));
    let text = H1_LINE.replace_all(&text, format!(r#"<h1 class="{H1_CLASS}">${{1}}</h1>"#));
    let text = BOLD_ITALIC.replace_all(
        &text,
        format!(r#"<strong class="{STRONG_CLASS}"><em class="{EM_CLASS}">${{1}}</em></strong>"#),
    );
    let text = BOLD.replace_all(
        &text,
        format!(r#"<strong class="{STRONG_CLASS}">${{1}}</strong>"#),
    );
    let text = ITALIC.replace_all(&text, format!(r#"<em class="{EM_CLASS}">${{1}}</em>"#));

    wrap_paragraphs(&text)
}

/// Group runs of non-heading lines into `<p>` blocks. Blank lines and
/// headings both end a paragraph; line breaks inside one become `<br>`.
fn wrap_paragraphs(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else if HEADING_TAG_START.is_match(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(trimmed.to_string());
        } else {
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    blocks.join("\n")
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    blocks.push(format!(r#"<p class="{P_CLASS}">{}</p>"#, lines.join("<br>")));
    lines.clear();
}

/// Wrap every merge field in an interactive, labelled span, optionally
/// tagged with its inferred kind.
pub fn highlight_merge_fields(text: &str, show_field_types: bool) -> String {
    MERGE_FIELD
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let field_type = if show_field_types {
                format!(
                    r#" data-merge-field-type="{}""#,
                    MergeFieldKind::classify(name).as_str()
                )
            } else {
                String::new()
            };
            format!(
                r#"<span class="{MERGE_FIELD_CLASS}" role="button" tabindex="0" aria-label="Merge field: {name}"{field_type}>[{name}]</span>"#
            )
        })
        .into_owned()
}

/// Rewrite heading and paragraph classes to mobile-first sizes, keeping the
/// desktop values under the `sm:` breakpoint.
pub fn optimize_for_mobile(text: &str) -> String {
    let rewrites = [
        (H1_CLASS, H1_MOBILE_CLASS),
        (H2_CLASS, H2_MOBILE_CLASS),
        (H3_CLASS, H3_MOBILE_CLASS),
        (P_CLASS, P_MOBILE_CLASS),
    ];

    let mut out = text.to_string();
    for (desktop, mobile) in rewrites {
        out = out.replace(
            &format!(r#"class="{desktop}""#),
            &format!(r#"class="{mobile}""#),
        );
    }
    out
}

/// Wrap the markup in a labelled article with a skip link whose target sits
/// just before the first paragraph.
pub fn add_accessibility_markup(text: &str, content_type: ContentType) -> String {
    let target = format!(r#"<div id="{CONTENT_ANCHOR}" tabindex="-1"></div>"#);
    let body = match PARAGRAPH_TAG_START.find(text) {
        Some(m) => format!("{}{}{}", &text[..m.start()], target, &text[m.start()..]),
        None => format!("{target}{text}"),
    };

    format!(
        r##"<div role="article" aria-label="{label}">
<a href="#{CONTENT_ANCHOR}" class="sr-only focus:not-sr-only">Skip to template content</a>
{body}
</div>"##,
        label = content_type.container_label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_inserts_gap_after_sentence_end() {
        assert_eq!(normalize_spacing("Hello.World!Again"), "Hello. World! Again");
    }

    #[test]
    fn spacing_separates_merge_fields_from_words() {
        assert_eq!(
            normalize_spacing("Dear[NAME]and[OTHER]"),
            "Dear [NAME] and [OTHER]"
        );
        assert_eq!(normalize_spacing("[NAME], [PCT]%"), "[NAME] , [PCT] %");
    }

    #[test]
    fn spacing_separates_adjacent_fields_and_punctuation() {
        assert_eq!(normalize_spacing("[FIRST][LAST]"), "[FIRST] [LAST]");
        assert_eq!(normalize_spacing("[A][B][C]"), "[A] [B] [C]");
        assert_eq!(normalize_spacing("Dear [NAME],thanks"), "Dear [NAME] ,thanks");
        assert_eq!(normalize_spacing("([NAME])"), "( [NAME] )");
        assert_eq!(normalize_spacing("Hi  [NAME]   there"), "Hi [NAME] there");
    }

    #[test]
    fn spacing_collapses_whitespace_but_keeps_lines() {
        assert_eq!(
            normalize_spacing("  # Title  \n\n\n\nsome    text\t\there \n"),
            "# Title\n\nsome text here"
        );
    }

    #[test]
    fn typography_headings() {
        let out = enhance_typography("### C\n## B\n# A");
        assert_eq!(
            out,
            format!(
                "<h3 class=\"{H3_CLASS}\">C</h3>\n<h2 class=\"{H2_CLASS}\">B</h2>\n<h1 class=\"{H1_CLASS}\">A</h1>"
            )
        );
    }

    #[test]
    fn typography_emphasis() {
        let out = enhance_typography("**We are grateful** for your *continued* support.");
        assert_eq!(
            out,
            "<p class=\"mb-4\"><strong class=\"font-semibold text-gray-900\">We are grateful</strong> for your <em class=\"italic text-gray-700\">continued</em> support.</p>"
        );
    }

    #[test]
    fn typography_bold_italic_nests_cleanly() {
        let out = enhance_typography("***Urgent*** update");
        assert_eq!(
            out,
            "<p class=\"mb-4\"><strong class=\"font-semibold text-gray-900\"><em class=\"italic text-gray-700\">Urgent</em></strong> update</p>"
        );
    }

    #[test]
    fn typography_paragraphs_and_line_breaks() {
        let out = enhance_typography("Best regards,\nMaya\n\nP.S. thanks");
        assert_eq!(
            out,
            "<p class=\"mb-4\">Best regards,<br>Maya</p>\n<p class=\"mb-4\">P.S. thanks</p>"
        );
    }

    #[test]
    fn typography_heading_ends_paragraph() {
        let out = enhance_typography("# Impact Report\nYour contribution helped");
        assert_eq!(
            out,
            format!("<h1 class=\"{H1_CLASS}\">Impact Report</h1>\n<p class=\"mb-4\">Your contribution helped</p>")
        );
    }

    #[test]
    fn typography_leaves_unbalanced_markers() {
        let out = enhance_typography("a **b and #no heading");
        assert_eq!(out, "<p class=\"mb-4\">a **b and #no heading</p>");
    }

    #[test]
    fn highlight_wraps_fields() {
        let out = highlight_merge_fields("Hi [FIRST_NAME] and [broken", true);
        assert!(out.starts_with("Hi <span class=\""));
        assert!(out.contains("aria-label=\"Merge field: FIRST_NAME\""));
        assert!(out.contains("role=\"button\""));
        assert!(out.contains("tabindex=\"0\""));
        assert!(out.contains("data-merge-field-type=\"name\""));
        assert!(out.contains(">[FIRST_NAME]</span>"));
        assert!(out.ends_with(" and [broken"));
    }

    #[test]
    fn highlight_can_omit_field_types() {
        let out = highlight_merge_fields("Hi [FIRST_NAME]", false);
        assert!(out.contains("aria-label=\"Merge field: FIRST_NAME\">[FIRST_NAME]</span>"));
        assert!(!out.contains("data-merge-field-type"));
    }

    #[test]
    fn mobile_rewrites_known_classes_only() {
        let html = enhance_typography("# A\n## B\n### C\n\ntext");
        let out = optimize_for_mobile(&html);
        assert!(out.contains("text-xl sm:text-2xl"));
        assert!(out.contains("text-lg sm:text-xl"));
        assert!(out.contains("text-base sm:text-lg"));
        assert!(out.contains("mt-4 sm:mt-6"));
        assert!(out.contains("<p class=\"mb-3 sm:mb-4\">"));
        assert!(!out.contains(H1_CLASS));

        assert_eq!(optimize_for_mobile("plain text"), "plain text");
    }

    #[test]
    fn accessibility_inserts_target_before_first_paragraph() {
        let out = add_accessibility_markup(
            "<h1>T</h1>\n<p class=\"mb-4\">x</p>\n<p class=\"mb-4\">y</p>",
            ContentType::Email,
        );
        assert!(out.starts_with("<div role=\"article\" aria-label=\"Email template content\">"));
        assert!(out.contains(
            "<a href=\"#template-content\" class=\"sr-only focus:not-sr-only\">Skip to template content</a>"
        ));
        assert!(out.contains(
            "<h1>T</h1>\n<div id=\"template-content\" tabindex=\"-1\"></div><p class=\"mb-4\">x</p>"
        ));
        assert_eq!(out.matches("id=\"template-content\"").count(), 1);
        assert!(out.ends_with("</div>"));
    }

    #[test]
    fn accessibility_without_paragraph_targets_start() {
        let out = add_accessibility_markup("plain", ContentType::Lesson);
        assert!(out.contains("aria-label=\"Lesson content\""));
        assert!(out.contains("<div id=\"template-content\" tabindex=\"-1\"></div>plain"));
    }
}
