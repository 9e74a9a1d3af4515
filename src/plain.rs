use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::TAG;

/// Block-level tags and line breaks; these separate words when stripped.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|div|h[1-6]|br|li|ul|ol)(?:\s[^>]*)?/?>")
        .expect("Invalid block tag regex")
});

const ENTITIES: [(&str, &str); 5] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
];

/// Strip markup from formatted content, for copy-to-clipboard.
///
/// Lossy: heading and emphasis boundaries are discarded.
pub fn to_plain_text(formatted: &str) -> String {
    let text = BLOCK_TAG.replace_all(formatted, " ");
    let mut text = TAG.replace_all(&text, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_template_content;

    #[test]
    fn strips_tags_and_decodes_entities() {
        assert_eq!(
            to_plain_text("<p class=\"mb-4\">Tom &amp; Jerry&nbsp;say &quot;hi&quot;</p>"),
            "Tom & Jerry say \"hi\""
        );
    }

    #[test]
    fn block_boundaries_keep_words_apart() {
        assert_eq!(
            to_plain_text("<h1>Title</h1><p>one<br>two</p>"),
            "Title one two"
        );
    }

    #[test]
    fn inline_tags_do_not_add_spaces() {
        assert_eq!(
            to_plain_text("Hello <span role=\"button\">[NAME]</span>!"),
            "Hello [NAME]!"
        );
    }

    #[test]
    fn formatted_output_has_no_markup() {
        let formatted = format_template_content(
            "# Update for [DONOR_NAME]\n\n**Thanks** for *everything*.\nSee you soon.",
        );
        let plain = to_plain_text(&formatted.content);
        assert!(!plain.contains('<'));
        assert!(!plain.contains('>'));
        for entity in ["&nbsp;", "&amp;", "&lt;", "&gt;", "&quot;"] {
            assert!(!plain.contains(entity));
        }
        assert!(plain.contains("Update for [DONOR_NAME]"));
        assert!(plain.contains("Thanks for everything. See you soon."));
    }
}
