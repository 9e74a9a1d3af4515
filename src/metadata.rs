use std::sync::LazyLock;

use regex::Regex;

use crate::content::{ContentType, HeadingEntry};

static HEADING_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]\s*>")
        .expect("Invalid heading element regex")
});

pub(crate) static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Whitespace-separated token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `words` at `words_per_minute`, rounded up, at least 1.
pub fn reading_time(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm).max(1) as u32
}

pub fn accessibility_label(content_type: ContentType, words: usize, minutes: u32) -> String {
    let word_unit = if words == 1 { "word" } else { "words" };
    let minute_unit = if minutes == 1 { "minute" } else { "minutes" };
    format!(
        "{} with {} {}, approximately {} {} to read",
        content_type.noun(),
        words,
        word_unit,
        minutes,
        minute_unit
    )
}

/// Headings present in `markup`, in document order, with inner tags removed.
pub fn heading_outline(markup: &str) -> Vec<HeadingEntry> {
    HEADING_ELEMENT
        .captures_iter(markup)
        .filter_map(|caps| {
            let level = caps[1].parse::<u8>().ok()?;
            let inner = TAG.replace_all(&caps[2], "");
            let text = inner.split_whitespace().collect::<Vec<_>>().join(" ");
            Some(HeadingEntry { level, text })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_rounds_up_with_floor() {
        assert_eq!(reading_time(1, 200), 1);
        assert_eq!(reading_time(199, 200), 1);
        assert_eq!(reading_time(200, 200), 1);
        assert_eq!(reading_time(201, 200), 2);
        assert_eq!(reading_time(650, 200), 4);
    }

    #[test]
    fn label_pluralizes_minutes() {
        assert_eq!(
            accessibility_label(ContentType::Email, 12, 1),
            "Email template with 12 words, approximately 1 minute to read"
        );
        assert_eq!(
            accessibility_label(ContentType::Article, 450, 3),
            "Article with 450 words, approximately 3 minutes to read"
        );
        assert_eq!(
            accessibility_label(ContentType::General, 1, 1),
            "Template with 1 word, approximately 1 minute to read"
        );
    }

    #[test]
    fn outline_strips_inner_markup() {
        let markup = r#"<h1 class="a">Main <span aria-label="x">[MONTH]</span></h1>
<p>body</p><h3>Sub</h3>"#;
        let outline: Vec<String> = heading_outline(markup)
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(outline, ["H1: Main [MONTH]", "H3: Sub"]);
    }

    #[test]
    fn outline_ignores_non_heading_tags() {
        assert!(heading_outline("<header>x</header><hr><p>y</p>").is_empty());
    }
}
