const ELLIPSIS_MARKER: &str = "...";
pub const DEFAULT_PREVIEW_LENGTH: usize = 150;

/// Cut `text` to at most `max_length` characters and append `...` when
/// anything was dropped. Counts characters, not bytes, and ignores word
/// boundaries.
pub fn truncate(text: Option<&str>, max_length: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    match text.char_indices().nth(max_length) {
        Some((end, _)) => format!("{}{ELLIPSIS_MARKER}", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn exact_length_is_kept_as_is() {
        assert_eq!(truncate(Some("hello"), 5), "hello");
    }

    #[test]
    fn longer_text_gets_marker() {
        assert_eq!(truncate(Some("hello!"), 5), "hello...");
    }

    #[test]
    fn absent_text_is_empty() {
        assert_eq!(truncate(None, 5), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate(Some("안녕하세요 세계"), 5), "안녕하세요...");
        assert_eq!(truncate(Some("안녕"), 5), "안녕");
    }

    #[test]
    fn cuts_mid_word() {
        assert_eq!(truncate(Some("abcdef ghi"), 3), "abc...");
        assert_eq!(truncate(Some("abc"), 0), "...");
    }
}
