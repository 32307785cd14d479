use std::fmt::Write;

use sha2::{Digest, Sha256};

const MAX_STEM_CHARS: usize = 80;

/// Windows-safe, deterministic page name: `{sanitized_title}--{short_hash(id)}.html`.
///
/// The hash keeps pages with equal titles apart; the id itself never appears
/// in the name.
pub fn page_filename(title: &str, id: &str) -> String {
    format!("{}--{}.html", sanitize_title(title), short_hash(id))
}

fn sanitize_title(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut stem = String::with_capacity(replaced.len());
    for c in replaced.trim_matches(&['_', ' ', '.'][..]).chars() {
        if c == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(c);
    }

    // Titles are often Korean, so cut on characters rather than bytes.
    let mut stem: String = stem.chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        stem.push_str("untitled");
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '%' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).fold(String::with_capacity(8), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}
