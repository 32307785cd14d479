//! Notion block and rich-text conversion into the blog's pseudo-markup.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub code: bool,
}

/// Parse a `rich_text` / `title` array, dropping entries that do not fit.
pub fn rich_text_from_value(value: Option<&Value>) -> Vec<RichText> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| RichText::deserialize(item).ok())
        .collect()
}

/// Concatenate rich-text runs, wrapping each in markers for its annotations.
///
/// Markers nest in a fixed order: bold, italic, code, then the link.
pub fn rich_text_to_markup(runs: &[RichText]) -> String {
    runs.iter().map(run_to_markup).collect()
}

fn run_to_markup(run: &RichText) -> String {
    let mut content = run.plain_text.clone();
    if run.annotations.bold {
        content = format!("**{content}**");
    }
    if run.annotations.italic {
        content = format!("*{content}*");
    }
    if run.annotations.code {
        content = format!("`{content}`");
    }
    if let Some(href) = run.href.as_deref() {
        content = format!("[{content}]({href})");
    }
    content
}

/// One block as a line of pseudo-markup. Blocks without rich text are empty.
pub fn block_to_text(block: &Value) -> String {
    let Some(kind) = block.get("type").and_then(Value::as_str) else {
        return String::new();
    };
    let Some(rich_text) = block.get(kind).and_then(|b| b.get("rich_text")) else {
        return String::new();
    };
    let text = rich_text_to_markup(&rich_text_from_value(Some(rich_text)));

    match kind {
        "heading_1" => format!("# {text}"),
        "heading_2" => format!("## {text}"),
        "heading_3" => format!("### {text}"),
        "bulleted_list_item" => format!("• {text}"),
        "numbered_list_item" => format!("1. {text}"),
        "code" => format!("`{text}`"),
        "quote" => format!("> {text}"),
        _ => text,
    }
}

/// Page body: every block on its own paragraph.
pub fn blocks_to_markup(blocks: &[Value]) -> String {
    blocks
        .iter()
        .map(block_to_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(text: &str, bold: bool, italic: bool, code: bool, href: Option<&str>) -> Value {
        json!({
            "plain_text": text,
            "annotations": {"bold": bold, "italic": italic, "code": code},
            "href": href
        })
    }

    #[test]
    fn annotations_nest_in_fixed_order() {
        let runs = rich_text_from_value(Some(&json!([
            run("plain ", false, false, false, None),
            run("both", true, true, false, None),
            run(" ", false, false, false, None),
            run("site", false, false, true, Some("https://x.dev")),
        ])));
        assert_eq!(
            rich_text_to_markup(&runs),
            "plain ***both*** [`site`](https://x.dev)"
        );
    }

    #[test]
    fn block_types_get_prefixes() {
        let block = |kind: &str| {
            json!({"type": kind, kind: {"rich_text": [run("t", false, false, false, None)]}})
        };
        assert_eq!(block_to_text(&block("paragraph")), "t");
        assert_eq!(block_to_text(&block("heading_1")), "# t");
        assert_eq!(block_to_text(&block("heading_2")), "## t");
        assert_eq!(block_to_text(&block("heading_3")), "### t");
        assert_eq!(block_to_text(&block("bulleted_list_item")), "• t");
        assert_eq!(block_to_text(&block("numbered_list_item")), "1. t");
        assert_eq!(block_to_text(&block("code")), "`t`");
        assert_eq!(block_to_text(&block("quote")), "> t");
        assert_eq!(block_to_text(&block("toggle")), "t");
    }

    #[test]
    fn blocks_without_rich_text_are_empty() {
        assert_eq!(block_to_text(&json!({"type": "divider", "divider": {}})), "");
        assert_eq!(block_to_text(&json!({"object": "block"})), "");
    }

    #[test]
    fn page_blocks_join_with_blank_lines() {
        let blocks = vec![
            json!({"type": "heading_2", "heading_2": {"rich_text": [run("H", false, false, false, None)]}}),
            json!({"type": "paragraph", "paragraph": {"rich_text": [run("body", true, false, false, None)]}}),
        ];
        assert_eq!(blocks_to_markup(&blocks), "## H\n\n**body**");
    }
}
