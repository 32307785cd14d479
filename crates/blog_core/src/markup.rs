//! Pseudo-markup to HTML.
//!
//! Content exported from the workspace uses a small, Notion-flavored subset of
//! markdown. It is converted by a fixed, ordered list of whole-string
//! substitutions. Order matters: later steps see the output of earlier ones,
//! and line-oriented steps rely on the `<br>` markers introduced by the first.
//!
//! Malformed syntax is never an error; unmatched delimiters stay as literal
//! text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const LINE_BREAK: &str = "<br>";

static NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
// Fences are matched first so they survive for the code block step.
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```|`([^`]+)`").unwrap());
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").unwrap());
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*$").unwrap());
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^> (.*)$").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^• (.*)$").unwrap());
static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<li>.*?</li>(?:<br><li>.*?</li>)*").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br>\s*){2,}").unwrap());
static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<p>\s*</p>").unwrap());

static DEFAULT: LazyLock<MarkupTransformer> = LazyLock::new(MarkupTransformer::new);

/// Render with the standard rule set.
pub fn render(raw: &str) -> String {
    DEFAULT.render(raw)
}

enum Rule {
    /// Global, leftmost-first, non-overlapping substitution.
    Replace {
        pattern: &'static Regex,
        replacement: &'static str,
    },
    /// Applied to each `<br>`-delimited line; `None` keeps the line.
    Lines(fn(&str) -> Option<String>),
    /// Whole-string pass for rules a single substitution cannot express.
    Pass(fn(&str) -> String),
}

struct Step {
    name: &'static str,
    rule: Rule,
}

impl Step {
    fn apply(&self, text: &str) -> String {
        match &self.rule {
            Rule::Replace {
                pattern,
                replacement,
            } => pattern.replace_all(text, *replacement).into_owned(),
            Rule::Lines(map) => text
                .split(LINE_BREAK)
                .map(|line| map(line).unwrap_or_else(|| line.to_string()))
                .collect::<Vec<_>>()
                .join(LINE_BREAK),
            Rule::Pass(pass) => pass(text),
        }
    }
}

/// Ordered `(matcher, replacer)` steps turning pseudo-markup into HTML.
pub struct MarkupTransformer {
    steps: Vec<Step>,
}

impl Default for MarkupTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTransformer {
    pub fn new() -> Self {
        let steps = vec![
            Step {
                name: "line_breaks",
                rule: Rule::Replace {
                    pattern: &NEWLINE,
                    replacement: LINE_BREAK,
                },
            },
            // Must precede italic or `*` would eat one side of each `**` pair.
            Step {
                name: "bold",
                rule: Rule::Replace {
                    pattern: &BOLD,
                    replacement: "<strong>${1}</strong>",
                },
            },
            Step {
                name: "italic",
                rule: Rule::Replace {
                    pattern: &ITALIC,
                    replacement: "<em>${1}</em>",
                },
            },
            Step {
                name: "inline_code",
                rule: Rule::Pass(inline_code),
            },
            Step {
                name: "image",
                rule: Rule::Replace {
                    pattern: &IMAGE,
                    replacement: r#"<img src="${2}" alt="${1}" style="max-width: 100%; height: auto;">"#,
                },
            },
            // Image syntax is link syntax with a `!` prefix, so images go first.
            Step {
                name: "link",
                rule: Rule::Replace {
                    pattern: &LINK,
                    replacement: r#"<a href="${2}" target="_blank">${1}</a>"#,
                },
            },
            Step {
                name: "headings",
                rule: Rule::Lines(heading),
            },
            Step {
                name: "code_block",
                rule: Rule::Pass(code_blocks),
            },
            Step {
                name: "blockquote",
                rule: Rule::Lines(blockquote),
            },
            Step {
                name: "horizontal_rule",
                rule: Rule::Lines(horizontal_rule),
            },
            Step {
                name: "list_items",
                rule: Rule::Lines(list_item),
            },
            Step {
                name: "list_wrap",
                rule: Rule::Pass(wrap_first_list_run),
            },
            Step {
                name: "paragraphs",
                rule: Rule::Pass(paragraphs),
            },
            Step {
                name: "empty_paragraphs",
                rule: Rule::Replace {
                    pattern: &EMPTY_PARAGRAPH,
                    replacement: "",
                },
            },
        ];
        Self { steps }
    }

    /// Step names in application order.
    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.name)
    }

    pub fn render(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        self.steps
            .iter()
            .fold(raw.to_string(), |text, step| step.apply(&text))
    }

    /// Output after every step, paired with the step name.
    pub fn trace(&self, raw: &str) -> Vec<(&'static str, String)> {
        let mut text = raw.to_string();
        let mut trace = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            text = step.apply(&text);
            trace.push((step.name, text.clone()));
        }
        trace
    }
}

fn inline_code(text: &str) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(code) => format!("<code>{}</code>", code.as_str()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn heading(line: &str) -> Option<String> {
    let caps = HEADING.captures(line)?;
    let level = caps[1].len();
    Some(format!("<h{level}>{}</h{level}>", &caps[2]))
}

fn code_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split(LINE_BREAK).collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if FENCE_OPEN.is_match(lines[i].trim()) {
            let close = lines[i + 1..].iter().position(|line| line.trim() == "```");
            if let Some(offset) = close {
                // Newlines inside the block keep it out of paragraph splitting.
                let body = lines[i + 1..i + 1 + offset].join("\n");
                out.push(format!("<pre><code>{body}</code></pre>"));
                i += offset + 2;
                continue;
            }
        }
        out.push(lines[i].to_string());
        i += 1;
    }
    out.join(LINE_BREAK)
}

fn blockquote(line: &str) -> Option<String> {
    let caps = BLOCKQUOTE.captures(line)?;
    Some(format!("<blockquote>{}</blockquote>", &caps[1]))
}

fn horizontal_rule(line: &str) -> Option<String> {
    (line == "---").then(|| "<hr>".to_string())
}

fn list_item(line: &str) -> Option<String> {
    let caps = BULLET.captures(line)?;
    Some(format!("<li>{}</li>", &caps[1]))
}

/// Only the first contiguous run of items is wrapped; later runs stay bare.
fn wrap_first_list_run(text: &str) -> String {
    LIST_RUN
        .replace(text, |caps: &Captures| {
            format!("<ul>{}</ul>", caps[0].replace(LINE_BREAK, ""))
        })
        .into_owned()
}

fn paragraphs(text: &str) -> String {
    let split = PARAGRAPH_BREAK.replace_all(text, "</p><p>");
    format!("<p>{split}</p>")
}
