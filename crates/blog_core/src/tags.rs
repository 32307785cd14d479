use serde::Serialize;

pub const DEFAULT_TAG_COLORS: [&str; 8] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe", "#43e97b", "#38f9d7",
];

/// Fixed, ordered set of tag colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPalette {
    colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagColor {
    pub label: String,
    pub color: String,
}

impl Default for TagPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_TAG_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TagPalette {
    /// An empty list falls back to the default palette.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the tag at `index` within its own record's tag list.
    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Pair every tag with its positional color, keeping order and duplicates.
    pub fn assign(&self, tags: &[String]) -> Vec<TagColor> {
        tags.iter()
            .enumerate()
            .map(|(index, label)| TagColor {
                label: label.clone(),
                color: self.color_for(index).to_string(),
            })
            .collect()
    }
}
