use serde::{Deserialize, Serialize};

/// Kind of a cell in the structured document representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// A run of ordinary markdown text.
    Prose,
    /// A fenced code block.
    Code,
    /// The YAML block delimited by `---` lines, allowed only as the first cell.
    FrontMatter,
}

/// One unit of the structured representation: a prose block, a fenced code
/// block, or the document's front matter.
///
/// The whitespace fields hold the literal blank-line runs around the cell as
/// captured at parse time. They are data, not derived: the serializer replays
/// them verbatim, which is what makes an unedited parse/serialize cycle
/// byte-identical. `None` means the cell never went through the parser (the
/// host created it from scratch), and makes the serializer substitute its
/// canonical blank-line separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Body text, exclusive of fence markers, indentation and the blank
    /// lines separating cells.
    pub content: String,
    /// Canonical language id: `markdown` for prose, `yaml` for front matter,
    /// the decoded long-form id (possibly empty) for code.
    pub language: String,
    /// Literal indentation prefix shared by the fence markers and content
    /// lines of an indented code block. Empty for everything else.
    pub indentation: String,
    /// Newline run before this cell. Non-empty only on the first cell.
    pub leading_whitespace: Option<String>,
    /// Newline run after this cell.
    pub trailing_whitespace: Option<String>,
    /// Parsed front-matter value, surfaced so the host can sync document
    /// metadata. Advisory: serialization uses `content`, not this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<serde_yaml::Value>,
}

impl Cell {
    /// A prose cell as the host creates one, with no captured whitespace.
    pub fn prose(content: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Prose,
            content: content.into(),
            language: "markdown".to_string(),
            indentation: String::new(),
            leading_whitespace: None,
            trailing_whitespace: None,
            yaml: None,
        }
    }

    /// A code cell as the host creates one. `language` is the canonical
    /// long-form id; it is re-encoded to a short fence tag on serialization.
    pub fn code(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Code,
            content: content.into(),
            language: language.into(),
            indentation: String::new(),
            leading_whitespace: None,
            trailing_whitespace: None,
            yaml: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_created_cells_carry_no_whitespace_metadata() {
        let cell = Cell::prose("hello");
        assert_eq!(cell.kind, CellKind::Prose);
        assert_eq!(cell.language, "markdown");
        assert_eq!(cell.leading_whitespace, None);
        assert_eq!(cell.trailing_whitespace, None);
    }

    #[test]
    fn host_created_code_cell_uses_canonical_language() {
        let cell = Cell::code("python", "print(1)");
        assert_eq!(cell.kind, CellKind::Code);
        assert_eq!(cell.language, "python");
        assert_eq!(cell.indentation, "");
    }
}
