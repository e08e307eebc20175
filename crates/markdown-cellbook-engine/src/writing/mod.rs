//! Cell to markdown serialization.

use crate::languages::encode_language;
use crate::models::{Cell, CellKind};
use crate::parsing::{fence, front_matter};

/// Separator synthesized between cells that never captured whitespace
/// metadata, giving freshly inserted content the canonical "blank line
/// between cells" look.
const DEFAULT_SEPARATOR: &str = "\n\n";

/// Reconstructs document text from an ordered sequence of cells.
///
/// Total: any cell list serializes. Cells that came out of [`crate::parse`]
/// unedited replay their captured whitespace and indentation verbatim, which
/// reproduces the original document byte for byte. Output always uses `\n`
/// line endings.
pub fn serialize(cells: &[Cell]) -> String {
    let mut out = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx == 0
            && let Some(leading) = &cell.leading_whitespace
        {
            out.push_str(leading);
        }

        match cell.kind {
            CellKind::Prose => out.push_str(&cell.content),
            CellKind::FrontMatter => write_front_matter(&mut out, cell),
            CellKind::Code => write_code(&mut out, cell),
        }

        out.push_str(&between(cell, cells.get(idx + 1)));
    }
    out
}

fn write_front_matter(out: &mut String, cell: &Cell) {
    out.push_str(front_matter::DELIMITER);
    out.push('\n');
    out.push_str(&cell.content);
    out.push('\n');
    out.push_str(front_matter::DELIMITER);
}

fn write_code(out: &mut String, cell: &Cell) {
    out.push_str(&cell.indentation);
    out.push_str(fence::MARKER);
    out.push_str(encode_language(&cell.language));
    out.push('\n');
    // Edited content may carry CRLF; emit LF only. Every line, including
    // empty ones, gets the indentation prefix.
    let mut first = true;
    for line in cell
        .content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
    {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&cell.indentation);
        out.push_str(line);
    }
    out.push('\n');
    out.push_str(&cell.indentation);
    out.push_str(fence::MARKER);
}

/// Whitespace between a cell and its successor (or end of document).
///
/// When both sides carry captured metadata the two strings concatenate
/// literally. When either side is missing it (a cell the host inserted or
/// cleared), and the combination would collapse below one blank line, the
/// canonical separator is substituted instead. Missing metadata is treated
/// the same on either side.
fn between(cell: &Cell, next: Option<&Cell>) -> String {
    let Some(next) = next else {
        // Final cell: captured whitespace verbatim, else a single newline.
        return cell
            .trailing_whitespace
            .clone()
            .unwrap_or_else(|| "\n".to_string());
    };

    if let (Some(trailing), Some(leading)) = (&cell.trailing_whitespace, &next.leading_whitespace) {
        return format!("{trailing}{leading}");
    }

    let combined = format!(
        "{}{}",
        cell.trailing_whitespace.as_deref().unwrap_or(""),
        next.leading_whitespace.as_deref().unwrap_or("")
    );
    if combined.is_empty() || combined == "\n" {
        DEFAULT_SEPARATOR.to_string()
    } else {
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn prose_without_metadata_gets_a_trailing_newline() {
        let cells = vec![Cell::prose("# hello")];
        assert_eq!(serialize(&cells), "# hello\n");
    }

    #[test]
    fn inserted_cells_get_canonical_separation() {
        let mut cells = parse("# hello");
        cells.push(Cell::prose("foo"));
        cells.push(Cell::prose("bar"));
        assert_eq!(serialize(&cells), "# hello\n\nfoo\n\nbar\n");
    }

    #[test]
    fn merge_rule_is_symmetric_in_the_missing_side() {
        let parsed = parse("a\n");
        let fresh = Cell::prose("b");

        // Fresh cell after a parsed one.
        let after = serialize(&[parsed[0].clone(), fresh.clone()]);
        // Fresh cell before a parsed one.
        let before = serialize(&[fresh.clone(), parsed[0].clone()]);

        assert_eq!(after, "a\n\nb\n");
        assert_eq!(before, "b\n\na\n");
    }

    #[test]
    fn captured_whitespace_wider_than_one_blank_line_survives_a_fresh_neighbor() {
        let cells = parse("a\n\n\nb");
        let left = cells[0].clone();
        let fresh = Cell::prose("new");
        // left carries "\n\n\n"; the fresh right side has nothing. The
        // combination is kept since it is already at least one blank line.
        assert_eq!(serialize(&[left, fresh]), "a\n\n\nnew\n");
    }

    #[test]
    fn code_cell_encodes_language_and_indentation() {
        let mut cell = Cell::code("javascript", "let x = 1;\nlet y = 2;");
        cell.indentation = "    ".to_string();
        assert_eq!(
            serialize(&[cell]),
            "    ```js\n    let x = 1;\n    let y = 2;\n    ```\n"
        );
    }

    #[test]
    fn code_cell_with_unknown_language_keeps_the_id_as_tag() {
        let cell = Cell::code("zig", "const x = 1;");
        assert_eq!(serialize(&[cell]), "```zig\nconst x = 1;\n```\n");
    }

    #[test]
    fn crlf_in_edited_code_content_is_normalized_to_lf() {
        let cell = Cell::code("python", "a = 1\r\nb = 2");
        assert_eq!(serialize(&[cell]), "```py\na = 1\nb = 2\n```\n");
    }

    #[test]
    fn front_matter_is_wrapped_in_delimiters() {
        let mut cells = parse("---\ntitle: x\n---\nbody\n");
        assert_eq!(cells[0].kind, CellKind::FrontMatter);
        // Editing the YAML body keeps the delimiters.
        cells[0].content = "title: y".to_string();
        assert_eq!(serialize(&cells), "---\ntitle: y\n---\nbody\n");
    }

    #[test]
    fn empty_cell_list_serializes_to_nothing() {
        assert_eq!(serialize(&[]), "");
    }
}
