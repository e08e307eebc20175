//! Markdown to cell parsing.
//!
//! One forward scan over the document's lines. The scanner owns a single
//! mutable index into an immutable line array, which keeps the rewind after a
//! failed front-matter attempt a plain index reset rather than an undo log.

pub mod fence;
pub mod front_matter;

use crate::languages::decode_fence_tag;
use crate::models::{Cell, CellKind};

/// Splits document text into an ordered sequence of typed cells.
///
/// Total: malformed input degrades to prose or an implicitly closed fence
/// rather than failing. CRLF line endings are accepted and normalized away;
/// cell content never contains `\r`.
pub fn parse(text: &str) -> Vec<Cell> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    Scanner::new(lines).run()
}

struct Scanner<'a> {
    lines: Vec<&'a str>,
    i: usize,
    cells: Vec<Cell>,
}

impl<'a> Scanner<'a> {
    fn new(lines: Vec<&'a str>) -> Self {
        Self {
            lines,
            i: 0,
            cells: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Cell> {
        if let Some((mut cell, next)) = front_matter::try_parse(&self.lines) {
            self.i = next;
            cell.trailing_whitespace = Some(self.take_whitespace(false));
            self.cells.push(cell);
        }

        while self.i < self.lines.len() {
            let leading = if self.i == 0 {
                self.take_whitespace(true)
            } else {
                String::new()
            };

            if self.i == self.lines.len() {
                // Nothing but blank lines. Keep them on one empty prose cell
                // so the document still round-trips.
                if self.cells.is_empty() {
                    let mut cell = Cell::prose("");
                    cell.leading_whitespace = Some(leading);
                    cell.trailing_whitespace = Some(String::new());
                    self.cells.push(cell);
                }
                break;
            }

            match fence::match_opener(self.lines[self.i]) {
                Some(open) => self.parse_code_cell(leading, open),
                None => self.parse_prose_cell(leading),
            }
        }

        self.cells
    }

    fn parse_prose_cell(&mut self, leading: String) {
        let start = self.i;
        while self.i < self.lines.len() {
            let line = self.lines[self.i];
            // A fence opener ends the prose run even without a blank line
            // in between.
            if line.is_empty() || fence::match_opener(line).is_some() {
                break;
            }
            self.i += 1;
        }
        let content = self.lines[start..self.i].join("\n");
        let trailing = self.take_whitespace(false);
        self.cells.push(Cell {
            kind: CellKind::Prose,
            content,
            language: "markdown".to_string(),
            indentation: String::new(),
            leading_whitespace: Some(leading),
            trailing_whitespace: Some(trailing),
            yaml: None,
        });
    }

    fn parse_code_cell(&mut self, leading: String, open: fence::FenceOpen<'_>) {
        let language = decode_fence_tag(open.tag).to_string();
        let indentation = open.indentation.to_string();

        self.i += 1;
        let start = self.i;
        while self.i < self.lines.len() && !fence::is_closer(self.lines[self.i]) {
            self.i += 1;
        }
        // Indentation is stripped only where it literally matches the opener's.
        let content = self.lines[start..self.i]
            .iter()
            .map(|line| line.strip_prefix(indentation.as_str()).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");
        if self.i < self.lines.len() {
            self.i += 1; // consume the closing fence
        }
        // End of document without a closer: the block closes implicitly.

        let trailing = self.take_whitespace(false);
        self.cells.push(Cell {
            kind: CellKind::Code,
            content,
            language,
            indentation,
            leading_whitespace: Some(leading),
            trailing_whitespace: Some(trailing),
            yaml: None,
        });
    }

    /// Consumes a run of blank lines and returns the captured `\n` string.
    ///
    /// The count is the literal number of newline characters separating the
    /// surrounding content: an interior run picks up one extra `\n` for the
    /// newline that ended the preceding content line, while runs touching the
    /// start or end of the document do not. A document that is blank from
    /// start to end has one fewer newline than split lines.
    fn take_whitespace(&mut self, is_first: bool) -> String {
        let start = self.i;
        while self.i < self.lines.len() && self.lines[self.i].is_empty() {
            self.i += 1;
        }
        let is_last = self.i == self.lines.len();
        let mut count = self.i - start;
        if is_first && is_last {
            count = count.saturating_sub(1);
        } else if !is_first && !is_last {
            count += 1;
        }
        "\n".repeat(count)
    }
}
