use crate::models::{Cell, CellKind};

/// The front-matter delimiter line.
pub const DELIMITER: &str = "---";

/// Attempts front-matter extraction at the top of the document.
///
/// Succeeds only when line 0 is exactly `---`, a later line is exactly `---`,
/// and the interior parses as YAML. Returns the cell (trailing whitespace
/// left for the scanner to fill in) plus the index of the first line after
/// the closing delimiter. On `None` nothing was consumed: the caller falls
/// through to ordinary prose/code parsing from line 0.
pub fn try_parse(lines: &[&str]) -> Option<(Cell, usize)> {
    if lines.first() != Some(&DELIMITER) {
        return None;
    }
    let close = lines[1..].iter().position(|line| *line == DELIMITER)? + 1;
    let content = lines[1..close].join("\n");
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content).ok()?;
    let cell = Cell {
        kind: CellKind::FrontMatter,
        content,
        language: "yaml".to_string(),
        indentation: String::new(),
        leading_whitespace: Some(String::new()),
        trailing_whitespace: None,
        yaml: Some(yaml),
    };
    Some((cell, close + 1))
}
