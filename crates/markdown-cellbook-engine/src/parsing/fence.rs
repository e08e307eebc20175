/// The triple-backtick fence delimiter.
pub const MARKER: &str = "```";

/// Local facts about a code-fence opener line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    /// Literal indentation prefix: four spaces, a single tab, or empty.
    pub indentation: &'a str,
    /// Raw tag text, undecoded. Empty for a bare fence.
    pub tag: &'a str,
}

/// Matches the opener shape: optional indentation of exactly four spaces or
/// one tab, the marker, then an optional tag running up to the first
/// whitespace. Anything after the tag is tolerated and ignored.
pub fn match_opener(line: &str) -> Option<FenceOpen<'_>> {
    let indentation = if line.starts_with("    ") {
        "    "
    } else if line.starts_with('\t') {
        "\t"
    } else {
        ""
    };
    let rest = line[indentation.len()..].strip_prefix(MARKER)?;
    let tag_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(FenceOpen {
        indentation,
        tag: &rest[..tag_len],
    })
}

/// A closer is any line whose content starts with the marker once leading
/// whitespace is stripped. It need not match the opener's indentation.
pub fn is_closer(line: &str) -> bool {
    line.trim_start().starts_with(MARKER)
}
