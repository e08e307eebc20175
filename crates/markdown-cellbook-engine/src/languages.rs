//! The fence tag / language id alias table, shared by parsing and writing.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Short fence tag to canonical language id pairs.
///
/// Decoding is many-to-one (`py`, `py2` and `py3` all open python cells);
/// encoding picks the first tag listed for an id, so a round trip normalizes
/// `py3` back to `py`. Order matters for that reason.
const FENCE_TAGS: &[(&str, &str)] = &[
    ("bat", "batch"),
    ("c++", "cpp"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("cs", "csharp"),
    ("py", "python"),
    ("py2", "python"),
    ("py3", "python"),
    ("rb", "ruby"),
    ("sh", "shellscript"),
    ("zsh", "shellscript"),
    ("yml", "yaml"),
    ("md", "markdown"),
];

static DECODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| FENCE_TAGS.iter().copied().collect());

static ENCODE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (tag, id) in FENCE_TAGS {
        map.entry(*id).or_insert(*tag);
    }
    map
});

static SUPPORTED: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut ids = vec!["markdown", "yaml"];
    for (_, id) in FENCE_TAGS {
        if !ids.contains(id) {
            ids.push(id);
        }
    }
    ids
});

/// Long-form language id for a fence tag. Unknown tags pass through unchanged.
pub fn decode_fence_tag(tag: &str) -> &str {
    DECODE.get(tag).copied().unwrap_or(tag)
}

/// Fence tag for a long-form language id. Ids without a short tag pass
/// through unchanged.
pub fn encode_language(id: &str) -> &str {
    ENCODE.get(id).copied().unwrap_or(id)
}

/// Advisory list of language ids a host can offer in a per-cell language
/// picker. Not consulted by parse or serialize.
pub fn supported_languages() -> &'static [&'static str] {
    &SUPPORTED
}
