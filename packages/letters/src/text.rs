//! Text normalization helpers.
//!
//! Two whitespace policies live here. `join_stripped` is the title policy:
//! it collapses whitespace *between* text nodes but leaves spacing inside a
//! node untouched, because canonical CUDL titles carry deliberate double
//! spaces. `collapse_whitespace` is the ordinary policy used for
//! transcriptions. Keeping the title policy in one function makes it cheap
//! to change when the corpus says otherwise.

/// Join text nodes with single spaces, preserving intra-node spacing.
///
/// Each node is trimmed and empty nodes (indentation from pretty-printed
/// XML) are dropped; whatever spacing survives inside a node is kept
/// exactly.
pub fn join_stripped<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    nodes
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expand the ampersand abbreviations found in the letter corpus.
///
/// Nineteenth-century correspondents wrote `&c` for "etcetera" and a bare
/// `&` for "and". Substitution is a single left-to-right scan,
/// longest-match-first, so `&c&c` becomes `etcetc` rather than
/// double-substituting. A bare `&` expands only when followed by
/// whitespace or end of input; any other `&` is left alone, which also
/// makes the function idempotent on its own output. Whitespace runs are
/// collapsed to single spaces first (never trimmed).
pub fn clean_text(raw: &str) -> String {
    let collapsed = collapse_runs(raw);

    let mut out = String::with_capacity(collapsed.len());
    let mut rest = collapsed.as_str();
    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("&c") {
            out.push_str("etc");
            rest = tail;
        } else if c == '&' {
            let tail = &rest[1..];
            match tail.chars().next() {
                None | Some(' ') => out.push_str("and"),
                _ => out.push('&'),
            }
            rest = tail;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Collapse whitespace runs to single spaces without trimming the ends.
fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
