//! HTML visualization of annotated entities.
//!
//! Renders a displacy-style fragment: one `div.entities` container with
//! each entity wrapped in a `<mark class="entity">` carrying a label badge.
//! Output is a fragment, not a full document, and parses cleanly with a
//! standard HTML parser.

use super::{EntitySpan, NerDoc};

/// Background color for an entity label, displacy palette.
fn label_color(label: &str) -> &'static str {
    match label {
        "PERSON" => "#aa9cfc",
        "GPE" | "LOC" => "#feca74",
        "DATE" | "TIME" => "#bfe1d9",
        "ORG" => "#7aecec",
        "NORP" => "#c887fb",
        "EVENT" | "WORK_OF_ART" => "#f0d0ff",
        _ => "#dddddd",
    }
}

/// Escape text for embedding in HTML element content or attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the annotated document as an HTML fragment.
///
/// Emits exactly one `<div class="entities">` per call. The source text is
/// interleaved, escaped, with each entity span replaced by a `<mark>`
/// element carrying the span text and a label badge.
pub fn render_entities_html(doc: &NerDoc) -> String {
    let text = doc.text();
    let mut html =
        String::from("<div class=\"entities\" style=\"line-height: 2.5; direction: ltr\">");

    let mut cursor = 0;
    for span in doc.entities() {
        html.push_str(&escape_html(&text[cursor..span.start]));
        push_mark(&mut html, span);
        cursor = span.end;
    }
    html.push_str(&escape_html(&text[cursor..]));
    html.push_str("</div>");
    html
}

fn push_mark(html: &mut String, span: &EntitySpan) {
    html.push_str(&format!(
        "<mark class=\"entity\" style=\"background: {}; padding: 0.45em 0.6em; margin: 0 0.25em; line-height: 1; border-radius: 0.35em\">{} <span style=\"font-size: 0.8em; font-weight: bold; line-height: 1; border-radius: 0.35em; vertical-align: middle; margin-left: 0.5rem\">{}</span></mark>",
        label_color(&span.label),
        escape_html(&span.text),
        escape_html(&span.label),
    ));
}
