//! Completion-string rendering
//!
//! Turns a chunked [`CompletionString`] into the `(display, insert)` pair of an
//! entry. Both the index builder and the live completion path go through
//! [`render`], so a symbol found either way produces equal entries.
//!
//! - display: every visible chunk in order, then `\t` and the result type (or
//!   a kind label such as `namespace` when there is no result type)
//! - insert: typed text and literal text verbatim, placeholders as numbered
//!   snippet fields `${n:text}`; informative and optional chunks are dropped

use crate::syntax::{Chunk, CompletionString, CursorKind};

pub fn render(string: &CompletionString, kind: Option<CursorKind>) -> (String, String) {
    let mut display = String::new();
    let mut insert = String::new();
    let mut result_type = None;
    let mut placeholder = 0;

    for chunk in &string.chunks {
        match chunk {
            Chunk::TypedText(text) | Chunk::Text(text) => {
                display.push_str(text);
                insert.push_str(text);
            }
            Chunk::Placeholder(text) | Chunk::CurrentParameter(text) => {
                placeholder += 1;
                display.push_str(text);
                insert.push_str(&format!("${{{}:{}}}", placeholder, escape_snippet(text)));
            }
            Chunk::Informative(text) => display.push_str(text),
            Chunk::Optional(inner) => display.push_str(&render_display_only(inner)),
            Chunk::ResultType(text) => result_type = Some(text.as_str()),
        }
    }

    append_suffix(&mut display, result_type, kind);
    (display, insert)
}

/// Labels for declarations the collaborator has no completion string for.
pub fn render_plain(spelling: &str, kind: Option<CursorKind>) -> (String, String) {
    let mut display = spelling.to_string();
    if !display.is_empty() {
        append_suffix(&mut display, None, kind);
    }
    (display, spelling.to_string())
}

fn render_display_only(string: &CompletionString) -> String {
    let mut out = String::new();
    for chunk in &string.chunks {
        match chunk {
            Chunk::TypedText(text)
            | Chunk::Text(text)
            | Chunk::Placeholder(text)
            | Chunk::CurrentParameter(text)
            | Chunk::Informative(text) => out.push_str(text),
            Chunk::Optional(inner) => out.push_str(&render_display_only(inner)),
            Chunk::ResultType(_) => {}
        }
    }
    out
}

fn append_suffix(display: &mut String, result_type: Option<&str>, kind: Option<CursorKind>) {
    let suffix = result_type.or_else(|| kind.and_then(CursorKind::label));
    if let Some(suffix) = suffix {
        display.push('\t');
        display.push_str(suffix);
    }
}

// Snippet syntax reserves `$`, `}` and the escape character itself.
fn escape_snippet(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '$' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
