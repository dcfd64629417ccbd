//! Markup-safe rendering of decoded bodies.
//!
//! JSON-looking text is highlighted into Prism-compatible token spans
//! (`<span class="token property">`, `token string`, ...) so the console's
//! existing theme applies. Everything else is HTML-escaped.
//!
//! Both paths escape `&`, `<`, `>`, `"` and `'` in source text, so the only
//! raw markup in the output is the span tags emitted here.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::decoder::decode;

/// JSON highlighting failed; callers fall back to [`escape_html`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A string literal was not closed before end of line or input.
    #[error("unterminated string literal at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote
        offset: usize,
    },

    /// Token grammar failed to compile.
    #[error("highlight grammar unavailable")]
    Grammar,
}

/// Highlight token categories, named after Prism's JSON grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Property,
    String,
    Number,
    Boolean,
    Null,
    Punctuation,
    Operator,
}

impl TokenKind {
    fn class(self) -> &'static str {
        match self {
            TokenKind::Property => "token property",
            TokenKind::String => "token string",
            TokenKind::Number => "token number",
            TokenKind::Boolean => "token boolean",
            TokenKind::Null => "token null keyword",
            TokenKind::Punctuation => "token punctuation",
            TokenKind::Operator => "token operator",
        }
    }

    /// Word-like tokens must not start in the middle of a word.
    fn needs_word_start(self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Boolean | TokenKind::Null
        )
    }
}

struct TokenPattern {
    kind: TokenKind,
    pattern: &'static str,
}

const STRING_PATTERN: &str = r#"^"(?:\\.|[^\\"\r\n])*""#;

/// Non-string tokens, tried in order at each position.
static GRAMMAR: &[TokenPattern] = &[
    TokenPattern {
        kind: TokenKind::Number,
        pattern: r"^-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b",
    },
    TokenPattern {
        kind: TokenKind::Boolean,
        pattern: r"^(?:true|false)\b",
    },
    TokenPattern {
        kind: TokenKind::Null,
        pattern: r"^null\b",
    },
    TokenPattern {
        kind: TokenKind::Punctuation,
        pattern: r"^[{}\[\],]",
    },
    TokenPattern {
        kind: TokenKind::Operator,
        pattern: r"^:",
    },
];

lazy_static! {
    static ref STRING_REGEX: Option<Regex> = Regex::new(STRING_PATTERN).ok();

    static ref GRAMMAR_REGEX: Vec<(Regex, TokenKind)> = GRAMMAR
        .iter()
        .filter_map(|p| Regex::new(p.pattern).ok().map(|r| (r, p.kind)))
        .collect();
}

/// Decode a captured body and render it for embedding in HTML.
pub fn render_safe(body: Option<&[u8]>) -> String {
    render_text(&decode(body))
}

/// Render decoded text: highlight when it looks like JSON, escape otherwise.
pub fn render_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match highlight_json(text) {
            Ok(html) => return html,
            Err(err) => {
                tracing::warn!(error = %err, "JSON highlight failed, rendering escaped text");
            },
        }
    }
    escape_html(text)
}

/// Escape the five HTML-sensitive characters in a single left-to-right pass.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Highlight JSON-like text into token spans.
///
/// The scan is lenient: characters that start no token (whitespace, stray
/// identifiers) are copied escaped. It fails only on an unterminated string.
pub fn highlight_json(text: &str) -> Result<String, HighlightError> {
    let string_regex = STRING_REGEX.as_ref().ok_or(HighlightError::Grammar)?;

    let mut out = String::with_capacity(text.len() * 2);
    let mut pos = 0;
    let mut in_word = false;

    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        let token = if ch == '"' {
            let m = string_regex
                .find(rest)
                .ok_or(HighlightError::UnterminatedString { offset: pos })?;
            let kind = if rest[m.end()..].trim_start().starts_with(':') {
                TokenKind::Property
            } else {
                TokenKind::String
            };
            Some((kind, m.end()))
        } else {
            GRAMMAR_REGEX
                .iter()
                .filter(|(_, kind)| !(in_word && kind.needs_word_start()))
                .find_map(|(regex, kind)| regex.find(rest).map(|m| (*kind, m.end())))
        };

        match token {
            Some((kind, len)) => {
                let lexeme = &rest[..len];
                out.push_str("<span class=\"");
                out.push_str(kind.class());
                out.push_str("\">");
                out.push_str(&escape_html(lexeme));
                out.push_str("</span>");
                in_word = lexeme.chars().last().is_some_and(is_word_char);
                pos += len;
            },
            None => {
                out.push_str(&escape_html(ch.encode_utf8(&mut [0; 4])));
                in_word = is_word_char(ch);
                pos += ch.len_utf8();
            },
        }
    }

    Ok(out)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
