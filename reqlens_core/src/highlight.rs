//! JSON syntax highlighting for body previews
//!
//! The input is parsed with serde_json and re-serialized with stable
//! indentation; a small explicit lexer then walks the pretty text and emits
//! typed spans. A quoted string is a key iff the next non-whitespace
//! character in the pretty text is a colon. Parse failure is silent: the
//! caller gets the original text back unstyled.

/// Lexical class of one span of pretty-printed JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted string immediately followed (ignoring whitespace) by a colon
    Key,
    /// Any other quoted string
    Str,
    Bool,
    Null,
    Number,
    /// Structure and whitespace between recognized tokens, passed through
    /// unstyled
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonToken {
    pub kind: TokenKind,
    pub text: String,
}

/// Result of a highlight attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Highlighted {
    /// Typed spans over the pretty-printed text; concatenating the span
    /// texts reproduces that text exactly
    Tokens(Vec<JsonToken>),
    /// The input was not valid JSON; render it verbatim
    Plain(String),
}

/// Tokenize a text body for highlighting, falling back to plain text when
/// it does not parse as JSON.
pub fn highlight_json(raw: &str) -> Highlighted {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return Highlighted::Plain(raw.to_string());
    };
    let Ok(pretty) = serde_json::to_string_pretty(&value) else {
        return Highlighted::Plain(raw.to_string());
    };
    Highlighted::Tokens(tokenize(&pretty))
}

/// Pretty-print a JSON text, or return it unchanged when it does not parse
pub fn pretty_or_raw(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Does this preview look like JSON? True when the content type mentions
/// json or the first non-whitespace character opens an object or array.
pub fn looks_like_json(content_type: &str, preview: &str) -> bool {
    if content_type.to_lowercase().contains("json") {
        return true;
    }
    matches!(preview.trim_start().chars().next(), Some('{') | Some('['))
}

fn tokenize(pretty: &str) -> Vec<JsonToken> {
    let bytes = pretty.as_bytes();
    let mut tokens = Vec::new();
    let mut gap_start = 0;
    let mut pos = 0;

    let flush_gap = |tokens: &mut Vec<JsonToken>, from: usize, to: usize| {
        if from < to {
            tokens.push(JsonToken {
                kind: TokenKind::Gap,
                text: pretty[from..to].to_string(),
            });
        }
    };

    while pos < bytes.len() {
        let (kind, end) = match bytes[pos] {
            b'"' => {
                let end = scan_string(bytes, pos);
                let kind = if followed_by_colon(bytes, end) {
                    TokenKind::Key
                } else {
                    TokenKind::Str
                };
                (kind, end)
            }
            b't' if pretty[pos..].starts_with("true") => (TokenKind::Bool, pos + 4),
            b'f' if pretty[pos..].starts_with("false") => (TokenKind::Bool, pos + 5),
            b'n' if pretty[pos..].starts_with("null") => (TokenKind::Null, pos + 4),
            b'-' | b'0'..=b'9' => (TokenKind::Number, scan_number(bytes, pos)),
            _ => {
                pos += 1;
                continue;
            }
        };

        flush_gap(&mut tokens, gap_start, pos);
        tokens.push(JsonToken {
            kind,
            text: pretty[pos..end].to_string(),
        });
        pos = end;
        gap_start = end;
    }
    flush_gap(&mut tokens, gap_start, bytes.len());
    tokens
}

/// Advance past a quoted string starting at `start`, honoring backslash
/// escapes. serde output is well-formed, so the closing quote exists.
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    if bytes[pos] == b'-' {
        pos += 1;
    }
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        pos += 1;
        if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
            pos += 1;
        }
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    pos
}

fn followed_by_colon(bytes: &[u8], mut pos: usize) -> bool {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos < bytes.len() && bytes[pos] == b':'
}
