//! Single-pass repair scanner.
//!
//! One left-to-right pass records the byte positions of every unmatched `{`,
//! `[`, and `"` on per-kind LIFO stacks, together with three flags:
//!
//! - `is_assignment`: a `:` has been seen since the last separator, so the
//!   cursor sits on the value side of a property;
//! - `open_property`: the cursor is inside an object-key string that has not
//!   closed yet (a quote opened while `is_assignment` was false);
//! - `escaped`: the previous in-string byte was a backslash, so the current
//!   byte is uninterpreted.
//!
//! After the pass the tail is trimmed (incomplete trailing property, lone
//! separator, truncated `\u` escape) and the remaining open structures are
//! closed most-recently-opened first.
//!
//! O(n) time, O(depth) extra space. All structural characters are ASCII, so
//! the scan works on bytes; recorded positions always fall on character
//! boundaries.

use tracing::debug;

/// Transient parse cursor for one repair call.
#[derive(Debug, Default)]
struct RepairState {
    /// Positions of unmatched `{`.
    braces: Vec<usize>,
    /// Positions of unmatched `[`.
    brackets: Vec<usize>,
    /// Positions of unmatched `"` (never holds more than one entry, since
    /// strings do not nest, but closer synthesis treats it like the others).
    quotes: Vec<usize>,
    is_assignment: bool,
    open_property: bool,
    escaped: bool,
}

impl RepairState {
    fn in_string(&self) -> bool {
        !self.quotes.is_empty()
    }
}

/// Balance brackets and quotes in a possibly-truncated JSON text.
///
/// Best effort: the output is not guaranteed to parse, but for any input the
/// function returns a string, appending exactly one closer per unmatched
/// opening. Well-formed input with no trailing comma passes through
/// unchanged.
#[must_use]
pub fn repair(raw: &str) -> String {
    let mut state = RepairState::default();

    for (i, b) in raw.bytes().enumerate() {
        if state.in_string() {
            if state.escaped {
                state.escaped = false;
            } else if b == b'\\' {
                state.escaped = true;
            } else if b == b'"' {
                state.quotes.pop();
                state.open_property = false;
            }
        } else {
            match b {
                b':' => state.is_assignment = true,
                b',' => state.is_assignment = false,
                b'}' => {
                    state.braces.pop();
                    state.is_assignment = false;
                }
                b']' => {
                    state.brackets.pop();
                    state.is_assignment = false;
                }
                b'{' => state.braces.push(i),
                b'[' => state.brackets.push(i),
                b'"' => {
                    // A quote opening outside an assignment starts an object
                    // key, not a value string.
                    if !state.is_assignment {
                        state.open_property = true;
                    }
                    state.quotes.push(i);
                }
                _ => {}
            }
        }
    }

    let mut text: &str = raw;

    // An incomplete trailing property is dropped, never completed: either the
    // key string is still open at end of input, or a key closed but no `:`
    // ever followed it.
    if state.open_property || !state.is_assignment {
        if state.open_property {
            state.quotes.pop();
        }
        let stripped = strip_comma_led_key(text);
        if stripped.len() < text.len() {
            debug!(dropped = &text[stripped.len()..], "discarded incomplete trailing property");
            text = stripped;
        }
    } else if state.quotes.is_empty() {
        // A key that got its `:` but never any value: `{"a":1,"b":`.
        let stripped = strip_dangling_assignment(text);
        if stripped.len() < text.len() {
            debug!(dropped = &text[stripped.len()..], "discarded valueless trailing property");
            text = stripped;
        }
    }

    // A body cut off inside a `\uXXXX` escape would leave an invalid escape
    // once the string is closed.
    text = strip_truncated_unicode_escape(text);

    // Close everything still open, most recently opened first.
    let mut closers: Vec<(usize, char)> = Vec::new();
    closers.extend(state.braces.iter().filter(|&&p| p < text.len()).map(|&p| (p, '}')));
    closers.extend(state.brackets.iter().filter(|&&p| p < text.len()).map(|&p| (p, ']')));
    closers.extend(state.quotes.iter().filter(|&&p| p < text.len()).map(|&p| (p, '"')));
    closers.sort_by(|a, b| b.0.cmp(&a.0));

    let mut fixed = String::with_capacity(text.len() + closers.len());
    fixed.push_str(text);
    fixed.extend(closers.into_iter().map(|(_, c)| c));
    fixed
}

/// Strip a trailing `,`, `,"key` or `,"key"` fragment. Returns the input
/// unchanged when the tail does not match.
fn strip_comma_led_key(text: &str) -> &str {
    let trimmed = text.trim_end();
    let bytes = trimmed.as_bytes();

    // Lone separator before end of input.
    if bytes.last() == Some(&b',') {
        return &trimmed[..trimmed.len() - 1];
    }

    // Walk back over quote and key characters to a leading comma.
    let mut i = bytes.len();
    while i > 0 {
        let b = bytes[i - 1];
        if b == b'"' || b == b'_' || b == b'-' || b.is_ascii_alphanumeric() {
            i -= 1;
        } else {
            break;
        }
    }
    let mut j = i;
    while j > 0 && bytes[j - 1].is_ascii_whitespace() {
        j -= 1;
    }
    if j > 0 && i < bytes.len() && bytes[j - 1] == b',' && bytes[i] == b'"' {
        return &trimmed[..j - 1];
    }
    text
}

/// Strip a trailing `"key":` (with optional leading comma) that never
/// received a value. Returns the input unchanged when the tail does not end
/// with a colon.
fn strip_dangling_assignment(text: &str) -> &str {
    let trimmed = text.trim_end();
    let Some(before_colon) = trimmed.strip_suffix(':') else {
        return text;
    };
    let before_colon = before_colon.trim_end();

    // The colon must follow a closed key string.
    let Some(key_body) = before_colon.strip_suffix('"') else {
        return text;
    };
    let Some(key_open) = key_body.rfind('"') else {
        return text;
    };
    let head = before_colon[..key_open].trim_end();
    head.strip_suffix(',').unwrap_or(head)
}

/// Trim a `\u` escape truncated by end of input (`\u` plus 0-3 hex digits).
fn strip_truncated_unicode_escape(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut i = bytes.len();
    let mut hex = 0;
    while i > 0 && hex < 3 && bytes[i - 1].is_ascii_hexdigit() {
        i -= 1;
        hex += 1;
    }
    if i >= 2 && bytes[i - 1] == b'u' && bytes[i - 2] == b'\\' {
        return &text[..i - 2];
    }
    text
}
