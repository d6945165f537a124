//! Text utilities: truncation and the two escaping contexts
//!
//! The SQL literal context (the `COMMENT` value) and the configuration block
//! context (double-quoted scalars inside `$$ ... $$`) are never mixed.
//! Lengths and cut positions are counted in characters, not bytes.

use std::borrow::Cow;

use crate::error::CompileError;

/// Marker appended to hard-cut text
pub const ELLIPSIS: &str = "...";

/// A break point must sit at or after this share of the limit
const BREAK_RATIO_PERCENT: usize = 70;

/// Characters that would terminate or escape a double-quoted scalar
const UNSAFE_SCALAR_CHARS: [char; 2] = ['"', '\\'];

/// Shorten `text` to at most `max_length` characters, preferring clean breaks
///
/// A sentence end (`.`, kept) or line end (dropped) late enough in the
/// prefix is used as the cut; otherwise the text is hard-cut and [`ELLIPSIS`]
/// appended so the result is exactly `max_length` characters. Limits too
/// small to hold the ellipsis get a plain prefix instead.
#[must_use]
pub fn truncate(text: &str, max_length: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_length {
        return Cow::Borrowed(text);
    }

    let prefix = &text[..byte_offset(text, max_length)];
    let mut last_period = None;
    let mut last_newline = None;
    for (index, (byte, ch)) in prefix.char_indices().enumerate() {
        match ch {
            '.' => last_period = Some((index, byte)),
            '\n' => last_newline = Some((index, byte)),
            _ => {}
        }
    }

    let late_enough = |&(index, _): &(usize, usize)| index * 100 >= max_length * BREAK_RATIO_PERCENT;

    if let Some((_, byte)) = last_period.filter(late_enough) {
        return Cow::Borrowed(&text[..=byte]);
    }
    if let Some((_, byte)) = last_newline.filter(late_enough) {
        return Cow::Borrowed(&text[..byte]);
    }

    if max_length < ELLIPSIS.len() {
        return Cow::Borrowed(prefix);
    }
    let keep = byte_offset(text, max_length - ELLIPSIS.len());
    Cow::Owned(format!("{}{ELLIPSIS}", &text[..keep]))
}

/// Escape a value for a single-quoted SQL string literal
#[must_use]
pub fn escape_sql_literal(value: &str) -> Cow<'_, str> {
    if value.contains('\'') {
        Cow::Owned(value.replace('\'', "''"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Whether a description must be written as a literal block
#[inline]
#[must_use]
pub fn needs_literal_block(text: &str, threshold: usize) -> bool {
    text.contains('\n') || text.chars().count() > threshold
}

/// First character that cannot appear inside a double-quoted scalar
#[inline]
#[must_use]
pub fn unsafe_scalar_char(value: &str) -> Option<char> {
    value.chars().find(|c| UNSAFE_SCALAR_CHARS.contains(c))
}

/// Check a value can be wrapped in double quotes as-is
///
/// # Errors
/// Returns [`CompileError::UnsupportedScalar`] naming the first offending
/// character, unless `allow_unsafe` is set
pub fn check_quoted_scalar(field: &str, value: &str, allow_unsafe: bool) -> Result<(), CompileError> {
    let Some(character) = unsafe_scalar_char(value) else {
        return Ok(());
    };
    if allow_unsafe {
        tracing::warn!(field, ?character, "emitting quoted scalar verbatim");
        Ok(())
    } else {
        Err(CompileError::unsupported_scalar(field, character))
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(byte, _)| byte)
}
