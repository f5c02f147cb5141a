//! A `nom`-based tokenizer for key path expressions.
//!
//! Paths without brackets are split on `.` verbatim. Bracketed paths are
//! scanned left to right; at each position the first matching token wins:
//!
//! 1. a run of characters other than `.`, `[` and `]` (`a`, `b c`),
//! 2. a bracketed group: `[0]`, `[any text]`, `['quoted']` or `["quoted"]`,
//! 3. an empty key for a separator (`.` or `[]`) followed by another separator
//!    or the end of input.
//!
//! Characters no token matches are skipped, so parsing never fails.
use keypath_types::Key;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{char, none_of, one_of},
    combinator::{eof, map, opt, peek, value},
    error::{Error, ErrorKind},
    sequence::preceded,
};

// --- Main Public Parser ---

/// Parses a textual path into its keys. Every returned key is a [`Key::Name`].
pub fn parse(text: &str) -> Vec<Key> {
    if !text.contains(['[', ']']) {
        return text.split('.').map(Key::from).collect();
    }

    log::trace!("Tokenizing bracketed path '{}'", text);
    let mut keys = Vec::new();
    if text.starts_with('.') {
        keys.push(Key::from(""));
    }

    let mut rest = text;
    while !rest.is_empty() {
        match token(rest) {
            Ok((remaining, key)) => {
                keys.push(Key::Name(key));
                // A zero-width token still moves the scan forward.
                rest = if remaining.len() < rest.len() {
                    remaining
                } else {
                    skip_char(rest)
                };
            }
            Err(_) => rest = skip_char(rest),
        }
    }
    keys
}

fn skip_char(input: &str) -> &str {
    let mut chars = input.chars();
    chars.next();
    chars.as_str()
}

// --- Combinators ---

fn token(input: &str) -> IResult<&str, String> {
    alt((
        map(is_not(".[]"), |name: &str| name.to_string()),
        preceded(char('['), alt((quoted, bare))),
        gap,
    ))
    .parse(input)
}

/// `'...']` or `"..."]`, with `\` escaping the next character.
fn quoted(input: &str) -> IResult<&str, String> {
    let (input, quote) = one_of("'\"").parse(input)?;
    let plain = if quote == '\'' { "\\'" } else { "\\\"" };
    let (input, content): (&str, Option<String>) = opt(escaped_transform(
        is_not(plain),
        '\\',
        none_of("\n\r\u{2028}\u{2029}"),
    ))
    .parse(input)?;
    let (input, _) = (char(quote), char(']')).parse(input)?;
    Ok((input, content.unwrap_or_default()))
}

/// Unquoted bracket content, taken verbatim up to the last `]` before the
/// next `[`. The content is never empty and never starts with a quote.
fn bare(input: &str) -> IResult<&str, String> {
    let (_, first) = none_of("'\"").parse(input)?;
    let start = first.len_utf8();
    let run_end = input[start..].find('[').map_or(input.len(), |at| start + at);
    match input[start..run_end].rfind(']') {
        Some(at) => {
            let close = start + at;
            Ok((&input[close + 1..], input[..close].to_string()))
        }
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    }
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((tag("."), tag("[]"))).parse(input)
}

/// Zero-width: an empty key between two separators, or before the end.
fn gap(input: &str) -> IResult<&str, String> {
    value(String::new(), peek((separator, alt((separator, eof))))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        parse(text).into_iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn test_dotted_fast_path() {
        assert_eq!(names("a.b.c"), ["a", "b", "c"]);
        assert_eq!(names("a..b"), ["a", "", "b"]);
        assert_eq!(names(".a"), ["", "a"]);
        assert_eq!(names("a."), ["a", ""]);
        assert_eq!(names(""), [""]);
        assert_eq!(names("it's \"fine\""), ["it's \"fine\""]);
    }

    #[test]
    fn test_index_brackets() {
        assert_eq!(names("a[0]"), ["a", "0"]);
        assert_eq!(names("a.b[0].c"), ["a", "b", "0", "c"]);
        assert_eq!(names("[0][1]"), ["0", "1"]);
        assert_eq!(names("a[0]b"), ["a", "0", "b"]);
    }

    #[test]
    fn test_unquoted_bracket_content() {
        assert_eq!(names("a[b c]"), ["a", "b c"]);
        assert_eq!(names("a[x.y]"), ["a", "x.y"]);
        assert_eq!(names("a[0]]"), ["a", "0]"]);
        assert_eq!(names("a[[0]]"), ["a", "[0]"]);
        assert_eq!(names("a[]]"), ["a", "]"]);
    }

    #[test]
    fn test_quoted_brackets() {
        assert_eq!(names("a['c.d']"), ["a", "c.d"]);
        assert_eq!(names("a[\"c.d\"]"), ["a", "c.d"]);
        assert_eq!(names(r"a['it\'s']"), ["a", "it's"]);
        assert_eq!(names(r#"a["say \"hi\""]"#), ["a", "say \"hi\""]);
        assert_eq!(names(r#"a['"']"#), ["a", "\""]);
        assert_eq!(names(r"a['back\\slash']"), ["a", r"back\slash"]);
        assert_eq!(names(r"a['\x']"), ["a", "x"]);
        assert_eq!(names("a['']"), ["a", ""]);
        assert_eq!(names("a['[0]']"), ["a", "[0]"]);
    }

    #[test]
    fn test_unterminated_quote_is_skipped() {
        // The group never closes, so the scan falls back to plain runs.
        assert_eq!(names("a['b'c']"), ["a", "'b'c'"]);
        assert_eq!(names("a['b"), ["a", "'b"]);
    }

    #[test]
    fn test_empty_keys_in_bracketed_paths() {
        assert_eq!(names(".a[0]"), ["", "a", "0"]);
        assert_eq!(names("..a[0]"), ["", "", "a", "0"]);
        assert_eq!(names("a[0]."), ["a", "0", ""]);
        assert_eq!(names("a[].b"), ["a", "", "b"]);
        assert_eq!(names("a[][]"), ["a", "", ""]);
        assert_eq!(names("a..b[0]"), ["a", "", "b", "0"]);
        assert_eq!(names("a.[0]"), ["a", "0"]);
    }

    #[test]
    fn test_stray_close_bracket() {
        assert_eq!(names("a]b"), ["a", "b"]);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(names("ключ[0]['日本']"), ["ключ", "0", "日本"]);
        assert_eq!(names("a[é]"), ["a", "é"]);
    }
}
