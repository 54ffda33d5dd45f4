// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Reading values out of a raw `Cookie` request header.
//!
//! Parsing is lenient: pairs that do not form a valid cookie are skipped
//! rather than reported, so a garbled header simply yields fewer cookies.

/// Returns the value of the first cookie named `name`, or an empty string when
/// the header has no such cookie.
#[must_use]
pub fn extract_session_value(raw_cookies: &str, name: &str) -> String {
    cookies(raw_cookies)
        .find(|&(candidate, _)| candidate == name)
        .map(|(_, value)| value.to_owned())
        .unwrap_or_default()
}

/// Iterates over the well-formed `(name, value)` pairs in a header, in order.
pub fn cookies<'raw>(raw_cookies: &'raw str) -> impl Iterator<Item = (&'raw str, &'raw str)> {
    raw_cookies.split(';').filter_map(parse_pair)
}

fn parse_pair(part: &str) -> Option<(&str, &str)> {
    let part = trim(part);
    if part.is_empty() {
        return None;
    }

    let (name, value) = part.split_once('=').unwrap_or((part, ""));
    let name = trim(name);
    if name.is_empty() || !name.bytes().all(is_token_byte) {
        return None;
    }

    Some((name, parse_value(value)?))
}

fn parse_value(value: &str) -> Option<&str> {
    let value = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(unquoted) => unquoted,
        None => value,
    };
    value.bytes().all(is_value_byte).then_some(value)
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

const fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic()
        && !matches!(
            b,
            b'(' | b')'
                | b'<'
                | b'>'
                | b'@'
                | b','
                | b';'
                | b':'
                | b'\\'
                | b'"'
                | b'/'
                | b'['
                | b']'
                | b'?'
                | b'='
                | b'{'
                | b'}'
        )
}

const fn is_value_byte(b: u8) -> bool {
    0x20 <= b && b < 0x7f && b != b'"' && b != b';' && b != b'\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        assert_eq!(
            extract_session_value("session=abc.def.admin; other=1", "session"),
            "abc.def.admin"
        );
        assert_eq!(extract_session_value("other=1;session=xyz", "session"), "xyz");
    }

    #[test]
    fn missing_cookie_is_empty() {
        assert_eq!(extract_session_value("", "session"), "");
        assert_eq!(extract_session_value("   ;  ; ", "session"), "");
        assert_eq!(extract_session_value("other=1; sess=2", "session"), "");
        assert_eq!(extract_session_value("Session=1", "session"), "");
    }

    #[test]
    fn first_duplicate_wins() {
        assert_eq!(
            extract_session_value("session=first; session=second", "session"),
            "first"
        );
    }

    #[test]
    fn strips_one_pair_of_quotes() {
        assert_eq!(extract_session_value(r#"session="a.b""#, "session"), "a.b");
        assert_eq!(extract_session_value(r#"session=""#, "session"), "");
    }

    #[test]
    fn skips_malformed_pairs() {
        // Invalid value bytes drop the pair entirely, letting a later one match.
        assert_eq!(
            extract_session_value("session=a\\b; session=ok", "session"),
            "ok"
        );
        assert_eq!(extract_session_value("session=a\"b", "session"), "");
        assert_eq!(extract_session_value("bad name=1; session=ok", "session"), "ok");
        assert_eq!(extract_session_value("=novalue; session=ok", "session"), "ok");
    }

    #[test]
    fn pair_without_equals_has_empty_value() {
        assert_eq!(
            cookies("session; other=1").collect::<Vec<_>>(),
            vec![("session", ""), ("other", "1")]
        );
    }

    #[test]
    fn trims_line_breaks_around_pairs() {
        assert_eq!(
            extract_session_value("other=1;\r\n session=abc.def \r\n", "session"),
            "abc.def"
        );
        assert_eq!(extract_session_value("\nsession\t=ok", "session"), "ok");
        // Values are not trimmed, so a control byte inside one voids the pair.
        assert_eq!(extract_session_value("session=\rok", "session"), "");
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(extract_session_value("session=a=b", "session"), "a=b");
    }
}
