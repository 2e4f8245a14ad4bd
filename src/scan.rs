//! Classifying the lines and tokens of a zonefile.
//!
//! The parser works strictly line by line. This module provides the pieces
//! it needs to look at a single line: splitting off a comment, detecting
//! blank lines, recognizing directives, and classifying the tokens of a
//! record line.

use core::fmt;

//------------ Directive -----------------------------------------------------

/// A control directive of the zonefile format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Directive {
    /// `$ORIGIN <domain-name>`
    Origin,

    /// `$INCLUDE <file-name> [<domain-name>]`
    Include,

    /// `$TTL <ttl>`
    Ttl,
}

impl Directive {
    /// Recognizes the directive named by the first token of a line.
    ///
    /// Directive names are matched exactly. Any other token, including a
    /// lower case spelling of a directive, is not a directive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$ORIGIN" => Some(Directive::Origin),
            "$INCLUDE" => Some(Directive::Include),
            "$TTL" => Some(Directive::Ttl),
            _ => None,
        }
    }

    /// Returns the directive name as it appears in a zonefile.
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::Origin => "$ORIGIN",
            Directive::Include => "$INCLUDE",
            Directive::Ttl => "$TTL",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ Lines ---------------------------------------------------------

/// Splits a line into its content and its comment.
///
/// The comment starts at the first semicolon not immediately preceded by a
/// backslash. All spaces and tabs right before the semicolon belong to the
/// comment, so that `content + comment` is the original line. If there is
/// no comment, the whole line is content and the comment is empty.
pub fn split_comment(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    for (pos, &ch) in bytes.iter().enumerate() {
        if ch != b';' || (pos > 0 && bytes[pos - 1] == b'\\') {
            continue;
        }
        let mut start = pos;
        while start > 0 && is_space(bytes[start - 1]) {
            start -= 1;
        }
        return line.split_at(start);
    }
    (line, "")
}

/// Returns whether a line contains nothing but white space.
///
/// Such lines never produce an entry.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns whether the byte is a field separating space or tab.
pub fn is_space(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}

//------------ Tokens --------------------------------------------------------

/// Returns whether the token starts with an ASCII digit.
///
/// This is how a TTL is told apart from the other fields of a record.
pub fn starts_with_digit(token: &str) -> bool {
    token.as_bytes().first().map_or(false, u8::is_ascii_digit)
}

/// Returns whether the token is one of the classes `IN`, `CH`, or `HS`.
pub fn is_class(token: &str) -> bool {
    ["IN", "CH", "HS"]
        .iter()
        .any(|class| token.eq_ignore_ascii_case(class))
}

/// Returns whether the token can be a record type.
///
/// No list of known types is consulted. Any non-empty token of ASCII
/// letters and digits that doesn't start with a digit is accepted.
pub fn is_type(token: &str) -> bool {
    !token.is_empty()
        && !starts_with_digit(token)
        && token.bytes().all(|ch| ch.is_ascii_alphanumeric())
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@ IN A 192.0.2.1", "@ IN A 192.0.2.1", "")]
    #[case("$ORIGIN example.com. ; root", "$ORIGIN example.com.", " ; root")]
    #[case("a A 1.2.3.4\t \t;x", "a A 1.2.3.4", "\t \t;x")]
    #[case("; only a comment", "", "; only a comment")]
    #[case("   ; indented comment", "", "   ; indented comment")]
    #[case("txt TXT a\\;b ; real", "txt TXT a\\;b", " ; real")]
    #[case("txt TXT a\\;b", "txt TXT a\\;b", "")]
    #[case("x;;y", "x", ";;y")]
    fn split(
        #[case] line: &str,
        #[case] content: &str,
        #[case] comment: &str,
    ) {
        assert_eq!(split_comment(line), (content, comment));
        let (head, tail) = split_comment(line);
        assert_eq!([head, tail].concat(), line);
    }

    #[test]
    fn blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(is_blank("\r"));
        assert!(!is_blank(" ;"));
        assert!(!is_blank("x"));
    }

    #[test]
    fn directives() {
        assert_eq!(Directive::from_token("$ORIGIN"), Some(Directive::Origin));
        assert_eq!(
            Directive::from_token("$INCLUDE"),
            Some(Directive::Include)
        );
        assert_eq!(Directive::from_token("$TTL"), Some(Directive::Ttl));
        assert_eq!(Directive::from_token("$origin"), None);
        assert_eq!(Directive::from_token("$GENERATE"), None);
        assert_eq!(Directive::Include.as_str(), "$INCLUDE");
    }

    #[rstest]
    #[case("IN", true)]
    #[case("in", true)]
    #[case("Ch", true)]
    #[case("hs", true)]
    #[case("ANY", false)]
    #[case("INX", false)]
    fn classes(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_class(token), expected);
    }

    #[rstest]
    #[case("A", true)]
    #[case("AAAA", true)]
    #[case("TYPE65534", true)]
    #[case("mx", true)]
    #[case("1A", false)]
    #[case("NSEC-3", false)]
    #[case("", false)]
    fn types(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_type(token), expected);
    }

    #[test]
    fn digits() {
        assert!(starts_with_digit("3600"));
        assert!(starts_with_digit("1D"));
        assert!(!starts_with_digit("IN"));
        assert!(!starts_with_digit(""));
    }
}
