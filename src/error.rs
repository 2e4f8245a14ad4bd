//! Errors returned when parsing a zonefile.

use crate::scan::Directive;
use core::fmt;

//------------ ErrorKind -----------------------------------------------------

/// The reason a zonefile could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A directive had the wrong number of fields.
    MalformedDirective(Directive),

    /// A record line was missing its type or its record data.
    MalformedRecord,

    /// The token in the type position of a record is not a valid type.
    ///
    /// A type must not start with a digit and may only contain ASCII
    /// letters and digits.
    InvalidType(String),

    /// The input ended while a record was still inside a parenthesis group.
    UnbalancedParens,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MalformedDirective(directive) => {
                write!(f, "bad data for {}", directive)
            }
            ErrorKind::MalformedRecord => f.write_str("bad data for record"),
            ErrorKind::InvalidType(rtype) => {
                write!(f, "bad type for record: {}", rtype)
            }
            ErrorKind::UnbalancedParens => f.write_str("unbalanced parens"),
        }
    }
}

//------------ Error ---------------------------------------------------------

/// An error that aborted parsing a zonefile.
///
/// The error carries the 1-based number of the line that caused it. For
/// [`ErrorKind::UnbalancedParens`] this is the line the unterminated record
/// started on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    line: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, line: usize) -> Self {
        Error { kind, line }
    }

    /// Returns what went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the 1-based number of the offending line.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.kind)
    }
}

impl std::error::Error for Error {}

//============ Tests =========================================================
