//! The entries of a zonefile.
//!
//! A parsed zonefile is a sequence of [`Entry`] values, one per non-blank
//! line of the source, except that a record spanning several lines through
//! a parenthesis group is a single entry. All values are kept as the text
//! found in the zonefile. Domain names are neither made absolute nor
//! normalized, TTLs keep their unit suffixes, and record data is opaque.
//!
//! Every entry type implements [`ZoneFileFormat`] and
//! [`Display`](fmt::Display) to render the entry back into zonefile text.
//! Rendering always reflects the current field values, so an entry can be
//! modified before being written out again.

use crate::present::{ZoneFileFormat, ZoneFileFormatter};
use crate::scan;
use core::fmt;

//------------ Entry ---------------------------------------------------------

/// An entry of a zonefile.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Entry {
    /// An `$ORIGIN` directive.
    Origin(Origin),

    /// A `$TTL` directive.
    Ttl(Ttl),

    /// An `$INCLUDE` directive.
    ///
    /// The referenced file is not read. Including it is left to the caller.
    Include(Include),

    /// A line holding only a comment.
    Comment(Comment),

    /// A resource record.
    Record(Record),
}

impl Entry {
    /// Returns the record if this entry is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Entry::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns a mutable reference to the record if this entry is one.
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Entry::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Origin> for Entry {
    fn from(origin: Origin) -> Self {
        Entry::Origin(origin)
    }
}

impl From<Ttl> for Entry {
    fn from(ttl: Ttl) -> Self {
        Entry::Ttl(ttl)
    }
}

impl From<Include> for Entry {
    fn from(include: Include) -> Self {
        Entry::Include(include)
    }
}

impl From<Comment> for Entry {
    fn from(comment: Comment) -> Self {
        Entry::Comment(comment)
    }
}

impl From<Record> for Entry {
    fn from(record: Record) -> Self {
        Entry::Record(record)
    }
}

impl ZoneFileFormat for Entry {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        match self {
            Entry::Origin(origin) => origin.present(w),
            Entry::Ttl(ttl) => ttl.present(w),
            Entry::Include(include) => include.present(w),
            Entry::Comment(comment) => comment.present(w),
            Entry::Record(record) => record.present(w),
        }
    }
}

//------------ Origin --------------------------------------------------------

/// The `$ORIGIN` directive.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Origin {
    /// The new origin name.
    pub name: String,

    /// The comment after the directive including leading white space.
    pub comment: String,
}

impl Origin {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Origin {
            name: name.into(),
            comment: comment.into(),
        }
    }
}

impl ZoneFileFormat for Origin {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        writeln!(w, "$ORIGIN {}{}", self.name, self.comment)
    }
}

//------------ Ttl -----------------------------------------------------------

/// The `$TTL` directive.
///
/// The value is kept as a string so it can hold TTLs with units such as
/// `5M`, `24H`, or `1D`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Ttl {
    /// The default TTL.
    pub value: String,

    /// The comment after the directive including leading white space.
    pub comment: String,
}

impl Ttl {
    pub fn new(value: impl Into<String>, comment: impl Into<String>) -> Self {
        Ttl {
            value: value.into(),
            comment: comment.into(),
        }
    }
}

impl ZoneFileFormat for Ttl {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        writeln!(w, "$TTL {}{}", self.value, self.comment)
    }
}

//------------ Include -------------------------------------------------------

/// The `$INCLUDE` directive.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Include {
    /// The path of the file to be included.
    pub path: String,

    /// The initial origin name of the included file, if provided.
    pub origin: Option<String>,

    /// The comment after the directive including leading white space.
    pub comment: String,
}

impl Include {
    pub fn new(
        path: impl Into<String>,
        origin: Option<String>,
        comment: impl Into<String>,
    ) -> Self {
        Include {
            path: path.into(),
            origin,
            comment: comment.into(),
        }
    }
}

impl ZoneFileFormat for Include {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        write!(w, "$INCLUDE {}", self.path)?;
        match self.origin.as_deref() {
            Some(origin) if !origin.is_empty() => write!(w, " {}", origin)?,
            _ => {}
        }
        writeln!(w, "{}", self.comment)
    }
}

//------------ Comment -------------------------------------------------------

/// A line containing only a comment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Comment {
    /// The comment including the semicolon and leading white space.
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }
}

impl ZoneFileFormat for Comment {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        writeln!(w, "{}", self.text)
    }
}

//------------ RdataLine -----------------------------------------------------

/// The record data found on a single line.
///
/// A parenthesis group lets record data span several lines. Each of these
/// lines becomes one value of this type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RdataLine {
    /// The record data of the line.
    ///
    /// On the first line of a record the tokens are joined by single
    /// spaces. Continuation lines are kept as they are, minus surrounding
    /// white space.
    pub text: String,

    /// The comment at the end of the line including leading white space.
    pub comment: String,
}

impl RdataLine {
    pub fn new(text: impl Into<String>, comment: impl Into<String>) -> Self {
        RdataLine {
            text: text.into(),
            comment: comment.into(),
        }
    }

    /// Returns whether the line opens a parenthesis group it doesn't close.
    pub fn opens_group(&self) -> bool {
        self.text.contains('(') && !self.closes_group()
    }

    /// Returns whether the line ends a parenthesis group.
    pub fn closes_group(&self) -> bool {
        self.text.ends_with(')')
    }
}

//------------ Record --------------------------------------------------------

/// A resource record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Record {
    /// The owner name of the record.
    ///
    /// This is empty if the record line started with white space. The
    /// record then belongs to the last owner given explicitly, which the
    /// caller has to keep track of.
    pub owner: String,

    /// The TTL of the record if given, including any unit suffix.
    pub ttl: String,

    /// The class of the record if given.
    pub class: String,

    /// The record type.
    pub rtype: String,

    /// The record data, one item per source line.
    pub rdata: Vec<RdataLine>,
}

impl Record {
    /// Returns whether the record data spans more than one line.
    pub fn is_continued(&self) -> bool {
        self.rdata.len() > 1
    }
}

impl ZoneFileFormat for Record {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        let (first, tail) = match self.rdata.split_first() {
            Some((first, tail)) => (Some(first), tail),
            None => (None, &[][..]),
        };

        let mut line = format!(
            "{:<20} {:<4} {:<4} {:<10} ",
            self.owner, self.ttl, self.class, self.rtype
        );
        if let Some(first) = first {
            line.push_str(&first.text);
        }
        writeln!(
            w,
            "{}{}",
            line,
            first.map_or("", |first| first.comment.as_str())
        )?;

        if tail.is_empty() {
            return Ok(());
        }
        let indent = continuation_indent(&line);
        for rdata in tail {
            if rdata.text.is_empty() {
                // A comment-only line keeps its own indentation.
                writeln!(w, "{}", rdata.comment)?;
            } else {
                writeln!(
                    w,
                    "{:indent$}{}{}",
                    "",
                    rdata.text,
                    rdata.comment
                )?;
            }
        }
        Ok(())
    }
}

/// Returns the indentation of the continuation lines of a record.
///
/// Continuation lines line up with the first non-blank character after the
/// last opening parenthesis of the first line. Without a parenthesis, they
/// are indented by a single space.
fn continuation_indent(line: &str) -> usize {
    let pos = match line.rfind('(') {
        Some(pos) => pos,
        None => return 1,
    };
    let spaces = line[pos + 1..]
        .bytes()
        .take_while(|&ch| scan::is_space(ch))
        .count();
    line[..pos].chars().count() + 1 + spaces
}

//------------ Display -------------------------------------------------------

macro_rules! display_zone_file {
    ( $( $type:ident ),* ) => {
        $(
            impl fmt::Display for $type {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    self.write_presentation(f)
                }
            }
        )*
    }
}

display_zone_file!(Entry, Origin, Ttl, Include, Comment, Record);

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn directives() {
        assert_eq!(
            Origin::new("example.com.", " ; root").to_string(),
            "$ORIGIN example.com. ; root\n"
        );
        assert_eq!(Ttl::new("1D", "").to_string(), "$TTL 1D\n");
        assert_eq!(
            Include::new("zone.db", None, "").to_string(),
            "$INCLUDE zone.db\n"
        );
        assert_eq!(
            Include::new("zone.db", Some("sub.example.com.".into()), " ; x")
                .to_string(),
            "$INCLUDE zone.db sub.example.com. ; x\n"
        );
        assert_eq!(
            Include::new("zone.db", Some(String::new()), "").to_string(),
            "$INCLUDE zone.db\n"
        );
        assert_eq!(Comment::new("; hello").to_string(), "; hello\n");
    }

    #[test]
    fn single_line_record() {
        let record = Record {
            owner: "www".into(),
            ttl: "3600".into(),
            class: "IN".into(),
            rtype: "A".into(),
            rdata: vec![RdataLine::new("192.0.2.1", " ; web")],
        };
        assert_eq!(
            record.to_string(),
            "www                  3600 IN   A          192.0.2.1 ; web\n"
        );
    }

    #[test]
    fn record_without_ttl_and_class() {
        let record = Record {
            rtype: "MX".into(),
            rdata: vec![RdataLine::new("10 mail", "")],
            ..Default::default()
        };
        assert_eq!(
            record.to_string(),
            "                               MX         10 mail\n"
        );
    }

    #[test]
    fn continuation_aligns_after_paren() {
        let record = Record {
            owner: "@".into(),
            class: "IN".into(),
            rtype: "SOA".into(),
            rdata: vec![
                RdataLine::new("ns1 hostmaster ( 2024010101", " ; serial"),
                RdataLine::new("3600", ""),
                RdataLine::new("900 )", " ; end"),
            ],
            ..Default::default()
        };
        let first = "@                         IN   SOA        \
                     ns1 hostmaster ( 2024010101 ; serial\n";
        let column = first.find('(').unwrap() + 2;
        let mut expected = String::from(first);
        expected.push_str(&" ".repeat(column));
        expected.push_str("3600\n");
        expected.push_str(&" ".repeat(column));
        expected.push_str("900 ) ; end\n");
        assert_eq!(record.to_string(), expected);
    }

    #[test]
    fn continuation_without_paren() {
        let record = Record {
            owner: "a".into(),
            rtype: "TXT".into(),
            rdata: vec![
                RdataLine::new("\"x\"", ""),
                RdataLine::new("\"y\")", ""),
            ],
            ..Default::default()
        };
        assert!(record.to_string().ends_with("\n \"y\")\n"));
    }

    #[test]
    fn paren_in_comment_is_ignored() {
        assert_eq!(continuation_indent("a  SOA x (  1"), 12);
        assert_eq!(continuation_indent("a  SOA x ("), 10);
        let record = Record {
            owner: "a".into(),
            rtype: "TXT".into(),
            rdata: vec![
                RdataLine::new("x", " ; (not a group"),
                RdataLine::new("y", ""),
            ],
            ..Default::default()
        };
        assert!(record.to_string().ends_with("group\n y\n"));
    }

    #[test]
    fn comment_only_continuation() {
        let record = Record {
            owner: "a".into(),
            rtype: "SOA".into(),
            rdata: vec![
                RdataLine::new("x y (", ""),
                RdataLine::new("", "\t\t; serial follows"),
                RdataLine::new("1 )", ""),
            ],
            ..Default::default()
        };
        let rendered = record.to_string();
        let mut lines = rendered.lines().skip(1);
        assert_eq!(lines.next(), Some("\t\t; serial follows"));
        assert!(lines.next().unwrap().ends_with(" 1 )"));
    }

    #[test]
    fn empty_rdata() {
        let record = Record {
            owner: "a".into(),
            rtype: "A".into(),
            ..Default::default()
        };
        assert_eq!(
            record.to_string(),
            "a                              A          \n"
        );
    }

    #[test]
    fn group_detection() {
        assert!(RdataLine::new("ns1 host (", "").opens_group());
        assert!(!RdataLine::new("( 1 2 )", "").opens_group());
        assert!(!RdataLine::new("1.2.3.4", "").opens_group());
        assert!(RdataLine::new("1 2 )", "").closes_group());
    }

    #[test]
    fn entry_accessors() {
        let mut entry = Entry::from(Record {
            ttl: "60".into(),
            ..Default::default()
        });
        entry.as_record_mut().unwrap().ttl.clear();
        assert_eq!(entry.as_record().unwrap().ttl, "");
        assert!(Entry::from(Comment::new(";")).as_record().is_none());
    }
}
