//! A line-oriented zonefile parser.
//!
//! The parser provided by this module turns zonefile text into a sequence
//! of [`Entry`] values. It works in a single pass over the lines of the
//! data, keeping at most one unfinished record around while the record
//! data of that record spans several lines through a parenthesis group.
//!
//! Beyond the basic structure of the format very little is checked. The
//! parser knows the directives `$ORIGIN`, `$TTL`, and `$INCLUDE` and the
//! classes `IN`, `CH`, and `HS`. Record types are accepted as long as they
//! look like a type, record data isn't interpreted at all, and included
//! files are not read.
//!
//! The easiest way to use the parser is the [`parse`] function which
//! returns all entries of a zonefile at once:
//!
//! ```
//! use zonefile_lines::{parse, Entry};
//!
//! let entries = parse(
//!     "$ORIGIN example.com. ; root\n\
//!      @   3600 IN  A   (\n\
//!      192.0.2.1 )\n"
//! ).unwrap();
//! assert_eq!(entries.len(), 2);
//! assert!(matches!(entries[0], Entry::Origin(_)));
//! assert_eq!(entries[1].as_record().unwrap().rdata.len(), 2);
//! ```
//!
//! Alternatively, a [`Zonefile`] can be used as an iterator over the
//! entries.

use crate::entry::{Comment, Entry, Include, Origin, RdataLine, Record, Ttl};
use crate::error::{Error, ErrorKind};
use crate::scan::{self, Directive};
use bytes::buf::UninitSlice;
use bytes::{Buf, BufMut, BytesMut};
use tracing::{debug, trace};

//------------ parse ---------------------------------------------------------

/// Parses zonefile data into its entries.
///
/// Returns one entry per line except for blank lines, which are dropped,
/// and records spanning multiple lines, which become a single entry. The
/// first error aborts parsing.
pub fn parse(data: impl AsRef<[u8]>) -> Result<Vec<Entry>, Error> {
    Zonefile::from(data.as_ref()).collect()
}

//------------ Zonefile ------------------------------------------------------

/// A zonefile to be parsed.
///
/// A value of this types holds data to be parsed in memory and allows
/// fetching entries by acting as an iterator.
///
/// The type implements the `bytes::BufMut` trait for appending data directly
/// into the memory buffer. The function [`load`][Self::load] can be used to
/// create a value directly from a reader.
///
/// Once data has been added, you can simply iterate over the value to
/// get entries. The [`next_entry`][Self::next_entry] method provides an
/// alternative with a more question mark friendly signature. Once an error
/// has been returned, all remaining data is discarded and no more entries
/// are produced.
#[derive(Clone, Debug)]
pub struct Zonefile {
    /// The data not yet split into lines.
    buf: BytesMut,

    /// The number of the last line taken from the buffer.
    line: usize,

    /// The record waiting for the end of its parenthesis group.
    open: Option<OpenRecord>,
}

impl Zonefile {
    /// Creates a new, empty value.
    pub fn new() -> Self {
        Self::with_buf(BytesMut::new())
    }

    /// Creates a new, empty value with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_buf(BytesMut::with_capacity(capacity))
    }

    /// Creates a new value using the given buffer.
    fn with_buf(buf: BytesMut) -> Self {
        Zonefile {
            buf,
            line: 0,
            open: None,
        }
    }

    /// Creates a value by loading the data from the given reader.
    pub fn load(
        read: &mut impl std::io::Read,
    ) -> Result<Self, std::io::Error> {
        let mut buf = Self::new().writer();
        std::io::copy(read, &mut buf)?;
        Ok(buf.into_inner())
    }
}

impl Default for Zonefile {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&'a str> for Zonefile {
    fn from(src: &'a str) -> Self {
        Self::from(src.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Zonefile {
    fn from(src: &'a [u8]) -> Self {
        let mut res = Self::with_capacity(src.len());
        res.extend_from_slice(src);
        res
    }
}

impl Zonefile {
    /// Reserves at least `len` additional bytes in the buffer.
    pub fn reserve(&mut self, len: usize) {
        self.buf.reserve(len);
    }

    /// Appends the given slice to the end of the buffer.
    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        self.buf.extend_from_slice(slice)
    }
}

unsafe impl BufMut for Zonefile {
    fn remaining_mut(&self) -> usize {
        self.buf.remaining_mut()
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        self.buf.advance_mut(cnt);
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        self.buf.chunk_mut()
    }
}

impl Zonefile {
    /// Returns the next entry in the zonefile.
    ///
    /// Returns `Ok(None)` if the end of the data has been reached. Returns
    /// an error if parsing the next entry failed.
    ///
    /// This method is identical to the `next` method of the iterator
    /// implementation but has the return type transposed for easier use
    /// with the question mark operator.
    pub fn next_entry(&mut self) -> Result<Option<Entry>, Error> {
        let res = self.scan_entry();
        if let Err(err) = &res {
            debug!("aborting zonefile: {}", err);
            self.buf.clear();
            self.open = None;
        }
        res
    }

    /// Scans lines until an entry is complete or the data runs out.
    fn scan_entry(&mut self) -> Result<Option<Entry>, Error> {
        while let Some(line) = self.next_line() {
            // Only ASCII bytes carry meaning, anything else passes through.
            let line = String::from_utf8_lossy(&line);
            if let Some(entry) = self.scan_line(&line)? {
                trace!(line = self.line, "entry complete: {:?}", entry);
                return Ok(Some(entry));
            }
        }
        match self.open.take() {
            Some(open) => {
                Err(Error::new(ErrorKind::UnbalancedParens, open.line))
            }
            None => Ok(None),
        }
    }

    /// Takes the next line off the buffer.
    ///
    /// The line feed and a carriage return right before it are removed.
    fn next_line(&mut self) -> Option<BytesMut> {
        if self.buf.is_empty() {
            return None;
        }
        self.line += 1;
        let mut line = match self.buf.iter().position(|&ch| ch == b'\n') {
            Some(pos) => {
                let line = self.buf.split_to(pos);
                self.buf.advance(1);
                line
            }
            None => self.buf.split(),
        };
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(line)
    }

    /// Processes a single line.
    ///
    /// Returns an entry if the line completes one.
    fn scan_line(&mut self, line: &str) -> Result<Option<Entry>, Error> {
        if scan::is_blank(line) {
            return Ok(None);
        }
        let (content, comment) = scan::split_comment(line);

        if let Some(open) = self.open.as_mut() {
            if !open.push(content.trim(), comment) {
                return Ok(None);
            }
            trace!(line = self.line, "closing parenthesis group");
            return Ok(self
                .open
                .take()
                .map(|open| Entry::Record(open.record)));
        }

        let fields: Vec<_> = content.split_whitespace().collect();
        let first = match fields.first() {
            Some(first) => *first,
            None if comment.is_empty() => return Ok(None),
            None => return Ok(Some(Entry::Comment(Comment::new(comment)))),
        };
        match Directive::from_token(first) {
            Some(directive) => {
                self.scan_directive(directive, &fields, comment).map(Some)
            }
            None => self.scan_record(content, &fields, comment),
        }
    }

    /// Scans a control directive.
    fn scan_directive(
        &self,
        directive: Directive,
        fields: &[&str],
        comment: &str,
    ) -> Result<Entry, Error> {
        match (directive, fields) {
            (Directive::Origin, [_, name]) => {
                Ok(Origin::new(*name, comment).into())
            }
            (Directive::Ttl, [_, value]) => {
                Ok(Ttl::new(*value, comment).into())
            }
            (Directive::Include, [_, path]) => {
                Ok(Include::new(*path, None, comment).into())
            }
            (Directive::Include, [_, path, origin]) => {
                let origin = Some((*origin).into());
                Ok(Include::new(*path, origin, comment).into())
            }
            _ => Err(self.error(ErrorKind::MalformedDirective(directive))),
        }
    }

    /// Scans the first line of a resource record.
    ///
    /// Possible layouts of the fields are:
    ///
    ///   [<owner>] [<TTL>] [<class>] <type> <rdata>...
    ///
    /// The owner is present if the line doesn't start with white space. A
    /// TTL is recognized by its leading digit and only if it comes before
    /// the class.
    fn scan_record(
        &mut self,
        content: &str,
        mut fields: &[&str],
        comment: &str,
    ) -> Result<Option<Entry>, Error> {
        let mut record = Record::default();

        if !content.starts_with(|ch: char| ch == ' ' || ch == '\t') {
            record.owner = fields[0].into();
            fields = &fields[1..];
        }
        if fields.is_empty() {
            return Err(self.error(ErrorKind::MalformedRecord));
        }

        if fields.len() > 2 && scan::starts_with_digit(fields[0]) {
            record.ttl = fields[0].into();
            fields = &fields[1..];
        }
        if fields.len() > 2 && scan::is_class(fields[0]) {
            record.class = fields[0].into();
            fields = &fields[1..];
        }

        let (rtype, rdata) = match fields.split_first() {
            Some((rtype, rdata)) if !rdata.is_empty() => (*rtype, rdata),
            _ => return Err(self.error(ErrorKind::MalformedRecord)),
        };
        if !scan::is_type(rtype) {
            return Err(self.error(ErrorKind::InvalidType(rtype.into())));
        }
        record.rtype = rtype.into();

        let rdata = RdataLine::new(rdata.join(" "), comment);
        let opens_group = rdata.opens_group();
        record.rdata.push(rdata);

        if opens_group {
            trace!(line = self.line, "opening parenthesis group");
            self.open = Some(OpenRecord {
                record,
                line: self.line,
            });
            Ok(None)
        } else {
            Ok(Some(Entry::Record(record)))
        }
    }

    /// Creates an error for the current line.
    fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.line)
    }
}

impl Iterator for Zonefile {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

//------------ OpenRecord ----------------------------------------------------

/// A record whose parenthesis group has not been closed yet.
#[derive(Clone, Debug)]
struct OpenRecord {
    /// The record so far.
    record: Record,

    /// The line the record started on.
    line: usize,
}

impl OpenRecord {
    /// Appends a continuation line.
    ///
    /// The content is added verbatim, even if it looks like a directive or
    /// a new record. Returns whether the line closes the group.
    fn push(&mut self, content: &str, comment: &str) -> bool {
        let rdata = RdataLine::new(content, comment);
        let closes = rdata.closes_group();
        self.record.rdata.push(rdata);
        closes
    }
}

//============ Tests =========================================================
