//! A line-oriented parser for DNS zonefiles.
//!
//! This crate reads the textual zonefile format of [RFC 1035], section 5,
//! into a sequence of entries that keeps the order and the comments of the
//! source. Each entry can be rendered back into zonefile text, so a zonefile
//! can be read, changed, and written out again without losing its comments.
//!
//! The parser is a pure format parser. It doesn't know about record types
//! beyond the shape of their names, it doesn't interpret record data, it
//! doesn't make domain names absolute, and it leaves `$INCLUDE` directives
//! for the caller to resolve. TTLs are kept as strings, so TTLs with units
//! such as `5M`, `24H`, or `1D` survive unchanged.
//!
//! # Modules
//!
//! * [entry] contains the [`Entry`] type and the types of its variants,
//! * [zonefile] contains the parser itself,
//! * [present] contains the [`ZoneFileFormat`] trait for rendering entries,
//! * [scan] contains the helpers classifying lines and tokens, and
//! * [error] contains the error type.
//!
//! # Example
//!
//! ```
//! use zonefile_lines::{parse, Entry, ZoneFileFormat};
//!
//! let zone = "$TTL 1D\n\
//!             www 3600 IN A 192.0.2.1 ; web server\n";
//! let mut entries = parse(zone).unwrap();
//!
//! // Drop the TTLs of all records.
//! for entry in &mut entries {
//!     if let Entry::Record(record) = entry {
//!         record.ttl.clear();
//!     }
//! }
//!
//! assert_eq!(
//!     entries.to_presentation_string(),
//!     "$TTL 1D\n\
//!      www                       IN   A          192.0.2.1 ; web server\n"
//! );
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serialization and deserialization of all entry types
//!   via [serde](https://serde.rs/). This feature is enabled by default.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod entry;
pub mod error;
pub mod present;
pub mod scan;
pub mod zonefile;

#[cfg(test)]
mod logging;

pub use self::entry::{
    Comment, Entry, Include, Origin, RdataLine, Record, Ttl,
};
pub use self::error::{Error, ErrorKind};
pub use self::present::ZoneFileFormat;
pub use self::zonefile::{parse, Zonefile};
